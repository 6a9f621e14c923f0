use std::time::{SystemTime, UNIX_EPOCH};

const NSEC_PER_SEC: u32 = 1_000_000_000;

/// A point in time as seconds and nanoseconds since the unix epoch.
///
/// `nanosec` is kept below one second so the derived ordering is the
/// chronological one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

impl Time {
    pub const ZERO: Self = Self { sec: 0, nanosec: 0 };

    /// Whole seconds carried out of `nanosec` saturate at `i32::MAX`.
    pub fn new(sec: i32, nanosec: u32) -> Self {
        Self {
            sec: sec.saturating_add((nanosec / NSEC_PER_SEC) as i32),
            nanosec: nanosec % NSEC_PER_SEC,
        }
    }

    /// Wall clock time. Falls back to zero if the clock is before the epoch.
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => Self {
                sec: since_epoch.as_secs() as i32,
                nanosec: since_epoch.subsec_nanos(),
            },
            Err(_) => Self::ZERO,
        }
    }

    pub fn from_sec_f64(secs: f64) -> Self {
        let whole = secs.floor();
        let nanosec = ((secs - whole) * f64::from(NSEC_PER_SEC)).round() as u32;
        Self::new(whole as i32, nanosec)
    }

    pub fn to_sec_f64(self) -> f64 {
        f64::from(self.sec) + f64::from(self.nanosec) / f64::from(NSEC_PER_SEC)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
