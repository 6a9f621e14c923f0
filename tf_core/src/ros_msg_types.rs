mod header;
mod tf_message;
mod time;
mod transform;
mod transform_stamped;

pub use header::*;
pub use tf_message::*;
pub use time::*;
pub use transform::*;
pub use transform_stamped::*;
