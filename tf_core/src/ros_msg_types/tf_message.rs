use crate::TransformStamped;

/// A batch of transforms broadcast as one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TFMessage {
    pub transforms: Vec<TransformStamped>,
}

impl TFMessage {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl From<Vec<TransformStamped>> for TFMessage {
    fn from(transforms: Vec<TransformStamped>) -> Self {
        Self { transforms }
    }
}
