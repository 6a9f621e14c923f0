use tf_core::{TFMessage, TransformStamped};

use crate::{
    tf_bus::{TfBus, TfPublish, TfPublisher, TF_QUEUE_SIZE, TF_TOPIC},
    tf_error::TfError,
};

/// Broadcast tf messages
///
/// Example usage:
///
/// ```
/// use robot_state_publisher::{TfBroadcaster, TfBus, Time, TransformStamped, TF_TOPIC};
///
/// let bus = TfBus::new();
/// let mut subscriber = bus.subscribe(TF_TOPIC).unwrap();
/// let broadcaster = TfBroadcaster::new(&bus).unwrap();
///
/// let mut tf = TransformStamped::default();
/// tf.header.frame_id = "map".to_string();
/// tf.child_frame_id = "base_link".to_string();
/// tf.header.stamp = Time::now();
/// tf.transform.translation.x = 1.0;
/// broadcaster.send_transform(tf.clone()).unwrap();
///
/// let received = subscriber.try_next().unwrap().unwrap();
/// assert_eq!(received.transforms, [tf]);
/// ```
#[derive(Debug)]
pub struct TfBroadcaster<P: TfPublish = TfPublisher> {
    publisher: P,
}

impl TfBroadcaster {
    /// Create a new TfBroadcaster on the `/tf` topic
    pub fn new(bus: &TfBus) -> Result<Self, TfError> {
        Self::with_topic(bus, TF_TOPIC)
    }

    pub fn with_topic(bus: &TfBus, topic: &str) -> Result<Self, TfError> {
        Ok(Self::from_publisher(bus.advertise(topic, TF_QUEUE_SIZE)?))
    }
}

impl<P: TfPublish> TfBroadcaster<P> {
    pub fn from_publisher(publisher: P) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Broadcast transform
    pub fn send_transform(&self, tf: TransformStamped) -> Result<(), TfError> {
        self.send_transforms(vec![tf])
    }

    /// Broadcast all transforms as a single message
    pub fn send_transforms(&self, transforms: Vec<TransformStamped>) -> Result<(), TfError> {
        self.publisher.publish(&TFMessage { transforms })
    }
}
