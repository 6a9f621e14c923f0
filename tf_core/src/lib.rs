//! Message types for broadcasting coordinate frame transforms.
//!
//! These mirror the `geometry_msgs/TransformStamped` and `tf2_msgs/TFMessage`
//! layouts so that a batch of link transforms can be handed to any transport
//! as a single message.

mod ros_msg_types;
pub mod transforms;

pub use ros_msg_types::*;
