//! Publishes the state of a robot as coordinate frame transforms.
//!
//! A [KinematicTree] is loaded from a URDF robot description. Given the
//! current joint positions, a [RobotStatePublisher] computes the pose of every
//! link with forward kinematics and broadcasts all of them as one
//! [TFMessage] on a [TfBus] topic, either relative to each link's parent or,
//! with `flatten_tree`, relative to the root link.
//!
//! Example usage:
//!
//! ```
//! use std::sync::Arc;
//!
//! use robot_state_publisher::{
//!     JointPositions, KinematicTree, PublisherConfig, RobotStatePublisher, TfBus, Time, TF_TOPIC,
//! };
//!
//! let urdf = r#"
//! <robot name="pan_tilt">
//!   <link name="base"/>
//!   <link name="head"/>
//!   <joint name="pan" type="continuous">
//!     <origin xyz="0 0 0.3" rpy="0 0 0"/>
//!     <parent link="base"/>
//!     <child link="head"/>
//!     <axis xyz="0 0 1"/>
//!     <limit effort="1" velocity="1"/>
//!   </joint>
//! </robot>
//! "#;
//! let tree = Arc::new(KinematicTree::from_urdf_str(urdf).unwrap());
//!
//! let bus = TfBus::new();
//! let mut subscriber = bus.subscribe(TF_TOPIC).unwrap();
//! let publisher = RobotStatePublisher::new(tree, &bus, &PublisherConfig::default()).unwrap();
//!
//! let joints = JointPositions::from([("pan".to_string(), 0.5)]);
//! let count = publisher.publish_transforms(&joints, Time::now()).unwrap();
//! assert_eq!(count, 1);
//!
//! let msg = subscriber.try_next().unwrap().unwrap();
//! assert_eq!(msg.transforms[0].header.frame_id, "base");
//! assert_eq!(msg.transforms[0].child_frame_id, "head");
//! ```

mod config;
mod joint;
mod kinematic_tree;
mod state_publisher;
mod tf_broadcaster;
mod tf_bus;
mod tf_error;
mod tree_fk_solver;

pub use config::{PublisherConfig, ReadConfigError};
pub use joint::{Joint, JointType, Mimic};
pub use kinematic_tree::{KinematicTree, Segment};
pub use state_publisher::RobotStatePublisher;
pub use tf_broadcaster::TfBroadcaster;
pub use tf_bus::{TfBus, TfPublish, TfPublisher, TfSubscriber, TF_QUEUE_SIZE, TF_TOPIC};
pub use tf_core::{transforms, Header, TFMessage, Time, Transform, TransformStamped};
pub use tf_error::TfError;
pub use tree_fk_solver::{JointPositions, LinkPoses, StampedPose, TreeFkSolver};
