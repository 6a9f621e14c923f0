use thiserror::Error;

/// Enumerates the different types of errors
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum TfError {
    /// Forward kinematics produced no link poses, so there is nothing to publish.
    #[error("robot_state_publisher: InvalidKinematicState, could not compute link poses. The tree or the state is invalid.")]
    InvalidKinematicState,
    /// The robot description has no link that could serve as the root.
    #[error("robot_state_publisher: NoRoot, no link without a parent joint")]
    NoRoot,
    /// More than one link has no parent joint.
    #[error("robot_state_publisher: MultipleRoots {:?}", .0)]
    MultipleRoots(Vec<String>),
    /// A link was added twice, or is the child of more than one joint.
    #[error("robot_state_publisher: DuplicateLink {}", .0)]
    DuplicateLink(String),
    /// A joint refers to a link that is not part of the tree.
    #[error("robot_state_publisher: UnknownLink {} referenced by joint {}", .0, .1)]
    UnknownLink(String, String),
    /// Links that cannot be reached from the root, i.e. joints form a loop.
    #[error("robot_state_publisher: LoopDetected, links unreachable from root {}: {:?}", .0, .1)]
    LoopDetected(String, Vec<String>),
    /// The robot description could not be read or parsed.
    #[error("robot_state_publisher: urdf error {}", .0)]
    Urdf(String),
    /// In the event that a write is simultaneously happening with a read of the topic table
    #[error("robot_state_publisher: CouldNotAcquireLock")]
    CouldNotAcquireLock,
    /// Every sender of the topic, the bus included, has been dropped.
    #[error("robot_state_publisher: Disconnected from topic {}", .0)]
    Disconnected(String),
    /// Error of the transport used to broadcast transforms
    #[error("robot_state_publisher: publish error {:?}", .0)]
    Publish(String),
}
