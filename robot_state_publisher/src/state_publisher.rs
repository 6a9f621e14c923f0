use std::sync::Arc;

use tf_core::{transforms::isometry_to_transform, Header, Time, TransformStamped};

use crate::{
    config::PublisherConfig,
    kinematic_tree::KinematicTree,
    tf_broadcaster::TfBroadcaster,
    tf_bus::{TfBus, TfPublish, TfPublisher, TF_QUEUE_SIZE},
    tf_error::TfError,
    tree_fk_solver::{JointPositions, TreeFkSolver},
};

/// Turns joint positions into one published batch of link transforms.
///
/// Each call to [RobotStatePublisher::publish_transforms] is independent: the
/// records are built into a fresh vector, so the same joint positions and
/// stamp always publish the same batch.
#[derive(Debug)]
pub struct RobotStatePublisher<P: TfPublish = TfPublisher> {
    solver: TreeFkSolver,
    broadcaster: TfBroadcaster<P>,
    flatten_tree: bool,
    root: String,
}

impl RobotStatePublisher {
    /// Advertise `config.tf_topic` on the bus and publish there.
    pub fn new(
        tree: Arc<KinematicTree>,
        bus: &TfBus,
        config: &PublisherConfig,
    ) -> Result<Self, TfError> {
        let publisher = bus.advertise(&config.tf_topic, TF_QUEUE_SIZE)?;
        Ok(Self::with_publisher(tree, publisher, config.flatten_tree))
    }
}

impl<P: TfPublish> RobotStatePublisher<P> {
    pub fn with_publisher(tree: Arc<KinematicTree>, publisher: P, flatten_tree: bool) -> Self {
        let root = tree.root().to_string();
        Self {
            solver: TreeFkSolver::new(tree),
            broadcaster: TfBroadcaster::from_publisher(publisher),
            flatten_tree,
            root,
        }
    }

    pub fn tree(&self) -> &KinematicTree {
        self.solver.tree()
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn flatten_tree(&self) -> bool {
        self.flatten_tree
    }

    pub fn broadcaster(&self) -> &TfBroadcaster<P> {
        &self.broadcaster
    }

    /// One transform per link the solver could place, sorted by link name and
    /// stamped with `stamp`.
    pub fn compute_transforms(
        &self,
        joint_positions: &JointPositions,
        stamp: Time,
    ) -> Result<Vec<TransformStamped>, TfError> {
        let link_poses = self
            .solver
            .joint_to_cart(joint_positions, self.flatten_tree);
        if link_poses.is_empty() {
            return Err(TfError::InvalidKinematicState);
        }

        Ok(link_poses
            .into_iter()
            .map(|(link, pose)| TransformStamped {
                header: Header {
                    stamp,
                    frame_id: pose.frame_id,
                },
                child_frame_id: link,
                transform: isometry_to_transform(&pose.pose),
            })
            .collect())
    }

    /// Compute and publish all link transforms as one message.
    ///
    /// Returns the number of transforms published. Nothing is published if
    /// the solver could not place any link.
    pub fn publish_transforms(
        &self,
        joint_positions: &JointPositions,
        stamp: Time,
    ) -> Result<usize, TfError> {
        let transforms = match self.compute_transforms(joint_positions, stamp) {
            Ok(transforms) => transforms,
            Err(err) => {
                log::error!("Could not compute link poses. The tree or the state is invalid.");
                return Err(err);
            }
        };
        let count = transforms.len();
        self.broadcaster.send_transforms(transforms)?;
        Ok(count)
    }
}
