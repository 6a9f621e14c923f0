use std::{collections::BTreeMap, sync::Arc};

use nalgebra::Isometry3;
use tf_core::Time;

use crate::{joint::Joint, kinematic_tree::KinematicTree};

/// Joint name -> position (radians for rotational joints, meters for prismatic).
pub type JointPositions = BTreeMap<String, f64>;

/// Link name -> pose of that link.
pub type LinkPoses = BTreeMap<String, StampedPose>;

/// Pose of a link expressed in `frame_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedPose {
    pub frame_id: String,
    /// Always zero when produced by the solver, the publisher stamps records itself.
    pub stamp: Time,
    pub pose: Isometry3<f64>,
}

/// Full forward kinematics over a whole tree: computes a pose for every link
/// reachable from the root given a set of joint positions.
#[derive(Debug, Clone)]
pub struct TreeFkSolver {
    tree: Arc<KinematicTree>,
}

impl TreeFkSolver {
    pub fn new(tree: Arc<KinematicTree>) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &KinematicTree {
        &self.tree
    }

    /// Pose of every non-root link.
    ///
    /// With `flatten_tree` poses are relative to the root link, otherwise each
    /// pose is relative to the link's parent. A movable joint without a
    /// position (directly or through a mimic source) cuts off its whole branch.
    pub fn joint_to_cart(&self, joint_positions: &JointPositions, flatten_tree: bool) -> LinkPoses {
        let mut link_poses = LinkPoses::new();
        let root = self.tree.root();
        for child in self.tree.children(root) {
            self.add_frame_to_map(
                joint_positions,
                &mut link_poses,
                root,
                &Isometry3::identity(),
                child,
                flatten_tree,
            );
        }
        link_poses
    }

    fn add_frame_to_map(
        &self,
        joint_positions: &JointPositions,
        link_poses: &mut LinkPoses,
        frame_id: &str,
        previous: &Isometry3<f64>,
        link: &str,
        flatten_tree: bool,
    ) {
        let Some(segment) = self.tree.segment(link) else {
            return;
        };
        let Some(joint) = segment.joint.as_ref() else {
            return;
        };
        let Some(position) = joint_position(joint, joint_positions) else {
            log::debug!(
                "could not find value for joint '{}', skipping the branch below '{link}'",
                joint.name
            );
            return;
        };

        let pose = previous * joint.pose(position);
        link_poses.insert(
            link.to_string(),
            StampedPose {
                frame_id: frame_id.to_string(),
                stamp: Time::ZERO,
                pose,
            },
        );

        for child in &segment.children {
            if flatten_tree {
                self.add_frame_to_map(joint_positions, link_poses, frame_id, &pose, child, true);
            } else {
                self.add_frame_to_map(
                    joint_positions,
                    link_poses,
                    link,
                    &Isometry3::identity(),
                    child,
                    false,
                );
            }
        }
    }
}

fn joint_position(joint: &Joint, joint_positions: &JointPositions) -> Option<f64> {
    if !joint.is_movable() {
        return Some(0.0);
    }
    if let Some(position) = joint_positions.get(&joint.name) {
        return Some(*position);
    }
    let mimic = joint.mimic.as_ref()?;
    joint_positions
        .get(&mimic.joint)
        .map(|source| mimic.position(*source))
}
