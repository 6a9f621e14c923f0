use na::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use nalgebra as na;

/// Motion a joint allows between its parent and child link.
///
/// URDF floating, planar and spherical joints have no single position value
/// and are loaded as `Fixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointType {
    Fixed,
    Revolute,
    Continuous,
    Prismatic,
}

impl JointType {
    pub fn is_movable(self) -> bool {
        self != JointType::Fixed
    }
}

/// Position of a joint driven by another joint: `multiplier * source + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mimic {
    pub joint: String,
    pub multiplier: f64,
    pub offset: f64,
}

impl Mimic {
    pub fn new(joint: impl Into<String>, multiplier: f64, offset: f64) -> Self {
        Self {
            joint: joint.into(),
            multiplier,
            offset,
        }
    }

    pub fn position(&self, source: f64) -> f64 {
        self.multiplier * source + self.offset
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub joint_type: JointType,
    /// Pose of the child link frame in the parent link frame at zero position.
    pub origin: Isometry3<f64>,
    /// Axis of motion in the child link frame.
    pub axis: Unit<Vector3<f64>>,
    pub mimic: Option<Mimic>,
}

impl Joint {
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        origin: Isometry3<f64>,
        axis: Vector3<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            origin,
            axis: Unit::try_new(axis, f64::EPSILON).unwrap_or_else(Vector3::x_axis),
            mimic: None,
        }
    }

    pub fn fixed(name: impl Into<String>, origin: Isometry3<f64>) -> Self {
        Self::new(name, JointType::Fixed, origin, Vector3::x())
    }

    pub fn revolute(name: impl Into<String>, origin: Isometry3<f64>, axis: Vector3<f64>) -> Self {
        Self::new(name, JointType::Revolute, origin, axis)
    }

    pub fn continuous(name: impl Into<String>, origin: Isometry3<f64>, axis: Vector3<f64>) -> Self {
        Self::new(name, JointType::Continuous, origin, axis)
    }

    pub fn prismatic(name: impl Into<String>, origin: Isometry3<f64>, axis: Vector3<f64>) -> Self {
        Self::new(name, JointType::Prismatic, origin, axis)
    }

    pub fn with_mimic(mut self, mimic: Mimic) -> Self {
        self.mimic = Some(mimic);
        self
    }

    pub fn is_movable(&self) -> bool {
        self.joint_type.is_movable()
    }

    /// Pose of the child link in the parent link frame with the joint at `position`.
    pub fn pose(&self, position: f64) -> Isometry3<f64> {
        self.origin * self.motion(position)
    }

    fn motion(&self, position: f64) -> Isometry3<f64> {
        match self.joint_type {
            JointType::Revolute | JointType::Continuous => Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(&self.axis, position),
            ),
            JointType::Prismatic => Isometry3::from_parts(
                Translation3::from(self.axis.into_inner() * position),
                UnitQuaternion::identity(),
            ),
            JointType::Fixed => Isometry3::identity(),
        }
    }
}

pub(crate) fn isometry_from_urdf_pose(pose: &urdf_rs::Pose) -> Isometry3<f64> {
    let xyz = &pose.xyz;
    let rpy = &pose.rpy;
    Isometry3::from_parts(
        Translation3::new(xyz[0], xyz[1], xyz[2]),
        UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]),
    )
}

impl From<&urdf_rs::Joint> for Joint {
    fn from(joint: &urdf_rs::Joint) -> Self {
        let joint_type = match joint.joint_type {
            urdf_rs::JointType::Revolute => JointType::Revolute,
            urdf_rs::JointType::Continuous => JointType::Continuous,
            urdf_rs::JointType::Prismatic => JointType::Prismatic,
            _ => JointType::Fixed,
        };
        let axis = Vector3::new(joint.axis.xyz[0], joint.axis.xyz[1], joint.axis.xyz[2]);
        let mut converted = Joint::new(
            joint.name.clone(),
            joint_type,
            isometry_from_urdf_pose(&joint.origin),
            axis,
        );
        converted.mimic = joint.mimic.as_ref().map(|mimic| {
            Mimic::new(
                mimic.joint.clone(),
                mimic.multiplier.unwrap_or(1.0),
                mimic.offset.unwrap_or(0.0),
            )
        });
        converted
    }
}
