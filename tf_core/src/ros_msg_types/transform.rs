use nalgebra as na;

/// Rigid-body transform as carried on the wire: a translation and a
/// (w, i, j, k) rotation quaternion.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub translation: na::Vector3<f64>,
    pub rotation: na::Quaternion<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: na::Vector3::zeros(),
            rotation: na::Quaternion::identity(),
        }
    }
}
