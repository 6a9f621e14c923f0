use na::geometry::{Isometry3, Translation3, UnitQuaternion};
use nalgebra as na;

use crate::{Header, Time, Transform, TransformStamped};

pub fn isometry_from_transform(tf: &Transform) -> Isometry3<f64> {
    let trans = Translation3::from(tf.translation);
    let rot = UnitQuaternion::new_normalize(tf.rotation);

    Isometry3::from_parts(trans, rot)
}

pub fn isometry_to_transform(iso: &Isometry3<f64>) -> Transform {
    Transform {
        translation: iso.translation.vector,
        rotation: *iso.rotation.quaternion(),
    }
}

///Chain multiple transforms together. Takes in a slice of transforms. The slice should be in order of desired transformations
pub fn chain_transforms(transforms: &[Transform]) -> Transform {
    let mut final_transform = Isometry3::identity();
    for t in transforms {
        final_transform *= isometry_from_transform(t);
    }
    isometry_to_transform(&final_transform)
}

pub fn to_transform_stamped(
    tf: Transform,
    from: impl Into<String>,
    to: impl Into<String>,
    stamp: Time,
) -> TransformStamped {
    TransformStamped {
        header: Header {
            frame_id: from.into(),
            stamp,
        },
        child_frame_id: to.into(),
        transform: tf,
    }
}
