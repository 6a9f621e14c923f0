use std::{f64::consts::FRAC_PI_2, path::PathBuf, sync::Arc};

use nalgebra::{Isometry3, Vector3};
use robot_state_publisher::{
    transforms::{chain_transforms, isometry_from_transform},
    Joint, JointPositions, KinematicTree, PublisherConfig, ReadConfigError, RobotStatePublisher,
    TfBus, TfError, Time, Transform, TransformStamped, TF_TOPIC,
};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}

/// base -(arm_joint, 1m up, about z)-> arm -(hand_joint, 0.5m along x, about z)-> hand
fn base_arm_hand() -> Arc<KinematicTree> {
    let mut tree = KinematicTree::new("base");
    tree.add_segment(
        "base",
        "arm",
        Joint::revolute(
            "arm_joint",
            Isometry3::translation(0.0, 0.0, 1.0),
            Vector3::z(),
        ),
    )
    .unwrap();
    tree.add_segment(
        "arm",
        "hand",
        Joint::revolute(
            "hand_joint",
            Isometry3::translation(0.5, 0.0, 0.0),
            Vector3::z(),
        ),
    )
    .unwrap();
    Arc::new(tree)
}

fn positions(values: &[(&str, f64)]) -> JointPositions {
    values
        .iter()
        .map(|(name, position)| (name.to_string(), *position))
        .collect()
}

fn find<'a>(transforms: &'a [TransformStamped], child: &str) -> &'a TransformStamped {
    transforms
        .iter()
        .find(|tf| tf.child_frame_id == child)
        .unwrap_or_else(|| panic!("no transform for {child}"))
}

fn assert_transform_eq(actual: &Transform, expected: &Transform) {
    let a = isometry_from_transform(actual);
    let b = isometry_from_transform(expected);
    assert!(
        (a.translation.vector - b.translation.vector).norm() < 1e-9,
        "{actual:?} != {expected:?}"
    );
    assert!(
        a.rotation.angle_to(&b.rotation) < 1e-9,
        "{actual:?} != {expected:?}"
    );
}

fn publisher(flatten_tree: bool) -> (TfBus, RobotStatePublisher) {
    let bus = TfBus::new();
    let config = PublisherConfig {
        flatten_tree,
        ..Default::default()
    };
    let publisher = RobotStatePublisher::new(base_arm_hand(), &bus, &config).unwrap();
    (bus, publisher)
}

#[test]
fn test_one_record_per_link_relative_to_parent() {
    let (bus, publisher) = publisher(false);
    let mut subscriber = bus.subscribe(TF_TOPIC).unwrap();
    let joints = positions(&[("arm_joint", 0.0), ("hand_joint", 0.0)]);

    let count = publisher
        .publish_transforms(&joints, Time::new(10, 0))
        .unwrap();
    assert_eq!(count, 2);

    let msg = subscriber.try_next().unwrap().unwrap();
    assert_eq!(msg.len(), 2);
    let arm = find(&msg.transforms, "arm");
    let hand = find(&msg.transforms, "hand");
    assert_eq!(arm.header.frame_id, "base");
    assert_eq!(hand.header.frame_id, "arm");
    assert_transform_eq(
        &arm.transform,
        &Transform {
            translation: Vector3::new(0.0, 0.0, 1.0),
            ..Default::default()
        },
    );
    assert_transform_eq(
        &hand.transform,
        &Transform {
            translation: Vector3::new(0.5, 0.0, 0.0),
            ..Default::default()
        },
    );

    // exactly one batch per call
    assert_eq!(subscriber.try_next().unwrap(), None);
}

#[test]
fn test_flattened_hand_is_composition() {
    let (_, relative) = publisher(false);
    let (_, flattened) = publisher(true);
    let joints = positions(&[("arm_joint", FRAC_PI_2), ("hand_joint", 0.25)]);
    let stamp = Time::new(3, 0);

    let relative = relative.compute_transforms(&joints, stamp).unwrap();
    let flattened = flattened.compute_transforms(&joints, stamp).unwrap();
    assert!(flattened.iter().all(|tf| tf.header.frame_id == "base"));

    let arm = find(&relative, "arm");
    let hand = find(&relative, "hand");
    assert_transform_eq(&find(&flattened, "arm").transform, &arm.transform);
    assert_transform_eq(
        &find(&flattened, "hand").transform,
        &chain_transforms(&[arm.transform.clone(), hand.transform.clone()]),
    );

    // a quarter turn of the arm swings the hand onto the y axis
    let hand_in_base = isometry_from_transform(&find(&flattened, "hand").transform);
    assert!((hand_in_base.translation.vector - Vector3::new(0.0, 0.5, 1.0)).norm() < 1e-9);
}

#[test]
fn test_stamp_is_propagated() {
    let (_, publisher) = publisher(true);
    let joints = positions(&[("arm_joint", 0.1), ("hand_joint", 0.2)]);
    let stamp = Time::new(1234, 5678);
    let transforms = publisher.compute_transforms(&joints, stamp).unwrap();
    assert!(transforms.iter().all(|tf| tf.header.stamp == stamp));
}

#[test]
fn test_same_input_same_output() {
    let (_, publisher) = publisher(false);
    let joints = positions(&[("arm_joint", 0.7), ("hand_joint", -0.3)]);
    let stamp = Time::new(5, 0);
    let first = publisher.compute_transforms(&joints, stamp).unwrap();
    let second = publisher.compute_transforms(&joints, stamp).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_missing_joint_drops_its_branch() {
    let (bus, publisher) = publisher(false);
    let mut subscriber = bus.subscribe(TF_TOPIC).unwrap();

    let count = publisher
        .publish_transforms(&positions(&[("arm_joint", 0.0)]), Time::new(1, 0))
        .unwrap();
    assert_eq!(count, 1);
    let msg = subscriber.try_next().unwrap().unwrap();
    assert_eq!(msg.transforms[0].child_frame_id, "arm");

    // without the first joint nothing can be placed
    let err = publisher
        .publish_transforms(&positions(&[("hand_joint", 0.0)]), Time::new(2, 0))
        .unwrap_err();
    assert_eq!(err, TfError::InvalidKinematicState);
    assert_eq!(subscriber.try_next().unwrap(), None);
}

#[test]
fn test_root_only_robot_is_invalid() {
    let tree = Arc::new(
        KinematicTree::from_urdf_str(r#"<robot name="lonely"><link name="base"/></robot>"#)
            .unwrap(),
    );
    let bus = TfBus::new();
    let mut subscriber = bus.subscribe(TF_TOPIC).unwrap();
    let publisher = RobotStatePublisher::new(tree, &bus, &PublisherConfig::default()).unwrap();

    for flatten in [false, true] {
        let publisher = RobotStatePublisher::with_publisher(
            publisher.tree().clone().into(),
            publisher.broadcaster().publisher().clone(),
            flatten,
        );
        assert_eq!(
            publisher.publish_transforms(&JointPositions::new(), Time::new(1, 0)),
            Err(TfError::InvalidKinematicState)
        );
    }
    assert_eq!(subscriber.try_next().unwrap(), None);
}

#[test]
fn test_pan_tilt_arm_from_files() {
    let tree = Arc::new(KinematicTree::from_urdf_file(data_file("pan_tilt_arm.urdf")).unwrap());
    let config = PublisherConfig::from_toml_file(data_file("publisher.toml")).unwrap();
    assert_eq!(tree.root(), "base_link");
    assert_eq!(
        tree.joint_names(),
        [
            "left_finger_joint",
            "pan_joint",
            "right_finger_joint",
            "tilt_joint",
        ]
    );

    let bus = TfBus::new();
    let publisher = RobotStatePublisher::new(tree.clone(), &bus, &config).unwrap();
    let transforms = publisher
        .compute_transforms(&config.joint_positions, Time::new(1, 0))
        .unwrap();

    // every link but the root, including the fixed camera and the mimic finger
    assert_eq!(transforms.len(), tree.num_links() - 1);
    for tf in &transforms {
        let parent = tree.parent(&tf.child_frame_id);
        assert_eq!(Some(tf.header.frame_id.as_str()), parent);
    }

    let right = isometry_from_transform(&find(&transforms, "right_finger").transform);
    assert!((right.translation.vector - Vector3::new(0.08, -0.03, 0.0)).norm() < 1e-9);
    let camera = isometry_from_transform(&find(&transforms, "camera_link").transform);
    assert!((camera.translation.vector - Vector3::new(0.04, 0.0, 0.02)).norm() < 1e-9);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_async_subscriber_receives_batches() {
    let (bus, publisher) = publisher(true);
    let mut subscriber = bus.subscribe(TF_TOPIC).unwrap();

    let receiver = tokio::spawn(async move {
        let mut stamps = Vec::new();
        for _ in 0..3 {
            let msg = subscriber.next().await.unwrap();
            assert_eq!(msg.len(), 2);
            stamps.push(msg.transforms[0].header.stamp);
        }
        stamps
    });

    let joints = positions(&[("arm_joint", 0.0), ("hand_joint", 0.0)]);
    for sec in 1..=3 {
        publisher
            .publish_transforms(&joints, Time::new(sec, 0))
            .unwrap();
    }

    let stamps = receiver.await.unwrap();
    assert_eq!(stamps, [Time::new(1, 0), Time::new(2, 0), Time::new(3, 0)]);
}

#[test]
fn test_config_errors_from_crate_root() {
    let err = PublisherConfig::from_toml_file(data_file("missing.toml")).unwrap_err();
    assert!(matches!(err, ReadConfigError::Read(_)));

    let err = PublisherConfig::from_toml_str("publish_frequency = \"fast\"").unwrap_err();
    assert!(matches!(err, ReadConfigError::Toml(_)));
}
