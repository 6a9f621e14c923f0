//! Publisher settings, read from a toml file such as
//!
//! ```toml
//! flatten_tree = false
//! publish_frequency = 50.0
//! tf_topic = "/tf"
//!
//! [joint_positions]
//! arm_joint = 0.3
//! hand_joint = 0.0
//! ```
//!
//! Every key is optional.

use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::{tf_bus::TF_TOPIC, tree_fk_solver::JointPositions};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Publish every link relative to the root instead of its parent.
    pub flatten_tree: bool,
    /// Hz, used by the node binary.
    pub publish_frequency: f64,
    pub tf_topic: String,
    /// Joint positions the node binary publishes.
    pub joint_positions: JointPositions,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            flatten_tree: false,
            publish_frequency: 50.0,
            tf_topic: TF_TOPIC.to_string(),
            joint_positions: JointPositions::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReadConfigError {
    #[error("couldn't read file")]
    Read(#[source] std::io::Error),
    #[error("couldn't parse toml")]
    Toml(#[source] toml::de::Error),
}

impl PublisherConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ReadConfigError> {
        toml::from_str(contents).map_err(ReadConfigError::Toml)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ReadConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ReadConfigError::Read)?;
        Self::from_toml_str(&contents)
    }

    /// Time between publishes, `None` if the frequency is not a positive number.
    pub fn publish_period(&self) -> Option<Duration> {
        if self.publish_frequency.is_finite() && self.publish_frequency > 0.0 {
            Some(Duration::from_secs_f64(1.0 / self.publish_frequency))
        } else {
            None
        }
    }
}
