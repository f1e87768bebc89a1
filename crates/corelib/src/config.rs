//! Ring configuration.

use crate::error::{Error, Result};
use crate::partitioner::PartitionerKind;
use serde::{Deserialize, Serialize};

/// Virtual nodes per data node when nothing else is configured.
pub const DEFAULT_VNODES_PER_NODE: usize = 100;

/// Upper bound on virtual nodes per data node.
pub const MAX_VNODES_PER_NODE: usize = 1 << 16;

/// Construction parameters for a [`Ring`](crate::Ring).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Ring positions given to every data node (V).
    pub vnodes_per_node: usize,
    /// Hash function placing keys and virtual nodes.
    pub partitioner: PartitionerKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            vnodes_per_node: DEFAULT_VNODES_PER_NODE,
            partitioner: PartitionerKind::default(),
        }
    }
}

impl RingConfig {
    pub fn with_vnodes(vnodes_per_node: usize) -> Self {
        Self {
            vnodes_per_node,
            ..Self::default()
        }
    }

    /// Rejects virtual node counts outside `1..=MAX_VNODES_PER_NODE`.
    pub fn validate(&self) -> Result<()> {
        if self.vnodes_per_node == 0 {
            return Err(Error::InvalidConfig(
                "vnodes_per_node must be at least 1".to_string(),
            ));
        }
        if self.vnodes_per_node > MAX_VNODES_PER_NODE {
            return Err(Error::InvalidConfig(format!(
                "vnodes_per_node must be at most {}, got {}",
                MAX_VNODES_PER_NODE, self.vnodes_per_node
            )));
        }
        Ok(())
    }
}
