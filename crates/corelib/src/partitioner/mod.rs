//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring.

pub mod crc32;
pub mod sip;
pub mod traits;
pub mod xxh3;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use crc32::Crc32Partitioner;
pub use sip::SipPartitioner;
pub use traits::{DynPartitioner, Partitioner};
pub use xxh3::Xxh3Partitioner;

/// Selects a partitioner by name, for configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionerKind {
    #[default]
    Crc32,
    Xxh3,
    Sip,
}

impl PartitionerKind {
    /// Instantiate the selected partitioner.
    pub fn build(self) -> DynPartitioner {
        match self {
            PartitionerKind::Crc32 => Arc::new(Crc32Partitioner),
            PartitionerKind::Xxh3 => Arc::new(Xxh3Partitioner),
            PartitionerKind::Sip => Arc::new(SipPartitioner),
        }
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartitionerKind::Crc32 => "crc32",
            PartitionerKind::Xxh3 => "xxh3",
            PartitionerKind::Sip => "sip",
        };
        f.write_str(name)
    }
}

impl FromStr for PartitionerKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crc32" => Ok(PartitionerKind::Crc32),
            "xxh3" => Ok(PartitionerKind::Xxh3),
            "sip" => Ok(PartitionerKind::Sip),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown partitioner: {}",
                other
            ))),
        }
    }
}
