//! Core library for consistent hashing.
//!
//! This crate provides the consistent hash ring and the pieces it is built
//! from:
//! - Tokens (ring positions) and partitioners (hash functions)
//! - Data nodes and their virtual nodes
//! - The ring itself: membership changes and key resolution
//! - Ring topology and key distribution measurement

pub mod config;
pub mod distribution;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod vnode;

pub use config::RingConfig;
pub use distribution::{DistributionReport, KeyTally};
pub use error::{Error, Result};
pub use node::DataNode;
pub use partitioner::{Partitioner, PartitionerKind};
pub use ring::{Ring, RingBuilder, RingTopology, SharedRing};
pub use token::Token;
pub use vnode::VirtualNode;
