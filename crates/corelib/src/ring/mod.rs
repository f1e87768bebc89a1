//! Consistent hash ring implementation.
//!
//! The ring manages virtual node positions and provides efficient lookup
//! operations for finding the data node responsible for a key.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod ring;
pub mod shared;
pub mod topology;

pub use builder::RingBuilder;
pub use ring::Ring;
pub use shared::SharedRing;
pub use topology::{NodeShare, RingTopology};
