//! Core partitioner trait definitions.

use crate::token::Token;
use std::sync::Arc;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and deterministic: the same bytes map to the
/// same token in every process, so a ring built from a fixed set of node
/// names always has the same layout.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a token.
    ///
    /// The returned token is always below [`Partitioner::ring_size`].
    fn partition(&self, key: &[u8]) -> Token;

    /// Number of distinct positions on the ring.
    fn ring_size(&self) -> u64;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}

/// Partitioner chosen at runtime, e.g. from a [`RingConfig`](crate::RingConfig).
pub type DynPartitioner = Arc<dyn Partitioner>;

impl<T: Partitioner + ?Sized> Partitioner for Arc<T> {
    fn partition(&self, key: &[u8]) -> Token {
        (**self).partition(key)
    }

    fn ring_size(&self) -> u64 {
        (**self).ring_size()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
