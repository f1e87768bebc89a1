//! Shared, lock-protected ring for multi-threaded callers.
//!
//! `Ring` itself assumes a single writer. `SharedRing` wraps it in a
//! `parking_lot::RwLock`: membership changes hold the write lock for the whole
//! splice and re-sort, lookups hold the read lock only for the binary search.

use crate::error::Result;
use crate::node::DataNode;
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::ring::Ring;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cheaply cloneable handle to a ring shared between threads.
#[derive(Debug)]
pub struct SharedRing<P: Partitioner = Crc32Partitioner> {
    inner: Arc<RwLock<Ring<P>>>,
}

impl<P: Partitioner> Clone for SharedRing<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Partitioner> From<Ring<P>> for SharedRing<P> {
    fn from(ring: Ring<P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }
}

impl<P: Partitioner> SharedRing<P> {
    pub fn new(ring: Ring<P>) -> Self {
        ring.into()
    }

    /// See [`Ring::add_node`].
    pub fn add_node(&self, node: DataNode) -> Result<()> {
        self.inner.write().add_node(node)
    }

    /// See [`Ring::remove_node`].
    pub fn remove_node(&self, name: &str) -> bool {
        self.inner.write().remove_node(name)
    }

    /// Resolve `key`, returning an owned handle to the data node.
    pub fn resolve(&self, key: impl AsRef<[u8]>) -> Result<Arc<DataNode>> {
        let ring = self.inner.read();
        let vnode = ring.resolve_vnode(key)?;
        Ok(Arc::clone(&vnode.data_node))
    }

    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    pub fn vnode_count(&self) -> usize {
        self.inner.read().vnode_count()
    }

    /// Run `f` against a consistent view of the ring.
    pub fn with_ring<R>(&self, f: impl FnOnce(&Ring<P>) -> R) -> R {
        f(&self.inner.read())
    }
}
