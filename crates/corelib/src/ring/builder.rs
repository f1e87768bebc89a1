//! Builder for rings with an initial membership.

use crate::config::DEFAULT_VNODES_PER_NODE;
use crate::error::Result;
use crate::node::DataNode;
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::ring::Ring;

/// Collects ring settings and initial data nodes, then builds the ring.
///
/// # Example
///
/// ```rust
/// use corelib::{DataNode, RingBuilder};
///
/// let ring = RingBuilder::new()
///     .with_vnodes(8)
///     .add_node(DataNode::new("node1"))
///     .add_node(DataNode::new("node2"))
///     .build()
///     .unwrap();
/// assert_eq!(ring.vnode_count(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<P: Partitioner = Crc32Partitioner> {
    vnodes_per_node: usize,
    partitioner: P,
    nodes: Vec<DataNode>,
}

impl RingBuilder<Crc32Partitioner> {
    pub fn new() -> Self {
        Self {
            vnodes_per_node: DEFAULT_VNODES_PER_NODE,
            partitioner: Crc32Partitioner,
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder<Crc32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    /// Virtual nodes per data node.
    pub fn with_vnodes(mut self, vnodes_per_node: usize) -> Self {
        self.vnodes_per_node = vnodes_per_node;
        self
    }

    /// Replace the partitioner, keeping the nodes collected so far.
    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            vnodes_per_node: self.vnodes_per_node,
            partitioner,
            nodes: self.nodes,
        }
    }

    pub fn add_node(mut self, node: DataNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn add_nodes<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = DataNode>,
    {
        self.nodes.extend(nodes);
        self
    }

    /// Build the ring, adding nodes in the order they were given.
    ///
    /// Fails on the first node [`Ring::add_node`] rejects, or on an invalid
    /// virtual node count.
    pub fn build(self) -> Result<Ring<P>> {
        let mut ring = Ring::with_partitioner(self.partitioner, self.vnodes_per_node)?;
        for node in self.nodes {
            ring.add_node(node)?;
        }
        Ok(ring)
    }
}
