//! Hash ring data structure.
//!
//! The ring keeps every virtual node in one `Vec` sorted by
//! [`VirtualNode::ring_order`]. Resolution is a lower-bound binary search over
//! that vector; membership changes rebuild the affected part of it before
//! returning, so the vector is never observed unsorted.

use crate::config::{RingConfig, DEFAULT_VNODES_PER_NODE};
use crate::error::{Error, Result};
use crate::node::DataNode;
use crate::partitioner::{Crc32Partitioner, DynPartitioner, Partitioner};
use crate::vnode::VirtualNode;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Consistent hash ring mapping keys onto data nodes.
///
/// # Invariants
///
/// - Every data node on the ring owns exactly `vnodes_per_node` virtual nodes
/// - `vnodes` is sorted by token (ties by name) after every mutation
/// - Data node names are unique
///
/// # Example
///
/// ```rust
/// use corelib::{DataNode, Ring};
///
/// let mut ring = Ring::new();
/// ring.add_node(DataNode::new("cache-a")).unwrap();
/// ring.add_node(DataNode::new("cache-b")).unwrap();
///
/// let owner = ring.resolve("user:42").unwrap();
/// assert!(owner.name == "cache-a" || owner.name == "cache-b");
/// ```
#[derive(Clone)]
pub struct Ring<P: Partitioner = Crc32Partitioner> {
    /// Data nodes in insertion order.
    nodes: Vec<Arc<DataNode>>,
    /// All virtual nodes, sorted by ring order.
    vnodes: Vec<VirtualNode>,
    /// Virtual nodes per data node name. Not used for resolution.
    vnode_counts: HashMap<String, usize>,
    vnodes_per_node: usize,
    partitioner: P,
}

impl Ring<Crc32Partitioner> {
    /// Empty ring with the default CRC-32 partitioner and 100 vnodes per node.
    pub fn new() -> Self {
        Self::empty(Crc32Partitioner, DEFAULT_VNODES_PER_NODE)
    }

    /// Empty CRC-32 ring with an explicit virtual node count.
    pub fn with_vnodes(vnodes_per_node: usize) -> Result<Self> {
        Self::with_partitioner(Crc32Partitioner, vnodes_per_node)
    }
}

impl Default for Ring<Crc32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl Ring<DynPartitioner> {
    /// Empty ring built from a runtime configuration.
    pub fn from_config(config: &RingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(
            config.partitioner.build(),
            config.vnodes_per_node,
        ))
    }
}

impl<P: Partitioner> Ring<P> {
    /// Empty ring using `partitioner` to place keys and virtual nodes.
    pub fn with_partitioner(partitioner: P, vnodes_per_node: usize) -> Result<Self> {
        RingConfig::with_vnodes(vnodes_per_node).validate()?;
        Ok(Self::empty(partitioner, vnodes_per_node))
    }

    fn empty(partitioner: P, vnodes_per_node: usize) -> Self {
        Self {
            nodes: Vec::new(),
            vnodes: Vec::new(),
            vnode_counts: HashMap::new(),
            vnodes_per_node,
            partitioner,
        }
    }

    /// Add a data node and its virtual nodes to the ring.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNode`] if the name is empty
    /// - [`Error::DuplicateNode`] if a node with the same name is already
    ///   present; the ring is left untouched
    ///
    /// # Performance
    /// - **Time**: O(V log V + n) where n = total vnodes
    pub fn add_node(&mut self, node: DataNode) -> Result<()> {
        if node.name.is_empty() {
            return Err(Error::InvalidNode(
                "data node name must not be empty".to_string(),
            ));
        }
        if self.vnode_counts.contains_key(&node.name) {
            return Err(Error::DuplicateNode(node.name));
        }

        let node = Arc::new(node);
        let mut batch: Vec<VirtualNode> = (0..self.vnodes_per_node)
            .map(|i| VirtualNode::from_index(&node, i, &self.partitioner))
            .collect();
        batch.sort_by(VirtualNode::ring_order);

        // Two sorted runs; the stable sort merges them in linear time.
        self.vnodes.extend(batch);
        self.vnodes.sort_by(VirtualNode::ring_order);

        self.vnode_counts
            .insert(node.name.clone(), self.vnodes_per_node);
        debug!(
            node = %node.name,
            vnodes = self.vnodes_per_node,
            total_vnodes = self.vnodes.len(),
            "added data node to ring"
        );
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a data node and all of its virtual nodes.
    ///
    /// Returns `false` and leaves the ring unchanged if no node has this name.
    /// Survivors keep their relative order, so no re-sort is needed.
    pub fn remove_node(&mut self, name: &str) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n.name == name) else {
            return false;
        };
        self.nodes.remove(index);
        self.vnodes.retain(|v| v.data_node.name != name);
        self.vnode_counts.remove(name);
        debug!(
            node = %name,
            total_vnodes = self.vnodes.len(),
            "removed data node from ring"
        );
        true
    }

    /// Find the virtual node responsible for `key`.
    ///
    /// This is the first virtual node whose token is at or after the key's
    /// token, wrapping to the first virtual node on the ring.
    ///
    /// # Performance
    /// - **Time**: O(log n) where n = total vnodes
    pub fn resolve_vnode(&self, key: impl AsRef<[u8]>) -> Result<&VirtualNode> {
        let token = self.partitioner.partition(key.as_ref());
        let index = self.vnodes.partition_point(|v| v.token < token);
        let vnode = self
            .vnodes
            .get(index)
            .or_else(|| self.vnodes.first())
            .ok_or(Error::EmptyRing)?;
        trace!(%token, vnode = %vnode.name, "resolved key");
        Ok(vnode)
    }

    /// Find the data node responsible for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRing`] if no data node has been added.
    pub fn resolve(&self, key: impl AsRef<[u8]>) -> Result<&DataNode> {
        self.resolve_vnode(key).map(VirtualNode::data_node)
    }

    /// Number of data nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of virtual nodes (positions) on the ring.
    pub fn vnode_count(&self) -> usize {
        self.vnodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Virtual nodes given to every data node.
    pub fn vnodes_per_node(&self) -> usize {
        self.vnodes_per_node
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vnode_counts.contains_key(name)
    }

    /// Look up a data node by name.
    pub fn get_node(&self, name: &str) -> Option<&DataNode> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.as_ref())
    }

    /// Data nodes in the order they were added.
    pub fn nodes(&self) -> impl Iterator<Item = &DataNode> + '_ {
        self.nodes.iter().map(|n| n.as_ref())
    }

    /// All virtual nodes in ring order.
    pub fn virtual_nodes(&self) -> &[VirtualNode] {
        &self.vnodes
    }

    /// Virtual node count per data node name.
    pub fn virtual_node_counts(&self) -> &HashMap<String, usize> {
        &self.vnode_counts
    }

    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}

impl<P: Partitioner> fmt::Debug for Ring<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("nodes", &self.nodes.len())
            .field("vnodes", &self.vnodes.len())
            .field("vnodes_per_node", &self.vnodes_per_node)
            .field("partitioner", &self.partitioner.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::PartitionerKind;
    use crate::ring::RingBuilder;

    fn ring_with(names: &[&str], vnodes: usize) -> Ring {
        let mut ring = Ring::with_vnodes(vnodes).unwrap();
        for name in names {
            ring.add_node(DataNode::new(*name)).unwrap();
        }
        ring
    }

    fn is_sorted(ring: &Ring) -> bool {
        ring.virtual_nodes()
            .windows(2)
            .all(|w| w[0].ring_order(&w[1]).is_le())
    }

    #[test]
    fn test_new_ring_is_empty() {
        let ring = Ring::new();
        assert!(ring.is_empty());
        assert_eq!(ring.vnode_count(), 0);
        assert_eq!(ring.vnodes_per_node(), 100);
        assert_eq!(ring.partitioner_name(), "Crc32Partitioner");
    }

    #[test]
    fn test_add_keeps_vnodes_sorted() {
        let ring = ring_with(&["a", "b", "c", "d"], 50);
        assert_eq!(ring.vnode_count(), 200);
        assert!(is_sorted(&ring));
    }

    #[test]
    fn test_vnode_names_are_derived() {
        let ring = ring_with(&["cache"], 3);
        let mut names: Vec<&str> = ring
            .virtual_nodes()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["cache:0", "cache:1", "cache:2"]);
    }

    #[test]
    fn test_duplicate_rejected_without_change() {
        let mut ring = ring_with(&["a"], 10);
        let err = ring.add_node(DataNode::new("a")).unwrap_err();
        assert_eq!(err, Error::DuplicateNode("a".to_string()));
        assert_eq!(ring.node_count(), 1);
        assert_eq!(ring.vnode_count(), 10);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut ring = Ring::new();
        assert!(matches!(
            ring.add_node(DataNode::new("")),
            Err(Error::InvalidNode(_))
        ));
        assert!(ring.is_empty());
    }

    #[test]
    fn test_zero_vnodes_rejected() {
        assert!(matches!(Ring::with_vnodes(0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_unbounded_vnodes_rejected_before_add() {
        assert!(matches!(
            Ring::with_vnodes(usize::MAX),
            Err(Error::InvalidConfig(_))
        ));
        let config = RingConfig::with_vnodes(crate::config::MAX_VNODES_PER_NODE + 1);
        assert!(matches!(Ring::from_config(&config), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            RingBuilder::new().with_vnodes(usize::MAX).add_node(DataNode::new("a")).build(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_remove_drops_vnodes_and_counts() {
        let mut ring = ring_with(&["a", "b"], 10);
        assert!(ring.remove_node("a"));
        assert_eq!(ring.vnode_count(), 10);
        assert!(!ring.contains("a"));
        assert!(ring.virtual_node_counts().get("a").is_none());
        assert!(ring.virtual_nodes().iter().all(|v| v.data_node.name == "b"));
        assert!(is_sorted(&ring));
    }

    #[test]
    fn test_resolve_empty_ring() {
        assert_eq!(Ring::new().resolve("key").unwrap_err(), Error::EmptyRing);
    }

    #[test]
    fn test_resolve_is_lower_bound() {
        let ring = ring_with(&["a", "b", "c"], 20);
        for i in 0..500 {
            let key = format!("key-{}", i);
            let token = ring.partitioner().partition(key.as_bytes());
            let expected = ring
                .virtual_nodes()
                .iter()
                .find(|v| v.token >= token)
                .unwrap_or(&ring.virtual_nodes()[0]);
            assert_eq!(ring.resolve_vnode(&key).unwrap().name, expected.name);
        }
    }

    #[test]
    fn test_resolve_wraps_past_last_vnode() {
        let ring = ring_with(&["a", "b", "c"], 5);
        let last = ring.virtual_nodes().last().unwrap().token;
        let first = &ring.virtual_nodes()[0];

        // Find a key hashing beyond the last vnode.
        let key = (0..)
            .map(|i| format!("wrap-{}", i))
            .find(|k| ring.partitioner().partition(k.as_bytes()) > last)
            .unwrap();
        assert_eq!(ring.resolve_vnode(&key).unwrap().name, first.name);
    }

    #[test]
    fn test_key_on_vnode_token_resolves_to_it() {
        let ring = ring_with(&["a", "b"], 8);
        // A key named after a vnode hashes onto that exact position.
        for vnode in ring.virtual_nodes() {
            let resolved = ring.resolve_vnode(&vnode.name).unwrap();
            assert_eq!(resolved.token, vnode.token);
        }
    }

    #[test]
    fn test_from_config_uses_selected_partitioner() {
        let config = RingConfig {
            vnodes_per_node: 16,
            partitioner: PartitionerKind::Xxh3,
        };
        let mut ring = Ring::from_config(&config).unwrap();
        ring.add_node(DataNode::new("a")).unwrap();
        assert_eq!(ring.partitioner_name(), "Xxh3Partitioner");
        assert_eq!(ring.vnode_count(), 16);
        assert_eq!(ring.resolve("k").unwrap().name, "a");
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let ring = ring_with(&["z", "a", "m"], 2);
        let names: Vec<&str> = ring.nodes().map(DataNode::name).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(ring.get_node("a").map(DataNode::name), Some("a"));
        assert!(ring.get_node("q").is_none());
    }
}
