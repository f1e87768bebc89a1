//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each data node having a single position on the ring, each node
//! has V positions (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: More positions smooth out hash luck
//! 2. **Gradual Rebalancing**: When nodes join/leave, only a fraction of keys move
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(V) per data node
//! - **Lookup**: O(log n) where n = total vnodes
//! - **Rebalancing**: about V / n of the keys move when a node joins

use crate::node::DataNode;
use crate::partitioner::Partitioner;
use crate::token::Token;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A virtual node on the hash ring.
///
/// # Invariants
///
/// - `name` is always `"{data_node.name}:{index}"`, never assigned directly
/// - Two virtual nodes may share a token; they are then ordered by name
#[derive(Debug, Clone)]
pub struct VirtualNode {
    /// Derived name this vnode's token was computed from.
    pub name: String,

    /// The data node that owns this virtual node.
    ///
    /// Shared with the ring's node list and every sibling vnode.
    pub data_node: Arc<DataNode>,

    /// Token position on the ring.
    pub token: Token,
}

impl VirtualNode {
    /// Create the `index`-th virtual node of `data_node`.
    ///
    /// # Example
    /// ```rust
    /// use std::sync::Arc;
    /// use corelib::{DataNode, VirtualNode};
    /// use corelib::partitioner::Crc32Partitioner;
    ///
    /// let node = Arc::new(DataNode::new("cache-a"));
    /// let vnode = VirtualNode::from_index(&node, 3, &Crc32Partitioner);
    /// assert_eq!(vnode.name, "cache-a:3");
    /// ```
    pub fn from_index<P: Partitioner + ?Sized>(
        data_node: &Arc<DataNode>,
        index: usize,
        partitioner: &P,
    ) -> Self {
        let name = format!("{}:{}", data_node.name, index);
        let token = partitioner.partition(name.as_bytes());
        Self {
            name,
            data_node: Arc::clone(data_node),
            token,
        }
    }

    /// Get the token position.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Get the owning data node.
    #[inline]
    pub fn data_node(&self) -> &DataNode {
        &self.data_node
    }

    /// Ring order: token first, then name to break collisions.
    pub fn ring_order(&self, other: &Self) -> Ordering {
        self.token
            .cmp(&other.token)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode({} token={} node={})", self.name, self.token, self.data_node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::Crc32Partitioner;

    fn vnode(name: &str, token: u32) -> VirtualNode {
        VirtualNode {
            name: name.to_string(),
            data_node: Arc::new(DataNode::new("n")),
            token: Token(token),
        }
    }

    #[test]
    fn test_vnode_from_index() {
        let node = Arc::new(DataNode::new("node1"));
        let vnode0 = VirtualNode::from_index(&node, 0, &Crc32Partitioner);
        let vnode1 = VirtualNode::from_index(&node, 1, &Crc32Partitioner);

        assert_eq!(vnode0.name, "node1:0");
        assert_eq!(vnode1.name, "node1:1");
        assert_ne!(vnode0.token(), vnode1.token());
        assert_eq!(vnode0.data_node(), vnode1.data_node());
        assert!(Arc::ptr_eq(&vnode0.data_node, &node));
    }

    #[test]
    fn test_token_matches_partitioner() {
        let node = Arc::new(DataNode::new("node1"));
        let vnode = VirtualNode::from_index(&node, 7, &Crc32Partitioner);
        assert_eq!(vnode.token(), Crc32Partitioner.partition(b"node1:7"));
    }

    #[test]
    fn test_ring_order_by_token() {
        assert_eq!(vnode("b", 100).ring_order(&vnode("a", 200)), Ordering::Less);
    }

    #[test]
    fn test_ring_order_breaks_ties_by_name() {
        assert_eq!(vnode("a:1", 5).ring_order(&vnode("b:0", 5)), Ordering::Less);
        assert_eq!(vnode("b:0", 5).ring_order(&vnode("a:1", 5)), Ordering::Greater);
    }
}
