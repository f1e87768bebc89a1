//! Data node abstractions for the consistent hash ring.
//!
//! A data node is a real destination (a cache server, a storage shard) that
//! keys are ultimately routed to. Its name is its only identity: two nodes
//! with the same name are the same node.

use std::fmt;

/// Real destination keys resolve to.
///
/// Keep this struct small and cheap to clone; the ring shares it between
/// all of the node's virtual nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataNode {
    /// Unique name, also the prefix of every derived virtual node name.
    pub name: String,
}

impl DataNode {
    /// Construct a new data node.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
