//! Ring topology: how much of the ring space each data node owns.
//!
//! Every key hashing into the arc that ends at a virtual node (inclusive)
//! and starts just after the previous virtual node is resolved to that
//! virtual node. The arc ending at the first virtual node also covers the
//! wrap-around segment after the last one.

use crate::partitioner::Partitioner;
use crate::ring::ring::Ring;
use serde::Serialize;
use std::collections::HashMap;

/// Share of the ring owned by one data node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeShare {
    pub name: String,
    /// Number of ring positions owned.
    pub positions: u64,
    /// `positions` as a fraction of the whole ring, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Per-node ownership of the ring space.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RingTopology {
    /// One entry per data node, in node insertion order.
    pub shares: Vec<NodeShare>,
    pub ring_size: u64,
}

impl RingTopology {
    pub fn share(&self, name: &str) -> Option<&NodeShare> {
        self.shares.iter().find(|s| s.name == name)
    }
}

impl<P: Partitioner> Ring<P> {
    /// Compute how the ring space is split between data nodes.
    ///
    /// # Performance
    /// - **Time**: O(n) where n = total vnodes
    pub fn topology(&self) -> RingTopology {
        let ring_size = self.partitioner().ring_size();
        let vnodes = self.virtual_nodes();
        let mut owned: HashMap<&str, u64> = HashMap::new();

        if let (Some(first), Some(last)) = (vnodes.first(), vnodes.last()) {
            // Wrap arc: (last, ring_size) plus [0, first].
            let wrap = last.token.distance_to(&first.token, ring_size);
            let wrap = if wrap == 0 { ring_size } else { wrap };
            *owned.entry(first.data_node.name.as_str()).or_default() += wrap;

            for pair in vnodes.windows(2) {
                let arc = pair[0].token.distance_to(&pair[1].token, ring_size);
                *owned.entry(pair[1].data_node.name.as_str()).or_default() += arc;
            }
        }

        let shares = self
            .nodes()
            .map(|node| {
                let positions = owned.get(node.name.as_str()).copied().unwrap_or(0);
                NodeShare {
                    name: node.name.clone(),
                    positions,
                    fraction: positions as f64 / ring_size as f64,
                }
            })
            .collect();

        RingTopology { shares, ring_size }
    }
}
