//! Load distribution measurement.
//!
//! [`KeyTally`] counts how many keys resolved to each data node. It is kept
//! apart from the ring's own virtual-node counts: the ring never reads or
//! writes a tally, and resolving keys never changes the ring.

use crate::error::Result;
use crate::partitioner::Partitioner;
use crate::ring::Ring;
use serde::Serialize;
use std::collections::HashMap;

/// Observed key assignments per data node name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTally {
    counts: HashMap<String, u64>,
    total: u64,
}

impl KeyTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one key assigned to `name`.
    pub fn record(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(name.to_owned(), 1);
            }
        }
        self.total += 1;
    }

    /// Keys assigned to `name`, 0 if none.
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Keys recorded across all names.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

/// Resolve every key against `ring` and count the results.
///
/// # Errors
///
/// [`Error::EmptyRing`](crate::Error::EmptyRing) if the ring has no nodes
/// and `keys` is not empty.
pub fn tally_keys<P, I, K>(ring: &Ring<P>, keys: I) -> Result<KeyTally>
where
    P: Partitioner,
    I: IntoIterator<Item = K>,
    K: AsRef<[u8]>,
{
    let mut tally = KeyTally::new();
    for key in keys {
        tally.record(&ring.resolve(key)?.name);
    }
    Ok(tally)
}

/// Number of keys that resolve to a different data node in `after` than in
/// `before`.
pub fn remapped_keys<P, Q, I, K>(before: &Ring<P>, after: &Ring<Q>, keys: I) -> Result<usize>
where
    P: Partitioner,
    Q: Partitioner,
    I: IntoIterator<Item = K>,
    K: AsRef<[u8]>,
{
    let mut moved = 0;
    for key in keys {
        let key = key.as_ref();
        if before.resolve(key)?.name != after.resolve(key)?.name {
            moved += 1;
        }
    }
    Ok(moved)
}

/// Population standard deviation; 0.0 for an empty slice.
pub fn population_std_dev(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let delta = v as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

impl<P: Partitioner> Ring<P> {
    /// Standard deviation of tallied key counts across the data nodes
    /// currently on the ring.
    ///
    /// Nodes missing from the tally count as 0; tallied names no longer on
    /// the ring are ignored. Returns 0.0 for a ring with no nodes.
    pub fn std_dev(&self, tally: &KeyTally) -> f64 {
        population_std_dev(&self.node_counts(tally))
    }

    fn node_counts(&self, tally: &KeyTally) -> Vec<u64> {
        self.nodes().map(|node| tally.count(&node.name)).collect()
    }
}

/// Key count for one data node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeCount {
    pub name: String,
    pub keys: u64,
}

/// Summary of how evenly keys spread over the ring's data nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    pub nodes: usize,
    pub vnodes_per_node: usize,
    pub partitioner: &'static str,
    /// Keys counted against nodes currently on the ring.
    pub keys: u64,
    pub mean: f64,
    pub std_dev: f64,
    /// `std_dev / mean`; 0.0 when no keys were counted.
    pub coefficient_of_variation: f64,
    pub per_node: Vec<NodeCount>,
}

impl DistributionReport {
    pub fn from_tally<P: Partitioner>(ring: &Ring<P>, tally: &KeyTally) -> Self {
        let per_node: Vec<NodeCount> = ring
            .nodes()
            .map(|node| NodeCount {
                name: node.name.clone(),
                keys: tally.count(&node.name),
            })
            .collect();
        let keys: u64 = per_node.iter().map(|c| c.keys).sum();
        let mean = if per_node.is_empty() {
            0.0
        } else {
            keys as f64 / per_node.len() as f64
        };
        let std_dev = ring.std_dev(tally);
        let coefficient_of_variation = if mean > 0.0 { std_dev / mean } else { 0.0 };

        Self {
            nodes: ring.node_count(),
            vnodes_per_node: ring.vnodes_per_node(),
            partitioner: ring.partitioner_name(),
            keys,
            mean,
            std_dev,
            coefficient_of_variation,
            per_node,
        }
    }
}
