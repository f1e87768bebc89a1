//! Subcommands and their execution.

use anyhow::{ensure, Context};
use clap::Subcommand;
use corelib::distribution::{remapped_keys, tally_keys, DistributionReport};
use corelib::partitioner::DynPartitioner;
use corelib::{DataNode, Ring, RingConfig};
use std::fmt;
use tracing::info;

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve keys `0..keys` and report how evenly they spread.
    Distribution {
        /// Data nodes, named `0..nodes`.
        #[arg(short, long, default_value_t = 10)]
        nodes: usize,
        /// Keys to resolve, named `0..keys`.
        #[arg(short, long, default_value_t = 1_000_000)]
        keys: usize,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the data node each key resolves to.
    Resolve {
        #[arg(short, long, default_value_t = 10)]
        nodes: usize,
        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Count the keys that move when a node joins and when a node leaves.
    Rebalance {
        #[arg(short, long, default_value_t = 10)]
        nodes: usize,
        #[arg(short, long, default_value_t = 100_000)]
        keys: usize,
    },
    /// Print each data node's share of the ring space.
    Topology {
        #[arg(short, long, default_value_t = 10)]
        nodes: usize,
        #[arg(long)]
        json: bool,
    },
}

/// Output of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Text(String),
    Json(serde_json::Value),
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Text(text) => f.write_str(text),
            CommandResult::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
        }
    }
}

/// Ring with data nodes named `0..nodes`.
pub fn seeded_ring(config: &RingConfig, nodes: usize) -> anyhow::Result<Ring<DynPartitioner>> {
    let mut ring = Ring::from_config(config).context("invalid ring configuration")?;
    for i in 0..nodes {
        ring.add_node(DataNode::new(i.to_string()))?;
    }
    info!(
        nodes,
        vnodes = ring.vnode_count(),
        partitioner = ring.partitioner_name(),
        "seeded ring"
    );
    Ok(ring)
}

fn numbered_keys(count: usize) -> impl Iterator<Item = String> {
    (0..count).map(|i| i.to_string())
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl Command {
    pub fn execute(&self, config: &RingConfig) -> anyhow::Result<CommandResult> {
        match self {
            Command::Distribution { nodes, keys, json } => {
                ensure!(*nodes > 0, "at least one node is required");
                let ring = seeded_ring(config, *nodes)?;
                let tally = tally_keys(&ring, numbered_keys(*keys))?;
                let report = DistributionReport::from_tally(&ring, &tally);
                if *json {
                    return Ok(CommandResult::Json(serde_json::to_value(&report)?));
                }

                let mut out = String::new();
                for count in &report.per_node {
                    out.push_str(&format!("node {:>6}: {} keys\n", count.name, count.keys));
                }
                out.push_str(&format!(
                    "standard deviation of key distribution: {:.2}",
                    report.std_dev
                ));
                Ok(CommandResult::Text(out))
            }
            Command::Resolve { nodes, keys } => {
                ensure!(*nodes > 0, "at least one node is required");
                let ring = seeded_ring(config, *nodes)?;
                let lines = keys
                    .iter()
                    .map(|key| Ok(format!("{} -> {}", key, ring.resolve(key)?)))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(CommandResult::Text(lines.join("\n")))
            }
            Command::Rebalance { nodes, keys } => {
                ensure!(*nodes > 1, "rebalance needs at least two nodes");
                let before = seeded_ring(config, *nodes)?;

                let mut grown = before.clone();
                let newcomer = nodes.to_string();
                grown.add_node(DataNode::new(newcomer.clone()))?;
                let moved_on_add = remapped_keys(&before, &grown, numbered_keys(*keys))?;

                let mut shrunk = before.clone();
                shrunk.remove_node("0");
                let moved_on_remove = remapped_keys(&before, &shrunk, numbered_keys(*keys))?;

                Ok(CommandResult::Text(format!(
                    "add node {}: {} of {} keys moved ({:.2}%, ideal {:.2}%)\n\
                     remove node 0: {} of {} keys moved ({:.2}%, ideal {:.2}%)",
                    newcomer,
                    moved_on_add,
                    keys,
                    percent(moved_on_add, *keys),
                    100.0 / (*nodes + 1) as f64,
                    moved_on_remove,
                    keys,
                    percent(moved_on_remove, *keys),
                    100.0 / *nodes as f64,
                )))
            }
            Command::Topology { nodes, json } => {
                let ring = seeded_ring(config, *nodes)?;
                let topology = ring.topology();
                if *json {
                    return Ok(CommandResult::Json(serde_json::to_value(&topology)?));
                }
                let lines: Vec<String> = topology
                    .shares
                    .iter()
                    .map(|share| format!("node {:>6}: {:.2}%", share.name, share.fraction * 100.0))
                    .collect();
                Ok(CommandResult::Text(lines.join("\n")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_distribution_text_ends_with_std_dev() {
        let command = Command::Distribution {
            nodes: 10,
            keys: 1_000_000,
            json: false,
        };
        let output = command.execute(&RingConfig::default()).unwrap().to_string();
        assert!(output.ends_with("standard deviation of key distribution: 23619.41"));
        assert_eq!(output.lines().count(), 11);
    }

    #[test]
    fn test_distribution_json() {
        let command = Command::Distribution {
            nodes: 4,
            keys: 1000,
            json: true,
        };
        match command.execute(&RingConfig::with_vnodes(20)).unwrap() {
            CommandResult::Json(value) => {
                assert_eq!(value["nodes"], 4);
                assert_eq!(value["keys"], 1000);
            }
            other => panic!("expected JSON, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_prints_each_key() {
        let command = Command::Resolve {
            nodes: 1,
            keys: vec!["a".to_string(), "b".to_string()],
        };
        let output = command.execute(&RingConfig::default()).unwrap().to_string();
        assert_eq!(output, "a -> 0\nb -> 0");
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let command = Command::Resolve {
            nodes: 0,
            keys: vec!["a".to_string()],
        };
        assert!(command.execute(&RingConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let command = Command::Topology {
            nodes: 2,
            json: false,
        };
        assert!(command.execute(&RingConfig::with_vnodes(0)).is_err());
    }

    #[test]
    fn test_oversized_vnodes_is_an_error() {
        let config = crate::CliConfig::try_parse_from([
            "vnode-ring",
            "distribution",
            "--keys",
            "10",
            "--vnodes",
            "18446744073709551615",
        ])
        .unwrap();
        let err = config.run().unwrap_err();
        assert!(format!("{:#}", err).contains("vnodes_per_node must be at most"));
    }

    #[test]
    fn test_rebalance_reports_both_changes() {
        let command = Command::Rebalance {
            nodes: 5,
            keys: 10_000,
        };
        let output = command.execute(&RingConfig::default()).unwrap().to_string();
        assert!(output.starts_with("add node 5: "));
        assert!(output.contains("remove node 0: "));
    }

    #[test]
    fn test_topology_lists_every_node() {
        let command = Command::Topology {
            nodes: 3,
            json: false,
        };
        let output = command.execute(&RingConfig::default()).unwrap().to_string();
        assert_eq!(output.lines().count(), 3);
        assert!(output.lines().all(|line| line.starts_with("node ")));
    }
}
