//! Command line configuration.

use crate::commands::{Command, CommandResult};
use clap::Parser;
use corelib::{PartitionerKind, RingConfig};
use tracing_subscriber::EnvFilter;

/// Seed consistent hash rings and measure how keys spread over them.
#[derive(Parser, Debug)]
#[command(name = "vnode-ring")]
#[command(author, version, about, long_about = None)]
pub struct CliConfig {
    /// Virtual nodes per data node.
    #[arg(long, global = true, default_value_t = corelib::config::DEFAULT_VNODES_PER_NODE)]
    pub vnodes: usize,

    /// Hash function placing keys and virtual nodes (crc32, xxh3, sip).
    #[arg(long, global = true, default_value_t = PartitionerKind::Crc32)]
    pub partitioner: PartitionerKind,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn ring_config(&self) -> RingConfig {
        RingConfig {
            vnodes_per_node: self.vnodes,
            partitioner: self.partitioner,
        }
    }

    /// Install the global tracing subscriber. Logs go to stderr.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> anyhow::Result<CommandResult> {
        self.command.execute(&self.ring_config())
    }
}
