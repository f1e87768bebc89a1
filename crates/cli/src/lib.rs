//! CLI tool for exercising consistent hash rings.
//!
//! Provides commands for:
//! - Measuring key distribution over a seeded ring
//! - Resolving individual keys
//! - Measuring how many keys move when membership changes
//! - Inspecting each node's share of the ring

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
