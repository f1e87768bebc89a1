//! CLI entry point for vnode-ring.

use clap::Parser;
use cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.init_logging();
    let result = config.run()?;
    println!("{}", result);
    Ok(())
}
