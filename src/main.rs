//! CLI entry point for edge-matched tile generation

use clap::Parser;
use edgetile::io::cli::{Cli, TileRunner};

fn main() -> edgetile::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let runner = TileRunner::new(cli);
    runner.process()?;
    Ok(())
}
