mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    componentgen_core::observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            transformer,
            build_dir,
        } => {
            let overrides = commands::generate::Overrides {
                transformer,
                build_dir,
            };
            commands::generate::run(config.as_deref().map(Path::new), overrides)?;
        }
    }

    Ok(())
}
