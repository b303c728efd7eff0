use clap::{Parser, Subcommand};

/// componentgen - build-time component configuration generator
#[derive(Parser, Debug)]
#[command(name = "componentgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate component configuration and package it into the project archive
    Generate {
        /// Path to the build configuration file (default: componentgen.yaml)
        #[arg(long, value_name = "FILE", env = "COMPONENTGEN_CONFIG")]
        config: Option<String>,

        /// Override the configured transformer identifier
        #[arg(long, value_name = "NAME")]
        transformer: Option<String>,

        /// Override the build output directory
        #[arg(long, value_name = "DIR")]
        build_dir: Option<String>,
    },
}
