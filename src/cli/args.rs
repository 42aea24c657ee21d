//! CLI argument definitions using clap
//!
//! Commands:
//! - uniform-catalog serve [--host <host>] [--port <port>] [--memory] [--env-file <path>]
//! - uniform-catalog check-config [--memory] [--env-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Uniform catalog - REST endpoint for a school-uniform store
#[derive(Parser, Debug)]
#[command(name = "uniform-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Keep uniforms in process memory instead of the datastore
        #[arg(long)]
        memory: bool,

        /// Read configuration from this env file instead of ./.env
        #[arg(long)]
        env_file: Option<PathBuf>,
    },

    /// Load and print the configuration, then exit
    CheckConfig {
        /// Validate for the in-memory backend
        #[arg(long)]
        memory: bool,

        /// Read configuration from this env file instead of ./.env
        #[arg(long)]
        env_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
