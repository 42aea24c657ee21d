//! CLI command implementations

use std::path::Path;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, StorageBackend};
use crate::http_server::{CatalogState, HttpServer};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments, set up logging and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing();
    run_command(cli.command)
}

/// Log to stdout, filtered by `RUST_LOG` (default `info`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        // a subscriber installed by the embedding process keeps receiving events
        debug!(error = %e, "tracing subscriber already set");
    }
}

/// Run a single command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            host,
            port,
            memory,
            env_file,
        } => {
            let mut config = load_config(env_file.as_deref(), memory)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config)
        }
        Command::CheckConfig { memory, env_file } => {
            let config = load_config(env_file.as_deref(), memory)?;
            check_config(&config);
            Ok(())
        }
    }
}

fn load_config(env_file: Option<&Path>, memory: bool) -> CliResult<AppConfig> {
    let config = match env_file {
        Some(path) => AppConfig::from_env_file(path, memory)?,
        None => AppConfig::from_env(memory)?,
    };
    Ok(config)
}

/// Start the server and block until it shuts down
pub fn serve(config: AppConfig) -> CliResult<()> {
    match &config.storage {
        StorageBackend::Postgrest(pg) => info!(url = %pg.url, table = %config.table, "using datastore"),
        StorageBackend::Memory => info!(table = %config.table, "using in-memory tables"),
    }

    let state = CatalogState::from_config(&config);
    let server = HttpServer::with_state(config.server, state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

/// Print the effective configuration with the access key masked
pub fn check_config(config: &AppConfig) {
    println!("listen:       {}", config.server.socket_addr());
    match &config.storage {
        StorageBackend::Postgrest(pg) => {
            println!("storage:      {}", pg.url);
            println!("access key:   {}", mask(&pg.api_key));
        }
        StorageBackend::Memory => println!("storage:      in-memory"),
    }
    println!("table:        {}", config.table);
    println!("update mode:  {:?}", config.update_mode);
    if config.server.cors_origins.is_empty() {
        println!("cors:         any origin");
    } else {
        println!("cors:         {}", config.server.cors_origins.join(", "));
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_mask_hides_secret() {
        assert_eq!(mask("eyJhbGciOiJIUzI1NiJ9"), "eyJh****");
        assert_eq!(mask("ab"), "ab****");
    }

    #[test]
    fn test_check_config_memory() {
        let config = AppConfig::from_lookup(|_| None, true).unwrap();
        check_config(&config);
    }
}
