mod api;
mod config;
mod consts;
mod dashboard;
mod events;
mod logging;
mod poller;
mod session;

use crate::api::StatusClient;
use crate::config::DashboardConfig;
use crate::session::{render_once, run_headless_mode, setup_session};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Aptos guardian status dashboard
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Where the API lives and how often to poll it
#[derive(ClapArgs)]
struct ApiArgs {
    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the guardian status API, e.g. http://localhost:8080
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the status API until Ctrl+C, printing each cycle
    Watch {
        #[command(flatten)]
        api: ApiArgs,

        /// Seconds between status fetches
        #[arg(long, value_name = "SECS")]
        status_interval: Option<u64>,

        /// Seconds between open-incident fetches
        #[arg(long, value_name = "SECS")]
        incidents_interval: Option<u64>,

        /// Write the rendered page to this file after every cycle
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Fetch once and print the rendered page
    Once {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Write a configuration file with the default settings
    InitConfig {
        /// Destination of the configuration file
        #[arg(long, value_name = "PATH")]
        path: PathBuf,
    },
}

/// Load the config file if one is given, then apply command-line overrides.
fn resolve_config(api: &ApiArgs) -> Result<DashboardConfig, Box<dyn Error>> {
    let mut config = match &api.config {
        Some(path) => DashboardConfig::load_from_file(path)
            .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?,
        None => DashboardConfig::default(),
    };
    if let Some(base_url) = &api.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let args = Args::parse();
    match args.command {
        Command::Watch {
            api,
            status_interval,
            incidents_interval,
            output,
        } => {
            let mut config = resolve_config(&api)?;
            if let Some(secs) = status_interval {
                config.status_interval_secs = secs;
            }
            if let Some(secs) = incidents_interval {
                config.incidents_interval_secs = secs;
            }
            let session = match setup_session(&config, output) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("Failed to start dashboard: {}", e);
                    return Err(e);
                }
            };
            run_headless_mode(session).await
        }
        Command::Once { api } => {
            let config = resolve_config(&api)?;
            if let Err(e) = config.validate() {
                eprintln!("Invalid configuration: {}", e);
                return Err(e.into());
            }
            let client = StatusClient::new(&config)?;
            print!("{}", render_once(&config, Arc::new(client)).await);
            Ok(())
        }
        Command::InitConfig { path } => {
            DashboardConfig::default()
                .save(&path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}
