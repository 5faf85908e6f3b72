//! Data Channel Gateway - Entry Point
//!
//! Binary entry point for the gateway. Composes the production binding set,
//! then serves the JSON control surface until shut down.
//!
//! ## Usage
//!
//! | Invocation | Description |
//! |------------|-------------|
//! | `dcg` | Run the gateway with defaults |
//! | `dcg --config path/to/dcg.toml` | Run with an explicit config file |
//! | `dcg --check` | Compose, print the resolved bindings and exit |

// Force-link dcg-providers to ensure linkme binding registrations are included
extern crate dcg_providers;

use clap::Parser;
use dcg::run;

/// Command line interface for the Data Channel Gateway
#[derive(Parser, Debug)]
#[command(name = "dcg")]
#[command(about = "Data Channel Gateway - UDP relay with a JSON control surface")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Compose the container, print the resolved binding set and exit
    ///
    /// Useful for checking which binding unit a build linked without
    /// starting the control listener.
    #[arg(long)]
    pub check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli.config.as_deref(), cli.check).await
}
