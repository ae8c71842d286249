//! # Kinship - Family Tree Server
//!
//! The main binary for the Kinship family graph engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for viewing and editing a tree file
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 apps/kinship (THE BINARY)               │
//! │                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌────────────┐   │
//! │  │   CLI       │    │   HTTP API  │    │   Config   │   │
//! │  │  (clap)     │    │   (axum)    │    │   (toml)   │   │
//! │  └──────┬──────┘    └──────┬──────┘    └─────┬──────┘   │
//! │         │                  │                 │          │
//! │         └──────────────────┼─────────────────┘          │
//! │                            ▼                            │
//! │                    ┌───────────────┐                    │
//! │                    │ kinship-core  │                    │
//! │                    │ (THE LOGIC)   │                    │
//! │                    └───────────────┘                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server over the sample family
//! kinship server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! kinship sample -o family.json
//! kinship --tree family.json generations
//! kinship --tree family.json add-child --parent 3 --parent 8 --name "Zoe Smith"
//! ```

use clap::Parser;
use kinship::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // KINSHIP_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("KINSHIP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kinship=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Kinship startup banner.
fn print_banner() {
    eprintln!(
        r#"
  ██╗  ██╗██╗███╗   ██╗███████╗██╗  ██╗██╗██████╗
  ██║ ██╔╝██║████╗  ██║██╔════╝██║  ██║██║██╔══██╗
  █████╔╝ ██║██╔██╗ ██║███████╗███████║██║██████╔╝
  ██╔═██╗ ██║██║╚██╗██║╚════██║██╔══██║██║██╔═══╝
  ██║  ██╗██║██║ ╚████║███████║██║  ██║██║██║
  ╚═╝  ╚═╝╚═╝╚═╝  ╚═══╝╚══════╝╚═╝  ╚═╝╚═╝╚═╝

  Family Tree Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
