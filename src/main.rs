//! Student REST API
//!
//! A small CRUD service over a single `students` table, built with Tokio,
//! Axum and SQLite.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 STUDENT API                   │
//!                         │                                               │
//!   Client Request        │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────────┼─▶│  http   │──▶│ handlers │──▶│  storage  │  │
//!                         │  │ server  │   │ validate │   │   port    │  │
//!                         │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                         │                                     │        │
//!                         │                                     ▼        │
//!   Client Response       │  ┌──────────┐                ┌───────────┐  │
//!   ◀─────────────────────┼──│ envelope │◀───────────────│  sqlite   │  │
//!                         │  └──────────┘                └───────────┘  │
//!                         │                                               │
//!                         │  Cross-cutting: config, observability,        │
//!                         │                 lifecycle (signals, drain)    │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use student_api::config::{load_config, resolve_config_path, CONFIG_PATH_VAR};
use student_api::lifecycle;
use student_api::observability::logging;

#[derive(Parser)]
#[command(name = "student-api")]
#[command(about = "CRUD HTTP service for student records", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file, used when `CONFIG_PATH` is unset.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(std::env::var(CONFIG_PATH_VAR).ok(), cli.config)?;
    let config = load_config(&config_path)?;
    logging::init(&config);

    tracing::info!(
        path = %config_path.display(),
        env = %config.env,
        address = %config.http_server.address,
        storage_path = %config.storage_path,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;
    Ok(())
}
