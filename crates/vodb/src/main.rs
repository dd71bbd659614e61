// VODB - Visual Object Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! VODB - Visual Object Debugger
//!
//! Turns the variables visible at each debugger stop into incremental
//! object graph updates, with back and forward stepping through history.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing::{info, warn};
use vodb_engine::{EngineConfig, ExportFormat};

mod cmd;
mod ws_protocol;

/// Command-line interface for VODB
#[derive(Debug, Parser)]
#[command(name = "vodb")]
#[command(about = "Visual Object Debugger - Incremental object graph panels for debugger stops")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ~/.vodb.toml)
    #[arg(long, global = true, env = "VODB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of changelog entries kept per panel
    #[arg(long, global = true)]
    pub max_history: Option<usize>,

    /// Also write logs to a daily rotated file
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines script of panel requests
    Replay {
        /// Script file, one panel request per line
        script: PathBuf,
        /// Print the final graph size and cursor to stderr
        #[arg(long)]
        summary: bool,
    },
    /// Print the changelog entry between two snapshots
    Diff {
        /// Snapshot before the step
        old: PathBuf,
        /// Snapshot after the step
        new: PathBuf,
    },
    /// Export a snapshot as a static diagram
    Export {
        /// Snapshot file
        snapshot: PathBuf,
        /// Output format (dot or plantuml)
        #[arg(long, default_value = "dot")]
        format: ExportFormat,
    },
    /// Serve panels over WebSocket
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "9090")]
        port: u16,
    },
}

impl Cli {
    /// Build the engine configuration from the config file and CLI overrides
    pub fn to_engine_config(&self) -> Result<EngineConfig> {
        let config = match &self.config {
            Some(path) => EngineConfig::load_from(path)
                .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
            None => EngineConfig::load().unwrap_or_else(|e| {
                warn!("Falling back to default configuration: {e}");
                EngineConfig::default()
            }),
        };

        let config = match self.max_history {
            Some(max_history) => config.with_max_history(Some(max_history)),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    vodb_common::logging::init_logging("vodb", cli.log_file)?;

    let config = cli.to_engine_config()?;
    info!(max_history = ?config.max_history, "Engine configuration ready");

    match &cli.command {
        Commands::Replay { script, summary } => cmd::replay_script(script, &config, *summary),
        Commands::Diff { old, new } => cmd::diff_files(old, new),
        Commands::Export { snapshot, format } => cmd::export_file(snapshot, *format),
        Commands::Serve { port } => cmd::start_server(*port, config).await,
    }
}
