// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Studyhive - study-coordination backend.
//!
//! This is the binary entry point: reminder scheduling, the real-time hub,
//! and the maintenance jobs, wired over SQLite storage.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Studyhive - study-coordination backend.
#[derive(Parser, Debug)]
#[command(name = "studyhive", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the reminder scheduler, real-time hub, and maintenance jobs.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match studyhive_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            studyhive_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("studyhive serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("studyhive: use --help for available commands");
        }
    }
}
