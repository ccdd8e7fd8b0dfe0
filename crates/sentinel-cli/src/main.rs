use std::process::ExitCode;

use clap::Parser;

use sentinel_core::config::CliOverrides;
use sentinel_core::errors::SentinelErrorCode;
use sentinel_core::SentinelConfig;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    sentinel_core::tracing::init_tracing();
    let cli = Cli::parse();

    let overrides = CliOverrides {
        db_path: cli.db.clone(),
        port: match &cli.command {
            Commands::Serve { port } => *port,
            _ => None,
        },
        webhook_url: cli.webhook_url.clone(),
    };
    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match SentinelConfig::load(&root, Some(&overrides)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.coded_string());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::InitDb => commands::init_db(&config),
        Commands::Scan { target, baseline } => commands::scan(&config, &target, baseline),
        Commands::CompareBaseline { url } => commands::compare_baseline(&config, &url),
        Commands::Serve { .. } => commands::serve(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
