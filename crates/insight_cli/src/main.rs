//! Insight CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use insight_chat::ChatError;

mod commands;
mod render;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "insight=debug"
    } else if cli.quiet {
        "insight=warn"
    } else {
        "insight=info"
    };

    // Logs go to stderr so transcripts on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}", level)));
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let config = match cli.config.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            return ExitCode::from(ExitCodes::CONFIG_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Chat(args) => commands::chat::execute(args, config).await,
        Commands::Ask(args) => commands::ask::execute(args, config).await,
        Commands::Classify(args) => commands::classify::execute(args, config),
        Commands::Suggestions(args) => commands::suggestions::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<ChatError>() {
        Some(ChatError::InvalidConfig(_) | ChatError::Toml(_)) => ExitCodes::CONFIG_ERROR,
        Some(ChatError::SuggestionNotFound(_)) => ExitCodes::INVALID_ARGS,
        Some(_) => ExitCodes::GENERAL_ERROR,
        None => {
            let msg = e.to_string().to_lowercase();
            if msg.contains("argument") || msg.contains("option") {
                ExitCodes::INVALID_ARGS
            } else {
                ExitCodes::GENERAL_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_error() {
        let err = anyhow::Error::new(ChatError::InvalidConfig("empty".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::CONFIG_ERROR);

        let err = anyhow::Error::new(ChatError::SuggestionNotFound(5));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(ChatError::Disposed);
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);

        let err = anyhow::anyhow!("unknown option: --foo");
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }
}
