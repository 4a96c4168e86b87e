/// co_rivers: Colorado river flow display.
///
///   co_rivers [render]   one render pass; the layout tree is printed to stdout as JSON
///   co_rivers verify     check every registry station against the live providers
///
/// Logs go to stderr (and optionally a file) so stdout stays machine-readable.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use co_rivers::app;
use co_rivers::cache::MemoryCache;
use co_rivers::config::Config;
use co_rivers::ingest::fetcher::Fetcher;
use co_rivers::ingest::http::build_client;
use co_rivers::logging::{self, DataSource};
use co_rivers::verify;

#[derive(Parser)]
#[command(name = "co_rivers", version, about = "Colorado river flow display", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run one render pass and print the layout tree as JSON (default)
    Render,
    /// Check every registry station against the live providers
    Verify,
}

fn main() -> ExitCode {
    let command = Cli::parse().command.unwrap_or(Command::Render);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logger(
        logging::parse_level(&config.logging.level),
        config.logging.file.as_deref(),
        config.logging.console_timestamps,
    ) {
        eprintln!("could not install logger: {}", e);
    }

    let client = match build_client(config.api.timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            logging::error(DataSource::System, None, &format!("could not build HTTP client: {}", e));
            return ExitCode::FAILURE;
        }
    };
    let cache = MemoryCache::new();
    let fetcher = Fetcher::new(&client, &cache, config.endpoints());

    match command {
        Command::Verify => {
            let report = verify::run_full_verification(&fetcher);
            verify::print_summary(&report);
        }
        Command::Render => {
            let root = app::render(&config, &fetcher);
            match serde_json::to_string_pretty(&root) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    logging::error(DataSource::System, None, &format!("could not serialize frame: {}", e));
                }
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_render() {
        let cli = Cli::try_parse_from(["co_rivers"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.command.unwrap_or(Command::Render), Command::Render);
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["co_rivers", "render"]).unwrap();
        assert_eq!(cli.command, Some(Command::Render));
        let cli = Cli::try_parse_from(["co_rivers", "verify"]).unwrap();
        assert_eq!(cli.command, Some(Command::Verify));
    }

    #[test]
    fn test_unknown_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["co_rivers", "carousel"]).is_err());
        assert!(Cli::try_parse_from(["co_rivers", "render", "junk"]).is_err());
    }
}
