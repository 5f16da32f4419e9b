//! eventfeed CLI entry point.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use eventfeed_core::{TracingConfig, init_tracing};

use eventfeed_cli::cli::{Cli, Command, ConfigAction};
use eventfeed_cli::commands::render::{FeedSource, RenderRequest};
use eventfeed_cli::config::CliConfig;
use eventfeed_cli::error::CliResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load config before tracing so its debug flag applies.
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let loaded = match cli.config {
        Some(ref path) => CliConfig::load_from(path),
        None => CliConfig::load(),
    };

    let debug = cli.debug || loaded.as_ref().is_ok_and(|c| c.debug);
    let tracing_config = if debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    let tracing_config = tracing_config.with_format(cli.log_format.into());
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    let result = loaded.and_then(|file_config| run(cli, file_config, &config_path));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, file_config: CliConfig, config_path: &Path) -> CliResult<()> {
    let config = file_config.merge_cli(&cli);
    let format = cli.output_format();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => {
                eventfeed_cli::commands::config::dump(&config, config_path, &mut stdout)
            }
            ConfigAction::Validate => {
                eventfeed_cli::commands::config::validate(&config, &mut stdout)
            }
            ConfigAction::Path => eventfeed_cli::commands::config::path(config_path, &mut stdout),
        },
        None => {
            config.validate()?;
            let request = RenderRequest {
                source: FeedSource::from_arg(cli.feed.as_deref()),
                now: cli.now.unwrap_or_else(Utc::now),
                format,
                config,
            };
            eventfeed_cli::commands::render::run(&request, &mut stdout)
        }
    }
}
