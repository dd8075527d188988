//! bk-log - format JSON-lines log records
//!
//! Usage:
//!   bk-log [FILE]                      Print records from FILE (or stdin) to the console
//!   bk-log --url http://host/c? [FILE] Send each record as a beacon instead
//!   bk-log -c config.toml [FILE]       Take format, styles and level from a config file
//!   bk-log compile '<template>'        Show what a template compiles to

mod cli;

use anyhow::{Context, Result};
use browserkit_log::config::{basic_config, Config, LevelSetting};
use browserkit_log::directive::compile;
use browserkit_log::logging::{init_tracing, LogRecord};
use browserkit_log::style::StylingCapability;
use clap::Parser;
use cli::{Cli, Command};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{debug, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(Command::Compile { template }) = &cli.command {
        print_compiled(template);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let capability = if cli.no_style {
        StylingCapability::Unsupported
    } else {
        StylingCapability::detect()
    };
    let handler = basic_config(&config, capability).context("Cannot build handler")?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut emitted = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Cannot read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let record = match serde_json::from_str(&line)
            .map_err(anyhow::Error::from)
            .and_then(|value| LogRecord::from_json(value).map_err(anyhow::Error::from))
        {
            Ok(record) => record,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping invalid record");
                continue;
            }
        };
        if handler.handle(&record) {
            emitted += 1;
        }
    }

    debug!(emitted, "Input exhausted");
    Ok(())
}

/// Config file (if any) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(format) = &cli.format {
        config.format = Some(format.clone());
    }
    if let Some(time_format) = &cli.time_format {
        config.time_format = Some(time_format.clone());
    }
    if let Some(url) = &cli.url {
        config.url = Some(url.clone());
    }
    if let Some(level) = &cli.level {
        config.level = Some(match level.parse::<u32>() {
            Ok(value) => LevelSetting::Value(value),
            Err(_) => LevelSetting::Name(level.clone()),
        });
    }
    if let Some(logger) = &cli.logger {
        config.logger = Some(logger.clone());
    }
    if cli.no_grouping {
        config.grouping = Some(false);
    }
    if cli.no_style {
        config.styling = Some(StylingCapability::Unsupported);
    }

    config.validate()?;
    Ok(config)
}

fn print_compiled(template: &str) {
    let compiled = compile(template);
    println!("{}", compiled.template);
    for directive in &compiled.directives {
        println!(
            "  {} kind={:?} flag={:?} width={:?} precision={:?}",
            directive.key, directive.kind, directive.flag, directive.width, directive.precision
        );
    }
}
