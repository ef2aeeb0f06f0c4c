use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use tracing::level_filters::LevelFilter;

const ARG_LOG_LEVEL: &str = "ARG_LOG_LEVEL";

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOG_LEVEL)
        .long("log-level")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
        .default_value("info")
        .help("the minimal level of the messages written on the standard error")
}

pub(crate) fn init_logging(arg_matches: &ArgMatches<'_>) -> Result<()> {
    let level = arg_matches
        .value_of(ARG_LOG_LEVEL)
        .unwrap_or("info")
        .parse::<LevelFilter>()
        .context("while reading the logging level")?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("cannot initialize the logging system: {}", e))
}
