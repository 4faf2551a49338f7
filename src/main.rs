//! Entry point for the résumé viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` and saved preferences.
//! - Load the CV content for the startup language.
//! - Launch the GUI application.

mod app;
mod cache;
mod config;
mod crawl;
mod cv;
mod language;
mod music;
mod theme;

use crate::app::{Launch, run_app};
use crate::cache::{Preferences, load_preferences};
use crate::config::{load_config, serialize_config};
use crate::cv::load_cv;
use crate::language::Language;
use crate::theme::Template;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const CONFIG_PATH: &str = "conf/config.toml";
const USAGE: &str =
    "Usage: holocrawl <data-dir> [--language pt|en] [--template standard|ats|star-wars]\n       holocrawl --print-config";

#[derive(Debug, PartialEq)]
enum Command {
    Run(CliArgs),
    PrintConfig,
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    data_dir: PathBuf,
    language: Option<Language>,
    template: Option<Template>,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new(CONFIG_PATH));
    let args = match parse_args(env::args().skip(1))? {
        Command::PrintConfig => {
            let rendered = serialize_config(&config).context("Failed to serialize config")?;
            println!("{rendered}");
            return Ok(());
        }
        Command::Run(args) => args,
    };
    if !args.data_dir.is_dir() {
        return Err(anyhow!(
            "Data directory not found: {}",
            args.data_dir.display()
        ));
    }

    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %args.data_dir.display(),
        level = %config.log_level,
        "Starting résumé viewer"
    );

    let prefs = match load_preferences(&args.data_dir) {
        Some(prefs) => {
            info!(theme = %prefs.theme, template = %prefs.template, "Restored preferences");
            prefs.for_launch()
        }
        None => Preferences {
            theme: config.theme,
            ..Preferences::default()
        },
    };
    let locale = Language::locale_from_env();
    let language = Language::detect(args.language, prefs.language, locale.as_deref());
    let template = args.template.unwrap_or(prefs.template);
    info!(%language, %template, "Resolved startup view");

    let bundle = load_cv(&args.data_dir, language)?;
    run_app(Launch {
        config,
        data_dir: args.data_dir,
        prefs,
        language,
        template,
        bundle,
    })
    .context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut data_dir = None;
    let mut language = None;
    let mut template = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--print-config" => return Ok(Command::PrintConfig),
            "--language" | "-l" => {
                let value = args.next().ok_or_else(|| anyhow!("--language needs a value\n{USAGE}"))?;
                language = Some(value.parse::<Language>()?);
            }
            "--template" | "-t" => {
                let value = args.next().ok_or_else(|| anyhow!("--template needs a value\n{USAGE}"))?;
                template = Some(value.parse::<Template>()?);
            }
            flag if flag.starts_with('-') => {
                return Err(anyhow!("Unknown option: {flag}\n{USAGE}"));
            }
            _ if data_dir.is_some() => {
                return Err(anyhow!("Unexpected argument: {arg}\n{USAGE}"));
            }
            _ => data_dir = Some(PathBuf::from(arg)),
        }
    }

    let data_dir = data_dir.ok_or_else(|| anyhow!(USAGE))?;
    Ok(Command::Run(CliArgs {
        data_dir,
        language,
        template,
    }))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with [logging] log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_data_dir_and_flags() {
        let parsed = parse_args(args(&["cv", "--language", "pt-BR", "-t", "ats"])).unwrap();
        assert_eq!(
            parsed,
            Command::Run(CliArgs {
                data_dir: PathBuf::from("cv"),
                language: Some(Language::Pt),
                template: Some(Template::AtsFriendly),
            })
        );
    }

    #[test]
    fn print_config_needs_no_data_dir() {
        assert_eq!(
            parse_args(args(&["--print-config"])).unwrap(),
            Command::PrintConfig
        );
    }

    #[test]
    fn rejects_missing_values_and_extra_arguments() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["cv", "--template"])).is_err());
        assert!(parse_args(args(&["cv", "other"])).is_err());
        assert!(parse_args(args(&["cv", "--language", "de"])).is_err());
        assert!(parse_args(args(&["cv", "--verbose"])).is_err());
    }
}
