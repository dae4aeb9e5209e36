//! skyjellies - inventory, feeding and jelly behaviour sandbox
//!
//! Headless host: loads the game config and item pack, then runs a scripted
//! session tick by tick.

mod command_script;
mod commands;
mod config;
mod headless;
mod session;

use anyhow::Result;
use config::{load_item_catalog, GameConfig, DEFAULT_ITEMS_PATH};
use std::{env, path::Path, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting skyjellies v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let game = match cli.config.as_deref() {
        Some(path) => GameConfig::load_from_path(path),
        None => GameConfig::load(),
    };
    let catalog = load_item_catalog(
        cli.items
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_ITEMS_PATH)),
    );

    let summary = headless::run(headless::HeadlessConfig {
        game,
        catalog,
        command_script: cli.command_script,
        max_ticks: cli.max_ticks,
        seed: cli.seed.unwrap_or(0),
        event_log: cli.event_log,
    })?;

    println!(
        "ticks={} hotbar_slots={} inventory_slots={} pickups_left={} jelly_saturation={} jelly_level={} commands_failed={}",
        summary.ticks,
        summary.hotbar_slots,
        summary.inventory_slots,
        summary.pickups_left,
        summary.jelly_saturation,
        summary.jelly_level,
        summary.commands_failed
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    items: Option<PathBuf>,
    command_script: Option<PathBuf>,
    max_ticks: Option<u64>,
    seed: Option<u64>,
    event_log: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--items" => {
                    if let Some(path) = args.next() {
                        opts.items = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--items requires a file path");
                    }
                }
                "--script" | "--command-script" => {
                    if let Some(path) = args.next() {
                        opts.command_script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
        }

        opts
    }
}
