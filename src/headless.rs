use crate::command_script::CommandScriptPlayer;
use crate::config::GameConfig;
use crate::session::{Session, SessionSummary};
use anyhow::Result;
use skyjellies_core::{ItemCatalog, SimTick};
use skyjellies_testkit::JsonlSink;
use std::path::PathBuf;

/// Ticks simulated when neither a script nor a tick limit is given.
const DEFAULT_MAX_TICKS: u64 = 20 * SimTick::PER_SECOND;

pub struct HeadlessConfig {
    pub game: GameConfig,
    pub catalog: ItemCatalog,
    pub command_script: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    pub seed: u64,
    pub event_log: Option<PathBuf>,
}

pub fn run(cfg: HeadlessConfig) -> Result<SessionSummary> {
    let mut script = cfg
        .command_script
        .as_deref()
        .map(CommandScriptPlayer::from_path)
        .transpose()?;
    let event_log = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let max_ticks = match (cfg.max_ticks, &script) {
        (Some(limit), _) => Some(limit),
        (None, Some(_)) => None,
        (None, None) => Some(DEFAULT_MAX_TICKS),
    };

    let mut session = Session::new(cfg.game, cfg.catalog, cfg.seed, event_log);
    loop {
        if max_ticks.is_some_and(|limit| session.tick().0 >= limit) {
            break;
        }

        if let Some(script) = script.as_mut() {
            for command in script.drain_ready_commands(session.tick()) {
                let output = session.run_command(&command)?;
                for line in &output.lines {
                    tracing::debug!(tick = session.tick().0, "{line}");
                }
            }
            // Without a tick limit the run ends with the script.
            if max_ticks.is_none() && script.is_finished() {
                break;
            }
        }

        session.step()?;
    }

    session.finish()
}
