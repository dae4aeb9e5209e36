use anyhow::{Context, Result};
use serde::Deserialize;
use skyjellies_core::SimTick;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptStepDef>,
}

#[derive(Debug, Deserialize)]
struct ScriptStepDef {
    tick: u64,
    command: String,
}

#[derive(Debug, Clone)]
struct ScriptStep {
    tick: SimTick,
    command: String,
}

/// Deterministic session script.
///
/// A script is a list of `{tick, command}` steps sorted by tick. Steps sharing
/// a tick run in file order.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<ScriptStep>,
}

impl CommandScriptPlayer {
    /// Load a script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid command script {}", path.display()))
    }

    /// Load a script from an in-memory JSON string.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick = 0;
        for (index, step) in file.steps.into_iter().enumerate() {
            let command = step.command.trim().to_string();
            if command.is_empty() {
                anyhow::bail!("step {index} has an empty command");
            }
            if step.tick < last_tick {
                anyhow::bail!("command script steps must be sorted by tick (step {index})");
            }
            last_tick = step.tick;

            pending.push_back(ScriptStep {
                tick: SimTick(step.tick),
                command,
            });
        }

        Ok(Self { pending })
    }

    /// Drain and return all commands scheduled for ticks `<= tick`.
    pub fn drain_ready_commands(&mut self, tick: SimTick) -> Vec<String> {
        let ready = self
            .pending
            .iter()
            .take_while(|step| step.tick <= tick)
            .count();
        self.pending.drain(..ready).map(|step| step.command).collect()
    }

    /// Tick of the next pending step.
    pub fn next_tick(&self) -> Option<SimTick> {
        self.pending.front().map(|step| step.tick)
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
