//! Headless play session: one player, one jelly, one island.

use anyhow::Result;
use glam::Vec3;
use skyjellies_core::{scoped_rng, ItemCatalog, SimTick};
use skyjellies_testkit::{EventRecord, JsonlSink};
use skyjellies_world::{
    feed_jelly, BehaviorEvent, EntityId, FlatNavAgent, ItemStack, Jelly, JellyType, NavAgent,
    PickupField, PlayerInventory, SenseEvent, SlotGrid, Stimulus,
};
use std::rc::Rc;
use tracing::{info, warn};

use crate::commands::{parse_command, SessionCommand};
use crate::config::GameConfig;

pub const PLAYER_ID: EntityId = EntityId(0);
pub const JELLY_ID: EntityId = EntityId(1);

/// Where the jelly spawns.
const JELLY_SPAWN: Vec3 = Vec3::new(4.0, 0.0, 4.0);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

impl CommandOutput {
    fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// End-of-run numbers for logs and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub hotbar_slots: usize,
    pub inventory_slots: usize,
    pub pickups_left: usize,
    pub jelly_saturation: f32,
    pub jelly_level: u32,
    pub commands_failed: usize,
}

pub struct Session {
    config: GameConfig,
    catalog: ItemCatalog,
    tick: SimTick,
    player: PlayerInventory,
    player_position: Vec3,
    hotbar_grid: Rc<SlotGrid>,
    inventory_grid: Rc<SlotGrid>,
    field: PickupField,
    jelly: Jelly,
    agent: FlatNavAgent,
    jelly_senses_player: bool,
    event_log: Option<JsonlSink>,
    commands_failed: usize,
}

impl Session {
    pub fn new(
        config: GameConfig,
        catalog: ItemCatalog,
        seed: u64,
        event_log: Option<JsonlSink>,
    ) -> Self {
        let mut player = PlayerInventory::new(
            config.containers.hotbar_size,
            config.containers.inventory_size,
        );
        let hotbar_grid = Rc::new(SlotGrid::new(config.containers.hotbar_size));
        let inventory_grid = Rc::new(SlotGrid::new(config.containers.inventory_size));
        player.subscribe_hotbar(hotbar_grid.clone());
        player.subscribe_inventory(inventory_grid.clone());

        let jelly = Jelly::new(
            JELLY_ID,
            JellyType::Base,
            &config.jelly,
            config.experience,
            scoped_rng(seed, JELLY_ID.0, SimTick::ZERO),
        );
        let agent = FlatNavAgent::new(JELLY_SPAWN, config.world.island_radius);

        info!(
            seed,
            items = catalog.len(),
            hotbar = config.containers.hotbar_size,
            inventory = config.containers.inventory_size,
            "session started"
        );

        Self {
            config,
            catalog,
            tick: SimTick::ZERO,
            player,
            player_position: Vec3::ZERO,
            hotbar_grid,
            inventory_grid,
            field: PickupField::new(),
            jelly,
            agent,
            jelly_senses_player: false,
            event_log,
            commands_failed: 0,
        }
    }

    pub fn tick(&self) -> SimTick {
        self.tick
    }

    pub fn player(&self) -> &PlayerInventory {
        &self.player
    }

    pub fn jelly(&self) -> &Jelly {
        &self.jelly
    }

    pub fn field(&self) -> &PickupField {
        &self.field
    }

    pub fn hotbar_grid(&self) -> &SlotGrid {
        &self.hotbar_grid
    }

    pub fn inventory_grid(&self) -> &SlotGrid {
        &self.inventory_grid
    }

    /// Parse and run one script command. Failures are logged, not fatal.
    pub fn run_command(&mut self, input: &str) -> Result<CommandOutput> {
        let output = match parse_command(input, &self.catalog) {
            Ok(cmd) => self.execute(cmd),
            Err(err) => {
                warn!(command = input, %err, "rejected command");
                self.commands_failed += 1;
                CommandOutput::default().line(format!("Error: {err}"))
            }
        };
        let payload = format!("{input} => {}", output.lines.join("; "));
        self.record("Command", &payload)?;
        Ok(output)
    }

    fn execute(&mut self, cmd: SessionCommand) -> CommandOutput {
        let out = CommandOutput::default();
        match cmd {
            SessionCommand::Pickup { item, quantity, at } => {
                let at = at.unwrap_or(self.player_position);
                let stack = match ItemStack::new(item, quantity) {
                    Ok(stack) => stack,
                    Err(err) => return self.fail(out, err),
                };
                let offered = stack.to_string();
                let outcome = self.player.try_add(stack);
                let out = out.line(format!("Picked up {offered}"));
                match outcome.remainder {
                    Some(rest) => {
                        let line = format!("Inventory full; {rest} left at {at}");
                        self.field.spawn(at, rest);
                        out.line(line)
                    }
                    None => out,
                }
            }
            SessionCommand::Spawn { item, quantity, at } => match ItemStack::new(item, quantity) {
                Ok(stack) => {
                    let line = format!("Spawned {stack} at {at}");
                    self.field.spawn(at, stack);
                    out.line(line)
                }
                Err(err) => self.fail(out, err),
            },
            SessionCommand::Collect => {
                let report = self.field.collect_into(
                    &mut self.player,
                    self.player_position,
                    self.config.world.pickup_radius,
                );
                out.line(format!(
                    "Collected {} pickups ({} units), {} put back",
                    report.collected, report.delivered, report.respawned
                ))
            }
            SessionCommand::Feed { item } => {
                if !self.jelly.is_interacting() {
                    return self.fail(out, "not interacting with the jelly");
                }
                let amount = self.config.feeding.consumption_amount;
                match feed_jelly(&mut self.player, &item, amount, &mut self.jelly) {
                    Ok(outcome) => out.line(format!(
                        "Fed {}x {}; saturation {}, level {}",
                        outcome.consumed,
                        item.display_name,
                        outcome.saturation,
                        self.jelly.experience().level()
                    )),
                    Err(err) => self.fail(out, err),
                }
            }
            SessionCommand::Select { slot } => match self.player.select(slot) {
                Ok(()) => {
                    let held = self
                        .player
                        .selected_stack()
                        .map_or_else(|| "nothing".to_string(), ToString::to_string);
                    out.line(format!("Selected slot {slot} ({held})"))
                }
                Err(err) => self.fail(out, err),
            },
            SessionCommand::Approach => {
                let jelly = self.agent.position();
                let offset = (self.player_position - jelly).normalize_or_zero();
                let offset = if offset == Vec3::ZERO { Vec3::X } else { offset };
                self.player_position = jelly + offset * 2.0;
                out.line(format!("Moved next to the jelly at {}", self.player_position))
            }
            SessionCommand::Retreat => {
                let jelly = self.agent.position();
                let away = (self.player_position - jelly).normalize_or_zero();
                let away = if away == Vec3::ZERO { Vec3::X } else { away };
                self.player_position =
                    jelly + away * (self.config.world.sense_radius * 3.0);
                out.line(format!("Moved away to {}", self.player_position))
            }
            SessionCommand::Interact { start } => {
                if start {
                    self.jelly.start_interaction();
                    out.line("Interaction started")
                } else {
                    self.jelly.stop_interaction();
                    out.line("Interaction stopped")
                }
            }
            SessionCommand::Move { to } => {
                self.player_position = to;
                out.line(format!("Moved to {to}"))
            }
        }
    }

    fn fail(&mut self, out: CommandOutput, err: impl std::fmt::Display) -> CommandOutput {
        warn!(%err, "command failed");
        self.commands_failed += 1;
        out.line(format!("Error: {err}"))
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) -> Result<()> {
        let senses = self.player_position.distance(self.agent.position())
            <= self.config.world.sense_radius;
        if senses != self.jelly_senses_player {
            self.jelly_senses_player = senses;
            let event = SenseEvent {
                stimulus: Stimulus::Other,
                source: PLAYER_ID,
                present: senses,
            };
            let events = self.jelly.sense(event, &mut self.agent);
            self.record_behavior(&events)?;
        }

        let was_hungry = self.jelly.hunger().is_hungry();
        let subject = self.jelly_senses_player.then_some(self.player_position);
        let events = self.jelly.tick(&mut self.agent, subject);
        self.record_behavior(&events)?;
        self.agent.step();

        if !was_hungry && self.jelly.hunger().is_hungry() {
            info!(
                saturation = self.jelly.hunger().saturation(),
                "jelly is hungry"
            );
            let payload = format!("saturation {}", self.jelly.hunger().saturation());
            self.record("Hungry", &payload)?;
        }

        self.tick = self.tick.advance(1);
        Ok(())
    }

    fn record_behavior(&mut self, events: &[BehaviorEvent]) -> Result<()> {
        for event in events {
            let payload = match event {
                BehaviorEvent::Entered(state) => format!("entered {}", state.as_str()),
                BehaviorEvent::Exited(state) => format!("exited {}", state.as_str()),
                // Destination changes are too frequent for the log.
                BehaviorEvent::DestinationChanged { .. } => continue,
            };
            self.record("Jelly", &payload)?;
        }
        Ok(())
    }

    fn record(&mut self, kind: &str, payload: &str) -> Result<()> {
        if let Some(log) = self.event_log.as_mut() {
            log.write(&EventRecord {
                tick: self.tick,
                kind,
                payload,
            })?;
        }
        Ok(())
    }

    /// Write the summary record and flush the event log.
    pub fn finish(mut self) -> Result<SessionSummary> {
        let summary = SessionSummary {
            ticks: self.tick.0,
            hotbar_slots: self.player.hotbar().len(),
            inventory_slots: self.player.inventory().len(),
            pickups_left: self.field.len(),
            jelly_saturation: self.jelly.hunger().saturation(),
            jelly_level: self.jelly.experience().level(),
            commands_failed: self.commands_failed,
        };
        let payload = format!("{summary:?}");
        self.record("Summary", &payload)?;
        if let Some(log) = self.event_log.as_mut() {
            log.flush()?;
        }
        info!(?summary, "session finished");
        Ok(summary)
    }
}
