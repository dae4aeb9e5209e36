use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use skyjellies_core::{ItemCatalog, ItemDefinition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Offer a stack straight to the player (as if walked over).
    Pickup {
        item: Arc<ItemDefinition>,
        quantity: u32,
        at: Option<Vec3>,
    },
    /// Drop a stack into the world.
    Spawn {
        item: Arc<ItemDefinition>,
        quantity: u32,
        at: Vec3,
    },
    /// Collect pickups around the player.
    Collect,
    Feed {
        item: Arc<ItemDefinition>,
    },
    Select {
        slot: usize,
    },
    /// Walk up to the jelly.
    Approach,
    /// Walk away from the jelly.
    Retreat,
    Interact {
        start: bool,
    },
    Move {
        to: Vec3,
    },
}

pub fn parse_command(input: &str, catalog: &ItemCatalog) -> Result<SessionCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim();

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "pickup" | "give" => {
            if args.len() != 2 && args.len() != 5 {
                return Err(CommandError::new("Usage: pickup <item> <qty> [x y z]"));
            }
            let at = if args.len() == 5 {
                Some(parse_position(&args[2..])?)
            } else {
                None
            };
            Ok(SessionCommand::Pickup {
                item: parse_item(args[0], catalog)?,
                quantity: parse_quantity(args[1])?,
                at,
            })
        }
        "spawn" | "drop" => {
            if args.len() != 5 {
                return Err(CommandError::new("Usage: spawn <item> <qty> <x> <y> <z>"));
            }
            Ok(SessionCommand::Spawn {
                item: parse_item(args[0], catalog)?,
                quantity: parse_quantity(args[1])?,
                at: parse_position(&args[2..])?,
            })
        }
        "collect" => no_args(&args, "collect", SessionCommand::Collect),
        "feed" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: feed <item>"));
            }
            Ok(SessionCommand::Feed {
                item: parse_item(args[0], catalog)?,
            })
        }
        "select" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: select <slot>"));
            }
            let slot = args[0]
                .parse::<usize>()
                .map_err(|_| CommandError::new(format!("Invalid slot: {}", args[0])))?;
            Ok(SessionCommand::Select { slot })
        }
        "approach" => no_args(&args, "approach", SessionCommand::Approach),
        "retreat" => no_args(&args, "retreat", SessionCommand::Retreat),
        "interact" => match args.as_slice() {
            ["start"] => Ok(SessionCommand::Interact { start: true }),
            ["stop"] => Ok(SessionCommand::Interact { start: false }),
            _ => Err(CommandError::new("Usage: interact start|stop")),
        },
        "move" | "tp" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: move <x> <y> <z>"));
            }
            Ok(SessionCommand::Move {
                to: parse_position(&args)?,
            })
        }
        _ => Err(CommandError::new(format!("Unknown command: {cmd}"))),
    }
}

fn no_args(
    args: &[&str],
    name: &str,
    command: SessionCommand,
) -> Result<SessionCommand, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::new(format!("Usage: {name}")))
    }
}

fn parse_item(token: &str, catalog: &ItemCatalog) -> Result<Arc<ItemDefinition>, CommandError> {
    catalog
        .resolve(token)
        .map(Arc::clone)
        .map_err(|err| CommandError::new(err.to_string()))
}

fn parse_quantity(s: &str) -> Result<u32, CommandError> {
    match s.parse::<u32>() {
        Ok(0) => Err(CommandError::new("Quantity must be > 0")),
        Ok(value) => Ok(value),
        Err(_) => Err(CommandError::new(format!("Invalid quantity: {s}"))),
    }
}

fn parse_position(args: &[&str]) -> Result<Vec3, CommandError> {
    let mut coords = [0.0f32; 3];
    for (coord, raw) in coords.iter_mut().zip(args) {
        *coord = raw
            .parse::<f32>()
            .map_err(|_| CommandError::new(format!("Invalid coordinate: {raw}")))?;
    }
    Ok(Vec3::from_array(coords))
}
