use anyhow::Result;
use serde::{Deserialize, Serialize};
use skyjellies_assets::{builtin_catalog, catalog_from_file};
use skyjellies_core::ItemCatalog;
use skyjellies_world::jelly::ExperienceConfig;
use skyjellies_world::{JellyConfig, HOTBAR_SIZE, INVENTORY_SIZE, PICKUP_RADIUS};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_GAME_CONFIG_PATH: &str = "config/game.toml";
pub const DEFAULT_ITEMS_PATH: &str = "config/items.json";

/// Smallest accepted first level-up threshold.
const MIN_EXPERIENCE_THRESHOLD: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainersConfig {
    pub hotbar_size: usize,
    pub inventory_size: usize,
}

impl Default for ContainersConfig {
    fn default() -> Self {
        Self {
            hotbar_size: HOTBAR_SIZE,
            inventory_size: INVENTORY_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedingConfig {
    /// Food units consumed per feeding.
    pub consumption_amount: u32,
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            consumption_amount: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Distance within which pickups are collected.
    pub pickup_radius: f32,
    /// Radius of the walkable island around the origin.
    pub island_radius: f32,
    /// Distance at which a jelly notices the player.
    pub sense_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            pickup_radius: PICKUP_RADIUS,
            island_radius: 30.0,
            sense_radius: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub containers: ContainersConfig,
    pub feeding: FeedingConfig,
    pub jelly: JellyConfig,
    pub experience: ExperienceConfig,
    pub world: WorldConfig,
}

impl GameConfig {
    /// Load the game configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_GAME_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GameConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!("Game config not found at {}. Using defaults", path.display());
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                GameConfig::default()
            }
        }
    }

    /// Save the configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        if self.feeding.consumption_amount == 0 {
            warn!("feeding.consumption_amount must be at least 1; using 1");
            self.feeding.consumption_amount = 1;
        }
        let defaults = ExperienceConfig::default();
        let threshold = self.experience.initial_threshold;
        if !threshold.is_finite() || threshold < MIN_EXPERIENCE_THRESHOLD {
            warn!(
                threshold,
                "experience.initial_threshold must be at least {MIN_EXPERIENCE_THRESHOLD}; using {}",
                defaults.initial_threshold
            );
            self.experience.initial_threshold = defaults.initial_threshold;
        }
        let multiplier = self.experience.threshold_multiplier;
        if !multiplier.is_finite() || multiplier <= 1.0 {
            warn!(
                multiplier,
                "experience.threshold_multiplier must be above 1; using {}",
                defaults.threshold_multiplier
            );
            self.experience.threshold_multiplier = defaults.threshold_multiplier;
        }
        self
    }
}

/// Load the item catalog from a JSON pack, falling back to the built-in items.
pub fn load_item_catalog(path: &Path) -> ItemCatalog {
    match catalog_from_file(path) {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            warn!("Item pack {} is empty. Using built-in items", path.display());
            builtin_catalog()
        }
        Err(err) => {
            warn!(
                "Failed to load item pack {}: {err}. Using built-in items",
                path.display()
            );
            builtin_catalog()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("skyjellies_config_{timestamp}"))
            .join(name)
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let cfg = GameConfig::load_from_path(Path::new(DEFAULT_GAME_CONFIG_PATH));
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let cfg: GameConfig = toml::from_str(
            r#"
            [containers]
            hotbar_size = 4

            [jelly]
            watch_distance = 2.5
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.containers.hotbar_size, 4);
        assert_eq!(cfg.containers.inventory_size, 27);
        assert_eq!(cfg.jelly.watch_distance, 2.5);
        assert_eq!(cfg.jelly.max_saturation, 100.0);
        assert_eq!(cfg.experience.max_level, 10);
    }

    #[test]
    fn malformed_or_missing_files_fall_back() {
        let path = temp_path("game.toml");
        assert_eq!(GameConfig::load_from_path(&path), GameConfig::default());

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[containers\nhotbar_size = ").unwrap();
        assert_eq!(GameConfig::load_from_path(&path), GameConfig::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn zero_consumption_is_raised_to_one() {
        let path = temp_path("game.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[feeding]\nconsumption_amount = 0\n").unwrap();
        assert_eq!(GameConfig::load_from_path(&path).feeding.consumption_amount, 1);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn degenerate_level_curve_is_replaced() {
        let path = temp_path("game.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "[experience]\ninitial_threshold = 0.0001\nthreshold_multiplier = 1.0\n",
        )
        .unwrap();

        let cfg = GameConfig::load_from_path(&path);
        assert_eq!(cfg.experience, ExperienceConfig::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("saved.toml");
        let mut cfg = GameConfig::default();
        cfg.containers.hotbar_size = 5;
        cfg.experience.threshold_multiplier = 2.0;
        cfg.save_to_path(&path).expect("save");

        assert_eq!(GameConfig::load_from_path(&path), cfg);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn item_pack_falls_back_to_builtin() {
        let catalog = load_item_catalog(&temp_path("missing.json"));
        assert!(catalog.by_name("red_berry").is_some());

        let shipped = load_item_catalog(Path::new(DEFAULT_ITEMS_PATH));
        assert!(shipped.by_name("red_berry").is_some());
    }
}
