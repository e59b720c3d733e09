//! Configuration management for Grove CLI.

use anyhow::{Context, Result};
use grove::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "grove.toml";

/// Grove project configuration.
///
/// Every section and every field is optional; whatever a `grove.toml`
/// leaves out keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: MatchConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub movement: MoveConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,
}

fn default_max_rounds() -> u64 { 3000 }

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_rounds: default_max_rounds(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from grove.toml in the current
    /// or parent directories. Returns the file it came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(&std::env::current_dir()?),
        };
        match path {
            Some(path) => {
                let config = Self::read(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Config::default(), None)),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// The match setup this config describes, validated.
    pub fn game_config(&self) -> Result<GameConfig> {
        let config = GameConfig {
            seed: self.game.seed,
            max_rounds: self.game.max_rounds,
            strategy: self.strategy.clone(),
            movement: self.movement.clone(),
            arena: self.arena.clone(),
        };
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Find grove.toml in `start` or any of its parents.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_survives_toml() {
        let text = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let parsed: Config = toml::from_str(
            "[game]\nseed = 9\n\n[strategy]\ndesired_gardeners = 2\n",
        )
        .unwrap();
        assert_eq!(parsed.game.seed, 9);
        assert_eq!(parsed.game.max_rounds, 3000);
        assert_eq!(parsed.strategy.desired_gardeners, 2);
        assert_eq!(parsed.strategy.reserve_floor, StrategyConfig::default().reserve_floor);
        assert_eq!(parsed.arena, ArenaConfig::default());
    }

    #[test]
    fn game_config_rejects_bad_values() {
        let mut config = Config::default();
        config.game.max_rounds = 0;
        assert!(config.game_config().is_err());

        config.game.max_rounds = 10;
        config.arena.width = -1.0;
        assert!(config.game_config().is_err());

        config.arena.width = 40.0;
        let game = config.game_config().unwrap();
        assert_eq!(game.max_rounds, 10);
        assert_eq!(game.arena.width, 40.0);
    }

    #[test]
    fn config_is_found_in_a_parent_directory() {
        let scratch = tempfile::tempdir().unwrap();
        let root = scratch.path().to_path_buf();
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let mut config = Config::default();
        config.game.seed = 77;
        config.save(&root.join(CONFIG_FILE)).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, root.join(CONFIG_FILE));
        assert_eq!(Config::read(&found).unwrap().game.seed, 77);

        let (loaded, from) = Config::load(Some(&found)).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(from, Some(found));
    }
}
