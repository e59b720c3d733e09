//! Tunable constants shared by every controller.
//!
//! Both structs deserialize from TOML with every field optional, so a
//! `grove.toml` only needs to name the values it changes.

use crate::error::{GroveError, Result};
use crate::geometry::{GardenPattern, Heading};
use serde::{Deserialize, Serialize};

/// Strategy constants for the economic and production roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Score at which a team wins outright.
    pub score_to_win: u32,
    /// Archons stop spending at or below this balance once a gardener exists.
    pub reserve_floor: f64,
    /// Target gardener population the hiring lottery converges to.
    pub desired_gardeners: usize,
    /// Ticks a searching gardener walks one heading before re-randomizing.
    pub direct_path_length: u32,
    /// Crowding/bounds radius for a standard five-slot garden.
    pub free_spot_radius: f64,
    /// Larger radius for sites that must fit bulky units. Not used by default.
    pub bulky_spot_radius: f64,
    /// Foreign resource nodes around a gardener above which it builds lumberjacks.
    pub woods_threshold: usize,
    /// Retry budget for the second lumberjack.
    pub harvest_retry_limit: u32,
    /// Entrance heading of the garden pattern, in degrees (180 = west).
    pub garden_entrance_degrees: f64,
    /// Distance from the gardener at which each slot is irrigated.
    pub water_distance: f64,
    /// Per-archon odds, before dividing by archon count, of a score purchase.
    pub donation_chance: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            score_to_win: 1000,
            reserve_floor: 100.0,
            desired_gardeners: 6,
            direct_path_length: 20,
            free_spot_radius: 3.0,
            bulky_spot_radius: 5.0,
            woods_threshold: 3,
            harvest_retry_limit: 35,
            garden_entrance_degrees: 180.0,
            water_distance: 1.5,
            donation_chance: 0.05,
        }
    }
}

impl StrategyConfig {
    pub fn garden_pattern(&self) -> GardenPattern {
        GardenPattern::new(Heading::from_degrees(self.garden_entrance_degrees))
    }

    /// Reject values that would make the controllers misbehave silently.
    pub fn validate(&self) -> Result<()> {
        if !(self.free_spot_radius > 0.0) {
            return Err(GroveError::invalid_config(
                "free_spot_radius",
                self.free_spot_radius,
                "must be positive",
            ));
        }
        if !(self.bulky_spot_radius > 0.0) {
            return Err(GroveError::invalid_config(
                "bulky_spot_radius",
                self.bulky_spot_radius,
                "must be positive",
            ));
        }
        if !(self.water_distance > 0.0) {
            return Err(GroveError::invalid_config(
                "water_distance",
                self.water_distance,
                "must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.donation_chance) {
            return Err(GroveError::invalid_config(
                "donation_chance",
                self.donation_chance,
                "must be within 0.0-1.0",
            ));
        }
        if self.score_to_win == 0 {
            return Err(GroveError::invalid_config(
                "score_to_win",
                self.score_to_win,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Parameters of the move-with-fallback helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveConfig {
    /// Angular step between fallback probes, in degrees.
    pub offset_degrees: f64,
    /// Fallback probes on each side of the requested heading.
    pub checks_per_side: u32,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            offset_degrees: 20.0,
            checks_per_side: 3,
        }
    }
}
