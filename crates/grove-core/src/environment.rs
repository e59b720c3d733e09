//! Environment: the handle a controller sees the world through.
//!
//! The host hands a controller one `Environment` per tick, bound to the
//! agent that holds the tick. Sensing is read-only and may be stale the
//! moment it returns; actions come in `can_*` / commit pairs where the
//! commit can still fail after the check passed.

use crate::error::{ActionFailure, ProbeError};
use crate::geometry::{Heading, Position};
use crate::types::*;

/// The world as seen and acted upon by a single agent during its tick.
///
/// There is no yield method: a controller yields by returning from its
/// step, and the host resumes it on the next granted tick.
pub trait Environment {
    // --- Identity and sensing ---

    /// Position of the acting agent.
    fn position(&self) -> Position;

    /// Team of the acting agent.
    fn team(&self) -> Team;

    /// Other agents within `range`, optionally only those of `team`.
    ///
    /// Never includes the acting agent. Order is host-defined.
    fn sense_agents(&self, range: SenseRange, team: Option<Team>) -> Vec<SensedAgent>;

    /// Resource nodes within `range`.
    fn sense_nodes(&self, range: SenseRange) -> Vec<SensedNode>;

    /// Whether a circle of `margin` around `position` lies inside the arena.
    ///
    /// Fails with [`ProbeError::DegenerateRadius`] for non-positive or
    /// non-finite margins.
    fn on_map(&self, position: Position, margin: f64) -> Result<bool, ProbeError>;

    /// Number of agents with `role` on the acting agent's team, including itself.
    fn unit_count(&self, role: Role) -> usize;

    // --- Movement ---

    fn can_move(&self, heading: Heading) -> bool;

    /// Move one stride along `heading`.
    fn move_toward(&mut self, heading: Heading) -> Result<(), ActionFailure>;

    // --- Production ---

    /// Whether the production cooldown has elapsed.
    fn is_build_ready(&self) -> bool;

    fn can_hire(&self, heading: Heading) -> bool;

    /// Spawn a gardener along `heading` (archons only).
    fn hire(&mut self, heading: Heading) -> Result<(), ActionFailure>;

    fn can_plant(&self, heading: Heading) -> bool;

    /// Plant a resource node adjacent to the agent along `heading`.
    fn plant(&mut self, heading: Heading) -> Result<(), ActionFailure>;

    fn can_water(&self, position: Position) -> bool;

    /// Irrigate the own-team node covering `position`.
    fn water(&mut self, position: Position) -> Result<(), ActionFailure>;

    fn can_build(&self, role: Role, heading: Heading) -> bool;

    /// Spawn a support unit of `role` along `heading` (gardeners only).
    fn build(&mut self, role: Role, heading: Heading) -> Result<(), ActionFailure>;

    // --- Economy ---

    /// Team currency balance. Never cache this across ticks.
    fn currency(&self) -> f64;

    /// Team score.
    fn score(&self) -> u32;

    /// Currency needed per point of score at this moment.
    fn score_cost(&self) -> f64;

    /// Convert `amount` currency into score.
    fn donate(&mut self, amount: f64) -> Result<(), ActionFailure>;
}
