//! Shared types used across all Grove crates.

use crate::geometry::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique handle for an agent in the arena. Assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a deterministic ID (for testing and seeded matches).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(0, seed))
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[simple.len() - 8..])
    }
}

/// Team affiliation of agents and resource nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
    /// Unowned resource nodes scattered by the map.
    Neutral,
}

impl Team {
    /// The opposing team. Neutral has no opponent and maps to itself.
    pub fn enemy(&self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
            Team::Neutral => Team::Neutral,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Team::Blue => "blue",
            Team::Red => "red",
            Team::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// Role tag fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Economic base unit: hires gardeners and spends currency on score.
    Archon,
    /// Production unit: settles, plants a garden and builds support units.
    Gardener,
    Scout,
    Soldier,
    Lumberjack,
    Tank,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Archon,
        Role::Gardener,
        Role::Scout,
        Role::Soldier,
        Role::Lumberjack,
        Role::Tank,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Archon => "archon",
            Role::Gardener => "gardener",
            Role::Scout => "scout",
            Role::Soldier => "soldier",
            Role::Lumberjack => "lumberjack",
            Role::Tank => "tank",
        }
    }

    /// Whether a gardener can produce this role.
    pub fn is_support(&self) -> bool {
        matches!(self, Role::Scout | Role::Soldier | Role::Lumberjack | Role::Tank)
    }

    /// Archons and gardeners crowd a garden site; support units do not.
    pub fn crowds_sites(&self) -> bool {
        matches!(self, Role::Archon | Role::Gardener)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How far a sensing query reaches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SenseRange {
    /// Full visibility of the arena.
    Unbounded,
    /// Only things within this radius of the sensing agent.
    Within(f64),
}

impl SenseRange {
    /// Whether something at `distance` (edge to edge) is inside the range.
    pub fn reaches(&self, distance: f64) -> bool {
        match self {
            SenseRange::Unbounded => true,
            SenseRange::Within(radius) => distance <= *radius,
        }
    }
}

/// Another agent as seen by a sensing query. Read-only and possibly stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensedAgent {
    pub id: AgentId,
    pub position: Position,
    pub team: Team,
    pub role: Role,
}

/// A resource node (tree) as seen by a sensing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensedNode {
    pub position: Position,
    pub team: Team,
}

/// The current round of the simulation.
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ids_are_stable() {
        assert_eq!(AgentId::from_seed(7), AgentId::from_seed(7));
        assert_ne!(AgentId::from_seed(7), AgentId::from_seed(8));
    }

    #[test]
    fn teams_oppose_each_other() {
        assert_eq!(Team::Blue.enemy(), Team::Red);
        assert_eq!(Team::Red.enemy(), Team::Blue);
        assert_eq!(Team::Neutral.enemy(), Team::Neutral);
    }

    #[test]
    fn only_bases_and_gardeners_crowd_sites() {
        let crowding: Vec<Role> = Role::ALL.into_iter().filter(Role::crowds_sites).collect();
        assert_eq!(crowding, vec![Role::Archon, Role::Gardener]);
    }

    #[test]
    fn bounded_range_excludes_far_things() {
        assert!(SenseRange::Unbounded.reaches(1.0e9));
        assert!(SenseRange::Within(3.0).reaches(3.0));
        assert!(!SenseRange::Within(3.0).reaches(3.01));
    }
}
