//! # Grove
//!
//! Per-agent behavior controllers for a two-team arena with a shared
//! economy.
//!
//! Every agent gets one tick per round. An **archon** keeps away from
//! enemies and spends the team's bullets: it hires gardeners through a
//! lottery and buys victory points. A **gardener** walks until it finds
//! free ground, plants a hexagonal garden around itself and produces
//! support units through the one gap it leaves open.
//!
//! ## Quick Start
//!
//! ```rust
//! use grove::prelude::*;
//!
//! // A standard match: one archon per team, neutral trees in between
//! let mut game = Game::new(GameConfig::seeded(42)).unwrap();
//!
//! // Run a few hundred rounds
//! game.run(200);
//!
//! let stats = game.stats();
//! println!("round {}, {} agents alive", stats.round, stats.agents_alive);
//! ```
//!
//! ## Driving a controller yourself
//!
//! Controllers only ever talk to an [`Environment`](core::environment::Environment).
//! Any host that implements it can run them:
//!
//! ```rust
//! use grove::prelude::*;
//!
//! let mut arena = Arena::new(ArenaConfig::default());
//! let id = arena.place(Team::Blue, Role::Gardener, Position::new(40.0, 30.0)).unwrap();
//!
//! let mut gardener = Gardener::seeded(7);
//! for _ in 0..3 {
//!     let mut view = arena.view(id).unwrap();
//!     gardener.step(&mut view);
//!     arena.end_round();
//! }
//! assert_eq!(gardener.state(), GardenerState::Building);
//! ```
//!
//! ## Architecture
//!
//! - [`grove_core`] - Geometry, shared types, the `Environment` contract, config, errors
//! - [`grove_agents`] - The controllers (archon, gardener, wanderer) and movement helper
//! - [`grove_runtime`] - Reference arena and round-robin match runner
//!
//! ## Gardener states
//!
//! | State | Does | Leaves when |
//! |-------|------|-------------|
//! | Starting | picks a heading | always, after one tick |
//! | Finding | walks, probes for a free site | site found, or woods detected |
//! | Building | plants, waters, produces units | never |
//! | OnlyDefenders | builds soldiers | no enemy archon in sight |
//! | Harvest | builds up to two lumberjacks | done or out of retries |

pub use grove_agents as agents;
pub use grove_core as core;
pub use grove_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use grove::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use grove_core::types::{
        AgentId, Role, SenseRange, SensedAgent, SensedNode, Team, Tick,
    };
    pub use grove_core::geometry::{GardenPattern, Heading, Position, GARDEN_SLOTS};

    // Contract, configuration and errors
    pub use grove_core::environment::Environment;
    pub use grove_core::config::{MoveConfig, StrategyConfig};
    pub use grove_core::error::{ActionFailure, GroveError, ProbeError, Result};

    // Controllers
    pub use grove_agents::archon::Archon;
    pub use grove_agents::base::{Controller, TickEnd};
    pub use grove_agents::gardener::{Gardener, GardenerState};
    pub use grove_agents::spawn::controller_for;
    pub use grove_agents::wanderer::Wanderer;

    // Runtime
    pub use grove_runtime::arena::{Arena, ArenaConfig};
    pub use grove_runtime::game::{EndReason, Game, GameConfig, GameEvent, GameStats, Outcome};
}
