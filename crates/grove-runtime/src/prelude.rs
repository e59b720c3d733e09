//! Grove Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use grove_runtime::prelude::*;
//! ```

pub use crate::arena::{AgentView, Arena, ArenaConfig, Body, Ledger, Spawned, Tree};
pub use crate::game::{EndReason, Game, GameConfig, GameEvent, GameStats, Outcome};

pub use grove_agents::prelude::*;
