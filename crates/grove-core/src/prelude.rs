//! Grove Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use grove_core::prelude::*;
//! ```

pub use crate::types::{AgentId, Role, SenseRange, SensedAgent, SensedNode, Team, Tick};

pub use crate::geometry::{GardenPattern, Heading, Position, GARDEN_SLOTS};

pub use crate::config::{MoveConfig, StrategyConfig};

pub use crate::environment::Environment;

pub use crate::error::{ActionFailure, GroveError, ProbeError, Result};
