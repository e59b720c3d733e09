//! Grove Agents Prelude.

pub use crate::archon::{can_win_outright, spawn_probability, Archon};
pub use crate::base::{random_heading, Controller, TickEnd};
pub use crate::gardener::{decide, BuiltFlags, Directive, Gardener, GardenerState, Survey};
pub use crate::movement::try_move;
pub use crate::spawn::controller_for;
pub use crate::wanderer::Wanderer;
