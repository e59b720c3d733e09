//! # Grove Agents
//!
//! Per-role behavior controllers. Each controller gets one [`step`] per
//! granted tick, reads the world through an
//! [`Environment`](grove_core::environment::Environment) and attempts its
//! actions best-effort:
//!
//! - **Archon**: flees threats, hires gardeners by lottery, buys score
//! - **Gardener**: finds a free site, plants a hex garden, builds support units
//! - **Wanderer**: the support roles (scout, soldier, lumberjack, tank)
//!
//! [`step`]: base::Controller::step

pub mod archon;
pub mod base;
pub mod gardener;
pub mod movement;
pub mod prelude;
pub mod spawn;
pub mod wanderer;
