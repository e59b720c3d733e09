//! # Grove Core
//!
//! Core types and the environment contract shared by every Grove crate.
//!
//! An agent in Grove is driven by a controller that gets one tick per
//! simulation round. Everything the controller knows about the world it
//! reads through an [`Environment`](environment::Environment) handle, and
//! everything it does is a check/commit pair on that same handle:
//!
//! - **Sensing**: own position, nearby agents, nearby resource nodes
//! - **Acting**: move, hire, plant, water, build, donate
//! - **Economy**: team currency and score, read fresh at every decision
//!
//! Commits may fail after a successful check (the world moved on between
//! the two calls). Those failures are [`ActionFailure`](error::ActionFailure)
//! values, never panics.
//!
//! ## Quick Start
//!
//! ```rust
//! use grove_core::prelude::*;
//!
//! let pattern = GardenPattern::new(Heading::WEST);
//! let centre = Position::new(10.0, 10.0);
//!
//! // The five plant slots sit 60° apart starting at the entrance heading.
//! assert_eq!(pattern.slot_headings().len(), 5);
//! let first = pattern.slot_position(centre, 0, 1.5);
//! assert!((first.x - 8.5).abs() < 1e-9);
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod types;
