//! # Grove Runtime
//!
//! Reference host for Grove controllers.
//!
//! The [`arena`] is a small in-memory world that implements the
//! `Environment` contract for whichever agent holds the tick; the
//! [`game`] runner owns the arena, attaches a controller to every body
//! and hands out ticks round-robin until one team wins.
//!
//! ```rust
//! use grove_runtime::prelude::*;
//!
//! let mut game = Game::new(GameConfig::seeded(7)).unwrap();
//! game.run(50);
//! assert_eq!(game.stats().round, 50);
//! ```

pub mod arena;
pub mod game;
pub mod prelude;
