//! Wanderer: placeholder behavior for the support roles.
//!
//! Scouts, soldiers, lumberjacks and tanks are production targets only;
//! their combat and chopping behavior lives outside this crate. Until a
//! host plugs in something better they drift: keep a heading, and pick a
//! new one whenever the current one is blocked.

use crate::base::{random_heading, Controller, TickEnd};
use crate::movement::try_move;
use grove_core::config::MoveConfig;
use grove_core::environment::Environment;
use grove_core::geometry::Heading;
use grove_core::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct Wanderer<R: Rng = SmallRng> {
    role: Role,
    movement: MoveConfig,
    rng: R,
    heading: Heading,
    age: Tick,
}

impl Wanderer<SmallRng> {
    pub fn seeded(role: Role, seed: u64) -> Self {
        Self::new(role, MoveConfig::default(), SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Wanderer<R> {
    pub fn new(role: Role, movement: MoveConfig, mut rng: R) -> Self {
        let heading = random_heading(&mut rng);
        Self {
            role,
            movement,
            rng,
            heading,
            age: 0,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }
}

impl<R: Rng> Controller for Wanderer<R> {
    fn role(&self) -> Role {
        self.role
    }

    fn step(&mut self, env: &mut dyn Environment) -> TickEnd {
        self.age += 1;
        if !try_move(env, self.heading, &self.movement) {
            self.heading = random_heading(&mut self.rng);
        }
        TickEnd::Finished
    }

    fn age(&self) -> Tick {
        self.age
    }
}
