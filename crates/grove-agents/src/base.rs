//! The controller contract and helpers shared by every role.

use grove_core::environment::Environment;
use grove_core::geometry::Heading;
use grove_core::types::*;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

/// How a step handed its tick back to the host.
///
/// Either way the tick is over. `Yielded` means the controller stopped in
/// the middle of a multi-tick job and will resume it on its next step;
/// `Finished` means the step ran to completion and the next one starts fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickEnd {
    Finished,
    Yielded,
}

/// A per-agent behavior controller.
///
/// The host calls [`step`](Controller::step) once per granted tick. The
/// controller owns its persistent state; everything else it learns from
/// the environment, fresh, every tick.
pub trait Controller {
    /// The role this controller drives. Fixed for its lifetime.
    fn role(&self) -> Role;

    /// Run one tick.
    fn step(&mut self, env: &mut dyn Environment) -> TickEnd;

    /// How many ticks this controller has been stepped.
    fn age(&self) -> Tick;

    /// Short human-readable description of the current state (for logging).
    fn status(&self) -> String {
        self.role().name().to_string()
    }
}

/// A uniformly random heading.
pub fn random_heading<R: Rng>(rng: &mut R) -> Heading {
    Heading::from_radians(rng.random_range(0.0..TAU))
}

/// Enemy agents of `role` anywhere in the arena.
///
/// Threat checks always use unbounded sensing; only spatial planning is
/// limited to a radius.
pub fn enemy_sensed(env: &dyn Environment, role: Role) -> bool {
    env.sense_agents(SenseRange::Unbounded, Some(env.team().enemy()))
        .iter()
        .any(|agent| agent.role == role)
}

/// Whether any own-team archon or gardener is within `radius`.
pub fn site_crowded(env: &dyn Environment, radius: f64) -> bool {
    let team = env.team();
    env.sense_agents(SenseRange::Within(radius), Some(team))
        .iter()
        .any(|agent| agent.team == team && agent.role.crowds_sites())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_headings_are_seed_reproducible() {
        let mut a = SmallRng::seed_from_u64(11);
        let mut b = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            assert_eq!(random_heading(&mut a), random_heading(&mut b));
        }
    }

    #[test]
    fn random_headings_cover_the_circle() {
        let mut rng = SmallRng::seed_from_u64(3);
        let headings: Vec<f64> = (0..500).map(|_| random_heading(&mut rng).degrees()).collect();
        assert!(headings.iter().all(|d| (0.0..360.0).contains(d)));
        assert!(headings.iter().any(|d| *d < 90.0));
        assert!(headings.iter().any(|d| *d > 270.0));
    }
}
