//! Archon: the economic base unit.
//!
//! An archon keeps away from enemies and spends the team's currency. It
//! never coordinates with the other archons: hiring is a lottery whose odds
//! are split across however many archons are voting this round, so the
//! gardener population drifts toward its target without any locking.
//!
//! Per tick:
//! 1. Move directly away from the first sensed enemy, or wander randomly
//! 2. Donate everything if that alone reaches the winning score
//! 3. Keep a reserve for gardeners once at least one exists
//! 4. Hire a gardener with probability `(desired − current) / archons`
//! 5. With probability `donation_chance / archons`, buy score with a quarter of the balance

use crate::base::{random_heading, Controller, TickEnd};
use crate::movement::try_move;
use grove_core::config::{MoveConfig, StrategyConfig};
use grove_core::environment::Environment;
use grove_core::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Whether donating the whole balance right now reaches `score_to_win`.
///
/// A non-positive `score_cost` never wins.
pub fn can_win_outright(currency: f64, score_cost: f64, score: u32, score_to_win: u32) -> bool {
    if !(score_cost > 0.0) {
        return false;
    }
    currency / score_cost + score as f64 >= score_to_win as f64
}

/// Per-archon odds of hiring a gardener this tick.
///
/// Clamped to `[0, 1]`: zero at or above the desired count, one when the
/// shortfall covers every archon. `archons` of zero counts as one.
pub fn spawn_probability(desired: usize, current: usize, archons: usize) -> f64 {
    let needed = desired as f64 - current as f64;
    (needed / archons.max(1) as f64).clamp(0.0, 1.0)
}

/// The economic role controller.
pub struct Archon<R: Rng = SmallRng> {
    strategy: StrategyConfig,
    movement: MoveConfig,
    rng: R,
    age: Tick,
}

impl Archon<SmallRng> {
    /// An archon with default constants and a seeded generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            StrategyConfig::default(),
            MoveConfig::default(),
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> Archon<R> {
    pub fn new(strategy: StrategyConfig, movement: MoveConfig, rng: R) -> Self {
        Self {
            strategy,
            movement,
            rng,
            age: 0,
        }
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    /// Step away from the first enemy in scan order, or wander.
    fn evade(&mut self, env: &mut dyn Environment) {
        let enemies = env.sense_agents(SenseRange::Unbounded, Some(env.team().enemy()));
        let heading = match enemies.first() {
            Some(threat) => env.position().heading_to(&threat.position).opposite(),
            None => random_heading(&mut self.rng),
        };
        try_move(env, heading, &self.movement);
    }

    fn donate(env: &mut dyn Environment, amount: f64, reason: &str) {
        match env.donate(amount) {
            Ok(()) => debug!(amount, reason, "archon donated"),
            Err(failure) => trace!(amount, reason, %failure, "donation rejected"),
        }
    }
}

impl<R: Rng> Controller for Archon<R> {
    fn role(&self) -> Role {
        Role::Archon
    }

    fn step(&mut self, env: &mut dyn Environment) -> TickEnd {
        self.age += 1;
        let archons = env.unit_count(Role::Archon);

        self.evade(env);

        if can_win_outright(
            env.currency(),
            env.score_cost(),
            env.score(),
            self.strategy.score_to_win,
        ) {
            let balance = env.currency();
            Self::donate(env, balance, "win");
        }

        let gardeners = env.unit_count(Role::Gardener);
        if env.currency() <= self.strategy.reserve_floor && gardeners > 0 {
            return TickEnd::Finished;
        }

        let heading = random_heading(&mut self.rng);
        let odds = spawn_probability(self.strategy.desired_gardeners, gardeners, archons);
        if env.can_hire(heading) && self.rng.random::<f64>() < odds {
            match env.hire(heading) {
                Ok(()) => debug!(gardeners = gardeners + 1, "archon hired a gardener"),
                Err(failure) => trace!(%failure, "hire rejected at commit"),
            }
        }

        let invest_odds = self.strategy.donation_chance / archons.max(1) as f64;
        if self.rng.random::<f64>() < invest_odds {
            let quarter = env.currency() / 4.0;
            Self::donate(env, quarter, "invest");
        }

        TickEnd::Finished
    }

    fn age(&self) -> Tick {
        self.age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outright_win_uses_whole_balance() {
        assert!(can_win_outright(1000.0, 100.0, 9, 10));
        assert!(can_win_outright(100.0, 100.0, 9, 10));
        assert!(!can_win_outright(99.0, 100.0, 9, 10));
    }

    #[test]
    fn free_score_never_wins() {
        assert!(!can_win_outright(1000.0, 0.0, 0, 10));
        assert!(!can_win_outright(1000.0, -5.0, 0, 10));
    }

    #[test]
    fn spawn_probability_falls_to_zero() {
        let archons = 6;
        let odds: Vec<f64> = (0..=6).map(|current| spawn_probability(6, current, archons)).collect();
        for pair in odds.windows(2) {
            assert!(pair[1] < pair[0], "{:?} should strictly decrease", odds);
        }
        assert_eq!(spawn_probability(6, 6, archons), 0.0);
        assert_eq!(spawn_probability(6, 9, archons), 0.0);
    }

    #[test]
    fn spawn_probability_splits_across_archons() {
        assert_eq!(spawn_probability(4, 2, 4), 0.5);
        assert_eq!(spawn_probability(4, 2, 8), 0.25);
    }

    #[test]
    fn spawn_probability_never_exceeds_one() {
        assert_eq!(spawn_probability(6, 0, 1), 1.0);
        assert_eq!(spawn_probability(4, 2, 1), 1.0);
        assert_eq!(spawn_probability(4, 2, 0), 1.0);
        for current in 0..10 {
            let p = spawn_probability(6, current, 2);
            assert!((0.0..=1.0).contains(&p), "{p} out of range");
        }
    }
}
