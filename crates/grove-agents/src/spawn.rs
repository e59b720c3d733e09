//! Spawn-time controller selection.
//!
//! The host decides an agent's role when it creates the agent; this
//! picks the matching controller. The role never changes afterwards.

use crate::archon::Archon;
use crate::base::Controller;
use crate::gardener::Gardener;
use crate::wanderer::Wanderer;
use grove_core::config::{MoveConfig, StrategyConfig};
use grove_core::types::Role;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Build the controller for a freshly spawned agent of `role`.
///
/// `seed` feeds the controller's private random source, so two matches
/// created with the same seeds make the same decisions.
pub fn controller_for(
    role: Role,
    strategy: &StrategyConfig,
    movement: &MoveConfig,
    seed: u64,
) -> Box<dyn Controller> {
    let rng = SmallRng::seed_from_u64(seed);
    match role {
        Role::Archon => Box::new(Archon::new(strategy.clone(), movement.clone(), rng)),
        Role::Gardener => Box::new(Gardener::new(strategy.clone(), movement.clone(), rng)),
        Role::Scout | Role::Soldier | Role::Lumberjack | Role::Tank => {
            Box::new(Wanderer::new(role, movement.clone(), rng))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_gets_a_matching_controller() {
        let strategy = StrategyConfig::default();
        let movement = MoveConfig::default();
        for (i, role) in Role::ALL.into_iter().enumerate() {
            let controller = controller_for(role, &strategy, &movement, i as u64);
            assert_eq!(controller.role(), role);
            assert_eq!(controller.age(), 0);
        }
    }

    #[test]
    fn gardener_status_reports_state() {
        let controller = controller_for(
            Role::Gardener,
            &StrategyConfig::default(),
            &MoveConfig::default(),
            5,
        );
        assert_eq!(controller.status(), "gardener/Starting");
    }
}
