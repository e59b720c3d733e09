//! Best-effort movement.
//!
//! Agents never fail on a bad move: the helper probes the requested
//! heading, then fans out to either side, and reports whether anything
//! was committed.

use grove_core::config::MoveConfig;
use grove_core::environment::Environment;
use grove_core::geometry::Heading;
use tracing::trace;

/// Move along `heading`, or the nearest passable perturbation of it.
///
/// Probes `heading`, then `heading ± k·offset` for `k = 1..=checks_per_side`
/// (left first). Commits the first heading whose check passes. A commit
/// that fails anyway is reported as `false`, never raised.
pub fn try_move(env: &mut dyn Environment, heading: Heading, config: &MoveConfig) -> bool {
    for candidate in candidates(heading, config) {
        if !env.can_move(candidate) {
            continue;
        }
        return match env.move_toward(candidate) {
            Ok(()) => true,
            Err(failure) => {
                trace!(heading = candidate.degrees(), %failure, "move rejected at commit");
                false
            }
        };
    }
    false
}

/// Headings probed by [`try_move`], in order.
pub fn candidates(heading: Heading, config: &MoveConfig) -> Vec<Heading> {
    let mut out = Vec::with_capacity(1 + 2 * config.checks_per_side as usize);
    out.push(heading);
    for k in 1..=config.checks_per_side {
        let offset = config.offset_degrees * k as f64;
        out.push(heading.rotate_degrees(offset));
        out.push(heading.rotate_degrees(-offset));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_fan_out_left_first() {
        let config = MoveConfig::default();
        let probes = candidates(Heading::EAST, &config);
        let degrees: Vec<f64> = probes.iter().map(|h| h.degrees().round()).collect();
        assert_eq!(degrees, vec![0.0, 20.0, 340.0, 40.0, 320.0, 60.0, 300.0]);
    }

    #[test]
    fn zero_checks_probes_only_the_heading() {
        let config = MoveConfig {
            offset_degrees: 20.0,
            checks_per_side: 0,
        };
        assert_eq!(candidates(Heading::NORTH, &config), vec![Heading::NORTH]);
    }
}
