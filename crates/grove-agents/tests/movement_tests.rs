mod common;

use common::MockEnv;
use grove_agents::prelude::*;
use grove_core::prelude::*;

#[test]
fn blocked_heading_falls_back_left_first() {
    let mut env = MockEnv::open(Position::new(0.0, 0.0));
    env.blocked.push(Heading::EAST);
    assert!(try_move(&mut env, Heading::EAST, &MoveConfig::default()));

    let moves = env.moves();
    assert_eq!(moves.len(), 1);
    assert!((moves[0].degrees() - 20.0).abs() < 1e-9);
}

#[test]
fn fans_out_until_something_passes() {
    let mut env = MockEnv::open(Position::new(0.0, 0.0));
    for degrees in [0.0, 20.0, 340.0, 40.0] {
        env.blocked.push(Heading::from_degrees(degrees));
    }
    assert!(try_move(&mut env, Heading::EAST, &MoveConfig::default()));
    assert!((env.moves()[0].degrees() - 320.0).abs() < 1e-9);
}

#[test]
fn impassable_ground_moves_nowhere() {
    let mut env = MockEnv::open(Position::new(0.0, 0.0));
    env.passable = false;
    assert!(!try_move(&mut env, Heading::NORTH, &MoveConfig::default()));
    assert!(env.moves().is_empty());
}

#[test]
fn rejected_commit_reports_false_without_retrying() {
    let mut env = MockEnv::open(Position::new(0.0, 0.0));
    env.move_commit_fails = true;
    assert!(!try_move(&mut env, Heading::SOUTH, &MoveConfig::default()));
    assert_eq!(env.moves().len(), 1);
}
