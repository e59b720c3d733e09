//! Game: round-robin match runner.
//!
//! The game owns the arena and one controller per live body. Each round:
//! 1. Every agent alive at the start of the round gets one tick, in spawn order
//! 2. Units created during a tick get a controller and first act next round
//! 3. The arena settles income, tree decay and cooldowns
//! 4. Victory is checked: points, elimination, or the round limit

use crate::arena::{Arena, ArenaConfig, Ledger, Spawned, TREE_RADIUS};
use grove_agents::base::{Controller, TickEnd};
use grove_agents::spawn::controller_for;
use grove_core::config::{MoveConfig, StrategyConfig};
use grove_core::error::{ActionFailure, GroveError, Result};
use grove_core::geometry::Position;
use grove_core::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Attempts made to find a free spot for each neutral tree.
const TREE_PLACEMENT_ATTEMPTS: usize = 20;

/// Everything needed to set up a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seeds map generation and every controller's random source.
    pub seed: u64,
    /// Round limit; the match is decided on points when it is reached.
    pub max_rounds: u64,
    pub strategy: StrategyConfig,
    pub movement: MoveConfig,
    pub arena: ArenaConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_rounds: 3000,
            strategy: StrategyConfig::default(),
            movement: MoveConfig::default(),
            arena: ArenaConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        self.strategy.validate()?;
        self.arena.validate()?;
        if self.max_rounds == 0 {
            return Err(GroveError::invalid_config(
                "max_rounds",
                self.max_rounds,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Default rules with a different seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Why the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// A team reached the victory point target.
    Points,
    /// The other team has no units left.
    Elimination,
    /// The round limit was reached.
    RoundLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    /// `None` when the round limit is reached with both teams level.
    pub winner: Option<Team>,
    pub reason: EndReason,
    pub round: Tick,
}

/// Event emitted by the game during a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A controller was attached to a new body.
    Spawned {
        id: AgentId,
        team: Team,
        role: Role,
        parent: Option<AgentId>,
    },
    /// An agent was taken out of the match.
    Removed { id: AgentId },
    /// A controller's reported status changed during its tick.
    StatusChanged { id: AgentId, from: String, to: String },
    /// A round completed.
    RoundComplete { round: Tick, alive: usize, yielded: usize },
    /// The match was decided.
    Ended(Outcome),
}

/// Match statistics.
#[derive(Debug, Clone, Serialize)]
pub struct GameStats {
    pub round: Tick,
    pub agents_alive: usize,
    pub total_spawned: usize,
    pub total_removed: usize,
    /// Ticks that ended with a multi-tick job still in flight.
    pub total_yields: u64,
    pub units: BTreeMap<Team, BTreeMap<Role, usize>>,
    pub trees: BTreeMap<Team, usize>,
    pub ledgers: BTreeMap<Team, Ledger>,
    pub outcome: Option<Outcome>,
}

/// A controller bound to the body it drives.
struct Seat {
    id: AgentId,
    controller: Box<dyn Controller>,
}

/// The match runner.
pub struct Game {
    config: GameConfig,
    arena: Arena,
    seats: Vec<Seat>,
    rng: SmallRng,
    event_history: Vec<(Tick, GameEvent)>,
    fielded: Vec<Team>,
    total_spawned: usize,
    total_removed: usize,
    total_yields: u64,
    outcome: Option<Outcome>,
}

impl Game {
    /// An empty match: no bodies and no trees. Use [`spawn`](Self::spawn)
    /// to populate it.
    pub fn blank(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            arena: Arena::new(config.arena.clone()),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            seats: Vec::new(),
            event_history: Vec::new(),
            fielded: Vec::new(),
            total_spawned: 0,
            total_removed: 0,
            total_yields: 0,
            outcome: None,
        })
    }

    /// A standard match: archons facing each other across the map and
    /// neutral trees scattered in between.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut game = Self::blank(config)?;
        game.place_archons()?;
        game.scatter_trees();
        info!(
            seed = game.config.seed,
            archons = game.seats.len(),
            trees = game.arena.trees().len(),
            "match set up"
        );
        Ok(game)
    }

    fn place_archons(&mut self) -> Result<()> {
        let per_team = self.config.arena.archons_per_team;
        let (width, height) = (self.config.arena.width, self.config.arena.height);
        for i in 0..per_team {
            let y = height * (i + 1) as f64 / (per_team + 1) as f64;
            for (team, x) in [(Team::Blue, width * 0.2), (Team::Red, width * 0.8)] {
                self.spawn(team, Role::Archon, Position::new(x, y))
                    .map_err(|failure| {
                        GroveError::invalid_config(
                            "archons_per_team",
                            per_team,
                            format!("no room for archon {i} of {team}: {failure}"),
                        )
                    })?;
            }
        }
        Ok(())
    }

    fn scatter_trees(&mut self) {
        let (width, height) = (self.config.arena.width, self.config.arena.height);
        if width <= 2.0 * TREE_RADIUS || height <= 2.0 * TREE_RADIUS {
            return;
        }
        let health = self.config.arena.tree_max_health;
        for _ in 0..self.config.arena.neutral_trees {
            for _ in 0..TREE_PLACEMENT_ATTEMPTS {
                let spot = Position::new(
                    self.rng.random_range(TREE_RADIUS..width - TREE_RADIUS),
                    self.rng.random_range(TREE_RADIUS..height - TREE_RADIUS),
                );
                if self.arena.place_tree(Team::Neutral, spot, health).is_ok() {
                    break;
                }
            }
        }
    }

    /// Place a body and attach the controller for its role.
    pub fn spawn(
        &mut self,
        team: Team,
        role: Role,
        position: Position,
    ) -> Result<AgentId, ActionFailure> {
        let id = self.arena.place(team, role, position)?;
        self.seat(id, team, role, None);
        Ok(id)
    }

    fn seat(&mut self, id: AgentId, team: Team, role: Role, parent: Option<AgentId>) {
        let seed = self.rng.random::<u64>();
        let controller = controller_for(role, &self.config.strategy, &self.config.movement, seed);
        self.seats.push(Seat { id, controller });
        if !self.fielded.contains(&team) {
            self.fielded.push(team);
        }
        self.total_spawned += 1;
        info!(%id, %team, %role, "agent spawned");
        self.record(GameEvent::Spawned {
            id,
            team,
            role,
            parent,
        });
    }

    /// Take an agent out of the match. Takes effect before the next round.
    pub fn remove(&mut self, id: AgentId) -> Result<()> {
        let idx = self
            .seats
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| GroveError::UnknownAgent(id.to_string()))?;
        self.seats.remove(idx);
        self.arena.remove(id);
        self.total_removed += 1;
        info!(%id, "agent removed");
        self.record(GameEvent::Removed { id });
        Ok(())
    }

    /// Run one round. Does nothing once the match is decided.
    pub fn round(&mut self) -> Vec<GameEvent> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        let start = self.event_history.len();
        let acting = self.seats.len();
        let mut yielded = 0;

        for idx in 0..acting {
            let (id, end, before, after) = {
                let seat = &mut self.seats[idx];
                let Ok(mut view) = self.arena.view(seat.id) else {
                    continue;
                };
                let before = seat.controller.status();
                let end = seat.controller.step(&mut view);
                (seat.id, end, before, seat.controller.status())
            };
            if end == TickEnd::Yielded {
                yielded += 1;
            }
            if before != after {
                debug!(%id, from = %before, to = %after, "status changed");
                self.record(GameEvent::StatusChanged {
                    id,
                    from: before,
                    to: after,
                });
            }
            for Spawned {
                id: child,
                parent,
                team,
                role,
            } in self.arena.drain_spawned()
            {
                self.seat(child, team, role, Some(parent));
            }
        }

        self.arena.end_round();
        self.total_yields += yielded as u64;
        let round = self.arena.round();
        self.record(GameEvent::RoundComplete {
            round,
            alive: self.seats.len(),
            yielded,
        });

        if let Some(outcome) = self.decide_outcome() {
            match outcome.winner {
                Some(team) => info!(%team, reason = ?outcome.reason, round, "match over"),
                None => info!(reason = ?outcome.reason, round, "match drawn"),
            }
            self.outcome = Some(outcome);
            self.record(GameEvent::Ended(outcome));
        }

        self.event_history[start..]
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Run up to `rounds` rounds, stopping early once the match is decided.
    /// Returns the number of rounds actually played.
    pub fn run(&mut self, rounds: u64) -> u64 {
        let mut played = 0;
        while played < rounds && self.outcome.is_none() {
            self.round();
            played += 1;
        }
        played
    }

    /// Run until the match is decided.
    pub fn run_to_end(&mut self) -> Outcome {
        loop {
            self.round();
            if let Some(outcome) = self.outcome {
                return outcome;
            }
        }
    }

    fn decide_outcome(&self) -> Option<Outcome> {
        let round = self.arena.round();
        let blue = self.arena.ledger(Team::Blue);
        let red = self.arena.ledger(Team::Red);
        let target = self.config.arena.victory_points;

        if blue.score >= target || red.score >= target {
            return Some(Outcome {
                winner: Some(if red.score > blue.score { Team::Red } else { Team::Blue }),
                reason: EndReason::Points,
                round,
            });
        }

        let standing: Vec<Team> = self
            .fielded
            .iter()
            .copied()
            .filter(|team| self.arena.bodies().iter().any(|b| b.team == *team))
            .collect();
        if self.fielded.len() > 1 && standing.len() < self.fielded.len() {
            return Some(Outcome {
                winner: (standing.len() == 1).then(|| standing[0]),
                reason: EndReason::Elimination,
                round,
            });
        }

        if round >= self.config.max_rounds {
            let winner = if blue.score != red.score {
                Some(if blue.score > red.score { Team::Blue } else { Team::Red })
            } else if blue.bullets != red.bullets {
                Some(if blue.bullets > red.bullets { Team::Blue } else { Team::Red })
            } else {
                None
            };
            return Some(Outcome {
                winner,
                reason: EndReason::RoundLimit,
                round,
            });
        }
        None
    }

    fn record(&mut self, event: GameEvent) {
        self.event_history.push((self.arena.round(), event));
    }

    pub fn stats(&self) -> GameStats {
        let mut units: BTreeMap<Team, BTreeMap<Role, usize>> = BTreeMap::new();
        for body in self.arena.bodies() {
            *units.entry(body.team).or_default().entry(body.role).or_default() += 1;
        }
        let mut trees: BTreeMap<Team, usize> = BTreeMap::new();
        for tree in self.arena.trees() {
            *trees.entry(tree.team).or_default() += 1;
        }
        GameStats {
            round: self.arena.round(),
            agents_alive: self.seats.len(),
            total_spawned: self.total_spawned,
            total_removed: self.total_removed,
            total_yields: self.total_yields,
            units,
            trees,
            ledgers: self.arena.ledgers().clone(),
            outcome: self.outcome,
        }
    }

    /// Statistics as pretty-printed JSON.
    pub fn stats_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stats())?)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Direct access to the world, for scripted setups between rounds.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Number of agents with a controller.
    pub fn alive_count(&self) -> usize {
        self.seats.len()
    }

    /// The controller driving `id`.
    pub fn controller(&self, id: AgentId) -> Option<&dyn Controller> {
        self.seats
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.controller.as_ref())
    }

    /// Agent ids in tick order.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.seats.iter().map(|s| s.id).collect()
    }

    /// Full event history with the round each event was recorded in.
    pub fn event_history(&self) -> &[(Tick, GameEvent)] {
        &self.event_history
    }
}
