//! Arena: the in-memory reference world.
//!
//! Everything in the arena is a disc on a rectangle: agents and trees may
//! not overlap each other and may not cross the map edge. Each team keeps
//! one ledger of bullets (currency) and victory points. There is no combat;
//! the arena exists so controllers can be exercised end to end.
//!
//! A controller never touches the arena directly. The runner borrows an
//! [`AgentView`] for the agent holding the tick, and that view is the
//! [`Environment`] the controller sees.

use grove_core::environment::Environment;
use grove_core::error::{ActionFailure, GroveError, ProbeError, Result};
use grove_core::geometry::{Heading, Position};
use grove_core::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Radius of every tree, neutral or planted.
pub const TREE_RADIUS: f64 = 1.0;

/// Clearance left between a parent and whatever it creates.
const SPAWN_GAP: f64 = 0.01;

type Check<T> = Result<T, ActionFailure>;

/// Rules and economy of the reference arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    /// How far any body can see. Unbounded queries reach this far.
    pub sensor_range: f64,
    /// Bullets each team starts with.
    pub starting_bullets: f64,
    /// Flat bullets paid to each team at the end of every round.
    pub income_per_round: f64,
    /// Extra bullets per round for a fully grown own tree (scaled by health).
    pub tree_income: f64,
    /// Victory points that end the match.
    pub victory_points: u32,
    /// Price of one victory point in round 0.
    pub score_cost_base: f64,
    /// Added to the victory point price every round.
    pub score_cost_growth: f64,
    /// Rounds a builder waits after producing a unit.
    pub build_cooldown: u32,
    pub tree_cost: f64,
    pub tree_initial_health: f64,
    pub tree_max_health: f64,
    /// Health an own-team tree loses per round.
    pub tree_decay: f64,
    /// Health restored by one watering.
    pub water_amount: f64,
    /// Neutral trees scattered at match start.
    pub neutral_trees: usize,
    pub archons_per_team: usize,
    pub gardener_cost: f64,
    pub scout_cost: f64,
    pub soldier_cost: f64,
    pub lumberjack_cost: f64,
    pub tank_cost: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 60.0,
            sensor_range: 20.0,
            starting_bullets: 300.0,
            income_per_round: 2.0,
            tree_income: 0.25,
            victory_points: 1000,
            score_cost_base: 7.5,
            score_cost_growth: 12.5 / 3000.0,
            build_cooldown: 10,
            tree_cost: 50.0,
            tree_initial_health: 10.0,
            tree_max_health: 50.0,
            tree_decay: 0.5,
            water_amount: 10.0,
            neutral_trees: 12,
            archons_per_team: 1,
            gardener_cost: 100.0,
            scout_cost: 80.0,
            soldier_cost: 100.0,
            lumberjack_cost: 100.0,
            tank_cost: 300.0,
        }
    }
}

impl ArenaConfig {
    /// Bullet price of a unit. Archons cannot be produced.
    pub fn cost(&self, role: Role) -> Option<f64> {
        match role {
            Role::Archon => None,
            Role::Gardener => Some(self.gardener_cost),
            Role::Scout => Some(self.scout_cost),
            Role::Soldier => Some(self.soldier_cost),
            Role::Lumberjack => Some(self.lumberjack_cost),
            Role::Tank => Some(self.tank_cost),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let extents = [
            ("width", self.width),
            ("height", self.height),
            ("sensor_range", self.sensor_range),
        ];
        for (field, value) in extents {
            if !(value.is_finite() && value > 0.0) {
                return Err(GroveError::invalid_config(field, value, "must be positive"));
            }
        }
        if !(self.score_cost_base > 0.0) {
            return Err(GroveError::invalid_config(
                "score_cost_base",
                self.score_cost_base,
                "must be positive",
            ));
        }
        if self.score_cost_growth < 0.0 {
            return Err(GroveError::invalid_config(
                "score_cost_growth",
                self.score_cost_growth,
                "must not be negative",
            ));
        }
        if !(self.tree_max_health > 0.0) || self.tree_initial_health > self.tree_max_health {
            return Err(GroveError::invalid_config(
                "tree_initial_health",
                self.tree_initial_health,
                "must be positive and at most tree_max_health",
            ));
        }
        let costs = [
            ("tree_cost", self.tree_cost),
            ("gardener_cost", self.gardener_cost),
            ("scout_cost", self.scout_cost),
            ("soldier_cost", self.soldier_cost),
            ("lumberjack_cost", self.lumberjack_cost),
            ("tank_cost", self.tank_cost),
        ];
        for (field, value) in costs {
            if value < 0.0 {
                return Err(GroveError::invalid_config(field, value, "must not be negative"));
            }
        }
        Ok(())
    }
}

/// Radius of an agent's disc.
pub fn body_radius(role: Role) -> f64 {
    match role {
        Role::Archon | Role::Tank => 2.0,
        _ => 1.0,
    }
}

/// Distance an agent covers in one move.
pub fn stride(role: Role) -> f64 {
    match role {
        Role::Scout => 2.5,
        Role::Soldier => 2.0,
        Role::Lumberjack => 1.5,
        Role::Archon | Role::Gardener | Role::Tank => 1.0,
    }
}

/// An agent's physical presence in the arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub id: AgentId,
    pub team: Team,
    pub role: Role,
    pub position: Position,
    /// Rounds until this body may build again.
    pub cooldown: u32,
    #[serde(skip)]
    moved: bool,
    #[serde(skip)]
    watered: bool,
}

impl Body {
    pub fn radius(&self) -> f64 {
        body_radius(self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree {
    pub position: Position,
    pub team: Team,
    pub health: f64,
}

/// One team's shared balance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Ledger {
    pub bullets: f64,
    pub score: u32,
}

/// A unit created during a tick, waiting for the runner to attach a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawned {
    pub id: AgentId,
    pub parent: AgentId,
    pub team: Team,
    pub role: Role,
}

/// The reference world.
pub struct Arena {
    config: ArenaConfig,
    bodies: Vec<Body>,
    trees: Vec<Tree>,
    ledgers: BTreeMap<Team, Ledger>,
    round: Tick,
    next_id: u64,
    spawned: Vec<Spawned>,
}

impl Arena {
    /// An empty arena: no bodies, no trees, starting balances for both teams.
    pub fn new(config: ArenaConfig) -> Self {
        let start = Ledger {
            bullets: config.starting_bullets,
            score: 0,
        };
        let ledgers = [(Team::Blue, start), (Team::Red, start)].into_iter().collect();
        Self {
            config,
            bodies: Vec::new(),
            trees: Vec::new(),
            ledgers,
            round: 0,
            next_id: 1,
            spawned: Vec::new(),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn round(&self) -> Tick {
        self.round
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: AgentId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn ledger(&self, team: Team) -> Ledger {
        self.ledgers.get(&team).copied().unwrap_or_default()
    }

    pub fn ledger_mut(&mut self, team: Team) -> &mut Ledger {
        self.ledgers.entry(team).or_default()
    }

    pub fn ledgers(&self) -> &BTreeMap<Team, Ledger> {
        &self.ledgers
    }

    /// Current price of one victory point.
    pub fn score_cost(&self) -> f64 {
        self.config.score_cost_base + self.config.score_cost_growth * self.round as f64
    }

    /// Live units of `role` on `team`.
    pub fn units(&self, team: Team, role: Role) -> usize {
        self.bodies
            .iter()
            .filter(|b| b.team == team && b.role == role)
            .count()
    }

    /// Whether a disc of `margin` around `position` lies inside the map.
    pub fn contains(&self, position: Position, margin: f64) -> bool {
        position.x - margin >= 0.0
            && position.y - margin >= 0.0
            && position.x + margin <= self.config.width
            && position.y + margin <= self.config.height
    }

    /// Check that a disc could be placed without leaving the map or
    /// overlapping anything except `ignore`.
    pub fn fits(
        &self,
        position: Position,
        radius: f64,
        ignore: Option<AgentId>,
    ) -> Check<()> {
        if !self.contains(position, radius) {
            return Err(ActionFailure::OutOfBounds);
        }
        let body_hit = self
            .bodies
            .iter()
            .filter(|b| Some(b.id) != ignore)
            .any(|b| b.position.distance_to(&position) < b.radius() + radius);
        let tree_hit = self
            .trees
            .iter()
            .any(|t| t.position.distance_to(&position) < TREE_RADIUS + radius);
        if body_hit || tree_hit {
            return Err(ActionFailure::Blocked);
        }
        Ok(())
    }

    /// Place a new body directly (map setup and tests). Nothing is charged.
    pub fn place(
        &mut self,
        team: Team,
        role: Role,
        position: Position,
    ) -> Check<AgentId> {
        self.fits(position, body_radius(role), None)?;
        Ok(self.insert_body(team, role, position))
    }

    /// Place a tree directly (map setup and tests). Nothing is charged.
    pub fn place_tree(
        &mut self,
        team: Team,
        position: Position,
        health: f64,
    ) -> Check<()> {
        self.fits(position, TREE_RADIUS, None)?;
        self.trees.push(Tree {
            position,
            team,
            health,
        });
        Ok(())
    }

    /// Take a body out of the arena.
    pub fn remove(&mut self, id: AgentId) -> Option<Body> {
        let idx = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(idx))
    }

    /// Borrow the environment for `id`'s tick.
    ///
    /// Starting a tick resets the body's per-tick move and water allowance.
    pub fn view(&mut self, id: AgentId) -> Check<AgentView<'_>> {
        let index = self
            .bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(ActionFailure::Gone)?;
        let body = &mut self.bodies[index];
        body.moved = false;
        body.watered = false;
        Ok(AgentView { arena: self, index })
    }

    /// Units created since the last drain, in creation order.
    pub fn drain_spawned(&mut self) -> Vec<Spawned> {
        std::mem::take(&mut self.spawned)
    }

    /// Settle the round: pay income, decay planted trees, tick cooldowns.
    pub fn end_round(&mut self) {
        let max_health = self.config.tree_max_health;
        for team in [Team::Blue, Team::Red] {
            let grown: f64 = self
                .trees
                .iter()
                .filter(|t| t.team == team)
                .map(|t| t.health / max_health)
                .sum();
            let income = self.config.income_per_round + self.config.tree_income * grown;
            self.ledger_mut(team).bullets += income;
        }

        let decay = self.config.tree_decay;
        for tree in self.trees.iter_mut().filter(|t| t.team != Team::Neutral) {
            tree.health -= decay;
        }
        self.trees.retain(|t| t.health > 0.0);

        for body in &mut self.bodies {
            body.cooldown = body.cooldown.saturating_sub(1);
        }
        self.round += 1;
    }

    fn insert_body(&mut self, team: Team, role: Role, position: Position) -> AgentId {
        let id = AgentId::from_seed(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            team,
            role,
            position,
            cooldown: 0,
            moved: false,
            watered: false,
        });
        id
    }
}

/// The arena as seen by the agent holding the tick.
pub struct AgentView<'a> {
    arena: &'a mut Arena,
    index: usize,
}

impl<'a> AgentView<'a> {
    pub fn id(&self) -> AgentId {
        self.body().id
    }

    fn body(&self) -> &Body {
        &self.arena.bodies[self.index]
    }

    fn senses(&self, range: SenseRange, distance: f64) -> bool {
        distance <= self.arena.config.sensor_range && range.reaches(distance)
    }

    fn require_role(&self, role: Role) -> Check<()> {
        let actual = self.body().role;
        if actual == role {
            Ok(())
        } else {
            Err(ActionFailure::WrongRole(actual))
        }
    }

    fn afford(&self, cost: f64) -> Check<()> {
        let available = self.arena.ledger(self.body().team).bullets;
        if available < cost {
            return Err(ActionFailure::InsufficientFunds {
                needed: cost,
                available,
            });
        }
        Ok(())
    }

    fn move_check(&self, heading: Heading) -> Check<Position> {
        let body = self.body();
        if body.moved {
            return Err(ActionFailure::Cooldown);
        }
        let target = body.position.offset(heading, stride(body.role));
        self.arena.fits(target, body.radius(), Some(body.id))?;
        Ok(target)
    }

    /// Where a unit of `role` built along `heading` would appear.
    fn spawn_check(&self, role: Role, heading: Heading) -> Check<(Position, f64)> {
        let body = self.body();
        if body.cooldown > 0 {
            return Err(ActionFailure::Cooldown);
        }
        let cost = self
            .arena
            .config
            .cost(role)
            .ok_or(ActionFailure::WrongRole(role))?;
        self.afford(cost)?;
        let radius = body_radius(role);
        let spot = body.position.offset(heading, body.radius() + radius + SPAWN_GAP);
        self.arena.fits(spot, radius, None)?;
        Ok((spot, cost))
    }

    fn plant_check(&self, heading: Heading) -> Check<Position> {
        self.require_role(Role::Gardener)?;
        self.afford(self.arena.config.tree_cost)?;
        let body = self.body();
        let spot = body
            .position
            .offset(heading, body.radius() + TREE_RADIUS + SPAWN_GAP);
        self.arena.fits(spot, TREE_RADIUS, None)?;
        Ok(spot)
    }

    fn water_check(&self, position: Position) -> Check<usize> {
        self.require_role(Role::Gardener)?;
        let body = self.body();
        if body.watered {
            return Err(ActionFailure::Cooldown);
        }
        let reach = body.radius() + TREE_RADIUS + stride(body.role);
        self.arena
            .trees
            .iter()
            .position(|t| {
                t.position.distance_to(&position) <= TREE_RADIUS
                    && t.position.distance_to(&body.position) <= reach
            })
            .ok_or(ActionFailure::NoTarget)
    }

    fn production_check(&self, role: Role, heading: Heading) -> Check<(Position, f64)> {
        self.require_role(Role::Gardener)?;
        if !role.is_support() {
            return Err(ActionFailure::WrongRole(role));
        }
        self.spawn_check(role, heading)
    }

    fn produce(&mut self, role: Role, spot: Position, cost: f64) {
        let (parent, team) = {
            let body = self.body();
            (body.id, body.team)
        };
        let cooldown = self.arena.config.build_cooldown;
        self.arena.ledger_mut(team).bullets -= cost;
        self.arena.bodies[self.index].cooldown = cooldown;
        let id = self.arena.insert_body(team, role, spot);
        self.arena.spawned.push(Spawned {
            id,
            parent,
            team,
            role,
        });
        trace!(%parent, child = %id, %role, "unit produced");
    }
}

impl Environment for AgentView<'_> {
    fn position(&self) -> Position {
        self.body().position
    }

    fn team(&self) -> Team {
        self.body().team
    }

    fn sense_agents(&self, range: SenseRange, team: Option<Team>) -> Vec<SensedAgent> {
        let me = self.body();
        self.arena
            .bodies
            .iter()
            .filter(|b| b.id != me.id)
            .filter(|b| team.map_or(true, |t| b.team == t))
            .filter(|b| self.senses(range, b.position.distance_to(&me.position)))
            .map(|b| SensedAgent {
                id: b.id,
                position: b.position,
                team: b.team,
                role: b.role,
            })
            .collect()
    }

    fn sense_nodes(&self, range: SenseRange) -> Vec<SensedNode> {
        let here = self.body().position;
        self.arena
            .trees
            .iter()
            .filter(|t| self.senses(range, t.position.distance_to(&here)))
            .map(|t| SensedNode {
                position: t.position,
                team: t.team,
            })
            .collect()
    }

    fn on_map(&self, position: Position, margin: f64) -> Result<bool, ProbeError> {
        if !(margin.is_finite() && margin > 0.0) {
            return Err(ProbeError::DegenerateRadius(margin));
        }
        Ok(self.arena.contains(position, margin))
    }

    fn unit_count(&self, role: Role) -> usize {
        self.arena.units(self.body().team, role)
    }

    fn can_move(&self, heading: Heading) -> bool {
        self.move_check(heading).is_ok()
    }

    fn move_toward(&mut self, heading: Heading) -> Check<()> {
        let target = self.move_check(heading)?;
        let body = &mut self.arena.bodies[self.index];
        body.position = target;
        body.moved = true;
        Ok(())
    }

    fn is_build_ready(&self) -> bool {
        self.body().cooldown == 0
    }

    fn can_hire(&self, heading: Heading) -> bool {
        self.require_role(Role::Archon).is_ok() && self.spawn_check(Role::Gardener, heading).is_ok()
    }

    fn hire(&mut self, heading: Heading) -> Check<()> {
        self.require_role(Role::Archon)?;
        let (spot, cost) = self.spawn_check(Role::Gardener, heading)?;
        self.produce(Role::Gardener, spot, cost);
        Ok(())
    }

    fn can_plant(&self, heading: Heading) -> bool {
        self.plant_check(heading).is_ok()
    }

    fn plant(&mut self, heading: Heading) -> Check<()> {
        let spot = self.plant_check(heading)?;
        let team = self.body().team;
        let health = self.arena.config.tree_initial_health;
        let cost = self.arena.config.tree_cost;
        self.arena.ledger_mut(team).bullets -= cost;
        self.arena.trees.push(Tree {
            position: spot,
            team,
            health,
        });
        Ok(())
    }

    fn can_water(&self, position: Position) -> bool {
        self.water_check(position).is_ok()
    }

    fn water(&mut self, position: Position) -> Check<()> {
        let idx = self.water_check(position)?;
        let max = self.arena.config.tree_max_health;
        let amount = self.arena.config.water_amount;
        let tree = &mut self.arena.trees[idx];
        tree.health = (tree.health + amount).min(max);
        self.arena.bodies[self.index].watered = true;
        Ok(())
    }

    fn can_build(&self, role: Role, heading: Heading) -> bool {
        self.production_check(role, heading).is_ok()
    }

    fn build(&mut self, role: Role, heading: Heading) -> Check<()> {
        let (spot, cost) = self.production_check(role, heading)?;
        self.produce(role, spot, cost);
        Ok(())
    }

    fn currency(&self) -> f64 {
        self.arena.ledger(self.body().team).bullets
    }

    fn score(&self) -> u32 {
        self.arena.ledger(self.body().team).score
    }

    fn score_cost(&self) -> f64 {
        self.arena.score_cost()
    }

    fn donate(&mut self, amount: f64) -> Check<()> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ActionFailure::InvalidAmount(amount));
        }
        self.afford(amount)?;
        let cost = self.arena.score_cost();
        let team = self.body().team;
        let ledger = self.arena.ledger_mut(team);
        ledger.bullets -= amount;
        ledger.score += (amount / cost).floor() as u32;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_arena() -> Arena {
        Arena::new(ArenaConfig {
            width: 40.0,
            height: 40.0,
            ..ArenaConfig::default()
        })
    }

    #[test]
    fn placement_rejects_overlap_and_edges() {
        let mut arena = small_arena();
        arena
            .place(Team::Blue, Role::Archon, Position::new(10.0, 10.0))
            .unwrap();
        assert_eq!(
            arena.place(Team::Red, Role::Scout, Position::new(12.5, 10.0)),
            Err(ActionFailure::Blocked)
        );
        assert_eq!(
            arena.place(Team::Red, Role::Scout, Position::new(0.5, 10.0)),
            Err(ActionFailure::OutOfBounds)
        );
        assert!(arena
            .place(Team::Red, Role::Scout, Position::new(13.5, 10.0))
            .is_ok());
    }

    #[test]
    fn probe_rejects_degenerate_margins() {
        let mut arena = small_arena();
        let id = arena
            .place(Team::Blue, Role::Gardener, Position::new(20.0, 20.0))
            .unwrap();
        let view = arena.view(id).unwrap();
        let here = view.position();
        assert_eq!(view.on_map(here, 3.0), Ok(true));
        assert_eq!(view.on_map(Position::new(1.0, 20.0), 3.0), Ok(false));
        assert_eq!(view.on_map(here, 0.0), Err(ProbeError::DegenerateRadius(0.0)));
        assert!(view.on_map(here, f64::NAN).is_err());
    }

    #[test]
    fn one_move_per_tick() {
        let mut arena = small_arena();
        let id = arena
            .place(Team::Blue, Role::Scout, Position::new(20.0, 20.0))
            .unwrap();
        {
            let mut view = arena.view(id).unwrap();
            assert!(view.can_move(Heading::EAST));
            view.move_toward(Heading::EAST).unwrap();
            assert!(!view.can_move(Heading::EAST));
            assert_eq!(view.move_toward(Heading::EAST), Err(ActionFailure::Cooldown));
        }
        assert!((arena.body(id).unwrap().position.x - 22.5).abs() < 1e-9);

        let view = arena.view(id).unwrap();
        assert!(view.can_move(Heading::EAST));
    }

    #[test]
    fn sensing_excludes_self_and_respects_range() {
        let mut arena = small_arena();
        let me = arena
            .place(Team::Blue, Role::Gardener, Position::new(20.0, 20.0))
            .unwrap();
        arena
            .place(Team::Blue, Role::Gardener, Position::new(22.5, 20.0))
            .unwrap();
        arena
            .place(Team::Red, Role::Archon, Position::new(30.0, 30.0))
            .unwrap();
        arena
            .place_tree(Team::Neutral, Position::new(20.0, 17.0), 50.0)
            .unwrap();

        let view = arena.view(me).unwrap();
        assert_eq!(view.sense_agents(SenseRange::Unbounded, None).len(), 2);
        assert_eq!(view.sense_agents(SenseRange::Within(100.0), None).len(), 2);
        assert_eq!(view.sense_agents(SenseRange::Within(3.0), None).len(), 1);
        let enemies = view.sense_agents(SenseRange::Unbounded, Some(Team::Red));
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].role, Role::Archon);
        assert_eq!(view.sense_nodes(SenseRange::Within(3.0)).len(), 1);
        assert_eq!(view.unit_count(Role::Gardener), 2);
    }

    #[test]
    fn sensing_stops_at_sensor_range() {
        let mut arena = Arena::new(ArenaConfig {
            width: 100.0,
            height: 40.0,
            ..ArenaConfig::default()
        });
        let me = arena
            .place(Team::Blue, Role::Gardener, Position::new(10.0, 20.0))
            .unwrap();
        arena
            .place(Team::Red, Role::Archon, Position::new(50.0, 20.0))
            .unwrap();
        let view = arena.view(me).unwrap();
        assert!(view.sense_agents(SenseRange::Unbounded, None).is_empty());
    }

    #[test]
    fn hiring_charges_and_starts_cooldown() {
        let mut arena = small_arena();
        let archon = arena
            .place(Team::Blue, Role::Archon, Position::new(20.0, 20.0))
            .unwrap();
        {
            let mut view = arena.view(archon).unwrap();
            assert!(view.can_hire(Heading::NORTH));
            view.hire(Heading::NORTH).unwrap();
            assert!(!view.is_build_ready());
            assert!(!view.can_hire(Heading::SOUTH));
            assert!(!view.can_build(Role::Soldier, Heading::SOUTH));
        }
        assert_eq!(arena.ledger(Team::Blue).bullets, 200.0);
        let spawned = arena.drain_spawned();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].role, Role::Gardener);
        assert_eq!(spawned[0].parent, archon);
        assert!(arena.drain_spawned().is_empty());
        assert_eq!(arena.units(Team::Blue, Role::Gardener), 1);
    }

    #[test]
    fn only_gardeners_plant_and_produce() {
        let mut arena = small_arena();
        let archon = arena
            .place(Team::Blue, Role::Archon, Position::new(10.0, 10.0))
            .unwrap();
        let gardener = arena
            .place(Team::Blue, Role::Gardener, Position::new(30.0, 30.0))
            .unwrap();

        let mut view = arena.view(archon).unwrap();
        assert!(!view.can_plant(Heading::EAST));
        assert_eq!(
            view.build(Role::Soldier, Heading::EAST),
            Err(ActionFailure::WrongRole(Role::Archon))
        );

        let mut view = arena.view(gardener).unwrap();
        assert!(!view.can_hire(Heading::EAST));
        assert!(!view.can_build(Role::Archon, Heading::EAST));
        assert!(!view.can_build(Role::Gardener, Heading::EAST));
        assert!(view.can_build(Role::Lumberjack, Heading::EAST));
        assert!(view.plant(Heading::EAST).is_ok());
    }

    #[test]
    fn hex_garden_fits_and_leaves_the_gap() {
        let mut arena = small_arena();
        let id = arena
            .place(Team::Blue, Role::Gardener, Position::new(20.0, 20.0))
            .unwrap();
        arena.ledger_mut(Team::Blue).bullets = 1000.0;
        let pattern = grove_core::geometry::GardenPattern::new(Heading::WEST);

        let mut view = arena.view(id).unwrap();
        for heading in pattern.slot_headings() {
            view.plant(heading).unwrap();
        }
        assert!(view.can_build(Role::Soldier, pattern.gap_heading()));
        assert!(!view.can_build(Role::Soldier, Heading::WEST));
        assert_eq!(arena.trees().len(), 5);
    }

    #[test]
    fn watering_heals_once_per_tick() {
        let mut arena = small_arena();
        let id = arena
            .place(Team::Blue, Role::Gardener, Position::new(20.0, 20.0))
            .unwrap();
        let target = Position::new(20.0, 20.0).offset(Heading::EAST, 1.5);
        {
            let mut view = arena.view(id).unwrap();
            assert!(!view.can_water(target));
            view.plant(Heading::EAST).unwrap();
            assert!(view.can_water(target));
            view.water(target).unwrap();
            assert_eq!(view.water(target), Err(ActionFailure::Cooldown));
        }
        assert_eq!(arena.trees()[0].health, 20.0);
    }

    #[test]
    fn donation_buys_whole_points() {
        let mut arena = small_arena();
        let id = arena
            .place(Team::Red, Role::Archon, Position::new(20.0, 20.0))
            .unwrap();
        let mut view = arena.view(id).unwrap();
        assert_eq!(view.donate(0.0), Err(ActionFailure::InvalidAmount(0.0)));
        assert!(matches!(
            view.donate(500.0),
            Err(ActionFailure::InsufficientFunds { .. })
        ));
        view.donate(20.0).unwrap();
        assert_eq!(view.score(), 2);
        assert_eq!(view.currency(), 280.0);
    }

    #[test]
    fn end_round_pays_income_and_decays_trees() {
        let mut arena = small_arena();
        arena
            .place_tree(Team::Blue, Position::new(10.0, 10.0), 0.5)
            .unwrap();
        arena
            .place_tree(Team::Neutral, Position::new(30.0, 30.0), 0.5)
            .unwrap();
        arena.end_round();

        assert_eq!(arena.round(), 1);
        assert_eq!(arena.trees().len(), 1);
        assert_eq!(arena.trees()[0].team, Team::Neutral);
        let expected = 300.0 + 2.0 + 0.25 * (0.5 / 50.0);
        assert!((arena.ledger(Team::Blue).bullets - expected).abs() < 1e-9);
        assert!(arena.score_cost() > 7.5);
    }

    #[test]
    fn removed_agents_are_gone() {
        let mut arena = small_arena();
        let id = arena
            .place(Team::Blue, Role::Soldier, Position::new(20.0, 20.0))
            .unwrap();
        assert!(arena.remove(id).is_some());
        assert!(matches!(arena.view(id), Err(ActionFailure::Gone)));
    }

    #[test]
    fn config_rejects_nonsense() {
        let config = ArenaConfig {
            width: 0.0,
            ..ArenaConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ArenaConfig::default().validate().is_ok());
        assert_eq!(ArenaConfig::default().cost(Role::Archon), None);
    }
}
