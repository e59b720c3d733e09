//! Gardener: the production role.
//!
//! A gardener walks until it finds a free patch of ground, settles there,
//! plants a hexagonal garden around itself and then produces support units
//! through the one gap it leaves in the hex. If an enemy archon is in sight
//! when it spawns it skips all of that and only builds soldiers.
//!
//! ```text
//! Starting <-> OnlyDefenders
//!    \
//!     \-----> Finding <-> Harvest
//!                \
//!                 \-----> Building
//! ```
//!
//! Several behaviors span more than one tick (irrigation is paced at one
//! slot per tick, production waits out its cooldown, forced production
//! retries until it succeeds). Those are kept as resumable jobs inside
//! [`Phase`]: each [`step`](Controller::step) advances the job by exactly
//! one tick and returns, so nothing ever blocks inside a step.

use crate::base::{enemy_sensed, random_heading, site_crowded, Controller, TickEnd};
use crate::movement::try_move;
use grove_core::config::{MoveConfig, StrategyConfig};
use grove_core::environment::Environment;
use grove_core::geometry::{GardenPattern, Heading, GARDEN_SLOTS};
use grove_core::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Ticks added to the search counter when the probed site runs off the map,
/// so the gardener turns away from the edge sooner.
const OFF_MAP_PENALTY: u32 = 10;

/// The state label of the gardener's machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GardenerState {
    Starting,
    Finding,
    Building,
    OnlyDefenders,
    Harvest,
}

/// One-way flags recording which units this gardener has produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BuiltFlags {
    pub lumberjack: bool,
    pub scout: bool,
    pub soldier: bool,
}

/// What a fresh step learned from sensing before deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Survey {
    /// An enemy archon is visible anywhere in the arena.
    pub enemy_archon_near: bool,
    /// More foreign resource nodes than the woods threshold are close by.
    pub in_woods: bool,
}

/// What the gardener should do with a fresh tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Switch to this state and end the tick.
    Enter(GardenerState),
    /// Probe the current site; settle on success, walk on failure.
    ProbeSite,
    /// Build a soldier through the garden gap.
    Defend,
    /// Run the current state's job.
    Work,
}

/// The label transition for a fresh tick. Pure: depends only on sensed data.
pub fn decide(state: GardenerState, survey: &Survey, built: &BuiltFlags) -> Directive {
    match state {
        GardenerState::Starting if survey.enemy_archon_near => {
            Directive::Enter(GardenerState::OnlyDefenders)
        }
        GardenerState::Starting => Directive::Enter(GardenerState::Finding),
        GardenerState::Finding if survey.in_woods && !built.lumberjack => {
            Directive::Enter(GardenerState::Harvest)
        }
        GardenerState::Finding => Directive::ProbeSite,
        GardenerState::OnlyDefenders if survey.enemy_archon_near => Directive::Defend,
        GardenerState::OnlyDefenders => Directive::Enter(GardenerState::Finding),
        GardenerState::Building | GardenerState::Harvest => Directive::Work,
    }
}

/// What follows a full irrigation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterSweep {
    /// Move on to unit production.
    Produce,
    /// A forced build of this role failed; idle one tick, then retry it.
    Retry(Role),
}

/// Position inside one building cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildStage {
    /// Start of a cycle: plant every free slot.
    Plant,
    /// Water `slot`, then yield.
    Irrigate { slot: usize, then: AfterSweep },
    /// The idle tick between a failed forced build's sweep and its retry.
    Backoff { target: Role },
    /// Produce `target` through the gap, retrying until it succeeds.
    Force { target: Role, cooldown_waited: bool },
    /// One opportunistic soldier, then the cycle ends.
    Extra { cooldown_waited: bool },
}

/// Progress of the lumberjack loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HarvestJob {
    /// Working on the second (bounded) lumberjack.
    second: bool,
    cooldown_waited: bool,
}

/// The full persistent state: the label plus whatever job is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Starting,
    Finding,
    Building(BuildStage),
    OnlyDefenders { cooldown_waited: bool },
    Harvest(Option<HarvestJob>),
}

impl Phase {
    fn entering(state: GardenerState) -> Phase {
        match state {
            GardenerState::Starting => Phase::Starting,
            GardenerState::Finding => Phase::Finding,
            GardenerState::Building => Phase::Building(BuildStage::Plant),
            GardenerState::OnlyDefenders => Phase::OnlyDefenders {
                cooldown_waited: false,
            },
            GardenerState::Harvest => Phase::Harvest(None),
        }
    }

    fn label(&self) -> GardenerState {
        match self {
            Phase::Starting => GardenerState::Starting,
            Phase::Finding => GardenerState::Finding,
            Phase::Building(_) => GardenerState::Building,
            Phase::OnlyDefenders { .. } => GardenerState::OnlyDefenders,
            Phase::Harvest(_) => GardenerState::Harvest,
        }
    }
}

/// The production role controller.
pub struct Gardener<R: Rng = SmallRng> {
    strategy: StrategyConfig,
    movement: MoveConfig,
    pattern: GardenPattern,
    rng: R,
    phase: Phase,
    round_counter: u32,
    current_heading: Heading,
    built: BuiltFlags,
    age: Tick,
}

impl Gardener<SmallRng> {
    /// A gardener with default constants and a seeded generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            StrategyConfig::default(),
            MoveConfig::default(),
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> Gardener<R> {
    pub fn new(strategy: StrategyConfig, movement: MoveConfig, mut rng: R) -> Self {
        let current_heading = random_heading(&mut rng);
        Self {
            pattern: strategy.garden_pattern(),
            strategy,
            movement,
            rng,
            phase: Phase::Starting,
            round_counter: 0,
            current_heading,
            built: BuiltFlags::default(),
            age: 0,
        }
    }

    pub fn state(&self) -> GardenerState {
        self.phase.label()
    }

    pub fn built(&self) -> BuiltFlags {
        self.built
    }

    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    /// Heading walked while searching for a site.
    pub fn current_heading(&self) -> Heading {
        self.current_heading
    }

    pub fn pattern(&self) -> &GardenPattern {
        &self.pattern
    }

    /// Whether the next step resumes a multi-tick job instead of starting fresh.
    pub fn is_resuming(&self) -> bool {
        match self.phase {
            Phase::Building(stage) => stage != BuildStage::Plant,
            Phase::OnlyDefenders { cooldown_waited } => cooldown_waited,
            Phase::Harvest(job) => job.is_some(),
            Phase::Starting | Phase::Finding => false,
        }
    }

    /// Probe the current position as a standard garden site.
    ///
    /// See [`find_spot_within`](Self::find_spot_within).
    pub fn find_spot(&mut self, env: &mut dyn Environment) -> bool {
        self.find_spot_within(env, self.strategy.free_spot_radius)
    }

    /// Probe with the larger radius needed around bulky units.
    pub fn find_spot_bulky(&mut self, env: &mut dyn Environment) -> bool {
        self.find_spot_within(env, self.strategy.bulky_spot_radius)
    }

    /// Probe the current position as a garden site of `radius`.
    ///
    /// A site is suitable when no own-team archon or gardener is within
    /// `radius` and a circle of `radius` fits on the map. On an unsuitable
    /// site the gardener takes one step along its search heading; the
    /// heading is re-randomized once the search counter passes the direct
    /// path length.
    pub fn find_spot_within(&mut self, env: &mut dyn Environment, radius: f64) -> bool {
        if self.round_counter > self.strategy.direct_path_length {
            self.round_counter = 0;
            self.current_heading = random_heading(&mut self.rng);
        }

        let mut suitable = !site_crowded(env, radius);

        match env.on_map(env.position(), radius) {
            Ok(true) => {}
            Ok(false) => {
                suitable = false;
                self.round_counter += OFF_MAP_PENALTY;
            }
            Err(err) => {
                warn!(%err, radius, "bad radius in site probe");
                suitable = false;
            }
        }

        if !suitable {
            try_move(env, self.current_heading, &self.movement);
        }
        suitable
    }

    /// Try to plant every slot of the garden pattern once.
    ///
    /// Each slot is checked and committed on its own; a rejected slot does
    /// not stop the others. Returns whether anything was planted.
    pub fn build_garden(&mut self, env: &mut dyn Environment) -> bool {
        let mut planted = false;
        for heading in self.pattern.slot_headings() {
            if !env.can_plant(heading) {
                continue;
            }
            match env.plant(heading) {
                Ok(()) => planted = true,
                Err(failure) => trace!(heading = heading.degrees(), %failure, "plant rejected"),
            }
        }
        planted
    }

    /// Whether more foreign resource nodes than the threshold are close by.
    pub fn is_in_woods(&self, env: &dyn Environment) -> bool {
        let team = env.team();
        let foreign = env
            .sense_nodes(SenseRange::Within(self.strategy.free_spot_radius))
            .iter()
            .filter(|node| node.team != team)
            .count();
        foreign > self.strategy.woods_threshold
    }

    fn survey(&self, env: &dyn Environment, state: GardenerState) -> Survey {
        match state {
            GardenerState::Starting | GardenerState::OnlyDefenders => Survey {
                enemy_archon_near: enemy_sensed(env, Role::Archon),
                ..Survey::default()
            },
            GardenerState::Finding => Survey {
                in_woods: self.is_in_woods(env),
                ..Survey::default()
            },
            GardenerState::Building | GardenerState::Harvest => Survey::default(),
        }
    }

    fn water_slot(&self, env: &mut dyn Environment, slot: usize) {
        let target = self
            .pattern
            .slot_position(env.position(), slot, self.strategy.water_distance);
        if env.can_water(target) {
            if let Err(failure) = env.water(target) {
                trace!(slot, %failure, "water rejected");
            }
        }
    }

    /// Attempt one unit through the gap (or a random heading).
    fn produce(&mut self, env: &mut dyn Environment, role: Role, random: bool) -> bool {
        let heading = if random {
            random_heading(&mut self.rng)
        } else {
            self.pattern.gap_heading()
        };
        if !env.can_build(role, heading) {
            return false;
        }
        match env.build(role, heading) {
            Ok(()) => {
                debug!(%role, "gardener produced unit");
                true
            }
            Err(failure) => {
                trace!(%role, %failure, "build rejected at commit");
                false
            }
        }
    }

    fn mark_built(&mut self, role: Role) {
        match role {
            Role::Scout => self.built.scout = true,
            Role::Soldier => self.built.soldier = true,
            Role::Lumberjack => self.built.lumberjack = true,
            _ => {}
        }
    }

    /// Where production starts once a sweep completes.
    fn production_stage(&self) -> BuildStage {
        if !self.built.scout {
            BuildStage::Force {
                target: Role::Scout,
                cooldown_waited: false,
            }
        } else if !self.built.soldier {
            BuildStage::Force {
                target: Role::Soldier,
                cooldown_waited: false,
            }
        } else {
            BuildStage::Extra {
                cooldown_waited: false,
            }
        }
    }

    fn run_building(&mut self, env: &mut dyn Environment, mut stage: BuildStage) -> TickEnd {
        loop {
            match stage {
                BuildStage::Plant => {
                    self.build_garden(env);
                    stage = BuildStage::Irrigate {
                        slot: 0,
                        then: AfterSweep::Produce,
                    };
                }
                BuildStage::Irrigate { slot, then } => {
                    self.water_slot(env, slot);
                    let next = if slot + 1 < GARDEN_SLOTS {
                        BuildStage::Irrigate { slot: slot + 1, then }
                    } else {
                        match then {
                            AfterSweep::Produce => self.production_stage(),
                            AfterSweep::Retry(target) => BuildStage::Backoff { target },
                        }
                    };
                    self.phase = Phase::Building(next);
                    return TickEnd::Yielded;
                }
                BuildStage::Backoff { target } => {
                    self.phase = Phase::Building(BuildStage::Force {
                        target,
                        cooldown_waited: false,
                    });
                    return TickEnd::Yielded;
                }
                BuildStage::Force {
                    target,
                    cooldown_waited,
                } => {
                    if !cooldown_waited && !env.is_build_ready() {
                        self.phase = Phase::Building(BuildStage::Force {
                            target,
                            cooldown_waited: true,
                        });
                        return TickEnd::Yielded;
                    }
                    if self.produce(env, target, false) {
                        self.mark_built(target);
                        stage = BuildStage::Extra {
                            cooldown_waited: false,
                        };
                    } else {
                        trace!(%target, "forced build failed, sweeping before retry");
                        stage = BuildStage::Irrigate {
                            slot: 0,
                            then: AfterSweep::Retry(target),
                        };
                    }
                }
                BuildStage::Extra { cooldown_waited } => {
                    if !cooldown_waited && !env.is_build_ready() {
                        self.phase = Phase::Building(BuildStage::Extra {
                            cooldown_waited: true,
                        });
                        return TickEnd::Yielded;
                    }
                    self.produce(env, Role::Soldier, false);
                    self.phase = Phase::Building(BuildStage::Plant);
                    return TickEnd::Finished;
                }
            }
        }
    }

    /// First lumberjack is forced; the second gets a bounded retry budget.
    fn run_harvest(&mut self, env: &mut dyn Environment, job: Option<HarvestJob>) -> TickEnd {
        let mut job = match job {
            Some(job) => job,
            None => {
                self.round_counter = 0;
                HarvestJob::default()
            }
        };
        loop {
            if !job.cooldown_waited && !env.is_build_ready() {
                job.cooldown_waited = true;
                self.phase = Phase::Harvest(Some(job));
                return TickEnd::Yielded;
            }
            job.cooldown_waited = false;

            let built = self.produce(env, Role::Lumberjack, true);
            let out_of_retries =
                job.second && self.round_counter >= self.strategy.harvest_retry_limit;
            if built || out_of_retries {
                if !job.second {
                    job.second = true;
                    self.round_counter = 0;
                    continue;
                }
                self.phase = Phase::Finding;
                return TickEnd::Finished;
            }

            self.round_counter += 1;
            self.phase = Phase::Harvest(Some(job));
            return TickEnd::Yielded;
        }
    }

    fn defend(&mut self, env: &mut dyn Environment, cooldown_waited: bool) -> TickEnd {
        if !cooldown_waited && !env.is_build_ready() {
            self.phase = Phase::OnlyDefenders {
                cooldown_waited: true,
            };
            return TickEnd::Yielded;
        }
        self.phase = Phase::OnlyDefenders {
            cooldown_waited: false,
        };
        self.produce(env, Role::Soldier, false);
        TickEnd::Finished
    }

    fn resume(&mut self, env: &mut dyn Environment) -> Option<TickEnd> {
        match self.phase {
            Phase::Building(stage) if stage != BuildStage::Plant => {
                Some(self.run_building(env, stage))
            }
            Phase::Harvest(Some(job)) => Some(self.run_harvest(env, Some(job))),
            Phase::OnlyDefenders {
                cooldown_waited: true,
            } => Some(self.defend(env, true)),
            _ => None,
        }
    }

    fn fresh_step(&mut self, env: &mut dyn Environment) -> TickEnd {
        self.round_counter += 1;
        let state = self.state();
        if state == GardenerState::Starting {
            self.current_heading = random_heading(&mut self.rng);
        }

        let survey = self.survey(env, state);
        match decide(state, &survey, &self.built) {
            Directive::Enter(next) => {
                if next == GardenerState::Harvest {
                    self.built.lumberjack = true;
                }
                self.phase = Phase::entering(next);
                TickEnd::Finished
            }
            Directive::ProbeSite => {
                if self.find_spot(env) {
                    self.phase = Phase::entering(GardenerState::Building);
                }
                TickEnd::Finished
            }
            Directive::Defend => self.defend(env, false),
            Directive::Work => match self.phase {
                Phase::Building(stage) => self.run_building(env, stage),
                Phase::Harvest(job) => self.run_harvest(env, job),
                _ => TickEnd::Finished,
            },
        }
    }
}

impl<R: Rng> Controller for Gardener<R> {
    fn role(&self) -> Role {
        Role::Gardener
    }

    fn step(&mut self, env: &mut dyn Environment) -> TickEnd {
        self.age += 1;
        let before = self.state();

        let end = match self.resume(env) {
            Some(end) => end,
            None => self.fresh_step(env),
        };

        let after = self.state();
        if before != after {
            debug!(from = ?before, to = ?after, "gardener state change");
        }
        end
    }

    fn age(&self) -> Tick {
        self.age
    }

    fn status(&self) -> String {
        format!("gardener/{:?}", self.state())
    }
}
