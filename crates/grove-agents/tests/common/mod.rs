//! Scripted environment shared by the controller tests.
//!
//! Every check answers from a plain field and every commit is recorded in
//! `calls`, so tests can assert exactly what a controller attempted.

#![allow(dead_code)]

use grove_core::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Move(Heading),
    Hire(Heading),
    Plant(Heading),
    Water(Position),
    Build(Role, Heading),
    Donate(f64),
}

pub struct MockEnv {
    pub position: Position,
    pub team: Team,
    pub agents: Vec<SensedAgent>,
    pub nodes: Vec<SensedNode>,
    pub on_map: Result<bool, ProbeError>,
    pub passable: bool,
    pub blocked: Vec<Heading>,
    pub move_commit_fails: bool,
    pub build_ready: bool,
    pub buildable: bool,
    /// Successful builds left before `can_build` starts answering false.
    pub build_budget: Option<usize>,
    pub build_commit_fails: bool,
    pub plantable: bool,
    pub plant_commit_fails: bool,
    /// Slots successfully planted so far; `can_plant` refuses them.
    pub planted: Vec<Heading>,
    pub waterable: bool,
    pub hireable: bool,
    pub currency: f64,
    pub score: u32,
    pub score_cost: f64,
    pub counts: HashMap<Role, usize>,
    pub calls: Vec<Call>,
}

impl MockEnv {
    /// A wide-open arena: every check passes, nobody else around.
    pub fn open(position: Position) -> Self {
        let mut counts = HashMap::new();
        counts.insert(Role::Archon, 1);
        Self {
            position,
            team: Team::Blue,
            agents: Vec::new(),
            nodes: Vec::new(),
            on_map: Ok(true),
            passable: true,
            blocked: Vec::new(),
            move_commit_fails: false,
            build_ready: true,
            buildable: true,
            build_budget: None,
            build_commit_fails: false,
            plantable: true,
            plant_commit_fails: false,
            planted: Vec::new(),
            waterable: true,
            hireable: true,
            currency: 500.0,
            score: 0,
            score_cost: 10.0,
            counts,
            calls: Vec::new(),
        }
    }

    pub fn add_agent(&mut self, team: Team, role: Role, position: Position) {
        let seed = self.agents.len() as u64 + 100;
        self.agents.push(SensedAgent {
            id: AgentId::from_seed(seed),
            position,
            team,
            role,
        });
    }

    pub fn add_node(&mut self, team: Team, position: Position) {
        self.nodes.push(SensedNode { position, team });
    }

    pub fn moves(&self) -> Vec<Heading> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Move(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    pub fn builds(&self) -> Vec<(Role, Heading)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Build(role, h) => Some((*role, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn plants(&self) -> Vec<Heading> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Plant(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    pub fn waters(&self) -> Vec<Position> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Water(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn donations(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Donate(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

fn same_heading(a: &Heading, b: &Heading) -> bool {
    a.degrees_between(b) < 1e-6
}

impl Environment for MockEnv {
    fn position(&self) -> Position {
        self.position
    }

    fn team(&self) -> Team {
        self.team
    }

    fn sense_agents(&self, range: SenseRange, team: Option<Team>) -> Vec<SensedAgent> {
        self.agents
            .iter()
            .filter(|a| team.map_or(true, |t| a.team == t))
            .filter(|a| range.reaches(a.position.distance_to(&self.position)))
            .cloned()
            .collect()
    }

    fn sense_nodes(&self, range: SenseRange) -> Vec<SensedNode> {
        self.nodes
            .iter()
            .filter(|n| range.reaches(n.position.distance_to(&self.position)))
            .cloned()
            .collect()
    }

    fn on_map(&self, _position: Position, _margin: f64) -> Result<bool, ProbeError> {
        self.on_map.clone()
    }

    fn unit_count(&self, role: Role) -> usize {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    fn can_move(&self, heading: Heading) -> bool {
        self.passable && !self.blocked.iter().any(|b| same_heading(b, &heading))
    }

    fn move_toward(&mut self, heading: Heading) -> Result<(), ActionFailure> {
        self.calls.push(Call::Move(heading));
        if self.move_commit_fails {
            return Err(ActionFailure::Blocked);
        }
        Ok(())
    }

    fn is_build_ready(&self) -> bool {
        self.build_ready
    }

    fn can_hire(&self, _heading: Heading) -> bool {
        self.hireable
    }

    fn hire(&mut self, heading: Heading) -> Result<(), ActionFailure> {
        self.calls.push(Call::Hire(heading));
        Ok(())
    }

    fn can_plant(&self, heading: Heading) -> bool {
        self.plantable && !self.planted.iter().any(|h| same_heading(h, &heading))
    }

    fn plant(&mut self, heading: Heading) -> Result<(), ActionFailure> {
        self.calls.push(Call::Plant(heading));
        if self.plant_commit_fails {
            return Err(ActionFailure::Blocked);
        }
        self.planted.push(heading);
        Ok(())
    }

    fn can_water(&self, _position: Position) -> bool {
        self.waterable
    }

    fn water(&mut self, position: Position) -> Result<(), ActionFailure> {
        self.calls.push(Call::Water(position));
        Ok(())
    }

    fn can_build(&self, _role: Role, _heading: Heading) -> bool {
        self.buildable && self.build_budget.map_or(true, |left| left > 0)
    }

    fn build(&mut self, role: Role, heading: Heading) -> Result<(), ActionFailure> {
        self.calls.push(Call::Build(role, heading));
        if self.build_commit_fails {
            return Err(ActionFailure::Blocked);
        }
        if let Some(left) = self.build_budget.as_mut() {
            *left = left.saturating_sub(1);
        }
        Ok(())
    }

    fn currency(&self) -> f64 {
        self.currency
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn score_cost(&self) -> f64 {
        self.score_cost
    }

    fn donate(&mut self, amount: f64) -> Result<(), ActionFailure> {
        self.calls.push(Call::Donate(amount));
        if amount <= 0.0 || amount > self.currency {
            return Err(ActionFailure::InvalidAmount(amount));
        }
        self.currency -= amount;
        self.score += (amount / self.score_cost) as u32;
        Ok(())
    }
}
