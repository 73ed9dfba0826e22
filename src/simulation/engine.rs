//! Simulation engine - owns the world and drives the turn loop

use std::time::Instant;

use tracing::{debug, info};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::random::PseudoRandom;
use crate::core::types::{AgentId, Position, Turn, WorldBounds};
use crate::entity::agent::Agent;
use crate::entity::population::Population;
use crate::entity::role::Role;
use crate::simulation::events::{EventLog, WorldEvent};
use crate::simulation::output::{RunSummary, SimulationOutput, TurnSnapshot};
use crate::simulation::statistics::RunStatistics;
use crate::simulation::tick::{run_turn, TurnReport};
use crate::world::deposits::CoinDeposits;

/// Vitality of every agent placed before the first turn
pub const STARTING_VITALITY: i32 = 10;

/// A seeded, single-threaded simulation
///
/// Given the same config and seed, every run produces the same history.
pub struct SimulationEngine {
    pub(crate) config: SimulationConfig,
    pub(crate) bounds: WorldBounds,
    pub(crate) seed: u64,
    pub(crate) rng: PseudoRandom,
    pub(crate) population: Population,
    pub(crate) deposits: CoinDeposits,
    pub(crate) statistics: RunStatistics,
    pub(crate) events: EventLog,
    /// Turns completed so far
    pub(crate) turn: Turn,
    /// Forced event for the next turn, replacing the roll
    pub(crate) scheduled: Option<WorldEvent>,
    pub(crate) last_event: Option<WorldEvent>,
    pub(crate) last_encounters: Vec<(AgentId, AgentId)>,
    pub(crate) newborns: u32,
}

impl SimulationEngine {
    /// Validate `config`, then seed the population and the initial deposits
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(PseudoRandom::fresh_seed);
        let bounds = config.bounds();
        let roles: Vec<Role> = config.roles.iter().map(|p| p.role).collect();

        let mut engine = Self {
            statistics: RunStatistics::new(roles, &config.territories),
            bounds,
            seed,
            rng: PseudoRandom::seeded(seed),
            population: Population::new(),
            deposits: CoinDeposits::new(),
            events: EventLog::new(),
            turn: 0,
            scheduled: None,
            last_event: None,
            last_encounters: Vec::new(),
            newborns: 0,
            config,
        };

        engine.seed_population()?;
        engine.deposits.scatter(
            engine.config.deposits.initial_count,
            bounds,
            &engine.config.territories,
            engine.config.deposits.value_range,
            Some(engine.config.deposits.mountain_value_range),
            &mut engine.rng,
        );

        info!(
            seed,
            width = bounds.width,
            height = bounds.height,
            population = engine.population.len(),
            deposits = engine.deposits.len(),
            "Simulation initialized"
        );

        Ok(engine)
    }

    fn seed_population(&mut self) -> Result<()> {
        for _ in 0..self.config.initial_population {
            let x = self.rng.index_below(self.bounds.width as usize) as u32;
            let y = self.rng.index_below(self.bounds.height as usize) as u32;
            let role = self.draw_role()?;
            self.spawn_agent(role, Position::new(x, y))?;
        }
        Ok(())
    }

    /// Uniform draw over the configured roles
    pub(crate) fn draw_role(&mut self) -> Result<Role> {
        self.rng
            .choose(&self.config.roles)
            .map(|p| p.role)
            .ok_or_else(|| SimError::InvalidConfig("no roles configured".into()))
    }

    /// Place a fresh agent carrying its role's configured starting items
    ///
    /// The role must be one of the configured roles and the cell must be on
    /// the board; a rejected spawn doesn't consume an id.
    pub fn spawn_agent(&mut self, role: Role, position: Position) -> Result<AgentId> {
        if !self.bounds.contains(position) {
            return Err(SimError::OutOfBounds {
                agent: self.population.peek_next_id(),
                position,
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }

        let items = self
            .config
            .role_profile(role)
            .map(|p| p.starting_items.clone())
            .ok_or_else(|| {
                SimError::InvalidConfig(format!("role '{}' is not configured", role))
            })?;

        let id = self.population.next_id();
        let agent = Agent::new(id, format!("Persona {}", id.0), position, role, STARTING_VITALITY)
            .with_items(items);
        self.population.push(agent);
        Ok(id)
    }

    /// Force the event of the next turn
    pub fn schedule_event(&mut self, event: WorldEvent) {
        self.scheduled = Some(event);
    }

    /// Advance one turn
    pub fn step(&mut self) -> Result<TurnReport> {
        run_turn(self)
    }

    pub fn run_turns(&mut self, turns: u32) -> Result<()> {
        for _ in 0..turns {
            self.step()?;
        }
        Ok(())
    }

    /// Run the configured number of turns and collect the output
    pub fn run(mut self) -> Result<SimulationOutput> {
        let start = Instant::now();
        let turns = self.config.turns;

        for _ in 0..turns {
            let report = self.step()?;
            debug!(
                turn = report.turn,
                deaths = report.deaths.len(),
                births = report.births.len(),
                trades = report.trades,
                fights = report.fights,
                "Turn complete"
            );
        }

        let output = SimulationOutput::new(
            self.seed,
            self.statistics.clone(),
            self.events.clone(),
            &self.population,
            self.snapshot(),
            start.elapsed(),
        );
        info!("{}", output.summary());
        Ok(output)
    }

    /// Board state after the most recent turn
    pub fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot::capture(
            self.turn,
            self.last_event,
            &self.population,
            &self.last_encounters,
            &self.deposits,
            &self.config.territories,
        )
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::compute(&self.population, &self.statistics)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn deposits(&self) -> &CoinDeposits {
        &self.deposits
    }

    pub fn deposits_mut(&mut self) -> &mut CoinDeposits {
        &mut self.deposits
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
