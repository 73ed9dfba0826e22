//! Simulation output and serialization

use std::collections::BTreeMap;
use std::time::Duration;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{AgentId, Position, Turn};
use crate::entity::agent::Agent;
use crate::entity::population::Population;
use crate::entity::role::Role;
use crate::simulation::events::{EventLog, WorldEvent};
use crate::simulation::statistics::{first_max, RunStatistics};
use crate::world::deposits::CoinDeposits;
use crate::world::territory::Territory;

/// Read-only view of one agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub name: String,
    pub role: Role,
    pub position: Position,
    pub vitality: i32,
    pub wealth: u32,
    pub alive: bool,
    pub age: u32,
    pub territory: Option<String>,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name.clone(),
            role: agent.role,
            position: agent.position,
            vitality: agent.vitality,
            wealth: agent.wealth,
            alive: agent.is_alive(),
            age: agent.age,
            territory: agent.territory.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositView {
    pub position: Position,
    pub coins: Vec<u32>,
}

/// State of the board after a turn, for renderers and plotters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn: Turn,
    pub event: Option<WorldEvent>,
    pub agents: Vec<AgentView>,
    /// Pairs that met this turn
    pub encounters: Vec<(AgentId, AgentId)>,
    pub deposits: Vec<DepositView>,
    pub territories: Vec<Territory>,
}

impl TurnSnapshot {
    pub fn capture(
        turn: Turn,
        event: Option<WorldEvent>,
        population: &Population,
        encounters: &[(AgentId, AgentId)],
        deposits: &CoinDeposits,
        territories: &[Territory],
    ) -> Self {
        Self {
            turn,
            event,
            agents: population.iter().map(AgentView::from).collect(),
            encounters: encounters.to_vec(),
            deposits: deposits
                .iter()
                .map(|(position, coins)| DepositView {
                    position,
                    coins: coins.to_vec(),
                })
                .collect(),
            territories: territories.to_vec(),
        }
    }

    pub fn living(&self) -> impl Iterator<Item = &AgentView> {
        self.agents.iter().filter(|a| a.alive)
    }
}

/// Final aggregates of a run
///
/// Role aggregates cover every agent that ever held the role, dead ones
/// included. Ties go to the earlier role in `Role` order, or the earlier
/// territory in list order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub richest_role: Option<Role>,
    pub most_aged_role: Option<Role>,
    pub most_combative_role: Option<Role>,
    pub most_lethal_territory: Option<String>,
    pub mean_trades_per_turn: f64,
    pub final_wealth_by_role: BTreeMap<Role, u64>,
    /// 0 for roles nobody held
    pub mean_age_by_role: BTreeMap<Role, f64>,
    pub fights_by_role: BTreeMap<Role, u64>,
}

impl RunSummary {
    pub fn compute(population: &Population, statistics: &RunStatistics) -> Self {
        let roles: Vec<Role> = statistics.history.keys().copied().collect();

        let final_wealth_by_role: BTreeMap<Role, u64> = roles
            .iter()
            .map(|&r| (r, population.iter_role(r).map(|a| u64::from(a.wealth)).sum()))
            .collect();

        let mean_age_by_role: BTreeMap<Role, f64> = roles
            .iter()
            .map(|&r| {
                let (count, total) = population
                    .iter_role(r)
                    .fold((0u64, 0u64), |(n, t), a| (n + 1, t + u64::from(a.age)));
                let mean = if count == 0 { 0.0 } else { total as f64 / count as f64 };
                (r, mean)
            })
            .collect();

        let fights_by_role: BTreeMap<Role, u64> = roles
            .iter()
            .map(|&r| (r, population.iter_role(r).map(|a| u64::from(a.fights)).sum()))
            .collect();

        Self {
            richest_role: first_max(final_wealth_by_role.iter().map(|(&r, &w)| (r, w))),
            most_aged_role: first_max(mean_age_by_role.iter().map(|(&r, &m)| (r, OrderedFloat(m)))),
            most_combative_role: first_max(fights_by_role.iter().map(|(&r, &f)| (r, f))),
            most_lethal_territory: statistics.most_lethal_territory().map(str::to_string),
            mean_trades_per_turn: statistics.mean_trades_per_turn(),
            final_wealth_by_role,
            mean_age_by_role,
            fights_by_role,
        }
    }
}

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Seed that reproduces this run
    pub seed: u64,
    pub summary: RunSummary,
    pub statistics: RunStatistics,
    pub events: EventLog,
    pub final_state: TurnSnapshot,
    pub simulation_time_ms: u64,
}

impl SimulationOutput {
    pub fn new(
        seed: u64,
        statistics: RunStatistics,
        events: EventLog,
        population: &Population,
        final_state: TurnSnapshot,
        elapsed: Duration,
    ) -> Self {
        Self {
            seed,
            summary: RunSummary::compute(population, &statistics),
            statistics,
            events,
            final_state,
            simulation_time_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let role = |r: Option<Role>| r.map_or_else(|| "-".to_string(), |r| r.to_string());
        let alive = self.final_state.living().count();

        format!(
            "Simulated {} turns in {}ms (seed {})\n\
             {} agents, {} alive, {} births, {} deaths, {} events\n\
             richest: {}, longest-lived: {}, most combative: {}, most lethal territory: {}\n\
             {:.2} trades per turn",
            self.statistics.turns_recorded,
            self.simulation_time_ms,
            self.seed,
            self.final_state.agents.len(),
            alive,
            self.statistics.births,
            self.statistics.total_deaths(),
            self.events.len(),
            role(self.summary.richest_role),
            role(self.summary.most_aged_role),
            role(self.summary.most_combative_role),
            self.summary.most_lethal_territory.as_deref().unwrap_or("-"),
            self.summary.mean_trades_per_turn,
        )
    }
}
