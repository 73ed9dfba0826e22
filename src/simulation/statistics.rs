//! Run statistics - per-turn role history and death ledgers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::agent::Agent;
use crate::entity::population::Population;
use crate::entity::role::Role;
use crate::world::territory::Territory;

/// Alive count and summed wealth of one role, one entry per recorded turn
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSeries {
    pub alive: Vec<u32>,
    pub wealth: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryDeaths {
    pub name: String,
    pub deaths: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Keyed by every configured role, in `Role` order
    pub history: BTreeMap<Role, RoleSeries>,
    pub deaths_by_role: BTreeMap<Role, u32>,
    /// Same order as the configured territory list
    pub deaths_by_territory: Vec<TerritoryDeaths>,
    /// Deaths on cells no territory covers
    pub deaths_outside_territory: u32,
    /// Completed trades (one per trading pair)
    pub total_trades: u32,
    /// Resolved combats (one per fighting pair)
    pub total_fights: u32,
    pub births: u32,
    pub turns_recorded: u32,
}

impl RunStatistics {
    pub fn new(roles: impl IntoIterator<Item = Role>, territories: &[Territory]) -> Self {
        let roles: Vec<Role> = roles.into_iter().collect();
        Self {
            history: roles.iter().map(|&r| (r, RoleSeries::default())).collect(),
            deaths_by_role: roles.iter().map(|&r| (r, 0)).collect(),
            deaths_by_territory: territories
                .iter()
                .map(|t| TerritoryDeaths {
                    name: t.name.clone(),
                    deaths: 0,
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Attribute a death to the agent's role and the territory it died in
    pub fn record_death(&mut self, agent: &Agent, territories: &[Territory]) {
        *self.deaths_by_role.entry(agent.role).or_insert(0) += 1;

        match territories.iter().position(|t| t.contains(agent.position)) {
            Some(idx) => {
                if let Some(entry) = self.deaths_by_territory.get_mut(idx) {
                    entry.deaths += 1;
                }
            }
            None => self.deaths_outside_territory += 1,
        }
    }

    /// Append this turn's alive count and wealth for each role
    pub fn record_turn(&mut self, population: &Population) {
        for (role, series) in self.history.iter_mut() {
            let (alive, wealth) = population
                .iter_role(*role)
                .filter(|a| a.is_alive())
                .fold((0u32, 0u64), |(n, w), a| (n + 1, w + u64::from(a.wealth)));
            series.alive.push(alive);
            series.wealth.push(wealth);
        }
        self.turns_recorded += 1;
    }

    pub fn total_deaths(&self) -> u32 {
        self.deaths_by_role.values().sum()
    }

    /// Trades per recorded turn; 0 before the first turn
    pub fn mean_trades_per_turn(&self) -> f64 {
        if self.turns_recorded == 0 {
            0.0
        } else {
            f64::from(self.total_trades) / f64::from(self.turns_recorded)
        }
    }

    /// Territory with the most deaths, first in list order on a tie
    pub fn most_lethal_territory(&self) -> Option<&str> {
        first_max(self.deaths_by_territory.iter().map(|t| (t.name.as_str(), t.deaths)))
    }
}

/// Key of the largest value; the earliest entry wins a tie
///
/// `Iterator::max_by_key` keeps the last maximum, which would make summaries
/// depend on map layout instead of role or territory order.
pub fn first_max<K, V: Ord>(entries: impl IntoIterator<Item = (K, V)>) -> Option<K> {
    let mut best: Option<(K, V)> = None;
    for (key, value) in entries {
        let better = match &best {
            Some((_, top)) => value > *top,
            None => true,
        };
        if better {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key)
}
