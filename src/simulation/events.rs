//! Global events and the event history log
//!
//! An event is rolled once per turn. Rain, earthquake and plague act on the
//! world directly; fog and market only set turn-scoped conditions that the
//! interaction phase reads.

use serde::{Deserialize, Serialize};

use crate::core::config::EventConfig;
use crate::core::random::PseudoRandom;
use crate::core::types::{AgentId, Turn, WorldBounds};
use crate::entity::population::Population;
use crate::world::deposits::CoinDeposits;
use crate::world::territory::Territory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldEvent {
    /// New coins fall on random cells
    Rain,
    /// Every living agent takes a flat hit
    Earthquake,
    /// Each living agent may die outright
    Plague,
    /// No trade, combat or meeting this turn
    Fog,
    /// Reserved for a trade boost; currently no effect
    Market,
}

impl WorldEvent {
    pub const ALL: [WorldEvent; 5] = [
        WorldEvent::Rain,
        WorldEvent::Earthquake,
        WorldEvent::Plague,
        WorldEvent::Fog,
        WorldEvent::Market,
    ];
}

/// Turn-scoped switches derived from the event that fired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnConditions {
    pub fog: bool,
    pub market: bool,
}

impl TurnConditions {
    pub fn from_event(event: Option<WorldEvent>) -> Self {
        Self {
            fog: event == Some(WorldEvent::Fog),
            market: event == Some(WorldEvent::Market),
        }
    }
}

/// Direct consequences of applying an event
#[derive(Clone, Debug, Default)]
pub struct EventOutcome {
    /// Population indices of agents the event killed
    pub deaths: Vec<usize>,
    pub coins_dropped: u32,
}

/// Roll for this turn's event
pub fn roll_event(rng: &mut PseudoRandom, config: &EventConfig) -> Option<WorldEvent> {
    if rng.chance(config.event_chance) {
        Some(WorldEvent::ALL[rng.index_below(WorldEvent::ALL.len())])
    } else {
        None
    }
}

/// Apply an event's direct effects
pub fn apply_event(
    event: WorldEvent,
    population: &mut Population,
    deposits: &mut CoinDeposits,
    bounds: WorldBounds,
    territories: &[Territory],
    config: &EventConfig,
    rng: &mut PseudoRandom,
) -> EventOutcome {
    let mut outcome = EventOutcome::default();

    match event {
        WorldEvent::Rain => {
            deposits.scatter(
                config.rain_deposits,
                bounds,
                territories,
                config.rain_value_range,
                None,
                rng,
            );
            outcome.coins_dropped = config.rain_deposits;
        }
        WorldEvent::Earthquake => {
            for (idx, agent) in population.iter_mut().enumerate() {
                if !agent.is_alive() {
                    continue;
                }
                agent.take_damage(config.earthquake_damage);
                if !agent.is_alive() {
                    outcome.deaths.push(idx);
                }
            }
        }
        WorldEvent::Plague => {
            for (idx, agent) in population.iter_mut().enumerate() {
                if agent.is_alive() && rng.chance(config.plague_chance) {
                    agent.kill();
                    outcome.deaths.push(idx);
                }
            }
        }
        // carried as turn conditions; fog is enforced by the interaction phase
        WorldEvent::Fog | WorldEvent::Market => {}
    }

    outcome
}

/// One fired event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub turn: Turn,
    pub event: WorldEvent,
    pub casualties: Vec<AgentId>,
}

/// Every event fired during a run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: Turn, event: WorldEvent, casualties: Vec<AgentId>) {
        self.records.push(EventRecord {
            turn,
            event,
            casualties,
        });
    }

    pub fn events_for_turn(&self, turn: Turn) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| r.turn == turn)
    }

    pub fn count(&self, event: WorldEvent) -> usize {
        self.records.iter().filter(|r| r.event == event).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
