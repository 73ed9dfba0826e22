//! Simulation configuration with documented defaults
//!
//! Every tunable of a run lives here. Defaults reproduce the reference world:
//! a 20x20 torus, 30 persons, 200 turns and three territories.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::WorldBounds;
use crate::entity::role::Role;
use crate::world::deposits::ValueRange;
use crate::world::territory::{Territory, TerritoryKind};

/// Configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Board dimensions
    pub world: WorldConfig,

    /// Seed for the random stream
    ///
    /// `None` draws one from OS entropy; the seed actually used is logged and
    /// exported with the output so the run can be replayed.
    pub seed: Option<u64>,

    /// Number of turns `run` executes
    pub turns: u32,

    /// Persons placed at random cells before the first turn
    pub initial_population: u32,

    /// Roles available to seeded and newborn agents, with starting items
    pub roles: Vec<RoleProfile>,

    /// Zones, checked in list order (first match wins on overlap)
    pub territories: Vec<Territory>,

    pub deposits: DepositConfig,
    pub movement: MovementConfig,
    pub interaction: InteractionConfig,
    pub events: EventConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
}

/// A role and what its agents carry at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: Role,
    #[serde(default)]
    pub starting_items: Vec<String>,
}

impl RoleProfile {
    pub fn with_defaults(role: Role) -> Self {
        Self {
            role,
            starting_items: role.default_items(),
        }
    }
}

/// Initial coin scatter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositConfig {
    /// Coins dropped before the first turn
    pub initial_count: u32,

    /// Value of a coin outside mountains
    pub value_range: ValueRange,

    /// Value of a coin inside a mountain territory
    ///
    /// Mountains are where the money is: at 3..=10 against 1..=5 a mountain
    /// coin is worth roughly twice a lowland one.
    pub mountain_value_range: ValueRange,
}

/// Movement policy tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Probability a hoarder heads for the nearest deposit instead of shuffling
    pub hoarder_chase_chance: f64,

    /// Probability an agent standing in a forest doesn't move this turn
    pub forest_stall_chance: f64,

    /// Manhattan radius in which collectors notice warriors
    ///
    /// `None` means any living warrior on the board is noticed.
    pub collector_detection_range: Option<u32>,
}

/// Pairwise meeting tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Probability an explorer is willing to trade on a given meeting
    pub explorer_trade_chance: f64,

    /// Sub-interactions a meeting runs after trade/combat
    ///
    /// Each round may move one coin between the pair; two coins moved in one
    /// meeting produce a birth. Zero disables reproduction.
    pub exchange_rounds: u32,
}

/// Global event tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Probability that some event fires on a turn
    pub event_chance: f64,

    /// Coins dropped by rain
    pub rain_deposits: u32,

    pub rain_value_range: ValueRange,

    /// Vitality every living agent loses in an earthquake
    pub earthquake_damage: i32,

    /// Per-agent probability of dying in a plague
    pub plague_chance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            seed: None,
            turns: 200,
            initial_population: 30,
            roles: Role::ALL.iter().copied().map(RoleProfile::with_defaults).collect(),
            territories: default_territories(),
            deposits: DepositConfig::default(),
            movement: MovementConfig::default(),
            interaction: InteractionConfig::default(),
            events: EventConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
        }
    }
}

impl Default for DepositConfig {
    fn default() -> Self {
        Self {
            initial_count: 50,
            value_range: ValueRange::new(1, 5),
            mountain_value_range: ValueRange::new(3, 10),
        }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            hoarder_chase_chance: 0.4,
            forest_stall_chance: 0.5,
            collector_detection_range: None,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            explorer_trade_chance: 0.2,
            exchange_rounds: 3,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            event_chance: 0.05,
            rain_deposits: 10,
            rain_value_range: ValueRange::new(1, 5),
            earthquake_damage: 3,
            plague_chance: 0.10,
        }
    }
}

/// Forest top-left, city in the middle, mountains bottom-right
fn default_territories() -> Vec<Territory> {
    vec![
        Territory::new("Shadowed Wood", TerritoryKind::Forest, (0, 6), (0, 6)),
        Territory::new("Central City", TerritoryKind::City, (7, 12), (7, 12)),
        Territory::new("Rocky Peaks", TerritoryKind::Mountain, (13, 19), (13, 19)),
    ]
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world.width, self.world.height)
    }

    pub fn role_profile(&self, role: Role) -> Option<&RoleProfile> {
        self.roles.iter().find(|p| p.role == role)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(invalid(format!(
                "world dimensions must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }

        if self.roles.is_empty() {
            return Err(invalid("at least one role is required"));
        }
        let mut seen = HashSet::new();
        for profile in &self.roles {
            if !seen.insert(profile.role) {
                return Err(invalid(format!("role '{}' is listed twice", profile.role)));
            }
        }

        // Every role is subject to the forest modifier
        if self.territories.is_empty() {
            return Err(invalid("at least one territory is required"));
        }
        let bounds = self.bounds();
        for territory in &self.territories {
            if let Some(problem) = territory.check(bounds) {
                return Err(invalid(problem));
            }
        }

        for (label, range) in [
            ("deposits.value_range", self.deposits.value_range),
            ("deposits.mountain_value_range", self.deposits.mountain_value_range),
            ("events.rain_value_range", self.events.rain_value_range),
        ] {
            if !range.is_valid() {
                return Err(invalid(format!(
                    "{} must satisfy 1 <= min <= max, got {}..={}",
                    label, range.min, range.max
                )));
            }
        }

        for (label, p) in [
            ("movement.hoarder_chase_chance", self.movement.hoarder_chase_chance),
            ("movement.forest_stall_chance", self.movement.forest_stall_chance),
            ("interaction.explorer_trade_chance", self.interaction.explorer_trade_chance),
            ("events.event_chance", self.events.event_chance),
            ("events.plague_chance", self.events.plague_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{} must be within [0, 1], got {}", label, p)));
            }
        }

        if self.events.earthquake_damage < 0 {
            return Err(invalid("events.earthquake_damage must not be negative"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SimError {
    SimError::InvalidConfig(message.into())
}
