//! Territory - named rectangular zone with a behavioral tag

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, WorldBounds};

/// Behavioral tag of a territory
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerritoryKind {
    /// Agents standing here stall half the time
    Forest,
    City,
    /// Seeds richer coin deposits
    Mountain,
}

/// Immutable zone with inclusive bounds on both axes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub kind: TerritoryKind,
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl Territory {
    pub fn new(
        name: impl Into<String>,
        kind: TerritoryKind,
        (x_min, x_max): (u32, u32),
        (y_min, y_max): (u32, u32),
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.x_min..=self.x_max).contains(&pos.x) && (self.y_min..=self.y_max).contains(&pos.y)
    }

    /// Describe why this territory can't exist on `bounds`, if it can't
    pub fn check(&self, bounds: WorldBounds) -> Option<String> {
        if self.x_min > self.x_max || self.y_min > self.y_max {
            return Some(format!("territory '{}' has inverted bounds", self.name));
        }
        if self.x_max >= bounds.width || self.y_max >= bounds.height {
            return Some(format!(
                "territory '{}' extends past the {}x{} world",
                self.name, bounds.width, bounds.height
            ));
        }
        None
    }
}

/// First territory containing `pos`, in list order
///
/// Territories may overlap; list order is the tie-break.
pub fn territory_at(territories: &[Territory], pos: Position) -> Option<&Territory> {
    territories.iter().find(|t| t.contains(pos))
}
