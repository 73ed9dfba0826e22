//! Behavioral roles
//!
//! A closed set: movement and trade policies `match` on it exhaustively.

use serde::{Deserialize, Serialize};

/// Role that drives an agent's movement and trade policy
///
/// Declaration order is the order roles are reported in and the tie-break
/// order for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Seeks coin deposits, flees warriors
    Collector,
    /// Hunts the nearest agent
    Warrior,
    /// Seeks non-warriors to trade with
    Trader,
    /// Prefers cells it has not visited
    Explorer,
    /// Moves little, occasionally chases coins
    Hoarder,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Collector,
        Role::Warrior,
        Role::Trader,
        Role::Explorer,
        Role::Hoarder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Collector => "collector",
            Role::Warrior => "warrior",
            Role::Trader => "trader",
            Role::Explorer => "explorer",
            Role::Hoarder => "hoarder",
        }
    }

    /// Items an agent of this role starts with unless configured otherwise
    pub fn default_items(&self) -> Vec<String> {
        let items: &[&str] = match self {
            Role::Trader | Role::Explorer => &["potion", "map"],
            Role::Warrior => &["sword"],
            Role::Collector => &["basket"],
            Role::Hoarder => &["strongbox"],
        };
        items.iter().map(|s| s.to_string()).collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
