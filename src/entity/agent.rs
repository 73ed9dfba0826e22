//! Agent - a person on the board

use ahash::AHashSet;

use crate::core::types::{AgentId, Delta, Position, WorldBounds};
use crate::entity::role::Role;

/// A single simulated person
///
/// Death is a state transition, not a removal: dead agents stay in the
/// population with `alive == false` and are skipped by every phase.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub position: Position,
    pub role: Role,
    pub vitality: i32,
    pub wealth: u32,
    /// Acquisition order; the last item is the first traded away
    pub inventory: Vec<String>,
    pub alive: bool,
    /// Turns survived
    pub age: u32,
    pub fights: u32,
    pub fights_won: u32,
    pub trades: u32,
    /// Name of the territory the agent stood in at the start of the turn
    pub territory: Option<String>,
    visited: AHashSet<Position>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        position: Position,
        role: Role,
        vitality: i32,
    ) -> Self {
        let mut agent = Self {
            id,
            name: name.into(),
            position,
            role,
            vitality,
            wealth: 0,
            inventory: Vec::new(),
            alive: vitality > 0,
            age: 0,
            fights: 0,
            fights_won: 0,
            trades: 0,
            territory: None,
            visited: AHashSet::new(),
        };
        agent.mark_visited();
        agent
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.inventory.extend(items);
        self
    }

    pub fn with_wealth(mut self, wealth: u32) -> Self {
        self.wealth = wealth;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive && self.vitality > 0
    }

    /// Lose `amount` vitality; reaching zero or below kills permanently
    pub fn take_damage(&mut self, amount: i32) {
        self.vitality -= amount;
        if self.vitality <= 0 {
            self.alive = false;
        }
    }

    /// Lose all remaining vitality
    pub fn kill(&mut self) {
        let remaining = self.vitality;
        self.take_damage(remaining.max(1));
    }

    pub fn heal(&mut self, amount: i32) {
        if self.is_alive() {
            self.vitality += amount;
        }
    }

    pub fn gain_wealth(&mut self, amount: u32) {
        self.wealth = self.wealth.saturating_add(amount);
    }

    /// Pay `amount` if affordable; returns whether the payment happened
    pub fn spend_wealth(&mut self, amount: u32) -> bool {
        if amount <= self.wealth {
            self.wealth -= amount;
            true
        } else {
            false
        }
    }

    /// Step by `delta` with wrap-around; marks the new cell and ages one turn
    pub fn move_by(&mut self, delta: Delta, bounds: WorldBounds) {
        self.position = bounds.wrap(self.position, delta);
        self.mark_visited();
        self.age += 1;
    }

    pub fn mark_visited(&mut self) {
        self.visited.insert(self.position);
    }

    pub fn has_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn can_trade_goods(&self) -> bool {
        self.wealth > 0 && !self.inventory.is_empty()
    }
}
