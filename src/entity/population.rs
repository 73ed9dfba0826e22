//! Population arena
//!
//! Agents live at stable indices for the whole run. Births append; nothing is
//! ever removed, so an index taken at the start of a phase stays valid.

use crate::core::types::{AgentId, Position};
use crate::entity::agent::Agent;
use crate::entity::role::Role;

#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: Vec<Agent>,
    next_id: u32,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh unique id
    pub fn next_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Id the next call to `next_id` will hand out
    pub fn peek_next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    /// Append an agent, returning its index
    ///
    /// Ids handed out by `next_id` stay unique even if callers build agents
    /// with their own ids.
    pub fn push(&mut self, agent: Agent) -> usize {
        self.next_id = self.next_id.max(agent.id.0 + 1);
        self.agents.push(agent);
        self.agents.len() - 1
    }

    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        position: Position,
        role: Role,
        vitality: i32,
    ) -> usize {
        let id = self.next_id();
        self.push(Agent::new(id, name, position, role, vitality))
    }

    pub fn get(&self, idx: usize) -> Option<&Agent> {
        self.agents.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Agent> {
        self.agents.get_mut(idx)
    }

    pub fn find(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Two distinct agents borrowed mutably at once
    pub fn pair_mut(&mut self, first: usize, second: usize) -> Option<(&mut Agent, &mut Agent)> {
        if first == second || first >= self.agents.len() || second >= self.agents.len() {
            return None;
        }
        if first < second {
            let (low, high) = self.agents.split_at_mut(second);
            Some((&mut low[first], &mut high[0]))
        } else {
            let (low, high) = self.agents.split_at_mut(first);
            Some((&mut high[0], &mut low[second]))
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn iter_living(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.is_alive())
    }

    /// Indices of living agents in population order
    pub fn living_indices(&self) -> Vec<usize> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_alive())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.iter_living().count()
    }

    pub fn iter_role(&self, role: Role) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(move |a| a.role == role)
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Agent;

    fn index(&self, idx: usize) -> &Agent {
        &self.agents[idx]
    }
}
