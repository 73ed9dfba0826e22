//! Meetings between two co-located agents and the births they produce
//!
//! A meeting is a short sequence of sub-interactions. The session tracks how
//! much wealth changed hands across all of them; once the pair has moved
//! enough coin between themselves a single child is due, no matter how many
//! rounds follow.

use crate::core::random::PseudoRandom;
use crate::core::types::{AgentId, Position};
use crate::entity::agent::Agent;
use crate::interaction::constants::{
    BIRTH_TRANSFER_THRESHOLD, COOPERATE_HEAL, DISPUTE_DAMAGE, DISPUTE_FLOOR, GIFT_AMOUNT,
};

/// Birth accounting for one pairwise meeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterSession {
    pub first: AgentId,
    pub second: AgentId,
    pub cell: Position,
    transferred: u32,
    birth_happened: bool,
}

/// A child owed to the board, spawned at the end of the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birth {
    pub cell: Position,
    pub parents: (AgentId, AgentId),
}

impl EncounterSession {
    pub fn open(first: AgentId, second: AgentId, cell: Position) -> Self {
        Self {
            first,
            second,
            cell,
            transferred: 0,
            birth_happened: false,
        }
    }

    pub fn transferred(&self) -> u32 {
        self.transferred
    }

    pub fn birth_happened(&self) -> bool {
        self.birth_happened
    }

    /// Add `amount` to the running total
    ///
    /// Returns the birth this transfer triggers, at most once per session.
    pub fn record_transfer(&mut self, amount: u32) -> Option<Birth> {
        self.transferred = self.transferred.saturating_add(amount);
        if self.transferred >= BIRTH_TRANSFER_THRESHOLD && !self.birth_happened {
            self.birth_happened = true;
            Some(Birth {
                cell: self.cell,
                parents: (self.first, self.second),
            })
        } else {
            None
        }
    }
}

/// One sub-interaction of a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeAction {
    /// Both gain vitality
    Cooperate,
    /// Both lose vitality, never below the floor
    Dispute,
    /// One item changes hands
    ShareItem,
    /// One coin changes hands
    Gift,
}

impl ExchangeAction {
    pub const ALL: [ExchangeAction; 4] = [
        ExchangeAction::Cooperate,
        ExchangeAction::Dispute,
        ExchangeAction::ShareItem,
        ExchangeAction::Gift,
    ];
}

/// Run `rounds` exchange actions between a living pair
///
/// Returns the birth the meeting produced, if any.
pub fn run_exchange_rounds(
    session: &mut EncounterSession,
    first: &mut Agent,
    second: &mut Agent,
    rounds: u32,
    rng: &mut PseudoRandom,
) -> Option<Birth> {
    let mut birth = None;

    for _ in 0..rounds {
        let action = ExchangeAction::ALL[rng.index_below(ExchangeAction::ALL.len())];
        if let Some(moved) = apply_exchange(action, first, second, rng) {
            if let Some(b) = session.record_transfer(moved) {
                birth = Some(b);
            }
        }
    }

    birth
}

/// Apply one action; returns the coin moved, if any
fn apply_exchange(
    action: ExchangeAction,
    first: &mut Agent,
    second: &mut Agent,
    rng: &mut PseudoRandom,
) -> Option<u32> {
    match action {
        ExchangeAction::Cooperate => {
            first.heal(COOPERATE_HEAL);
            second.heal(COOPERATE_HEAL);
            None
        }
        ExchangeAction::Dispute => {
            for agent in [first, second] {
                if agent.vitality - DISPUTE_DAMAGE >= DISPUTE_FLOOR {
                    agent.take_damage(DISPUTE_DAMAGE);
                }
            }
            None
        }
        ExchangeAction::ShareItem => {
            if let Some(item) = first.inventory.pop() {
                second.inventory.push(item);
            } else if let Some(item) = second.inventory.pop() {
                first.inventory.push(item);
            }
            None
        }
        ExchangeAction::Gift => {
            // the first gives only on its flip; otherwise the second gives if it can
            if rng.index_below(2) == 0 && first.spend_wealth(GIFT_AMOUNT) {
                second.gain_wealth(GIFT_AMOUNT);
                Some(GIFT_AMOUNT)
            } else if second.spend_wealth(GIFT_AMOUNT) {
                first.gain_wealth(GIFT_AMOUNT);
                Some(GIFT_AMOUNT)
            } else {
                None
            }
        }
    }
}
