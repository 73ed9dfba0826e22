//! One-coin, one-item barter between co-located agents

use crate::core::random::PseudoRandom;
use crate::entity::agent::Agent;
use crate::entity::role::Role;
use crate::interaction::constants::TRADE_PRICE;

/// Does `agent` want to trade right now?
///
/// Explorers consume a draw; every other role is deterministic.
pub fn wants_to_trade(agent: &Agent, explorer_chance: f64, rng: &mut PseudoRandom) -> bool {
    match agent.role {
        Role::Trader => true,
        Role::Warrior | Role::Hoarder => false,
        Role::Explorer => rng.chance(explorer_chance),
        Role::Collector => agent.can_trade_goods(),
    }
}

/// Attempt a trade; returns whether it happened
///
/// Both pay one coin, which leaves the economy, and swap their most recently
/// acquired items. The second agent's willingness is not evaluated when the
/// first declines.
pub fn resolve_trade(
    first: &mut Agent,
    second: &mut Agent,
    fogged: bool,
    explorer_chance: f64,
    rng: &mut PseudoRandom,
) -> bool {
    if fogged {
        return false;
    }

    if !(wants_to_trade(first, explorer_chance, rng)
        && wants_to_trade(second, explorer_chance, rng))
    {
        return false;
    }

    if !first.can_trade_goods() || !second.can_trade_goods() {
        return false;
    }

    let (Some(from_first), Some(from_second)) = (first.inventory.pop(), second.inventory.pop())
    else {
        return false;
    };

    first.spend_wealth(TRADE_PRICE);
    second.spend_wealth(TRADE_PRICE);

    first.inventory.push(from_second);
    second.inventory.push(from_first);

    first.trades += 1;
    second.trades += 1;

    true
}
