//! Pairwise combat resolution
//!
//! One exchange per pair per turn: a single draw picks who is struck, the
//! struck agent loses a fixed amount of vitality, and there is a winner only
//! if that hit was fatal.

use crate::core::random::PseudoRandom;
use crate::core::types::AgentId;
use crate::entity::agent::Agent;
use crate::interaction::constants::COMBAT_DAMAGE;

/// Result of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatOutcome {
    /// The agent that took the hit
    pub struck: AgentId,
    /// Did the hit kill?
    pub fatal: bool,
    /// Set only when the hit was fatal
    pub winner: Option<AgentId>,
}

/// Probability that `first` lands the hit: its share of combined vitality
pub fn win_probability(first: &Agent, second: &Agent) -> f64 {
    let total = (first.vitality + second.vitality).max(1);
    f64::from(first.vitality) / f64::from(total)
}

/// Resolve one exchange between two living agents
///
/// Fog suppression is the caller's concern.
pub fn resolve_combat(
    first: &mut Agent,
    second: &mut Agent,
    rng: &mut PseudoRandom,
) -> CombatOutcome {
    first.fights += 1;
    second.fights += 1;

    let p_first = win_probability(first, second);

    let (winner, loser) = if rng.uniform_unit() < p_first {
        (first, second)
    } else {
        (second, first)
    };

    loser.take_damage(COMBAT_DAMAGE);

    if loser.is_alive() {
        CombatOutcome {
            struck: loser.id,
            fatal: false,
            winner: None,
        }
    } else {
        winner.fights_won += 1;
        CombatOutcome {
            struck: loser.id,
            fatal: true,
            winner: Some(winner.id),
        }
    }
}
