//! Pairwise interaction resolution
//!
//! Co-located living agents meet pair by pair. A meeting tries trade first;
//! without a trade the pair fights one exchange. If both are still standing
//! they run the meeting's exchange rounds, which can produce a birth. Fog
//! suppresses all of it.

pub mod combat;
pub mod constants;
pub mod encounter;
pub mod trade;

pub use combat::{resolve_combat, win_probability, CombatOutcome};
pub use encounter::{run_exchange_rounds, Birth, EncounterSession, ExchangeAction};
pub use trade::{resolve_trade, wants_to_trade};

use crate::core::config::InteractionConfig;
use crate::core::random::PseudoRandom;
use crate::entity::agent::Agent;
use crate::simulation::events::TurnConditions;

/// Everything that came out of one pairwise meeting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingOutcome {
    pub traded: bool,
    pub combat: Option<CombatOutcome>,
    pub birth: Option<Birth>,
}

/// Resolve a meeting between two living agents on the same cell
pub fn resolve_meeting(
    first: &mut Agent,
    second: &mut Agent,
    conditions: TurnConditions,
    rules: &InteractionConfig,
    rng: &mut PseudoRandom,
) -> MeetingOutcome {
    let mut outcome = MeetingOutcome {
        traded: resolve_trade(first, second, conditions.fog, rules.explorer_trade_chance, rng),
        ..Default::default()
    };

    if conditions.fog {
        return outcome;
    }

    if !outcome.traded {
        outcome.combat = Some(resolve_combat(first, second, rng));
    }

    if first.is_alive() && second.is_alive() {
        let mut session = EncounterSession::open(first.id, second.id, first.position);
        outcome.birth =
            run_exchange_rounds(&mut session, first, second, rules.exchange_rounds, rng);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Position};
    use crate::entity::role::Role;

    fn agent(id: u32, role: Role, wealth: u32) -> Agent {
        Agent::new(AgentId(id), format!("A{}", id), Position::new(1, 1), role, 10)
            .with_wealth(wealth)
            .with_items(role.default_items())
    }

    #[test]
    fn test_fog_suppresses_everything() {
        let rules = InteractionConfig::default();
        let fog = TurnConditions { fog: true, market: false };
        let mut rng = PseudoRandom::seeded(4);

        for _ in 0..100 {
            let mut a = agent(1, Role::Warrior, 5);
            let mut b = agent(2, Role::Trader, 5);
            let outcome = resolve_meeting(&mut a, &mut b, fog, &rules, &mut rng);
            assert_eq!(outcome, MeetingOutcome::default());
            assert_eq!((a.fights, b.fights, a.trades, b.trades), (0, 0, 0, 0));
            assert_eq!((a.vitality, b.vitality), (10, 10));
        }
    }

    #[test]
    fn test_trade_skips_combat() {
        let rules = InteractionConfig {
            exchange_rounds: 0,
            ..Default::default()
        };
        let mut rng = PseudoRandom::seeded(4);
        let mut a = agent(1, Role::Trader, 5);
        let mut b = agent(2, Role::Trader, 5);

        let outcome = resolve_meeting(&mut a, &mut b, TurnConditions::default(), &rules, &mut rng);

        assert!(outcome.traded);
        assert!(outcome.combat.is_none());
        assert_eq!(a.fights, 0);
    }

    #[test]
    fn test_unwilling_pair_fights() {
        let rules = InteractionConfig {
            exchange_rounds: 0,
            ..Default::default()
        };
        let mut rng = PseudoRandom::seeded(4);
        let mut a = agent(1, Role::Warrior, 5);
        let mut b = agent(2, Role::Hoarder, 5);

        let outcome = resolve_meeting(&mut a, &mut b, TurnConditions::default(), &rules, &mut rng);

        assert!(!outcome.traded);
        assert!(outcome.combat.is_some());
        assert_eq!((a.fights, b.fights), (1, 1));
    }

    #[test]
    fn test_fatal_combat_skips_exchange_rounds() {
        let rules = InteractionConfig::default();
        let mut rng = PseudoRandom::seeded(4);
        let mut a = agent(1, Role::Warrior, 50);
        let mut b = agent(2, Role::Warrior, 50);
        a.vitality = 1_000_000;
        b.vitality = 1;

        let outcome = resolve_meeting(&mut a, &mut b, TurnConditions::default(), &rules, &mut rng);

        assert!(outcome.combat.unwrap().fatal);
        assert!(outcome.birth.is_none());
        assert_eq!(a.wealth + b.wealth, 100);
    }
}
