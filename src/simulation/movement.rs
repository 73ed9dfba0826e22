//! Movement policy - role-dispatched choice of one step per turn
//!
//! Decisions read a `WorldView` captured before anyone moves, so the order in
//! which agents commit their steps can't bias what later agents see.

use crate::core::config::MovementConfig;
use crate::core::random::PseudoRandom;
use crate::core::types::{AgentId, Delta, Position, WorldBounds};
use crate::entity::agent::Agent;
use crate::entity::population::Population;
use crate::entity::role::Role;
use crate::world::deposits::CoinDeposits;
use crate::world::territory::{territory_at, Territory, TerritoryKind};

/// A living agent as seen at the start of the movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    pub id: AgentId,
    pub position: Position,
    pub role: Role,
}

/// Positions and roles of every living agent, in population order
#[derive(Debug, Clone, Default)]
pub struct WorldView {
    sightings: Vec<Sighting>,
}

impl WorldView {
    pub fn capture(population: &Population) -> Self {
        Self {
            sightings: population
                .iter_living()
                .map(|a| Sighting {
                    id: a.id,
                    position: a.position,
                    role: a.role,
                })
                .collect(),
        }
    }

    pub fn from_sightings(sightings: Vec<Sighting>) -> Self {
        Self { sightings }
    }

    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }

    /// Nearest other agent passing `filter`; ties go to population order
    pub fn nearest(
        &self,
        viewer: AgentId,
        from: Position,
        filter: impl Fn(&Sighting) -> bool,
    ) -> Option<Sighting> {
        self.sightings
            .iter()
            .filter(|&s| s.id != viewer && filter(s))
            .min_by_key(|s| s.position.manhattan(&from))
            .copied()
    }
}

/// Read-only inputs shared by every decision in one movement phase
pub struct MovementContext<'a> {
    pub view: &'a WorldView,
    pub deposits: &'a CoinDeposits,
    pub territories: &'a [Territory],
    pub bounds: WorldBounds,
    pub config: &'a MovementConfig,
}

/// Choose this turn's step for a living agent
pub fn decide_movement(agent: &Agent, ctx: &MovementContext<'_>, rng: &mut PseudoRandom) -> Delta {
    let delta = match agent.role {
        Role::Warrior => warrior_step(agent, ctx, rng),
        Role::Trader => trader_step(agent, ctx, rng),
        Role::Collector => collector_step(agent, ctx, rng),
        Role::Explorer => explorer_step(agent, ctx, rng),
        Role::Hoarder => hoarder_step(agent, ctx, rng),
    };
    apply_terrain(agent, delta, ctx, rng)
}

fn random_step(rng: &mut PseudoRandom) -> Delta {
    Delta::ALL[rng.index_below(Delta::ALL.len())]
}

fn toward_or_random(from: Position, target: Option<Position>, rng: &mut PseudoRandom) -> Delta {
    match target {
        Some(target) => Delta::toward(from, target),
        None => random_step(rng),
    }
}

fn warrior_step(agent: &Agent, ctx: &MovementContext<'_>, rng: &mut PseudoRandom) -> Delta {
    let prey = ctx.view.nearest(agent.id, agent.position, |_| true);
    toward_or_random(agent.position, prey.map(|s| s.position), rng)
}

fn trader_step(agent: &Agent, ctx: &MovementContext<'_>, rng: &mut PseudoRandom) -> Delta {
    let partner = ctx
        .view
        .nearest(agent.id, agent.position, |s| s.role != Role::Warrior)
        .or_else(|| ctx.view.nearest(agent.id, agent.position, |_| true));
    toward_or_random(agent.position, partner.map(|s| s.position), rng)
}

fn collector_step(agent: &Agent, ctx: &MovementContext<'_>, rng: &mut PseudoRandom) -> Delta {
    let from = agent.position;
    let threat = ctx.view.nearest(agent.id, from, |s| s.role == Role::Warrior).filter(|s| {
        ctx.config
            .collector_detection_range
            .map_or(true, |range| s.position.manhattan(&from) <= range)
    });

    if let Some(warrior) = threat {
        return Delta::away(from, warrior.position);
    }
    toward_or_random(from, ctx.deposits.nearest(from), rng)
}

fn explorer_step(agent: &Agent, ctx: &MovementContext<'_>, rng: &mut PseudoRandom) -> Delta {
    let fresh: Vec<Delta> = Delta::ALL
        .iter()
        .copied()
        .filter(|&d| !agent.has_visited(ctx.bounds.wrap(agent.position, d)))
        .collect();

    match rng.choose(&fresh) {
        Some(&delta) => delta,
        None => random_step(rng),
    }
}

fn hoarder_step(agent: &Agent, ctx: &MovementContext<'_>, rng: &mut PseudoRandom) -> Delta {
    let chase = rng.chance(ctx.config.hoarder_chase_chance);
    match ctx.deposits.nearest(agent.position) {
        Some(coin) if chase => Delta::toward(agent.position, coin),
        _ => Delta::ORTHOGONAL[rng.index_below(Delta::ORTHOGONAL.len())],
    }
}

/// Forest cells stall movement half the time
fn apply_terrain(
    agent: &Agent,
    delta: Delta,
    ctx: &MovementContext<'_>,
    rng: &mut PseudoRandom,
) -> Delta {
    let in_forest = territory_at(ctx.territories, agent.position)
        .map(|t| t.kind == TerritoryKind::Forest)
        .unwrap_or(false);

    if in_forest && rng.chance(ctx.config.forest_stall_chance) {
        Delta::STAY
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        view: WorldView,
        deposits: CoinDeposits,
        territories: Vec<Territory>,
        config: MovementConfig,
        bounds: WorldBounds,
    }

    impl Fixture {
        fn new(bounds: WorldBounds) -> Self {
            Self {
                view: WorldView::default(),
                deposits: CoinDeposits::new(),
                territories: Vec::new(),
                config: MovementConfig::default(),
                bounds,
            }
        }

        fn see(mut self, id: u32, x: u32, y: u32, role: Role) -> Self {
            self.view.sightings.push(Sighting {
                id: AgentId(id),
                position: Position::new(x, y),
                role,
            });
            self
        }

        fn ctx(&self) -> MovementContext<'_> {
            MovementContext {
                view: &self.view,
                deposits: &self.deposits,
                territories: &self.territories,
                bounds: self.bounds,
                config: &self.config,
            }
        }
    }

    fn agent(role: Role, x: u32, y: u32) -> Agent {
        Agent::new(AgentId(0), "Me", Position::new(x, y), role, 10)
    }

    #[test]
    fn test_warrior_steps_toward_nearest() {
        let fx = Fixture::new(WorldBounds::new(20, 20))
            .see(0, 5, 5, Role::Warrior)
            .see(1, 15, 15, Role::Trader)
            .see(2, 7, 3, Role::Hoarder);
        let me = agent(Role::Warrior, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(1, -1));
    }

    #[test]
    fn test_nearest_tie_goes_to_population_order() {
        let fx = Fixture::new(WorldBounds::new(20, 20))
            .see(1, 4, 5, Role::Trader)
            .see(2, 6, 5, Role::Trader);
        let me = agent(Role::Warrior, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(-1, 0));
    }

    #[test]
    fn test_lonely_warrior_moves_randomly_within_options() {
        let fx = Fixture::new(WorldBounds::new(20, 20)).see(0, 5, 5, Role::Warrior);
        let me = agent(Role::Warrior, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        for _ in 0..50 {
            assert!(Delta::ALL.contains(&decide_movement(&me, &fx.ctx(), &mut rng)));
        }
    }

    #[test]
    fn test_trader_prefers_non_warriors() {
        let fx = Fixture::new(WorldBounds::new(20, 20))
            .see(1, 6, 5, Role::Warrior)
            .see(2, 5, 9, Role::Collector);
        let me = agent(Role::Trader, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(0, 1));
    }

    #[test]
    fn test_trader_falls_back_to_warrior() {
        let fx = Fixture::new(WorldBounds::new(20, 20)).see(1, 2, 2, Role::Warrior);
        let me = agent(Role::Trader, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(-1, -1));
    }

    #[test]
    fn test_collector_flees_warrior_over_coins() {
        let mut fx = Fixture::new(WorldBounds::new(20, 20)).see(1, 7, 5, Role::Warrior);
        fx.deposits.add(Position::new(9, 5), 4);
        let me = agent(Role::Collector, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(-1, 0));
    }

    #[test]
    fn test_collector_ignores_warrior_outside_detection_range() {
        let mut fx = Fixture::new(WorldBounds::new(20, 20)).see(1, 15, 5, Role::Warrior);
        fx.config.collector_detection_range = Some(3);
        fx.deposits.add(Position::new(5, 8), 4);
        let me = agent(Role::Collector, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(0, 1));
    }

    #[test]
    fn test_collector_seeks_coins_without_threat() {
        let mut fx = Fixture::new(WorldBounds::new(20, 20));
        fx.deposits.add(Position::new(2, 9), 1);
        let me = agent(Role::Collector, 5, 5);
        let mut rng = PseudoRandom::seeded(0);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(-1, 1));
    }

    #[test]
    fn test_explorer_only_picks_unvisited() {
        let fx = Fixture::new(WorldBounds::new(10, 10));
        let mut me = agent(Role::Explorer, 5, 5);
        // visit everything around except (6, 6)
        for d in Delta::ALL {
            if d != Delta::new(1, 1) {
                me.position = fx.bounds.wrap(Position::new(5, 5), d);
                me.mark_visited();
            }
        }
        me.position = Position::new(5, 5);
        let mut rng = PseudoRandom::seeded(0);

        for _ in 0..20 {
            assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(1, 1));
        }
    }

    #[test]
    fn test_explorer_falls_back_when_all_visited() {
        // 4x4 board, every neighbour of (0, 0) already visited
        let fx = Fixture::new(WorldBounds::new(4, 4));
        let mut me = agent(Role::Explorer, 0, 0);
        for d in Delta::ALL {
            me.position = fx.bounds.wrap(Position::new(0, 0), d);
            me.mark_visited();
        }
        me.position = Position::new(0, 0);
        let mut rng = PseudoRandom::seeded(3);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            let d = decide_movement(&me, &fx.ctx(), &mut rng);
            assert!(Delta::ALL.contains(&d));
            seen.insert(d);
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_hoarder_without_coins_moves_orthogonally() {
        let fx = Fixture::new(WorldBounds::new(20, 20));
        let me = agent(Role::Hoarder, 5, 5);
        let mut rng = PseudoRandom::seeded(2);

        for _ in 0..100 {
            assert!(Delta::ORTHOGONAL.contains(&decide_movement(&me, &fx.ctx(), &mut rng)));
        }
    }

    #[test]
    fn test_hoarder_always_chases_when_certain() {
        let mut fx = Fixture::new(WorldBounds::new(20, 20));
        fx.config.hoarder_chase_chance = 1.0;
        fx.deposits.add(Position::new(8, 8), 2);
        let me = agent(Role::Hoarder, 5, 5);
        let mut rng = PseudoRandom::seeded(2);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(1, 1));
    }

    #[test]
    fn test_certain_forest_stall_stays() {
        let mut fx = Fixture::new(WorldBounds::new(20, 20)).see(1, 9, 9, Role::Trader);
        fx.territories
            .push(Territory::new("Wood", TerritoryKind::Forest, (0, 6), (0, 6)));
        fx.config.forest_stall_chance = 1.0;
        let me = agent(Role::Warrior, 5, 5);
        let mut rng = PseudoRandom::seeded(2);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::STAY);
    }

    #[test]
    fn test_city_does_not_stall() {
        let mut fx = Fixture::new(WorldBounds::new(20, 20)).see(1, 9, 9, Role::Trader);
        fx.territories
            .push(Territory::new("Town", TerritoryKind::City, (0, 6), (0, 6)));
        fx.config.forest_stall_chance = 1.0;
        let me = agent(Role::Warrior, 5, 5);
        let mut rng = PseudoRandom::seeded(2);

        assert_eq!(decide_movement(&me, &fx.ctx(), &mut rng), Delta::new(1, 1));
    }
}
