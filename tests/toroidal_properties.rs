//! Board invariants: wrapping never leaves the torus, whole runs keep every
//! agent on the board.

use persona_grid::core::config::{SimulationConfig, WorldConfig};
use persona_grid::core::types::{Delta, Position, WorldBounds};
use persona_grid::simulation::SimulationEngine;
use persona_grid::world::territory::{Territory, TerritoryKind};
use proptest::prelude::*;

fn delta_strategy() -> impl Strategy<Value = Delta> {
    prop::sample::select(Delta::ALL.to_vec())
}

proptest! {
    #[test]
    fn property_wrap_stays_on_board(
        width in 1_u32..64,
        height in 1_u32..64,
        x in any::<u32>(),
        y in any::<u32>(),
        steps in prop::collection::vec(delta_strategy(), 1..50),
    ) {
        let bounds = WorldBounds::new(width, height);
        let mut pos = Position::new(x % width, y % height);
        for delta in steps {
            pos = bounds.wrap(pos, delta);
            prop_assert!(bounds.contains(pos));
        }
    }

    #[test]
    fn property_step_and_back_returns_home(
        width in 1_u32..64,
        height in 1_u32..64,
        x in any::<u32>(),
        y in any::<u32>(),
        delta in delta_strategy(),
    ) {
        let bounds = WorldBounds::new(width, height);
        let home = Position::new(x % width, y % height);
        let back = Delta::new(-delta.dx, -delta.dy);

        prop_assert_eq!(bounds.wrap(bounds.wrap(home, delta), back), home);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn property_runs_keep_agents_on_board(
        seed in any::<u64>(),
        width in 2_u32..12,
        height in 2_u32..12,
        population in 1_u32..25,
        turns in 1_u32..40,
    ) {
        let config = SimulationConfig {
            world: WorldConfig { width, height },
            seed: Some(seed),
            initial_population: population,
            territories: vec![
                Territory::new("Wood", TerritoryKind::Forest, (0, 0), (0, height - 1)),
                Territory::new(
                    "Peaks",
                    TerritoryKind::Mountain,
                    (width - 1, width - 1),
                    (0, height - 1),
                ),
            ],
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();

        for _ in 0..turns {
            engine.step().unwrap();
            let bounds = engine.bounds();
            prop_assert!(engine.population().iter().all(|a| bounds.contains(a.position)));
        }

        let alive_recorded: u32 = engine
            .statistics()
            .history
            .values()
            .filter_map(|s| s.alive.last())
            .sum();
        prop_assert_eq!(alive_recorded as usize, engine.population().living_count());
    }
}
