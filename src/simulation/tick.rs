//! Turn system - runs the eight phases of one turn in order
//!
//! event -> territory labels -> movement -> pickup -> grouping ->
//! pairwise meetings -> births -> statistics
//!
//! Every phase completes before the next starts. Movement reads a view of the
//! board taken before anyone moves; births join the population only after
//! all meetings are resolved, so newborns act from the next turn.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::error::{Result, SimError};
use crate::core::types::{AgentId, Position, Turn};
use crate::entity::agent::Agent;
use crate::interaction::constants::{BIRTH_ITEM, BIRTH_VITALITY};
use crate::interaction::{resolve_meeting, Birth};
use crate::simulation::engine::SimulationEngine;
use crate::simulation::events::{apply_event, roll_event, TurnConditions, WorldEvent};
use crate::simulation::movement::{decide_movement, MovementContext, WorldView};
use crate::world::territory::territory_at;

/// What happened during one turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnReport {
    /// 1-based number of the turn just completed
    pub turn: Turn,
    pub event: Option<WorldEvent>,
    pub deaths: Vec<AgentId>,
    pub births: Vec<AgentId>,
    pub encounters: Vec<(AgentId, AgentId)>,
    pub trades: u32,
    pub fights: u32,
}

/// Run one full turn
pub fn run_turn(engine: &mut SimulationEngine) -> Result<TurnReport> {
    let mut report = TurnReport {
        turn: engine.turn + 1,
        ..Default::default()
    };

    // 1. Global event
    let conditions = resolve_event(engine, &mut report);

    // 2. Territory labels
    update_territories(engine);

    // 3. Movement
    move_agents(engine)?;

    // 4. Coin pickup
    collect_coins(engine);

    // 5-6. Group by cell, resolve meetings
    let births = resolve_meetings(engine, conditions, &mut report);

    // 7. Births join the population
    spawn_births(engine, births, &mut report)?;

    // 8. Statistics
    engine.statistics.record_turn(&engine.population);

    engine.turn = report.turn;
    engine.last_event = report.event;
    engine.last_encounters = report.encounters.clone();

    Ok(report)
}

fn resolve_event(engine: &mut SimulationEngine, report: &mut TurnReport) -> TurnConditions {
    let event = match engine.scheduled.take() {
        Some(forced) => Some(forced),
        None => roll_event(&mut engine.rng, &engine.config.events),
    };
    report.event = event;

    let Some(event) = event else {
        return TurnConditions::default();
    };

    let outcome = apply_event(
        event,
        &mut engine.population,
        &mut engine.deposits,
        engine.bounds,
        &engine.config.territories,
        &engine.config.events,
        &mut engine.rng,
    );

    let mut casualties = Vec::with_capacity(outcome.deaths.len());
    for idx in outcome.deaths {
        let agent = &engine.population[idx];
        engine.statistics.record_death(agent, &engine.config.territories);
        casualties.push(agent.id);
    }

    debug!(turn = report.turn, ?event, casualties = casualties.len(), "Event fired");
    report.deaths.extend(casualties.iter().copied());
    engine.events.record(report.turn, event, casualties);

    TurnConditions::from_event(Some(event))
}

fn update_territories(engine: &mut SimulationEngine) {
    let territories = &engine.config.territories;
    for agent in engine.population.iter_mut().filter(|a| a.is_alive()) {
        agent.territory = territory_at(territories, agent.position).map(|t| t.name.clone());
    }
}

fn move_agents(engine: &mut SimulationEngine) -> Result<()> {
    let view = WorldView::capture(&engine.population);
    let ctx = MovementContext {
        view: &view,
        deposits: &engine.deposits,
        territories: &engine.config.territories,
        bounds: engine.bounds,
        config: &engine.config.movement,
    };

    for idx in engine.population.living_indices() {
        let Some(agent) = engine.population.get_mut(idx) else {
            continue;
        };
        let delta = decide_movement(agent, &ctx, &mut engine.rng);
        agent.move_by(delta, ctx.bounds);

        if !ctx.bounds.contains(agent.position) {
            error!(agent = %agent.id, position = %agent.position, "Agent left the board");
            return Err(SimError::OutOfBounds {
                agent: agent.id,
                position: agent.position,
                width: ctx.bounds.width,
                height: ctx.bounds.height,
            });
        }
    }

    Ok(())
}

fn collect_coins(engine: &mut SimulationEngine) {
    for agent in engine.population.iter_mut().filter(|a| a.is_alive()) {
        if let Some(value) = engine.deposits.take(agent.position) {
            agent.gain_wealth(value);
        }
    }
}

/// Population indices of living agents per cell
///
/// Groups appear in the order their first member appears in the population.
fn group_by_cell(engine: &SimulationEngine) -> Vec<Vec<usize>> {
    let mut slot: AHashMap<Position, usize> = AHashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for idx in engine.population.living_indices() {
        let pos = engine.population[idx].position;
        let at = *slot.entry(pos).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[at].push(idx);
    }

    groups
}

fn resolve_meetings(
    engine: &mut SimulationEngine,
    conditions: TurnConditions,
    report: &mut TurnReport,
) -> Vec<Birth> {
    let mut births = Vec::new();

    for group in group_by_cell(engine).into_iter().filter(|g| g.len() >= 2) {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let Some((first, second)) = engine.population.pair_mut(group[i], group[j]) else {
                    continue;
                };
                if !(first.is_alive() && second.is_alive()) {
                    continue;
                }

                report.encounters.push((first.id, second.id));
                let outcome = resolve_meeting(
                    first,
                    second,
                    conditions,
                    &engine.config.interaction,
                    &mut engine.rng,
                );

                if outcome.traded {
                    report.trades += 1;
                    engine.statistics.total_trades += 1;
                }

                if let Some(combat) = outcome.combat {
                    report.fights += 1;
                    engine.statistics.total_fights += 1;

                    if combat.fatal {
                        let fallen: &Agent = if combat.struck == first.id { first } else { second };
                        debug!(
                            turn = report.turn,
                            agent = %fallen.id,
                            winner = ?combat.winner,
                            "Killed in combat"
                        );
                        engine.statistics.record_death(fallen, &engine.config.territories);
                        report.deaths.push(fallen.id);
                    }
                }

                births.extend(outcome.birth);
            }
        }
    }

    births
}

fn spawn_births(
    engine: &mut SimulationEngine,
    births: Vec<Birth>,
    report: &mut TurnReport,
) -> Result<()> {
    for birth in births {
        let role = engine.draw_role()?;
        let id = engine.population.next_id();
        engine.newborns += 1;

        let name = format!("Newborn {}", engine.newborns);
        let child = Agent::new(id, name, birth.cell, role, BIRTH_VITALITY)
            .with_items([BIRTH_ITEM.to_string()]);
        engine.population.push(child);
        engine.statistics.births += 1;
        report.births.push(id);

        debug!(turn = report.turn, agent = %id, %role, cell = %birth.cell, "Birth");
    }
    Ok(())
}
