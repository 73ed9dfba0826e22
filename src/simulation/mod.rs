//! Simulation systems - the turn loop and everything it reads or records

pub mod engine;
pub mod events;
pub mod movement;
pub mod output;
pub mod statistics;
pub mod tick;

pub use engine::SimulationEngine;
pub use events::{EventLog, TurnConditions, WorldEvent};
pub use movement::{decide_movement, MovementContext, WorldView};
pub use output::{RunSummary, SimulationOutput, TurnSnapshot};
pub use statistics::RunStatistics;
pub use tick::{run_turn, TurnReport};
