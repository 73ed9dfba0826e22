//! Persona Grid - multi-agent simulation on a toroidal grid

pub mod core;
pub mod entity;
pub mod interaction;
pub mod simulation;
pub mod world;
