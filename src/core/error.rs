use thiserror::Error;

use crate::core::types::{AgentId, Position};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Agent {agent} left the board at {position} on a {width}x{height} world")]
    OutOfBounds {
        agent: AgentId,
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
