pub mod agent;
pub mod population;
pub mod role;

pub use agent::Agent;
pub use population::Population;
pub use role::Role;
