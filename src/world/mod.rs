//! Static board features: territories and coin deposits

pub mod deposits;
pub mod territory;

pub use deposits::{CoinDeposits, ValueRange};
pub use territory::{territory_at, Territory, TerritoryKind};
