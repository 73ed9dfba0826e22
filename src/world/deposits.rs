//! Coin deposits scattered on the board

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::random::PseudoRandom;
use crate::core::types::{Position, WorldBounds};
use crate::world::territory::{territory_at, Territory, TerritoryKind};

/// Inclusive range of coin values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }

    pub fn sample(&self, rng: &mut PseudoRandom) -> u32 {
        rng.range_inclusive(self.min, self.max)
    }
}

/// Deposits keyed by cell
///
/// Iteration is in `Position` order, which makes "nearest deposit" ties
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct CoinDeposits {
    cells: BTreeMap<Position, Vec<u32>>,
}

impl CoinDeposits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one coin of `amount` at `pos`; earlier coins on the cell stay
    pub fn add(&mut self, pos: Position, amount: u32) {
        self.cells.entry(pos).or_default().push(amount);
    }

    /// Remove the whole cell and return its summed value
    pub fn take(&mut self, pos: Position) -> Option<u32> {
        self.cells.remove(&pos).map(|coins| coins.iter().sum())
    }

    pub fn get(&self, pos: Position) -> Option<&[u32]> {
        self.cells.get(&pos).map(Vec::as_slice)
    }

    /// Closest deposit by straight-line Manhattan distance
    pub fn nearest(&self, from: Position) -> Option<Position> {
        self.cells
            .keys()
            .min_by_key(|pos| pos.manhattan(&from))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &[u32])> {
        self.cells.iter().map(|(pos, coins)| (*pos, coins.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn total_value(&self) -> u64 {
        self.cells
            .values()
            .flatten()
            .map(|&v| u64::from(v))
            .sum()
    }

    /// Drop `count` coins at uniformly random cells
    ///
    /// Cells inside a mountain territory draw from `mountain_range` when one is
    /// given; everything else draws from `range`.
    pub fn scatter(
        &mut self,
        count: u32,
        bounds: WorldBounds,
        territories: &[Territory],
        range: ValueRange,
        mountain_range: Option<ValueRange>,
        rng: &mut PseudoRandom,
    ) {
        for _ in 0..count {
            let x = rng.index_below(bounds.width as usize) as u32;
            let y = rng.index_below(bounds.height as usize) as u32;
            let pos = Position::new(x, y);

            let in_mountain = territory_at(territories, pos)
                .map(|t| t.kind == TerritoryKind::Mountain)
                .unwrap_or(false);

            let value = match mountain_range {
                Some(rich) if in_mountain => rich.sample(rng),
                _ => range.sample(rng),
            };
            self.add(pos, value);
        }
    }
}
