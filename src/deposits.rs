use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::grid::{Grid, Symbol};
use crate::pathfinding;
use crate::types::Cell;

/// Assumed yield of a deposit before any observation exists.
pub const DEFAULT_YIELD: f64 = 20.0;

/// Process-lifetime knowledge about one material deposit.
#[derive(Clone, Debug)]
pub struct DepositRecord {
    pub visited: bool,
    pub history: Vec<i32>,
    pub distance_to_base: i32,
}

impl DepositRecord {
    /// Mean observed yield divided by the fixed distance to base.
    ///
    /// Distance is clamped to 1 so a deposit co-located with the base cannot
    /// divide by zero.
    pub fn expected_value(&self) -> f64 {
        let mean = if self.history.is_empty() {
            DEFAULT_YIELD
        } else {
            self.history.iter().sum::<i32>() as f64 / self.history.len() as f64
        };
        mean / f64::from(self.distance_to_base.max(1))
    }
}

/// Tracks every deposit discovered at game start.
///
/// Keyed by cell in a `BTreeMap` so iteration follows row-major grid order,
/// which is also the insertion order of the initial scan. Tie-breaks in
/// `best_deposit` rely on this.
#[derive(Clone, Debug)]
pub struct DepositTracker {
    records: BTreeMap<Cell, DepositRecord>,
}

impl DepositTracker {
    /// Scan the grid for deposits and compute their fixed base distances.
    ///
    /// Base distances describe static geometry, so agent avoidance is
    /// disabled here. A deposit the base cannot reach at all gets `i32::MAX`
    /// and an expected value that degrades toward zero.
    #[tracing::instrument(level = "debug", skip(grid), fields(base_row = base.row, base_col = base.col))]
    pub fn new(grid: &Grid, base: Cell) -> Self {
        let no_agents = HashSet::new();
        let mut records = BTreeMap::new();

        for (cell, symbol) in grid.iter() {
            if symbol != Symbol::Deposit {
                continue;
            }
            let distance_to_base = pathfinding::path_between(grid, &no_agents, base, cell, false)
                .map_or(i32::MAX, |path| path.len() as i32);
            debug!(?cell, distance_to_base, "Tracking deposit");
            records.insert(
                cell,
                DepositRecord {
                    visited: false,
                    history: Vec::new(),
                    distance_to_base,
                },
            );
        }

        Self { records }
    }

    pub fn is_tracked(&self, cell: &Cell) -> bool {
        self.records.contains_key(cell)
    }

    pub fn get(&self, cell: &Cell) -> Option<&DepositRecord> {
        self.records.get(cell)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn mark_visited(&mut self, cell: Cell) {
        if let Some(record) = self.records.get_mut(&cell) {
            record.visited = true;
        }
    }

    /// Append an observed yield to a deposit's history.
    ///
    /// Zero and negative deltas are never recorded; the caller credits the
    /// cell the agent stood on the previous turn.
    pub fn record_yield(&mut self, cell: Cell, delta: i32) {
        if delta <= 0 {
            return;
        }
        if let Some(record) = self.records.get_mut(&cell) {
            debug!(?cell, delta, "Recording yield");
            record.history.push(delta);
        }
    }

    /// Deposit with the highest expected value per turn.
    ///
    /// Ties keep the earliest entry in row-major order; a later deposit only
    /// displaces an earlier one by being strictly better.
    pub fn best_deposit(&self) -> Option<Cell> {
        let mut best: Option<(f64, Cell)> = None;
        for (&cell, record) in &self.records {
            let value = record.expected_value();
            if best.is_none_or(|(best_value, _)| value > best_value) {
                best = Some((value, cell));
            }
        }
        best.map(|(_, cell)| cell)
    }

    /// Closest unvisited deposit by live obstacle-avoiding path length.
    ///
    /// Falls back to the closest deposit regardless of visited status when
    /// every deposit has been visited.
    pub fn nearest_unvisited(
        &self,
        grid: &Grid,
        from: Cell,
        occupied: &HashSet<Cell>,
    ) -> Option<Cell> {
        let unvisited: Vec<Cell> = self
            .records
            .iter()
            .filter(|(_, record)| !record.visited)
            .map(|(&cell, _)| cell)
            .collect();

        if unvisited.is_empty() {
            let all: Vec<Cell> = self.records.keys().copied().collect();
            return self.nearest_among(&all, grid, from, occupied);
        }
        self.nearest_among(&unvisited, grid, from, occupied)
    }

    fn nearest_among(
        &self,
        candidates: &[Cell],
        grid: &Grid,
        from: Cell,
        occupied: &HashSet<Cell>,
    ) -> Option<Cell> {
        let mut nearest: Option<(usize, Cell)> = None;
        for &cell in candidates {
            let Some(path) = pathfinding::path_between(grid, occupied, from, cell, true) else {
                continue;
            };
            if nearest.is_none_or(|(best_len, _)| path.len() < best_len) {
                nearest = Some((path.len(), cell));
            }
        }
        nearest.map(|(_, cell)| cell)
    }
}
