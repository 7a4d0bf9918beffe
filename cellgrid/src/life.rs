// life.rs - Conway's Game of Life (B3/S23) on a bounded grid

use crate::grid::{Coord, Grid};
use crate::neighbors::NeighborIndex;
use crate::paint::{PaintOp, Paintable};
use crate::rule::RuleSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LifeCell {
    #[default]
    Dead,
    Alive,
}

impl LifeCell {
    pub fn is_alive(self) -> bool {
        self == LifeCell::Alive
    }
}

impl From<bool> for LifeCell {
    fn from(alive: bool) -> Self {
        if alive { LifeCell::Alive } else { LifeCell::Dead }
    }
}

impl Paintable for LifeCell {
    fn paint(&mut self, op: PaintOp) -> bool {
        match op {
            PaintOp::SetAlive(alive) => {
                *self = alive.into();
                true
            }
            PaintOp::AddVolume(_) | PaintOp::SetWall(_) => false,
        }
    }
}

/// Next state of a cell from its state and its live-neighbour count.
pub fn next_state(cell: LifeCell, live_neighbors: usize) -> LifeCell {
    match (cell.is_alive(), live_neighbors) {
        (true, 2) | (true, 3) => LifeCell::Alive,   // Survival
        (false, 3)            => LifeCell::Alive,   // Birth
        _                     => LifeCell::Dead,    // Death or stays dead
    }
}

/// Live neighbours of `(x, y)` in `grid`. Cells past the edge count as dead.
pub fn live_neighbors(grid: &Grid<LifeCell>, neighbors: &NeighborIndex, (x, y): Coord) -> usize {
    neighbors
        .neighbors_of(x, y)
        .iter()
        .filter(|&&at| grid[at].is_alive())
        .count()
}

/// Binary life rule. Every cell of the off-buffer is overwritten each tick,
/// so neither `prepare` nor `commit` has work to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifeRule;

impl RuleSet for LifeRule {
    type Cell = LifeCell;

    fn evaluate(
        &self,
        at: Coord,
        current: &Grid<LifeCell>,
        neighbors: &NeighborIndex,
        next: &mut Grid<LifeCell>,
    ) {
        let count = live_neighbors(current, neighbors, at);
        next[at] = next_state(current[at], count);
    }
}
