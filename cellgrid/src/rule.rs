// rule.rs - Per-tick state transition seam

use crate::grid::{Coord, Grid};
use crate::neighbors::NeighborIndex;
use crate::paint::Paintable;

/// A cell-update rule driven by `SimulationEngine`.
///
/// One tick runs `prepare`, then `evaluate` for every coordinate in the
/// engine's fixed order, then `commit`, after which the engine swaps the
/// buffers. `current` is only ever borrowed shared while `next` is written,
/// so a rule cannot observe its own in-progress writes.
pub trait RuleSet {
    type Cell: Clone + Paintable;

    /// Readies the off-buffer before evaluation. Rules that overwrite every
    /// cell in `evaluate` can leave this empty.
    fn prepare(&self, _current: &Grid<Self::Cell>, _next: &mut Grid<Self::Cell>) {}

    /// Computes the contribution of the cell at `at` into `next`.
    fn evaluate(
        &self,
        at: Coord,
        current: &Grid<Self::Cell>,
        neighbors: &NeighborIndex,
        next: &mut Grid<Self::Cell>,
    );

    /// Finalises `next` once every cell has been evaluated.
    fn commit(&self, _next: &mut Grid<Self::Cell>) {}
}
