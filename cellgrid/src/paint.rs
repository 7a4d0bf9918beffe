// paint.rs - Cell mutations requested by the input layer

use crate::grid::Coord;
use crate::liquid::Volume;

/// A single edit to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOp {
    SetAlive(bool),       // life cells
    AddVolume(Volume),    // liquid cells
    SetWall(bool),        // liquid cells
}

/// A `PaintOp` aimed at a grid coordinate, as queued between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub at: Coord,
    pub op: PaintOp,
}

impl Paint {
    pub fn new(x: usize, y: usize, op: PaintOp) -> Self {
        Self { at: (x, y), op }
    }
}

/// Cells that know how to apply a `PaintOp` to themselves.
pub trait Paintable {
    /// Applies `op`, returning `false` when it does not apply to this kind
    /// of cell.
    fn paint(&mut self, op: PaintOp) -> bool;
}
