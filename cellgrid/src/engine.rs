// engine.rs - Double-buffered simulation driver

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::GridError;
use crate::grid::{Coord, Grid};
use crate::life::{LifeCell, LifeRule};
use crate::liquid::{LiquidCell, LiquidFlowRule, Volume};
use crate::neighbors::NeighborIndex;
use crate::paint::{Paint, PaintOp, Paintable};
use crate::rule::RuleSet;

/// Owns both grid buffers and advances them one tick at a time.
///
/// The engine is single-threaded: `tick`, `paint` and reads all take the
/// engine by reference, so a paint can only ever land between two ticks.
/// Paints arriving from an asynchronous source can instead be queued with
/// `queue_paint`; the queue is drained at the start of the next tick.
pub struct SimulationEngine<R: RuleSet> {
    rule: R,
    current: Grid<R::Cell>,
    next: Grid<R::Cell>,
    coords: Vec<Coord>,               // fixed evaluation order
    neighbors: NeighborIndex,
    pending_paint: VecDeque<Paint>,
    generation: u64,
}

impl<R: RuleSet> SimulationEngine<R> {
    pub fn new(
        rule: R,
        width: usize,
        height: usize,
        factory: impl FnMut(Coord) -> R::Cell,
    ) -> Result<Self, GridError> {
        let current = Grid::new(width, height, factory)?;
        let next = current.clone();

        // Outer loop over x, inner over y.
        let coords = (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .collect();

        log::info!("Created {width}x{height} simulation");

        Ok(Self {
            rule,
            current,
            next,
            coords,
            neighbors: NeighborIndex::new(width, height),
            pending_paint: VecDeque::new(),
            generation: 0,
        })
    }

    /// Advances every cell by one step.
    pub fn tick(&mut self) {
        self.drain_paint_queue();

        self.rule.prepare(&self.current, &mut self.next);
        for &at in &self.coords {
            self.rule.evaluate(at, &self.current, &self.neighbors, &mut self.next);
        }
        self.rule.commit(&mut self.next);

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    /// Applies `op` to the cell at `(x, y)` right away. Out-of-bounds
    /// coordinates and ops that do not fit the cell kind are ignored.
    pub fn paint(&mut self, x: usize, y: usize, op: PaintOp) -> bool {
        let Some(cell) = self.current.get_mut(x, y) else {
            log::debug!("Ignoring {op:?} outside grid at ({x}, {y})");
            return false;
        };
        let applied = cell.paint(op);
        if !applied {
            log::debug!("Ignoring {op:?} for this cell kind at ({x}, {y})");
        }
        applied
    }

    /// Defers a paint until the start of the next tick.
    pub fn queue_paint(&mut self, paint: Paint) {
        self.pending_paint.push_back(paint);
    }

    pub fn pending_paints(&self) -> usize {
        self.pending_paint.len()
    }

    fn drain_paint_queue(&mut self) {
        while let Some(Paint { at: (x, y), op }) = self.pending_paint.pop_front() {
            self.paint(x, y, op);
        }
    }

    pub fn cell_at(&self, x: usize, y: usize) -> Option<&R::Cell> {
        self.current.get(x, y)
    }

    /// Every coordinate in evaluation order.
    pub fn all_coordinates(&self) -> &[Coord] {
        &self.coords
    }

    pub fn grid(&self) -> &Grid<R::Cell> {
        &self.current
    }

    pub fn neighbors(&self) -> &NeighborIndex {
        &self.neighbors
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces every cell of the current buffer and drops queued paints.
    pub fn fill_with(&mut self, factory: impl FnMut(Coord) -> R::Cell) {
        self.current.fill_with(factory);
        self.pending_paint.clear();
        self.generation = 0;
    }
}

impl<R> SimulationEngine<R>
where
    R: RuleSet,
    R::Cell: Default,
{
    pub fn clear(&mut self) {
        self.fill_with(|_| R::Cell::default());
    }
}

impl<R> SimulationEngine<R>
where
    R: RuleSet,
    R::Cell: Hash,
{
    /// Hash of the current buffer's contents.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.current.cells().hash(&mut hasher);
        hasher.finish()
    }
}

impl SimulationEngine<LifeRule> {
    pub fn life(width: usize, height: usize) -> Result<Self, GridError> {
        Self::new(LifeRule, width, height, |_| LifeCell::Dead)
    }

    pub fn paint_set(&mut self, x: usize, y: usize, alive: bool) -> bool {
        self.paint(x, y, PaintOp::SetAlive(alive))
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.cell_at(x, y).copied() {
            Some(cell) => self.paint_set(x, y, !cell.is_alive()),
            None => false,
        }
    }

    pub fn population(&self) -> usize {
        self.current.cells().iter().filter(|cell| cell.is_alive()).count()
    }
}

impl SimulationEngine<LiquidFlowRule> {
    pub fn liquid(rule: LiquidFlowRule, width: usize, height: usize) -> Result<Self, GridError> {
        Self::new(rule, width, height, |_| LiquidCell::default())
    }

    pub fn paint_add_volume(&mut self, x: usize, y: usize, amount: Volume) -> bool {
        self.paint(x, y, PaintOp::AddVolume(amount))
    }

    pub fn paint_set_wall(&mut self, x: usize, y: usize, wall: bool) -> bool {
        self.paint(x, y, PaintOp::SetWall(wall))
    }

    pub fn total_volume(&self) -> i64 {
        self.current.cells().iter().map(|cell| i64::from(cell.volume)).sum()
    }

    pub fn wall_count(&self) -> usize {
        self.current.cells().iter().filter(|cell| cell.wall).count()
    }

    /// Swaps in a different flow table; takes effect from the next tick.
    pub fn set_rule(&mut self, rule: LiquidFlowRule) {
        self.rule = rule;
    }
}

/// Size of the fingerprint ring kept by `CycleDetector`.
pub const CYCLE_HISTORY: usize = 10;

/// Remembers the last few grid fingerprints to spot repeating boards.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: VecDeque<u64>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fingerprint`, returning `true` if it was already in the ring.
    pub fn observe(&mut self, fingerprint: u64) -> bool {
        if self.history.contains(&fingerprint) {
            log::debug!("Grid fingerprint {fingerprint:#x} repeated");
            return true;
        }
        if self.history.len() == CYCLE_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
        false
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_run_down_columns() {
        let engine = SimulationEngine::life(2, 3).unwrap();
        assert_eq!(
            engine.all_coordinates(),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(SimulationEngine::life(0, 3).is_err());
    }

    #[test]
    fn tick_counts_generations() {
        let mut engine = SimulationEngine::life(4, 4).unwrap();
        engine.tick();
        engine.tick();
        assert_eq!(engine.generation(), 2);
        engine.clear();
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn out_of_bounds_paint_is_a_no_op() {
        let mut engine = SimulationEngine::life(3, 3).unwrap();
        let before = engine.fingerprint();
        assert!(!engine.paint_set(3, 0, true));
        assert!(!engine.paint_set(0, 9, true));
        assert_eq!(engine.fingerprint(), before);
    }

    #[test]
    fn mismatched_op_is_ignored() {
        let mut engine = SimulationEngine::life(3, 3).unwrap();
        assert!(!engine.paint(1, 1, PaintOp::SetWall(true)));
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn queued_paint_lands_before_the_tick() {
        let mut engine = SimulationEngine::liquid(LiquidFlowRule::default(), 2, 2).unwrap();
        engine.queue_paint(Paint::new(0, 0, PaintOp::AddVolume(50)));
        assert_eq!(engine.pending_paints(), 1);
        assert_eq!(engine.total_volume(), 0);

        engine.tick();
        assert_eq!(engine.pending_paints(), 0);
        assert_eq!(engine.cell_at(0, 1).map(|cell| cell.volume), Some(50));
    }

    #[test]
    fn toggle_flips_a_cell() {
        let mut engine = SimulationEngine::life(3, 3).unwrap();
        assert!(engine.toggle(1, 1));
        assert_eq!(engine.population(), 1);
        assert!(engine.toggle(1, 1));
        assert_eq!(engine.population(), 0);
        assert!(!engine.toggle(5, 5));
    }

    #[test]
    fn cycle_detector_spots_repeats() {
        let mut detector = CycleDetector::new();
        assert!(!detector.observe(1));
        assert!(!detector.observe(2));
        assert!(detector.observe(1));
    }

    #[test]
    fn cycle_detector_forgets_old_entries() {
        let mut detector = CycleDetector::new();
        for fingerprint in 0..=CYCLE_HISTORY as u64 {
            assert!(!detector.observe(fingerprint));
        }
        // 0 has been pushed out of the ring.
        assert!(!detector.observe(0));
        detector.reset();
        assert!(!detector.observe(5));
    }
}
