// liquid.rs - Column-of-fluid flow rule with walls
//
// Every transfer is computed from the current buffer and recorded as a pair
// of opposite pending deltas in the off-buffer; volumes change only in
// `commit`. Transfers are whole units, so a tick moves fluid around but
// never creates or destroys it (short of saturating at the `Volume` limits).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{Coord, Grid};
use crate::neighbors::NeighborIndex;
use crate::paint::{PaintOp, Paintable};
use crate::rule::RuleSet;

/// Amount of fluid held by a cell.
pub type Volume = i32;

/// Volume at which a column counts as full.
pub const FULL: Volume = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LiquidCell {
    pub volume: Volume,
    pub pending_delta: Volume,   // accumulated during a tick, zero between ticks
    pub wall: bool,
}

impl LiquidCell {
    pub fn with_volume(volume: Volume) -> Self {
        Self { volume, ..Self::default() }
    }

    pub fn wall() -> Self {
        Self { wall: true, ..Self::default() }
    }

    /// Can this cell take part in flow at all.
    pub fn is_open(&self) -> bool {
        !self.wall
    }
}

impl Paintable for LiquidCell {
    fn paint(&mut self, op: PaintOp) -> bool {
        match op {
            PaintOp::AddVolume(amount) => {
                // Pouring onto a wall washes it away first.
                self.wall = false;
                self.volume = self.volume.saturating_add(amount);
                true
            }
            PaintOp::SetWall(true) => {
                *self = LiquidCell::wall();
                true
            }
            PaintOp::SetWall(false) => {
                self.wall = false;
                true
            }
            PaintOp::SetAlive(_) => false,
        }
    }
}

/// Flow-fraction table that distinguishes the liquid variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConstants {
    pub full: Volume,             // capacity below which a column accepts inflow
    pub up_divisor: Volume,       // share of the difference pushed upward
    pub down_divisor: Volume,     // share of the difference pushed downward
    pub spread_divisor: Volume,   // extra halving of sideways transfers
}

impl FlowConstants {
    pub fn new(
        full: Volume,
        up_divisor: Volume,
        down_divisor: Volume,
        spread_divisor: Volume,
    ) -> Result<Self, ConfigError> {
        if full <= 0 {
            return Err(ConfigError::Invalid(format!("full threshold must be positive, got {full}")));
        }
        for (name, divisor) in [
            ("up", up_divisor),
            ("down", down_divisor),
            ("spread", spread_divisor),
        ] {
            if divisor <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} divisor must be positive, got {divisor}"
                )));
            }
        }
        Ok(Self { full, up_divisor, down_divisor, spread_divisor })
    }
}

impl Default for FlowConstants {
    fn default() -> Self {
        LiquidVariant::Standard.constants()
    }
}

/// The three stock flow configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidVariant {
    Runny,
    #[default]
    Standard,
    Thick,
}

impl LiquidVariant {
    pub const ALL: [LiquidVariant; 3] = [LiquidVariant::Runny, LiquidVariant::Standard, LiquidVariant::Thick];

    pub fn constants(self) -> FlowConstants {
        let (up_divisor, down_divisor) = match self {
            LiquidVariant::Runny    => (4, 4),
            LiquidVariant::Standard => (10, 5),
            LiquidVariant::Thick    => (20, 10),
        };
        FlowConstants { full: FULL, up_divisor, down_divisor, spread_divisor: 2 }
    }

    pub fn name(self) -> &'static str {
        match self {
            LiquidVariant::Runny    => "Runny",
            LiquidVariant::Standard => "Standard",
            LiquidVariant::Thick    => "Thick",
        }
    }
}

/// Liquid flow rule: gravity, pressure equalisation, then sideways spread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidFlowRule {
    constants: FlowConstants,
}

impl LiquidFlowRule {
    pub fn new(constants: FlowConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> FlowConstants {
        self.constants
    }

    /// Neighbour at the given offset if it is on the grid and not a wall.
    fn open(grid: &Grid<LiquidCell>, at: Coord, dx: isize, dy: isize) -> Option<(Coord, Volume)> {
        let to = grid.offset(at, dx, dy)?;
        let cell = &grid[to];
        cell.is_open().then_some((to, cell.volume))
    }

    /// Records `amount` leaving `from` and arriving at `to`. Amounts are
    /// computed in `i64` and clamped to a `Volume`; the deltas saturate so
    /// extreme painted volumes pin at the limits instead of overflowing.
    fn transfer(next: &mut Grid<LiquidCell>, from: Coord, to: Coord, amount: i64) {
        let amount = amount.clamp(0, i64::from(Volume::MAX)) as Volume;
        if amount == 0 {
            return;
        }
        next[from].pending_delta = next[from].pending_delta.saturating_sub(amount);
        next[to].pending_delta = next[to].pending_delta.saturating_add(amount);
    }
}

impl RuleSet for LiquidFlowRule {
    type Cell = LiquidCell;

    fn prepare(&self, current: &Grid<LiquidCell>, next: &mut Grid<LiquidCell>) {
        next.copy_from(current);
        for cell in next.cells_mut() {
            cell.pending_delta = 0;
        }
    }

    fn evaluate(
        &self,
        at: Coord,
        current: &Grid<LiquidCell>,
        _neighbors: &NeighborIndex,
        next: &mut Grid<LiquidCell>,
    ) {
        let cell = current[at];
        if cell.wall || cell.volume <= 0 {
            return;
        }

        let volume = i64::from(cell.volume);
        let FlowConstants { full, up_divisor, down_divisor, spread_divisor } = self.constants;
        let (full, up_divisor, down_divisor, spread_divisor) = (
            i64::from(full),
            i64::from(up_divisor),
            i64::from(down_divisor),
            i64::from(spread_divisor),
        );
        let below = Self::open(current, at, 0, 1);

        // Gravity: an unfilled column below takes everything.
        if let Some((to, below_volume)) = below {
            if i64::from(below_volume) < full {
                Self::transfer(next, at, to, volume);
                return;
            }
        }

        let mut budget = volume;

        // Pressure: an over-full column pushes some of the surplus upward...
        if let Some((to, above_volume)) = Self::open(current, at, 0, -1) {
            let above_volume = i64::from(above_volume);
            if above_volume < volume && volume > full {
                let amount = (volume - above_volume).div_euclid(up_divisor);
                Self::transfer(next, at, to, amount);
                budget -= amount;
            }
        }

        // ...and compresses a lighter full column below.
        if let Some((to, below_volume)) = below {
            let below_volume = i64::from(below_volume);
            if below_volume < volume {
                let amount = (volume - below_volume).div_euclid(down_divisor);
                Self::transfer(next, at, to, amount);
                budget -= amount;
            }
        }

        if budget < 0 {
            return;
        }

        // Sideways: share out to lower neighbours in proportion to their deficit.
        let mut lower: [Option<(Coord, i64)>; 2] = [None; 2];
        for (slot, dx) in lower.iter_mut().zip([1, -1]) {
            if let Some((to, side_volume)) = Self::open(current, at, dx, 0) {
                let side_volume = i64::from(side_volume);
                if side_volume < volume {
                    *slot = Some((to, volume - side_volume));
                }
            }
        }

        let total_deficit: i64 = lower.iter().flatten().map(|&(_, deficit)| deficit).sum();
        if total_deficit == 0 {
            return;
        }

        // share < 2^31 and deficit < 2^32, so the product fits in an i64.
        let share = budget.min(total_deficit);
        for &(to, deficit) in lower.iter().flatten() {
            let weighted = (share * deficit).div_euclid(total_deficit);
            Self::transfer(next, at, to, weighted.div_euclid(spread_divisor));
        }
    }

    fn commit(&self, next: &mut Grid<LiquidCell>) {
        for cell in next.cells_mut() {
            cell.volume = cell.volume.saturating_add(cell.pending_delta);
            cell.pending_delta = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(volumes: &[Volume]) -> Grid<LiquidCell> {
        Grid::new(1, volumes.len(), |(_, y)| LiquidCell::with_volume(volumes[y])).unwrap()
    }

    fn run(rule: &LiquidFlowRule, current: &Grid<LiquidCell>) -> Grid<LiquidCell> {
        let index = NeighborIndex::new(current.width(), current.height());
        let mut next = current.clone();
        rule.prepare(current, &mut next);
        for y in 0..current.height() {
            for x in 0..current.width() {
                rule.evaluate((x, y), current, &index, &mut next);
            }
        }
        next
    }

    #[test]
    fn variants_have_distinct_divisors() {
        assert_eq!(LiquidVariant::Runny.constants().up_divisor, 4);
        assert_eq!(LiquidVariant::Standard.constants().down_divisor, 5);
        assert_eq!(LiquidVariant::Thick.constants().up_divisor, 20);
        assert_eq!(FlowConstants::default(), LiquidVariant::Standard.constants());
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert!(FlowConstants::new(100, 0, 5, 2).is_err());
        assert!(FlowConstants::new(0, 10, 5, 2).is_err());
        assert!(FlowConstants::new(100, 10, 5, 2).is_ok());
    }

    #[test]
    fn gravity_moves_everything_into_an_unfilled_cell() {
        let rule = LiquidFlowRule::default();
        let next = run(&rule, &column(&[60, 40]));
        assert_eq!(next[(0, 0)].pending_delta, -60);
        // The bottom cell has nowhere to go.
        assert_eq!(next[(0, 1)].pending_delta, 60);
    }

    #[test]
    fn pressure_pushes_up_and_down() {
        // Middle cell: 300 over a full 100 cell, under a 50 cell.
        let rule = LiquidFlowRule::default();
        let current = column(&[50, 300, 100]);
        let index = NeighborIndex::new(1, 3);
        let mut next = current.clone();
        rule.prepare(&current, &mut next);
        rule.evaluate((0, 1), &current, &index, &mut next);

        let up = (300 - 50) / 10;
        let down = (300 - 100) / 5;
        assert_eq!(next[(0, 0)].pending_delta, up);
        assert_eq!(next[(0, 2)].pending_delta, down);
        assert_eq!(next[(0, 1)].pending_delta, -(up + down));
    }

    #[test]
    fn column_at_capacity_pushes_nothing_up() {
        // Exactly full over a full cell: the lighter cell above gets nothing.
        let rule = LiquidFlowRule::default();
        let index = NeighborIndex::new(1, 3);
        let evaluate_middle = |volumes: &[Volume]| {
            let current = column(volumes);
            let mut next = current.clone();
            rule.prepare(&current, &mut next);
            rule.evaluate((0, 1), &current, &index, &mut next);
            next
        };

        let next = evaluate_middle(&[20, 100, 100]);
        assert!(next.cells().iter().all(|cell| cell.pending_delta == 0));

        // One unit over full and the push starts.
        let next = evaluate_middle(&[20, 101, 100]);
        assert_eq!(next[(0, 0)].pending_delta, (101 - 20) / 10);
    }

    #[test]
    fn sideways_spread_is_proportional_and_halved() {
        // Bottom row so gravity never applies.
        let volumes = [0, 80, 40];
        let current = Grid::new(3, 1, |(x, _)| LiquidCell::with_volume(volumes[x])).unwrap();
        let index = NeighborIndex::new(3, 1);
        let rule = LiquidFlowRule::default();
        let mut next = current.clone();
        rule.prepare(&current, &mut next);
        rule.evaluate((1, 0), &current, &index, &mut next);

        // deficits: left 80, right 40, total 120, share = min(80, 120) = 80
        assert_eq!(next[(0, 0)].pending_delta, (80 * 80 / 120) / 2);
        assert_eq!(next[(2, 0)].pending_delta, (80 * 40 / 120) / 2);
        assert_eq!(next[(1, 0)].pending_delta, -((80 * 80 / 120) / 2 + (80 * 40 / 120) / 2));
    }

    #[test]
    fn level_neighbours_receive_nothing() {
        let current = Grid::new(3, 1, |_| LiquidCell::with_volume(50)).unwrap();
        let next = run(&LiquidFlowRule::default(), &current);
        assert!(next.cells().iter().all(|cell| cell.pending_delta == 0));
    }

    #[test]
    fn walls_never_receive_or_give() {
        let mut current = column(&[200, 0]);
        current[(0, 1)] = LiquidCell::wall();
        let next = run(&LiquidFlowRule::default(), &current);
        assert_eq!(next[(0, 1)].pending_delta, 0);
        assert_eq!(next[(0, 0)].pending_delta, 0);
    }

    #[test]
    fn negative_volume_does_not_flow() {
        let current = column(&[-10, 0]);
        let next = run(&LiquidFlowRule::default(), &current);
        assert!(next.cells().iter().all(|cell| cell.pending_delta == 0));
    }

    #[test]
    fn extreme_volumes_saturate_instead_of_overflowing() {
        let rule = LiquidFlowRule::default();

        // A maximal pour falling onto a wet cell pins at the limit.
        let mut next = run(&rule, &column(&[Volume::MAX, 50]));
        rule.commit(&mut next);
        assert_eq!(next[(0, 0)].volume, 0);
        assert_eq!(next[(0, 1)].volume, Volume::MAX);

        // A deeply negative neighbour still gets an ordinary sideways share.
        let volumes = [100, Volume::MIN + 1];
        let current = Grid::new(2, 1, |(x, _)| LiquidCell::with_volume(volumes[x])).unwrap();
        let mut next = run(&rule, &current);
        rule.commit(&mut next);
        assert_eq!(next[(0, 0)].volume, 50);
        assert_eq!(next[(1, 0)].volume, Volume::MIN + 51);
    }

    #[test]
    fn commit_applies_and_clears_deltas() {
        let rule = LiquidFlowRule::default();
        let mut next = run(&rule, &column(&[60, 0]));
        rule.commit(&mut next);
        assert_eq!(next[(0, 0)], LiquidCell::with_volume(0));
        assert_eq!(next[(0, 1)], LiquidCell::with_volume(60));
    }

    #[test]
    fn painting_a_wall_drains_the_cell() {
        let mut cell = LiquidCell::with_volume(150);
        assert!(cell.paint(PaintOp::SetWall(true)));
        assert_eq!(cell, LiquidCell::wall());

        assert!(cell.paint(PaintOp::AddVolume(100)));
        assert!(!cell.wall);
        assert_eq!(cell.volume, 100);

        assert!(!cell.paint(PaintOp::SetAlive(true)));
    }
}
