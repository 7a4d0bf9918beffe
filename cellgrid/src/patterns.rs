// patterns.rs - Named life patterns and random seeding

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::SimulationEngine;
use crate::life::{LifeCell, LifeRule};

/// A still life, oscillator or spaceship as offsets from its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Bounding box `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// Top-left corner that centres the pattern on a `width × height` grid.
    pub fn centered_origin(&self, width: usize, height: usize) -> (usize, usize) {
        let (w, h) = self.size();
        (width.saturating_sub(w) / 2, height.saturating_sub(h) / 2)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (24, 0), (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    },
];

/// Clears the board and stamps `pattern` at its centre. Cells that fall off
/// a grid smaller than the pattern are dropped.
pub fn apply_pattern(engine: &mut SimulationEngine<LifeRule>, pattern: &Pattern) {
    engine.clear();

    let (ox, oy) = pattern.centered_origin(engine.width(), engine.height());
    for &(x, y) in pattern.cells {
        engine.paint_set(ox + x, oy + y, true);
    }
}

/// Fills the board from a seeded generator; each cell is alive with
/// probability `density`, which must lie in `[0, 1]`.
pub fn randomize(engine: &mut SimulationEngine<LifeRule>, seed: u64, density: f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    engine.fill_with(|_| LifeCell::from(rng.gen_bool(density)));
}
