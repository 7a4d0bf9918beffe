// neighbors.rs - Memoized Moore-neighbourhood lookup

use std::cell::{Cell, OnceCell};

use crate::grid::Coord;

/// Moore neighbourhood minus the origin, in lookup order.
pub const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Per-coordinate cache of in-bounds neighbour coordinates.
///
/// Slots are indexed by `y * width + x` and filled on first request. The
/// grid shape never changes, so a filled slot is never invalidated.
#[derive(Debug)]
pub struct NeighborIndex {
    width: usize,
    height: usize,
    table: Vec<OnceCell<Box<[Coord]>>>,
    computed: Cell<usize>,   // slots filled so far
}

impl NeighborIndex {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            table: (0..width * height).map(|_| OnceCell::new()).collect(),
            computed: Cell::new(0),
        }
    }

    /// Neighbours of `(x, y)` lying inside the grid, in `OFFSETS` order.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is itself outside the grid.
    pub fn neighbors_of(&self, x: usize, y: usize) -> &[Coord] {
        assert!(
            x < self.width && y < self.height,
            "neighbour lookup for ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );

        self.table[y * self.width + x].get_or_init(|| {
            self.computed.set(self.computed.get() + 1);
            self.compute(x, y)
        })
    }

    /// Number of coordinates whose neighbour list has been computed.
    pub fn computations(&self) -> usize {
        self.computed.get()
    }

    fn compute(&self, x: usize, y: usize) -> Box<[Coord]> {
        OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width && ny < self.height).then_some((nx, ny))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_edge_and_interior_counts() {
        let index = NeighborIndex::new(5, 4);
        assert_eq!(index.neighbors_of(0, 0).len(), 3);
        assert_eq!(index.neighbors_of(4, 3).len(), 3);
        assert_eq!(index.neighbors_of(2, 0).len(), 5);
        assert_eq!(index.neighbors_of(0, 2).len(), 5);
        assert_eq!(index.neighbors_of(2, 2).len(), 8);
    }

    #[test]
    fn never_leaves_the_grid() {
        let (width, height) = (4, 3);
        let index = NeighborIndex::new(width, height);
        for x in 0..width {
            for y in 0..height {
                for &(nx, ny) in index.neighbors_of(x, y) {
                    assert!(nx < width && ny < height);
                    assert_ne!((nx, ny), (x, y));
                }
            }
        }
    }

    #[test]
    fn order_follows_offsets() {
        let index = NeighborIndex::new(3, 3);
        assert_eq!(
            index.neighbors_of(1, 1),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
        assert_eq!(index.neighbors_of(0, 0), &[(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let index = NeighborIndex::new(3, 3);
        let first = index.neighbors_of(1, 2).to_vec();
        assert_eq!(index.computations(), 1);

        let second = index.neighbors_of(1, 2).to_vec();
        assert_eq!(first, second);
        assert_eq!(index.computations(), 1);

        index.neighbors_of(0, 0);
        assert_eq!(index.computations(), 2);
    }

    #[test]
    #[should_panic(expected = "outside 3x3 grid")]
    fn out_of_range_lookup_panics() {
        NeighborIndex::new(3, 3).neighbors_of(3, 0);
    }
}
