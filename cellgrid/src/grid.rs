// grid.rs - Fixed-size 2-D cell storage

use std::ops::{Index, IndexMut};

use crate::error::GridError;

/// Integer cell coordinate `(x, y)`; `x` is the column, `y` grows downward.
pub type Coord = (usize, usize);

/// Rectangular `width × height` array of cells, fixed for its lifetime.
///
/// Cells are stored row-major (`y * width + x`). The checked accessors
/// (`get`, `get_mut`, `offset`) silently filter coordinates outside the
/// grid; `Index`/`IndexMut` treat them as a programming error and panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<C> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C> Grid<C> {
    /// Builds a grid, asking `factory` for every cell so no two cells alias.
    pub fn new(
        width: usize,
        height: usize,
        mut factory: impl FnMut(Coord) -> C,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(factory((x, y)));
            }
        }

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Flat storage index of `(x, y)`, which must be in bounds.
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "coordinate ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&C> {
        if self.contains(x, y) {
            Some(&self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut C> {
        if self.contains(x, y) {
            let index = y * self.width + x;
            Some(&mut self.cells[index])
        } else {
            None
        }
    }

    /// Coordinate of the cell at `(x + dx, y + dy)`, if it lies on the grid.
    pub fn offset(&self, (x, y): Coord, dx: isize, dy: isize) -> Option<Coord> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.contains(nx, ny).then_some((nx, ny))
    }

    /// Cells in storage order (row-major).
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    /// Overwrites every cell with a fresh value from `factory`.
    pub fn fill_with(&mut self, mut factory: impl FnMut(Coord) -> C) {
        let width = self.width;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = factory((index % width, index / width));
        }
    }
}

impl<C: Clone> Grid<C> {
    /// Copies every cell of `other`, which must have the same shape.
    pub fn copy_from(&mut self, other: &Grid<C>) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "grid shapes differ"
        );
        self.cells.clone_from_slice(&other.cells);
    }
}

impl<C> Index<Coord> for Grid<C> {
    type Output = C;

    fn index(&self, (x, y): Coord) -> &C {
        let index = self.index_of(x, y);
        &self.cells[index]
    }
}

impl<C> IndexMut<Coord> for Grid<C> {
    fn index_mut(&mut self, (x, y): Coord) -> &mut C {
        let index = self.index_of(x, y);
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Grid::new(0, 4, |_| 0u8),
            Err(GridError::EmptyDimensions { width: 0, height: 4 })
        ));
        assert!(Grid::new(4, 0, |_| 0u8).is_err());
    }

    #[test]
    fn factory_sees_every_coordinate_once() {
        let grid = Grid::new(3, 2, |(x, y)| (x, y)).unwrap();
        assert_eq!(grid.len(), 6);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid[(x, y)], (x, y));
            }
        }
    }

    #[test]
    fn checked_access_filters_out_of_bounds() {
        let mut grid = Grid::new(2, 2, |_| 1u8).unwrap();
        assert_eq!(grid.get(1, 1), Some(&1));
        assert_eq!(grid.get(2, 0), None);
        assert!(grid.get_mut(0, 5).is_none());
    }

    #[test]
    fn offset_stays_on_grid() {
        let grid = Grid::new(3, 3, |_| ()).unwrap();
        assert_eq!(grid.offset((0, 0), -1, 0), None);
        assert_eq!(grid.offset((0, 0), 0, -1), None);
        assert_eq!(grid.offset((2, 2), 1, 0), None);
        assert_eq!(grid.offset((1, 1), 1, 1), Some((2, 2)));
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn indexing_out_of_bounds_panics() {
        let grid = Grid::new(2, 2, |_| 0u8).unwrap();
        let _ = grid[(2, 0)];
    }

    #[test]
    fn fill_with_passes_coordinates() {
        let mut grid = Grid::new(3, 2, |_| (0, 0)).unwrap();
        grid.fill_with(|at| at);
        assert_eq!(grid[(2, 1)], (2, 1));
        assert_eq!(grid[(0, 1)], (0, 1));
    }
}
