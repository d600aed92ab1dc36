//! Square cell-state grids.
//!
//! Cells are stored row-major. Row `r` holds coordinates with `y = r + 1`
//! and column `c` holds `x = c + 1`, so a grid agrees with the coordinate
//! convention used for move tokens.

use super::coord::Coord;

/// An N x N grid of set/unset cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardGrid {
    size: usize,
    cells: Vec<bool>,
}

impl BoardGrid {
    /// Creates an all-empty grid.
    pub fn empty(size: usize) -> Self {
        BoardGrid {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Builds a grid from row-major cells. Returns `None` if the length is not `size * size`.
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Option<Self> {
        (cells.len() == size * size).then_some(BoardGrid { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.cells[row * self.size + col] = value;
    }

    /// Reads the cell under a 1-based coordinate.
    pub fn at(&self, coord: Coord) -> bool {
        self.get(coord.y as usize - 1, coord.x as usize - 1)
    }

    /// Sets the cell under a 1-based coordinate.
    pub fn set_at(&mut self, coord: Coord, value: bool) {
        self.set(coord.y as usize - 1, coord.x as usize - 1, value);
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Builds a new grid of the same size where `cell(r, c) = f(r, c)`.
    pub(crate) fn remap<F>(&self, f: F) -> BoardGrid
    where
        F: Fn(usize, usize) -> bool,
    {
        let n = self.size;
        let mut cells = Vec::with_capacity(n * n);
        for r in 0..n {
            for c in 0..n {
                cells.push(f(r, c));
            }
        }
        BoardGrid { size: n, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_no_stones() {
        let g = BoardGrid::empty(5);
        assert_eq!(g.size(), 5);
        assert_eq!(g.cells().len(), 25);
        assert_eq!(g.count(), 0);
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(BoardGrid::from_cells(3, vec![false; 9]).is_some());
        assert!(BoardGrid::from_cells(3, vec![false; 8]).is_none());
    }

    #[test]
    fn coordinate_maps_to_row_and_column() {
        let mut g = BoardGrid::empty(4);
        g.set_at(Coord::new(3, 1), true);
        assert!(g.get(0, 2));
        assert!(g.at(Coord::new(3, 1)));
        assert!(!g.at(Coord::new(1, 3)));
        assert_eq!(g.count(), 1);
    }
}
