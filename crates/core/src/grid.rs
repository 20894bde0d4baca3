//! Grid module - the occupancy matrix of locked cells
//!
//! Cells live in a flat row-major vector (`y * width + x`) sized once at
//! construction. Coordinates are signed so that collision probes just outside
//! the grid can be expressed without wrapping.

use crate::error::BoardError;
use crate::types::{Cell, ShapeKind, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

/// Fixed-size grid of cells. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Fails when either dimension is outside the supported range.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if !(MIN_WIDTH as usize..=MAX_WIDTH as usize).contains(&width)
            || !(MIN_HEIGHT as usize..=MAX_HEIGHT as usize).contains(&height)
        {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells: vec![None; width * height],
        })
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Collision test: true when every offset, shifted by `(x, y)`, lands on an
    /// in-bounds empty cell. Never mutates the grid.
    pub fn fits(&self, offsets: &[(i8, i8)], x: i8, y: i8) -> bool {
        offsets
            .iter()
            .all(|&(dx, dy)| self.is_valid(x + dx, y + dy))
    }

    /// Write a shape into the grid as locked cells.
    ///
    /// All-or-nothing: if any target cell is out of bounds or occupied,
    /// nothing is written and false is returned.
    pub fn lock(&mut self, offsets: &[(i8, i8)], x: i8, y: i8, kind: ShapeKind) -> bool {
        if !self.fits(offsets, x, y) {
            return false;
        }
        for &(dx, dy) in offsets {
            self.set(x + dx, y + dy, Some(kind));
        }
        true
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, top to bottom.
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// Surviving rows keep their relative order; as many empty rows as were
    /// removed appear at the top. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        // Scan bottom-up, copying each surviving row to the next write slot.
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Fill an entire row with one kind. Intended for seeding positions.
    pub fn fill_row(&mut self, y: usize, kind: ShapeKind) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let start = y * self.width as usize;
        let end = start + self.width as usize;
        self.cells[start..end].fill(Some(kind));
        true
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let grid = Grid::new(10, 20).unwrap();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert!(Grid::new(0, 20).is_err());
        assert!(Grid::new(3, 20).is_err());
        assert!(Grid::new(10, 3).is_err());
        assert!(Grid::new(41, 20).is_err());
        assert!(Grid::new(10, 101).is_err());
        assert!(Grid::new(4, 4).is_ok());
        assert!(Grid::new(40, 100).is_ok());
    }

    #[test]
    fn lock_is_all_or_nothing() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(3, 0, Some(ShapeKind::O));
        let bar = [(0, 0), (1, 0), (2, 0), (3, 0)];
        assert!(!grid.lock(&bar, 0, 0, ShapeKind::I));
        assert_eq!(grid.occupied_count(), 1);
        assert!(grid.lock(&bar, 0, 1, ShapeKind::I));
        assert_eq!(grid.occupied_count(), 5);
    }

    #[test]
    fn clear_full_rows_compacts_non_contiguous_rows() {
        let mut grid = Grid::new(4, 6).unwrap();
        grid.fill_row(5, ShapeKind::I);
        grid.set(0, 4, Some(ShapeKind::T));
        grid.fill_row(3, ShapeKind::I);
        grid.set(1, 2, Some(ShapeKind::S));

        assert_eq!(grid.full_rows(), vec![3, 5]);
        assert_eq!(grid.clear_full_rows(), 2);

        assert_eq!(grid.get(0, 5), Some(Some(ShapeKind::T)));
        assert_eq!(grid.get(1, 4), Some(Some(ShapeKind::S)));
        assert_eq!(grid.occupied_count(), 2);
        assert!(grid.full_rows().is_empty());
    }
}
