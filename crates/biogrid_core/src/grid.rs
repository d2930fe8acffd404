//! Fixed-size row-major grid storage.
//!
//! A [`Grid`] owns every cell of the world. Its dimensions are set once at
//! construction and there is no API to change them.

use crate::config::MAX_GRID_SIDE;
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Row/column address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    let max = MAX_GRID_SIDE as usize;
    if rows == 0 || cols == 0 || rows > max || cols > max {
        return Err(SimError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

impl<T> Grid<T> {
    /// Builds a grid by evaluating `f` for every position in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(GridPos) -> T) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(GridPos::new(row, col)));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        })
    }

    /// Same dimensions as `self`, every cell set to `T::default()`.
    pub fn blank_like<U: Default + Clone>(&self) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: vec![U::default(); self.rows * self.cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub fn index(&self, pos: GridPos) -> usize {
        pos.row * self.cols + pos.col
    }

    #[inline(always)]
    pub fn pos_of(&self, index: usize) -> GridPos {
        GridPos::new(index / self.cols, index % self.cols)
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Applies a signed offset, returning `None` when it leaves the grid.
    #[inline]
    pub fn offset(&self, pos: GridPos, dr: isize, dc: isize) -> Option<GridPos> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        self.contains(row, col).then_some(GridPos::new(row, col))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if self.contains(row, col) {
            Some(&self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if self.contains(row, col) {
            Some(&mut self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn at(&self, pos: GridPos) -> &T {
        &self.cells[self.index(pos)]
    }

    #[inline]
    pub fn at_mut(&mut self, pos: GridPos) -> &mut T {
        let idx = self.index(pos);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (GridPos::new(i / cols, i % cols), c))
    }
}
