use crate::error::{IndexError, Result, ShapeError};

/// A row-major boolean grid.
///
/// Cell `(row, col)` has linear index `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Creates an all-false mask.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::GridTooLarge`] if the grid has more cells than
    /// 32-bit linear indices can address.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let cells = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; cells],
        })
    }

    /// Wraps an existing row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if `cells.len() != rows * cols`,
    /// or [`ShapeError::GridTooLarge`] as in [`Mask::new`].
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self> {
        let expected = cell_count(rows, cols)?;
        if cells.len() != expected {
            return Err(ShapeError::LengthMismatch {
                what: "mask cells",
                expected,
                actual: cells.len(),
            }
            .into());
        }
        Ok(Self { rows, cols, cells })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns the number of true cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Returns the row-major cell buffer.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Builds a mask from a list of linear indices.
///
/// The index list holds one entry per row, as produced by a one-per-row
/// selection over a `rows x cols` grid; duplicates simply set the same cell.
pub struct FillMask<'a> {
    indices: &'a [u32],
    rows: usize,
    cols: usize,
}

impl<'a> FillMask<'a> {
    /// Creates a new `FillMask` operation.
    #[must_use]
    pub fn new(indices: &'a [u32], rows: usize, cols: usize) -> Self {
        Self {
            indices,
            rows,
            cols,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if there is not exactly one
    /// index per row, [`ShapeError::GridTooLarge`] for a grid beyond 32-bit
    /// indexing, or [`IndexError::CellOutOfRange`] for the first index
    /// outside `[0, rows * cols)`.
    pub fn execute(&self) -> Result<Mask> {
        if self.indices.len() != self.rows {
            return Err(ShapeError::LengthMismatch {
                what: "mask indices",
                expected: self.rows,
                actual: self.indices.len(),
            }
            .into());
        }

        let cells = cell_count(self.rows, self.cols)?;
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= cells)
        {
            return Err(IndexError::CellOutOfRange {
                position,
                index,
                cells,
            }
            .into());
        }

        let mut mask = Mask {
            rows: self.rows,
            cols: self.cols,
            cells: vec![false; cells],
        };
        for &index in self.indices {
            mask.cells[index as usize] = true;
        }
        Ok(mask)
    }
}

/// Lists the linear indices of the true cells of a mask, ascending.
pub struct ExtractIndices<'a> {
    mask: &'a Mask,
}

impl<'a> ExtractIndices<'a> {
    /// Creates a new `ExtractIndices` operation.
    #[must_use]
    pub fn new(mask: &'a Mask) -> Self {
        Self { mask }
    }

    /// Executes the operation.
    #[must_use]
    // Mask construction bounds every linear index by u32::MAX.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Vec<u32> {
        self.mask
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| i as u32)
            .collect()
    }
}

fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    let cells = rows
        .checked_mul(cols)
        .ok_or(ShapeError::GridTooLarge { rows, cols })?;
    if cells > 0 && cells - 1 > u32::MAX as usize {
        return Err(ShapeError::GridTooLarge { rows, cols }.into());
    }
    Ok(cells)
}
