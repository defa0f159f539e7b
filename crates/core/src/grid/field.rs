//! Main Grid type

use crate::error::{Error, Result};
use crate::grid::GridElement;
use ndarray::Array2;

/// A rectangular 2D grid of scalar values.
///
/// `Grid<T>` stores `dimX x dimY` values in row-major order, where rows are
/// the outer extent (`dimX`) and columns the inner extent (`dimY`).
///
/// # Example
///
/// ```
/// use stoseg_core::Grid;
///
/// let grid = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(grid.shape(), (2, 2));
/// assert_eq!(grid.mean(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    data: Array2<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new grid filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a grid from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a grid from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Build a grid from a nested sequence of rows.
    ///
    /// This is the boundary adapter for callers that hold a sequence of
    /// sequences: the input must have at least one row, at least one
    /// column, every row the same length and every value finite.
    pub fn from_rows<R, I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        let mut data = Vec::new();
        let mut n_rows = 0;
        let mut n_cols = None;

        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match n_cols {
                None => n_cols = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(Error::invalid_input(format!(
                        "grid is not rectangular: row {} has {} values, expected {}",
                        index,
                        row.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }

            if let Some(col) = row.iter().position(|v| !v.is_finite_value()) {
                return Err(Error::invalid_input(format!(
                    "non-finite value at ({}, {})",
                    index, col
                )));
            }

            data.extend_from_slice(row);
            n_rows += 1;
        }

        let n_cols = match n_cols {
            Some(c) if c > 0 => c,
            _ => return Err(Error::invalid_input("grid is empty")),
        };

        Self::from_vec(data, n_rows, n_cols)
    }

    // Dimensions

    /// Number of rows (outer extent)
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns (inner extent)
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    // Value checks

    /// Position of the first non-finite value in row-major order
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .indexed_iter()
            .find(|(_, v)| !v.is_finite_value())
            .map(|(pos, _)| pos)
    }

    // Derived grids

    /// Convert every cell to f64
    pub fn to_f64(&self) -> Grid<f64> {
        Grid {
            data: self.data.mapv(|v| v.to_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Elementwise square of every cell
    pub fn squared(&self) -> Grid<f64> {
        Grid {
            data: self.data.mapv(|v| {
                let x = v.to_f64().unwrap_or(f64::NAN);
                x * x
            }),
        }
    }

    /// Arithmetic mean of all cells.
    ///
    /// Each row is summed on its own and the row subtotals are added in
    /// row order. NaN for an empty grid.
    pub fn mean(&self) -> f64 {
        let mut sum = 0.0;
        for row in self.data.rows() {
            let mut row_sum = 0.0;
            for &value in row.iter() {
                row_sum += value.to_f64().unwrap_or(f64::NAN);
            }
            sum += row_sum;
        }
        sum / self.len() as f64
    }
}
