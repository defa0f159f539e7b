//! Directional offsets and the interior band they leave on a grid

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A signed lag `(dx, dy)` selecting the pair of cells
/// `(i + dx, j + dy)` and `(i - dx, j - dy)` around a cell `(i, j)`.
///
/// `dx` moves along rows (outer extent), `dy` along columns (inner extent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: isize,
    pub dy: isize,
}

impl Offset {
    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }

    /// Absolute lag `(|dx|, |dy|)`
    pub fn abs(&self) -> (usize, usize) {
        (self.dx.unsigned_abs(), self.dy.unsigned_abs())
    }

    /// The opposite direction `(-dx, -dy)`, which samples the same pair
    pub fn reversed(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    /// Interior band of a `rows x cols` grid for this offset.
    ///
    /// The band is `|dx| + 1 <= i < rows - |dx|` and
    /// `|dy| + 1 <= j < cols - |dy|`. Row 0 and column 0 are never part of
    /// it, and both neighbors of every band cell are inside the grid.
    /// Returns `None` when the band is empty.
    pub fn interior(&self, rows: usize, cols: usize) -> Option<InteriorBand> {
        let (ofx, ofy) = self.abs();
        let row_start = ofx.checked_add(1)?;
        let col_start = ofy.checked_add(1)?;
        let row_end = rows.checked_sub(ofx)?;
        let col_end = cols.checked_sub(ofy)?;

        if row_start >= row_end || col_start >= col_end {
            return None;
        }

        Some(InteriorBand {
            offset: *self,
            rows: row_start..row_end,
            cols: col_start..col_end,
        })
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// Rectangular region of cells whose offset neighbors are both in bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteriorBand {
    offset: Offset,
    rows: Range<usize>,
    cols: Range<usize>,
}

impl InteriorBand {
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    pub fn cols(&self) -> Range<usize> {
        self.cols.clone()
    }

    /// Number of cells in the band
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// The two neighbor positions sampled for a band cell
    pub fn neighbors(&self, row: usize, col: usize) -> ((usize, usize), (usize, usize)) {
        let Offset { dx, dy } = self.offset;
        let (r, c) = (row as isize, col as isize);
        (
            ((r + dx) as usize, (c + dy) as usize),
            ((r - dx) as usize, (c - dy) as usize),
        )
    }

    /// Band cells in row-major order (ascending row, then ascending column)
    pub fn cells(&self) -> InteriorCells {
        InteriorCells {
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            row: self.rows.start,
            col: self.cols.start,
        }
    }
}

/// Row-major iterator over the cells of an [`InteriorBand`]
#[derive(Debug, Clone)]
pub struct InteriorCells {
    rows: Range<usize>,
    cols: Range<usize>,
    row: usize,
    col: usize,
}

impl Iterator for InteriorCells {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.rows.end {
            return None;
        }

        let cell = (self.row, self.col);
        self.col += 1;
        if self.col >= self.cols.end {
            self.col = self.cols.start;
            self.row += 1;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.row >= self.rows.end {
            0
        } else {
            (self.rows.end - self.row - 1) * self.cols.len() + (self.cols.end - self.col)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for InteriorCells {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_bounds() {
        let band = Offset::new(1, 0).interior(5, 5).unwrap();
        assert_eq!(band.rows(), 2..4);
        assert_eq!(band.cols(), 1..5);
        assert_eq!(band.cell_count(), 8);
    }

    #[test]
    fn test_interior_negative_offset_matches_positive() {
        let a = Offset::new(2, -1).interior(9, 7).unwrap();
        let b = Offset::new(-2, 1).interior(9, 7).unwrap();
        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.cols(), b.cols());
    }

    #[test]
    fn test_interior_empty() {
        assert!(Offset::new(1, 0).interior(3, 5).is_none());
        assert!(Offset::new(0, 0).interior(1, 1).is_none());
        assert!(Offset::new(0, 3).interior(10, 6).is_none());
        assert!(Offset::new(isize::MIN, 0).interior(4, 4).is_none());
    }

    #[test]
    fn test_neighbors_in_bounds() {
        let band = Offset::new(-2, 1).interior(8, 6).unwrap();
        for (row, col) in band.cells() {
            let ((r1, c1), (r2, c2)) = band.neighbors(row, col);
            assert!(r1 < 8 && r2 < 8 && c1 < 6 && c2 < 6);
            assert!(r1 >= 1 && r2 >= 1 && c1 >= 1 && c2 >= 1);
        }
    }

    #[test]
    fn test_cells_row_major() {
        let band = Offset::new(0, 0).interior(3, 3).unwrap();
        let cells: Vec<_> = band.cells().collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(band.cells().len(), 4);
    }

    #[test]
    fn test_offset_from_json() {
        let o: Offset = serde_json::from_str(r#"{"dx": -2, "dy": 1}"#).unwrap();
        assert_eq!(o, Offset::new(-2, 1));
        assert_eq!(o.to_string(), "(-2, 1)");
    }

    #[test]
    fn test_reversed() {
        let o = Offset::new(3, -2);
        assert_eq!(o.reversed(), Offset::new(-3, 2));
        assert_eq!(o.reversed().abs(), o.abs());
    }
}
