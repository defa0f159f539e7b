//! Markovian parameter over a set of lags
//!
//! Evaluating the conditional variance at increasing lags along a direction
//! shows how far spatial dependence reaches in that direction. Offsets are
//! evaluated independently (in parallel with the `parallel` feature); each
//! evaluation is itself sequential, so entries equal single calls.

use crate::maybe_rayon::*;
use serde::{Deserialize, Serialize};
use stoseg_core::grid::{Grid, GridElement, Offset};
use stoseg_core::Result;
use tracing::debug;

use super::markov::{conditional_variance, validate, MarkovParams, OutOfRangePolicy};

/// Lag direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Along the outer extent: `(k, 0)`
    Rows,
    /// Along the inner extent: `(0, k)`
    Cols,
    /// `(k, k)`
    Diagonal,
    /// `(k, -k)`
    AntiDiagonal,
}

impl Direction {
    /// Offset for lag `k` in this direction
    pub fn offset(&self, k: isize) -> Offset {
        match self {
            Direction::Rows => Offset::new(k, 0),
            Direction::Cols => Offset::new(0, k),
            Direction::Diagonal => Offset::new(k, k),
            Direction::AntiDiagonal => Offset::new(k, -k),
        }
    }
}

/// Offsets for lags `1..=max_lag` in `direction`
pub fn lag_offsets(max_lag: usize, direction: Direction) -> Vec<Offset> {
    (1..=max_lag as isize).map(|k| direction.offset(k)).collect()
}

/// One evaluated lag
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub offset: Offset,
    /// The statistic, or the per-offset failure (typically `NoData`)
    pub value: Result<f64>,
}

/// Compute the conditional variance for every offset, in input order.
///
/// An empty or non-finite grid fails the whole call. Failures tied to a
/// single offset (no interior band, level out of range) are reported in
/// that offset's entry.
pub fn directional_profile<T: GridElement>(
    grid: &Grid<T>,
    offsets: &[Offset],
    out_of_range: OutOfRangePolicy,
) -> Result<Vec<ProfileEntry>> {
    validate(grid)?;
    debug!(offsets = offsets.len(), "computing directional profile");

    let entries: Vec<ProfileEntry> = offsets
        .to_vec()
        .into_par_iter()
        .map(|offset| ProfileEntry {
            offset,
            value: conditional_variance(grid, MarkovParams { offset, out_of_range }),
        })
        .collect();

    Ok(entries)
}
