//! Directional conditional variance (Markovian parameter)
//!
//! For a lag `(dx, dy)`, every interior cell `(i, j)` is assigned a context
//! level `floor(1 + (z[i+dx][j+dy] + z[i-dx][j-dy]) / 2)`. Cells are grouped
//! into 256 buckets by that level and the statistic is the pooled
//! within-bucket variance of the raw values:
//!
//! ```text
//! sum_x (S2[x] - S1[x]^2 / n[x]) / sum_x n[x],   x = 1..=255
//! ```
//!
//! Small values mean the field is well predicted by the average of its two
//! neighbors along the lag, i.e. it is smooth in that direction.
//!
//! Accumulation and pooling always run sequentially in row-major and
//! ascending-bucket order, so the result does not depend on the `parallel`
//! feature.

use ndarray::Array2;
use crate::maybe_rayon::*;
use serde::{Deserialize, Serialize};
use stoseg_core::grid::{Grid, GridElement, InteriorBand, Offset};
use stoseg_core::{Algorithm, Error, Result};
use tracing::{debug, trace, warn};

/// Number of context buckets
pub const BUCKET_COUNT: usize = 256;

/// First bucket included in the pooled variance. Bucket 0 is populated by
/// cells whose neighbor average lies in `[-1, 0)` but never pooled.
pub const FIRST_POOLED_BUCKET: usize = 1;

/// What to do with a context level outside `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Fail with [`Error::InvalidInput`]
    #[default]
    Reject,
    /// Clamp the level into `0..=255`
    Clamp,
}

/// Parameters for the conditional variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkovParams {
    /// Lag between the cell and each of its two sampled neighbors
    pub offset: Offset,
    /// Handling of context levels outside the bucket range
    pub out_of_range: OutOfRangePolicy,
}

impl Default for MarkovParams {
    fn default() -> Self {
        Self {
            offset: Offset::new(1, 0),
            out_of_range: OutOfRangePolicy::Reject,
        }
    }
}

impl MarkovParams {
    pub fn new(dx: isize, dy: isize) -> Self {
        Self {
            offset: Offset::new(dx, dy),
            ..Default::default()
        }
    }
}

/// Per-bucket occupancy, sum and sum of squares
#[derive(Debug, Clone, PartialEq)]
pub struct BucketAccumulator {
    occupancy: [u64; BUCKET_COUNT],
    sum: [f64; BUCKET_COUNT],
    sum_squares: [f64; BUCKET_COUNT],
}

impl Default for BucketAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketAccumulator {
    pub fn new() -> Self {
        Self {
            occupancy: [0; BUCKET_COUNT],
            sum: [0.0; BUCKET_COUNT],
            sum_squares: [0.0; BUCKET_COUNT],
        }
    }

    /// Add one cell to bucket `index`
    ///
    /// # Panics
    /// If `index >= BUCKET_COUNT`
    pub fn insert(&mut self, index: usize, value: f64, square: f64) {
        self.occupancy[index] += 1;
        self.sum[index] += value;
        self.sum_squares[index] += square;
    }

    /// Number of cells in bucket `index` (0 outside the bucket range)
    pub fn occupancy(&self, index: usize) -> u64 {
        self.occupancy.get(index).copied().unwrap_or(0)
    }

    pub fn sum(&self, index: usize) -> f64 {
        self.sum.get(index).copied().unwrap_or(0.0)
    }

    pub fn sum_squares(&self, index: usize) -> f64 {
        self.sum_squares.get(index).copied().unwrap_or(0.0)
    }

    /// Cells accumulated in all buckets, bucket 0 included
    pub fn total_occupancy(&self) -> u64 {
        self.occupancy.iter().sum()
    }

    /// Cells accumulated in the pooled buckets `1..=255`
    pub fn pooled_occupancy(&self) -> u64 {
        self.occupancy[FIRST_POOLED_BUCKET..].iter().sum()
    }

    /// Pooled within-bucket variance over buckets `1..=255`.
    ///
    /// `None` when every pooled bucket is empty.
    pub fn pooled_variance(&self) -> Option<f64> {
        let mut total = 0.0;
        let mut occupied: u64 = 0;

        for x in FIRST_POOLED_BUCKET..BUCKET_COUNT {
            let n = self.occupancy[x];
            if n == 0 {
                continue;
            }

            let within = self.sum_squares[x] - (self.sum[x] * self.sum[x]) / n as f64;
            trace!(bucket = x, occupancy = n, within, "pooling bucket");
            total += within;
            occupied += n;
        }

        if occupied == 0 {
            return None;
        }
        Some(total / occupied as f64)
    }
}

/// Conditional variance algorithm
#[derive(Debug, Clone, Default)]
pub struct ConditionalVariance;

impl Algorithm for ConditionalVariance {
    type Input = Grid<f64>;
    type Output = f64;
    type Params = MarkovParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ConditionalVariance"
    }

    fn description(&self) -> &'static str {
        "Pooled variance of values bucketed by the average of two directional neighbors"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        conditional_variance(&input, params)
    }
}

/// Compute the Markovian parameter of `grid` for lag `(dx, dy)`
///
/// Shorthand for [`conditional_variance`] with out-of-range levels rejected.
pub fn markov_parameter<T: GridElement>(grid: &Grid<T>, dx: isize, dy: isize) -> Result<f64> {
    conditional_variance(grid, MarkovParams::new(dx, dy))
}

/// Compute the directional conditional variance of a grid
///
/// # Arguments
/// * `grid` - Input grid, at least 1x1 with finite values
/// * `params` - Lag and out-of-range policy
///
/// # Errors
/// * [`Error::InvalidInput`] for an empty grid, a non-finite value, a
///   context level outside `0..=255` under [`OutOfRangePolicy::Reject`], or
///   values so large that the bucket sums overflow
/// * [`Error::NoData`] when no interior cell lands in buckets `1..=255`
pub fn conditional_variance<T: GridElement>(grid: &Grid<T>, params: MarkovParams) -> Result<f64> {
    let Offset { dx, dy } = params.offset;
    let buckets = bucket_accumulator(grid, params)?;

    let value = buckets.pooled_variance().ok_or(Error::NoData { dx, dy })?;
    if !value.is_finite() {
        return Err(Error::invalid_input(format!(
            "pooled variance overflowed to {} for offset ({}, {})",
            value, dx, dy
        )));
    }
    debug!(
        dx,
        dy,
        occupancy = buckets.pooled_occupancy(),
        value,
        "conditional variance computed"
    );
    Ok(value)
}

/// Accumulate interior cells into context buckets.
///
/// An offset that leaves no interior band yields an empty accumulator.
pub fn bucket_accumulator<T: GridElement>(grid: &Grid<T>, params: MarkovParams) -> Result<BucketAccumulator> {
    validate(grid)?;

    let (rows, cols) = grid.shape();
    debug!(rows, cols, offset = %params.offset, "accumulating context buckets");

    let values = grid.to_f64();
    let squares = values.squared();
    let band = params.offset.interior(rows, cols);
    let levels = level_grid(&values, band.as_ref())?;

    let mut buckets = BucketAccumulator::new();
    let Some(band) = band else {
        return Ok(buckets);
    };

    let mut clamped = 0usize;
    for (row, col) in band.cells() {
        let level = levels[(row, col)];
        let index = match bucket_index(level) {
            Some(index) => index,
            None => match params.out_of_range {
                OutOfRangePolicy::Reject => {
                    return Err(Error::invalid_input(format!(
                        "context level {} at ({}, {}) is outside buckets 0..={}",
                        level,
                        row,
                        col,
                        BUCKET_COUNT - 1
                    )));
                }
                OutOfRangePolicy::Clamp => {
                    clamped += 1;
                    level.clamp(0.0, (BUCKET_COUNT - 1) as f64) as usize
                }
            },
        };
        buckets.insert(index, values.data()[(row, col)], squares.data()[(row, col)]);
    }

    if clamped > 0 {
        warn!(clamped, offset = %params.offset, "context levels clamped into bucket range");
    }

    Ok(buckets)
}

/// Floored context level of every cell.
///
/// Interior cells hold `floor(1 + (z[i+dx][j+dy] + z[i-dx][j-dy]) / 2)`,
/// all other cells hold `floor(mean + 1)`.
pub fn context_levels<T: GridElement>(grid: &Grid<T>, offset: Offset) -> Result<Grid<f64>> {
    validate(grid)?;

    let (rows, cols) = grid.shape();
    let values = grid.to_f64();
    let band = offset.interior(rows, cols);
    Ok(Grid::from_array(level_grid(&values, band.as_ref())?))
}

pub(crate) fn validate<T: GridElement>(grid: &Grid<T>) -> Result<()> {
    if grid.rows() == 0 || grid.cols() == 0 {
        return Err(Error::invalid_input(format!(
            "grid is empty ({}x{})",
            grid.rows(),
            grid.cols()
        )));
    }
    if let Some((row, col)) = grid.first_non_finite() {
        return Err(Error::invalid_input(format!(
            "non-finite value at ({}, {})",
            row, col
        )));
    }
    Ok(())
}

fn level_grid(values: &Grid<f64>, band: Option<&InteriorBand>) -> Result<Array2<f64>> {
    let (rows, cols) = values.shape();
    let seed = values.mean() + 1.0;
    let data = values.data();

    let level_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![seed; cols];

            if let Some(band) = band
                && band.rows().contains(&row)
            {
                for col in band.cols() {
                    let (forward, backward) = band.neighbors(row, col);
                    let neighbour = data[forward] + data[backward];
                    row_data[col] = 1.0 + neighbour / 2.0;
                }
            }

            for v in &mut row_data {
                *v = v.floor();
            }
            row_data
        })
        .collect();

    Array2::from_shape_vec((rows, cols), level_data).map_err(|e| Error::Other(e.to_string()))
}

fn bucket_index(level: f64) -> Option<usize> {
    if (0.0..BUCKET_COUNT as f64).contains(&level) {
        Some(level as usize)
    } else {
        None
    }
}
