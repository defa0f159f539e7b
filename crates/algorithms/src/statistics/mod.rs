//! Statistical analysis algorithms for grid data
//!
//! - **markov**: Directional conditional variance (Markovian parameter)
//! - **profile**: Markovian parameter over a set of lags

pub mod markov;
pub mod profile;

pub use markov::{
    bucket_accumulator, conditional_variance, context_levels, markov_parameter,
    BucketAccumulator, ConditionalVariance, MarkovParams, OutOfRangePolicy, BUCKET_COUNT,
};
pub use profile::{directional_profile, lag_offsets, Direction, ProfileEntry};
