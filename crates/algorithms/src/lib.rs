//! # stoseg Algorithms
//!
//! Spatial statistics over 2D scalar fields.
//!
//! ## Available Algorithm Categories
//!
//! - **statistics**: Directional conditional variance (Markovian parameter),
//!   lag profiles

mod maybe_rayon;
pub mod statistics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::statistics::{
        conditional_variance, context_levels, directional_profile, lag_offsets,
        markov_parameter, ConditionalVariance, Direction, MarkovParams, OutOfRangePolicy,
    };
    pub use stoseg_core::prelude::*;
}
