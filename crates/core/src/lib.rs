//! # stoseg Core
//!
//! Core types and traits for the stoseg spatial statistics library.
//!
//! This crate provides:
//! - `Grid<T>`: Generic rectangular grid of scalar values
//! - `Offset`: Directional lag and the interior band it leaves on a grid
//! - `Error`: Error taxonomy shared by all algorithms
//! - Algorithm trait for consistent API

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{Grid, GridElement, InteriorBand, Offset};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Grid, GridElement, InteriorBand, Offset};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in stoseg.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
