//! Grid data structures and directional geometry

mod element;
mod field;
mod offset;

pub use element::GridElement;
pub use field::Grid;
pub use offset::{InteriorBand, InteriorCells, Offset};
