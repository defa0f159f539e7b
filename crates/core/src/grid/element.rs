//! Grid element trait for generic cell values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a grid cell.
///
/// Every element must convert losslessly enough to `f64` for the
/// statistics to operate on it; integer images (e.g. `u8` textures)
/// and floating point simulation output are both supported.
pub trait GridElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Whether this value is finite (always true for integers)
    fn is_finite_value(&self) -> bool;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

macro_rules! impl_grid_element_int {
    ($t:ty) => {
        impl GridElement for $t {
            fn is_finite_value(&self) -> bool {
                true
            }
        }
    };
}

macro_rules! impl_grid_element_float {
    ($t:ty) => {
        impl GridElement for $t {
            fn is_finite_value(&self) -> bool {
                self.is_finite()
            }
        }
    };
}

impl_grid_element_int!(i8);
impl_grid_element_int!(i16);
impl_grid_element_int!(i32);
impl_grid_element_int!(i64);
impl_grid_element_int!(u8);
impl_grid_element_int!(u16);
impl_grid_element_int!(u32);
impl_grid_element_int!(u64);
impl_grid_element_float!(f32);
impl_grid_element_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finiteness() {
        assert!(3u8.is_finite_value());
        assert!(1.5f64.is_finite_value());
        assert!(!f64::NAN.is_finite_value());
        assert!(!f32::INFINITY.is_finite_value());
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(GridElement::to_f64(200u8), Some(200.0));
        assert_eq!(GridElement::to_f64(-7i32), Some(-7.0));
    }
}
