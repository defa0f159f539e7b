//! Parallel or sequential iteration behind one import.
//!
//! With the `parallel` feature the statistics iterate with rayon. Without it,
//! `into_par_iter()` is a plain `into_iter()` and the rest of each chain
//! (`map`, `flat_map`, `collect`) resolves to `Iterator`. Only per-cell and
//! per-offset work goes through here; accumulation never does.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    pub trait IntoParallelIterator {
        type Iter: Iterator<Item = Self::Item>;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
