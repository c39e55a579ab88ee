//! Row-parallel iteration with an optional rayon backend.
//!
//! With the `parallel` feature (default) this re-exports rayon's prelude so
//! field sampling fans grid rows out over the thread pool. Without it, a
//! sequential `into_par_iter()` stand-in keeps the same call sites compiling.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`.
    ///
    /// `into_par_iter()` forwards to `into_iter()`, so chained adapters
    /// (`.flat_map()`, `.collect()`) resolve to plain `Iterator` methods and
    /// results keep their row order.
    pub trait IntoParallelIterator {
        type Iter;
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
