//! Locate every real root of a scalar function over a bounded interval.
//!
//! The interval is probed on an even grid of sample points; every pair of
//! neighbouring samples with differing signs is refined into a root with a
//! bracketed solver (Brent-Dekker unless told otherwise).
//!
//! # Examples
//!
//! ```
//! use multiroot::{locate_roots, Bounds, DEFAULT_SAMPLES};
//! use multiroot::wrap::RealFnWithArgs;
//!
//! // f(x, k) = x - k, searched with k=3
//! let in_f = |x: f64, k: &f64| x - k;
//! let f = RealFnWithArgs::new(&in_f, &3.0);
//!
//! let bounds = Bounds::new(0.0, 10.0).expect("bounds");
//! let roots = locate_roots(&f, &bounds, DEFAULT_SAMPLES).expect("roots");
//! assert_eq!(roots.len(), 1);
//! assert!((roots[0] - 3.0).abs() < 1e-9);
//! ```

pub mod bracket;
pub mod convergence;
pub mod error;
pub mod locate;
pub mod solver;
pub mod wrap;

pub use bracket::Bounds;
pub use error::{InvalidArgument, LocateError};
pub use locate::{locate_roots, locate_roots_with, DEFAULT_SAMPLES};
