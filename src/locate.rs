//! Finding every root in an interval.
//!
//! The interval is sampled on an even grid.  Each neighbouring pair of
//! samples whose signs differ is handed to a bracketed refiner, and the
//! converged roots are returned sorted and without duplicates.
//!
//! Roots are only found where the grid sees a sign change.  Two roots
//! closer than the grid spacing, or a root where the function merely
//! touches zero, can go unnoticed.  Re-run with more samples if the result
//! looks incomplete.
//!
//! # Examples
//!
//! ```
//! use multiroot::{locate_roots, Bounds};
//! use multiroot::wrap::RealFn;
//!
//! let in_f = |x: f64| x.sin();
//! let f = RealFn::new(&in_f);
//!
//! let roots = locate_roots(&f, &Bounds::new(0.0, 10.0).expect("bounds"), 50).expect("roots");
//! assert_eq!(roots.len(), 4);
//! assert!((roots[1] - std::f64::consts::PI).abs() < 1e-9);
//! ```

use log::{debug, trace};

use crate::bracket::{Bounds, BracketGenerator};
use crate::error::LocateError;
use crate::solver::{BrentDekker, Refine, Refinement};
use crate::wrap::RealFnEval;

/// Number of sample points used when the caller has no better idea.
pub const DEFAULT_SAMPLES: usize = 30;

/// Finds all roots of `f` inside `bounds` that show up as a sign change on a
/// grid of `n` points, refining each with Brent-Dekker.
///
/// Errors when `n < 2` or when `f` fails.  Brackets that do not converge
/// are skipped.
pub fn locate_roots<F>(
    f: &F,
    bounds: &Bounds,
    n: usize,
) -> Result<Vec<f64>, LocateError<F::Error>>
where
    F: RealFnEval,
{
    locate_roots_with(f, bounds, n, &BrentDekker::default())
}

/// As `locate_roots`, refining each bracket with the given refiner.
pub fn locate_roots_with<F, R>(
    f: &F,
    bounds: &Bounds,
    n: usize,
    refiner: &R,
) -> Result<Vec<f64>, LocateError<F::Error>>
where
    F: RealFnEval,
    R: Refine,
{
    let mut roots = Vec::new();
    let mut dropped = 0;

    let brackets = BracketGenerator::new(f, bounds, n)?;
    for b in brackets {
        match refiner.refine(f, &b).map_err(LocateError::Evaluation)? {
            Refinement::Converged { root, iterations } => {
                trace!("[{}, {}] -> {} after {} iterations", b.a, b.b, root, iterations);
                roots.push(root);
            }
            outcome => {
                trace!("[{}, {}] dropped: {:?}", b.a, b.b, outcome);
                dropped += 1;
            }
        }
    }

    // a sample sitting exactly on a root is found from both sides
    roots.sort_by(f64::total_cmp);
    roots.dedup();

    debug!(
        "{} roots in [{}, {}] from {} samples, {} brackets dropped",
        roots.len(),
        bounds.a,
        bounds.b,
        n,
        dropped
    );
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convergence::DeltaX;
    use crate::error::InvalidArgument;
    use crate::solver::Bisection;
    use crate::wrap::{BatchRealFn, RealFn, RealFnWithArgs, TryRealFn};
    use approx::assert_abs_diff_eq;
    use std::cell::Cell;
    use std::f64::consts::PI;

    fn bounds(a: f64, b: f64) -> Bounds {
        Bounds::new(a, b).expect("bounds")
    }

    #[test]
    fn test_no_sign_change() {
        let in_f = |x| x * x + 1.0;
        let f = RealFn::new(&in_f);
        let roots = locate_roots(&f, &bounds(-5.0, 5.0), DEFAULT_SAMPLES).expect("roots");
        assert!(roots.is_empty());
    }

    #[test]
    fn test_single_root() {
        let in_f = |x| x;
        let f = RealFn::new(&in_f);
        let roots = locate_roots(&f, &bounds(-1.0, 1.0), 30).expect("roots");
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_sample_found_once() {
        // grid of 5 points on [-2, 2] lands exactly on the root
        let in_f = |x| x;
        let f = RealFn::new(&in_f);
        let roots = locate_roots(&f, &bounds(-2.0, 2.0), 5).expect("roots");
        assert_eq!(roots, vec![0.0]);
    }

    #[test]
    fn test_sine_roots() {
        let in_f = |x: f64| x.sin();
        let f = RealFn::new(&in_f);
        let roots = locate_roots(&f, &bounds(0.0, 10.0), 50).expect("roots");

        let want = [0.0, PI, 2.0 * PI, 3.0 * PI];
        assert_eq!(roots.len(), want.len());
        for (got, want) in roots.iter().zip(want.iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_extra_args() {
        let in_f = |x: f64, k: &f64| x - k;
        let k = 3.0;
        let f = RealFnWithArgs::new(&in_f, &k);
        let roots = locate_roots(&f, &bounds(0.0, 10.0), DEFAULT_SAMPLES).expect("roots");
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_too_few_samples() {
        let in_f = |x| x;
        let f = RealFn::new(&in_f);
        match locate_roots(&f, &bounds(-1.0, 1.0), 1) {
            Err(LocateError::InvalidArgument(InvalidArgument::TooFewSamples { n: 1 })) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_two_samples() {
        let in_f = |x| x - 0.25;
        let f = RealFn::new(&in_f);
        let roots = locate_roots(&f, &bounds(-1.0, 1.0), 2).expect("roots");
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 0.25, epsilon = 1e-10);
    }

    #[test]
    fn test_evaluation_error() {
        let in_f = |x: f64| if x < 0.0 { Err("negative") } else { Ok(x.sqrt() - 1.0) };
        let f = TryRealFn::new(&in_f);

        match locate_roots(&f, &bounds(-1.0, 4.0), 10) {
            Err(LocateError::Evaluation(e)) => assert_eq!(e, "negative"),
            other => panic!("unexpected result {:?}", other),
        }

        let roots = locate_roots(&f, &bounds(0.0, 4.0), 10).expect("roots");
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_nan_sample_skipped() {
        // undefined at the grid point x=1, real root at x=2.5
        let in_f = |x: f64| if x == 1.0 { f64::NAN } else { x - 2.5 };
        let f = RealFn::new(&in_f);
        let roots = locate_roots(&f, &bounds(0.0, 4.0), 5).expect("roots");
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 2.5, epsilon = 1e-10);
    }

    #[test]
    fn test_non_converged_dropped() {
        // five bisection steps cannot reach the tolerance, so both the root
        // at 0.3 and the pole at 0.55 are dropped
        let in_f = |x: f64| (x - 0.3) / (x - 0.55);
        let f = RealFn::new(&in_f);
        let refiner = Bisection::new(DeltaX::new(1e-12), 5);
        let roots = locate_roots_with(&f, &bounds(0.0, 1.0), 11, &refiner).expect("roots");
        assert!(roots.is_empty());
    }

    #[test]
    fn test_batch_sampling() {
        let batches = Cell::new(0);
        let in_f = |x: f64| x * x - 2.0;
        let in_f_many = |xs: &[f64]| -> Vec<f64> {
            batches.set(batches.get() + 1);
            xs.iter().map(|x| x * x - 2.0).collect()
        };
        let f = BatchRealFn::new(&in_f, &in_f_many);
        let roots = locate_roots(&f, &bounds(-3.0, 3.0), 20).expect("roots");

        assert_eq!(batches.get(), 1);
        assert_eq!(roots.len(), 2);
        assert_abs_diff_eq!(roots[0], -2f64.sqrt(), epsilon = 1e-10);
        assert_abs_diff_eq!(roots[1], 2f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_refiners_agree() {
        let in_f = |x: f64| (x - 1.0) * (x + 2.0) * (x - 3.5);
        let f = RealFn::new(&in_f);
        let b = bounds(-5.0, 5.0);

        let brent = locate_roots(&f, &b, 40).expect("roots");
        let bisect = locate_roots_with(&f, &b, 40, &Bisection::default()).expect("roots");
        assert_eq!(brent.len(), 3);
        assert_eq!(bisect.len(), 3);
        for (x, y) in brent.iter().zip(bisect.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-10);
        }
    }
}
