//! Bracketed root refinement.
//!
//! Both refiners start from a bracket whose ends straddle a root and narrow
//! it until the convergence criterion is met or the iteration limit runs
//! out.  Neither ever raises on a bad bracket; the outcome is reported as a
//! [`Refinement`] instead.
//!
//! Functions have to be wrapped before use.  See the `wrap` module for how
//! to do this.
//!
//! # Examples
//! Using Brent-Dekker:
//!
//! ```
//! use multiroot::bracket::Bounds;
//! use multiroot::convergence::BracketWidth;
//! use multiroot::solver::{brent_dekker, Refinement};
//! use multiroot::wrap::RealFn;
//!
//! let in_f = |x: f64| -x*x + 2.0*x + 1.0;
//! let f = RealFn::new(&in_f);
//!
//! let bounds = Bounds::new(2.0, 3.0).expect("bounds");
//! let outcome = brent_dekker(&f, &bounds, &BracketWidth::default(), 100).expect("infallible");
//!
//! // root at x=1+sqrt(2)
//! let root = outcome.root().expect("converged");
//! assert!((root-2.41421356237).abs() < 1e-9);
//! ```

use log::trace;

use crate::bracket::{is_sign_change, Bounds};
use crate::convergence::{BracketWidth, IsConverged};
use crate::wrap::RealFnEval;

/// Iteration cap used by the default refiners.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Outcome of refining a single bracket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Refinement {
    /// Converged to `root`.  Zero iterations means an endpoint was already
    /// an exact root.
    Converged { root: f64, iterations: usize },

    /// Iteration limit was reached.  `last_x` is the best estimate so far.
    IterationLimit { last_x: f64 },

    /// The bracket ends do not straddle a root, or one of them is NaN.
    NoSignChange,
}

impl Refinement {
    /// The root, if the refinement converged.
    pub fn root(&self) -> Option<f64> {
        match *self {
            Refinement::Converged { root, .. } => Some(root),
            _ => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.root().is_some()
    }
}

/// A bracketed root finder.
pub trait Refine {
    fn refine<F>(&self, f: &F, bounds: &Bounds) -> Result<Refinement, F::Error>
    where
        F: RealFnEval;
}

/// Shared entry checks: exact roots on the ends, then a real sign change.
/// Returns the end values when refinement should go ahead.
fn check_ends<F>(f: &F, bounds: &Bounds) -> Result<Result<(f64, f64), Refinement>, F::Error>
where
    F: RealFnEval,
{
    let f_a = f.eval_f(bounds.a)?;
    let f_b = f.eval_f(bounds.b)?;

    if f_a == 0.0 {
        return Ok(Err(Refinement::Converged {
            root: bounds.a,
            iterations: 0,
        }));
    }
    if f_b == 0.0 {
        return Ok(Err(Refinement::Converged {
            root: bounds.b,
            iterations: 0,
        }));
    }
    if f_a.is_nan() || f_b.is_nan() || !is_sign_change(f_a, f_b) {
        return Ok(Err(Refinement::NoSignChange));
    }
    Ok(Ok((f_a, f_b)))
}

/// Root finding via Brent-Dekker.
///
/// Mixes inverse quadratic interpolation and the secant method with
/// bisection steps, keeping the root bracketed at all times.  It needs no
/// derivatives and converges superlinearly on smooth functions while never
/// doing much worse than bisection.
///
/// *Brent, R. P. (1973). Algorithms for Minimization without Derivatives,
/// chapter 4. Prentice-Hall.*
pub fn brent_dekker<F, C>(
    f: &F,
    bounds: &Bounds,
    finish: &C,
    max_iter: usize,
) -> Result<Refinement, F::Error>
where
    F: RealFnEval,
    C: IsConverged,
{
    let (f_a, f_b) = match check_ends(f, bounds)? {
        Ok(ends) => ends,
        Err(done) => return Ok(done),
    };

    // x_cur is the best estimate, x_blk the opposite bracket end and x_pre
    // the previous estimate
    let (mut x_pre, mut f_pre) = (bounds.a, f_a);
    let (mut x_cur, mut f_cur) = (bounds.b, f_b);
    let (mut x_blk, mut f_blk) = (0.0, 0.0);
    let (mut s_pre, mut s_cur) = (0.0, 0.0);

    for it in 0..max_iter {
        if f_pre != 0.0 && f_cur != 0.0 && f_pre.is_sign_negative() != f_cur.is_sign_negative() {
            x_blk = x_pre;
            f_blk = f_pre;
            s_pre = x_cur - x_pre;
            s_cur = s_pre;
        }
        if f_blk.abs() < f_cur.abs() {
            x_pre = x_cur;
            x_cur = x_blk;
            x_blk = x_pre;

            f_pre = f_cur;
            f_cur = f_blk;
            f_blk = f_pre;
        }

        let delta = finish.tolerance(x_cur) / 2.0;
        let s_bis = (x_blk - x_cur) / 2.0;

        // convergence criteria
        if f_cur == 0.0 || finish.is_converged(x_cur, x_blk) {
            return Ok(Refinement::Converged {
                root: x_cur,
                iterations: it,
            });
        }

        if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
            let s_try = if x_pre == x_blk {
                // secant
                -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
            } else {
                // inverse quadratic
                let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
            };

            // accept interpolation only while it keeps shrinking fast enough
            if 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                s_pre = s_cur;
                s_cur = s_try;
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }
        } else {
            s_pre = s_bis;
            s_cur = s_bis;
        }

        x_pre = x_cur;
        f_pre = f_cur;
        if s_cur.abs() > delta {
            x_cur += s_cur;
        } else {
            x_cur += if s_bis > 0.0 { delta } else { -delta };
        }
        f_cur = f.eval_f(x_cur)?;
    }

    trace!("brent-dekker hit {} iterations near x={}", max_iter, x_cur);
    Ok(Refinement::IterationLimit { last_x: x_cur })
}

/// Root finding via Bisection Method.
///
/// It always converges given a valid starting bracket, but the speed of
/// convergence is linear.
pub fn bisection<F, C>(
    f: &F,
    bounds: &Bounds,
    finish: &C,
    max_iter: usize,
) -> Result<Refinement, F::Error>
where
    F: RealFnEval,
    C: IsConverged,
{
    let mut f_a = match check_ends(f, bounds)? {
        Ok((f_a, _)) => f_a,
        Err(done) => return Ok(done),
    };
    let mut window = bounds.clone();

    for it in 0..max_iter {
        let mid = window.middle();
        let f_mid = f.eval_f(mid)?;

        if f_mid == 0.0 {
            return Ok(Refinement::Converged {
                root: mid,
                iterations: it + 1,
            });
        }

        if is_sign_change(f_a, f_mid) {
            window.b = mid;
        } else {
            window.a = mid;
            f_a = f_mid;
        }

        // convergence criteria
        if finish.is_converged(window.middle(), window.a) {
            return Ok(Refinement::Converged {
                root: window.middle(),
                iterations: it + 1,
            });
        }
    }

    trace!("bisection hit {} iterations near x={}", max_iter, window.middle());
    Ok(Refinement::IterationLimit {
        last_x: window.middle(),
    })
}

/// Brent-Dekker refiner with its stopping rule.
#[derive(Clone, Debug)]
pub struct BrentDekker<C = BracketWidth> {
    pub finish: C,
    pub max_iter: usize,
}

impl<C> BrentDekker<C>
where
    C: IsConverged,
{
    pub fn new(finish: C, max_iter: usize) -> BrentDekker<C> {
        BrentDekker { finish, max_iter }
    }
}

impl Default for BrentDekker {
    fn default() -> BrentDekker {
        BrentDekker::new(BracketWidth::default(), DEFAULT_MAX_ITER)
    }
}

impl<C> Refine for BrentDekker<C>
where
    C: IsConverged,
{
    fn refine<F>(&self, f: &F, bounds: &Bounds) -> Result<Refinement, F::Error>
    where
        F: RealFnEval,
    {
        brent_dekker(f, bounds, &self.finish, self.max_iter)
    }
}

/// Bisection refiner with its stopping rule.
#[derive(Clone, Debug)]
pub struct Bisection<C = BracketWidth> {
    pub finish: C,
    pub max_iter: usize,
}

impl<C> Bisection<C>
where
    C: IsConverged,
{
    pub fn new(finish: C, max_iter: usize) -> Bisection<C> {
        Bisection { finish, max_iter }
    }
}

impl Default for Bisection {
    fn default() -> Bisection {
        Bisection::new(BracketWidth::default(), DEFAULT_MAX_ITER)
    }
}

impl<C> Refine for Bisection<C>
where
    C: IsConverged,
{
    fn refine<F>(&self, f: &F, bounds: &Bounds) -> Result<Refinement, F::Error>
    where
        F: RealFnEval,
    {
        bisection(f, bounds, &self.finish, self.max_iter)
    }
}
