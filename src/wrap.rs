//! Function handles understood by the samplers and refiners.
//!
//! Plain closures are wrapped before use so the library knows how to call
//! them: with or without extra arguments, point-wise or in batches, and
//! whether they can fail.

use std::convert::Infallible;
use std::marker::PhantomData;

/// Trait evaluating: f(x) with x in R^1.
///
/// `eval_f_many` is used to sample the function on a whole grid at once.  It
/// must agree with calling `eval_f` on each point.
pub trait RealFnEval {
    type Error;

    fn eval_f(&self, x: f64) -> Result<f64, Self::Error>;

    fn eval_f_many(&self, xs: &[f64]) -> Result<Vec<f64>, Self::Error> {
        xs.iter().map(|&x| self.eval_f(x)).collect()
    }
}

/// Wraps function to implement RealFnEval.
pub struct RealFn<'a, F>
where
    F: 'a + Fn(f64) -> f64,
{
    pub f: &'a F,
}

impl<'a, F> RealFn<'a, F>
where
    F: 'a + Fn(f64) -> f64,
{
    pub fn new(f: &'a F) -> RealFn<'a, F> {
        RealFn { f }
    }
}

impl<'a, F> RealFnEval for RealFn<'a, F>
where
    F: 'a + Fn(f64) -> f64,
{
    type Error = Infallible;

    fn eval_f(&self, x: f64) -> Result<f64, Infallible> {
        Ok((self.f)(x))
    }
}

/// Wraps a function taking extra arguments.  The same `args` are handed to
/// every evaluation, unchanged.
pub struct RealFnWithArgs<'a, F, A>
where
    F: 'a + Fn(f64, &A) -> f64,
    A: 'a,
{
    pub f: &'a F,
    pub args: &'a A,
}

impl<'a, F, A> RealFnWithArgs<'a, F, A>
where
    F: 'a + Fn(f64, &A) -> f64,
    A: 'a,
{
    pub fn new(f: &'a F, args: &'a A) -> RealFnWithArgs<'a, F, A> {
        RealFnWithArgs { f, args }
    }
}

impl<'a, F, A> RealFnEval for RealFnWithArgs<'a, F, A>
where
    F: 'a + Fn(f64, &A) -> f64,
    A: 'a,
{
    type Error = Infallible;

    fn eval_f(&self, x: f64) -> Result<f64, Infallible> {
        Ok((self.f)(x, self.args))
    }
}

/// Wraps a fallible function.  The first error aborts the search and is
/// returned to the caller as is.
pub struct TryRealFn<'a, F, E>
where
    F: 'a + Fn(f64) -> Result<f64, E>,
{
    pub f: &'a F,
    error: PhantomData<fn() -> E>,
}

impl<'a, F, E> TryRealFn<'a, F, E>
where
    F: 'a + Fn(f64) -> Result<f64, E>,
{
    pub fn new(f: &'a F) -> TryRealFn<'a, F, E> {
        TryRealFn {
            f,
            error: PhantomData,
        }
    }
}

impl<'a, F, E> RealFnEval for TryRealFn<'a, F, E>
where
    F: 'a + Fn(f64) -> Result<f64, E>,
{
    type Error = E;

    fn eval_f(&self, x: f64) -> Result<f64, E> {
        (self.f)(x)
    }

    fn eval_f_many(&self, xs: &[f64]) -> Result<Vec<f64>, E> {
        let mut ys = Vec::with_capacity(xs.len());
        for &x in xs {
            ys.push((self.f)(x)?);
        }
        Ok(ys)
    }
}

/// Wraps a scalar function together with a vectorized version of itself.
///
/// The batch closure evaluates a whole sample grid in one call and must
/// return one value per input, matching the scalar closure.
pub struct BatchRealFn<'a, F1, F2>
where
    F1: 'a + Fn(f64) -> f64,
    F2: 'a + Fn(&[f64]) -> Vec<f64>,
{
    pub f: &'a F1,
    pub f_many: &'a F2,
}

impl<'a, F1, F2> BatchRealFn<'a, F1, F2>
where
    F1: 'a + Fn(f64) -> f64,
    F2: 'a + Fn(&[f64]) -> Vec<f64>,
{
    pub fn new(f: &'a F1, f_many: &'a F2) -> BatchRealFn<'a, F1, F2> {
        BatchRealFn { f, f_many }
    }
}

impl<'a, F1, F2> RealFnEval for BatchRealFn<'a, F1, F2>
where
    F1: 'a + Fn(f64) -> f64,
    F2: 'a + Fn(&[f64]) -> Vec<f64>,
{
    type Error = Infallible;

    fn eval_f(&self, x: f64) -> Result<f64, Infallible> {
        Ok((self.f)(x))
    }

    fn eval_f_many(&self, xs: &[f64]) -> Result<Vec<f64>, Infallible> {
        let ys = (self.f_many)(xs);
        assert_eq!(ys.len(), xs.len(), "batch evaluation length mismatch");
        Ok(ys)
    }
}
