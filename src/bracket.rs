//! Intervals, sign classification and the sign-change scan.

use crate::error::{InvalidArgument, LocateError};
use crate::wrap::RealFnEval;

/// Bounds represents the closed interval [a,b] with a < b.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    pub(crate) a: f64,
    pub(crate) b: f64,
}

impl Bounds {
    /// Builds the interval spanned by two finite, distinct endpoints whose
    /// distance is finite too.  The endpoints may be given in either order.
    pub fn new(a: f64, b: f64) -> Result<Bounds, InvalidArgument> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(InvalidArgument::NonFinite { a, b });
        }
        if a == b {
            return Err(InvalidArgument::ZeroWidth { x: a });
        }
        if !(b - a).is_finite() {
            return Err(InvalidArgument::WidthOverflow { a, b });
        }
        Ok(Bounds {
            a: a.min(b),
            b: a.max(b),
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn middle(&self) -> f64 {
        self.a + (self.b - self.a) / 2.0
    }

    pub fn size(&self) -> f64 {
        self.b - self.a
    }

    pub fn contains(&self, x: f64) -> bool {
        self.a <= x && x <= self.b
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = InvalidArgument;

    fn try_from(ends: (f64, f64)) -> Result<Bounds, InvalidArgument> {
        Bounds::new(ends.0, ends.1)
    }
}

impl TryFrom<[f64; 2]> for Bounds {
    type Error = InvalidArgument;

    fn try_from(ends: [f64; 2]) -> Result<Bounds, InvalidArgument> {
        Bounds::new(ends[0], ends[1])
    }
}

impl<'a> TryFrom<&'a [f64]> for Bounds {
    type Error = InvalidArgument;

    fn try_from(ends: &'a [f64]) -> Result<Bounds, InvalidArgument> {
        match *ends {
            [a, b] => Bounds::new(a, b),
            _ => Err(InvalidArgument::WrongArity { len: ends.len() }),
        }
    }
}

/// Sign of a function value.
///
/// Zero is its own class, so a sample landing exactly on a root differs in
/// sign from both of its neighbours.  NaN has no sign and differs from
/// everything, itself included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
    Undefined,
}

impl Sign {
    pub fn of(y: f64) -> Sign {
        if y > 0.0 {
            Sign::Positive
        } else if y < 0.0 {
            Sign::Negative
        } else if y == 0.0 {
            Sign::Zero
        } else {
            Sign::Undefined
        }
    }
}

/// Whether signs of values differ.  Never multiplies, so float underflow
/// cannot hide a sign change.
pub fn is_sign_change(lhs: f64, rhs: f64) -> bool {
    let (s_l, s_r) = (Sign::of(lhs), Sign::of(rhs));
    s_l == Sign::Undefined || s_l != s_r
}

/// Returns `n` evenly spaced points covering [a,b], both ends included.
pub fn sample_points(bounds: &Bounds, n: usize) -> Result<Vec<f64>, InvalidArgument> {
    if n < 2 {
        return Err(InvalidArgument::TooFewSamples { n });
    }

    let step = bounds.size() / (n - 1) as f64;
    let mut xs: Vec<f64> = (0..n).map(|i| bounds.a + i as f64 * step).collect();

    // pin the right end against accumulated rounding
    xs[n - 1] = bounds.b;
    Ok(xs)
}

/// Emits every adjacent pair of grid samples across which the function
/// changes sign.
///
/// For a continuous function the Intermediate Value Theorem guarantees that
/// each bracket contains at least one root.  Without a continuity guarantee,
/// it might be a singularity instead.  Roots whose sign change cancels out
/// between two samples are not seen at all.
#[derive(Clone, Debug)]
pub struct BracketGenerator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    pos: usize,
}

impl BracketGenerator {
    /// Samples `f` at `n` points over `bounds`, evaluating the whole grid in
    /// one batch.
    pub fn new<F>(
        f: &F,
        bounds: &Bounds,
        n: usize,
    ) -> Result<BracketGenerator, LocateError<F::Error>>
    where
        F: RealFnEval,
    {
        let xs = sample_points(bounds, n)?;
        let ys = f.eval_f_many(&xs).map_err(LocateError::Evaluation)?;
        Ok(BracketGenerator::from_samples(xs, ys))
    }

    /// Scans precomputed samples.  The `xs` must be ascending.
    pub fn from_samples(xs: Vec<f64>, ys: Vec<f64>) -> BracketGenerator {
        assert_eq!(xs.len(), ys.len(), "one function value per sample point");
        BracketGenerator { xs, ys, pos: 0 }
    }

    pub fn samples(&self) -> (&[f64], &[f64]) {
        (&self.xs, &self.ys)
    }
}

impl Iterator for BracketGenerator {
    type Item = Bounds;

    fn next(&mut self) -> Option<Bounds> {
        while self.pos + 1 < self.xs.len() {
            let i = self.pos;
            self.pos += 1;

            // found root or singularity
            if is_sign_change(self.ys[i], self.ys[i + 1]) {
                return Some(Bounds {
                    a: self.xs[i],
                    b: self.xs[i + 1],
                });
            }
        }
        None
    }
}
