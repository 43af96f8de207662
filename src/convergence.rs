//! Stopping criteria for bracketing refiners.

/// Decides when a bracket is narrow enough to call its best point a root.
///
/// `tolerance(x)` is the absolute accuracy wanted near `x`.  Refiners also
/// use it as their smallest step.
pub trait IsConverged {
    fn tolerance(&self, x: f64) -> f64;

    fn is_converged(&self, x_best: f64, x_other: f64) -> bool {
        (x_other - x_best).abs() < self.tolerance(x_best)
    }
}

/// Mixed absolute/relative bracket width: |b - a| < xtol + rtol * |x|.
#[derive(Clone, Debug, PartialEq)]
pub struct BracketWidth {
    xtol: f64,
    rtol: f64,
}

impl BracketWidth {
    pub fn new(xtol: f64, rtol: f64) -> BracketWidth {
        assert!(xtol > 0.0 && xtol.is_finite());
        assert!(rtol >= 0.0 && rtol.is_finite());
        BracketWidth { xtol, rtol }
    }
}

impl Default for BracketWidth {
    fn default() -> BracketWidth {
        BracketWidth::new(2e-12, 4.0 * f64::EPSILON)
    }
}

impl IsConverged for BracketWidth {
    fn tolerance(&self, x: f64) -> f64 {
        self.xtol + self.rtol * x.abs()
    }
}

/// Purely absolute bracket width: |b - a| < epsilon.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaX {
    epsilon_abs: f64,
}

impl DeltaX {
    pub fn new(epsilon_abs: f64) -> DeltaX {
        assert!(epsilon_abs > 0.0);
        assert!(epsilon_abs.is_finite());
        DeltaX { epsilon_abs }
    }
}

impl IsConverged for DeltaX {
    fn tolerance(&self, _x: f64) -> f64 {
        self.epsilon_abs
    }
}
