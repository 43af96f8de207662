use thiserror::Error;

/// Rejected inputs to the root locator.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidArgument {
    /// Fewer than two sample points cannot form a single bracket.
    #[error("need at least 2 sample points, got {n}")]
    TooFewSamples { n: usize },

    /// One or both interval endpoints are NaN or infinite.
    #[error("interval endpoints must be finite, got [{a}, {b}]")]
    NonFinite { a: f64, b: f64 },

    /// Both endpoints are the same value.
    #[error("interval has zero width at x={x}")]
    ZeroWidth { x: f64 },

    /// The endpoints are finite but their distance is not.
    #[error("interval [{a}, {b}] is too wide to sample")]
    WidthOverflow { a: f64, b: f64 },

    /// An interval was built from a slice that did not hold exactly two values.
    #[error("interval needs exactly 2 endpoints, got {len}")]
    WrongArity { len: usize },
}

/// Failure of a root search.
///
/// `E` is the error type of the searched function, see
/// [`RealFnEval`](crate::wrap::RealFnEval).  Wrappers for plain closures use
/// `std::convert::Infallible`, so only `InvalidArgument` can occur for them.
#[derive(Debug, Error)]
pub enum LocateError<E> {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// The function failed while being sampled or refined.
    #[error("function evaluation failed")]
    Evaluation(#[source] E),
}
