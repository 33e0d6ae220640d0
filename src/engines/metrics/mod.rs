pub mod logarithmic;
pub mod metric;
pub mod relative;

pub use logarithmic::LogarithmicStandardDeviationError;
pub use metric::{ErrorMetric, ErrorMetricKind};
pub use relative::{
    magnitude_relative_error, MeanBalancedRelativeError, MeanInvertedBalancedRelativeError,
    MeanMagnitudeRelativeError, Pred25Error,
};
