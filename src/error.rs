use thiserror::Error;

/// A metric-level failure. One failing metric degrades its own report
/// section and never aborts the rest of the snapshot.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("metric unavailable: {0}")]
    Unavailable(String),
}

impl MetricError {
    pub fn unavailable(what: impl Into<String>) -> Self {
        MetricError::Unavailable(what.into())
    }
}

pub type MetricResult<T> = Result<T, MetricError>;
