use thiserror::Error;

/// Errors raised while validating bet inputs.
///
/// A bet that won or pushed is not an error; see [`crate::core::score::Outcome::NotALoss`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("side must be 'over' or 'under' (got '{0}')")]
    InvalidSide(String),

    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },
}

pub type ScoreResult<T> = Result<T, ScoreError>;

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> ScoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoreError::NonFinite { field, value })
    }
}
