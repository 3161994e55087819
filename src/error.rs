use thiserror::Error;

pub type TimeAxisResult<T> = Result<T, TimeAxisError>;

#[derive(Debug, Error)]
pub enum TimeAxisError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid time axis configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown time unit: {0:?}")]
    UnknownTimeUnit(String),
}
