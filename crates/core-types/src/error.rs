use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid {0} value '{1}': {2}")]
    InvalidValue(&'static str, String, String),

    #[error("Column positions are 1-indexed, got {0}")]
    InvalidColumn(usize),
}
