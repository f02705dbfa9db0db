use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidId(String),
    InvalidRating { id: String, rating: f32 },
    InvalidRecord(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidId(msg) => write!(f, "invalid movie id: {msg}"),
            ModelError::InvalidRating { id, rating } => write!(
                f,
                "movie {id} has rating {rating}, expected a value in [0, 10]"
            ),
            ModelError::InvalidRecord(msg) => {
                write!(f, "invalid movie record: {msg}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
