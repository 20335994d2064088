use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Index {index} out of range for a sequence of length {len}")]
    Range { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

/// Coarse classification callers use to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Range,
    Other,
}

impl SyllabusError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyllabusError::Validation(_) => ErrorKind::Validation,
            SyllabusError::ModuleNotFound(_) | SyllabusError::ItemNotFound(_) => {
                ErrorKind::NotFound
            }
            SyllabusError::Range { .. } => ErrorKind::Range,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyllabusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_caller_errors() {
        assert_eq!(
            SyllabusError::Validation("blank".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            SyllabusError::ModuleNotFound(Uuid::new_v4()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            SyllabusError::ItemNotFound(Uuid::new_v4()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            SyllabusError::Range { index: 4, len: 2 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(SyllabusError::Api("x".into()).kind(), ErrorKind::Other);
    }

    #[test]
    fn range_message_names_both_bounds() {
        let err = SyllabusError::Range { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "Index 7 out of range for a sequence of length 3"
        );
    }
}
