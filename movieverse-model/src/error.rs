use thiserror::Error;

/// Reasons a string-encoded list literal could not be decoded.
///
/// Positions are byte offsets into the input after surrounding whitespace
/// has been trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListDecodeError {
    #[error("input is not a bracketed list")]
    NotAList,
    #[error("input ended before the list was closed")]
    UnexpectedEnd,
    #[error("unterminated string starting at offset {position}")]
    UnterminatedString { position: usize },
    #[error("unexpected character '{found}' at offset {position}")]
    UnexpectedChar { position: usize, found: char },
    #[error("trailing input after the list at offset {position}")]
    TrailingInput { position: usize },
}

pub type Result<T> = std::result::Result<T, ListDecodeError>;
