use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Lexer error at {pos}")]
    LexerError { pos: usize },

    #[error("Invalid attribute at {pos}: {message}")]
    InvalidAttribute { pos: usize, message: String },

    #[error("Element at {pos} nests deeper than {limit} levels")]
    TooDeep { pos: usize, limit: usize },
}

impl ParseError {
    pub fn lexer_error(pos: usize) -> Self {
        Self::LexerError { pos }
    }

    pub fn too_deep(pos: usize, limit: usize) -> Self {
        Self::TooDeep { pos, limit }
    }

    pub fn invalid_attribute(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            pos,
            message: message.into(),
        }
    }
}
