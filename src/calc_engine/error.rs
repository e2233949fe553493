use thiserror::Error;

/// Failure while splitting an expression into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
    /// A numeric run with more than one decimal point, or a bare `.`.
    #[error("malformed number at position {position}")]
    MalformedNumber { position: usize },
}

/// Every way `evaluate` can fail. Callers usually collapse all of them
/// into a single "Error" display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("malformed expression")]
    MalformedExpression,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is out of range")]
    Overflow,
}

impl From<TokenizeError> for EvalError {
    fn from(err: TokenizeError) -> Self {
        match err {
            TokenizeError::InvalidCharacter { ch, position } => {
                EvalError::InvalidCharacter { ch, position }
            }
            TokenizeError::MalformedNumber { .. } => EvalError::MalformedExpression,
        }
    }
}
