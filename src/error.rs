//! Error types.
//!
//! Parsing and construction errors abort the processing of the expression they
//! concern and carry enough context (offending token, byte position) to fix the
//! input. A negative equivalence verdict is *not* an error: the comparator
//! always answers with a plain `bool`.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing expressions or building diagrams.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input expression.
    #[error("syntax error at position {position}: {kind}")]
    Syntax { position: usize, kind: SyntaxErrorKind },

    /// An expression (or a diagram walk) could not be reduced to a boolean literal.
    #[error("cannot reduce `{expr}` to a boolean value: variable `{variable}` is unbound")]
    UndefinedEvaluation { expr: String, variable: String },

    /// The canonicalization table reached its configured node limit.
    #[error("canonicalization table is full ({limit} nodes)")]
    TableFull { limit: usize },

    /// Exhaustive enumeration was asked for over too many variables.
    #[error("{count} variables is too many for a truth table (at most {limit})")]
    TooManyVariables { count: usize, limit: usize },
}

/// What exactly went wrong in a [`Error::Syntax`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected token `{found}`, expected {expected}")]
    UnexpectedToken { found: String, expected: &'static str },

    #[error("invalid character `{0}`")]
    InvalidCharacter(char),

    #[error("unmatched `(`")]
    UnmatchedParen,

    #[error("unexpected trailing input starting with `{found}`")]
    TrailingInput { found: String },

    /// Parentheses or connectives nested deeper than the parser accepts.
    #[error("expression nested too deeply (at most {limit} levels)")]
    TooDeep { limit: usize },
}

impl Error {
    pub(crate) fn syntax(position: usize, kind: SyntaxErrorKind) -> Self {
        Error::Syntax { position, kind }
    }

    /// Byte offset of the offending token, for syntax errors.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_message() {
        let err = Error::syntax(
            2,
            SyntaxErrorKind::UnexpectedEnd {
                expected: "an operand",
            },
        );
        assert_eq!(
            err.to_string(),
            "syntax error at position 2: unexpected end of input, expected an operand"
        );
        assert_eq!(err.position(), Some(2));
    }

    #[test]
    fn test_undefined_message() {
        let err = Error::UndefinedEvaluation {
            expr: "(A & B)".to_string(),
            variable: "B".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot reduce `(A & B)` to a boolean value: variable `B` is unbound"
        );
        assert_eq!(err.position(), None);
    }
}
