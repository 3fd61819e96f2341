use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error{}: {reason}", Location(.found))]
pub struct SyntaxErr {
    pub line: usize,
    pub reason: SyntaxErrReason,
    pub found: Option<Found>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrReason {
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Unterminated string.")]
    UnclosedStringLiteral,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect expression.")]
    ExpectedExpression,
}

/// What the parser was looking at when it gave up.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Lexeme(String),
    End,
}

struct Location<'e>(&'e Option<Found>);

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(Found::Lexeme(lexeme)) => write!(f, " at '{}'", lexeme),
            Some(Found::End) => write!(f, " at end"),
            None => Ok(()),
        }
    }
}

impl SyntaxErr {
    pub fn lexical(line: usize, reason: SyntaxErrReason) -> Self {
        Self {
            line,
            reason,
            found: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lexical_errors_have_no_location() {
        let err = SyntaxErr::lexical(3, SyntaxErrReason::UnexpectedChar('$'));
        assert_eq!(err.to_string(), "[line 3] Error: Unexpected character: $");
        let err = SyntaxErr::lexical(1, SyntaxErrReason::UnclosedStringLiteral);
        assert_eq!(err.to_string(), "[line 1] Error: Unterminated string.");
    }

    #[test]
    fn grammar_errors_point_at_the_token() {
        let err = SyntaxErr {
            line: 2,
            reason: SyntaxErrReason::ExpectedExpression,
            found: Some(Found::Lexeme(")".to_string())),
        };
        assert_eq!(err.to_string(), "[line 2] Error at ')': Expect expression.");
        let err = SyntaxErr {
            line: 1,
            reason: SyntaxErrReason::ExpectedRightParen,
            found: Some(Found::End),
        };
        assert_eq!(
            err.to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );
    }
}
