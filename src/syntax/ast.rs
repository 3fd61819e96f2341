use std::fmt;

use crate::{
    errors::Diagnostics,
    syntax::tokens::{Literal, Token},
};

#[derive(Debug, PartialEq, Clone)]
pub enum Expr<'a> {
    /// Numbers and strings carry their value; `true`, `false`, `nil` and
    /// identifiers are kept as their lexeme.
    Literal(Literal<'a>),
    Unary {
        operator: Token<'a>,
        right: Box<Expr<'a>>,
    },
    Binary {
        left: Box<Expr<'a>>,
        operator: Token<'a>,
        right: Box<Expr<'a>>,
    },
    Grouping(Box<Expr<'a>>),
}

/// Fully parenthesized prefix form, e.g. `(+ 2.0 (* 3.0 4.0))`.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Unary { operator, right } => write!(f, "({} {})", operator.lexeme, right),
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", operator.lexeme, left, right),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
        }
    }
}

/// Nothing is rendered once any syntax error has been recorded for the run.
pub fn render(expr: Option<&Expr<'_>>, diag: &Diagnostics) -> Option<String> {
    if diag.has_errors() {
        return None;
    }
    expr.map(|e| e.to_string())
}
