use crate::{
    errors::EvalError,
    syntax::tokens::{Literal, Token, TokenKind},
};

enum Outcome {
    Number(f64),
    Text(String),
    Logical(bool),
}

impl Outcome {
    fn into_token<'a>(self, line: usize) -> Token<'a> {
        match self {
            Outcome::Number(n) => Token::number(n, line),
            Outcome::Text(s) => Token::string(s, line),
            Outcome::Logical(b) => Token::boolean(b, line),
        }
    }
}

/// Runs a postfix sequence on an operand stack. The result is the bottom
/// of the stack once every token has been consumed.
#[tracing::instrument(level = "trace", skip_all, fields(len = postfix.len()))]
pub fn execute<'a>(postfix: Vec<Token<'a>>) -> Result<Token<'a>, EvalError> {
    let mut stack: Vec<Token<'a>> = Vec::with_capacity(postfix.len());
    for token in postfix {
        if token.kind.is_operand() {
            stack.push(token);
            continue;
        }
        let right = stack.pop().ok_or(EvalError::MissingOperand)?;
        let left = stack.pop().ok_or(EvalError::MissingOperand)?;
        stack.push(apply(&token, &left, &right)?);
    }
    if stack.len() > 1 {
        tracing::debug!(remaining = stack.len(), "operands left on the stack");
    }
    stack.into_iter().next().ok_or(EvalError::MissingOperand)
}

fn apply<'a>(op: &Token<'_>, left: &Token<'_>, right: &Token<'_>) -> Result<Token<'a>, EvalError> {
    check_operands(op, left, right)?;
    let outcome = match (op.kind, left.num(), right.num()) {
        (TokenKind::Plus, Some(a), Some(b)) => Outcome::Number(a + b),
        (TokenKind::Plus, ..) => match (left.str(), right.str()) {
            (Some(a), Some(b)) => Outcome::Text(format!("{}{}", a, b)),
            _ => return Err(EvalError::AddOperands { line: op.line }),
        },
        (TokenKind::Minus, Some(a), Some(b)) => Outcome::Number(a - b),
        (TokenKind::Star, Some(a), Some(b)) => Outcome::Number(a * b),
        (TokenKind::Slash, Some(_), Some(b)) if b == 0.0 => return Err(EvalError::DivisionByZero),
        (TokenKind::Slash, Some(a), Some(b)) => Outcome::Number(a / b),
        (TokenKind::Greater, Some(a), Some(b)) => Outcome::Logical(a > b),
        (TokenKind::GreaterEqual, Some(a), Some(b)) => Outcome::Logical(a >= b),
        (TokenKind::Less, Some(a), Some(b)) => Outcome::Logical(a < b),
        (TokenKind::LessEqual, Some(a), Some(b)) => Outcome::Logical(a <= b),
        (TokenKind::EqualEqual, ..) => Outcome::Logical(equal(left, right)),
        (TokenKind::BangEqual, ..) => Outcome::Logical(!equal(left, right)),
        _ => return Err(EvalError::InvalidOperator),
    };
    Ok(outcome.into_token(op.line))
}

/// Equality and inequality take anything, `+` wants two numbers or two
/// strings, every other operator wants two numbers.
fn check_operands(op: &Token<'_>, left: &Token<'_>, right: &Token<'_>) -> Result<(), EvalError> {
    let numbers = left.num().is_some() && right.num().is_some();
    match op.kind {
        TokenKind::EqualEqual | TokenKind::BangEqual => Ok(()),
        TokenKind::Plus if numbers || (left.str().is_some() && right.str().is_some()) => Ok(()),
        TokenKind::Plus => Err(EvalError::AddOperands { line: op.line }),
        _ if numbers => Ok(()),
        _ => Err(EvalError::NumberOperands { line: op.line }),
    }
}

/// Only literal values compare; `true`, `false` and `nil` carry none and
/// are never equal to anything.
fn equal(left: &Token<'_>, right: &Token<'_>) -> bool {
    match (&left.literal, &right.literal) {
        (Some(Literal::Num(a)), Some(Literal::Num(b))) => a == b,
        (Some(Literal::Str(a)), Some(Literal::Str(b))) => a == b,
        _ => false,
    }
}
