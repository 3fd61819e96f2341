//! Evaluation straight from the token stream: infix tokens are reordered
//! into postfix and run on a stack. The parser's tree is not involved.

mod postfix;
mod shunting_yard;

pub use postfix::execute;
pub use shunting_yard::to_postfix;

use crate::{
    errors::EvalError,
    syntax::tokens::{shortest, Literal, Token, TokenKind},
};

/// Evaluates a token sequence to a single token. A trailing end marker is ignored.
pub fn evaluate<'a>(tokens: &[Token<'a>]) -> Result<Token<'a>, EvalError> {
    let tokens = match tokens.split_last() {
        Some((last, rest)) if last.kind == TokenKind::EOF => rest,
        _ => tokens,
    };
    execute(to_postfix(tokens)?)
}

/// What `evaluate` mode prints: string contents, numbers in shortest form,
/// everything else by lexeme.
pub fn show(result: &Token<'_>) -> String {
    match &result.literal {
        Some(Literal::Str(s)) => s.to_string(),
        Some(Literal::Num(n)) => shortest(*n),
        None => result.lexeme.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Diagnostics, syntax::lexer::Lexer};
    use pretty_assertions::assert_eq;

    fn eval(source: &str) -> Result<String, EvalError> {
        let tokens = Lexer::new(source).tokenize(&mut Diagnostics::new());
        evaluate(&tokens).map(|t| show(&t))
    }

    fn ok(source: &str) -> String {
        eval(source).unwrap_or_else(|e| panic!("{:?} failed: {}", source, e))
    }

    #[test]
    fn literals() {
        assert_eq!(ok("12.50"), "12.5");
        assert_eq!(ok("7"), "7");
        assert_eq!(ok("\"hello world\""), "hello world");
        assert_eq!(ok("nil"), "nil");
        assert_eq!(ok("false"), "false");
    }

    #[test]
    fn arithmetic_follows_precedence() {
        assert_eq!(ok("2 + 3 * 4"), "14");
        assert_eq!(ok("1 - 2 * 3"), "-5");
        assert_eq!(ok("10 - 2 - 3"), "5");
        assert_eq!(ok("10 / 2"), "5");
        assert_eq!(ok("7 / 2"), "3.5");
        assert_eq!(ok("(1 + 2) * 3"), "9");
        assert_eq!(ok("2 * (3 + 4)"), "14");
        assert_eq!(ok("((2))"), "2");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(ok("-5"), "-5");
        assert_eq!(ok("3 - -5"), "8");
        assert_eq!(ok("3 * -2"), "-6");
        assert_eq!(ok("--5"), "5");
        assert_eq!(ok("-(2 + 3)"), "-5");
        assert_eq!(ok("(5) - 2"), "3");
    }

    #[test]
    fn strings() {
        assert_eq!(ok("\"foo\" + \"bar\""), "foobar");
        assert_eq!(ok("\"a\" == \"a\""), "true");
        assert_eq!(ok("\"a\" != \"b\""), "true");
    }

    #[test]
    fn comparisons_and_equality() {
        assert_eq!(ok("1 < 2"), "true");
        assert_eq!(ok("3 <= 2"), "false");
        assert_eq!(ok("1 + 1 == 2"), "true");
        assert_eq!(ok("1 == 1"), "true");
        assert_eq!(ok("\"1\" == 1"), "false");
        assert_eq!(ok("nil != 1"), "true");
        assert_eq!(ok("true == true"), "false");
    }

    #[test]
    fn logical_not() {
        assert_eq!(ok("!true"), "false");
        assert_eq!(ok("!!true"), "true");
        assert_eq!(ok("!nil"), "true");
        assert_eq!(ok("!0"), "true");
        assert_eq!(ok("!1"), "false");
        assert_eq!(ok("!(1 == 2)"), "true");
        assert_eq!(ok("!!(0)"), "false");
        assert_eq!(ok("1 == !true"), "false");
    }

    #[test]
    fn large_and_small_numbers_use_exponents() {
        assert_eq!(ok("2 * 500000"), "1e+06");
        assert_eq!(ok("1234567"), "1.234567e+06");
        assert_eq!(ok("1 / 100000"), "1e-05");
        assert_eq!(ok("999999 + 1 == 1000000"), "true");
    }

    #[test]
    fn deep_groups() {
        let depth = 200;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(ok(&source), "1");

        let source = format!("{}2 * 3{} + 1", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(ok(&source), "7");
    }

    #[test]
    fn long_not_and_minus_chains() {
        assert_eq!(ok(&format!("{}true", "!".repeat(200))), "true");
        assert_eq!(ok(&format!("{}true", "!".repeat(201))), "false");
        assert_eq!(ok(&format!("{}5", "-".repeat(200))), "5");
    }

    #[test]
    fn loose_parens() {
        assert_eq!(ok("(1 + 2"), "3");
        assert_eq!(ok("1 + 2)"), "3");
    }

    #[test]
    fn errors() {
        assert_eq!(eval("\"foo\" + 1"), Err(EvalError::AddOperands { line: 1 }));
        assert_eq!(eval("-\"foo\""), Err(EvalError::NumberOperands { line: 1 }));
        assert_eq!(eval("\"a\" < \"b\""), Err(EvalError::NumberOperands { line: 1 }));
        assert_eq!(eval("10 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("10 / (1 - 1)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("!\"s\""), Err(EvalError::InvalidNotOperand));
        assert_eq!(eval("1 ; 2"), Err(EvalError::InvalidOperator));
        assert_eq!(eval("1 +"), Err(EvalError::MissingOperand));
        // the resolved `!nil` is flushed after `==`, leaving it one operand short
        assert_eq!(eval("!nil == 1"), Err(EvalError::MissingOperand));
        assert_eq!(eval("()"), Err(EvalError::MissingOperand));
        assert_eq!(eval(""), Err(EvalError::MissingOperand));
    }
}
