use crate::{
    errors::EvalError,
    syntax::{
        operators::yields_to,
        tokens::{Token, TokenKind},
    },
};

/// Reorders an infix token sequence (without its end marker) into postfix.
///
/// Unlike a plain shunting-yard pass, parenthesized groups and `!` operands
/// are evaluated on the spot and replaced by their resulting literal, and a
/// `-` that follows nothing or an operator becomes `-1 *`.
#[tracing::instrument(level = "trace", skip_all, fields(len = tokens.len()))]
pub fn to_postfix<'a>(tokens: &[Token<'a>]) -> Result<Vec<Token<'a>>, EvalError> {
    let postfix = ShuntingYard::new(tokens).run()?;
    tracing::trace!(
        postfix = ?postfix.iter().map(|t| &*t.lexeme).collect::<Vec<&str>>(),
        "converted"
    );
    Ok(postfix)
}

struct ShuntingYard<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    output: Vec<Token<'a>>,
    operators: Vec<Token<'a>>,
}

impl<'t, 'a> ShuntingYard<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            output: Vec::with_capacity(tokens.len()),
            operators: vec![],
        }
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, EvalError> {
        let mut previous: Option<TokenKind> = None;
        while let Some(token) = self.bump() {
            match token.kind {
                kind if kind.is_operand() => self.output.push(token.clone()),
                TokenKind::LeftParen => {
                    let value = self.group()?;
                    self.output.push(value);
                }
                // groups are consumed whole, so a `)` here has no partner
                TokenKind::RightParen => self.flush(),
                TokenKind::Minus if previous.map_or(true, TokenKind::is_operator) => {
                    self.output.push(Token::number(-1.0, token.line));
                    self.operators
                        .push(Token::new(TokenKind::Star, "*", None, token.line));
                }
                TokenKind::Bang => {
                    let operand = self.not_operand()?;
                    self.operators.push(operand);
                }
                _ => {
                    while let Some(top) = self.operators.last() {
                        if !yields_to(top, token) {
                            break;
                        }
                        self.output.extend(self.operators.pop());
                    }
                    self.operators.push(token.clone());
                }
            }
            previous = self.last().map(|t| t.kind);
        }
        self.flush();
        Ok(self.output)
    }

    /// Evaluates everything up to the matching `)` (or the end of input)
    /// into a single token. The opening `(` is already consumed.
    fn group(&mut self) -> Result<Token<'a>, EvalError> {
        let tokens = self.tokens;
        let start = self.pos;
        let mut depth = 1usize;
        let mut end = start;
        while let Some(token) = tokens.get(end) {
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => (),
            }
            end += 1;
        }
        self.pos = (end + 1).min(tokens.len());
        tracing::trace!(start, end, "resolving group");
        super::evaluate(&tokens[start..end])
    }

    /// Resolves the operand of a `!` and negates it. Chained `!` recurse.
    fn not_operand(&mut self) -> Result<Token<'a>, EvalError> {
        let token = self.bump().ok_or(EvalError::MissingOperand)?;
        let operand = match token.kind {
            TokenKind::Bang => self.not_operand()?,
            TokenKind::LeftParen => self.group()?,
            _ => token.clone(),
        };
        negate(&operand)
    }

    fn flush(&mut self) {
        while let Some(op) = self.operators.pop() {
            self.output.push(op);
        }
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let tokens = self.tokens;
        let token = tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn last(&self) -> Option<&'t Token<'a>> {
        let tokens = self.tokens;
        tokens.get(self.pos.checked_sub(1)?)
    }
}

/// `nil` and zero are falsy; any other number and `true` are truthy.
fn negate<'a>(token: &Token<'a>) -> Result<Token<'a>, EvalError> {
    let value = match token.kind {
        TokenKind::True => false,
        TokenKind::False | TokenKind::Nil => true,
        _ => match token.num() {
            Some(n) => n == 0.0,
            None => return Err(EvalError::InvalidNotOperand),
        },
    };
    Ok(Token::boolean(value, token.line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Diagnostics, syntax::lexer::Lexer};
    use pretty_assertions::assert_eq;

    fn postfix(source: &str) -> Result<Vec<String>, EvalError> {
        let mut tokens = Lexer::new(source).tokenize(&mut Diagnostics::new());
        tokens.pop();
        Ok(to_postfix(&tokens)?
            .iter()
            .map(|t| t.lexeme.to_string())
            .collect())
    }

    #[test]
    fn precedence_reorders() {
        assert_eq!(postfix("1 + 2 * 3").unwrap(), vec!["1", "2", "3", "*", "+"]);
        assert_eq!(postfix("2 * 3 - 1").unwrap(), vec!["2", "3", "*", "1", "-"]);
        assert_eq!(
            postfix("10 - 2 - 3").unwrap(),
            vec!["10", "2", "-", "3", "-"]
        );
        assert_eq!(
            postfix("1 + 2 < 4 == x").unwrap(),
            vec!["1", "2", "+", "4", "<", "x", "=="]
        );
    }

    #[test]
    fn unary_minus_becomes_multiplication() {
        assert_eq!(postfix("-x").unwrap(), vec!["-1", "x", "*"]);
        assert_eq!(
            postfix("3 - -5").unwrap(),
            vec!["3", "-1", "5", "*", "-"]
        );
        assert_eq!(postfix("3 * -2").unwrap(), vec!["3", "-1", "2", "*", "*"]);
        assert_eq!(postfix("(4) - 1").unwrap(), vec!["4", "1", "-"]);
    }

    #[test]
    fn groups_are_resolved_eagerly() {
        assert_eq!(postfix("(1 + 2) * 4").unwrap(), vec!["3", "4", "*"]);
        assert_eq!(postfix("2 * ((1 + 1) * 3)").unwrap(), vec!["2", "6", "*"]);
        assert_eq!(
            postfix("(\"a\" + \"b\")").unwrap(),
            vec!["\"ab\""]
        );
        // no closing paren: the group runs to the end
        assert_eq!(postfix("1 + (2 * 3").unwrap(), vec!["1", "6", "+"]);
    }

    #[test]
    fn not_operands_land_on_the_operator_stack() {
        assert_eq!(postfix("!true").unwrap(), vec!["false"]);
        assert_eq!(postfix("!!0").unwrap(), vec!["false"]);
        assert_eq!(postfix("!(1 == 2)").unwrap(), vec!["true"]);
        assert_eq!(postfix("1 == !nil").unwrap(), vec!["1", "true", "=="]);
        assert_eq!(postfix("!nil == 1").unwrap(), vec!["1", "==", "true"]);
    }

    #[test]
    fn stray_right_paren_flushes() {
        assert_eq!(postfix("1 + 2) * 3").unwrap(), vec!["1", "2", "+", "3", "*"]);
    }

    #[test]
    fn bad_not_operands() {
        assert_eq!(postfix("!\"s\""), Err(EvalError::InvalidNotOperand));
        assert_eq!(postfix("!x"), Err(EvalError::InvalidNotOperand));
        assert_eq!(postfix("1 + !"), Err(EvalError::MissingOperand));
    }
}
