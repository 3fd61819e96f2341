use std::iter::Peekable;

use crate::{
    errors::{Diagnostics, Found, SyntaxErr, SyntaxErrReason},
    syntax::{
        ast::*,
        tokens::{Literal, Token, TokenKind},
    },
};

pub type ParseResult<'a> = Result<Expr<'a>, SyntaxErr>;

macro_rules! token {
    ($name: ident, $p: pat, $reason: expr) => {
        fn $name(&mut self) -> Result<Token<'a>, SyntaxErr> {
            self.next_if(|t| matches!(t.kind, $p))
                .ok_or_else(|| self.unexpected($reason))
        }
    };
}

/// One left-associative precedence level: `$next ( op $next )*`.
macro_rules! binary {
    ($name: ident, $next: ident, $($op: pat)|+) => {
        fn $name(&mut self) -> ParseResult<'a> {
            let mut expr = self.$next()?;
            while let Some(operator) = self.next_if(|t| matches!(t.kind, $($op)|+)) {
                let right = self.$next()?;
                expr = Expr::Binary {
                    left: Box::new(expr),
                    operator,
                    right: Box::new(right),
                };
            }
            Ok(expr)
        }
    };
}

pub struct Parser<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    tokens: Peekable<I>,
    line: usize,
}

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens: tokens.peekable(),
            line: 1,
        }
    }

    /// Parses a single expression. On failure the error is recorded in
    /// `diag` and nothing is returned; tokens after the expression are ignored.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(&mut self, diag: &mut Diagnostics) -> Option<Expr<'a>> {
        match self.expression() {
            Ok(expr) => {
                if let Some(rest) = self.peek().filter(|t| t.kind != TokenKind::EOF) {
                    tracing::debug!(line = rest.line, lexeme = %rest.lexeme, "trailing tokens ignored");
                }
                Some(expr)
            }
            Err(err) => {
                diag.syntax(err);
                None
            }
        }
    }

    pub fn expression(&mut self) -> ParseResult<'a> {
        self.equality()
    }

    binary!(equality, comparison, TokenKind::BangEqual | TokenKind::EqualEqual);
    binary!(
        comparison,
        term,
        TokenKind::Greater | TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual
    );
    binary!(term, factor, TokenKind::Plus | TokenKind::Minus);
    binary!(factor, unary, TokenKind::Star | TokenKind::Slash);

    fn unary(&mut self) -> ParseResult<'a> {
        match self.next_if(|t| matches!(t.kind, TokenKind::Bang | TokenKind::Minus)) {
            Some(operator) => Ok(Expr::Unary {
                operator,
                right: Box::new(self.unary()?),
            }),
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> ParseResult<'a> {
        if let Some(token) = self.next_if(|t| t.kind.is_operand()) {
            return Ok(Expr::Literal(
                token.literal.unwrap_or(Literal::Str(token.lexeme)),
            ));
        }
        if self.lparen().is_ok() {
            let inner = self.expression()?;
            self.rparen()?;
            return Ok(Expr::Grouping(Box::new(inner)));
        }
        Err(self.unexpected(SyntaxErrReason::ExpectedExpression))
    }

    token!(lparen, TokenKind::LeftParen, SyntaxErrReason::ExpectedExpression);
    token!(rparen, TokenKind::RightParen, SyntaxErrReason::ExpectedRightParen);

    fn unexpected(&mut self, reason: SyntaxErrReason) -> SyntaxErr {
        let line = self.line;
        let (line, found) = match self.peek() {
            Some(Token {
                kind: TokenKind::EOF,
                line,
                ..
            }) => (*line, Found::End),
            Some(Token { lexeme, line, .. }) => (*line, Found::Lexeme(lexeme.to_string())),
            None => (line, Found::End),
        };
        SyntaxErr {
            line,
            reason,
            found: Some(found),
        }
    }

    fn next_if(&mut self, predicate: impl FnOnce(&Token<'a>) -> bool) -> Option<Token<'a>> {
        let token = self.tokens.next_if(predicate)?;
        self.line = token.line;
        Some(token)
    }

    fn peek(&mut self) -> Option<&Token<'a>> {
        self.tokens.peek()
    }
}
