use std::{convert::TryFrom, iter::Peekable, str::CharIndices};

use crate::{
    errors::{Diagnostics, SyntaxErr, SyntaxErrReason},
    syntax::tokens::{Literal, Token, TokenKind, KEYWORDS},
};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
}

macro_rules! many {
    ($name: ident, $predicate: expr) => {
        /// Consumes while the predicate holds and returns the end offset.
        fn $name(&mut self) -> usize {
            while let Some(_) = self.next_if($predicate) {}
            self.offset()
        }
    };
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
        }
    }

    /// Scans the whole source. Lexical errors are reported to `diag` and
    /// skipped; the result always ends with a single EOF token.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn tokenize(mut self, diag: &mut Diagnostics) -> Vec<Token<'a>> {
        let mut tokens = vec![];
        while let Some((pos, char)) = self.next() {
            match char {
                '(' | ')' | '{' | '}' | ',' | '.' | '-' | '+' | ';' | '*' => {
                    tokens.extend(self.punct(pos, pos + 1))
                }
                '!' | '=' | '<' | '>' => {
                    let end = match self.next_if(|c| c == '=') {
                        Some(_) => pos + 2,
                        None => pos + 1,
                    };
                    tokens.extend(self.punct(pos, end))
                }
                '/' => match self.next_if(|c| c == '/') {
                    Some(_) => self.comment(),
                    None => tokens.extend(self.punct(pos, pos + 1)),
                },
                '"' => tokens.extend(self.string(pos, diag)),
                '\n' => self.line += 1,
                ' ' | '\t' | '\r' => (),
                c if c.is_ascii_digit() => tokens.push(self.num(pos)),
                c if c.is_alphabetic() || c == '_' => tokens.push(self.ident(pos)),
                c => diag.syntax(SyntaxErr::lexical(
                    self.line,
                    SyntaxErrReason::UnexpectedChar(c),
                )),
            }
        }
        tokens.push(Token::eof(self.line));
        tracing::debug!(count = tokens.len(), lines = self.line, "scanned");
        tokens
    }

    fn punct(&self, start: usize, end: usize) -> Option<Token<'a>> {
        let text = &self.source[start..end];
        TokenKind::try_from(text)
            .ok()
            .map(|kind| Token::new(kind, text, None, self.line))
    }

    fn string(&mut self, start: usize, diag: &mut Diagnostics) -> Option<Token<'a>> {
        let end = loop {
            match self.next() {
                Some((pos, '"')) => break pos,
                Some((_, '\n')) => self.line += 1,
                Some(_) => (),
                None => {
                    diag.syntax(SyntaxErr::lexical(
                        self.line,
                        SyntaxErrReason::UnclosedStringLiteral,
                    ));
                    return None;
                }
            }
        };
        let content = &self.source[start + 1..end];
        Some(Token::new(
            TokenKind::String,
            &self.source[start..=end],
            Some(Literal::Str(content.into())),
            self.line,
        ))
    }

    fn num(&mut self, start: usize) -> Token<'a> {
        let mut end = self.digits();
        if self.peek_is('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.next();
            end = self.digits();
        }
        let text = &self.source[start..end];
        let value = text.parse::<f64>().ok().map(Literal::Num);
        Token::new(TokenKind::Number, text, value, self.line)
    }

    fn ident(&mut self, start: usize) -> Token<'a> {
        let end = self.word();
        let text = &self.source[start..end];
        let kind = KEYWORDS.get(text).copied().unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, None, self.line)
    }

    fn comment(&mut self) {
        while let Some(_) = self.next_if(|c| c != '\n') {}
    }

    many!(digits, |c| c.is_ascii_digit());
    many!(word, |c| c.is_alphanumeric() || c == '_');

    pub fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<(usize, char)> {
        if predicate(self.peek()?.1) {
            return self.next();
        }
        None
    }

    fn peek_is(&mut self, expected: char) -> bool {
        matches!(self.peek(), Some((_, c)) if *c == expected)
    }

    fn peek_next(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        let len = self.source.len();
        self.peek().map_or(len, |&(pos, _)| pos)
    }

    fn peek(&mut self) -> Option<&(usize, char)> {
        self.chars.peek()
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, char);
    fn next(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }
}
