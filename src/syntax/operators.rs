use phf::phf_map;

use super::tokens::Token;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Operator {
    pub prec: u8,
}

impl Operator {
    /// Looks the token up in the binary table; only operator kinds qualify,
    /// so a resolved `true`/`false` sitting on the operator stack has none.
    pub fn of(token: &Token<'_>) -> Option<Operator> {
        if !token.kind.is_operator() {
            return None;
        }
        BINARY_OPERATOR_TABLE.get(&*token.lexeme).copied()
    }
}

/// Precedence used by the infix-to-postfix pass; anything that is not a
/// binary operator sits at 0.
pub fn precedence(token: &Token<'_>) -> u8 {
    Operator::of(token).map_or(0, |op| op.prec)
}

/// Whether `top` leaves the operator stack before `incoming` is pushed.
/// Every operator is left-associative, so equal precedence also yields.
pub fn yields_to(top: &Token<'_>, incoming: &Token<'_>) -> bool {
    precedence(top) >= precedence(incoming)
}

pub static BINARY_OPERATOR_TABLE: phf::Map<&'static str, Operator> = phf_map! {
    "*" => Operator { prec: 3 },
    "/" => Operator { prec: 3 },
    "+" => Operator { prec: 2 },
    "-" => Operator { prec: 2 },
    "==" => Operator { prec: 1 },
    "!=" => Operator { prec: 1 },
    ">" => Operator { prec: 1 },
    ">=" => Operator { prec: 1 },
    "<" => Operator { prec: 1 },
    "<=" => Operator { prec: 1 },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::TokenKind;

    fn tok(kind: TokenKind, lexeme: &'static str) -> Token<'static> {
        Token::new(kind, lexeme, None, 1)
    }

    #[test]
    fn levels() {
        assert_eq!(precedence(&tok(TokenKind::Star, "*")), 3);
        assert_eq!(precedence(&tok(TokenKind::Slash, "/")), 3);
        assert_eq!(precedence(&tok(TokenKind::Minus, "-")), 2);
        assert_eq!(precedence(&tok(TokenKind::LessEqual, "<=")), 1);
        assert_eq!(precedence(&tok(TokenKind::BangEqual, "!=")), 1);
        assert_eq!(precedence(&tok(TokenKind::LeftParen, "(")), 0);
        assert_eq!(precedence(&tok(TokenKind::Semicolon, ";")), 0);
        assert_eq!(precedence(&Token::boolean(true, 1)), 0);
    }

    #[test]
    fn equal_precedence_yields() {
        let plus = tok(TokenKind::Plus, "+");
        let minus = tok(TokenKind::Minus, "-");
        let star = tok(TokenKind::Star, "*");
        assert!(yields_to(&plus, &minus));
        assert!(yields_to(&star, &plus));
        assert!(!yields_to(&plus, &star));
        // a resolved operand never leaves early for a real operator
        assert!(!yields_to(&Token::boolean(false, 1), &plus));
    }
}
