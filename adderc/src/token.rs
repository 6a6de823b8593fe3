use std::fmt::Display;

use adderspan::Spand;

use crate::ast::BinaryOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Number(&'a str),
    Float(&'a str),

    Operator(BinaryOp),

    LParen,
    RParen,

    End,
}

pub type Token<'a> = Spand<TokenKind<'a>>;

impl TokenKind<'_> {
    /// Whether this token completes an operand, after which a `-` is an operator.
    #[must_use]
    pub const fn ends_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Float(_) | Self::RParen)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Float(_) => "float",
            Self::Operator(_) => "operator",
            Self::LParen => "lparen",
            Self::RParen => "rparen",
            Self::End => "end",
        }
    }
}

impl Display for TokenKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(x) | Self::Float(x) => write!(f, "{x}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::End => write!(f, "end of input"),
        }
    }
}
