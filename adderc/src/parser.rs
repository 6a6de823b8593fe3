use adderspan::{Span, Spand};

use crate::Error;
use crate::ast::{BinaryOp, Operator, SyntaxNode};
use crate::lexer::{LexMode, Lexer};
use crate::token::{Token, TokenKind};

/// Tallest tree the parser builds. Every pass over a tree recurses, so does
/// the parser for each open parenthesis; a bounded height keeps all of them
/// off the end of the stack.
pub const MAX_DEPTH: u32 = 256;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unmatched '('")]
    UnmatchedParen {
        /// Token found where the closing `)` should have been.
        found: Span,
    },
    #[error("expression nested too deeply")]
    TooDeep,
}

pub type ParseError = Spand<ParseErrorKind>;
pub type ParseResult<T> = Result<T, Error>;

/// A subtree together with its height, counting parentheses as a level.
struct Subtree<'a> {
    node:   SyntaxNode<'a>,
    height: u32,
}

/// Precedence-climbing parser over a lazily lexed token stream.
///
/// Exactly one token of lookahead is held. Every time a token is consumed the
/// next one is lexed in the mode implied by the consumed token, so a signed
/// literal can only ever appear where a primary expression starts.
pub struct Parser<'a> {
    lexer:       Lexer<'a>,
    token:       Token<'a>,
    open:        u32,
    keep_groups: bool,
}

impl<'a> Parser<'a> {
    pub fn try_new(input: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token(LexMode::ExprStart)?;
        Ok(Self {
            lexer,
            token,
            open: 0,
            keep_groups: false,
        })
    }

    /// Emit a [`SyntaxNode::Parenthesized`] node for every pair of parentheses.
    #[must_use]
    pub const fn keep_groups(mut self, keep: bool) -> Self {
        self.keep_groups = keep;
        self
    }

    const fn peek(&self) -> Token<'a> {
        self.token
    }

    fn peek_operator(&self) -> Option<BinaryOp> {
        BinaryOp::from_token(self.peek().kind)
    }

    fn next(&mut self) -> ParseResult<Token<'a>> {
        let mode = LexMode::after(&self.token.kind);
        let next = self.lexer.next_token(mode)?;
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn unexpected(&self) -> Error {
        let Token { kind, span } = self.peek();
        let kind = match kind {
            TokenKind::End => ParseErrorKind::UnexpectedEnd,
            _ => ParseErrorKind::UnexpectedToken,
        };
        ParseError::new(kind, span).into()
    }

    /// Whole input as one expression, followed by nothing but whitespace.
    pub fn parse_source(&mut self) -> ParseResult<SyntaxNode<'a>> {
        let node = self.parse_expression(0)?;
        match self.peek() {
            Token {
                kind: TokenKind::End,
                ..
            } => Ok(node),
            Token { span, .. } => {
                Err(ParseError::new(ParseErrorKind::UnexpectedToken, span).into())
            }
        }
    }

    pub fn parse_expression(&mut self, min: u8) -> ParseResult<SyntaxNode<'a>> {
        Ok(self.climb(min)?.node)
    }

    fn climb(&mut self, min: u8) -> ParseResult<Subtree<'a>> {
        let mut left = self.parse_primary()?;

        while let Some(op) = self.peek_operator().filter(|op| op.precedence() >= min) {
            let at = self.next()?.span;
            // strictly tighter on the right keeps equal rungs left-associative
            let right = self.climb(op.precedence() + 1)?;
            let height = left.height.max(right.height) + 1;
            if height > MAX_DEPTH {
                return Err(ParseError::new(ParseErrorKind::TooDeep, at).into());
            }
            left = Subtree {
                node: SyntaxNode::binary(op, left.node, right.node),
                height,
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> ParseResult<Subtree<'a>> {
        let node = match self.peek().kind {
            TokenKind::Number(text) => {
                let span = self.next()?.span;
                SyntaxNode::NumberLiteral { text, span }
            }
            TokenKind::Float(text) => {
                let span = self.next()?.span;
                SyntaxNode::FloatLiteral { text, span }
            }
            TokenKind::LParen => return self.parse_group(),
            _ => return Err(self.unexpected()),
        };
        Ok(Subtree { node, height: 1 })
    }

    fn parse_group(&mut self) -> ParseResult<Subtree<'a>> {
        let open = self.peek().span;
        if self.open >= MAX_DEPTH {
            return Err(ParseError::new(ParseErrorKind::TooDeep, open).into());
        }
        self.next()?;

        self.open += 1;
        let inner = self.climb(0);
        self.open -= 1;
        let inner = inner?;

        let close = self.expect_closing(open)?;
        let span = open.join(close);
        let height = inner.height + 1;
        if height > MAX_DEPTH {
            return Err(ParseError::new(ParseErrorKind::TooDeep, open).into());
        }

        let node = if self.keep_groups {
            SyntaxNode::Parenthesized {
                inner: Box::new(inner.node),
                span,
            }
        } else {
            inner.node.with_span(span)
        };
        Ok(Subtree { node, height })
    }

    fn expect_closing(&mut self, open: Span) -> ParseResult<Span> {
        match self.peek() {
            Token {
                kind: TokenKind::RParen,
                ..
            } => Ok(self.next()?.span),
            Token { span, .. } => {
                let kind = ParseErrorKind::UnmatchedParen { found: span };
                Err(ParseError::new(kind, open).into())
            }
        }
    }
}
