use std::str::Chars;

use adderspan::{Span, Spand};
use thiserror::Error;

use crate::ast::BinaryOp;
use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("invalid character '{0}'")]
    InvalidChar(char),
}

/// Where the next token sits relative to the expression being parsed.
///
/// A `-` directly followed by a digit (or by `.` and a digit) is folded into
/// a signed literal only in [`LexMode::ExprStart`]. Right after an operand
/// the same `-` is always a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    #[default]
    ExprStart,
    AfterOperand,
}

impl LexMode {
    /// Mode for the token that follows a token of kind `prev`.
    #[must_use]
    pub const fn after(prev: &TokenKind<'_>) -> Self {
        if prev.ends_operand() {
            Self::AfterOperand
        } else {
            Self::ExprStart
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Chars<'a>,

    /// start byte position of current token
    byte_start: u32,

    /// byte position of cursor
    byte: u32,

    /// mode used when driven as an iterator
    mode: LexMode,

    /// set once the end token went out through the iterator
    done: bool,
}

const EOF: char = '\0';

pub type LexError = Spand<LexErrorKind>;
pub type LexResult<T> = Result<T, LexError>;

impl<'a> Lexer<'a> {
    /// # Panics
    ///
    /// If `input` is longer than `u32::MAX` bytes.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        assert!(u32::try_from(input.len()).is_ok());

        Self {
            input,
            chars: input.chars(),
            byte_start: 0,
            byte: 0,
            mode: LexMode::ExprStart,
            done: false,
        }
    }

    pub fn lex_all(self) -> Result<Vec<Token<'a>>, Vec<LexError>> {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        for item in self {
            match item {
                Ok(ok) => tokens.push(ok),
                Err(err) => errors.push(err),
            }
        }

        if errors.is_empty() {
            Ok(tokens)
        } else {
            Err(errors)
        }
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF)
    }

    fn second(&self) -> char {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().unwrap_or(EOF)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        #[allow(clippy::cast_possible_truncation)]
        self.chars
            .next()
            .inspect(|c| self.byte += c.len_utf8() as u32)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while !self.is_eof() && pred(self.first()) {
            self.bump();
        }
    }

    const fn make_span(&self) -> Span {
        Span::new(self.byte_start, self.byte)
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));
    }

    fn view(&self) -> &'a str {
        &self.input[self.byte_start as usize..self.byte as usize]
    }

    fn at_fraction(&self) -> bool {
        self.first() == '.' && self.second().is_ascii_digit()
    }

    fn at_unsigned(&self) -> bool {
        self.first().is_ascii_digit() || self.at_fraction()
    }

    /// Integer digits already started; may continue into a float.
    fn number(&mut self) -> TokenKind<'a> {
        self.eat_while(|c| c.is_ascii_digit());

        if self.at_fraction() {
            self.bump();
            self.fraction()
        } else {
            TokenKind::Number(self.view())
        }
    }

    /// Cursor is past the `.` and on a digit.
    fn fraction(&mut self) -> TokenKind<'a> {
        self.eat_while(|c| c.is_ascii_digit());
        TokenKind::Float(self.view())
    }

    /// Cursor is past the `-` and on the literal.
    fn signed(&mut self) -> TokenKind<'a> {
        if self.first() == '.' {
            self.bump();
            self.fraction()
        } else {
            self.number()
        }
    }

    pub fn next_token(&mut self, mode: LexMode) -> LexResult<Token<'a>> {
        self.skip_whitespace();

        self.byte_start = self.byte;
        let Some(c) = self.bump() else {
            return Ok(Token::new(TokenKind::End, self.make_span()));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,

            '-' if mode == LexMode::ExprStart && self.at_unsigned() => self.signed(),

            '+' => TokenKind::Operator(BinaryOp::Add),
            '-' => TokenKind::Operator(BinaryOp::Sub),
            '*' => TokenKind::Operator(BinaryOp::Mul),
            '/' => TokenKind::Operator(BinaryOp::Div),

            '0'..='9' => self.number(),
            '.' if self.first().is_ascii_digit() => self.fraction(),

            _ => {
                return Err(LexError::new(
                    LexErrorKind::InvalidChar(c),
                    self.make_span(),
                ));
            }
        };

        let span = self.make_span();
        log::trace!(
            "{} {:?} at {}..{} ({mode:?})",
            kind.name(),
            self.view(),
            span.lo(),
            span.hi()
        );
        Ok(Token::new(kind, span))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self.next_token(self.mode);
        if let Ok(token) = &item {
            self.done = token.kind == TokenKind::End;
            self.mode = LexMode::after(&token.kind);
        }
        Some(item)
    }
}
