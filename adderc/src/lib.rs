use adderspan::Span;
use thiserror::Error;

use crate::ast::SyntaxNode;
use crate::lexer::LexError;
use crate::parser::{ParseError, Parser};

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod print;
pub mod token;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span,
            Self::Parse(err) => err.span,
        }
    }

    /// Byte offset of the offending input.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.span().lo()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Keep a node for every pair of parentheses.
    pub keep_groups: bool,
}

/// Parse `source` into a single expression tree.
pub fn parse(source: &str) -> Result<SyntaxNode<'_>, Error> {
    parse_with(source, ParseOptions::default())
}

pub fn parse_with(source: &str, options: ParseOptions) -> Result<SyntaxNode<'_>, Error> {
    log::debug!("parsing {} bytes ({options:?})", source.len());
    let mut parser = Parser::try_new(source)?.keep_groups(options.keep_groups);
    let result = parser.parse_source();
    if let Err(err) = &result {
        log::debug!("rejected at {}: {err}", err.position());
    }
    result
}
