use std::error::Error;

use adderc::lexer::LexErrorKind;
use adderc::parser::{MAX_DEPTH, ParseErrorKind};
use adderspan::Spand;
use codespan_reporting::diagnostic::{Diagnostic, Label};

pub trait Report {
    fn diagnose(&self) -> Diagnostic<()>;
}

/// What an error kind adds to a diagnostic beyond its message.
pub trait Explain {
    fn help(&self) -> String;

    fn labels(&self) -> Vec<Label<()>> {
        Vec::new()
    }
}

impl Explain for LexErrorKind {
    fn help(&self) -> String {
        match self {
            Self::InvalidChar(_) => {
                "expressions are made of numbers, `+ - * /` and parentheses".to_string()
            }
        }
    }
}

impl Explain for ParseErrorKind {
    fn help(&self) -> String {
        match self {
            Self::UnexpectedToken => {
                "make sure operators and operands alternate, like `1 + 2`".to_string()
            }
            Self::UnexpectedEnd => "the expression ends where an operand is expected".to_string(),
            Self::UnmatchedParen { .. } => "close every `(` with a matching `)`".to_string(),
            Self::TooDeep => format!("at most {MAX_DEPTH} levels of nesting are supported"),
        }
    }

    fn labels(&self) -> Vec<Label<()>> {
        match self {
            Self::UnmatchedParen { found } => {
                vec![Label::secondary((), *found).with_message("expected `)` here")]
            }
            _ => Vec::new(),
        }
    }
}

impl<T: Error + Explain> Report for Spand<T> {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_message(self.kind())
            .with_label(Label::primary((), self.span))
            .with_labels(self.kind().labels())
            .with_notes(vec![format!("help: {}", self.kind().help())])
    }
}

impl Report for adderc::Error {
    fn diagnose(&self) -> Diagnostic<()> {
        match self {
            Self::Lex(err) => err.diagnose().with_code("lex"),
            Self::Parse(err) => err.diagnose().with_code("parse"),
        }
    }
}
