use std::borrow::Cow;

use adderc::lexer::Lexer;
use adderc::token::TokenKind;
use reedline::{Prompt, Reedline, Signal, ValidationResult, Validator};

pub struct Editor {
    editor: Reedline,
    prompt: AdderPrompt,
}

impl Default for Editor {
    fn default() -> Self {
        use reedline::Vi;

        let edit_mode = Vi::default();

        let editor = Reedline::create()
            .with_edit_mode(Box::new(edit_mode))
            .with_validator(Box::new(OpenParens));
        let prompt = AdderPrompt;

        Self { editor, prompt }
    }
}

pub enum EditorRead {
    Read(String),
    Break,
    Continue,
}

impl Editor {
    pub fn read(&mut self) -> std::io::Result<EditorRead> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(input) if input.trim().is_empty() => Ok(EditorRead::Continue),
            Signal::Success(input) => Ok(EditorRead::Read(input)),
            Signal::CtrlC | Signal::CtrlD => Ok(EditorRead::Break),
        }
    }
}

/// Keeps the line open while a `(` is still waiting for its `)`. A line that
/// does not lex, or that ends in an empty continuation line, is submitted as
/// is so its error gets reported.
pub struct OpenParens;

impl OpenParens {
    fn depth(line: &str) -> Option<usize> {
        Lexer::new(line).try_fold(0, |depth: usize, tk| {
            Some(match tk.ok()?.kind {
                TokenKind::LParen => depth + 1,
                TokenKind::RParen => depth.saturating_sub(1),
                _ => depth,
            })
        })
    }
}

impl Validator for OpenParens {
    fn validate(&self, line: &str) -> ValidationResult {
        if !line.ends_with('\n') && Self::depth(line).is_some_and(|depth| depth > 0) {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Complete
        }
    }
}

pub struct AdderPrompt;

impl Prompt for AdderPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(">> ")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            reedline::PromptHistorySearchStatus::Passing => "",
            reedline::PromptHistorySearchStatus::Failing => "failing ",
        };

        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
