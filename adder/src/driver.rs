use std::fmt::Write as _;
use std::io::{self, Read, Write as _};
use std::process::ExitCode;

use adderc::ParseOptions;
use adderc::ast::SyntaxNode;
use adderc::lexer::Lexer;
use adderc::token::Token;
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::{Files, SimpleFile};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use crate::cli::{Cli, Format};
use crate::editor::{Editor, EditorRead};
use crate::report::Report;

pub struct Driver {
    file:       Option<SimpleFile<String, String>>,
    options:    ParseOptions,
    format:     Format,
    tokens:     bool,
    max_errors: usize,
    quiet:      bool,
}

impl Driver {
    fn read_stdin() -> io::Result<String> {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }

    pub fn from_config(cfg: Cli) -> io::Result<Self> {
        let file = if let Some(expr) = cfg.expr {
            Some(SimpleFile::new("<expr>".to_string(), expr))
        } else if cfg.stdin {
            Some(SimpleFile::new("<stdin>".to_string(), Self::read_stdin()?))
        } else {
            cfg.file
                .map(|path| {
                    let source = std::fs::read_to_string(&path)?;
                    Ok::<_, io::Error>(SimpleFile::new(path, source))
                })
                .transpose()?
        };
        Ok(Self {
            file,
            options: ParseOptions {
                keep_groups: cfg.groups,
            },
            format: cfg.format,
            tokens: cfg.tokens,
            max_errors: cfg.max_errors,
            quiet: cfg.quiet,
        })
    }

    pub fn run(self) -> io::Result<ExitCode> {
        if let Some(file) = &self.file {
            let ok = self.process(file)?;
            Ok(if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        } else {
            self.repl()?;
            Ok(ExitCode::SUCCESS)
        }
    }

    fn report<'a, F, E>(&self, errors: &[E], files: &'a F)
    where
        F: Files<'a, FileId = ()>,
        E: Report,
    {
        if self.quiet {
            return;
        }
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        let mut displayed = 0;
        {
            let mut writer = writer.lock();
            for e in errors.iter().take(self.max_errors) {
                let report = e.diagnose();
                let _ = term::emit(&mut writer, &config, files, &report);
                displayed += 1;
            }
        }

        let mut message = self.file.as_ref().map_or_else(
            || "could not parse input".to_string(),
            |file| format!("could not parse {}", file.name()),
        );

        let _ = message.write_fmt(format_args!(
            " due to {} previous {} ({} emitted)",
            errors.len(),
            if errors.len() > 1 { "errors" } else { "error" },
            displayed
        ));

        let error = Diagnostic::error().with_message(message);

        let _ = term::emit(&mut writer.lock(), &config, files, &error);
    }

    /// Lex or parse one source and print the result. Returns whether the
    /// source was accepted.
    fn process(&self, file: &SimpleFile<String, String>) -> io::Result<bool> {
        let source = file.source().as_str();

        if self.tokens {
            return match Lexer::new(source).lex_all() {
                Ok(tokens) => {
                    Self::print_tokens(&tokens)?;
                    Ok(true)
                }
                Err(errors) => {
                    log::info!("{} lexical errors in {}", errors.len(), file.name());
                    self.report(&errors, file);
                    Ok(false)
                }
            };
        }

        match adderc::parse_with(source, self.options) {
            Ok(node) => {
                let rendered = self.render(&node)?;
                writeln!(io::stdout().lock(), "{rendered}")?;
                Ok(true)
            }
            Err(err) => {
                log::info!("{} rejected at byte {}", file.name(), err.position());
                self.report(&[err], file);
                Ok(false)
            }
        }
    }

    fn render(&self, node: &SyntaxNode<'_>) -> io::Result<String> {
        match self.format {
            Format::Sexp => Ok(node.to_sexp()),
            Format::Canonical => Ok(node.to_string()),
            Format::Json => Ok(serde_json::to_string_pretty(node)?),
        }
    }

    fn print_tokens(tokens: &[Token<'_>]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for tk in tokens {
            writeln!(
                out,
                "{:>4}..{:<4} {:<8} {}",
                tk.span.lo(),
                tk.span.hi(),
                tk.kind.name(),
                tk.kind
            )?;
        }
        Ok(())
    }

    fn repl(&self) -> io::Result<()> {
        let mut editor = Editor::default();
        loop {
            let signal = editor.read()?;
            let input = match signal {
                EditorRead::Read(input) => input,
                EditorRead::Break => break,
                EditorRead::Continue => continue,
            };

            let file = SimpleFile::new("<stdin>".to_string(), input);
            self.process(&file)?;
        }

        Ok(())
    }
}
