use clap::builder::styling::{AnsiColor, Effects, Style, Styles};

#[derive(clap::Parser, Debug, Clone, Default)]
#[clap(styles = CARGO_STYLING)]
#[command(version, about = "Parse arithmetic expressions into syntax trees")]
pub struct Cli {
    /// File holding one expression
    pub file: Option<String>,

    /// Parse EXPR instead of reading a file
    #[arg(short, long, value_name = "EXPR", conflicts_with_all = ["file", "stdin"])]
    pub expr: Option<String>,

    /// Do not print diagnostics
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Read input from stdin
    #[arg(long, default_value_t = false, conflicts_with = "file")]
    pub stdin: bool,

    /// Maximum amount of errors to report
    #[arg(long, value_name = "max-errors", default_value_t = 4)]
    pub max_errors: usize,

    /// How to print the syntax tree
    #[arg(short, long, value_enum, default_value_t = Format::Sexp)]
    pub format: Format,

    /// Print the token stream instead of the syntax tree
    #[arg(long, default_value_t = false)]
    pub tokens: bool,

    /// Keep a node for every pair of parentheses
    #[arg(long, default_value_t = false)]
    pub groups: bool,

    /// Log parser activity (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Tree-sitter style s-expression
    #[default]
    Sexp,
    /// Pretty-printed JSON
    Json,
    /// Fully parenthesized source text
    Canonical,
}

const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

/// Cargo's color style
/// [source](https://github.com/crate-ci/clap-cargo/blob/master/src/style.rs)
const CARGO_STYLING: Styles = Styles::styled()
    .header(HEADER)
    .usage(USAGE)
    .literal(LITERAL)
    .placeholder(PLACEHOLDER)
    .error(ERROR)
    .valid(VALID)
    .invalid(INVALID);
