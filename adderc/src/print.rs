use std::fmt::{self, Display, Write};

use crate::ast::SyntaxNode;

/// Canonical, fully parenthesized source text.
///
/// Every binary node is wrapped in its own parentheses, so parsing the output
/// again gives back the same tree shape. Retained groups print only their
/// inner node.
impl Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral { text, .. } | Self::FloatLiteral { text, .. } => f.write_str(text),
            Self::BinaryExpression {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Self::Parenthesized { inner, .. } => Display::fmt(&**inner, f),
        }
    }
}

/// S-expression view of a tree, without spans.
pub struct Sexp<'t, 'a>(pub &'t SyntaxNode<'a>);

impl Display for Sexp<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0;
        f.write_char('(')?;
        f.write_str(node.kind())?;
        match node {
            SyntaxNode::NumberLiteral { text, .. } | SyntaxNode::FloatLiteral { text, .. } => {
                write!(f, " {text:?}")?;
            }
            SyntaxNode::BinaryExpression {
                left,
                operator,
                right,
                ..
            } => {
                write!(
                    f,
                    " left: {} operator: \"{operator}\" right: {}",
                    Sexp(&**left),
                    Sexp(&**right)
                )?;
            }
            SyntaxNode::Parenthesized { inner, .. } => {
                write!(f, " inner: {}", Sexp(&**inner))?;
            }
        }
        f.write_char(')')
    }
}

impl SyntaxNode<'_> {
    #[must_use]
    pub const fn sexp(&self) -> Sexp<'_, '_> {
        Sexp(self)
    }

    #[must_use]
    pub fn to_sexp(&self) -> String {
        self.sexp().to_string()
    }
}

#[cfg(test)]
mod test {
    use crate::{ParseOptions, parse, parse_with};

    #[test]
    fn canonical_text() {
        let cases = [
            ("1+2*3", "(1 + (2 * 3))"),
            ("1 - 2 - 3", "((1 - 2) - 3)"),
            ("(1+2)*3", "((1 + 2) * 3)"),
            ("5--3", "(5 - -3)"),
            ("-1.5+2", "(-1.5 + 2)"),
            ("((7))", "7"),
        ];
        for (src, expected) in cases {
            assert_eq!(parse(src).unwrap().to_string(), expected, "{src}");
        }
    }

    #[test]
    fn reparse_is_stable() {
        let inputs = [
            "1+2*3",
            "1-2+3-4",
            "8/2*2/-4",
            "(1+2)*(3-.5)",
            "-1-(-2)--3",
            "((((1))))/(2)",
            "\t1 *\n2\r\n",
        ];
        for src in inputs {
            let first = parse(src).unwrap();
            let text = first.to_string();
            let second = parse(&text).unwrap();
            assert_eq!(first.to_sexp(), second.to_sexp(), "{src} -> {text}");
            assert_eq!(text, second.to_string());
        }
    }

    #[test]
    fn sexp_of_float_sum() {
        assert_eq!(
            parse("-1.5+2").unwrap().to_sexp(),
            r#"(binary_expression left: (float "-1.5") operator: "+" right: (number "2"))"#
        );
    }

    #[test]
    fn groups_print_transparently() {
        let options = ParseOptions { keep_groups: true };
        let node = parse_with("(1+2)*3", options).unwrap();
        assert_eq!(node.to_string(), "((1 + 2) * 3)");
        assert_eq!(
            node.to_sexp(),
            "(binary_expression left: (parenthesized_expression inner: (binary_expression \
             left: (number \"1\") operator: \"+\" right: (number \"2\"))) operator: \"*\" \
             right: (number \"3\"))"
        );
    }
}
