use std::fmt::Display;
use std::ops::Range;

use adderspan::Span;
use serde::Serialize;

use crate::token::TokenKind;

pub trait Operator: Copy {
    /// Binding power; higher binds tighter.
    fn precedence(self) -> u8;
    fn from_token(kind: TokenKind<'_>) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl BinaryOp {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

impl Operator for BinaryOp {
    // One rung per operator: `*` > `/` > `+` > `-`.
    fn precedence(self) -> u8 {
        match self {
            Self::Mul => 4,
            Self::Div => 3,
            Self::Add => 2,
            Self::Sub => 1,
        }
    }

    fn from_token(kind: TokenKind<'_>) -> Option<Self> {
        match kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Parsed expression.
///
/// Leaves are literals, internal nodes are binary operations. Grouping is
/// implicit in the shape of the tree unless the parser was asked to keep
/// groups, in which case [`SyntaxNode::Parenthesized`] marks each pair of
/// parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SyntaxNode<'a> {
    #[serde(rename = "number")]
    NumberLiteral { text: &'a str, span: Span },

    #[serde(rename = "float")]
    FloatLiteral { text: &'a str, span: Span },

    #[serde(rename = "binary_expression")]
    BinaryExpression {
        left:     Box<Self>,
        operator: BinaryOp,
        right:    Box<Self>,
        span:     Span,
    },

    #[serde(rename = "parenthesized_expression")]
    Parenthesized {
        inner: Box<Self>,
        span:  Span,
    },
}

impl<'a> SyntaxNode<'a> {
    #[must_use]
    pub fn binary(operator: BinaryOp, left: Self, right: Self) -> Self {
        let span = left.span().join(right.span());
        Self::BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::NumberLiteral { span, .. }
            | Self::FloatLiteral { span, .. }
            | Self::BinaryExpression { span, .. }
            | Self::Parenthesized { span, .. } => *span,
        }
    }

    /// Same node, covering `span` instead.
    #[must_use]
    pub(crate) const fn with_span(mut self, new: Span) -> Self {
        match &mut self {
            Self::NumberLiteral { span, .. }
            | Self::FloatLiteral { span, .. }
            | Self::BinaryExpression { span, .. }
            | Self::Parenthesized { span, .. } => *span = new,
        }
        self
    }

    /// Node kind name, as used in s-expressions and JSON output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NumberLiteral { .. } => "number",
            Self::FloatLiteral { .. } => "float",
            Self::BinaryExpression { .. } => "binary_expression",
            Self::Parenthesized { .. } => "parenthesized_expression",
        }
    }

    #[must_use]
    pub const fn text(&self) -> Option<&'a str> {
        match self {
            Self::NumberLiteral { text, .. } | Self::FloatLiteral { text, .. } => Some(*text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn operator(&self) -> Option<BinaryOp> {
        match self {
            Self::BinaryExpression { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    /// Child stored under `name` (`left`, `right` or `inner`).
    #[must_use]
    pub fn child_by_field_name(&self, name: &str) -> Option<&Self> {
        match (self, name) {
            (Self::BinaryExpression { left, .. }, "left") => Some(&**left),
            (Self::BinaryExpression { right, .. }, "right") => Some(&**right),
            (Self::Parenthesized { inner, .. }, "inner") => Some(&**inner),
            _ => None,
        }
    }

    /// Checks a tree against the `source` it was parsed from: leaves hold
    /// literal text and every binary node spans exactly its left operand
    /// through its right one. A node that sat in parentheses covers them as
    /// well, and nothing else.
    #[must_use]
    pub fn is_well_formed(&self, source: &str) -> bool {
        match self {
            Self::NumberLiteral { text, span } => {
                is_number(text) && ungrouped(source, *span) == Some(*text)
            }
            Self::FloatLiteral { text, span } => {
                is_float(text) && ungrouped(source, *span) == Some(*text)
            }
            Self::BinaryExpression {
                left, right, span, ..
            } => {
                wraps(source, *span, left.span().join(right.span()))
                    && left.is_well_formed(source)
                    && right.is_well_formed(source)
            }
            Self::Parenthesized { .. } => false,
        }
    }
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_number(text: &str) -> bool {
    is_digits(text.strip_prefix('-').unwrap_or(text))
}

fn is_float(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    unsigned
        .split_once('.')
        .is_some_and(|(int, frac)| (int.is_empty() || is_digits(int)) && is_digits(frac))
}

fn slice(source: &str, span: Span) -> Option<&str> {
    source.get(Range::<usize>::from(span))
}

/// Text under `span` with any enclosing parentheses peeled off.
fn ungrouped(source: &str, span: Span) -> Option<&str> {
    let mut text = slice(source, span)?;
    while let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        text = inner.trim_matches(is_blank);
    }
    Some(text)
}

/// Whether `outer` is `inner` wrapped in zero or more pairs of parentheses.
fn wraps(source: &str, outer: Span, inner: Span) -> bool {
    if outer == inner {
        return slice(source, outer).is_some();
    }
    if outer.join(inner) != outer {
        return false;
    }
    let before = slice(source, Span::new(outer.lo(), inner.lo()));
    let after = slice(source, Span::new(inner.hi(), outer.hi()));
    let (Some(before), Some(after)) = (before, after) else {
        return false;
    };

    before.starts_with('(')
        && after.ends_with(')')
        && before.chars().all(|c| c == '(' || is_blank(c))
        && after.chars().all(|c| c == ')' || is_blank(c))
        && before.matches('(').count() == after.matches(')').count()
}

#[cfg(test)]
mod test {
    use super::*;

    fn num(text: &str, lo: u32) -> SyntaxNode<'_> {
        let hi = lo + u32::try_from(text.len()).unwrap();
        SyntaxNode::NumberLiteral {
            text,
            span: Span::new(lo, hi),
        }
    }

    #[test]
    fn precedence_ladder() {
        let ops = [BinaryOp::Mul, BinaryOp::Div, BinaryOp::Add, BinaryOp::Sub];
        for pair in ops.windows(2) {
            assert!(pair[0].precedence() > pair[1].precedence());
        }
    }

    #[test]
    fn binary_spans_operands() {
        let node = SyntaxNode::binary(BinaryOp::Add, num("1", 0), num("22", 4));
        assert_eq!(node.span(), Span::new(0, 6));
        assert!(node.is_well_formed("1 + 22"));
    }

    #[test]
    fn loose_binary_span_is_malformed() {
        let source = "1 + 2    ";
        let node = SyntaxNode::BinaryExpression {
            left:     Box::new(num("1", 0)),
            operator: BinaryOp::Add,
            right:    Box::new(num("2", 4)),
            span:     Span::new(0, 9),
        };
        assert!(!node.is_well_formed(source));
        assert!(!node.with_span(Span::new(0, 900)).is_well_formed(source));
    }

    #[test]
    fn parentheses_may_widen_a_span() {
        let node = SyntaxNode::binary(BinaryOp::Mul, num("2", 2), num("3", 4));
        assert!(node.clone().with_span(Span::new(0, 7)).is_well_formed("( 2*3 )"));
        // unbalanced margins
        assert!(!node.clone().with_span(Span::new(0, 6)).is_well_formed("((2*3)"));
        // margin that is not a parenthesis
        assert!(!node.with_span(Span::new(0, 5)).is_well_formed("1+2*3"));

        let leaf = num("4", 3).with_span(Span::new(0, 6));
        assert!(leaf.is_well_formed("(( 4))"));
    }

    #[test]
    fn leaf_text_must_be_a_literal() {
        let bad = num("abc", 0);
        assert!(!bad.is_well_formed("abc"));

        let float = SyntaxNode::FloatLiteral {
            text: "-.5",
            span: Span::new(0, 3),
        };
        assert!(float.is_well_formed("-.5"));
        let float = SyntaxNode::FloatLiteral {
            text: "5.",
            span: Span::new(0, 2),
        };
        assert!(!float.is_well_formed("5."));

        // text that disagrees with the source
        assert!(!num("7", 0).is_well_formed("8"));
        assert!(!num("7", 4).is_well_formed("7"));
    }

    #[test]
    fn fields_by_name() {
        let node = SyntaxNode::binary(BinaryOp::Div, num("8", 0), num("2", 2));
        assert_eq!(node.child_by_field_name("left").and_then(SyntaxNode::text), Some("8"));
        assert_eq!(node.child_by_field_name("right").and_then(SyntaxNode::text), Some("2"));
        assert!(node.child_by_field_name("inner").is_none());
        assert_eq!(node.operator(), Some(BinaryOp::Div));

        let group = SyntaxNode::Parenthesized {
            inner: Box::new(num("1", 1)),
            span:  Span::new(0, 3),
        };
        assert_eq!(group.child_by_field_name("inner").map(SyntaxNode::kind), Some("number"));
        assert!(!group.is_well_formed("(1)"));
    }

    #[test]
    fn json_shape() {
        let node = SyntaxNode::binary(BinaryOp::Sub, num("5", 0), num("-3", 2));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "binary_expression",
                "left": { "type": "number", "text": "5", "span": { "lo": 0, "hi": 1 } },
                "operator": "-",
                "right": { "type": "number", "text": "-3", "span": { "lo": 2, "hi": 4 } },
                "span": { "lo": 0, "hi": 4 },
            })
        );
    }
}
