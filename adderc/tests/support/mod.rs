//! Random well-formed expressions for property tests and benches.

use std::fmt::Write;

use rand::Rng;

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub max_depth: u32,
    pub max_terms: u32,
    pub floats:    bool,
    pub parens:    bool,
    pub negatives: bool,
    pub spaces:    bool,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_terms: 5,
            floats:    true,
            parens:    true,
            negatives: true,
            spaces:    true,
        }
    }
}

impl Shape {
    pub fn expression(&self, rng: &mut impl Rng) -> String {
        let mut out = String::new();
        self.push_expression(&mut out, self.max_depth, rng);
        out
    }

    fn push_expression(&self, out: &mut String, depth: u32, rng: &mut impl Rng) {
        if depth == 0 || rng.gen_bool(0.3) {
            self.push_number(out, rng);
        } else if self.parens && depth > 1 && rng.gen_bool(0.4) {
            out.push('(');
            self.push_expression(out, depth - 1, rng);
            out.push(')');
        } else {
            let terms = rng.gen_range(2..=self.max_terms.max(2));
            self.push_expression(out, depth - 1, rng);
            for _ in 1..terms {
                self.push_space(out, rng);
                out.push(OPERATORS[rng.gen_range(0..OPERATORS.len())]);
                self.push_space(out, rng);
                self.push_expression(out, depth - 1, rng);
            }
        }
    }

    fn push_number(&self, out: &mut String, rng: &mut impl Rng) {
        if self.negatives && rng.gen_bool(0.3) {
            out.push('-');
        }
        if self.floats && rng.gen_bool(0.3) {
            let value: f64 = rng.gen_range(0.0..1000.0);
            if value < 1.0 {
                // leading digit dropped, as in `.25`
                let _ = write!(out, ".{:02}", (value * 100.0).floor());
            } else {
                let _ = write!(out, "{value:.2}");
            }
        } else {
            let _ = write!(out, "{}", rng.gen_range(0..1000));
        }
    }

    fn push_space(&self, out: &mut String, rng: &mut impl Rng) {
        if self.spaces && rng.gen_bool(0.2) {
            out.push([' ', '\t', '\n'][rng.gen_range(0..3)]);
        }
    }

    /// Roughly `pieces` generated expressions combined pairwise, so the
    /// result grows long while the tree stays shallow.
    pub fn long_input(&self, pieces: usize, rng: &mut impl Rng) -> String {
        let mut level: Vec<String> = (0..pieces.max(1)).map(|_| self.expression(rng)).collect();
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| match pair {
                    [lhs, rhs] => {
                        let op = OPERATORS[rng.gen_range(0..OPERATORS.len())];
                        format!("({lhs}) {op} ({rhs})")
                    }
                    [single] => single.clone(),
                    _ => unreachable!(),
                })
                .collect();
        }
        level.pop().unwrap_or_default()
    }
}
