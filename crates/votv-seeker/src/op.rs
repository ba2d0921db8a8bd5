//! Comparator operators for filter expressions.
//!
//! The [`Op`] enum covers the leading operators a user may type in a column
//! filter box: `>`, `>=`, `<`, `<=` and `=`.

use std::cmp::Ordering;

/// Comparison operator at the start of a comparator expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `=`: equal. Case-insensitive for lexical columns.
    Eq,
    /// `>`: greater than.
    Gt,
    /// `>=`: greater than or equal.
    Gte,
    /// `<`: less than.
    Lt,
    /// `<=`: less than or equal.
    Lte,
}

impl Op {
    /// Two-character operators come first so `>=` is not read as `>`.
    const PREFIXES: [(&'static str, Op); 5] = [
        (">=", Op::Gte),
        ("<=", Op::Lte),
        (">", Op::Gt),
        ("<", Op::Lt),
        ("=", Op::Eq),
    ];

    /// Splits a leading operator off `input`.
    ///
    /// Returns the operator and the rest of the input, untrimmed, or `None`
    /// if `input` does not start with an operator.
    pub fn split_prefix(input: &str) -> Option<(Op, &str)> {
        Op::PREFIXES
            .iter()
            .find_map(|(prefix, op)| input.strip_prefix(*prefix).map(|rest| (*op, rest)))
    }

    /// Evaluates the operator given `cell.cmp(operand)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }

    /// Returns the operator as typed.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
