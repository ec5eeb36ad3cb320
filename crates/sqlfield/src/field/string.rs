use super::Field;
use crate::expr::{Comparison, ExprRef, Expr, Op};
use crate::value::Arg;
use std::sync::Arc;

impl Field<String> {
    /// `<field> LIKE <pattern>`
    pub fn like(&self, pattern: impl Into<String>) -> ExprRef {
        Arc::new(Comparison::from_ref(
            Op::Like,
            self.expr(),
            Arg::from(pattern.into()),
        ))
    }

    /// `<field> NOT LIKE <pattern>`
    pub fn not_like(&self, pattern: impl Into<String>) -> ExprRef {
        Arc::new(Comparison::from_ref(
            Op::NotLike,
            self.expr(),
            Arg::from(pattern.into()),
        ))
    }

    /// `<field> REGEXP <pattern>`
    pub fn regexp(&self, pattern: impl Into<String>) -> ExprRef {
        Arc::new(Expr::new(
            "? REGEXP ?",
            vec![self.arg(), Arg::from(pattern.into())],
        ))
    }

    pub fn upper(&self) -> Self {
        self.apply("UPPER(?)", Vec::new())
    }

    pub fn lower(&self) -> Self {
        self.apply("LOWER(?)", Vec::new())
    }

    /// Character count.
    pub fn length(&self) -> Field<i64> {
        self.apply("CHAR_LENGTH(?)", Vec::new())
    }

    pub fn trim(&self) -> Self {
        self.apply("TRIM(?)", Vec::new())
    }

    /// `CONCAT(<field>, <other>)`; `other` may be a value or another field.
    pub fn concat(&self, other: impl Into<Arg>) -> Self {
        self.apply("CONCAT(?, ?)", vec![other.into()])
    }

    pub fn replace(&self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.apply(
            "REPLACE(?, ?, ?)",
            vec![Arg::from(from.into()), Arg::from(to.into())],
        )
    }

    /// `SUBSTRING(<field>, <pos>, <len>)`, 1-based.
    pub fn substring(&self, pos: i64, len: i64) -> Self {
        self.apply("SUBSTRING(?, ?, ?)", vec![Arg::from(pos), Arg::from(len)])
    }

    /// `FIND_IN_SET(<field>, <set>)` with `set` a comma-separated list.
    pub fn find_in_set(&self, set: impl Into<String>) -> Field<i64> {
        self.apply("FIND_IN_SET(?, ?)", vec![Arg::from(set.into())])
    }
}
