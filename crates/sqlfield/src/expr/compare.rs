//! Comparison predicates.
//!
//! Each predicate knows its own logical negation, so `NOT` over a comparison renders
//! the inverted operator instead of wrapping the predicate in `NOT (...)`.

use super::{Expression, ExprRef};
use crate::builder::Builder;
use crate::error::{ExprError, ExprResult};
use crate::value::{Arg, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `=` (`IS NULL` for NULL, `IN (...)` for lists)
    Eq,
    /// `<>` (`IS NOT NULL` for NULL, `NOT IN (...)` for lists)
    Neq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IN (...)`
    In,
    /// `NOT IN (...)`
    NotIn,
}

impl Op {
    /// SQL spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Neq => "<>",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
        }
    }

    /// The operator selecting exactly the rows this one rejects.
    pub fn negated(self) -> Op {
        match self {
            Op::Eq => Op::Neq,
            Op::Neq => Op::Eq,
            Op::Gt => Op::Lte,
            Op::Lte => Op::Gt,
            Op::Gte => Op::Lt,
            Op::Lt => Op::Gte,
            Op::Like => Op::NotLike,
            Op::NotLike => Op::Like,
            Op::In => Op::NotIn,
            Op::NotIn => Op::In,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Op {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "=" => Ok(Op::Eq),
            "<>" | "!=" => Ok(Op::Neq),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Gte),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Lte),
            "LIKE" => Ok(Op::Like),
            "NOT LIKE" => Ok(Op::NotLike),
            "IN" => Ok(Op::In),
            "NOT IN" => Ok(Op::NotIn),
            _ => Err(ExprError::unknown_operator(s)),
        }
    }
}

fn write_operand(builder: &mut Builder, operand: &ExprRef) {
    builder.add_var_wrapped(&Arg::Expr(operand.clone()));
}

/// Binary comparison: `<column> <op> <value>`.
///
/// `Eq`/`Neq` special-case NULL (`IS [NOT] NULL`) and lists (`[NOT] IN (...)`).
/// `In`/`NotIn` treat the value as the whole value set; see [`In`].
#[derive(Debug, Clone)]
pub struct Comparison {
    op: Op,
    column: ExprRef,
    value: Arg,
}

impl Comparison {
    pub fn new(op: Op, column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::from_ref(op, Arc::new(column), value.into())
    }

    pub(crate) fn from_ref(op: Op, column: ExprRef, value: Arg) -> Self {
        Self { op, column, value }
    }

    pub fn eq(column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::new(Op::Eq, column, value)
    }

    pub fn neq(column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::new(Op::Neq, column, value)
    }

    pub fn gt(column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::new(Op::Gt, column, value)
    }

    pub fn gte(column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::new(Op::Gte, column, value)
    }

    pub fn lt(column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::new(Op::Lt, column, value)
    }

    pub fn lte(column: impl Expression + 'static, value: impl Into<Arg>) -> Self {
        Self::new(Op::Lte, column, value)
    }

    pub fn like(column: impl Expression + 'static, pattern: impl Into<Arg>) -> Self {
        Self::new(Op::Like, column, pattern)
    }

    pub fn not_like(column: impl Expression + 'static, pattern: impl Into<Arg>) -> Self {
        Self::new(Op::NotLike, column, pattern)
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn column(&self) -> &ExprRef {
        &self.column
    }

    pub fn value(&self) -> &Arg {
        &self.value
    }
}

impl Expression for Comparison {
    fn build(&self, builder: &mut Builder) {
        if matches!(self.op, Op::In | Op::NotIn) {
            let values = std::slice::from_ref(&self.value);
            In::build_values(builder, &self.column, values, self.op == Op::NotIn);
            return;
        }

        write_operand(builder, &self.column);
        match (self.op, &self.value) {
            (Op::Eq, Arg::List(list)) if list.is_empty() => {
                builder.write_str(" IN (NULL)");
            }
            (Op::Neq, Arg::List(list)) if list.is_empty() => {
                builder.write_str(" IS NOT NULL");
            }
            (Op::Eq, list @ Arg::List(_)) => {
                builder.write_str(" IN ").add_var(list);
            }
            (Op::Neq, list @ Arg::List(_)) => {
                builder.write_str(" NOT IN ").add_var(list);
            }
            (Op::Eq, Arg::Value(Value::Null)) => {
                builder.write_str(" IS NULL");
            }
            (Op::Neq, Arg::Value(Value::Null)) => {
                builder.write_str(" IS NOT NULL");
            }
            (op, value) => {
                builder
                    .write_char(' ')
                    .write_str(op.as_str())
                    .write_char(' ')
                    .add_var_wrapped(value);
            }
        }
    }

    fn negate(&self) -> Option<ExprRef> {
        Some(Arc::new(Comparison {
            op: self.op.negated(),
            column: self.column.clone(),
            value: self.value.clone(),
        }))
    }
}

/// `<column> IN (<values>)` over an explicit value set.
///
/// - no values: `IN (NULL)`, matching nothing
/// - one scalar or expression: collapses to `= ?`
/// - one list: `IN (?,?,...)` using the list's own brackets
/// - several values: `IN (v1,v2,...)`, lists inside become tuples `(?,?)`
///
/// The negation renders `IS NOT NULL`, `<>` and `NOT IN` respectively.
#[derive(Debug, Clone)]
pub struct In {
    column: ExprRef,
    values: Vec<Arg>,
    negated: bool,
}

impl In {
    pub fn new<A: Into<Arg>>(
        column: impl Expression + 'static,
        values: impl IntoIterator<Item = A>,
    ) -> Self {
        Self::from_ref(Arc::new(column), values.into_iter().map(Into::into).collect())
    }

    pub(crate) fn from_ref(column: ExprRef, values: Vec<Arg>) -> Self {
        Self {
            column,
            values,
            negated: false,
        }
    }

    /// The `NOT IN` form.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn values(&self) -> &[Arg] {
        &self.values
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// `false` when the single value is a list that brings its own brackets.
    fn needs_parentheses(values: &[Arg]) -> bool {
        !matches!(values, [Arg::List(_)])
    }

    fn build_values(builder: &mut Builder, column: &ExprRef, values: &[Arg], negated: bool) {
        write_operand(builder, column);
        match values {
            [] => {
                builder.write_str(if negated { " IS NOT NULL" } else { " IN (NULL)" });
            }
            [Arg::List(list)] if list.is_empty() => {
                builder.write_str(if negated { " IS NOT NULL" } else { " IN (NULL)" });
            }
            [single] if !matches!(single, Arg::List(_)) => {
                builder
                    .write_str(if negated { " <> " } else { " = " })
                    .add_var_wrapped(single);
            }
            _ => {
                builder.write_str(if negated { " NOT IN " } else { " IN " });
                if Self::needs_parentheses(values) {
                    builder.write_char('(');
                    for (i, v) in values.iter().enumerate() {
                        if i > 0 {
                            builder.write_char(',');
                        }
                        builder.add_var_wrapped(v);
                    }
                    builder.write_char(')');
                } else {
                    builder.add_var(&values[0]);
                }
            }
        }
    }
}

impl Expression for In {
    fn build(&self, builder: &mut Builder) {
        Self::build_values(builder, &self.column, &self.values, self.negated);
    }

    fn negate(&self) -> Option<ExprRef> {
        Some(Arc::new(self.clone().not()))
    }
}

/// `<column> [NOT] BETWEEN <from> AND <to>`.
///
/// Both bounds go through the usual parenthesization: arithmetic is bracketed,
/// columns, literals and function calls are not.
#[derive(Debug, Clone)]
pub struct Between {
    column: ExprRef,
    from: Arg,
    to: Arg,
    negated: bool,
}

impl Between {
    pub fn new(
        column: impl Expression + 'static,
        from: impl Into<Arg>,
        to: impl Into<Arg>,
    ) -> Self {
        Self::from_ref(Arc::new(column), from.into(), to.into())
    }

    pub(crate) fn from_ref(column: ExprRef, from: Arg, to: Arg) -> Self {
        Self {
            column,
            from,
            to,
            negated: false,
        }
    }

    /// The `NOT BETWEEN` form.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

impl Expression for Between {
    fn build(&self, builder: &mut Builder) {
        write_operand(builder, &self.column);
        builder.write_str(if self.negated {
            " NOT BETWEEN "
        } else {
            " BETWEEN "
        });
        builder.add_var_wrapped(&self.from);
        builder.write_str(" AND ");
        builder.add_var_wrapped(&self.to);
    }

    fn negate(&self) -> Option<ExprRef> {
        Some(Arc::new(self.clone().not()))
    }
}

/// Build a comparison from an operator string.
///
/// Fails with [`ExprError::UnknownOperator`] for anything [`Op`] does not parse.
pub fn compare(
    op: &str,
    column: impl Expression + 'static,
    value: impl Into<Arg>,
) -> ExprResult<ExprRef> {
    let op: Op = op.parse()?;
    Ok(Arc::new(Comparison::new(op, column, value)))
}

/// A range with optional bounds.
///
/// Both bounds give `BETWEEN`, one bound gives `>=` or `<=`. Neither bound is a
/// construction error.
pub fn between_opt(
    column: impl Expression + 'static,
    from: Option<Arg>,
    to: Option<Arg>,
) -> ExprResult<ExprRef> {
    let column: ExprRef = Arc::new(column);
    match (from, to) {
        (Some(from), Some(to)) => Ok(Arc::new(Between::from_ref(column, from, to))),
        (Some(from), None) => Ok(Arc::new(Comparison::from_ref(Op::Gte, column, from))),
        (None, Some(to)) => Ok(Arc::new(Comparison::from_ref(Op::Lte, column, to))),
        (None, None) => Err(ExprError::EmptyRange),
    }
}
