//! Typed column fields.
//!
//! A [`Field<T>`] is an expression whose SQL value has Rust type `T`. Which
//! operations are available depends on `T`: every field can be compared against
//! values convertible to `T`, numeric fields get arithmetic and aggregates,
//! `Field<String>` gets pattern matching and string functions, and so on.
//!
//! ```ignore
//! use sqlfield::field::{Int, Str};
//!
//! let age = Int::new("users", "age");
//! let name = Str::new("users", "name");
//!
//! let cond = sqlfield::and([age.add(1).gt(18), name.like("a%")]);
//! // ((`users`.`age` + ?) > ? AND `users`.`name` LIKE ?)
//! ```

mod boolean;
mod numeric;
mod string;
mod time;

#[cfg(test)]
mod tests;

pub use numeric::Numeric;
pub use time::{current_timestamp, now};

use crate::builder::Builder;
use crate::error::ExprResult;
use crate::expr::{
    Between, Column, Comparison, Empty, Expr, ExprRef, Expression, In, Op, to_column,
};
use crate::ident::IntoColumn;
use crate::value::{Arg, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// `BIGINT`-like column.
pub type Int = Field<i64>;
/// Unsigned integer column.
pub type UInt = Field<u64>;
/// Floating point column.
pub type Float = Field<f64>;
/// Exact decimal column.
#[cfg(feature = "decimal")]
pub type Decimal = Field<rust_decimal::Decimal>;
/// Text column.
pub type Str = Field<String>;
/// Boolean column.
pub type Bool = Field<bool>;
/// `DATETIME` column.
pub type Time = Field<chrono::NaiveDateTime>;
/// `DATE` column.
pub type Date = Field<chrono::NaiveDate>;
/// Binary column.
pub type Bytes = Field<Vec<u8>>;
/// JSON column.
pub type Json = Field<serde_json::Value>;

/// An expression producing values of type `T`.
pub struct Field<T> {
    expr: ExprRef,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("type", &std::any::type_name::<T>())
            .field("expr", &self.expr)
            .finish()
    }
}

impl<T> Field<T> {
    /// A column of `table`. An empty table name leaves the column unqualified.
    pub fn new(table: &str, column: &str) -> Self {
        Self::from_expr(Column::new(column).with_table(table))
    }

    /// A column parsed from `column` or `table.column`, with identifier validation.
    pub fn parse(column: impl IntoColumn) -> ExprResult<Self> {
        Ok(Self::from_expr(column.into_column()?))
    }

    /// Wrap an arbitrary expression.
    pub fn from_expr(expr: impl Into<ExprRef>) -> Self {
        Self {
            expr: expr.into(),
            _marker: PhantomData,
        }
    }

    /// The underlying expression.
    pub fn expr(&self) -> ExprRef {
        self.expr.clone()
    }

    pub(crate) fn arg(&self) -> Arg {
        Arg::Expr(self.expr.clone())
    }

    /// The column behind this field; fails for computed fields.
    pub fn to_column(&self) -> ExprResult<Column> {
        to_column(self.expr.as_ref())
    }

    /// Re-qualify the column with another table.
    pub fn with_table(&self, table: &str) -> ExprResult<Self> {
        Ok(Self::from_expr(self.to_column()?.with_table(table)))
    }

    /// `<field> AS <alias>`.
    pub fn as_alias(&self, alias: &str) -> Self {
        match self.expr.as_column() {
            Some(column) => Self::from_expr(column.clone().with_alias(alias)),
            None => Self::from_expr(Aliased {
                expr: self.expr.clone(),
                alias: alias.to_string(),
            }),
        }
    }

    /// Template over this field followed by `rest`.
    pub(crate) fn apply<U>(&self, template: &str, rest: Vec<Arg>) -> Field<U> {
        let mut vars = Vec::with_capacity(rest.len() + 1);
        vars.push(self.arg());
        vars.extend(rest);
        Field::from_expr(Expr::new(template, vars))
    }

    fn compare_arg(&self, op: Op, value: Arg) -> ExprRef {
        Arc::new(Comparison::from_ref(op, self.expr.clone(), value))
    }

    pub fn is_null(&self) -> ExprRef {
        self.compare_arg(Op::Eq, Arg::Value(Value::Null))
    }

    pub fn is_not_null(&self) -> ExprRef {
        self.compare_arg(Op::Neq, Arg::Value(Value::Null))
    }

    /// `COUNT(<field>)`
    pub fn count(&self) -> Field<i64> {
        self.apply("COUNT(?)", Vec::new())
    }

    /// `DISTINCT <field>`
    pub fn distinct(&self) -> Self {
        self.apply("DISTINCT ?", Vec::new())
    }

    /// `IFNULL(<field>, <value>)`
    pub fn if_null(&self, value: impl Into<Arg>) -> Self {
        self.apply("IFNULL(?, ?)", vec![value.into()])
    }

    /// `<field> ASC`
    pub fn asc(&self) -> Expr {
        Expr::new("? ASC", vec![self.arg()])
    }

    /// `<field> DESC`
    pub fn desc(&self) -> Expr {
        Expr::new("? DESC", vec![self.arg()])
    }

    pub fn eq_field(&self, other: &Field<T>) -> ExprRef {
        self.compare_arg(Op::Eq, other.arg())
    }

    pub fn neq_field(&self, other: &Field<T>) -> ExprRef {
        self.compare_arg(Op::Neq, other.arg())
    }

    pub fn gt_field(&self, other: &Field<T>) -> ExprRef {
        self.compare_arg(Op::Gt, other.arg())
    }

    pub fn gte_field(&self, other: &Field<T>) -> ExprRef {
        self.compare_arg(Op::Gte, other.arg())
    }

    pub fn lt_field(&self, other: &Field<T>) -> ExprRef {
        self.compare_arg(Op::Lt, other.arg())
    }

    pub fn lte_field(&self, other: &Field<T>) -> ExprRef {
        self.compare_arg(Op::Lte, other.arg())
    }
}

fn empty() -> ExprRef {
    Arc::new(Empty)
}

fn to_value<T: Into<Value>>(v: impl Into<T>) -> Arg {
    Arg::Value(v.into().into())
}

/// Comparisons against values of the field's type.
///
/// The `_opt` variants render nothing for `None`, so optional filters can be
/// combined with [`and`](crate::and) without branching.
impl<T: Into<Value>> Field<T> {
    pub fn eq(&self, value: impl Into<T>) -> ExprRef {
        self.compare_arg(Op::Eq, to_value::<T>(value))
    }

    pub fn neq(&self, value: impl Into<T>) -> ExprRef {
        self.compare_arg(Op::Neq, to_value::<T>(value))
    }

    pub fn gt(&self, value: impl Into<T>) -> ExprRef {
        self.compare_arg(Op::Gt, to_value::<T>(value))
    }

    pub fn gte(&self, value: impl Into<T>) -> ExprRef {
        self.compare_arg(Op::Gte, to_value::<T>(value))
    }

    pub fn lt(&self, value: impl Into<T>) -> ExprRef {
        self.compare_arg(Op::Lt, to_value::<T>(value))
    }

    pub fn lte(&self, value: impl Into<T>) -> ExprRef {
        self.compare_arg(Op::Lte, to_value::<T>(value))
    }

    /// `<field> IN (...)`; see [`In`] for how the value count changes the shape.
    pub fn in_values<V: Into<T>>(&self, values: impl IntoIterator<Item = V>) -> ExprRef {
        Arc::new(self.in_expr(values))
    }

    pub fn not_in<V: Into<T>>(&self, values: impl IntoIterator<Item = V>) -> ExprRef {
        Arc::new(self.in_expr(values).not())
    }

    fn in_expr<V: Into<T>>(&self, values: impl IntoIterator<Item = V>) -> In {
        In::from_ref(
            self.expr.clone(),
            values.into_iter().map(to_value::<T>).collect(),
        )
    }

    pub fn between(&self, from: impl Into<T>, to: impl Into<T>) -> ExprRef {
        Arc::new(self.between_expr(from, to))
    }

    pub fn not_between(&self, from: impl Into<T>, to: impl Into<T>) -> ExprRef {
        Arc::new(self.between_expr(from, to).not())
    }

    fn between_expr(&self, from: impl Into<T>, to: impl Into<T>) -> Between {
        Between::from_ref(self.expr.clone(), to_value::<T>(from), to_value::<T>(to))
    }

    pub fn eq_opt(&self, value: Option<impl Into<T>>) -> ExprRef {
        value.map_or_else(empty, |v| self.eq(v))
    }

    pub fn neq_opt(&self, value: Option<impl Into<T>>) -> ExprRef {
        value.map_or_else(empty, |v| self.neq(v))
    }

    pub fn gt_opt(&self, value: Option<impl Into<T>>) -> ExprRef {
        value.map_or_else(empty, |v| self.gt(v))
    }

    pub fn gte_opt(&self, value: Option<impl Into<T>>) -> ExprRef {
        value.map_or_else(empty, |v| self.gte(v))
    }

    pub fn lt_opt(&self, value: Option<impl Into<T>>) -> ExprRef {
        value.map_or_else(empty, |v| self.lt(v))
    }

    pub fn lte_opt(&self, value: Option<impl Into<T>>) -> ExprRef {
        value.map_or_else(empty, |v| self.lte(v))
    }

    pub fn in_values_opt<V: Into<T>>(
        &self,
        values: Option<impl IntoIterator<Item = V>>,
    ) -> ExprRef {
        values.map_or_else(empty, |v| self.in_values(v))
    }

    pub fn not_in_opt<V: Into<T>>(&self, values: Option<impl IntoIterator<Item = V>>) -> ExprRef {
        values.map_or_else(empty, |v| self.not_in(v))
    }

    /// Range with optional bounds: both give `BETWEEN`, one gives `>=` / `<=`,
    /// neither renders nothing.
    pub fn between_opt(&self, from: Option<impl Into<T>>, to: Option<impl Into<T>>) -> ExprRef {
        match (from, to) {
            (Some(from), Some(to)) => self.between(from, to),
            (Some(from), None) => self.gte(from),
            (None, Some(to)) => self.lte(to),
            (None, None) => empty(),
        }
    }

    /// Negated [`Field::between_opt`]: one bound gives `<` / `>`.
    pub fn not_between_opt(
        &self,
        from: Option<impl Into<T>>,
        to: Option<impl Into<T>>,
    ) -> ExprRef {
        match (from, to) {
            (Some(from), Some(to)) => self.not_between(from, to),
            (Some(from), None) => self.lt(from),
            (None, Some(to)) => self.gt(to),
            (None, None) => empty(),
        }
    }
}

impl<T> Expression for Field<T> {
    fn build(&self, builder: &mut Builder) {
        self.expr.build(builder)
    }

    fn negate(&self) -> Option<ExprRef> {
        self.expr.negate()
    }

    fn as_template(&self) -> Option<&Expr> {
        self.expr.as_template()
    }

    fn as_column(&self) -> Option<&Column> {
        self.expr.as_column()
    }

    fn is_self_delimited(&self) -> bool {
        self.expr.is_self_delimited()
    }

    fn needs_grouping(&self) -> bool {
        self.expr.needs_grouping()
    }

    fn build_operand(&self, builder: &mut Builder) -> bool {
        self.expr.build_operand(builder)
    }
}

impl<T> From<Field<T>> for Arg {
    fn from(field: Field<T>) -> Self {
        Arg::Expr(field.expr)
    }
}

impl<T> From<&Field<T>> for Arg {
    fn from(field: &Field<T>) -> Self {
        field.arg()
    }
}

impl<T> From<Field<T>> for ExprRef {
    fn from(field: Field<T>) -> Self {
        field.expr
    }
}

/// `<expr> AS <alias>` for computed expressions.
#[derive(Debug, Clone)]
pub struct Aliased {
    expr: ExprRef,
    alias: String,
}

impl From<Aliased> for ExprRef {
    fn from(aliased: Aliased) -> Self {
        Arc::new(aliased)
    }
}

impl Expression for Aliased {
    fn build(&self, builder: &mut Builder) {
        builder.add_var_wrapped(&Arg::Expr(self.expr.clone()));
        builder.write_str(" AS ").write_ident(&self.alias);
    }
}
