//! Bound values and placeholder arguments.
//!
//! [`Value`] is the closed set of scalars a statement can bind. [`Arg`] is what a
//! placeholder (or comparison operand) consumes: a scalar, a list of scalars, or a
//! nested expression.

use crate::expr::{ExprRef, Expression};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

/// A bindable scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Uuid(uuid::Uuid),
    Json(serde_json::Value),
    #[cfg(feature = "decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as an inline SQL literal.
    ///
    /// Only meant for logs and [`Statement::explain`](crate::Statement::explain);
    /// never execute the output.
    pub fn to_literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }

    pub(crate) fn write_literal(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Bool(true) => out.push_str("TRUE"),
            Value::Bool(false) => out.push_str("FALSE"),
            Value::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Value::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            Value::Float(v) => {
                let _ = write!(out, "{v}");
            }
            Value::Text(s) => push_quoted(out, s),
            Value::Bytes(b) => {
                out.push_str("X'");
                for byte in b {
                    let _ = write!(out, "{byte:02X}");
                }
                out.push('\'');
            }
            Value::Date(d) => push_quoted(out, &d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => push_quoted(out, &t.format("%H:%M:%S%.f").to_string()),
            Value::DateTime(dt) => {
                push_quoted(out, &dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())
            }
            Value::Timestamp(ts) => {
                push_quoted(out, &ts.format("%Y-%m-%d %H:%M:%S%.f").to_string())
            }
            Value::Uuid(u) => push_quoted(out, &u.to_string()),
            Value::Json(j) => push_quoted(out, &j.to_string()),
            #[cfg(feature = "decimal")]
            Value::Decimal(d) => {
                let _ = write!(out, "{d}");
            }
        }
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}

/// An argument consumed by a placeholder.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A single bound scalar.
    Value(Value),
    /// A list of bound scalars, expanded as `?,?,...`.
    List(Vec<Value>),
    /// A nested expression, parenthesized when it is not simple.
    Expr(ExprRef),
    /// A nested expression that is never parenthesized.
    Verbatim(ExprRef),
}

impl Arg {
    /// Wrap any expression.
    pub fn expr(expr: impl Expression + 'static) -> Self {
        Arg::Expr(Arc::new(expr))
    }

    /// Wrap an expression so it is embedded without automatic brackets.
    pub fn verbatim(expr: impl Expression + 'static) -> Self {
        Arg::Verbatim(Arc::new(expr))
    }

    /// Build a list argument.
    pub fn list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Arg::List(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this is a scalar `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Value(Value::Null))
    }

    /// The nested expression, if any.
    pub fn as_expr(&self) -> Option<&ExprRef> {
        match self {
            Arg::Expr(e) | Arg::Verbatim(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<ExprRef> for Arg {
    fn from(expr: ExprRef) -> Self {
        Arg::Expr(expr)
    }
}

impl From<&ExprRef> for Arg {
    fn from(expr: &ExprRef) -> Self {
        Arg::Expr(expr.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Arg {
    fn from(values: Vec<T>) -> Self {
        Arg::list(values)
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v $(as $cast)?)
                }
            }

            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    isize => Int as i64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt,
    usize => UInt as u64,
    f32 => Float as f64,
    f64 => Float,
    String => Text,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    DateTime<Utc> => Timestamp,
    uuid::Uuid => Uuid,
    serde_json::Value => Json,
}

#[cfg(feature = "decimal")]
impl_value_from! {
    rust_decimal::Decimal => Decimal,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Value(Value::from(v))
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(Value::from(v))
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::Value;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

    type BoxError = Box<dyn Error + Sync + Send>;

    fn int_to_sql(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        if *ty == Type::INT2 {
            i16::try_from(v)?.to_sql(ty, out)
        } else if *ty == Type::INT4 {
            i32::try_from(v)?.to_sql(ty, out)
        } else {
            v.to_sql(ty, out)
        }
    }

    impl ToSql for Value {
        fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => v.to_sql(ty, out),
                Value::Int(v) => int_to_sql(*v, ty, out),
                Value::UInt(v) => int_to_sql(i64::try_from(*v)?, ty, out),
                Value::Float(v) => {
                    if *ty == Type::FLOAT4 {
                        (*v as f32).to_sql(ty, out)
                    } else {
                        v.to_sql(ty, out)
                    }
                }
                Value::Text(v) => v.to_sql(ty, out),
                Value::Bytes(v) => <&[u8] as ToSql>::to_sql(&v.as_slice(), ty, out),
                Value::Date(v) => v.to_sql(ty, out),
                Value::Time(v) => v.to_sql(ty, out),
                Value::DateTime(v) => v.to_sql(ty, out),
                Value::Timestamp(v) => v.to_sql(ty, out),
                Value::Uuid(v) => v.to_sql(ty, out),
                Value::Json(v) => v.to_sql(ty, out),
                #[cfg(feature = "decimal")]
                Value::Decimal(v) => v.to_sql(ty, out),
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        to_sql_checked!();
    }
}
