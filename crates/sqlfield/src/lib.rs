//! # sqlfield
//!
//! Type-safe SQL expressions that render to parameterized SQL.
//!
//! ## Features
//!
//! - **Typed fields**: `Field<T>` only offers operations that make sense for `T`
//! - **Precedence-aware**: nested fragments are parenthesized only when needed
//! - **Explicit negation**: `NOT` over a comparison renders the inverted operator
//! - **Parameterized**: values are always bound, never interpolated
//! - **Dialects**: MySQL (default), Postgres and SQLite quoting/placeholders
//!
//! ## Example
//!
//! ```ignore
//! use sqlfield::prelude::*;
//!
//! let age = Int::new("users", "age");
//! let name = Str::new("users", "name");
//!
//! let cond = and([age.add(1).gt(18), name.like("a%"), age.lt_opt(None::<i64>)]);
//! let stmt = render(&cond);
//! assert_eq!(stmt.sql, "((`users`.`age` + ?) > ? AND `users`.`name` LIKE ?)");
//!
//! let stmt = render_with(&cond, &RenderConfig::new().postgres());
//! assert_eq!(stmt.sql, r#"(("users"."age" + $1) > $2 AND "users"."name" LIKE $3)"#);
//! ```
//!
//! ## Raw templates
//!
//! ```ignore
//! use sqlfield::{Column, Expr, expr, render};
//!
//! let sum = expr!("? + ?", Column::new("a"), Column::new("b"));
//! let e = expr!("? MOD ?", sum, Expr::raw("c - d"));
//! assert_eq!(render(&e).sql, "(`a` + `b`) MOD (c - d)");
//! ```

pub mod builder;
pub mod classify;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod field;
pub mod ident;
pub mod prelude;
pub mod value;

pub use builder::{Builder, Statement, render, render_with};
pub use config::RenderConfig;
pub use dialect::{Dialect, MySql, Postgres, Sqlite};
pub use error::{ExprError, ExprResult};
pub use expr::{
    And, Between, Case, CaseBuilder, CaseInit, Column, Comparison, Empty, Expr, ExprRef,
    Expression, In, Not, Op, Or, When, and, between_opt, case_of, case_when, compare, not, or,
    to_column,
};
pub use field::{Field, Numeric, current_timestamp, now};
pub use ident::IntoColumn;
pub use value::{Arg, Value};
