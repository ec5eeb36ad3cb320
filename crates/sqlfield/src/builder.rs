//! Output sink for rendering expressions.
//!
//! [`Builder`] stores SQL pieces and bound values separately. Placeholder text is only
//! generated when the statement is finished, so a fragment rendered into a scratch
//! builder can be spliced into its parent without renumbering.
//!
//! # Example
//!
//! ```ignore
//! use sqlfield::{Builder, Column};
//!
//! let mut b = Builder::new();
//! b.write_quoted(&Column::new("age")).write_str(" > ").push_param(18);
//! let stmt = b.finish();
//! assert_eq!(stmt.sql, "`age` > ?");
//! ```

use crate::classify;
use crate::config::{RenderConfig, truncate_sql_bytes};
use crate::dialect::{Dialect, MySql};
use crate::error::{ExprError, ExprResult};
use crate::expr::{Column, Expression};
use crate::value::{Arg, Value};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum SqlPart {
    Raw(String),
    /// Placeholder for the parameter at this index.
    Param(usize),
}

/// Accumulates rendered SQL text and the parallel list of bound values.
#[derive(Debug, Clone)]
pub struct Builder {
    parts: Vec<SqlPart>,
    params: Vec<Value>,
    dialect: Arc<dyn Dialect>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Create an empty builder for the MySQL dialect.
    pub fn new() -> Self {
        Self::with_dialect(Arc::new(MySql))
    }

    /// Create an empty builder for `dialect`.
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            parts: Vec::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Create an empty builder from a [`RenderConfig`].
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::with_dialect(config.dialect.clone())
    }

    /// An empty builder sharing this builder's dialect.
    pub fn scratch(&self) -> Self {
        Self::with_dialect(self.dialect.clone())
    }

    /// The active dialect.
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Append raw SQL.
    pub fn write_str(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }
        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a single character.
    pub fn write_char(&mut self, ch: char) -> &mut Self {
        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push(ch),
            _ => self.parts.push(SqlPart::Raw(ch.to_string())),
        }
        self
    }

    /// Append a single identifier quoted by the dialect.
    pub fn write_ident(&mut self, ident: &str) -> &mut Self {
        let mut quoted = String::with_capacity(ident.len() + 2);
        self.dialect.write_quoted(&mut quoted, ident);
        self.write_str(&quoted)
    }

    /// Append a column reference: `` `table`.`name` AS `alias` ``.
    ///
    /// Raw columns and `*` are written verbatim.
    pub fn write_quoted(&mut self, column: &Column) -> &mut Self {
        if let Some(table) = column.table() {
            self.write_ident(table);
            self.write_char('.');
        }
        if column.is_raw() || column.name() == "*" {
            self.write_str(column.name());
        } else {
            self.write_ident(column.name());
        }
        if let Some(alias) = column.alias() {
            self.write_str(" AS ");
            self.write_ident(alias);
        }
        self
    }

    /// Append a placeholder and bind its value.
    pub fn push_param(&mut self, value: impl Into<Value>) -> &mut Self {
        self.parts.push(SqlPart::Param(self.params.len()));
        self.params.push(value.into());
        self
    }

    /// Bind a value without writing a placeholder.
    ///
    /// Used for arguments the SQL text references by name rather than by `?`.
    pub fn bind_only(&mut self, value: impl Into<Value>) -> &mut Self {
        self.params.push(value.into());
        self
    }

    /// Bind an argument.
    ///
    /// - scalars become one placeholder
    /// - lists become `(?,?,...)`, or `(NULL)` when empty
    /// - expressions are built in place
    pub fn add_var(&mut self, arg: &Arg) -> &mut Self {
        match arg {
            Arg::Value(v) => self.push_param(v.clone()),
            Arg::List(values) => {
                if values.is_empty() {
                    return self.write_str("(NULL)");
                }
                self.write_char('(');
                self.push_list(values);
                self.write_char(')')
            }
            Arg::Expr(e) | Arg::Verbatim(e) => {
                e.build(self);
                self
            }
        }
    }

    /// Bind an argument that already sits inside explicit brackets.
    ///
    /// Lists are comma-joined without brackets; an empty list binds a single `NULL`.
    pub fn add_var_flat(&mut self, arg: &Arg) -> &mut Self {
        match arg {
            Arg::List(values) if values.is_empty() => self.push_param(Value::Null),
            Arg::List(values) => self.push_list(values),
            other => self.add_var(other),
        }
    }

    /// Bind an argument, parenthesizing nested expressions that are not simple.
    ///
    /// The expression is rendered into a scratch builder first and classified by its
    /// text, so an already bracketed fragment never gets a second pair.
    pub fn add_var_wrapped(&mut self, arg: &Arg) -> &mut Self {
        let expr = match arg {
            Arg::Expr(e) => e,
            other => return self.add_var(other),
        };
        if expr.is_self_delimited() {
            expr.build(self);
            return self;
        }
        let mut scratch = self.scratch();
        expr.build(&mut scratch);
        self.append_wrapped(scratch)
    }

    /// Append a rendered fragment, bracketing it unless it is simple.
    pub fn append_wrapped(&mut self, other: Builder) -> &mut Self {
        if other.is_simple() {
            self.append(other)
        } else {
            self.write_char('(');
            self.append(other);
            self.write_char(')')
        }
    }

    fn push_list(&mut self, values: &[Value]) -> &mut Self {
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.write_char(',');
            }
            self.push_param(v.clone());
        }
        self
    }

    /// Append another builder's SQL and values, consuming it.
    pub fn append(&mut self, other: Builder) -> &mut Self {
        let offset = self.params.len();
        for part in other.parts {
            match part {
                SqlPart::Raw(s) => {
                    self.write_str(&s);
                }
                SqlPart::Param(idx) => self.parts.push(SqlPart::Param(idx + offset)),
            }
        }
        self.params.extend(other.params);
        self
    }

    /// `true` when nothing has been written or bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
            && self.parts.iter().all(|p| matches!(p, SqlPart::Raw(s) if s.is_empty()))
    }

    /// `true` when the rendered fragment can be embedded without parentheses.
    pub fn is_simple(&self) -> bool {
        classify::is_simple_sql(
            &self.canonical_sql(),
            self.params.len(),
            self.dialect.quote_char(),
        )
    }

    /// Number of placeholders written so far.
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, SqlPart::Param(_)))
            .count()
    }

    /// Bound values in order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Render with `?` markers regardless of dialect.
    pub fn canonical_sql(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param(_) => out.push('?'),
            }
        }
        out
    }

    /// Render with the dialect's placeholders.
    pub fn to_sql(&self) -> String {
        self.render().0
    }

    fn render(&self) -> (String, Vec<Slot>) {
        let mut out = String::new();
        let mut slots = Vec::new();
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param(idx) => {
                    let start = out.len();
                    self.dialect.write_placeholder(&mut out, idx + 1);
                    slots.push(Slot {
                        start,
                        end: out.len(),
                        param: *idx,
                    });
                }
            }
        }
        (out, slots)
    }

    /// Finish rendering.
    pub fn finish(self) -> Statement {
        let (sql, slots) = self.render();
        Statement {
            sql,
            params: self.params,
            slots,
        }
    }
}

/// Byte range of one placeholder in [`Statement::sql`].
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    start: usize,
    end: usize,
    param: usize,
}

/// A rendered statement: SQL text plus its bound values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
    #[serde(skip)]
    slots: Vec<Slot>,
}

impl Statement {
    /// Number of placeholders in `sql`.
    pub fn placeholder_count(&self) -> usize {
        self.slots.len()
    }

    /// Check that every placeholder has a bound value.
    ///
    /// Extra values are allowed: templates may bind trailing arguments that the SQL
    /// references by name.
    pub fn validate(&self) -> ExprResult<()> {
        if self.slots.len() > self.params.len() {
            let err = ExprError::PlaceholderMismatch {
                placeholders: self.slots.len(),
                params: self.params.len(),
            };
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "sqlfield.render", error = %err, sql = %self.sql);
            return Err(err);
        }
        Ok(())
    }

    /// SQL with values inlined as literals, for logs.
    pub fn explain(&self) -> String {
        let mut out = String::with_capacity(self.sql.len());
        let mut cursor = 0;
        for slot in &self.slots {
            out.push_str(&self.sql[cursor..slot.start]);
            match self.params.get(slot.param) {
                Some(v) => v.write_literal(&mut out),
                None => out.push_str(&self.sql[slot.start..slot.end]),
            }
            cursor = slot.end;
        }
        out.push_str(&self.sql[cursor..]);
        out
    }

    /// [`Statement::explain`] truncated to `max` bytes.
    pub fn explain_truncated(&self, max: Option<usize>) -> String {
        let explained = self.explain();
        match max {
            Some(max) if explained.len() > max => {
                format!("{}...", truncate_sql_bytes(&explained, max))
            }
            _ => explained,
        }
    }

    /// Split into SQL text and values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Render an expression with the default (MySQL) configuration.
pub fn render<E: Expression + ?Sized>(expr: &E) -> Statement {
    render_with(expr, &RenderConfig::default())
}

/// Render an expression with an explicit configuration.
pub fn render_with<E: Expression + ?Sized>(expr: &E, config: &RenderConfig) -> Statement {
    let mut builder = Builder::from_config(config);
    expr.build(&mut builder);
    let stmt = builder.finish();

    #[cfg(feature = "tracing")]
    {
        let sql = match config.max_sql_length {
            Some(max) if stmt.sql.len() > max => {
                format!("{}...", truncate_sql_bytes(&stmt.sql, max))
            }
            _ => stmt.sql.clone(),
        };
        tracing::debug!(
            target: "sqlfield.render",
            dialect = config.dialect.name(),
            param_count = stmt.params.len(),
            sql = %sql,
        );
    }

    stmt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Postgres;

    #[test]
    fn builds_placeholders_in_order() {
        let mut b = Builder::new();
        b.write_str("a = ").push_param(1).write_str(" AND b = ").push_param("x");
        let stmt = b.finish();
        assert_eq!(stmt.sql, "a = ? AND b = ?");
        assert_eq!(stmt.params, vec![Value::Int(1), Value::from("x")]);
    }

    #[test]
    fn postgres_numbers_across_appended_fragments() {
        let mut w = Builder::with_dialect(Arc::new(Postgres));
        w.write_str("id = ").push_param(42);

        let mut b = Builder::with_dialect(Arc::new(Postgres));
        b.write_str("a = ").push_param(1).write_str(" AND ");
        b.append(w);
        assert_eq!(b.to_sql(), "a = $1 AND id = $2");
    }

    #[test]
    fn list_arg_is_bracketed() {
        let mut b = Builder::new();
        b.add_var(&Arg::list([1, 2, 3]));
        assert_eq!(b.to_sql(), "(?,?,?)");
        assert_eq!(b.params().len(), 3);
    }

    #[test]
    fn empty_list_is_valid_sql() {
        let mut b = Builder::new();
        b.add_var(&Arg::list(Vec::<i32>::new()));
        assert_eq!(b.to_sql(), "(NULL)");
        assert!(b.params().is_empty());
    }

    #[test]
    fn flat_empty_list_binds_null() {
        let mut b = Builder::new();
        b.add_var_flat(&Arg::list(Vec::<i32>::new()));
        assert_eq!(b.to_sql(), "?");
        assert_eq!(b.params(), &[Value::Null]);
    }

    #[test]
    fn quoted_column_with_table_and_alias() {
        let mut b = Builder::new();
        b.write_quoted(&Column::new("id").with_table("users").with_alias("user_id"));
        assert_eq!(b.to_sql(), "`users`.`id` AS `user_id`");
    }

    #[test]
    fn star_column_is_not_quoted() {
        let mut b = Builder::new();
        b.write_quoted(&Column::new("*").with_table("users"));
        assert_eq!(b.to_sql(), "`users`.*");
    }

    #[test]
    fn explain_inlines_values() {
        let mut b = Builder::with_dialect(Arc::new(Postgres));
        b.write_str("name = ").push_param("o'neil").write_str(" AND age > ").push_param(18);
        let stmt = b.finish();
        assert_eq!(stmt.sql, "name = $1 AND age > $2");
        assert_eq!(stmt.explain(), "name = 'o''neil' AND age > 18");
    }

    #[test]
    fn bind_only_allows_trailing_params() {
        let mut b = Builder::new();
        b.write_str("a = @name").bind_only("x");
        let stmt = b.finish();
        assert_eq!(stmt.placeholder_count(), 0);
        assert!(stmt.validate().is_ok());
        assert_eq!(stmt.params.len(), 1);
    }

    #[test]
    fn empty_builder_is_empty() {
        let b = Builder::new();
        assert!(b.is_empty());
        assert!(b.is_simple());
    }
}
