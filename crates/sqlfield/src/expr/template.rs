//! Raw SQL templates with `?` placeholders.
//!
//! [`Expr::build`] walks the template and replaces each `?` with the rendering of the
//! next argument. Nested expressions are rendered into a scratch builder and wrapped
//! in parentheses unless their text is simple (column, literal, function call,
//! already bracketed group, ...). A placeholder written directly after `(` is
//! already bracketed by the template and is rendered flat.

use super::Expression;
use crate::builder::Builder;
use crate::classify::is_wrapped_in_parens;
use crate::value::Arg;

/// Build an [`Expr`] from a template and arguments.
///
/// ```ignore
/// let e = sqlfield::expr!("? + ?", Column::new("a"), 10);
/// ```
#[macro_export]
macro_rules! expr {
    ($sql:expr $(, $arg:expr)* $(,)?) => {
        $crate::Expr::new($sql, vec![$($crate::Arg::from($arg)),*])
    };
}

/// Raw SQL template.
#[derive(Debug, Clone, Default)]
pub struct Expr {
    sql: String,
    vars: Vec<Arg>,
    without_parentheses: bool,
}

impl Expr {
    /// Create a template with `?` placeholders.
    pub fn new(sql: impl Into<String>, vars: Vec<Arg>) -> Self {
        Self {
            sql: sql.into(),
            vars,
            without_parentheses: false,
        }
    }

    /// Create a SQL fragment without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// Disable automatic parentheses around every argument.
    pub fn without_parentheses(mut self) -> Self {
        self.without_parentheses = true;
        self
    }

    /// Template text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Template arguments.
    pub fn vars(&self) -> &[Arg] {
        &self.vars
    }

    /// `true` if the template is a bare `?` over a single argument.
    pub fn is_passthrough(&self) -> bool {
        self.sql == "?" && self.vars.len() == 1
    }

    /// Arguments to render, with one level of passthrough collapsed: a lone
    /// argument that is itself `?`-over-one-value is replaced by that value.
    fn effective_vars(&self) -> &[Arg] {
        if let [Arg::Expr(inner) | Arg::Verbatim(inner)] = self.vars.as_slice()
            && let Some(template) = inner.as_template()
            && template.is_passthrough()
        {
            return &template.vars;
        }
        &self.vars
    }
}

impl Expression for Expr {
    fn build(&self, builder: &mut Builder) {
        let vars = self.effective_vars();
        let mut idx = 0;
        let mut after_paren = false;
        let mut copied = 0;

        for (pos, ch) in self.sql.char_indices() {
            if ch == '?' && idx < vars.len() {
                builder.write_str(&self.sql[copied..pos]);
                if self.without_parentheses || after_paren {
                    builder.add_var_flat(&vars[idx]);
                } else {
                    builder.add_var_wrapped(&vars[idx]);
                }
                idx += 1;
                copied = pos + 1;
                continue;
            }
            after_paren = ch == '(';
        }
        builder.write_str(&self.sql[copied..]);

        // Unconsumed arguments are bound without placeholder text.
        for arg in &vars[idx..] {
            bind_trailing(builder, arg);
        }
    }

    fn as_template(&self) -> Option<&Expr> {
        Some(self)
    }

    fn needs_grouping(&self) -> bool {
        if is_wrapped_in_parens(&self.sql) {
            return false;
        }
        let upper = self.sql.to_ascii_uppercase();
        upper.contains(" AND ") || upper.contains(" OR ")
    }
}

fn bind_trailing(builder: &mut Builder, arg: &Arg) {
    match arg {
        Arg::Value(v) => {
            builder.bind_only(v.clone());
        }
        Arg::List(values) => {
            for v in values {
                builder.bind_only(v.clone());
            }
        }
        Arg::Expr(e) | Arg::Verbatim(e) => {
            let mut scratch = builder.scratch();
            e.build(&mut scratch);
            for v in scratch.params() {
                builder.bind_only(v.clone());
            }
        }
    }
}
