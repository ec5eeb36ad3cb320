use super::Expression;
use crate::builder::{Builder, render};
use crate::classify::is_function_call;
use crate::error::{ExprError, ExprResult};

/// A column reference: optional table, name, optional alias.
///
/// A raw column is written verbatim instead of being quoted (derived columns,
/// function names, `*`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Column {
    table: Option<String>,
    name: String,
    alias: Option<String>,
    raw: bool,
}

impl Column {
    /// A quoted column without table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A column written verbatim.
    pub fn raw(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: true,
            ..Self::default()
        }
    }

    /// `*`
    pub fn star() -> Self {
        Self::raw("*")
    }

    /// Qualify with a table name. An empty name removes the qualifier.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        self.table = (!table.is_empty()).then_some(table);
        self
    }

    /// Set an output alias (`AS alias`).
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

impl Expression for Column {
    fn build(&self, builder: &mut Builder) {
        builder.write_quoted(self);
    }

    fn as_column(&self) -> Option<&Column> {
        Some(self)
    }
}

/// Extract the column behind an expression.
///
/// Valid for plain columns and for argument-free templates naming a function call
/// (`NOW()`), which come back as raw columns. Anything computed is an error.
pub fn to_column(expr: &dyn Expression) -> ExprResult<Column> {
    if let Some(column) = expr.as_column() {
        return Ok(column.clone());
    }
    if let Some(template) = expr.as_template()
        && template.vars().is_empty()
        && is_function_call(template.sql())
    {
        return Ok(Column::raw(template.sql()));
    }
    Err(ExprError::not_a_column(render(expr).sql))
}
