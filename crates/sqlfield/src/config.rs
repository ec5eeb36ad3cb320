use crate::dialect::{Dialect, MySql, Postgres, Sqlite};
use std::sync::Arc;

/// Rendering configuration.
///
/// Defaults to the MySQL dialect with log output truncated at 200 chars.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Dialect used for identifier quoting and placeholders.
    pub dialect: Arc<dyn Dialect>,
    /// Truncate long SQL strings in log events (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: Arc::new(MySql),
            max_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom dialect.
    pub fn with_dialect(mut self, dialect: impl Dialect + 'static) -> Self {
        self.dialect = Arc::new(dialect);
        self
    }

    /// Use the MySQL dialect.
    pub fn mysql(self) -> Self {
        self.with_dialect(MySql)
    }

    /// Use the PostgreSQL dialect.
    pub fn postgres(self) -> Self {
        self.with_dialect(Postgres)
    }

    /// Use the SQLite dialect.
    pub fn sqlite(self) -> Self {
        self.with_dialect(Sqlite)
    }

    /// Set maximum SQL length to display.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

/// Truncate `sql` to at most `max` bytes on a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max: usize) -> &str {
    if sql.len() <= max {
        return sql;
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
