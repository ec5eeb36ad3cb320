//! Identifier quoting and placeholder styles.
//!
//! The renderer never hardcodes a quote character or placeholder syntax; both come
//! from the active [`Dialect`]. [`MySql`] is the reference dialect and the default.

use std::fmt::{Debug, Write};

/// Pluggable SQL dialect.
pub trait Dialect: Debug + Send + Sync {
    /// Short dialect name used in log events.
    fn name(&self) -> &'static str;

    /// Character used to quote identifiers.
    fn quote_char(&self) -> char;

    /// Append a quoted identifier, doubling embedded quote characters.
    fn write_quoted(&self, out: &mut String, ident: &str) {
        let q = self.quote_char();
        out.push(q);
        for ch in ident.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
    }

    /// Append the placeholder for the 1-based parameter `index`.
    fn write_placeholder(&self, out: &mut String, index: usize);
}

/// MySQL: backtick identifiers and `?` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn write_placeholder(&self, out: &mut String, _index: usize) {
        out.push('?');
    }
}

/// PostgreSQL: double-quoted identifiers and `$n` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn write_placeholder(&self, out: &mut String, index: usize) {
        let _ = write!(out, "${index}");
    }
}

/// SQLite: double-quoted identifiers and `?` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn write_placeholder(&self, out: &mut String, _index: usize) {
        out.push('?');
    }
}
