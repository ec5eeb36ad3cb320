//! Identifier validation for column references built from strings.
//!
//! - Each segment must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - At most two segments: `column` or `table.column`
//! - `*` is accepted as the final segment
//!
//! # Example
//! ```ignore
//! use sqlfield::Column;
//!
//! let c = Column::parse("users.id")?;
//! let all = Column::parse("users.*")?;
//! # Ok::<(), sqlfield::ExprError>(())
//! ```

use crate::error::{ExprError, ExprResult};
use crate::expr::Column;

fn validate_segment(seg: &str, full: &str) -> ExprResult<()> {
    let mut chars = seg.chars();
    let Some(first) = chars.next() else {
        return Err(ExprError::invalid_identifier(format!(
            "empty segment in '{full}'"
        )));
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(ExprError::invalid_identifier(format!(
            "invalid start character '{first}' in '{full}'"
        )));
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || *c == '$' || c.is_ascii_alphanumeric())) {
        return Err(ExprError::invalid_identifier(format!(
            "invalid character '{c}' in '{full}'"
        )));
    }
    Ok(())
}

impl Column {
    /// Parse `column`, `table.column` or `table.*`.
    pub fn parse(s: &str) -> ExprResult<Self> {
        if s.is_empty() {
            return Err(ExprError::invalid_identifier("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(ExprError::invalid_identifier(
                "identifier cannot contain NUL character",
            ));
        }
        if s == "*" {
            return Ok(Column::star());
        }

        let segments: Vec<&str> = s.split('.').collect();
        let (table, name) = match segments.as_slice() {
            [name] => (None, *name),
            [table, name] => (Some(*table), *name),
            _ => {
                return Err(ExprError::invalid_identifier(format!(
                    "too many segments in '{s}'"
                )));
            }
        };

        if let Some(table) = table {
            validate_segment(table, s)?;
        }
        let column = if name == "*" {
            Column::star()
        } else {
            validate_segment(name, s)?;
            Column::new(name)
        };
        Ok(match table {
            Some(table) => column.with_table(table),
            None => column,
        })
    }
}

/// Convert an input into a [`Column`].
pub trait IntoColumn {
    fn into_column(self) -> ExprResult<Column>;
}

impl IntoColumn for Column {
    fn into_column(self) -> ExprResult<Column> {
        Ok(self)
    }
}

impl IntoColumn for &Column {
    fn into_column(self) -> ExprResult<Column> {
        Ok(self.clone())
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> ExprResult<Column> {
        Column::parse(self)
    }
}

impl IntoColumn for String {
    fn into_column(self) -> ExprResult<Column> {
        Column::parse(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_simple() {
        let c = Column::parse("users").unwrap();
        assert_eq!(c.name(), "users");
        assert_eq!(c.table(), None);
    }

    #[test]
    fn column_dotted() {
        let c = Column::parse("users.id").unwrap();
        assert_eq!(c.table(), Some("users"));
        assert_eq!(c.name(), "id");
    }

    #[test]
    fn column_star() {
        let c = Column::parse("users.*").unwrap();
        assert!(c.is_raw());
        assert_eq!(c.name(), "*");
        assert!(Column::parse("*").unwrap().is_raw());
    }

    #[test]
    fn column_with_dollar() {
        assert!(Column::parse("my_var$1").is_ok());
    }

    #[test]
    fn column_rejects_empty() {
        assert!(Column::parse("").is_err());
    }

    #[test]
    fn column_rejects_start_digit() {
        assert!(Column::parse("1table").is_err());
    }

    #[test]
    fn column_rejects_space() {
        assert!(Column::parse("my table").is_err());
    }

    #[test]
    fn column_rejects_double_dot() {
        assert!(Column::parse("users..id").is_err());
    }

    #[test]
    fn column_rejects_trailing_dot() {
        assert!(Column::parse("users.").is_err());
    }

    #[test]
    fn column_rejects_three_parts() {
        let err = Column::parse("db.users.id").unwrap_err();
        assert!(err.is_invalid_identifier());
    }

    #[test]
    fn into_column_from_str() {
        let c = "orders.total".into_column().unwrap();
        assert_eq!(c.table(), Some("orders"));
    }
}
