//! Literal classification of rendered SQL fragments.
//!
//! These predicates decide whether a fragment can be spliced into a larger expression
//! without surrounding parentheses. They look at rendered text only; a fragment that
//! matches none of them is treated as complex.

use crate::builder::Builder;
use crate::expr::Expression;
use std::sync::OnceLock;

const SQL_KEYWORDS: &[&str] = &[
    "NULL",
    "TRUE",
    "FALSE",
    "CURRENT_TIMESTAMP",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_USER",
    "NOW",
];

/// Returns `true` if `s` is one parenthesized group: the `(` at the start is closed by
/// the `)` at the end and by nothing earlier.
///
/// `"(a)(b)"` is two groups and returns `false`.
pub fn is_wrapped_in_parens(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'(' || bytes[bytes.len() - 1] != b')' {
        return false;
    }
    let last = bytes.len() - 1;
    let mut depth: usize = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 && i != last {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Case-insensitive match against `NULL`, `TRUE`, `FALSE`, `CURRENT_TIMESTAMP`,
/// `CURRENT_DATE`, `CURRENT_TIME`, `CURRENT_USER` and `NOW`.
pub fn is_sql_keyword(s: &str) -> bool {
    SQL_KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(s))
}

/// Matches `-?` followed by `digits`, `digits.digits` or `.digits`.
pub fn is_numeric_literal(s: &str) -> bool {
    static NUMERIC_RE: OnceLock<regex::Regex> = OnceLock::new();
    NUMERIC_RE
        .get_or_init(|| {
            regex::Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)$")
                .expect("invalid built-in numeric regex")
        })
        .is_match(s)
}

/// Exactly `'...'`; `''` qualifies, a lone `'` does not.
pub fn is_string_literal(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'')
}

/// One or two backtick-quoted identifiers joined by `.`: `` `col` `` or `` `table`.`col` ``.
pub fn is_quoted_column(s: &str) -> bool {
    is_quoted_column_with(s, '`')
}

/// [`is_quoted_column`] for an arbitrary quote character.
pub fn is_quoted_column_with(s: &str, quote: char) -> bool {
    let Some(rest) = quoted_segment(s, quote) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    match rest.strip_prefix('.').and_then(|r| quoted_segment(r, quote)) {
        Some(tail) => tail.is_empty(),
        None => false,
    }
}

/// Consume one `<q>ident<q>` segment and return the remainder.
fn quoted_segment(s: &str, quote: char) -> Option<&str> {
    let inner = s.strip_prefix(quote)?;
    let end = inner.find(quote)?;
    let name = &inner[..end];
    if name.is_empty() || !name.chars().all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(&inner[end + quote.len_utf8()..])
}

/// `NAME(...)` where `NAME` is uppercase ASCII letters or `_`, and the parenthesis
/// opened after the name closes exactly at the final character.
///
/// `COUNT(*)` is a call; `count(*)`, `COUNT(()` and `COUNT(a) + MAX(b)` are not.
pub fn is_function_call(s: &str) -> bool {
    let name_len = s
        .bytes()
        .take_while(|b| b.is_ascii_uppercase() || *b == b'_')
        .count();
    if name_len == 0 {
        return false;
    }
    let args = &s[name_len..];
    args.starts_with('(') && is_wrapped_in_parens(args)
}

/// Classify already-rendered text. `params` is the number of values bound by the
/// fragment and `quote` the active identifier quote character.
pub(crate) fn is_simple_sql(sql: &str, params: usize, quote: char) -> bool {
    sql.is_empty()
        || is_quoted_column_with(sql, quote)
        || is_function_call(sql)
        || (sql == "?" && params == 1)
        || is_wrapped_in_parens(sql)
        || is_sql_keyword(sql)
        || is_numeric_literal(sql)
        || is_string_literal(sql)
        || sql == "*"
        || sql.ends_with(".*")
}

/// Render `expr` into a scratch buffer and classify the result.
///
/// Returns `true` when the expression can be embedded without parentheses.
pub fn is_simple_expression(expr: &dyn Expression) -> bool {
    let mut scratch = Builder::new();
    expr.build(&mut scratch);
    scratch.is_simple()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Column, Expr};

    #[test]
    fn wrapped_in_parens() {
        assert!(is_wrapped_in_parens("(a)"));
        assert!(is_wrapped_in_parens("((a) + (b))"));
        assert!(is_wrapped_in_parens("()"));
        assert!(!is_wrapped_in_parens(""));
        assert!(!is_wrapped_in_parens("(a)(b)"));
        assert!(!is_wrapped_in_parens("(a"));
        assert!(!is_wrapped_in_parens("a)"));
        assert!(!is_wrapped_in_parens("((a)"));
        assert!(!is_wrapped_in_parens("(a))"));
    }

    #[test]
    fn keywords_case_insensitive() {
        assert!(is_sql_keyword("NULL"));
        assert!(is_sql_keyword("null"));
        assert!(is_sql_keyword("Current_Timestamp"));
        assert!(is_sql_keyword("now"));
        assert!(!is_sql_keyword("NOW()"));
        assert!(!is_sql_keyword("NULLS"));
    }

    #[test]
    fn numeric_literals() {
        for ok in ["0", "42", "-7", "3.14", "-0.5", ".5", "-.5"] {
            assert!(is_numeric_literal(ok), "{ok} should be numeric");
        }
        for bad in ["", "-", "1.2.3", "1a", "1.", "abc", "1 + 2", "--1"] {
            assert!(!is_numeric_literal(bad), "{bad} should not be numeric");
        }
    }

    #[test]
    fn string_literals() {
        assert!(is_string_literal("''"));
        assert!(is_string_literal("'abc'"));
        assert!(!is_string_literal("'"));
        assert!(!is_string_literal("abc"));
        assert!(!is_string_literal("'abc"));
    }

    #[test]
    fn quoted_columns() {
        assert!(is_quoted_column("`col`"));
        assert!(is_quoted_column("`table`.`col`"));
        assert!(is_quoted_column("`user_id$2`"));
        assert!(!is_quoted_column("`a`.`b`.`c`"));
        assert!(!is_quoted_column("`a`.b"));
        assert!(!is_quoted_column("\"a\""));
        assert!(!is_quoted_column("`a b`"));
        assert!(!is_quoted_column("``"));
        assert!(!is_quoted_column("`a` + `b`"));
        assert!(is_quoted_column_with("\"users\".\"id\"", '"'));
    }

    #[test]
    fn function_calls() {
        assert!(is_function_call("COUNT(*)"));
        assert!(is_function_call("FROM_UNIXTIME(`x`)"));
        assert!(is_function_call("IF(`a` > ?, ?, ?)"));
        assert!(is_function_call("COALESCE(`a`, (1 + 2))"));
        assert!(!is_function_call("COUNT(()"));
        assert!(!is_function_call("COUNT())"));
        assert!(!is_function_call("count(*)"));
        assert!(!is_function_call("(a)"));
        assert!(!is_function_call("COUNT"));
        assert!(!is_function_call("COUNT(a) + MAX(b)"));
    }

    #[test]
    fn simple_sql_fast_paths() {
        assert!(is_simple_sql("", 0, '`'));
        assert!(is_simple_sql("?", 1, '`'));
        assert!(!is_simple_sql("?", 0, '`'));
        assert!(is_simple_sql("`t`.*", 0, '`'));
        assert!(is_simple_sql("(SELECT 1)", 0, '`'));
        assert!(is_simple_sql("'x'", 0, '`'));
        assert!(!is_simple_sql("a + b", 0, '`'));
        assert!(!is_simple_sql("`a` = ?", 1, '`'));
    }

    #[test]
    fn simple_expression_renders_first() {
        assert!(is_simple_expression(&Column::new("age")));
        assert!(is_simple_expression(&Expr::new("?", vec![1i64.into()])));
        assert!(is_simple_expression(&Expr::raw("NOW()")));
        assert!(!is_simple_expression(&Expr::raw("b + c")));
        assert!(!is_simple_expression(&Expr::new(
            "? + ?",
            vec![1i64.into(), 2i64.into()]
        )));
    }
}
