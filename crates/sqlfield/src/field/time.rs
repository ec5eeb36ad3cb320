//! Date and time functions (MySQL spelling).

use super::Field;
use crate::expr::Expr;
use crate::value::Arg;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

fn microseconds(d: TimeDelta) -> i64 {
    d.num_microseconds()
        .unwrap_or_else(|| d.num_milliseconds().saturating_mul(1000))
}

impl Field<NaiveDateTime> {
    pub fn date(&self) -> Field<NaiveDate> {
        self.apply("DATE(?)", Vec::new())
    }

    pub fn year(&self) -> Field<i64> {
        self.apply("YEAR(?)", Vec::new())
    }

    pub fn month(&self) -> Field<i64> {
        self.apply("MONTH(?)", Vec::new())
    }

    pub fn day(&self) -> Field<i64> {
        self.apply("DAY(?)", Vec::new())
    }

    pub fn hour(&self) -> Field<i64> {
        self.apply("HOUR(?)", Vec::new())
    }

    pub fn minute(&self) -> Field<i64> {
        self.apply("MINUTE(?)", Vec::new())
    }

    pub fn second(&self) -> Field<i64> {
        self.apply("SECOND(?)", Vec::new())
    }

    pub fn unix_timestamp(&self) -> Field<i64> {
        self.apply("UNIX_TIMESTAMP(?)", Vec::new())
    }

    /// `DATE_FORMAT(<field>, <format>)`
    pub fn date_format(&self, format: &str) -> Field<String> {
        self.apply("DATE_FORMAT(?, ?)", vec![Arg::from(format)])
    }

    /// `DATE_ADD(<field>, INTERVAL <n> MICROSECOND)`
    pub fn add_duration(&self, d: TimeDelta) -> Self {
        self.apply(
            "DATE_ADD(?, INTERVAL ? MICROSECOND)",
            vec![Arg::from(microseconds(d))],
        )
    }

    /// `DATE_SUB(<field>, INTERVAL <n> MICROSECOND)`
    pub fn sub_duration(&self, d: TimeDelta) -> Self {
        self.apply(
            "DATE_SUB(?, INTERVAL ? MICROSECOND)",
            vec![Arg::from(microseconds(d))],
        )
    }
}

impl Field<i64> {
    /// `FROM_UNIXTIME(<field>)`
    pub fn from_unixtime(&self) -> Field<NaiveDateTime> {
        self.apply("FROM_UNIXTIME(?)", Vec::new())
    }
}

/// `NOW()`
pub fn now() -> Field<NaiveDateTime> {
    Field::from_expr(Expr::raw("NOW()"))
}

/// `CURRENT_TIMESTAMP`
pub fn current_timestamp() -> Field<NaiveDateTime> {
    Field::from_expr(Expr::raw("CURRENT_TIMESTAMP"))
}
