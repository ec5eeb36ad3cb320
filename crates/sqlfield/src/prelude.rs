//! Convenient imports for typical `sqlfield` usage.
//!
//! ```ignore
//! use sqlfield::prelude::*;
//! ```

pub use crate::field::{Bool, Bytes, Date, Float, Int, Json, Str, Time, UInt};
#[cfg(feature = "decimal")]
pub use crate::field::Decimal;

pub use crate::{
    Arg, Column, ExprError, ExprRef, ExprResult, Expression, Field, RenderConfig, Statement,
    Value, and, case_of, case_when, current_timestamp, expr, not, now, or, render, render_with,
};
