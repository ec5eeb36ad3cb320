use super::Field;
use crate::value::{Arg, Value};

/// Types that support SQL arithmetic.
pub trait Numeric: Into<Value> {}

impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for u32 {}
impl Numeric for u64 {}
impl Numeric for f32 {}
impl Numeric for f64 {}
#[cfg(feature = "decimal")]
impl Numeric for rust_decimal::Decimal {}

fn operand<T: Numeric>(v: impl Into<T>) -> Arg {
    Arg::Value(v.into().into())
}

impl<T: Numeric> Field<T> {
    pub fn add(&self, value: impl Into<T>) -> Self {
        self.apply("? + ?", vec![operand::<T>(value)])
    }

    pub fn sub(&self, value: impl Into<T>) -> Self {
        self.apply("? - ?", vec![operand::<T>(value)])
    }

    pub fn mul(&self, value: impl Into<T>) -> Self {
        self.apply("? * ?", vec![operand::<T>(value)])
    }

    pub fn div(&self, value: impl Into<T>) -> Self {
        self.apply("? / ?", vec![operand::<T>(value)])
    }

    /// `<field> MOD <value>`
    pub fn modulo(&self, value: impl Into<T>) -> Self {
        self.apply("? MOD ?", vec![operand::<T>(value)])
    }

    /// Integer division, `<field> DIV <value>`.
    pub fn floor_div(&self, value: impl Into<T>) -> Self {
        self.apply("? DIV ?", vec![operand::<T>(value)])
    }

    pub fn add_field(&self, other: &Field<T>) -> Self {
        self.apply("? + ?", vec![other.arg()])
    }

    pub fn sub_field(&self, other: &Field<T>) -> Self {
        self.apply("? - ?", vec![other.arg()])
    }

    pub fn mul_field(&self, other: &Field<T>) -> Self {
        self.apply("? * ?", vec![other.arg()])
    }

    pub fn div_field(&self, other: &Field<T>) -> Self {
        self.apply("? / ?", vec![other.arg()])
    }

    pub fn modulo_field(&self, other: &Field<T>) -> Self {
        self.apply("? MOD ?", vec![other.arg()])
    }

    pub fn floor_div_field(&self, other: &Field<T>) -> Self {
        self.apply("? DIV ?", vec![other.arg()])
    }

    /// `-<field>`
    pub fn neg(&self) -> Self {
        self.apply("-?", Vec::new())
    }

    pub fn abs(&self) -> Self {
        self.apply("ABS(?)", Vec::new())
    }

    pub fn sum(&self) -> Self {
        self.apply("SUM(?)", Vec::new())
    }

    pub fn avg(&self) -> Field<f64> {
        self.apply("AVG(?)", Vec::new())
    }

    pub fn max(&self) -> Self {
        self.apply("MAX(?)", Vec::new())
    }

    pub fn min(&self) -> Self {
        self.apply("MIN(?)", Vec::new())
    }

    /// `ROUND(<field>, <decimals>)`
    pub fn round(&self, decimals: i32) -> Self {
        self.apply("ROUND(?, ?)", vec![Arg::from(decimals)])
    }

    pub fn floor(&self) -> Self {
        self.apply("FLOOR(?)", Vec::new())
    }

    pub fn ceil(&self) -> Self {
        self.apply("CEIL(?)", Vec::new())
    }
}
