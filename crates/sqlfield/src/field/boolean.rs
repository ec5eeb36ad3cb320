use super::Field;
use crate::expr::ExprRef;

impl Field<bool> {
    pub fn is_true(&self) -> ExprRef {
        self.eq(true)
    }

    pub fn is_false(&self) -> ExprRef {
        self.eq(false)
    }
}

/// `NOT <field>`
impl std::ops::Not for Field<bool> {
    type Output = Field<bool>;

    fn not(self) -> Self::Output {
        self.apply("NOT ?", Vec::new())
    }
}
