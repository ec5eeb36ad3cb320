//! CASE expressions.
//!
//! ```ignore
//! let grade = case_when::<String>()
//!     .when(score.gte(90), "A")
//!     .when(score.gte(80), "B")
//!     .else_("C");
//! // CASE WHEN (`score` >= ?) THEN ? WHEN (`score` >= ?) THEN ? ELSE ? END
//! ```
//!
//! [`case_when`] and [`case_of`] start a typed builder. The first state only offers
//! `when`, so a CASE without branches cannot be built; `else_` and `end` consume the
//! builder and yield a [`Field`].

use super::Expression;
use crate::builder::Builder;
use crate::field::Field;
use crate::value::Arg;
use std::marker::PhantomData;

/// One `WHEN <condition> THEN <result>` branch.
///
/// In a simple CASE the condition is the value compared against the subject.
#[derive(Debug, Clone)]
pub struct When {
    pub condition: Arg,
    pub result: Arg,
}

/// `CASE [subject] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, Default)]
pub struct Case {
    subject: Option<Arg>,
    whens: Vec<When>,
    else_value: Option<Arg>,
}

impl Case {
    /// Searched form: `CASE WHEN <condition> THEN <result> ... END`.
    pub fn searched() -> Self {
        Self::default()
    }

    /// Simple form: `CASE <subject> WHEN <value> THEN <result> ... END`.
    pub fn simple(subject: impl Into<Arg>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    pub fn when(mut self, condition: impl Into<Arg>, result: impl Into<Arg>) -> Self {
        self.whens.push(When {
            condition: condition.into(),
            result: result.into(),
        });
        self
    }

    /// Set the ELSE branch. Any value counts as present, `NULL` included.
    pub fn else_(mut self, value: impl Into<Arg>) -> Self {
        self.else_value = Some(value.into());
        self
    }

    pub fn subject(&self) -> Option<&Arg> {
        self.subject.as_ref()
    }

    pub fn whens(&self) -> &[When] {
        &self.whens
    }

    pub fn else_value(&self) -> Option<&Arg> {
        self.else_value.as_ref()
    }
}

impl Expression for Case {
    fn build(&self, builder: &mut Builder) {
        builder.write_str("CASE");
        if let Some(subject) = &self.subject {
            builder.write_char(' ').add_var_wrapped(subject);
        }
        for when in &self.whens {
            builder.write_str(" WHEN ").add_var_wrapped(&when.condition);
            builder.write_str(" THEN ").add_var_wrapped(&when.result);
        }
        if let Some(value) = &self.else_value {
            builder.write_str(" ELSE ").add_var_wrapped(value);
        }
        builder.write_str(" END");
    }

    fn is_self_delimited(&self) -> bool {
        true
    }
}

/// A CASE with no branches yet.
#[derive(Debug, Clone)]
pub struct CaseInit<T> {
    case: Case,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CaseInit<T> {
    pub fn when(self, condition: impl Into<Arg>, result: impl Into<Arg>) -> CaseBuilder<T> {
        CaseBuilder {
            case: self.case.when(condition, result),
            _marker: PhantomData,
        }
    }
}

/// A CASE with at least one branch.
#[derive(Debug, Clone)]
pub struct CaseBuilder<T> {
    case: Case,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CaseBuilder<T> {
    pub fn when(mut self, condition: impl Into<Arg>, result: impl Into<Arg>) -> Self {
        self.case = self.case.when(condition, result);
        self
    }

    /// Finish with an ELSE branch.
    pub fn else_(self, value: impl Into<Arg>) -> Field<T> {
        Field::from_expr(self.case.else_(value))
    }

    /// Finish without ELSE; unmatched rows yield NULL.
    pub fn end(self) -> Field<T> {
        Field::from_expr(self.case)
    }
}

/// Start a searched CASE producing a `T`.
pub fn case_when<T>() -> CaseInit<T> {
    CaseInit {
        case: Case::searched(),
        _marker: PhantomData,
    }
}

/// Start a simple CASE over `subject` producing a `T`.
pub fn case_of<T>(subject: impl Into<Arg>) -> CaseInit<T> {
    CaseInit {
        case: Case::simple(subject),
        _marker: PhantomData,
    }
}
