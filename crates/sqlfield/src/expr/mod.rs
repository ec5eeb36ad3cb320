//! Expression tree.
//!
//! Every node implements [`Expression`]: it renders itself into a [`Builder`].
//! Nodes are immutable once constructed and shared through [`ExprRef`], so a tree
//! can be rendered repeatedly and from several threads.
//!
//! - [`Expr`]: raw SQL template with `?` placeholders
//! - [`Column`]: column reference
//! - [`Comparison`], [`In`], [`Between`]: predicates with explicit negations
//! - [`And`], [`Or`], [`Not`]: boolean combinators
//! - [`Case`]: CASE/WHEN
//! - [`Empty`]: renders nothing (absent optional conditions)

mod case;
mod column;
mod compare;
mod logic;
mod template;


pub use case::{Case, CaseBuilder, CaseInit, When, case_of, case_when};
pub use column::{Column, to_column};
pub use compare::{Between, Comparison, In, Op, between_opt, compare};
pub use logic::{And, Not, Or, and, not, or};
pub use template::Expr;

use crate::builder::Builder;
use crate::value::Arg;
use std::fmt::Debug;
use std::sync::Arc;

/// Shared, immutable expression node.
pub type ExprRef = Arc<dyn Expression>;

/// A self-rendering SQL fragment.
pub trait Expression: Debug + Send + Sync {
    /// Render into `builder`.
    fn build(&self, builder: &mut Builder);

    /// The logical negation of this expression, if it has a dedicated form
    /// (`=` ↔ `<>`, `>` ↔ `<=`, `IN` ↔ `NOT IN`, ...).
    fn negate(&self) -> Option<ExprRef> {
        None
    }

    /// The raw template behind this node, if it is one.
    fn as_template(&self) -> Option<&Expr> {
        None
    }

    /// The column behind this node, if it is a plain column reference.
    fn as_column(&self) -> Option<&Column> {
        None
    }

    /// `true` for nodes that delimit themselves (`CASE ... END`) and never need
    /// parentheses when embedded.
    fn is_self_delimited(&self) -> bool {
        false
    }

    /// `true` if this node renders with a top-level `AND`/`OR` that must be
    /// bracketed when joined with siblings.
    fn needs_grouping(&self) -> bool {
        false
    }

    /// Render into `builder` as one operand of an `AND`/`OR` group and report
    /// whether the written fragment needs its own brackets there.
    ///
    /// Combinators override this so grouping is decided in the same pass that
    /// renders them.
    fn build_operand(&self, builder: &mut Builder) -> bool {
        self.build(builder);
        self.needs_grouping()
    }
}

impl<T: Expression + ?Sized> Expression for Arc<T> {
    fn build(&self, builder: &mut Builder) {
        (**self).build(builder)
    }

    fn negate(&self) -> Option<ExprRef> {
        (**self).negate()
    }

    fn as_template(&self) -> Option<&Expr> {
        (**self).as_template()
    }

    fn as_column(&self) -> Option<&Column> {
        (**self).as_column()
    }

    fn is_self_delimited(&self) -> bool {
        (**self).is_self_delimited()
    }

    fn needs_grouping(&self) -> bool {
        (**self).needs_grouping()
    }

    fn build_operand(&self, builder: &mut Builder) -> bool {
        (**self).build_operand(builder)
    }
}

/// Renders nothing and binds nothing.
///
/// Returned by the `*_opt` helpers when the value is absent; combinators skip it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Expression for Empty {
    fn build(&self, _builder: &mut Builder) {}
}

macro_rules! impl_arg_from_expression {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(expr: $ty) -> Self {
                    Arg::Expr(Arc::new(expr))
                }
            }

            impl From<$ty> for ExprRef {
                fn from(expr: $ty) -> Self {
                    Arc::new(expr)
                }
            }
        )*
    };
}

impl_arg_from_expression!(Expr, Column, Comparison, In, Between, And, Or, Not, Case, Empty);
