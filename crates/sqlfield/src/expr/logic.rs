//! Boolean combinators.

use super::{Expression, ExprRef};
use crate::builder::Builder;
use std::sync::Arc;

/// Render each part once and join the non-empty ones with `sep`.
///
/// A single part is written as is; several parts are bracketed and any part
/// with a top-level `AND`/`OR` gets its own brackets. Returns whether the
/// written fragment itself needs brackets when joined with siblings.
fn write_group<'a>(
    builder: &mut Builder,
    parts: impl IntoIterator<Item = &'a dyn Expression>,
    sep: &str,
) -> bool {
    let mut rendered = Vec::new();
    for part in parts {
        let mut scratch = builder.scratch();
        let grouped = part.build_operand(&mut scratch);
        if !scratch.is_empty() {
            rendered.push((scratch, grouped));
        }
    }

    if rendered.len() == 1 {
        let (single, grouped) = rendered.remove(0);
        builder.append(single);
        return grouped;
    }
    if rendered.is_empty() {
        return false;
    }

    builder.write_char('(');
    for (i, (part, grouped)) in rendered.into_iter().enumerate() {
        if i > 0 {
            builder.write_str(sep);
        }
        if grouped {
            builder.write_char('(');
            builder.append(part);
            builder.write_char(')');
        } else {
            builder.append(part);
        }
    }
    builder.write_char(')');
    false
}

fn children_of(children: &[ExprRef]) -> impl Iterator<Item = &dyn Expression> {
    children.iter().map(|c| &**c as &dyn Expression)
}

fn negated_or_not(child: &ExprRef) -> ExprRef {
    child
        .negate()
        .unwrap_or_else(|| Arc::new(Not::new(vec![child.clone()])))
}

/// `(a AND b AND ...)`
#[derive(Debug, Clone, Default)]
pub struct And {
    children: Vec<ExprRef>,
}

impl And {
    pub fn new(children: Vec<ExprRef>) -> Self {
        Self { children }
    }

    pub fn push(mut self, child: impl Into<ExprRef>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(&self) -> &[ExprRef] {
        &self.children
    }
}

impl Expression for And {
    fn build(&self, builder: &mut Builder) {
        self.build_operand(builder);
    }

    fn build_operand(&self, builder: &mut Builder) -> bool {
        write_group(builder, children_of(&self.children), " AND ")
    }

    /// De Morgan: `NOT (a AND b)` is `NOT a OR NOT b`.
    fn negate(&self) -> Option<ExprRef> {
        Some(Arc::new(Or::new(
            self.children.iter().map(negated_or_not).collect(),
        )))
    }
}

/// `(a OR b OR ...)`
#[derive(Debug, Clone, Default)]
pub struct Or {
    children: Vec<ExprRef>,
}

impl Or {
    pub fn new(children: Vec<ExprRef>) -> Self {
        Self { children }
    }

    pub fn push(mut self, child: impl Into<ExprRef>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(&self) -> &[ExprRef] {
        &self.children
    }
}

impl Expression for Or {
    fn build(&self, builder: &mut Builder) {
        self.build_operand(builder);
    }

    fn build_operand(&self, builder: &mut Builder) -> bool {
        write_group(builder, children_of(&self.children), " OR ")
    }

    fn negate(&self) -> Option<ExprRef> {
        Some(Arc::new(And::new(
            self.children.iter().map(negated_or_not).collect(),
        )))
    }
}

/// Logical negation.
///
/// Children with a dedicated negation render it (`NOT (a = ?)` becomes `a <> ?`);
/// the rest render as `NOT <child>`. Several children are joined with `AND`.
#[derive(Debug, Clone, Default)]
pub struct Not {
    children: Vec<ExprRef>,
}

impl Not {
    pub fn new(children: Vec<ExprRef>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[ExprRef] {
        &self.children
    }
}

/// `NOT <child>` for a child without a dedicated negation; nothing for an
/// empty child.
#[derive(Debug)]
struct NotPrefix(ExprRef);

impl Expression for NotPrefix {
    fn build(&self, builder: &mut Builder) {
        let mut scratch = builder.scratch();
        self.0.build(&mut scratch);
        if scratch.is_empty() {
            return;
        }
        builder.write_str("NOT ");
        if self.0.is_self_delimited() {
            builder.append(scratch);
        } else {
            builder.append_wrapped(scratch);
        }
    }

    fn negate(&self) -> Option<ExprRef> {
        Some(self.0.clone())
    }
}

impl Not {
    fn parts(&self) -> Vec<ExprRef> {
        self.children
            .iter()
            .map(|child| match child.negate() {
                Some(negated) => negated,
                None => Arc::new(NotPrefix(child.clone())),
            })
            .collect()
    }
}

impl Expression for Not {
    fn build(&self, builder: &mut Builder) {
        self.build_operand(builder);
    }

    fn build_operand(&self, builder: &mut Builder) -> bool {
        let parts = self.parts();
        write_group(builder, children_of(&parts), " AND ")
    }

    fn negate(&self) -> Option<ExprRef> {
        Some(Arc::new(And::new(self.children.clone())))
    }
}

/// Conjunction of `exprs`; absent (empty) members are skipped.
pub fn and(exprs: impl IntoIterator<Item = ExprRef>) -> And {
    And::new(exprs.into_iter().collect())
}

/// Disjunction of `exprs`; absent (empty) members are skipped.
pub fn or(exprs: impl IntoIterator<Item = ExprRef>) -> Or {
    Or::new(exprs.into_iter().collect())
}

/// Negation of a single expression.
pub fn not(expr: impl Into<ExprRef>) -> Not {
    Not::new(vec![expr.into()])
}
