//! The intermediate lists the parser rewrites on its way from tokens to an [`Expr`].
//!
//! Each stage of the parser narrows the kinds of item that can appear in a list, so each stage
//! has its own item type: [`Item`] after grouping by parentheses, [`Part`] while identifiers and
//! literals are being resolved, and [`Piece`] once only expressions and operators remain.

use crate::expr::{Addend, Expr};
use std::ops::Range;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

impl OpKind {
    /// Builds the binary node for this operator. Sums and products are built as two-element
    /// lists.
    pub fn apply(self, lhs: Expr, rhs: Expr) -> Expr {
        match self {
            Self::Add => Expr::Add(vec![Addend::add(lhs), Addend::add(rhs)]),
            Self::Sub => Expr::Add(vec![Addend::add(lhs), Addend::sub(rhs)]),
            Self::Mul => Expr::Mul(vec![lhs, rhs]),
            Self::Div => Expr::Div(Box::new(lhs), Box::new(rhs)),
            Self::Exp => Expr::Exp(Box::new(lhs), Box::new(rhs)),
        }
    }
}

/// An operator, either written in source or inserted between a numeric literal and the text
/// following it.
#[derive(Debug, Clone, PartialEq)]
pub struct Op {
    pub kind: OpKind,

    /// The region of the source code the operator was written at. Empty for inserted operators.
    pub span: Range<usize>,
}

/// A resolved expression, along with the region of source it came from and the depth of its
/// tree (a leaf has depth 1).
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub expr: Expr,
    pub span: Range<usize>,
    pub depth: usize,
}

impl Operand {
    /// Creates an operand for a leaf expression.
    pub fn leaf(expr: Expr, span: Range<usize>) -> Self {
        Self { expr, span, depth: 1 }
    }

    /// Wraps the expression in a node with this operand as its only child, such as a call or a
    /// negation.
    pub fn wrap(self, span: Range<usize>, f: impl FnOnce(Expr) -> Expr) -> Self {
        Self { expr: f(self.expr), span, depth: self.depth + 1 }
    }

    /// Applies the operator to this operand and `rhs`.
    ///
    /// If this operand is already a sum and the operator is `+` or `-`, or already a product and
    /// the operator is `*`, `rhs` is appended to its list instead of nesting a new node, so
    /// `a+b+c+...` stays one level deep.
    pub fn combine(self, kind: OpKind, rhs: Operand) -> Self {
        let span = self.span.start..rhs.span.end;
        let (expr, depth) = match (kind, self.expr) {
            (OpKind::Add | OpKind::Sub, Expr::Add(mut addends)) => {
                addends.push(Addend { expr: rhs.expr, subtract: kind == OpKind::Sub });
                (Expr::Add(addends), self.depth.max(rhs.depth + 1))
            },
            (OpKind::Mul, Expr::Mul(mut factors)) => {
                factors.push(rhs.expr);
                (Expr::Mul(factors), self.depth.max(rhs.depth + 1))
            },
            (kind, lhs) => (kind.apply(lhs, rhs.expr), self.depth.max(rhs.depth) + 1),
        };
        Self { expr, span, depth }
    }
}

/// Text between operators and parentheses, with whitespace removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawText {
    pub text: String,

    /// The position in the source of each byte of `text`.
    pub offsets: Vec<usize>,
}

impl RawText {
    /// Appends a token's lexeme, found at `span` in the source.
    pub fn push(&mut self, lexeme: &str, span: Range<usize>) {
        self.text.push_str(lexeme);
        self.offsets.extend(span);
    }

    /// Returns the region of the source code from the first to the last byte of the text.
    pub fn span(&self) -> Range<usize> {
        match (self.offsets.first(), self.offsets.last()) {
            (Some(&first), Some(&last)) => first..last + 1,
            _ => 0..0,
        }
    }

    /// Removes the first `len` bytes of the text and returns them.
    pub fn split_front(&mut self, len: usize) -> RawText {
        let rest = RawText {
            text: self.text.split_off(len),
            offsets: self.offsets.split_off(len),
        };
        std::mem::replace(self, rest)
    }
}

/// An item of a list produced by grouping tokens by parentheses.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Raw(RawText),

    Op(Op),

    /// A parenthesized list of items. The span includes both parentheses.
    Group { items: Vec<Item>, span: Range<usize> },
}

/// An item of a list whose parenthesized groups have been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Raw(RawText),
    Op(Op),

    /// A resolved parenthesized group, which may still become the argument of a function.
    Bracket(Operand),

    Expr(Operand),
}

/// An item of a list that only contains expressions and operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Expr(Operand),
    Op(Op),
}

impl Piece {
    /// Returns the operator kind, if this piece is an operator.
    pub fn op_kind(&self) -> Option<OpKind> {
        match self {
            Self::Op(op) => Some(op.kind),
            Self::Expr(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str, at: usize) -> Operand {
        Operand::leaf(Expr::variable(name), at..at + 1)
    }

    #[test]
    fn sums_extend_instead_of_nesting() {
        let sum = var("a", 0)
            .combine(OpKind::Add, var("b", 2))
            .combine(OpKind::Sub, var("c", 4));
        assert_eq!(sum, Operand {
            expr: Expr::Add(vec![
                Addend::add(Expr::variable("a")),
                Addend::add(Expr::variable("b")),
                Addend::sub(Expr::variable("c")),
            ]),
            span: 0..5,
            depth: 2,
        });
    }

    #[test]
    fn quotients_nest() {
        let quotient = var("a", 0)
            .combine(OpKind::Div, var("b", 2))
            .combine(OpKind::Div, var("c", 4));
        assert_eq!(quotient.depth, 3);
        assert_eq!(quotient.expr, Expr::variable("a") / Expr::variable("b") / Expr::variable("c"));
    }

    #[test]
    fn raw_text_keeps_source_offsets() {
        // `2 x1` with the space removed
        let mut raw = RawText::default();
        raw.push("2", 0..1);
        raw.push("x1", 2..4);
        assert_eq!(raw.span(), 0..4);

        let number = raw.split_front(1);
        assert_eq!((number.text.as_str(), number.span()), ("2", 0..1));
        assert_eq!((raw.text.as_str(), raw.span()), ("x1", 2..4));
    }

    #[test]
    fn product_does_not_extend_sum() {
        let product = var("a", 0)
            .combine(OpKind::Add, var("b", 2))
            .combine(OpKind::Mul, var("c", 4));
        assert_eq!(product.depth, 3);
    }
}
