//! Implementation of the simplification rules.
//!
//! Each rule is a function that takes the expression to simplify and returns `Some(expr)` with the
//! rewritten expression if the rule applies, or `None` if it does not. A rule that applies also
//! reports its [`Step`] to the step collector.
//!
//! Rules only look at the node they are given. Recursing into the tree is up to the caller.

pub mod add;
pub mod fold;
pub mod fraction;
pub mod multiply;
pub mod power;

use log::trace;
use newton_parser::expr::{Addend, Expr};
use crate::symbolic::step_collector::StepCollector;
use super::step::Step;

/// A single simplification rule.
pub type Rule = fn(&Expr, &mut dyn StepCollector<Step>) -> Option<Expr>;

/// The stages of a simplification pass, in the order they are applied to each node.
const STAGES: [Rule; 7] = [
    flatten,
    identity,
    absorb,
    power::all,
    fraction::reduce_fraction,
    fraction::merge_exponents,
    fold::fold_constants,
];

/// If the expression is a sum, calls the given transformation function with the addends.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl Fn(&[Addend]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(addends) = expr {
        f(addends)
    } else {
        None
    }
}

/// If the expression is a product, calls the given transformation function with the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a quotient, calls the given transformation function with the dividend and
/// divisor.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_divide(expr: &Expr, f: impl Fn(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Div(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a power, calls the given transformation function with the base and
/// exponent.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl Fn(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Exp(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// `(a + b) + c = a + b + c`
/// `(a * b) * c = a * b * c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let nested = match expr {
        Expr::Add(addends) => addends.iter().any(|addend| matches!(addend.expr, Expr::Add(_))),
        Expr::Mul(factors) => factors.iter().any(|factor| matches!(factor, Expr::Mul(_))),
        _ => false,
    };
    if !nested {
        return None;
    }

    step_collector.push(Step::Flatten);
    Some(expr.clone().normalize())
}

/// Identity elimination for sums, products and quotients.
pub fn identity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add::add_identity(expr, step_collector)
        .or_else(|| multiply::multiply_identity(expr, step_collector))
        .or_else(|| multiply::divide_one(expr, step_collector))
}

/// Absorption by zero in products and quotients.
pub fn absorb(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    multiply::multiply_zero(expr, step_collector)
        .or_else(|| multiply::divide_zero(expr, step_collector))
}

/// Runs the given expression through every stage once, feeding the output of each stage into the
/// next.
///
/// The expression's children are expected to be simplified already.
pub fn all(expr: Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    STAGES.iter().fold(expr, |expr, stage| match stage(&expr, step_collector) {
        Some(rewritten) => {
            trace!("rewrote {} to {}", expr, rewritten);
            rewritten
        },
        None => expr,
    })
}
