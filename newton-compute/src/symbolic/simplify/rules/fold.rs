//! Constant folding.

use newton_parser::expr::Expr;
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};

/// Computes the value of an operator whose operands are all scalars.
///
/// Quotients with a zero divisor, and powers whose value is not finite, are left alone. Function
/// calls are never folded.
fn value_of(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Add(addends) => addends.iter().try_fold(0.0, |total, addend| {
            let value = addend.expr.as_scalar()?;
            Some(if addend.subtract { total - value } else { total + value })
        }),
        Expr::Mul(factors) => factors.iter()
            .try_fold(1.0, |product, factor| Some(product * factor.as_scalar()?)),
        Expr::Div(lhs, rhs) => {
            let (lhs, rhs) = (lhs.as_scalar()?, rhs.as_scalar()?);
            (rhs != 0.0).then_some(lhs / rhs)
        },
        Expr::Exp(lhs, rhs) => {
            let value = lhs.as_scalar()?.powf(rhs.as_scalar()?);
            value.is_finite().then_some(value)
        },
        _ => None,
    }
}

/// `2+3 = 5`
/// `2*3 = 6`
/// `6/3 = 2`
/// `2^3 = 8`
pub fn fold_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = value_of(expr)?;

    step_collector.push(Step::Fold);
    Some(Expr::Scalar(value))
}
