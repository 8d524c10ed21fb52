//! Simplification rules for sums.

use newton_parser::expr::{Addend, Expr};
use crate::symbolic::{
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// Gathers the scalar terms of a sum into one trailing scalar and rebuilds the sum in its simplest
/// form.
///
/// The trailing scalar is stored as a positive value, with its sign in the `subtract` flag, and is
/// dropped if it is zero. A sum of one subtracted term becomes a product with `-1`.
pub(crate) fn fold_sum(addends: &[Addend]) -> Expr {
    let mut total = 0.0;
    let mut terms = Vec::with_capacity(addends.len());
    for addend in addends {
        match addend.expr.as_scalar() {
            Some(value) if addend.subtract => total -= value,
            Some(value) => total += value,
            None => terms.push(addend.clone()),
        }
    }

    if terms.is_empty() {
        return Expr::Scalar(total);
    }

    // NaN is kept
    if total != 0.0 {
        terms.push(if total < 0.0 {
            Addend::sub(Expr::Scalar(-total))
        } else {
            Addend::add(Expr::Scalar(total))
        });
    }

    if terms.len() == 1 && terms[0].subtract {
        return -terms.remove(0).expr;
    }
    Expr::Add(terms).downgrade()
}

/// `a + 0 = a`
/// `a - 0 = a`
/// `0 - a = -1 * a`
/// `a + 2 + 3 = a + 5`
pub fn add_identity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |addends| {
        let folded = fold_sum(addends);
        (folded != *expr).then_some(folded)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Identity);
    Some(opt)
}
