//! Simplification rules for powers.

use newton_parser::expr::{Constant, Expr, Function};
use crate::symbolic::{
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, rhs| rhs.is_scalar(0.0).then_some(Expr::Scalar(1.0)))?;

    step_collector.push(Step::Power);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| rhs.is_scalar(1.0).then(|| lhs.clone()))?;

    step_collector.push(Step::Power);
    Some(opt)
}

/// `0^a = 0`
///
/// Applied after [`power_zero`], so `0^0 = 1`.
pub fn zero_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| lhs.is_scalar(0.0).then_some(Expr::Scalar(0.0)))?;

    step_collector.push(Step::Power);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| lhs.is_scalar(1.0).then_some(Expr::Scalar(1.0)))?;

    step_collector.push(Step::Power);
    Some(opt)
}

/// `e^ln(a) = a`
/// `e^(ln(a)*b) = a^b`
///
/// This undoes the rewrite `a^b = e^(ln(a)*b)` made when differentiating powers. If the exponent
/// has more than one `ln` factor, the first one is used.
pub fn exp_ln(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !matches!(lhs, Expr::Constant(Constant::E)) {
            return None;
        }

        match rhs {
            Expr::Call(Function::Ln, arg) => Some((**arg).clone()),
            Expr::Mul(factors) => {
                let idx = factors.iter()
                    .position(|factor| matches!(factor, Expr::Call(Function::Ln, _)))?;
                let Expr::Call(_, arg) = &factors[idx] else {
                    return None;
                };

                let mut rest = factors.clone();
                rest.remove(idx);
                let exponent = Expr::Mul(rest).downgrade();
                if exponent.is_scalar(1.0) {
                    Some((**arg).clone())
                } else {
                    Some((**arg).clone().pow(exponent))
                }
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::Power);
    Some(opt)
}

/// Applies all power rules.
///
/// Only the first rule that applies is used.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| exp_ln(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use newton_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    #[test]
    fn identities() {
        assert_eq!(all(&parse("x^0").unwrap(), &mut ()), Some(Expr::Scalar(1.0)));
        assert_eq!(all(&parse("x^1").unwrap(), &mut ()), Some(x()));
        assert_eq!(all(&parse("0^x").unwrap(), &mut ()), Some(Expr::Scalar(0.0)));
        assert_eq!(all(&parse("1^x").unwrap(), &mut ()), Some(Expr::Scalar(1.0)));
        assert_eq!(all(&parse("x^2").unwrap(), &mut ()), None);
    }

    #[test]
    fn zero_to_the_zero() {
        assert_eq!(all(&parse("0^0").unwrap(), &mut ()), Some(Expr::Scalar(1.0)));
    }

    #[test]
    fn undo_exp_ln() {
        let mut steps = Vec::new();
        assert_eq!(exp_ln(&parse("e^ln(x)").unwrap(), &mut steps), Some(x()));
        assert_eq!(
            exp_ln(&parse("e^(ln(x)*2)").unwrap(), &mut steps),
            Some(x().pow(Expr::Scalar(2.0))),
        );
        assert_eq!(
            exp_ln(&parse("e^(y*ln(x)*2)").unwrap(), &mut steps),
            Some(x().pow(Expr::Mul(vec![Expr::variable("y"), Expr::Scalar(2.0)]))),
        );
        assert_eq!(steps, vec![Step::Power; 3]);
    }

    #[test]
    fn exp_ln_needs_base_e() {
        assert_eq!(exp_ln(&parse("pi^ln(x)").unwrap(), &mut ()), None);
        assert_eq!(exp_ln(&parse("e^(x*2)").unwrap(), &mut ()), None);
    }
}
