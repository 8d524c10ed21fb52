//! Simplification rules for products and quotients.

use newton_parser::expr::Expr;
use crate::symbolic::{
    simplify::{rules::{do_divide, do_multiply}, step::Step},
    step_collector::StepCollector,
};

/// Gathers the scalar factors of a product into one trailing scalar, dropping it if it is `1`.
///
/// A NaN factor makes the whole product NaN.
pub(crate) fn fold_product(factors: &[Expr]) -> Expr {
    let mut product = 1.0;
    let mut rest = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor.as_scalar() {
            Some(value) if value.is_nan() => return Expr::Scalar(f64::NAN),
            Some(value) => product *= value,
            None => rest.push(factor.clone()),
        }
    }

    if rest.is_empty() {
        return Expr::Scalar(product);
    }
    if product != 1.0 {
        rest.push(Expr::Scalar(product));
    }
    Expr::Mul(rest).downgrade()
}

/// `1*a = a`
/// `a*1 = a`
/// `2*a*3 = a*6`
/// `NaN*a = NaN`
pub fn multiply_identity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let folded = fold_product(factors);
        (folded != *expr).then_some(folded)
    })?;

    step_collector.push(Step::Identity);
    Some(opt)
}

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| rhs.is_scalar(1.0).then(|| lhs.clone()))?;

    step_collector.push(Step::Identity);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        factors.iter()
            .any(|factor| factor.is_scalar(0.0))
            .then_some(Expr::Scalar(0.0))
    })?;

    step_collector.push(Step::Absorb);
    Some(opt)
}

/// `0/a = 0`
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, _| lhs.is_scalar(0.0).then_some(Expr::Scalar(0.0)))?;

    step_collector.push(Step::Absorb);
    Some(opt)
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
    fn drop_one() {
        assert_eq!(multiply_identity(&parse("1x").unwrap(), &mut ()), Some(x()));
        assert_eq!(multiply_identity(&parse("x*1").unwrap(), &mut ()), Some(x()));
    }

    #[test]
    fn gather_scalars() {
        assert_eq!(
            multiply_identity(&parse("2x*3").unwrap(), &mut ()),
            Some(Expr::Mul(vec![x(), Expr::Scalar(6.0)])),
        );
        assert_eq!(multiply_identity(&parse("x*6").unwrap(), &mut ()), None);
    }

    #[test]
    fn nan_factor() {
        let expr = Expr::Mul(vec![x(), Expr::Scalar(f64::NAN), Expr::Scalar(0.0)]);
        let Some(Expr::Scalar(value)) = multiply_identity(&expr, &mut ()) else {
            panic!("expected a scalar");
        };
        assert!(value.is_nan());
    }

    #[test]
    fn divide_by_one() {
        let mut steps = Vec::new();
        assert_eq!(divide_one(&parse("x/1").unwrap(), &mut steps), Some(x()));
        assert_eq!(divide_one(&parse("1/x").unwrap(), &mut steps), None);
        assert_eq!(steps, vec![Step::Identity]);
    }

    #[test]
    fn absorb_zero() {
        let mut steps = Vec::new();
        assert_eq!(multiply_zero(&parse("x*0*y").unwrap(), &mut steps), Some(Expr::Scalar(0.0)));
        assert_eq!(divide_zero(&parse("0/x").unwrap(), &mut steps), Some(Expr::Scalar(0.0)));
        assert_eq!(divide_zero(&parse("x/0").unwrap(), &mut steps), None);
        assert_eq!(steps, vec![Step::Absorb, Step::Absorb]);
    }
}
