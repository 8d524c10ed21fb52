//! Simplification rules for products of quotients.
//!
//! Both rules view a product such as `a * (b / c) / d` as a list of numerator factors `[a, b]`
//! and a list of denominator factors `[c, d]`, rewrite the two lists, and rebuild the expression
//! as a single quotient.

use std::mem;
use newton_parser::expr::{Addend, Expr};
use crate::symbolic::{
    simplify::{rules::add::fold_sum, step::Step},
    step_collector::StepCollector,
};

/// Splits a product of quotients into its numerator and denominator factors.
fn split_fraction(expr: &Expr, num: &mut Vec<Expr>, den: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(factors) => factors.iter().for_each(|factor| split_fraction(factor, num, den)),
        Expr::Div(lhs, rhs) => {
            split_fraction(lhs, num, den);
            split_fraction(rhs, den, num);
        },
        other => num.push(other.clone()),
    }
}

/// Returns the numerator and denominator factors of the expression, if it is a quotient or a
/// product containing one.
fn as_fraction(expr: &Expr) -> Option<(Vec<Expr>, Vec<Expr>)> {
    let applies = match expr {
        Expr::Div(..) => true,
        Expr::Mul(factors) => factors.iter().any(|factor| matches!(factor, Expr::Div(..))),
        _ => false,
    };
    if !applies {
        return None;
    }

    let (mut num, mut den) = (Vec::new(), Vec::new());
    split_fraction(expr, &mut num, &mut den);
    Some((num, den))
}

/// Builds the product of the given factors.
fn product(factors: Vec<Expr>) -> Expr {
    Expr::Mul(factors).downgrade()
}

/// Builds `num / den`, or just `num` if there are no denominator factors.
fn rebuild(num: Vec<Expr>, den: Vec<Expr>) -> Expr {
    if den.is_empty() {
        product(num)
    } else {
        product(num) / product(den)
    }
}

/// Removes each non-scalar numerator factor that has a structurally equal denominator factor,
/// along with that denominator factor.
fn cancel(num: &mut Vec<Expr>, den: &mut Vec<Expr>) {
    let mut i = 0;
    while i < num.len() {
        let matching = match num[i] {
            Expr::Scalar(_) => None,
            ref factor => den.iter().position(|other| other == factor),
        };
        match matching {
            Some(j) => {
                num.remove(i);
                den.remove(j);
            },
            None => i += 1,
        }
    }
}

/// Folds the scalar factors of both lists into one numerator scalar.
///
/// A zero scalar in the denominator is left in place.
fn fold_scalars(num: &mut Vec<Expr>, den: &mut Vec<Expr>) {
    let mut value = 1.0;
    num.retain(|factor| match factor.as_scalar() {
        Some(n) => {
            value *= n;
            false
        },
        None => true,
    });
    den.retain(|factor| match factor.as_scalar() {
        Some(n) if n != 0.0 => {
            value /= n;
            false
        },
        _ => true,
    });

    if value != 1.0 {
        num.push(Expr::Scalar(value));
    }
}

/// Splits a factor into its base and exponent. A factor that is not a power has exponent `1`.
fn into_power(factor: Expr) -> (Expr, Expr) {
    match factor {
        Expr::Exp(base, exp) => (*base, *exp),
        other => (other, Expr::Scalar(1.0)),
    }
}

/// Builds `base^exp`, or `base` if `exp = 1`, or `1` if `exp = 0`.
fn power_of(base: Expr, exp: Expr) -> Expr {
    if exp.is_scalar(0.0) {
        Expr::Scalar(1.0)
    } else if exp.is_scalar(1.0) {
        base
    } else {
        base.pow(exp)
    }
}

/// Computes `lhs + rhs`, or `lhs - rhs` if `subtract` is set, gathering any scalar terms.
fn sum_exponents(lhs: Expr, rhs: Expr, subtract: bool) -> Expr {
    match Expr::Add(vec![Addend::add(lhs), Addend { expr: rhs, subtract }]).normalize() {
        Expr::Add(addends) => fold_sum(&addends),
        other => other,
    }
}

/// Groups the factors by base, summing the exponents of each group.
fn group_by_base(factors: Vec<Expr>) -> Vec<(Expr, Expr)> {
    let mut groups: Vec<(Expr, Expr)> = Vec::with_capacity(factors.len());
    for factor in factors {
        let (base, exp) = into_power(factor);
        match groups.iter_mut().find(|(other, _)| *other == base) {
            Some((_, total)) => {
                let current = mem::replace(total, Expr::Scalar(0.0));
                *total = sum_exponents(current, exp, false);
            },
            None => groups.push((base, exp)),
        }
    }
    groups
}

/// Cancels equal factors across a fraction, and folds its scalar factors into one.
///
/// `(a*b) / (b*c) = a / c`
/// `(2*a) / (4*b) = (a*0.5) / b`
pub fn reduce_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (mut num, mut den) = as_fraction(expr)?;
    cancel(&mut num, &mut den);
    fold_scalars(&mut num, &mut den);

    let reduced = rebuild(num, den);
    if reduced == *expr {
        return None;
    }

    step_collector.push(Step::ReduceFraction);
    Some(reduced)
}

/// Merges factors with the same base by summing their exponents. Exponents in the denominator are
/// subtracted from the numerator's.
///
/// `a * a^b = a^(1 + b)`
/// `a^b / a^c = a^(b - c)`
pub fn merge_exponents(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (num, den) = match expr {
        Expr::Mul(factors) if !factors.iter().any(|factor| matches!(factor, Expr::Div(..))) => {
            (factors.clone(), Vec::new())
        },
        _ => as_fraction(expr)?,
    };

    let mut num = group_by_base(num);
    let mut den_left = Vec::new();
    for (base, exp) in group_by_base(den) {
        match num.iter_mut().find(|(other, _)| *other == base) {
            Some((_, total)) => {
                let current = mem::replace(total, Expr::Scalar(0.0));
                *total = sum_exponents(current, exp, true);
            },
            None => den_left.push(power_of(base, exp)),
        }
    }

    let num = num.into_iter()
        .map(|(base, exp)| power_of(base, exp))
        .filter(|factor| !factor.is_scalar(1.0))
        .collect();
    let merged = rebuild(num, den_left);
    if merged == *expr {
        return None;
    }

    step_collector.push(Step::MergeExponents);
    Some(merged)
}

#[cfg(test)]
mod tests {
    use newton_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn y() -> Expr {
        Expr::variable("y")
    }

    #[test]
    fn cancel_common_factor() {
        let mut steps = Vec::new();
        assert_eq!(
            reduce_fraction(&parse("(x*y)/(y*z)").unwrap(), &mut steps),
            Some(x() / Expr::variable("z")),
        );
        assert_eq!(reduce_fraction(&parse("x/x").unwrap(), &mut steps), Some(Expr::Scalar(1.0)));
        assert_eq!(steps, vec![Step::ReduceFraction; 2]);
    }

    #[test]
    fn nested_quotients() {
        // x / (y / x) = x * x / y
        assert_eq!(
            reduce_fraction(&parse("x/(y/x)").unwrap(), &mut ()),
            Some(Expr::Mul(vec![x(), x()]) / y()),
        );
        assert_eq!(
            merge_exponents(&parse("x/(y/x)").unwrap(), &mut ()),
            Some(x().pow(Expr::Scalar(2.0)) / y()),
        );
    }

    #[test]
    fn fold_scalar_factors() {
        assert_eq!(
            reduce_fraction(&parse("(2x)/(4y)").unwrap(), &mut ()),
            Some(Expr::Mul(vec![x(), Expr::Scalar(0.5)]) / y()),
        );
        assert_eq!(reduce_fraction(&parse("6/3").unwrap(), &mut ()), Some(Expr::Scalar(2.0)));
    }

    #[test]
    fn zero_denominator_is_kept() {
        assert_eq!(reduce_fraction(&parse("x/0").unwrap(), &mut ()), None);
        assert_eq!(
            reduce_fraction(&parse("(2x)/(4*0)").unwrap(), &mut ()),
            Some(Expr::Mul(vec![x(), Expr::Scalar(0.5)]) / Expr::Scalar(0.0)),
        );
    }

    #[test]
    fn scalars_do_not_cancel() {
        // the zeros neither cancel nor fold
        assert_eq!(reduce_fraction(&parse("(x*0)/0").unwrap(), &mut ()), None);
    }

    #[test]
    fn merge_in_product() {
        let mut steps = Vec::new();
        assert_eq!(
            merge_exponents(&parse("x*x^y").unwrap(), &mut steps),
            Some(x().pow(Expr::Add(vec![Addend::add(y()), Addend::add(Expr::Scalar(1.0))]))),
        );
        assert_eq!(
            merge_exponents(&parse("x*x*x").unwrap(), &mut steps),
            Some(x().pow(Expr::Scalar(3.0))),
        );
        assert_eq!(steps, vec![Step::MergeExponents; 2]);
    }

    #[test]
    fn merge_across_fraction() {
        assert_eq!(
            merge_exponents(&parse("x^3/x").unwrap(), &mut ()),
            Some(x().pow(Expr::Scalar(2.0))),
        );
        assert_eq!(merge_exponents(&parse("x/x^3").unwrap(), &mut ()), Some(x().pow(Expr::Scalar(-2.0))));
        assert_eq!(merge_exponents(&parse("(x^2*y)/x^2").unwrap(), &mut ()), Some(y()));
    }

    #[test]
    fn nothing_to_merge() {
        assert_eq!(merge_exponents(&parse("x*y").unwrap(), &mut ()), None);
        assert_eq!(merge_exponents(&parse("x^2/y").unwrap(), &mut ()), None);
        assert_eq!(merge_exponents(&parse("2*x").unwrap(), &mut ()), None);
    }
}
