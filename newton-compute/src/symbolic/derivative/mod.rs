//! Symbolic differentiation.
//!
//! [`differentiate`] applies one rule per kind of node and recurses into the children, producing
//! an **unsimplified** derivative. The result is usually much larger than it needs to be (for
//! example, the derivative of `x^2` goes through `e^(ln(x)*2)`), so it is typically passed to
//! [`simplify`](super::simplify()) afterwards.

pub mod error;
mod function;

use newton_error::Error;
use newton_parser::expr::{Addend, Constant, Expr, Function};

/// `(f + g)' = f' + g'`
fn sum_rule(addends: &[Addend], var: &str) -> Result<Expr, Error> {
    addends.iter()
        .map(|addend| Ok(Addend {
            expr: derivative(&addend.expr, var)?,
            subtract: addend.subtract,
        }))
        .collect::<Result<Vec<_>, _>>()
        .map(Expr::Add)
}

/// `(f * g)' = f' * g + f * g'`, where `f` is the first factor and `g` is the product of the
/// remaining factors.
fn product_rule(factors: &[Expr], var: &str) -> Result<Expr, Error> {
    let [first, rest @ ..] = factors else {
        return Ok(Expr::Scalar(0.0));
    };
    if rest.is_empty() {
        return derivative(first, var);
    }

    let rest = Expr::Mul(rest.to_vec()).downgrade();
    let d_first = derivative(first, var)?;
    let d_rest = derivative(&rest, var)?;
    Ok(Expr::Add(vec![
        Addend::add(Expr::Mul(vec![d_first, rest])),
        Addend::add(Expr::Mul(vec![first.clone(), d_rest])),
    ]))
}

/// `(f / g)' = (f' * g - f * g') / g^2`
fn quotient_rule(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, Error> {
    let numerator = Expr::Add(vec![
        Addend::add(Expr::Mul(vec![derivative(lhs, var)?, rhs.clone()])),
        Addend::sub(Expr::Mul(vec![lhs.clone(), derivative(rhs, var)?])),
    ]);
    Ok(numerator / rhs.clone().pow(Expr::Scalar(2.0)))
}

/// `(e^u)' = u' * e^u`
///
/// Any other base is rewritten as `b^u = e^(ln(b) * u)` first, which covers constant, variable and
/// mixed bases and exponents with the one rule.
fn power_rule(base: &Expr, exp: &Expr, var: &str) -> Result<Expr, Error> {
    if matches!(base, Expr::Constant(Constant::E)) {
        return Ok(Expr::Mul(vec![
            derivative(exp, var)?,
            base.clone().pow(exp.clone()),
        ]));
    }

    let exponent = Expr::Mul(vec![Expr::call(Function::Ln, base.clone()), exp.clone()]);
    power_rule(&Expr::Constant(Constant::E), &exponent, var)
}

/// `f(u)' = u' * f'(u)`
fn chain_rule(function: Function, arg: &Expr, var: &str) -> Result<Expr, Error> {
    let outer = function::function_derivative(function, arg)?;
    Ok(Expr::Mul(vec![derivative(arg, var)?, outer]))
}

/// Unnormalized derivative.
fn derivative(expr: &Expr, var: &str) -> Result<Expr, Error> {
    match expr {
        Expr::Scalar(_) | Expr::Constant(_) => Ok(Expr::Scalar(0.0)),
        Expr::Variable(name) => Ok(Expr::Scalar(if name == var { 1.0 } else { 0.0 })),
        Expr::Add(addends) => sum_rule(addends, var),
        Expr::Mul(factors) => product_rule(factors, var),
        Expr::Div(lhs, rhs) => quotient_rule(lhs, rhs, var),
        Expr::Exp(base, exp) => power_rule(base, exp, var),
        Expr::Call(function, arg) => chain_rule(*function, arg, var),
    }
}

/// Computes the derivative of the given expression with respect to the variable `var`.
///
/// The result is normalized into flat sums and products, but otherwise unsimplified. Returns
/// [`Err`] with an [`UnsupportedDerivative`](error::UnsupportedDerivative) if the expression calls
/// a function with no derivative rule (`csc`, `sec`, `round`, `ceil` or `floor`), **even if** the
/// call does not depend on `var`.
pub fn differentiate(expr: &Expr, var: &str) -> Result<Expr, Error> {
    derivative(expr, var).map(Expr::normalize)
}
