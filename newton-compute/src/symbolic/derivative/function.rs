//! Symbolic derivatives of the built-in functions.

use log::debug;
use newton_error::Error;
use newton_parser::expr::{Addend, Expr, Function};
use super::error::UnsupportedDerivative;

/// `f^2`
fn squared(expr: Expr) -> Expr {
    expr.pow(Expr::Scalar(2.0))
}

/// Returns the derivative of the function with respect to its argument `arg`, without applying
/// the chain rule.
pub(super) fn function_derivative(function: Function, arg: &Expr) -> Result<Expr, Error> {
    let call = |function| Expr::call(function, arg.clone());
    let negative_one = || Expr::Scalar(-1.0);

    Ok(match function {
        Function::Sin => call(Function::Cos),
        Function::Cos => Expr::Mul(vec![negative_one(), call(Function::Sin)]),
        Function::Tan => Expr::Add(vec![
            Addend::add(squared(call(Function::Tan))),
            Addend::add(Expr::Scalar(1.0)),
        ]),
        Function::Sinh => call(Function::Cosh),
        Function::Cosh => call(Function::Sinh),
        Function::Tanh => squared(call(Function::Sech)),
        Function::Sech => Expr::Mul(vec![negative_one(), call(Function::Sech), call(Function::Tanh)]),
        Function::Csch => Expr::Mul(vec![negative_one(), call(Function::Coth), call(Function::Csch)]),
        Function::Cot => Expr::Mul(vec![negative_one(), squared(call(Function::Csc))]),
        Function::Coth => Expr::Mul(vec![negative_one(), squared(call(Function::Csch))]),
        Function::Ln => Expr::Scalar(1.0) / arg.clone(),
        Function::Sqrt => Expr::Scalar(1.0) / Expr::Mul(vec![Expr::Scalar(2.0), call(Function::Sqrt)]),
        Function::Abs => arg.clone() / call(Function::Abs),
        Function::Csc | Function::Sec | Function::Round | Function::Ceil | Function::Floor => {
            debug!("no derivative rule for `{}`", function);
            return Err(Error::unspanned(UnsupportedDerivative { function }));
        },
    })
}
