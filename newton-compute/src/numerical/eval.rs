use newton_error::Error;
use newton_parser::expr::Expr;
use super::{
    ctxt::{lookup, similar_names, Binding, Ctxt, MAX_RECURSION_DEPTH},
    error::{RecursionLimit, UnknownVariable},
    func,
};

/// Any type that can be evaluated to produce a number.
pub trait Eval {
    /// Evaluate the expression to produce a number, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error>;

    /// Evaluate the expression to produce a number, using an empty context.
    fn eval_default(&self) -> Result<f64, Error> {
        self.eval(&Ctxt::default())
    }
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        eval_at(self, ctxt.get_vars(), 0)
    }
}

/// Evaluates the expression under the given ordered bindings.
///
/// A variable evaluates to the value of the **first** binding with its name; the binding's
/// expression is itself evaluated under the same bindings.
pub fn evaluate(expr: &Expr, bindings: &[Binding]) -> Result<f64, Error> {
    eval_at(expr, bindings, 0)
}

/// Evaluates the expression, where `depth` is the number of variable lookups currently in
/// progress.
fn eval_at(expr: &Expr, bindings: &[Binding], depth: usize) -> Result<f64, Error> {
    Ok(match expr {
        Expr::Scalar(value) => *value,
        Expr::Constant(constant) => constant.value(),
        Expr::Variable(name) => {
            let Some(value) = lookup(bindings, name) else {
                return Err(Error::unspanned(UnknownVariable {
                    name: name.clone(),
                    suggestions: similar_names(bindings, name)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }));
            };
            if depth >= MAX_RECURSION_DEPTH {
                return Err(Error::unspanned(RecursionLimit { max: MAX_RECURSION_DEPTH }));
            }
            eval_at(value, bindings, depth + 1)?
        },
        Expr::Add(addends) => addends.iter().try_fold(0.0, |sum, addend| {
            let value = eval_at(&addend.expr, bindings, depth)?;
            Ok::<_, Error>(if addend.subtract { sum - value } else { sum + value })
        })?,
        Expr::Mul(factors) => factors.iter().try_fold(1.0, |product, factor| {
            Ok::<_, Error>(product * eval_at(factor, bindings, depth)?)
        })?,
        Expr::Div(lhs, rhs) => eval_at(lhs, bindings, depth)? / eval_at(rhs, bindings, depth)?,
        Expr::Exp(lhs, rhs) => eval_at(lhs, bindings, depth)?.powf(eval_at(rhs, bindings, depth)?),
        Expr::Call(function, arg) => func::call(*function, eval_at(arg, bindings, depth)?),
    })
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use newton_parser::parse;
    use super::*;

    /// Parses and evaluates the input under the given bindings.
    fn eval_str(source: &str, bindings: &[Binding]) -> Result<f64, Error> {
        evaluate(&parse(source).unwrap(), bindings)
    }

    #[test]
    fn binary_expr() {
        assert_eq!(eval_str("3+3", &[]).unwrap(), 6.0);
        assert_eq!(eval_str("1 + 2 * 3", &[]).unwrap(), 7.0);
        assert_eq!(eval_str("((1 + 9) / 5) * 3", &[]).unwrap(), 6.0);
        assert_eq!(eval_str("10 - 4 - 3", &[]).unwrap(), 3.0);
        assert_eq!(eval_str("2^3^2", &[]).unwrap(), 64.0);
        assert_eq!(eval_str("2^-1", &[]).unwrap(), 0.5);
    }

    #[test]
    fn implicit_multiplication() {
        let x = [Binding::scalar("x", 2.0)];
        assert_eq!(eval_str("3x^2", &x).unwrap(), 12.0);
        assert_eq!(eval_str("(x-1)(x-2)", &[Binding::scalar("x", 0.0)]).unwrap(), 2.0);
        assert_eq!(eval_str("3(x+2)^2", &x).unwrap(), 48.0);
    }

    #[test]
    fn functions_and_constants() {
        assert_float_absolute_eq!(eval_str("2sin(pi/2)", &[]).unwrap(), 2.0);
        assert_float_absolute_eq!(eval_str("ln(e^3)", &[]).unwrap(), 3.0);
        assert_float_absolute_eq!(eval_str("sqrt(16) + abs(-2)", &[]).unwrap(), 6.0);
        assert_float_absolute_eq!(eval_str("sec(0) + csch(1)", &[]).unwrap(), 1.0 + 1.0 / 1f64.sinh());
    }

    #[test]
    fn leading_minus_binds_to_one_item() {
        let x = [Binding::scalar("x", 3.0)];
        assert_eq!(eval_str("-x^2", &x).unwrap(), 9.0);
        assert_eq!(eval_str("-(x^2)", &x).unwrap(), -9.0);
        assert_eq!(eval_str("1 - x^2", &x).unwrap(), -8.0);
    }

    #[test]
    fn bindings_refer_to_bindings() {
        let bindings = [
            Binding::new("y", parse("2x").unwrap()),
            Binding::scalar("x", 4.0),
            Binding::scalar("y", 100.0),
        ];
        assert_eq!(eval_str("y + 1", &bindings).unwrap(), 9.0);
    }

    #[test]
    fn ieee_pathologies() {
        assert_eq!(eval_str("1/0", &[]).unwrap(), f64::INFINITY);
        assert!(eval_str("0/0", &[]).unwrap().is_nan());
        assert!(eval_str("ln(-1)", &[]).unwrap().is_nan());
    }

    #[test]
    fn unknown_variable() {
        let err = eval_str("2 * rate + 1", &[Binding::scalar("rates", 1.0)]).unwrap_err();
        assert_eq!(err.downcast_ref::<UnknownVariable>(), Some(&UnknownVariable {
            name: "rate".to_string(),
            suggestions: vec!["rates".to_string()],
        }));
        assert_eq!(err.offset_or_unknown(), -1);
    }

    #[test]
    fn recursive_binding() {
        let bindings = [Binding::new("x", parse("x + 1").unwrap())];
        let err = eval_str("x", &bindings).unwrap_err();
        assert!(err.is::<RecursionLimit>());
    }

    #[test]
    fn ctxt() {
        let mut ctxt = Ctxt::new();
        ctxt.add_var("x", 1.5);
        assert_eq!(parse("2x").unwrap().eval(&ctxt).unwrap(), 3.0);
        assert!(parse("x").unwrap().eval_default().is_err());
    }
}
