use ariadne::Fmt;
use newton_attrs::ErrorKind;
use newton_error::{ErrorKind, EXPR};
use newton_parser::expr::Function;

/// The function has no symbolic derivative rule.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot symbolically differentiate `{}`", function),
    labels = ["this function"],
    help = format!(
        "approximate the derivative numerically instead, for example with {}",
        "(f(x + h) - f(x - h)) / 2h".fg(EXPR),
    ),
)]
pub struct UnsupportedDerivative {
    /// The function that could not be differentiated.
    pub function: Function,
}
