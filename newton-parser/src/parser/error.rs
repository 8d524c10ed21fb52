use ariadne::Fmt;
use newton_attrs::ErrorKind;
use newton_error::{ErrorKind, EXPR};

/// There was nothing to parse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "no expression to parse",
    help = format!("write an {}, such as `3x^2 + 1`", "expression".fg(EXPR)),
)]
pub struct EmptyInput;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// Parentheses were nested deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "parentheses are nested too deeply",
    labels = [format!("this parenthesis exceeds the maximum depth of {}", max)],
    help = "try splitting the expression into smaller parts",
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub max: usize,
}

/// Operators nested the expression tree deeper than the parser allows, as in a long run of
/// divisions `x/2/2/2/...`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("this expression exceeds the maximum depth of {}", max)],
    help = "try combining repeated divisions or powers, or splitting the expression into smaller parts",
)]
pub struct ExpressionTooDeep {
    /// The maximum depth of the expression tree.
    pub max: usize,
}

/// A run of characters could not be understood as a number, constant, function or variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid token `{}`", token),
    labels = ["I could not understand this"],
    help = format!(
        "variable names may only contain {}, and numbers look like `2`, `2.5` or `.5`",
        "letters and underscores".fg(EXPR),
    ),
)]
pub struct InvalidToken {
    /// The text that could not be understood.
    pub token: String,
}

/// Two operators appeared next to each other.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "two operators in a row",
    labels = [format!("add an {} between these operators", "expression".fg(EXPR))],
    help = "a negative number after `*`, `/`, `+` or `-` must be wrapped in parentheses, like `2*(-3)`",
)]
pub struct AdjacentOperators;

/// An operator was missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operand",
    labels = [if *leading {
        format!("this operator needs an {} before it", "expression".fg(EXPR))
    } else {
        format!("this operator needs an {} after it", "expression".fg(EXPR))
    }],
)]
pub struct MissingOperand {
    /// Whether the operand is missing on the left-hand side. Otherwise, it is missing on the
    /// right-hand side.
    pub leading: bool,
}

/// The input could not be reduced to a single expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid syntax",
    labels = ["I could not understand this expression"],
)]
pub struct InvalidSyntax;
