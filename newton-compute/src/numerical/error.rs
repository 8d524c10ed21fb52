use ariadne::Fmt;
use newton_attrs::ErrorKind;
use newton_error::{ErrorKind, EXPR};

/// The variable has no binding.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = if suggestions.is_empty() {
        format!("bind `{}` to a value before evaluating", name.as_str().fg(EXPR))
    } else if suggestions.len() == 1 {
        format!("did you mean `{}`?", suggestions[0].as_str().fg(EXPR))
    } else {
        format!(
            "did you mean one of these variables? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.as_str().fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownVariable {
    /// The name of the variable that was undefined.
    pub name: String,

    /// Bound variables with a similar name.
    pub suggestions: Vec<String>,
}

/// Variable lookups nested deeper than allowed, usually because bindings refer to each other in a
/// cycle.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "maximum recursion depth reached",
    labels = ["while evaluating this variable"],
    help = format!(
        "the maximum depth is {}; check that no binding refers to itself, like `{}`",
        max,
        "x = x + 1".fg(EXPR),
    ),
)]
pub struct RecursionLimit {
    /// The maximum depth of nested variable lookups.
    pub max: usize,
}
