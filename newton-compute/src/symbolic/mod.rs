//! Algebraic manipulation of expressions.
//!
//! # Differentiation
//!
//! [`differentiate()`] computes the derivative of an expression with respect to one variable. Its
//! output is correct but far from minimal, since every rule is applied mechanically:
//!
//! ```
//! use newton_compute::symbolic::{differentiate, simplify};
//! use newton_compute::{evaluate, Binding};
//! use newton_parser::parse;
//!
//! let expr = parse("x^2").unwrap();
//! let derivative = simplify(&differentiate(&expr, "x").unwrap());
//!
//! let value = evaluate(&derivative, &[Binding::scalar("x", 5.0)]).unwrap();
//! assert_eq!(value, 10.0);
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] rewrites an expression until the rules in [`simplify::rules`] no longer change
//! it. The result is semantically equivalent to the input wherever the input is defined.
//! Equality of the result is positional: `x + y` and `y + x` are different trees.
//!
//! Use [`simplify_with()`] to adjust the iteration cap, and [`simplify_with_steps()`] to find out
//! which rules were applied.

pub mod derivative;
pub mod simplify;
pub mod step_collector;

pub use derivative::differentiate;
pub use simplify::{
    simplify,
    simplify_with,
    simplify_with_steps,
    step::Step,
    SimplifyOptions,
    SimplifyOptionsBuilder,
};
pub use step_collector::StepCollector;
