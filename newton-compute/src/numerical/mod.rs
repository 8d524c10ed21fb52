//! Numerical evaluation of expressions.
//!
//! Evaluation follows IEEE 754 semantics throughout: dividing by zero, taking the logarithm of a
//! negative number and the like produce `NaN` or an infinity rather than an error. The only hard
//! failures are a variable with no binding ([`UnknownVariable`](error::UnknownVariable)), and
//! bindings that refer to each other too deeply ([`RecursionLimit`](error::RecursionLimit)).

pub mod ctxt;
pub mod error;
pub mod eval;
pub mod func;

pub use ctxt::{Binding, Ctxt};
pub use eval::{evaluate, Eval};
