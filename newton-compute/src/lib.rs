//! Numerical and symbolic computation over [`Expr`](newton_parser::expr::Expr) trees.
//!
//! - [`numerical`] evaluates an expression to an `f64` under a set of variable bindings.
//! - [`symbolic`] differentiates expressions and simplifies them by algebraic rewriting.
//!
//! Every operation is a pure function of its input: trees are never mutated in place, so the
//! same tree can be shared freely between threads.

pub mod numerical;
pub mod symbolic;

pub use numerical::{evaluate, Binding, Ctxt, Eval};
pub use symbolic::{
    differentiate,
    simplify,
    simplify_with,
    simplify_with_steps,
    SimplifyOptions,
    Step,
    StepCollector,
};
