//! Simplification of expressions by rewriting to a fixed point.
//!
//! A simplification pass walks the tree in post-order: every node has its children simplified
//! first, then goes through each stage of [`rules::all`] once. Since a rule can change the kind of
//! node it is given, later stages look at the output of earlier ones, not at the original node.
//!
//! Passes are repeated until one leaves the tree unchanged, compared with the structural equality
//! of [`Expr`] (under which `NaN` equals `NaN`, so trees holding `NaN` still converge). If the
//! iteration cap or the node-count guard in [`SimplifyOptions`] is hit first, the tree produced so
//! far is returned as a best effort.

pub mod rules;
pub mod step;

use log::{debug, warn};
use newton_parser::expr::{Addend, Expr};
use super::step_collector::StepCollector;
use step::Step;

/// The default maximum number of passes made by [`simplify()`].
pub const MAX_ITERATIONS: usize = 10_000;

/// Options controlling how long simplification may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// The maximum number of simplification passes.
    ///
    /// The default value is [`MAX_ITERATIONS`].
    pub max_iterations: usize,

    /// If set, simplification stops once the tree holds more than this many nodes.
    ///
    /// Some inputs grow before they shrink. This bounds the memory used on such inputs. The
    /// default is [`None`].
    pub max_nodes: Option<usize>,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            max_nodes: None,
        }
    }
}

impl SimplifyOptions {
    /// Creates a builder starting from the default options.
    pub fn builder() -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder::new()
    }

    /// Wraps the given [`SimplifyOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder(self)
    }
}

/// Helper struct to build a [`SimplifyOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptionsBuilder(SimplifyOptions);

impl SimplifyOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of passes. See [`SimplifyOptions::max_iterations`].
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Sets the node-count guard. See [`SimplifyOptions::max_nodes`].
    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.0.max_nodes = Some(max_nodes);
        self
    }

    /// Builds the [`SimplifyOptions`] struct.
    pub fn build(self) -> SimplifyOptions {
        self.0
    }
}

/// Simplifies the children of the expression, then the expression itself.
fn pass(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let rebuilt = match expr {
        Expr::Scalar(_) | Expr::Constant(_) | Expr::Variable(_) => expr.clone(),
        Expr::Add(addends) => Expr::Add(
            addends.iter()
                .map(|addend| Addend {
                    expr: pass(&addend.expr, step_collector),
                    subtract: addend.subtract,
                })
                .collect(),
        ),
        Expr::Mul(factors) => Expr::Mul(
            factors.iter()
                .map(|factor| pass(factor, step_collector))
                .collect(),
        ),
        Expr::Div(lhs, rhs) => Expr::Div(
            Box::new(pass(lhs, step_collector)),
            Box::new(pass(rhs, step_collector)),
        ),
        Expr::Exp(lhs, rhs) => Expr::Exp(
            Box::new(pass(lhs, step_collector)),
            Box::new(pass(rhs, step_collector)),
        ),
        Expr::Call(function, arg) => Expr::Call(*function, Box::new(pass(arg, step_collector))),
    };

    rules::all(rebuilt, step_collector)
}

/// Simplifies the given expression with the default [`SimplifyOptions`].
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, SimplifyOptions::default())
}

/// Simplifies the given expression with the given options.
pub fn simplify_with(expr: &Expr, options: SimplifyOptions) -> Expr {
    simplify_with_steps(expr, options, &mut ())
}

/// Simplifies the given expression with the given options, reporting every rule applied to the
/// step collector.
pub fn simplify_with_steps(
    expr: &Expr,
    options: SimplifyOptions,
    step_collector: &mut impl StepCollector<Step>,
) -> Expr {
    let mut current = expr.clone();
    for iteration in 1..=options.max_iterations {
        let next = pass(&current, step_collector);
        if next == current {
            debug!("simplification reached a fixed point after {} passes", iteration);
            return next;
        }

        if let Some(max_nodes) = options.max_nodes {
            let nodes = next.node_count();
            if nodes > max_nodes {
                warn!(
                    "stopping simplification after {} passes: {} nodes exceeds the maximum of {}",
                    iteration,
                    nodes,
                    max_nodes,
                );
                return next;
            }
        }

        current = next;
    }

    warn!("simplification did not reach a fixed point within {} passes", options.max_iterations);
    current
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::numerical::{evaluate, Binding};
    use crate::symbolic::differentiate;
    use newton_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplify_str(source: &str) -> Expr {
        simplify(&parse(source).unwrap())
    }

    fn x() -> Expr {
        Expr::variable("x")
    }

    #[test]
    fn identities() {
        assert_eq!(simplify_str("x + 0"), x());
        assert_eq!(simplify_str("1 * x * 1"), x());
        assert_eq!(simplify_str("x / 1"), x());
        assert_eq!(simplify_str("0 * (x + y)"), Expr::Scalar(0.0));
        assert_eq!(simplify_str("x^(3 - 2)"), x());
        assert_eq!(simplify_str("(x + y)^0"), Expr::Scalar(1.0));
    }

    #[test]
    fn constants() {
        assert_eq!(simplify_str("2 + 3 * 4"), Expr::Scalar(14.0));
        assert_eq!(simplify_str("2^3^2"), Expr::Scalar(64.0));
        assert_eq!(simplify_str("(1 + 1) / 4"), Expr::Scalar(0.5));
    }

    #[test]
    fn like_factors() {
        assert_eq!(simplify_str("x * x * 3"), Expr::Mul(vec![
            x().pow(Expr::Scalar(2.0)),
            Expr::Scalar(3.0),
        ]));
        assert_eq!(simplify_str("(x^3 * y) / (x * y)"), x().pow(Expr::Scalar(2.0)));
    }

    #[test]
    fn derivative_of_square() {
        let expr = parse("x^2").unwrap();
        let derivative = simplify(&differentiate(&expr, "x").unwrap());

        assert_eq!(derivative, simplify_str("2x"));
        assert_eq!(evaluate(&derivative, &[Binding::scalar("x", 5.0)]).unwrap(), 10.0);
    }

    #[test]
    fn simplified_derivatives_match_unsimplified() {
        for source in ["x^3 - 2x", "sin(x) cos(x)", "ln(x^2 + 1)", "x / (1 + x^2)", "e^(2x)"] {
            let derivative = differentiate(&parse(source).unwrap(), "x").unwrap();
            let simplified = simplify(&derivative);
            for x in [0.5, 1.0, 2.5] {
                let bindings = [Binding::scalar("x", x)];
                assert_float_absolute_eq!(
                    evaluate(&simplified, &bindings).unwrap(),
                    evaluate(&derivative, &bindings).unwrap(),
                    1e-9
                );
            }
        }
    }

    #[test]
    fn idempotent() {
        for source in ["x + 0", "x*x*x / x", "(x-1)(x-2)", "e^(ln(x)*2) + 0*y", "sin(2x)/2"] {
            let once = simplify_str(source);
            assert_eq!(simplify(&once), once);
        }
    }

    #[test]
    fn nan_converges() {
        let expr = Expr::Add(vec![Addend::add(x()), Addend::add(Expr::Scalar(f64::NAN))]);
        assert_eq!(simplify(&expr), expr);

        let Expr::Scalar(value) = simplify(&Expr::Mul(vec![x(), Expr::Scalar(f64::NAN)])) else {
            panic!("expected a scalar");
        };
        assert!(value.is_nan());
    }

    #[test]
    fn zero_divisor_is_kept() {
        assert_eq!(simplify_str("x / 0"), x() / Expr::Scalar(0.0));
        assert_eq!(simplify_str("1 / 0"), Expr::Scalar(1.0) / Expr::Scalar(0.0));
    }

    #[test]
    fn iteration_cap() {
        // `e^(ln(1)*x)` becomes `1^x` in the first pass and `1` in the second
        let expr = parse("e^(ln(1)*x)").unwrap();
        let one_to_the_x = Expr::Scalar(1.0).pow(x());
        assert_eq!(simplify(&expr), Expr::Scalar(1.0));

        let options = SimplifyOptions::builder().max_iterations(1).build();
        assert_eq!(simplify_with(&expr, options), one_to_the_x);

        let options = SimplifyOptions::builder().max_iterations(0).build();
        assert_eq!(simplify_with(&expr, options), expr);
    }

    #[test]
    fn node_guard() {
        let expr = parse("e^(ln(1)*x)").unwrap();
        let options = SimplifyOptions::builder().max_nodes(2).build();
        assert_eq!(simplify_with(&expr, options), Expr::Scalar(1.0).pow(x()));
    }

    #[test]
    fn builder() {
        assert_eq!(SimplifyOptions::builder().build(), SimplifyOptions::default());

        let options = SimplifyOptions::default()
            .into_builder()
            .max_iterations(5)
            .max_nodes(100)
            .build();
        assert_eq!(options, SimplifyOptions { max_iterations: 5, max_nodes: Some(100) });
    }

    #[test]
    fn collect_steps() {
        let mut steps = Vec::new();
        let simplified = simplify_with_steps(
            &parse("x*1 + 0").unwrap(),
            SimplifyOptions::default(),
            &mut steps,
        );
        assert_eq!(simplified, x());
        assert_eq!(steps, vec![Step::Identity, Step::Identity]);
    }
}
