//! The parser, which turns text into an [`Expr`].
//!
//! Parsing happens as a series of rewrites over flat lists of items, rather than by recursive
//! descent:
//!
//! 1. The input is tokenized, dropping whitespace. Runs of text that were only separated by
//!    whitespace are joined, so `x y` is the single variable `xy`.
//! 2. Tokens are grouped by matching parentheses into nested lists of raw text, operators and
//!    groups.
//! 3. Each group is resolved bottom-up into one expression (see [`resolve`]): numeric prefixes are
//!    split off raw text with an inserted multiplication, function names directly followed by a
//!    group become calls, and remaining text becomes constants or variables.
//! 4. A `-` at the start of a list or right after `^` negates the single item after it.
//! 5. Operators are folded left to right, one precedence tier at a time: `^`, then `*` and `/`,
//!    then juxtaposed expressions (implicit multiplication), then `+` and `-`.
//! 6. The resulting tree is normalized into flat sums and products.
//!
//! Note that step 5 makes `^` left-associative: `2^3^2` is `(2^3)^2`. Sums and products are
//! built flat as they are folded, but quotients and powers nest one level per operator, so the
//! depth of the tree is bounded separately from the nesting of parentheses.

pub mod error;
mod item;
mod resolve;

use crate::{expr::Expr, tokenizer::{tokenize_complete, Token, TokenKind}};
use error::{EmptyInput, EmptyParenthesis, NestingTooDeep, UnclosedParenthesis};
use item::{Item, Op, OpKind, RawText};
use log::trace;
use newton_error::Error;
use std::mem;

/// The default maximum depth of nested parentheses.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The default maximum depth of the parsed expression tree.
pub const MAX_EXPR_DEPTH: usize = 256;

/// A configurable parser for a single input.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The input to parse.
    source: &'source str,

    /// The maximum depth of nested parentheses.
    max_depth: usize,

    /// The maximum depth of the expression tree.
    max_expr_depth: usize,
}

impl<'source> Parser<'source> {
    /// Creates a new parser for the given input.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            max_depth: MAX_NESTING_DEPTH,
            max_expr_depth: MAX_EXPR_DEPTH,
        }
    }

    /// Sets the maximum depth of nested parentheses. Deeper input fails with
    /// [`NestingTooDeep`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum depth of the expression tree, counting a leaf as depth 1. Input such as a
    /// long run of divisions `x/2/2/2/...` that would build a deeper tree fails with
    /// [`ExpressionTooDeep`](error::ExpressionTooDeep).
    pub fn max_expr_depth(mut self, max_expr_depth: usize) -> Self {
        self.max_expr_depth = max_expr_depth;
        self
    }

    /// Parses the input into a normalized expression.
    ///
    /// Errors carry spans into the original input, including any whitespace.
    pub fn parse(&self) -> Result<Expr, Error> {
        let tokens = tokenize_complete(self.source);
        let items = group(&tokens, self.max_depth)?;
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(Error::unspanned(EmptyInput));
        };

        let span = first.span.start..last.span.end;
        let expr = resolve::resolve(items, span, self.max_expr_depth)?.expr.normalize();
        trace!("parsed `{}` into {}", self.source, expr);
        Ok(expr)
    }
}

/// Parses the given input into a normalized expression, with the default settings.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).parse()
}

/// Groups tokens by matching parentheses. Raw tokens that end up next to each other (because
/// only whitespace separated them) are joined into one, remembering where each byte came from.
fn group(tokens: &[Token], max_depth: usize) -> Result<Vec<Item>, Error> {
    let mut stack: Vec<(Vec<Item>, usize)> = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        let span = token.span.clone();
        let kind = match token.kind {
            TokenKind::OpenParen => {
                if stack.len() >= max_depth {
                    return Err(Error::new(vec![span], NestingTooDeep { max: max_depth }));
                }
                stack.push((mem::take(&mut current), span.start));
                continue;
            },
            TokenKind::CloseParen => {
                let Some((parent, start)) = stack.pop() else {
                    return Err(Error::new(vec![span], UnclosedParenthesis { opening: false }));
                };
                if current.is_empty() {
                    return Err(Error::new(vec![start..span.end], EmptyParenthesis));
                }
                let items = mem::replace(&mut current, parent);
                current.push(Item::Group { items, span: start..span.end });
                continue;
            },
            TokenKind::Raw => {
                match current.last_mut() {
                    Some(Item::Raw(raw)) => raw.push(token.lexeme, span),
                    _ => {
                        let mut raw = RawText::default();
                        raw.push(token.lexeme, span);
                        current.push(Item::Raw(raw));
                    },
                }
                continue;
            },
            TokenKind::Whitespace => continue,
            TokenKind::Add => OpKind::Add,
            TokenKind::Sub => OpKind::Sub,
            TokenKind::Mul => OpKind::Mul,
            TokenKind::Div => OpKind::Div,
            TokenKind::Exp => OpKind::Exp,
        };
        current.push(Item::Op(Op { kind, span }));
    }

    if let Some((_, start)) = stack.pop() {
        return Err(Error::new(vec![start..start + 1], UnclosedParenthesis { opening: true }));
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use crate::expr::{Addend, Constant, Function};
    use error::{AdjacentOperators, ExpressionTooDeep, InvalidToken, MissingOperand};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn num(value: f64) -> Expr {
        Expr::Scalar(value)
    }

    /// Parses the input, panicking with the error message on failure.
    fn parse_ok(source: &str) -> Expr {
        match parse(source) {
            Ok(expr) => expr,
            Err(err) => panic!("failed to parse `{}`: {}", source, err),
        }
    }

    /// Parses the input, which must fail, and returns the error.
    fn parse_err(source: &str) -> Error {
        match parse(source) {
            Ok(expr) => panic!("`{}` should not parse, got {}", source, expr),
            Err(err) => err,
        }
    }

    #[test]
    fn addition() {
        assert_eq!(parse_ok("3+3"), Expr::Add(vec![Addend::add(num(3.0)), Addend::add(num(3.0))]));
    }

    #[test]
    fn subtraction_chain() {
        assert_eq!(parse_ok("a - b - c"), Expr::Add(vec![
            Addend::add(Expr::variable("a")),
            Addend::sub(Expr::variable("b")),
            Addend::sub(Expr::variable("c")),
        ]));
    }

    #[test]
    fn nested_subtraction() {
        assert_eq!(parse_ok("a-(b-c)"), Expr::Add(vec![
            Addend::add(Expr::variable("a")),
            Addend::sub(Expr::variable("b")),
            Addend::add(Expr::variable("c")),
        ]));
    }

    #[test]
    fn implicit_multiplication_after_exponent() {
        assert_eq!(parse_ok("3x^2"), Expr::Mul(vec![num(3.0), x().pow(num(2.0))]));
    }

    #[test]
    fn implicit_multiplication_of_groups() {
        assert_eq!(parse_ok("(x-1)(x-2)"), Expr::Mul(vec![
            Expr::Add(vec![Addend::add(x()), Addend::sub(num(1.0))]),
            Expr::Add(vec![Addend::add(x()), Addend::sub(num(2.0))]),
        ]));
        assert_eq!(parse_ok("2(x)"), Expr::Mul(vec![num(2.0), x()]));
    }

    #[test]
    fn function_call() {
        assert_eq!(parse_ok("2sin(pi/2)"), Expr::Mul(vec![
            num(2.0),
            Expr::call(Function::Sin, Expr::Constant(Constant::Pi) / num(2.0)),
        ]));
    }

    #[test]
    fn function_name_without_group_is_variable() {
        assert_eq!(parse_ok("sin"), Expr::variable("sin"));
        assert_eq!(parse_ok("sin x"), Expr::variable("sinx"));
    }

    #[test]
    fn whitespace_joins_text() {
        assert_eq!(parse_ok("x y"), Expr::variable("xy"));
        assert_eq!(parse_ok("1 2"), num(12.0));
    }

    #[test]
    fn leading_unary_minus_binds_to_next_item() {
        assert_eq!(parse_ok("-x^2"), Expr::Mul(vec![num(-1.0), x()]).pow(num(2.0)));
    }

    #[test]
    fn unary_minus_in_exponent() {
        assert_eq!(parse_ok("2^-3"), num(2.0).pow(Expr::Mul(vec![num(-1.0), num(3.0)])));
    }

    #[test]
    fn exponent_is_left_associative() {
        assert_eq!(parse_ok("2^3^2"), num(2.0).pow(num(3.0)).pow(num(2.0)));
    }

    #[test]
    fn constants() {
        assert_eq!(parse_ok("e^x"), Expr::Constant(Constant::E).pow(x()));
        assert_eq!(parse_ok("2pi"), Expr::Mul(vec![num(2.0), Expr::Constant(Constant::Pi)]));
    }

    #[test]
    fn repeated_decimal_points() {
        assert_eq!(parse_ok("3.5.2"), Expr::Mul(vec![num(3.5), num(0.2)]));
        assert_eq!(parse_ok("3."), num(3.0));
        assert_eq!(parse_ok(".5"), num(0.5));
    }

    #[test]
    fn explicit_before_implicit_multiplication() {
        // [2, *, x, /, 3, *, y] folds left to right
        assert_eq!(parse_ok("2x/3y"), Expr::Mul(vec![
            Expr::Mul(vec![num(2.0), x()]) / num(3.0),
            Expr::variable("y"),
        ]));
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = parse_err("(3+3");
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: true }));
        assert_eq!(err.offset(), Some(0));

        let err = parse_err("3+3)");
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: false }));
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn offsets_count_whitespace() {
        assert_eq!(parse_err("  (3 + 3").offset(), Some(2));
    }

    #[test]
    fn trailing_operator() {
        let err = parse_err("3+");
        assert_eq!(err.downcast_ref::<MissingOperand>(), Some(&MissingOperand { leading: false }));
        assert_eq!(err.offset(), Some(1));
    }

    #[test]
    fn leading_operator() {
        let err = parse_err("*3");
        assert_eq!(err.downcast_ref::<MissingOperand>(), Some(&MissingOperand { leading: true }));
        assert!(parse_err("-").is::<MissingOperand>());
    }

    #[test]
    fn adjacent_operators() {
        let err = parse_err("2*-3");
        assert!(err.is::<AdjacentOperators>());
        assert_eq!(err.offset(), Some(1));
    }

    #[test]
    fn empty_parenthesis() {
        let err = parse_err("2 + ()");
        assert!(err.is::<EmptyParenthesis>());
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn invalid_tokens() {
        let err = parse_err("x1");
        assert_eq!(err.downcast_ref::<InvalidToken>(), Some(&InvalidToken { token: "x1".to_string() }));
        assert_eq!(err.offset(), Some(0));

        let err = parse_err("2 + $");
        assert_eq!(err.offset(), Some(4));
        assert!(parse_err(".").is::<InvalidToken>());
    }

    #[test]
    fn invalid_token_after_whitespace() {
        let err = parse_err("2 x1");
        assert_eq!(err.downcast_ref::<InvalidToken>(), Some(&InvalidToken { token: "x1".to_string() }));
        assert_eq!(err.offset(), Some(2));

        let err = parse_err("2 . 5 x1");
        assert_eq!(err.offset(), Some(6));
    }

    #[test]
    fn long_sum_is_flat() {
        let source = format!("x{}", "+1".repeat(100_000));
        let Expr::Add(addends) = parse_ok(&source) else {
            panic!("expected a sum");
        };
        assert_eq!(addends.len(), 100_001);
        assert_eq!(addends[0], Addend::add(x()));
        assert!(addends[1..].iter().all(|addend| *addend == Addend::add(num(1.0))));
    }

    #[test]
    fn long_product_is_flat() {
        let source = format!("x{}", "*2".repeat(100_000));
        let Expr::Mul(factors) = parse_ok(&source) else {
            panic!("expected a product");
        };
        assert_eq!(factors.len(), 100_001);
    }

    #[test]
    fn long_quotient_chain_is_rejected() {
        let source = format!("x{}", "/2".repeat(100_000));
        let err = parse_err(&source);
        assert_eq!(err.downcast_ref::<ExpressionTooDeep>(), Some(&ExpressionTooDeep { max: MAX_EXPR_DEPTH }));
        assert_eq!(err.offset(), Some(0));

        assert!(parse_err(&format!("2{}", "^2".repeat(100_000))).is::<ExpressionTooDeep>());
    }

    #[test]
    fn expression_depth_limit() {
        assert_eq!(
            Parser::new("x/2/2").max_expr_depth(3).parse().ok(),
            Some(x() / num(2.0) / num(2.0)),
        );

        let err = match Parser::new("x/2/2/2").max_expr_depth(3).parse() {
            Ok(expr) => panic!("should not parse, got {}", expr),
            Err(err) => err,
        };
        assert_eq!(err.downcast_ref::<ExpressionTooDeep>(), Some(&ExpressionTooDeep { max: 3 }));

        // calls and negations count too
        assert!(Parser::new("sin(sin(x))").max_expr_depth(2).parse().is_err());
        assert!(Parser::new("-x^2").max_expr_depth(2).parse().is_err());
    }

    #[test]
    fn empty_input() {
        for source in ["", "   "] {
            let err = parse_err(source);
            assert!(err.is::<EmptyInput>());
            assert_eq!(err.offset_or_unknown(), -1);
        }
    }

    #[test]
    fn nesting_limit() {
        assert_eq!(Parser::new("(((x)))").max_depth(3).parse().ok(), Some(x()));

        let err = match Parser::new("((((x))))").max_depth(3).parse() {
            Ok(expr) => panic!("should not parse, got {}", expr),
            Err(err) => err,
        };
        assert_eq!(err.downcast_ref::<NestingTooDeep>(), Some(&NestingTooDeep { max: 3 }));
        assert_eq!(err.offset(), Some(3));
    }
}
