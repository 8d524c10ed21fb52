//! Reduction of a grouped list of items into a single expression.
//!
//! Every pass walks its list once, building a new list as it goes.

use crate::{
    expr::{is_valid_name, Constant, Expr, Function},
    tokenizer::number_prefix,
};
use newton_error::Error;
use std::ops::Range;
use super::{
    error::{AdjacentOperators, ExpressionTooDeep, InvalidSyntax, InvalidToken, MissingOperand},
    item::{Item, Op, OpKind, Operand, Part, Piece},
};

/// Resolves a non-empty list of items into a single expression. `span` is the region of the
/// source code covered by the list.
///
/// Fails with [`ExpressionTooDeep`] instead of building a tree deeper than `max_depth`. The
/// returned expression is not normalized.
pub fn resolve(items: Vec<Item>, span: Range<usize>, max_depth: usize) -> Result<Operand, Error> {
    let parts = resolve_groups(items, max_depth)?;
    let parts = split_numbers(parts)?;
    let parts = recognize_functions(parts, max_depth)?;
    let pieces = resolve_names(parts)?;

    let pieces = rewrite_unary_minus(pieces, max_depth)?;
    validate_operators(&pieces)?;

    let pieces = fold_operators(pieces, max_depth, |kind| kind == OpKind::Exp)?;
    let pieces = fold_operators(pieces, max_depth, |kind| matches!(kind, OpKind::Mul | OpKind::Div))?;
    let pieces = fold_juxtaposed(pieces, max_depth)?;
    let mut pieces = fold_operators(pieces, max_depth, |kind| matches!(kind, OpKind::Add | OpKind::Sub))?;

    match pieces.pop() {
        Some(Piece::Expr(operand)) if pieces.is_empty() => Ok(operand),
        _ => Err(Error::new(vec![span], InvalidSyntax)),
    }
}

/// Fails if the operand's tree is deeper than `max_depth`.
fn check_depth(operand: Operand, max_depth: usize) -> Result<Operand, Error> {
    if operand.depth > max_depth {
        return Err(Error::new(vec![operand.span], ExpressionTooDeep { max: max_depth }));
    }
    Ok(operand)
}

/// Resolves every parenthesized group into the expression it contains.
fn resolve_groups(items: Vec<Item>, max_depth: usize) -> Result<Vec<Part>, Error> {
    items.into_iter()
        .map(|item| Ok(match item {
            Item::Raw(raw) => Part::Raw(raw),
            Item::Op(op) => Part::Op(op),
            Item::Group { items, span } => {
                let inner = span.start + 1..span.end - 1;
                let operand = resolve(items, inner, max_depth)?;
                Part::Bracket(Operand { span, ..operand })
            },
        }))
        .collect()
}

/// Splits the numeric prefix off of every raw span. If text follows the prefix, a multiplication
/// operator is inserted between the number and the text, so that `3x` reads as `3*x`.
fn split_numbers(parts: Vec<Part>) -> Result<Vec<Part>, Error> {
    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        let Part::Raw(mut raw) = part else {
            out.push(part);
            continue;
        };

        while let Some(len) = number_prefix(&raw.text).map(str::len) {
            let number = raw.split_front(len);
            let span = number.span();
            let value = number.text.parse::<f64>()
                .map_err(|_| Error::new(vec![span.clone()], InvalidToken { token: number.text.clone() }))?;
            out.push(Part::Expr(Operand::leaf(Expr::Scalar(value), span.clone())));

            if raw.text.is_empty() {
                break;
            }
            out.push(Part::Op(Op { kind: OpKind::Mul, span: span.end..span.end }));
        }

        if !raw.text.is_empty() {
            out.push(Part::Raw(raw));
        }
    }
    Ok(out)
}

/// Turns a function name directly followed by a parenthesized group into a call.
fn recognize_functions(parts: Vec<Part>, max_depth: usize) -> Result<Vec<Part>, Error> {
    let mut out = Vec::with_capacity(parts.len());
    let mut iter = parts.into_iter().peekable();
    while let Some(part) = iter.next() {
        if let Part::Raw(raw) = &part {
            if let Some(function) = Function::from_name(&raw.text) {
                if let Some(Part::Bracket(arg)) = iter.next_if(|next| matches!(next, Part::Bracket(_))) {
                    let span = raw.span().start..arg.span.end;
                    let call = arg.wrap(span, |arg| Expr::call(function, arg));
                    out.push(Part::Expr(check_depth(call, max_depth)?));
                    continue;
                }
            }
        }
        out.push(part);
    }
    Ok(out)
}

/// Unwraps the remaining parenthesized groups, and resolves raw spans into constants and
/// variables.
fn resolve_names(parts: Vec<Part>) -> Result<Vec<Piece>, Error> {
    parts.into_iter()
        .map(|part| Ok(match part {
            Part::Op(op) => Piece::Op(op),
            Part::Bracket(operand) | Part::Expr(operand) => Piece::Expr(operand),
            Part::Raw(raw) => {
                let span = raw.span();
                let expr = if let Some(constant) = Constant::from_name(&raw.text) {
                    Expr::Constant(constant)
                } else if is_valid_name(&raw.text) {
                    Expr::Variable(raw.text)
                } else {
                    return Err(Error::new(vec![span], InvalidToken { token: raw.text }));
                };
                Piece::Expr(Operand::leaf(expr, span))
            },
        }))
        .collect()
}

/// Rewrites a `-` at the start of the list, or directly after `^`, into a multiplication of the
/// following item by `-1`.
///
/// Only the single following item is negated, so `-x^2` reads as `(-x)^2`.
fn rewrite_unary_minus(pieces: Vec<Piece>, max_depth: usize) -> Result<Vec<Piece>, Error> {
    let mut out = Vec::with_capacity(pieces.len());
    let mut iter = pieces.into_iter().peekable();
    while let Some(piece) = iter.next() {
        let op = match piece {
            Piece::Op(op) if op.kind == OpKind::Sub => op,
            other => {
                out.push(other);
                continue;
            },
        };

        let unary = match out.last() {
            None => matches!(iter.peek(), Some(Piece::Expr(_))),
            Some(prev) => prev.op_kind() == Some(OpKind::Exp),
        };
        if !unary {
            out.push(Piece::Op(op));
            continue;
        }

        match iter.next() {
            Some(Piece::Expr(operand)) => {
                let span = op.span.start..operand.span.end;
                let negated = operand.wrap(span, |expr| Expr::Mul(vec![Expr::Scalar(-1.0), expr]));
                out.push(Piece::Expr(check_depth(negated, max_depth)?));
            },
            Some(Piece::Op(next)) => {
                return Err(Error::new(vec![op.span.start..next.span.end], AdjacentOperators));
            },
            None => return Err(Error::new(vec![op.span], MissingOperand { leading: false })),
        }
    }
    Ok(out)
}

/// Rejects operators that are next to each other, or that begin or end the list.
fn validate_operators(pieces: &[Piece]) -> Result<(), Error> {
    for (i, piece) in pieces.iter().enumerate() {
        let Piece::Op(op) = piece else {
            continue;
        };

        if i == 0 && (pieces.len() == 1 || op.kind != OpKind::Sub) {
            return Err(Error::new(vec![op.span.clone()], MissingOperand { leading: true }));
        }
        if i == pieces.len() - 1 {
            return Err(Error::new(vec![op.span.clone()], MissingOperand { leading: false }));
        }
        if i > 0 {
            if let Piece::Op(prev) = &pieces[i - 1] {
                return Err(Error::new(vec![prev.span.start..op.span.end], AdjacentOperators));
            }
        }
    }
    Ok(())
}

/// Folds every operator matching `matches` into its operands, left to right.
///
/// A `-` with nothing before it subtracts its operand from `0`.
fn fold_operators(
    pieces: Vec<Piece>,
    max_depth: usize,
    matches: impl Fn(OpKind) -> bool,
) -> Result<Vec<Piece>, Error> {
    let mut out: Vec<Piece> = Vec::with_capacity(pieces.len());
    let mut iter = pieces.into_iter();
    while let Some(piece) = iter.next() {
        let op = match piece {
            Piece::Op(op) if matches(op.kind) => op,
            other => {
                out.push(other);
                continue;
            },
        };

        let Some(Piece::Expr(rhs)) = iter.next() else {
            return Err(Error::new(vec![op.span], MissingOperand { leading: false }));
        };
        let lhs = match out.pop() {
            Some(Piece::Expr(lhs)) => lhs,
            None if op.kind == OpKind::Sub => Operand::leaf(Expr::Scalar(0.0), op.span.clone()),
            _ => return Err(Error::new(vec![op.span], MissingOperand { leading: true })),
        };
        out.push(Piece::Expr(check_depth(lhs.combine(op.kind, rhs), max_depth)?));
    }
    Ok(out)
}

/// Multiplies adjacent expressions with no operator between them, left to right, as in
/// `(x-1)(x-2)`.
fn fold_juxtaposed(pieces: Vec<Piece>, max_depth: usize) -> Result<Vec<Piece>, Error> {
    let mut out: Vec<Piece> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match (out.pop(), piece) {
            (Some(Piece::Expr(lhs)), Piece::Expr(rhs)) => {
                out.push(Piece::Expr(check_depth(lhs.combine(OpKind::Mul, rhs), max_depth)?));
            },
            (last, piece) => {
                out.extend(last);
                out.push(piece);
            },
        }
    }
    Ok(out)
}
