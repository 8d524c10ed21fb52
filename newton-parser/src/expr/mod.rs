//! The expression tree shared by every stage of the engine.
//!
//! An [`Expr`] is a strict tree: each node exclusively owns its children, and nothing is ever
//! mutated in place. Every transformation (parsing, differentiation, simplification) consumes or
//! borrows a tree and returns a new one.
//!
//! Sums and products are stored **flattened**. The expression `x + (y - z)` is represented as a
//! single [`Expr::Add`] node with _three_ addends, `x`, `y` and `z`, the last of which carries a
//! `subtract` flag. Binary sums and products only exist while a tree is being built;
//! [`Expr::normalize`] collapses nested lists into one list per subtree.
//!
//! # Structural equality
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`Expr`] implement **structural equality**,
//! not mathematical equivalence. Two expressions are structurally equal if:
//!
//! - They are the same kind of node.
//! - If both are [`Expr::Scalar`], both values are equal, where two `NaN`s are considered equal.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both have the same number of children, and the
//! children at each position are structurally equal (with equal `subtract` flags for sums).
//! - Otherwise, all respective children are structurally equal.
//!
//! Equality is **positional**: `x + y` and `y + x` are not equal. Treating `NaN` as equal to
//! itself makes the relation reflexive, so that a rewriting loop comparing two consecutive trees
//! terminates even if a rewrite produced `NaN`. Numeric results should still be compared with
//! ordinary `f64` semantics.
//!
//! The [`Hash`] implementation is consistent with this equality.

mod constant;
mod function;
mod iter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Div, Mul, Neg, Sub},
};

pub use constant::Constant;
pub use function::Function;
pub use iter::ExprIter;

/// Returns true if the given string is a valid variable name: one or more ASCII letters or
/// underscores, with no digits.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// One entry of a sum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Addend {
    /// The value being added or subtracted.
    pub expr: Expr,

    /// Whether the value is subtracted from the sum instead of added to it.
    pub subtract: bool,
}

impl Addend {
    /// Creates an addend that is added to the sum.
    pub fn add(expr: Expr) -> Self {
        Self { expr, subtract: false }
    }

    /// Creates an addend that is subtracted from the sum.
    pub fn sub(expr: Expr) -> Self {
        Self { expr, subtract: true }
    }

    /// Flips the sign of this addend.
    pub fn negate(self) -> Self {
        Self { expr: self.expr, subtract: !self.subtract }
    }
}

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number, such as `2` or `0.5`. May be `NaN` or infinite after rewriting.
    Scalar(f64),

    /// A named constant, such as `pi`.
    Constant(Constant),

    /// A variable, such as `x` or `rate_of_change`.
    Variable(String),

    /// Multiple terms added or subtracted together.
    Add(Vec<Addend>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// A dividend divided by a divisor.
    Div(Box<Expr>, Box<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),

    /// A built-in function applied to an argument.
    Call(Function, Box<Expr>),
}

impl Expr {
    /// Creates a variable.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid variable name (see [`is_valid_name`]).
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(is_valid_name(&name), "invalid variable name: `{}`", name);
        Self::Variable(name)
    }

    /// Creates a function call.
    pub fn call(function: Function, arg: Expr) -> Self {
        Self::Call(function, Box::new(arg))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: Expr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// If the expression is a [`Expr::Scalar`], returns the contained value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Expr::Scalar`] equal to the given value.
    pub fn is_scalar(&self, value: f64) -> bool {
        self.as_scalar() == Some(value)
    }

    /// If the expression is a [`Expr::Variable`], returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one addend, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single addend / factor, or an [`Expr::Scalar`] containing 0 or 1. A single
    /// subtracted addend is left alone.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut addends) => {
                if addends.is_empty() {
                    Self::Scalar(0.0)
                } else if addends.len() == 1 && !addends[0].subtract {
                    addends.remove(0).expr
                } else {
                    Self::Add(addends)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::Scalar(1.0)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Recursively flattens nested sums into one [`Expr::Add`] per subtree, and nested products
    /// into one [`Expr::Mul`] per subtree.
    ///
    /// A sum nested inside a subtracted addend contributes its addends with their `subtract`
    /// flags inverted.
    pub fn normalize(self) -> Self {
        match self {
            Self::Add(addends) => {
                let mut flat = Vec::with_capacity(addends.len());
                for Addend { expr, subtract } in addends {
                    match expr.normalize() {
                        Self::Add(inner) => flat.extend(
                            inner.into_iter().map(|addend| if subtract { addend.negate() } else { addend }),
                        ),
                        expr => flat.push(Addend { expr, subtract }),
                    }
                }
                Self::Add(flat)
            },
            Self::Mul(factors) => {
                let mut flat = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.normalize() {
                        Self::Mul(inner) => flat.extend(inner),
                        factor => flat.push(factor),
                    }
                }
                Self::Mul(flat)
            },
            Self::Div(lhs, rhs) => Self::Div(Box::new(lhs.normalize()), Box::new(rhs.normalize())),
            Self::Exp(lhs, rhs) => Self::Exp(Box::new(lhs.normalize()), Box::new(rhs.normalize())),
            Self::Call(function, arg) => Self::Call(function, Box::new(arg.normalize())),
            leaf => leaf,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns the names of all variables that appear in the expression.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Expr::as_variable)
            .collect()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => {
                if value.is_sign_negative() && *value != 0.0 {
                    write!(f, "({})", value)
                } else {
                    write!(f, "{}", value)
                }
            },
            Self::Constant(constant) => write!(f, "{}", constant),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Add(addends) => {
                let mut iter = addends.iter();
                let Some(first) = iter.next() else {
                    return write!(f, "0");
                };
                write!(f, "(")?;
                if first.subtract {
                    write!(f, "-")?;
                }
                write!(f, "{}", first.expr)?;
                for addend in iter {
                    let sign = if addend.subtract { '-' } else { '+' };
                    write!(f, " {} {}", sign, addend.expr)?;
                }
                write!(f, ")")
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                let Some(first) = iter.next() else {
                    return write!(f, "1");
                };
                write!(f, "({}", first)?;
                for factor in iter {
                    write!(f, " * {}", factor)?;
                }
                write!(f, ")")
            },
            Self::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Self::Exp(lhs, rhs) => write!(f, "({}^{})", lhs, rhs),
            Self::Call(function, arg) => write!(f, "{}({})", function, arg),
        }
    }
}

/// Checks if two expressions are **structurally** equal.
///
/// For more information about structural equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(lhs), Self::Scalar(rhs)) => lhs == rhs || (lhs.is_nan() && rhs.is_nan()),
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs == rhs,
            (Self::Variable(lhs), Self::Variable(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) => lhs == rhs,
            (Self::Mul(lhs), Self::Mul(rhs)) => lhs == rhs,
            (Self::Div(lhs_a, lhs_b), Self::Div(rhs_a, rhs_b))
                | (Self::Exp(lhs_a, lhs_b), Self::Exp(rhs_a, rhs_b)) => {
                lhs_a == rhs_a && lhs_b == rhs_b
            },
            (Self::Call(lhs_fn, lhs_arg), Self::Call(rhs_fn, rhs_arg)) => {
                lhs_fn == rhs_fn && lhs_arg == rhs_arg
            },
            _ => false,
        }
    }
}

/// [`Eq`] holds because `NaN` is considered equal to itself.
impl Eq for Expr {}

/// [`Hash`] is implemented manually so that it agrees with structural equality: every `NaN`
/// hashes the same, and `-0.0` hashes the same as `0.0`.
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Scalar(value) => {
                let bits = if value.is_nan() {
                    f64::NAN.to_bits()
                } else if *value == 0.0 {
                    0
                } else {
                    value.to_bits()
                };
                bits.hash(state);
            },
            Self::Constant(constant) => constant.hash(state),
            Self::Variable(name) => name.hash(state),
            Self::Add(addends) => addends.hash(state),
            Self::Mul(factors) => factors.hash(state),
            Self::Div(lhs, rhs) | Self::Exp(lhs, rhs) => {
                lhs.hash(state);
                rhs.hash(state);
            },
            Self::Call(function, arg) => {
                function.hash(state);
                arg.hash(state);
            },
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Constant> for Expr {
    fn from(constant: Constant) -> Self {
        Self::Constant(constant)
    }
}

/// Adds two expressions, flattening either side if it is already a sum.
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        let mut addends = match self {
            Self::Add(addends) => addends,
            lhs => vec![Addend::add(lhs)],
        };
        match rhs {
            Self::Add(rhs) => addends.extend(rhs),
            rhs => addends.push(Addend::add(rhs)),
        }
        Self::Add(addends)
    }
}

/// Subtracts two expressions, flattening either side if it is already a sum.
impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut addends = match self {
            Self::Add(addends) => addends,
            lhs => vec![Addend::add(lhs)],
        };
        match rhs {
            Self::Add(rhs) => addends.extend(rhs.into_iter().map(Addend::negate)),
            rhs => addends.push(Addend::sub(rhs)),
        }
        Self::Add(addends)
    }
}

/// Multiplies two expressions, flattening either side if it is already a product.
impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut factors = match self {
            Self::Mul(factors) => factors,
            lhs => vec![lhs],
        };
        match rhs {
            Self::Mul(rhs) => factors.extend(rhs),
            rhs => factors.push(rhs),
        }
        Self::Mul(factors)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        Self::Div(Box::new(self), Box::new(rhs))
    }
}

/// Negates the expression by multiplying it by `-1`.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Self::Scalar(-1.0) * self
    }
}
