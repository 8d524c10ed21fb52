#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A built-in single-argument function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Sech,
    Csch,
    Cot,
    Coth,
    Csc,
    Sec,

    /// Natural logarithm.
    Ln,
    Abs,
    Sqrt,

    /// Rounds half-way cases away from zero.
    Round,
    Ceil,
    Floor,
}

impl Function {
    /// Every function kind.
    pub const ALL: [Function; 18] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Sech,
        Function::Csch,
        Function::Cot,
        Function::Coth,
        Function::Csc,
        Function::Sec,
        Function::Ln,
        Function::Abs,
        Function::Sqrt,
        Function::Round,
        Function::Ceil,
        Function::Floor,
    ];

    /// Returns the name used to call the function in source.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sech => "sech",
            Self::Csch => "csch",
            Self::Cot => "cot",
            Self::Coth => "coth",
            Self::Csc => "csc",
            Self::Sec => "sec",
            Self::Ln => "ln",
            Self::Abs => "abs",
            Self::Sqrt => "sqrt",
            Self::Round => "round",
            Self::Ceil => "ceil",
            Self::Floor => "floor",
        }
    }

    /// Returns the function with exactly the given name, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
