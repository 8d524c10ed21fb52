#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter, `pi`.
    Pi,

    /// Euler's number, `e`.
    E,
}

impl Constant {
    /// Every constant, in the order they are matched by the parser.
    pub const ALL: [Constant; 2] = [Constant::Pi, Constant::E];

    /// Returns the name of the constant, as it is written in source.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Returns the constant with the given name, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|constant| constant.name() == name)
    }

    /// Returns the numeric value of the constant.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
