/// A rewrite applied by the simplifier.
///
/// Each variant corresponds to one stage of a simplification pass, so a single pass over a large
/// tree can report the same step many times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `(a + b) + c = a + b + c`
    ///
    /// `(a * b) * c = a * b * c`
    Flatten,

    /// `a + 0 = a`, `a * 1 = a`, `a / 1 = a`, `0 - a = -1 * a`
    ///
    /// Scalar terms of a sum and scalar factors of a product are also gathered into one trailing
    /// scalar.
    Identity,

    /// `a * 0 = 0`
    ///
    /// `0 / a = 0`
    Absorb,

    /// `a^0 = 1`, `a^1 = a`, `0^a = 0`, `1^a = 1`, `e^(ln(a) * b) = a^b`
    Power,

    /// Cancels equal factors across a fraction and folds its scalar factors into one.
    ReduceFraction,

    /// `a * a^b = a^(1 + b)`
    ///
    /// `a^b / a^c = a^(b - c)`
    MergeExponents,

    /// An operator applied to scalar operands is replaced by its value.
    Fold,
}
