use newton_parser::expr::Function;

/// Applies the given function to a number.
pub fn call(function: Function, arg: f64) -> f64 {
    match function {
        Function::Sin => arg.sin(),
        Function::Cos => arg.cos(),
        Function::Tan => arg.tan(),
        Function::Sinh => arg.sinh(),
        Function::Cosh => arg.cosh(),
        Function::Tanh => arg.tanh(),
        Function::Sech => arg.cosh().recip(),
        Function::Csch => arg.sinh().recip(),
        Function::Cot => arg.tan().recip(),
        Function::Coth => arg.tanh().recip(),
        Function::Csc => arg.sin().recip(),
        Function::Sec => arg.cos().recip(),
        Function::Ln => arg.ln(),
        Function::Abs => arg.abs(),
        Function::Sqrt => arg.sqrt(),
        Function::Round => arg.round(),
        Function::Ceil => arg.ceil(),
        Function::Floor => arg.floor(),
    }
}
