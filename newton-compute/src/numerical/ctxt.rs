use levenshtein::levenshtein;
use newton_parser::expr::{is_valid_name, Expr};

/// The maximum depth of nested variable lookups. Bindings that refer to each other deeper than
/// this (for example, in a cycle) fail to evaluate instead of overflowing the stack.
pub const MAX_RECURSION_DEPTH: usize = 1 << 8;

/// Binds a variable name to an expression.
///
/// The expression is evaluated each time the variable is looked up, so a binding can refer to
/// other bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The name of the variable.
    pub name: String,

    /// The value of the variable.
    pub value: Expr,
}

impl Binding {
    /// Creates a new binding.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid variable name.
    pub fn new(name: impl Into<String>, value: impl Into<Expr>) -> Self {
        let name = name.into();
        assert!(is_valid_name(&name), "invalid variable name: `{}`", name);
        Self { name, value: value.into() }
    }

    /// Creates a new binding to a number.
    pub fn scalar(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, Expr::Scalar(value))
    }
}

/// A context to use when evaluating an expression, containing an ordered list of variable
/// bindings.
///
/// Lookup is first-match-wins: a binding added after another binding with the same name is
/// shadowed by it, not the other way around.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ctxt {
    /// The variables in the context, in lookup order.
    vars: Vec<Binding>,
}

impl Ctxt {
    /// Creates a new empty context.
    pub fn new() -> Ctxt {
        Ctxt::default()
    }

    /// Add a variable to the end of the context.
    pub fn add_var(&mut self, name: &str, value: impl Into<Expr>) {
        self.vars.push(Binding::new(name, value));
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<&Expr> {
        lookup(&self.vars, name)
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &[Binding] {
        &self.vars
    }

    /// Returns all variables in the context with a name similar to the given name.
    pub fn get_similar_vars(&self, name: &str) -> Vec<&str> {
        similar_names(&self.vars, name)
    }
}

impl From<Vec<Binding>> for Ctxt {
    fn from(vars: Vec<Binding>) -> Self {
        Self { vars }
    }
}

impl FromIterator<Binding> for Ctxt {
    fn from_iter<T: IntoIterator<Item = Binding>>(iter: T) -> Self {
        Self { vars: iter.into_iter().collect() }
    }
}

/// Returns the value of the first binding with the given name.
pub(crate) fn lookup<'a>(bindings: &'a [Binding], name: &str) -> Option<&'a Expr> {
    bindings.iter()
        .find(|binding| binding.name == name)
        .map(|binding| &binding.value)
}

/// Returns the distinct names of bindings whose name is similar to the given name.
pub(crate) fn similar_names<'a>(bindings: &'a [Binding], name: &str) -> Vec<&'a str> {
    let mut names = Vec::new();
    for binding in bindings {
        if levenshtein(&binding.name, name) < 2 && !names.contains(&binding.name.as_str()) {
            names.push(binding.name.as_str());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_binding_wins() {
        let mut ctxt = Ctxt::new();
        ctxt.add_var("x", 1.0);
        ctxt.add_var("x", 2.0);
        assert_eq!(ctxt.get_var("x"), Some(&Expr::Scalar(1.0)));
        assert_eq!(ctxt.get_var("y"), None);
    }

    #[test]
    fn similar_vars() {
        let ctxt = Ctxt::from(vec![
            Binding::scalar("rate", 1.0),
            Binding::scalar("rat", 2.0),
            Binding::scalar("rate", 3.0),
            Binding::scalar("time", 4.0),
        ]);
        assert_eq!(ctxt.get_similar_vars("rates"), vec!["rate"]);
        assert_eq!(ctxt.get_similar_vars("rae"), vec!["rate", "rat"]);
    }

    #[test]
    #[should_panic]
    fn invalid_binding_name() {
        Binding::scalar("x2", 1.0);
    }
}
