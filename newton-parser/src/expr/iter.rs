use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Returns true if the children of the given node have all been visited, or if it has none.
    fn children_done(&self, expr: &'a Expr) -> bool {
        match last_child(expr) {
            Some(last) => self.is_last_visited(last),
            None => true,
        }
    }
}

/// Returns the rightmost child of the given node.
fn last_child(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Scalar(_) | Expr::Constant(_) | Expr::Variable(_) => None,
        Expr::Add(addends) => addends.last().map(|addend| &addend.expr),
        Expr::Mul(factors) => factors.last(),
        Expr::Div(_, rhs) | Expr::Exp(_, rhs) => Some(rhs),
        Expr::Call(_, arg) => Some(arg),
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            if self.children_done(expr) {
                return self.visit();
            }

            match expr {
                Expr::Scalar(_) | Expr::Constant(_) | Expr::Variable(_) => return self.visit(),
                Expr::Add(addends) => {
                    for addend in addends.iter().rev() {
                        self.stack.push(&addend.expr);
                    }
                },
                Expr::Mul(factors) => {
                    for factor in factors.iter().rev() {
                        self.stack.push(factor);
                    }
                },
                Expr::Div(lhs, rhs) | Expr::Exp(lhs, rhs) => {
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
                Expr::Call(_, arg) => self.stack.push(arg),
            }
        }
    }
}
