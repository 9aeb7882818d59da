//! Structural queries, substitution and re-evaluation.

use hashbrown::HashMap;

use crate::arena::ExprArena;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

impl ExprArena {
    /// True if `pattern` does not occur anywhere inside `expr`.
    #[must_use]
    pub fn is_free(&self, expr: ExprHandle, pattern: ExprHandle) -> bool {
        if expr == pattern {
            return false;
        }
        match self.get(expr) {
            ExprNode::Integer(_)
            | ExprNode::Rational(_)
            | ExprNode::Symbol(_)
            | ExprNode::Constant(_) => true,
            ExprNode::Add(args) | ExprNode::Mul(args) => {
                args.iter().all(|&a| self.is_free(a, pattern))
            }
            ExprNode::Pow { base, exp } => self.is_free(*base, pattern) && self.is_free(*exp, pattern),
            ExprNode::Function { args, .. } => args.iter().all(|&a| self.is_free(a, pattern)),
        }
    }

    /// Rebuilds a node from new children through the canonical constructors.
    pub fn rebuild(&mut self, expr: ExprHandle, children: &[ExprHandle]) -> ExprHandle {
        match self.get(expr).clone() {
            ExprNode::Add(_) => self.add(children.iter().copied()),
            ExprNode::Mul(_) => self.mul(children.iter().copied()),
            ExprNode::Pow { .. } => self.pow(children[0], children[1]),
            ExprNode::Function { func, .. } => self.apply(func, children.iter().copied()),
            _ => expr,
        }
    }

    /// Replaces every occurrence of `from` by `to` and re-evaluates.
    pub fn replace_all(&mut self, expr: ExprHandle, from: ExprHandle, to: ExprHandle) -> ExprHandle {
        let mut memo = HashMap::new();
        self.replace_rec(expr, &[(from, to)], &mut memo)
    }

    fn replace_rec(
        &mut self,
        expr: ExprHandle,
        rules: &[(ExprHandle, ExprHandle)],
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&(_, to)) = rules.iter().find(|(from, _)| *from == expr) {
            return to;
        }
        if let Some(&done) = memo.get(&expr) {
            return done;
        }
        let children = self.get(expr).children();
        if children.is_empty() {
            return expr;
        }
        let mut changed = false;
        let mut replaced = Vec::with_capacity(children.len());
        for &child in &children {
            let r = self.replace_rec(child, rules, memo);
            changed |= r != child;
            replaced.push(r);
        }
        let result = if changed {
            self.rebuild(expr, &replaced)
        } else {
            expr
        };
        memo.insert(expr, result);
        result
    }

    /// Re-evaluates an expression bottom-up.
    ///
    /// Canonical expressions are fixed points, so this is the identity on
    /// anything built through the arena's constructors.
    pub fn evaluate(&mut self, expr: ExprHandle) -> ExprHandle {
        let children = self.get(expr).children();
        if children.is_empty() {
            return expr;
        }
        let evaluated: Vec<ExprHandle> = children.iter().map(|&c| self.evaluate(c)).collect();
        self.rebuild(expr, &evaluated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Constant, Func};

    #[test]
    fn test_is_free() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let sin = arena.apply(Func::Sin, [x]);
        let e = arena.add([y, sin]);
        assert!(!arena.is_free(e, x));
        let z = arena.symbol("z");
        assert!(arena.is_free(e, z));
        assert!(!arena.is_free(e, sin));
    }

    #[test]
    fn test_replace_all_evaluates() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin = arena.apply(Func::Sin, [x]);
        let ratio = arena.div(sin, x);
        let pi = arena.constant(Constant::Pi);
        let at_pi = arena.replace_all(ratio, x, pi);
        assert!(arena.is_zero(at_pi));

        let zero = arena.zero();
        let x_plus_one = {
            let one = arena.one();
            arena.add([x, one])
        };
        let one = arena.one();
        assert_eq!(arena.replace_all(x_plus_one, x, zero), one);
    }

    #[test]
    fn test_evaluate_is_identity_on_canonical() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let half = arena.fraction(1, 2);
        let sqrt2 = arena.pow(two, half);
        let x3 = arena.powi(x, 3);
        let sixth = arena.fraction(-1, 6);
        let term = arena.mul([sixth, x3]);
        let cos = arena.apply(Func::Cos, [x]);
        let e = arena.add([x, term, sqrt2, cos]);
        assert_eq!(arena.evaluate(e), e);
    }
}
