//! Symbolic differentiation.

use crate::arena::ExprArena;
use crate::expr::{ExprNode, Func};
use crate::handle::ExprHandle;

impl ExprArena {
    /// The derivative of `expr` with respect to the symbol `x`.
    ///
    /// Returns `None` when `expr` depends on `x` through a function whose
    /// derivative is not known.
    pub fn derivative(&mut self, expr: ExprHandle, x: ExprHandle) -> Option<ExprHandle> {
        if expr == x {
            return Some(self.one());
        }
        if self.is_free(expr, x) {
            return Some(self.zero());
        }
        match self.get(expr).clone() {
            ExprNode::Add(args) => {
                let mut terms = Vec::with_capacity(args.len());
                for &a in &args {
                    terms.push(self.derivative(a, x)?);
                }
                Some(self.add(terms))
            }
            ExprNode::Mul(args) => {
                let mut terms = Vec::with_capacity(args.len());
                for (i, &a) in args.iter().enumerate() {
                    if self.is_free(a, x) {
                        continue;
                    }
                    let da = self.derivative(a, x)?;
                    let mut factors: Vec<ExprHandle> = args
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &b)| b)
                        .collect();
                    factors.push(da);
                    terms.push(self.mul(factors));
                }
                Some(self.add(terms))
            }
            ExprNode::Pow { base, exp } => {
                if self.is_free(exp, x) {
                    // d(b^e) = e * b^(e-1) * b'
                    let db = self.derivative(base, x)?;
                    let minus_one = self.minus_one();
                    let e1 = self.add([exp, minus_one]);
                    let p = self.pow(base, e1);
                    Some(self.mul([exp, p, db]))
                } else if self.is_free(base, x) {
                    // d(b^e) = b^e * Log(b) * e'
                    let de = self.derivative(exp, x)?;
                    let log = self.apply(Func::Log, [base]);
                    Some(self.mul([expr, log, de]))
                } else {
                    // d(b^e) = b^e * (e' * Log(b) + e * b' / b)
                    let de = self.derivative(exp, x)?;
                    let db = self.derivative(base, x)?;
                    let log = self.apply(Func::Log, [base]);
                    let first = self.mul([de, log]);
                    let inv = self.recip(base);
                    let second = self.mul([exp, db, inv]);
                    let inner = self.add([first, second]);
                    Some(self.mul([expr, inner]))
                }
            }
            ExprNode::Function { func, args } if args.len() == 1 => {
                let u = args[0];
                let du = self.derivative(u, x)?;
                let outer = match func {
                    Func::Sin => self.apply(Func::Cos, [u]),
                    Func::Cos => {
                        let s = self.apply(Func::Sin, [u]);
                        self.neg(s)
                    }
                    Func::Tan => {
                        let t = self.apply(Func::Tan, [u]);
                        let t2 = self.powi(t, 2);
                        let one = self.one();
                        self.add([one, t2])
                    }
                    Func::Log => self.recip(u),
                    _ => return None,
                };
                Some(self.mul([outer, du]))
            }
            _ => None,
        }
    }

    /// The `n`-th derivative, or `None` if some step is not known.
    pub fn nth_derivative(&mut self, expr: ExprHandle, x: ExprHandle, n: u32) -> Option<ExprHandle> {
        let mut current = expr;
        for _ in 0..n {
            current = self.derivative(current, x)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Constant;

    #[test]
    fn test_polynomial_derivative() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let x3 = arena.powi(x, 3);
        let two = arena.integer(2);
        let two_x = arena.mul([two, x]);
        let f = arena.add([x3, two_x]);
        let df = arena.derivative(f, x).unwrap();
        let three = arena.integer(3);
        let x2 = arena.powi(x, 2);
        let three_x2 = arena.mul([three, x2]);
        assert_eq!(df, arena.add([two, three_x2]));
        let d4 = arena.nth_derivative(f, x, 4).unwrap();
        assert!(arena.is_zero(d4));
    }

    #[test]
    fn test_trig_derivatives() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin = arena.apply(Func::Sin, [x]);
        let cos = arena.apply(Func::Cos, [x]);
        assert_eq!(arena.derivative(sin, x), Some(cos));
        let neg_sin = arena.neg(sin);
        assert_eq!(arena.derivative(cos, x), Some(neg_sin));
        let d4 = arena.nth_derivative(sin, x, 4);
        assert_eq!(d4, Some(sin));
    }

    #[test]
    fn test_exponential_and_log() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let two_x = arena.pow(two, x);
        let log2 = arena.apply(Func::Log, [two]);
        let expected = arena.mul([two_x, log2]);
        assert_eq!(arena.derivative(two_x, x), Some(expected));

        let e = arena.constant(Constant::E);
        let ex = arena.pow(e, x);
        assert_eq!(arena.derivative(ex, x), Some(ex));

        let log = arena.apply(Func::Log, [x]);
        let inv = arena.recip(x);
        assert_eq!(arena.derivative(log, x), Some(inv));
    }

    #[test]
    fn test_unknown_function() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let f = arena.apply(Func::Factorial, [x]);
        assert_eq!(arena.derivative(f, x), None);
        let y = arena.symbol("y");
        let g = arena.apply(Func::Factorial, [y]);
        assert_eq!(arena.derivative(g, x), Some(arena.zero()));
    }
}
