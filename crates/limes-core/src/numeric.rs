//! Numeric queries on expressions.

use limes_integers::Rational;

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode, Func};
use crate::handle::ExprHandle;

impl ExprArena {
    /// The exact value of an integer or rational node.
    #[must_use]
    pub fn as_rational(&self, h: ExprHandle) -> Option<Rational> {
        match self.get(h) {
            ExprNode::Integer(n) => Some(Rational::from(n)),
            ExprNode::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// True if the expression contains no symbol, no infinity and no
    /// non-numeric head, so that it denotes a single finite real or complex
    /// number.
    #[must_use]
    pub fn is_numeric_function(&self, h: ExprHandle) -> bool {
        match self.get(h) {
            ExprNode::Integer(_) | ExprNode::Rational(_) => true,
            ExprNode::Constant(c) => matches!(c, Constant::Pi | Constant::E),
            ExprNode::Symbol(_) => false,
            ExprNode::Add(args) | ExprNode::Mul(args) => {
                args.iter().all(|&a| self.is_numeric_function(a))
            }
            ExprNode::Pow { base, exp } => {
                self.is_numeric_function(*base) && self.is_numeric_function(*exp)
            }
            ExprNode::Function { func, args } => {
                func.is_numeric() && args.iter().all(|&a| self.is_numeric_function(a))
            }
        }
    }

    /// A floating point approximation of a numeric function with a real value.
    #[must_use]
    pub fn numeric_value(&self, h: ExprHandle) -> Option<f64> {
        let value = match self.get(h) {
            ExprNode::Integer(n) => n.to_f64(),
            ExprNode::Rational(r) => r.to_f64(),
            ExprNode::Constant(Constant::Pi) => std::f64::consts::PI,
            ExprNode::Constant(Constant::E) => std::f64::consts::E,
            ExprNode::Constant(_) | ExprNode::Symbol(_) => return None,
            ExprNode::Add(args) => {
                let mut sum = 0.0;
                for &a in args {
                    sum += self.numeric_value(a)?;
                }
                sum
            }
            ExprNode::Mul(args) => {
                let mut product = 1.0;
                for &a in args {
                    product *= self.numeric_value(a)?;
                }
                product
            }
            ExprNode::Pow { base, exp } => {
                let b = self.numeric_value(*base)?;
                let e = self.numeric_value(*exp)?;
                b.powf(e)
            }
            ExprNode::Function { func, args } => {
                let arg = self.numeric_value(*args.first()?)?;
                match func {
                    Func::Sin => arg.sin(),
                    Func::Cos => arg.cos(),
                    Func::Tan => arg.tan(),
                    Func::Log => arg.ln(),
                    _ => return None,
                }
            }
        };
        value.is_finite().then_some(value)
    }

    /// The sign of a real numeric value, including the signed infinities.
    #[must_use]
    pub fn sign(&self, h: ExprHandle) -> Option<i8> {
        if let Some(r) = self.as_rational(h) {
            return Some(r.signum());
        }
        match self.as_constant(h) {
            Some(Constant::Infinity | Constant::Pi | Constant::E) => return Some(1),
            Some(Constant::NegInfinity) => return Some(-1),
            Some(_) => return None,
            None => {}
        }
        let v = self.numeric_value(h)?;
        if v > 0.0 {
            Some(1)
        } else if v < 0.0 {
            Some(-1)
        } else {
            None
        }
    }

    /// True for `Infinity`.
    #[must_use]
    pub fn is_infinity(&self, h: ExprHandle) -> bool {
        self.is_constant(h, Constant::Infinity)
    }

    /// True for `-Infinity`.
    #[must_use]
    pub fn is_neg_infinity(&self, h: ExprHandle) -> bool {
        self.is_constant(h, Constant::NegInfinity)
    }

    /// True for any of the three infinities.
    #[must_use]
    pub fn is_infinite(&self, h: ExprHandle) -> bool {
        self.as_constant(h).is_some_and(Constant::is_infinite)
    }

    /// True if the term prints with a leading minus sign: a negative
    /// number, `-Infinity`, or a product with a negative coefficient.
    #[must_use]
    pub fn is_negative_term(&self, h: ExprHandle) -> bool {
        match self.get(h) {
            ExprNode::Integer(n) => n.is_negative(),
            ExprNode::Rational(r) => r.is_negative(),
            ExprNode::Constant(Constant::NegInfinity) => true,
            ExprNode::Mul(args) => args.first().is_some_and(|&a| self.is_negative_term(a)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_function() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let pi = arena.constant(Constant::Pi);
        let two = arena.integer(2);
        let sqrt2 = {
            let half = arena.fraction(1, 2);
            arena.pow(two, half)
        };
        let sum = arena.add([pi, sqrt2]);
        assert!(arena.is_numeric_function(sum));
        assert!(!arena.is_numeric_function(x));
        let inf = arena.infinity();
        assert!(!arena.is_numeric_function(inf));
        let value = arena.numeric_value(sum).unwrap();
        assert!((value - (std::f64::consts::PI + std::f64::consts::SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn test_sign() {
        let mut arena = ExprArena::new();
        let neg = arena.fraction(-3, 4);
        let inf = arena.neg_infinity();
        let pi = arena.constant(Constant::Pi);
        let minus_pi = arena.neg(pi);
        assert_eq!(arena.sign(neg), Some(-1));
        assert_eq!(arena.sign(inf), Some(-1));
        assert_eq!(arena.sign(minus_pi), Some(-1));
        let x = arena.symbol("x");
        assert_eq!(arena.sign(x), None);
    }
}
