//! Evaluation rules for built-in functions.
//!
//! [`ExprArena::apply`] returns a closed form when one of the rules below
//! fires and the unevaluated application otherwise.

use std::cmp::Ordering;

use limes_integers::{Integer, Rational};
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode, Func};
use crate::handle::ExprHandle;

/// Largest `k` for which `Binomial(n, k)` is expanded as a product.
const BINOMIAL_EXPANSION_LIMIT: i64 = 100_000;

/// Largest `n` for which `n!` is expanded.
const FACTORIAL_EXPANSION_LIMIT: i64 = 10_000;

impl ExprArena {
    /// Applies `func` to `args`, evaluating when a rule applies.
    pub fn apply(&mut self, func: Func, args: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let args: SmallVec<[ExprHandle; 2]> = args.into_iter().collect();
        if func.is_numeric() && args.iter().any(|&a| self.is_indeterminate(a)) {
            return self.indeterminate();
        }
        let evaluated = match (func, args.as_slice()) {
            (Func::Sin, &[a]) => self.eval_sin(a),
            (Func::Cos, &[a]) => self.eval_cos(a),
            (Func::Tan, &[a]) => self.eval_tan(a),
            (Func::Log, &[a]) => self.eval_log(a),
            (Func::Factorial, &[a]) => self.eval_factorial(a),
            (Func::Binomial, &[n, k]) => self.eval_binomial(n, k),
            (Func::Fibonacci, &[a]) => match self.as_integer(a).and_then(Integer::to_i64) {
                Some(n) => Some(self.int(Integer::fibonacci(n))),
                None => None,
            },
            (Func::Piecewise, _) => return self.eval_piecewise(&args),
            (Func::Interval, &[lo, hi]) if lo == hi => Some(lo),
            (f, _) if f.is_relation() => self.eval_relation(f, &args),
            _ => None,
        };
        evaluated.unwrap_or_else(|| self.intern(ExprNode::Function { func, args }))
    }

    // === Trigonometry ===

    /// The rational `r` if `h` is `r*Pi` (including `0`).
    fn pi_multiple(&self, h: ExprHandle) -> Option<Rational> {
        if self.is_zero(h) {
            return Some(Rational::zero());
        }
        if self.is_constant(h, Constant::Pi) {
            return Some(Rational::one());
        }
        match self.get(h) {
            ExprNode::Mul(args) if args.len() == 2 && self.is_constant(args[1], Constant::Pi) => {
                self.as_rational(args[0])
            }
            _ => None,
        }
    }

    /// `Sin(r*Pi)` for the table angles.
    fn sin_of_pi_multiple(&mut self, r: &Rational) -> Option<ExprHandle> {
        let two = Rational::from(2);
        let turns = Rational::from((r / &two).floor());
        let mut m = r - &(&turns * &two);
        let mut negative = false;
        if m >= Rational::one() {
            negative = true;
            m = m - Rational::one();
        }
        let half = Rational::from_i64(1, 2);
        if m > half {
            m = Rational::one() - m;
        }
        let value = if m.is_zero() {
            self.zero()
        } else if m == half {
            self.one()
        } else if m == Rational::from_i64(1, 6) {
            self.fraction(1, 2)
        } else if m == Rational::from_i64(1, 4) {
            let two = self.integer(2);
            let e = self.fraction(-1, 2);
            self.pow(two, e)
        } else if m == Rational::from_i64(1, 3) {
            let three = self.integer(3);
            let e = self.fraction(1, 2);
            let root = self.pow(three, e);
            let h = self.fraction(1, 2);
            self.mul([h, root])
        } else {
            return None;
        };
        Some(if negative { self.neg(value) } else { value })
    }

    /// Splits a sum `rest + k*Pi/2` into `(k mod 4, rest)`.
    fn quarter_turns(&mut self, h: ExprHandle) -> Option<(u8, ExprHandle)> {
        let ExprNode::Add(args) = self.get(h) else {
            return None;
        };
        let args = args.clone();
        for (i, &term) in args.iter().enumerate() {
            let Some(r) = self.pi_multiple(term) else {
                continue;
            };
            let doubled = &r * &Rational::from(2);
            let Some(k) = doubled.to_integer() else {
                continue;
            };
            let k = k.modulo(&Integer::new(4)).ok()?.to_i64()?;
            let rest: Vec<ExprHandle> = args
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &a)| a)
                .collect();
            let rest = self.add(rest);
            return u8::try_from(k).ok().map(|k| (k, rest));
        }
        None
    }

    fn unit_interval(&mut self) -> ExprHandle {
        let lo = self.minus_one();
        let hi = self.one();
        self.intern(ExprNode::Function {
            func: Func::Interval,
            args: smallvec::smallvec![lo, hi],
        })
    }

    fn eval_sin(&mut self, arg: ExprHandle) -> Option<ExprHandle> {
        if let Some(r) = self.pi_multiple(arg) {
            if let Some(v) = self.sin_of_pi_multiple(&r) {
                return Some(v);
            }
        }
        match self.as_constant(arg) {
            Some(Constant::Infinity | Constant::NegInfinity) => return Some(self.unit_interval()),
            Some(Constant::ComplexInfinity) => return Some(self.indeterminate()),
            _ => {}
        }
        if let Some((k, rest)) = self.quarter_turns(arg) {
            let v = match k {
                0 | 2 => self.apply(Func::Sin, [rest]),
                _ => self.apply(Func::Cos, [rest]),
            };
            return Some(if k >= 2 { self.neg(v) } else { v });
        }
        if self.is_negative_term(arg) {
            let a = self.neg(arg);
            let s = self.apply(Func::Sin, [a]);
            return Some(self.neg(s));
        }
        None
    }

    fn eval_cos(&mut self, arg: ExprHandle) -> Option<ExprHandle> {
        if let Some(r) = self.pi_multiple(arg) {
            let shifted = r + Rational::from_i64(1, 2);
            if let Some(v) = self.sin_of_pi_multiple(&shifted) {
                return Some(v);
            }
        }
        match self.as_constant(arg) {
            Some(Constant::Infinity | Constant::NegInfinity) => return Some(self.unit_interval()),
            Some(Constant::ComplexInfinity) => return Some(self.indeterminate()),
            _ => {}
        }
        if let Some((k, rest)) = self.quarter_turns(arg) {
            let v = match k {
                0 | 2 => self.apply(Func::Cos, [rest]),
                _ => self.apply(Func::Sin, [rest]),
            };
            return Some(if k == 1 || k == 2 { self.neg(v) } else { v });
        }
        if self.is_negative_term(arg) {
            let a = self.neg(arg);
            return Some(self.apply(Func::Cos, [a]));
        }
        None
    }

    fn eval_tan(&mut self, arg: ExprHandle) -> Option<ExprHandle> {
        if let Some(r) = self.pi_multiple(arg) {
            let sin = self.sin_of_pi_multiple(&r);
            let cos = self.sin_of_pi_multiple(&(r + Rational::from_i64(1, 2)));
            if let (Some(s), Some(c)) = (sin, cos) {
                if self.is_zero(c) {
                    return Some(self.constant(Constant::ComplexInfinity));
                }
                return Some(self.div(s, c));
            }
        }
        if self.is_negative_term(arg) {
            let a = self.neg(arg);
            let t = self.apply(Func::Tan, [a]);
            return Some(self.neg(t));
        }
        None
    }

    // === Logarithm ===

    fn eval_log(&mut self, arg: ExprHandle) -> Option<ExprHandle> {
        if self.is_one(arg) {
            return Some(self.zero());
        }
        if self.is_zero(arg) {
            return Some(self.neg_infinity());
        }
        match self.as_constant(arg) {
            Some(Constant::E) => return Some(self.one()),
            Some(c) if c.is_infinite() => return Some(self.infinity()),
            _ => {}
        }
        if let ExprNode::Pow { base, exp } = self.get(arg) {
            if self.is_constant(*base, Constant::E) && self.is_number(*exp) {
                return Some(*exp);
            }
        }
        None
    }

    // === Combinatorial functions ===

    fn eval_factorial(&mut self, arg: ExprHandle) -> Option<ExprHandle> {
        if self.is_infinity(arg) {
            return Some(self.infinity());
        }
        let n = self.as_integer(arg)?.to_i64()?;
        if n < 0 {
            return Some(self.constant(Constant::ComplexInfinity));
        }
        if n > FACTORIAL_EXPANSION_LIMIT {
            return None;
        }
        let value = (2..=n).fold(Integer::one(), |acc, i| acc * Integer::new(i));
        Some(self.int(value))
    }

    fn eval_binomial(&mut self, n: ExprHandle, k: ExprHandle) -> Option<ExprHandle> {
        if self.is_zero(k) || n == k {
            return Some(self.one());
        }
        if self.is_one(k) {
            return Some(n);
        }
        let k = self.as_integer(k)?.to_i64()?;
        let n = self.as_integer(n)?.clone();
        if k < 0 {
            return Some(self.zero());
        }
        if k > BINOMIAL_EXPANSION_LIMIT {
            return None;
        }
        let mut value = Integer::one();
        for i in 0..k {
            value = value * (&n - &Integer::new(i)) / Integer::new(i + 1);
        }
        Some(self.int(value))
    }

    // === Relations ===

    /// Order of two real values when it can be decided exactly.
    fn real_order(&self, a: ExprHandle, b: ExprHandle) -> Option<Ordering> {
        if let (Some(x), Some(y)) = (self.as_rational(a), self.as_rational(b)) {
            return Some(x.cmp(&y));
        }
        let rank = |h: ExprHandle| {
            if self.is_neg_infinity(h) {
                Some(0u8)
            } else if self.is_infinity(h) {
                Some(2u8)
            } else if self.numeric_value(h).is_some() {
                Some(1u8)
            } else {
                None
            }
        };
        match (rank(a), rank(b)) {
            (Some(1), Some(1)) => {
                if a == b {
                    return Some(Ordering::Equal);
                }
                let (x, y) = (self.numeric_value(a)?, self.numeric_value(b)?);
                x.partial_cmp(&y).filter(|o| *o != Ordering::Equal)
            }
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => None,
        }
    }

    fn eval_relation(&mut self, func: Func, args: &[ExprHandle]) -> Option<ExprHandle> {
        if args.len() < 2 {
            return None;
        }
        if func == Func::Equal && args.windows(2).all(|w| w[0] == w[1]) {
            return Some(self.constant(Constant::True));
        }
        let mut decided = true;
        for w in args.windows(2) {
            let Some(ord) = self.real_order(w[0], w[1]) else {
                decided = false;
                continue;
            };
            let holds = match func {
                Func::Equal => ord == Ordering::Equal,
                Func::Greater => ord == Ordering::Greater,
                Func::GreaterEqual => ord != Ordering::Less,
                Func::Less => ord == Ordering::Less,
                Func::LessEqual => ord != Ordering::Greater,
                _ => return None,
            };
            if !holds {
                return Some(self.constant(Constant::False));
            }
        }
        decided.then(|| self.constant(Constant::True))
    }

    // === Piecewise ===

    fn eval_piecewise(&mut self, args: &[ExprHandle]) -> ExprHandle {
        let (pairs, default) = if args.len() % 2 == 1 {
            (&args[..args.len() - 1], args[args.len() - 1])
        } else {
            (args, self.zero())
        };
        let mut kept: SmallVec<[ExprHandle; 2]> = SmallVec::new();
        let mut default = default;
        for pair in pairs.chunks(2) {
            let (value, condition) = (pair[0], pair[1]);
            if self.is_constant(condition, Constant::False) {
                continue;
            }
            if self.is_constant(condition, Constant::True) {
                if kept.is_empty() {
                    return value;
                }
                default = value;
                break;
            }
            kept.push(value);
            kept.push(condition);
        }
        if kept.is_empty() {
            return default;
        }
        kept.push(default);
        self.intern(ExprNode::Function {
            func: Func::Piecewise,
            args: kept,
        })
    }
}
