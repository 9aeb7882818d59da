//! Canonical ordering of expressions.
//!
//! Sums and products sort their arguments with [`ExprArena::compare`].
//! Numbers come first. Everything else is compared as a list of
//! `(base, exponent)` factors read from the last factor backwards, which
//! puts `x` before `x^2` before `x*y`. Atoms rank constants before symbols
//! before function applications before sums.

use std::cmp::Ordering;

use limes_integers::Rational;
use num_traits::One;
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

type FactorList = SmallVec<[(ExprHandle, Option<ExprHandle>); 4]>;

impl ExprArena {
    /// Total order used to sort the arguments of sums and products.
    ///
    /// Structurally equal expressions are the same handle, so the handle
    /// index breaks any remaining tie.
    #[must_use]
    pub fn compare(&self, a: ExprHandle, b: ExprHandle) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.compare_structural(a, b).then_with(|| a.cmp(&b))
    }

    fn compare_structural(&self, a: ExprHandle, b: ExprHandle) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        match (self.as_rational(a), self.as_rational(b)) {
            (Some(x), Some(y)) => return x.cmp(&y),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
        if self.is_product_like(a) || self.is_product_like(b) {
            return self.compare_factor_lists(a, b);
        }
        self.compare_atoms(a, b)
    }

    fn is_product_like(&self, h: ExprHandle) -> bool {
        matches!(self.get(h), ExprNode::Mul(_) | ExprNode::Pow { .. })
    }

    fn factor_list(&self, h: ExprHandle) -> (Rational, FactorList) {
        match self.get(h) {
            ExprNode::Mul(args) => {
                let mut coefficient = Rational::one();
                let mut factors = FactorList::new();
                for &arg in args {
                    if let Some(c) = self.as_rational(arg) {
                        coefficient = c;
                    } else if let ExprNode::Pow { base, exp } = self.get(arg) {
                        factors.push((*base, Some(*exp)));
                    } else {
                        factors.push((arg, None));
                    }
                }
                (coefficient, factors)
            }
            ExprNode::Pow { base, exp } => {
                (Rational::one(), smallvec::smallvec![(*base, Some(*exp))])
            }
            _ => (Rational::one(), smallvec::smallvec![(h, None)]),
        }
    }

    fn compare_factor_lists(&self, a: ExprHandle, b: ExprHandle) -> Ordering {
        let (ca, fa) = self.factor_list(a);
        let (cb, fb) = self.factor_list(b);
        for (x, y) in fa.iter().rev().zip(fb.iter().rev()) {
            let ord = self
                .compare_structural(x.0, y.0)
                .then_with(|| self.compare_exponents(x.1, y.1));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        fa.len().cmp(&fb.len()).then_with(|| ca.cmp(&cb))
    }

    fn compare_exponents(&self, a: Option<ExprHandle>, b: Option<ExprHandle>) -> Ordering {
        let value = |e: Option<ExprHandle>| match e {
            None => Some(Rational::one()),
            Some(h) => self.as_rational(h),
        };
        match (value(a), value(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (a, b) {
                (Some(x), Some(y)) => self.compare_structural(x, y),
                _ => Ordering::Equal,
            },
        }
    }

    fn atom_rank(node: &ExprNode) -> u8 {
        match node {
            ExprNode::Integer(_) | ExprNode::Rational(_) => 0,
            ExprNode::Constant(_) => 1,
            ExprNode::Symbol(_) => 2,
            ExprNode::Function { .. } => 3,
            ExprNode::Add(_) => 4,
            ExprNode::Mul(_) | ExprNode::Pow { .. } => 5,
        }
    }

    fn compare_atoms(&self, a: ExprHandle, b: ExprHandle) -> Ordering {
        let (na, nb) = (self.get(a), self.get(b));
        let rank = Self::atom_rank(na).cmp(&Self::atom_rank(nb));
        if rank != Ordering::Equal {
            return rank;
        }
        match (na, nb) {
            (ExprNode::Constant(x), ExprNode::Constant(y)) => x.cmp(y),
            (ExprNode::Symbol(x), ExprNode::Symbol(y)) => self
                .symbol_name(*x)
                .cmp(&self.symbol_name(*y))
                .then_with(|| x.cmp(y)),
            (
                ExprNode::Function { func: fx, args: ax },
                ExprNode::Function { func: fy, args: ay },
            ) => fx.name().cmp(fy.name()).then_with(|| {
                for (&x, &y) in ax.iter().zip(ay.iter()) {
                    let ord = self.compare_structural(x, y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                ax.len().cmp(&ay.len())
            }),
            (ExprNode::Add(ax), ExprNode::Add(ay)) => {
                for (&x, &y) in ax.iter().rev().zip(ay.iter().rev()) {
                    let ord = self.compare_structural(x, y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                ax.len().cmp(&ay.len())
            }
            _ => Ordering::Equal,
        }
    }
}
