//! Expansion and the splitting of products into parts.

use crate::arena::ExprArena;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

/// Largest integer power of a sum that [`ExprArena::expand`] multiplies out.
const EXPAND_POWER_LIMIT: i64 = 32;

impl ExprArena {
    /// Distributes products over sums and multiplies out small positive
    /// integer powers of sums. Function arguments are left alone.
    pub fn expand(&mut self, h: ExprHandle) -> ExprHandle {
        match self.get(h).clone() {
            ExprNode::Add(args) => {
                let parts: Vec<ExprHandle> = args.iter().map(|&a| self.expand(a)).collect();
                self.add(parts)
            }
            ExprNode::Mul(args) => {
                let parts: Vec<ExprHandle> = args.iter().map(|&a| self.expand(a)).collect();
                self.expand_product(&parts)
            }
            ExprNode::Pow { base, exp } => {
                let b = self.expand(base);
                let n = self.as_integer(exp).and_then(limes_integers::Integer::to_i64);
                match n {
                    Some(n) if (2..=EXPAND_POWER_LIMIT).contains(&n)
                        && matches!(self.get(b), ExprNode::Add(_)) =>
                    {
                        let copies = vec![b; usize::try_from(n).unwrap_or(0)];
                        self.expand_product(&copies)
                    }
                    _ => self.pow(b, exp),
                }
            }
            _ => h,
        }
    }

    fn expand_product(&mut self, factors: &[ExprHandle]) -> ExprHandle {
        let mut acc: Vec<ExprHandle> = vec![self.one()];
        for &f in factors {
            let terms: Vec<ExprHandle> = match self.get(f) {
                ExprNode::Add(args) => args.to_vec(),
                _ => vec![f],
            };
            let mut next = Vec::with_capacity(acc.len() * terms.len());
            for &a in &acc {
                for &t in &terms {
                    next.push(self.mul([a, t]));
                }
            }
            acc = next;
        }
        self.add(acc)
    }

    /// Splits an expression into numerator and denominator.
    ///
    /// Rational coefficients contribute their numerator and denominator and
    /// every power with a negative exponent moves to the denominator. Sums
    /// are not brought over a common denominator.
    pub fn numerator_denominator(&mut self, h: ExprHandle) -> (ExprHandle, ExprHandle) {
        let factors: Vec<ExprHandle> = match self.get(h) {
            ExprNode::Mul(args) => args.to_vec(),
            _ => vec![h],
        };
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for f in factors {
            if let Some(r) = self.as_rational(f) {
                numerator.push(self.int(r.numerator()));
                denominator.push(self.int(r.denominator()));
                continue;
            }
            let power = match self.get(f) {
                ExprNode::Pow { base, exp } => Some((*base, *exp)),
                _ => None,
            };
            if let Some((base, exp)) = power {
                if self.is_negative_term(exp) {
                    let positive = self.neg(exp);
                    denominator.push(self.pow(base, positive));
                    continue;
                }
            }
            numerator.push(f);
        }
        (self.mul(numerator), self.mul(denominator))
    }

    /// Splits `h` into the product of its factors free of `x` and the
    /// product of the remaining factors.
    pub fn partition_free(&mut self, h: ExprHandle, x: ExprHandle) -> (ExprHandle, ExprHandle) {
        let factors: Vec<ExprHandle> = match self.get(h) {
            ExprNode::Mul(args) => args.to_vec(),
            _ => vec![h],
        };
        let (free, dependent): (Vec<ExprHandle>, Vec<ExprHandle>) =
            factors.into_iter().partition(|&f| self.is_free(f, x));
        (self.mul(free), self.mul(dependent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Constant, Func};

    #[test]
    fn test_expand_binomial_square() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let sum = arena.add([x, one]);
        let sq = arena.powi(sum, 2);
        let expanded = arena.expand(sq);
        let two = arena.integer(2);
        let two_x = arena.mul([two, x]);
        let x2 = arena.powi(x, 2);
        assert_eq!(expanded, arena.add([one, two_x, x2]));
    }

    #[test]
    fn test_expand_distributes() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let two = arena.integer(2);
        let sum = arena.add([x, y]);
        let product = arena.mul([two, x, sum]);
        let expanded = arena.expand(product);
        let x2 = arena.powi(x, 2);
        let a = arena.mul([two, x2]);
        let b = arena.mul([two, x, y]);
        assert_eq!(expanded, arena.add([a, b]));
    }

    #[test]
    fn test_numerator_denominator() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin = arena.apply(Func::Sin, [x]);
        let ratio = arena.div(sin, x);
        assert_eq!(arena.numerator_denominator(ratio), (sin, x));

        let three = arena.fraction(3, 4);
        let x2 = arena.powi(x, -2);
        let term = arena.mul([three, x2]);
        let (num, den) = arena.numerator_denominator(term);
        assert_eq!(num, arena.integer(3));
        let four = arena.integer(4);
        let x_sq = arena.powi(x, 2);
        assert_eq!(den, arena.mul([four, x_sq]));

        let e = arena.constant(Constant::E);
        let minus_x = arena.neg(x);
        let decay = arena.pow(e, minus_x);
        let (num, den) = arena.numerator_denominator(decay);
        assert!(arena.is_one(num));
        assert_eq!(den, arena.pow(e, x));
    }

    #[test]
    fn test_partition_free() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let a = arena.symbol("a");
        let two = arena.integer(2);
        let sin = arena.apply(Func::Sin, [x]);
        let product = arena.mul([two, a, sin]);
        let (free, dependent) = arena.partition_free(product, x);
        assert_eq!(free, arena.mul([two, a]));
        assert_eq!(dependent, sin);
    }
}
