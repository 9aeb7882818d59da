//! Canonicalising constructors for sums, products and powers.
//!
//! Every constructor returns a handle in normal form:
//!
//! - numbers are folded exactly, integral rationals become integers
//! - sums collect like terms, products merge equal bases
//! - `Infinity`, `-Infinity`, `ComplexInfinity` and `Indeterminate` follow
//!   the usual extended-real arithmetic, with undefined combinations
//!   becoming `Indeterminate`
//! - integer powers of rationals are exact, and rational powers of positive
//!   rationals have their perfect-power part extracted
//!
//! Normal forms are fixed points: rebuilding a canonical expression through
//! these constructors returns the same handle.

use hashbrown::HashMap;
use limes_integers::{Integer, Rational};
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode, Func};
use crate::handle::ExprHandle;

struct BaseGroup {
    base: ExprHandle,
    original: ExprHandle,
    exponents: SmallVec<[Option<ExprHandle>; 2]>,
}

impl ExprArena {
    // === Sums ===

    /// Canonical sum of `terms`.
    pub fn add(&mut self, terms: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut flat: Vec<ExprHandle> = Vec::new();
        for t in terms {
            match self.get(t) {
                ExprNode::Add(args) => flat.extend(args.iter().copied()),
                _ => flat.push(t),
            }
        }
        self.add_flat(flat)
    }

    fn add_flat(&mut self, flat: Vec<ExprHandle>) -> ExprHandle {
        let mut number = Rational::zero();
        let mut positive_infinity = false;
        let mut negative_infinity = false;
        let mut complex_infinities = 0usize;
        let mut indeterminate = false;
        let mut intervals: Vec<(Rational, Rational)> = Vec::new();
        let mut collected: Vec<(ExprHandle, Rational)> = Vec::new();
        let mut index: HashMap<ExprHandle, usize> = HashMap::new();

        for t in flat {
            if let Some(r) = self.as_rational(t) {
                number = number + r;
                continue;
            }
            match self.as_constant(t) {
                Some(Constant::Indeterminate) => {
                    indeterminate = true;
                    continue;
                }
                Some(Constant::Infinity) => {
                    positive_infinity = true;
                    continue;
                }
                Some(Constant::NegInfinity) => {
                    negative_infinity = true;
                    continue;
                }
                Some(Constant::ComplexInfinity) => {
                    complex_infinities += 1;
                    continue;
                }
                _ => {}
            }
            if let Some(bounds) = self.numeric_interval(t) {
                intervals.push(bounds);
                continue;
            }
            let (coefficient, rest) = self.split_coefficient(t);
            match index.get(&rest) {
                Some(&i) => collected[i].1 = &collected[i].1 + &coefficient,
                None => {
                    index.insert(rest, collected.len());
                    collected.push((rest, coefficient));
                }
            }
        }

        if indeterminate
            || complex_infinities > 1
            || (complex_infinities == 1 && (positive_infinity || negative_infinity))
            || (positive_infinity && negative_infinity)
        {
            return self.indeterminate();
        }

        let mut terms: Vec<ExprHandle> = Vec::with_capacity(collected.len() + 1);
        for (rest, coefficient) in collected {
            if coefficient.is_zero() {
                continue;
            }
            if coefficient.is_one() {
                terms.push(rest);
            } else {
                let c = self.rational(coefficient);
                let term = self.mul([c, rest]);
                terms.push(term);
            }
        }

        let infinity = if complex_infinities == 1 {
            Some(Constant::ComplexInfinity)
        } else if positive_infinity {
            Some(Constant::Infinity)
        } else if negative_infinity {
            Some(Constant::NegInfinity)
        } else {
            None
        };

        if let Some(c) = infinity {
            terms.push(self.constant(c));
            number = Rational::zero();
        } else if let Some(first) = intervals.first().cloned() {
            let (lo, hi) = intervals
                .iter()
                .skip(1)
                .fold(first, |(lo, hi), (a, b)| (lo + a, hi + b));
            let lo = self.rational(&lo + &number);
            let hi = self.rational(&hi + &number);
            number = Rational::zero();
            terms.push(self.apply(Func::Interval, [lo, hi]));
        }

        terms.sort_by(|&a, &b| self.compare(a, b));

        let mut args: SmallVec<[ExprHandle; 4]> = SmallVec::new();
        if !number.is_zero() {
            args.push(self.rational(number));
        }
        args.extend(terms);
        match args.len() {
            0 => self.zero(),
            1 => args[0],
            _ => self.intern(ExprNode::Add(args)),
        }
    }

    /// Splits a term into its rational coefficient and the remaining factor.
    fn split_coefficient(&mut self, t: ExprHandle) -> (Rational, ExprHandle) {
        if let ExprNode::Mul(args) = self.get(t) {
            if let Some(c) = self.as_rational(args[0]) {
                let rest: SmallVec<[ExprHandle; 4]> = args[1..].iter().copied().collect();
                let rest = if rest.len() == 1 {
                    rest[0]
                } else {
                    self.intern(ExprNode::Mul(rest))
                };
                return (c, rest);
            }
        }
        (Rational::one(), t)
    }

    /// The bounds of an `Interval` with exact numeric endpoints.
    pub(crate) fn numeric_interval(&self, h: ExprHandle) -> Option<(Rational, Rational)> {
        match self.get(h) {
            ExprNode::Function {
                func: Func::Interval,
                args,
            } if args.len() == 2 => Some((self.as_rational(args[0])?, self.as_rational(args[1])?)),
            _ => None,
        }
    }

    // === Products ===

    /// Canonical product of `factors`.
    pub fn mul(&mut self, factors: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut flat: Vec<ExprHandle> = Vec::new();
        for f in factors {
            match self.get(f) {
                ExprNode::Mul(args) => flat.extend(args.iter().copied()),
                _ => flat.push(f),
            }
        }
        self.mul_flat(flat)
    }

    #[allow(clippy::too_many_lines)]
    fn mul_flat(&mut self, flat: Vec<ExprHandle>) -> ExprHandle {
        let mut coefficient = Rational::one();
        let mut has_infinity = false;
        let mut infinity_sign: i8 = 1;
        let mut complex = false;
        let mut indeterminate = false;
        let mut interval: Option<(Rational, Rational)> = None;
        let mut groups: Vec<BaseGroup> = Vec::new();
        let mut index: HashMap<ExprHandle, usize> = HashMap::new();

        for f in flat {
            if let Some(r) = self.as_rational(f) {
                coefficient = coefficient * r;
                continue;
            }
            match self.as_constant(f) {
                Some(Constant::Indeterminate) => {
                    indeterminate = true;
                    continue;
                }
                Some(Constant::Infinity) => {
                    has_infinity = true;
                    continue;
                }
                Some(Constant::NegInfinity) => {
                    has_infinity = true;
                    infinity_sign = -infinity_sign;
                    continue;
                }
                Some(Constant::ComplexInfinity) => {
                    complex = true;
                    continue;
                }
                _ => {}
            }
            if let Some((lo, hi)) = self.numeric_interval(f) {
                interval = Some(match interval {
                    None => (lo, hi),
                    Some((a, b)) => interval_product(&a, &b, &lo, &hi),
                });
                continue;
            }
            let (base, exponent) = match self.get(f) {
                ExprNode::Pow { base, exp } => (*base, Some(*exp)),
                _ => (f, None),
            };
            match index.get(&base) {
                Some(&i) => groups[i].exponents.push(exponent),
                None => {
                    index.insert(base, groups.len());
                    groups.push(BaseGroup {
                        base,
                        original: f,
                        exponents: smallvec::smallvec![exponent],
                    });
                }
            }
        }

        if indeterminate {
            return self.indeterminate();
        }
        if coefficient.is_zero() {
            return if has_infinity || complex {
                self.indeterminate()
            } else {
                self.zero()
            };
        }
        if complex {
            return self.constant(Constant::ComplexInfinity);
        }

        let mut factors: Vec<ExprHandle> = Vec::with_capacity(groups.len() + 1);
        let mut refold = false;
        for group in groups {
            if group.exponents.len() == 1 {
                factors.push(group.original);
                continue;
            }
            let one = self.one();
            let exponents: Vec<ExprHandle> = group
                .exponents
                .iter()
                .map(|e| e.unwrap_or(one))
                .collect();
            let total = self.add(exponents);
            let merged = self.pow(group.base, total);
            if self.is_one(merged) {
                continue;
            }
            if !matches!(
                self.get(merged),
                ExprNode::Pow { .. } | ExprNode::Symbol(_) | ExprNode::Add(_)
            ) {
                refold = true;
            }
            factors.push(merged);
        }

        if let Some((lo, hi)) = interval {
            let (lo, hi) = if coefficient.is_negative() {
                (&hi * &coefficient, &lo * &coefficient)
            } else {
                (&lo * &coefficient, &hi * &coefficient)
            };
            if has_infinity {
                let sign = if lo.is_positive() {
                    infinity_sign
                } else if hi.is_negative() {
                    -infinity_sign
                } else {
                    return self.indeterminate();
                };
                coefficient = Rational::from(i64::from(sign));
                infinity_sign = 1;
            } else {
                coefficient = Rational::one();
                let lo = self.rational(lo);
                let hi = self.rational(hi);
                factors.push(self.apply(Func::Interval, [lo, hi]));
            }
        }

        if has_infinity {
            let sign = infinity_sign * coefficient.signum();
            coefficient = Rational::one();
            if factors.is_empty() {
                return self.constant(if sign < 0 {
                    Constant::NegInfinity
                } else {
                    Constant::Infinity
                });
            }
            factors.push(self.infinity());
            if sign < 0 {
                coefficient = -coefficient;
            }
        }

        if refold {
            let c = self.rational(coefficient);
            factors.push(c);
            return self.mul(factors);
        }
        // A rational multiple of a single sum is distributed.
        if factors.len() == 1 && !coefficient.is_one() {
            if let ExprNode::Add(terms) = self.get(factors[0]) {
                let terms = terms.clone();
                let c = self.rational(coefficient);
                let scaled: Vec<ExprHandle> = terms.iter().map(|&t| self.mul([c, t])).collect();
                return self.add(scaled);
            }
        }
        self.build_product(coefficient, factors)
    }

    /// Sorts `factors` and prefixes the coefficient.
    ///
    /// The factors must already have pairwise distinct bases.
    fn build_product(&mut self, coefficient: Rational, mut factors: Vec<ExprHandle>) -> ExprHandle {
        if coefficient.is_zero() {
            return self.zero();
        }
        factors.sort_by(|&a, &b| self.compare(a, b));
        let mut args: SmallVec<[ExprHandle; 4]> = SmallVec::new();
        if !coefficient.is_one() {
            args.push(self.rational(coefficient));
        }
        args.extend(factors);
        match args.len() {
            0 => self.one(),
            1 => args[0],
            _ => self.intern(ExprNode::Mul(args)),
        }
    }

    // === Powers ===

    /// Canonical power `base^exp`.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        if self.is_indeterminate(base) || self.is_indeterminate(exp) {
            return self.indeterminate();
        }
        if self.is_zero(exp) {
            return if self.is_zero(base) || self.is_infinite(base) {
                self.indeterminate()
            } else {
                self.one()
            };
        }
        if self.is_one(exp) {
            return base;
        }
        if self.is_one(base) {
            return if self.is_infinite(exp) {
                self.indeterminate()
            } else {
                base
            };
        }
        if let Some(b) = self.as_rational(base) {
            return self.pow_number(&b, base, exp);
        }
        if let Some((lo, hi)) = self.numeric_interval(base) {
            return self.pow_interval(&lo, &hi, base, exp);
        }
        let exp_is_integer = self.as_integer(exp).is_some();
        match self.get(base).clone() {
            ExprNode::Constant(c) => self.pow_constant(c, base, exp),
            ExprNode::Pow {
                base: inner,
                exp: inner_exp,
            } if exp_is_integer => {
                let e = self.mul([inner_exp, exp]);
                self.pow(inner, e)
            }
            ExprNode::Mul(args) => {
                if exp_is_integer {
                    let parts: Vec<ExprHandle> = args.iter().map(|&a| self.pow(a, exp)).collect();
                    return self.mul(parts);
                }
                match self.as_rational(args[0]) {
                    Some(c) if c.is_positive() && !self.is_infinite(exp) => {
                        let rest: Vec<ExprHandle> = args[1..].to_vec();
                        let rest = self.mul(rest);
                        let c = self.pow(args[0], exp);
                        let r = self.pow(rest, exp);
                        self.mul([c, r])
                    }
                    _ => self.raw_pow(base, exp),
                }
            }
            _ => self.raw_pow(base, exp),
        }
    }

    fn raw_pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// `[lo, hi]^n` for an integer `n`; other exponents stay unevaluated.
    fn pow_interval(
        &mut self,
        lo: &Rational,
        hi: &Rational,
        base: ExprHandle,
        exp: ExprHandle,
    ) -> ExprHandle {
        let Some(n) = self.as_integer(exp).and_then(Integer::to_i64) else {
            return self.raw_pow(base, exp);
        };
        if n < 0 && !lo.is_positive() && !hi.is_negative() {
            return self.indeterminate();
        }
        let Ok(m) = u32::try_from(n.unsigned_abs()) else {
            return self.raw_pow(base, exp);
        };
        let (a, b) = if m % 2 == 1 || !lo.is_negative() {
            (lo.pow(m), hi.pow(m))
        } else if !hi.is_positive() {
            (hi.pow(m), lo.pow(m))
        } else {
            (Rational::zero(), lo.pow(m).max(hi.pow(m)))
        };
        let (a, b) = if n < 0 {
            // Both bounds share a sign, so the reciprocal swaps them.
            match (b.checked_recip(), a.checked_recip()) {
                (Some(ra), Some(rb)) => (ra, rb),
                _ => return self.indeterminate(),
            }
        } else {
            (a, b)
        };
        let lo = self.rational(a);
        let hi = self.rational(b);
        self.apply(Func::Interval, [lo, hi])
    }

    fn pow_number(&mut self, b: &Rational, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        if let Some(e) = self.as_rational(exp) {
            if b.is_zero() {
                return if e.is_positive() {
                    self.zero()
                } else {
                    self.constant(Constant::ComplexInfinity)
                };
            }
            if let Some(n) = e.to_integer() {
                return match n.to_i64().and_then(|k| b.powi(k)) {
                    Some(v) => self.rational(v),
                    None => self.raw_pow(base, exp),
                };
            }
            if b.is_negative() {
                return self.raw_pow(base, exp);
            }
            return self
                .rational_root(b, &e)
                .unwrap_or_else(|| self.raw_pow(base, exp));
        }
        let above_one = b.abs() > Rational::one();
        let minus_one = *b == -Rational::one();
        match self.as_constant(exp) {
            Some(Constant::Infinity) => {
                if minus_one {
                    self.indeterminate()
                } else if !above_one {
                    self.zero()
                } else if b.is_positive() {
                    self.infinity()
                } else {
                    self.constant(Constant::ComplexInfinity)
                }
            }
            Some(Constant::NegInfinity) => {
                if minus_one {
                    self.indeterminate()
                } else if above_one {
                    self.zero()
                } else if b.is_positive() {
                    self.infinity()
                } else {
                    self.constant(Constant::ComplexInfinity)
                }
            }
            Some(Constant::ComplexInfinity) => self.indeterminate(),
            _ => self.raw_pow(base, exp),
        }
    }

    /// `b^e` for a positive rational `b` and a non-integral rational `e`,
    /// with every perfect `q`-th power pulled out of the radical.
    fn rational_root(&mut self, b: &Rational, e: &Rational) -> Option<ExprHandle> {
        let whole = e.floor();
        let frac = e - &Rational::from(&whole);
        let q = u32::try_from(&frac.denominator()).ok()?;
        let r = u32::try_from(&frac.numerator()).ok()?;
        let (root_num, rest_num) = b.numerator().nth_root_split(q).ok()?;
        let (root_den, rest_den) = b.denominator().nth_root_split(q).ok()?;

        let mut coefficient = b.powi(whole.to_i64()?)?
            * Rational::new(root_num.pow(r), root_den.pow(r));
        let mut factors = Vec::new();
        if !rest_num.is_one() {
            let base = self.int(rest_num);
            let exp = self.rational(frac.clone());
            factors.push(self.raw_pow(base, exp));
        }
        if !rest_den.is_one() {
            coefficient = coefficient / Rational::from(&rest_den);
            let base = self.int(rest_den);
            let exp = self.rational(Rational::one() - frac);
            factors.push(self.raw_pow(base, exp));
        }
        Some(self.build_product(coefficient, factors))
    }

    fn pow_constant(&mut self, c: Constant, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        if c == Constant::E {
            if let ExprNode::Function {
                func: Func::Log,
                args,
            } = self.get(exp)
            {
                if args.len() == 1 {
                    return args[0];
                }
            }
        }
        let exp_const = self.as_constant(exp);
        if exp_const == Some(Constant::ComplexInfinity) {
            return self.indeterminate();
        }
        let exp_sign = self.sign(exp);
        match c {
            Constant::Pi | Constant::E => match exp_const {
                Some(Constant::Infinity) => self.infinity(),
                Some(Constant::NegInfinity) => self.zero(),
                _ => self.raw_pow(base, exp),
            },
            Constant::Infinity => match exp_const {
                Some(Constant::Infinity) => self.constant(Constant::ComplexInfinity),
                _ => match exp_sign {
                    Some(1) => self.infinity(),
                    Some(-1) => self.zero(),
                    _ => self.raw_pow(base, exp),
                },
            },
            Constant::NegInfinity => {
                if exp_const == Some(Constant::Infinity) {
                    return self.constant(Constant::ComplexInfinity);
                }
                match (exp_sign, self.as_integer(exp).map(Integer::is_even)) {
                    (Some(-1), _) => self.zero(),
                    (Some(1), Some(true)) => self.infinity(),
                    (Some(1), Some(false)) => self.neg_infinity(),
                    (Some(1), None) => self.constant(Constant::ComplexInfinity),
                    _ => self.raw_pow(base, exp),
                }
            }
            Constant::ComplexInfinity => match exp_sign {
                Some(1) => base,
                Some(-1) => self.zero(),
                _ => self.raw_pow(base, exp),
            },
            _ => self.raw_pow(base, exp),
        }
    }

    // === Derived operations ===

    /// `-h`.
    pub fn neg(&mut self, h: ExprHandle) -> ExprHandle {
        let m = self.minus_one();
        self.mul([m, h])
    }

    /// `a - b`.
    pub fn sub(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let nb = self.neg(b);
        self.add([a, nb])
    }

    /// `1/h`.
    pub fn recip(&mut self, h: ExprHandle) -> ExprHandle {
        let m = self.minus_one();
        self.pow(h, m)
    }

    /// `a / b`.
    pub fn div(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let inv = self.recip(b);
        self.mul([a, inv])
    }

    /// `h^n` for a machine integer exponent.
    pub fn powi(&mut self, h: ExprHandle, n: i64) -> ExprHandle {
        let e = self.integer(n);
        self.pow(h, e)
    }
}

fn interval_product(a: &Rational, b: &Rational, c: &Rational, d: &Rational) -> (Rational, Rational) {
    let products = [a * c, a * d, b * c, b * d];
    let mut lo = products[0].clone();
    let mut hi = products[0].clone();
    for p in &products[1..] {
        if *p < lo {
            lo = p.clone();
        }
        if *p > hi {
            hi = p.clone();
        }
    }
    (lo, hi)
}
