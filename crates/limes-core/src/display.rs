//! Linear text form of expressions.
//!
//! The output follows the usual computer-algebra input syntax: `1+x`,
//! `-x^3/6`, `3/40*x^5`, `Sqrt(2)`, `E^(-x)`, `Sin(x)/x`, `n!`,
//! `Piecewise({{1,n==0}},0)`.

use std::fmt;

use limes_integers::Rational;
use num_traits::One;

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode, Func};
use crate::handle::ExprHandle;

const PREC_RELATION: u8 = 0;
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_POWER: u8 = 3;
const PREC_ATOM: u8 = 4;

/// Displays an expression held in an arena.
pub struct DisplayExpr<'a> {
    arena: &'a ExprArena,
    handle: ExprHandle,
}

impl ExprArena {
    /// A displayable view of `h`.
    #[must_use]
    pub fn display(&self, h: ExprHandle) -> DisplayExpr<'_> {
        DisplayExpr {
            arena: self,
            handle: h,
        }
    }

    /// The text form of `h`.
    #[must_use]
    pub fn render(&self, h: ExprHandle) -> String {
        self.display(h).to_string()
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { arena: self.arena }.write(f, self.handle, PREC_RELATION)
    }
}

struct Printer<'a> {
    arena: &'a ExprArena,
}

impl Printer<'_> {
    fn precedence(&self, h: ExprHandle) -> u8 {
        let arena = self.arena;
        match arena.get(h) {
            ExprNode::Integer(n) => {
                if n.is_negative() {
                    PREC_SUM
                } else {
                    PREC_ATOM
                }
            }
            ExprNode::Rational(r) => {
                if r.is_negative() {
                    PREC_SUM
                } else {
                    PREC_PRODUCT
                }
            }
            ExprNode::Constant(Constant::NegInfinity) => PREC_SUM,
            ExprNode::Symbol(_) | ExprNode::Constant(_) => PREC_ATOM,
            ExprNode::Add(_) => PREC_SUM,
            ExprNode::Mul(_) => {
                if arena.is_negative_term(h) {
                    PREC_SUM
                } else {
                    PREC_PRODUCT
                }
            }
            ExprNode::Pow { exp, .. } => match arena.as_rational(*exp) {
                Some(e) if e.is_negative() => PREC_PRODUCT,
                Some(e) if e == Rational::from_i64(1, 2) => PREC_ATOM,
                _ => PREC_POWER,
            },
            ExprNode::Function { func, .. } => {
                if func.is_relation() || *func == Func::Rule {
                    PREC_RELATION
                } else {
                    PREC_ATOM
                }
            }
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, h: ExprHandle, context: u8) -> fmt::Result {
        if self.precedence(h) < context {
            f.write_str("(")?;
            self.write_bare(f, h)?;
            return f.write_str(")");
        }
        self.write_bare(f, h)
    }

    fn write_bare(&self, f: &mut fmt::Formatter<'_>, h: ExprHandle) -> fmt::Result {
        let arena = self.arena;
        match arena.get(h) {
            ExprNode::Integer(n) => write!(f, "{n}"),
            ExprNode::Rational(r) => write!(f, "{r}"),
            ExprNode::Symbol(id) => f.write_str(arena.symbol_name(*id).unwrap_or("?")),
            ExprNode::Constant(c) => f.write_str(c.name()),
            ExprNode::Add(args) => self.write_sum(f, args),
            ExprNode::Mul(args) => self.write_product(f, args, false),
            ExprNode::Pow { base, exp } => self.write_power(f, *base, *exp),
            ExprNode::Function { func, args } => self.write_function(f, *func, args),
        }
    }

    fn write_sum(&self, f: &mut fmt::Formatter<'_>, args: &[ExprHandle]) -> fmt::Result {
        for (i, &term) in args.iter().enumerate() {
            if i == 0 {
                self.write(f, term, PREC_SUM)?;
            } else if self.arena.is_negative_term(term) {
                f.write_str("-")?;
                self.write_negated(f, term)?;
            } else {
                f.write_str("+")?;
                self.write(f, term, PREC_SUM)?;
            }
        }
        Ok(())
    }

    /// Writes `-h` for a term that prints with a leading minus.
    fn write_negated(&self, f: &mut fmt::Formatter<'_>, h: ExprHandle) -> fmt::Result {
        match self.arena.get(h) {
            ExprNode::Integer(n) => write!(f, "{}", n.abs()),
            ExprNode::Rational(r) => write!(f, "{}", r.abs()),
            ExprNode::Constant(Constant::NegInfinity) => f.write_str("Infinity"),
            ExprNode::Mul(args) => self.write_product(f, args, true),
            _ => self.write(f, h, PREC_SUM),
        }
    }

    fn write_product(
        &self,
        f: &mut fmt::Formatter<'_>,
        args: &[ExprHandle],
        negate: bool,
    ) -> fmt::Result {
        let arena = self.arena;
        let mut coefficient = Rational::one();
        let mut numerator: Vec<ExprHandle> = Vec::new();
        let mut denominator: Vec<(ExprHandle, Rational)> = Vec::new();
        for &a in args {
            if let Some(c) = arena.as_rational(a) {
                coefficient = c;
                continue;
            }
            if let ExprNode::Pow { base, exp } = arena.get(a) {
                if let Some(e) = arena.as_rational(*exp) {
                    if e.is_negative() {
                        denominator.push((*base, -e));
                        continue;
                    }
                }
            }
            numerator.push(a);
        }
        if negate {
            coefficient = -coefficient;
        }
        if coefficient.is_negative() {
            f.write_str("-")?;
        }
        let p = coefficient.numerator().abs();
        let q = coefficient.denominator();

        let mut wrote = false;
        if !q.is_one() && !p.is_one() {
            write!(f, "{p}/{q}")?;
            wrote = true;
        } else if !p.is_one() || numerator.is_empty() {
            write!(f, "{p}")?;
            wrote = true;
        }
        for &factor in &numerator {
            if wrote {
                f.write_str("*")?;
            }
            self.write(f, factor, PREC_POWER)?;
            wrote = true;
        }

        let q_in_denominator = !q.is_one() && p.is_one();
        let count = denominator.len() + usize::from(q_in_denominator);
        if count == 0 {
            return Ok(());
        }
        f.write_str("/")?;
        if count > 1 {
            f.write_str("(")?;
        }
        let mut first = true;
        if q_in_denominator {
            write!(f, "{q}")?;
            first = false;
        }
        for (base, exp) in &denominator {
            if !first {
                f.write_str("*")?;
            }
            self.write_rational_power(f, *base, exp)?;
            first = false;
        }
        if count > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }

    fn write_rational_power(
        &self,
        f: &mut fmt::Formatter<'_>,
        base: ExprHandle,
        exp: &Rational,
    ) -> fmt::Result {
        if exp.is_one() {
            return self.write(f, base, PREC_POWER);
        }
        if *exp == Rational::from_i64(1, 2) {
            f.write_str("Sqrt(")?;
            self.write(f, base, PREC_RELATION)?;
            return f.write_str(")");
        }
        self.write(f, base, PREC_ATOM)?;
        if exp.is_integer() && !exp.is_negative() {
            write!(f, "^{exp}")
        } else {
            write!(f, "^({exp})")
        }
    }

    fn write_power(&self, f: &mut fmt::Formatter<'_>, base: ExprHandle, exp: ExprHandle) -> fmt::Result {
        if let Some(e) = self.arena.as_rational(exp) {
            if e.is_negative() {
                f.write_str("1/")?;
                return self.write_rational_power(f, base, &-e);
            }
            return self.write_rational_power(f, base, &e);
        }
        self.write(f, base, PREC_ATOM)?;
        f.write_str("^")?;
        self.write(f, exp, PREC_ATOM)
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, args: &[ExprHandle]) -> fmt::Result {
        f.write_str("{")?;
        for (i, &a) in args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            self.write(f, a, PREC_RELATION)?;
        }
        f.write_str("}")
    }

    fn write_function(&self, f: &mut fmt::Formatter<'_>, func: Func, args: &[ExprHandle]) -> fmt::Result {
        if let Some(op) = func.operator() {
            for (i, &a) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(op)?;
                }
                self.write(f, a, PREC_SUM)?;
            }
            return Ok(());
        }
        match func {
            Func::Factorial if args.len() == 1 => {
                self.write(f, args[0], PREC_ATOM)?;
                f.write_str("!")
            }
            Func::List => self.write_list(f, args),
            Func::Interval => {
                f.write_str("Interval(")?;
                self.write_list(f, args)?;
                f.write_str(")")
            }
            Func::Piecewise if !args.is_empty() => {
                let (pairs, default) = args.split_at(args.len() - 1);
                f.write_str("Piecewise({")?;
                for (i, pair) in pairs.chunks(2).enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    self.write_list(f, pair)?;
                }
                f.write_str("},")?;
                self.write(f, default[0], PREC_RELATION)?;
                f.write_str(")")
            }
            _ => {
                write!(f, "{}(", func.name())?;
                for (i, &a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    self.write(f, a, PREC_RELATION)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_and_products() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let sum = arena.add([x, one]);
        assert_eq!(arena.render(sum), "1+x");

        let x3 = arena.powi(x, 3);
        let sixth = arena.fraction(-1, 6);
        let term = arena.mul([sixth, x3]);
        assert_eq!(arena.render(term), "-x^3/6");
        let poly = arena.add([x, term]);
        assert_eq!(arena.render(poly), "x-x^3/6");

        let x5 = arena.powi(x, 5);
        let c = arena.fraction(3, 40);
        let t = arena.mul([c, x5]);
        assert_eq!(arena.render(t), "3/40*x^5");

        let two = arena.integer(2);
        let two_x = arena.mul([two, x]);
        assert_eq!(arena.render(two_x), "2*x");
    }

    #[test]
    fn test_powers_and_fractions() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin = arena.apply(Func::Sin, [x]);
        let ratio = arena.div(sin, x);
        assert_eq!(arena.render(ratio), "Sin(x)/x");

        let two = arena.integer(2);
        let half = arena.fraction(1, 2);
        let sqrt2 = arena.pow(two, half);
        assert_eq!(arena.render(sqrt2), "Sqrt(2)");
        let three_halves = arena.fraction(3, 2);
        let p = arena.pow(x, three_halves);
        assert_eq!(arena.render(p), "x^(3/2)");
        let inv = arena.powi(x, -2);
        assert_eq!(arena.render(inv), "1/x^2");

        let one = arena.one();
        let sum = arena.add([x, one]);
        let sq = arena.powi(sum, 2);
        assert_eq!(arena.render(sq), "(1+x)^2");

        let e = arena.constant(Constant::E);
        let minus_x = arena.neg(x);
        let decay = arena.pow(e, minus_x);
        assert_eq!(arena.render(decay), "E^(-x)");
    }

    #[test]
    fn test_functions_and_constants() {
        let mut arena = ExprArena::new();
        let n = arena.symbol("n");
        let k = arena.symbol("k");
        let zero = arena.zero();
        let one = arena.one();
        let fact = arena.apply(Func::Factorial, [n]);
        assert_eq!(arena.render(fact), "n!");
        let cond = arena.apply(Func::Equal, [n, zero]);
        let pw = arena.apply(Func::Piecewise, [one, cond, zero]);
        assert_eq!(arena.render(pw), "Piecewise({{1,n==0}},0)");
        let chain = arena.apply(Func::LessEqual, [zero, n, k]);
        assert_eq!(arena.render(chain), "0<=n<=k");
        let lo = arena.minus_one();
        let unit = arena.apply(Func::Interval, [lo, one]);
        assert_eq!(arena.render(unit), "Interval({-1,1})");
        let ninf = arena.neg_infinity();
        assert_eq!(arena.render(ninf), "-Infinity");
        let x = arena.symbol("x");
        let rule = arena.apply(Func::Rule, [x, zero]);
        assert_eq!(arena.render(rule), "x->0");
    }
}
