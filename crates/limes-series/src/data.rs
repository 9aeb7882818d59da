//! The truncated series value.
//!
//! A [`TruncatedSeries`] stands for
//!
//! ```text
//! Σ_{k=nMin}^{nMax-1} c_k (x - x0)^(k/den) + O((x - x0)^(nMax/den))
//! ```
//!
//! with the coefficients stored densely in ascending order.

use limes_core::{ExprArena, ExprHandle, ExprNode, Func};
use limes_integers::Rational;
use tracing::trace;

/// A truncated Puiseux series in one variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruncatedSeries {
    variable: ExprHandle,
    point: ExprHandle,
    n_min: i64,
    n_max: i64,
    denominator: i64,
    /// Exactly `n_max - n_min` coefficients; the first one is nonzero.
    coefficients: Vec<ExprHandle>,
}

impl TruncatedSeries {
    /// Builds a series from raw data.
    ///
    /// A short coefficient list is padded with zeros up to `n_max - n_min`
    /// entries, and leading zero coefficients are absorbed by raising
    /// `n_min`. Returns `None` when `n_min > n_max`, when the denominator is
    /// not positive, or when there are more coefficients than orders.
    pub fn new(
        arena: &mut ExprArena,
        variable: ExprHandle,
        point: ExprHandle,
        coefficients: Vec<ExprHandle>,
        n_min: i64,
        n_max: i64,
        denominator: i64,
    ) -> Option<Self> {
        if denominator <= 0 {
            return None;
        }
        let span = usize::try_from(n_max.checked_sub(n_min)?).ok()?;
        if coefficients.len() > span {
            return None;
        }
        let mut coefficients = coefficients;
        coefficients.resize(span, arena.zero());

        let leading_zeros = coefficients.iter().take_while(|&&c| arena.is_zero(c)).count();
        coefficients.drain(..leading_zeros);
        let n_min = n_min + i64::try_from(leading_zeros).ok()?;
        trace!(n_min, n_max, denominator, "series data");
        Some(Self {
            variable,
            point,
            n_min,
            n_max,
            denominator,
            coefficients,
        })
    }

    /// The expansion variable.
    #[must_use]
    pub fn variable(&self) -> ExprHandle {
        self.variable
    }

    /// The expansion point.
    #[must_use]
    pub fn point(&self) -> ExprHandle {
        self.point
    }

    /// The scaled exponent of the first stored coefficient.
    #[must_use]
    pub fn n_min(&self) -> i64 {
        self.n_min
    }

    /// The scaled exponent of the order term.
    #[must_use]
    pub fn n_max(&self) -> i64 {
        self.n_max
    }

    /// The common denominator of all exponents.
    #[must_use]
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// The coefficients in ascending order, starting at `n_min`.
    #[must_use]
    pub fn coefficients(&self) -> &[ExprHandle] {
        &self.coefficients
    }

    /// True if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The coefficient of `(x - x0)^(k/den)` for `n_min <= k < n_max`.
    #[must_use]
    pub fn coefficient(&self, k: i64) -> Option<ExprHandle> {
        let index = usize::try_from(k.checked_sub(self.n_min)?).ok()?;
        self.coefficients.get(index).copied()
    }

    fn base(&self, arena: &mut ExprArena) -> ExprHandle {
        if arena.is_zero(self.point) {
            self.variable
        } else {
            arena.sub(self.variable, self.point)
        }
    }

    /// The terms `c_k (x - x0)^(k/den)` with nonzero coefficient, in
    /// ascending order.
    pub fn terms(&self, arena: &mut ExprArena) -> Vec<ExprHandle> {
        let base = self.base(arena);
        let mut terms = Vec::with_capacity(self.coefficients.len());
        for (k, &c) in (self.n_min..).zip(&self.coefficients) {
            if arena.is_zero(c) {
                continue;
            }
            let exponent = arena.fraction(k, self.denominator);
            let power = arena.pow(base, exponent);
            terms.push(arena.mul([c, power]));
        }
        terms
    }

    /// The sum of the terms, dropping the order term.
    pub fn normal(&self, arena: &mut ExprArena) -> ExprHandle {
        let terms = self.terms(arena);
        arena.add(terms)
    }

    /// The text form, e.g. `x+x^3/6+3/40*x^5+O(x)^7`.
    pub fn render(&self, arena: &mut ExprArena) -> String {
        let terms = self.terms(arena);
        let mut out = String::new();
        for term in terms {
            if out.is_empty() {
                out.push_str(&arena.render(term));
            } else if arena.is_negative_term(term) {
                let positive = arena.neg(term);
                out.push('-');
                out.push_str(&arena.render(positive));
            } else if matches!(arena.get(term), ExprNode::Add(_)) {
                out.push_str("+(");
                out.push_str(&arena.render(term));
                out.push(')');
            } else {
                out.push('+');
                out.push_str(&arena.render(term));
            }
        }
        if !out.is_empty() {
            out.push('+');
        }
        let base = self.base(arena);
        out.push_str("O(");
        out.push_str(&arena.render(base));
        out.push(')');
        let order = Rational::from_i64(self.n_max, self.denominator);
        if order.is_integer() && !order.is_negative() {
            if order != Rational::from(1) {
                out.push('^');
                out.push_str(&order.to_string());
            }
        } else {
            out.push_str("^(");
            out.push_str(&order.to_string());
            out.push(')');
        }
        out
    }
}

/// Builds a series from the arguments of
/// `SeriesData(x, x0, {c...}, nMin, nMax, den)`.
///
/// Returns `None` unless `x` is a symbol, the coefficients form a list and
/// the three bounds are machine integers accepted by
/// [`TruncatedSeries::new`].
pub fn series_data(arena: &mut ExprArena, args: &[ExprHandle]) -> Option<TruncatedSeries> {
    let &[variable, point, list, n_min, n_max, denominator] = args else {
        return None;
    };
    arena.as_symbol(variable)?;
    let coefficients = match arena.get(list) {
        ExprNode::Function {
            func: Func::List,
            args,
        } => args.to_vec(),
        _ => return None,
    };
    let n_min = arena.as_integer(n_min)?.to_i64()?;
    let n_max = arena.as_integer(n_max)?.to_i64()?;
    let denominator = arena.as_integer(denominator)?.to_i64()?;
    TruncatedSeries::new(arena, variable, point, coefficients, n_min, n_max, denominator)
}
