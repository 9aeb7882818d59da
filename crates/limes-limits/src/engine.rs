//! The recursive limit evaluator.
//!
//! A limit is first attempted by evaluation and direct substitution. When
//! that is inconclusive the expression is taken apart by its outermost node
//! and the limit is pushed through sums, products, powers, logarithms and
//! the continuous trigonometric functions. Quotients of the form `0/0` and
//! `Infinity/Infinity` go through L'Hopital's rule, whose depth is bounded
//! by the recursion limit of the [`EvalContext`].
//!
//! Every step receives the current [`Direction`] and hands back the
//! direction it ended with, which is never less specific than the one it
//! started from.

use limes_core::{Assumptions, EvalContext, ExprArena, ExprHandle, ExprNode, Func};
use limes_poly::{apart, ExprPolynomial};
use tracing::{debug, instrument, trace};

use crate::direction::Direction;
use crate::error::LimitError;
use crate::rational::rational_limit_at_infinity;
use crate::request::LimitRequest;

/// A computed limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitOutcome {
    /// The limit value.
    pub value: ExprHandle,
    /// The direction the value was obtained for. It is one-sided when the
    /// value only holds for one side of the target.
    pub direction: Direction,
}

/// Computes a limit.
///
/// Returns `Ok(None)` when no rule gives an answer; the limit then stays
/// unevaluated. The L'Hopital budget taken from the context configuration is
/// only installed when the context has no recursion limit of its own.
/// Exceeding a recursion limit set on `ctx` by the caller also leaves the
/// limit unevaluated and records a `Limit` message.
///
/// # Errors
///
/// Evaluation itself does not fail. The [`LimitError`] result type is shared
/// with request parsing so both chain with `?`.
#[instrument(level = "debug", skip(arena, ctx, assumptions), fields(expr = %arena.display(request.expr)))]
pub fn limit<A: Assumptions + ?Sized>(
    arena: &mut ExprArena,
    ctx: &mut EvalContext,
    assumptions: &A,
    request: &LimitRequest,
) -> Result<Option<LimitOutcome>, LimitError> {
    let data = LimitData {
        symbol: request.symbol,
        value: request.value,
        direction: request.direction,
    };
    let mut engine = LimitEngine {
        arena,
        ctx,
        assumptions,
    };
    let outcome = match engine.eval_limit(request.expr, data, true) {
        Err(LimitError::RecursionLimitExceeded { limit }) => {
            debug!(limit, depth = engine.ctx.depth(), "recursion limit exceeded");
            engine
                .ctx
                .message("Limit", format!("recursion limit {limit} exceeded"));
            None
        }
        other => other?,
    };
    if let Some(outcome) = &outcome {
        debug!(value = %engine.arena.display(outcome.value), direction = %outcome.direction, "limit found");
    }
    Ok(outcome)
}

/// The limit process seen by one recursive step.
#[derive(Clone, Copy, Debug)]
struct LimitData {
    symbol: ExprHandle,
    value: ExprHandle,
    direction: Direction,
}

impl LimitData {
    fn with_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }
}

type Step = Result<Option<LimitOutcome>, LimitError>;

struct LimitEngine<'a, A: ?Sized> {
    arena: &'a mut ExprArena,
    ctx: &'a mut EvalContext,
    assumptions: &'a A,
}

impl<A: Assumptions + ?Sized> LimitEngine<'_, A> {
    fn eval_limit(&mut self, expr: ExprHandle, data: LimitData, evaluate: bool) -> Step {
        self.ctx.enter()?;
        let result = self.eval_limit_at_depth(expr, data, evaluate);
        self.ctx.leave();
        result
    }

    fn eval_limit_at_depth(&mut self, expr: ExprHandle, data: LimitData, evaluate: bool) -> Step {
        trace!(depth = self.ctx.depth(), expr = %self.arena.display(expr), "limit step");
        let expr = if evaluate {
            let result = self.quietly(|engine| engine.arena.evaluate(expr));
            if self.arena.is_indeterminate(result) {
                return Ok(None);
            }
            if self.arena.is_numeric_function(result) {
                return Ok(self.outcome(result, data.direction));
            }
            result
        } else {
            expr
        };
        if self.arena.is_free(expr, data.symbol) {
            return Ok(self.outcome(expr, data.direction));
        }
        if expr == data.symbol {
            return Ok(self.outcome(data.value, data.direction));
        }
        if self.arena.is_numeric_function(data.value) {
            let substituted =
                self.quietly(|engine| engine.arena.replace_all(expr, data.symbol, data.value));
            if self.arena.is_numeric_function(substituted) {
                let direction = if self.arena.is_zero(substituted) {
                    match self.assumed_direction(data) {
                        Some(direction) => direction,
                        None => return Ok(None),
                    }
                } else {
                    data.direction
                };
                return Ok(self.outcome(substituted, direction));
            }
        }

        match self.arena.get(expr).clone() {
            ExprNode::Function {
                func: func @ (Func::Sin | Func::Cos),
                args,
            } if args.len() == 1 => self.continuous_limit(func, args[0], data),
            ExprNode::Function {
                func: Func::Log,
                args,
            } if args.len() == 1 => self.log_limit(args[0], data),
            ExprNode::Add(terms) => self.plus_limit(expr, &terms, data),
            ExprNode::Mul(_) => self.times_limit(expr, data),
            ExprNode::Pow { base, exp } => self.power_limit(base, exp, data),
            ExprNode::Integer(_)
            | ExprNode::Rational(_)
            | ExprNode::Symbol(_)
            | ExprNode::Constant(_)
            | ExprNode::Function { .. } => Ok(None),
        }
    }

    /// Wraps a value, treating `Indeterminate` as no answer.
    fn outcome(&self, value: ExprHandle, direction: Direction) -> Option<LimitOutcome> {
        if self.arena.is_indeterminate(value) {
            return None;
        }
        Some(LimitOutcome { value, direction })
    }

    /// Runs `f` with messages suppressed.
    fn quietly<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.ctx.set_quiet(true);
        let result = f(self);
        self.ctx.set_quiet(previous);
        result
    }

    /// Narrows the direction after a substitution gave exactly zero, using
    /// the sign declared for the limit variable.
    fn assumed_direction(&self, data: LimitData) -> Option<Direction> {
        let Some(id) = self.arena.as_symbol(data.symbol) else {
            return Some(data.direction);
        };
        if self.assumptions.is_negative(id) {
            data.direction.tighten(Direction::FromBelow)
        } else if self.assumptions.is_non_negative(id) {
            data.direction.tighten(Direction::FromAbove)
        } else {
            Some(data.direction)
        }
    }

    fn at_infinity(&self, data: LimitData) -> bool {
        self.arena.is_infinity(data.value) || self.arena.is_neg_infinity(data.value)
    }

    // === Mapping over arguments ===

    fn map_sum(&mut self, terms: &[ExprHandle], data: LimitData) -> Step {
        let mut direction = data.direction;
        let mut values = Vec::with_capacity(terms.len());
        for &term in terms {
            let Some(inner) = self.eval_limit(term, data.with_direction(direction), true)? else {
                return Ok(None);
            };
            direction = inner.direction;
            values.push(inner.value);
        }
        let value = self.arena.add(values);
        Ok(self.outcome(value, direction))
    }

    fn map_product(&mut self, factors: &[ExprHandle], data: LimitData) -> Step {
        let mut direction = data.direction;
        let mut values = Vec::with_capacity(factors.len());
        for &factor in factors {
            let Some(inner) = self.eval_limit(factor, data.with_direction(direction), true)? else {
                return Ok(None);
            };
            direction = inner.direction;
            values.push(inner.value);
        }
        let value = self.arena.mul(values);
        Ok(self.outcome(value, direction))
    }

    /// `lim f(g(x)) = f(lim g(x))`.
    fn continuous_limit(&mut self, func: Func, arg: ExprHandle, data: LimitData) -> Step {
        let Some(inner) = self.eval_limit(arg, data, true)? else {
            return Ok(None);
        };
        let value = self.arena.apply(func, [inner.value]);
        Ok(self.outcome(value, inner.direction))
    }

    // === Shapes ===

    fn plus_limit(&mut self, expr: ExprHandle, terms: &[ExprHandle], data: LimitData) -> Step {
        if self.at_infinity(data) {
            if let Some(poly) = ExprPolynomial::from_expr(self.arena, expr, data.symbol) {
                let degree = poly.degree();
                if degree > 0 {
                    let infinity = if degree % 2 == 1 {
                        data.value
                    } else {
                        self.arena.infinity()
                    };
                    let leading = self.arena.mul([poly.leading_coefficient(), infinity]);
                    trace!(degree, "polynomial at infinity");
                    return self.eval_limit(leading, data, true);
                }
            }
        }
        self.map_sum(terms, data)
    }

    fn times_limit(&mut self, expr: ExprHandle, data: LimitData) -> Step {
        let x = data.symbol;
        let (free, dependent) = self.arena.partition_free(expr, x);
        if !self.arena.is_one(free) {
            let Some(inner) = self.eval_limit(dependent, data, true)? else {
                return Ok(None);
            };
            let value = self.arena.mul([free, inner.value]);
            return Ok(self.outcome(value, inner.direction));
        }

        let (numerator, denominator) = self.arena.numerator_denominator(expr);
        let at_infinity = self.at_infinity(data);
        if at_infinity {
            let p = ExprPolynomial::from_expr(self.arena, numerator, x);
            let q = ExprPolynomial::from_expr(self.arena, denominator, x);
            if let (Some(p), Some(q)) = (p, q) {
                trace!(num_degree = p.degree(), den_degree = q.degree(), "rational function at infinity");
                let value = rational_limit_at_infinity(self.arena, &p, &q, data.value);
                return self.eval_limit(value, data, true);
            }
        }

        if let Some(fractions) = apart(self.arena, numerator, denominator, x) {
            if let ExprNode::Add(terms) = self.arena.get(fractions).clone() {
                debug!(terms = terms.len(), "limit over partial fractions");
                return self.map_sum(&terms, data);
            }
        }

        if at_infinity && self.arena.is_one(denominator) {
            if let Some(outcome) = self.substitute_infinity(expr, data)? {
                return Ok(Some(outcome));
            }
        }

        if let Some(outcome) = self.numerator_denominator_limit(numerator, denominator, data)? {
            return Ok(Some(outcome));
        }

        match self.arena.get(expr).clone() {
            ExprNode::Mul(factors) => self.map_product(&factors, data),
            _ => Ok(None),
        }
    }

    /// Rewrites a limit at infinity as a limit at zero through `x -> 1/x`.
    fn substitute_infinity(&mut self, expr: ExprHandle, data: LimitData) -> Step {
        let x = data.symbol;
        let inverse = self.arena.recip(x);
        let substituted = self.quietly(|engine| engine.arena.replace_all(expr, x, inverse));
        if !matches!(self.arena.get(substituted), ExprNode::Mul(_)) {
            return Ok(None);
        }
        let (numerator, denominator) = self.arena.numerator_denominator(substituted);
        if self.arena.is_one(denominator) {
            return Ok(None);
        }
        let side = if self.arena.is_infinity(data.value) {
            Direction::FromAbove
        } else {
            Direction::FromBelow
        };
        let at_zero = LimitData {
            symbol: x,
            value: self.arena.zero(),
            direction: side,
        };
        trace!(expr = %self.arena.display(substituted), "substituted 1/x");
        let Some(inner) = self.numerator_denominator_limit(numerator, denominator, at_zero)? else {
            return Ok(None);
        };
        Ok(self.outcome(inner.value, data.direction))
    }

    fn numerator_denominator_limit(
        &mut self,
        numerator: ExprHandle,
        denominator: ExprHandle,
        data: LimitData,
    ) -> Step {
        if self.arena.is_one(denominator) {
            if let ExprNode::Mul(factors) = self.arena.get(numerator).clone() {
                return self.map_product(&factors, data);
            }
        }

        if !self.arena.is_number(denominator) || self.arena.is_zero(denominator) {
            let (x, target) = (data.symbol, data.value);
            let den_value = self.quietly(|engine| engine.arena.replace_all(denominator, x, target));
            if self.arena.is_indeterminate(den_value) {
                return Ok(None);
            }
            if self.arena.is_zero(den_value)
                || self.arena.is_infinity(den_value)
                || self.arena.is_neg_infinity(den_value)
            {
                let num_value =
                    self.quietly(|engine| engine.arena.replace_all(numerator, x, target));
                return if num_value == den_value {
                    self.lhopital(numerator, denominator, data)
                } else {
                    Ok(None)
                };
            }
        }

        let Some(num) = self.eval_limit(numerator, data, true)? else {
            return Ok(None);
        };
        let Some(den) = self.eval_limit(denominator, data.with_direction(num.direction), true)?
        else {
            return Ok(None);
        };
        let inverse = self.arena.recip(den.value);
        let value = self.arena.mul([num.value, inverse]);
        Ok(self.outcome(value, den.direction))
    }

    fn power_limit(&mut self, base: ExprHandle, exp: ExprHandle, data: LimitData) -> Step {
        let x = data.symbol;
        if exp == x && self.arena.is_zero(data.value) {
            let one = self.arena.one();
            return Ok(self.outcome(one, data.direction));
        }
        let exp_is_free = self.arena.is_free(exp, x);
        if exp_is_free && matches!(self.arena.get(base), ExprNode::Mul(_)) {
            let (free, dependent) = self.arena.partition_free(base, x);
            if !self.arena.is_one(free) {
                let outer = self.arena.pow(free, exp);
                let rest = self.arena.pow(dependent, exp);
                let Some(inner) = self.eval_limit(rest, data, true)? else {
                    return Ok(None);
                };
                let value = self.arena.mul([outer, inner.value]);
                return Ok(self.outcome(value, inner.direction));
            }
        }
        if self.arena.is_numeric_function(exp) {
            return self.numeric_power_limit(base, exp, data);
        }
        if self.arena.is_free(base, x) {
            let Some(inner) = self.eval_limit(exp, data, true)? else {
                return Ok(None);
            };
            let value = self.arena.pow(base, inner.value);
            return Ok(self.outcome(value, inner.direction));
        }
        Ok(None)
    }

    fn numeric_power_limit(&mut self, base: ExprHandle, exp: ExprHandle, data: LimitData) -> Step {
        let Some(inner) = self.quietly(|engine| engine.eval_limit(base, data, true))? else {
            return Ok(None);
        };
        let (b, direction) = (inner.value, inner.direction);

        if matches!(self.arena.get(b), ExprNode::Function { func: Func::Interval, .. }) {
            let value = self.arena.pow(b, exp);
            if matches!(self.arena.get(value), ExprNode::Pow { .. }) {
                trace!(exp = %self.arena.display(exp), "interval power does not fold");
                return Ok(None);
            }
            return Ok(self.outcome(value, direction));
        }

        if self.arena.is_numeric_function(b) {
            if self.arena.is_zero(b) {
                return Ok(self.zero_base_power(exp, direction));
            }
            let value = self.arena.pow(b, exp);
            return Ok(self.outcome(value, direction));
        }

        if let Some(n) = self.arena.as_integer(exp).cloned() {
            let value = if self.arena.is_infinity(b) {
                if n.is_positive() {
                    b
                } else {
                    self.arena.zero()
                }
            } else if self.arena.is_neg_infinity(b) {
                if n.is_negative() {
                    self.arena.zero()
                } else if n.is_even() {
                    self.arena.infinity()
                } else {
                    self.arena.neg_infinity()
                }
            } else if n.is_positive() || n.is_even() {
                self.arena.pow(b, exp)
            } else {
                return Ok(None);
            };
            return Ok(self.outcome(value, direction));
        }

        if self.arena.is_infinity(b) {
            let value = match self.arena.sign(exp) {
                Some(1) => b,
                Some(-1) => self.arena.zero(),
                _ => return Ok(None),
            };
            return Ok(self.outcome(value, direction));
        }
        Ok(None)
    }

    /// `lim b^e` for a base tending to zero and a numeric exponent.
    fn zero_base_power(&mut self, exp: ExprHandle, direction: Direction) -> Option<LimitOutcome> {
        match self.arena.sign(exp) {
            Some(1) => {
                let zero = self.arena.zero();
                self.outcome(zero, direction)
            }
            Some(-1) => {
                if let Some(n) = self.arena.as_integer(exp) {
                    if n.is_even() {
                        let inf = self.arena.infinity();
                        return self.outcome(inf, direction);
                    }
                    if direction == Direction::FromBelow {
                        let neg_inf = self.arena.neg_infinity();
                        return self.outcome(neg_inf, direction);
                    }
                } else if self.arena.as_rational(exp).is_none() || direction == Direction::FromBelow {
                    return None;
                }
                let direction = direction.tighten(Direction::FromAbove)?;
                let inf = self.arena.infinity();
                self.outcome(inf, direction)
            }
            _ => None,
        }
    }

    fn log_limit(&mut self, arg: ExprHandle, data: LimitData) -> Step {
        let x = data.symbol;
        match self.arena.get(arg).clone() {
            ExprNode::Pow { base, exp } if self.arena.is_free(exp, x) => {
                let log = self.arena.apply(Func::Log, [base]);
                let Some(inner) = self.eval_limit(log, data, true)? else {
                    return Ok(None);
                };
                let value = self.arena.mul([exp, inner.value]);
                return Ok(self.outcome(value, inner.direction));
            }
            ExprNode::Mul(_) => {
                let (free, dependent) = self.arena.partition_free(arg, x);
                if !self.arena.is_one(free) {
                    let log_free = self.arena.apply(Func::Log, [free]);
                    let log_dependent = self.arena.apply(Func::Log, [dependent]);
                    let Some(inner) = self.eval_limit(log_dependent, data, true)? else {
                        return Ok(None);
                    };
                    let value = self.arena.add([log_free, inner.value]);
                    return Ok(self.outcome(value, inner.direction));
                }
            }
            _ => {}
        }

        let Some(inner) = self.eval_limit(arg, data, true)? else {
            return Ok(None);
        };
        let v = inner.value;
        if self.arena.is_zero(v) || self.arena.sign(v) == Some(1) {
            let value = self.arena.apply(Func::Log, [v]);
            return Ok(self.outcome(value, inner.direction));
        }
        Ok(None)
    }

    // === L'Hopital ===

    /// Applies L'Hopital's rule to `numerator / denominator`.
    ///
    /// With a recursion limit in force the step counts against it and gives
    /// up quietly once it is reached. Otherwise the configured budget is
    /// installed for the duration of the call.
    fn lhopital(&mut self, numerator: ExprHandle, denominator: ExprHandle, data: LimitData) -> Step {
        if self.ctx.recursion_limit().is_some() {
            if self.ctx.enter().is_err() {
                trace!(depth = self.ctx.depth(), "L'Hopital depth reached");
                return Ok(None);
            }
            let result = self.lhopital_step(numerator, denominator, data);
            self.ctx.leave();
            return result;
        }

        let budget = self.ctx.config().lhopital_budget;
        self.ctx.set_recursion_limit(Some(budget));
        let result = match self.ctx.enter() {
            Ok(()) => {
                let result = self.lhopital_step(numerator, denominator, data);
                self.ctx.leave();
                result
            }
            Err(err) => Err(err.into()),
        };
        self.ctx.set_recursion_limit(None);

        match result {
            Err(LimitError::RecursionLimitExceeded { limit }) => {
                debug!(limit, "L'Hopital budget exhausted");
                self.ctx.message(
                    "Limit",
                    format!("recursion limit {limit} exceeded while applying L'Hopital's rule"),
                );
                Ok(None)
            }
            other => other,
        }
    }

    fn lhopital_step(&mut self, numerator: ExprHandle, denominator: ExprHandle, data: LimitData) -> Step {
        let x = data.symbol;
        let (Some(dn), Some(dd)) = (
            self.arena.derivative(numerator, x),
            self.arena.derivative(denominator, x),
        ) else {
            return Ok(None);
        };
        let ratio = self.quietly(|engine| {
            let q = engine.arena.div(dn, dd);
            engine.arena.evaluate(q)
        });
        debug!(ratio = %self.arena.display(ratio), "L'Hopital step");
        self.eval_limit(ratio, data, false)
    }
}
