//! Taylor expansion of an expression into a [`TruncatedSeries`].

use limes_core::{ExprArena, ExprHandle, Func};
use tracing::{debug, instrument};

use crate::coefficient::{is_defined, series_coefficient};
use crate::data::TruncatedSeries;

/// Name of the order symbol used to derive closed-form coefficients.
const ORDER_SYMBOL: &str = "$k";

/// The result of [`series`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// The expression does not depend on the variable.
    Constant(ExprHandle),
    /// A proper series.
    Series(TruncatedSeries),
}

/// Expands `expr` in `x` around `x0` up to and including `(x - x0)^order`.
///
/// A closed form for the general coefficient is tried first and
/// specialised at each order; otherwise the coefficients come from
/// successive derivatives. Only the expansion point `0` is supported.
/// Returns `None` for other points, a negative order, a non-symbol `x`, or
/// a coefficient that cannot be determined.
#[instrument(level = "debug", skip(arena))]
pub fn series(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
    x0: ExprHandle,
    order: i64,
) -> Option<Expansion> {
    arena.as_symbol(x)?;
    if !arena.is_zero(x0) || order < 0 {
        return None;
    }
    if arena.is_free(expr, x) {
        return Some(Expansion::Constant(expr));
    }

    let coefficients = match closed_form_coefficients(arena, expr, x, x0, order) {
        Some(c) => c,
        None => derivative_coefficients(arena, expr, x, x0, order)?,
    };
    let n_max = order.checked_add(1)?;
    TruncatedSeries::new(arena, x, x0, coefficients, 0, n_max, 1).map(Expansion::Series)
}

fn closed_form_coefficients(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
    x0: ExprHandle,
    order: i64,
) -> Option<Vec<ExprHandle>> {
    let k = arena.symbol(ORDER_SYMBOL);
    let general = series_coefficient(arena, expr, x, x0, k)?;
    debug!(general = %arena.display(general), "closed-form coefficient");
    let mut coefficients = Vec::new();
    for i in 0..=order {
        let i = arena.integer(i);
        let c = arena.replace_all(general, k, i);
        if !is_defined(arena, c) {
            return None;
        }
        coefficients.push(c);
    }
    Some(coefficients)
}

fn derivative_coefficients(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
    x0: ExprHandle,
    order: i64,
) -> Option<Vec<ExprHandle>> {
    debug!("coefficients by differentiation");
    let mut coefficients = Vec::new();
    let mut current = expr;
    for i in 0..=order {
        if i > 0 {
            current = arena.derivative(current, x)?;
        }
        let value = arena.replace_all(current, x, x0);
        let i = arena.integer(i);
        let factorial = arena.apply(Func::Factorial, [i]);
        let c = arena.div(value, factorial);
        if !is_defined(arena, c) {
            return None;
        }
        coefficients.push(c);
    }
    Some(coefficients)
}
