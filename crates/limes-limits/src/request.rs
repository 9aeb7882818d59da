//! Validated limit requests.

use limes_core::{ExprArena, ExprHandle, ExprNode, Func};

use crate::direction::Direction;
use crate::error::ArgumentError;

/// Name of the option symbol in `Direction -> d`.
pub const DIRECTION_OPTION: &str = "Direction";

/// A well-formed `Limit(expr, symbol -> value[, Direction -> d])` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitRequest {
    /// The expression whose limit is taken.
    pub expr: ExprHandle,
    /// The limit variable, always a symbol.
    pub symbol: ExprHandle,
    /// The target, free of `symbol`.
    pub value: ExprHandle,
    /// The requested direction.
    pub direction: Direction,
}

impl LimitRequest {
    /// Builds a request from its parts.
    ///
    /// # Errors
    ///
    /// [`ArgumentError::NotASymbol`] if `symbol` is not a symbol and
    /// [`ArgumentError::ValueDependsOnVariable`] if `value` mentions it.
    pub fn new(
        arena: &ExprArena,
        expr: ExprHandle,
        symbol: ExprHandle,
        value: ExprHandle,
        direction: Direction,
    ) -> Result<Self, ArgumentError> {
        if arena.as_symbol(symbol).is_none() {
            return Err(ArgumentError::NotASymbol);
        }
        if !arena.is_free(value, symbol) {
            return Err(ArgumentError::ValueDependsOnVariable);
        }
        Ok(Self {
            expr,
            symbol,
            value,
            direction,
        })
    }

    /// Validates the arguments of a `Limit` call.
    ///
    /// # Errors
    ///
    /// Returns the [`ArgumentError`] describing the first problem found.
    pub fn parse(arena: &ExprArena, args: &[ExprHandle]) -> Result<Self, ArgumentError> {
        if !(2..=3).contains(&args.len()) {
            return Err(ArgumentError::Arity { given: args.len() });
        }
        let (symbol, value) = rule_sides(arena, args[1]).ok_or(ArgumentError::NotARule)?;
        let direction = match args.get(2) {
            Some(&option) => parse_direction(arena, option)?,
            None => Direction::TwoSided,
        };
        Self::new(arena, args[0], symbol, value, direction)
    }
}

fn rule_sides(arena: &ExprArena, h: ExprHandle) -> Option<(ExprHandle, ExprHandle)> {
    match arena.get(h) {
        ExprNode::Function {
            func: Func::Rule,
            args,
        } if args.len() == 2 => Some((args[0], args[1])),
        _ => None,
    }
}

fn parse_direction(arena: &ExprArena, option: ExprHandle) -> Result<Direction, ArgumentError> {
    let (name, value) = rule_sides(arena, option).ok_or(ArgumentError::InvalidDirection)?;
    let is_direction = arena
        .as_symbol(name)
        .and_then(|id| arena.symbol_name(id))
        .is_some_and(|n| n == DIRECTION_OPTION);
    if !is_direction {
        return Err(ArgumentError::InvalidDirection);
    }
    Direction::from_option_value(arena, value).ok_or(ArgumentError::InvalidDirection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(arena: &mut ExprArena, lhs: ExprHandle, rhs: ExprHandle) -> ExprHandle {
        arena.apply(Func::Rule, [lhs, rhs])
    }

    #[test]
    fn test_parse_two_arguments() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin = arena.apply(Func::Sin, [x]);
        let zero = arena.zero();
        let r = rule(&mut arena, x, zero);
        let request = LimitRequest::parse(&arena, &[sin, r]).unwrap();
        assert_eq!(request.expr, sin);
        assert_eq!(request.symbol, x);
        assert_eq!(request.value, zero);
        assert_eq!(request.direction, Direction::TwoSided);
    }

    #[test]
    fn test_parse_direction_option() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let r = rule(&mut arena, x, zero);
        let name = arena.symbol(DIRECTION_OPTION);
        let minus_one = arena.minus_one();
        let from_above = rule(&mut arena, name, minus_one);
        let request = LimitRequest::parse(&arena, &[x, r, from_above]).unwrap();
        assert_eq!(request.direction, Direction::FromAbove);

        let automatic = arena.symbol("Automatic");
        let two_sided = rule(&mut arena, name, automatic);
        let request = LimitRequest::parse(&arena, &[x, r, two_sided]).unwrap();
        assert_eq!(request.direction, Direction::TwoSided);
    }

    #[test]
    fn test_rejects_malformed_calls() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let r = rule(&mut arena, x, zero);

        assert_eq!(
            LimitRequest::parse(&arena, &[x]),
            Err(ArgumentError::Arity { given: 1 })
        );
        assert_eq!(
            LimitRequest::parse(&arena, &[x, zero]),
            Err(ArgumentError::NotARule)
        );

        let two = arena.integer(2);
        let bad_lhs = rule(&mut arena, two, zero);
        assert_eq!(
            LimitRequest::parse(&arena, &[x, bad_lhs]),
            Err(ArgumentError::NotASymbol)
        );

        let one = arena.one();
        let moving = arena.add([x, one]);
        let self_ref = rule(&mut arena, x, moving);
        assert_eq!(
            LimitRequest::parse(&arena, &[x, self_ref]),
            Err(ArgumentError::ValueDependsOnVariable)
        );

        let name = arena.symbol(DIRECTION_OPTION);
        let bad_value = rule(&mut arena, name, two);
        assert_eq!(
            LimitRequest::parse(&arena, &[x, r, bad_value]),
            Err(ArgumentError::InvalidDirection)
        );
        let other = arena.symbol("Method");
        let bad_name = rule(&mut arena, other, one);
        assert_eq!(
            LimitRequest::parse(&arena, &[x, r, bad_name]),
            Err(ArgumentError::InvalidDirection)
        );
        assert_eq!(
            LimitRequest::parse(&arena, &[x, r, one]),
            Err(ArgumentError::InvalidDirection)
        );
    }
}
