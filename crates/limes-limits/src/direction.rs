//! The side from which the limit variable approaches its target.

use std::fmt;

use limes_core::{ExprArena, ExprHandle};

/// Name of the symbol selecting a two-sided limit.
pub const AUTOMATIC: &str = "Automatic";

/// Direction of approach.
///
/// A limit starts in whatever direction the caller asked for and may only
/// become more specific while it is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Either side.
    #[default]
    TwoSided,
    /// From values below the target (`Direction -> 1`).
    FromBelow,
    /// From values above the target (`Direction -> -1`).
    FromAbove,
}

impl Direction {
    /// Reads the right-hand side of a `Direction -> d` option.
    ///
    /// `1` is from below, `-1` from above and `Automatic` two-sided.
    #[must_use]
    pub fn from_option_value(arena: &ExprArena, value: ExprHandle) -> Option<Self> {
        if let Some(n) = arena.as_integer(value).and_then(limes_integers::Integer::to_i64) {
            return match n {
                1 => Some(Direction::FromBelow),
                -1 => Some(Direction::FromAbove),
                _ => None,
            };
        }
        let name = arena.as_symbol(value).and_then(|id| arena.symbol_name(id))?;
        (name == AUTOMATIC).then_some(Direction::TwoSided)
    }

    /// The option value that selects this direction.
    pub fn option_value(self, arena: &mut ExprArena) -> ExprHandle {
        match self {
            Direction::TwoSided => arena.symbol(AUTOMATIC),
            Direction::FromBelow => arena.one(),
            Direction::FromAbove => arena.minus_one(),
        }
    }

    /// Restricts the approach to `side`.
    ///
    /// A two-sided approach takes the new side; a one-sided approach keeps
    /// its side. Asking for the opposite side of a fixed approach has no
    /// answer.
    #[must_use]
    pub fn tighten(self, side: Direction) -> Option<Direction> {
        match (self, side) {
            (Direction::TwoSided, side) => Some(side),
            (current, Direction::TwoSided) => Some(current),
            (current, side) if current == side => Some(current),
            _ => None,
        }
    }

    /// True unless two-sided.
    #[must_use]
    pub fn is_one_sided(self) -> bool {
        self != Direction::TwoSided
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::TwoSided => "TwoSided",
            Direction::FromBelow => "FromBelow",
            Direction::FromAbove => "FromAbove",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tighten_only_narrows() {
        use Direction::*;
        assert_eq!(TwoSided.tighten(FromAbove), Some(FromAbove));
        assert_eq!(FromBelow.tighten(FromBelow), Some(FromBelow));
        assert_eq!(FromBelow.tighten(TwoSided), Some(FromBelow));
        assert_eq!(FromBelow.tighten(FromAbove), None);
        assert_eq!(FromAbove.tighten(FromBelow), None);
        assert!(!TwoSided.is_one_sided());
    }

    #[test]
    fn test_option_values() {
        let mut arena = ExprArena::new();
        for direction in [Direction::TwoSided, Direction::FromBelow, Direction::FromAbove] {
            let value = direction.option_value(&mut arena);
            assert_eq!(Direction::from_option_value(&arena, value), Some(direction));
        }
        let two = arena.integer(2);
        let other = arena.symbol("Left");
        assert_eq!(Direction::from_option_value(&arena, two), None);
        assert_eq!(Direction::from_option_value(&arena, other), None);
    }
}
