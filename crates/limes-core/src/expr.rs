//! Expression node types.
//!
//! Nodes are stored in the arena and refer to their children by handle.
//! Constructors in [`crate::eval`] keep every stored node canonical, so the
//! variants below come with invariants that the rest of the engine relies
//! on.

use limes_integers::{Integer, Rational};
use smallvec::SmallVec;

use crate::handle::ExprHandle;

/// Unique identifier for a symbol.
pub type SymbolId = u32;

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// The circle constant.
    Pi,
    /// Euler's number.
    E,
    /// Positive real infinity.
    Infinity,
    /// Negative real infinity.
    NegInfinity,
    /// Infinity of unknown direction.
    ComplexInfinity,
    /// The result of an undefined operation such as `0 * Infinity`.
    Indeterminate,
    /// Boolean truth.
    True,
    /// Boolean falsity.
    False,
}

impl Constant {
    /// The printed name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "Pi",
            Constant::E => "E",
            Constant::Infinity => "Infinity",
            Constant::NegInfinity => "-Infinity",
            Constant::ComplexInfinity => "ComplexInfinity",
            Constant::Indeterminate => "Indeterminate",
            Constant::True => "True",
            Constant::False => "False",
        }
    }

    /// True for the three infinities.
    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(
            self,
            Constant::Infinity | Constant::NegInfinity | Constant::ComplexInfinity
        )
    }
}

/// Built-in function heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Func {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Natural logarithm.
    Log,
    /// `n!`.
    Factorial,
    /// Binomial coefficient.
    Binomial,
    /// Fibonacci numbers.
    Fibonacci,
    /// Conditional value: arguments are `v1, c1, ..., vk, ck, default`.
    Piecewise,
    /// Closed real interval `[lo, hi]`.
    Interval,
    /// `a == b`.
    Equal,
    /// `a > b`.
    Greater,
    /// `a >= b`.
    GreaterEqual,
    /// `a < b`, possibly chained.
    Less,
    /// `a <= b`, possibly chained.
    LessEqual,
    /// A list.
    List,
    /// A replacement rule `lhs -> rhs`.
    Rule,
}

impl Func {
    /// The head name used when printing.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "Sin",
            Func::Cos => "Cos",
            Func::Tan => "Tan",
            Func::Log => "Log",
            Func::Factorial => "Factorial",
            Func::Binomial => "Binomial",
            Func::Fibonacci => "Fibonacci",
            Func::Piecewise => "Piecewise",
            Func::Interval => "Interval",
            Func::Equal => "Equal",
            Func::Greater => "Greater",
            Func::GreaterEqual => "GreaterEqual",
            Func::Less => "Less",
            Func::LessEqual => "LessEqual",
            Func::List => "List",
            Func::Rule => "Rule",
        }
    }

    /// True for the comparison heads.
    #[must_use]
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            Func::Equal | Func::Greater | Func::GreaterEqual | Func::Less | Func::LessEqual
        )
    }

    /// True for heads that map numbers to numbers.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Func::Sin
                | Func::Cos
                | Func::Tan
                | Func::Log
                | Func::Factorial
                | Func::Binomial
                | Func::Fibonacci
        )
    }

    /// The relation operator symbol, if this is a relation.
    #[must_use]
    pub fn operator(self) -> Option<&'static str> {
        match self {
            Func::Equal => Some("=="),
            Func::Greater => Some(">"),
            Func::GreaterEqual => Some(">="),
            Func::Less => Some("<"),
            Func::LessEqual => Some("<="),
            Func::Rule => Some("->"),
            _ => None,
        }
    }
}

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// An exact integer.
    Integer(Integer),

    /// An exact rational.
    ///
    /// Invariant: never integral; integral values are stored as `Integer`.
    Rational(Rational),

    /// A symbolic variable.
    Symbol(SymbolId),

    /// A named constant.
    Constant(Constant),

    // === Compound Expressions ===
    /// Sum of expressions.
    ///
    /// Invariant: at least 2 arguments, at most one number and it comes
    /// first, no nested sums, like terms collected.
    Add(SmallVec<[ExprHandle; 4]>),

    /// Product of expressions.
    ///
    /// Invariant: at least 2 arguments, at most one number (never 0 or 1)
    /// and it comes first, no nested products, equal bases merged.
    Mul(SmallVec<[ExprHandle; 4]>),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// A function application.
    Function {
        /// The head.
        func: Func,
        /// The arguments.
        args: SmallVec<[ExprHandle; 2]>,
    },
}

impl ExprNode {
    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Integer(_) | ExprNode::Rational(_) | ExprNode::Symbol(_) | ExprNode::Constant(_)
        )
    }

    /// Returns true if this node is an exact number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Integer(_) | ExprNode::Rational(_))
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 4]> {
        match self {
            ExprNode::Integer(_)
            | ExprNode::Rational(_)
            | ExprNode::Symbol(_)
            | ExprNode::Constant(_) => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(ExprNode::Integer(Integer::new(42)).is_atom());
        assert!(ExprNode::Symbol(0).is_atom());
        assert!(ExprNode::Constant(Constant::Pi).is_atom());
        assert!(!ExprNode::Pow {
            base: ExprHandle::new(0),
            exp: ExprHandle::new(1)
        }
        .is_atom());
    }

    #[test]
    fn test_children() {
        let node = ExprNode::Function {
            func: Func::Binomial,
            args: smallvec::smallvec![ExprHandle::new(3), ExprHandle::new(4)],
        };
        assert_eq!(node.children().as_slice(), &[ExprHandle::new(3), ExprHandle::new(4)]);
        assert!(ExprNode::Constant(Constant::E).children().is_empty());
    }

    #[test]
    fn test_constant_classes() {
        assert!(Constant::NegInfinity.is_infinite());
        assert!(!Constant::Pi.is_infinite());
        assert!(Func::LessEqual.is_relation());
        assert_eq!(Func::Rule.operator(), Some("->"));
    }
}
