//! Arena storage for expressions.
//!
//! All nodes live contiguously in a `Vec`, with hash-consing ensuring each
//! unique node is stored exactly once. Only canonical nodes are interned;
//! the public way to build compound expressions is through the constructors
//! in [`crate::eval`] and [`crate::functions`].

use hashbrown::HashMap;
use limes_integers::{Integer, Rational};
use num_traits::{One, Zero};

use crate::expr::{Constant, ExprNode, SymbolId};
use crate::handle::ExprHandle;
use crate::intern::InternTable;

/// The arena holding every expression of a session.
#[derive(Debug, Default)]
pub struct ExprArena {
    /// Nodes by handle index.
    nodes: Vec<ExprNode>,
    /// Hash-consing table.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol names.
    symbols: InternTable,
}

impl ExprArena {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a node that is already canonical.
    ///
    /// # Panics
    ///
    /// Panics if the arena outgrows 32-bit handles.
    pub(crate) fn intern(&mut self, node: ExprNode) -> ExprHandle {
        let next = self.nodes.len();
        let nodes = &mut self.nodes;
        *self.intern_map.entry(node).or_insert_with_key(|node| {
            let index = u32::try_from(next).expect("arena capacity exceeded");
            nodes.push(node.clone());
            ExprHandle::new(index)
        })
    }

    /// The node behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Number of distinct nodes interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- atoms ---

    /// A machine integer.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.intern(ExprNode::Integer(Integer::new(value)))
    }

    /// An arbitrary integer.
    pub fn int(&mut self, value: Integer) -> ExprHandle {
        self.intern(ExprNode::Integer(value))
    }

    /// Creates a rational expression, collapsing integral values.
    pub fn rational(&mut self, value: Rational) -> ExprHandle {
        match value.to_integer() {
            Some(n) => self.int(n),
            None => self.intern(ExprNode::Rational(value)),
        }
    }

    /// Creates `numerator/denominator`.
    ///
    /// # Panics
    ///
    /// On a zero denominator.
    pub fn fraction(&mut self, numerator: i64, denominator: i64) -> ExprHandle {
        self.rational(Rational::from_i64(numerator, denominator))
    }

    /// The symbol `name`.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.symbols.intern(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates a named constant.
    pub fn constant(&mut self, c: Constant) -> ExprHandle {
        self.intern(ExprNode::Constant(c))
    }

    /// The integer 0.
    pub fn zero(&mut self) -> ExprHandle {
        self.int(Integer::zero())
    }

    /// The integer 1.
    pub fn one(&mut self) -> ExprHandle {
        self.int(Integer::one())
    }

    /// The integer -1.
    pub fn minus_one(&mut self) -> ExprHandle {
        self.integer(-1)
    }

    /// `Infinity`.
    pub fn infinity(&mut self) -> ExprHandle {
        self.constant(Constant::Infinity)
    }

    /// `-Infinity`.
    pub fn neg_infinity(&mut self) -> ExprHandle {
        self.constant(Constant::NegInfinity)
    }

    /// `Indeterminate`.
    pub fn indeterminate(&mut self) -> ExprHandle {
        self.constant(Constant::Indeterminate)
    }

    // --- symbols ---

    /// Interns a symbol name without creating a node.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    /// Name of an interned symbol.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbols.name(id)
    }

    /// The symbol id of a symbol node.
    #[must_use]
    pub fn as_symbol(&self, handle: ExprHandle) -> Option<SymbolId> {
        match self.get(handle) {
            ExprNode::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    // --- atom queries ---

    /// The integer value of an integer node.
    #[must_use]
    pub fn as_integer(&self, handle: ExprHandle) -> Option<&Integer> {
        match self.get(handle) {
            ExprNode::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// The constant of a constant node.
    #[must_use]
    pub fn as_constant(&self, handle: ExprHandle) -> Option<Constant> {
        match self.get(handle) {
            ExprNode::Constant(c) => Some(*c),
            _ => None,
        }
    }

    /// True for the integer 0.
    #[must_use]
    pub fn is_zero(&self, handle: ExprHandle) -> bool {
        self.as_integer(handle).is_some_and(Zero::is_zero)
    }

    /// True for the integer 1.
    #[must_use]
    pub fn is_one(&self, handle: ExprHandle) -> bool {
        self.as_integer(handle).is_some_and(One::is_one)
    }

    /// True for an exact integer or rational.
    #[must_use]
    pub fn is_number(&self, handle: ExprHandle) -> bool {
        self.get(handle).is_number()
    }

    /// True for the given constant.
    #[must_use]
    pub fn is_constant(&self, handle: ExprHandle, c: Constant) -> bool {
        self.as_constant(handle) == Some(c)
    }

    /// True for `Indeterminate`.
    #[must_use]
    pub fn is_indeterminate(&self, handle: ExprHandle) -> bool {
        self.is_constant(handle, Constant::Indeterminate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_shared() {
        let mut arena = ExprArena::new();
        let (x, y) = (arena.symbol("x"), arena.symbol("y"));
        assert_eq!(x, arena.symbol("x"));
        assert_ne!(x, y);
        assert_eq!(arena.as_symbol(y).and_then(|id| arena.symbol_name(id)), Some("y"));
    }

    #[test]
    fn test_integral_rationals_collapse() {
        let mut arena = ExprArena::new();
        let two = arena.integer(2);
        assert_eq!(arena.fraction(4, 2), two);
        let half = arena.fraction(1, 2);
        assert!(matches!(arena.get(half), ExprNode::Rational(_)));
        assert!(arena.is_number(half));
    }

    #[test]
    fn test_hash_consing() {
        let mut arena = ExprArena::default();
        let a = arena.integer(12);
        let before = arena.len();
        let b = arena.int(Integer::new(12));
        assert_eq!(a, b);
        assert_eq!(arena.len(), before);
    }
}
