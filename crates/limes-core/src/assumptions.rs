//! Sign assumptions on symbols.
//!
//! The limit engine asks two questions about the limit variable: is it
//! known to be negative, and is it known to be non-negative. Callers that
//! carry no assumptions pass [`NoAssumptions`].

use hashbrown::HashMap;

use crate::expr::SymbolId;

/// Source of sign facts about symbols.
pub trait Assumptions {
    /// True if `symbol` is known to be strictly negative.
    fn is_negative(&self, symbol: SymbolId) -> bool;

    /// True if `symbol` is known to be zero or positive.
    fn is_non_negative(&self, symbol: SymbolId) -> bool;
}

/// Knows nothing about any symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssumptions;

impl Assumptions for NoAssumptions {
    fn is_negative(&self, _symbol: SymbolId) -> bool {
        false
    }

    fn is_non_negative(&self, _symbol: SymbolId) -> bool {
        false
    }
}

/// A declared sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolSign {
    /// Strictly below zero.
    Negative,
    /// Zero or above.
    NonNegative,
    /// Strictly above zero.
    Positive,
}

/// Explicit per-symbol sign declarations.
#[derive(Debug, Clone, Default)]
pub struct AssumptionSet {
    signs: HashMap<SymbolId, SymbolSign>,
}

impl AssumptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the sign of `symbol`, replacing any earlier declaration.
    pub fn declare(&mut self, symbol: SymbolId, sign: SymbolSign) {
        tracing::debug!(symbol, ?sign, "sign assumption declared");
        self.signs.insert(symbol, sign);
    }

    /// Removes any declaration for `symbol`.
    pub fn forget(&mut self, symbol: SymbolId) {
        self.signs.remove(&symbol);
    }

    /// The declared sign of `symbol`.
    #[must_use]
    pub fn sign_of(&self, symbol: SymbolId) -> Option<SymbolSign> {
        self.signs.get(&symbol).copied()
    }
}

impl Assumptions for AssumptionSet {
    fn is_negative(&self, symbol: SymbolId) -> bool {
        self.sign_of(symbol) == Some(SymbolSign::Negative)
    }

    fn is_non_negative(&self, symbol: SymbolId) -> bool {
        matches!(
            self.sign_of(symbol),
            Some(SymbolSign::NonNegative | SymbolSign::Positive)
        )
    }
}
