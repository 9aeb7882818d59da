//! Evaluation configuration and per-call state.
//!
//! An [`EvalContext`] is created per top-level call and threaded through
//! the engines. It carries the recursion counter, the optional recursion
//! limit, the quiet flag that suppresses user-facing messages, and the
//! messages collected so far.

use crate::error::EvalError;

/// Default number of nested steps granted to a L'Hopital chain.
pub const DEFAULT_LHOPITAL_BUDGET: usize = 128;

/// Default number of random Miller-Rabin rounds.
pub const DEFAULT_PRIMALITY_ROUNDS: u32 = 32;

/// Static engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Recursion limit in force for every call; `None` means unlimited.
    pub recursion_limit: Option<usize>,
    /// Recursion budget installed by L'Hopital when no limit is in force.
    pub lhopital_budget: usize,
    /// Start every call in quiet mode.
    pub quiet: bool,
    /// Random rounds used by primality tests.
    pub primality_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recursion_limit: None,
            lhopital_budget: DEFAULT_LHOPITAL_BUDGET,
            quiet: false,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }
}

impl EngineConfig {
    /// Sets the recursion limit.
    #[must_use]
    pub fn with_recursion_limit(mut self, limit: Option<usize>) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Sets the L'Hopital budget.
    #[must_use]
    pub fn with_lhopital_budget(mut self, budget: usize) -> Self {
        self.lhopital_budget = budget;
        self
    }

    /// Sets quiet mode.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Sets the number of random primality rounds.
    #[must_use]
    pub fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }
}

/// Mutable per-call evaluation state.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    config: EngineConfig,
    depth: usize,
    recursion_limit: Option<usize>,
    quiet: bool,
    messages: Vec<String>,
}

impl EvalContext {
    /// Creates a context from a configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            recursion_limit: config.recursion_limit,
            quiet: config.quiet,
            config,
            depth: 0,
            messages: Vec::new(),
        }
    }

    /// The configuration this context was created from.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Enters one nesting level.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::RecursionLimitExceeded`] if the new depth would
    /// pass the active limit; the depth is left unchanged in that case.
    pub fn enter(&mut self) -> Result<(), EvalError> {
        if let Some(limit) = self.recursion_limit {
            if self.depth >= limit {
                tracing::trace!(limit, "recursion limit reached");
                return Err(EvalError::RecursionLimitExceeded { limit });
            }
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves one nesting level.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The active recursion limit.
    #[must_use]
    pub fn recursion_limit(&self) -> Option<usize> {
        self.recursion_limit
    }

    /// Replaces the recursion limit, returning the previous one.
    pub fn set_recursion_limit(&mut self, limit: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.recursion_limit, limit)
    }

    /// True when messages are suppressed.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Sets quiet mode, returning the previous setting.
    pub fn set_quiet(&mut self, quiet: bool) -> bool {
        std::mem::replace(&mut self.quiet, quiet)
    }

    /// Records a user-facing message unless quiet.
    pub fn message(&mut self, tag: &str, text: impl Into<String>) {
        if self.quiet {
            return;
        }
        let text = text.into();
        tracing::warn!(tag, "{text}");
        self.messages.push(format!("{tag}: {text}"));
    }

    /// Messages recorded so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drains the recorded messages.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}
