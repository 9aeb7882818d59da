//! Evaluation sessions.
//!
//! A [`Session`] owns an expression arena, the engine configuration and the
//! sign assumptions, and exposes the callable operations `Limit`, `Series`,
//! `SeriesCoefficient`, `SeriesData`, `InverseSeries` and `ComposeSeries`,
//! plus integer factorization and primality under the configured number of
//! Miller-Rabin rounds.
//! Each call gets a fresh [`EvalContext`]; messages it records are kept on
//! the session until taken.

use limes_core::{
    AssumptionSet, EngineConfig, EvalContext, ExprArena, ExprHandle, ExprNode, Func, SymbolSign,
};
use limes_integers::Integer;
use limes_limits::{limit, LimitError, LimitOutcome, LimitRequest};
use limes_series::{
    compose_series, inverse_series, series, series_coefficient, series_data, Expansion,
    TruncatedSeries,
};
use tracing::instrument;

/// Owner of all state needed to evaluate limits and series.
#[derive(Debug, Default)]
pub struct Session {
    arena: ExprArena,
    config: EngineConfig,
    assumptions: AssumptionSet,
    messages: Vec<String>,
}

impl Session {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The expression arena.
    #[must_use]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Mutable access to the expression arena, for building inputs.
    pub fn arena_mut(&mut self) -> &mut ExprArena {
        &mut self.arena
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Declares the sign of the symbol `name`.
    pub fn assume(&mut self, name: &str, sign: SymbolSign) {
        let id = self.arena.intern_symbol(name);
        self.assumptions.declare(id, sign);
    }

    /// Removes any sign declared for the symbol `name`.
    pub fn forget(&mut self, name: &str) {
        let id = self.arena.intern_symbol(name);
        self.assumptions.forget(id);
    }

    /// Messages recorded by earlier calls.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drains the recorded messages.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Renders an expression.
    #[must_use]
    pub fn render(&self, h: ExprHandle) -> String {
        self.arena.render(h)
    }

    // === Limit ===

    /// `Limit(expr, x -> a[, Direction -> d])`.
    ///
    /// `Ok(None)` means the limit could not be determined, which includes
    /// running past a configured recursion limit; a `Limit` message is then
    /// recorded.
    ///
    /// # Errors
    ///
    /// [`LimitError::Argument`] for a malformed call.
    #[instrument(level = "debug", skip(self))]
    pub fn limit(&mut self, args: &[ExprHandle]) -> Result<Option<LimitOutcome>, LimitError> {
        let request = LimitRequest::parse(&self.arena, args)?;
        self.limit_request(&request)
    }

    /// Computes an already validated limit request.
    ///
    /// # Errors
    ///
    /// Does not fail once the request is validated; see [`limit`].
    pub fn limit_request(
        &mut self,
        request: &LimitRequest,
    ) -> Result<Option<LimitOutcome>, LimitError> {
        let mut ctx = EvalContext::new(self.config.clone());
        let result = limit(&mut self.arena, &mut ctx, &self.assumptions, request);
        self.messages.extend(ctx.take_messages());
        result
    }

    // === Series ===

    /// `Series(expr, {x, x0, n})`.
    #[instrument(level = "debug", skip(self))]
    pub fn series(&mut self, expr: ExprHandle, spec: ExprHandle) -> Option<Expansion> {
        let (x, x0, order) = self.series_spec(spec)?;
        let order = self.arena.as_integer(order)?.to_i64()?;
        series(&mut self.arena, expr, x, x0, order)
    }

    /// `SeriesCoefficient(expr, {x, x0, n})`; `n` may be symbolic.
    #[instrument(level = "debug", skip(self))]
    pub fn series_coefficient(&mut self, expr: ExprHandle, spec: ExprHandle) -> Option<ExprHandle> {
        let (x, x0, n) = self.series_spec(spec)?;
        self.arena.as_symbol(x)?;
        series_coefficient(&mut self.arena, expr, x, x0, n)
    }

    /// `SeriesData(x, x0, {c...}, nMin, nMax, den)`.
    pub fn series_data(&mut self, args: &[ExprHandle]) -> Option<TruncatedSeries> {
        series_data(&mut self.arena, args)
    }

    /// `InverseSeries(s)`.
    pub fn inverse_series(&mut self, series: &TruncatedSeries) -> Option<TruncatedSeries> {
        inverse_series(&mut self.arena, series)
    }

    /// `ComposeSeries(s1, s2, ...)`. Never evaluates.
    #[must_use]
    pub fn compose_series(&self, series: &[TruncatedSeries]) -> Option<TruncatedSeries> {
        compose_series(series)
    }

    /// Renders a series in `SeriesData` display form.
    pub fn render_series(&mut self, series: &TruncatedSeries) -> String {
        series.render(&mut self.arena)
    }

    // === Integers ===

    /// `FactorInteger(n)`: ascending `(prime, multiplicity)` pairs.
    #[must_use]
    pub fn factor_integer(&self, n: &Integer) -> Vec<(Integer, u32)> {
        n.factor_integer_with(self.config.primality_rounds)
    }

    /// `PrimeQ(n)`.
    #[must_use]
    pub fn is_prime(&self, n: &Integer) -> bool {
        n.is_probable_prime_with(self.config.primality_rounds)
    }

    fn series_spec(&self, spec: ExprHandle) -> Option<(ExprHandle, ExprHandle, ExprHandle)> {
        match self.arena.get(spec) {
            ExprNode::Function {
                func: Func::List,
                args,
            } if args.len() == 3 => Some((args[0], args[1], args[2])),
            _ => None,
        }
    }
}
