// crates/tagged-urn/src/trace.rs
// ============================================================================
// Module: Match Trace Hooks
// Description: Observation hooks for per-candidate matcher decisions.
// Purpose: Let callers audit why candidates were accepted or skipped.
// Dependencies: serde::{Deserialize, Serialize}, tracing, crate::{prefix, urn}
// ============================================================================

//! ## Overview
//! The matcher reports one [`MatchOutcome`] per candidate to a [`MatchTrace`]
//! hook. [`NoopTrace`] keeps the fast path free of work; [`TracingTrace`]
//! forwards outcomes as `tracing` events at `TRACE` level. Closures taking
//! `(candidate, request, outcome)` also work as hooks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::prefix::PrefixPolicy;
use crate::urn::Urn;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of evaluating one candidate against a request.
///
/// # Invariants
/// - Closed set; `PrefixMismatch` candidates are never returned as matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The candidate can handle the request.
    Matched,
    /// Same prefix, but a constraint was not met.
    Rejected,
    /// The candidate has a different prefix and was skipped.
    PrefixMismatch,
}

impl MatchOutcome {
    /// Returns a stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Rejected => "rejected",
            Self::PrefixMismatch => "prefix_mismatch",
        }
    }
}

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

/// Trace hook for candidate evaluation
pub trait MatchTrace<P: PrefixPolicy> {
    /// Called once per candidate, in input order.
    fn on_candidate_evaluated(&mut self, candidate: &Urn<P>, request: &Urn<P>, outcome: MatchOutcome);
}

/// No-op trace hook for fast paths
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl<P: PrefixPolicy> MatchTrace<P> for NoopTrace {
    fn on_candidate_evaluated(
        &mut self,
        _candidate: &Urn<P>,
        _request: &Urn<P>,
        _outcome: MatchOutcome,
    ) {
    }
}

/// Trace hook that emits one `tracing` event per candidate.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTrace;

impl<P: PrefixPolicy> MatchTrace<P> for TracingTrace {
    fn on_candidate_evaluated(&mut self, candidate: &Urn<P>, request: &Urn<P>, outcome: MatchOutcome) {
        tracing::trace!(
            candidate = %candidate,
            request = %request,
            outcome = outcome.as_str(),
            "evaluated tagged urn candidate"
        );
    }
}

impl<P, F> MatchTrace<P> for F
where
    P: PrefixPolicy,
    F: FnMut(&Urn<P>, &Urn<P>, MatchOutcome),
{
    fn on_candidate_evaluated(&mut self, candidate: &Urn<P>, request: &Urn<P>, outcome: MatchOutcome) {
        (self)(candidate, request, outcome);
    }
}
