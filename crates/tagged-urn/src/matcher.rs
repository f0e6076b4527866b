// crates/tagged-urn/src/matcher.rs
// ============================================================================
// Module: Tagged URN Matcher
// Description: Best-match selection and ranking over identifier collections.
// Purpose: Answer "which registered capability handles this request best?"
// Dependencies: serde_json, tracing, crate::{prefix, relation, trace, urn}
// ============================================================================

//! ## Overview
//! Matching is a linear scan over a caller-supplied slice; nothing is cached or
//! indexed between calls. Results borrow from the input and are ranked by
//! [`Specificity::ranking_key`](crate::Specificity::ranking_key), most specific
//! first, with a stable sort so equally specific items keep their input order.
//!
//! Prefix handling:
//! - Items whose prefix differs from the request are skipped, not reported,
//!   since a collection may mix namespaces.
//! - A matcher created with [`UrnMatcher::expecting`] rejects a request whose
//!   prefix differs from the expected one.
//!
//! ### Example
//!
//! ```
//! use tagged_urn::TaggedUrn;
//! use tagged_urn::matcher::find_best_match;
//!
//! let caps = vec![
//!     TaggedUrn::parse("cap:op=?")?,
//!     TaggedUrn::parse("cap:op=generate")?,
//!     TaggedUrn::parse("cap:ext=pdf;op=generate")?,
//! ];
//! let request: TaggedUrn = "cap:op=generate;ext=pdf".parse()?;
//! let best = find_best_match(&caps, &request)?;
//! assert_eq!(best, Some(&caps[2]));
//! # Ok::<(), tagged_urn::TaggedUrnError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::config::MatchingConfig;
use crate::prefix::Prefix;
use crate::prefix::PrefixPolicy;
use crate::relation;
use crate::trace::MatchOutcome;
use crate::trace::MatchTrace;
use crate::trace::NoopTrace;
use crate::urn::Urn;

// ============================================================================
// SECTION: Match Context
// ============================================================================

/// Extra request context reserved for context-sensitive matching.
///
/// The baseline algorithm does not read it.
pub type MatchContext = BTreeMap<String, serde_json::Value>;

// ============================================================================
// SECTION: Matcher
// ============================================================================

/// Stateless matcher with an optional expected request prefix.
///
/// # Invariants
/// - Holds no data about previous calls; every lookup is independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrnMatcher<P: PrefixPolicy = Prefix> {
    /// Prefix every request must carry, if any.
    expected: Option<P>,
}

impl<P: PrefixPolicy> UrnMatcher<P> {
    /// Creates a matcher that accepts requests with any prefix.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            expected: None,
        }
    }

    /// Creates a matcher that requires requests to carry `prefix`.
    #[must_use]
    pub const fn expecting(prefix: P) -> Self {
        Self {
            expected: Some(prefix),
        }
    }

    /// Returns the expected request prefix, if any.
    #[must_use]
    pub const fn expected_prefix(&self) -> Option<&P> {
        self.expected.as_ref()
    }

    /// Returns every item that can handle `request`, most specific first.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when this matcher expects a prefix
    /// and the request carries a different one.
    pub fn find_all_matches<'a>(
        &self,
        items: &'a [Urn<P>],
        request: &Urn<P>,
    ) -> Result<Vec<&'a Urn<P>>, P::Mismatch> {
        self.find_all_matches_traced(items, request, &mut NoopTrace)
    }

    /// Same as [`UrnMatcher::find_all_matches`], reporting every candidate to
    /// `trace`.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when this matcher expects a prefix
    /// and the request carries a different one.
    pub fn find_all_matches_traced<'a, T>(
        &self,
        items: &'a [Urn<P>],
        request: &Urn<P>,
        trace: &mut T,
    ) -> Result<Vec<&'a Urn<P>>, P::Mismatch>
    where
        T: MatchTrace<P>,
    {
        if let Some(expected) = &self.expected {
            expected.ensure_same(request.prefix())?;
        }
        let mut matched = Vec::new();
        for item in items {
            let outcome = evaluate(item, request);
            trace.on_candidate_evaluated(item, request, outcome);
            if outcome == MatchOutcome::Matched {
                matched.push(item);
            }
        }
        rank(&mut matched);
        tracing::debug!(
            request = %request,
            candidates = items.len(),
            matched = matched.len(),
            "resolved tagged urn matches"
        );
        Ok(matched)
    }

    /// Returns the most specific item that can handle `request`.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when this matcher expects a prefix
    /// and the request carries a different one.
    pub fn find_best_match<'a>(
        &self,
        items: &'a [Urn<P>],
        request: &Urn<P>,
    ) -> Result<Option<&'a Urn<P>>, P::Mismatch> {
        Ok(self.find_all_matches(items, request)?.into_iter().next())
    }
}

impl UrnMatcher<Prefix> {
    /// Creates a matcher from the `[matching]` configuration section.
    #[must_use]
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            expected: config.expected_prefix.clone(),
        }
    }
}

impl<P: PrefixPolicy> Default for UrnMatcher<P> {
    fn default() -> Self {
        Self::any()
    }
}

// ============================================================================
// SECTION: Free Functions
// ============================================================================

/// Returns the items ordered most specific first.
///
/// Items are ranked by weighted score, then by the
/// `(exact, must_have_any, must_not)` counts. This differs from
/// [`Urn::is_more_specific_than`], which compares the counts alone. The sort is
/// stable: items with equal specificity keep their input order.
#[must_use]
pub fn sort_by_specificity<P: PrefixPolicy>(items: &[Urn<P>]) -> Vec<&Urn<P>> {
    let mut sorted: Vec<&Urn<P>> = items.iter().collect();
    rank(&mut sorted);
    sorted
}

/// Returns every item that can handle `request`, most specific first.
///
/// Items with a different prefix than `request` are skipped.
///
/// # Errors
///
/// Never fails for a matcher without an expected prefix; the signature keeps
/// the policy error type so callers can switch to [`UrnMatcher::expecting`].
pub fn find_all_matches<'a, P: PrefixPolicy>(
    items: &'a [Urn<P>],
    request: &Urn<P>,
) -> Result<Vec<&'a Urn<P>>, P::Mismatch> {
    UrnMatcher::any().find_all_matches(items, request)
}

/// Returns the most specific item that can handle `request`.
///
/// # Errors
///
/// See [`find_all_matches`].
pub fn find_best_match<'a, P: PrefixPolicy>(
    items: &'a [Urn<P>],
    request: &Urn<P>,
) -> Result<Option<&'a Urn<P>>, P::Mismatch> {
    UrnMatcher::any().find_best_match(items, request)
}

/// Returns true if `item` can handle `request`.
///
/// `context` is accepted for context-sensitive matching and is currently not
/// consulted.
///
/// # Errors
///
/// Returns the policy mismatch error when the prefixes differ.
pub fn conforms_to_request<P: PrefixPolicy>(
    item: &Urn<P>,
    request: &Urn<P>,
    _context: Option<&MatchContext>,
) -> Result<bool, P::Mismatch> {
    item.can_handle(request)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Classifies one candidate against the request.
fn evaluate<P: PrefixPolicy>(item: &Urn<P>, request: &Urn<P>) -> MatchOutcome {
    if item.prefix() != request.prefix() {
        MatchOutcome::PrefixMismatch
    } else if relation::conforms(item.tags(), request.tags()) {
        MatchOutcome::Matched
    } else {
        MatchOutcome::Rejected
    }
}

/// Stable sort, most specific first.
fn rank<P: PrefixPolicy>(items: &mut [&Urn<P>]) {
    items.sort_by_key(|urn| Reverse(urn.specificity_tuple().ranking_key()));
}
