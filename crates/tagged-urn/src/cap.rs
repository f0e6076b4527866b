// crates/tagged-urn/src/cap.rs
// ============================================================================
// Module: Capability URNs
// Description: The `cap:` specialization of the tagged URN engine.
// Purpose: Give capability registries a prefix-safe identifier type.
// Dependencies: crate::{builder, matcher, prefix, urn}
// ============================================================================

//! ## Overview
//! [`CapUrn`] is a [`Urn`] whose prefix is fixed to `cap` at compile time.
//! Parsing still checks the prefix, but pairwise operations between two
//! capability URNs cannot disagree on it, so the cap-level helpers here return
//! plain values instead of results.
//!
//! ```
//! use tagged_urn::cap::CapUrn;
//! use tagged_urn::cap::find_best_cap;
//!
//! let caps = vec![
//!     CapUrn::parse("cap:op=*")?,
//!     CapUrn::parse("cap:op=extract;target=metadata")?,
//! ];
//! let request = CapUrn::parse("cap:op=extract;target=metadata")?;
//! assert_eq!(find_best_cap(&caps, &request), Some(&caps[1]));
//! # Ok::<(), tagged_urn::TaggedUrnError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::builder::UrnBuilder;
use crate::matcher::UrnMatcher;
use crate::prefix::Fixed;
use crate::prefix::FixedPrefix;
use crate::urn::Urn;

// ============================================================================
// SECTION: Cap Prefix
// ============================================================================

/// Prefix text shared by every capability URN.
pub const CAP_PREFIX: &str = "cap";

/// Marker for the `cap` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cap;

impl FixedPrefix for Cap {
    const PREFIX: &'static str = CAP_PREFIX;
}

/// Capability identifier with the prefix fixed to `cap`.
pub type CapUrn = Urn<Fixed<Cap>>;
/// Builder for [`CapUrn`].
pub type CapUrnBuilder = UrnBuilder<Fixed<Cap>>;
/// Matcher over [`CapUrn`] collections.
pub type CapMatcher = UrnMatcher<Fixed<Cap>>;

// ============================================================================
// SECTION: Cap Helpers
// ============================================================================

/// Returns every capability that can handle `request`, most specific first.
#[must_use]
pub fn find_all_caps<'a>(caps: &'a [CapUrn], request: &CapUrn) -> Vec<&'a CapUrn> {
    let Ok(matches) = CapMatcher::any().find_all_matches(caps, request);
    matches
}

/// Returns the most specific capability that can handle `request`.
#[must_use]
pub fn find_best_cap<'a>(caps: &'a [CapUrn], request: &CapUrn) -> Option<&'a CapUrn> {
    find_all_caps(caps, request).into_iter().next()
}

/// Returns true if `cap` can handle `request`.
#[must_use]
pub fn cap_handles(cap: &CapUrn, request: &CapUrn) -> bool {
    let Ok(handles) = cap.can_handle(request);
    handles
}
