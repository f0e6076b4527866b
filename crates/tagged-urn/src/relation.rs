// crates/tagged-urn/src/relation.rs
// ============================================================================
// Module: Tag Relations
// Description: Conformance and compatibility over tag sets.
// Purpose: Hold the wildcard algebra once, independent of prefix handling.
// Dependencies: crate::tag
// ============================================================================

//! ## Overview
//! Two relations drive matching:
//! - **Conformance** is directional: a concrete *candidate* satisfies every
//!   constraint of a *pattern*. Keys the pattern does not mention never block.
//! - **Compatibility** is symmetric: no key present on both sides carries
//!   contradictory constraints.
//!
//! | Pattern value | Satisfied when the candidate... |
//! |---|---|
//! | `?` | always |
//! | `*` | has the key, with any value |
//! | `!` | lacks the key |
//! | exact `v` | has the key with exact value `v` |

use crate::tag::TagSet;
use crate::tag::TagValue;

// ============================================================================
// SECTION: Conformance
// ============================================================================

/// Returns true if `candidate` satisfies every constraint in `pattern`.
#[must_use]
pub fn conforms(pattern: &TagSet, candidate: &TagSet) -> bool {
    pattern.iter().all(|(key, constraint)| satisfies(constraint, candidate.get(key.as_str())))
}

/// Returns true if `actual` (the candidate's value, if any) satisfies
/// `constraint`.
#[must_use]
pub fn satisfies(constraint: &TagValue, actual: Option<&TagValue>) -> bool {
    match constraint {
        TagValue::Unspecified => true,
        TagValue::MustHaveAny => actual.is_some(),
        TagValue::MustNotHave => actual.is_none(),
        TagValue::Exact(expected) => {
            matches!(actual, Some(TagValue::Exact(value)) if value == expected)
        }
    }
}

// ============================================================================
// SECTION: Compatibility
// ============================================================================

/// Returns true if no key shared by `left` and `right` carries contradictory
/// constraints.
#[must_use]
pub fn compatible(left: &TagSet, right: &TagSet) -> bool {
    left.iter().all(|(key, lhs)| {
        right.get(key.as_str()).is_none_or(|rhs| values_compatible(lhs, rhs))
    })
}

/// Pairwise compatibility of two values stored under the same key.
///
/// `?` and `*` never conflict, `!` only agrees with `!`, and two exact values
/// must be equal.
#[must_use]
pub fn values_compatible(lhs: &TagValue, rhs: &TagValue) -> bool {
    match (lhs, rhs) {
        (TagValue::Unspecified | TagValue::MustHaveAny, _)
        | (_, TagValue::Unspecified | TagValue::MustHaveAny)
        | (TagValue::MustNotHave, TagValue::MustNotHave) => true,
        (TagValue::MustNotHave, TagValue::Exact(_)) | (TagValue::Exact(_), TagValue::MustNotHave) => {
            false
        }
        (TagValue::Exact(lhs), TagValue::Exact(rhs)) => lhs == rhs,
    }
}
