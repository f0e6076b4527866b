// crates/tagged-urn/src/builder.rs
// ============================================================================
// Module: Tagged URN Builder
// Description: Fluent, scoped accumulator for tagged URN construction.
// Purpose: Provide an ergonomic alternative to parsing text.
// Dependencies: crate::{error, prefix, tag, urn}
// ============================================================================

//! ## Overview
//! The builder validates each tag as it is added, so by the time
//! [`UrnBuilder::build`] runs only the "at least one tag" rule is left to check.
//! It is consumed by value on every call and is meant to be used in one place
//! and then dropped.
//!
//! ```
//! use tagged_urn::TaggedUrnBuilder;
//!
//! let urn = TaggedUrnBuilder::with_prefix("cap")?
//!     .tag("op", "generate")?
//!     .tag("ext", "pdf")?
//!     .build()?;
//! assert_eq!(urn.to_string(), "cap:ext=pdf;op=generate");
//! # Ok::<(), tagged_urn::TaggedUrnError>(())
//! ```

use crate::error::TaggedUrnError;
use crate::error::UrnResult;
use crate::prefix::Fixed;
use crate::prefix::FixedPrefix;
use crate::prefix::Prefix;
use crate::prefix::PrefixPolicy;
use crate::tag::TagKey;
use crate::tag::TagSet;
use crate::tag::TagValue;
use crate::urn::Urn;

// ============================================================================
// SECTION: Fluent Builder API
// ============================================================================

/// Fluent builder for tagged URNs.
///
/// # Type Parameter
/// * `P` - The prefix policy of the identifier being built
#[derive(Debug, Clone)]
pub struct UrnBuilder<P: PrefixPolicy = Prefix> {
    /// Prefix of the identifier under construction.
    prefix: P,
    /// Tags accumulated so far.
    tags: TagSet,
}

/// Builder for identifiers whose prefix is chosen at runtime.
pub type TaggedUrnBuilder = UrnBuilder<Prefix>;

impl<P: PrefixPolicy> UrnBuilder<P> {
    /// Creates a builder for the given prefix.
    #[must_use]
    pub const fn new(prefix: P) -> Self {
        Self {
            prefix,
            tags: TagSet::new(),
        }
    }

    /// Creates a builder from prefix text.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] when the prefix is not accepted by the policy.
    pub fn with_prefix(prefix: &str) -> UrnResult<Self> {
        Ok(Self::new(P::from_text(prefix)?))
    }

    /// Adds or overwrites a tag from raw text.
    ///
    /// Bare sentinels in `value` are read as wildcards.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] when `key` is not a valid tag key.
    pub fn tag(self, key: &str, value: &str) -> UrnResult<Self> {
        Ok(self.tag_value(TagKey::new(key)?, TagValue::from_raw(value)))
    }

    /// Adds or overwrites an already validated tag.
    #[must_use]
    pub fn tag_value(mut self, key: TagKey, value: TagValue) -> Self {
        self.tags.insert(key, value);
        self
    }

    /// Returns the number of tags added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true when no tags have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Builds the identifier, requiring at least one tag.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError::InvalidFormat`] when no tags were added.
    pub fn build(self) -> UrnResult<Urn<P>> {
        if self.tags.is_empty() {
            return Err(TaggedUrnError::invalid_format("tagged urn requires at least one tag"));
        }
        Ok(self.build_allow_empty())
    }

    /// Builds the identifier, accepting an empty tag set.
    #[must_use]
    pub fn build_allow_empty(self) -> Urn<P> {
        Urn::from_parts(self.prefix, self.tags)
    }
}

// ============================================================================
// SECTION: Default Implementations
// ============================================================================

impl<F: FixedPrefix> Default for UrnBuilder<Fixed<F>> {
    fn default() -> Self {
        Self::new(Fixed::new())
    }
}
