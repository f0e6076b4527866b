// crates/tagged-urn/src/urn.rs
// ============================================================================
// Module: Tagged URN Value Type
// Description: Immutable prefix + tag set identifier with matching relations.
// Purpose: Provide the core value that capabilities and requests are expressed in.
// Dependencies: serde, crate::{error, grammar, prefix, relation, specificity, tag}
// ============================================================================

//! ## Overview
//! [`Urn`] is an immutable value: every structural edit (`with_tag`,
//! `without_tag`, `subset`, `merge`, ...) returns a new identifier and leaves
//! the original untouched, so identifiers can be shared freely across threads.
//!
//! Equality, hashing and ordering look at the prefix and the tag set; tag
//! insertion order never matters.
//!
//! ### Example
//!
//! ```
//! use tagged_urn::TaggedUrn;
//!
//! let capability: TaggedUrn = "cap:op=*;format=?".parse()?;
//! let request: TaggedUrn = "cap:op=generate;format=en".parse()?;
//! assert!(capability.can_handle(&request)?);
//! assert!(request.matches(&capability)?);
//! # Ok::<(), tagged_urn::TaggedUrnError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::error::TaggedUrnError;
use crate::error::UrnResult;
use crate::grammar;
use crate::grammar::ParseLimits;
use crate::prefix::Fixed;
use crate::prefix::FixedPrefix;
use crate::prefix::Prefix;
use crate::prefix::PrefixPolicy;
use crate::relation;
use crate::specificity::Specificity;
use crate::tag::TagKey;
use crate::tag::TagSet;
use crate::tag::TagValue;
use crate::tag::UNSPECIFIED;

// ============================================================================
// SECTION: Identifier Type
// ============================================================================

/// Flat, tag-based identifier: a prefix plus a set of `key=value` tags.
///
/// # Invariants
/// - The prefix and every key satisfy the token grammar.
/// - Keys are unique; values are stored unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Urn<P: PrefixPolicy = Prefix> {
    /// Prefix policy value.
    prefix: P,
    /// Tags keyed and ordered by key.
    tags: TagSet,
}

/// Identifier whose prefix is chosen at runtime.
pub type TaggedUrn = Urn<Prefix>;

// ============================================================================
// SECTION: Construction
// ============================================================================

impl<P: PrefixPolicy> Urn<P> {
    /// Parses an identifier with the default [`ParseLimits`].
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] when the text violates the grammar or the
    /// prefix is not accepted by the policy.
    pub fn parse(input: &str) -> UrnResult<Self> {
        Self::parse_with_limits(input, &ParseLimits::default())
    }

    /// Parses an identifier under explicit resource limits.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError::InputTooLarge`] when the input exceeds the
    /// limits, and any grammar or prefix error otherwise.
    pub fn parse_with_limits(input: &str, limits: &ParseLimits) -> UrnResult<Self> {
        let parsed = grammar::parse(input, limits)?;
        Ok(Self {
            prefix: P::from_text(parsed.prefix)?,
            tags: parsed.tags,
        })
    }

    /// Builds an identifier from prefix text and raw `(key, value)` pairs.
    ///
    /// Bare sentinels (`*`, `!`, `?`) in values are read as wildcards.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] for an invalid prefix or key, and
    /// [`TaggedUrnError::DuplicateKey`] when a key repeats.
    pub fn from_prefix_and_tags<I, K, V>(prefix: &str, tags: I) -> UrnResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let prefix = P::from_text(prefix)?;
        let mut set = TagSet::new();
        for (key, value) in tags {
            let key = TagKey::new(key.as_ref())?;
            if set.contains_key(key.as_str()) {
                return Err(TaggedUrnError::DuplicateKey(key.into_string()));
            }
            set.insert(key, TagValue::from_raw(value.as_ref()));
        }
        Ok(Self {
            prefix,
            tags: set,
        })
    }

    /// Builds an identifier from already validated parts.
    #[must_use]
    pub const fn from_parts(prefix: P, tags: TagSet) -> Self {
        Self {
            prefix,
            tags,
        }
    }

    /// Creates an identifier with no tags.
    #[must_use]
    pub const fn empty_with_prefix(prefix: P) -> Self {
        Self::from_parts(prefix, TagSet::new())
    }
}

impl<F: FixedPrefix> Urn<Fixed<F>> {
    /// Creates a fixed-prefix identifier with no tags.
    #[must_use]
    pub const fn empty() -> Self {
        Self::empty_with_prefix(Fixed::new())
    }

    /// Builds a fixed-prefix identifier from raw `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] for an invalid or duplicate key.
    pub fn from_tags<I, K, V>(tags: I) -> UrnResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_prefix_and_tags(F::PREFIX, tags)
    }
}

// ============================================================================
// SECTION: Accessors
// ============================================================================

impl<P: PrefixPolicy> Urn<P> {
    /// Returns the prefix policy value.
    #[must_use]
    pub const fn prefix(&self) -> &P {
        &self.prefix
    }

    /// Returns the prefix text.
    #[must_use]
    pub fn prefix_str(&self) -> &str {
        self.prefix.as_str()
    }

    /// Returns the tag set.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get_tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// Returns true if `key` is stored with exactly the raw text `value`.
    ///
    /// This is a storage lookup, not a wildcard match: `has_tag("op", "*")` is
    /// true only when the stored value spells `*`.
    #[must_use]
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tags.get(key).is_some_and(|stored| stored.as_str() == value)
    }

    /// Returns the weighted specificity score.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.tags.specificity().score()
    }

    /// Returns the per-class specificity counts.
    #[must_use]
    pub fn specificity_tuple(&self) -> Specificity {
        self.tags.specificity()
    }
}

// ============================================================================
// SECTION: Structural Edits
// ============================================================================

impl<P: PrefixPolicy> Urn<P> {
    /// Returns a copy with `key` set to `value`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] when `key` is not a valid tag key.
    pub fn with_tag(&self, key: &str, value: &str) -> UrnResult<Self> {
        Ok(self.with_tag_value(TagKey::new(key)?, TagValue::from_raw(value)))
    }

    /// Returns a copy with an already validated tag set.
    #[must_use]
    pub fn with_tag_value(&self, key: TagKey, value: TagValue) -> Self {
        let mut tags = self.tags.clone();
        tags.insert(key, value);
        Self::from_parts(self.prefix.clone(), tags)
    }

    /// Returns a copy without `key`; absent keys are not an error.
    #[must_use]
    pub fn without_tag(&self, key: &str) -> Self {
        let mut tags = self.tags.clone();
        tags.remove(key);
        Self::from_parts(self.prefix.clone(), tags)
    }

    /// Returns a copy with `key` set to `?`.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] when `key` is not a valid tag key.
    pub fn with_wildcard_tag(&self, key: &str) -> UrnResult<Self> {
        self.with_tag(key, UNSPECIFIED)
    }

    /// Returns a copy keeping only the listed keys; unknown keys are ignored.
    #[must_use]
    pub fn subset<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let tags = keys
            .into_iter()
            .filter_map(|key| {
                self.tags.get_key_value(key.as_ref()).map(|(key, value)| (key.clone(), value.clone()))
            })
            .collect();
        Self::from_parts(self.prefix.clone(), tags)
    }

    /// Returns the union of both tag sets; `other` wins on shared keys.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when the prefixes differ.
    pub fn merge(&self, other: &Self) -> Result<Self, P::Mismatch> {
        self.prefix.ensure_same(&other.prefix)?;
        let mut tags = self.tags.clone();
        tags.extend(other.tags.iter().map(|(key, value)| (key.clone(), value.clone())));
        Ok(Self::from_parts(self.prefix.clone(), tags))
    }
}

// ============================================================================
// SECTION: Relations
// ============================================================================

impl<P: PrefixPolicy> Urn<P> {
    /// Returns true if `request` conforms to `self` used as a pattern.
    ///
    /// `self` is the capability (it may carry wildcards); `request` is the
    /// concrete ask.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when the prefixes differ.
    pub fn can_handle(&self, request: &Self) -> Result<bool, P::Mismatch> {
        self.prefix.ensure_same(&request.prefix)?;
        Ok(relation::conforms(&self.tags, &request.tags))
    }

    /// Returns true if `self` conforms to `pattern`.
    ///
    /// Equivalent to `pattern.can_handle(self)`.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when the prefixes differ.
    pub fn matches(&self, pattern: &Self) -> Result<bool, P::Mismatch> {
        pattern.can_handle(self)
    }

    /// Returns true if `self` has a lexicographically greater
    /// `(exact, must_have_any, must_not)` tuple than `other`.
    ///
    /// This compares the counts only. The matcher ranks by weighted score
    /// first (see [`sort_by_specificity`](crate::matcher::sort_by_specificity)),
    /// so one exact tag is more specific here than two `*` tags but ranks
    /// below them in a match list.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when the prefixes differ.
    pub fn is_more_specific_than(&self, other: &Self) -> Result<bool, P::Mismatch> {
        self.prefix.ensure_same(&other.prefix)?;
        Ok(self.specificity_tuple() > other.specificity_tuple())
    }

    /// Returns true if no shared key carries contradictory constraints.
    ///
    /// # Errors
    ///
    /// Returns the policy mismatch error when the prefixes differ.
    pub fn is_compatible_with(&self, other: &Self) -> Result<bool, P::Mismatch> {
        self.prefix.ensure_same(&other.prefix)?;
        Ok(relation::compatible(&self.tags, &other.tags))
    }
}

// ============================================================================
// SECTION: Text Conversions
// ============================================================================

impl<P: PrefixPolicy> fmt::Display for Urn<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grammar::write_urn(f, self.prefix.as_str(), &self.tags)
    }
}

impl<P: PrefixPolicy> FromStr for Urn<P> {
    type Err = TaggedUrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<P: PrefixPolicy> TryFrom<&str> for Urn<P> {
    type Error = TaggedUrnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

// ============================================================================
// SECTION: Serde Support
// ============================================================================

impl<P: PrefixPolicy> Serialize for Urn<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, P: PrefixPolicy> Deserialize<'de> for Urn<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
