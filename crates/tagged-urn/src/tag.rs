// crates/tagged-urn/src/tag.rs
// ============================================================================
// Module: Tag Primitives
// Description: Validated tag keys, wildcard-aware tag values, and tag sets.
// Purpose: Make invalid keys unrepresentable outside validated entry points.
// Dependencies: crate::{error, grammar, specificity}
// ============================================================================

//! ## Overview
//! A tag is a `key=value` pair. Keys are validated identifier tokens wrapped in
//! [`TagKey`]; values are classified once, at construction, into a
//! [`TagValue`] so the matching algebra never re-inspects raw strings.
//!
//! Bare sentinels (`*`, `!`, `?`) become wildcard variants. A literal value that
//! happens to spell a sentinel is an [`TagValue::Exact`] and always serializes
//! quoted, which keeps the two apart on the wire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;

use crate::error::TaggedUrnError;
use crate::error::UrnResult;
use crate::grammar;
use crate::grammar::TokenRole;
use crate::specificity::Specificity;

// ============================================================================
// SECTION: Sentinels
// ============================================================================

/// Sentinel text for "key must be present with any value".
pub const MUST_HAVE_ANY: &str = "*";
/// Sentinel text for "key must be absent".
pub const MUST_NOT_HAVE: &str = "!";
/// Sentinel text for "no constraint".
pub const UNSPECIFIED: &str = "?";

// ============================================================================
// SECTION: Tag Key
// ============================================================================

/// Validated tag key.
///
/// # Invariants
/// - Matches `[A-Za-z][A-Za-z0-9_-]*`, so it never reads as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey(String);

impl TagKey {
    /// Validates and wraps a tag key.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError::NumericKey`] when the key starts with a digit,
    /// [`TaggedUrnError::InvalidTagFormat`] when it is empty, and
    /// [`TaggedUrnError::InvalidCharacter`] for any other grammar violation.
    pub fn new(key: impl Into<String>) -> UrnResult<Self> {
        let key = key.into();
        grammar::check_token(&key, 0, TokenRole::Key)?;
        Ok(Self(key))
    }

    /// Wraps a key the parser has already validated.
    pub(crate) const fn from_validated(key: String) -> Self {
        Self(key)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for TagKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TagKey {
    type Err = TaggedUrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// SECTION: Tag Value
// ============================================================================

/// Tag value classified into the four matching classes.
///
/// # Invariants
/// - `Exact` holds the logical value, never the quoted wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagValue {
    /// The counterpart must carry exactly this value.
    Exact(String),
    /// The counterpart must carry the key, with any value (`*`).
    MustHaveAny,
    /// The counterpart must not carry the key (`!`).
    MustNotHave,
    /// No constraint on the key (`?`).
    Unspecified,
}

impl TagValue {
    /// Classifies raw text, treating the bare sentinels as wildcards.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            MUST_HAVE_ANY => Self::MustHaveAny,
            MUST_NOT_HAVE => Self::MustNotHave,
            UNSPECIFIED => Self::Unspecified,
            _ => Self::Exact(raw.to_string()),
        }
    }

    /// Creates an exact value, even when the text spells a sentinel.
    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into())
    }

    /// Returns the raw stored text (the sentinel for wildcards).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(value) => value,
            Self::MustHaveAny => MUST_HAVE_ANY,
            Self::MustNotHave => MUST_NOT_HAVE,
            Self::Unspecified => UNSPECIFIED,
        }
    }

    /// Returns true for `*`, `!`, and `?`.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grammar::write_value(f, self)
    }
}

// ============================================================================
// SECTION: Tag Set
// ============================================================================

/// Key-ordered set of tags.
///
/// # Invariants
/// - Keys are unique; iteration is ascending by key, which is the canonical
///   serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagSet {
    /// Tag entries ordered by key.
    entries: BTreeMap<TagKey, TagValue>,
}

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries.get(key)
    }

    /// Looks up the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &str) -> Option<(&TagKey, &TagValue)> {
        self.entries.get_key_value(key)
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites a tag, returning the previous value.
    pub fn insert(&mut self, key: TagKey, value: TagValue) -> Option<TagValue> {
        self.entries.insert(key, value)
    }

    /// Removes a tag, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.entries.remove(key)
    }

    /// Iterates tags in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, TagKey, TagValue> {
        self.entries.iter()
    }

    /// Iterates keys in ascending order.
    pub fn keys(&self) -> btree_map::Keys<'_, TagKey, TagValue> {
        self.entries.keys()
    }

    /// Counts each value class.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.entries.values().collect()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type IntoIter = btree_map::Iter<'a, TagKey, TagValue>;
    type Item = (&'a TagKey, &'a TagValue);

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(TagKey, TagValue)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (TagKey, TagValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(TagKey, TagValue)> for TagSet {
    fn extend<I: IntoIterator<Item = (TagKey, TagValue)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
