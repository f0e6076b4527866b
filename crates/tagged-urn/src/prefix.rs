// crates/tagged-urn/src/prefix.rs
// ============================================================================
// Module: Prefix Policies
// Description: Runtime-checked and compile-time-fixed URN prefixes.
// Purpose: Share one matching algebra between the general engine and
//          fixed-prefix specializations.
// Dependencies: serde, crate::{error, grammar}
// ============================================================================

//! ## Overview
//! Every [`Urn`](crate::Urn) is parameterized by a [`PrefixPolicy`]:
//! - [`Prefix`] stores a validated prefix string. Two identifiers may disagree,
//!   so pairwise operations report [`TaggedUrnError::PrefixMismatch`].
//! - [`Fixed<F>`] is zero-sized and always spells [`FixedPrefix::PREFIX`].
//!   Pairwise operations cannot mismatch, which the policy expresses by using
//!   [`Infallible`] as its mismatch type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::TaggedUrnError;
use crate::error::UrnResult;
use crate::grammar;
use crate::grammar::TokenRole;

// ============================================================================
// SECTION: Policy Trait
// ============================================================================

/// Decides how an identifier stores its prefix and whether two prefixes can
/// disagree.
pub trait PrefixPolicy:
    Clone + fmt::Debug + PartialEq + Eq + Hash + PartialOrd + Ord + Send + Sync + 'static
{
    /// Error returned when two prefixes disagree.
    type Mismatch: Error + Into<TaggedUrnError>;

    /// Returns the prefix text.
    fn as_str(&self) -> &str;

    /// Builds the policy value from prefix text.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError`] when the text is not an acceptable prefix.
    fn from_text(prefix: &str) -> UrnResult<Self>;

    /// Ensures `other` carries the same prefix as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixPolicy::Mismatch`] when the prefixes differ.
    fn ensure_same(&self, other: &Self) -> Result<(), Self::Mismatch>;
}

// ============================================================================
// SECTION: Runtime Prefix
// ============================================================================

/// Validated prefix chosen at runtime.
///
/// # Invariants
/// - Matches `[A-Za-z][A-Za-z0-9_-]*`; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(String);

impl Prefix {
    /// Validates and wraps a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedUrnError::EmptyPrefix`] for an empty prefix and
    /// [`TaggedUrnError::InvalidCharacter`] for grammar violations.
    pub fn new(prefix: impl Into<String>) -> UrnResult<Self> {
        let prefix = prefix.into();
        grammar::check_token(&prefix, 0, TokenRole::Prefix)?;
        Ok(Self(prefix))
    }

    /// Returns the prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PrefixPolicy for Prefix {
    type Mismatch = TaggedUrnError;

    fn as_str(&self) -> &str {
        &self.0
    }

    fn from_text(prefix: &str) -> UrnResult<Self> {
        Self::new(prefix)
    }

    fn ensure_same(&self, other: &Self) -> Result<(), Self::Mismatch> {
        if self == other {
            Ok(())
        } else {
            Err(TaggedUrnError::prefix_mismatch(self.as_str(), other.as_str()))
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Prefix {
    type Err = TaggedUrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Prefix {
    type Error = TaggedUrnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.0
    }
}

// ============================================================================
// SECTION: Fixed Prefix
// ============================================================================

/// Marker trait naming a prefix known at compile time.
///
/// Implementors must choose a `PREFIX` that satisfies the prefix grammar.
pub trait FixedPrefix:
    Clone + Copy + fmt::Debug + Default + PartialEq + Eq + Hash + PartialOrd + Ord + Send + Sync + 'static
{
    /// The literal prefix.
    const PREFIX: &'static str;
}

/// Prefix policy bound to the compile-time constant `F::PREFIX`.
///
/// # Invariants
/// - Zero-sized; every value spells the same prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fixed<F>(PhantomData<F>);

impl<F: FixedPrefix> Fixed<F> {
    /// Returns the (only) policy value.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<F: FixedPrefix> PrefixPolicy for Fixed<F> {
    type Mismatch = Infallible;

    fn as_str(&self) -> &str {
        F::PREFIX
    }

    fn from_text(prefix: &str) -> UrnResult<Self> {
        if prefix == F::PREFIX {
            Ok(Self::new())
        } else {
            Err(TaggedUrnError::prefix_mismatch(F::PREFIX, prefix))
        }
    }

    fn ensure_same(&self, _other: &Self) -> Result<(), Self::Mismatch> {
        Ok(())
    }
}
