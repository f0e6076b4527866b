// crates/tagged-urn/src/error.rs
// ============================================================================
// Module: Tagged URN Error Definitions
// Description: Structured diagnostics for URN parsing, validation, and relations.
// Purpose: Give every fallible construction and comparison an explicit failure.
// Dependencies: serde::{Serialize, Deserialize}, thiserror
// ============================================================================

//! ## Overview
//! Every failure in this crate is a local validation outcome: a rejected parse,
//! an invalid key or value handed to a constructor, or a comparison between
//! identifiers whose prefixes disagree. None of them leave partial state behind,
//! and the same input always yields the same error.

use std::convert::Infallible;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Errors produced while constructing or comparing tagged URNs.
///
/// # Invariants
/// - Variants are stable for programmatic handling; see [`TaggedUrnError::code`].
/// - Positions are byte offsets into the text being validated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TaggedUrnError {
    // ============================================================================
    // SECTION: Structural Errors
    // ============================================================================
    /// The text is not shaped like a tagged URN at all.
    #[error("invalid tagged urn format: {0}")]
    InvalidFormat(String),

    /// A tag segment between separators was empty.
    #[error("empty tag at position {position}")]
    EmptyTag {
        /// Byte offset of the empty segment.
        position: usize,
    },

    /// A character is not allowed where it appeared.
    #[error("invalid character `{character}` at position {position}")]
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// A tag is not of the form `key=value`.
    #[error("invalid tag format: {0}")]
    InvalidTagFormat(String),

    // ============================================================================
    // SECTION: Prefix Errors
    // ============================================================================
    /// No `:` separator was found.
    #[error("missing prefix: expected `prefix:` before the tag list")]
    MissingPrefix,

    /// The prefix before `:` was empty.
    #[error("prefix must not be empty")]
    EmptyPrefix,

    /// Two identifiers with different prefixes were compared or combined.
    #[error("prefix mismatch: expected `{expected}`, found `{actual}`")]
    PrefixMismatch {
        /// Prefix required by the left-hand side or the policy.
        expected: String,
        /// Prefix actually found.
        actual: String,
    },

    // ============================================================================
    // SECTION: Key Errors
    // ============================================================================
    /// The same key appeared more than once.
    #[error("duplicate tag key `{0}`")]
    DuplicateKey(String),

    /// A key starts with a digit and would read as a number.
    #[error("tag key `{0}` must not be numeric")]
    NumericKey(String),

    // ============================================================================
    // SECTION: Quoting Errors
    // ============================================================================
    /// A quoted value was never closed.
    #[error("unterminated quoted value starting at position {position}")]
    UnterminatedQuote {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A backslash inside quotes was followed by something other than `"` or `\`.
    #[error("invalid escape sequence `{sequence}` at position {position}")]
    InvalidEscapeSequence {
        /// The offending escape as written.
        sequence: String,
        /// Byte offset of the backslash.
        position: usize,
    },

    // ============================================================================
    // SECTION: Limit Errors
    // ============================================================================
    /// Input exceeded the configured size limit.
    #[error("input exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
}

impl TaggedUrnError {
    /// Returns the stable numeric code for this error kind.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::InvalidFormat(_) => 1,
            Self::EmptyTag {
                ..
            } => 2,
            Self::InvalidCharacter {
                ..
            } => 3,
            Self::InvalidTagFormat(_) => 4,
            Self::MissingPrefix => 5,
            Self::DuplicateKey(_) => 6,
            Self::NumericKey(_) => 7,
            Self::UnterminatedQuote {
                ..
            } => 8,
            Self::InvalidEscapeSequence {
                ..
            } => 9,
            Self::EmptyPrefix => 10,
            Self::PrefixMismatch {
                ..
            } => 11,
            Self::InputTooLarge {
                ..
            } => 12,
        }
    }

    /// Creates an invalid format error with a custom message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    /// Creates an invalid tag format error with a custom message.
    pub fn invalid_tag_format(message: impl Into<String>) -> Self {
        Self::InvalidTagFormat(message.into())
    }

    /// Creates a prefix mismatch error.
    pub fn prefix_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::PrefixMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

// ============================================================================
// SECTION: Conversion Helpers
// ============================================================================

// Fixed-prefix relations report `Infallible`; this lets them join `?` chains.
impl From<Infallible> for TaggedUrnError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// ============================================================================
// SECTION: Result Alias
// ============================================================================

/// Convenient Result type for tagged URN operations.
pub type UrnResult<T = ()> = Result<T, TaggedUrnError>;
