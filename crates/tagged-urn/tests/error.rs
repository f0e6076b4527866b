// crates/tagged-urn/tests/error.rs
// ============================================================================
// Module: Tagged URN Error Tests
// Description: Regression coverage for `TaggedUrnError` behaviors.
// Purpose: Keep codes, messages, and serialization stable for callers that
//          branch on them.
// Dependencies: serde_json, tagged_urn::error
// ============================================================================
//! ## Overview
//! Integration tests for error codes, display text, and serde contracts.

mod support;

use std::collections::BTreeSet;

use support::TestResult;
use support::ensure;
use tagged_urn::TaggedUrnError;

/// One instance of every error variant.
fn all_errors() -> Vec<TaggedUrnError> {
    vec![
        TaggedUrnError::invalid_format("empty"),
        TaggedUrnError::EmptyTag {
            position: 4,
        },
        TaggedUrnError::InvalidCharacter {
            character: ' ',
            position: 8,
        },
        TaggedUrnError::invalid_tag_format("missing `=`"),
        TaggedUrnError::MissingPrefix,
        TaggedUrnError::DuplicateKey("op".to_string()),
        TaggedUrnError::NumericKey("5x".to_string()),
        TaggedUrnError::UnterminatedQuote {
            position: 7,
        },
        TaggedUrnError::InvalidEscapeSequence {
            sequence: r"\n".to_string(),
            position: 9,
        },
        TaggedUrnError::EmptyPrefix,
        TaggedUrnError::prefix_mismatch("cap", "media"),
        TaggedUrnError::InputTooLarge {
            max_bytes: 16,
            actual_bytes: 17,
        },
    ]
}

#[test]
fn codes_are_unique_and_sequential() -> TestResult {
    let codes: Vec<u16> = all_errors().iter().map(TaggedUrnError::code).collect();
    ensure(codes == (1 ..= 12).collect::<Vec<u16>>(), "codes should run 1 through 12")?;
    let unique: BTreeSet<u16> = codes.iter().copied().collect();
    ensure(unique.len() == codes.len(), "codes must be unique")?;
    Ok(())
}

#[test]
fn display_messages_carry_details() -> TestResult {
    let err = TaggedUrnError::InvalidCharacter {
        character: ';',
        position: 3,
    };
    ensure(err.to_string() == "invalid character `;` at position 3", "character message")?;
    let err = TaggedUrnError::prefix_mismatch("cap", "media");
    ensure(
        err.to_string() == "prefix mismatch: expected `cap`, found `media`",
        "prefix mismatch message",
    )?;
    let err = TaggedUrnError::NumericKey("5x".to_string());
    ensure(err.to_string().contains("5x"), "numeric key message names the key")?;
    Ok(())
}

#[test]
fn errors_serialize_round_trip() -> TestResult {
    for err in all_errors() {
        let json = serde_json::to_string(&err)?;
        let back: TaggedUrnError = serde_json::from_str(&json)?;
        ensure(back == err, format!("`{err}` should survive json"))?;
    }
    Ok(())
}

#[test]
fn infallible_converts_into_error() -> TestResult {
    let ok: Result<u8, std::convert::Infallible> = Ok(1);
    let converted: Result<u8, TaggedUrnError> = ok.map_err(TaggedUrnError::from);
    ensure(converted == Ok(1), "infallible results convert without loss")?;
    Ok(())
}
