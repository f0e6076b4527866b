// crates/tagged-urn/tests/config.rs
// ============================================================================
// Module: Configuration Tests
// Description: TOML loading and validation for matcher and parser settings.
// Purpose: Ensure configuration fails closed and feeds the matcher and parser.
// Dependencies: tempfile, tagged_urn
// ============================================================================
//! ## Overview
//! Integration tests for [`tagged_urn::UrnConfig`].

mod support;

use std::fs;

use support::TestResult;
use support::ensure;
use support::urns;
use tagged_urn::ConfigError;
use tagged_urn::Prefix;
use tagged_urn::TaggedUrn;
use tagged_urn::TaggedUrnError;
use tagged_urn::UrnConfig;
use tagged_urn::config::MAX_CONFIG_FILE_SIZE;
use tagged_urn::config::MAX_CONFIGURED_INPUT_BYTES;
use tagged_urn::grammar::MAX_INPUT_BYTES;

// ============================================================================
// SECTION: Parsing Text
// ============================================================================

#[test]
fn empty_document_uses_defaults() -> TestResult {
    let config = UrnConfig::from_toml_str("")?;
    ensure(config == UrnConfig::default(), "empty document equals defaults")?;
    ensure(config.matching.expected_prefix.is_none(), "no expected prefix by default")?;
    ensure(config.limits().max_input_bytes == MAX_INPUT_BYTES, "default parse limit")?;
    Ok(())
}

#[test]
fn full_document_is_applied() -> TestResult {
    let config = UrnConfig::from_toml_str(
        r#"
[matching]
expected_prefix = "cap"

[parsing]
max_input_bytes = 32
"#,
    )?;
    let matcher = config.matcher();
    ensure(
        matcher.expected_prefix().map(Prefix::as_str) == Some("cap"),
        "matcher should expect cap",
    )?;
    let items = urns(&["cap:op=generate"])?;
    let foreign = TaggedUrn::parse("media:op=generate")?;
    ensure(
        matches!(matcher.find_best_match(&items, &foreign), Err(TaggedUrnError::PrefixMismatch { .. })),
        "configured matcher rejects foreign requests",
    )?;
    let limits = config.limits();
    ensure(TaggedUrn::parse_with_limits("cap:op=generate", &limits).is_ok(), "short input parses")?;
    ensure(
        matches!(
            TaggedUrn::parse_with_limits("cap:op=generate;ext=pdf;lang=en;x=y", &limits),
            Err(TaggedUrnError::InputTooLarge { max_bytes: 32, .. })
        ),
        "long input exceeds the configured limit",
    )?;
    Ok(())
}

#[test]
fn rejects_invalid_values() -> TestResult {
    let huge = format!("[parsing]\nmax_input_bytes = {}\n", MAX_CONFIGURED_INPUT_BYTES + 1);
    let cases = [("[parsing]\nmax_input_bytes = 0\n", "zero limit"), (huge.as_str(), "huge limit")];
    for (text, label) in cases {
        ensure(
            matches!(UrnConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
            format!("{label} should be invalid"),
        )?;
    }
    Ok(())
}

#[test]
fn rejects_bad_prefix_and_unknown_fields() -> TestResult {
    for text in [
        "[matching]\nexpected_prefix = \"9cap\"\n",
        "[matching]\nexpected_prefix = \"\"\n",
        "[matching]\nunknown = true\n",
        "[other]\nvalue = 1\n",
        "[parsing]\nmax_input_bytes = \"big\"\n",
    ] {
        ensure(
            matches!(UrnConfig::from_toml_str(text), Err(ConfigError::Parse(_))),
            format!("`{text}` should fail to parse"),
        )?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Loading Files
// ============================================================================

#[test]
fn load_reads_explicit_path() -> TestResult {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("tagged-urn.toml");
    fs::write(&path, "[matching]\nexpected_prefix = \"media\"\n")?;
    let config = UrnConfig::load(Some(&path))?;
    ensure(
        config.matching.expected_prefix.as_ref().map(Prefix::as_str) == Some("media"),
        "prefix loaded from file",
    )?;
    Ok(())
}

#[test]
fn load_reports_missing_file() -> TestResult {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("absent.toml");
    ensure(matches!(UrnConfig::load(Some(&path)), Err(ConfigError::Io(_))), "missing file is io")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("big.toml");
    fs::write(&path, "#".repeat(MAX_CONFIG_FILE_SIZE + 1))?;
    ensure(
        matches!(UrnConfig::load(Some(&path)), Err(ConfigError::Invalid(_))),
        "file one byte above the cap is rejected",
    )?;
    fs::write(&path, "#".repeat(4 * 1024 * 1024))?;
    ensure(
        matches!(UrnConfig::load(Some(&path)), Err(ConfigError::Invalid(_))),
        "much larger file is rejected the same way",
    )?;
    Ok(())
}

#[test]
fn load_accepts_file_at_size_cap() -> TestResult {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("full.toml");
    let header = "[matching]\nexpected_prefix = \"cap\"\n";
    let padding = "#".repeat(MAX_CONFIG_FILE_SIZE - header.len());
    fs::write(&path, format!("{header}{padding}"))?;
    let config = UrnConfig::load(Some(&path))?;
    ensure(
        config.matching.expected_prefix.as_ref().map(Prefix::as_str) == Some("cap"),
        "file exactly at the cap loads",
    )?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("binary.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00])?;
    ensure(
        matches!(UrnConfig::load(Some(&path)), Err(ConfigError::Invalid(_))),
        "non-utf8 content is rejected",
    )?;
    Ok(())
}

#[test]
fn load_rejects_overlong_path_component() -> TestResult {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("a".repeat(300));
    ensure(
        matches!(UrnConfig::load(Some(&path)), Err(ConfigError::Invalid(_))),
        "component above 255 bytes is rejected before io",
    )?;
    Ok(())
}
