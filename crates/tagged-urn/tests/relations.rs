// crates/tagged-urn/tests/relations.rs
// ============================================================================
// Module: Relation Tests
// Description: Conformance, specificity comparison, and compatibility.
// Purpose: Exercise every wildcard class on both sides of each relation.
// Dependencies: tagged_urn
// ============================================================================
//! ## Overview
//! Integration tests for `can_handle`, `matches`, `is_more_specific_than`, and
//! `is_compatible_with`, plus the tag-level helpers in `tagged_urn::relation`.

mod support;

use support::TestResult;
use support::ensure;
use tagged_urn::TagValue;
use tagged_urn::TaggedUrn;
use tagged_urn::TaggedUrnError;
use tagged_urn::relation::satisfies;
use tagged_urn::relation::values_compatible;

/// Returns whether `pattern` can handle `request`, both given as text.
fn handles(pattern: &str, request: &str) -> TestResult<bool> {
    Ok(TaggedUrn::parse(pattern)?.can_handle(&TaggedUrn::parse(request)?)?)
}

/// Returns whether `left` is compatible with `right`, both given as text.
fn compatible(left: &str, right: &str) -> TestResult<bool> {
    Ok(TaggedUrn::parse(left)?.is_compatible_with(&TaggedUrn::parse(right)?)?)
}

// ============================================================================
// SECTION: Conformance
// ============================================================================

#[test]
fn presence_wildcard_and_unspecified_accept_request() -> TestResult {
    ensure(
        handles("cap:op=*;format=?", "cap:op=generate;format=en")?,
        "op is present and format is unconstrained",
    )?;
    ensure(handles("cap:op=*;format=?", "cap:op=generate")?, "`?` also accepts absence")?;
    ensure(!handles("cap:op=*", "cap:ext=pdf")?, "`*` requires the key")?;
    Ok(())
}

#[test]
fn must_not_have_rejects_present_key() -> TestResult {
    ensure(
        !handles("cap:op=generate;region=!", "cap:op=generate;region=us")?,
        "region must be absent",
    )?;
    ensure(handles("cap:op=generate;region=!", "cap:op=generate")?, "absent region is fine")?;
    Ok(())
}

#[test]
fn exact_value_requires_equal_value() -> TestResult {
    ensure(handles("cap:op=generate", "cap:op=generate;ext=pdf")?, "extra request keys pass")?;
    ensure(!handles("cap:op=generate", "cap:op=extract")?, "different value fails")?;
    ensure(!handles("cap:op=generate", "cap:ext=pdf")?, "missing key fails")?;
    ensure(!handles("cap:op=Generate", "cap:op=generate")?, "values are case sensitive")?;
    Ok(())
}

#[test]
fn literal_sentinel_is_not_a_wildcard() -> TestResult {
    ensure(!handles(r#"cap:op="*""#, "cap:op=generate")?, "literal `*` needs literal `*`")?;
    ensure(handles(r#"cap:op="*""#, r#"cap:op="*""#)?, "literal matches literal")?;
    ensure(!handles(r#"cap:op="*""#, "cap:op=*")?, "literal does not match the wildcard")?;
    ensure(handles("cap:op=*", r#"cap:op="!""#)?, "`*` accepts any stored value")?;
    Ok(())
}

#[test]
fn empty_pattern_handles_everything() -> TestResult {
    ensure(handles("cap:", "cap:op=generate;ext=pdf")?, "no constraints")?;
    ensure(handles("cap:", "cap:")?, "empty handles empty")?;
    Ok(())
}

#[test]
fn matches_is_can_handle_reversed() -> TestResult {
    let pattern = TaggedUrn::parse("cap:op=*;ext=!")?;
    let concrete = TaggedUrn::parse("cap:op=generate")?;
    ensure(concrete.matches(&pattern)?, "concrete matches the pattern")?;
    ensure(concrete.matches(&pattern)? == pattern.can_handle(&concrete)?, "duality")?;
    ensure(!pattern.matches(&concrete)?, "reverse direction differs")?;
    Ok(())
}

#[test]
fn relations_reject_prefix_mismatch() -> TestResult {
    let cap = TaggedUrn::parse("cap:op=generate")?;
    let media = TaggedUrn::parse("media:op=generate")?;
    let expected = TaggedUrnError::prefix_mismatch("cap", "media");
    ensure(cap.can_handle(&media) == Err(expected.clone()), "can_handle")?;
    ensure(cap.is_more_specific_than(&media) == Err(expected.clone()), "is_more_specific_than")?;
    ensure(cap.is_compatible_with(&media) == Err(expected), "is_compatible_with")?;
    ensure(
        cap.matches(&media) == Err(TaggedUrnError::prefix_mismatch("media", "cap")),
        "matches reports the pattern prefix as expected",
    )?;
    Ok(())
}

#[test]
fn satisfies_covers_every_class() -> TestResult {
    let value = TagValue::exact("x");
    ensure(satisfies(&TagValue::Unspecified, None), "`?` without value")?;
    ensure(satisfies(&TagValue::Unspecified, Some(&value)), "`?` with value")?;
    ensure(satisfies(&TagValue::MustHaveAny, Some(&TagValue::MustNotHave)), "`*` any stored")?;
    ensure(!satisfies(&TagValue::MustHaveAny, None), "`*` without value")?;
    ensure(satisfies(&TagValue::MustNotHave, None), "`!` without value")?;
    ensure(!satisfies(&TagValue::MustNotHave, Some(&value)), "`!` with value")?;
    ensure(satisfies(&value, Some(&TagValue::exact("x"))), "exact equal")?;
    ensure(!satisfies(&value, Some(&TagValue::exact("y"))), "exact different")?;
    Ok(())
}

// ============================================================================
// SECTION: Specificity Comparison
// ============================================================================

#[test]
fn more_specific_compares_tuples_left_to_right() -> TestResult {
    let exact = TaggedUrn::parse("cap:op=generate")?;
    let two_any = TaggedUrn::parse("cap:op=*;ext=*")?;
    let any_and_not = TaggedUrn::parse("cap:op=*;ext=!")?;
    let any_only = TaggedUrn::parse("cap:op=*")?;
    ensure(exact.is_more_specific_than(&two_any)?, "exact count dominates")?;
    ensure(two_any.is_more_specific_than(&any_and_not)?, "then must-have-any count")?;
    ensure(any_and_not.is_more_specific_than(&any_only)?, "then must-not count")?;
    ensure(!any_only.is_more_specific_than(&any_and_not)?, "ordering is strict")?;
    Ok(())
}

#[test]
fn equal_tuples_are_not_more_specific() -> TestResult {
    let left = TaggedUrn::parse("cap:op=generate;ext=?")?;
    let right = TaggedUrn::parse("cap:lang=en")?;
    ensure(!left.is_more_specific_than(&right)?, "equal tuples: left not greater")?;
    ensure(!right.is_more_specific_than(&left)?, "equal tuples: right not greater")?;
    Ok(())
}

// ============================================================================
// SECTION: Compatibility
// ============================================================================

#[test]
fn compatibility_pairs() -> TestResult {
    let cases = [
        ("cap:op=generate", "cap:op=generate", true),
        ("cap:op=generate", "cap:op=extract", false),
        ("cap:op=?", "cap:op=!", true),
        ("cap:op=*", "cap:op=generate", true),
        ("cap:op=*", "cap:op=!", true),
        ("cap:op=!", "cap:op=!", true),
        ("cap:op=!", "cap:op=generate", false),
        ("cap:op=generate", "cap:ext=pdf", true),
        (r#"cap:op="*""#, "cap:op=generate", false),
    ];
    for (left, right, expected) in cases {
        ensure(
            compatible(left, right)? == expected,
            format!("`{left}` vs `{right}` should be {expected}"),
        )?;
        ensure(
            compatible(right, left)? == expected,
            format!("`{right}` vs `{left}` should be {expected}"),
        )?;
    }
    Ok(())
}

#[test]
fn values_compatible_is_symmetric() -> TestResult {
    let values = [
        TagValue::exact("a"),
        TagValue::exact("b"),
        TagValue::MustHaveAny,
        TagValue::MustNotHave,
        TagValue::Unspecified,
    ];
    for lhs in &values {
        for rhs in &values {
            ensure(
                values_compatible(lhs, rhs) == values_compatible(rhs, lhs),
                format!("`{lhs}` and `{rhs}` disagree by direction"),
            )?;
        }
    }
    Ok(())
}
