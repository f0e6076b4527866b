// crates/tagged-urn/src/lib.rs
// ============================================================================
// Module: Tagged URN Root
// Description: Public API surface for flat, tag-based identifiers.
// Purpose: Wire together parsing, the matching algebra, the matcher, and the
//          `cap:` specialization.
// Dependencies: crate::{builder, cap, config, error, grammar, matcher, prefix,
//              relation, specificity, tag, trace, urn}
// ============================================================================

//! ## Overview
//! A tagged URN is a prefix plus an unordered set of `key=value` tags, written
//! `prefix:key1=value1;key2=value2`. Values may be wildcards:
//!
//! | Value | Meaning as a pattern                      |
//! |-------|-------------------------------------------|
//! | `v`   | counterpart must carry exactly `v`        |
//! | `*`   | counterpart must carry the key            |
//! | `!`   | counterpart must not carry the key        |
//! | `?`   | no constraint                             |
//!
//! Capabilities are patterns, requests are concrete; [`Urn::can_handle`]
//! decides whether a capability serves a request and [`matcher`] picks the most
//! specific capability out of a collection.
//!
//! ```
//! use tagged_urn::TaggedUrn;
//!
//! let urn: TaggedUrn = "cap:op=generate;ext=\"pdf\";title=\"Q3 report\"".parse()?;
//! assert_eq!(urn.to_string(), "cap:ext=pdf;op=generate;title=\"Q3 report\"");
//! # Ok::<(), tagged_urn::TaggedUrnError>(())
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod builder;
pub mod cap;
pub mod config;
pub mod error;
pub mod grammar;
pub mod matcher;
pub mod prefix;
pub mod relation;
pub mod specificity;
pub mod tag;
pub mod trace;
pub mod urn;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::TaggedUrnBuilder;
pub use builder::UrnBuilder;
pub use cap::CapMatcher;
pub use cap::CapUrn;
pub use cap::CapUrnBuilder;
pub use config::ConfigError;
pub use config::MatchingConfig;
pub use config::ParsingConfig;
pub use config::UrnConfig;
pub use error::TaggedUrnError;
pub use error::UrnResult;
pub use grammar::ParseLimits;
pub use grammar::needs_quoting;
pub use grammar::quote_value;
pub use matcher::MatchContext;
pub use matcher::UrnMatcher;
pub use matcher::find_all_matches;
pub use matcher::find_best_match;
pub use matcher::sort_by_specificity;
pub use prefix::Fixed;
pub use prefix::FixedPrefix;
pub use prefix::Prefix;
pub use prefix::PrefixPolicy;
pub use specificity::Specificity;
pub use tag::TagKey;
pub use tag::TagSet;
pub use tag::TagValue;
pub use trace::MatchOutcome;
pub use trace::MatchTrace;
pub use trace::NoopTrace;
pub use trace::TracingTrace;
pub use urn::TaggedUrn;
pub use urn::Urn;
