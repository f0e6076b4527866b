// crates/tagged-urn/src/grammar.rs
// ============================================================================
// Module: Tagged URN Grammar
// Description: Parser and canonical serializer for `prefix:key=value;...` text.
// Purpose: Turn untrusted text into validated tags and render tags canonically.
// Dependencies: crate::{error, tag}
// ============================================================================

//! ## Overview
//! The textual form is `prefix:key1=value1;key2=value2`. The first `:` splits
//! the prefix from the tag list; tags are `;`-separated `key=value` pairs.
//! Values may be double-quoted to carry whitespace, `;`, `=`, `"` or `\`; inside
//! quotes only `\"` and `\\` are escapes.
//!
//! ### Grammar (informal)
//! - **Prefix / key**: `[A-Za-z][A-Za-z0-9_-]*` (keys starting with a digit are
//!   rejected as numeric)
//! - **Bare value**: one or more characters other than whitespace, `;`, `=`,
//!   `"` and `\`
//! - **Quoted value**: `"` ... `"` with `\"` and `\\` escapes
//! - A single trailing `;` is accepted; `prefix:` alone is an empty tag list.
//!
//! Serialization emits tags in ascending key order and quotes an exact value
//! iff [`needs_quoting`] says so, so `parse(serialize(x)) == x` holds for every
//! constructed identifier.
//!
//! ### Example
//!
//! ```
//! use tagged_urn::grammar::needs_quoting;
//! use tagged_urn::grammar::quote_value;
//!
//! assert!(needs_quoting("a;b"));
//! assert_eq!(quote_value(r#"say "hi""#), r#""say \"hi\"""#);
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use crate::error::TaggedUrnError;
use crate::error::UrnResult;
use crate::tag::MUST_HAVE_ANY;
use crate::tag::MUST_NOT_HAVE;
use crate::tag::TagKey;
use crate::tag::TagSet;
use crate::tag::TagValue;
use crate::tag::UNSPECIFIED;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum accepted input size in bytes.
pub const MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Resource limits applied while parsing untrusted text.
///
/// # Invariants
/// - `max_input_bytes` bounds the whole input, prefix included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum accepted input size in bytes.
    pub max_input_bytes: usize,
}

impl ParseLimits {
    /// Creates limits with the given input size cap.
    #[must_use]
    pub const fn new(max_input_bytes: usize) -> Self {
        Self {
            max_input_bytes,
        }
    }
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self::new(MAX_INPUT_BYTES)
    }
}

// ============================================================================
// SECTION: Token Validation
// ============================================================================

/// Which identifier token is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenRole {
    /// The namespace before `:`.
    Prefix,
    /// A tag key.
    Key,
}

/// Checks `text` against the identifier-token grammar.
///
/// `base` is the byte offset of `text` within the input, used for positions.
pub(crate) fn check_token(text: &str, base: usize, role: TokenRole) -> UrnResult {
    let mut chars = text.char_indices();
    let Some((_, first)) = chars.next() else {
        return Err(match role {
            TokenRole::Prefix => TaggedUrnError::EmptyPrefix,
            TokenRole::Key => TaggedUrnError::invalid_tag_format("tag key must not be empty"),
        });
    };
    if !first.is_ascii_alphabetic() {
        if role == TokenRole::Key && first.is_ascii_digit() {
            return Err(TaggedUrnError::NumericKey(text.to_string()));
        }
        return Err(TaggedUrnError::InvalidCharacter {
            character: first,
            position: base,
        });
    }
    for (offset, ch) in chars {
        if !is_token_char(ch) {
            return Err(TaggedUrnError::InvalidCharacter {
                character: ch,
                position: base + offset,
            });
        }
    }
    Ok(())
}

/// Returns true for characters allowed after the first token character.
const fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

// ============================================================================
// SECTION: Quoting
// ============================================================================

/// Returns true if `value` must be quoted to survive a parse round trip.
///
/// That is the case for the empty string, for values containing whitespace,
/// `;`, `=`, `"` or `\`, and for values spelling a wildcard sentinel.
#[must_use]
pub fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || matches!(value, MUST_HAVE_ANY | MUST_NOT_HAVE | UNSPECIFIED)
        || value.chars().any(|ch| ch.is_whitespace() || matches!(ch, ';' | '=' | '"' | '\\'))
}

/// Wraps `value` in double quotes, escaping `"` and `\`.
#[must_use]
pub fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Writes one value in wire form.
pub(crate) fn write_value(f: &mut fmt::Formatter<'_>, value: &TagValue) -> fmt::Result {
    match value {
        TagValue::Exact(text) if needs_quoting(text) => f.write_str(&quote_value(text)),
        other => f.write_str(other.as_str()),
    }
}

/// Writes a full identifier in canonical form.
pub(crate) fn write_urn(f: &mut fmt::Formatter<'_>, prefix: &str, tags: &TagSet) -> fmt::Result {
    f.write_str(prefix)?;
    f.write_char(':')?;
    for (index, (key, value)) in tags.iter().enumerate() {
        if index > 0 {
            f.write_char(';')?;
        }
        f.write_str(key.as_str())?;
        f.write_char('=')?;
        write_value(f, value)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Validated pieces of a parsed identifier.
#[derive(Debug)]
pub(crate) struct ParsedUrn<'a> {
    /// Prefix text, already checked against the token grammar.
    pub(crate) prefix: &'a str,
    /// Parsed tags.
    pub(crate) tags: TagSet,
}

/// Parses `input` into a prefix and a tag set.
pub(crate) fn parse<'a>(input: &'a str, limits: &ParseLimits) -> UrnResult<ParsedUrn<'a>> {
    if input.len() > limits.max_input_bytes {
        return Err(TaggedUrnError::InputTooLarge {
            max_bytes: limits.max_input_bytes,
            actual_bytes: input.len(),
        });
    }
    if input.is_empty() {
        return Err(TaggedUrnError::invalid_format("input is empty"));
    }
    let Some(colon) = input.find(':') else {
        return Err(TaggedUrnError::MissingPrefix);
    };
    let prefix = &input[.. colon];
    check_token(prefix, 0, TokenRole::Prefix)?;
    let tags = TagListParser::new(input, colon + 1).parse()?;
    Ok(ParsedUrn {
        prefix,
        tags,
    })
}

/// Parser for the tag list following the prefix.
struct TagListParser<'a> {
    /// Full input; offsets index into it.
    input: &'a str,
    /// Byte offset of the next unread character.
    offset: usize,
    /// Tags collected so far.
    tags: TagSet,
}

impl<'a> TagListParser<'a> {
    /// Creates a parser starting at `offset`.
    const fn new(input: &'a str, offset: usize) -> Self {
        Self {
            input,
            offset,
            tags: TagSet::new(),
        }
    }

    /// Parses every tag until the end of input.
    fn parse(mut self) -> UrnResult<TagSet> {
        while self.offset < self.input.len() {
            self.parse_tag()?;
        }
        Ok(self.tags)
    }

    /// Parses one `key=value` tag and the separator after it.
    fn parse_tag(&mut self) -> UrnResult {
        let start = self.offset;
        let key = self.parse_key(start)?;
        let value_start = self.offset;
        let value = if self.input[value_start ..].starts_with('"') {
            self.parse_quoted(value_start)?
        } else {
            self.parse_bare(&key)?
        };
        if self.tags.contains_key(key.as_str()) {
            return Err(TaggedUrnError::DuplicateKey(key.into_string()));
        }
        self.tags.insert(key, value);
        Ok(())
    }

    /// Reads a key up to `=` and leaves the offset after the `=`.
    fn parse_key(&mut self, start: usize) -> UrnResult<TagKey> {
        let rest = &self.input[start ..];
        let end = rest.find(['=', ';']).map_or(self.input.len(), |index| start + index);
        let text = &self.input[start .. end];
        if self.input[end ..].starts_with('=') {
            check_token(text, start, TokenRole::Key)?;
            self.offset = end + 1;
            return Ok(TagKey::from_validated(text.to_string()));
        }
        if text.is_empty() {
            return Err(TaggedUrnError::EmptyTag {
                position: start,
            });
        }
        Err(TaggedUrnError::invalid_tag_format(format!("tag `{text}` is missing `=`")))
    }

    /// Reads an unquoted value through the next `;` or the end of input.
    fn parse_bare(&mut self, key: &TagKey) -> UrnResult<TagValue> {
        let start = self.offset;
        let mut end = self.input.len();
        for (index, ch) in self.input[start ..].char_indices() {
            let position = start + index;
            match ch {
                ';' => {
                    end = position;
                    break;
                }
                '=' => {
                    return Err(TaggedUrnError::invalid_tag_format(format!(
                        "tag `{key}` contains more than one `=`"
                    )));
                }
                '"' | '\\' => {
                    return Err(TaggedUrnError::InvalidCharacter {
                        character: ch,
                        position,
                    });
                }
                _ if ch.is_whitespace() => {
                    return Err(TaggedUrnError::InvalidCharacter {
                        character: ch,
                        position,
                    });
                }
                _ => {}
            }
        }
        let text = &self.input[start .. end];
        if text.is_empty() {
            return Err(TaggedUrnError::invalid_tag_format(format!("tag `{key}` has an empty value")));
        }
        self.offset = self.skip_separator(end);
        Ok(TagValue::from_raw(text))
    }

    /// Reads a quoted value starting at the opening quote.
    fn parse_quoted(&mut self, quote_at: usize) -> UrnResult<TagValue> {
        let body_start = quote_at + 1;
        let mut value = String::new();
        let mut chars = self.input[body_start ..].char_indices();
        while let Some((index, ch)) = chars.next() {
            let position = body_start + index;
            match ch {
                '"' => {
                    self.offset = self.after_closing_quote(position + 1)?;
                    return Ok(TagValue::Exact(value));
                }
                '\\' => match chars.next() {
                    Some((_, escaped @ ('"' | '\\'))) => value.push(escaped),
                    Some((_, other)) => {
                        return Err(TaggedUrnError::InvalidEscapeSequence {
                            sequence: format!("\\{other}"),
                            position,
                        });
                    }
                    None => break,
                },
                _ => value.push(ch),
            }
        }
        Err(TaggedUrnError::UnterminatedQuote {
            position: quote_at,
        })
    }

    /// Checks what follows a closing quote and returns the next offset.
    fn after_closing_quote(&self, position: usize) -> UrnResult<usize> {
        match self.input[position ..].chars().next() {
            None | Some(';') => Ok(self.skip_separator(position)),
            Some(other) => Err(TaggedUrnError::invalid_tag_format(format!(
                "unexpected `{other}` after closing quote at position {position}"
            ))),
        }
    }

    /// Steps over a `;` at `position`, if there is one.
    fn skip_separator(&self, position: usize) -> usize {
        if self.input[position ..].starts_with(';') { position + 1 } else { position }
    }
}
