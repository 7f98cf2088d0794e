//! Segment tokenizer
//!
//! Splits one URL path segment into `value [separator modifier]`.
//! All functions are **pure**: same input → same output, no side effects.

/// Path separator; everything after it is ignored.
const PATH_SEPARATOR: char = '/';

/// A tokenized path segment
///
/// Borrowed views into the original segment, no allocation.
///
/// # Examples
///
/// ```
/// use speech_uri::segment::{split_segment, Segment};
///
/// let seg = split_segment("video.mp4", &['.']);
/// assert_eq!(seg, Segment { value: "video", separator: Some('.'), modifier: Some("mp4") });
///
/// let seg = split_segment("video", &['.']);
/// assert_eq!(seg, Segment { value: "video", separator: None, modifier: None });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Leading text up to the first separator or `/`
    pub value: &'a str,
    /// The single separator character, if one follows the value
    pub separator: Option<char>,
    /// Text after the separator up to the next `/`; `None` when empty
    pub modifier: Option<&'a str>,
}

/// Splits a segment on the first of `separators` (pure function)
///
/// # Rules
///
/// 1. `value` runs until the first separator or `/` (or the end)
/// 2. If the next character is one of `separators`, it becomes `separator`
/// 3. `modifier` runs from there until the next `/` (or the end)
/// 4. An empty `modifier` is reported as `None`
///
/// A `/` stops the value and yields no separator, matching how a path
/// separator ends a segment.
pub fn split_segment<'a>(segment: &'a str, separators: &[char]) -> Segment<'a> {
    let value_end = segment
        .find(|c: char| c == PATH_SEPARATOR || separators.contains(&c))
        .unwrap_or(segment.len());
    let value = &segment[..value_end];
    let rest = &segment[value_end..];

    let separator = rest.chars().next().filter(|c| separators.contains(c));

    let modifier = separator.and_then(|sep| {
        let after = &rest[sep.len_utf8()..];
        let end = after.find(PATH_SEPARATOR).unwrap_or(after.len());
        Some(&after[..end]).filter(|m| !m.is_empty())
    });

    Segment {
        value,
        separator,
        modifier,
    }
}

/// Collects every character outside `[A-Za-z0-9-]`, in order of appearance
///
/// Empty result means the text only uses the allowed identifier characters.
pub fn invalid_chars(text: &str) -> Vec<char> {
    text.chars().filter(|c| !is_identifier_char(*c)).collect()
}

/// Allowed identifier character class: ASCII alphanumeric and hyphen
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}
