//! Claim-name segment parsing
//!
//! The second path segment is a claim name, optionally followed by a file
//! extension (`name.ext`) that marks a request for the raw asset.

use tracing::debug;

use crate::error::UriError;
use crate::segment::{invalid_chars, split_segment};

/// Separators recognized in the name segment
const NAME_SEPARATORS: &[char] = &[':', '$', '#', '.'];

/// The only separator the name grammar accepts
const EXTENSION_SEPARATOR: char = '.';

/// A parsed claim-name segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Non-empty, `[A-Za-z0-9-]+`
    pub claim_name: String,
    /// True when a file extension was present
    pub is_serve_request: bool,
    /// The extension text after `.`, if any
    pub extension: Option<String>,
}

/// Parses the claim-name segment (pure function)
///
/// # Examples
///
/// ```
/// use speech_uri::parse_name;
///
/// let name = parse_name("funny-cat.gif").unwrap();
/// assert_eq!(name.claim_name, "funny-cat");
/// assert!(name.is_serve_request);
///
/// let name = parse_name("funny-cat").unwrap();
/// assert!(!name.is_serve_request);
///
/// assert!(parse_name(".gif").is_err());
/// assert!(parse_name("cat#1").is_err());
/// ```
pub fn parse_name(segment: &str) -> Result<ParsedName, UriError> {
    debug!("parsing name: {}", segment);
    let parts = split_segment(segment, NAME_SEPARATORS);
    debug!(
        claim_name = parts.value,
        separator = ?parts.separator,
        modifier = ?parts.modifier,
        "name components"
    );

    if parts.value.is_empty() {
        return Err(UriError::EmptyClaimName);
    }
    let bad_chars = invalid_chars(parts.value);
    if !bad_chars.is_empty() {
        return Err(UriError::InvalidNameChars(bad_chars));
    }

    let extension = match parts.separator {
        None => None,
        Some(sep) => {
            let modifier = parts.modifier.ok_or(UriError::MissingExtension(sep))?;
            if sep != EXTENSION_SEPARATOR {
                return Err(UriError::UnsupportedNameModifier(sep));
            }
            Some(modifier.to_string())
        }
    };

    Ok(ParsedName {
        claim_name: parts.value.to_string(),
        is_serve_request: extension.is_some(),
        extension,
    })
}
