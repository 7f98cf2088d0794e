//! Identifier segment parsing
//!
//! The first path segment names either a channel (`@name[:channelClaimId]`)
//! or a claim id (full or short).

use tracing::debug;

use crate::error::UriError;
use crate::segment::{invalid_chars, split_segment};

/// Leading character of channel identifiers
pub const CHANNEL_CHAR: char = '@';

/// Separators recognized in the identifier segment
const IDENTIFIER_SEPARATORS: &[char] = &[':', '$', '#'];

/// The only separator the identifier grammar accepts
const CLAIM_ID_SEPARATOR: char = ':';

/// A parsed identifier segment
///
/// Exactly one of channel name or claim id is present; a channel claim id
/// only exists for channels that carried a `:` modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// `@name` or `@name:claimId`; `name` keeps its leading `@`
    Channel {
        name: String,
        claim_id: Option<String>,
    },
    /// Anything else: a full or short claim id
    Claim { claim_id: String },
}

impl Identifier {
    pub fn is_channel(&self) -> bool {
        matches!(self, Identifier::Channel { .. })
    }

    pub fn channel_name(&self) -> Option<&str> {
        match self {
            Identifier::Channel { name, .. } => Some(name),
            Identifier::Claim { .. } => None,
        }
    }

    pub fn channel_claim_id(&self) -> Option<&str> {
        match self {
            Identifier::Channel { claim_id, .. } => claim_id.as_deref(),
            Identifier::Claim { .. } => None,
        }
    }

    pub fn claim_id(&self) -> Option<&str> {
        match self {
            Identifier::Claim { claim_id } => Some(claim_id),
            Identifier::Channel { .. } => None,
        }
    }
}

/// Parses the identifier segment (pure function)
///
/// # Rules
///
/// 1. A value starting with `@` is a channel; the text after `@` must be
///    non-empty and only use `[A-Za-z0-9-]`
/// 2. Any other non-empty value is a claim id
/// 3. A separator must be `:` and must be followed by a modifier
/// 4. The modifier becomes the channel claim id (ignored for claim ids)
///
/// # Examples
///
/// ```
/// use speech_uri::{parse_identifier, Identifier};
///
/// let id = parse_identifier("@news:3f").unwrap();
/// assert_eq!(id.channel_name(), Some("@news"));
/// assert_eq!(id.channel_claim_id(), Some("3f"));
///
/// let id = parse_identifier("a1").unwrap();
/// assert_eq!(id, Identifier::Claim { claim_id: "a1".to_string() });
///
/// assert!(parse_identifier("@").is_err());
/// assert!(parse_identifier("abc$1").is_err());
/// ```
pub fn parse_identifier(segment: &str) -> Result<Identifier, UriError> {
    debug!("parsing identifier: {}", segment);
    let parts = split_segment(segment, IDENTIFIER_SEPARATORS);
    debug!(
        value = parts.value,
        separator = ?parts.separator,
        modifier = ?parts.modifier,
        "identifier components"
    );

    let is_channel = parts.value.starts_with(CHANNEL_CHAR);
    if is_channel {
        let bare_name = &parts.value[CHANNEL_CHAR.len_utf8()..];
        if bare_name.is_empty() {
            return Err(UriError::EmptyChannelName);
        }
        let bad_chars = invalid_chars(bare_name);
        if !bad_chars.is_empty() {
            return Err(UriError::InvalidChannelChars(bad_chars));
        }
    } else if parts.value.is_empty() {
        return Err(UriError::EmptyClaimId(
            parts.separator.unwrap_or(CLAIM_ID_SEPARATOR),
        ));
    }

    let modifier = match parts.separator {
        None => None,
        Some(sep) => {
            let modifier = parts.modifier.ok_or(UriError::MissingModifier(sep))?;
            if sep != CLAIM_ID_SEPARATOR {
                return Err(UriError::UnsupportedModifier(sep));
            }
            Some(modifier.to_string())
        }
    };

    if is_channel {
        Ok(Identifier::Channel {
            name: parts.value.to_string(),
            claim_id: modifier,
        })
    } else {
        if let Some(ignored) = modifier {
            debug!("ignoring channel claim id {} on a claim identifier", ignored);
        }
        Ok(Identifier::Claim {
            claim_id: parts.value.to_string(),
        })
    }
}
