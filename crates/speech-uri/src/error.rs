use thiserror::Error;

/// Grammar violations in an identifier or claim-name segment
///
/// The `Display` text is the human-readable message sent back with a 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("No channel name after @.")]
    EmptyChannelName,

    #[error("Invalid characters in channel name: {}.", join_chars(.0))]
    InvalidChannelChars(Vec<char>),

    #[error("No claim id provided before {0}.")]
    EmptyClaimId(char),

    #[error("No modifier provided after separator {0}.")]
    MissingModifier(char),

    #[error("The {0} modifier is not currently supported.")]
    UnsupportedModifier(char),

    #[error("No claim name provided before .")]
    EmptyClaimName,

    #[error("Invalid characters in claim name: {}.", join_chars(.0))]
    InvalidNameChars(Vec<char>),

    #[error("No file extension provided after separator {0}.")]
    MissingExtension(char),

    #[error("The {0} modifier is not supported in the claim name")]
    UnsupportedNameModifier(char),
}

fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
