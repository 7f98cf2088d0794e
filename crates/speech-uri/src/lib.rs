//! # speech-uri
//!
//! Grammar for the two path segments of a content URL:
//!
//! - `/:identifier`: a channel (`@name`, `@name:channelClaimId`) or a
//!   claim id (full 40-character id or a short prefix)
//! - `/:identifier/:name`: adds a claim name, optionally with a file
//!   extension (`name.ext`) marking a raw-asset request
//!
//! Every rule is enforced by a pure function and every violation is a
//! distinct [`UriError`] whose message is safe to show to the client.
//!
//! ## Example
//!
//! ```
//! use speech_uri::{flip_legacy_order, parse_identifier, parse_name};
//!
//! let identifier = parse_identifier("a1b2").unwrap();
//! let name = parse_name("clip.mp4").unwrap();
//!
//! assert_eq!(identifier.claim_id(), Some("a1b2"));
//! assert_eq!(name.claim_name, "clip");
//! assert!(name.is_serve_request);
//!
//! // Legacy `/name/claimId` links are put back in order
//! let (claim_id, claim_name) = flip_legacy_order("clip", "a");
//! assert_eq!((claim_id, claim_name), ("a", "clip"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod compat;
mod error;
mod identifier;
mod name;
pub mod segment;

pub use compat::{
    flip_legacy_order, is_valid_claim_id, is_valid_short_id, is_valid_short_id_or_claim_id,
    CLAIM_ID_LENGTH,
};
pub use error::UriError;
pub use identifier::{parse_identifier, Identifier, CHANNEL_CHAR};
pub use name::{parse_name, ParsedName};
