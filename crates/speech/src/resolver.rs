//! Claim resolution contract
//!
//! The registry that maps names to claims lives outside this crate. Handlers
//! talk to it through [`ClaimResolver`]; "not found" outcomes are ordinary
//! return values, only genuine failures are errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A claim as listed on a channel page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub name: String,
    pub claim_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub content_type: String,
    #[serde(default)]
    pub file_ext: Option<String>,
    #[serde(default)]
    pub height: u64,
}

/// Full claim details used by the show pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimInfo {
    pub name: String,
    pub claim_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub content_type: String,
    #[serde(default)]
    pub file_ext: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
}

/// A locally stored copy of a claim's file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub claim_id: String,
    pub file_path: PathBuf,
    pub file_type: String,
}

/// A channel together with all of its claims, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelContent {
    pub channel_name: String,
    pub long_channel_claim_id: String,
    pub short_channel_claim_id: String,
    pub claims: Vec<ClaimSummary>,
}

/// Outcome of resolving a claim id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimLookup {
    /// The full 40-character claim id
    Found(String),
    NoClaim,
    NoChannel,
}

/// Outcome of resolving a channel listing
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelLookup {
    Found(ChannelContent),
    NoChannel,
}

/// Outcome of looking up a local file
#[derive(Debug, Clone, PartialEq)]
pub enum FileLookup {
    Found(FileRecord),
    NoFile,
}

/// Failures talking to the registry
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid URI")]
    InvalidUri,

    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Registry lookups the request pipeline depends on
#[async_trait]
pub trait ClaimResolver: Send + Sync {
    /// Claim named `claim_name` published in a channel
    ///
    /// `channel_claim_id` may be absent, short, or full.
    async fn claim_id_by_channel(
        &self,
        channel_name: &str,
        channel_claim_id: Option<&str>,
        claim_name: &str,
    ) -> Result<ClaimLookup>;

    /// Claim by name, narrowed by an optional short or full claim id
    async fn claim_id_by_name(&self, claim_name: &str, claim_id: Option<&str>)
        -> Result<ClaimLookup>;

    /// Channel details and every claim in it
    async fn channel_content(
        &self,
        channel_name: &str,
        channel_claim_id: Option<&str>,
    ) -> Result<ChannelLookup>;

    /// Local file for a fully resolved claim
    async fn local_file(&self, claim_id: &str, claim_name: &str) -> Result<FileLookup>;

    /// Claim details for rendering; `None` if the registry has no record
    async fn claim_info(&self, claim_name: &str, claim_id: &str) -> Result<Option<ClaimInfo>>;

    /// Shortest id that still identifies this claim among claims of the same name
    async fn short_claim_id(&self, claim_id: &str, claim_name: &str) -> Result<String>;

    /// Routes to the channel or name lookup depending on what the URL carried
    async fn resolve_claim_id(
        &self,
        channel_name: Option<&str>,
        channel_claim_id: Option<&str>,
        claim_name: &str,
        claim_id: Option<&str>,
    ) -> Result<ClaimLookup> {
        match channel_name {
            Some(channel_name) => {
                self.claim_id_by_channel(channel_name, channel_claim_id, claim_name)
                    .await
            }
            None => self.claim_id_by_name(claim_name, claim_id).await,
        }
    }
}
