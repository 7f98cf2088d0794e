//! In-memory claim registry
//!
//! A read-only [`ClaimResolver`] backed by a fixed set of channel and claim
//! records, loaded from JSON. Used by the reference server and by tests.

use crate::resolver::{
    ChannelContent, ChannelLookup, ClaimInfo, ClaimLookup, ClaimResolver, ClaimSummary,
    FileLookup, FileRecord, ResolveError, Result,
};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use speech_uri::CLAIM_ID_LENGTH;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// A channel (certificate) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Includes the leading `@`
    pub name: String,
    pub claim_id: String,
    #[serde(default)]
    pub effective_amount: f64,
    #[serde(default)]
    pub height: u64,
}

/// A claim record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
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
    /// Long claim id of the publishing channel
    #[serde(default)]
    pub certificate_id: Option<String>,
    #[serde(default)]
    pub effective_amount: f64,
    #[serde(default)]
    pub height: u64,
    /// Present when a local copy of the file exists
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

/// The full set of records a [`MemoryResolver`] answers from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub channels: Vec<ChannelRecord>,
    #[serde(default)]
    pub claims: Vec<ClaimRecord>,
}

/// Ordering inputs shared by channel and claim records
trait Ranked {
    fn claim_id(&self) -> &str;
    fn effective_amount(&self) -> f64;
    fn height(&self) -> u64;
}

impl Ranked for ChannelRecord {
    fn claim_id(&self) -> &str {
        &self.claim_id
    }
    fn effective_amount(&self) -> f64 {
        self.effective_amount
    }
    fn height(&self) -> u64 {
        self.height
    }
}

impl Ranked for ClaimRecord {
    fn claim_id(&self) -> &str {
        &self.claim_id
    }
    fn effective_amount(&self) -> f64 {
        self.effective_amount
    }
    fn height(&self) -> u64 {
        self.height
    }
}

/// Picks one record among same-named candidates
///
/// - no id: highest effective amount, ties broken by lowest height
/// - full id: exact match only
/// - short id: earliest (lowest height) record whose id starts with it
fn pick_by_id<'a, T: Ranked>(candidates: Vec<&'a T>, id: Option<&str>) -> Option<&'a T> {
    match id.filter(|id| !id.is_empty()) {
        None => candidates.into_iter().min_by(|a, b| {
            b.effective_amount()
                .partial_cmp(&a.effective_amount())
                .unwrap_or(Ordering::Equal)
                .then(a.height().cmp(&b.height()))
        }),
        Some(id) if id.len() == CLAIM_ID_LENGTH => {
            candidates.into_iter().find(|c| c.claim_id() == id)
        }
        Some(prefix) => candidates
            .into_iter()
            .filter(|c| c.claim_id().starts_with(prefix))
            .min_by_key(|c| c.height()),
    }
}

/// Shortest prefix of `long_id` not shared with any earlier record
///
/// `ordered` must be sorted by height, oldest first. The first record of a
/// name gets a one-character id.
fn short_id_among<T: Ranked>(ordered: &[&T], long_id: &str) -> Option<String> {
    let index = ordered.iter().position(|c| c.claim_id() == long_id)?;
    let mut possible_matches: Vec<&str> = ordered[..index].iter().map(|c| c.claim_id()).collect();

    let id_length = long_id.chars().count();
    let mut length = 1;
    let mut short_id: String = long_id.chars().take(length).collect();
    while !possible_matches.is_empty() && length <= id_length {
        short_id = long_id.chars().take(length).collect();
        possible_matches.retain(|id| id.starts_with(short_id.as_str()));
        length += 1;
    }
    Some(short_id)
}

/// Read-only registry resolver
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    registry: Registry,
}

impl MemoryResolver {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let registry: Registry =
            serde_json::from_str(json).context("Failed to parse registry JSON")?;
        Ok(Self::new(registry))
    }

    /// Load a registry fixture file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file: {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load registry file: {:?}", path))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Records are borrowed from `self`, not from `claim_name`
    fn claims_named<'a, 'b>(
        &'a self,
        claim_name: &'b str,
    ) -> impl Iterator<Item = &'a ClaimRecord> + 'b
    where
        'a: 'b,
    {
        self.registry.claims.iter().filter(move |c| c.name == claim_name)
    }

    fn channel(&self, channel_name: &str, channel_claim_id: Option<&str>) -> Option<&ChannelRecord> {
        let candidates: Vec<&ChannelRecord> = self
            .registry
            .channels
            .iter()
            .filter(|c| c.name == channel_name)
            .collect();
        pick_by_id(candidates, channel_claim_id)
    }

    fn claim(&self, claim_id: &str, claim_name: &str) -> Option<&ClaimRecord> {
        self.claims_named(claim_name).find(|c| c.claim_id == claim_id)
    }

    fn short_channel_id(&self, channel: &ChannelRecord) -> Result<String> {
        let mut ordered: Vec<&ChannelRecord> = self
            .registry
            .channels
            .iter()
            .filter(|c| c.name == channel.name)
            .collect();
        ordered.sort_by_key(|c| c.height);
        short_id_among(&ordered, &channel.claim_id)
            .ok_or_else(|| anyhow!("channel id not found in channels list").into())
    }
}

impl From<&ClaimRecord> for ClaimSummary {
    fn from(record: &ClaimRecord) -> Self {
        Self {
            name: record.name.clone(),
            claim_id: record.claim_id.clone(),
            title: record.title.clone(),
            thumbnail: record.thumbnail.clone(),
            content_type: record.content_type.clone(),
            file_ext: record.file_ext.clone(),
            height: record.height,
        }
    }
}

#[async_trait]
impl ClaimResolver for MemoryResolver {
    async fn claim_id_by_channel(
        &self,
        channel_name: &str,
        channel_claim_id: Option<&str>,
        claim_name: &str,
    ) -> Result<ClaimLookup> {
        let Some(channel) = self.channel(channel_name, channel_claim_id) else {
            return Ok(ClaimLookup::NoChannel);
        };

        let found = self
            .claims_named(claim_name)
            .filter(|c| c.certificate_id.as_deref() == Some(channel.claim_id.as_str()))
            .min_by_key(|c| c.height);

        Ok(match found {
            Some(claim) => ClaimLookup::Found(claim.claim_id.clone()),
            None => ClaimLookup::NoClaim,
        })
    }

    async fn claim_id_by_name(
        &self,
        claim_name: &str,
        claim_id: Option<&str>,
    ) -> Result<ClaimLookup> {
        let candidates: Vec<&ClaimRecord> = self.claims_named(claim_name).collect();
        Ok(match pick_by_id(candidates, claim_id) {
            Some(claim) => ClaimLookup::Found(claim.claim_id.clone()),
            None => ClaimLookup::NoClaim,
        })
    }

    async fn channel_content(
        &self,
        channel_name: &str,
        channel_claim_id: Option<&str>,
    ) -> Result<ChannelLookup> {
        let Some(channel) = self.channel(channel_name, channel_claim_id) else {
            return Ok(ChannelLookup::NoChannel);
        };

        let mut claims: Vec<&ClaimRecord> = self
            .registry
            .claims
            .iter()
            .filter(|c| c.certificate_id.as_deref() == Some(channel.claim_id.as_str()))
            .collect();
        // newest first
        claims.sort_by(|a, b| b.height.cmp(&a.height));

        Ok(ChannelLookup::Found(ChannelContent {
            channel_name: channel.name.clone(),
            long_channel_claim_id: channel.claim_id.clone(),
            short_channel_claim_id: self.short_channel_id(channel)?,
            claims: claims.into_iter().map(ClaimSummary::from).collect(),
        }))
    }

    async fn local_file(&self, claim_id: &str, claim_name: &str) -> Result<FileLookup> {
        let record = self.claim(claim_id, claim_name).and_then(|claim| {
            claim.file_path.as_ref().map(|path| FileRecord {
                name: claim.name.clone(),
                claim_id: claim.claim_id.clone(),
                file_path: path.clone(),
                file_type: claim.content_type.clone(),
            })
        });

        Ok(match record {
            Some(file) => FileLookup::Found(file),
            None => FileLookup::NoFile,
        })
    }

    async fn claim_info(&self, claim_name: &str, claim_id: &str) -> Result<Option<ClaimInfo>> {
        Ok(self.claim(claim_id, claim_name).map(|claim| {
            let channel_name = claim.certificate_id.as_deref().and_then(|certificate_id| {
                self.registry
                    .channels
                    .iter()
                    .find(|c| c.claim_id == certificate_id)
                    .map(|c| c.name.clone())
            });

            ClaimInfo {
                name: claim.name.clone(),
                claim_id: claim.claim_id.clone(),
                title: claim.title.clone(),
                description: claim.description.clone(),
                thumbnail: claim.thumbnail.clone(),
                content_type: claim.content_type.clone(),
                file_ext: claim.file_ext.clone(),
                channel_name,
            }
        }))
    }

    async fn short_claim_id(&self, claim_id: &str, claim_name: &str) -> Result<String> {
        let mut ordered: Vec<&ClaimRecord> = self.claims_named(claim_name).collect();
        if ordered.is_empty() {
            return Err(ResolveError::Other(anyhow!(
                "No claim(s) found with that claim name"
            )));
        }
        ordered.sort_by_key(|c| c.height);
        short_id_among(&ordered, claim_id)
            .ok_or_else(|| anyhow!("claim id not found in claims list").into())
    }
}
