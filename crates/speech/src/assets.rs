//! Asset server
//!
//! Produces the final response once a claim is resolved: the show page, the
//! bare show-lite page, or the file bytes themselves.

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncReadExt;

use crate::config::SiteConfig;
use crate::pages;
use crate::resolver::{ClaimInfo, FileRecord};
use crate::response::Page;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content type for {name}: {content_type}")]
    ContentType { name: String, content_type: String },
}

/// Turns resolved claims into responses
#[async_trait]
pub trait AssetServer: Send + Sync {
    /// Full page for a claim
    async fn show(&self, claim: &ClaimInfo, short_id: &str) -> Result<Response, AssetError>;

    /// Minimal page wrapping only the asset
    async fn show_lite(&self, claim: &ClaimInfo, short_id: &str)
        -> Result<Response, AssetError>;

    /// Raw file bytes, with `short_id` naming the canonical asset URL
    async fn serve(&self, file: &FileRecord, short_id: &str) -> Result<Response, AssetError>;
}

const CHUNK_SIZE: usize = 64 * 1024;

/// Maud pages plus files read from local disk
#[derive(Debug, Clone)]
pub struct PageAssetServer {
    site: Arc<SiteConfig>,
}

impl PageAssetServer {
    pub fn new(site: Arc<SiteConfig>) -> Self {
        Self { site }
    }

    /// `<{host}/{short_id}/{name}.{ext}>; rel="canonical"`
    fn canonical_link(&self, file: &FileRecord, short_id: &str) -> String {
        let ext = file.file_path.extension().and_then(|ext| ext.to_str());
        format!(
            "<{}{}>; rel=\"canonical\"",
            self.site.host.trim_end_matches('/'),
            pages::asset_url(short_id, &file.name, ext)
        )
    }
}

#[async_trait]
impl AssetServer for PageAssetServer {
    async fn show(&self, claim: &ClaimInfo, short_id: &str) -> Result<Response, AssetError> {
        Ok(Page()
            .html(pages::show(&self.site, claim, short_id))
            .into_response())
    }

    async fn show_lite(
        &self,
        claim: &ClaimInfo,
        short_id: &str,
    ) -> Result<Response, AssetError> {
        Ok(Page()
            .html(pages::show_lite(&self.site, claim, short_id))
            .into_response())
    }

    async fn serve(&self, file: &FileRecord, short_id: &str) -> Result<Response, AssetError> {
        let content_type =
            HeaderValue::from_str(&file.file_type).map_err(|_| AssetError::ContentType {
                name: file.name.clone(),
                content_type: file.file_type.clone(),
            })?;

        let read_error = |source: std::io::Error| AssetError::Read {
            path: file.file_path.clone(),
            source,
        };
        let mut reader = tokio::fs::File::open(&file.file_path)
            .await
            .map_err(read_error)?;
        let size = reader.metadata().await.map_err(read_error)?.len();

        tracing::debug!(
            claim_id = %file.claim_id,
            short_id,
            path = ?file.file_path,
            size,
            "serving file"
        );

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type);
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        if let Ok(link) = HeaderValue::from_str(&self.canonical_link(file, short_id)) {
            headers.insert(header::LINK, link);
        }

        let chunks = async_stream::stream! {
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                match reader.read(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => yield Ok::<_, std::io::Error>(Bytes::copy_from_slice(&buf[..n])),
                    Err(err) => {
                        yield Err(err);
                        break;
                    }
                }
            }
        };

        Ok((StatusCode::OK, headers, Body::from_stream(chunks)).into_response())
    }
}
