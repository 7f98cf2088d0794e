// File: src/error.rs
// Purpose: Request failures and their mapping to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use speech_uri::UriError;
use thiserror::Error;

use crate::assets::AssetError;
use crate::config::SiteConfig;
use crate::pages;
use crate::resolver::ResolveError;
use crate::response::{JsonError, Page};

/// Anything that can stop a claim request short of a response
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Uri(#[from] UriError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("No claim info found for {name}#{claim_id}")]
    ClaimInfoMissing { name: String, claim_id: String },
}

/// Grammar failures are answered before any lookup happens
fn bad_request(error: &UriError) -> Response {
    JsonError().message(error.to_string()).into_response()
}

/// Log a failed request and pick the page and status for it
pub fn handle_request_error(
    site: &SiteConfig,
    original_url: &str,
    client_ip: Option<&str>,
    error: &ServeError,
) -> Response {
    if let ServeError::Uri(err) = error {
        tracing::warn!(
            url = %original_url,
            client_ip = client_ip.unwrap_or("unknown"),
            error = %err,
            "rejected claim url"
        );
        return bad_request(err);
    }

    tracing::error!(
        url = %original_url,
        client_ip = client_ip.unwrap_or("unknown"),
        error = %error,
        "request failed"
    );

    match error {
        ServeError::Resolve(ResolveError::InvalidUri) => Page()
            .html(pages::invalid_uri(site))
            .status(StatusCode::BAD_REQUEST)
            .into_response(),
        ServeError::Resolve(ResolveError::ConnectionRefused(_)) => {
            error_page(site, StatusCode::SERVICE_UNAVAILABLE, &connection_refused_message())
        }
        ServeError::Resolve(ResolveError::Upstream { status, message }) => {
            error_page(site, upstream_status(*status), message)
        }
        other => error_page(site, StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

fn error_page(site: &SiteConfig, status: StatusCode, message: &str) -> Response {
    Page()
        .html(pages::request_error(site, status.as_u16(), message))
        .status(status)
        .into_response()
}

fn connection_refused_message() -> String {
    "Connection refused. The claim registry may not be running.".to_string()
}

/// Upstream codes outside the 4xx/5xx range fall back to 400
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_REQUEST)
}
