// File: src/request_context.rs
// Purpose: Request context with original URL, headers, query params and client address

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts, Query},
    http::{request::Parts, HeaderMap},
};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::pagination::page_from_query;

/// Request data the claim handlers log and pass to the error router
#[derive(Clone)]
pub struct RequestContext {
    /// Path and query as the client sent them
    pub original_url: String,

    /// Query parameters from URL (?key=value)
    pub query: QueryParams,

    /// Request headers
    pub headers: HeaderMap,

    /// First X-Forwarded-For entry, else the peer address when known
    pub client_ip: Option<String>,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("original_url", &self.original_url)
            .field("client_ip", &self.client_ip)
            .finish()
    }
}

impl RequestContext {
    pub fn new(
        original_url: String,
        query: QueryParams,
        headers: HeaderMap,
        peer: Option<SocketAddr>,
    ) -> Self {
        let client_ip =
            Self::forwarded_for(&headers).or_else(|| peer.map(|addr| addr.ip().to_string()));

        Self {
            original_url,
            query,
            headers,
            client_ip,
        }
    }

    fn forwarded_for(headers: &HeaderMap) -> Option<String> {
        let value = headers.get("x-forwarded-for")?.to_str().ok()?;
        value
            .split(',')
            .map(str::trim)
            .find(|entry| !entry.is_empty())
            .map(str::to_string)
    }

    /// Requested channel page from `?p=`
    pub fn page(&self) -> i64 {
        page_from_query(self.query.get("p").map(String::as_str))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let original_url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        // An undecodable query string counts as no query at all
        let params = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(RequestContext::new(
            original_url,
            QueryParams::new(params),
            parts.headers.clone(),
            peer,
        ))
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }
}
