// File: src/routes.rs
// Purpose: Axum routes for claim, channel and home pages

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use speech_uri::{flip_legacy_order, parse_identifier, parse_name, Identifier};
use std::sync::Arc;
use tracing::debug;

use crate::assets::AssetServer;
use crate::config::{AssetsConfig, SiteConfig};
use crate::dispatch::dispatch;
use crate::error::{handle_request_error, ServeError};
use crate::pages;
use crate::pagination::ChannelPage;
use crate::request_context::RequestContext;
use crate::resolver::{ChannelLookup, ClaimLookup, ClaimResolver};
use crate::response::Page;
use crate::response_type::ResponseType;

/// Shared, read-only application state
#[derive(Clone)]
pub struct ServeState {
    pub resolver: Arc<dyn ClaimResolver>,
    pub assets: Arc<dyn AssetServer>,
    pub site: Arc<SiteConfig>,
    /// Prefix of the redirect used when a claim has no local file
    pub claim_get_path: Arc<str>,
}

impl ServeState {
    pub fn new(
        resolver: Arc<dyn ClaimResolver>,
        assets: Arc<dyn AssetServer>,
        site: Arc<SiteConfig>,
    ) -> Self {
        Self {
            resolver,
            assets,
            site,
            claim_get_path: AssetsConfig::default().claim_get_path.into(),
        }
    }

    pub fn with_claim_get_path(mut self, claim_get_path: impl Into<String>) -> Self {
        let claim_get_path: String = claim_get_path.into();
        self.claim_get_path = claim_get_path.into();
        self
    }
}

/// Build the router for every public page
pub fn routes(state: ServeState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/:identifier", get(serve_by_identifier))
        .route("/:identifier/:name", get(serve_by_claim))
        .fallback(not_found)
        .with_state(state)
}

/// What a claim URL asks the registry for
#[derive(Debug, Clone, Copy)]
struct ClaimRequest<'a> {
    response_type: ResponseType,
    channel_name: Option<&'a str>,
    channel_claim_id: Option<&'a str>,
    claim_name: &'a str,
    claim_id: Option<&'a str>,
}

async fn home(State(state): State<ServeState>) -> Response {
    Page().html(pages::home(&state.site)).into_response()
}

async fn not_found(State(state): State<ServeState>, uri: Uri) -> Response {
    Page()
        .html(pages::not_found(&state.site, uri.path()))
        .status(StatusCode::NOT_FOUND)
        .into_response()
}

/// `/:identifier/:name`
async fn serve_by_claim(
    State(state): State<ServeState>,
    Path((identifier, name)): Path<(String, String)>,
    ctx: RequestContext,
) -> Response {
    let result = claim_in_path(&state, &ctx, &identifier, &name).await;
    respond(&state, &ctx, result)
}

/// `/:identifier`
async fn serve_by_identifier(
    State(state): State<ServeState>,
    Path(identifier): Path<String>,
    ctx: RequestContext,
) -> Response {
    let result = lone_identifier(&state, &ctx, &identifier).await;
    respond(&state, &ctx, result)
}

async fn claim_in_path(
    state: &ServeState,
    ctx: &RequestContext,
    identifier: &str,
    name: &str,
) -> Result<Response, ServeError> {
    let identifier = parse_identifier(identifier)?;
    let name = parse_name(name)?;

    let response_type = ResponseType::from_headers(name.is_serve_request, &ctx.headers);
    let request = match &identifier {
        Identifier::Channel {
            name: channel_name,
            claim_id: channel_claim_id,
        } => ClaimRequest {
            response_type,
            channel_name: Some(channel_name.as_str()),
            channel_claim_id: channel_claim_id.as_deref(),
            claim_name: &name.claim_name,
            claim_id: None,
        },
        Identifier::Claim { claim_id } => {
            let (claim_id, claim_name) = flip_legacy_order(claim_id, &name.claim_name);
            ClaimRequest {
                response_type,
                channel_name: None,
                channel_claim_id: None,
                claim_name,
                claim_id: Some(claim_id),
            }
        }
    };

    resolve_and_dispatch(state, request).await
}

async fn lone_identifier(
    state: &ServeState,
    ctx: &RequestContext,
    identifier: &str,
) -> Result<Response, ServeError> {
    if let Identifier::Channel { name, claim_id } = parse_identifier(identifier)? {
        debug!(channel_name = %name, channel_claim_id = ?claim_id, "channel request");
        return channel_page(state, &name, claim_id.as_deref(), ctx.page()).await;
    }

    // A lone segment that is not a channel is a claim name
    let name = parse_name(identifier)?;
    let request = ClaimRequest {
        response_type: ResponseType::from_headers(name.is_serve_request, &ctx.headers),
        channel_name: None,
        channel_claim_id: None,
        claim_name: &name.claim_name,
        claim_id: None,
    };

    resolve_and_dispatch(state, request).await
}

fn respond(
    state: &ServeState,
    ctx: &RequestContext,
    result: Result<Response, ServeError>,
) -> Response {
    result.unwrap_or_else(|err| {
        handle_request_error(&state.site, &ctx.original_url, ctx.client_ip.as_deref(), &err)
    })
}

async fn resolve_and_dispatch(
    state: &ServeState,
    request: ClaimRequest<'_>,
) -> Result<Response, ServeError> {
    debug!(
        response_type = %request.response_type,
        claim_name = request.claim_name,
        channel_name = ?request.channel_name,
        claim_id = ?request.claim_id,
        "claim request"
    );

    let lookup = state
        .resolver
        .resolve_claim_id(
            request.channel_name,
            request.channel_claim_id,
            request.claim_name,
            request.claim_id,
        )
        .await?;

    match lookup {
        ClaimLookup::NoClaim => Ok(Page().html(pages::no_claim(&state.site)).into_response()),
        ClaimLookup::NoChannel => Ok(Page().html(pages::no_channel(&state.site)).into_response()),
        ClaimLookup::Found(full_claim_id) => {
            dispatch(
                request.response_type,
                &full_claim_id,
                request.claim_name,
                state.resolver.as_ref(),
                state.assets.as_ref(),
                &state.claim_get_path,
            )
            .await
        }
    }
}

async fn channel_page(
    state: &ServeState,
    channel_name: &str,
    channel_claim_id: Option<&str>,
    page: i64,
) -> Result<Response, ServeError> {
    match state
        .resolver
        .channel_content(channel_name, channel_claim_id)
        .await?
    {
        ChannelLookup::NoChannel => Ok(Page().html(pages::no_channel(&state.site)).into_response()),
        ChannelLookup::Found(content) => {
            let channel = ChannelPage::build(content, page);
            debug!(
                channel_name = %channel.channel_name,
                page = channel.pagination.current_page,
                total_pages = channel.pagination.total_pages,
                "rendering channel page"
            );
            Ok(Page().html(pages::channel(&state.site, &channel)).into_response())
        }
    }
}
