// Integration tests for the claim, channel and home routes

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use rstest::rstest;
use speech::memory::{ChannelRecord, ClaimRecord};
use speech::resolver::Result as ResolveResult;
use speech::{
    routes, ChannelLookup, ClaimInfo, ClaimLookup, ClaimResolver, FileLookup, MemoryResolver,
    PageAssetServer, Registry, ResolveError, ServeState,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

const LEGACY_ID: &str = "0123456789abcdef0123456789abcdef01234567";

fn long_id(prefix: &str) -> String {
    format!("{:0<40}", prefix)
}

fn claim(name: &str, claim_id: String, height: u64) -> ClaimRecord {
    ClaimRecord {
        name: name.to_string(),
        claim_id,
        title: Some(format!("Title of {}", name)),
        description: None,
        thumbnail: None,
        content_type: "video/mp4".to_string(),
        file_ext: Some("mp4".to_string()),
        certificate_id: None,
        effective_amount: 1.0,
        height,
        file_path: None,
    }
}

fn registry(local_file: Option<PathBuf>) -> Registry {
    let channel_id = long_id("c");

    let mut claims: Vec<ClaimRecord> = (0..25)
        .map(|i| {
            let mut record = claim(&format!("video-{}", i), format!("{:0>40}", i + 1), 100 + i);
            record.certificate_id = Some(channel_id.clone());
            record
        })
        .collect();

    claims.push(claim("xyz", long_id("abc"), 10));
    claims.push(claim("myvideo", LEGACY_ID.to_string(), 20));

    let mut picture = claim("picture", long_id("f1"), 30);
    picture.content_type = "image/png".to_string();
    picture.file_ext = Some("png".to_string());
    picture.file_path = local_file;
    claims.push(picture);

    Registry {
        channels: vec![
            ChannelRecord {
                name: "@mychannel".to_string(),
                claim_id: channel_id,
                effective_amount: 1.0,
                height: 1,
            },
            ChannelRecord {
                name: "@quiet".to_string(),
                claim_id: long_id("e"),
                effective_amount: 1.0,
                height: 2,
            },
        ],
        claims,
    }
}

fn app_with(resolver: Arc<dyn ClaimResolver>) -> Router {
    let site = Arc::new(speech::config::SiteConfig::default());
    let assets = Arc::new(PageAssetServer::new(site.clone()));
    routes(ServeState::new(resolver, assets, site))
}

fn app() -> Router {
    app_with(Arc::new(MemoryResolver::new(registry(None))))
}

async fn get(app: Router, uri: &str, accept: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(header::ACCEPT, accept)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
const JSON: &str = "application/json";

// ============================================================================
// Claim routes
// ============================================================================

#[tokio::test]
async fn test_serve_request_without_local_file_redirects() {
    let response = get(app(), "/abc/xyz.mp4", JSON).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        format!("/api/claim-get/xyz/{}", long_id("abc"))
    );
}

#[tokio::test]
async fn test_claim_get_path_is_configurable() {
    let site = Arc::new(speech::config::SiteConfig::default());
    let state = ServeState::new(
        Arc::new(MemoryResolver::new(registry(None))),
        Arc::new(PageAssetServer::new(site.clone())),
        site,
    )
    .with_claim_get_path("/fetch");

    let response = get(routes(state), "/abc/xyz.mp4", JSON).await;
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        format!("/fetch/xyz/{}", long_id("abc"))
    );
}

#[tokio::test]
async fn test_serve_request_streams_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\x89PNG fake").unwrap();
    let app = app_with(Arc::new(MemoryResolver::new(registry(Some(
        file.path().to_path_buf(),
    )))));

    let response = get(app, "/f/picture.png", "image/*").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"\x89PNG fake");
}

#[tokio::test]
async fn test_browser_asking_for_raw_asset_gets_lite_page() {
    let response = get(app(), "/abc/xyz.mp4", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<video"));
    assert!(html.contains("show-lite"));
}

#[tokio::test]
async fn test_show_page_by_claim_id() {
    let response = get(app(), "/abc/xyz", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Title of xyz"));
    assert!(html.contains(r#"src="/a/xyz.mp4""#));
}

#[tokio::test]
async fn test_legacy_order_is_flipped() {
    let response = get(app(), &format!("/myvideo/{}", LEGACY_ID), HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Title of myvideo"));
}

#[tokio::test]
async fn test_claim_in_channel() {
    let response = get(app(), "/@mychannel/video-3", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Title of video-3"));
    assert!(html.contains("@mychannel"));
}

#[tokio::test]
async fn test_unknown_claim_renders_no_claim_page() {
    let response = get(app(), "/nonexistent", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("No claim"));
}

#[tokio::test]
async fn test_unknown_channel_for_claim_renders_no_channel_page() {
    let response = get(app(), "/@nobody/clip", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("No channel"));
}

// ============================================================================
// Channel route
// ============================================================================

#[tokio::test]
async fn test_channel_first_page() {
    let response = get(app(), "/@mychannel", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Page 1 of 3"));
    assert!(html.contains("25 results"));
    assert!(html.contains(r#"href="/@mychannel:c?p=2""#));
    assert!(!html.contains(r#"rel="prev""#));
    // newest first
    assert!(html.contains("Title of video-24"));
    assert!(!html.contains("Title of video-14"));
}

#[tokio::test]
async fn test_channel_last_page() {
    let response = get(app(), "/@mychannel?p=3", HTML).await;

    let html = body_string(response).await;
    assert!(html.contains("Page 3 of 3"));
    assert!(html.contains(r#"href="/@mychannel:c?p=2""#));
    assert!(!html.contains(r#"rel="next""#));
    assert!(html.contains("Title of video-0"));
}

#[tokio::test]
async fn test_channel_with_claim_id_modifier() {
    let response = get(app(), "/@mychannel:c", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Page 1 of 3"));
    assert!(html.contains("Title of video-24"));
}

#[tokio::test]
async fn test_channel_with_wrong_claim_id_renders_no_channel_page() {
    let response = get(app(), "/@mychannel:d", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("No channel"));
}

#[tokio::test]
async fn test_empty_channel() {
    let response = get(app(), "/@quiet", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("There is no content in this channel yet."));
    assert!(html.contains("Page 1 of 0"));
    assert!(html.contains("0 results"));
}

#[tokio::test]
async fn test_unparseable_page_falls_back_to_first() {
    let html = body_string(get(app(), "/@mychannel?p=abc", HTML).await).await;
    assert!(html.contains("Page 1 of 3"));
    assert!(html.contains("Title of video-24"));
}

#[rstest]
#[case("0", "Page 0 of 3")]
#[case("-1", "Page -1 of 3")]
#[case("4", "Page 4 of 3")]
#[tokio::test]
async fn test_out_of_range_page_lists_nothing(#[case] p: &str, #[case] heading: &str) {
    let response = get(app(), &format!("/@mychannel?p={}", p), HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(heading), "{}", html);
    assert!(html.contains("25 results"));
    assert!(!html.contains("Title of video-"));
}

#[tokio::test]
async fn test_largest_page_has_no_next_link() {
    let uri = format!("/@mychannel?p={}", i64::MAX);
    let response = get(app(), &uri, HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&format!("Page {} of 3", i64::MAX)));
    assert!(html.contains(&format!(r#"href="/@mychannel:c?p={}""#, i64::MAX - 1)));
    assert!(!html.contains(r#"rel="next""#));
}

#[tokio::test]
async fn test_smallest_page_has_no_previous_link() {
    let uri = format!("/@mychannel?p={}", i64::MIN);
    let response = get(app(), &uri, HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&format!("Page {} of 3", i64::MIN)));
    assert!(html.contains(&format!(r#"href="/@mychannel:c?p={}""#, i64::MIN + 1)));
    assert!(!html.contains(r#"rel="prev""#));
}

#[tokio::test]
async fn test_unknown_channel_renders_no_channel_page() {
    let response = get(app(), "/@nobody", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("No channel"));
}

// ============================================================================
// Grammar failures
// ============================================================================

#[tokio::test]
async fn test_bad_identifier_is_json_400() {
    let response = get(app(), "/abc$1/xyz", HTML).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "success": false,
            "message": "The $ modifier is not currently supported."
        })
    );
}

#[tokio::test]
async fn test_empty_channel_name_is_json_400() {
    let response = get(app(), "/@", HTML).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["message"], "No channel name after @.");
}

#[tokio::test]
async fn test_bad_name_is_json_400() {
    let response = get(app(), "/abc/xyz.", JSON).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["message"], "No file extension provided after separator ..");
}

// ============================================================================
// Error routing
// ============================================================================

/// Registry that fails every call with a fixed error
struct FailingResolver {
    error: fn() -> ResolveError,
}

#[async_trait]
impl ClaimResolver for FailingResolver {
    async fn claim_id_by_channel(
        &self,
        _channel_name: &str,
        _channel_claim_id: Option<&str>,
        _claim_name: &str,
    ) -> ResolveResult<ClaimLookup> {
        Err((self.error)())
    }

    async fn claim_id_by_name(
        &self,
        _claim_name: &str,
        _claim_id: Option<&str>,
    ) -> ResolveResult<ClaimLookup> {
        Err((self.error)())
    }

    async fn channel_content(
        &self,
        _channel_name: &str,
        _channel_claim_id: Option<&str>,
    ) -> ResolveResult<ChannelLookup> {
        Err((self.error)())
    }

    async fn local_file(&self, _claim_id: &str, _claim_name: &str) -> ResolveResult<FileLookup> {
        Err((self.error)())
    }

    async fn claim_info(
        &self,
        _claim_name: &str,
        _claim_id: &str,
    ) -> ResolveResult<Option<ClaimInfo>> {
        Err((self.error)())
    }

    async fn short_claim_id(&self, _claim_id: &str, _claim_name: &str) -> ResolveResult<String> {
        Err((self.error)())
    }
}

fn failing(error: fn() -> ResolveError) -> Router {
    app_with(Arc::new(FailingResolver { error }))
}

#[tokio::test]
async fn test_connection_refused_is_503() {
    let app = failing(|| ResolveError::ConnectionRefused("localhost:5279".into()));
    let response = get(app, "/abc/xyz", HTML).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_invalid_uri_is_400_page() {
    let app = failing(|| ResolveError::InvalidUri);
    let response = get(app, "/@mychannel", HTML).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Invalid URI"));
}

#[tokio::test]
async fn test_upstream_status_is_kept() {
    let app = failing(|| ResolveError::Upstream {
        status: 502,
        message: "bad gateway".into(),
    });
    let response = get(app, "/xyz", JSON).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_other_errors_are_500_with_message() {
    let app = failing(|| ResolveError::Other(anyhow::anyhow!("registry exploded")));
    let response = get(app, "/abc/xyz", HTML).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("registry exploded"));
}

#[tokio::test]
async fn test_missing_claim_info_is_500() {
    // resolves by id, but the registry has no details for the name
    struct NoInfo(MemoryResolver);

    #[async_trait]
    impl ClaimResolver for NoInfo {
        async fn claim_id_by_channel(
            &self,
            channel_name: &str,
            channel_claim_id: Option<&str>,
            claim_name: &str,
        ) -> ResolveResult<ClaimLookup> {
            self.0
                .claim_id_by_channel(channel_name, channel_claim_id, claim_name)
                .await
        }

        async fn claim_id_by_name(
            &self,
            claim_name: &str,
            claim_id: Option<&str>,
        ) -> ResolveResult<ClaimLookup> {
            self.0.claim_id_by_name(claim_name, claim_id).await
        }

        async fn channel_content(
            &self,
            channel_name: &str,
            channel_claim_id: Option<&str>,
        ) -> ResolveResult<ChannelLookup> {
            self.0.channel_content(channel_name, channel_claim_id).await
        }

        async fn local_file(&self, claim_id: &str, claim_name: &str) -> ResolveResult<FileLookup> {
            self.0.local_file(claim_id, claim_name).await
        }

        async fn claim_info(
            &self,
            _claim_name: &str,
            _claim_id: &str,
        ) -> ResolveResult<Option<ClaimInfo>> {
            Ok(None)
        }

        async fn short_claim_id(&self, claim_id: &str, claim_name: &str) -> ResolveResult<String> {
            self.0.short_claim_id(claim_id, claim_name).await
        }
    }

    let app = app_with(Arc::new(NoInfo(MemoryResolver::new(registry(None)))));
    let response = get(app, "/abc/xyz", HTML).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Home and fallback
// ============================================================================

#[tokio::test]
async fn test_home_page() {
    let response = get(app(), "/", HTML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Spee.ch"));
}

#[tokio::test]
async fn test_deep_paths_are_404() {
    let response = get(app(), "/a/b/c", HTML).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("/a/b/c"));
}
