use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

// ============================================================================
// IntoHtml trait: bridges Maud Markup, String and &str
// ============================================================================

pub trait IntoHtml {
    fn into_html(self) -> String;
}

impl IntoHtml for maud::Markup {
    fn into_html(self) -> String { self.into_string() }
}

impl IntoHtml for String {
    fn into_html(self) -> String { self }
}

impl IntoHtml for &str {
    fn into_html(self) -> String { self.to_string() }
}

// ============================================================================
// PageResponse
// ============================================================================

/// Rendered HTML page.
///
/// ```ignore
/// Page().html(pages::no_claim(&site))
/// ```
#[derive(Debug)]
pub struct PageResponse {
    content: Option<String>,
    status: StatusCode,
}

impl PageResponse {
    pub fn new() -> Self {
        Self {
            content: None,
            status: StatusCode::OK,
        }
    }

    /// Set the response body. Accepts Maud Markup, String, or &str.
    pub fn html(mut self, content: impl IntoHtml) -> Self {
        self.content = Some(content.into_html());
        self
    }

    /// Set the HTTP status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl Default for PageResponse {
    fn default() -> Self { Self::new() }
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        (self.status, Html(self.content.unwrap_or_default())).into_response()
    }
}

// ============================================================================
// JsonErrorResponse
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

/// 400 with a `{"success": false, "message": ...}` body for rejected URLs.
///
/// ```ignore
/// JsonError().message("No claim name provided before .")
/// ```
#[derive(Debug, Default)]
pub struct JsonErrorResponse {
    message: Option<String>,
}

impl JsonErrorResponse {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message.unwrap_or_else(|| "An error occurred".into()),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ============================================================================
// RedirectResponse
// ============================================================================

/// Temporary (307) redirect with a Location header.
///
/// ```ignore
/// Redirect().to("/api/claim-get/clip/abc...")
/// ```
#[derive(Debug, Default)]
pub struct RedirectResponse {
    location: Option<String>,
}

impl RedirectResponse {
    pub fn new() -> Self {
        Self { location: None }
    }

    /// Set the redirect location.
    pub fn to(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(ref location) = self.location {
            if let Result::Ok(value) = HeaderValue::from_str(location) {
                headers.insert(header::LOCATION, value);
            }
        }
        (StatusCode::TEMPORARY_REDIRECT, headers).into_response()
    }
}

// ============================================================================
// Constructor functions
// ============================================================================

#[allow(non_snake_case)]
pub fn Page() -> PageResponse { PageResponse::new() }

#[allow(non_snake_case)]
pub fn JsonError() -> JsonErrorResponse { JsonErrorResponse::new() }

#[allow(non_snake_case)]
pub fn Redirect() -> RedirectResponse { RedirectResponse::new() }

// ============================================================================
// Tests
// ============================================================================
