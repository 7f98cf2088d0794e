// File: src/response_type.rs
// Purpose: Decide whether a request gets a show page, a lite page, or raw bytes

use axum::http::{header, HeaderMap};

/// How a resolved claim is returned to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Raw asset bytes
    Serve,
    /// Full page embedding the asset
    Show,
    /// Minimal embeddable page
    ShowLite,
}

impl ResponseType {
    /// Classify from the URL form and the client's `Accept` header
    ///
    /// | serve request | accepts html | result   |
    /// |---------------|--------------|----------|
    /// | yes           | yes          | ShowLite |
    /// | yes           | no           | Serve    |
    /// | no            | yes          | Show     |
    /// | no            | no           | Serve    |
    pub fn classify(is_serve_request: bool, accepts_html: bool) -> Self {
        match (is_serve_request, accepts_html) {
            // a browser following a raw-asset link
            (true, true) => ResponseType::ShowLite,
            (true, false) => ResponseType::Serve,
            (false, true) => ResponseType::Show,
            // someone embedding a show url
            (false, false) => ResponseType::Serve,
        }
    }

    pub fn from_headers(is_serve_request: bool, headers: &HeaderMap) -> Self {
        Self::classify(is_serve_request, accepts_html(headers))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Serve => "SERVE",
            ResponseType::Show => "SHOW",
            ResponseType::ShowLite => "SHOWLITE",
        }
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the `Accept` header lists `text/html`
///
/// Entries are comma separated; surrounding whitespace and `;q=` style
/// parameters are ignored. Wildcards such as `*/*` do not count.
pub fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|accept| accept.split(','))
        .filter_map(|entry| entry.split(';').next())
        .any(|media_type| media_type.trim().eq_ignore_ascii_case("text/html"))
}
