// speech - claim URL resolution and response dispatch
// Maps `/:identifier/:name` URLs to pages, files, or fetch redirects

pub mod assets;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod pages;
pub mod pagination;
pub mod request_context;
pub mod resolver;
pub mod response;
pub mod response_type;
pub mod routes;

// Re-export the URL grammar
pub use speech_uri;

// Re-export core types
pub use assets::{AssetError, AssetServer, PageAssetServer};
pub use config::Config;
pub use dispatch::dispatch;
pub use error::{handle_request_error, ServeError};
pub use memory::{MemoryResolver, Registry};
pub use pagination::{ChannelPage, PaginationState, CLAIMS_PER_PAGE};
pub use request_context::{QueryParams, RequestContext};
pub use resolver::{
    ChannelContent, ChannelLookup, ClaimInfo, ClaimLookup, ClaimResolver, ClaimSummary,
    FileLookup, FileRecord, ResolveError,
};
pub use response::{JsonError, Page, Redirect};
pub use response_type::ResponseType;
pub use routes::{routes, ServeState};

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::http::StatusCode;
