// File: src/pagination.rs
// Purpose: Slice channel claims into pages and compute page metadata

use serde::Serialize;

use crate::resolver::{ChannelContent, ClaimSummary};

/// Fixed page size for channel listings
pub const CLAIMS_PER_PAGE: usize = 10;

/// Page requested through `?p=`, defaulting to the first page
///
/// No bounds are applied; zero, negative or past-the-end pages flow through
/// and simply produce an empty slice.
pub fn page_from_query(p: Option<&str>) -> i64 {
    p.and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(1)
}

pub fn total_pages(total_results: usize) -> usize {
    if total_results == 0 {
        return 0;
    }
    if total_results < CLAIMS_PER_PAGE {
        return 1;
    }
    let full_pages = total_results / CLAIMS_PER_PAGE;
    if total_results % CLAIMS_PER_PAGE == 0 {
        full_pages
    } else {
        full_pages + 1
    }
}

/// Visible items for `page`: `[(page-1)*10, (page-1)*10+10)` clamped to the list
pub fn page_slice<T>(items: &[T], page: i64) -> &[T] {
    let len = items.len() as i64;
    let start = page
        .saturating_sub(1)
        .saturating_mul(CLAIMS_PER_PAGE as i64);
    let end = start.saturating_add(CLAIMS_PER_PAGE as i64);

    let start = start.clamp(0, len) as usize;
    let end = end.clamp(0, len) as usize;
    &items[start..end.max(start)]
}

/// Page metadata rendered alongside a channel listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: i64,
    pub total_pages: usize,
    pub previous_page: Option<i64>,
    pub next_page: Option<i64>,
    pub total_results: usize,
}

impl PaginationState {
    pub fn new(total_results: usize, current_page: i64) -> Self {
        let total_pages = total_pages(total_results);
        // Pages past either end of i64 have no neighbour
        let previous_page = if current_page == 1 {
            None
        } else {
            current_page.checked_sub(1)
        };
        let next_page = if current_page == total_pages as i64 {
            None
        } else {
            current_page.checked_add(1)
        };

        Self {
            current_page,
            total_pages,
            previous_page,
            next_page,
            total_results,
        }
    }
}

/// Everything the channel page is rendered with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelPage {
    pub channel_name: String,
    pub long_channel_claim_id: String,
    pub short_channel_claim_id: String,
    pub claims: Vec<ClaimSummary>,
    pub pagination: PaginationState,
}

impl ChannelPage {
    pub fn build(content: ChannelContent, page: i64) -> Self {
        let pagination = PaginationState::new(content.claims.len(), page);
        let claims = page_slice(&content.claims, page).to_vec();

        Self {
            channel_name: content.channel_name,
            long_channel_claim_id: content.long_channel_claim_id,
            short_channel_claim_id: content.short_channel_claim_id,
            claims,
            pagination,
        }
    }
}
