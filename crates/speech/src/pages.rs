// File: src/pages.rs
// Purpose: Maud templates for every page the router renders

use maud::{html, Markup, DOCTYPE};

use crate::config::SiteConfig;
use crate::pagination::ChannelPage;
use crate::resolver::ClaimInfo;

/// Path that serves the raw asset: `/{short_id}/{name}.{ext}`
pub fn asset_url(short_id: &str, claim_name: &str, file_ext: Option<&str>) -> String {
    let base = format!(
        "/{}/{}",
        urlencoding::encode(short_id),
        urlencoding::encode(claim_name)
    );
    match file_ext {
        Some(ext) => format!("{}.{}", base, urlencoding::encode(ext)),
        None => base,
    }
}

/// Path of the show page: `/{short_id}/{name}`
pub fn show_url(short_id: &str, claim_name: &str) -> String {
    asset_url(short_id, claim_name, None)
}

fn layout(site: &SiteConfig, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content=(site.description);
                title { (title) " - " (site.title) }
            }
            body {
                header {
                    a href="/" { (site.title) }
                }
                main { (body) }
            }
        }
    }
}

/// The asset itself, picked by content type
fn embed(src: &str, content_type: &str, alt: &str) -> Markup {
    html! {
        @if content_type.starts_with("video/") {
            video controls src=(src) {
                a href=(src) { "Download " (alt) }
            }
        } @else if content_type.starts_with("image/") {
            img src=(src) alt=(alt);
        } @else {
            a href=(src) { (alt) }
        }
    }
}

fn claim_title(claim: &ClaimInfo) -> &str {
    claim.title.as_deref().unwrap_or(&claim.name)
}

pub fn home(site: &SiteConfig) -> Markup {
    layout(
        site,
        "Home",
        html! {
            h1 { (site.title) }
            p { (site.description) }
        },
    )
}

pub fn no_claim(site: &SiteConfig) -> Markup {
    layout(
        site,
        "No Claim",
        html! {
            h1 { "No claim" }
            p { "There are no free assets at that claim. You should publish one!" }
        },
    )
}

pub fn no_channel(site: &SiteConfig) -> Markup {
    layout(
        site,
        "No Channel",
        html! {
            h1 { "No channel" }
            p { "There are no channels by that name." }
        },
    )
}

pub fn channel(site: &SiteConfig, page: &ChannelPage) -> Markup {
    let state = &page.pagination;
    let channel_path = format!("/{}:{}", page.channel_name, page.short_channel_claim_id);

    layout(
        site,
        &page.channel_name,
        html! {
            h1 { (page.channel_name) }
            p.channel-id { "Channel id: " (page.long_channel_claim_id) }
            @if state.total_results == 0 {
                p { "There is no content in this channel yet." }
            } @else {
                ul.channel-claims {
                    @for claim in &page.claims {
                        li {
                            a href=(format!("{}/{}", channel_path, claim.name)) {
                                @if let Some(thumbnail) = &claim.thumbnail {
                                    img src=(thumbnail) alt=(claim.name);
                                }
                                span { (claim.title.as_deref().unwrap_or(&claim.name)) }
                            }
                        }
                    }
                }
            }
            nav.pagination {
                @if let Some(previous) = state.previous_page {
                    a rel="prev" href=(format!("{}?p={}", channel_path, previous)) { "Previous" }
                }
                span { "Page " (state.current_page) " of " (state.total_pages) }
                @if let Some(next) = state.next_page {
                    a rel="next" href=(format!("{}?p={}", channel_path, next)) { "Next" }
                }
                span.total-results { (state.total_results) " results" }
            }
        },
    )
}

pub fn show(site: &SiteConfig, claim: &ClaimInfo, short_id: &str) -> Markup {
    let src = asset_url(short_id, &claim.name, claim.file_ext.as_deref());
    let title = claim_title(claim);

    layout(
        site,
        title,
        html! {
            article.show {
                h1 { (title) }
                (embed(&src, &claim.content_type, title))
                @if let Some(channel_name) = &claim.channel_name {
                    p.channel { "Published by " a href=(format!("/{}", channel_name)) { (channel_name) } }
                }
                @if let Some(description) = &claim.description {
                    p.description { (description) }
                }
                p.share {
                    "Share: "
                    input type="text" readonly value=(format!("{}{}", site.host, show_url(short_id, &claim.name)));
                }
                p.direct { a href=(src) { "Direct link" } }
            }
        },
    )
}

/// Bare page around the asset, for browsers opening a raw-asset URL
pub fn show_lite(site: &SiteConfig, claim: &ClaimInfo, short_id: &str) -> Markup {
    let src = asset_url(short_id, &claim.name, claim.file_ext.as_deref());
    let title = claim_title(claim);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) " - " (site.title) }
            }
            body.show-lite {
                (embed(&src, &claim.content_type, title))
            }
        }
    }
}

pub fn invalid_uri(site: &SiteConfig) -> Markup {
    layout(
        site,
        "Invalid URI",
        html! {
            h1 { "Invalid URI" }
            p { "That URL could not be understood." }
        },
    )
}

pub fn request_error(site: &SiteConfig, status: u16, message: &str) -> Markup {
    layout(
        site,
        "Error",
        html! {
            h1 { (status) }
            p.error { (message) }
        },
    )
}

pub fn not_found(site: &SiteConfig, path: &str) -> Markup {
    layout(
        site,
        "Not Found",
        html! {
            h1 { "404" }
            p { "Nothing lives at " code { (path) } "." }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationState;

    fn claim(content_type: &str) -> ClaimInfo {
        ClaimInfo {
            name: "clip".to_string(),
            claim_id: "a".repeat(40),
            title: Some("A Clip".to_string()),
            description: Some("<b>desc</b>".to_string()),
            thumbnail: None,
            content_type: content_type.to_string(),
            file_ext: Some("mp4".to_string()),
            channel_name: Some("@films".to_string()),
        }
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(asset_url("a", "clip", Some("mp4")), "/a/clip.mp4");
        assert_eq!(show_url("a", "clip"), "/a/clip");
    }

    #[test]
    fn test_show_embeds_video() {
        let html = show(&SiteConfig::default(), &claim("video/mp4"), "a").into_string();
        assert!(html.contains("<video"));
        assert!(html.contains(r#"src="/a/clip.mp4""#));
        assert!(html.contains("Published by"));
        // maud escapes text content
        assert!(html.contains("&lt;b&gt;desc&lt;/b&gt;"));
    }

    #[test]
    fn test_show_lite_embeds_image() {
        let html = show_lite(&SiteConfig::default(), &claim("image/png"), "a").into_string();
        assert!(html.contains("<img"));
        assert!(!html.contains("<header>"));
    }

    #[test]
    fn test_channel_pagination_links() {
        let page = ChannelPage {
            channel_name: "@films".to_string(),
            long_channel_claim_id: "f".repeat(40),
            short_channel_claim_id: "f".to_string(),
            claims: Vec::new(),
            pagination: PaginationState::new(25, 2),
        };
        let html = channel(&SiteConfig::default(), &page).into_string();
        assert!(html.contains("Page 2 of 3"));
        assert!(html.contains(r#"href="/@films:f?p=1""#));
        assert!(html.contains(r#"href="/@films:f?p=3""#));
    }
}
