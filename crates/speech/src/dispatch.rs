// File: src/dispatch.rs
// Purpose: Turn a resolved claim into a show page, a lite page, or the file

use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::assets::AssetServer;
use crate::error::ServeError;
use crate::resolver::{ClaimResolver, FileLookup};
use crate::response::Redirect;
use crate::response_type::ResponseType;

/// Where a claim with no local copy is fetched from
pub fn claim_get_url(prefix: &str, claim_name: &str, claim_id: &str) -> String {
    format!(
        "{}/{}/{}",
        prefix.trim_end_matches('/'),
        urlencoding::encode(claim_name),
        urlencoding::encode(claim_id)
    )
}

/// Produce the response for a fully resolved claim
///
/// `claim_id` is the full id. `claim_get_path` prefixes the redirect issued
/// when serving a claim that has no local file.
pub async fn dispatch(
    response_type: ResponseType,
    claim_id: &str,
    claim_name: &str,
    resolver: &dyn ClaimResolver,
    assets: &dyn AssetServer,
    claim_get_path: &str,
) -> Result<Response, ServeError> {
    debug!(%response_type, claim_id, claim_name, "dispatching claim");

    match response_type {
        ResponseType::Show => {
            let (info, short_id) = tokio::try_join!(
                resolver.claim_info(claim_name, claim_id),
                resolver.short_claim_id(claim_id, claim_name),
            )?;
            let info = info.ok_or_else(|| missing(claim_name, claim_id))?;
            Ok(assets.show(&info, &short_id).await?)
        }
        ResponseType::ShowLite => {
            let (info, short_id) = tokio::try_join!(
                resolver.claim_info(claim_name, claim_id),
                resolver.short_claim_id(claim_id, claim_name),
            )?;
            let info = info.ok_or_else(|| missing(claim_name, claim_id))?;
            Ok(assets.show_lite(&info, &short_id).await?)
        }
        ResponseType::Serve => {
            let (short_id, file) = tokio::try_join!(
                resolver.short_claim_id(claim_id, claim_name),
                resolver.local_file(claim_id, claim_name),
            )?;

            match file {
                FileLookup::Found(file) => Ok(assets.serve(&file, &short_id).await?),
                FileLookup::NoFile => {
                    let location = claim_get_url(claim_get_path, claim_name, claim_id);
                    debug!(location = %location, "no local file, redirecting");
                    Ok(Redirect().to(location).into_response())
                }
            }
        }
    }
}

fn missing(claim_name: &str, claim_id: &str) -> ServeError {
    ServeError::ClaimInfoMissing {
        name: claim_name.to_string(),
        claim_id: claim_id.to_string(),
    }
}
