//! Flickr lookup endpoints (/flickr/*)

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::models::FlickrUser;
use crate::services::flickr::FlickrError;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/flickr/user", get(lookup_user))
}

#[derive(Deserialize)]
struct LookupUserParams {
    /// A link to the user's photos or profile,
    /// e.g. `https://www.flickr.com/photos/britishlibrary/`
    url: String,
}

/// GET /flickr/user?url=… - Resolve a Flickr URL to the user behind it
async fn lookup_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupUserParams>,
) -> Result<Json<FlickrUser>, StatusCode> {
    let user = state
        .flickr
        .lookup_user(&params.url)
        .await
        .map_err(|e| match e {
            FlickrError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            other => {
                eprintln!("[flickr] Lookup user error: {}", other);
                StatusCode::BAD_GATEWAY
            }
        })?;

    Ok(Json(user))
}
