//! Upload endpoints (/uploads/*)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::constants::DEFAULT_CAPTION_LANGUAGE;
use crate::models::{ShortCaption, UploadRequest};
use crate::progress::ProgressError;
use crate::services::error::LogErr;
use crate::services::flickr::FlickrError;
use crate::structured_data::{Claims, create_sdc_claims_for_flickr_photo, get_wikidata_property_label};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/uploads", post(begin_upload))
        .route("/uploads/preview", post(preview_upload))
        .route("/uploads/{task_id}/status", get(upload_status))
        .route("/uploads/{task_id}/progress", delete(clear_progress))
}

#[derive(Deserialize)]
struct UploadBody {
    photo_id: String,
    /// Proposed Commons filename, without the `File:` prefix
    title: String,
    caption: String,
    #[serde(default = "default_caption_language")]
    caption_language: String,
}

fn default_caption_language() -> String {
    DEFAULT_CAPTION_LANGUAGE.to_string()
}

/// Fetch the photo from Flickr and assemble the job input.
async fn build_upload_request(
    state: &AppState,
    body: UploadBody,
) -> Result<(UploadRequest, Option<String>), StatusCode> {
    let photo = state
        .flickr
        .get_single_photo(&body.photo_id)
        .await
        .map_err(|e| match e {
            FlickrError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            other => {
                eprintln!("[uploads] Get photo error: {}", other);
                StatusCode::BAD_GATEWAY
            }
        })?;

    let request = UploadRequest {
        photo_id: photo.id,
        user: photo.owner,
        title: body.title,
        caption: ShortCaption {
            language: body.caption_language,
            text: body.caption,
        },
        date_taken: Some(photo.date_taken),
        date_posted: photo.date_posted,
        license_id: photo.license_id,
        photo_url: photo.photo_page_url,
        original_url: photo.original_url,
        location: photo.location,
    };

    Ok((request, photo.title))
}

#[derive(Serialize)]
struct BeginUploadResponse {
    task_id: String,
}

/// POST /uploads - Fetch a photo from Flickr and enqueue an upload job
async fn begin_upload(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UploadBody>,
) -> Result<(StatusCode, Json<BeginUploadResponse>), StatusCode> {
    let (request, _) = build_upload_request(&state, body).await?;

    let task_id = Uuid::new_v4().to_string();
    state
        .uploader
        .start_upload(&task_id, request)
        .await
        .log_500("Start upload error")?;

    Ok((
        StatusCode::ACCEPTED,
        Json(BeginUploadResponse { task_id }),
    ))
}

#[derive(Serialize)]
struct PreviewUploadResponse {
    /// The photo's own title on Flickr, handy for pre-filling the form
    photo_title: Option<String>,
    claims: Claims,
    /// English labels for every property that appears in the claims
    labels: BTreeMap<String, &'static str>,
}

/// POST /uploads/preview - Show the structured data an upload would attach
async fn preview_upload(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UploadBody>,
) -> Result<Json<PreviewUploadResponse>, StatusCode> {
    let (request, photo_title) = build_upload_request(&state, body).await?;

    let claims = create_sdc_claims_for_flickr_photo(&request, &state.lookup)
        .log_status("Preview claims error", StatusCode::UNPROCESSABLE_ENTITY)?;

    let mut labels = BTreeMap::new();
    for statement in &claims.claims {
        let mut properties = vec![statement.mainsnak.property.clone()];
        properties.extend(statement.qualifiers_order.iter().flatten().cloned());

        for property in properties {
            let label = get_wikidata_property_label(&property).log_500("Property label error")?;
            labels.insert(property, label);
        }
    }

    Ok(Json(PreviewUploadResponse {
        photo_title,
        claims,
        labels,
    }))
}

#[derive(Serialize)]
struct UploadStatusResponse {
    task_id: String,
    /// The latest progress envelope, or null if the job hasn't recorded
    /// anything yet
    progress: Option<Value>,
}

/// GET /uploads/:task_id/status - Poll the progress of an upload job
async fn upload_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<UploadStatusResponse>, StatusCode> {
    let progress = state
        .tracker
        .get_progress(&task_id)
        .await
        .map_err(|e| match e {
            ProgressError::InvalidTaskId(_) => StatusCode::BAD_REQUEST,
            other => {
                eprintln!("[uploads] Get progress error: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    Ok(Json(UploadStatusResponse { task_id, progress }))
}

/// DELETE /uploads/:task_id/progress - Drop a finished task's record
///
/// Called once the result page no longer needs it; deleting an
/// already-absent record succeeds.
async fn clear_progress(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state
        .tracker
        .clear_progress(&task_id)
        .await
        .map_err(|e| match e {
            ProgressError::InvalidTaskId(_) => StatusCode::BAD_REQUEST,
            other => {
                eprintln!("[uploads] Clear progress error: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    Ok(StatusCode::NO_CONTENT)
}
