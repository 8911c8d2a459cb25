//! The background upload job.
//!
//! Each job copies one photo from Flickr to Wikimedia Commons:
//! validate the proposed title, upload the image, then attach the
//! caption and structured data. The job runs as straight-line logic on
//! a spawned task and never returns its outcome directly -- it records
//! progress at every phase, and callers poll the progress tracker.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::UploadRequest;
use crate::progress::{ProgressError, ProgressTracker};
use crate::services::wikimedia::{CommonsApi, TitleValidation};
use crate::structured_data::{FlickrUserLookup, create_sdc_claims_for_flickr_photo};
use crate::wikitext::create_wikitext;

/// Where an upload job is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    Queued,
    Validating,
    Uploading,
    AttachingStructuredData,
    Succeeded,
    Failed,
}

/// Which step a failed job died on. Distinguishing these matters to the
/// UI: "uploaded but metadata failed" needs a different message (and a
/// different retry) than "upload rejected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadErrorKind {
    InvalidTitle,
    UploadError,
    StructuredDataError,
}

/// The progress envelope written for every phase transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub status: UploadPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<UploadErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present once the file exists on Commons, including for jobs that
    /// failed after the upload step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl UploadProgress {
    fn phase(status: UploadPhase) -> Self {
        UploadProgress {
            status,
            error_kind: None,
            message: None,
            filename: None,
        }
    }

    fn attaching(filename: &str) -> Self {
        UploadProgress {
            filename: Some(filename.to_string()),
            ..Self::phase(UploadPhase::AttachingStructuredData)
        }
    }

    fn succeeded(filename: &str) -> Self {
        UploadProgress {
            filename: Some(filename.to_string()),
            ..Self::phase(UploadPhase::Succeeded)
        }
    }

    fn failed(kind: UploadErrorKind, message: String, filename: Option<String>) -> Self {
        UploadProgress {
            status: UploadPhase::Failed,
            error_kind: Some(kind),
            message: Some(message),
            filename,
        }
    }
}

/// Runs upload jobs against injected collaborators.
#[derive(Clone)]
pub struct Uploader {
    api: Arc<dyn CommonsApi>,
    tracker: ProgressTracker,
    lookup: Arc<FlickrUserLookup>,
}

impl Uploader {
    pub fn new(
        api: Arc<dyn CommonsApi>,
        tracker: ProgressTracker,
        lookup: Arc<FlickrUserLookup>,
    ) -> Self {
        Uploader {
            api,
            tracker,
            lookup,
        }
    }

    /// Record the job as queued and fire it off in the background.
    ///
    /// The `queued` record is written before the spawn so a poller can
    /// render a progress screen immediately, even if the worker hasn't
    /// picked the job up yet.
    pub async fn start_upload(
        &self,
        task_id: &str,
        request: UploadRequest,
    ) -> Result<(), ProgressError> {
        self.tracker
            .record_progress(task_id, &UploadProgress::phase(UploadPhase::Queued))
            .await?;

        let uploader = self.clone();
        let task_id = task_id.to_string();

        tokio::spawn(async move {
            if let Err(e) = uploader.run_upload(&task_id, request).await {
                // A progress write failed; the job can't report anything
                // to pollers beyond what's already on disk.
                eprintln!("[uploads] Task {} aborted: {}", task_id, e);
            }
        });

        Ok(())
    }

    /// Drive one upload to a terminal state.
    ///
    /// Upstream API failures become terminal progress records, never
    /// errors: the only way anything learns about them is by polling.
    /// The returned error covers progress-store I/O only.
    async fn run_upload(
        &self,
        task_id: &str,
        request: UploadRequest,
    ) -> Result<(), ProgressError> {
        self.tracker
            .record_progress(task_id, &UploadProgress::phase(UploadPhase::Validating))
            .await?;

        let title = format!("File:{}", request.title);
        match self.api.validate_title(&title).await {
            Ok(TitleValidation::Ok) => {}
            Ok(validation) => {
                let message = validation
                    .text()
                    .unwrap_or("This title is not allowed.")
                    .to_string();
                eprintln!("[uploads] Task {}: title rejected: {}", task_id, message);
                return self
                    .tracker
                    .record_progress(
                        task_id,
                        &UploadProgress::failed(UploadErrorKind::InvalidTitle, message, None),
                    )
                    .await;
            }
            Err(e) => {
                eprintln!("[uploads] Task {}: title validation error: {}", task_id, e);
                return self
                    .tracker
                    .record_progress(
                        task_id,
                        &UploadProgress::failed(
                            UploadErrorKind::UploadError,
                            e.to_string(),
                            None,
                        ),
                    )
                    .await;
            }
        }

        // Record before the call: if we crash mid-upload, pollers see
        // "uploading" rather than a stale "validating".
        self.tracker
            .record_progress(task_id, &UploadProgress::phase(UploadPhase::Uploading))
            .await?;

        let wikitext = create_wikitext(
            &request.photo_url,
            request.date_taken.as_ref(),
            &request.user,
            &request.license_id,
        );

        let filename = match self
            .api
            .upload_image(&request.title, &request.original_url, &wikitext)
            .await
        {
            Ok(filename) => filename,
            Err(e) => {
                eprintln!("[uploads] Task {}: upload failed: {}", task_id, e);
                return self
                    .tracker
                    .record_progress(
                        task_id,
                        &UploadProgress::failed(
                            UploadErrorKind::UploadError,
                            e.to_string(),
                            None,
                        ),
                    )
                    .await;
            }
        };

        self.tracker
            .record_progress(task_id, &UploadProgress::attaching(&filename))
            .await?;

        // From here on the file exists on Commons. Failures are reported
        // distinctly and keep the filename: uploads aren't transactional,
        // so a retry only needs to redo the metadata.
        if let Err(e) = self.attach_metadata(&request, &filename).await {
            eprintln!(
                "[uploads] Task {}: structured data failed for {}: {}",
                task_id, filename, e
            );
            return self
                .tracker
                .record_progress(
                    task_id,
                    &UploadProgress::failed(
                        UploadErrorKind::StructuredDataError,
                        e,
                        Some(filename),
                    ),
                )
                .await;
        }

        println!("[uploads] Task {} succeeded as {}", task_id, filename);
        self.tracker
            .record_progress(task_id, &UploadProgress::succeeded(&filename))
            .await
    }

    async fn attach_metadata(
        &self,
        request: &UploadRequest,
        filename: &str,
    ) -> Result<(), String> {
        let claims = create_sdc_claims_for_flickr_photo(request, &self.lookup)
            .map_err(|e| e.to_string())?;

        self.api
            .add_file_caption(filename, &request.caption)
            .await
            .map_err(|e| e.to_string())?;

        self.api
            .add_structured_data(filename, &claims)
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
