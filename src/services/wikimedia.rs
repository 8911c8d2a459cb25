//! Client for the Wikimedia Commons action API.
//!
//! Everything the upload job needs from Commons goes through the
//! [`CommonsApi`] trait, so the job can be driven against a stub in
//! tests; [`WikimediaApi`] is the real implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::constants::{COMMONS_API_URL, MAX_TITLE_BYTES, USER_AGENT};
use crate::models::ShortCaption;
use crate::structured_data::Claims;

/// Outcome of checking a proposed filename before upload.
///
/// Non-Ok variants carry a message suitable for showing to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleValidation {
    Ok,
    Blacklisted(String),
    Duplicate(String),
    Invalid(String),
    TooLong(String),
}

impl TitleValidation {
    /// The user-facing message, if this is a rejection.
    pub fn text(&self) -> Option<&str> {
        match self {
            TitleValidation::Ok => None,
            TitleValidation::Blacklisted(text)
            | TitleValidation::Duplicate(text)
            | TitleValidation::Invalid(text)
            | TitleValidation::TooLong(text) => Some(text),
        }
    }
}

#[derive(Debug)]
pub enum WikimediaError {
    Http(reqwest::Error),
    Api { code: String, info: String },
    InvalidAccessToken,
    /// A file with this name already exists on Commons
    DuplicateFilename(String),
    /// The image is byte-identical to a file already on Commons
    DuplicatePhoto(String),
    Unexpected(String),
}

impl From<reqwest::Error> for WikimediaError {
    fn from(e: reqwest::Error) -> Self {
        WikimediaError::Http(e)
    }
}

impl std::fmt::Display for WikimediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WikimediaError::Http(e) => write!(f, "HTTP error: {}", e),
            WikimediaError::Api { code, info } => {
                write!(f, "Wikimedia API error {}: {}", code, info)
            }
            WikimediaError::InvalidAccessToken => write!(f, "Invalid or expired access token"),
            WikimediaError::DuplicateFilename(filename) => {
                write!(
                    f,
                    "There is already a file named {:?} on Wikimedia Commons",
                    filename
                )
            }
            WikimediaError::DuplicatePhoto(filename) => {
                write!(
                    f,
                    "This photo is a duplicate of the Commons file {:?}",
                    filename
                )
            }
            WikimediaError::Unexpected(s) => write!(f, "Unexpected Wikimedia response: {}", s),
        }
    }
}

impl std::error::Error for WikimediaError {}

/// The Commons operations consumed by the upload job.
#[async_trait]
pub trait CommonsApi: Send + Sync {
    /// Check whether a `File:` title is allowed for a new file.
    async fn validate_title(&self, title: &str) -> Result<TitleValidation, WikimediaError>;

    /// Copy the image at `original_url` to Commons. Returns the filename
    /// Commons stored it under.
    async fn upload_image(
        &self,
        filename: &str,
        original_url: &str,
        text: &str,
    ) -> Result<String, WikimediaError>;

    /// Add a short caption (a Wikibase label) to an uploaded file.
    async fn add_file_caption(
        &self,
        filename: &str,
        caption: &ShortCaption,
    ) -> Result<(), WikimediaError>;

    /// Attach structured-data claims to an uploaded file.
    async fn add_structured_data(
        &self,
        filename: &str,
        claims: &Claims,
    ) -> Result<(), WikimediaError>;
}

#[derive(Clone)]
pub struct WikimediaApi {
    http: Client,
    api_url: String,
    access_token: String,
}

impl WikimediaApi {
    pub fn new(access_token: &str) -> Self {
        Self::with_api_url(access_token, COMMONS_API_URL)
    }

    pub fn with_api_url(access_token: &str, api_url: &str) -> Self {
        Self {
            // Server-side URL uploads can take a while on large
            // originals, well past reqwest's appetite by default
            http: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Turn an action-API error envelope into a typed error.
    ///
    /// The API reports failures as 200s with an `error` key in the body.
    fn check_for_error(body: Value) -> Result<Value, WikimediaError> {
        let Some(error) = body.get("error") else {
            return Ok(body);
        };

        let code = error["code"].as_str().unwrap_or("unknown").to_string();
        let info = error["info"].as_str().unwrap_or("").to_string();

        if code == "mwoauth-invalid-authorization" {
            return Err(WikimediaError::InvalidAccessToken);
        }

        Err(WikimediaError::Api { code, info })
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<Value, WikimediaError> {
        let resp = self
            .http
            .get(&self.api_url)
            .query(&[("format", "json")])
            .query(params)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Self::check_for_error(resp.json().await?)
    }

    async fn post(&self, params: &[(&str, &str)]) -> Result<Value, WikimediaError> {
        let token = self.get_csrf_token().await?;

        let mut form: Vec<(&str, &str)> = vec![("format", "json"), ("token", &token)];
        form.extend_from_slice(params);

        let resp = self
            .http
            .post(&self.api_url)
            .form(&form)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Self::check_for_error(resp.json().await?)
    }

    /// Get a CSRF token, required for all POST actions.
    async fn get_csrf_token(&self) -> Result<String, WikimediaError> {
        let resp = self
            .get(&[("action", "query"), ("meta", "tokens"), ("type", "csrf")])
            .await?;

        resp["query"]["tokens"]["csrftoken"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| WikimediaError::Unexpected(format!("no CSRF token in {resp}")))
    }
}

#[async_trait]
impl CommonsApi for WikimediaApi {
    async fn validate_title(&self, title: &str) -> Result<TitleValidation, WikimediaError> {
        debug_assert!(title.starts_with("File:"));

        // There's a maximum length of 240 bytes for UTF-8 encoded
        // filenames on Wikimedia Commons.
        //
        // See https://commons.wikimedia.org/wiki/Commons:File_naming#Length
        if title.len() > MAX_TITLE_BYTES {
            return Ok(TitleValidation::TooLong(
                "This title is too long. Please choose a title which is less than 240 bytes."
                    .to_string(),
            ));
        }

        // Is there already a page with this title? A missing page shows
        // up as the pseudo-ID "-1" in the response:
        //
        //     {"query": {"pages": {"-1": {…}}}}
        let existing = self
            .get(&[("action", "query"), ("titles", title), ("prop", "info")])
            .await?;

        let pages = existing["query"]["pages"]
            .as_object()
            .ok_or_else(|| WikimediaError::Unexpected(format!("no pages in {existing}")))?;

        if !(pages.len() == 1 && pages.contains_key("-1")) {
            return Ok(TitleValidation::Duplicate(format!(
                "Please choose a different title. \
                 There is already a file on Commons with the title {title}."
            )));
        }

        // Second check: is the title blocked? The blacklist covers titles
        // which are very common, uninformative, or spelled in ALLCAPS;
        // titles with forbidden characters come back as an invalidtitle
        // API error instead.
        //
        // See https://www.mediawiki.org/wiki/Extension:TitleBlacklist#Testing_for_matches
        let blacklist = match self
            .get(&[
                ("action", "titleblacklist"),
                ("tbaction", "create"),
                ("tbtitle", title),
            ])
            .await
        {
            Ok(resp) => resp,
            Err(WikimediaError::Api { code, .. }) if code == "invalidtitle" => {
                return Ok(TitleValidation::Invalid(
                    "Please choose a different, more descriptive title.".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        if blacklist["titleblacklist"]["result"] != "ok" {
            return Ok(TitleValidation::Blacklisted(
                "Please choose a different, more descriptive title.".to_string(),
            ));
        }

        Ok(TitleValidation::Ok)
    }

    async fn upload_image(
        &self,
        filename: &str,
        original_url: &str,
        text: &str,
    ) -> Result<String, WikimediaError> {
        let resp = self
            .post(&[
                ("action", "upload"),
                ("filename", filename),
                ("url", original_url),
                ("text", text),
            ])
            .await?;

        let upload = &resp["upload"];

        // A file with the same filename already exists:
        //
        //     {"upload": {"result": "Warning",
        //                 "warnings": {"exists": "RailwayMuseumClocks.jpg", …}}}
        if upload["result"] == "Warning" {
            if upload["warnings"]["exists"] == filename {
                return Err(WikimediaError::DuplicateFilename(filename.to_string()));
            }

            // The image matches a file already on Commons, possibly under
            // a different name:
            //
            //     {"upload": {"result": "Warning",
            //                 "warnings": {"duplicate": ["Yellow_Fin.jpg"]}}}
            if let Some(duplicates) = upload["warnings"]["duplicate"].as_array()
                && duplicates.len() == 1
            {
                let existing = duplicates[0].as_str().unwrap_or_default();
                return Err(WikimediaError::DuplicatePhoto(existing.to_string()));
            }
        }

        if upload["result"] != "Success" {
            return Err(WikimediaError::Unexpected(format!(
                "upload result was {resp}"
            )));
        }

        upload["filename"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| WikimediaError::Unexpected(format!("no filename in {resp}")))
    }

    async fn add_file_caption(
        &self,
        filename: &str,
        caption: &ShortCaption,
    ) -> Result<(), WikimediaError> {
        let title = format!("File:{filename}");

        let resp = self
            .post(&[
                ("action", "wbsetlabel"),
                ("site", "commonswiki"),
                ("title", &title),
                ("language", &caption.language),
                ("value", &caption.text),
            ])
            .await?;

        if resp["success"] == 1 {
            Ok(())
        } else {
            Err(WikimediaError::Unexpected(format!(
                "wbsetlabel response was {resp}"
            )))
        }
    }

    async fn add_structured_data(
        &self,
        filename: &str,
        claims: &Claims,
    ) -> Result<(), WikimediaError> {
        let title = format!("File:{filename}");
        let data = serde_json::to_string(claims)
            .map_err(|e| WikimediaError::Unexpected(format!("could not serialize claims: {e}")))?;

        let resp = self
            .post(&[
                ("action", "wbeditentity"),
                ("site", "commonswiki"),
                ("title", &title),
                ("data", &data),
            ])
            .await?;

        if resp["success"] == 1 {
            Ok(())
        } else {
            Err(WikimediaError::Unexpected(format!(
                "wbeditentity response was {resp}"
            )))
        }
    }
}
