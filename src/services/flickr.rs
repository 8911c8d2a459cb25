//! Client for the Flickr API, and normalization of its responses.
//!
//! The client is a thin wrapper: it fetches JSON and maps Flickr's
//! `stat=fail` envelope to typed errors. The interesting part is the
//! normalizers, which turn Flickr's raw fields (string timestamps,
//! numeric granularity codes, empty-string names) into the records the
//! rest of the system consumes.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::constants::{FLICKR_API_URL, USER_AGENT};
use crate::models::{DateTaken, FlickrUser, LocationInfo, TakenDateGranularity};

#[derive(Debug)]
pub enum FlickrError {
    Http(reqwest::Error),
    Api { code: i64, message: String },
    /// Error code 1 from the API: the photo/user doesn't exist
    ResourceNotFound(String),
    UnrecognisedGranularity(u8),
    UnrecognisedLicense(String),
    InvalidDate(String),
    /// Downloads are disabled for this photo, so there's no
    /// original-size URL to upload from
    NoOriginalSize(String),
}

impl From<reqwest::Error> for FlickrError {
    fn from(e: reqwest::Error) -> Self {
        FlickrError::Http(e)
    }
}

impl std::fmt::Display for FlickrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlickrError::Http(e) => write!(f, "HTTP error: {}", e),
            FlickrError::Api { code, message } => {
                write!(f, "Flickr API error {}: {}", code, message)
            }
            FlickrError::ResourceNotFound(what) => write!(f, "Not found on Flickr: {}", what),
            FlickrError::UnrecognisedGranularity(code) => {
                write!(f, "Unrecognised taken_granularity: {}", code)
            }
            FlickrError::UnrecognisedLicense(code) => {
                write!(f, "Unrecognised license code: {:?}", code)
            }
            FlickrError::InvalidDate(raw) => write!(f, "Could not parse date: {:?}", raw),
            FlickrError::NoOriginalSize(photo_id) => {
                write!(f, "No original size available for photo {}", photo_id)
            }
        }
    }
}

impl std::error::Error for FlickrError {}

/// Map a numeric license code from the Flickr API to the short license
/// ID used throughout the codebase.
///
/// See https://www.flickr.com/services/api/flickr.photos.licenses.getInfo.html
pub fn lookup_license_code(code: &str) -> Result<&'static str, FlickrError> {
    match code {
        "0" => Ok("in-copyright"),
        "1" => Ok("cc-by-nc-sa-2.0"),
        "2" => Ok("cc-by-nc-2.0"),
        "3" => Ok("cc-by-nc-nd-2.0"),
        "4" => Ok("cc-by-2.0"),
        "5" => Ok("cc-by-sa-2.0"),
        "6" => Ok("cc-by-nd-2.0"),
        "7" => Ok("nkcr"),
        "8" => Ok("usgov"),
        "9" => Ok("cc0-1.0"),
        "10" => Ok("pdm"),
        _ => Err(FlickrError::UnrecognisedLicense(code.to_string())),
    }
}

/// Build a `FlickrUser` from the raw owner/person fields.
///
/// Flickr sends hidden names as empty strings rather than omitting them.
pub fn normalize_user(
    id: &str,
    username: Option<&str>,
    realname: Option<&str>,
) -> FlickrUser {
    let non_empty = |s: Option<&str>| {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    FlickrUser {
        id: id.to_string(),
        username: non_empty(username),
        realname: non_empty(realname),
    }
}

/// Parse a "taken date" from the raw Flickr fields.
///
/// `raw_value` looks like `2017-02-17 00:00:00` and is nominally local
/// to wherever the photo was taken; Flickr doesn't record a timezone, so
/// we treat it as UTC, which is what the upstream tooling does too.
pub fn normalize_date_taken(
    raw_value: &str,
    raw_granularity: u8,
    unknown: bool,
) -> Result<DateTaken, FlickrError> {
    let granularity = TakenDateGranularity::from_code(raw_granularity)
        .ok_or(FlickrError::UnrecognisedGranularity(raw_granularity))?;

    let value = NaiveDateTime::parse_from_str(raw_value, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| FlickrError::InvalidDate(raw_value.to_string()))?
        .and_utc();

    Ok(DateTaken {
        value,
        granularity,
        unknown,
    })
}

/// Parse a "posted date", which Flickr sends as a Unix timestamp string.
pub fn parse_date_posted(raw: &str) -> Result<DateTime<Utc>, FlickrError> {
    let timestamp: i64 = raw
        .parse()
        .map_err(|_| FlickrError::InvalidDate(raw.to_string()))?;

    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| FlickrError::InvalidDate(raw.to_string()))
}

/// Normalized information about a single photo, ready to build an
/// upload request from.
#[derive(Debug, Clone)]
pub struct PhotoData {
    pub id: String,
    pub owner: FlickrUser,
    pub title: Option<String>,
    pub license_id: String,
    pub date_posted: DateTime<Utc>,
    pub date_taken: DateTaken,
    pub photo_page_url: String,
    pub original_url: String,
    pub location: Option<LocationInfo>,
}

// Wire format for flickr.photos.getInfo. Flickr's JSON wraps most text
// in `{"_content": …}` objects, and numbers arrive as strings.

#[derive(Debug, Deserialize)]
struct GetInfoResponse {
    photo: RawPhoto,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    id: String,
    license: String,
    owner: RawOwner,
    title: Option<RawContent>,
    dates: RawDates,
    urls: RawUrls,
    location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    nsid: String,
    username: Option<String>,
    realname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(rename = "_content")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawDates {
    posted: String,
    taken: String,
    // String in most responses, but occasionally a bare number
    takengranularity: Value,
    takenunknown: Value,
}

#[derive(Debug, Deserialize)]
struct RawUrls {
    url: Vec<RawUrl>,
}

#[derive(Debug, Deserialize)]
struct RawUrl {
    #[serde(rename = "type")]
    url_type: String,
    #[serde(rename = "_content")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: String,
    longitude: String,
    accuracy: String,
}

#[derive(Debug, Deserialize)]
struct GetSizesResponse {
    sizes: RawSizes,
}

#[derive(Debug, Deserialize)]
struct RawSizes {
    size: Vec<RawSize>,
}

#[derive(Debug, Deserialize)]
struct RawSize {
    label: String,
    source: String,
}

/// Read one of Flickr's string-or-number fields as a number.
fn flexible_u8(value: &Value) -> Option<u8> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        _ => None,
    }
}

#[derive(Clone)]
pub struct FlickrApi {
    http: Client,
    api_url: String,
    api_key: String,
}

impl FlickrApi {
    pub fn new(api_key: &str) -> Self {
        Self::with_api_url(api_key, FLICKR_API_URL)
    }

    pub fn with_api_url(api_key: &str, api_url: &str) -> Self {
        Self {
            http: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Call one API method and unwrap Flickr's response envelope.
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<Value, FlickrError> {
        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
                ("nojsoncallback", "1"),
            ])
            .query(params)
            .send()
            .await?;

        let body: Value = resp.json().await?;

        // Failures come back as:
        //
        //     {"stat": "fail", "code": 1, "message": "Photo not found"}
        //
        // Code 1 consistently means "not found" across endpoints.
        if body["stat"] == "fail" {
            let code = body["code"].as_i64().unwrap_or(-1);
            let message = body["message"].as_str().unwrap_or("").to_string();

            if code == 1 {
                return Err(FlickrError::ResourceNotFound(message));
            }
            return Err(FlickrError::Api { code, message });
        }

        Ok(body)
    }

    /// Look up the information for a single photo.
    pub async fn get_single_photo(&self, photo_id: &str) -> Result<PhotoData, FlickrError> {
        let info_body = self
            .call("flickr.photos.getInfo", &[("photo_id", photo_id)])
            .await?;
        let sizes_body = self
            .call("flickr.photos.getSizes", &[("photo_id", photo_id)])
            .await?;

        let info: GetInfoResponse = serde_json::from_value(info_body)
            .map_err(|e| FlickrError::Api {
                code: -1,
                message: format!("unexpected getInfo response: {e}"),
            })?;
        let sizes: GetSizesResponse = serde_json::from_value(sizes_body)
            .map_err(|e| FlickrError::Api {
                code: -1,
                message: format!("unexpected getSizes response: {e}"),
            })?;

        let photo = info.photo;

        let owner = normalize_user(
            &photo.owner.nsid,
            photo.owner.username.as_deref(),
            photo.owner.realname.as_deref(),
        );

        let granularity = flexible_u8(&photo.dates.takengranularity).ok_or_else(|| {
            FlickrError::InvalidDate(photo.dates.takengranularity.to_string())
        })?;
        let unknown = flexible_u8(&photo.dates.takenunknown) == Some(1);
        let date_taken = normalize_date_taken(&photo.dates.taken, granularity, unknown)?;
        let date_posted = parse_date_posted(&photo.dates.posted)?;

        let photo_page_url = photo
            .urls
            .url
            .iter()
            .find(|u| u.url_type == "photopage")
            .map(|u| u.content.clone())
            .unwrap_or_else(|| format!("https://www.flickr.com/photos/{}/{}/", owner.id, photo.id));

        // The "Original" size is not guaranteed for all photos (users can
        // disable downloads), but it's always available for CC-licensed
        // and public-domain photos, which is everything we can upload.
        let original_url = sizes
            .sizes
            .size
            .iter()
            .find(|s| s.label == "Original")
            .map(|s| s.source.clone())
            .ok_or_else(|| FlickrError::NoOriginalSize(photo.id.clone()))?;

        let location = photo.location.as_ref().and_then(|loc| {
            Some(LocationInfo {
                latitude: loc.latitude.parse().ok()?,
                longitude: loc.longitude.parse().ok()?,
                accuracy: loc.accuracy.parse().ok()?,
            })
        });

        Ok(PhotoData {
            id: photo.id,
            owner,
            title: photo.title.map(|t| t.content).filter(|t| !t.is_empty()),
            license_id: lookup_license_code(&photo.license)?.to_string(),
            date_posted,
            date_taken,
            photo_page_url,
            original_url,
            location,
        })
    }

    /// Fetch a user's info by their user ID.
    pub async fn get_user_info(&self, user_id: &str) -> Result<FlickrUser, FlickrError> {
        let info_body = self
            .call("flickr.people.getInfo", &[("user_id", user_id)])
            .await?;
        let person = &info_body["person"];

        Ok(normalize_user(
            user_id,
            person["username"]["_content"].as_str(),
            person["realname"]["_content"].as_str(),
        ))
    }

    /// Given the link to a user's photos or profile, return their info.
    pub async fn lookup_user(&self, user_url: &str) -> Result<FlickrUser, FlickrError> {
        let lookup_body = self
            .call("flickr.urls.lookupUser", &[("url", user_url)])
            .await?;

        let user_id = lookup_body["user"]["id"]
            .as_str()
            .ok_or_else(|| FlickrError::Api {
                code: -1,
                message: format!("unexpected lookupUser response: {lookup_body}"),
            })?
            .to_string();

        self.get_user_info(&user_id).await
    }
}
