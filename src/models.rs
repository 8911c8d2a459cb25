//! Shared data models used across modules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Granularity of a Flickr "taken date".
///
/// Flickr reports this as a numeric code; see "Photo Dates".
/// https://www.flickr.com/services/api/misc.dates.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TakenDateGranularity {
    Second,
    Month,
    Year,
    Circa,
}

impl TakenDateGranularity {
    /// Map a raw granularity code from the Flickr API.
    ///
    /// The API only ever emits 0, 4, 6 and 8; anything else is treated
    /// as unrecognised by the normalizer.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TakenDateGranularity::Second),
            4 => Some(TakenDateGranularity::Month),
            6 => Some(TakenDateGranularity::Year),
            8 => Some(TakenDateGranularity::Circa),
            _ => None,
        }
    }
}

/// A "taken date" from the Flickr API.
///
/// When `unknown` is set, the value is a Flickr-supplied placeholder and
/// must not be turned into a date-taken claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTaken {
    pub value: DateTime<Utc>,
    pub granularity: TakenDateGranularity,
    pub unknown: bool,
}

/// The author of a photo on Flickr.
///
/// Both names are optional: Flickr users can hide their real name, and a
/// handful of very old accounts have no username either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlickrUser {
    pub id: String,
    pub username: Option<String>,
    pub realname: Option<String>,
}

impl FlickrUser {
    /// The best human-readable name we have for this user.
    pub fn display_name(&self) -> &str {
        self.realname
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("name unknown")
    }

    /// Link to the user's photostream.
    pub fn profile_url(&self) -> String {
        format!("https://www.flickr.com/photos/{}/", self.id)
    }
}

/// A short caption for a file on Wikimedia Commons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortCaption {
    pub language: String,
    pub text: String,
}

/// Where a geotagged photo was taken from (the camera position, not
/// the subject).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: u8,
}

/// Everything the upload job needs to copy one photo to Commons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub photo_id: String,
    pub user: FlickrUser,
    /// Commons filename without the `File:` prefix, e.g. `Clock.jpg`
    pub title: String,
    pub caption: ShortCaption,
    pub date_taken: Option<DateTaken>,
    pub date_posted: DateTime<Utc>,
    pub license_id: String,
    /// The photo's page on Flickr
    pub photo_url: String,
    /// Source URL for the original-size image file
    pub original_url: String,
    pub location: Option<LocationInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_codes() {
        assert_eq!(
            TakenDateGranularity::from_code(0),
            Some(TakenDateGranularity::Second)
        );
        assert_eq!(
            TakenDateGranularity::from_code(4),
            Some(TakenDateGranularity::Month)
        );
        assert_eq!(
            TakenDateGranularity::from_code(6),
            Some(TakenDateGranularity::Year)
        );
        assert_eq!(
            TakenDateGranularity::from_code(8),
            Some(TakenDateGranularity::Circa)
        );
        assert_eq!(TakenDateGranularity::from_code(5), None);
    }

    #[test]
    fn test_display_name_prefers_realname() {
        let user = FlickrUser {
            id: "199246608@N02".to_string(),
            username: Some("cefarrjf87".to_string()),
            realname: Some("Alex Chan".to_string()),
        };
        assert_eq!(user.display_name(), "Alex Chan");

        let user = FlickrUser {
            id: "35591378@N03".to_string(),
            username: Some("Obama White House Archived".to_string()),
            realname: None,
        };
        assert_eq!(user.display_name(), "Obama White House Archived");

        let user = FlickrUser {
            id: "12345678@N00".to_string(),
            username: None,
            realname: None,
        };
        assert_eq!(user.display_name(), "name unknown");
    }
}
