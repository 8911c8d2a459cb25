//! Application constants

/// User-Agent sent with every outbound API request
pub const USER_AGENT: &str =
    "Flickypedia/0.1 (https://commons.wikimedia.org/wiki/Commons:Flickypedia)";

/// Wikimedia Commons action API endpoint
pub const COMMONS_API_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Flickr REST API endpoint
pub const FLICKR_API_URL: &str = "https://api.flickr.com/services/rest/";

/// Default directory for in-progress task records
pub const DEFAULT_PROGRESS_DIR: &str = "data/in_progress";

/// Maximum length of a Commons filename, in UTF-8 encoded bytes
pub const MAX_TITLE_BYTES: usize = 240;

/// Default language for file captions
pub const DEFAULT_CAPTION_LANGUAGE: &str = "en";
