//! Named constants for the Wikidata vocabulary we write, and conversions
//! into the Wikidata data model.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use super::model::{DataValue, EntityValue, TimeValue};

/// Named constants for Wikidata properties.
///
/// To see documentation for a particular property, go to
/// https://www.wikidata.org/wiki/Property:<PROPERTY_ID>
///
/// e.g. https://www.wikidata.org/wiki/Property:P2093
pub struct WikidataProperties;

impl WikidataProperties {
    pub const OPERATOR: &'static str = "P137";
    pub const APPLIES_TO_JURISDICTION: &'static str = "P1001";
    pub const CREATOR: &'static str = "P170";
    pub const DESCRIBED_AT_URL: &'static str = "P973";
    pub const DETERMINATION_METHOD: &'static str = "P459";
    pub const AUTHOR_NAME: &'static str = "P2093";
    pub const COORDINATES_OF_THE_POINT_OF_VIEW: &'static str = "P1259";
    pub const FLICKR_PHOTO_ID: &'static str = "P12120";
    pub const FLICKR_USER_ID: &'static str = "P3267";
    pub const URL: &'static str = "P2699";
    pub const SOURCE_OF_FILE: &'static str = "P7482";
    pub const COPYRIGHT_LICENSE: &'static str = "P275";
    pub const COPYRIGHT_STATUS: &'static str = "P6216";
    pub const INCEPTION: &'static str = "P571";
    pub const PUBLICATION_DATE: &'static str = "P577";
    pub const PUBLISHED_IN: &'static str = "P1433";
    pub const RETRIEVED: &'static str = "P813";
    pub const SOURCING_CIRCUMSTANCES: &'static str = "P1480";
}

/// Named constants for certain Wikidata entities.
///
/// To see documentation for a particular entity, go to
/// https://www.wikidata.org/wiki/<ENTITY_ID>
///
/// e.g. https://www.wikidata.org/wiki/Q103204
pub struct WikidataEntities;

impl WikidataEntities {
    pub const CIRCA: &'static str = "Q5727902";
    pub const COPYRIGHTED: &'static str = "Q50423863";
    pub const DEDICATED_TO_PUBLIC_DOMAIN_BY_COPYRIGHT_OWNER: &'static str = "Q88088423";
    pub const FILE_AVAILABLE_ON_INTERNET: &'static str = "Q74228490";
    pub const FLICKR: &'static str = "Q103204";
    pub const GREGORIAN_CALENDAR: &'static str = "Q1985727";
    pub const PUBLIC_DOMAIN: &'static str = "Q19652";
    pub const UNITED_STATES_OF_AMERICA: &'static str = "Q30";
    pub const WORK_OF_THE_FEDERAL_GOVERNMENT_OF_THE_UNITED_STATES: &'static str = "Q60671452";
}

/// Look up the Wikidata entity for a license ID.
///
/// We only map the license types used by Flickypedia -- we should never
/// be creating structured data for e.g. CC BY-NC.
pub fn license_entity_id(license_id: &str) -> Option<&'static str> {
    match license_id {
        "cc-by-2.0" => Some("Q19125117"),
        "cc-by-sa-2.0" => Some("Q19068220"),
        "cc-by-4.0" => Some("Q20007257"),
        "cc-by-sa-4.0" => Some("Q18199165"),
        "cc0-1.0" => Some("Q6938433"),
        "usgov" => Some("Q60671452"),
        "pdm" => Some("Q19652"),
        _ => None,
    }
}

/// An unknown property ID was passed to [`get_wikidata_property_label`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognisedPropertyError {
    pub property_id: String,
}

impl std::fmt::Display for UnrecognisedPropertyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unrecognised property ID: {}", self.property_id)
    }
}

impl std::error::Error for UnrecognisedPropertyError {}

/// Look up the English label of a Wikidata property.
///
/// This is a curated table covering the properties we write, not a
/// general-purpose lookup -- we're only using it to show the labels of
/// our own statements.
pub fn get_wikidata_property_label(id: &str) -> Result<&'static str, UnrecognisedPropertyError> {
    match id {
        "P137" => Ok("operator"),
        "P1001" => Ok("applies to jurisdiction"),
        "P170" => Ok("creator"),
        "P973" => Ok("described at url"),
        "P459" => Ok("determination method"),
        "P2093" => Ok("author name"),
        // Displayed as "location" rather than the full property name,
        // which is a mouthful on the upload preview
        "P1259" => Ok("location"),
        "P12120" => Ok("flickr photo id"),
        "P3267" => Ok("flickr user id"),
        "P2699" => Ok("url"),
        "P7482" => Ok("source of file"),
        "P275" => Ok("copyright license"),
        "P6216" => Ok("copyright status"),
        // "inception" on Wikidata, but Commons shows it as "date created"
        "P571" => Ok("date created"),
        "P577" => Ok("publication date"),
        "P1433" => Ok("published in"),
        "P813" => Ok("retrieved"),
        "P1480" => Ok("sourcing circumstances"),
        _ => Err(UnrecognisedPropertyError {
            property_id: id.to_string(),
        }),
    }
}

/// Precision of a date in the Wikidata model.
///
/// See https://www.wikidata.org/wiki/Help:Dates#Precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// Convert a UTC datetime to the Wikidata data model.
///
/// Components beyond the precision are zeroed, matching the behaviour of
/// the SDC visual editor -- Wikidata cannot store times finer than a day,
/// and a month-precision value has its day set to "00".
pub fn to_wikidata_date_value(d: &DateTime<Utc>, precision: DatePrecision) -> DataValue {
    let (time, precision_value) = match precision {
        DatePrecision::Day => (format!("+{:04}-{:02}-{:02}T00:00:00Z", d.year(), d.month(), d.day()), 11),
        DatePrecision::Month => (format!("+{:04}-{:02}-00T00:00:00Z", d.year(), d.month()), 10),
        DatePrecision::Year => (format!("+{:04}-00-00T00:00:00Z", d.year()), 9),
    };

    DataValue::Time(TimeValue {
        time,
        precision: precision_value,
        // All the timestamps we get from Flickr are in UTC
        timezone: 0,
        // Not used by Wikidata, but the API rejects dates without them
        before: 0,
        after: 0,
        calendarmodel: format!(
            "http://www.wikidata.org/entity/{}",
            WikidataEntities::GREGORIAN_CALENDAR
        ),
    })
}

/// Create a datavalue for a Wikidata entity.
pub fn to_wikidata_entity_value(entity_id: &str) -> DataValue {
    debug_assert!(
        entity_id.starts_with('Q') && entity_id[1..].bytes().all(|b| b.is_ascii_digit()),
        "not an entity ID: {entity_id}"
    );

    DataValue::WikibaseEntityId(EntityValue {
        id: entity_id.to_string(),
    })
}

/// Create a datavalue for a literal string.
pub fn to_wikidata_string_value(value: &str) -> DataValue {
    DataValue::String(value.to_string())
}

/// Flickr users that have their own Wikidata entity.
///
/// When we write a Creator statement we normally add qualifiers with the
/// user's name and profile URL, but if somebody has a Wikidata entity
/// which records their Flickr user ID, we link to that instead.
///
/// Only a couple of thousand Flickr users have Wikidata entities, so this
/// is a small table, loaded once at startup as configuration data.
#[derive(Debug, Clone, Default)]
pub struct FlickrUserLookup {
    by_user_id: HashMap<String, String>,
}

impl FlickrUserLookup {
    pub fn new(by_user_id: HashMap<String, String>) -> Self {
        FlickrUserLookup { by_user_id }
    }

    /// Parse a lookup table from a JSON object of user ID → entity ID,
    /// e.g. `{"47397743@N05": "Q7986087"}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(FlickrUserLookup {
            by_user_id: serde_json::from_str(json)?,
        })
    }

    /// The Q-ID of the entity for this Flickr user, if there is one.
    pub fn wikidata_entity_id(&self, user_id: &str) -> Option<&str> {
        self.by_user_id.get(user_id).map(String::as_str)
    }
}
