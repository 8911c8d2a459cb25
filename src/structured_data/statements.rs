//! Builders for the statements we attach to a Commons file.
//!
//! Every function here is a pure transformation from normalized Flickr
//! metadata into a [`Statement`]; nothing does I/O. The claim shapes are
//! documented at
//! https://commons.wikimedia.org/wiki/Commons:Flickypedia/Data_Modeling

use chrono::{DateTime, Utc};

use crate::models::{DateTaken, FlickrUser, LocationInfo, TakenDateGranularity, UploadRequest};

use super::model::{Claims, DataValue, GlobeCoordinateValue, Qualifiers, Snak, Statement};
use super::wikidata::{
    DatePrecision, FlickrUserLookup, WikidataEntities, WikidataProperties, license_entity_id,
    to_wikidata_date_value, to_wikidata_entity_value, to_wikidata_string_value,
};

/// A statement builder was given a value outside its curated tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdcError {
    UnrecognisedLicense(String),
    UnmappableCopyrightStatus(String),
    UnrecognisedAccuracy(u8),
}

impl std::fmt::Display for SdcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SdcError::UnrecognisedLicense(id) => write!(f, "Unrecognised license ID: {:?}", id),
            SdcError::UnmappableCopyrightStatus(id) => {
                write!(f, "Unable to map a copyright status for license {:?}", id)
            }
            SdcError::UnrecognisedAccuracy(accuracy) => {
                write!(f, "Unrecognised location accuracy: {}", accuracy)
            }
        }
    }
}

impl std::error::Error for SdcError {}

/// The way you specify qualifiers in the Wikidata model is roundabout:
/// the property ID is repeated inside a single-element list. This enum
/// lets builders list their qualifiers flat, and `create_qualifiers`
/// expands them to the required shape.
pub enum QualifierValue {
    String {
        property: &'static str,
        value: String,
    },
    Entity {
        property: &'static str,
        entity_id: &'static str,
    },
    Date {
        property: &'static str,
        date: DateTime<Utc>,
        precision: DatePrecision,
    },
}

impl QualifierValue {
    fn property(&self) -> &'static str {
        match self {
            QualifierValue::String { property, .. } => property,
            QualifierValue::Entity { property, .. } => property,
            QualifierValue::Date { property, .. } => property,
        }
    }

    fn datavalue(&self) -> DataValue {
        match self {
            QualifierValue::String { value, .. } => to_wikidata_string_value(value),
            QualifierValue::Entity { entity_id, .. } => to_wikidata_entity_value(entity_id),
            QualifierValue::Date {
                date, precision, ..
            } => to_wikidata_date_value(date, *precision),
        }
    }
}

fn create_qualifiers(values: &[QualifierValue]) -> (Qualifiers, Vec<String>) {
    let mut qualifiers = Qualifiers::new();
    let mut order = Vec::with_capacity(values.len());

    for value in values {
        let property = value.property();
        qualifiers.insert(
            property.to_string(),
            vec![Snak::value(property, value.datavalue())],
        );
        order.push(property.to_string());
    }

    (qualifiers, order)
}

/// Create a Creator statement for the user who posted a photo.
///
/// This is either:
///
/// *   A link to the corresponding Wikidata entity, or
/// *   A collection of values that link to their profile page
pub fn create_flickr_creator_statement(
    user: &FlickrUser,
    lookup: &FlickrUserLookup,
) -> Statement {
    if let Some(wikidata_id) = lookup.wikidata_entity_id(&user.id) {
        return Statement::new(Snak::value(
            WikidataProperties::CREATOR,
            to_wikidata_entity_value(wikidata_id),
        ));
    }

    let (qualifiers, _) = create_qualifiers(&[
        QualifierValue::String {
            property: WikidataProperties::FLICKR_USER_ID,
            value: user.id.clone(),
        },
        QualifierValue::String {
            property: WikidataProperties::AUTHOR_NAME,
            value: user.display_name().to_string(),
        },
        QualifierValue::String {
            property: WikidataProperties::URL,
            value: user.profile_url(),
        },
    ]);

    Statement::with_qualifiers(
        Snak::somevalue(WikidataProperties::CREATOR),
        qualifiers,
        vec![
            WikidataProperties::FLICKR_USER_ID.to_string(),
            WikidataProperties::AUTHOR_NAME.to_string(),
            WikidataProperties::URL.to_string(),
        ],
    )
}

/// Create a Flickr Photo ID statement.
///
/// This is a main statement rather than a qualifier on another statement,
/// to match the convention of e.g. YouTube video ID.
pub fn create_flickr_photo_id_statement(photo_id: &str) -> Statement {
    Statement::new(Snak::value(
        WikidataProperties::FLICKR_PHOTO_ID,
        to_wikidata_string_value(photo_id),
    ))
}

/// Create a "published in: Flickr" statement for the date a photo was
/// posted.
///
/// The publication-date qualifier is always day precision: Flickr gives
/// us a posting time to the second, but Wikidata cannot store anything
/// finer than a day.
pub fn create_published_in_statement(date_posted: &DateTime<Utc>) -> Statement {
    let (qualifiers, order) = create_qualifiers(&[QualifierValue::Date {
        property: WikidataProperties::PUBLICATION_DATE,
        date: *date_posted,
        precision: DatePrecision::Day,
    }]);

    Statement::with_qualifiers(
        Snak::value(
            WikidataProperties::PUBLISHED_IN,
            to_wikidata_entity_value(WikidataEntities::FLICKR),
        ),
        qualifiers,
        order,
    )
}

/// Create a copyright-license statement.
pub fn create_license_statement(license_id: &str) -> Result<Statement, SdcError> {
    let wikidata_license_id = license_entity_id(license_id)
        .ok_or_else(|| SdcError::UnrecognisedLicense(license_id.to_string()))?;

    Ok(Statement::new(Snak::value(
        WikidataProperties::COPYRIGHT_LICENSE,
        to_wikidata_entity_value(wikidata_license_id),
    )))
}

/// Create a copyright-status statement.
pub fn create_copyright_status_statement(license_id: &str) -> Result<Statement, SdcError> {
    match license_id {
        "cc-by-2.0" | "cc-by-sa-2.0" | "cc-by-4.0" | "cc-by-sa-4.0" => {
            Ok(Statement::new(Snak::value(
                WikidataProperties::COPYRIGHT_STATUS,
                to_wikidata_entity_value(WikidataEntities::COPYRIGHTED),
            )))
        }

        "usgov" => {
            let (qualifiers, order) = create_qualifiers(&[
                QualifierValue::Entity {
                    property: WikidataProperties::APPLIES_TO_JURISDICTION,
                    entity_id: WikidataEntities::UNITED_STATES_OF_AMERICA,
                },
                QualifierValue::Entity {
                    property: WikidataProperties::DETERMINATION_METHOD,
                    entity_id:
                        WikidataEntities::WORK_OF_THE_FEDERAL_GOVERNMENT_OF_THE_UNITED_STATES,
                },
            ]);

            Ok(Statement::with_qualifiers(
                Snak::value(
                    WikidataProperties::COPYRIGHT_STATUS,
                    to_wikidata_entity_value(WikidataEntities::PUBLIC_DOMAIN),
                ),
                qualifiers,
                order,
            ))
        }

        // See https://commons.wikimedia.org/wiki/Commons:Structured_data/Modeling/Copyright
        "cc0-1.0" | "pdm" => Ok(Statement::new(Snak::value(
            WikidataProperties::COPYRIGHT_STATUS,
            to_wikidata_entity_value(
                WikidataEntities::DEDICATED_TO_PUBLIC_DOMAIN_BY_COPYRIGHT_OWNER,
            ),
        ))),

        // We don't map all licenses here -- just the ones accepted on
        // Wikimedia Commons. We should never be creating SDC for photos
        // which can't be shared there.
        _ => Err(SdcError::UnmappableCopyrightStatus(license_id.to_string())),
    }
}

/// Create a source-of-file statement pointing back at the photo on Flickr.
pub fn create_source_statement(user_id: &str, photo_id: &str, jpeg_url: &str) -> Statement {
    let (qualifiers, order) = create_qualifiers(&[
        QualifierValue::String {
            property: WikidataProperties::DESCRIBED_AT_URL,
            value: format!("https://www.flickr.com/photos/{user_id}/{photo_id}/"),
        },
        QualifierValue::Entity {
            property: WikidataProperties::OPERATOR,
            entity_id: WikidataEntities::FLICKR,
        },
        QualifierValue::String {
            property: WikidataProperties::URL,
            value: jpeg_url.to_string(),
        },
    ]);

    Statement::with_qualifiers(
        Snak::value(
            WikidataProperties::SOURCE_OF_FILE,
            to_wikidata_entity_value(WikidataEntities::FILE_AVAILABLE_ON_INTERNET),
        ),
        qualifiers,
        order,
    )
}

/// Create a date-taken statement.
///
/// In most cases this is a single value with a precision attached, but
/// dates marked as "circa" on Flickr get an additional circa qualifier.
/// Dates Flickr marks as unknown produce no statement at all.
pub fn create_date_taken_statement(date_taken: &DateTaken) -> Option<Statement> {
    if date_taken.unknown {
        return None;
    }

    let precision = match date_taken.granularity {
        TakenDateGranularity::Second => DatePrecision::Day,
        TakenDateGranularity::Month => DatePrecision::Month,
        TakenDateGranularity::Year | TakenDateGranularity::Circa => DatePrecision::Year,
    };

    let mainsnak = Snak::value(
        WikidataProperties::INCEPTION,
        to_wikidata_date_value(&date_taken.value, precision),
    );

    if date_taken.granularity == TakenDateGranularity::Circa {
        let (qualifiers, order) = create_qualifiers(&[QualifierValue::Entity {
            property: WikidataProperties::SOURCING_CIRCUMSTANCES,
            entity_id: WikidataEntities::CIRCA,
        }]);

        Some(Statement::with_qualifiers(mainsnak, qualifiers, order))
    } else {
        Some(Statement::new(mainsnak))
    }
}

/// Create a "coordinates of the point of view" statement.
///
/// This is the location of the camera, not the location of the subject.
pub fn create_location_statement(location: &LocationInfo) -> Result<Statement, SdcError> {
    // Flickr's accuracy field runs 1-16 (world to street); Wikidata wants
    // a precision in degrees. Flickr doesn't publish a definitive mapping,
    // so these values come from matching each zoom level on the Flickr map
    // against what the Commons SDC visual editor records at the same scale.
    let precision = match location.accuracy {
        16 => 1e-05,
        14 | 15 => 2.777777777777778e-05,
        12 | 13 => 0.0001,
        11 => 0.0002777777777777778,
        7..=10 => 0.001,
        6 => 0.01,
        4 | 5 => 0.016666666666666666,
        1..=3 => 0.1,
        other => return Err(SdcError::UnrecognisedAccuracy(other)),
    };

    Ok(Statement::new(Snak::value(
        WikidataProperties::COORDINATES_OF_THE_POINT_OF_VIEW,
        DataValue::GlobeCoordinate(GlobeCoordinateValue {
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: None,
            precision,
            globe: "http://www.wikidata.org/entity/Q2".to_string(),
        }),
    )))
}

/// Create the complete claim set for a photo being copied to Commons.
pub fn create_sdc_claims_for_flickr_photo(
    request: &UploadRequest,
    lookup: &FlickrUserLookup,
) -> Result<Claims, SdcError> {
    let mut claims = vec![
        create_flickr_photo_id_statement(&request.photo_id),
        create_flickr_creator_statement(&request.user, lookup),
        create_source_statement(&request.user.id, &request.photo_id, &request.original_url),
        create_license_statement(&request.license_id)?,
        create_copyright_status_statement(&request.license_id)?,
    ];

    if let Some(location) = &request.location {
        claims.push(create_location_statement(location)?);
    }

    if let Some(date_taken) = &request.date_taken {
        claims.extend(create_date_taken_statement(date_taken));
    }

    claims.push(create_published_in_statement(&request.date_posted));

    Ok(Claims { claims })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShortCaption;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::HashMap;

    fn user_with_wikidata_entity() -> FlickrUser {
        FlickrUser {
            id: "47397743@N05".to_string(),
            username: None,
            realname: Some("WNDC".to_string()),
        }
    }

    fn lookup() -> FlickrUserLookup {
        FlickrUserLookup::new(HashMap::from([(
            "47397743@N05".to_string(),
            "Q7986087".to_string(),
        )]))
    }

    #[test]
    fn test_creator_statement_links_to_known_wikidata_entity() {
        let statement =
            create_flickr_creator_statement(&user_with_wikidata_entity(), &lookup());

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "snaktype": "value",
                    "property": "P170",
                    "datavalue": {
                        "type": "wikibase-entityid",
                        "value": {"id": "Q7986087"},
                    },
                },
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_creator_statement_for_unknown_user_carries_name_qualifiers() {
        let user = FlickrUser {
            id: "199246608@N02".to_string(),
            username: Some("Alex Chan".to_string()),
            realname: None,
        };

        let statement = create_flickr_creator_statement(&user, &lookup());

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "snaktype": "somevalue",
                    "property": "P170",
                },
                "qualifiers": {
                    "P2093": [{
                        "datavalue": {"type": "string", "value": "Alex Chan"},
                        "property": "P2093",
                        "snaktype": "value",
                    }],
                    "P2699": [{
                        "datavalue": {
                            "type": "string",
                            "value": "https://www.flickr.com/photos/199246608@N02/",
                        },
                        "property": "P2699",
                        "snaktype": "value",
                    }],
                    "P3267": [{
                        "datavalue": {"type": "string", "value": "199246608@N02"},
                        "property": "P3267",
                        "snaktype": "value",
                    }],
                },
                "qualifiers-order": ["P3267", "P2093", "P2699"],
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_creator_statement_prefers_realname_over_username() {
        let user = FlickrUser {
            id: "12403504@N02".to_string(),
            username: Some("The British Library".to_string()),
            realname: Some("British Library".to_string()),
        };

        let statement = create_flickr_creator_statement(&user, &FlickrUserLookup::default());
        let value = serde_json::to_value(&statement).unwrap();

        assert_eq!(
            value["qualifiers"]["P2093"][0]["datavalue"]["value"],
            "British Library"
        );
    }

    #[test]
    fn test_creator_statement_for_nameless_user() {
        let user = FlickrUser {
            id: "12345678@N00".to_string(),
            username: None,
            realname: None,
        };

        let statement = create_flickr_creator_statement(&user, &FlickrUserLookup::default());
        let value = serde_json::to_value(&statement).unwrap();

        assert_eq!(
            value["qualifiers"]["P2093"][0]["datavalue"]["value"],
            "name unknown"
        );
    }

    #[test]
    fn test_flickr_photo_id_statement() {
        let statement = create_flickr_photo_id_statement("1234567");

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "datavalue": {"value": "1234567", "type": "string"},
                    "property": "P12120",
                    "snaktype": "value",
                },
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_published_in_statement() {
        let date_posted = Utc.with_ymd_and_hms(2023, 10, 12, 0, 0, 0).unwrap();
        let statement = create_published_in_statement(&date_posted);

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "snaktype": "value",
                    "property": "P1433",
                    "datavalue": {
                        "type": "wikibase-entityid",
                        "value": {"id": "Q103204"},
                    },
                },
                "qualifiers": {
                    "P577": [{
                        "datavalue": {
                            "type": "time",
                            "value": {
                                "time": "+2023-10-12T00:00:00Z",
                                "precision": 11,
                                "timezone": 0,
                                "before": 0,
                                "after": 0,
                                "calendarmodel": "http://www.wikidata.org/entity/Q1985727",
                            },
                        },
                        "property": "P577",
                        "snaktype": "value",
                    }],
                },
                "qualifiers-order": ["P577"],
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_published_in_statement_truncates_to_day_precision() {
        // Two posting times on the same day must produce the same statement
        let morning = Utc.with_ymd_and_hms(2023, 10, 12, 6, 30, 15).unwrap();
        let evening = Utc.with_ymd_and_hms(2023, 10, 12, 22, 1, 59).unwrap();

        assert_eq!(
            create_published_in_statement(&morning),
            create_published_in_statement(&evening)
        );
    }

    #[test]
    fn test_license_statement() {
        let statement = create_license_statement("cc-by-2.0").unwrap();

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "snaktype": "value",
                    "property": "P275",
                    "datavalue": {
                        "type": "wikibase-entityid",
                        "value": {"id": "Q19125117"},
                    },
                },
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_license_statement_fails_if_unrecognised_license() {
        assert_eq!(
            create_license_statement("mystery"),
            Err(SdcError::UnrecognisedLicense("mystery".to_string()))
        );
    }

    #[test]
    fn test_copyright_status_copyrighted() {
        let statement = create_copyright_status_statement("cc-by-2.0").unwrap();
        let value = serde_json::to_value(&statement).unwrap();

        assert_eq!(value["mainsnak"]["property"], "P6216");
        assert_eq!(
            value["mainsnak"]["datavalue"]["value"]["id"],
            "Q50423863"
        );
        assert!(value.get("qualifiers").is_none());
    }

    #[test]
    fn test_copyright_status_usgov_carries_jurisdiction_qualifiers() {
        let statement = create_copyright_status_statement("usgov").unwrap();

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "snaktype": "value",
                    "property": "P6216",
                    "datavalue": {
                        "type": "wikibase-entityid",
                        "value": {"id": "Q19652"},
                    },
                },
                "qualifiers": {
                    "P1001": [{
                        "datavalue": {
                            "type": "wikibase-entityid",
                            "value": {"id": "Q30"},
                        },
                        "property": "P1001",
                        "snaktype": "value",
                    }],
                    "P459": [{
                        "datavalue": {
                            "type": "wikibase-entityid",
                            "value": {"id": "Q60671452"},
                        },
                        "property": "P459",
                        "snaktype": "value",
                    }],
                },
                "qualifiers-order": ["P1001", "P459"],
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_copyright_status_public_domain_dedication() {
        for license_id in ["cc0-1.0", "pdm"] {
            let statement = create_copyright_status_statement(license_id).unwrap();
            let value = serde_json::to_value(&statement).unwrap();

            assert_eq!(
                value["mainsnak"]["datavalue"]["value"]["id"],
                "Q88088423"
            );
        }
    }

    #[test]
    fn test_copyright_status_fails_for_unmappable_license() {
        assert_eq!(
            create_copyright_status_statement("nkcr"),
            Err(SdcError::UnmappableCopyrightStatus("nkcr".to_string()))
        );
    }

    #[test]
    fn test_source_statement() {
        let statement = create_source_statement(
            "199246608@N02",
            "53248015596",
            "https://live.staticflickr.com/65535/53248015596_c03f8123cf_o_d.jpg",
        );

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "snaktype": "value",
                    "property": "P7482",
                    "datavalue": {
                        "type": "wikibase-entityid",
                        "value": {"id": "Q74228490"},
                    },
                },
                "qualifiers": {
                    "P973": [{
                        "datavalue": {
                            "type": "string",
                            "value": "https://www.flickr.com/photos/199246608@N02/53248015596/",
                        },
                        "property": "P973",
                        "snaktype": "value",
                    }],
                    "P137": [{
                        "datavalue": {
                            "type": "wikibase-entityid",
                            "value": {"id": "Q103204"},
                        },
                        "property": "P137",
                        "snaktype": "value",
                    }],
                    "P2699": [{
                        "datavalue": {
                            "type": "string",
                            "value": "https://live.staticflickr.com/65535/53248015596_c03f8123cf_o_d.jpg",
                        },
                        "property": "P2699",
                        "snaktype": "value",
                    }],
                },
                "qualifiers-order": ["P973", "P137", "P2699"],
                "type": "statement",
            })
        );
    }

    fn date_taken(
        y: i32,
        m: u32,
        d: u32,
        granularity: TakenDateGranularity,
    ) -> DateTaken {
        DateTaken {
            value: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
            granularity,
            unknown: false,
        }
    }

    #[test]
    fn test_date_taken_statement_precisions() {
        // Based on https://www.flickr.com/photos/184374196@N07/53069446440
        let statement =
            create_date_taken_statement(&date_taken(2023, 2, 20, TakenDateGranularity::Second))
                .unwrap();
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["mainsnak"]["property"], "P571");
        assert_eq!(
            value["mainsnak"]["datavalue"]["value"]["time"],
            "+2023-02-20T00:00:00Z"
        );
        assert_eq!(value["mainsnak"]["datavalue"]["value"]["precision"], 11);

        // Based on https://www.flickr.com/photos/normko/361850789
        let statement =
            create_date_taken_statement(&date_taken(1970, 3, 1, TakenDateGranularity::Month))
                .unwrap();
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(
            value["mainsnak"]["datavalue"]["value"]["time"],
            "+1970-03-00T00:00:00Z"
        );
        assert_eq!(value["mainsnak"]["datavalue"]["value"]["precision"], 10);

        // Based on https://www.flickr.com/photos/nationalarchives/5240741057
        let statement =
            create_date_taken_statement(&date_taken(1950, 1, 1, TakenDateGranularity::Year))
                .unwrap();
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(
            value["mainsnak"]["datavalue"]["value"]["time"],
            "+1950-00-00T00:00:00Z"
        );
        assert_eq!(value["mainsnak"]["datavalue"]["value"]["precision"], 9);
    }

    #[test]
    fn test_date_taken_statement_circa() {
        // Based on https://www.flickr.com/photos/nlireland/6975991819
        let statement =
            create_date_taken_statement(&date_taken(1910, 1, 1, TakenDateGranularity::Circa))
                .unwrap();

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "datavalue": {
                        "type": "time",
                        "value": {
                            "time": "+1910-00-00T00:00:00Z",
                            "precision": 9,
                            "timezone": 0,
                            "before": 0,
                            "after": 0,
                            "calendarmodel": "http://www.wikidata.org/entity/Q1985727",
                        },
                    },
                    "property": "P571",
                    "snaktype": "value",
                },
                "qualifiers": {
                    "P1480": [{
                        "datavalue": {
                            "type": "wikibase-entityid",
                            "value": {"id": "Q5727902"},
                        },
                        "property": "P1480",
                        "snaktype": "value",
                    }],
                },
                "qualifiers-order": ["P1480"],
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_unknown_date_taken_produces_no_statement() {
        let mut dt = date_taken(2020, 1, 1, TakenDateGranularity::Second);
        dt.unknown = true;

        assert_eq!(create_date_taken_statement(&dt), None);
    }

    #[test]
    fn test_location_statement() {
        let statement = create_location_statement(&LocationInfo {
            latitude: 9.135158,
            longitude: 40.083811,
            accuracy: 16,
        })
        .unwrap();

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "mainsnak": {
                    "datavalue": {
                        "type": "globecoordinate",
                        "value": {
                            "latitude": 9.135158,
                            "longitude": 40.083811,
                            "altitude": null,
                            "precision": 1e-05,
                            "globe": "http://www.wikidata.org/entity/Q2",
                        },
                    },
                    "property": "P1259",
                    "snaktype": "value",
                },
                "type": "statement",
            })
        );
    }

    #[test]
    fn test_location_statement_fails_for_unrecognised_accuracy() {
        let result = create_location_statement(&LocationInfo {
            latitude: 0.0,
            longitude: 0.0,
            accuracy: 0,
        });

        assert_eq!(result, Err(SdcError::UnrecognisedAccuracy(0)));
    }

    fn upload_request() -> UploadRequest {
        UploadRequest {
            photo_id: "32812033543".to_string(),
            user: FlickrUser {
                id: "30884892@N08".to_string(),
                username: Some("U.S. Coast Guard".to_string()),
                realname: Some("Coast Guard".to_string()),
            },
            title: "Puppy Kisses.jpg".to_string(),
            caption: ShortCaption {
                language: "en".to_string(),
                text: "A Coast Guard puppy".to_string(),
            },
            date_taken: Some(DateTaken {
                value: Utc.with_ymd_and_hms(2017, 2, 17, 0, 0, 0).unwrap(),
                granularity: TakenDateGranularity::Second,
                unknown: false,
            }),
            date_posted: Utc.with_ymd_and_hms(2017, 3, 24, 17, 27, 52).unwrap(),
            license_id: "usgov".to_string(),
            photo_url: "https://www.flickr.com/photos/coast_guard/32812033543/".to_string(),
            original_url: "https://live.staticflickr.com/2903/32812033543_c1b3784192_o_d.jpg"
                .to_string(),
            location: None,
        }
    }

    #[test]
    fn test_full_claim_set() {
        let claims =
            create_sdc_claims_for_flickr_photo(&upload_request(), &FlickrUserLookup::default())
                .unwrap();

        let properties: Vec<&str> = claims
            .claims
            .iter()
            .map(|s| s.mainsnak.property.as_str())
            .collect();

        assert_eq!(
            properties,
            vec!["P12120", "P170", "P7482", "P275", "P6216", "P571", "P1433"]
        );
    }

    #[test]
    fn test_full_claim_set_skips_unknown_date_taken() {
        let mut request = upload_request();
        request.date_taken.as_mut().unwrap().unknown = true;

        let claims =
            create_sdc_claims_for_flickr_photo(&request, &FlickrUserLookup::default()).unwrap();

        assert!(
            !claims
                .claims
                .iter()
                .any(|s| s.mainsnak.property == "P571")
        );
    }

    #[test]
    fn test_full_claim_set_fails_for_unshareable_license() {
        let mut request = upload_request();
        request.license_id = "in-copyright".to_string();

        assert!(create_sdc_claims_for_flickr_photo(&request, &FlickrUserLookup::default()).is_err());
    }
}
