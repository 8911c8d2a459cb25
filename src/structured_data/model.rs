//! Serde model for structured-data statements.
//!
//! These types serialize to the exact JSON the `wbeditentity` API expects
//! in its `data` parameter; see
//! https://www.wikidata.org/w/api.php?modules=wbeditentity&action=help

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A datavalue in the Wikidata model.
///
/// This is a closed set: we only ever write the value types used by
/// our own statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DataValue {
    #[serde(rename = "string")]
    String(String),
    #[serde(rename = "wikibase-entityid")]
    WikibaseEntityId(EntityValue),
    #[serde(rename = "time")]
    Time(TimeValue),
    #[serde(rename = "globecoordinate")]
    GlobeCoordinate(GlobeCoordinateValue),
}

/// Reference to a Wikidata entity, e.g. `{"id": "Q103204"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    pub id: String,
}

/// A date in the Wikidata time model.
///
/// The unused `before`/`after` fields and the `calendarmodel` are
/// required by the API even though it ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeValue {
    /// e.g. `+2023-10-12T00:00:00Z`; components beyond the precision
    /// are zeroed
    pub time: String,
    pub precision: u8,
    pub timezone: i64,
    pub before: i64,
    pub after: i64,
    pub calendarmodel: String,
}

/// A coordinate on Earth in the Wikidata model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeCoordinateValue {
    pub latitude: f64,
    pub longitude: f64,
    /// Always null: Wikidata does not model altitude for these claims
    pub altitude: Option<f64>,
    pub precision: f64,
    pub globe: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakType {
    Value,
    SomeValue,
    NoValue,
}

/// The value-bearing part of a statement or qualifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snak {
    pub snaktype: SnakType,
    pub property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datavalue: Option<DataValue>,
}

impl Snak {
    /// A `snaktype=value` snak for the given property.
    pub fn value(property: &str, datavalue: DataValue) -> Self {
        Snak {
            snaktype: SnakType::Value,
            property: property.to_string(),
            datavalue: Some(datavalue),
        }
    }

    /// A `snaktype=somevalue` snak: the property applies, but the value
    /// is unknown or expressed only through qualifiers.
    pub fn somevalue(property: &str) -> Self {
        Snak {
            snaktype: SnakType::SomeValue,
            property: property.to_string(),
            datavalue: None,
        }
    }
}

/// Qualifiers are keyed by property ID; the Wikidata model wraps each
/// value in a single-element list.
pub type Qualifiers = BTreeMap<String, Vec<Snak>>;

/// A single structured-data statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub mainsnak: Snak,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<Qualifiers>,
    #[serde(
        rename = "qualifiers-order",
        skip_serializing_if = "Option::is_none"
    )]
    pub qualifiers_order: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub statement_type: String,
}

impl Statement {
    /// A statement with no qualifiers.
    pub fn new(mainsnak: Snak) -> Self {
        Statement {
            mainsnak,
            qualifiers: None,
            qualifiers_order: None,
            statement_type: "statement".to_string(),
        }
    }

    /// A statement with qualifiers in an explicit order.
    pub fn with_qualifiers(
        mainsnak: Snak,
        qualifiers: Qualifiers,
        qualifiers_order: Vec<String>,
    ) -> Self {
        Statement {
            mainsnak,
            qualifiers: Some(qualifiers),
            qualifiers_order: Some(qualifiers_order),
            statement_type: "statement".to_string(),
        }
    }
}

/// The claim set sent in the `data` parameter of `wbeditentity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub claims: Vec<Statement>,
}
