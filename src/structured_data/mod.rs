//! Structured data ("SDC") for Wikimedia Commons files.
//!
//! Builds the statements sent in the `data` parameter of the
//! `wbeditentity` API. If you want to see what the output looks like,
//! the tests in `statements.rs` contain examples of the JSON we send.

pub mod model;
pub mod statements;
pub mod wikidata;

pub use model::{Claims, Statement};
pub use statements::{SdcError, create_sdc_claims_for_flickr_photo};
pub use wikidata::{FlickrUserLookup, get_wikidata_property_label};
