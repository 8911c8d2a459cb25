//! Wikitext for the file description page on Wikimedia Commons.
//!
//! See https://en.wikipedia.org/wiki/Help:Wikitext

use crate::models::{DateTaken, FlickrUser, TakenDateGranularity};

/// Creates the wikitext for a Flickr photo being uploaded to Commons.
pub fn create_wikitext(
    photo_url: &str,
    date_taken: Option<&DateTaken>,
    user: &FlickrUser,
    license_id: &str,
) -> String {
    let date_string = render_date_taken(date_taken);

    format!(
        "=={{{{int:filedesc}}}}==\n\
         {{{{Information\n\
         |Source=[{photo_url}]\n\
         |Date={date_string}\n\
         |Author=[https://www.flickr.com/people/{user_id} {author}]\n\
         |Permission=\n\
         |other_versions=\n\
         }}}}\n\
         \n\
         =={{{{int:license-header}}}}==\n\
         {{{{{license_id}}}}}\n",
        user_id = user.id,
        author = user.display_name(),
    )
}

/// Render a taken date at its claimed granularity.
///
/// Circa and unknown dates use the Commons templates for approximate
/// dates; see https://commons.wikimedia.org/wiki/Template:Circa and
/// https://commons.wikimedia.org/wiki/Template:Other_date
fn render_date_taken(date_taken: Option<&DateTaken>) -> String {
    let Some(date_taken) = date_taken else {
        return "{{Other date|?}}".to_string();
    };

    if date_taken.unknown {
        return "{{Other date|?}}".to_string();
    }

    match date_taken.granularity {
        TakenDateGranularity::Second => {
            date_taken.value.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        TakenDateGranularity::Month => date_taken.value.format("%Y-%m").to_string(),
        TakenDateGranularity::Year => date_taken.value.format("%Y").to_string(),
        TakenDateGranularity::Circa => date_taken.value.format("{{circa|%Y}}").to_string(),
    }
}
