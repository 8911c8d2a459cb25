mod constants;
mod models;
mod progress;
mod routes;
mod services;
mod structured_data;
mod uploads;
mod wikitext;

use std::sync::Arc;

use progress::ProgressTracker;
use services::flickr::FlickrApi;
use services::wikimedia::WikimediaApi;
use structured_data::FlickrUserLookup;
use uploads::Uploader;

pub struct AppState {
    pub flickr: FlickrApi,
    pub uploader: Uploader,
    pub tracker: ProgressTracker,
    pub lookup: Arc<FlickrUserLookup>,
}

#[tokio::main]
async fn main() {
    let flickr_api_key = std::env::var("FLICKR_API_KEY").expect("FLICKR_API_KEY must be set");
    let wikimedia_access_token =
        std::env::var("WIKIMEDIA_ACCESS_TOKEN").expect("WIKIMEDIA_ACCESS_TOKEN must be set");
    let progress_dir = std::env::var("PROGRESS_DIR")
        .unwrap_or_else(|_| constants::DEFAULT_PROGRESS_DIR.to_string());

    // Flickr users with their own Wikidata entities; optional curated
    // data, refreshed out-of-band
    let lookup = match std::env::var("WIKIDATA_USER_LOOKUP") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
            FlickrUserLookup::from_json(&json)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
        }
        Err(_) => FlickrUserLookup::default(),
    };

    let flickr = FlickrApi::new(&flickr_api_key);
    let tracker = ProgressTracker::new(&progress_dir);
    let lookup = Arc::new(lookup);
    let wikimedia = Arc::new(WikimediaApi::new(&wikimedia_access_token));
    let uploader = Uploader::new(wikimedia, tracker.clone(), lookup.clone());

    let state = Arc::new(AppState {
        flickr,
        uploader,
        tracker,
        lookup,
    });

    let app = routes::build_routes().with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    println!("Listening on http://{}", addr);
    println!("[uploads] Progress records in {}", progress_dir);
    axum::serve(listener, app).await.expect("Server failed");
}
