//! Integration tests for the hotels HTTP surface.
//!
//! Supplier payloads are served from memory through a stub transport, so
//! these exercise decode, merge, filtering and cleaning end to end.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use bytes::Bytes;
use hotel_merge::{
    build_router, Cache, CacheConfig, Cleaner, FetchError, FetcherConfig, HotelService,
    SourceCache, SourceCollection, SourceFetcher, SupplierTransport, TtlCache,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

const PATAGONIA: &str = r#"[{"id": "iJhz", "destination": 5432, "name": "Beach Villas Singapore",
    "lat": 1.264751, "lng": 103.824006, "address": "8 Sentosa Gateway, Beach Villas, 098269",
    "info": "Located at the western tip of Resorts World Sentosa",
    "amenities": ["Aircon", "Tv"],
    "images": {"rooms": [{"url": "https://img/0.jpg", "description": "Double room"}], "amenities": []}}]"#;

const PAPERFLIES: &str = r#"[{"hotel_id": "iJhz", "destination_id": 5432,
    "hotel_name": "Beach Villas Singapore",
    "location": {"address": "8 Sentosa Gateway, Beach Villas, 098269", "country": "Singapore"},
    "details": "Surrounded by tropical gardens",
    "amenities": {"general": ["outdoor pool"], "room": ["tv"]},
    "images": {"rooms": [{"link": "https://img/0.jpg", "caption": "Deluxe double room"}],
               "site": [{"link": "https://img/site.jpg", "caption": "Front"}]},
    "booking_conditions": ["No pets"]}]"#;

const ACME: &str = r#"[
    {"Id": "iJhz", "DestinationId": 5432, "Name": "Beach Villas Singapore",
     "Latitude": 1.264751, "Longitude": "103.824006", "Address": " 8 Sentosa Gateway, Beach Villas ",
     "City": "Singapore", "Country": "SG", "PostalCode": "098269",
     "Description": " This 5 star hotel is located on the coastline of Singapore.",
     "Facilities": ["Pool", "BusinessCenter"]},
    {"Id": "f8c9", "DestinationId": 1122, "Name": "Hilton Tokyo Shinjuku",
     "Latitude": null, "Longitude": "", "Address": "160-0023, SHINJUKU-KU, 6-6-2 NISHI-SHINJUKU",
     "City": "Tokyo", "Country": "JP", "PostalCode": "160-0023",
     "Description": "Hilton Tokyo is located in Shinjuku", "Facilities": ["WiFi "]}
]"#;

/// Test helper: serves canned supplier payloads by path
struct StubTransport {
    bodies: HashMap<&'static str, &'static str>,
    requests: Arc<AtomicUsize>,
}

#[async_trait]
impl SupplierTransport for StubTransport {
    async fn get(&self, path: &str) -> Result<Bytes, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(path)
            .copied()
            .map(|body| Bytes::from_static(body.as_bytes()))
            .ok_or(FetchError::HttpStatus { status_code: 404 })
    }
}

/// Test helper: router over the given supplier payloads plus a request counter
fn setup_app(bodies: &[(&'static str, &'static str)]) -> (axum::Router, Arc<AtomicUsize>) {
    let requests = Arc::new(AtomicUsize::new(0));
    let transport = StubTransport {
        bodies: bodies.iter().copied().collect(),
        requests: Arc::clone(&requests),
    };
    let fetcher = SourceFetcher::new(
        transport,
        FetcherConfig {
            timeout_ms: 1_000,
            ..FetcherConfig::default()
        },
    );
    let cache: Arc<SourceCache> =
        Arc::new(TtlCache::<Arc<SourceCollection>>::new(CacheConfig::default()));
    let service = HotelService::new(
        Arc::new(fetcher),
        cache,
        Duration::from_secs(60),
        Cleaner::default(),
    );
    (build_router(Arc::new(service)), requests)
}

fn all_suppliers() -> Vec<(&'static str, &'static str)> {
    vec![("patagonia", PATAGONIA), ("paperflies", PAPERFLIES), ("acme", ACME)]
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app.clone().oneshot(test_request(uri)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

fn hotel_ids(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|hotel| hotel["hotel_id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, requests) = setup_app(&all_suppliers());

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "hotel_merge");
    assert!(body["version"].is_string());
    assert_eq!(requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_list_all_hotels() {
    let (app, _) = setup_app(&all_suppliers());

    let (status, body) = get_json(&app, "/hotels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hotel_ids(&body), vec!["f8c9", "iJhz"]);
}

#[tokio::test]
async fn test_merged_hotel_shape() {
    let (app, _) = setup_app(&all_suppliers());

    let (_, body) = get_json(&app, "/hotels?hotel_ids=iJhz").await;
    let hotel = &body["data"][0];

    assert_eq!(hotel["hotel_id"], "iJhz");
    assert_eq!(hotel["destination_id"], 5432);
    assert_eq!(hotel["name"], "Beach Villas Singapore");
    assert_eq!(
        hotel["description"],
        "This 5 star hotel is located on the coastline of Singapore."
    );

    let location = &hotel["location"];
    assert_eq!(location["latitude"], 1.264751);
    assert_eq!(location["longitude"], 103.824006);
    assert_eq!(location["address"], "8 Sentosa Gateway, Beach Villas, 098269");
    assert_eq!(location["city"], "Singapore");
    assert_eq!(location["country"], "Singapore");

    assert_eq!(
        hotel["amenities"]["general"],
        serde_json::json!(["business center", "outdoor pool"])
    );
    assert_eq!(
        hotel["amenities"]["room"],
        serde_json::json!(["air conditioning", "tv"])
    );

    let rooms = hotel["images"]["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["link"], "https://img/0.jpg");
    assert_eq!(rooms[0]["description"], "Deluxe double room");
    assert_eq!(hotel["images"]["site"].as_array().unwrap().len(), 1);

    assert_eq!(hotel["booking_conditions"], serde_json::json!(["No pets"]));
}

#[tokio::test]
async fn test_absent_fields_are_omitted() {
    let (app, _) = setup_app(&all_suppliers());

    let (_, body) = get_json(&app, "/hotels?hotel_ids=f8c9").await;
    let hotel = body["data"][0].as_object().unwrap();

    assert!(!hotel.contains_key("images"));
    let location = hotel["location"].as_object().unwrap();
    assert!(!location.contains_key("latitude"));
    assert!(!location.contains_key("longitude"));
    assert_eq!(location["country"], "Japan");
    assert_eq!(hotel["amenities"]["general"], serde_json::json!(["wifi"]));
}

#[tokio::test]
async fn test_filter_by_destination() {
    let (app, _) = setup_app(&all_suppliers());

    let (_, body) = get_json(&app, "/hotels?destination_ids=1122").await;
    assert_eq!(hotel_ids(&body), vec!["f8c9"]);

    let (_, body) = get_json(&app, "/hotels?destination_ids=5432,1122").await;
    assert_eq!(hotel_ids(&body), vec!["f8c9", "iJhz"]);
}

#[tokio::test]
async fn test_unknown_id_returns_empty_data() {
    let (app, _) = setup_app(&all_suppliers());

    let (status, body) = get_json(&app, "/hotels?hotel_ids=nope").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"data": []}));
}

#[tokio::test]
async fn test_failing_supplier_is_left_out() {
    let (app, _) = setup_app(&[("patagonia", PATAGONIA), ("acme", "not json")]);

    let (status, body) = get_json(&app, "/hotels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hotel_ids(&body), vec!["iJhz"]);
    assert_eq!(body["data"][0]["description"], "Located at the western tip of Resorts World Sentosa");
}

#[tokio::test]
async fn test_supplier_data_fetched_once_across_requests() {
    let (app, requests) = setup_app(&all_suppliers());

    for uri in ["/hotels", "/hotels?hotel_ids=iJhz", "/hotels?destination_ids=1122"] {
        let (status, _) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
    }

    // One request per supplier, all from the first call
    assert_eq!(requests.load(Ordering::SeqCst), 3);
}
