// Wire-boundary tests for the marketplace client against a mock server

use mockito::Matcher as MockMatcher;
use reloop_algo::models::MatchQuery;
use reloop_algo::services::marketplace::{MarketplaceClient, MarketplaceError};

fn create_query() -> MatchQuery {
    MatchQuery {
        waste_type: None,
        min_match_score: None,
        bounding_box: None,
        exclude_listing_ids: vec![],
        limit: 20,
    }
}

#[tokio::test]
async fn test_get_recycler_profile_converts_geojson_axis_order() {
    let mut server = mockito::Server::new_async().await;

    // GeoJSON coordinates are [longitude, latitude]
    let body = r#"{
        "id": "r1",
        "companyName": "Columbus Metal Recovery",
        "wasteTypes": ["Metal Scraps"],
        "location": { "type": "Point", "coordinates": [-83.0, 40.0] },
        "capacity": "60 tons",
        "processEfficiency": 30,
        "certifications": ["ISO14001", "EPA"]
    }"#;

    let _mock = server
        .mock("GET", "/api/recyclers/r1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = MarketplaceClient::new(server.url(), "test_key".to_string());
    let profile = client.get_recycler_profile("r1").await.unwrap();

    assert_eq!(profile.recycler_id, "r1");
    assert_eq!(profile.latitude, 40.0);
    assert_eq!(profile.longitude, -83.0);
    assert_eq!(profile.waste_types, vec!["Metal Scraps"]);
    assert_eq!(profile.certifications.len(), 2);
}

#[tokio::test]
async fn test_get_recycler_profile_not_found() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/recyclers/missing")
        .with_status(404)
        .create_async()
        .await;

    let client = MarketplaceClient::new(server.url(), "test_key".to_string());
    let result = client.get_recycler_profile("missing").await;

    assert!(matches!(result, Err(MarketplaceError::NotFound(_))));
}

#[tokio::test]
async fn test_query_listings_parses_envelope() {
    let mut server = mockito::Server::new_async().await;

    let body = r#"{
        "total": 2,
        "listings": [
            {
                "id": "l1",
                "title": "Steel offcuts",
                "type": "Metal Scraps",
                "volume": "50 tons",
                "location": { "type": "Point", "coordinates": [-83.0, 40.0] },
                "producerId": "p1",
                "status": "active"
            },
            {
                "id": "l2",
                "title": "Mixed plastics",
                "type": "Plastic Polymers",
                "volume": "12 tons",
                "location": { "type": "Point", "coordinates": [-82.9, 40.1] },
                "producerId": "p2"
            }
        ]
    }"#;

    let _mock = server
        .mock("GET", "/api/listings")
        .match_query(MockMatcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = MarketplaceClient::new(server.url(), "test_key".to_string());
    let listings = client.query_listings(&create_query()).await.unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].id, "l1");
    assert_eq!(listings[0].latitude, 40.0);
    assert_eq!(listings[0].longitude, -83.0);
    assert!(listings[0].is_active);
}

#[tokio::test]
async fn test_query_listings_skips_malformed_documents() {
    let mut server = mockito::Server::new_async().await;

    // The second document is missing required fields and is dropped
    let body = r#"{
        "total": 2,
        "listings": [
            {
                "id": "l1",
                "title": "Steel offcuts",
                "type": "Metal Scraps",
                "volume": "50 tons",
                "location": { "type": "Point", "coordinates": [-83.0, 40.0] },
                "producerId": "p1"
            },
            { "id": "broken" }
        ]
    }"#;

    let _mock = server
        .mock("GET", "/api/listings")
        .match_query(MockMatcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = MarketplaceClient::new(server.url(), "test_key".to_string());
    let listings = client.query_listings(&create_query()).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].id, "l1");
}

#[tokio::test]
async fn test_query_listings_server_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/listings")
        .match_query(MockMatcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = MarketplaceClient::new(server.url(), "test_key".to_string());
    let result = client.query_listings(&create_query()).await;

    assert!(matches!(result, Err(MarketplaceError::ApiError(_))));
}

#[tokio::test]
async fn test_record_event_posts_payload() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/matches/events")
        .match_body(MockMatcher::PartialJson(serde_json::json!({
            "recyclerId": "r1",
            "listingId": "l1",
            "interaction": "saved"
        })))
        .with_status(201)
        .create_async()
        .await;

    let client = MarketplaceClient::new(server.url(), "test_key".to_string());
    client.record_event("r1", "l1", "saved").await.unwrap();

    mock.assert_async().await;
}
