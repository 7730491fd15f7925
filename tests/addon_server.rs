//! The add-on routes served over a real socket, backed by a mock site.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::Value;
use tokio::net::TcpListener;
use vidbridge::addon::server::router;
use vidbridge::{id, Addon};
use wiremock::MockServer;

/// Start the add-on on an ephemeral port and return its base URL.
async fn start_addon(site: &MockServer) -> String {
    let config = Arc::new(common::config_for(site));
    let client = common::client_for(&config);
    let addon = Arc::new(Addon::new(config, client));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(addon)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    let body = if status == 200 {
        response.json().await.unwrap()
    } else {
        Value::Null
    };
    (status, body)
}

#[tokio::test]
async fn manifest_route() {
    let site = MockServer::start().await;
    let base = start_addon(&site).await;

    let response = reqwest::get(format!("{base}/manifest.json")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("access-control-allow-origin").map(|v| v.to_str().unwrap()),
        Some("*")
    );
    let manifest: Value = response.json().await.unwrap();
    assert_eq!(manifest["id"], "org.vidbridge.addon");
    assert_eq!(manifest["idPrefixes"][0], "wow:");
    assert_eq!(manifest["catalogs"][0]["id"], "vidbridge-movies");
}

#[tokio::test]
async fn catalog_routes() {
    let site = MockServer::start().await;
    common::mount_html(&site, "/es/", common::listing_page()).await;
    common::mount_html(&site, "/es/search/the-matrix/relevance/", common::listing_page()).await;
    let base = start_addon(&site).await;

    let (status, body) = get_json(&format!("{base}/catalog/movie/vidbridge-movies.json")).await;
    assert_eq!(status, 200);
    assert_eq!(body["metas"].as_array().unwrap().len(), 3);
    assert_eq!(body["metas"][1]["name"], "Second video");

    let (status, body) = get_json(&format!(
        "{base}/catalog/movie/vidbridge-movies/search=the%20matrix.json"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["metas"].as_array().unwrap().len(), 3);

    // Page 2 is not mounted; the site answers 404 and the catalog is empty.
    let (status, body) = get_json(&format!(
        "{base}/catalog/movie/vidbridge-movies/skip=24.json"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "metas": [] }));

    let (status, body) = get_json(&format!("{base}/catalog/series/other.json")).await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "metas": [] }));
}

#[tokio::test]
async fn catalog_search_keeps_reserved_characters() {
    let site = MockServer::start().await;
    common::mount_html(&site, "/es/search/c%2B%2B-%26-50%25/relevance/", common::listing_page()).await;
    let base = start_addon(&site).await;

    let (status, body) = get_json(&format!(
        "{base}/catalog/movie/vidbridge-movies/search=c%2B%2B%20%26%2050%25.json"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["metas"].as_array().unwrap().len(), 3);

    let paths: Vec<String> = site
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, ["/es/search/c%2B%2B-%26-50%25/relevance/"]);
}

#[tokio::test]
async fn stream_route_shapes_streams() {
    let site = MockServer::start().await;
    let item = "/es/videos/4242/fixture/";
    common::mount_html(&site, item, common::item_with_sources(&site.uri())).await;
    let base = start_addon(&site).await;

    let item_id = id::encode(&format!("{}{item}", site.uri())).unwrap();
    let (status, body) = get_json(&format!("{base}/stream/movie/{item_id}.json")).await;
    assert_eq!(status, 200);

    let streams = body["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0]["title"], "720p");
    assert_eq!(streams[0]["behaviorHints"]["notWebReady"], false);
    assert!(streams[0]["url"].as_str().unwrap().contains("get_file"));
}

#[tokio::test]
async fn stream_route_with_bad_id_is_empty() {
    let site = MockServer::start().await;
    let base = start_addon(&site).await;

    let (status, body) = get_json(&format!("{base}/stream/movie/tt0133093.json")).await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "streams": [] }));
}

#[tokio::test]
async fn meta_route_and_missing_suffix() {
    let site = MockServer::start().await;
    let base = start_addon(&site).await;

    let (status, body) = get_json(&format!("{base}/meta/movie/wow:abc.json")).await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "meta": { "id": "wow:abc", "type": "movie" } }));

    let (status, _) = get_json(&format!("{base}/meta/movie/wow:abc")).await;
    assert_eq!(status, 404);
}
