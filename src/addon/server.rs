//! HTTP routes of the add-on.
//!
//! ```text
//! GET /manifest.json
//! GET /catalog/{type}/{id}.json
//! GET /catalog/{type}/{id}/{extra}.json
//! GET /meta/{type}/{id}.json
//! GET /stream/{type}/{id}.json
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, RawPathParams, State},
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{
    Addon, CatalogExtra, CatalogRequest, CatalogResponse, ItemRequest, Manifest, MetaResponse,
    StreamResponse,
};

type AddonState = Arc<Addon>;

/// Build the router for the add-on.
pub fn router(addon: AddonState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/manifest.json") }))
        .route("/manifest.json", get(get_manifest))
        .route("/catalog/{kind}/{file}", get(get_catalog))
        .route("/catalog/{kind}/{id}/{extra}", get(get_catalog_with_extra))
        .route("/meta/{kind}/{file}", get(get_meta))
        .route("/stream/{kind}/{file}", get(get_stream))
        .layer(cors)
        .with_state(addon)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addon: AddonState, addr: SocketAddr, public_url: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Addon active on: {public_url}/manifest.json");
    axum::serve(listener, router(addon))
        .await
        .context("server error")
}

/// `{name}.json` → `{name}`; anything else is a 404.
fn strip_json(segment: &str) -> Result<&str, StatusCode> {
    segment
        .strip_suffix(".json")
        .filter(|s| !s.is_empty())
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_manifest(State(addon): State<AddonState>) -> Json<Manifest> {
    Json(addon.manifest().clone())
}

async fn get_catalog(
    State(addon): State<AddonState>,
    Path((kind, file)): Path<(String, String)>,
) -> Result<Json<CatalogResponse>, StatusCode> {
    let catalog_id = strip_json(&file)?;
    let request = CatalogRequest {
        media_kind: kind,
        catalog_id: catalog_id.to_string(),
        extra: CatalogExtra::default(),
    };
    Ok(Json(addon.catalog(&request).await))
}

/// `{extra}` is read still percent-encoded; `CatalogExtra::from_query` does
/// the only decode.
async fn get_catalog_with_extra(
    State(addon): State<AddonState>,
    Path((kind, id, _)): Path<(String, String, String)>,
    raw: RawPathParams,
) -> Result<Json<CatalogResponse>, StatusCode> {
    let extra = raw
        .iter()
        .find_map(|(key, value)| (key == "extra").then_some(value))
        .ok_or(StatusCode::NOT_FOUND)?;
    let extra = strip_json(extra)?;
    let request = CatalogRequest {
        media_kind: kind,
        catalog_id: id,
        extra: CatalogExtra::from_query(extra),
    };
    Ok(Json(addon.catalog(&request).await))
}

async fn get_meta(
    State(addon): State<AddonState>,
    Path((kind, file)): Path<(String, String)>,
) -> Result<Json<MetaResponse>, StatusCode> {
    let item_id = strip_json(&file)?;
    Ok(Json(addon.meta(&ItemRequest {
        media_kind: kind,
        item_id: item_id.to_string(),
    })))
}

async fn get_stream(
    State(addon): State<AddonState>,
    Path((kind, file)): Path<(String, String)>,
) -> Result<Json<StreamResponse>, StatusCode> {
    let item_id = strip_json(&file)?;
    let request = ItemRequest {
        media_kind: kind,
        item_id: item_id.to_string(),
    };
    Ok(Json(addon.stream(&request).await))
}
