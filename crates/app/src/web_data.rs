//! Browser feature loading.
//!
//! Usage:
//! `index.html?data=assets/data/main.geojson&location=1.3067,103.7695,2`
//!
//! The collection is fetched with `window.fetch` and handed to the ECS
//! through [`FeatureFetchSlot`], which `FloorplanPlugin` polls every frame.

#![cfg(target_arch = "wasm32")]

use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use floorplan::config::DEFAULT_DATA_PATH;
use floorplan::loading::{FeatureFetchSlot, FeatureSource};
use floorplan::view::PendingLocation;

fn query_param(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let value = params.get(name)?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Point the feature source at `?data=` (or the bundled path) and pick up a
/// `?location=` payload.
pub fn configure(app: &mut App) {
    let url = query_param("data").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    app.insert_resource(FeatureSource::Remote(url));
    if let Some(payload) = query_param("location") {
        app.insert_resource(PendingLocation(Some(payload)));
    }
    app.add_systems(Startup, begin_web_feature_fetch);
}

/// Startup system: fetch the collection text from the source URL.
fn begin_web_feature_fetch(source: Res<FeatureSource>, slot: Res<FeatureFetchSlot>) {
    let FeatureSource::Remote(url) = &*source else {
        return;
    };
    let url = url.clone();
    let slot = slot.clone();

    wasm_bindgen_futures::spawn_local(async move {
        slot.deliver(fetch_text(&url).await);
    });
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| "failed to cast fetch response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|e| format!("response.text() failed: {:?}", e))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("await response text failed: {:?}", e))?;
    text_value
        .as_string()
        .ok_or_else(|| "response text was not a string".to_string())
}
