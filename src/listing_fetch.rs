use std::pin::pin;

use futures::future::{self, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::js_util::js_err;
use pages_gallery_core::listing::{directory_url, scrape_image_paths};
use pages_gallery_core::{GalleryConfig, GalleryError};

/// Fetches the page's own directory and returns the image links it mentions.
pub(crate) async fn scrape_page_directory(config: &GalleryConfig) -> Result<Vec<String>, GalleryError> {
    let window = web_sys::window().ok_or_else(|| GalleryError::Listing("missing window".to_string()))?;
    let href = window.location().href().map_err(listing_err)?;
    let directory = directory_url(&href)?;

    let fetch = pin!(fetch_text(&window, directory.as_str()));
    let deadline = pin!(TimeoutFuture::new(config.listing_timeout_ms.max(1)));
    let html = match future::select(fetch, deadline).await {
        Either::Left((result, _)) => result?,
        Either::Right(((), _)) => {
            return Err(GalleryError::Listing(format!(
                "no response within {} ms",
                config.listing_timeout_ms
            )))
        }
    };
    Ok(scrape_image_paths(&html, &directory, &config.vocabulary))
}

async fn fetch_text(window: &Window, url: &str) -> Result<String, GalleryError> {
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(listing_err)?;
    let response: Response = response.dyn_into().map_err(listing_err)?;
    if !response.ok() {
        return Err(GalleryError::Listing(format!("HTTP {}", response.status())));
    }
    let text = JsFuture::from(response.text().map_err(listing_err)?)
        .await
        .map_err(listing_err)?;
    text.as_string()
        .ok_or_else(|| GalleryError::Listing("response body is not text".to_string()))
}

fn listing_err(error: JsValue) -> GalleryError {
    GalleryError::Listing(js_err(error))
}
