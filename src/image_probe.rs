use futures::future::{FutureExt, LocalBoxFuture};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlImageElement};

use pages_gallery_core::{with_deadline, ImageProber, ProbeFailure, ProbeOutcome};

/// Probes by loading the candidate into a detached `<img>`. The browser
/// resolves relative paths against the page, same as the rendered tiles.
pub(crate) struct HtmlImageProber {
    timeout_ms: u32,
}

impl HtmlImageProber {
    pub(crate) fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms: timeout_ms.max(1),
        }
    }
}

impl ImageProber for HtmlImageProber {
    fn probe(&self, url: &str) -> LocalBoxFuture<'static, ProbeOutcome> {
        let url = url.to_string();
        let timeout_ms = self.timeout_ms;
        async move { with_deadline(load_image(url), TimeoutFuture::new(timeout_ms)).await }
            .boxed_local()
    }
}

async fn load_image(url: String) -> ProbeOutcome {
    let Ok(img) = HtmlImageElement::new() else {
        return ProbeOutcome::Failed(ProbeFailure::Missing);
    };
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once(move |_event: Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once(move |_event: Event| {
            let _ = reject.call0(&JsValue::NULL);
        });
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();
    });
    img.set_src(&url);
    let outcome = match JsFuture::from(promise).await {
        Ok(_) => ProbeOutcome::Loaded,
        Err(_) => ProbeOutcome::Failed(ProbeFailure::Missing),
    };
    img.set_onload(None);
    img.set_onerror(None);
    outcome
}
