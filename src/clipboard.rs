use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlInputElement};

use crate::js_util::js_err;
use pages_gallery_core::GalleryError;

/// Selects `input` and copies `text`. Tries the async Clipboard API first and
/// falls back to `execCommand("copy")` on the selection.
pub(crate) async fn copy_text(input: &HtmlInputElement, text: &str) -> Result<(), GalleryError> {
    input.select();
    let async_err = match write_text(text) {
        Ok(promise) => match JsFuture::from(promise).await {
            Ok(_) => return Ok(()),
            Err(err) => js_err(err),
        },
        Err(err) => js_err(err),
    };
    input.select();
    match exec_copy() {
        Ok(true) => Ok(()),
        Ok(false) => Err(GalleryError::Clipboard(format!(
            "{async_err}; execCommand refused"
        ))),
        Err(err) => Err(GalleryError::Clipboard(format!(
            "{async_err}; {}",
            js_err(err)
        ))),
    }
}

fn write_text(text: &str) -> Result<Promise, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_null() || clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard api unavailable"));
    }
    let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str("clipboard.writeText is not a function"))?;
    write
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()
        .map_err(|_| JsValue::from_str("clipboard.writeText did not return a promise"))
}

fn exec_copy() -> Result<bool, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let document = document
        .dyn_into::<HtmlDocument>()
        .map_err(|_| JsValue::from_str("document is not an html document"))?;
    document.exec_command("copy")
}
