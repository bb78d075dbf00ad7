//! Browser-side download for binary report payloads.

use wasm_bindgen::JsCast;

/// Offer `bytes` to the user as a PDF download.
///
/// Mirrors the usual object-URL dance: wrap the bytes in a `Blob`, point a
/// temporary anchor at it, click it, then revoke the URL.
pub fn save_pdf(file_name: &str, bytes: &[u8]) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");

    let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(file_name);
            anchor.click();
        }
    }

    let _ = web_sys::Url::revoke_object_url(&url);
}
