//! Utility functions for the prescription page.
//!
//! - **User Feedback**: temporary "toast" notifications for validation and
//!   file-read errors, the only failures that are ever shown to the user.
//! - **Dirty Tracking**: MD5 fingerprints of the draft content, and the
//!   global `app_dirty` flag read by the page's `beforeunload` handler.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Flash `message` at the bottom of the page for three seconds.
///
/// Looks come from the `.toast` rule in `index.html`; `no-print` keeps a
/// toast that is still up when the print dialog opens off the paper.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_class_name("toast no-print");
    toast.set_text_content(Some(message));
    if body.append_child(&toast).is_err() {
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(3000).await;
        toast.remove();
    });
}

/// Hex MD5 digest of `input`, used to detect edits since the last baseline.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Publish whether the draft holds work that would be lost on reload.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}
