//! Host-browser collaborators: confirmation dialogs, printing, downloads and
//! reading user-selected image files.

use common::confirm::{Confirm, Prompt};
use common::model::ImageBlob;
use common::store::TemplateExport;
use common::StoreError;
use gloo_file::futures::read_as_bytes;
use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAnchorElement;

/// Answers store prompts with `window.confirm`.
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        confirm_message(&prompt.message())
    }
}

/// Blocking yes/no dialog. A missing window counts as "no".
pub fn confirm_message(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Text prompt, `None` when cancelled or left empty.
pub fn prompt_text(message: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.prompt_with_message(message).ok().flatten())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Open the native print dialog; "save as PDF" goes through the same path.
pub fn print() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            log::warn!("print dialog failed: {:?}", e);
        }
    }
}

/// Offer `export` to the user as a file download.
pub fn offer_download(export: &TemplateExport) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let blob = Blob::new_with_options(export.body.as_str(), Some(export.mime));
    let url = ObjectUrl::from(blob);

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&export.file_name);
    anchor.click();
    // `url` is revoked when dropped here.
    Ok(())
}

/// Read a picked file into an image data URI.
pub async fn read_image_file(file: web_sys::File) -> Result<ImageBlob, StoreError> {
    let mime = file.type_();
    let blob = Blob::from(web_sys::Blob::from(file));
    let bytes = read_as_bytes(&blob)
        .await
        .map_err(|e| StoreError::FileRead(e.to_string()))?;
    ImageBlob::from_bytes(&mime, &bytes)
}
