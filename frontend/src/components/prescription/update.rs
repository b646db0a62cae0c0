//! Update function for the prescription page.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view should re-render.
//!
//! Key behaviors
//! - Draft edits (patient fields, date, doctor, editor content).
//! - Template save / apply / delete through the document store, with
//!   `window.confirm` answering the store's prompts.
//! - Logo and signature uploads: file -> data URI off the event loop, then
//!   applied only if no newer upload to the same slot was started meanwhile.
//! - Reset, JSON export and printing.
//!
//! Validation and file-read failures surface as toasts (in Georgian);
//! persistence failures are only logged by the store.

use common::model::ApplyMode;
use common::store::{ResetOutcome, SaveOutcome};
use common::uploads::{UploadSlot, UploadTicket};
use common::StoreError;
use log::{info, warn};
use yew::prelude::*;

use crate::browser::{self, confirm_message, BrowserConfirm};

use super::helpers::show_toast;
use super::messages::Msg;
use super::state::PrescriptionComponent;

/// Central update function for the component.
pub fn update(component: &mut PrescriptionComponent, ctx: &Context<PrescriptionComponent>, msg: Msg) -> bool {
    match msg {
        Msg::SetPatientName(value) => {
            component.draft.patient_name = value;
            component.refresh_dirty_flag();
            true
        }
        Msg::SetHistoryNumber(value) => {
            component.draft.history_number = value;
            component.refresh_dirty_flag();
            true
        }
        Msg::SetIssueDate(value) => component.draft.set_issue_date(&value),
        Msg::SelectDoctor(doctor) => {
            component.draft.doctor = doctor;
            true
        }
        Msg::UpdateContent(content) => {
            if component.draft.content == content {
                return false;
            }
            component.draft.content = content;
            component.refresh_dirty_flag();
            true
        }
        Msg::SetTemplateName(name) => {
            component.template_name = name;
            true
        }
        Msg::SaveTemplate => {
            let name = component.template_name.clone();
            match component
                .store
                .save_template(&name, &component.draft.content, BrowserConfirm)
            {
                Ok(SaveOutcome::Created | SaveOutcome::Replaced) => {
                    component.template_name.clear();
                    component.mark_content_saved();
                }
                Ok(SaveOutcome::Declined) => {}
                Err(StoreError::Validation { .. }) => {
                    show_toast("შეიყვანეთ შაბლონის დასახელება.");
                }
                Err(e) => warn!("saving template `{}` failed: {}", name, e),
            }
            true
        }
        Msg::ApplyTemplate(name, mode) => {
            let was_clean = component.content_matches_baseline();
            let store = &component.store;
            if component.draft.apply_template(store, &name, mode) {
                if mode == ApplyMode::Replace {
                    info!("draft replaced with template `{}`", name);
                }
                if mode.leaves_draft_clean(was_clean) {
                    component.mark_content_saved();
                } else {
                    component.refresh_dirty_flag();
                }
                true
            } else {
                false
            }
        }
        Msg::DeleteTemplate(name) => {
            component.store.delete_template(&name, BrowserConfirm);
            true
        }
        Msg::LogoSelected(file) => {
            let ticket = component.uploads.begin(UploadSlot::Logo);
            read_upload(ctx, ticket, file);
            false
        }
        Msg::SignatureSelected(file) => {
            let slot = UploadSlot::Signature(component.draft.doctor.clone());
            let ticket = component.uploads.begin(slot);
            read_upload(ctx, ticket, file);
            false
        }
        Msg::ImageRead { ticket, result } => match result {
            Ok(image) => {
                if !component.uploads.finish(&ticket) {
                    return false;
                }
                match ticket.slot() {
                    UploadSlot::Logo => component.store.set_logo(Some(image)),
                    UploadSlot::Signature(doctor) => {
                        if let Err(e) = component.store.set_signature(doctor, image) {
                            warn!("signature upload rejected: {}", e);
                        }
                    }
                }
                true
            }
            Err(e) => {
                warn!("upload for {:?} failed: {}", ticket.slot(), e);
                if component.uploads.abandon(&ticket) {
                    show_toast("ფაილის წაკითხვა ვერ მოხერხდა. აირჩიეთ სურათის ფაილი.");
                }
                false
            }
        },
        Msg::ClearLogo => {
            if !confirm_message("გსურთ ლოგოს წაშლა?") {
                return false;
            }
            component.store.set_logo(None);
            true
        }
        Msg::ClearSignature => {
            if !confirm_message("გსურთ ხელმოწერის წაშლა?") {
                return false;
            }
            let doctor = component.draft.doctor.clone();
            component.store.clear_signature(&doctor)
        }
        Msg::ResetAll => component.store.reset_all(BrowserConfirm) == ResetOutcome::Cleared,
        Msg::ExportTemplates => {
            match component.store.export_templates(&component.config.export_file_name) {
                Ok(export) => {
                    if let Err(e) = browser::offer_download(&export) {
                        warn!("template export download failed: {:?}", e);
                    }
                }
                Err(e) => warn!("template export failed: {}", e),
            }
            false
        }
        Msg::Print => {
            browser::print();
            false
        }
    }
}

/// Read `file` off the event loop and report back with `ticket`.
fn read_upload(ctx: &Context<PrescriptionComponent>, ticket: UploadTicket, file: web_sys::File) {
    let link = ctx.link().clone();
    wasm_bindgen_futures::spawn_local(async move {
        let result = browser::read_image_file(file).await;
        link.send_message(Msg::ImageRead { ticket, result });
    });
}
