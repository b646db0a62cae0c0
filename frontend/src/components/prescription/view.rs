//! View rendering for the prescription page.
//!
//! Two columns: the sidebar (see [`super::sidebar`]) and the printable A4
//! sheet. Everything the sheet shows comes from the draft plus the stored
//! logo and the selected doctor's signature; missing images render as
//! dashed placeholders that print CSS hides.
//!
//! All user-facing text is Georgian.

use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::sidebar::sidebar;
use super::state::PrescriptionComponent;
use crate::components::editor::RichTextEditor;
use crate::sheet::A4Sheet;

pub fn view(component: &PrescriptionComponent, ctx: &Context<PrescriptionComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="prescription-root">
            { sidebar(component, link) }
            <main class="sheet-area">
                <A4Sheet>
                    { build_header(component) }
                    { build_patient_fields(component, link) }
                    <RichTextEditor
                        content={AttrValue::from(component.draft.content.clone())}
                        toolbar={component.config.toolbar.clone()}
                        on_change={link.callback(Msg::UpdateContent)}
                    />
                    { build_footer(component) }
                </A4Sheet>
            </main>
        </div>
    }
}

/// Logo (or placeholder) and the clinic name.
fn build_header(component: &PrescriptionComponent) -> Html {
    let logo = match component.store.logo() {
        Some(logo) => html! { <img class="sheet-logo" src={logo.as_uri().to_string()} alt="logo" /> },
        None => html! { <div class="sheet-logo placeholder no-print">{"ლოგო"}</div> },
    };

    html! {
        <header class="sheet-header">
            { logo }
            <div class="clinic-name">{ &component.config.clinic_name }</div>
        </header>
    }
}

fn build_patient_fields(component: &PrescriptionComponent, link: &Scope<PrescriptionComponent>) -> Html {
    let draft = &component.draft;

    html! {
        <section class="patient-fields">
            <label>
                {"პაციენტი: "}
                <input
                    type="text"
                    value={draft.patient_name.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetPatientName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <label>
                {"ისტორიის №: "}
                <input
                    type="text"
                    value={draft.history_number.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetHistoryNumber(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <label>
                {"თარიღი: "}
                <input
                    type="date"
                    value={draft.issue_date_value()}
                    onchange={link.callback(|e: Event| {
                        Msg::SetIssueDate(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
        </section>
    }
}

/// Doctor line with the signature on file, if any.
fn build_footer(component: &PrescriptionComponent) -> Html {
    let doctor = &component.draft.doctor;
    let signature = match component.store.signature(doctor) {
        Some(image) => html! {
            <img class="sheet-signature" src={image.as_uri().to_string()} alt="signature" />
        },
        None => html! {
            <span class="signature-missing no-print">{"ხელმოწერა არ არის ატვირთული"}</span>
        },
    };

    html! {
        <footer class="sheet-footer">
            <div class="doctor-line">
                <span>{"ექიმი: "}</span>
                <strong>{ doctor }</strong>
            </div>
            <div class="signature-line">
                <span>{"ხელმოწერა: "}</span>
                { signature }
            </div>
        </footer>
    }
}
