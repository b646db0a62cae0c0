//! Sidebar: template library, logo and signature management, data
//! management and the print buttons. Marked `no-print` as a whole.

use common::model::ApplyMode;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::PrescriptionComponent;

pub fn sidebar(component: &PrescriptionComponent, link: &Scope<PrescriptionComponent>) -> Html {
    html! {
        <aside class="sidebar no-print">
            { build_templates(component, link) }
            { build_logo(component, link) }
            { build_doctor(component, link) }
            { build_data(link) }
            { build_print(link) }
        </aside>
    }
}

fn build_templates(component: &PrescriptionComponent, link: &Scope<PrescriptionComponent>) -> Html {
    let templates = component.store.templates();
    let list = if templates.is_empty() {
        html! { <div class="empty">{"შენახული შაბლონები არ არის"}</div> }
    } else {
        templates
            .iter()
            .map(|t| {
                let replace = t.name.clone();
                let append = t.name.clone();
                let delete = t.name.clone();
                html! {
                    <li class="template-item" key={t.name.clone()}>
                        <span class="template-name" title={t.updated_at.to_rfc3339()}>{ &t.name }</span>
                        <button onclick={link.callback(move |_| Msg::ApplyTemplate(replace.clone(), ApplyMode::Replace))}>
                            {"ჩასმა"}
                        </button>
                        <button onclick={link.callback(move |_| Msg::ApplyTemplate(append.clone(), ApplyMode::Append))}>
                            {"დამატება"}
                        </button>
                        <button class="danger" onclick={link.callback(move |_| Msg::DeleteTemplate(delete.clone()))}>
                            {"წაშლა"}
                        </button>
                    </li>
                }
            })
            .collect::<Html>()
    };

    html! {
        <section class="sidebar-section">
            <h3>
                {"შაბლონები"}
                if component.is_dirty() {
                    <span class="dirty-dot" title="შეუნახავი ცვლილებები" />
                }
            </h3>
            <ul class="template-list">{ list }</ul>
            <div class="template-save">
                <input
                    type="text"
                    placeholder="შაბლონის დასახელება"
                    value={component.template_name.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetTemplateName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                    onkeydown={link.batch_callback(|e: KeyboardEvent| {
                        (e.key() == "Enter").then_some(Msg::SaveTemplate)
                    })}
                />
                <button onclick={link.callback(|_| Msg::SaveTemplate)}>{"შენახვა"}</button>
            </div>
        </section>
    }
}

fn build_logo(component: &PrescriptionComponent, link: &Scope<PrescriptionComponent>) -> Html {
    let logo = component.store.logo();

    html! {
        <section class="sidebar-section">
            <h3>{"ლოგო"}</h3>
            {
                match logo {
                    Some(image) => html! { <img class="preview" src={image.as_uri().to_string()} alt="logo" /> },
                    None => html! {},
                }
            }
            { file_picker(link, Msg::LogoSelected) }
            if logo.is_some() {
                <button class="danger" onclick={link.callback(|_| Msg::ClearLogo)}>{"ლოგოს წაშლა"}</button>
            }
        </section>
    }
}

fn build_doctor(component: &PrescriptionComponent, link: &Scope<PrescriptionComponent>) -> Html {
    let selected = component.draft.doctor.as_str();
    let signature = component.store.signature(selected);

    html! {
        <section class="sidebar-section">
            <h3>{"ექიმი"}</h3>
            <select
                onchange={link.callback(|e: Event| {
                    Msg::SelectDoctor(e.target_unchecked_into::<HtmlSelectElement>().value())
                })}
            >
                { for component.config.doctors.iter().map(|doctor| html! {
                    <option value={doctor.clone()} selected={doctor == selected}>{ doctor }</option>
                }) }
            </select>
            <div class="signature-upload">
                <span>{"ხელმოწერა"}</span>
                {
                    match signature {
                        Some(image) => html! { <img class="preview" src={image.as_uri().to_string()} alt="signature" /> },
                        None => html! {},
                    }
                }
                { file_picker(link, Msg::SignatureSelected) }
                if signature.is_some() {
                    <button class="danger" onclick={link.callback(|_| Msg::ClearSignature)}>{"ხელმოწერის წაშლა"}</button>
                }
            </div>
        </section>
    }
}

fn build_data(link: &Scope<PrescriptionComponent>) -> Html {
    html! {
        <section class="sidebar-section">
            <button onclick={link.callback(|_| Msg::ExportTemplates)}>{"ექსპორტი (.json)"}</button>
            <button class="danger" onclick={link.callback(|_| Msg::ResetAll)}>{"ყველა მონაცემის წაშლა"}</button>
        </section>
    }
}

fn build_print(link: &Scope<PrescriptionComponent>) -> Html {
    html! {
        <section class="sidebar-section print-actions">
            <button class="primary" onclick={link.callback(|_| Msg::Print)}>
                <i class="material-icons">{"print"}</i>{"ბეჭდვა"}
            </button>
            <button onclick={link.callback(|_| Msg::Print)}>
                <i class="material-icons">{"picture_as_pdf"}</i>{"შენახვა PDF"}
            </button>
        </section>
    }
}

/// Image file input; the value is reset so picking the same file again
/// still fires `change`.
fn file_picker(link: &Scope<PrescriptionComponent>, to_msg: fn(web_sys::File) -> Msg) -> Html {
    html! {
        <input
            type="file"
            accept="image/*"
            onchange={link.batch_callback(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let file = input.files().and_then(|files| files.get(0));
                input.set_value("");
                file.map(to_msg)
            })}
        />
    }
}
