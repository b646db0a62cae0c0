//! Rich-text editor: a `contenteditable` surface driven by `execCommand`.
//!
//! The parent owns the content as an HTML string. The editor reports every
//! edit through `on_change` and only rewrites its surface when the parent
//! hands it content that differs from what is already shown (template
//! applied, draft reset). Toolbar buttons are generated from the configured
//! [`ToolbarConfig`]; they act on `mousedown` with the default prevented so
//! the text selection survives the click.

use common::config::{Format, ToolbarConfig};
use common::model::ImageBlob;
use common::StoreError;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement, HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::browser::{prompt_text, read_image_file};
use crate::components::prescription::helpers::show_toast;

#[derive(Properties, PartialEq)]
pub struct RichTextEditorProps {
    pub content: AttrValue,
    pub toolbar: ToolbarConfig,
    pub on_change: Callback<String>,
}

pub enum Msg {
    Input,
    Exec(Format),
    Heading(Option<u8>),
    PickImage,
    ImageSelected(web_sys::File),
    ImageRead(Result<ImageBlob, StoreError>),
}

pub struct RichTextEditor {
    surface_ref: NodeRef,
    file_input_ref: NodeRef,
}

impl Component for RichTextEditor {
    type Message = Msg;
    type Properties = RichTextEditorProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            surface_ref: NodeRef::default(),
            file_input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input => {
                self.emit_change(ctx);
                false
            }
            Msg::Exec(Format::Link) => {
                if let Some(url) = prompt_text("URL:") {
                    exec("createLink", &url);
                    self.emit_change(ctx);
                }
                false
            }
            Msg::Exec(Format::Image) => {
                ctx.link().send_message(Msg::PickImage);
                false
            }
            Msg::Exec(format) => {
                if let Some(command) = command_for(format) {
                    exec(command, "");
                    self.emit_change(ctx);
                }
                false
            }
            Msg::Heading(level) => {
                self.focus_surface();
                let block = match level {
                    Some(n) => format!("<h{}>", n),
                    None => "<p>".to_string(),
                };
                exec("formatBlock", &block);
                self.emit_change(ctx);
                false
            }
            Msg::PickImage => {
                if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::ImageSelected(file) => {
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = read_image_file(file).await;
                    link.send_message(Msg::ImageRead(result));
                });
                false
            }
            Msg::ImageRead(Ok(image)) => {
                self.focus_surface();
                exec("insertImage", image.as_uri());
                self.emit_change(ctx);
                false
            }
            Msg::ImageRead(Err(e)) => {
                log::warn!("editor image rejected: {}", e);
                show_toast("სურათის წაკითხვა ვერ მოხერხდა.");
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.sync_surface(ctx);
        ctx.props().toolbar != old_props.toolbar
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let toolbar = &ctx.props().toolbar;

        html! {
            <div class="rich-text-editor">
                <div class="rte-toolbar no-print">
                    { header_picker(toolbar, link) }
                    { for toolbar.formats.iter().map(|format| format_button(*format, link)) }
                    <input
                        type="file"
                        accept="image/*"
                        style="display: none;"
                        ref={self.file_input_ref.clone()}
                        onchange={link.batch_callback(|e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let file = input.files().and_then(|files| files.get(0));
                            input.set_value("");
                            file.map(Msg::ImageSelected)
                        })}
                    />
                </div>
                <div
                    class="rte-surface"
                    contenteditable="true"
                    ref={self.surface_ref.clone()}
                    oninput={link.callback(|_: InputEvent| Msg::Input)}
                />
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.sync_surface(ctx);
        }
    }
}

impl RichTextEditor {
    fn surface(&self) -> Option<HtmlElement> {
        self.surface_ref.cast::<HtmlElement>()
    }

    fn focus_surface(&self) {
        if let Some(surface) = self.surface() {
            surface.focus().ok();
        }
    }

    fn emit_change(&self, ctx: &Context<Self>) {
        if let Some(surface) = self.surface() {
            ctx.props().on_change.emit(surface.inner_html());
        }
    }

    /// Push the parent's content into the surface if it differs.
    fn sync_surface(&self, ctx: &Context<Self>) {
        if let Some(surface) = self.surface() {
            let content = ctx.props().content.as_str();
            if surface.inner_html() != content {
                surface.set_inner_html(content);
            }
        }
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
}

fn exec(command: &str, value: &str) {
    let applied = html_document()
        .and_then(|d| d.exec_command_with_show_ui_and_value(command, false, value).ok())
        .unwrap_or(false);
    if !applied {
        log::debug!("execCommand `{}` was not applied", command);
    }
}

fn command_for(format: Format) -> Option<&'static str> {
    Some(match format {
        Format::Bold => "bold",
        Format::Italic => "italic",
        Format::Underline => "underline",
        Format::Strike => "strikeThrough",
        Format::OrderedList => "insertOrderedList",
        Format::BulletList => "insertUnorderedList",
        Format::AlignLeft => "justifyLeft",
        Format::AlignCenter => "justifyCenter",
        Format::AlignRight => "justifyRight",
        Format::AlignJustify => "justifyFull",
        Format::Clean => "removeFormat",
        Format::Link | Format::Image => return None,
    })
}

fn icon_for(format: Format) -> (&'static str, &'static str) {
    match format {
        Format::Bold => ("format_bold", "Bold"),
        Format::Italic => ("format_italic", "Italic"),
        Format::Underline => ("format_underlined", "Underline"),
        Format::Strike => ("strikethrough_s", "Strike"),
        Format::OrderedList => ("format_list_numbered", "Numbered list"),
        Format::BulletList => ("format_list_bulleted", "Bulleted list"),
        Format::AlignLeft => ("format_align_left", "Align left"),
        Format::AlignCenter => ("format_align_center", "Align center"),
        Format::AlignRight => ("format_align_right", "Align right"),
        Format::AlignJustify => ("format_align_justify", "Justify"),
        Format::Link => ("link", "Link"),
        Format::Image => ("image", "Image"),
        Format::Clean => ("format_clear", "Clear formatting"),
    }
}

fn format_button(format: Format, link: &Scope<RichTextEditor>) -> Html {
    let (icon, title) = icon_for(format);
    html! {
        <button
            class="icon-btn"
            title={title}
            onmousedown={link.callback(move |e: MouseEvent| {
                e.prevent_default();
                Msg::Exec(format)
            })}
        >
            <i class="material-icons">{icon}</i>
        </button>
    }
}

fn header_picker(toolbar: &ToolbarConfig, link: &Scope<RichTextEditor>) -> Html {
    if toolbar.header_levels.is_empty() {
        return html! {};
    }
    html! {
        <select
            class="rte-header"
            onchange={link.callback(|e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                let level = select.value().parse::<u8>().ok();
                select.set_value("");
                Msg::Heading(level)
            })}
        >
            <option value="" selected={true}>{"Normal"}</option>
            { for toolbar.header_levels.iter().map(|n| html! {
                <option value={n.to_string()}>{format!("H{}", n)}</option>
            }) }
        </select>
    }
}
