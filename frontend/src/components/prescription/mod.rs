//! Prescription page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! The page is split in two: a sidebar excluded from print (templates, logo,
//! doctor signatures, data management) and the printable A4 sheet (header,
//! patient fields, rich-text content, doctor and signature).

use yew::prelude::*;

pub(crate) mod helpers;
mod messages;
mod props;
mod sidebar;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::PrescriptionProps;
pub use state::PrescriptionComponent;

impl Component for PrescriptionComponent {
    type Message = Msg;
    type Properties = PrescriptionProps;

    fn create(ctx: &Context<Self>) -> Self {
        PrescriptionComponent::new(ctx.props().config.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.refresh_dirty_flag();
        }
    }
}
