use std::rc::Rc;

use common::config::AppConfig;
use yew::{html, Component, Context, Html, Properties};

use crate::components::prescription::PrescriptionComponent;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-root">
                <PrescriptionComponent config={ctx.props().config.clone()} />
            </div>
        }
    }
}
