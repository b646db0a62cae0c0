use std::rc::Rc;

use common::config::AppConfig;

use crate::app::{App, AppProps};

mod app;
mod browser;
mod components;
mod logger;
mod sheet;
mod storage;

const CONFIG_JSON: &str = include_str!("../config.json");

fn main() {
    let parsed = AppConfig::from_json(CONFIG_JSON);
    let level = parsed
        .as_ref()
        .map(AppConfig::log_level)
        .unwrap_or(log::LevelFilter::Info);
    logger::init(level);

    let config = parsed.unwrap_or_else(|e| {
        log::warn!("{}; using built-in configuration", e);
        AppConfig::default()
    });

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
