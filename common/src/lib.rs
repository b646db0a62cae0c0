//! Shared model and logic for the prescription editor.
//!
//! Everything in this crate is platform independent: the browser-facing
//! pieces (localStorage, `window.confirm`, file reading, printing) live in the
//! frontend and plug into the traits defined here.

pub mod clock;
pub mod config;
pub mod confirm;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod uploads;

pub use error::StoreError;
pub use store::DocumentStore;
