use std::rc::Rc;

use common::config::AppConfig;
use yew::prelude::*;

/// Properties for the `PrescriptionComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct PrescriptionProps {
    /// Clinic name, doctor roster, storage keys and editor toolbar.
    ///
    /// Read once on creation; the store is hydrated from the storage keys it
    /// names, so swapping the configuration later has no effect.
    pub config: Rc<AppConfig>,
}
