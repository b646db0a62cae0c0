//! Component state for the prescription page.
//!
//! Holds the document store (the only persisted state), the session draft,
//! in-flight image uploads and the fingerprint used for dirty tracking.

use std::rc::Rc;

use chrono::Local;
use common::config::AppConfig;
use common::model::Draft;
use common::storage::{KeyValueStore, MemoryStore};
use common::uploads::UploadTracker;
use common::DocumentStore;
use log::warn;

use super::helpers::{compute_md5, set_window_dirty_flag};
use crate::storage::LocalStorage;

pub struct PrescriptionComponent {
    pub config: Rc<AppConfig>,

    /// Templates, signatures and logo, hydrated from localStorage.
    pub store: DocumentStore<Box<dyn KeyValueStore>>,

    /// Patient fields, doctor and editor content. Never persisted.
    pub draft: Draft,

    pub uploads: UploadTracker,

    /// Contents of the "save as new template" input.
    pub template_name: String,

    /// MD5 of the draft content at session start, at the last template save
    /// or at the last apply that left no unsaved typing behind.
    pub baseline_md5: String,
}

impl PrescriptionComponent {
    pub fn new(config: Rc<AppConfig>) -> Self {
        let backend: Box<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                warn!("{}; changes will not survive a reload", e);
                Box::new(MemoryStore::new())
            }
        };
        let store = DocumentStore::load(backend, config.storage_keys.clone());
        let draft = Draft::new(&config, Local::now().date_naive());
        let baseline_md5 = compute_md5(&draft.content);

        Self {
            config,
            store,
            draft,
            uploads: UploadTracker::new(),
            template_name: String::new(),
            baseline_md5,
        }
    }

    /// Editor content is unchanged since the last baseline.
    pub fn content_matches_baseline(&self) -> bool {
        compute_md5(&self.draft.content) == self.baseline_md5
    }

    /// Whether closing the tab now would lose typed work.
    pub fn is_dirty(&self) -> bool {
        !self.content_matches_baseline()
            || !self.draft.patient_name.trim().is_empty()
            || !self.draft.history_number.trim().is_empty()
    }

    pub fn refresh_dirty_flag(&self) {
        set_window_dirty_flag(self.is_dirty());
    }

    /// Current content now matches a stored template.
    pub fn mark_content_saved(&mut self) {
        self.baseline_md5 = compute_md5(&self.draft.content);
        self.refresh_dirty_flag();
    }
}
