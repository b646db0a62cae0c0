//! # Local Document Store
//!
//! Owns the three persisted collections of the editor: named templates, one
//! signature image per doctor and the clinic logo. Every mutation updates the
//! in-memory state first and then writes the whole affected collection back
//! through the [`KeyValueStore`] port.
//!
//! ## Failure policy
//!
//! - **Load** never fails. An unreadable or malformed entry is logged and the
//!   collection starts empty; the other collections load independently.
//! - **Writes** are fire-and-forget. A failed write (quota, disabled storage)
//!   is logged and swallowed; the in-memory state remains the source of truth
//!   for the rest of the session but will not survive a reload.
//! - **Declined confirmations** are ordinary outcomes, not errors.
//!
//! Only `StoreError::Validation` (and `Serialize` from an export) reaches
//! callers as an error.

mod assets;
mod templates;

pub use templates::{DeleteOutcome, SaveOutcome, TemplateExport};

use std::collections::{BTreeMap, HashSet};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::config::StorageKeys;
use crate::confirm::{Confirm, Prompt};
use crate::error::StoreError;
use crate::model::{ImageBlob, SignatureSet, Template};
use crate::storage::{KeyValueStore, PersistenceError};

/// Result of [`DocumentStore::reset_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Cleared,
    Declined,
}

pub struct DocumentStore<S, C = SystemClock> {
    backend: S,
    clock: C,
    keys: StorageKeys,
    templates: Vec<Template>,
    signatures: SignatureSet,
    logo: Option<ImageBlob>,
}

impl<S: KeyValueStore> DocumentStore<S> {
    /// Hydrate from `backend` using the wall clock for `updatedAt` stamps.
    pub fn load(backend: S, keys: StorageKeys) -> Self {
        Self::load_with_clock(backend, keys, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> DocumentStore<S, C> {
    pub fn load_with_clock(backend: S, keys: StorageKeys, clock: C) -> Self {
        let mut store = Self {
            backend,
            clock,
            keys,
            templates: Vec::new(),
            signatures: SignatureSet::new(),
            logo: None,
        };

        store.templates = store
            .read_json::<Vec<Template>>(&store.keys.templates)
            .map(dedupe_by_name)
            .unwrap_or_default();
        store.signatures = store.read_signatures();
        store.logo = store.read_logo();

        info!(
            "document store loaded: {} template(s), {} signature(s), logo {}",
            store.templates.len(),
            store.signatures.len(),
            if store.logo.is_some() { "present" } else { "absent" }
        );
        store
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn signatures(&self) -> &SignatureSet {
        &self.signatures
    }

    pub fn signature(&self, doctor: &str) -> Option<&ImageBlob> {
        self.signatures.get(doctor)
    }

    pub fn logo(&self) -> Option<&ImageBlob> {
        self.logo.as_ref()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Give back the persistence backend, e.g. to reload from it.
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Empty all three collections and remove their keys from persistence.
    pub fn reset_all(&mut self, mut confirm: impl Confirm) -> ResetOutcome {
        if !confirm.confirm(&Prompt::ResetAll) {
            return ResetOutcome::Declined;
        }

        self.templates.clear();
        self.signatures.clear();
        self.logo = None;

        for key in [&self.keys.templates, &self.keys.signatures, &self.keys.logo] {
            remove_key(&mut self.backend, key);
        }
        info!("all stored data cleared");
        ResetOutcome::Cleared
    }

    /// Read and decode one JSON entry. `None` when absent or unreadable.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log_read_failure(key, e.to_string());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log_read_failure(key, e.to_string());
                None
            }
        }
    }

    /// Signatures are checked one entry at a time; a foreign value only
    /// costs that doctor's signature.
    fn read_signatures(&self) -> SignatureSet {
        let key = &self.keys.signatures;
        let mut signatures = SignatureSet::new();
        let Some(raw) = self.read_json::<BTreeMap<String, Value>>(key) else {
            return signatures;
        };
        for (doctor, value) in raw {
            match value.as_str().map(ImageBlob::parse) {
                Some(Ok(image)) => {
                    signatures.insert(doctor, image);
                }
                Some(Err(e)) => warn!("dropping stored signature for `{}`: {}", doctor, e),
                None => warn!("dropping stored signature for `{}`: not a string", doctor),
            }
        }
        signatures
    }

    fn read_logo(&self) -> Option<ImageBlob> {
        let key = &self.keys.logo;
        match self.backend.get(key) {
            Ok(Some(raw)) => match ImageBlob::parse(&raw) {
                Ok(logo) => Some(logo),
                Err(e) => {
                    log_read_failure(key, e.to_string());
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log_read_failure(key, e.to_string());
                None
            }
        }
    }

    pub(crate) fn persist_templates(&mut self) {
        match serde_json::to_string(&self.templates) {
            Ok(raw) => write_raw(&mut self.backend, &self.keys.templates, &raw),
            Err(e) => warn!("{}", StoreError::from(e)),
        }
    }

    pub(crate) fn persist_signatures(&mut self) {
        match serde_json::to_string(&self.signatures) {
            Ok(raw) => write_raw(&mut self.backend, &self.keys.signatures, &raw),
            Err(e) => warn!("{}", StoreError::from(e)),
        }
    }

    /// The logo is stored as the bare URI; no logo means no key.
    pub(crate) fn persist_logo(&mut self) {
        match &self.logo {
            Some(logo) => write_raw(&mut self.backend, &self.keys.logo, logo.as_uri()),
            None => remove_key(&mut self.backend, &self.keys.logo),
        }
    }
}

fn write_raw<S: KeyValueStore>(backend: &mut S, key: &str, raw: &str) {
    match backend.set(key, raw) {
        Ok(()) => debug!("persisted `{}` ({} bytes)", key, raw.len()),
        Err(source) => log_write_failure(key, source),
    }
}

fn remove_key<S: KeyValueStore>(backend: &mut S, key: &str) {
    match backend.remove(key) {
        Ok(()) => debug!("removed `{}`", key),
        Err(source) => log_write_failure(key, source),
    }
}

fn log_read_failure(key: &str, reason: String) {
    let err = StoreError::PersistenceRead {
        key: key.to_string(),
        reason,
    };
    warn!("{}; starting with an empty collection", err);
}

fn log_write_failure(key: &str, source: PersistenceError) {
    let err = StoreError::PersistenceWrite {
        key: key.to_string(),
        source,
    };
    warn!("{}; change kept for this session only", err);
}

/// Keep the first template of each name.
fn dedupe_by_name(templates: Vec<Template>) -> Vec<Template> {
    let mut seen = HashSet::new();
    templates
        .into_iter()
        .filter(|t| {
            let first = seen.insert(t.name.clone());
            if !first {
                warn!("dropping duplicate stored template `{}`", t.name);
            }
            first
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{Accept, Decline};
    use crate::storage::MemoryStore;

    fn keys() -> StorageKeys {
        StorageKeys::default()
    }

    #[test]
    fn malformed_entries_load_as_empty_independently() {
        let logo = "data:image/png;base64,iVBORw0KGgo=";
        let backend = MemoryStore::new()
            .seeded("mpg_templates_v1", "{not json")
            .seeded("mpg_signatures_v1", r#"{"Dr. A":"data:image/png;base64,iVBORw0KGgo="}"#)
            .seeded("mpg_logo_v1", logo);

        let store = DocumentStore::load(backend, keys());
        assert!(store.templates().is_empty());
        assert_eq!(store.signatures().len(), 1);
        assert_eq!(store.logo().map(|l| l.as_uri()), Some(logo));
    }

    #[test]
    fn logo_that_is_not_an_image_uri_is_ignored() {
        let backend = MemoryStore::new().seeded("mpg_logo_v1", "blob:https://x/123");
        let store = DocumentStore::load(backend, keys());
        assert!(store.logo().is_none());
    }

    #[test]
    fn unavailable_backend_loads_empty() {
        let mut backend = MemoryStore::new().seeded("mpg_templates_v1", "[]");
        backend.set_offline(true);
        let store = DocumentStore::load(backend, keys());
        assert!(store.templates().is_empty());
        assert!(store.signatures().is_empty());
        assert!(store.logo().is_none());
    }

    #[test]
    fn malformed_signatures_load_as_empty() {
        let backend = MemoryStore::new()
            .seeded("mpg_templates_v1", r#"[{"name":"Flu","content":"c","updatedAt":"2025-01-01T00:00:00Z"}]"#)
            .seeded("mpg_signatures_v1", "[1, 2");
        let store = DocumentStore::load(backend, keys());
        assert!(store.signatures().is_empty());
        assert_eq!(store.templates().len(), 1);
    }

    #[test]
    fn foreign_signature_entry_does_not_cost_the_others() {
        let png = "data:image/png;base64,iVBORw0KGgo=";
        let backend = MemoryStore::new().seeded(
            "mpg_signatures_v1",
            &format!(
                r#"{{"Dr. A":"{}","Dr. B":"data:application/octet-stream;base64,AAAA","Dr. D":7}}"#,
                png
            ),
        );
        let mut store = DocumentStore::load(backend, keys());
        assert_eq!(store.signatures().len(), 1);
        assert_eq!(store.signature("Dr. A").map(|s| s.as_uri()), Some(png));
        assert!(store.signature("Dr. B").is_none());

        store.set_signature("Dr. C", ImageBlob::parse(png).unwrap()).unwrap();
        let reloaded = DocumentStore::load(store.into_backend(), keys());
        assert_eq!(reloaded.signature("Dr. A").map(|s| s.as_uri()), Some(png));
        assert_eq!(reloaded.signature("Dr. C").map(|s| s.as_uri()), Some(png));
    }

    #[test]
    fn duplicate_stored_names_keep_the_first() {
        let backend = MemoryStore::new().seeded(
            "mpg_templates_v1",
            r#"[
                {"name":"Flu","content":"first","updatedAt":"2025-01-01T00:00:00Z"},
                {"name":"Cold","content":"c","updatedAt":"2025-01-01T00:00:00Z"},
                {"name":"Flu","content":"second","updatedAt":"2025-01-02T00:00:00Z"}
            ]"#,
        );
        let store = DocumentStore::load(backend, keys());
        let names: Vec<_> = store.templates().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Flu", "Cold"]);
        assert_eq!(store.template("Flu").unwrap().content, "first");
    }

    #[test]
    fn declined_reset_changes_nothing() {
        let backend = MemoryStore::new().seeded("mpg_logo_v1", "data:image/png;base64,iVBORw0KGgo=");
        let mut store = DocumentStore::load(backend, keys());
        store.save_template("Flu", "<p>Rest</p>", Accept).unwrap();

        assert_eq!(store.reset_all(Decline), ResetOutcome::Declined);
        assert_eq!(store.templates().len(), 1);
        assert!(store.logo().is_some());

        let backend = store.into_backend();
        assert!(backend.contains_key("mpg_templates_v1"));
        assert!(backend.contains_key("mpg_logo_v1"));
    }

    #[test]
    fn confirmed_reset_removes_every_key() {
        let mut store = DocumentStore::load(MemoryStore::new(), keys());
        store.save_template("Flu", "<p>Rest</p>", Accept).unwrap();
        store
            .set_signature("Dr. A", ImageBlob::parse("data:image/png;base64,iVBORw0KGgo=").unwrap())
            .unwrap();

        assert_eq!(store.reset_all(Accept), ResetOutcome::Cleared);
        assert!(store.templates().is_empty());
        assert!(store.signatures().is_empty());
        assert!(store.logo().is_none());
        assert!(store.into_backend().is_empty());
    }
}
