use std::cell::Cell;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rx_common::clock::Clock;
use rx_common::config::{AppConfig, StorageKeys};
use rx_common::confirm::{Accept, Decline};
use rx_common::model::{ApplyMode, Draft, ImageBlob};
use rx_common::storage::{KeyValueStore, MemoryStore};
use rx_common::store::{ResetOutcome, SaveOutcome};
use rx_common::{DocumentStore, StoreError};

struct TickClock(Cell<i64>);

impl TickClock {
    fn starting_at(secs: i64) -> Self {
        TickClock(Cell::new(secs))
    }
}

impl Clock for TickClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.0.get();
        self.0.set(secs + 60);
        Utc.timestamp_opt(secs, 0).unwrap()
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn open(backend: MemoryStore) -> DocumentStore<MemoryStore, TickClock> {
    DocumentStore::load_with_clock(backend, StorageKeys::default(), TickClock::starting_at(1_735_689_600))
}

fn logo() -> ImageBlob {
    ImageBlob::from_bytes("image/png", b"\x89PNG\r\n\x1a\nlogo").unwrap()
}

#[test]
fn flu_example_creates_then_replaces() {
    init_logging();
    let mut store = open(MemoryStore::new());

    assert_eq!(store.save_template("Flu", "<p>Rest</p>", Accept).unwrap(), SaveOutcome::Created);
    let t1 = store.templates()[0].updated_at;
    assert_eq!(t1, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

    assert_eq!(
        store.save_template("Flu", "<p>Rest+fluids</p>", Accept).unwrap(),
        SaveOutcome::Replaced
    );
    assert_eq!(store.templates().len(), 1);
    let flu = &store.templates()[0];
    assert_eq!(flu.name, "Flu");
    assert_eq!(flu.content, "<p>Rest+fluids</p>");
    assert!(flu.updated_at > t1);
}

#[test]
fn new_templates_append_in_insertion_order() {
    init_logging();
    let mut store = open(MemoryStore::new());
    for name in ["Flu", "Angina", "Migraine"] {
        store.save_template(name, "<p></p>", Decline).unwrap();
        assert_eq!(store.templates().last().map(|t| t.name.as_str()), Some(name));
    }
    assert_eq!(store.templates().len(), 3);
}

#[test]
fn template_survives_a_restart() {
    init_logging();
    let content = "<p><strong>დანიშნულება:</strong></p><ol><li>Paracetamol 500mg</li></ol>";
    let mut store = open(MemoryStore::new());
    store.save_template("x", content, Accept).unwrap();

    let mut restarted = open(store.into_backend());
    let config = AppConfig::default();
    let mut draft = Draft::new(&config, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

    assert!(draft.apply_template(&restarted, "x", ApplyMode::Replace));
    assert_eq!(draft.content, content);

    // Still editable after the restart.
    assert_eq!(restarted.save_template("x", "<p>v2</p>", Accept).unwrap(), SaveOutcome::Replaced);
}

#[test]
fn apply_modes_on_a_draft() {
    init_logging();
    let mut store = open(MemoryStore::new());
    store.save_template("Flu", "<p>Rest</p>", Accept).unwrap();

    let config = AppConfig::default();
    let mut draft = Draft::new(&config, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let initial = draft.content.clone();

    assert!(draft.apply_template(&store, "Flu", ApplyMode::Append));
    assert_eq!(draft.content, format!("{}<p>Rest</p>", initial));

    assert!(draft.apply_template(&store, "Flu", ApplyMode::Replace));
    assert_eq!(draft.content, "<p>Rest</p>");

    assert!(!draft.apply_template(&store, "Cold", ApplyMode::Replace));
    assert_eq!(draft.content, "<p>Rest</p>");
}

#[test]
fn logo_set_then_cleared_matches_initial_state() {
    init_logging();
    let pristine = MemoryStore::new();
    let mut store = open(pristine.clone());
    store.set_logo(Some(logo()));
    store.set_logo(None);
    assert!(store.logo().is_none());

    let backend = store.into_backend();
    assert_eq!(backend.len(), pristine.len());
    assert!(open(backend).logo().is_none());
}

#[test]
fn logo_and_signatures_reload() {
    init_logging();
    let mut store = open(MemoryStore::new());
    store.set_logo(Some(logo()));
    store.set_signature("ნინო კიკვაძე", logo()).unwrap();

    let restarted = open(store.into_backend());
    assert_eq!(restarted.logo(), Some(&logo()));
    assert_eq!(restarted.signature("ნინო კიკვაძე"), Some(&logo()));
    assert_eq!(restarted.signature("ანა დალაქიშვილი"), None);
}

#[test]
fn reset_all_confirmed_and_declined() {
    init_logging();
    let mut store = open(MemoryStore::new());
    store.save_template("Flu", "<p>Rest</p>", Accept).unwrap();
    store.set_signature("Dr. A", logo()).unwrap();
    store.set_logo(Some(logo()));

    let templates = store.templates().to_vec();
    let signatures = store.signatures().clone();
    assert_eq!(store.reset_all(Decline), ResetOutcome::Declined);
    assert_eq!(store.templates(), templates.as_slice());
    assert_eq!(store.signatures(), &signatures);
    assert_eq!(store.logo(), Some(&logo()));

    assert_eq!(store.reset_all(Accept), ResetOutcome::Cleared);
    let restarted = open(store.into_backend());
    assert!(restarted.templates().is_empty());
    assert!(restarted.signatures().is_empty());
    assert!(restarted.logo().is_none());
}

#[test]
fn failed_writes_keep_session_state_but_not_reload_state() {
    init_logging();
    // Room for the first template only.
    let mut store = open(MemoryStore::with_quota(160));
    store.save_template("Flu", "<p>Rest</p>", Accept).unwrap();
    store
        .save_template("Long", &"<p>lorem ipsum</p>".repeat(20), Accept)
        .unwrap();
    assert_eq!(store.templates().len(), 2);

    let restarted = open(store.into_backend());
    let names: Vec<_> = restarted.templates().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Flu"]);
}

#[test]
fn offline_backend_never_surfaces_errors() {
    init_logging();
    let mut backend = MemoryStore::new();
    backend.set_offline(true);
    let mut store = open(backend);

    assert_eq!(store.save_template("Flu", "<p>Rest</p>", Accept).unwrap(), SaveOutcome::Created);
    store.set_logo(Some(logo()));
    assert_eq!(store.reset_all(Accept), ResetOutcome::Cleared);
}

#[test]
fn validation_error_leaves_storage_untouched() {
    init_logging();
    let mut store = open(MemoryStore::new());
    store.save_template("Flu", "<p>Rest</p>", Accept).unwrap();
    let keys = store.keys().clone();

    let err = store.save_template("  ", "<p>x</p>", Accept).unwrap_err();
    assert_eq!(err.to_string(), "template name: must not be empty");

    let backend = store.into_backend();
    let raw = backend.get(&keys.templates).unwrap().unwrap();
    assert!(!raw.contains("<p>x</p>"));
}

#[test]
fn reads_data_written_by_the_javascript_build() {
    init_logging();
    let backend = MemoryStore::new()
        .seeded(
            "mpg_templates_v1",
            r#"[{"name":"Flu","content":"<p>Rest</p>","updatedAt":"2024-05-02T10:11:12.345Z"}]"#,
        )
        .seeded("mpg_signatures_v1", r#"{"Dr. A":"data:image/jpeg;base64,/9j/4AAQ"}"#)
        .seeded("mpg_logo_v1", "data:image/png;base64,iVBORw0KGgo=");

    let store = open(backend);
    assert_eq!(store.templates().len(), 1);
    assert_eq!(store.signature("Dr. A").map(|s| s.mime_type()), Some("image/jpeg"));
    assert!(store.logo().is_some());
}

#[test]
fn file_read_errors_do_not_touch_stored_images() {
    init_logging();
    let mut store = open(MemoryStore::new());
    store.set_logo(Some(logo()));

    match ImageBlob::from_bytes("text/plain", b"hello") {
        Ok(image) => store.set_logo(Some(image)),
        Err(err) => assert!(matches!(err, StoreError::FileRead(_))),
    }
    assert_eq!(store.logo(), Some(&logo()));
}
