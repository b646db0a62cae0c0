use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::storage::KeyValueStore;
use crate::store::DocumentStore;

/// How a template's content is merged into the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    /// Template content becomes the whole draft.
    Replace,
    /// Template content goes after the current draft, with no separator.
    Append,
}

impl ApplyMode {
    /// Merge `template` into `draft` according to the mode.
    pub fn merge(self, draft: &str, template: &str) -> String {
        match self {
            ApplyMode::Replace => template.to_string(),
            ApplyMode::Append => {
                let mut merged = String::with_capacity(draft.len() + template.len());
                merged.push_str(draft);
                merged.push_str(template);
                merged
            }
        }
    }

    /// Whether the draft holds no unsaved typing after the merge, given
    /// whether it held none before. Appending keeps whatever was there.
    pub fn leaves_draft_clean(self, was_clean: bool) -> bool {
        match self {
            ApplyMode::Replace => true,
            ApplyMode::Append => was_clean,
        }
    }
}

/// The prescription being edited in this session.
///
/// Never persisted: only templates, signatures and the logo outlive a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub patient_name: String,
    pub history_number: String,
    pub issue_date: NaiveDate,
    pub doctor: String,
    /// Serialized rich-text content (HTML), opaque here.
    pub content: String,
}

impl Draft {
    /// Fresh draft: issued `today`, first doctor of the roster, default content.
    pub fn new(config: &AppConfig, today: NaiveDate) -> Self {
        Self {
            patient_name: String::new(),
            history_number: String::new(),
            issue_date: today,
            doctor: config.default_doctor().to_string(),
            content: config.default_content.clone(),
        }
    }

    /// Merge the named template into `content`.
    ///
    /// Returns `false` and leaves the draft untouched when no template has
    /// that exact name.
    pub fn apply_template<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &DocumentStore<S, C>,
        name: &str,
        mode: ApplyMode,
    ) -> bool {
        match store.apply_template(name, mode, &self.content) {
            Some(content) => {
                self.content = content;
                true
            }
            None => false,
        }
    }

    /// `issue_date` as the `YYYY-MM-DD` string a date input expects.
    pub fn issue_date_value(&self) -> String {
        self.issue_date.format("%Y-%m-%d").to_string()
    }

    /// Set `issue_date` from a date input value. Unparseable input is ignored.
    pub fn set_issue_date(&mut self, value: &str) -> bool {
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => {
                self.issue_date = date;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn new_draft_uses_roster_head_and_default_content() {
        let config = AppConfig::default();
        let draft = Draft::new(&config, today());
        assert_eq!(draft.doctor, "ნინო კიკვაძე");
        assert_eq!(draft.content, config.default_content);
        assert_eq!(draft.issue_date_value(), "2025-03-01");
        assert!(draft.patient_name.is_empty());
        assert!(draft.history_number.is_empty());
    }

    #[test]
    fn append_keeps_both_parts_verbatim() {
        assert_eq!(ApplyMode::Append.merge("<p>a</p>", "<p>b</p>"), "<p>a</p><p>b</p>");
        assert_eq!(ApplyMode::Append.merge("", "<p>b</p>"), "<p>b</p>");
        assert_eq!(ApplyMode::Replace.merge("<p>a</p>", "<p>b</p>"), "<p>b</p>");
    }

    #[test]
    fn append_onto_unsaved_typing_stays_dirty() {
        assert!(!ApplyMode::Append.leaves_draft_clean(false));
        assert!(ApplyMode::Append.leaves_draft_clean(true));
        assert!(ApplyMode::Replace.leaves_draft_clean(false));
        assert!(ApplyMode::Replace.leaves_draft_clean(true));
    }

    #[test]
    fn bad_date_input_is_ignored() {
        let mut draft = Draft::new(&AppConfig::default(), today());
        assert!(!draft.set_issue_date("01/03/2025"));
        assert!(!draft.set_issue_date(""));
        assert_eq!(draft.issue_date, today());

        assert!(draft.set_issue_date("2025-12-31"));
        assert_eq!(draft.issue_date_value(), "2025-12-31");
    }
}
