use log::info;

use super::DocumentStore;
use crate::clock::Clock;
use crate::confirm::{Confirm, Prompt};
use crate::error::StoreError;
use crate::model::{ApplyMode, Template};
use crate::storage::KeyValueStore;

/// Result of [`DocumentStore::save_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new template was appended to the collection.
    Created,
    /// An existing template was overwritten in place.
    Replaced,
    /// The name was taken and the overwrite was not confirmed.
    Declined,
}

/// Result of [`DocumentStore::delete_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotFound,
    Declined,
}

/// Serialized template collection, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateExport {
    pub file_name: String,
    pub mime: &'static str,
    pub body: String,
}

impl<S: KeyValueStore, C: Clock> DocumentStore<S, C> {
    /// Save `content` under `name`.
    ///
    /// `name` is trimmed first; a blank name is a validation error. An
    /// existing template is only overwritten when `confirm` agrees, and keeps
    /// its position in the collection. New names are appended.
    pub fn save_template(
        &mut self,
        name: &str,
        content: &str,
        mut confirm: impl Confirm,
    ) -> Result<SaveOutcome, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::blank("template name"));
        }

        let existing = self.templates.iter().position(|t| t.name == name);
        if existing.is_some()
            && !confirm.confirm(&Prompt::OverwriteTemplate {
                name: name.to_string(),
            })
        {
            return Ok(SaveOutcome::Declined);
        }

        let template = Template::new(name, content, self.clock.now());
        let outcome = match existing {
            Some(index) => {
                self.templates[index] = template;
                SaveOutcome::Replaced
            }
            None => {
                self.templates.push(template);
                SaveOutcome::Created
            }
        };
        info!("template `{}` saved ({:?})", name, outcome);

        self.persist_templates();
        Ok(outcome)
    }

    /// Remove the template called exactly `name`, after confirmation.
    pub fn delete_template(&mut self, name: &str, mut confirm: impl Confirm) -> DeleteOutcome {
        if !confirm.confirm(&Prompt::DeleteTemplate {
            name: name.to_string(),
        }) {
            return DeleteOutcome::Declined;
        }

        let before = self.templates.len();
        self.templates.retain(|t| t.name != name);
        if self.templates.len() == before {
            return DeleteOutcome::NotFound;
        }
        info!("template `{}` deleted", name);

        self.persist_templates();
        DeleteOutcome::Removed
    }

    /// Content the draft should hold after applying template `name`.
    ///
    /// `None` when there is no such template; the caller keeps its draft.
    pub fn apply_template(&self, name: &str, mode: ApplyMode, draft: &str) -> Option<String> {
        self.template(name)
            .map(|template| mode.merge(draft, &template.content))
    }

    /// The whole collection as pretty-printed JSON.
    pub fn export_templates(&self, file_name: &str) -> Result<TemplateExport, StoreError> {
        let body = serde_json::to_string_pretty(&self.templates)?;
        Ok(TemplateExport {
            file_name: file_name.to_string(),
            mime: "application/json",
            body,
        })
    }
}
