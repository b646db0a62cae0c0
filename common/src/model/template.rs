use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named snapshot of editor content, reusable to seed or extend a draft.
///
/// `name` is the key of the template collection: matching is exact and
/// case-sensitive. `content` is the editor's serialized HTML and is never
/// inspected. Field order here is the key order of the stored and exported
/// JSON (`name`, `content`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub content: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            updated_at,
        }
    }
}
