use std::collections::BTreeMap;

use serde::Serialize;

use super::image::ImageBlob;

/// Uploaded signature images keyed by doctor.
///
/// At most one image per doctor; inserting replaces only that doctor's entry.
/// Serialized as a plain JSON object `{ "<doctor>": "<data uri>", ... }`.
/// Loading goes through the document store, which vets each entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignatureSet {
    by_doctor: BTreeMap<String, ImageBlob>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, doctor: &str) -> Option<&ImageBlob> {
        self.by_doctor.get(doctor)
    }

    /// Returns the image previously stored for `doctor`, if any.
    pub fn insert(&mut self, doctor: impl Into<String>, image: ImageBlob) -> Option<ImageBlob> {
        self.by_doctor.insert(doctor.into(), image)
    }

    pub fn remove(&mut self, doctor: &str) -> Option<ImageBlob> {
        self.by_doctor.remove(doctor)
    }

    pub fn len(&self) -> usize {
        self.by_doctor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_doctor.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_doctor.clear();
    }
}
