use log::info;

use super::DocumentStore;
use crate::clock::Clock;
use crate::error::StoreError;
use crate::model::ImageBlob;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore, C: Clock> DocumentStore<S, C> {
    /// Store or clear (`None`) the clinic logo.
    pub fn set_logo(&mut self, logo: Option<ImageBlob>) {
        match &logo {
            Some(image) => info!("logo set ({:?})", image),
            None => info!("logo cleared"),
        }
        self.logo = logo;
        self.persist_logo();
    }

    /// Store `image` as `doctor`'s signature, replacing only that doctor's.
    pub fn set_signature(&mut self, doctor: &str, image: ImageBlob) -> Result<(), StoreError> {
        if doctor.trim().is_empty() {
            return Err(StoreError::blank("doctor"));
        }
        let replaced = self.signatures.insert(doctor, image).is_some();
        info!(
            "signature for `{}` {}",
            doctor,
            if replaced { "replaced" } else { "added" }
        );
        self.persist_signatures();
        Ok(())
    }

    /// Drop `doctor`'s signature. Returns whether there was one.
    pub fn clear_signature(&mut self, doctor: &str) -> bool {
        if self.signatures.remove(doctor).is_none() {
            return false;
        }
        info!("signature for `{}` cleared", doctor);
        self.persist_signatures();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKeys;
    use crate::storage::MemoryStore;

    fn png(seed: u8) -> ImageBlob {
        ImageBlob::from_bytes("image/png", &[0x89, b'P', b'N', b'G', seed]).unwrap()
    }

    fn store() -> DocumentStore<MemoryStore> {
        DocumentStore::load(MemoryStore::new(), StorageKeys::default())
    }

    #[test]
    fn signature_upload_replaces_only_that_doctor() {
        let mut store = store();
        store.set_signature("Dr. A", png(1)).unwrap();
        store.set_signature("Dr. B", png(2)).unwrap();
        store.set_signature("Dr. A", png(3)).unwrap();

        assert_eq!(store.signatures().len(), 2);
        assert_eq!(store.signature("Dr. A"), Some(&png(3)));
        assert_eq!(store.signature("Dr. B"), Some(&png(2)));
    }

    #[test]
    fn blank_doctor_is_rejected() {
        let mut store = store();
        assert!(matches!(
            store.set_signature(" ", png(1)),
            Err(StoreError::Validation { field: "doctor", .. })
        ));
        assert!(store.signatures().is_empty());
    }

    #[test]
    fn clearing_a_signature_persists_the_smaller_map() {
        let mut store = store();
        store.set_signature("Dr. A", png(1)).unwrap();
        store.set_signature("Dr. B", png(2)).unwrap();

        assert!(store.clear_signature("Dr. A"));
        assert!(!store.clear_signature("Dr. A"));

        let keys = store.keys().clone();
        let backend = store.into_backend();
        let raw = backend.get(&keys.signatures).unwrap().unwrap();
        assert!(!raw.contains("Dr. A"));
        assert!(raw.contains("Dr. B"));
    }

    #[test]
    fn clearing_the_logo_removes_its_key() {
        let mut store = store();
        store.set_logo(Some(png(1)));
        let keys = store.keys().clone();
        store.set_logo(None);

        assert!(store.logo().is_none());
        assert!(!store.into_backend().contains_key(&keys.logo));
    }
}
