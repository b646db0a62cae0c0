//! Ordering for asynchronous image uploads.
//!
//! Reading a file into an [`ImageBlob`](crate::model::ImageBlob) completes at
//! some later tick. When the user picks two files for the same slot in quick
//! succession the reads may finish out of order; the tracker makes the most
//! recently *started* upload win and reports older completions as stale.
//! Uploads to different slots never affect each other.

use std::collections::HashMap;

use log::debug;

/// Where a finished upload lands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UploadSlot {
    Logo,
    Signature(String),
}

/// Handle for one in-flight upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    slot: UploadSlot,
    seq: u64,
}

impl UploadTicket {
    pub fn slot(&self) -> &UploadSlot {
        &self.slot
    }
}

#[derive(Debug, Default)]
pub struct UploadTracker {
    next_seq: u64,
    latest: HashMap<UploadSlot, u64>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new upload for `slot`, superseding any still in flight.
    pub fn begin(&mut self, slot: UploadSlot) -> UploadTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest.insert(slot.clone(), seq);
        UploadTicket { slot, seq }
    }

    /// Close out `ticket`. `true` means its result should be applied.
    pub fn finish(&mut self, ticket: &UploadTicket) -> bool {
        if self.latest.get(&ticket.slot) == Some(&ticket.seq) {
            self.latest.remove(&ticket.slot);
            true
        } else {
            debug!("discarding stale upload #{} for {:?}", ticket.seq, ticket.slot);
            false
        }
    }

    /// Forget `ticket` after its read failed. A newer upload is unaffected.
    ///
    /// Returns `true` when `ticket` was still the latest for its slot, i.e.
    /// the failure is worth reporting.
    pub fn abandon(&mut self, ticket: &UploadTicket) -> bool {
        if self.latest.get(&ticket.slot) == Some(&ticket.seq) {
            self.latest.remove(&ticket.slot);
            true
        } else {
            debug!("ignoring failure of stale upload #{} for {:?}", ticket.seq, ticket.slot);
            false
        }
    }
}
