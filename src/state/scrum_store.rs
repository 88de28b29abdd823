//! In-memory scrum catalogue

use std::collections::BTreeMap;

use tracing::info;

use crate::{
    error::ScrumError,
    scrum::{ScrumDraft, ScrumRecord},
};

/// Scrum records keyed by id, in id order
#[derive(Debug, Clone)]
pub struct ScrumStore {
    scrums: BTreeMap<u64, ScrumRecord>,
    next_id: u64,
}

impl ScrumStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            scrums: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a store seeded with the demo scrums
    pub fn with_samples() -> Self {
        let mut store = Self::new();
        for record in ScrumRecord::samples() {
            store.next_id = store.next_id.max(record.id + 1);
            store.scrums.insert(record.id, record);
        }
        store
    }

    pub fn list(&self) -> impl Iterator<Item = &ScrumRecord> {
        self.scrums.values()
    }

    pub fn len(&self) -> usize {
        self.scrums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrums.is_empty()
    }

    pub fn get(&self, id: u64) -> Result<&ScrumRecord, ScrumError> {
        self.scrums.get(&id).ok_or(ScrumError::ScrumNotFound(id))
    }

    /// Commit a draft as a new scrum
    pub fn insert(&mut self, draft: ScrumDraft) -> Result<ScrumRecord, ScrumError> {
        let record = draft.commit(self.next_id)?;
        self.next_id += 1;
        info!("Created scrum {} '{}'", record.id, record.title);
        self.scrums.insert(record.id, record.clone());
        Ok(record)
    }

    /// Commit a draft over an existing scrum; the old record stays on failure
    pub fn update(&mut self, id: u64, draft: ScrumDraft) -> Result<ScrumRecord, ScrumError> {
        let slot = self.scrums.get_mut(&id).ok_or(ScrumError::ScrumNotFound(id))?;
        let record = draft.commit(id)?;
        info!("Updated scrum {} '{}'", id, record.title);
        *slot = record.clone();
        Ok(record)
    }

    pub fn remove(&mut self, id: u64) -> Result<ScrumRecord, ScrumError> {
        let record = self.scrums.remove(&id).ok_or(ScrumError::ScrumNotFound(id))?;
        info!("Deleted scrum {} '{}'", id, record.title);
        Ok(record)
    }
}

impl Default for ScrumStore {
    fn default() -> Self {
        Self::new()
    }
}
