//! In-memory record store for the URL registry.
//!
//! The store owns the only mutable copy of the records. Readers get a [`Snapshot`],
//! which is republished after every mutation and never changes once handed out.

use std::sync::Arc;

use shared::{
    domain::{RecordId, UrlRecord},
    error::RegistryError,
};
use tracing::{debug, info};

/// Immutable view of the records, in insertion order, taken at one store revision.
#[derive(Debug, Clone)]
pub struct Snapshot {
    revision: u64,
    records: Arc<[UrlRecord]>,
}

impl Snapshot {
    fn new(revision: u64, records: Vec<UrlRecord>) -> Self {
        Self {
            revision,
            records: Arc::from(records),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UrlRecord> {
        self.records.iter()
    }

    /// Record shown at `position` when this snapshot was rendered.
    pub fn get(&self, position: usize) -> Option<&UrlRecord> {
        self.records.get(position)
    }

    /// Maps a displayed position back to the id of the record that was shown there.
    pub fn id_at(&self, position: usize) -> Option<RecordId> {
        self.get(position).map(|record| record.id)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a UrlRecord;
    type IntoIter = std::slice::Iter<'a, UrlRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct RecordStore {
    records: Vec<UrlRecord>,
    next_id: i64,
    revision: u64,
    published: Snapshot,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            revision: 0,
            published: Snapshot::new(0, Vec::new()),
        }
    }

    /// Appends a record. Nothing about `url` or `name` is validated.
    pub fn add(&mut self, url: impl Into<String>, name: impl Into<String>) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(UrlRecord {
            id,
            url: url.into(),
            name: name.into(),
        });
        self.publish();
        info!(record_id = id.0, revision = self.revision, "record added");
        id
    }

    /// Replaces both fields of a live record, or neither.
    pub fn update(
        &mut self,
        id: RecordId,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let position = self.position_of(id).ok_or(RegistryError::NotFound { id })?;
        let record = &mut self.records[position];
        record.url = url.into();
        record.name = name.into();
        self.publish();
        info!(record_id = id.0, revision = self.revision, "record updated");
        Ok(())
    }

    /// Removes a live record. Later records move up one position; their ids are unaffected.
    pub fn remove(&mut self, id: RecordId) -> Result<UrlRecord, RegistryError> {
        let position = self.position_of(id).ok_or(RegistryError::NotFound { id })?;
        let removed = self.records.remove(position);
        self.publish();
        info!(record_id = id.0, revision = self.revision, "record removed");
        Ok(removed)
    }

    pub fn get(&self, id: RecordId) -> Option<&UrlRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Current snapshot. Cheap: shares the copy published by the last mutation.
    pub fn list(&self) -> Snapshot {
        self.published.clone()
    }

    /// Records whose name contains `keyword`, ignoring case. An empty keyword matches all.
    pub fn search(&self, keyword: &str) -> Snapshot {
        if keyword.is_empty() {
            return self.list();
        }
        let matches: Vec<UrlRecord> = self
            .published
            .iter()
            .filter(|record| record.name_matches(keyword))
            .cloned()
            .collect();
        debug!(keyword, matches = matches.len(), "searched records");
        Snapshot::new(self.revision, matches)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// False once any mutation has happened after `snapshot` was taken.
    pub fn is_current(&self, snapshot: &Snapshot) -> bool {
        snapshot.revision == self.revision
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.published = Snapshot::new(self.revision, self.records.clone());
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
