//! # In-Memory Store
//!
//! Ordered feedback collection plus the id counter, hydrated from a
//! [`FeedbackBackend`] at startup. The store is not synchronized; the HTTP
//! layer owns it behind a mutex.

use tracing::info;

use super::persistence::FeedbackBackend;
use super::record::{FeedbackRecord, NewFeedback};

/// First id after `records`: max existing id + 1, or 1 when empty.
///
/// Order-independent, so a hand-edited file still yields a fresh id.
pub fn next_id_for(records: &[FeedbackRecord]) -> u64 {
    records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
}

/// Feedback collection in insertion order
#[derive(Debug)]
pub struct FeedbackStore {
    records: Vec<FeedbackRecord>,
    next_id: u64,
    backend: Box<dyn FeedbackBackend>,
}

impl FeedbackStore {
    /// Hydrate from the backend. Load failures yield an empty store.
    pub fn initialize(backend: Box<dyn FeedbackBackend>) -> Self {
        let records = backend.load();
        let next_id = next_id_for(&records);

        info!(
            "Loaded {} feedback record(s) from {}",
            records.len(),
            backend.location()
        );

        Self {
            records,
            next_id,
            backend,
        }
    }

    /// Assign the next id and append
    pub fn append(&mut self, feedback: NewFeedback) -> FeedbackRecord {
        let record = feedback.with_id(self.next_id);
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    pub fn find_by_id(&self, id: u64) -> Option<&FeedbackRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove the record with `id`, keeping the order of the rest
    pub fn remove_by_id(&mut self, id: u64) -> Option<FeedbackRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn all(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next append will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Write the full collection through the backend. Failures are logged only.
    pub fn persist(&self) {
        self.backend.save(&self.records);
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::persistence::JsonFileBackend;
    use tempfile::TempDir;

    fn empty_store(temp: &TempDir) -> FeedbackStore {
        FeedbackStore::initialize(Box::new(JsonFileBackend::new(
            temp.path().join("feedback.json"),
        )))
    }

    #[test]
    fn test_next_id_for_empty() {
        assert_eq!(next_id_for(&[]), 1);
    }

    #[test]
    fn test_next_id_for_ignores_order() {
        let records = vec![
            NewFeedback::now(1, "a", None).with_id(7),
            NewFeedback::now(1, "b", None).with_id(2),
            NewFeedback::now(1, "c", None).with_id(4),
        ];
        assert_eq!(next_id_for(&records), 8);
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp);

        let first = store.append(NewFeedback::now(5, "one", None));
        let second = store.append(NewFeedback::now(3, "two", None));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.next_id(), 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_preserves_order_and_ids_not_reused() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp);
        for comment in ["a", "b", "c"] {
            store.append(NewFeedback::now(4, comment, None));
        }

        let removed = store.remove_by_id(2).unwrap();
        assert_eq!(removed.comment, "b");
        assert!(store.remove_by_id(2).is_none());

        let ids: Vec<u64> = store.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let next = store.append(NewFeedback::now(4, "d", None));
        assert_eq!(next.id, 4);
    }

    #[test]
    fn test_remove_last_then_append_does_not_reuse() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp);
        store.append(NewFeedback::now(4, "only", None));
        store.remove_by_id(1);

        assert!(store.is_empty());
        assert_eq!(store.append(NewFeedback::now(4, "again", None)).id, 2);
    }

    #[test]
    fn test_find_by_id() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp);
        store.append(NewFeedback::now(2, "found", None));

        assert_eq!(store.find_by_id(1).map(|r| r.comment.as_str()), Some("found"));
        assert!(store.find_by_id(99).is_none());
    }

    #[test]
    fn test_persist_then_rehydrate() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp);
        store.append(NewFeedback::now(4, "kept", Some("curl")));
        store.append(NewFeedback::now(1, "dropped", None));
        store.append(NewFeedback::now(5, "last", None));
        store.remove_by_id(2);
        store.persist();
        let expected = store.all().to_vec();

        let reloaded = empty_store(&temp);
        assert_eq!(reloaded.all(), expected.as_slice());
        assert_eq!(reloaded.next_id(), 4);
    }
}
