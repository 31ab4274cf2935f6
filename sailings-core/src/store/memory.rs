//! In-process store, used for embedding and tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::entry::{EntryId, ScheduleEntry};
use crate::error::{ScheduleError, ScheduleResult};
use crate::store::ScheduleStore;

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<ScheduleEntry>>,
    next_id: AtomicUsize,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing sailings (ids are kept as given).
    pub fn with_entries(entries: Vec<ScheduleEntry>) -> Self {
        MemoryStore {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make every following call fail with `StoreUnavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of calls made against the store so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<ScheduleEntry> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ScheduleEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin_call(&self) -> ScheduleResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ScheduleError::StoreUnavailable(
                "memory store is offline".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list(&self) -> ScheduleResult<Vec<ScheduleEntry>> {
        self.begin_call()?;
        Ok(self.snapshot())
    }

    async fn create(&self, entry: &ScheduleEntry) -> ScheduleResult<ScheduleEntry> {
        self.begin_call()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let mut created = entry.clone();
        created.id = EntryId::persisted(format!("mem-{id}"));

        self.lock().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, entry: &ScheduleEntry) -> ScheduleResult<ScheduleEntry> {
        self.begin_call()?;
        let mut entries = self.lock();

        let slot = entries
            .iter_mut()
            .find(|e| e.id.store_id() == Some(id))
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;

        let mut updated = entry.clone();
        updated.id = EntryId::persisted(id);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> ScheduleResult<bool> {
        self.begin_call()?;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|e| e.id.store_id() != Some(id));
        Ok(entries.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::test_support::*;

    #[tokio::test]
    async fn test_create_assigns_store_id() {
        let store = MemoryStore::new();
        let mut draft = persisted("ignored", ymd(2025, 8, 1), 3);
        draft.id = EntryId::Unsaved;

        let created = store.create(&draft).await.unwrap();
        assert_eq!(created.id, EntryId::persisted("mem-1"));
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let entry = persisted("9", ymd(2025, 8, 1), 3);
        assert!(matches!(
            store.update("9", &entry).await,
            Err(ScheduleError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::with_entries(vec![persisted("9", ymd(2025, 8, 1), 3)]);
        assert!(store.delete("9").await.unwrap());
        assert!(!store.delete("9").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_and_counts_calls() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.list().await,
            Err(ScheduleError::StoreUnavailable(_))
        ));
        assert_eq!(store.calls(), 1);
    }
}
