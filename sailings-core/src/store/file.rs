//! JSON file store.
//!
//! Sailings are kept as a JSON array of wire records. Writes go to a temp file
//! that is renamed into place, so a crash never leaves a half-written store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::entry::{EntryRecord, ScheduleEntry};
use crate::error::{ScheduleError, ScheduleResult};
use crate::store::ScheduleStore;

pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> ScheduleResult<Vec<EntryRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.unavailable(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            ScheduleError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write_records(&self, records: &[EntryRecord]) -> ScheduleResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.unavailable(e))?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| ScheduleError::Serialization(e.to_string()))?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| self.unavailable(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.unavailable(e))?;
        Ok(())
    }

    fn unavailable(&self, e: std::io::Error) -> ScheduleError {
        ScheduleError::StoreUnavailable(format!("{}: {e}", self.path.display()))
    }
}

#[async_trait]
impl ScheduleStore for FileStore {
    async fn list(&self) -> ScheduleResult<Vec<ScheduleEntry>> {
        let records = self.read_records().await?;

        // One bad row should not hide the rest of the schedule
        let entries = records
            .into_iter()
            .filter_map(|record| match ScheduleEntry::try_from(record) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable stored sailing");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    async fn create(&self, entry: &ScheduleEntry) -> ScheduleResult<ScheduleEntry> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;

        let mut record = EntryRecord::from(entry);
        record.id = uuid::Uuid::new_v4().to_string();
        records.push(record.clone());

        self.write_records(&records).await?;
        ScheduleEntry::try_from(record)
    }

    async fn update(&self, id: &str, entry: &ScheduleEntry) -> ScheduleResult<ScheduleEntry> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;

        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;

        let mut record = EntryRecord::from(entry);
        record.id = id.to_string();
        *slot = record.clone();

        self.write_records(&records).await?;
        ScheduleEntry::try_from(record)
    }

    async fn delete(&self, id: &str) -> ScheduleResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }

        self.write_records(&records).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;
    use crate::entry::test_support::*;
    use crate::money::Money;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("entries.json"))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_update_delete_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut draft = persisted("", ymd(2025, 8, 1), 3);
        draft.id = EntryId::Unsaved;
        let created = store.create(&draft).await.unwrap();
        let id = created.id.store_id().unwrap().to_string();
        assert!(!id.is_empty());

        let mut changed = created.clone();
        changed.double_price = Money::from_dollars(725);
        let updated = store.update(&id, &changed).await.unwrap();
        assert_eq!(updated, changed);

        // A fresh handle sees what was written
        let reopened = store_in(&dir);
        assert_eq!(reopened.list().await.unwrap(), vec![changed]);

        assert!(reopened.delete(&id).await.unwrap());
        assert!(!reopened.delete(&id).await.unwrap());
        assert!(reopened.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_rows_are_skipped_but_kept_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "bad", "startDate": "someday", "endDate": "04 August 2025", "nights": 3,
                 "startPoint": "Aswan", "endPoint": "Esna", "doublePrice": "$675", "singleSupplement": "$340"},
                {"id": "good", "startDate": "01 August 2025", "endDate": "04 August 2025", "nights": 3,
                 "startPoint": "Aswan", "endPoint": "Esna", "doublePrice": "$700", "singleSupplement": "$340"}
            ]"#,
        )
        .unwrap();
        let store = FileStore::new(&path);

        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, EntryId::persisted("good"));

        assert!(store.delete("good").await.unwrap());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"bad\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileStore::new(&path).list().await,
            Err(ScheduleError::Serialization(_))
        ));
    }
}
