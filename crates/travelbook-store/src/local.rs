//! On-device fallback store.
//!
//! A SQLite key-value table with deterministic keys: `index:<username>`
//! holds the per-user file index (a JSON list of `{id, name}`), and
//! `file:<id>` holds one serialized itinerary. Used when the remote backend
//! is unreachable for listing, and as the home of files created while
//! offline until they are promoted.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use travelbook_core::Itinerary;

use crate::drive::PersistedFile;
use crate::error::StoreError;
use crate::file_id::FileId;

pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn index_key(username: &str) -> String {
        format!("index:{username}")
    }

    fn file_key(id: &str) -> String {
        format!("file:{id}")
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Enumerate the files stored locally for a user.
    pub fn list_files(&self, username: &str) -> Result<Vec<PersistedFile>, StoreError> {
        match self.get(&Self::index_key(username))? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Load one locally stored itinerary.
    pub fn load(&self, file_id: &str) -> Result<Itinerary, StoreError> {
        let json = self
            .get(&Self::file_key(file_id))?
            .ok_or_else(|| StoreError::FileNotFound(file_id.to_string()))?;
        Itinerary::from_json(&json)
            .map_err(|e| StoreError::local(format!("corrupt local file {file_id}: {e}")))
    }

    /// Save an itinerary locally, reusing `existing` as the id when given,
    /// otherwise minting a fresh `local-` id. The user's index is updated
    /// in the same call.
    pub fn save(
        &self,
        username: &str,
        file_name: &str,
        data: &Itinerary,
        existing: Option<&str>,
    ) -> Result<FileId, StoreError> {
        let id = match existing {
            Some(id) => FileId::parse(id),
            None => FileId::new_local(),
        };

        let json = data
            .to_json_pretty()
            .map_err(|e| StoreError::local(format!("failed to serialize itinerary: {e}")))?;
        self.put(&Self::file_key(id.as_str()), &json)?;

        // Same naming rule as the remote backend
        let name = if file_name.ends_with(".json") {
            file_name.to_string()
        } else {
            format!("{file_name}.json")
        };

        let mut index = self.list_files(username)?;
        match index.iter_mut().find(|f| f.id == id.as_str()) {
            Some(entry) => entry.name = name,
            None => index.push(PersistedFile {
                id: id.as_str().to_string(),
                name,
            }),
        }
        self.put(&Self::index_key(username), &serde_json::to_string(&index)?)?;

        tracing::debug!("Saved local file {} for user {}", id, username);
        Ok(id)
    }

    /// Drop a file and its index entry, e.g. after promotion to remote.
    pub fn remove(&self, username: &str, file_id: &str) -> Result<(), StoreError> {
        self.delete(&Self::file_key(file_id))?;

        let index: Vec<PersistedFile> = self
            .list_files(username)?
            .into_iter()
            .filter(|f| f.id != file_id)
            .collect();
        self.put(&Self::index_key(username), &serde_json::to_string(&index)?)?;

        tracing::debug!("Removed local file {} for user {}", file_id, username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Itinerary {
        Itinerary::blank(2, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap())
    }

    fn create_test_store() -> LocalStore {
        LocalStore::in_memory().expect("Failed to create in-memory store")
    }

    #[test]
    fn test_save_and_load() {
        let store = create_test_store();
        let data = sample();

        let id = store.save("alice", "Trip", &data, None).unwrap();
        assert!(id.is_local());

        let loaded = store.load(id.as_str()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_appends_json_suffix() {
        let store = create_test_store();
        store.save("alice", "Trip", &sample(), None).unwrap();
        store.save("alice", "Other.json", &sample(), None).unwrap();

        let names: Vec<_> = store
            .list_files("alice")
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Trip.json", "Other.json"]);
    }

    #[test]
    fn test_save_with_existing_id_overwrites() {
        let store = create_test_store();
        let data = sample();

        let id = store.save("alice", "Trip", &data, None).unwrap();
        let mut edited = data.clone();
        edited.rename_region(1, "高知").unwrap();
        let id2 = store
            .save("alice", "Trip", &edited, Some(id.as_str()))
            .unwrap();

        assert_eq!(id, id2);
        assert_eq!(store.list_files("alice").unwrap().len(), 1);
        assert_eq!(store.load(id.as_str()).unwrap(), edited);
    }

    #[test]
    fn test_indexes_are_per_user() {
        let store = create_test_store();
        store.save("alice", "Trip", &sample(), None).unwrap();

        assert_eq!(store.list_files("alice").unwrap().len(), 1);
        assert!(store.list_files("bob").unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = create_test_store();
        assert!(matches!(
            store.load("local-missing"),
            Err(StoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("travelbook.db");
        let data = sample();

        let id = {
            let store = LocalStore::open(&path).unwrap();
            store.save("alice", "Trip", &data, None).unwrap()
        };

        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.load(id.as_str()).unwrap(), data);
        assert_eq!(store.list_files("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_remove_drops_blob_and_index_entry() {
        let store = create_test_store();
        let id = store.save("alice", "Trip", &sample(), None).unwrap();

        store.remove("alice", id.as_str()).unwrap();
        assert!(store.list_files("alice").unwrap().is_empty());
        assert!(matches!(
            store.load(id.as_str()),
            Err(StoreError::FileNotFound(_))
        ));
    }
}
