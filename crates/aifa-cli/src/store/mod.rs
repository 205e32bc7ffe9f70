//! Record store
//!
//! The single source of truth for archived files. A [`RecordStore`] owns the
//! in-memory collection (newest first), mirrors it into one key-value slot,
//! answers searches and statistics, and tells subscribers about every change.
//!
//! Mutations are staged: the new collection is serialized and written first,
//! and only swapped in (and announced) once the backend accepted the write.
//! A failed write therefore leaves memory and storage in agreement.

pub mod stats;

pub use stats::{ExportSnapshot, Stats, EXPORT_VERSION};

use crate::kv::{KeyValueStore, KvError};
use aifa_common::size::record_size_of;
use aifa_common::types::{
    now_millis, today, AiSource, FileRecord, Filter, DEFAULT_FILE_TYPE, UNTITLED,
};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Default slot holding the serialized collection
pub const DEFAULT_STORAGE_KEY: &str = "ai_files_storage";

/// Appended to the slot key to keep a copy of a slot that only partly loaded
pub const BACKUP_SUFFIX: &str = ".corrupt";

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to save the archive: {0}")]
    Persist(#[from] KvError),

    #[error("Malformed import: {0}")]
    MalformedImport(String),

    #[error("Failed to serialize the archive: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No ids left above {0}. Export the archive and re-import it with smaller ids.")]
    IdSpaceExhausted(i64),
}

/// Fields for a new record. Anything left `None` (or empty) takes a default.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ai: Option<AiSource>,
    pub file_type: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub date: Option<String>,
}

impl NewRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn ai(mut self, ai: AiSource) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// What a mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added(i64),
    Deleted(i64),
    Imported(usize),
}

/// Delivered to subscribers after a successful mutation
#[derive(Debug)]
pub struct StoreEvent<'a> {
    pub kind: ChangeKind,
    /// The whole collection after the change
    pub files: &'a [FileRecord],
}

/// Handle returned by [`RecordStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent<'_>)>;

pub struct RecordStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    files: Vec<FileRecord>,
    last_id: i64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl RecordStore {
    /// Open the store over `backend`, loading the collection from slot `key`.
    ///
    /// Never fails: a missing or unreadable slot yields an empty collection
    /// and a logged warning. Records that no longer parse are skipped, and the
    /// original slot is copied to `<key>.corrupt` before anything overwrites it.
    pub fn open(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let files = load_collection(backend.as_ref(), &key);
        let last_id = files.iter().map(|f| f.id).max().unwrap_or(0);
        info!(
            location = %backend.describe(),
            key = %key,
            files = files.len(),
            "Archive loaded"
        );

        Self {
            backend,
            key,
            files,
            last_id,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The whole collection, newest first
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Where the collection is persisted
    pub fn location(&self) -> String {
        format!("{} (key {})", self.backend.describe(), self.key)
    }

    /// Create a record, prepend it, persist, and notify
    pub fn add(&mut self, fields: NewRecord) -> StoreResult<FileRecord> {
        let now = now_millis();
        let content = fields.content.unwrap_or_default();
        let record = FileRecord {
            id: self.next_id()?,
            name: non_empty(fields.name).unwrap_or_else(|| UNTITLED.to_string()),
            description: fields.description.unwrap_or_default(),
            ai: fields.ai.unwrap_or_default(),
            file_type: non_empty(fields.file_type)
                .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string()),
            size: record_size_of(&content),
            content,
            tags: fields.tags.unwrap_or_default(),
            date: non_empty(fields.date).unwrap_or_else(today),
            created_at: now,
            updated_at: now,
        };

        let mut staged = Vec::with_capacity(self.files.len() + 1);
        staged.push(record.clone());
        staged.extend(self.files.iter().cloned());

        self.commit(staged, ChangeKind::Added(record.id))?;
        self.last_id = record.id;
        info!(id = record.id, name = %record.name, ai = %record.ai, size = %record.size, "Record added");
        Ok(record)
    }

    /// Remove the record with `id`. `Ok(false)` when there is no such record.
    pub fn delete(&mut self, id: i64) -> StoreResult<bool> {
        if self.get(id).is_none() {
            debug!(id, "Delete requested for unknown record");
            return Ok(false);
        }

        let staged: Vec<FileRecord> = self.files.iter().filter(|f| f.id != id).cloned().collect();
        self.commit(staged, ChangeKind::Deleted(id))?;
        info!(id, "Record deleted");
        Ok(true)
    }

    /// Records matching `filter` whose text contains `query` (case-insensitive)
    ///
    /// The filter is applied first; an empty query keeps everything it lets
    /// through. Collection order is preserved.
    pub fn search(&self, query: &str, filter: &Filter) -> Vec<&FileRecord> {
        let needle = query.to_lowercase();
        let results: Vec<&FileRecord> = self
            .files
            .iter()
            .filter(|record| filter.matches(record))
            .filter(|record| needle.is_empty() || record.search_haystack().contains(&needle))
            .collect();
        debug!(query = %query, filter = %filter, results = results.len(), "Search");
        results
    }

    pub fn stats(&self) -> Stats {
        Stats::from_records(&self.files)
    }

    pub fn export(&self) -> ExportSnapshot {
        ExportSnapshot::new(self.files.clone())
    }

    /// Replace the whole collection with `data["files"]`
    ///
    /// `data` must be an object with a list-valued `files` field. Every
    /// element has to parse as a record and ids must be unique; otherwise
    /// nothing is changed. Returns the number of imported records.
    pub fn import(&mut self, data: &serde_json::Value) -> StoreResult<usize> {
        let items = data
            .get("files")
            .and_then(|files| files.as_array())
            .ok_or_else(|| {
                StoreError::MalformedImport("expected an object with a `files` list".to_string())
            })?;

        let mut seen = HashSet::with_capacity(items.len());
        let mut staged = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let mut record: FileRecord = serde_json::from_value(item.clone()).map_err(|e| {
                StoreError::MalformedImport(format!("record #{}: {}", index, e))
            })?;
            if !seen.insert(record.id) {
                return Err(StoreError::MalformedImport(format!(
                    "record #{}: duplicate id {}",
                    index, record.id
                )));
            }
            fill_derived_fields(&mut record);
            staged.push(record);
        }

        let count = staged.len();
        let max_id = staged.iter().map(|f| f.id).max().unwrap_or(0);
        self.commit(staged, ChangeKind::Imported(count))?;
        self.last_id = self.last_id.max(max_id);
        info!(count, "Archive imported");
        Ok(count)
    }

    /// Register a listener called synchronously after every successful mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    /// Millisecond timestamp, bumped past the last id when the clock hasn't moved
    fn next_id(&self) -> StoreResult<i64> {
        let after_last = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted(self.last_id))?;
        Ok(now_millis().timestamp_millis().max(after_last))
    }

    fn commit(&mut self, staged: Vec<FileRecord>, kind: ChangeKind) -> StoreResult<()> {
        let blob = serde_json::to_string(&staged)?;
        if let Err(e) = self.backend.set(&self.key, &blob) {
            error!(error = %e, change = ?kind, "Failed to persist archive, change discarded");
            return Err(e.into());
        }

        self.files = staged;
        let event = StoreEvent {
            kind,
            files: &self.files,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        Ok(())
    }
}

fn load_collection(backend: &dyn KeyValueStore, key: &str) -> Vec<FileRecord> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, key = %key, "Failed to read archive, starting empty");
            return Vec::new();
        },
    };

    let items = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, key = %key, "Stored archive is corrupt, starting empty");
            back_up_slot(backend, key, &raw);
            return Vec::new();
        },
    };

    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let mut files = Vec::with_capacity(total);
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<FileRecord>(item) {
            Ok(record) if seen.insert(record.id) => files.push(record),
            Ok(record) => warn!(index, id = record.id, "Skipping stored record with duplicate id"),
            Err(e) => warn!(index, error = %e, "Skipping unreadable stored record"),
        }
    }

    if files.len() < total {
        back_up_slot(backend, key, &raw);
    }
    files
}

/// Keep the raw slot under `<key>.corrupt` unless an earlier copy is still there
fn back_up_slot(backend: &dyn KeyValueStore, key: &str, raw: &str) {
    let backup_key = format!("{}{}", key, BACKUP_SUFFIX);
    match backend.get(&backup_key) {
        Ok(Some(_)) => {
            warn!(backup = %backup_key, "Backup slot already exists, leaving it untouched");
        },
        Ok(None) => match backend.set(&backup_key, raw) {
            Ok(()) => warn!(backup = %backup_key, "Copied the original archive to a backup slot"),
            Err(e) => error!(error = %e, backup = %backup_key, "Failed to back up the archive"),
        },
        Err(e) => error!(error = %e, backup = %backup_key, "Failed to check the backup slot"),
    }
}

/// Imported records may omit `size`/`date`; derive them like `add` would
fn fill_derived_fields(record: &mut FileRecord) {
    if record.size.is_empty() {
        record.size = record_size_of(&record.content);
    }
    if record.date.is_empty() {
        record.date = record.created_at.date_naive().to_string();
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn open_memory() -> (RecordStore, MemoryKvStore) {
        let backend = MemoryKvStore::new();
        let store = RecordStore::open(Box::new(backend.clone()), DEFAULT_STORAGE_KEY);
        (store, backend)
    }

    fn persisted(backend: &MemoryKvStore) -> Vec<FileRecord> {
        let raw = backend.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_open_empty() {
        let (store, _) = open_memory();
        assert!(store.is_empty());
        assert_eq!(store.stats().total, 0);
    }

    fn backup_key() -> String {
        format!("{}{}", DEFAULT_STORAGE_KEY, BACKUP_SUFFIX)
    }

    #[test]
    fn test_open_corrupt_slot_starts_empty() {
        let backend = MemoryKvStore::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, "{not json");
        let store = RecordStore::open(Box::new(backend.clone()), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
        assert_eq!(backend.get(&backup_key()).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_open_skips_bad_records_and_keeps_the_rest() {
        let raw = r#"[{"id":3,"name":"kept-a"},{"name":"no-id"},{"id":1,"name":"kept-b","tags":null}]"#;
        let backend = MemoryKvStore::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, raw);

        let mut store = RecordStore::open(Box::new(backend.clone()), DEFAULT_STORAGE_KEY);
        let names: Vec<&str> = store.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["kept-a", "kept-b"]);
        assert_eq!(backend.get(&backup_key()).unwrap().as_deref(), Some(raw));

        store.add(NewRecord::new().name("new")).unwrap();
        let names: Vec<String> = persisted(&backend).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["new", "kept-a", "kept-b"]);
    }

    #[test]
    fn test_open_clean_slot_writes_no_backup() {
        let backend = MemoryKvStore::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, r#"[{"id":1,"name":"a"}]"#);
        let store = RecordStore::open(Box::new(backend.clone()), DEFAULT_STORAGE_KEY);
        assert_eq!(store.len(), 1);
        assert!(backend.get(&backup_key()).unwrap().is_none());
    }

    #[test]
    fn test_existing_backup_is_not_overwritten() {
        let backend = MemoryKvStore::new();
        backend.insert_raw(&backup_key(), "older copy");
        backend.insert_raw(DEFAULT_STORAGE_KEY, "[1, 2]");
        let store = RecordStore::open(Box::new(backend.clone()), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
        assert_eq!(backend.get(&backup_key()).unwrap().as_deref(), Some("older copy"));
    }

    #[test]
    fn test_add_applies_defaults() {
        let (mut store, _) = open_memory();
        let record = store.add(NewRecord::new()).unwrap();

        assert_eq!(record.name, UNTITLED);
        assert_eq!(record.ai, AiSource::Other);
        assert_eq!(record.file_type, "text");
        assert_eq!(record.content, "");
        assert!(record.tags.is_empty());
        assert_eq!(record.date, today());
        assert_eq!(record.size, "0 B");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_add_treats_blank_name_as_missing() {
        let (mut store, _) = open_memory();
        let record = store.add(NewRecord::new().name("   ")).unwrap();
        assert_eq!(record.name, UNTITLED);
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let (mut store, backend) = open_memory();
        let first = store.add(NewRecord::new().name("first")).unwrap();
        let second = store.add(NewRecord::new().name("second")).unwrap();

        let all = store.search("", &Filter::All);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(persisted(&backend), store.files().to_vec());
    }

    #[test]
    fn test_ids_strictly_increase() {
        let (mut store, _) = open_memory();
        let mut previous = 0;
        for i in 0..50 {
            let record = store.add(NewRecord::new().name(format!("r{}", i))).unwrap();
            assert!(record.id > previous, "id {} not above {}", record.id, previous);
            previous = record.id;
        }
    }

    #[test]
    fn test_ids_stay_above_imported_ids() {
        let (mut store, _) = open_memory();
        let far_future = i64::MAX / 2;
        store
            .import(&serde_json::json!({ "files": [{ "id": far_future, "name": "future" }] }))
            .unwrap();
        let record = store.add(NewRecord::new()).unwrap();
        assert_eq!(record.id, far_future + 1);
    }

    #[test]
    fn test_add_after_max_id_fails_without_change() {
        let (mut store, backend) = open_memory();
        store
            .import(&serde_json::json!({ "files": [{ "id": i64::MAX, "name": "last" }] }))
            .unwrap();

        let result = store.add(NewRecord::new().name("one more"));
        assert!(matches!(result, Err(StoreError::IdSpaceExhausted(id)) if id == i64::MAX));
        assert_eq!(store.len(), 1);
        assert_eq!(persisted(&backend).len(), 1);
    }

    #[test]
    fn test_size_boundaries() {
        let (mut store, _) = open_memory();
        let kb = store.add(NewRecord::new().content("x".repeat(1024))).unwrap();
        let mb = store.add(NewRecord::new().content("x".repeat(1024 * 1024))).unwrap();
        assert_eq!(kb.size, "1.0 KB");
        assert_eq!(mb.size, "1.00 MB");
    }

    #[test]
    fn test_add_persist_failure_leaves_collection_unchanged() {
        let (mut store, backend) = open_memory();
        store.add(NewRecord::new().name("kept")).unwrap();

        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        backend.set_fail_writes(true);
        let result = store.add(NewRecord::new().name("lost"));
        assert!(matches!(result, Err(StoreError::Persist(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.files()[0].name, "kept");
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn test_quota_exceeded_rejects_add() {
        let backend = MemoryKvStore::new().with_quota(Some(600));
        let mut store = RecordStore::open(Box::new(backend), DEFAULT_STORAGE_KEY);
        store.add(NewRecord::new().content("small")).unwrap();

        let err = store.add(NewRecord::new().content("x".repeat(1000))).unwrap_err();
        assert!(matches!(err, StoreError::Persist(KvError::QuotaExceeded { .. })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete() {
        let (mut store, backend) = open_memory();
        let keep = store.add(NewRecord::new().name("keep")).unwrap();
        let removed = store.add(NewRecord::new().name("drop")).unwrap();

        assert!(store.delete(removed.id).unwrap());
        assert!(store.search("", &Filter::All).iter().all(|r| r.id != removed.id));
        assert_eq!(persisted(&backend).len(), 1);
        assert_eq!(store.files()[0].id, keep.id);
    }

    #[test]
    fn test_delete_unknown_id() {
        let (mut store, _) = open_memory();
        store.add(NewRecord::new()).unwrap();

        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(!store.delete(42).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn test_delete_persist_failure_keeps_record() {
        let (mut store, backend) = open_memory();
        let record = store.add(NewRecord::new()).unwrap();
        backend.set_fail_writes(true);

        assert!(store.delete(record.id).is_err());
        assert!(store.get(record.id).is_some());
    }

    #[test]
    fn test_search_matches_fields_case_insensitively() {
        let (mut store, _) = open_memory();
        store
            .add(
                NewRecord::new()
                    .name("Landing Page")
                    .description("Hero section")
                    .ai(AiSource::Grok)
                    .file_type("html")
                    .tags(["marketing", "CSS-grid"]),
            )
            .unwrap();

        let all = Filter::All;
        assert_eq!(store.search("landing", &all).len(), 1);
        assert_eq!(store.search("HERO", &all).len(), 1);
        assert_eq!(store.search("css-grid", &all).len(), 1);
        assert_eq!(store.search("html", &all).len(), 1);
        assert_eq!(store.search("grok", &all).len(), 1);
        assert!(store.search("python", &all).is_empty());
    }

    #[test]
    fn test_search_does_not_match_content() {
        let (mut store, _) = open_memory();
        store.add(NewRecord::new().name("a").content("secret_token")).unwrap();
        assert!(store.search("secret_token", &Filter::All).is_empty());
    }

    #[test]
    fn test_search_applies_filter_before_text() {
        let (mut store, _) = open_memory();
        let claude = store
            .add(NewRecord::new().name("README notes").ai(AiSource::Claude))
            .unwrap();
        store
            .add(
                NewRecord::new()
                    .name("Script")
                    .description("see the readme first")
                    .ai(AiSource::ChatGpt),
            )
            .unwrap();

        let results = store.search("readme", &Filter::Source(AiSource::Claude));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, claude.id);
    }

    #[test]
    fn test_stats_scenario() {
        let (mut store, _) = open_memory();
        for ai in [AiSource::ChatGpt, AiSource::Claude, AiSource::ChatGpt] {
            store.add(NewRecord::new().ai(ai)).unwrap();
        }
        let stats = store.stats();
        assert_eq!(stats.chatgpt, 2);
        assert_eq!(stats.claude, 1);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);
    }

    #[test]
    fn test_export_import_round_trip() {
        let (mut store, _) = open_memory();
        store
            .add(NewRecord::new().name("one").ai(AiSource::DeepSeek).tags(["a", "b"]))
            .unwrap();
        store
            .add(NewRecord::new().name("two").content("<p>hi</p>").file_type("html"))
            .unwrap();

        let exported = serde_json::to_value(store.export()).unwrap();
        let (mut other, _) = open_memory();
        assert_eq!(other.import(&exported).unwrap(), 2);
        assert_eq!(other.files(), store.files());
    }

    #[test]
    fn test_import_rejects_malformed_payloads() {
        let (mut store, backend) = open_memory();
        store.add(NewRecord::new().name("original")).unwrap();
        let before = persisted(&backend);

        let payloads = [
            serde_json::json!(null),
            serde_json::json!({}),
            serde_json::json!({ "files": "nope" }),
            serde_json::json!({ "files": [{ "name": "no id" }] }),
            serde_json::json!({ "files": [{ "id": 1 }, { "id": 1 }] }),
        ];
        for payload in payloads {
            assert!(
                matches!(store.import(&payload), Err(StoreError::MalformedImport(_))),
                "payload accepted: {}",
                payload
            );
        }
        assert_eq!(store.files()[0].name, "original");
        assert_eq!(persisted(&backend), before);
    }

    #[test]
    fn test_import_keeps_unknown_sources_and_fills_size() {
        let (mut store, _) = open_memory();
        let payload = serde_json::json!({
            "files": [{ "id": 5, "ai": "gemini", "content": "abc", "createdAt": "2024-06-01T10:00:00Z" }]
        });
        store.import(&payload).unwrap();

        let record = store.get(5).unwrap();
        assert_eq!(record.ai, AiSource::Unrecognized("gemini".to_string()));
        assert_eq!(record.size, "3 B");
        assert_eq!(record.date, "2024-06-01");
        assert_eq!(store.stats().unrecognized, 1);
        assert_eq!(store.stats().other, 0);

        let exported = serde_json::to_value(store.export()).unwrap();
        assert_eq!(exported["files"][0]["ai"], "gemini");
    }

    #[test]
    fn test_reopen_restores_collection() {
        let backend = MemoryKvStore::new();
        let mut store = RecordStore::open(Box::new(backend.clone()), DEFAULT_STORAGE_KEY);
        store.add(NewRecord::new().name("survivor")).unwrap();
        let files = store.files().to_vec();
        drop(store);

        let reopened = RecordStore::open(Box::new(backend), DEFAULT_STORAGE_KEY);
        assert_eq!(reopened.files(), files.as_slice());
    }

    #[test]
    fn test_subscribers_receive_full_collection_in_order() {
        let (mut store, _) = open_memory();
        let log: Rc<RefCell<Vec<(usize, ChangeKind, usize)>>> = Rc::default();

        for listener in 0..2 {
            let log = log.clone();
            store.subscribe(move |event| {
                log.borrow_mut().push((listener, event.kind, event.files.len()));
            });
        }

        let record = store.add(NewRecord::new()).unwrap();
        store.delete(record.id).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                (0, ChangeKind::Added(record.id), 1),
                (1, ChangeKind::Added(record.id), 1),
                (0, ChangeKind::Deleted(record.id), 0),
                (1, ChangeKind::Deleted(record.id), 0),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let (mut store, _) = open_memory();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.add(NewRecord::new()).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add(NewRecord::new()).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    proptest! {
        #[test]
        fn prop_search_is_idempotent(query in "[a-z]{0,3}", pick in 0usize..6) {
            let (mut store, _) = open_memory();
            for (i, name) in ["alpha", "beta", "gamma", "delta"].iter().enumerate() {
                let ai = AiSource::KNOWN[i % AiSource::KNOWN.len()].clone();
                store.add(NewRecord::new().name(*name).ai(ai)).unwrap();
            }
            let filter = match pick {
                0 => Filter::All,
                n => Filter::Source(AiSource::KNOWN[n - 1].clone()),
            };

            let first: Vec<i64> = store.search(&query, &filter).iter().map(|r| r.id).collect();
            let second: Vec<i64> = store.search(&query, &filter).iter().map(|r| r.id).collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_stats_total_matches_len(count in 0usize..12) {
            let (mut store, _) = open_memory();
            for i in 0..count {
                let ai = AiSource::KNOWN[i % AiSource::KNOWN.len()].clone();
                store.add(NewRecord::new().ai(ai).file_type(["html", "text"][i % 2])).unwrap();
            }
            let stats = store.stats();
            prop_assert_eq!(stats.total, store.len());
            prop_assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);
        }
    }
}
