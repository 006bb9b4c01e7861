//! In-memory implementation of the record store port.
//!
//! Reference adapter used by the test suites and by embedders that do not
//! need durable storage. All state lives behind a single mutex; the unique
//! index is read and updated in the same critical section as the record
//! map, so uniqueness enforcement is serialised per key and two concurrent
//! inserts of the same unique value cannot both win.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RecordStore, RecordStoreError};
use crate::domain::record::{NormalizedRecord, RecordKind, StoredRecord};
use crate::domain::schema::SchemaRegistry;

/// Unique index key: one map of value to record id per (kind, field).
type UniqueKey = (RecordKind, &'static str);

#[derive(Default)]
struct Inner {
    records: HashMap<RecordKind, HashMap<Uuid, StoredRecord>>,
    unique: HashMap<UniqueKey, HashMap<String, Uuid>>,
}

/// Mutex-guarded in-memory record store.
pub struct MemoryRecordStore {
    registry: &'static SchemaRegistry,
    inner: Mutex<Inner>,
}

impl MemoryRecordStore {
    /// Create an empty store over the shared schema registry.
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::global(),
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, RecordStoreError> {
        self.inner
            .lock()
            .map_err(|_| RecordStoreError::connection("record store mutex poisoned"))
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: NormalizedRecord) -> Result<StoredRecord, RecordStoreError> {
        let kind = record.kind();
        let mut guard = self.lock()?;

        // Check every unique field before touching any state so a rejected
        // insert leaves the index untouched.
        let mut claims: Vec<(&'static str, String)> = Vec::new();
        for field in self.registry.unique_fields(kind) {
            let Some(value) = record.get(field) else {
                continue;
            };
            let rendered = value.to_string();
            let taken = guard
                .unique
                .get(&(kind, field))
                .is_some_and(|index| index.contains_key(&rendered));
            if taken {
                debug!(kind = %kind, field, "unique value already in use");
                return Err(RecordStoreError::duplicate_key(field, rendered));
            }
            claims.push((field, rendered));
        }

        let id = Uuid::new_v4();
        for (field, value) in claims {
            guard.unique.entry((kind, field)).or_default().insert(value, id);
        }

        let stored = StoredRecord::new(id, record);
        guard
            .records
            .entry(kind)
            .or_default()
            .insert(id, stored.clone());
        debug!(kind = %kind, id = %id, "record inserted");
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, RecordStoreError> {
        let guard = self.lock()?;
        Ok(guard
            .records
            .get(&kind)
            .and_then(|records| records.get(&id))
            .cloned())
    }

    async fn count(&self, kind: RecordKind) -> Result<u64, RecordStoreError> {
        let guard = self.lock()?;
        Ok(guard.records.get(&kind).map_or(0, HashMap::len) as u64)
    }

    async fn delete_all(&self, kind: RecordKind) -> Result<u64, RecordStoreError> {
        let mut guard = self.lock()?;
        let deleted = guard.records.remove(&kind).map_or(0, |records| records.len());
        guard.unique.retain(|(indexed_kind, _), _| *indexed_kind != kind);
        debug!(kind = %kind, deleted, "records cleared");
        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::record::{FieldMap, FieldValue};
    use crate::domain::validation::Validator;

    fn user_record(email: &str) -> NormalizedRecord {
        let fields = FieldMap::from([
            ("name".to_owned(), FieldValue::from("John Doe")),
            ("email".to_owned(), FieldValue::from(email)),
            ("password".to_owned(), FieldValue::from("securepassword")),
            ("role".to_owned(), FieldValue::from("donor")),
        ]);
        Validator::with_defaults()
            .validate(RecordKind::User, &fields)
            .expect("valid user fixture")
    }

    fn contact_record(email: &str) -> NormalizedRecord {
        let fields = FieldMap::from([
            ("name".to_owned(), FieldValue::from("John Doe")),
            ("email".to_owned(), FieldValue::from(email)),
            ("message".to_owned(), FieldValue::from("Hello there.")),
        ]);
        Validator::with_defaults()
            .validate(RecordKind::Contact, &fields)
            .expect("valid contact fixture")
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_round_trips() {
        let store = MemoryRecordStore::new();

        let first = store
            .insert(user_record("first@example.com"))
            .await
            .expect("first insert succeeds");
        let second = store
            .insert(user_record("second@example.com"))
            .await
            .expect("second insert succeeds");
        assert_ne!(first.id(), second.id());

        let fetched = store
            .find_by_id(RecordKind::User, first.id())
            .await
            .expect("lookup succeeds")
            .expect("record is stored");
        assert_eq!(fetched, first);
    }

    #[tokio::test]
    async fn duplicate_unique_email_is_rejected() {
        let store = MemoryRecordStore::new();

        store
            .insert(user_record("john@example.com"))
            .await
            .expect("first insert succeeds");
        let error = store
            .insert(user_record("john@example.com"))
            .await
            .expect_err("second insert is rejected");

        assert_eq!(
            error,
            RecordStoreError::duplicate_key("email", "john@example.com")
        );
        assert_eq!(
            store.count(RecordKind::User).await.expect("count succeeds"),
            1
        );
    }

    #[tokio::test]
    async fn non_unique_kinds_accept_repeated_values() {
        let store = MemoryRecordStore::new();

        store
            .insert(contact_record("shared@example.com"))
            .await
            .expect("first contact stored");
        store
            .insert(contact_record("shared@example.com"))
            .await
            .expect("repeated contact email is allowed");

        assert_eq!(
            store
                .count(RecordKind::Contact)
                .await
                .expect("count succeeds"),
            2
        );
    }

    #[tokio::test]
    async fn delete_all_releases_unique_values() {
        let store = MemoryRecordStore::new();

        store
            .insert(user_record("john@example.com"))
            .await
            .expect("insert succeeds");
        let deleted = store
            .delete_all(RecordKind::User)
            .await
            .expect("clear succeeds");
        assert_eq!(deleted, 1);

        store
            .insert(user_record("john@example.com"))
            .await
            .expect("value is reusable after the clear");
    }

    #[rstest]
    fn store_is_empty_by_default() {
        let store = MemoryRecordStore::default();
        let guard = store.lock().expect("mutex is healthy");
        assert!(guard.records.is_empty());
        assert!(guard.unique.is_empty());
    }
}
