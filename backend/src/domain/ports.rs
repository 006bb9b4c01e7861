//! Domain ports for the persistence edge.
//!
//! The store is a driven adapter: it assigns identifiers, enforces
//! uniqueness atomically at insert time, and reports failures through
//! strongly typed errors instead of `anyhow::Result`. Adapters map their
//! backend's failure modes into these variants.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::record::{NormalizedRecord, RecordKind, StoredRecord};

/// Errors surfaced by record store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordStoreError {
    /// Store connectivity failures.
    #[error("record store connection failed: {message}")]
    Connection { message: String },
    /// A unique value is already held by another stored record.
    ///
    /// Kept distinct from validation failures so callers can render a
    /// "value already in use" message for the offending field.
    #[error("duplicate value for unique field {field}: {value}")]
    DuplicateKey { field: String, value: String },
    /// Catch-all for query and write failures inside the adapter.
    #[error("record store query failed: {message}")]
    Query { message: String },
}

impl RecordStoreError {
    /// Helper for connection related adapter failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate_key(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// True when the error reports a uniqueness violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

/// Persistence port for validated records.
///
/// Inserts must be atomic with respect to uniqueness enforcement: two
/// concurrent inserts of the same unique value may both pass validation,
/// and exactly one of them wins at the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store a validated record, assigning its identifier.
    ///
    /// Fails with [`RecordStoreError::DuplicateKey`] when a unique field's
    /// value is already held by a stored record of the same kind.
    async fn insert(&self, record: NormalizedRecord) -> Result<StoredRecord, RecordStoreError>;

    /// Fetch a stored record by kind and identifier.
    async fn find_by_id(
        &self,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, RecordStoreError>;

    /// Number of stored records of the kind.
    async fn count(&self, kind: RecordKind) -> Result<u64, RecordStoreError>;

    /// Remove every stored record of the kind, returning how many were
    /// deleted. Test-fixture reset; not part of the production surface.
    async fn delete_all(&self, kind: RecordKind) -> Result<u64, RecordStoreError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn duplicate_key_helper_carries_field_and_value() {
        let error = RecordStoreError::duplicate_key("email", "john@example.com");
        assert!(error.is_duplicate_key());
        assert!(error.to_string().contains("email"));
        assert!(error.to_string().contains("john@example.com"));
    }

    #[rstest]
    fn connection_and_query_helpers_are_not_duplicates() {
        assert!(!RecordStoreError::connection("refused").is_duplicate_key());
        assert!(!RecordStoreError::query("timeout").is_duplicate_key());
    }
}
