//! Record intake service: validate, then persist.
//!
//! The service fuses the validator with the store port the way the original
//! save path behaved: a submission is validated against the shared registry,
//! defaults are resolved against the injected clock, and only an error-free
//! record reaches the store. Store-side uniqueness violations surface as
//! [`SubmitError::Store`] with a duplicate-key variant, distinct from the
//! field-keyed validation failures.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::ports::{RecordStore, RecordStoreError};
use super::record::{FieldMap, NormalizedRecord, RecordKind, StoredRecord};
use super::schema::SchemaRegistry;
use super::validation::{ValidationErrors, Validator};

/// Failures raised by [`IntakeService::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The candidate failed schema validation; nothing was persisted.
    #[error("{0}")]
    Invalid(ValidationErrors),
    /// The store rejected the validated record.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}

impl SubmitError {
    /// True when the store reported a uniqueness violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::Store(error) if error.is_duplicate_key())
    }

    /// Borrow the validation failures when the candidate was invalid.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Store(_) => None,
        }
    }
}

/// Front door for candidate records.
#[derive(Clone)]
pub struct IntakeService<S> {
    store: Arc<S>,
    validator: Arc<Validator>,
}

impl<S> IntakeService<S> {
    /// Create a service over the shared registry, the given store, and the
    /// given clock.
    ///
    /// # Examples
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use backend::domain::IntakeService;
    /// # use backend::outbound::persistence::MemoryRecordStore;
    /// let service = IntakeService::new(
    ///     Arc::new(MemoryRecordStore::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            validator: Arc::new(Validator::new(SchemaRegistry::global(), clock)),
        }
    }
}

impl<S> IntakeService<S>
where
    S: RecordStore,
{
    /// Validate a candidate without persisting it.
    pub fn validate(
        &self,
        kind: RecordKind,
        fields: &FieldMap,
    ) -> Result<NormalizedRecord, ValidationErrors> {
        self.validator.validate(kind, fields)
    }

    /// Validate a candidate and store it on success.
    pub async fn submit(
        &self,
        kind: RecordKind,
        fields: FieldMap,
    ) -> Result<StoredRecord, SubmitError> {
        let record = self
            .validator
            .validate(kind, &fields)
            .map_err(SubmitError::Invalid)?;

        let stored = self.store.insert(record).await?;
        debug!(kind = %kind, id = %stored.id(), "record accepted");
        Ok(stored)
    }

    /// Fetch a stored record by identifier.
    pub async fn find_by_id(
        &self,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, RecordStoreError> {
        self.store.find_by_id(kind, id).await
    }

    /// Bulk-clear a kind's records. Test isolation only.
    pub async fn reset(&self, kind: RecordKind) -> Result<u64, RecordStoreError> {
        let deleted = self.store.delete_all(kind).await?;
        debug!(kind = %kind, deleted, "records cleared");
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "intake_tests.rs"]
mod tests;
