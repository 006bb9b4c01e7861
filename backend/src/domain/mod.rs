//! Domain primitives for donation record intake.
//!
//! Purpose: define the record schemas, the validation engine that applies
//! them, and the port through which validated records reach a persistence
//! adapter. Keep types immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `RecordKind`, `FieldValue`, `FieldMap` — candidate record payloads.
//! - `SchemaRegistry`, `FieldRule` — the immutable rule tables.
//! - `Validator`, `ValidationErrors`, `FieldError` — the rule walker and
//!   its field-keyed failures.
//! - `ports::RecordStore` — the persistence edge.
//! - `IntakeService` — validate-then-persist front door.

pub mod intake;
pub mod ports;
pub mod record;
pub mod schema;
pub mod validation;

pub use self::intake::{IntakeService, SubmitError};
pub use self::record::{
    DietaryCategory, FieldMap, FieldValue, FoodType, NormalizedRecord, RecordKind, RequestStatus,
    StoredRecord, UserRole,
};
pub use self::schema::{Constraint, DefaultValue, FieldRule, FieldType, SchemaRegistry};
pub use self::validation::{FieldError, ValidationErrors, Validator};
