//! Shared fixtures for the intake integration suites.
//!
//! Builders mirror the candidate payloads a web layer would hand over:
//! plain field maps with wire-spelled names and values.

use std::sync::Arc;

use mockable::DefaultClock;
use uuid::Uuid;

use backend::domain::{FieldMap, FieldValue, IntakeService};
use backend::outbound::persistence::MemoryRecordStore;

/// Intake service over a fresh, empty in-memory store.
pub fn fresh_service() -> IntakeService<MemoryRecordStore> {
    IntakeService::new(Arc::new(MemoryRecordStore::new()), Arc::new(DefaultClock))
}

/// Build a field map from wire-name/value pairs.
pub fn fields(pairs: &[(&str, FieldValue)]) -> FieldMap {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect()
}

/// A complete, valid contact submission.
pub fn contact_fields() -> FieldMap {
    fields(&[
        ("name", FieldValue::from("John Doe")),
        ("email", FieldValue::from("johndoe@example.com")),
        ("message", FieldValue::from("Hello, this is a test message.")),
    ])
}

/// A complete, valid donation post submission.
pub fn post_fields() -> FieldMap {
    fields(&[
        ("donor", FieldValue::from(Uuid::new_v4())),
        ("title", FieldValue::from("Fresh Homemade Pizza")),
        (
            "description",
            FieldValue::from("Delicious homemade pizza with fresh ingredients"),
        ),
        ("quantity", FieldValue::from("2 Large Pizzas")),
        ("foodType", FieldValue::from("Veg")),
        ("dietaryCategory", FieldValue::from("Vegan")),
        ("containsNuts", FieldValue::from(false)),
        ("pickupAddress", FieldValue::from("123 Street, City")),
        ("contactInfo", FieldValue::from("123-456-7890")),
    ])
}

/// A complete, valid pickup request submission.
pub fn request_fields() -> FieldMap {
    fields(&[
        ("post", FieldValue::from(Uuid::new_v4())),
        ("beneficiary", FieldValue::from(Uuid::new_v4())),
        ("donor", FieldValue::from(Uuid::new_v4())),
        ("status", FieldValue::from("Pending")),
    ])
}

/// A complete, valid account submission with the given email.
pub fn user_fields(email: &str) -> FieldMap {
    fields(&[
        ("name", FieldValue::from("John Doe")),
        ("email", FieldValue::from(email)),
        ("password", FieldValue::from("securepassword")),
        ("role", FieldValue::from("donor")),
    ])
}
