//! Field validation and default resolution for candidate records.
//!
//! The validator walks a kind's rules in schema order: defaults are filled
//! first, so a field with a default is never reported missing; presence,
//! enum membership, and pattern checks follow. Every violation is collected
//! before returning, so callers see the full picture in one pass.
//! Uniqueness is deliberately not checked here; it needs a round trip to the
//! store and is enforced there at insert time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};

use super::record::{FieldMap, FieldValue, NormalizedRecord, RecordKind};
use super::schema::{Constraint, DefaultValue, SchemaRegistry};

/// Violation recorded against a single field.
///
/// Serialises with a snake_case `code` tag (`missing_field`,
/// `invalid_enum`, `invalid_format`) so transport layers can render stable
/// machine-readable codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldError {
    /// The field is required and still absent after defaulting.
    MissingField,
    /// The value is not a member of the field's enumerated set.
    InvalidEnum {
        /// The offending value as submitted.
        value: String,
    },
    /// The value does not match the field's pattern.
    InvalidFormat {
        /// The offending value as submitted.
        value: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => f.write_str("required field is missing"),
            Self::InvalidEnum { value } => {
                write!(f, "value {value:?} is not in the allowed set")
            }
            Self::InvalidFormat { value } => {
                write!(f, "value {value:?} does not match the expected format")
            }
        }
    }
}

/// Field-keyed validation failures for one candidate record.
///
/// Always recoverable: the caller corrects the named fields and resubmits.
/// Never raised as a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, FieldError>,
}

impl ValidationErrors {
    fn insert(&mut self, field: &str, error: FieldError) {
        self.errors.insert(field.to_owned(), error);
    }

    /// True when no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with a recorded violation.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The violation recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// True when the named field has a recorded violation.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterate over `(field, violation)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(field, error)| (field.as_str(), error))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.errors.keys().map(String::as_str).collect();
        write!(
            f,
            "validation failed for {} field(s): {}",
            self.errors.len(),
            fields.join(", ")
        )
    }
}

impl std::error::Error for ValidationErrors {}

/// Applies schema rules to candidate records.
///
/// Pure apart from clock reads: the only side effect of validation is
/// resolving creation-time defaults against the injected clock.
pub struct Validator {
    registry: &'static SchemaRegistry,
    clock: Arc<dyn Clock>,
}

impl Validator {
    /// Create a validator over the given registry and clock.
    pub fn new(registry: &'static SchemaRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Validator over the shared registry and the system clock.
    pub fn with_defaults() -> Self {
        Self::new(SchemaRegistry::global(), Arc::new(DefaultClock))
    }

    /// Validate a candidate field map against its kind's schema.
    ///
    /// Returns the normalised record (original values plus filled defaults)
    /// or every violation found, keyed by field name.
    pub fn validate(
        &self,
        kind: RecordKind,
        fields: &FieldMap,
    ) -> Result<NormalizedRecord, ValidationErrors> {
        let mut normalized = fields.clone();
        let mut errors = ValidationErrors::default();

        for rule in self.registry.rules_for(kind) {
            if !normalized.contains_key(rule.name()) {
                if let Some(default) = rule.default() {
                    normalized.insert(rule.name().to_owned(), self.materialise(default));
                }
            }

            let Some(value) = normalized.get(rule.name()) else {
                if rule.is_required() {
                    errors.insert(rule.name(), FieldError::MissingField);
                }
                continue;
            };

            match rule.constraint() {
                Some(Constraint::OneOf(names)) => {
                    let member = value
                        .as_text()
                        .is_some_and(|text| names.iter().any(|name| *name == text));
                    if !member {
                        errors.insert(
                            rule.name(),
                            FieldError::InvalidEnum {
                                value: value.to_string(),
                            },
                        );
                    }
                }
                Some(Constraint::Pattern(pattern)) => {
                    let matched = value
                        .as_text()
                        .is_some_and(|text| pattern.is_match(text));
                    if !matched {
                        errors.insert(
                            rule.name(),
                            FieldError::InvalidFormat {
                                value: value.to_string(),
                            },
                        );
                    }
                }
                // Uniqueness needs the store; enforced at insert time.
                Some(Constraint::Unique) | None => {}
            }
        }

        if errors.is_empty() {
            Ok(NormalizedRecord::new(kind, normalized))
        } else {
            Err(errors)
        }
    }

    fn materialise(&self, default: &DefaultValue) -> FieldValue {
        match default {
            DefaultValue::Text(value) => FieldValue::Text((*value).to_owned()),
            DefaultValue::Flag(value) => FieldValue::Flag(*value),
            DefaultValue::CreationTime => FieldValue::Timestamp(self.clock.utc()),
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
