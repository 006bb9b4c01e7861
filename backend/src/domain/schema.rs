//! Declarative field schemas for the four record kinds.
//!
//! The registry is a read-only table mapping record kind to an ordered list
//! of field rules. It is built once, exposed process-wide through
//! [`SchemaRegistry::global`], and never mutated afterwards. Patterns are
//! compiled at construction; the pattern set is static, so a compile failure
//! is a programming error and panics at startup.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::record::{DietaryCategory, FoodType, RecordKind, RequestStatus, UserRole};

/// Semantic type a field is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Flag,
    Reference,
    Timestamp,
}

/// Default supplier evaluated when a field is absent from a candidate.
///
/// Constants are inserted as-is. [`DefaultValue::CreationTime`] is resolved
/// against the validation clock at validation time, not at registry load
/// time.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    /// A constant textual default.
    Text(&'static str),
    /// A constant boolean default.
    Flag(bool),
    /// The moment the candidate was validated.
    CreationTime,
}

/// Declarative constraint evaluated by the rule walker.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must be one of the listed spellings.
    OneOf(&'static [&'static str]),
    /// Value must match the compiled pattern.
    Pattern(Regex),
    /// Value must be unique across stored records of the kind.
    ///
    /// Not checked by the validator; enforced atomically by the record
    /// store at insert time.
    Unique,
}

/// A single field rule within a record schema.
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    field_type: FieldType,
    required: bool,
    default: Option<DefaultValue>,
    constraint: Option<Constraint>,
}

impl FieldRule {
    fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            default: None,
            constraint: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    fn one_of(mut self, names: &'static [&'static str]) -> Self {
        self.constraint = Some(Constraint::OneOf(names));
        self
    }

    fn pattern(mut self, pattern: &'static str) -> Self {
        let compiled = Regex::new(pattern)
            .unwrap_or_else(|error| panic!("field pattern failed to compile: {error}"));
        self.constraint = Some(Constraint::Pattern(compiled));
        self
    }

    fn unique(mut self) -> Self {
        self.constraint = Some(Constraint::Unique);
        self
    }

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Semantic type the field is expected to carry.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field must be present after defaulting.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Default supplier, if the field carries one.
    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Constraint, if the field carries one.
    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Whether the field is covered by a uniqueness constraint.
    pub fn is_unique(&self) -> bool {
        matches!(self.constraint, Some(Constraint::Unique))
    }
}

/// Pattern applied to contact email addresses: `local@domain.tld`.
const CONTACT_EMAIL_PATTERN: &str = r".+@.+\..+";

/// Immutable table of field rules per record kind.
pub struct SchemaRegistry {
    contact: Vec<FieldRule>,
    post: Vec<FieldRule>,
    request: Vec<FieldRule>,
    user: Vec<FieldRule>,
}

impl SchemaRegistry {
    /// Build the registry tables.
    ///
    /// # Panics
    ///
    /// Panics when a built-in field pattern fails to compile, which can only
    /// happen through a programming error.
    pub fn new() -> Self {
        Self {
            contact: vec![
                FieldRule::new("name", FieldType::Text).required(),
                FieldRule::new("email", FieldType::Text)
                    .required()
                    .pattern(CONTACT_EMAIL_PATTERN),
                FieldRule::new("message", FieldType::Text).required(),
                FieldRule::new("createdAt", FieldType::Timestamp)
                    .default_value(DefaultValue::CreationTime),
            ],
            post: vec![
                FieldRule::new("donor", FieldType::Reference).required(),
                FieldRule::new("title", FieldType::Text).required(),
                FieldRule::new("description", FieldType::Text),
                FieldRule::new("quantity", FieldType::Text),
                FieldRule::new("foodType", FieldType::Text)
                    .required()
                    .one_of(&FoodType::NAMES),
                FieldRule::new("dietaryCategory", FieldType::Text)
                    .default_value(DefaultValue::Text("None"))
                    .one_of(&DietaryCategory::NAMES),
                FieldRule::new("containsNuts", FieldType::Flag)
                    .default_value(DefaultValue::Flag(false)),
                FieldRule::new("expiryDate", FieldType::Timestamp),
                FieldRule::new("pickupAddress", FieldType::Text),
                FieldRule::new("contactInfo", FieldType::Text),
                FieldRule::new("createdAt", FieldType::Timestamp)
                    .default_value(DefaultValue::CreationTime),
            ],
            request: vec![
                FieldRule::new("post", FieldType::Reference).required(),
                FieldRule::new("beneficiary", FieldType::Reference).required(),
                FieldRule::new("donor", FieldType::Reference).required(),
                FieldRule::new("status", FieldType::Text)
                    .default_value(DefaultValue::Text("Pending"))
                    .one_of(&RequestStatus::NAMES),
                FieldRule::new("createdAt", FieldType::Timestamp)
                    .default_value(DefaultValue::CreationTime),
            ],
            user: vec![
                FieldRule::new("name", FieldType::Text).required(),
                FieldRule::new("email", FieldType::Text).required().unique(),
                FieldRule::new("password", FieldType::Text).required(),
                FieldRule::new("role", FieldType::Text)
                    .required()
                    .one_of(&UserRole::NAMES),
            ],
        }
    }

    /// Shared process-wide registry, built on first use.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::new)
    }

    /// Ordered field rules for the given kind.
    pub fn rules_for(&self, kind: RecordKind) -> &[FieldRule] {
        match kind {
            RecordKind::Contact => &self.contact,
            RecordKind::Post => &self.post,
            RecordKind::Request => &self.request,
            RecordKind::User => &self.user,
        }
    }

    /// Names of the fields carrying a uniqueness constraint for the kind.
    pub fn unique_fields(&self, kind: RecordKind) -> impl Iterator<Item = &'static str> + '_ {
        self.rules_for(kind)
            .iter()
            .filter(|rule| rule.is_unique())
            .map(FieldRule::name)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
