//! Record kinds, raw field values, and the enumerated vocabularies used by
//! the donation schemas.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named schemas known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Contact,
    Post,
    Request,
    User,
}

impl RecordKind {
    /// Every kind the registry holds rules for, in registration order.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Contact,
        RecordKind::Post,
        RecordKind::Request,
        RecordKind::User,
    ];
}

/// Error returned when parsing a record kind from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRecordKindError;

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contact => f.write_str("contact"),
            Self::Post => f.write_str("post"),
            Self::Request => f.write_str("request"),
            Self::User => f.write_str("user"),
        }
    }
}

impl fmt::Display for ParseRecordKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid record kind")
    }
}

impl std::error::Error for ParseRecordKindError {}

impl FromStr for RecordKind {
    type Err = ParseRecordKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "contact" => Ok(Self::Contact),
            "post" => Ok(Self::Post),
            "request" => Ok(Self::Request),
            "user" => Ok(Self::User),
            _ => Err(ParseRecordKindError),
        }
    }
}

/// A raw field value as submitted by a caller.
///
/// Candidate records are maps from field name to one of these values; the
/// validator never inspects anything richer. Timestamps are always UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// A boolean flag.
    Flag(bool),
    /// An opaque reference to another record, checked for presence only.
    Reference(Uuid),
    /// A point in time.
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Borrow the text payload when the value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Borrow the flag payload when the value is a boolean.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the timestamp payload when the value is temporal.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Flag(value) => write!(f, "{value}"),
            Self::Reference(value) => write!(f, "{value}"),
            Self::Timestamp(value) => f.write_str(&value.to_rfc3339()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Reference(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Candidate record payload: field name to raw value.
///
/// Ordered so error reports and serialised payloads are deterministic.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A record that passed validation: original values plus filled defaults.
///
/// Only the validator constructs these, so holding one is proof the field
/// map satisfies its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    kind: RecordKind,
    fields: FieldMap,
}

impl NormalizedRecord {
    pub(crate) fn new(kind: RecordKind, fields: FieldMap) -> Self {
        Self { kind, fields }
    }

    /// Returns the schema this record was validated against.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns the normalised field map.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Look up a single field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// A record after the store accepted it and assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    id: Uuid,
    #[serde(flatten)]
    record: NormalizedRecord,
}

impl StoredRecord {
    /// Wrap a normalised record with its store-assigned identifier.
    pub fn new(id: Uuid, record: NormalizedRecord) -> Self {
        Self { id, record }
    }

    /// Returns the store-assigned identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the schema the record belongs to.
    pub fn kind(&self) -> RecordKind {
        self.record.kind()
    }

    /// Returns the stored field map.
    pub fn fields(&self) -> &FieldMap {
        self.record.fields()
    }

    /// Look up a single field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.record.get(name)
    }
}

/// Whether a donation contains animal products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

impl FoodType {
    /// Wire spellings accepted for this vocabulary.
    pub const NAMES: [&'static str; 2] = ["Veg", "Non-Veg"];
}

/// Error returned when parsing a food type from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFoodTypeError;

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Veg => f.write_str("Veg"),
            Self::NonVeg => f.write_str("Non-Veg"),
        }
    }
}

impl fmt::Display for ParseFoodTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid food type")
    }
}

impl std::error::Error for ParseFoodTypeError {}

impl FromStr for FoodType {
    type Err = ParseFoodTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Veg" => Ok(Self::Veg),
            "Non-Veg" => Ok(Self::NonVeg),
            _ => Err(ParseFoodTypeError),
        }
    }
}

/// Dietary classification attached to a donation post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryCategory {
    /// No particular classification; the schema default.
    #[default]
    None,
    Vegan,
    Vegetarian,
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
}

impl DietaryCategory {
    /// Wire spellings accepted for this vocabulary.
    pub const NAMES: [&'static str; 4] = ["None", "Vegan", "Vegetarian", "Gluten-Free"];
}

/// Error returned when parsing a dietary category from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDietaryCategoryError;

impl fmt::Display for DietaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Vegan => f.write_str("Vegan"),
            Self::Vegetarian => f.write_str("Vegetarian"),
            Self::GlutenFree => f.write_str("Gluten-Free"),
        }
    }
}

impl fmt::Display for ParseDietaryCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid dietary category")
    }
}

impl std::error::Error for ParseDietaryCategoryError {}

impl FromStr for DietaryCategory {
    type Err = ParseDietaryCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "None" => Ok(Self::None),
            "Vegan" => Ok(Self::Vegan),
            "Vegetarian" => Ok(Self::Vegetarian),
            "Gluten-Free" => Ok(Self::GlutenFree),
            _ => Err(ParseDietaryCategoryError),
        }
    }
}

/// Workflow state of a pickup request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting the donor's decision; the schema default.
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// Wire spellings accepted for this vocabulary.
    pub const NAMES: [&'static str; 3] = ["Pending", "Accepted", "Rejected"];
}

/// Error returned when parsing a request status from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRequestStatusError;

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Accepted => f.write_str("Accepted"),
            Self::Rejected => f.write_str("Rejected"),
        }
    }
}

impl fmt::Display for ParseRequestStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid request status")
    }
}

impl std::error::Error for ParseRequestStatusError {}

impl FromStr for RequestStatus {
    type Err = ParseRequestStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(ParseRequestStatusError),
        }
    }
}

/// Role an account plays in the donation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    Beneficiary,
}

impl UserRole {
    /// Wire spellings accepted for this vocabulary.
    pub const NAMES: [&'static str; 2] = ["donor", "beneficiary"];
}

/// Error returned when parsing a user role from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseUserRoleError;

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Donor => f.write_str("donor"),
            Self::Beneficiary => f.write_str("beneficiary"),
        }
    }
}

impl fmt::Display for ParseUserRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid user role")
    }
}

impl std::error::Error for ParseUserRoleError {}

impl FromStr for UserRole {
    type Err = ParseUserRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "donor" => Ok(Self::Donor),
            "beneficiary" => Ok(Self::Beneficiary),
            _ => Err(ParseUserRoleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(RecordKind::Contact, "contact")]
    #[case(RecordKind::Post, "post")]
    #[case(RecordKind::Request, "request")]
    #[case(RecordKind::User, "user")]
    fn record_kind_round_trips_through_strings(#[case] kind: RecordKind, #[case] text: &str) {
        assert_eq!(kind.to_string(), text);
        assert_eq!(text.parse::<RecordKind>(), Ok(kind));
    }

    #[rstest]
    fn record_kind_rejects_unknown_names() {
        assert_eq!("donation".parse::<RecordKind>(), Err(ParseRecordKindError));
    }

    #[rstest]
    #[case("Veg", FoodType::Veg)]
    #[case("Non-Veg", FoodType::NonVeg)]
    fn food_type_parses_wire_spellings(#[case] text: &str, #[case] expected: FoodType) {
        assert_eq!(text.parse::<FoodType>(), Ok(expected));
        assert_eq!(expected.to_string(), text);
    }

    #[rstest]
    fn dietary_category_defaults_to_none() {
        assert_eq!(DietaryCategory::default(), DietaryCategory::None);
        assert_eq!("Gluten-Free".parse::<DietaryCategory>(), Ok(DietaryCategory::GlutenFree));
    }

    #[rstest]
    fn request_status_defaults_to_pending() {
        assert_eq!(RequestStatus::default(), RequestStatus::Pending);
        assert_eq!("Accepted".parse::<RequestStatus>(), Ok(RequestStatus::Accepted));
        assert!("InvalidStatus".parse::<RequestStatus>().is_err());
    }

    #[rstest]
    #[case("donor", UserRole::Donor)]
    #[case("beneficiary", UserRole::Beneficiary)]
    fn user_role_parses_lowercase_spellings(#[case] text: &str, #[case] expected: UserRole) {
        assert_eq!(text.parse::<UserRole>(), Ok(expected));
    }

    #[rstest]
    fn field_value_serialises_with_snake_case_tags() {
        let value = serde_json::to_value(FieldValue::from("hello")).expect("serialises");
        assert_eq!(value, json!({ "text": "hello" }));

        let flag = serde_json::to_value(FieldValue::from(false)).expect("serialises");
        assert_eq!(flag, json!({ "flag": false }));
    }

    #[rstest]
    fn field_value_displays_timestamps_as_rfc3339() {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let value = FieldValue::from(at);
        assert_eq!(value.to_string(), "2026-03-01T12:00:00+00:00");
        assert_eq!(value.as_timestamp(), Some(at));
    }

    #[rstest]
    fn stored_record_flattens_kind_and_fields() {
        let fields = FieldMap::from([("name".to_owned(), FieldValue::from("Ada"))]);
        let record = NormalizedRecord::new(RecordKind::Contact, fields);
        let stored = StoredRecord::new(Uuid::nil(), record);

        let value = serde_json::to_value(&stored).expect("serialises");
        assert_eq!(value["kind"], json!("contact"));
        assert_eq!(value["fields"]["name"], json!({ "text": "Ada" }));
    }
}
