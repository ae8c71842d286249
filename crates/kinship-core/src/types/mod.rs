//! # Core Type Definitions
//!
//! This module contains the record types shared by the store, the layout
//! engine and the collaborator layer:
//! - Person identifiers (`PersonId`) and their scan order
//! - The person record (`Person`) and its wire shape
//! - Creation and update field sets (`PersonFields`, `PersonUpdate`)
//! - Error types (`KinshipError`)
//!
//! ## Determinism Guarantees
//!
//! `PersonId` implements `Ord` so that every `BTreeMap`/`BTreeSet` keyed by it
//! iterates in the same order on every run. There is no hashing-dependent
//! iteration anywhere in the crate.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// PERSON IDENTIFIER
// =============================================================================

/// Opaque, stable identifier of a person.
///
/// Ordering ("id order"): canonical non-negative integers (`"7"`, `"42"`)
/// compare numerically and sort before every other id; all remaining ids
/// compare lexicographically. Ids handed out by the store are canonical
/// integers, so id order is also creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create an id from any string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of a canonical integer id (`"42"`, not `"042"`).
    #[must_use]
    pub fn as_number(&self) -> Option<u64> {
        let bytes = self.0.as_bytes();
        let canonical = match bytes {
            [] => false,
            [b'0'] => true,
            [b'0', ..] => false,
            _ => bytes.iter().all(u8::is_ascii_digit),
        };
        if canonical {
            self.0.parse().ok()
        } else {
            None
        }
    }
}

impl Ord for PersonId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for PersonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for PersonId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

// =============================================================================
// GENDER
// =============================================================================

/// Gender as recorded on a person card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(KinshipError::InvalidField(format!(
                "gender must be one of male, female, other (got '{}')",
                other
            ))),
        }
    }
}

// =============================================================================
// PERSON
// =============================================================================

/// A node of the relationship graph.
///
/// Relationship fields (`spouse_id`, `parent_ids`, `children_ids`) may hold
/// ids that no longer resolve. Every reader treats such ids as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_death: Option<NaiveDate>,
    #[serde(default)]
    pub is_deceased: bool,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<PersonId>,
    #[serde(default)]
    pub parent_ids: Vec<PersonId>,
    #[serde(default)]
    pub children_ids: Vec<PersonId>,
}

impl Person {
    /// Build an unlinked person record from creation fields.
    #[must_use]
    pub fn from_fields(id: PersonId, fields: PersonFields) -> Self {
        Self {
            id,
            name: fields.name,
            profile_picture: fields.profile_picture,
            date_of_birth: fields.date_of_birth,
            date_of_death: fields.date_of_death,
            is_deceased: fields.is_deceased,
            gender: fields.gender,
            occupation: fields.occupation,
            bio: fields.bio,
            spouse_id: None,
            parent_ids: Vec::new(),
            children_ids: Vec::new(),
        }
    }

    /// Year of birth, when known.
    #[must_use]
    pub fn birth_year(&self) -> Option<i32> {
        self.date_of_birth.map(|d| d.year())
    }

    /// Short display form of the life dates: `"1950"` or `"1979 - 2020"`.
    ///
    /// The death year is only shown for deceased persons. Returns `None`
    /// when no birth date is recorded.
    #[must_use]
    pub fn lifespan_label(&self) -> Option<String> {
        let born = self.birth_year()?;
        match self.date_of_death.filter(|_| self.is_deceased) {
            Some(died) => Some(format!("{} - {}", born, died.year())),
            None => Some(born.to_string()),
        }
    }
}

// =============================================================================
// CREATION FIELDS
// =============================================================================

/// Person fields supplied when creating a person.
///
/// Excludes `id` and all relationship fields: those are assigned by the
/// store so that spouse and parent/child links stay symmetric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_death: Option<NaiveDate>,
    #[serde(default)]
    pub is_deceased: bool,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl PersonFields {
    /// Fields with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_picture: None,
            date_of_birth: None,
            date_of_death: None,
            is_deceased: false,
            gender: Gender::default(),
            occupation: None,
            bio: None,
        }
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    #[must_use]
    pub fn born(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }
}

// =============================================================================
// PARTIAL UPDATE
// =============================================================================

/// A partial update merged into an existing person.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` (JSON
/// `null`) clears the stored value. Identity and relationship fields are not
/// part of an update and are rejected on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "patch_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_picture: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "patch_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "patch_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_death: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deceased: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(
        default,
        deserialize_with = "patch_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub occupation: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "patch_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<Option<String>>,
}

impl PersonUpdate {
    /// True when the update would not touch any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this update into `person`.
    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name.clone_from(name);
        }
        if let Some(picture) = &self.profile_picture {
            person.profile_picture.clone_from(picture);
        }
        if let Some(born) = self.date_of_birth {
            person.date_of_birth = born;
        }
        if let Some(died) = self.date_of_death {
            person.date_of_death = died;
        }
        if let Some(deceased) = self.is_deceased {
            person.is_deceased = deceased;
        }
        if let Some(gender) = self.gender {
            person.gender = gender;
        }
        if let Some(occupation) = &self.occupation {
            person.occupation.clone_from(occupation);
        }
        if let Some(bio) = &self.bio {
            person.bio.clone_from(bio);
        }
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

/// Blank strings deserialize as an absent value.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A present key always yields `Some`, so `null` becomes `Some(None)`.
fn patch_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn patch_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_as_none(deserializer).map(Some)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Kinship system.
///
/// Read paths never produce errors: dangling references, ancestry cycles and
/// updates to unknown ids all degrade to a defined default. Errors are
/// reserved for malformed input shapes and for the I/O done by callers.
#[derive(Debug, Error)]
pub enum KinshipError {
    /// A parent list violates its shape (too many entries or duplicates).
    #[error("Invalid parents: {0}")]
    InvalidParents(String),

    /// The requested person was not found in the graph.
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    /// A field value does not have the expected shape.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// The store moved past the revision a caller based its mutation on.
    #[error("Revision conflict: expected {expected}, store is at {actual}")]
    RevisionConflict { expected: u64, actual: u64 },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Every canonical integer id up to `u64::MAX` is already taken.
    #[error("No person id left above {0}")]
    IdsExhausted(PersonId),

    /// A new person would replace an existing record with the same id.
    #[error("Duplicate person id: {0}")]
    DuplicatePerson(PersonId),

    /// A configuration file could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
