//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. Field names
//! are camelCase, matching the person record wire shape.

use kinship_core::{
    FamilyMetrics, Generation, KinshipError, PersonFields, PersonId, PersonUpdate,
    primitives::{MAX_NAME_LENGTH, MAX_TEXT_FIELD_LENGTH},
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Tree status: metrics of the current snapshot plus its revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub revision: u64,
    pub root_person_id: PersonId,
    #[serde(flatten)]
    pub metrics: FamilyMetrics,
}

// =============================================================================
// GENERATIONS RESPONSE
// =============================================================================

/// One generation with its display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub label: String,
    #[serde(flatten)]
    pub generation: Generation,
}

impl From<Generation> for GenerationResponse {
    fn from(generation: Generation) -> Self {
        Self {
            label: generation.label(),
            generation,
        }
    }
}

// =============================================================================
// MUTATION REQUESTS
// =============================================================================

/// Optional compare-and-swap guard, passed as `?expectedRevision=N`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionQuery {
    pub expected_revision: Option<u64>,
}

/// Body of `POST /people/{id}/children`.
///
/// The new child's parents are the path person plus `otherParentId` when
/// given, otherwise the path person's spouse when that resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChildOfRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_parent_id: Option<PersonId>,
    #[serde(flatten)]
    pub fields: PersonFields,
}

/// Body of `POST /children`: an explicit parent list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChildRequest {
    #[serde(default)]
    pub parent_ids: Vec<PersonId>,
    #[serde(flatten)]
    pub fields: PersonFields,
}

// =============================================================================
// MUTATION RESPONSES
// =============================================================================

/// A person was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: PersonId,
    pub revision: u64,
}

/// Result of `PATCH /people/{id}`. `applied` is false for an unknown id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub applied: bool,
    pub revision: u64,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// FIELD VALIDATION
// =============================================================================

/// Check a name: non-blank and within `MAX_NAME_LENGTH` bytes.
fn validate_name(name: &str) -> Result<(), KinshipError> {
    if name.trim().is_empty() {
        return Err(KinshipError::InvalidField("name must not be empty".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(KinshipError::InvalidField(format!(
            "name length {} exceeds maximum {} bytes",
            name.len(),
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_text(field: &str, value: Option<&str>) -> Result<(), KinshipError> {
    match value {
        Some(v) if v.len() > MAX_TEXT_FIELD_LENGTH => Err(KinshipError::InvalidField(format!(
            "{} length {} exceeds maximum {} bytes",
            field,
            v.len(),
            MAX_TEXT_FIELD_LENGTH
        ))),
        _ => Ok(()),
    }
}

/// Validate creation fields at the boundary, before they reach the store.
pub fn validate_fields(fields: &PersonFields) -> Result<(), KinshipError> {
    validate_name(&fields.name)?;
    validate_text("profilePicture", fields.profile_picture.as_deref())?;
    validate_text("occupation", fields.occupation.as_deref())?;
    validate_text("bio", fields.bio.as_deref())
}

/// Validate a partial update with the same limits as creation fields.
pub fn validate_update(update: &PersonUpdate) -> Result<(), KinshipError> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    validate_text(
        "profilePicture",
        update.profile_picture.as_ref().and_then(Option::as_deref),
    )?;
    validate_text("occupation", update.occupation.as_ref().and_then(Option::as_deref))?;
    validate_text("bio", update.bio.as_ref().and_then(Option::as_deref))
}
