//! # JSON Snapshot Format
//!
//! Encodes a graph in the collaborator's record shape:
//!
//! ```json
//! { "people": { "1": { "id": "1", "name": "...", ... } }, "rootPersonId": "1" }
//! ```
//!
//! ## Validation
//!
//! Decoding checks shape only:
//! - Payload size is checked against `MAX_SNAPSHOT_SIZE` before parsing
//! - Each map key must equal the `id` of the record stored under it
//!
//! Links are not checked here; dangling or one-directional links decode
//! fine and are reported by the audit module instead.

use crate::primitives::MAX_SNAPSHOT_SIZE;
use crate::{FamilyGraph, KinshipError};

/// Encode a graph as pretty-printed JSON, people in id order.
pub fn graph_to_json(graph: &FamilyGraph) -> Result<String, KinshipError> {
    serde_json::to_string_pretty(graph)
        .map_err(|e| KinshipError::SerializationError(e.to_string()))
}

/// Decode a graph from JSON text.
pub fn graph_from_json(text: &str) -> Result<FamilyGraph, KinshipError> {
    if text.len() > MAX_SNAPSHOT_SIZE {
        return Err(KinshipError::DeserializationError(format!(
            "Snapshot size {} bytes exceeds maximum {} bytes",
            text.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }

    let graph: FamilyGraph = serde_json::from_str(text)
        .map_err(|e| KinshipError::DeserializationError(e.to_string()))?;

    if let Some((key, person)) = graph.entries().find(|(key, person)| **key != person.id) {
        return Err(KinshipError::DeserializationError(format!(
            "Record stored under key '{}' has id '{}'",
            key, person.id
        )));
    }

    Ok(graph)
}

// =============================================================================
// TESTS
// =============================================================================
