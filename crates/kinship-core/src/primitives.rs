//! # Fixed Primitives
//!
//! Hardcoded runtime constants for the Kinship core.
//!
//! These values are compiled into the binary and are immutable at runtime.

/// Maximum number of parents a person can list (two biological slots).
pub const MAX_PARENTS: usize = 2;

/// Id given to the founder created together with a new store.
///
/// The store hands out further ids counting up from here.
pub const ROOT_PERSON_ID: &str = "1";

/// Display label of generation level 0.
pub const FOUNDERS_LABEL: &str = "Founders";

// =============================================================================
// INPUT SHAPE LIMITS
// =============================================================================

/// Maximum length of a person's name, in bytes.
///
/// Enforced at the collaborator boundary before fields reach the store.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum length of a free-text field (bio, occupation, picture reference).
pub const MAX_TEXT_FIELD_LENGTH: usize = 65536;

/// Maximum size of a JSON graph snapshot accepted by the decoder (64 MB).
///
/// Checked before parsing so an oversized payload is never allocated into
/// a graph.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024 * 1024;
