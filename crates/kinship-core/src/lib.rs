//! # kinship-core
//!
//! The family graph engine for Kinship - THE LOGIC.
//!
//! This crate holds a graph of people linked by parent/child and spousal
//! relationships, and derives from it a layered presentation order
//! ("generations") with spouses paired inside each tier.
//!
//! ## Components
//!
//! - `store`: the relationship store. Applies mutations while keeping spouse
//!   and parent/child links symmetric, and publishes a new immutable
//!   snapshot per mutation.
//! - `layout`: the generation layout engine. Pure functions of a snapshot,
//!   no retained state, never fails.
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Deterministic: `BTreeMap`/`BTreeSet` only, ordered by id
//! - Dangling references and ancestry cycles degrade to defaults, never to
//!   errors or panics
//! - No global state: every tree is an explicit `FamilyStore` value

// =============================================================================
// MODULES
// =============================================================================

pub mod audit;
pub mod formats;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod primitives;
pub mod sample;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Gender, KinshipError, Person, PersonFields, PersonId, PersonUpdate};

// =============================================================================
// RE-EXPORTS: Store & Layout
// =============================================================================

pub use audit::{LinkIssue, audit};
pub use graph::FamilyGraph;
pub use layout::{
    Couple, Generation, compute_generations, generation_label, generation_level, level_map,
};
pub use metrics::FamilyMetrics;
pub use store::FamilyStore;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{graph_from_json, graph_to_json};
