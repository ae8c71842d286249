//! # Formats Module
//!
//! Wire encodings of a family graph snapshot.
//!
//! Reading and writing files is done by the app layer; this module only
//! converts between a `FamilyGraph` and its JSON text.

pub mod json;

pub use json::{graph_from_json, graph_to_json};
