//! # Relationship Store
//!
//! Owns the family graph and applies every mutation to it.
//!
//! Each mutation clones the current snapshot, edits the clone and swaps it in
//! whole. A snapshot handed out by [`FamilyStore::snapshot`] never changes
//! afterwards, and no caller can observe a half-applied mutation: both sides
//! of a spouse link or a parent/child link are written to the same new value
//! before it is published.
//!
//! ## Link rules
//!
//! - `add_child` appends the child to every parent that resolved before the
//!   call; parent ids that do not resolve are kept on the child but otherwise
//!   skipped.
//! - New ids are allocated above every id the graph or the call mentions, so
//!   a dangling reference never starts resolving to a newer person.
//! - `add_spouse` links both sides. A previous spouse of the target is left
//!   pointing at the target (see `DESIGN.md`, open question on remarriage).
//! - `update_person` never touches `id` or relationship fields.

use crate::primitives::{MAX_PARENTS, ROOT_PERSON_ID};
use crate::{FamilyGraph, KinshipError, Person, PersonFields, PersonId, PersonUpdate};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Explicit handle to one family tree.
///
/// Several stores can coexist; nothing is held in global state.
#[derive(Debug, Clone)]
pub struct FamilyStore {
    current: Arc<FamilyGraph>,
    revision: u64,
}

impl FamilyStore {
    /// Create a store whose graph holds a single founder, the root.
    #[must_use]
    pub fn new(root: PersonFields) -> Self {
        let root = Person::from_fields(PersonId::from(ROOT_PERSON_ID), root);
        Self::from_graph(FamilyGraph::new(root))
    }

    /// Adopt an existing graph as-is. Links are not repaired.
    #[must_use]
    pub fn from_graph(graph: FamilyGraph) -> Self {
        Self {
            current: Arc::new(graph),
            revision: 0,
        }
    }

    /// The most recently committed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<FamilyGraph> {
        Arc::clone(&self.current)
    }

    /// Number of mutations committed since the store was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Fail with `RevisionConflict` when `expected` is given and stale.
    pub fn check_revision(&self, expected: Option<u64>) -> Result<(), KinshipError> {
        match expected {
            Some(expected) if expected != self.revision => Err(KinshipError::RevisionConflict {
                expected,
                actual: self.revision,
            }),
            _ => Ok(()),
        }
    }

    /// Look up a person in the current snapshot.
    #[must_use]
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.current.get(id)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create a child of `parent_ids` and link it into each resolvable parent.
    ///
    /// Returns `InvalidParents` (and changes nothing) when more than two
    /// parents are given or the same parent is listed twice.
    pub fn add_child(
        &mut self,
        parent_ids: &[PersonId],
        fields: PersonFields,
    ) -> Result<PersonId, KinshipError> {
        validate_parents(parent_ids)?;

        let mut next = FamilyGraph::clone(&self.current);
        let child_id = next.next_person_id_above(parent_ids)?;

        let mut child = Person::from_fields(child_id.clone(), fields);
        child.parent_ids = parent_ids.to_vec();
        next.insert(child)?;

        for parent_id in parent_ids {
            // Resolve against the graph as it was before the child existed.
            let parent = if self.current.contains(parent_id) {
                next.person_mut(parent_id)
            } else {
                None
            };
            match parent {
                Some(parent) => parent.children_ids.push(child_id.clone()),
                None => tracing::debug!(
                    child = %child_id,
                    parent = %parent_id,
                    "parent does not resolve, child link skipped"
                ),
            }
        }

        self.commit(next);
        tracing::debug!(child = %child_id, parents = parent_ids.len(), "child added");
        Ok(child_id)
    }

    /// Create a child of `person_id` and, when it resolves, of their spouse.
    ///
    /// This is the "add child to this person" flow of the tree editor.
    pub fn add_child_of(
        &mut self,
        person_id: &PersonId,
        fields: PersonFields,
    ) -> Result<PersonId, KinshipError> {
        if !self.current.contains(person_id) {
            return Err(KinshipError::PersonNotFound(person_id.clone()));
        }
        let mut parents = vec![person_id.clone()];
        if let Some(spouse) = self.current.spouse_of(person_id) {
            if spouse.id != *person_id {
                parents.push(spouse.id.clone());
            }
        }
        self.add_child(&parents, fields)
    }

    /// Create a spouse for `person_id` and link both sides.
    ///
    /// When `person_id` does not resolve, the new person still records it as
    /// spouse (a dangling link readers ignore).
    pub fn add_spouse(
        &mut self,
        person_id: &PersonId,
        fields: PersonFields,
    ) -> Result<PersonId, KinshipError> {
        let mut next = FamilyGraph::clone(&self.current);
        let spouse_id = next.next_person_id_above(std::slice::from_ref(person_id))?;

        let mut spouse = Person::from_fields(spouse_id.clone(), fields);
        spouse.spouse_id = Some(person_id.clone());
        next.insert(spouse)?;

        let target = if self.current.contains(person_id) {
            next.person_mut(person_id)
        } else {
            None
        };
        match target {
            Some(person) => {
                if let Some(previous) = person.spouse_id.replace(spouse_id.clone()) {
                    tracing::warn!(
                        person = %person_id,
                        previous = %previous,
                        spouse = %spouse_id,
                        "person already had a spouse; previous spouse link left one-directional"
                    );
                }
            }
            None => tracing::debug!(
                person = %person_id,
                spouse = %spouse_id,
                "spouse target does not resolve"
            ),
        }

        self.commit(next);
        tracing::debug!(person = %person_id, spouse = %spouse_id, "spouse added");
        Ok(spouse_id)
    }

    /// Merge `updates` into the person with `id`.
    ///
    /// Unknown ids are a silent no-op. Returns whether the id resolved.
    pub fn update_person(&mut self, id: &PersonId, updates: &PersonUpdate) -> bool {
        if !self.current.contains(id) {
            tracing::debug!(person = %id, "update for unknown person ignored");
            return false;
        }

        let mut next = FamilyGraph::clone(&self.current);
        if let Some(person) = next.person_mut(id) {
            updates.apply_to(person);
        }
        self.commit(next);
        true
    }

    fn commit(&mut self, next: FamilyGraph) {
        self.current = Arc::new(next);
        self.revision = self.revision.saturating_add(1);
    }
}

/// Check the shape of a parent list: at most two distinct ids.
fn validate_parents(parent_ids: &[PersonId]) -> Result<(), KinshipError> {
    if parent_ids.len() > MAX_PARENTS {
        return Err(KinshipError::InvalidParents(format!(
            "{} parents given, at most {} allowed",
            parent_ids.len(),
            MAX_PARENTS
        )));
    }
    let distinct: BTreeSet<&PersonId> = parent_ids.iter().collect();
    if distinct.len() != parent_ids.len() {
        return Err(KinshipError::InvalidParents(
            "the same parent is listed twice".to_string(),
        ));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
