//! # Family Graph
//!
//! The immutable snapshot value shared between the store, the layout engine
//! and the collaborator layer.
//!
//! All storage uses `BTreeMap` keyed by `PersonId`, so iteration is always in
//! id order. Every lookup treats an id that does not resolve as absent.

use crate::{KinshipError, Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// The whole relationship graph at one point in time.
///
/// `root_person_id` is a conventional anchor only; it may dangle and the
/// layout engine never consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyGraph {
    people: BTreeMap<PersonId, Person>,
    root_person_id: PersonId,
}

impl FamilyGraph {
    /// Create a graph holding a single founder who is also the root.
    #[must_use]
    pub fn new(root: Person) -> Self {
        let root_person_id = root.id.clone();
        let mut people = BTreeMap::new();
        people.insert(root.id.clone(), root);
        Self {
            people,
            root_person_id,
        }
    }

    /// Build a graph from person records as they are, without repairing
    /// links. A later record replaces an earlier one with the same id.
    #[must_use]
    pub fn from_people(
        root_person_id: impl Into<PersonId>,
        people: impl IntoIterator<Item = Person>,
    ) -> Self {
        Self {
            people: people.into_iter().map(|p| (p.id.clone(), p)).collect(),
            root_person_id: root_person_id.into(),
        }
    }

    /// Look up a person by id.
    #[must_use]
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.people.contains_key(id)
    }

    /// Number of persons in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// All persons in id order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// All `(id, person)` entries in id order, keys as stored.
    pub fn entries(&self) -> impl Iterator<Item = (&PersonId, &Person)> {
        self.people.iter()
    }

    #[must_use]
    pub fn root_person_id(&self) -> &PersonId {
        &self.root_person_id
    }

    /// The root person, when the anchor resolves.
    #[must_use]
    pub fn root(&self) -> Option<&Person> {
        self.get(&self.root_person_id)
    }

    /// The person's spouse, when the spouse reference resolves.
    #[must_use]
    pub fn spouse_of(&self, id: &PersonId) -> Option<&Person> {
        self.get(id)?.spouse_id.as_ref().and_then(|s| self.get(s))
    }

    /// True when both persons exist and name each other as spouse.
    #[must_use]
    pub fn are_married(&self, a: &PersonId, b: &PersonId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(pa), Some(pb)) => {
                pa.spouse_id.as_ref() == Some(b) && pb.spouse_id.as_ref() == Some(a)
            }
            _ => false,
        }
    }

    /// Resolvable parents of a person, in `parent_ids` order.
    pub fn parents_of<'a>(
        &'a self,
        id: &PersonId,
    ) -> impl Iterator<Item = &'a Person> + use<'a> {
        self.get(id)
            .into_iter()
            .flat_map(|p| p.parent_ids.iter())
            .filter_map(|pid| self.get(pid))
    }

    /// Resolvable children of a person, in addition order.
    pub fn children_of<'a>(
        &'a self,
        id: &PersonId,
    ) -> impl Iterator<Item = &'a Person> + use<'a> {
        self.get(id)
            .into_iter()
            .flat_map(|p| p.children_ids.iter())
            .filter_map(|cid| self.get(cid))
    }

    /// Every id the graph mentions: record ids, the root anchor and all
    /// spouse, parent and child references, dangling ones included.
    fn referenced_ids(&self) -> impl Iterator<Item = &PersonId> {
        self.people
            .values()
            .flat_map(|p| {
                std::iter::once(&p.id)
                    .chain(p.spouse_id.iter())
                    .chain(p.parent_ids.iter())
                    .chain(p.children_ids.iter())
            })
            .chain(std::iter::once(&self.root_person_id))
    }

    /// The id the store would assign to the next person.
    ///
    /// One greater than the largest canonical integer id the graph mentions
    /// anywhere, so a new person never takes over a dangling reference and
    /// ids are never reused. Fails with `IdsExhausted` when that id would
    /// pass `u64::MAX`.
    pub fn next_person_id(&self) -> Result<PersonId, KinshipError> {
        self.next_person_id_above(&[])
    }

    /// Like [`next_person_id`](Self::next_person_id), but also above every
    /// id in `incoming`: the references the new record itself will carry.
    pub(crate) fn next_person_id_above(
        &self,
        incoming: &[PersonId],
    ) -> Result<PersonId, KinshipError> {
        let highest = self
            .referenced_ids()
            .chain(incoming)
            .filter_map(PersonId::as_number)
            .max();
        match highest {
            None => Ok(PersonId::from(1)),
            Some(n) => n
                .checked_add(1)
                .map(PersonId::from)
                .ok_or_else(|| KinshipError::IdsExhausted(PersonId::from(n))),
        }
    }

    /// Add a new record. An existing record with the same id is never
    /// replaced.
    pub(crate) fn insert(&mut self, person: Person) -> Result<(), KinshipError> {
        match self.people.entry(person.id.clone()) {
            Entry::Occupied(_) => Err(KinshipError::DuplicatePerson(person.id)),
            Entry::Vacant(slot) => {
                slot.insert(person);
                Ok(())
            }
        }
    }

    pub(crate) fn person_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.people.get_mut(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
