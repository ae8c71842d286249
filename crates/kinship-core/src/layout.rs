//! # Generation Layout
//!
//! Pure functions that turn a [`FamilyGraph`] snapshot into an ordered list
//! of generations for display.
//!
//! ## Pipeline
//!
//! 1. **Level assignment**: a person's level is `1 + max(level(parent))`
//!    over the parents that resolve, or 0 when none do.
//! 2. **Grouping**: persons are bucketed by level; buckets come out in
//!    ascending level order and empty levels are never synthesized.
//! 3. **Pairing**: inside a bucket, mutually linked spouses found in the same
//!    bucket become a couple; everyone else is a single.
//!
//! ## Robustness
//!
//! Nothing here fails. Dangling parent ids are excluded from the max, and
//! ancestry cycles are cut where the walk meets itself. Every person in the
//! graph appears exactly once in the output.
//!
//! The ancestry walk keeps its frames on the heap, so a lineage of any depth
//! is walked without growing the thread stack.

use crate::primitives::FOUNDERS_LABEL;
use crate::{FamilyGraph, Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Two spouses shown side by side. `person1` is the one met first in scan
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Couple {
    pub person1: Person,
    pub person2: Person,
}

/// One horizontal tier of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub level: u32,
    pub couples: Vec<Couple>,
    pub singles: Vec<Person>,
}

impl Generation {
    /// Display label of this tier.
    #[must_use]
    pub fn label(&self) -> String {
        generation_label(self.level)
    }

    /// Number of persons in this tier.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.couples.len() * 2 + self.singles.len()
    }

    /// Ids of every member, couples first then singles, in output order.
    pub fn member_ids(&self) -> impl Iterator<Item = &PersonId> {
        self.couples
            .iter()
            .flat_map(|c| [&c.person1.id, &c.person2.id])
            .chain(self.singles.iter().map(|p| &p.id))
    }
}

/// `"Founders"`, `"1st Generation"`, `"2nd Generation"`, ...
#[must_use]
pub fn generation_label(level: u32) -> String {
    if level == 0 {
        return FOUNDERS_LABEL.to_string();
    }
    let suffix = match (level % 10, level % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{} Generation", level, suffix)
}

// =============================================================================
// LEVEL ASSIGNMENT
// =============================================================================

/// Outcome of walking up from one person.
#[derive(Debug, Clone, Copy)]
enum Walk {
    /// Level found. `clean` is false when a cycle was cut somewhere above.
    Level { level: u32, clean: bool },
    /// The walk met the person at this path depth again; the branch
    /// carries no level until it unwinds back to that person.
    Cycle(usize),
}

/// One person on the walk's path, with the parents still to visit and what
/// the visited ones contributed so far.
struct Frame<'g> {
    person: &'g Person,
    depth: usize,
    next_parent: usize,
    highest: Option<u32>,
    clean: bool,
    open_cycle: Option<usize>,
}

impl<'g> Frame<'g> {
    fn new(person: &'g Person, depth: usize) -> Self {
        Self {
            person,
            depth,
            next_parent: 0,
            highest: None,
            clean: true,
            open_cycle: None,
        }
    }

    /// Fold one parent's outcome into this frame.
    fn absorb(&mut self, walk: Walk) {
        match walk {
            Walk::Level { level, clean } => {
                self.highest = Some(self.highest.map_or(level, |h| h.max(level)));
                self.clean &= clean;
            }
            // The cycle closes on this person: drop the branch.
            Walk::Cycle(target) if target >= self.depth => self.clean = false,
            Walk::Cycle(target) => {
                self.open_cycle = Some(self.open_cycle.map_or(target, |c| c.min(target)));
            }
        }
    }

    fn finish(&self) -> Walk {
        if let Some(target) = self.open_cycle {
            return Walk::Cycle(target);
        }
        Walk::Level {
            level: self.highest.map_or(0, |h| h.saturating_add(1)),
            clean: self.clean,
        }
    }
}

/// One upward traversal, started fresh for every person.
///
/// The walk keeps an explicit stack of frames, so lineage depth is bounded
/// by memory rather than by the thread stack. `path` is the visited set: it
/// holds exactly the persons on the stack, each with its depth. Entries are
/// removed when a frame is popped, so sibling branches never see each
/// other's visits.
struct AncestryWalk<'g> {
    graph: &'g FamilyGraph,
    path: BTreeMap<&'g PersonId, usize>,
    /// Levels of ancestors whose whole ancestry was cycle-free. Such a level
    /// does not depend on the current path, so it is reused within the walk
    /// (shared grandparents are walked once).
    settled: BTreeMap<&'g PersonId, u32>,
}

impl<'g> AncestryWalk<'g> {
    fn new(graph: &'g FamilyGraph) -> Self {
        Self {
            graph,
            path: BTreeMap::new(),
            settled: BTreeMap::new(),
        }
    }

    /// Outcome of `person` when reached from the current path, without
    /// opening a frame.
    fn known(&self, person: &Person) -> Option<Walk> {
        if let Some(&depth) = self.path.get(&person.id) {
            return Some(Walk::Cycle(depth));
        }
        self.settled
            .get(&person.id)
            .map(|&level| Walk::Level { level, clean: true })
    }

    fn enter(&mut self, person: &'g Person) -> Frame<'g> {
        let depth = self.path.len();
        self.path.insert(&person.id, depth);
        Frame::new(person, depth)
    }

    fn visit(&mut self, start: &'g Person) -> Walk {
        if let Some(walk) = self.known(start) {
            return walk;
        }

        let graph = self.graph;
        let mut outcome = Walk::Level {
            level: 0,
            clean: true,
        };
        let mut stack = vec![self.enter(start)];

        while let Some(frame) = stack.last_mut() {
            let person = frame.person;
            if let Some(parent_id) = person.parent_ids.get(frame.next_parent) {
                frame.next_parent += 1;
                let Some(parent) = graph.get(parent_id) else {
                    continue;
                };
                match self.known(parent) {
                    Some(walk) => frame.absorb(walk),
                    None => {
                        let above = self.enter(parent);
                        stack.push(above);
                    }
                }
                continue;
            }

            // Every parent of the top frame is accounted for.
            self.path.remove(&person.id);
            let walk = frame.finish();
            if let Walk::Level { level, clean: true } = walk {
                self.settled.insert(&person.id, level);
            }
            stack.pop();
            match stack.last_mut() {
                Some(below) => below.absorb(walk),
                None => outcome = walk,
            }
        }

        outcome
    }
}

/// Generation level of one person. Unknown ids are level 0.
#[must_use]
pub fn generation_level(graph: &FamilyGraph, id: &PersonId) -> u32 {
    let Some(person) = graph.get(id) else {
        return 0;
    };
    match AncestryWalk::new(graph).visit(person) {
        Walk::Level { level, .. } => level,
        // Unreachable at depth 0: every cycle closes on the start at the latest.
        Walk::Cycle(_) => 0,
    }
}

/// Level of every person, computed independently per person.
#[must_use]
pub fn level_map(graph: &FamilyGraph) -> BTreeMap<PersonId, u32> {
    graph
        .people()
        .map(|p| (p.id.clone(), generation_level(graph, &p.id)))
        .collect()
}

// =============================================================================
// GROUPING & PAIRING
// =============================================================================

/// Compute the ordered generations of `graph`.
///
/// Deterministic: the same snapshot always yields the same levels, couple
/// order and single order.
#[must_use]
pub fn compute_generations(graph: &FamilyGraph) -> Vec<Generation> {
    let mut buckets: BTreeMap<u32, Vec<&Person>> = BTreeMap::new();
    for person in graph.people() {
        buckets
            .entry(generation_level(graph, &person.id))
            .or_default()
            .push(person);
    }

    buckets
        .into_iter()
        .map(|(level, members)| pair_level(graph, level, &members))
        .collect()
}

/// Split one level's bucket into couples and singles, in scan order.
fn pair_level(graph: &FamilyGraph, level: u32, members: &[&Person]) -> Generation {
    let in_bucket: BTreeSet<&PersonId> = members.iter().map(|p| &p.id).collect();
    let mut claimed: BTreeSet<&PersonId> = BTreeSet::new();
    let mut couples = Vec::new();
    let mut singles = Vec::new();

    for &person in members {
        if !claimed.insert(&person.id) {
            continue;
        }

        let partner = person
            .spouse_id
            .as_ref()
            .filter(|sid| in_bucket.contains(sid) && !claimed.contains(sid))
            .and_then(|sid| graph.get(sid))
            .filter(|spouse| spouse.spouse_id.as_ref() == Some(&person.id));

        match partner {
            Some(spouse) => {
                claimed.insert(&spouse.id);
                couples.push(Couple {
                    person1: person.clone(),
                    person2: spouse.clone(),
                });
            }
            None => singles.push(person.clone()),
        }
    }

    Generation {
        level,
        couples,
        singles,
    }
}

// =============================================================================
// TESTS
// =============================================================================
