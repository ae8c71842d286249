//! # Link Audit
//!
//! Read-only diagnostics over a snapshot.
//!
//! The store keeps links symmetric for everything it writes, but a graph can
//! still carry broken links: it may have been decoded from a collaborator's
//! file, or a remarriage may have left a one-directional spouse link behind.
//! The audit reports these without changing anything. Readers already
//! tolerate every reported issue; this exists so a collaborator can show it.

use crate::primitives::MAX_PARENTS;
use crate::{FamilyGraph, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display};

/// One broken or suspicious link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LinkIssue {
    /// `spouseId` names a person that does not exist.
    DanglingSpouse { person: PersonId, spouse: PersonId },
    /// The spouse exists but does not point back.
    AsymmetricSpouse { person: PersonId, spouse: PersonId },
    /// A `parentIds` entry does not resolve.
    DanglingParent { person: PersonId, parent: PersonId },
    /// A `childrenIds` entry does not resolve.
    DanglingChild { person: PersonId, child: PersonId },
    /// The child lists the parent, but the parent does not list the child.
    MissingChildLink { parent: PersonId, child: PersonId },
    /// The parent lists the child, but the child does not list the parent.
    MissingParentLink { parent: PersonId, child: PersonId },
    /// More parents than there are parent slots.
    TooManyParents { person: PersonId, count: usize },
    /// The person is their own ancestor.
    AncestryCycle { person: PersonId },
}

impl Display for LinkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingSpouse { person, spouse } => {
                write!(f, "{person}: spouse {spouse} does not exist")
            }
            Self::AsymmetricSpouse { person, spouse } => {
                write!(f, "{person}: spouse {spouse} does not point back")
            }
            Self::DanglingParent { person, parent } => {
                write!(f, "{person}: parent {parent} does not exist")
            }
            Self::DanglingChild { person, child } => {
                write!(f, "{person}: child {child} does not exist")
            }
            Self::MissingChildLink { parent, child } => {
                write!(f, "{child}: parent {parent} does not list this child")
            }
            Self::MissingParentLink { parent, child } => {
                write!(f, "{parent}: child {child} does not list this parent")
            }
            Self::TooManyParents { person, count } => {
                write!(f, "{person}: {count} parents (at most {MAX_PARENTS})")
            }
            Self::AncestryCycle { person } => write!(f, "{person}: is their own ancestor"),
        }
    }
}

/// Collect every link issue in `graph`, grouped by person in id order.
#[must_use]
pub fn audit(graph: &FamilyGraph) -> Vec<LinkIssue> {
    let mut issues = Vec::new();

    for person in graph.people() {
        if let Some(spouse_id) = &person.spouse_id {
            match graph.get(spouse_id) {
                None => issues.push(LinkIssue::DanglingSpouse {
                    person: person.id.clone(),
                    spouse: spouse_id.clone(),
                }),
                Some(spouse) if spouse.spouse_id.as_ref() != Some(&person.id) => {
                    issues.push(LinkIssue::AsymmetricSpouse {
                        person: person.id.clone(),
                        spouse: spouse_id.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if person.parent_ids.len() > MAX_PARENTS {
            issues.push(LinkIssue::TooManyParents {
                person: person.id.clone(),
                count: person.parent_ids.len(),
            });
        }

        for parent_id in &person.parent_ids {
            match graph.get(parent_id) {
                None => issues.push(LinkIssue::DanglingParent {
                    person: person.id.clone(),
                    parent: parent_id.clone(),
                }),
                Some(parent) if !parent.children_ids.contains(&person.id) => {
                    issues.push(LinkIssue::MissingChildLink {
                        parent: parent_id.clone(),
                        child: person.id.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        for child_id in &person.children_ids {
            match graph.get(child_id) {
                None => issues.push(LinkIssue::DanglingChild {
                    person: person.id.clone(),
                    child: child_id.clone(),
                }),
                Some(child) if !child.parent_ids.contains(&person.id) => {
                    issues.push(LinkIssue::MissingParentLink {
                        parent: person.id.clone(),
                        child: child_id.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if is_own_ancestor(graph, &person.id) {
            issues.push(LinkIssue::AncestryCycle {
                person: person.id.clone(),
            });
        }
    }

    issues
}

/// Whether `id` can be reached from itself by following parent links.
fn is_own_ancestor(graph: &FamilyGraph, id: &PersonId) -> bool {
    let mut seen: BTreeSet<&PersonId> = BTreeSet::new();
    let mut pending: Vec<&PersonId> = graph
        .get(id)
        .map(|p| p.parent_ids.iter().collect())
        .unwrap_or_default();

    while let Some(current) = pending.pop() {
        if current == id {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(person) = graph.get(current) {
            pending.extend(person.parent_ids.iter());
        }
    }
    false
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FamilyStore, Person, PersonFields};

    fn person(id: &str, spouse: Option<&str>, parents: &[&str], children: &[&str]) -> Person {
        let mut p = Person::from_fields(PersonId::from(id), PersonFields::named(id));
        p.spouse_id = spouse.map(PersonId::from);
        p.parent_ids = parents.iter().copied().map(PersonId::from).collect();
        p.children_ids = children.iter().copied().map(PersonId::from).collect();
        p
    }

    fn id(s: &str) -> PersonId {
        PersonId::from(s)
    }

    #[test]
    fn store_built_graph_is_clean() {
        let mut store = FamilyStore::new(PersonFields::named("John"));
        let wife = store
            .add_spouse(&id("1"), PersonFields::named("Mary"))
            .expect("add spouse");
        store
            .add_child(&[id("1"), wife], PersonFields::named("David"))
            .expect("add child");
        assert!(audit(&store.snapshot()).is_empty());
    }

    #[test]
    fn remarriage_shows_up_as_asymmetric_spouse() {
        let mut store = FamilyStore::new(PersonFields::named("John"));
        let first = store
            .add_spouse(&id("1"), PersonFields::named("First"))
            .expect("add spouse");
        store
            .add_spouse(&id("1"), PersonFields::named("Second"))
            .expect("add spouse");

        assert_eq!(
            audit(&store.snapshot()),
            vec![LinkIssue::AsymmetricSpouse {
                person: first,
                spouse: id("1"),
            }]
        );
    }

    #[test]
    fn reports_dangling_and_missing_links() {
        let graph = FamilyGraph::from_people(
            "1",
            vec![
                person("1", Some("9"), &[], &["2"]),
                person("2", None, &[], &[]),
                person("3", None, &["1", "8"], &["7"]),
            ],
        );

        assert_eq!(
            audit(&graph),
            vec![
                LinkIssue::DanglingSpouse {
                    person: id("1"),
                    spouse: id("9"),
                },
                LinkIssue::MissingParentLink {
                    parent: id("1"),
                    child: id("2"),
                },
                LinkIssue::MissingChildLink {
                    parent: id("1"),
                    child: id("3"),
                },
                LinkIssue::DanglingParent {
                    person: id("3"),
                    parent: id("8"),
                },
                LinkIssue::DanglingChild {
                    person: id("3"),
                    child: id("7"),
                },
            ]
        );
    }

    #[test]
    fn reports_cycles_and_parent_overflow() {
        let graph = FamilyGraph::from_people(
            "A",
            vec![
                person("A", None, &["B"], &["B"]),
                person("B", None, &["A"], &["A"]),
                person("C", None, &["A", "B", "A"], &[]),
            ],
        );
        let issues = audit(&graph);

        assert!(issues.contains(&LinkIssue::AncestryCycle { person: id("A") }));
        assert!(issues.contains(&LinkIssue::AncestryCycle { person: id("B") }));
        assert!(!issues.contains(&LinkIssue::AncestryCycle { person: id("C") }));
        assert!(issues.contains(&LinkIssue::TooManyParents {
            person: id("C"),
            count: 3,
        }));
    }

    #[test]
    fn issue_display_names_both_ends() {
        let issue = LinkIssue::AsymmetricSpouse {
            person: id("2"),
            spouse: id("1"),
        };
        assert_eq!(issue.to_string(), "2: spouse 1 does not point back");
    }
}
