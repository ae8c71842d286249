//! # Property-Based Tests
//!
//! Layout and store invariants checked over generated family graphs.
//!
//! Two generators are used:
//! - store-built trees, produced by random sequences of store mutations
//! - raw graphs with arbitrary links, including dangling ids, self-parents
//!   and ancestry cycles

use kinship_core::{
    FamilyGraph, FamilyStore, LinkIssue, Person, PersonFields, PersonId, audit,
    compute_generations, level_map,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// GENERATORS
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Child { first: usize, second: Option<usize> },
    Spouse { target: usize },
    Founder,
    /// Child of a person that does not exist yet, `ahead` past the next id,
    /// optionally alongside an existing parent.
    ChildOfUnknown { known: Option<usize>, ahead: u8 },
    /// Spouse of a person that does not exist yet, `ahead` past the next id.
    SpouseOfUnknown { ahead: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), proptest::option::of(any::<usize>()))
            .prop_map(|(first, second)| Op::Child { first, second }),
        2 => any::<usize>().prop_map(|target| Op::Spouse { target }),
        1 => Just(Op::Founder),
        1 => (proptest::option::of(any::<usize>()), 0u8..3)
            .prop_map(|(known, ahead)| Op::ChildOfUnknown { known, ahead }),
        1 => (0u8..3).prop_map(|ahead| Op::SpouseOfUnknown { ahead }),
    ]
}

/// A store-built tree plus the ids it handed out (in creation order) and the
/// unknown ids the operations referenced.
struct Built {
    store: FamilyStore,
    ids: Vec<PersonId>,
    unknown: Vec<PersonId>,
}

/// An id that does not resolve: the store's next id plus `ahead`.
fn unknown_id(store: &FamilyStore, ahead: u8) -> PersonId {
    let next = store
        .snapshot()
        .next_person_id()
        .expect("ids left")
        .as_number()
        .expect("numeric id");
    PersonId::from(next + u64::from(ahead))
}

/// Replay `ops` against a fresh store.
fn build_store(ops: &[Op]) -> Built {
    let mut store = FamilyStore::new(PersonFields::named("root"));
    let mut ids = vec![PersonId::from("1")];
    let mut unknown = Vec::new();

    for (n, op) in ops.iter().enumerate() {
        let fields = PersonFields::named(format!("person {n}"));
        let created = match op {
            Op::Child { first, second } => {
                let mut parents = vec![ids[first % ids.len()].clone()];
                if let Some(second) = second {
                    let other = ids[second % ids.len()].clone();
                    if other != parents[0] {
                        parents.push(other);
                    }
                }
                store.add_child(&parents, fields).expect("valid parents")
            }
            Op::Spouse { target } => {
                let target = ids[target % ids.len()].clone();
                store.add_spouse(&target, fields).expect("ids left")
            }
            Op::Founder => store.add_child(&[], fields).expect("no parents"),
            Op::ChildOfUnknown { known, ahead } => {
                let missing = unknown_id(&store, *ahead);
                let mut parents = vec![missing.clone()];
                if let Some(known) = known {
                    parents.push(ids[known % ids.len()].clone());
                }
                unknown.push(missing);
                store.add_child(&parents, fields).expect("valid parents")
            }
            Op::SpouseOfUnknown { ahead } => {
                let missing = unknown_id(&store, *ahead);
                unknown.push(missing.clone());
                store.add_spouse(&missing, fields).expect("ids left")
            }
        };
        ids.push(created);
    }

    Built {
        store,
        ids,
        unknown,
    }
}

/// Person `i` links to indexes in `parents` and `spouse`; indexes past the
/// end become dangling ids.
fn raw_graph(links: &[(Vec<u8>, Option<u8>)]) -> FamilyGraph {
    let people = links.iter().enumerate().map(|(i, (parents, spouse))| {
        let mut person = Person::from_fields(PersonId::from(i as u64), PersonFields::named("p"));
        person.parent_ids = parents.iter().map(|&p| PersonId::from(p as u64)).collect();
        person.spouse_id = spouse.map(|s| PersonId::from(s as u64));
        person
    });
    FamilyGraph::from_people("0", people)
}

fn raw_strategy() -> impl Strategy<Value = Vec<(Vec<u8>, Option<u8>)>> {
    vec((vec(0u8..40, 0..3), proptest::option::of(0u8..40)), 1..30)
}

// =============================================================================
// SHARED CHECKS
// =============================================================================

/// Every person appears exactly once, on the level the level map gives.
fn assert_complete(graph: &FamilyGraph) -> Result<(), TestCaseError> {
    let levels = level_map(graph);
    let mut seen: BTreeMap<PersonId, usize> = BTreeMap::new();

    for generation in compute_generations(graph) {
        for id in generation.member_ids() {
            *seen.entry(id.clone()).or_default() += 1;
            prop_assert_eq!(levels.get(id), Some(&generation.level));
        }
    }

    prop_assert_eq!(seen.len(), graph.len());
    prop_assert!(seen.values().all(|&count| count == 1));
    Ok(())
}

/// Couples are mutual spouses on the same level.
fn assert_couples_mutual(graph: &FamilyGraph) -> Result<(), TestCaseError> {
    for generation in compute_generations(graph) {
        for couple in &generation.couples {
            prop_assert!(graph.are_married(&couple.person1.id, &couple.person2.id));
        }
    }
    Ok(())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A child is always on a deeper level than each resolvable parent.
    #[test]
    fn level_monotonicity(ops in vec(op_strategy(), 0..40)) {
        let store = build_store(&ops).store;
        let graph = store.snapshot();
        let levels = level_map(&graph);

        for person in graph.people() {
            for parent in graph.parents_of(&person.id) {
                prop_assert!(levels[&person.id] > levels[&parent.id]);
            }
        }
    }

    /// Persons without resolvable parents are founders.
    #[test]
    fn founders_are_level_zero(links in raw_strategy()) {
        let graph = raw_graph(&links);
        let levels = level_map(&graph);

        for person in graph.people() {
            if graph.parents_of(&person.id).next().is_none() {
                prop_assert_eq!(levels[&person.id], 0);
            }
        }
    }

    /// Store-built trees: every person placed once, couples mutual.
    #[test]
    fn pairing_complete_for_store_trees(ops in vec(op_strategy(), 0..40)) {
        let store = build_store(&ops).store;
        let graph = store.snapshot();
        assert_complete(&graph)?;
        assert_couples_mutual(&graph)?;
    }

    /// Raw graphs with cycles and dangling ids: layout still terminates and
    /// places everyone exactly once.
    #[test]
    fn pairing_complete_for_malformed_graphs(links in raw_strategy()) {
        let graph = raw_graph(&links);
        assert_complete(&graph)?;
        assert_couples_mutual(&graph)?;
    }

    /// Same snapshot, same generations.
    #[test]
    fn layout_is_deterministic(links in raw_strategy()) {
        let graph = raw_graph(&links);
        prop_assert_eq!(compute_generations(&graph), compute_generations(&graph));
    }

    /// The store only leaves behind the broken links its callers asked for:
    /// the previous spouse of a remarried person, and references to persons
    /// that did not exist at the time.
    #[test]
    fn store_keeps_links_symmetric(ops in vec(op_strategy(), 0..40)) {
        let built = build_store(&ops);
        for issue in audit(&built.store.snapshot()) {
            let allowed = match &issue {
                LinkIssue::AsymmetricSpouse { .. } => true,
                LinkIssue::DanglingParent { parent, .. } => built.unknown.contains(parent),
                LinkIssue::DanglingSpouse { spouse, .. } => built.unknown.contains(spouse),
                _ => false,
            };
            prop_assert!(allowed, "unexpected issue: {}", issue);
        }
    }

    /// Ids are handed out once, in increasing order, and never take over an
    /// id that was referenced before it existed.
    #[test]
    fn ids_are_unique_and_increasing(ops in vec(op_strategy(), 0..40)) {
        let built = build_store(&ops);
        let graph = built.store.snapshot();
        prop_assert_eq!(graph.len(), built.ids.len());
        prop_assert!(built.ids.windows(2).all(|pair| pair[0] < pair[1]));
        for missing in &built.unknown {
            prop_assert!(!graph.contains(missing), "{} came to life", missing);
        }
    }
}
