//! # Generation Scenario Tests
//!
//! End-to-end layouts of small literal graphs and of the sample family.
//!
//! ## Groups
//! - S0: Literal graphs
//! - S1: Malformed links
//! - S2: Store-built trees
//! - S3: Sample family

use kinship_core::{
    FamilyGraph, FamilyStore, Generation, Person, PersonFields, PersonId, compute_generations,
    generation_level,
};

fn id(raw: &str) -> PersonId {
    PersonId::from(raw)
}

fn person(raw_id: &str, parents: &[&str], spouse: Option<&str>) -> Person {
    let mut person = Person::from_fields(id(raw_id), PersonFields::named(raw_id));
    person.parent_ids = parents.iter().copied().map(id).collect();
    person.spouse_id = spouse.map(id);
    person
}

fn couple_ids(generation: &Generation) -> Vec<(&str, &str)> {
    generation
        .couples
        .iter()
        .map(|c| (c.person1.id.as_str(), c.person2.id.as_str()))
        .collect()
}

fn single_ids(generation: &Generation) -> Vec<&str> {
    generation.singles.iter().map(|p| p.id.as_str()).collect()
}

// =============================================================================
// S0: LITERAL GRAPHS
// =============================================================================

mod s0_literal_graphs {
    use super::*;

    /// S0.1: Two founders married, one child.
    #[test]
    fn couple_with_child() {
        let graph = FamilyGraph::from_people(
            "A",
            [
                person("A", &[], Some("B")),
                person("B", &[], Some("A")),
                person("C", &["A", "B"], None),
            ],
        );

        let generations = compute_generations(&graph);
        assert_eq!(generations.len(), 2);

        assert_eq!(generations[0].level, 0);
        assert_eq!(couple_ids(&generations[0]), vec![("A", "B")]);
        assert!(generations[0].singles.is_empty());

        assert_eq!(generations[1].level, 1);
        assert!(generations[1].couples.is_empty());
        assert_eq!(single_ids(&generations[1]), vec!["C"]);
    }

    /// S0.2: Labels follow level numbers.
    #[test]
    fn labels_follow_levels() {
        let graph = FamilyGraph::from_people(
            "1",
            [
                person("1", &[], None),
                person("2", &["1"], None),
                person("3", &["2"], None),
            ],
        );

        let labels: Vec<String> = compute_generations(&graph)
            .iter()
            .map(Generation::label)
            .collect();
        assert_eq!(labels, ["Founders", "1st Generation", "2nd Generation"]);
    }

    /// S0.3: Levels take the longest ancestry line.
    #[test]
    fn uneven_parents_take_deeper_line() {
        let graph = FamilyGraph::from_people(
            "1",
            [
                person("1", &[], None),
                person("2", &["1"], None),
                person("3", &["2"], None),
                person("4", &[], None),
                person("5", &["3", "4"], None),
            ],
        );

        assert_eq!(generation_level(&graph, &id("5")), 3);
        assert_eq!(generation_level(&graph, &id("4")), 0);
    }
}

// =============================================================================
// S1: MALFORMED LINKS
// =============================================================================

mod s1_malformed_links {
    use super::*;

    /// S1.1: A dangling parent id is ignored.
    #[test]
    fn dangling_parent_makes_founder() {
        let graph = FamilyGraph::from_people("D", [person("D", &["nonexistent"], None)]);

        assert_eq!(generation_level(&graph, &id("D")), 0);
        let generations = compute_generations(&graph);
        assert_eq!(generations.len(), 1);
        assert_eq!(single_ids(&generations[0]), vec!["D"]);
    }

    /// S1.2: Mutual ancestry terminates and places both at level 0.
    #[test]
    fn ancestry_cycle_terminates() {
        let graph = FamilyGraph::from_people(
            "A",
            [person("A", &["B"], None), person("B", &["A"], None)],
        );

        let generations = compute_generations(&graph);
        assert_eq!(generations.len(), 1);
        assert_eq!(single_ids(&generations[0]), vec!["A", "B"]);
    }

    /// S1.3: A spouse link that is not returned leaves both single.
    #[test]
    fn one_sided_spouse_stays_single() {
        let graph = FamilyGraph::from_people(
            "A",
            [
                person("A", &[], Some("B")),
                person("B", &[], None),
                person("C", &[], Some("ghost")),
            ],
        );

        let generations = compute_generations(&graph);
        assert!(generations[0].couples.is_empty());
        assert_eq!(single_ids(&generations[0]), vec!["A", "B", "C"]);
    }

    /// S1.4: Nobody is dropped, even with every kind of bad link at once.
    #[test]
    fn every_person_is_placed() {
        let graph = FamilyGraph::from_people(
            "1",
            [
                person("1", &["1"], Some("1")),
                person("2", &["3"], Some("9")),
                person("3", &["2"], None),
                person("4", &["3", "ghost", "1"], None),
            ],
        );

        let placed: usize = compute_generations(&graph)
            .iter()
            .map(Generation::member_count)
            .sum();
        assert_eq!(placed, 4);
    }
}

// =============================================================================
// S2: STORE-BUILT TREES
// =============================================================================

mod s2_store_trees {
    use super::*;

    /// S2.1: Child added under a couple lands one level below them.
    #[test]
    fn store_child_under_couple() {
        let mut store = FamilyStore::new(PersonFields::named("Ada"));
        let root = id("1");
        let spouse = store
            .add_spouse(&root, PersonFields::named("Ben"))
            .expect("root exists");
        let child = store
            .add_child_of(&root, PersonFields::named("Cy"))
            .expect("root exists");

        let generations = compute_generations(&store.snapshot());
        assert_eq!(generations.len(), 2);
        assert_eq!(
            couple_ids(&generations[0]),
            vec![(root.as_str(), spouse.as_str())]
        );
        assert_eq!(single_ids(&generations[1]), vec![child.as_str()]);
    }

    /// S2.2: Older snapshots keep their layout after further mutations.
    #[test]
    fn snapshot_layout_is_stable() {
        let mut store = FamilyStore::new(PersonFields::named("Ada"));
        let before = store.snapshot();
        let layout_before = compute_generations(&before);

        store
            .add_spouse(&id("1"), PersonFields::named("Ben"))
            .expect("root exists");

        assert_eq!(compute_generations(&before), layout_before);
        assert_ne!(compute_generations(&store.snapshot()), layout_before);
    }

    /// S2.3: Remarriage leaves the first spouse single.
    #[test]
    fn remarriage_orphans_first_spouse() {
        let mut store = FamilyStore::new(PersonFields::named("Ada"));
        let first = store
            .add_spouse(&id("1"), PersonFields::named("Ben"))
            .expect("root exists");
        let second = store
            .add_spouse(&id("1"), PersonFields::named("Cal"))
            .expect("root exists");

        let generations = compute_generations(&store.snapshot());
        assert_eq!(couple_ids(&generations[0]), vec![("1", second.as_str())]);
        assert_eq!(single_ids(&generations[0]), vec![first.as_str()]);
    }
}

// =============================================================================
// S3: SAMPLE FAMILY
// =============================================================================

mod s3_sample_family {
    use super::*;
    use kinship_core::sample::smith_family;

    /// S3.1: Four generations, married-in spouses at the top.
    #[test]
    fn sample_family_generations() {
        let generations = compute_generations(&smith_family());
        assert_eq!(generations.len(), 4);

        assert_eq!(couple_ids(&generations[0]), vec![("1", "2")]);
        assert_eq!(
            single_ids(&generations[0]),
            vec!["8", "9", "10", "11", "19", "20", "21"]
        );

        assert!(generations[1].couples.is_empty());
        assert_eq!(single_ids(&generations[1]), vec!["3", "4", "5", "6", "7"]);

        assert_eq!(
            single_ids(&generations[2]),
            vec!["13", "14", "15", "16", "17", "18"]
        );
        assert_eq!(single_ids(&generations[3]), vec!["25", "26", "27", "28"]);
        assert_eq!(generations[3].label(), "3rd Generation");
    }

    /// S3.2: Adding to the sample keeps everyone placed.
    #[test]
    fn sample_family_accepts_new_child() {
        let mut store = FamilyStore::from_graph(smith_family());
        let child = store
            .add_child(&[id("14")], PersonFields::named("New Baby"))
            .expect("valid parent");

        assert_eq!(child, id("29"));
        assert_eq!(generation_level(&store.snapshot(), &child), 3);

        let placed: usize = compute_generations(&store.snapshot())
            .iter()
            .map(Generation::member_count)
            .sum();
        assert_eq!(placed, 25);
    }
}
