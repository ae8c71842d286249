//! # Sample Family
//!
//! The built-in demonstration tree: the Smith family, four generations,
//! rooted at John Smith (`"1"`).
//!
//! Spouses who married into the family have no recorded parents, so the
//! layout places them at level 0 as singles while their partners sit on a
//! deeper level.

use crate::{FamilyGraph, Gender, Person, PersonId};
use chrono::NaiveDate;

const PLACEHOLDER_PICTURE: &str = "/placeholder.svg?height=80&width=80";

struct Row {
    id: &'static str,
    name: &'static str,
    born: (i32, u32, u32),
    died: Option<(i32, u32, u32)>,
    gender: Gender,
    occupation: &'static str,
    bio: &'static str,
    spouse: Option<&'static str>,
    parents: &'static [&'static str],
    children: &'static [&'static str],
}

const ROWS: &[Row] = &[
    Row {
        id: "1",
        name: "John Smith",
        born: (1950, 5, 15),
        died: None,
        gender: Gender::Male,
        occupation: "Engineer",
        bio: "Family patriarch, retired engineer, married to Mary since 1972",
        spouse: Some("2"),
        parents: &[],
        children: &["3", "4", "5", "6", "7"],
    },
    Row {
        id: "2",
        name: "Mary Smith",
        born: (1952, 8, 22),
        died: None,
        gender: Gender::Female,
        occupation: "Teacher",
        bio: "Retired school teacher, married to John since 1972, loves gardening",
        spouse: Some("1"),
        parents: &[],
        children: &["3", "4", "5", "6", "7"],
    },
    Row {
        id: "3",
        name: "David Smith",
        born: (1975, 3, 10),
        died: None,
        gender: Gender::Male,
        occupation: "Doctor",
        bio: "Cardiologist at City Hospital, married to Lisa since 2001",
        spouse: Some("8"),
        parents: &["1", "2"],
        children: &["13", "14"],
    },
    Row {
        id: "8",
        name: "Lisa Smith",
        born: (1976, 7, 18),
        died: None,
        gender: Gender::Female,
        occupation: "Nurse",
        bio: "Pediatric nurse, married to David since 2001, loves children",
        spouse: Some("3"),
        parents: &[],
        children: &["13", "14"],
    },
    Row {
        id: "4",
        name: "Sarah Johnson",
        born: (1977, 11, 5),
        died: None,
        gender: Gender::Female,
        occupation: "Artist",
        bio: "Professional painter and art teacher, married to Mark since 2000",
        spouse: Some("9"),
        parents: &["1", "2"],
        children: &["15", "16", "17"],
    },
    Row {
        id: "9",
        name: "Mark Johnson",
        born: (1975, 4, 25),
        died: None,
        gender: Gender::Male,
        occupation: "Architect",
        bio: "Residential architect, married to Sarah since 2000, designs beautiful homes",
        spouse: Some("4"),
        parents: &[],
        children: &["15", "16", "17"],
    },
    Row {
        id: "5",
        name: "Michael Smith",
        born: (1979, 7, 18),
        died: Some((2020, 4, 12)),
        gender: Gender::Male,
        occupation: "Musician",
        bio: "Talented musician who passed away young from illness, never married",
        spouse: None,
        parents: &["1", "2"],
        children: &[],
    },
    Row {
        id: "6",
        name: "Jennifer Wilson",
        born: (1981, 9, 22),
        died: None,
        gender: Gender::Female,
        occupation: "Lawyer",
        bio: "Corporate lawyer, married to James since 2005, works at top law firm",
        spouse: Some("10"),
        parents: &["1", "2"],
        children: &["18"],
    },
    Row {
        id: "10",
        name: "James Wilson",
        born: (1980, 1, 15),
        died: None,
        gender: Gender::Male,
        occupation: "Engineer",
        bio: "Software engineer, married to Jennifer since 2005, tech entrepreneur",
        spouse: Some("6"),
        parents: &[],
        children: &["18"],
    },
    Row {
        id: "7",
        name: "Robert Smith",
        born: (1983, 12, 3),
        died: None,
        gender: Gender::Male,
        occupation: "Teacher",
        bio: "High school math teacher, married to Amanda since 2010, loves education",
        spouse: Some("11"),
        parents: &["1", "2"],
        children: &[],
    },
    Row {
        id: "11",
        name: "Amanda Smith",
        born: (1985, 6, 10),
        died: None,
        gender: Gender::Female,
        occupation: "Veterinarian",
        bio: "Small animal veterinarian, married to Robert since 2010, animal lover",
        spouse: Some("7"),
        parents: &[],
        children: &[],
    },
    Row {
        id: "13",
        name: "Emma Smith",
        born: (2005, 12, 3),
        died: None,
        gender: Gender::Female,
        occupation: "Student",
        bio: "College student studying medicine, married to Ryan since 2023",
        spouse: Some("19"),
        parents: &["3", "8"],
        children: &["25"],
    },
    Row {
        id: "19",
        name: "Ryan Davis",
        born: (2004, 9, 12),
        died: None,
        gender: Gender::Male,
        occupation: "Student",
        bio: "Engineering student, married to Emma since 2023, future engineer",
        spouse: Some("13"),
        parents: &[],
        children: &["25"],
    },
    Row {
        id: "14",
        name: "Alex Smith",
        born: (2008, 8, 15),
        died: None,
        gender: Gender::Male,
        occupation: "Student",
        bio: "High school student, loves sports, single",
        spouse: None,
        parents: &["3", "8"],
        children: &[],
    },
    Row {
        id: "15",
        name: "Olivia Johnson",
        born: (2003, 5, 20),
        died: None,
        gender: Gender::Female,
        occupation: "Student",
        bio: "Art student like her mother, married to Lucas since 2022",
        spouse: Some("20"),
        parents: &["4", "9"],
        children: &["26", "27"],
    },
    Row {
        id: "20",
        name: "Lucas Martinez",
        born: (2002, 7, 30),
        died: None,
        gender: Gender::Male,
        occupation: "Artist",
        bio: "Digital artist, married to Olivia since 2022, creative couple",
        spouse: Some("15"),
        parents: &[],
        children: &["26", "27"],
    },
    Row {
        id: "16",
        name: "Ethan Johnson",
        born: (2006, 2, 14),
        died: None,
        gender: Gender::Male,
        occupation: "Student",
        bio: "High school student, married to Ava since 2024, young love",
        spouse: Some("21"),
        parents: &["4", "9"],
        children: &["28"],
    },
    Row {
        id: "21",
        name: "Ava Thompson",
        born: (2007, 1, 18),
        died: None,
        gender: Gender::Female,
        occupation: "Student",
        bio: "High school student, married to Ethan since 2024, young parents",
        spouse: Some("16"),
        parents: &[],
        children: &["28"],
    },
    Row {
        id: "17",
        name: "Sophia Johnson",
        born: (2009, 11, 8),
        died: None,
        gender: Gender::Female,
        occupation: "Student",
        bio: "Middle school student, loves painting, single",
        spouse: None,
        parents: &["4", "9"],
        children: &[],
    },
    Row {
        id: "18",
        name: "Noah Wilson",
        born: (2010, 3, 25),
        died: None,
        gender: Gender::Male,
        occupation: "Student",
        bio: "Elementary school student, loves computers, single",
        spouse: None,
        parents: &["6", "10"],
        children: &[],
    },
    Row {
        id: "25",
        name: "Lily Davis",
        born: (2024, 1, 15),
        died: None,
        gender: Gender::Female,
        occupation: "Baby",
        bio: "Newest addition to the family, Emma and Ryan's daughter",
        spouse: None,
        parents: &["13", "19"],
        children: &[],
    },
    Row {
        id: "26",
        name: "Mason Martinez",
        born: (2023, 6, 10),
        died: None,
        gender: Gender::Male,
        occupation: "Toddler",
        bio: "Energetic toddler, loves to draw, Olivia and Lucas's son",
        spouse: None,
        parents: &["15", "20"],
        children: &[],
    },
    Row {
        id: "27",
        name: "Grace Martinez",
        born: (2024, 9, 22),
        died: None,
        gender: Gender::Female,
        occupation: "Baby",
        bio: "Sweet baby girl, Olivia and Lucas's daughter",
        spouse: None,
        parents: &["15", "20"],
        children: &[],
    },
    Row {
        id: "28",
        name: "Liam Thompson",
        born: (2024, 3, 8),
        died: None,
        gender: Gender::Male,
        occupation: "Baby",
        bio: "Happy baby boy, Ethan and Ava's son",
        spouse: None,
        parents: &["16", "21"],
        children: &[],
    },
];

fn date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn ids(raw: &[&str]) -> Vec<PersonId> {
    raw.iter().copied().map(PersonId::from).collect()
}

impl Row {
    fn to_person(&self) -> Person {
        Person {
            id: PersonId::from(self.id),
            name: self.name.to_string(),
            profile_picture: Some(PLACEHOLDER_PICTURE.to_string()),
            date_of_birth: date(self.born),
            date_of_death: self.died.and_then(date),
            is_deceased: self.died.is_some(),
            gender: self.gender,
            occupation: Some(self.occupation.to_string()),
            bio: Some(self.bio.to_string()),
            spouse_id: self.spouse.map(PersonId::from),
            parent_ids: ids(self.parents),
            children_ids: ids(self.children),
        }
    }
}

/// The Smith family demonstration graph.
#[must_use]
pub fn smith_family() -> FamilyGraph {
    FamilyGraph::from_people("1", ROWS.iter().map(Row::to_person))
}
