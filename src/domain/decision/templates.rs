//! Seeded decision templates.
//!
//! The catalog is fixed. Instantiation mints fresh profile and category ids
//! and numbers factors `p1, p2, ...` / `c1, c2, ...` across the whole
//! profile, so factor ids stay unique within every category.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::{Category, Factor, Profile, Theme, Weight};
use crate::domain::foundation::{CategoryId, FactorId, ProfileId, Timestamp};

/// One option of a template: name plus (description, weight) pairs.
#[derive(Debug)]
pub struct OptionTemplate {
    pub name: &'static str,
    pub pros: &'static [(&'static str, u32)],
    pub cons: &'static [(&'static str, u32)],
}

/// A named, seeded decision.
#[derive(Debug)]
pub struct DecisionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub options: &'static [OptionTemplate],
}

/// Catalog entry as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
}

/// Name given to a profile created from an unknown template id.
pub const BLANK_PROFILE_NAME: &str = "New Decision";

pub static CATALOG: &[DecisionTemplate] = &[
    DecisionTemplate {
        id: "job",
        name: "Job Search",
        options: &[
            OptionTemplate {
                name: "Tech Corp",
                pros: &[("High Salary", 9), ("Brand Name", 6)],
                cons: &[("Long Commute", 7), ("Legacy Tech", 4)],
            },
            OptionTemplate {
                name: "Startup Inc",
                pros: &[("Remote Work", 10), ("Modern Stack", 8)],
                cons: &[("Risk of failure", 6), ("Lower Salary", 5)],
            },
        ],
    },
    DecisionTemplate {
        id: "food",
        name: "Lunch Options",
        options: &[
            OptionTemplate {
                name: "Salad Bar",
                pros: &[("Healthy", 10)],
                cons: &[("Expensive", 6), ("Not Filling", 4)],
            },
            OptionTemplate {
                name: "Pizza Place",
                pros: &[("Delicious", 9), ("Cheap", 8)],
                cons: &[("Unhealthy", 9), ("Food Coma", 5)],
            },
        ],
    },
    DecisionTemplate {
        id: "life",
        name: "Moving Cities",
        options: &[
            OptionTemplate {
                name: "New York",
                pros: &[("Excitement", 9), ("Career", 10)],
                cons: &[("Cost of Living", 10), ("Noise", 5)],
            },
            OptionTemplate {
                name: "Austin",
                pros: &[("Music Scene", 7), ("Weather", 6)],
                cons: &[("Traffic", 6)],
            },
        ],
    },
    DecisionTemplate {
        id: "house",
        name: "Home Buying",
        options: &[
            OptionTemplate {
                name: "City Condo",
                pros: &[("Walkable", 9), ("Low Maintenance", 8)],
                cons: &[("Small Space", 7), ("HOA Fees", 6)],
            },
            OptionTemplate {
                name: "Suburban House",
                pros: &[("Big Yard", 8), ("Quiet", 7)],
                cons: &[("Commute", 9), ("Maintenance", 6)],
            },
        ],
    },
    DecisionTemplate {
        id: "education",
        name: "University Choice",
        options: &[
            OptionTemplate {
                name: "State University",
                pros: &[("Affordable", 10), ("Friends", 7)],
                cons: &[("Large Classes", 5)],
            },
            OptionTemplate {
                name: "Private College",
                pros: &[("Prestige", 8), ("Small Classes", 8)],
                cons: &[("Expensive", 10)],
            },
        ],
    },
    DecisionTemplate {
        id: "tech",
        name: "Gadget Purchase",
        options: &[
            OptionTemplate {
                name: "Flagship Model",
                pros: &[("Best Camera", 9), ("Performance", 9)],
                cons: &[("Very Expensive", 9)],
            },
            OptionTemplate {
                name: "Budget Model",
                pros: &[("Great Value", 10), ("Good Battery", 8)],
                cons: &[("Average Camera", 6)],
            },
        ],
    },
];

static BY_ID: Lazy<HashMap<&'static str, &'static DecisionTemplate>> =
    Lazy::new(|| CATALOG.iter().map(|t| (t.id, t)).collect());

/// Looks up a template by id.
pub fn find_template(template_id: &str) -> Option<&'static DecisionTemplate> {
    BY_ID.get(template_id).copied()
}

/// Lists the catalog in display order.
pub fn template_summaries() -> Vec<TemplateSummary> {
    CATALOG
        .iter()
        .map(|t| TemplateSummary {
            id: t.id,
            name: t.name,
        })
        .collect()
}

/// Instantiates a template, or a blank single-option decision when the id
/// is not in the catalog.
pub fn create_from_template(template_id: &str, now: Timestamp) -> Profile {
    let (name, categories) = match find_template(template_id) {
        Some(template) => (template.name, instantiate(template.options)),
        None => (
            BLANK_PROFILE_NAME,
            vec![Category::new(CategoryId::new(), Category::placeholder_name(0))],
        ),
    };

    let mut profile = Profile::new(ProfileId::new(), name, categories, now);
    profile.theme = Theme::for_template(template_id);
    profile
}

fn instantiate(options: &[OptionTemplate]) -> Vec<Category> {
    let mut pro_seq = 0;
    let mut con_seq = 0;

    options
        .iter()
        .map(|option| {
            let mut category = Category::new(CategoryId::new(), option.name);
            category.pros = seed_factors(option.pros, 'p', &mut pro_seq);
            category.cons = seed_factors(option.cons, 'c', &mut con_seq);
            category
        })
        .collect()
}

fn seed_factors(seeds: &[(&str, u32)], prefix: char, seq: &mut u32) -> Vec<Factor> {
    seeds
        .iter()
        .map(|&(description, weight)| {
            *seq += 1;
            let id = FactorId::parse(format!("{}{}", prefix, seq)).unwrap_or_default();
            Factor::new(id, description, Weight::new(weight))
        })
        .collect()
}
