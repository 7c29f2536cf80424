//! Profile - a named decision owning an ordered list of categories.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::Category;
use crate::domain::foundation::{ProfileId, Timestamp, ValidationError};

/// Visual theme of a decision. Absent on the wire when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Default,
    Job,
    Food,
    Life,
}

impl Theme {
    /// Theme matching a template id, if the template has one.
    pub fn for_template(template_id: &str) -> Option<Self> {
        match template_id {
            "job" => Some(Theme::Job),
            "food" => Some(Theme::Food),
            "life" => Some(Theme::Life),
            _ => None,
        }
    }
}

/// A saved decision.
///
/// # Invariants
///
/// - `id` is non-empty and unique within a store
/// - category ids are unique within the profile
/// - `last_modified` is re-stamped by every structural edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub last_modified: Timestamp,
    #[serde(default)]
    pub starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Profile {
    /// Creates an unstarred, unthemed profile.
    pub fn new(
        id: ProfileId,
        name: impl Into<String>,
        categories: Vec<Category>,
        last_modified: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            categories,
            last_modified,
            starred: false,
            theme: None,
        }
    }

    /// Checks ids throughout the tree and delegates to each category.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty_field("profile.id"));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            category.validate()?;
            if !seen.insert(&category.id) {
                return Err(ValidationError::duplicate("category.id", category.id.as_str()));
            }
        }
        Ok(())
    }

    /// Listing order: starred first, then most recently modified first.
    pub fn display_order(a: &Profile, b: &Profile) -> Ordering {
        b.starred
            .cmp(&a.starred)
            .then_with(|| b.last_modified.cmp(&a.last_modified))
    }

    /// Sorts profiles into listing order. The sort is stable.
    pub fn sort_for_display(profiles: &mut [Profile]) {
        profiles.sort_by(Profile::display_order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CategoryId;

    fn profile(id: &str, starred: bool, modified: i64) -> Profile {
        let mut p = Profile::new(
            ProfileId::parse(id).unwrap(),
            id,
            Vec::new(),
            Timestamp::from_millis(modified),
        );
        p.starred = starred;
        p
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut p = profile("p-1", true, 42);
        p.theme = Some(Theme::Job);
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["id"], "p-1");
        assert_eq!(json["lastModified"], 42);
        assert_eq!(json["starred"], true);
        assert_eq!(json["theme"], "job");
        assert!(json["categories"].as_array().unwrap().is_empty());
    }

    #[test]
    fn theme_is_omitted_when_unset() {
        let json = serde_json::to_value(profile("p-1", false, 1)).unwrap();
        assert!(json.get("theme").is_none());
    }

    #[test]
    fn starred_defaults_to_false() {
        let p: Profile =
            serde_json::from_str(r#"{"id": "x", "name": "n", "categories": [], "lastModified": 5}"#)
                .unwrap();
        assert!(!p.starred);
        assert_eq!(p.theme, None);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let result: Result<Profile, _> = serde_json::from_str(
            r#"{"id": "x", "name": "n", "lastModified": 5, "theme": "space"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn theme_for_template_covers_themed_templates_only() {
        assert_eq!(Theme::for_template("food"), Some(Theme::Food));
        assert_eq!(Theme::for_template("house"), None);
    }

    #[test]
    fn display_order_puts_starred_first_then_newest() {
        let mut profiles = vec![
            profile("old", false, 1),
            profile("starred-old", true, 2),
            profile("new", false, 10),
            profile("starred-new", true, 5),
        ];
        Profile::sort_for_display(&mut profiles);

        let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["starred-new", "starred-old", "new", "old"]);
    }

    #[test]
    fn validate_rejects_duplicate_category_ids() {
        let mut p = profile("p", false, 1);
        let id = CategoryId::parse("dup").unwrap();
        p.categories.push(Category::new(id.clone(), "A"));
        p.categories.push(Category::new(id, "B"));
        assert_eq!(p.validate().unwrap_err().field(), "category.id");
    }

    #[test]
    fn validate_rejects_empty_profile_id() {
        let p: Profile =
            serde_json::from_str(r#"{"id": "", "name": "n", "lastModified": 5}"#).unwrap();
        assert_eq!(
            p.validate().unwrap_err(),
            ValidationError::empty_field("profile.id")
        );
    }
}
