use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered set of skill names.
///
/// Dedup key is the exact string (case-sensitive). Items keep the order in
/// which they were first seen; later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSkillSet {
    items: Vec<String>,
    index: HashSet<String>,
}

impl OrderedSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `skill` if not already present. Returns true on insert.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        if self.contains(&skill) {
            return false;
        }
        self.index.insert(skill.clone());
        self.items.push(skill);
        true
    }

    /// Set union: existing skills first, then unseen ones in first-seen order.
    /// Returns how many skills were added.
    pub fn merge<I, S>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for skill in incoming {
            if self.insert(skill) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.index.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
impl OrderedSkillSet {
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedSkillSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = OrderedSkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl From<Vec<String>> for OrderedSkillSet {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl Serialize for OrderedSkillSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OrderedSkillSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(OrderedSkillSet::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> OrderedSkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_is_set_union_existing_first() {
        let mut skills = set(&["Rust", "SQL"]);
        let added = skills.merge(vec!["Go", "Go", "Rust"]);
        assert_eq!(added, 1);
        assert_eq!(skills.as_slice(), &["Rust", "SQL", "Go"]);
    }

    #[test]
    fn test_merge_keeps_first_seen_order_of_new_items() {
        let mut skills = set(&["Rust"]);
        skills.merge(["Kafka", "Docker", "Kafka", "Terraform"]);
        assert_eq!(
            skills.iter().collect::<Vec<_>>(),
            vec!["Rust", "Kafka", "Docker", "Terraform"]
        );
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let skills = set(&["rust", "Rust", "rust"]);
        assert_eq!(skills.len(), 2);
        assert!(skills.contains("rust"));
        assert!(skills.contains("Rust"));
        assert!(!skills.contains("RUST"));
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut skills = OrderedSkillSet::new();
        assert!(skills.insert("SQL"));
        assert!(!skills.insert("SQL"));
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_deserialize_collapses_duplicates() {
        let skills: OrderedSkillSet = serde_json::from_str(r#"["Go","Rust","Go"]"#).unwrap();
        assert_eq!(serde_json::to_string(&skills).unwrap(), r#"["Go","Rust"]"#);
    }

    #[test]
    fn test_empty_set() {
        let skills = OrderedSkillSet::default();
        assert!(skills.is_empty());
        assert_eq!(serde_json::to_string(&skills).unwrap(), "[]");
    }
}
