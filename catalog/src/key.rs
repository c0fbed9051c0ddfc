use serde::Deserialize;
use serde::Serialize;

/// Identifies one registered unit as a `(category, name)` pair.
///
/// The canonical string form is `category/name`; that form is used as
/// the cache and persistence key everywhere.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey {
    pub category: String,
    pub name: String,
}

impl ComponentKey {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Parse `category/name`. Returns `None` when either side is empty
    /// or the separator is missing.
    pub fn parse(s: &str) -> Option<Self> {
        let (category, name) = s.split_once('/')?;
        if category.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(category, name))
    }
}

impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        let key = ComponentKey::new("atoms", "icon-button");
        let parsed = ComponentKey::parse(&key.to_string()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(ComponentKey::parse("no-slash").is_none());
        assert!(ComponentKey::parse("/name").is_none());
        assert!(ComponentKey::parse("category/").is_none());
    }
}
