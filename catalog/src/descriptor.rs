use crate::key::ComponentKey;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which editor control a property wants. Discriminates [`PropertySpec`];
/// duck-typed property bags are deliberately not supported.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Text,
    Boolean,
    Number,
    Range,
    Select,
    Color,
}

/// One editable property of a unit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PropertySpec {
    pub control: ControlKind,
    /// Choices for `Select` controls; empty for every other kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub default: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySpec {
    pub fn new(control: ControlKind, default: serde_json::Value) -> Self {
        Self {
            control,
            options: Vec::new(),
            default,
            description: None,
        }
    }

    pub fn select(options: Vec<String>, default: serde_json::Value) -> Self {
        Self {
            control: ControlKind::Select,
            options,
            default,
            description: None,
        }
    }
}

/// A named example configuration shipped with a descriptor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExampleGroup {
    pub title: String,
    pub props: BTreeMap<String, serde_json::Value>,
}

/// The schema describing a unit's configurable surface. Produced by the
/// loader, cached by `category/name` key, read-only once produced: a
/// re-fetch replaces the cache entry, it never mutates one in place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigDescriptor {
    pub unit_id: String,
    pub title: String,
    pub description: String,
    pub property_schema: BTreeMap<String, PropertySpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleGroup>,
    /// Set when the unit failed to resolve and this descriptor is a
    /// degraded stand-in.
    #[serde(default)]
    pub error: bool,
}

impl ConfigDescriptor {
    /// Degraded descriptor for a unit that failed to load. The UI keeps
    /// the slot renderable instead of surfacing a top-level failure.
    pub fn placeholder(key: &ComponentKey, reason: &str) -> Self {
        Self {
            unit_id: key.to_string(),
            title: human_title(&key.name),
            description: format!("failed to load: {reason}"),
            property_schema: BTreeMap::new(),
            examples: Vec::new(),
            error: true,
        }
    }

    /// Declared default value for each property in the schema.
    pub fn defaults(&self) -> BTreeMap<String, serde_json::Value> {
        self.property_schema
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default.clone()))
            .collect()
    }
}

/// Declared type of a unit property, as reported by the resolver.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    Bool,
    Number,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeclaredProperty {
    pub name: String,
    pub ty: DeclaredType,
    pub default: serde_json::Value,
}

impl DeclaredProperty {
    pub fn new(name: impl Into<String>, ty: DeclaredType, default: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            ty,
            default,
        }
    }
}

/// A resolved, instantiable unit: the raw material a descriptor is
/// synthesized from when no hand-authored one exists.
#[derive(Clone, Debug)]
pub struct Unit {
    pub unit_id: String,
    pub properties: Vec<DeclaredProperty>,
    /// Hand-authored descriptor, used verbatim when present.
    pub authored: Option<ConfigDescriptor>,
}

impl Unit {
    pub fn new(unit_id: impl Into<String>, properties: Vec<DeclaredProperty>) -> Self {
        Self {
            unit_id: unit_id.into(),
            properties,
            authored: None,
        }
    }

    pub fn with_authored(mut self, descriptor: ConfigDescriptor) -> Self {
        self.authored = Some(descriptor);
        self
    }
}

/// `icon-button` → `Icon Button`.
pub fn human_title(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|t| !t.is_empty())
        .map(|t| {
            let mut chars = t.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn human_title_splits_hyphens_and_underscores() {
        assert_eq!(human_title("icon-button"), "Icon Button");
        assert_eq!(human_title("data_grid"), "Data Grid");
        assert_eq!(human_title("card"), "Card");
    }

    #[test]
    fn placeholder_is_marked_error() {
        let key = ComponentKey::new("atoms", "broken-switch");
        let d = ConfigDescriptor::placeholder(&key, "boom");
        assert!(d.error);
        assert_eq!(d.title, "Broken Switch");
        assert!(d.property_schema.is_empty());
    }

    #[test]
    fn defaults_reflect_schema() {
        let mut schema = BTreeMap::new();
        schema.insert(
            "disabled".to_string(),
            PropertySpec::new(ControlKind::Boolean, json!(false)),
        );
        let d = ConfigDescriptor {
            unit_id: "atoms/button".into(),
            title: "Button".into(),
            description: String::new(),
            property_schema: schema,
            examples: Vec::new(),
            error: false,
        };
        assert_eq!(d.defaults().get("disabled"), Some(&json!(false)));
    }
}
