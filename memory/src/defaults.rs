use serde_json::json;
use std::collections::BTreeMap;

/// Suggested property values for components with no prior usage, keyed
/// by name substring. Configuration data tied to catalog naming
/// conventions; replaceable without touching the merge logic.
#[derive(Clone, Debug)]
pub struct SuggestedDefaults {
    pub rules: Vec<(String, BTreeMap<String, serde_json::Value>)>,
}

impl Default for SuggestedDefaults {
    fn default() -> Self {
        let mut rules = Vec::new();
        let mut button = BTreeMap::new();
        button.insert("variant".to_string(), json!("primary"));
        button.insert("size".to_string(), json!("medium"));
        rules.push(("button".to_string(), button));

        let mut input = BTreeMap::new();
        input.insert("placeholder".to_string(), json!("Type here..."));
        rules.push(("input".to_string(), input));

        let mut switch = BTreeMap::new();
        switch.insert("checked".to_string(), json!(true));
        rules.push(("switch".to_string(), switch));

        let mut badge = BTreeMap::new();
        badge.insert("variant".to_string(), json!("primary"));
        rules.push(("badge".to_string(), badge));

        Self { rules }
    }
}

impl SuggestedDefaults {
    /// Suggested values for a component name; first substring rule wins
    /// per property.
    pub fn for_name(&self, name: &str) -> BTreeMap<String, serde_json::Value> {
        let lowered = name.to_lowercase();
        let mut out = BTreeMap::new();
        for (needle, props) in &self.rules {
            if lowered.contains(needle.as_str()) {
                for (prop, value) in props {
                    out.entry(prop.clone()).or_insert_with(|| value.clone());
                }
            }
        }
        out
    }
}
