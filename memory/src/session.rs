//! Session export/import: the transferable `{component, props,
//! panel_states, timestamp}` artifact.

use crate::MemoryStore;
use crate::error::MemoryError;
use crate::types::PanelPrefs;
use crate::types::SessionConfig;
use chrono::Utc;
use showroom_catalog::ComponentKey;
use std::collections::BTreeMap;

/// Build the export payload for the current session.
pub fn export_config(
    component: &ComponentKey,
    props: &BTreeMap<String, serde_json::Value>,
    panel_states: &PanelPrefs,
) -> SessionConfig {
    SessionConfig {
        component: component.to_string(),
        props: props.clone(),
        panel_states: panel_states.clone(),
        timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }
}

pub fn to_json(config: &SessionConfig) -> Result<String, MemoryError> {
    serde_json::to_string_pretty(config).map_err(|e| MemoryError::InvalidConfig(e.to_string()))
}

/// Parse an imported session config. Fails with `InvalidConfig` on
/// malformed input or an unparseable component key; no state is touched
/// on failure.
pub fn from_json(text: &str) -> Result<SessionConfig, MemoryError> {
    let config: SessionConfig =
        serde_json::from_str(text).map_err(|e| MemoryError::InvalidConfig(e.to_string()))?;
    if ComponentKey::parse(&config.component).is_none() {
        return Err(MemoryError::InvalidConfig(format!(
            "not a category/name key: {}",
            config.component
        )));
    }
    Ok(config)
}

impl MemoryStore {
    /// Apply an imported session: remember the props and panel states
    /// and move the last-used pointer. Called only after a successful
    /// parse, so current state is never half-updated.
    pub fn apply_imported(&self, config: &SessionConfig) -> Option<ComponentKey> {
        let key = ComponentKey::parse(&config.component)?;
        self.remember_properties(&key, &config.props);
        for (panel, visible) in &config.panel_states {
            self.remember_panel_state(panel, *visible);
        }
        self.record_usage(&key);
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemKvStore;
    use serde_json::json;

    #[test]
    fn export_import_round_trip() {
        let key = ComponentKey::new("atoms", "button");
        let mut props = BTreeMap::new();
        props.insert("variant".to_string(), json!("ghost"));
        let mut panels = PanelPrefs::new();
        panels.insert("props".to_string(), true);

        let exported = export_config(&key, &props, &panels);
        let text = to_json(&exported).unwrap();
        let imported = from_json(&text).unwrap();
        assert_eq!(imported, exported);

        // A fresh session reproduces selection and property values.
        let store = MemoryStore::open(Box::new(MemKvStore::new()));
        let restored = store.apply_imported(&imported).unwrap();
        assert_eq!(restored, key);
        assert_eq!(store.get_remembered(&key).get("variant"), Some(&json!("ghost")));
        assert_eq!(store.panel_states().get("props"), Some(&true));
        assert_eq!(store.last_used(), Some(key));
    }

    #[test]
    fn malformed_import_is_invalid_config() {
        assert!(matches!(
            from_json("{not json"),
            Err(MemoryError::InvalidConfig(_))
        ));
        let bad_key = r#"{"component":"noslash","props":{},"panel_states":{},"timestamp":"t"}"#;
        assert!(matches!(
            from_json(bad_key),
            Err(MemoryError::InvalidConfig(_))
        ));
    }
}
