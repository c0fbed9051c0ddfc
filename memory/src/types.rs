use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-component usage history. One record per component ever loaded;
/// `count` is monotonically non-decreasing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UsageRecord {
    pub category: String,
    pub name: String,
    pub count: u64,
    /// RFC3339; set on every load.
    pub last_used_at: Option<String>,
    pub total_time_ms: u64,
    /// RFC3339; set while the component is the active selection.
    pub session_start_at: Option<String>,
}

/// Property values a user previously set on a component, keyed by
/// `category/name`. Only deviations are stored, never defaults.
pub type RememberedProps = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// Panel visibility preferences keyed by panel id.
pub type PanelPrefs = BTreeMap<String, bool>;

/// Cross-session pointer to the most recently used component.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionPointer {
    pub last_component: Option<String>,
    /// RFC3339; when the pointer was last moved.
    pub updated_at: Option<String>,
}

/// A transferable snapshot of the current session: selected component,
/// its property values, and panel visibility. The export file payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub component: String,
    pub props: BTreeMap<String, serde_json::Value>,
    pub panel_states: PanelPrefs,
    /// RFC3339; when the snapshot was exported.
    pub timestamp: String,
}
