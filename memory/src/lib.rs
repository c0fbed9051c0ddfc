//! Session-surviving usage memory for the playground: per-component
//! usage counts, remembered property deviations, panel visibility, and
//! the last-used pointer for cross-session restore.
//!
//! One `MemoryStore` is constructed per controller with an injected
//! persistence port; there are no ambient singletons.

pub mod defaults;
pub mod error;
pub mod session;
pub mod store;
pub mod types;

pub use defaults::SuggestedDefaults;
pub use error::MemoryError;
pub use store::KvStore;
pub use store::fs::FileKvStore;
pub use store::mem::MemKvStore;
pub use types::PanelPrefs;
pub use types::RememberedProps;
pub use types::SessionConfig;
pub use types::SessionPointer;
pub use types::UsageRecord;

use chrono::Utc;
use serde::de::DeserializeOwned;
use showroom_catalog::ComponentKey;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

const KEY_USAGE: &str = "usage";
const KEY_PROPS: &str = "props";
const KEY_PANELS: &str = "panels";
const KEY_SESSION: &str = "session";

/// Autosave cadence expected from the owning scheduler.
pub const AUTOSAVE_INTERVAL_SECS: u64 = 30;

#[derive(Default)]
struct Dirty {
    usage: bool,
    props: bool,
    panels: bool,
    session: bool,
}

struct Inner {
    usage: BTreeMap<String, UsageRecord>,
    props: RememberedProps,
    panels: PanelPrefs,
    session: SessionPointer,
    dirty: Dirty,
}

/// Panel and selection state handed back to the controller at startup.
#[derive(Clone, Debug, Default)]
pub struct SessionRestore {
    pub panels: PanelPrefs,
    pub last_component: Option<ComponentKey>,
}

/// The usage memory store. All persisted state flows through the
/// injected [`KvStore`]; each of the four categories (usage, props,
/// panels, session pointer) is serialized whole on save so a write is
/// never partial.
pub struct MemoryStore {
    kv: Box<dyn KvStore>,
    suggested: SuggestedDefaults,
    inner: Mutex<Inner>,
    saving: AtomicBool,
}

impl MemoryStore {
    /// Open the store, reading all four categories. Corrupt or
    /// unreadable data is logged and replaced with an empty-but-valid
    /// structure; startup never fails on bad persisted state.
    pub fn open(kv: Box<dyn KvStore>) -> Self {
        Self::with_defaults(kv, SuggestedDefaults::default())
    }

    pub fn with_defaults(kv: Box<dyn KvStore>, suggested: SuggestedDefaults) -> Self {
        let usage = load_category(kv.as_ref(), KEY_USAGE);
        let props = load_category(kv.as_ref(), KEY_PROPS);
        let panels = load_category(kv.as_ref(), KEY_PANELS);
        let session = load_category(kv.as_ref(), KEY_SESSION);
        Self {
            kv,
            suggested,
            inner: Mutex::new(Inner {
                usage,
                props,
                panels,
                session,
                dirty: Dirty::default(),
            }),
            saving: AtomicBool::new(false),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Count a load of `key`: bumps the monotonic counter, stamps
    /// `last_used_at`, starts the per-session clock, and marks the
    /// component as most recent for cross-session restore.
    pub fn record_usage(&self, key: &ComponentKey) {
        let now = now_rfc3339();
        let mut inner = self.guard();
        let record = inner
            .usage
            .entry(key.to_string())
            .or_insert_with(|| UsageRecord {
                category: key.category.clone(),
                name: key.name.clone(),
                ..UsageRecord::default()
            });
        record.count += 1;
        record.last_used_at = Some(now.clone());
        record.session_start_at = Some(now.clone());
        inner.session.last_component = Some(key.to_string());
        inner.session.updated_at = Some(now);
        inner.dirty.usage = true;
        inner.dirty.session = true;
    }

    /// Close the per-session clock for `key`, folding the elapsed time
    /// into `total_time_ms`.
    pub fn record_session_time(&self, key: &ComponentKey, elapsed_ms: u64) {
        let mut inner = self.guard();
        if let Some(record) = inner.usage.get_mut(&key.to_string()) {
            record.total_time_ms += elapsed_ms;
            record.session_start_at = None;
            inner.dirty.usage = true;
        }
    }

    /// Merge property deviations for `key`. Null and empty-string
    /// values are dropped before the merge; defaults are never
    /// persisted, only deviations reported by a completed
    /// property-change event.
    pub fn remember_properties(
        &self,
        key: &ComponentKey,
        props: &BTreeMap<String, serde_json::Value>,
    ) {
        let kept: BTreeMap<String, serde_json::Value> = props
            .iter()
            .filter(|(_, v)| !is_empty_value(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if kept.is_empty() {
            return;
        }
        let mut inner = self.guard();
        let slot = inner.props.entry(key.to_string()).or_default();
        for (name, value) in kept {
            slot.insert(name, value);
        }
        inner.dirty.props = true;
    }

    /// Reset action: forget every remembered value for `key`.
    pub fn reset_properties(&self, key: &ComponentKey) {
        let mut inner = self.guard();
        if inner.props.remove(&key.to_string()).is_some() {
            inner.dirty.props = true;
        }
    }

    /// Remembered deviations for `key`; empty when nothing is stored.
    pub fn get_remembered(&self, key: &ComponentKey) -> BTreeMap<String, serde_json::Value> {
        self.guard()
            .props
            .get(&key.to_string())
            .cloned()
            .unwrap_or_default()
    }

    pub fn remember_panel_state(&self, panel_id: &str, visible: bool) {
        let mut inner = self.guard();
        inner.panels.insert(panel_id.to_string(), visible);
        inner.dirty.panels = true;
    }

    pub fn panel_states(&self) -> PanelPrefs {
        self.guard().panels.clone()
    }

    pub fn usage_for(&self, key: &ComponentKey) -> Option<UsageRecord> {
        self.guard().usage.get(&key.to_string()).cloned()
    }

    pub fn last_used(&self) -> Option<ComponentKey> {
        self.guard()
            .session
            .last_component
            .as_deref()
            .and_then(ComponentKey::parse)
    }

    /// Startup restore data: stored panel visibility plus the last-used
    /// component. The controller reapplies panels immediately and
    /// re-selects the component once the shell has finished mounting.
    pub fn restore_session(&self) -> SessionRestore {
        let inner = self.guard();
        SessionRestore {
            panels: inner.panels.clone(),
            last_component: inner
                .session
                .last_component
                .as_deref()
                .and_then(ComponentKey::parse),
        }
    }

    /// Opening property values for `key`: remembered deviations win
    /// over declared defaults when the component has prior usage;
    /// otherwise the suggested-defaults table applies.
    pub fn smart_defaults(
        &self,
        key: &ComponentKey,
        declared: &BTreeMap<String, serde_json::Value>,
    ) -> BTreeMap<String, serde_json::Value> {
        let mut merged = declared.clone();
        let has_history = self.usage_for(key).map(|r| r.count > 0).unwrap_or(false);
        let overlay = if has_history {
            self.get_remembered(key)
        } else {
            self.suggested.for_name(&key.name)
        };
        for (name, value) in overlay {
            merged.insert(name, value);
        }
        merged
    }

    /// Persist every dirty category, each serialized whole. A save
    /// requested while one is in flight coalesces into a no-op instead
    /// of queueing.
    pub fn save_all(&self) -> Result<(), MemoryError> {
        if self.saving.swap(true, Ordering::SeqCst) {
            tracing::debug!("memory: save already in flight, coalescing");
            return Ok(());
        }
        let result = self.flush_dirty();
        self.saving.store(false, Ordering::SeqCst);
        result
    }

    fn flush_dirty(&self) -> Result<(), MemoryError> {
        // Serialize under the lock, write after releasing it.
        let mut writes: Vec<(&str, String)> = Vec::new();
        {
            let mut inner = self.guard();
            if inner.dirty.usage {
                writes.push((KEY_USAGE, encode(&inner.usage)?));
            }
            if inner.dirty.props {
                writes.push((KEY_PROPS, encode(&inner.props)?));
            }
            if inner.dirty.panels {
                writes.push((KEY_PANELS, encode(&inner.panels)?));
            }
            if inner.dirty.session {
                writes.push((KEY_SESSION, encode(&inner.session)?));
            }
            inner.dirty = Dirty::default();
        }
        for (key, value) in writes {
            self.kv.set(key, &value)?;
        }
        Ok(())
    }

    /// Explicit "clear memory": drops all in-memory state and removes
    /// the persisted categories.
    pub fn clear_all(&self) -> Result<(), MemoryError> {
        {
            let mut inner = self.guard();
            inner.usage.clear();
            inner.props.clear();
            inner.panels.clear();
            inner.session = SessionPointer::default();
            inner.dirty = Dirty::default();
        }
        for key in [KEY_USAGE, KEY_PROPS, KEY_PANELS, KEY_SESSION] {
            self.kv.remove(key)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> serde_json::Value {
        let inner = self.guard();
        let total_loads: u64 = inner.usage.values().map(|r| r.count).sum();
        let total_time_ms: u64 = inner.usage.values().map(|r| r.total_time_ms).sum();
        serde_json::json!({
            "components_used": inner.usage.len(),
            "total_loads": total_loads,
            "total_time_ms": total_time_ms,
            "remembered_components": inner.props.len(),
            "panels": inner.panels.len(),
            "last_component": inner.session.last_component,
        })
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, MemoryError> {
    serde_json::to_string(value).map_err(|e| MemoryError::InvalidConfig(e.to_string()))
}

fn load_category<T: DeserializeOwned + Default>(kv: &dyn KvStore, key: &str) -> T {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("memory: reading {key} failed, starting empty: {e}");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            let err = MemoryError::StorageCorrupt {
                key: key.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!("memory: {err}; reinitializing");
            T::default()
        }
    }
}
