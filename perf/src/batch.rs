use std::sync::Mutex;
use std::sync::MutexGuard;

/// Handle to an instantiated unit on the rendering surface.
pub type InstanceHandle = u64;

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyUpdate {
    pub handle: InstanceHandle,
    pub name: String,
    pub value: serde_json::Value,
}

/// Coalesces surface-affecting updates into a single flush per frame.
/// Repeated writes to the same `(handle, property)` within a frame keep
/// only the last value; the render loop drains once per tick instead of
/// applying each update immediately.
#[derive(Default)]
pub struct FrameBatcher {
    pending: Mutex<Vec<PropertyUpdate>>,
}

impl FrameBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<PropertyUpdate>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, update: PropertyUpdate) {
        let mut pending = self.guard();
        if let Some(existing) = pending
            .iter_mut()
            .find(|u| u.handle == update.handle && u.name == update.name)
        {
            existing.value = update.value;
            return;
        }
        pending.push(update);
    }

    /// Take everything queued for this frame.
    pub fn flush(&self) -> Vec<PropertyUpdate> {
        std::mem::take(&mut *self.guard())
    }

    pub fn pending(&self) -> usize {
        self.guard().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(handle: u64, name: &str, value: serde_json::Value) -> PropertyUpdate {
        PropertyUpdate {
            handle,
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn coalesces_same_property_within_a_frame() {
        let batcher = FrameBatcher::new();
        batcher.push(update(1, "variant", json!("primary")));
        batcher.push(update(1, "variant", json!("ghost")));
        batcher.push(update(1, "size", json!("large")));
        let flushed = batcher.flush();
        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed[0].value, json!("ghost"));
    }

    #[test]
    fn flush_empties_the_batch() {
        let batcher = FrameBatcher::new();
        batcher.push(update(1, "size", json!("small")));
        assert_eq!(batcher.flush().len(), 1);
        assert!(batcher.flush().is_empty());
    }

    #[test]
    fn different_handles_stay_separate() {
        let batcher = FrameBatcher::new();
        batcher.push(update(1, "variant", json!("a")));
        batcher.push(update(2, "variant", json!("b")));
        assert_eq!(batcher.pending(), 2);
    }
}
