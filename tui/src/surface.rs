//! Ports the controller drives: the rendering surface that hosts live
//! component instances, and the system clipboard.

use showroom_perf::InstanceHandle;
use std::sync::Arc;
use std::sync::Mutex;

/// Host for live component instances. The terminal build renders a
/// textual mock-up; an embedding GUI supplies its own implementation.
pub trait RenderSurface: Send {
    fn instantiate(&mut self, unit_id: &str) -> anyhow::Result<InstanceHandle>;
    fn set_property(
        &mut self,
        handle: InstanceHandle,
        name: &str,
        value: &serde_json::Value,
    ) -> anyhow::Result<()>;
}

/// Records every call; the terminal preview and the tests both read it
/// back instead of painting pixels.
#[derive(Default)]
pub struct RecordingSurface {
    next_handle: InstanceHandle,
    pub instantiated: Vec<(InstanceHandle, String)>,
    pub property_writes: Vec<(InstanceHandle, String, serde_json::Value)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for RecordingSurface {
    fn instantiate(&mut self, unit_id: &str) -> anyhow::Result<InstanceHandle> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.instantiated.push((handle, unit_id.to_string()));
        Ok(handle)
    }

    fn set_property(
        &mut self,
        handle: InstanceHandle,
        name: &str,
        value: &serde_json::Value,
    ) -> anyhow::Result<()> {
        self.property_writes
            .push((handle, name.to_string(), value.clone()));
        Ok(())
    }
}

/// Shared handle so a test can keep inspecting a surface it has handed
/// to the controller.
impl RenderSurface for Arc<Mutex<RecordingSurface>> {
    fn instantiate(&mut self, unit_id: &str) -> anyhow::Result<InstanceHandle> {
        self.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .instantiate(unit_id)
    }

    fn set_property(
        &mut self,
        handle: InstanceHandle,
        name: &str,
        value: &serde_json::Value,
    ) -> anyhow::Result<()> {
        self.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .set_property(handle, name, value)
    }
}

pub trait Clipboard: Send {
    fn set_text(&mut self, text: String) -> anyhow::Result<()>;
}

/// System clipboard via arboard. Construction is lazy so headless
/// sessions only fail when a copy is actually attempted.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: String) -> anyhow::Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(text)?;
        }
        Ok(())
    }
}

/// Test double capturing copied text, or failing on demand. Clones
/// share the captured buffer.
#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub copied: Arc<Mutex<Vec<String>>>,
    pub deny: bool,
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: String) -> anyhow::Result<()> {
        if self.deny {
            anyhow::bail!("clipboard access denied");
        }
        self.copied
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(text);
        Ok(())
    }
}
