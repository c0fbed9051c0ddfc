//! Performance layer over the catalog loader: bounded FIFO caches, an
//! idle-time preload queue, frame-aligned update batching, and soft
//! latency tracking.
//!
//! The layer is best-effort by contract: every failure inside it
//! degrades to the unwrapped loader. Speed is optional, correctness is
//! not.

pub mod batch;
pub mod cache;
pub mod metrics;
pub mod preload;

pub use batch::FrameBatcher;
pub use batch::InstanceHandle;
pub use batch::PropertyUpdate;
pub use cache::FifoCache;
pub use metrics::Metrics;
pub use metrics::SloTargets;
pub use preload::IdleScheduler;
pub use preload::ManualScheduler;
pub use preload::PreloadQueue;

use showroom_catalog::CatalogError;
use showroom_catalog::ComponentKey;
use showroom_catalog::ConfigDescriptor;
use showroom_catalog::Loader;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct PerfConfig {
    pub descriptor_capacity: usize,
    pub instance_capacity: usize,
    pub slo: SloTargets,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            descriptor_capacity: 50,
            instance_capacity: 20,
            slo: SloTargets::default(),
        }
    }
}

/// Caching, preloading wrapper around [`Loader`].
pub struct OptimizedLoader {
    inner: Arc<Loader>,
    descriptors: Mutex<FifoCache<String, Arc<ConfigDescriptor>>>,
    instances: Mutex<FifoCache<(String, String), InstanceHandle>>,
    queue: Mutex<PreloadQueue>,
    metrics: Metrics,
}

impl OptimizedLoader {
    pub fn new(inner: Arc<Loader>) -> Self {
        Self::with_config(inner, PerfConfig::default())
    }

    pub fn with_config(inner: Arc<Loader>, config: PerfConfig) -> Self {
        Self {
            inner,
            descriptors: Mutex::new(FifoCache::new(config.descriptor_capacity)),
            instances: Mutex::new(FifoCache::new(config.instance_capacity)),
            queue: Mutex::new(PreloadQueue::new()),
            metrics: Metrics::new(config.slo),
        }
    }

    fn descriptors_guard(&self) -> MutexGuard<'_, FifoCache<String, Arc<ConfigDescriptor>>> {
        self.descriptors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn instances_guard(&self) -> MutexGuard<'_, FifoCache<(String, String), InstanceHandle>> {
        self.instances
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn queue_guard(&self) -> MutexGuard<'_, PreloadQueue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// User-triggered load. Cache hits return immediately; misses
    /// delegate to the wrapped loader and cache the result. Loader
    /// errors pass through untouched: this layer only ever adds speed.
    pub fn load(&self, key: &ComponentKey) -> Result<Arc<ConfigDescriptor>, CatalogError> {
        let started = Instant::now();
        if let Some(cached) = self.descriptors_guard().get(&key.to_string()) {
            let descriptor = Arc::clone(cached);
            self.metrics.record_load(started.elapsed().as_millis() as u64);
            return Ok(descriptor);
        }
        let descriptor = self.inner.load(key)?;
        self.descriptors_guard()
            .insert(key.to_string(), Arc::clone(&descriptor));
        self.metrics.record_load(started.elapsed().as_millis() as u64);
        Ok(descriptor)
    }

    /// Forced refresh. The refreshed descriptor overwrites this layer's
    /// cache entry before the call returns, and any queued preload for
    /// the same key is cancelled: a refresh is always more
    /// authoritative than a preload.
    pub fn reload(&self, key: &ComponentKey) -> Result<Arc<ConfigDescriptor>, CatalogError> {
        self.queue_guard().cancel(key);
        let descriptor = self.inner.reload(key)?;
        self.descriptors_guard()
            .insert(key.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    pub fn is_cached(&self, key: &ComponentKey) -> bool {
        self.descriptors_guard().contains(&key.to_string())
    }

    /// Queue the immediate neighbors of the current selection in the
    /// visible, filtered list. Called after every successful load.
    pub fn schedule_neighbors(&self, visible: &[ComponentKey], current: usize) {
        if visible.is_empty() {
            return;
        }
        let mut neighbors = Vec::new();
        if current > 0 {
            neighbors.push(visible[current - 1].clone());
        }
        if current + 1 < visible.len() {
            neighbors.push(visible[current + 1].clone());
        }
        for key in neighbors {
            self.preload_hint(&key);
        }
    }

    /// Hover or near-viewport visibility hint: queue a speculative load
    /// unless the key is already cached or already queued.
    pub fn preload_hint(&self, key: &ComponentKey) {
        if self.is_cached(key) {
            return;
        }
        if self.queue_guard().push(key.clone()) {
            tracing::debug!("perf: queued preload for {key}");
        }
    }

    /// Drain up to `budget` queued preloads while the scheduler reports
    /// idle. Preload failures are logged and swallowed; background work
    /// never surfaces errors. Returns how many descriptors were warmed.
    pub fn drain_preloads(&self, scheduler: &dyn IdleScheduler, budget: usize) -> usize {
        let mut warmed = 0;
        while warmed < budget && scheduler.is_idle() {
            let Some(key) = self.queue_guard().pop() else {
                break;
            };
            // A refresh or user load may have satisfied it meanwhile.
            if self.is_cached(&key) {
                continue;
            }
            match self.inner.load(&key) {
                Ok(descriptor) => {
                    self.descriptors_guard().insert(key.to_string(), descriptor);
                    warmed += 1;
                }
                Err(e) => tracing::debug!("perf: preload of {key} failed: {e}"),
            }
        }
        warmed
    }

    pub fn pending_preloads(&self) -> usize {
        self.queue_guard().len()
    }

    /// Rendered-instance cache, keyed by `(unit_id, serialized props)`.
    pub fn cached_instance(&self, unit_id: &str, props_json: &str) -> Option<InstanceHandle> {
        self.instances_guard()
            .get(&(unit_id.to_string(), props_json.to_string()))
            .copied()
    }

    pub fn remember_instance(&self, unit_id: &str, props_json: &str, handle: InstanceHandle) {
        self.instances_guard()
            .insert((unit_id.to_string(), props_json.to_string()), handle);
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn stats(&self) -> serde_json::Value {
        let descriptors = self.descriptors_guard();
        let instances = self.instances_guard();
        serde_json::json!({
            "descriptor_cache": {
                "len": descriptors.len(),
                "capacity": descriptors.capacity(),
                "hits": descriptors.hits(),
                "misses": descriptors.misses(),
            },
            "instance_cache": {
                "len": instances.len(),
                "capacity": instances.capacity(),
                "hits": instances.hits(),
                "misses": instances.misses(),
            },
            "pending_preloads": self.queue_guard().len(),
            "durations": self.metrics.summary(),
        })
    }
}
