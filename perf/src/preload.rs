use showroom_catalog::ComponentKey;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Reports whether the main interaction loop is currently idle.
/// Preload work yields to foreground work: the queue is only drained
/// while this says so. The TUI answers "between input polls"; tests and
/// simple timers substitute their own notion of idle.
pub trait IdleScheduler: Send + Sync {
    fn is_idle(&self) -> bool;
}

/// Flip-a-flag scheduler for tests and headless callers.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    idle: AtomicBool,
}

impl ManualScheduler {
    pub fn new(idle: bool) -> Self {
        Self {
            idle: AtomicBool::new(idle),
        }
    }

    pub fn set_idle(&self, idle: bool) {
        self.idle.store(idle, Ordering::SeqCst);
    }
}

impl IdleScheduler for ManualScheduler {
    fn is_idle(&self) -> bool {
        self.idle.load(Ordering::SeqCst)
    }
}

/// FIFO queue of speculative loads, deduplicated by key. A key already
/// queued is not queued again; callers also skip keys already satisfied
/// by the descriptor cache.
#[derive(Debug, Default)]
pub struct PreloadQueue {
    queue: VecDeque<ComponentKey>,
    queued: HashSet<String>,
}

impl PreloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue unless already pending. Returns whether it was added.
    pub fn push(&mut self, key: ComponentKey) -> bool {
        if !self.queued.insert(key.to_string()) {
            return false;
        }
        self.queue.push_back(key);
        true
    }

    pub fn pop(&mut self) -> Option<ComponentKey> {
        let key = self.queue.pop_front()?;
        self.queued.remove(&key.to_string());
        Some(key)
    }

    /// Drop a pending preload, e.g. when a forced refresh for the same
    /// key makes it moot.
    pub fn cancel(&mut self, key: &ComponentKey) {
        let id = key.to_string();
        if self.queued.remove(&id) {
            self.queue.retain(|k| k.to_string() != id);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
