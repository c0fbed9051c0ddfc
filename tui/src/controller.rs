//! Playground controller: owns the wiring between search, catalog,
//! memory and the rendering surface, and interprets resolved commands.

use crate::command::Command;
use crate::command::PanelId;
use crate::surface::Clipboard;
use crate::surface::RenderSurface;
use showroom_catalog::ComponentKey;
use showroom_catalog::ConfigDescriptor;
use showroom_memory::MemoryStore;
use showroom_memory::session;
use showroom_perf::FrameBatcher;
use showroom_perf::IdleScheduler;
use showroom_perf::InstanceHandle;
use showroom_perf::OptimizedLoader;
use showroom_perf::PropertyUpdate;
use showroom_search::CatalogEntry;
use showroom_search::SearchIndex;
use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

const NOTICE_TTL: Duration = Duration::from_millis(2500);
const RECENCY_CAP: usize = 10;
const PRELOAD_BUDGET: usize = 4;

#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub failure: bool,
    raised_at: Instant,
}

pub struct PlaygroundController {
    index: SearchIndex,
    visible: Vec<CatalogEntry>,
    selected: usize,
    filter: String,
    search_focused: bool,
    /// Focusing the search field selects its contents; the next typed
    /// character replaces the filter instead of appending.
    search_select_all: bool,
    help_visible: bool,
    panels: BTreeMap<String, bool>,
    optimizer: OptimizedLoader,
    memory: MemoryStore,
    surface: Box<dyn RenderSurface>,
    clipboard: Box<dyn Clipboard>,
    batcher: FrameBatcher,
    descriptor: Option<Arc<ConfigDescriptor>>,
    props: BTreeMap<String, serde_json::Value>,
    instance: Option<InstanceHandle>,
    recency: VecDeque<ComponentKey>,
    generation: u64,
    selection_started: Option<Instant>,
    notice: Option<Notice>,
    quit: bool,
}

impl PlaygroundController {
    pub fn new(
        index: SearchIndex,
        optimizer: OptimizedLoader,
        memory: MemoryStore,
        surface: Box<dyn RenderSurface>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let visible = index.entries().to_vec();
        let mut panels = BTreeMap::new();
        panels.insert(PanelId::Properties.storage_key().to_string(), true);
        panels.insert(PanelId::Code.storage_key().to_string(), true);
        Self {
            index,
            visible,
            selected: 0,
            filter: String::new(),
            search_focused: false,
            search_select_all: false,
            help_visible: false,
            panels,
            optimizer,
            memory,
            surface,
            clipboard,
            batcher: FrameBatcher::new(),
            descriptor: None,
            props: BTreeMap::new(),
            instance: None,
            recency: VecDeque::new(),
            generation: 0,
            selection_started: None,
            notice: None,
            quit: false,
        }
    }

    /// Reapply stored panel visibility, then re-select the last-used
    /// component if one is recorded. Called once after the shell is up.
    pub fn restore_session(&mut self) {
        let restore = self.memory.restore_session();
        for (panel, visible) in restore.panels {
            self.panels.insert(panel, visible);
        }
        if let Some(key) = restore.last_component {
            self.select_key(&key);
        }
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::JumpTo(n) => self.jump(n),
            Command::PrevComponent => self.step(-1),
            Command::NextComponent => self.step(1),
            Command::TogglePanel(panel) => self.toggle_panel(panel),
            Command::FocusSearch => self.focus_search(),
            Command::Escape => self.escape(),
            Command::CopyCode => self.copy_code(),
            Command::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }
            Command::ExportSession => {
                self.export_session(Path::new("showroom-session.json"));
            }
            Command::ImportSession => {
                self.import_session(Path::new("showroom-session.json"));
            }
            Command::RecentComponent => self.jump_recent(),
            Command::Quit => self.quit = true,
        }
    }

    // --- search -----------------------------------------------------

    pub fn set_filter(&mut self, text: &str) {
        let started = Instant::now();
        self.filter = text.to_string();
        self.visible = self.index.query(&self.filter);
        self.selected = 0;
        self.optimizer
            .metrics()
            .record_search(started.elapsed().as_millis() as u64);
    }

    pub fn push_search_char(&mut self, c: char) {
        if self.search_select_all {
            self.filter.clear();
            self.search_select_all = false;
        }
        let mut next = self.filter.clone();
        next.push(c);
        self.set_filter(&next);
    }

    pub fn pop_search_char(&mut self) {
        self.search_select_all = false;
        let mut next = self.filter.clone();
        next.pop();
        self.set_filter(&next);
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
        self.search_select_all = false;
    }

    fn focus_search(&mut self) {
        self.search_focused = true;
        self.search_select_all = true;
    }

    fn escape(&mut self) {
        if self.help_visible {
            self.help_visible = false;
        } else if self.search_focused {
            self.blur_search();
            self.set_filter("");
        }
    }

    // --- navigation -------------------------------------------------

    fn jump(&mut self, n: usize) {
        if n < self.visible.len() {
            let key = self.visible[n].key();
            self.select_key(&key);
        } else {
            self.fail(format!("no entry #{}", n + 1));
        }
    }

    fn step(&mut self, delta: i64) {
        if self.visible.is_empty() {
            self.fail("catalog is empty");
            return;
        }
        let len = self.visible.len() as i64;
        let next = (self.selected as i64 + delta).rem_euclid(len) as usize;
        let key = self.visible[next].key();
        self.select_key(&key);
    }

    fn jump_recent(&mut self) {
        // Ring entry 0 is the current component; 1 is the previous.
        if let Some(previous) = self.recency.get(1).cloned() {
            self.select_key(&previous);
        } else {
            self.fail("no previous component");
        }
    }

    // --- selection --------------------------------------------------

    pub fn select_key(&mut self, key: &ComponentKey) {
        let generation = self.begin_selection(key);
        let descriptor = match self.optimizer.load(key) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                self.fail(format!("{e}"));
                Arc::new(ConfigDescriptor::placeholder(key, &e.to_string()))
            }
        };
        self.apply_loaded(generation, key, descriptor);
    }

    /// Start a new selection and return its generation stamp. Loads
    /// finishing under an older stamp are cached but never applied to
    /// the surface.
    fn begin_selection(&mut self, key: &ComponentKey) -> u64 {
        if let (Some(current), Some(started)) = (self.selected_key(), self.selection_started) {
            self.memory
                .record_session_time(&current, started.elapsed().as_millis() as u64);
        }
        self.generation += 1;
        self.selected = self
            .visible
            .iter()
            .position(|e| &e.key() == key)
            .unwrap_or(self.selected);
        self.generation
    }

    fn apply_loaded(
        &mut self,
        generation: u64,
        key: &ComponentKey,
        descriptor: Arc<ConfigDescriptor>,
    ) {
        if generation != self.generation {
            tracing::debug!("stale load for {key} dropped before render");
            return;
        }
        // Placeholder descriptors stand in for failed loads; those do
        // not count as usage and must not move the last-used pointer.
        if !descriptor.error {
            self.memory.record_usage(key);
        }
        self.props = self.memory.smart_defaults(key, &descriptor.defaults());
        let handle = match self.instantiate(&descriptor) {
            Some(handle) => handle,
            None => return,
        };
        self.instance = Some(handle);
        for (name, value) in self.props.clone() {
            self.batcher.push(PropertyUpdate {
                handle,
                name,
                value,
            });
        }
        self.flush_frame();
        self.descriptor = Some(descriptor);
        self.selection_started = Some(Instant::now());
        self.remember_recent(key);
        self.optimizer.schedule_neighbors(&self.visible_keys(), self.selected);
        if !self.descriptor.as_ref().map(|d| d.error).unwrap_or(false) {
            self.succeed(format!("selected {key}"));
        }
    }

    fn instantiate(&mut self, descriptor: &ConfigDescriptor) -> Option<InstanceHandle> {
        match self.surface.instantiate(&descriptor.unit_id) {
            Ok(handle) => Some(handle),
            Err(e) => {
                self.fail(format!("render failed: {e}"));
                None
            }
        }
    }

    fn remember_recent(&mut self, key: &ComponentKey) {
        self.recency.retain(|k| k != key);
        self.recency.push_front(key.clone());
        self.recency.truncate(RECENCY_CAP);
    }

    // --- property editing -------------------------------------------

    /// Stage a property edit. Writes are coalesced per frame and the
    /// deviation is persisted for the next session.
    pub fn set_property(&mut self, name: &str, value: serde_json::Value) {
        let Some(handle) = self.instance else {
            self.fail("nothing selected");
            return;
        };
        self.props.insert(name.to_string(), value.clone());
        if let Some(key) = self.selected_key() {
            let mut single = BTreeMap::new();
            single.insert(name.to_string(), value.clone());
            self.memory.remember_properties(&key, &single);
        }
        self.batcher.push(PropertyUpdate {
            handle,
            name: name.to_string(),
            value,
        });
    }

    /// Apply all staged updates in one paint-aligned pass.
    pub fn flush_frame(&mut self) {
        for update in self.batcher.flush() {
            if let Err(e) = self
                .surface
                .set_property(update.handle, &update.name, &update.value)
            {
                tracing::warn!("surface write for {} failed: {e}", update.name);
            }
        }
    }

    // --- commands with side effects ---------------------------------

    fn toggle_panel(&mut self, panel: PanelId) {
        let key = panel.storage_key();
        let next = !self.panels.get(key).copied().unwrap_or(true);
        self.panels.insert(key.to_string(), next);
        self.memory.remember_panel_state(key, next);
        let state = if next { "shown" } else { "hidden" };
        self.succeed(format!("{key} panel {state}"));
    }

    fn copy_code(&mut self) {
        let Some(snippet) = self.generated_code() else {
            self.fail("nothing to copy");
            return;
        };
        match self.clipboard.set_text(snippet) {
            Ok(()) => self.succeed("code copied"),
            Err(e) => self.fail(format!("copy failed: {e}")),
        }
    }

    /// Usage snippet for the current selection, rendered from the live
    /// property values.
    pub fn generated_code(&self) -> Option<String> {
        let descriptor = self.descriptor.as_ref()?;
        let tag: String = descriptor
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .concat();
        let mut attrs = String::new();
        for (name, value) in &self.props {
            if value.is_null() {
                continue;
            }
            match value {
                serde_json::Value::String(s) => {
                    attrs.push_str(&format!(" {name}=\"{s}\""));
                }
                other => attrs.push_str(&format!(" {name}={{{other}}}")),
            }
        }
        Some(format!("<{tag}{attrs} />"))
    }

    pub fn export_session(&mut self, path: &Path) {
        let Some(key) = self.selected_key() else {
            self.fail("nothing selected to export");
            return;
        };
        let config = session::export_config(&key, &self.props, &self.memory.panel_states());
        let result = session::to_json(&config)
            .map_err(anyhow::Error::from)
            .and_then(|text| std::fs::write(path, text).map_err(anyhow::Error::from));
        match result {
            Ok(()) => self.succeed(format!("session exported to {}", path.display())),
            Err(e) => self.fail(format!("export failed: {e}")),
        }
    }

    /// Import a session file. A parse failure leaves every piece of
    /// current state untouched.
    pub fn import_session(&mut self, path: &Path) {
        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| session::from_json(&text).map_err(anyhow::Error::from));
        let config = match parsed {
            Ok(config) => config,
            Err(e) => {
                self.fail(format!("import failed: {e}"));
                return;
            }
        };
        if let Some(key) = self.memory.apply_imported(&config) {
            for (panel, visible) in &config.panel_states {
                self.panels.insert(panel.clone(), *visible);
            }
            // An active filter may hide the imported component; the
            // selection must land on a visible entry.
            if !self.filter.is_empty() {
                self.filter.clear();
                self.visible = self.index.query("");
                self.selected = 0;
            }
            self.select_key(&key);
            self.succeed(format!("session imported: {key}"));
        }
    }

    // --- background work --------------------------------------------

    /// Run queued preloads while idle. Called from the event loop when
    /// no input is pending.
    pub fn on_idle(&self, scheduler: &dyn IdleScheduler) {
        self.optimizer.drain_preloads(scheduler, PRELOAD_BUDGET);
    }

    /// Hover or near-viewport hint for a visible entry.
    pub fn preload_hint(&self, index: usize) {
        if let Some(entry) = self.visible.get(index) {
            self.optimizer.preload_hint(&entry.key());
        }
    }

    pub fn save(&mut self) {
        if let Err(e) = self.memory.save_all() {
            tracing::warn!("autosave failed: {e}");
        }
    }

    // --- notices ----------------------------------------------------

    fn succeed(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            failure: false,
            raised_at: Instant::now(),
        });
    }

    fn fail(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            failure: true,
            raised_at: Instant::now(),
        });
    }

    /// Current notice, if it has not auto-dismissed yet.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| n.raised_at.elapsed() < NOTICE_TTL)
    }

    // --- read accessors for rendering -------------------------------

    pub fn visible(&self) -> &[CatalogEntry] {
        &self.visible
    }

    fn visible_keys(&self) -> Vec<ComponentKey> {
        self.visible.iter().map(CatalogEntry::key).collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_key(&self) -> Option<ComponentKey> {
        self.visible.get(self.selected).map(CatalogEntry::key)
    }

    pub fn descriptor(&self) -> Option<&ConfigDescriptor> {
        self.descriptor.as_deref()
    }

    pub fn props(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.props
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn panel_visible(&self, panel: PanelId) -> bool {
        self.panels.get(panel.storage_key()).copied().unwrap_or(true)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn stats(&self) -> serde_json::Value {
        serde_json::json!({
            "perf": self.optimizer.stats(),
            "memory": self.memory.stats(),
        })
    }
}
