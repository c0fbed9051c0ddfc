/// Hand-maintained lookup tables feeding the index build. These are
/// configuration data tied to the catalog's naming conventions; the
/// scoring algorithm never reads them directly and they can be swapped
/// without touching it.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Name substring → extra purpose keywords indexed for the entry,
    /// e.g. anything containing `button` also answers to `click`.
    pub purpose_keywords: Vec<(String, Vec<String>)>,
    /// Names that get a priority boost because they are reached for
    /// constantly.
    pub common_components: Vec<String>,
    pub common_boost: i32,
    /// Category → base priority weight. Unlisted categories weigh 0.
    pub category_weights: Vec<(String, i32)>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            purpose_keywords: vec![
                ("button".into(), strings(&["click", "action", "submit"])),
                ("input".into(), strings(&["form", "field", "type", "text"])),
                ("switch".into(), strings(&["toggle", "on", "off", "state"])),
                ("toggle".into(), strings(&["switch", "on", "off"])),
                ("card".into(), strings(&["container", "panel", "surface"])),
                ("modal".into(), strings(&["dialog", "overlay", "popup"])),
                ("table".into(), strings(&["data", "grid", "rows"])),
                ("avatar".into(), strings(&["user", "profile", "image"])),
                ("badge".into(), strings(&["status", "label", "count"])),
                ("spinner".into(), strings(&["loading", "progress", "wait"])),
                ("select".into(), strings(&["dropdown", "menu", "options"])),
                ("tooltip".into(), strings(&["hint", "hover", "help"])),
            ],
            common_components: strings(&["button", "input", "card", "modal", "table", "select"]),
            common_boost: 10,
            category_weights: vec![
                ("atoms".into(), 30),
                ("molecules".into(), 20),
                ("organisms".into(), 10),
            ],
        }
    }
}

impl SearchConfig {
    pub fn category_weight(&self, category: &str) -> i32 {
        self.category_weights
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, w)| *w)
            .unwrap_or(0)
    }
}
