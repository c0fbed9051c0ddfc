use crate::descriptor::ConfigDescriptor;
use crate::descriptor::ControlKind;
use crate::descriptor::DeclaredType;
use crate::descriptor::PropertySpec;
use crate::descriptor::Unit;
use crate::descriptor::human_title;
use crate::error::CatalogError;
use crate::error::ResolveError;
use crate::key::ComponentKey;
use serde_json::json;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// Resolves a `(category, name)` pair to its instantiable unit. This is
/// the seam to the component library itself; the playground only ever
/// sees units through it.
pub trait UnitResolver: Send + Sync {
    fn resolve(&self, key: &ComponentKey) -> Result<Unit, ResolveError>;
}

/// Rules for auto-deriving a descriptor when none is hand-authored.
/// Plain data so naming-convention specifics stay out of the loader.
#[derive(Clone, Debug)]
pub struct SynthesisConfig {
    /// Generically useful properties unioned into every schema unless
    /// the unit already declares them. `(name, control, default)`.
    pub generic_props: Vec<(String, ControlKind, serde_json::Value)>,
    /// Property names that receive curated `Select` controls with
    /// catalog-wide option lists, e.g. `variant` and `size`.
    pub curated_selects: Vec<(String, Vec<String>)>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            generic_props: vec![
                ("disabled".into(), ControlKind::Boolean, json!(false)),
                ("class_name".into(), ControlKind::Text, json!("")),
                ("id".into(), ControlKind::Text, json!("")),
            ],
            curated_selects: vec![
                (
                    "variant".into(),
                    vec![
                        "primary".into(),
                        "secondary".into(),
                        "outline".into(),
                        "ghost".into(),
                        "danger".into(),
                    ],
                ),
                (
                    "size".into(),
                    vec!["small".into(), "medium".into(), "large".into()],
                ),
            ],
        }
    }
}

/// Memoizing descriptor loader over a [`UnitResolver`].
///
/// First request per key resolves the unit and obtains or synthesizes a
/// descriptor; repeated requests return the cached `Arc` without a
/// second resolution. [`Loader::reload`] bypasses the cache and
/// overwrites the entry before returning.
pub struct Loader {
    resolver: Arc<dyn UnitResolver>,
    synthesis: SynthesisConfig,
    cache: Mutex<HashMap<String, Arc<ConfigDescriptor>>>,
}

impl Loader {
    pub fn new(resolver: Arc<dyn UnitResolver>) -> Self {
        Self::with_config(resolver, SynthesisConfig::default())
    }

    pub fn with_config(resolver: Arc<dyn UnitResolver>, synthesis: SynthesisConfig) -> Self {
        Self {
            resolver,
            synthesis,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache_guard(&self) -> MutexGuard<'_, HashMap<String, Arc<ConfigDescriptor>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load the descriptor for `key`, memoized by `category/name`.
    pub fn load(&self, key: &ComponentKey) -> Result<Arc<ConfigDescriptor>, CatalogError> {
        if let Some(cached) = self.cache_guard().get(&key.to_string()) {
            return Ok(Arc::clone(cached));
        }
        let descriptor = Arc::new(self.fetch(key)?);
        self.cache_guard()
            .insert(key.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Forced refresh: re-resolve and overwrite the cache entry before
    /// the result is handed back, so no caller ever observes the stale
    /// descriptor after an explicit reload.
    pub fn reload(&self, key: &ComponentKey) -> Result<Arc<ConfigDescriptor>, CatalogError> {
        let descriptor = Arc::new(self.fetch(key)?);
        self.cache_guard()
            .insert(key.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Like [`Loader::load`] but degrades a resolution failure into a
    /// placeholder descriptor with `error: true`. Placeholders are not
    /// cached; the next attempt resolves again.
    pub fn load_or_placeholder(&self, key: &ComponentKey) -> Arc<ConfigDescriptor> {
        match self.load(key) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::warn!("catalog: degraded load for {key}: {err}");
                Arc::new(ConfigDescriptor::placeholder(key, &err.to_string()))
            }
        }
    }

    /// Cached descriptor for `key`, if one has been produced.
    pub fn cached(&self, key: &ComponentKey) -> Option<Arc<ConfigDescriptor>> {
        self.cache_guard().get(&key.to_string()).map(Arc::clone)
    }

    fn fetch(&self, key: &ComponentKey) -> Result<ConfigDescriptor, CatalogError> {
        let unit = self.resolver.resolve(key).map_err(|e| match e {
            ResolveError::Unknown => CatalogError::UnknownComponent(key.clone()),
            failed => CatalogError::Load {
                key: key.clone(),
                source: failed,
            },
        })?;
        Ok(match unit.authored {
            Some(descriptor) => descriptor,
            None => self.synthesize(key, &unit),
        })
    }

    fn synthesize(&self, key: &ComponentKey, unit: &Unit) -> ConfigDescriptor {
        let mut schema: BTreeMap<String, PropertySpec> = BTreeMap::new();
        for prop in &unit.properties {
            let curated = self
                .synthesis
                .curated_selects
                .iter()
                .find(|(name, _)| name == &prop.name);
            let spec = match curated {
                Some((_, options)) => PropertySpec::select(options.clone(), prop.default.clone()),
                None => {
                    let control = match prop.ty {
                        DeclaredType::Bool => ControlKind::Boolean,
                        DeclaredType::Number => ControlKind::Number,
                        DeclaredType::Text => ControlKind::Text,
                    };
                    PropertySpec::new(control, prop.default.clone())
                }
            };
            schema.insert(prop.name.clone(), spec);
        }
        for (name, control, default) in &self.synthesis.generic_props {
            schema
                .entry(name.clone())
                .or_insert_with(|| PropertySpec::new(*control, default.clone()));
        }
        ConfigDescriptor {
            unit_id: unit.unit_id.clone(),
            title: human_title(&key.name),
            description: format!("Auto-generated configuration for {key}"),
            property_schema: schema,
            examples: Vec::new(),
            error: false,
        }
    }
}

/// In-memory resolver backed by a registration table. Used by the demo
/// catalog and by tests; a real component library plugs in its own
/// [`UnitResolver`].
#[derive(Default)]
pub struct StaticResolver {
    units: HashMap<String, Result<Unit, String>>,
    order: Vec<ComponentKey>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: ComponentKey, unit: Unit) {
        self.order.push(key.clone());
        self.units.insert(key.to_string(), Ok(unit));
    }

    /// Register a key whose resolution always fails; exercises the
    /// degraded-load path.
    pub fn register_failing(&mut self, key: ComponentKey, reason: impl Into<String>) {
        self.order.push(key.clone());
        self.units.insert(key.to_string(), Err(reason.into()));
    }

    /// Registered keys in registration order. The catalog index is
    /// built once per session from this set.
    pub fn keys(&self) -> Vec<ComponentKey> {
        self.order.clone()
    }
}

impl UnitResolver for StaticResolver {
    fn resolve(&self, key: &ComponentKey) -> Result<Unit, ResolveError> {
        match self.units.get(&key.to_string()) {
            Some(Ok(unit)) => Ok(unit.clone()),
            Some(Err(reason)) => Err(ResolveError::Failed(reason.clone())),
            None => Err(ResolveError::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DeclaredProperty;

    fn resolver_with_button() -> StaticResolver {
        let mut resolver = StaticResolver::new();
        resolver.register(
            ComponentKey::new("atoms", "button"),
            Unit::new(
                "atoms/button",
                vec![
                    DeclaredProperty::new("label", DeclaredType::Text, json!("Click me")),
                    DeclaredProperty::new("variant", DeclaredType::Text, json!("primary")),
                    DeclaredProperty::new("loading", DeclaredType::Bool, json!(false)),
                    DeclaredProperty::new("tab_index", DeclaredType::Number, json!(0)),
                ],
            ),
        );
        resolver
    }

    #[test]
    fn synthesis_maps_declared_types_to_controls() {
        let loader = Loader::new(Arc::new(resolver_with_button()));
        let d = loader.load(&ComponentKey::new("atoms", "button")).unwrap();
        let schema = &d.property_schema;
        assert_eq!(schema["label"].control, ControlKind::Text);
        assert_eq!(schema["loading"].control, ControlKind::Boolean);
        assert_eq!(schema["tab_index"].control, ControlKind::Number);
        // Known variant names get curated selects with shared options.
        assert_eq!(schema["variant"].control, ControlKind::Select);
        assert!(schema["variant"].options.contains(&"ghost".to_string()));
        // Generic props unioned in.
        assert_eq!(schema["disabled"].control, ControlKind::Boolean);
        assert!(schema.contains_key("class_name"));
        assert!(schema.contains_key("id"));
    }

    #[test]
    fn load_is_memoized_by_identity() {
        let loader = Loader::new(Arc::new(resolver_with_button()));
        let key = ComponentKey::new("atoms", "button");
        let first = loader.load(&key).unwrap();
        let second = loader.load(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn reload_replaces_the_cached_entry() {
        let loader = Loader::new(Arc::new(resolver_with_button()));
        let key = ComponentKey::new("atoms", "button");
        let first = loader.load(&key).unwrap();
        let refreshed = loader.reload(&key).unwrap();
        assert!(!Arc::ptr_eq(&first, &refreshed));
        let cached = loader.cached(&key).unwrap();
        assert!(Arc::ptr_eq(&refreshed, &cached));
    }

    #[test]
    fn unknown_component_is_an_error() {
        let loader = Loader::new(Arc::new(resolver_with_button()));
        let err = loader
            .load(&ComponentKey::new("atoms", "missing"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownComponent(_)));
    }

    #[test]
    fn failed_resolution_degrades_to_placeholder() {
        let mut resolver = resolver_with_button();
        resolver.register_failing(ComponentKey::new("atoms", "broken"), "bundle missing");
        let loader = Loader::new(Arc::new(resolver));
        let key = ComponentKey::new("atoms", "broken");
        let d = loader.load_or_placeholder(&key);
        assert!(d.error);
        // Placeholders are not cached; the key stays retryable.
        assert!(loader.cached(&key).is_none());
    }

    #[test]
    fn authored_descriptor_wins_over_synthesis() {
        let mut resolver = StaticResolver::new();
        let authored = ConfigDescriptor {
            unit_id: "atoms/chip".into(),
            title: "Chip".into(),
            description: "Hand-authored".into(),
            property_schema: BTreeMap::new(),
            examples: Vec::new(),
            error: false,
        };
        resolver.register(
            ComponentKey::new("atoms", "chip"),
            Unit::new("atoms/chip", Vec::new()).with_authored(authored),
        );
        let loader = Loader::new(Arc::new(resolver));
        let d = loader.load(&ComponentKey::new("atoms", "chip")).unwrap();
        assert_eq!(d.description, "Hand-authored");
        // No generic props are forced onto authored descriptors.
        assert!(d.property_schema.is_empty());
    }
}
