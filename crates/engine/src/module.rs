//! Feature modules and the registry that answers feature-flag queries.

use anyhow::{Result, bail};
use indexmap::IndexMap;

use crate::host::{Feature, FeatureFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCategory {
    Combat,
    Exploit,
    Misc,
    Movement,
    Render,
    World,
    Client,
}

/// Whether a module can be switched. Chosen once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    /// User-switchable, optionally bound to a key.
    Toggle { enabled: bool, keybind: Option<u32> },
    /// Always active. Cannot be toggled or bound.
    Concurrent,
}

#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    description: String,
    category: ModuleCategory,
    kind: ModuleKind,
    hidden: bool,
}

impl Module {
    pub fn toggle(name: impl Into<String>, description: impl Into<String>, category: ModuleCategory) -> Self {
        Self::new(
            name,
            description,
            category,
            ModuleKind::Toggle {
                enabled: false,
                keybind: None,
            },
        )
    }

    pub fn concurrent(name: impl Into<String>, description: impl Into<String>, category: ModuleCategory) -> Self {
        Self::new(name, description, category, ModuleKind::Concurrent)
    }

    fn new(name: impl Into<String>, description: impl Into<String>, category: ModuleCategory, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            kind,
            hidden: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> ModuleCategory {
        self.category
    }

    pub fn kind(&self) -> &ModuleKind {
        &self.kind
    }

    /// Config key, e.g. `airplace_module`.
    pub fn label(&self) -> String {
        format!("{}_module", self.name.to_lowercase())
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Concurrent modules are always active.
    pub fn is_active(&self) -> bool {
        match self.kind {
            ModuleKind::Toggle { enabled, .. } => enabled,
            ModuleKind::Concurrent => true,
        }
    }

    pub fn set_enabled(&mut self, value: bool) -> Result<()> {
        match &mut self.kind {
            ModuleKind::Toggle { enabled, .. } => {
                if *enabled != value {
                    *enabled = value;
                    tracing::info!("{} {}", self.name, if value { "enabled" } else { "disabled" });
                }
                Ok(())
            }
            ModuleKind::Concurrent => bail!("module {} is concurrent and cannot be toggled", self.name),
        }
    }

    /// Flip a toggle module. Returns the new state.
    pub fn toggle_enabled(&mut self) -> Result<bool> {
        let next = !self.is_active();
        self.set_enabled(next)?;
        Ok(next)
    }

    pub fn keybind(&self) -> Option<u32> {
        match self.kind {
            ModuleKind::Toggle { keybind, .. } => keybind,
            ModuleKind::Concurrent => None,
        }
    }

    pub fn set_keybind(&mut self, key: Option<u32>) -> Result<()> {
        match &mut self.kind {
            ModuleKind::Toggle { keybind, .. } => {
                *keybind = key;
                Ok(())
            }
            ModuleKind::Concurrent => bail!("module {} is concurrent and cannot be bound", self.name),
        }
    }
}

// ── Registry ────────────────────────────────────────────────────────────

/// Modules in registration order, looked up case-insensitively by name.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: IndexMap<String, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The modules this client ships with.
    pub fn standard() -> Self {
        let builtin = [
            Module::toggle(Feature::AirPlace.module_name(), "Places blocks without support", ModuleCategory::World),
            Module::toggle("Scaffold", "Bridges blocks under the player", ModuleCategory::World),
            Module::toggle("Rotations", "Looks at placement targets", ModuleCategory::Client),
            Module::concurrent("Hud", "Lists active modules", ModuleCategory::Client),
        ];
        let modules = builtin
            .into_iter()
            .map(|module| (module.name.to_lowercase(), module))
            .collect();
        Self { modules }
    }

    pub fn register(&mut self, module: Module) -> Result<()> {
        let key = module.name.to_lowercase();
        if self.modules.contains_key(&key) {
            bail!("module {} is already registered", module.name);
        }
        tracing::debug!("Registered module {} ({:?})", module.name, module.category);
        self.modules.insert(key, module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(&name.to_lowercase())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(&name.to_lowercase())
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        match self.get_mut(name) {
            Some(module) => module.set_enabled(enabled),
            None => bail!("unknown module {}", name),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FeatureFlags for ModuleRegistry {
    fn is_enabled(&self, feature: Feature) -> bool {
        self.get(feature.module_name()).is_some_and(Module::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_lowercase_name() {
        let module = Module::toggle("AirPlace", "", ModuleCategory::World);
        assert_eq!(module.label(), "airplace_module");
    }

    #[test]
    fn concurrent_modules_refuse_toggling() {
        let mut module = Module::concurrent("Rotations", "", ModuleCategory::Client);
        assert!(module.is_active());
        assert!(module.set_enabled(false).is_err());
        assert!(module.set_keybind(Some(82)).is_err());
        assert!(module.is_active());
    }

    #[test]
    fn toggle_flips_state() {
        let mut module = Module::toggle("Scaffold", "", ModuleCategory::World);
        assert!(!module.is_active());
        assert!(module.toggle_enabled().unwrap());
        assert!(module.is_active());
        module.set_keybind(Some(66)).unwrap();
        assert_eq!(module.keybind(), Some(66));
    }

    #[test]
    fn standard_registry_lists_builtins_in_order() {
        let registry = ModuleRegistry::standard();
        let names: Vec<&str> = registry.iter().map(Module::name).collect();
        assert_eq!(names, vec!["AirPlace", "Scaffold", "Rotations", "Hud"]);
        assert_eq!(registry.len(), 4);
        assert!(registry.get("SCAFFOLD").is_some());
        assert!(registry.get("hud").is_some_and(Module::is_active));
    }

    #[test]
    fn registry_drives_feature_flags() {
        let mut registry = ModuleRegistry::standard();
        assert!(!registry.is_enabled(Feature::AirPlace));
        registry.set_enabled("airplace", true).unwrap();
        assert!(registry.is_enabled(Feature::AirPlace));
        assert!(registry.set_enabled("missing", true).is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ModuleRegistry::new();
        registry
            .register(Module::toggle("NoSlow", "", ModuleCategory::Movement))
            .unwrap();
        assert!(registry
            .register(Module::toggle("noslow", "", ModuleCategory::Movement))
            .is_err());
        assert_eq!(registry.len(), 1);
    }
}
