//! Registry of material templates that widgets are instantiated from.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id of the built-in box material.
pub const BOX_MATERIAL_ID: &str = "box1";

/// A widget template. Rendering is left to the host; the registry only
/// tracks what a new widget needs to be laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Key widgets use to refer to this template.
    pub id: String,
    pub name: String,
    /// Size given to new widgets of this material.
    pub default_size: Size,
}

impl Material {
    pub fn new(id: impl Into<String>, name: impl Into<String>, default_size: Size) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_size,
        }
    }
}

/// Maps material ids to templates.
#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    store: HashMap<String, Material>,
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Material::new(BOX_MATERIAL_ID, "Box", Size::new(100.0, 100.0)));
        registry
    }
}

impl MaterialRegistry {
    /// Create a registry holding the built-in materials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with no materials.
    pub fn empty() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    /// Register a material under its id, replacing any previous one with the same id.
    pub fn register(&mut self, material: Material) {
        self.store.insert(material.id.clone(), material);
    }

    pub fn get(&self, id: &str) -> Option<&Material> {
        self.store.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.store.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_box() {
        let registry = MaterialRegistry::new();
        let material = registry.get(BOX_MATERIAL_ID).unwrap();
        assert_eq!(material.id, BOX_MATERIAL_ID);
        assert_eq!(material.default_size, Size::new(100.0, 100.0));
        assert_eq!(registry.ids(), vec![BOX_MATERIAL_ID]);
    }

    #[test]
    fn test_register_and_replace() {
        let mut registry = MaterialRegistry::empty();
        assert!(!registry.contains("card"));

        registry.register(Material::new("card", "Card", Size::new(200.0, 120.0)));
        registry.register(Material::new("card", "Wide card", Size::new(320.0, 120.0)));
        let card = registry.get("card").unwrap();
        assert_eq!(card.id, "card");
        assert_eq!(card.name, "Wide card");
        assert_eq!(registry.ids(), vec!["card"]);
        assert!(registry.get("missing").is_none());
    }
}
