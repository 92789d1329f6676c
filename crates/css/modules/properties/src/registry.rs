use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error};
use once_cell::sync::OnceCell;

use crate::descriptor::PropertyDescriptor;
use crate::error::StyleError;
use crate::id::PropertyId;
use crate::standard::standard_properties;

/// Process-wide registry, initialized once before any resolution happens.
static GLOBAL_REGISTRY: OnceCell<Arc<StyleRegistry>> = OnceCell::new();

/// Table from property identity and name to descriptor.
///
/// Built mutably at startup, then shared read-only (usually behind an `Arc`).
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    /// Indexed by [`PropertyId::index`].
    descriptors: Vec<Option<PropertyDescriptor>>,
    /// Normalized name to identity.
    names: HashMap<String, PropertyId>,
}

impl Default for StyleRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: (0..PropertyId::COUNT).map(|_| None).collect(),
            names: HashMap::new(),
        }
    }

    /// A registry holding every built-in property.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for descriptor in standard_properties() {
            if let Err(err) = registry.register(descriptor) {
                error!("StyleRegistry: {err}");
            }
        }
        debug!("StyleRegistry: registered {} standard properties", registry.len());
        registry
    }

    /// The process-wide registry, created from [`Self::standard`] on first use
    /// unless [`Self::install_global`] ran earlier.
    pub fn shared() -> Arc<Self> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(Self::standard())))
    }

    /// Install a custom process-wide registry.
    ///
    /// # Errors
    /// Returns the rejected registry when the global one is already initialized.
    pub fn install_global(registry: Self) -> Result<(), Arc<Self>> {
        GLOBAL_REGISTRY.set(Arc::new(registry))
    }

    /// Add a descriptor.
    ///
    /// # Errors
    /// Returns `DuplicateProperty` if the identity is already registered.
    pub fn register(&mut self, descriptor: PropertyDescriptor) -> Result<(), StyleError> {
        let index = descriptor.id.index();
        let Some(slot) = self.descriptors.get_mut(index) else {
            return Err(StyleError::UnknownProperty(descriptor.name.to_owned()));
        };
        if slot.is_some() {
            return Err(StyleError::DuplicateProperty(descriptor.name));
        }
        self.names
            .insert(normalize_name(descriptor.name), descriptor.id);
        *slot = Some(descriptor);
        Ok(())
    }

    /// Find a descriptor by name. Names are case-insensitive and accept both
    /// `background-color` and `backgroundColor`.
    ///
    /// # Errors
    /// Returns `UnknownProperty` if no descriptor has this name.
    pub fn lookup(&self, name: &str) -> Result<&PropertyDescriptor, StyleError> {
        self.names
            .get(&normalize_name(name))
            .and_then(|id| self.get(*id))
            .ok_or_else(|| StyleError::UnknownProperty(name.to_owned()))
    }

    /// Find a descriptor by identity.
    ///
    /// # Errors
    /// Returns `UnknownProperty` if the identity was never registered.
    pub fn descriptor(&self, id: PropertyId) -> Result<&PropertyDescriptor, StyleError> {
        self.get(id)
            .ok_or_else(|| StyleError::UnknownProperty(id.name().to_owned()))
    }

    #[inline]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyDescriptor> {
        self.descriptors.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.get(id).is_some()
    }

    /// Registered descriptors in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.descriptors.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Lowercase and drop word separators so kebab-case and camelCase agree.
fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|character| *character != '-' && *character != '_')
        .map(|character| character.to_ascii_lowercase())
        .collect()
}
