//! Name → variant lookup for scene files

use crate::particle::{Spawn, Variant};
use crate::variants::{LightParticle, WaveParticle};
use std::collections::BTreeMap;

/// Particle variants addressable by name
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Variant>,
}

impl VariantRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `light` and `wave`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<LightParticle>();
        registry.register::<WaveParticle>();
        registry
    }

    /// Register `P` under its [`Spawn::NAME`], replacing any previous entry
    pub fn register<P: Spawn>(&mut self) -> &mut Self {
        self.insert(Variant::of::<P>());
        self
    }

    pub fn insert(&mut self, variant: Variant) {
        self.variants.insert(variant.name().to_string(), variant);
    }

    pub fn get(&self, name: &str) -> Option<Variant> {
        self.variants.get(name).copied()
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}
