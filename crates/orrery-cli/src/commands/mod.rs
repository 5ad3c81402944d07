//! CLI command implementations

pub mod render;
pub mod validate;

use crate::laser::LaserParticle;
use orrery_particles::VariantRegistry;

/// Built-in variants plus the ones this binary ships
pub fn variant_registry() -> VariantRegistry {
    let mut registry = VariantRegistry::with_builtins();
    registry.register::<LaserParticle>();
    registry
}
