//! Orrery Particles - self-updating particles on a 2D paint surface
//!
//! Provides the particle field model:
//! - Field rules resolved on every (re)initialization (`Fixed` or `Generated`)
//! - `LightParticle` and `WaveParticle`, plus the `Particle` / `Spawn` traits for custom variants
//! - Emitters that rebuild their pool by replaying creation recipes
//! - An orchestrator driving the start / pause / stop frame loop
//! - TOML scene files and a name-keyed variant registry

pub mod config;
pub mod emitter;
pub mod field;
pub mod orchestrator;
pub mod particle;
pub mod random;
pub mod registry;
pub mod scene;
pub mod variants;
pub mod viewport;

pub use config::ParticleConfig;
pub use emitter::{Emitter, Recipe, SharedEmitter};
pub use field::FieldRule;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, SurfaceTarget};
pub use particle::{Particle, ParticleCore, Spawn, Variant};
pub use registry::VariantRegistry;
pub use scene::{EmitterEntry, RecipeEntry, SceneFile};
pub use variants::{LightParticle, WaveParticle};
pub use viewport::{Viewport, ViewportHandle};
