//! Emitter: a particle pool plus the recipes that can regenerate it

use crate::config::ParticleConfig;
use crate::particle::{Particle, Spawn, Variant};
use crate::viewport::ViewportHandle;
use orrery_core::{OrreryError, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An emitter shared between embedding code and the orchestrator
pub type SharedEmitter = Rc<RefCell<Emitter>>;

/// One `create_particles` call, kept so a reset can replay it
#[derive(Debug, Clone)]
pub struct Recipe {
    pub variant: Variant,
    pub config: ParticleConfig,
    pub count: usize,
}

/// Owns a pool of particles bound to one viewport
pub struct Emitter {
    viewport: ViewportHandle,
    pool: Vec<Box<dyn Particle>>,
    recipes: Vec<Recipe>,
}

impl Emitter {
    pub fn new(viewport: &ViewportHandle) -> Self {
        Self {
            viewport: viewport.clone(),
            pool: Vec::new(),
            recipes: Vec::new(),
        }
    }

    /// Wrap in the shared handle the orchestrator stores
    pub fn into_shared(self) -> SharedEmitter {
        Rc::new(RefCell::new(self))
    }

    /// Build `count` particles of `variant` from `config` and record the recipe
    pub fn create_particles(&mut self, variant: Variant, config: ParticleConfig, count: usize) {
        for _ in 0..count {
            self.pool.push(variant.build(&self.viewport, config.clone()));
        }
        tracing::debug!(
            target: "particles",
            "Created {} '{}' particle(s), pool now {}",
            count,
            variant.name(),
            self.pool.len()
        );
        self.recipes.push(Recipe {
            variant,
            config,
            count,
        });
    }

    /// Typed form of [`Emitter::create_particles`]
    pub fn create<P: Spawn>(&mut self, config: ParticleConfig, count: usize) {
        self.create_particles(Variant::of::<P>(), config, count);
    }

    /// Append pre-built particles. Particles bound to another viewport are
    /// skipped; one diagnostic per rejection is logged and returned.
    pub fn add_particles<I>(&mut self, particles: I) -> Vec<OrreryError>
    where
        I: IntoIterator<Item = Box<dyn Particle>>,
    {
        let mut rejected = Vec::new();
        for particle in particles {
            if particle.core().viewport().ptr_eq(&self.viewport) {
                self.pool.push(particle);
            } else {
                let err = OrreryError::InvalidArgument(format!(
                    "'{}' particle is bound to a different viewport",
                    particle.name()
                ));
                tracing::warn!(target: "particles", "{}", err);
                rejected.push(err);
            }
        }
        rejected
    }

    /// Single-particle form of [`Emitter::add_particles`]
    pub fn add_particle(&mut self, particle: Box<dyn Particle>) -> Result<()> {
        match self.add_particles(std::iter::once(particle)).pop() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Advance every particle once, in pool order
    pub fn update(&mut self) -> Result<()> {
        for particle in &mut self.pool {
            particle.update()?;
        }
        Ok(())
    }

    /// Drop the pool and replay every recipe in order. Generated field rules
    /// re-roll, so the new pool has the same shape but fresh state.
    pub fn reset_particles(&mut self) {
        self.pool.clear();
        let recipes = std::mem::take(&mut self.recipes);
        for recipe in recipes {
            self.create_particles(recipe.variant, recipe.config, recipe.count);
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &dyn Particle> + '_ {
        self.pool.iter().map(|p| p.as_ref())
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn viewport(&self) -> &ViewportHandle {
        &self.viewport
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.pool.iter().map(|p| p.name()).collect();
        f.debug_struct("Emitter")
            .field("viewport", &self.viewport)
            .field("particles", &names)
            .field("recipes", &self.recipes)
            .finish()
    }
}
