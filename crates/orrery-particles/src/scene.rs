//! TOML scene files: a background colour plus emitters and their recipes
//!
//! ```toml
//! [viewport]
//! background = "#000000"
//!
//! [[emitter]]
//! name = "planets"
//!
//! [[emitter.particles]]
//! variant = "light"
//! count = 10
//! fill = "pink"
//! velocity = { min = 1.0, max = 3.0 }
//! ```

use crate::config::ParticleConfig;
use crate::emitter::SharedEmitter;
use crate::orchestrator::Orchestrator;
use crate::registry::VariantRegistry;
use orrery_core::{Color, OrreryError, Result};
use std::path::Path;

/// Largest `count` a single recipe may ask for
pub const MAX_RECIPE_COUNT: usize = 100_000;

/// One `[[emitter.particles]]` entry
#[derive(Debug, Clone)]
pub struct RecipeEntry {
    pub variant: String,
    pub count: usize,
    pub config: ParticleConfig,
}

/// One `[[emitter]]` entry
#[derive(Debug, Clone)]
pub struct EmitterEntry {
    pub name: String,
    pub recipes: Vec<RecipeEntry>,
}

/// A parsed scene file
#[derive(Debug, Clone, Default)]
pub struct SceneFile {
    pub background: Option<Color>,
    pub emitters: Vec<EmitterEntry>,
}

impl SceneFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        let mut scene = SceneFile::default();

        if let Some(viewport) = root.get("viewport") {
            let viewport = viewport.as_table().ok_or_else(|| {
                OrreryError::Configuration("'viewport' must be a table".into())
            })?;
            if let Some(bg) = viewport.get("background") {
                let bg = bg.as_str().ok_or_else(|| {
                    OrreryError::Configuration("'background' must be a colour string".into())
                })?;
                scene.background = Some(Color::parse(bg)?);
            }
        }

        let emitters = match root.get("emitter") {
            Some(v) => v.as_array().ok_or_else(|| {
                OrreryError::Configuration("'emitter' must be an array of tables".into())
            })?,
            None => return Ok(scene),
        };

        for (index, entry) in emitters.iter().enumerate() {
            let table = entry.as_table().ok_or_else(|| {
                OrreryError::Configuration(format!("emitter #{} is not a table", index + 1))
            })?;
            let name = table
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("emitter-{}", index + 1));

            let mut recipes = Vec::new();
            if let Some(particles) = table.get("particles") {
                let particles = particles.as_array().ok_or_else(|| {
                    OrreryError::Configuration(format!(
                        "emitter '{}': 'particles' must be an array of tables",
                        name
                    ))
                })?;
                for particle in particles {
                    recipes.push(parse_recipe(&name, particle)?);
                }
            }
            scene.emitters.push(EmitterEntry { name, recipes });
        }

        Ok(scene)
    }

    /// Check every recipe names a registered variant
    pub fn validate(&self, registry: &VariantRegistry) -> Result<()> {
        for emitter in &self.emitters {
            for recipe in &emitter.recipes {
                if registry.get(&recipe.variant).is_none() {
                    let known: Vec<&str> = registry.names().collect();
                    return Err(OrreryError::Configuration(format!(
                        "emitter '{}': unknown particle variant '{}' (known: {})",
                        emitter.name,
                        recipe.variant,
                        known.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Total particles the scene creates
    pub fn particle_count(&self) -> usize {
        self.emitters
            .iter()
            .flat_map(|e| e.recipes.iter())
            .map(|r| r.count)
            .sum()
    }

    /// Create and register every emitter on `orchestrator`
    pub fn apply(
        &self,
        orchestrator: &mut Orchestrator,
        registry: &VariantRegistry,
    ) -> Result<Vec<SharedEmitter>> {
        self.validate(registry)?;

        let mut created = Vec::with_capacity(self.emitters.len());
        for entry in &self.emitters {
            let emitter = orchestrator.create_emitter();
            {
                let mut em = emitter.borrow_mut();
                for recipe in &entry.recipes {
                    if let Some(variant) = registry.get(&recipe.variant) {
                        em.create_particles(variant, recipe.config.clone(), recipe.count);
                    }
                }
            }
            orchestrator.add_emitter(emitter.clone());
            tracing::info!(
                target: "scene",
                "Emitter '{}' ready with {} particle(s)",
                entry.name,
                emitter.borrow().len()
            );
            created.push(emitter);
        }
        Ok(created)
    }
}

fn parse_recipe(emitter: &str, value: &toml::Value) -> Result<RecipeEntry> {
    let table = value.as_table().ok_or_else(|| {
        OrreryError::Configuration(format!("emitter '{}': particle entry is not a table", emitter))
    })?;
    let variant = table
        .get("variant")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            OrreryError::Configuration(format!(
                "emitter '{}': particle entry is missing 'variant'",
                emitter
            ))
        })?
        .to_string();
    let count = match table.get("count") {
        None => 1,
        Some(v) => v
            .as_integer()
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n <= MAX_RECIPE_COUNT)
            .ok_or_else(|| {
                OrreryError::Configuration(format!(
                    "emitter '{}': 'count' must be an integer from 0 to {}",
                    emitter, MAX_RECIPE_COUNT
                ))
            })?,
    };
    let config = ParticleConfig::from_toml(table)?;
    Ok(RecipeEntry {
        variant,
        count,
        config,
    })
}
