//! Scene validation command

use anyhow::{Context, Result};
use orrery_particles::SceneFile;

pub struct ValidateArgs {
    pub scene: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let scene = SceneFile::load(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene))?;
    scene
        .validate(&super::variant_registry())
        .with_context(|| format!("{} is not a valid scene", args.scene))?;

    match scene.background {
        Some(bg) => println!("Background: {}", bg),
        None => println!("Background: default"),
    }
    for emitter in &scene.emitters {
        println!("Emitter '{}':", emitter.name);
        for recipe in &emitter.recipes {
            let rules = if recipe.config.has_generated_fields() {
                "generated"
            } else {
                "fixed"
            };
            println!("  {} x {} ({} rules)", recipe.variant, recipe.count, rules);
        }
    }
    println!(
        "OK: {} emitter(s), {} particle(s)",
        scene.emitters.len(),
        scene.particle_count()
    );
    Ok(())
}
