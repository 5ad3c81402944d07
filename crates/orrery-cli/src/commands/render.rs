//! Headless scene-to-PNG render command

use anyhow::{bail, Context, Result};
use orrery_particles::{random, Orchestrator, SceneFile};
use orrery_raster::RasterSurface;
use orrery_runtime::{FixedSize, FrameQueue};
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub scene: String,
    pub frames: u64,
    pub out: String,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub every: u64,
    pub pause_at: Option<u64>,
    pub resume_at: Option<u64>,
    pub stop_at: Option<u64>,
}

/// What a render produced
#[derive(Debug)]
pub struct RenderSummary {
    pub ticks: u64,
    pub written: Vec<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let scene = SceneFile::load(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene))?;
    let summary = render(&scene, &args)?;

    println!(
        "Rendered {} tick(s) at {}x{}; wrote {} frame(s) to {}",
        summary.ticks,
        args.width,
        args.height,
        summary.written.len(),
        args.out
    );
    Ok(())
}

pub fn render(scene: &SceneFile, args: &RenderArgs) -> Result<RenderSummary> {
    if args.every == 0 {
        bail!("--every must be at least 1");
    }
    if let Some(seed) = args.seed {
        random::reseed(seed);
    }

    let surface = RasterSurface::new(args.width, args.height);
    let frames = FrameQueue::new();
    let mut builder = Orchestrator::builder()
        .surface(surface.clone())
        .size_provider(FixedSize(args.width, args.height))
        .scheduler(frames.clone());
    if let Some(background) = scene.background {
        builder = builder.background(background);
    }
    let mut orchestrator = builder.build().context("Failed to set up the viewport")?;

    scene
        .apply(&mut orchestrator, &super::variant_registry())
        .context("Failed to populate emitters")?;
    tracing::info!(
        "Scene has {} emitter(s), {} particle(s)",
        scene.emitters.len(),
        scene.particle_count()
    );

    let out = Path::new(&args.out);
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    let mut written = Vec::new();
    orchestrator.start();
    for frame in 1..=args.frames {
        if args.pause_at == Some(frame) {
            tracing::info!("Pausing at frame {}", frame);
            orchestrator.pause();
        }
        if args.resume_at == Some(frame) {
            tracing::info!("Resuming at frame {}", frame);
            orchestrator.start();
        }
        if args.stop_at == Some(frame) {
            tracing::info!("Stopping at frame {}", frame);
            orchestrator.stop();
        }

        if frames.take_pending() {
            orchestrator
                .on_frame()
                .with_context(|| format!("Frame {} failed", frame))?;
        }

        if frame % args.every == 0 {
            let path = out.join(format!("frame_{:05}.png", frame));
            surface.save_png(&path)?;
            written.push(path);
        }
    }

    Ok(RenderSummary {
        ticks: orchestrator.tick_count(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
[viewport]
background = "black"

[[emitter]]
name = "beams"

[[emitter.particles]]
variant = "laser"
count = 4
fill = "white"
width = 8
height = 1
velocity = { min = 1.0, max = 3.0 }

[[emitter.particles]]
variant = "light"
count = 4
"#;

    fn args(out: &Path) -> RenderArgs {
        RenderArgs {
            scene: String::new(),
            frames: 6,
            out: out.display().to_string(),
            width: 32,
            height: 24,
            seed: Some(7),
            every: 2,
            pause_at: None,
            resume_at: None,
            stop_at: None,
        }
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("orrery-render-{}-{}", name, std::process::id()))
    }

    #[test]
    fn writes_every_nth_frame() {
        let scene = SceneFile::from_toml_str(SCENE).unwrap();
        let out = scratch("every");
        let summary = render(&scene, &args(&out)).unwrap();

        assert_eq!(summary.ticks, 6);
        assert_eq!(summary.written.len(), 3);
        assert!(summary.written[0].ends_with("frame_00002.png"));
        assert!(summary.written.iter().all(|p| p.exists()));
        let _ = std::fs::remove_dir_all(&out);
    }

    #[test]
    fn pause_window_skips_ticks() {
        let scene = SceneFile::from_toml_str(SCENE).unwrap();
        let out = scratch("pause");
        let summary = render(
            &scene,
            &RenderArgs {
                pause_at: Some(3),
                resume_at: Some(5),
                every: 100,
                ..args(&out)
            },
        )
        .unwrap();

        // frames 1, 2 tick; 3 drains the stale request; 4 idles; 5, 6 tick
        assert_eq!(summary.ticks, 4);
        assert!(summary.written.is_empty());
        let _ = std::fs::remove_dir_all(&out);
    }

    #[test]
    fn unknown_variant_fails() {
        let scene = SceneFile::from_toml_str(
            "[[emitter]]\n[[emitter.particles]]\nvariant = \"comet\"",
        )
        .unwrap();
        let out = scratch("unknown");
        assert!(render(&scene, &args(&out)).is_err());
    }

    #[test]
    fn zero_every_is_rejected() {
        let scene = SceneFile::default();
        let out = scratch("zero");
        assert!(render(&scene, &RenderArgs { every: 0, ..args(&out) }).is_err());
    }
}
