//! Orrery CLI - headless renders and scene checks for the particle field

mod commands;
mod laser;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{render, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Animated particle fields on a 2D surface", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene headless into numbered PNG frames
    Render {
        /// Path to scene file
        scene: String,

        /// Number of host frames to run
        #[arg(long, default_value = "60")]
        frames: u64,

        /// Output directory for PNG frames
        #[arg(long, default_value = "frames")]
        out: String,

        /// Surface width in pixels
        #[arg(long, default_value = "640")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "480")]
        height: u32,

        /// Seed the particle generator for a reproducible render
        #[arg(long)]
        seed: Option<u64>,

        /// Write every Nth frame
        #[arg(long, default_value = "1")]
        every: u64,

        /// Pause before this frame
        #[arg(long)]
        pause_at: Option<u64>,

        /// Start again before this frame
        #[arg(long)]
        resume_at: Option<u64>,

        /// Stop (clear and regenerate) before this frame
        #[arg(long)]
        stop_at: Option<u64>,
    },

    /// Check a scene file against the known particle variants
    Validate {
        /// Path to scene file
        scene: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            frames,
            out,
            width,
            height,
            seed,
            every,
            pause_at,
            resume_at,
            stop_at,
        } => render::run(render::RenderArgs {
            scene,
            frames,
            out,
            width,
            height,
            seed,
            every,
            pause_at,
            resume_at,
            stop_at,
        }),
        Commands::Validate { scene } => validate::run(validate::ValidateArgs { scene }),
    }
}
