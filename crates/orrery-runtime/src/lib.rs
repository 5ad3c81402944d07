//! Orrery Runtime - Frame loop infrastructure
//!
//! Provides the host-facing building blocks the particle field runs on:
//! - `Surface`: opaque 2D paint capability (clear, fill rect, fill arc)
//! - `SizeProvider` / `SurfaceResolver`: injected host size and surface lookup
//! - `FrameScheduler` / `FrameQueue`: "run before next repaint" scheduling
//! - `RunState`: the Stopped / Running / Paused control machine
//! - `RecordingSurface`: a surface that records paint commands

mod host;
mod recording;
mod scheduler;
mod state;

pub use host::{FixedSize, SharedSize, SizeProvider, Surface, SurfaceResolver};
pub use recording::{PaintCommand, RecordingSurface};
pub use scheduler::{FrameQueue, FrameScheduler};
pub use state::{Control, RunState};
