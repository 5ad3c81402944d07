//! Particle capability, shared particle state, and variant constructors

use crate::config::ParticleConfig;
use crate::random;
use crate::viewport::ViewportHandle;
use orrery_core::{Color, OrreryError, Point, Result};
use std::f64::consts::TAU;
use std::fmt;

/// Nominal frame rate used to turn frame counts into ages
pub const FRAMES_PER_SECOND: f64 = 60.0;

pub const DEFAULT_HEIGHT: f64 = 2.0;
pub const DEFAULT_WIDTH: f64 = 1.0;
pub const DEFAULT_VELOCITY: f64 = 1.0;

/// State shared by every particle variant, plus the viewport it draws on.
///
/// `ParticleCore` is also the bare particle: it implements [`Particle`] with
/// no motion law, so calling `update` or `draw` on it is an error.
pub struct ParticleCore {
    viewport: ViewportHandle,
    config: ParticleConfig,
    pub position: Point,
    /// Position at the last (re)initialization
    pub origin: Point,
    pub fill: Color,
    pub height: f64,
    pub width: f64,
    pub velocity: f64,
    pub angle: f64,
    pub rotation_rate: f64,
    pub frame_count: u64,
    pub age_seconds: f64,
}

impl ParticleCore {
    /// Bind to `viewport` and run the first initialization from `config`
    pub fn new(viewport: &ViewportHandle, config: ParticleConfig) -> Self {
        let mut core = Self {
            viewport: viewport.clone(),
            config,
            position: Point::ORIGIN,
            origin: Point::ORIGIN,
            fill: Color::TRANSPARENT,
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            velocity: DEFAULT_VELOCITY,
            angle: 0.0,
            rotation_rate: 0.0,
            frame_count: 0,
            age_seconds: 0.0,
        };
        core.initialize(None);
        core
    }

    /// Re-resolve every field from defaults, the stored config, then
    /// `overrides`. Generated rules re-roll; the viewport binding is kept.
    pub fn initialize(&mut self, overrides: Option<&ParticleConfig>) {
        let merged = match overrides {
            Some(over) => self.config.merged(over),
            None => self.config.clone(),
        };
        let (vw, vh) = self.viewport.size();

        let fallback = random::random_coordinates(vw, vh);
        self.position = Point::new(
            merged.x.map_or(fallback.x, |r| r.resolve()),
            merged.y.map_or(fallback.y, |r| r.resolve()),
        );
        self.fill = merged
            .fill
            .map_or_else(random::random_fill, |r| r.resolve());
        self.height = merged.height.map_or(DEFAULT_HEIGHT, |r| r.resolve());
        self.width = merged.width.map_or(DEFAULT_WIDTH, |r| r.resolve());
        self.velocity = merged.velocity.map_or(DEFAULT_VELOCITY, |r| r.resolve());
        self.angle = merged
            .angle
            .map_or_else(|| random::random_float(3.0, TAU), |r| r.resolve());
        self.rotation_rate = merged
            .rotation_rate
            .map_or_else(|| random::random_float(0.01, 0.015), |r| r.resolve());

        self.origin = self.position;
        self.frame_count = 0;
        self.age_seconds = 0.0;
    }

    /// The config this particle was created with (without any override)
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportHandle {
        &self.viewport
    }

    /// Checked against the viewport's size at the moment of the call
    pub fn is_out_of_bounds(&self) -> bool {
        self.viewport
            .is_out_of_bounds(self.position.x, self.position.y)
    }

    /// Count one frame of life
    pub fn advance_frame(&mut self) {
        self.frame_count += 1;
        self.age_seconds = self.frame_count as f64 / FRAMES_PER_SECOND;
    }
}

impl fmt::Debug for ParticleCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleCore")
            .field("position", &self.position)
            .field("origin", &self.origin)
            .field("fill", &self.fill)
            .field("velocity", &self.velocity)
            .field("angle", &self.angle)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

/// A self-updating visual entity.
///
/// Implementors provide a motion law in `update`: mutate state, then either
/// `draw` or re-initialize. Shared state and initialization live in
/// [`ParticleCore`].
pub trait Particle {
    fn core(&self) -> &ParticleCore;

    fn core_mut(&mut self) -> &mut ParticleCore;

    /// Short variant name used in diagnostics
    fn name(&self) -> &str {
        "particle"
    }

    fn initialize(&mut self, overrides: Option<&ParticleConfig>) {
        self.core_mut().initialize(overrides);
    }

    /// Advance one frame
    fn update(&mut self) -> Result<()> {
        Err(OrreryError::UnimplementedOperation(format!(
            "{} must implement update",
            self.name()
        )))
    }

    /// Paint the current state onto the bound surface
    fn draw(&self) -> Result<()> {
        Err(OrreryError::UnimplementedOperation(format!(
            "{} must implement draw",
            self.name()
        )))
    }
}

impl Particle for ParticleCore {
    fn core(&self) -> &ParticleCore {
        self
    }

    fn core_mut(&mut self) -> &mut ParticleCore {
        self
    }
}

/// A particle type that emitters can construct from a recipe
pub trait Spawn: Particle + 'static {
    /// Stable name recorded in recipes and matched in scene files
    const NAME: &'static str;

    fn spawn(viewport: &ViewportHandle, config: ParticleConfig) -> Self
    where
        Self: Sized;
}

/// A type-erased particle constructor
#[derive(Clone, Copy)]
pub struct Variant {
    name: &'static str,
    build: fn(&ViewportHandle, ParticleConfig) -> Box<dyn Particle>,
}

impl Variant {
    pub fn of<P: Spawn>() -> Self {
        Self {
            name: P::NAME,
            build: build_boxed::<P>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(&self, viewport: &ViewportHandle, config: ParticleConfig) -> Box<dyn Particle> {
        (self.build)(viewport, config)
    }
}

fn build_boxed<P: Spawn>(viewport: &ViewportHandle, config: ParticleConfig) -> Box<dyn Particle> {
    Box::new(P::spawn(viewport, config))
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variant").field(&self.name).finish()
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
