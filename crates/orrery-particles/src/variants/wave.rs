//! Wave particle: drifts rightward on a sine-modulated path

use crate::config::ParticleConfig;
use crate::particle::{Particle, ParticleCore, Spawn};
use crate::random;
use crate::viewport::ViewportHandle;
use orrery_core::Result;

pub const VELOCITY_JITTER: (f64, f64) = (-0.01, 0.015);

pub struct WaveParticle {
    core: ParticleCore,
    jitter: (f64, f64),
}

impl WaveParticle {
    pub fn new(viewport: &ViewportHandle, config: ParticleConfig) -> Self {
        Self {
            core: ParticleCore::new(viewport, config),
            jitter: VELOCITY_JITTER,
        }
    }

    pub fn with_velocity_jitter(mut self, min: f64, max: f64) -> Self {
        self.jitter = (min, max);
        self
    }
}

impl Particle for WaveParticle {
    fn core(&self) -> &ParticleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ParticleCore {
        &mut self.core
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self) -> Result<()> {
        let c = &mut self.core;
        c.velocity += random::random_float(self.jitter.0, self.jitter.1);
        c.position.x += c.velocity;
        c.position.y += (c.position.x * 0.002 + c.velocity).sin();

        if self.core.is_out_of_bounds() {
            // Re-enter from the left edge; every other rule re-resolves as configured
            self.initialize(Some(&ParticleConfig::new().x(0.0)));
            Ok(())
        } else {
            self.draw()
        }
    }

    fn draw(&self) -> Result<()> {
        let c = &self.core;
        let (x, y, w, h, fill) = (c.position.x, c.position.y, c.height, c.width, c.fill);
        c.viewport().paint(|surface| surface.fill_rect(x, y, w, h, fill));
        Ok(())
    }
}

impl Spawn for WaveParticle {
    const NAME: &'static str = "wave";

    fn spawn(viewport: &ViewportHandle, config: ParticleConfig) -> Self {
        Self::new(viewport, config)
    }
}
