//! Light particle: spirals outward along a lissajous-like orbit

use crate::config::ParticleConfig;
use crate::particle::{Particle, ParticleCore, Spawn};
use crate::random;
use crate::viewport::ViewportHandle;
use orrery_core::Result;
use std::f64::consts::TAU;

/// Per-tick velocity perturbation range. The walk is unbounded.
pub const VELOCITY_JITTER: (f64, f64) = (-0.15, 0.15);

pub struct LightParticle {
    core: ParticleCore,
    jitter: (f64, f64),
}

impl LightParticle {
    pub fn new(viewport: &ViewportHandle, config: ParticleConfig) -> Self {
        Self {
            core: ParticleCore::new(viewport, config),
            jitter: VELOCITY_JITTER,
        }
    }

    /// Replace the per-tick velocity perturbation range
    pub fn with_velocity_jitter(mut self, min: f64, max: f64) -> Self {
        self.jitter = (min, max);
        self
    }

    /// Apply one frame of motion without deciding whether to draw
    pub fn step(&mut self) {
        let c = &mut self.core;
        c.angle += c.rotation_rate;
        c.position.x += c.velocity * c.angle.cos();
        c.position.y += c.velocity * c.angle.sin().powi(3) * 0.8;
        c.advance_frame();
        c.velocity += random::random_float(self.jitter.0, self.jitter.1);
    }

    /// Visible only while in bounds and displaced from its origin on both axes
    fn is_visible(&self) -> bool {
        let c = &self.core;
        !c.is_out_of_bounds()
            && c.frame_count > 0
            && c.position.x != c.origin.x
            && c.position.y != c.origin.y
    }
}

impl Particle for LightParticle {
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
        self.step();
        if self.is_visible() {
            self.draw()
        } else {
            self.initialize(None);
            Ok(())
        }
    }

    fn draw(&self) -> Result<()> {
        let c = &self.core;
        let (x, y, radius, start, fill) = (c.position.x, c.position.y, c.height, c.angle, c.fill);
        c.viewport()
            .paint(|surface| surface.fill_arc(x, y, radius, start, TAU, fill));
        Ok(())
    }
}

impl Spawn for LightParticle {
    const NAME: &'static str = "light";

    fn spawn(viewport: &ViewportHandle, config: ParticleConfig) -> Self {
        Self::new(viewport, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::tests::test_viewport;
    use orrery_core::{Color, Point};
    use orrery_runtime::PaintCommand;

    fn still(x: f64, y: f64, angle: f64, velocity: f64, rotation: f64) -> ParticleConfig {
        ParticleConfig::new()
            .x(x)
            .y(y)
            .angle(angle)
            .velocity(velocity)
            .rotation_rate(rotation)
            .fill(Color::WHITE)
    }

    #[test]
    fn step_follows_the_orbit_law() {
        let (vp, _) = test_viewport(200, 200);
        let mut p = LightParticle::new(&vp, still(100.0, 100.0, 0.0, 1.0, 0.0))
            .with_velocity_jitter(0.0, 0.0);

        p.step();
        let c = p.core();
        assert_eq!(c.angle, 0.0);
        assert!((c.position.x - 101.0).abs() < 1e-12);
        assert!((c.position.y - 100.0).abs() < 1e-12);
        assert_eq!(c.velocity, 1.0);
        assert_eq!(c.frame_count, 1);
        assert!((c.age_seconds - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn moving_on_both_axes_draws_an_arc() {
        let (vp, surface) = test_viewport(200, 200);
        let angle = std::f64::consts::FRAC_PI_4;
        let mut p = LightParticle::new(&vp, still(100.0, 100.0, angle, 2.0, 0.0))
            .with_velocity_jitter(0.0, 0.0);

        p.update().unwrap();

        let c = p.core();
        assert_eq!(c.frame_count, 1);
        let cmds = surface.take();
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            PaintCommand::FillArc {
                cx,
                cy,
                radius,
                start,
                end,
                color,
            } => {
                assert_eq!((*cx, *cy), (c.position.x, c.position.y));
                assert_eq!(*radius, 2.0);
                assert_eq!(*start, angle);
                assert_eq!(*end, TAU);
                assert_eq!(*color, Color::WHITE);
            }
            other => panic!("expected an arc, got {:?}", other),
        }
    }

    #[test]
    fn motion_on_one_axis_only_reinitializes() {
        let (vp, surface) = test_viewport(200, 200);
        let mut p = LightParticle::new(&vp, still(100.0, 100.0, 0.0, 1.0, 0.0))
            .with_velocity_jitter(0.0, 0.0);

        p.update().unwrap();

        // y did not move, so the guard fails and the particle respawns in place
        let c = p.core();
        assert_eq!(c.position, Point::new(100.0, 100.0));
        assert_eq!(c.origin, c.position);
        assert_eq!(c.frame_count, 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn leaving_the_viewport_reinitializes() {
        let (vp, surface) = test_viewport(100, 100);
        let config = ParticleConfig::new()
            .x(100.0)
            .y(50.0)
            .angle(0.5)
            .velocity(5.0);
        let mut p = LightParticle::new(&vp, config).with_velocity_jitter(0.0, 0.0);

        p.update().unwrap();

        assert_eq!(p.core().position, Point::new(100.0, 50.0));
        assert_eq!(p.core().frame_count, 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn velocity_walk_stays_within_jitter_per_tick() {
        let (vp, _) = test_viewport(10_000, 10_000);
        let mut p = LightParticle::new(&vp, still(5000.0, 5000.0, 1.0, 1.0, 0.0));
        let before = p.core().velocity;
        p.step();
        let delta = p.core().velocity - before;
        assert!(delta.abs() <= 0.15 + 1e-9);
    }
}
