//! Laser particle: a horizontal streak that wraps to the left edge at a new height

use orrery_core::Result;
use orrery_particles::random;
use orrery_particles::{Particle, ParticleConfig, ParticleCore, Spawn, ViewportHandle};

pub struct LaserParticle {
    core: ParticleCore,
}

impl Particle for LaserParticle {
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
        self.core.position.x += self.core.velocity;

        if self.core.is_out_of_bounds() {
            let (_, height) = self.core.viewport().size();
            let y = random::random_int(0, height as i64) as f64;
            self.initialize(Some(&ParticleConfig::new().x(0.0).y(y)));
            Ok(())
        } else {
            self.draw()
        }
    }

    fn draw(&self) -> Result<()> {
        let c = &self.core;
        let (x, y, w, h, fill) = (c.position.x, c.position.y, c.width, c.height, c.fill);
        c.viewport().paint(|surface| surface.fill_rect(x, y, w, h, fill));
        Ok(())
    }
}

impl Spawn for LaserParticle {
    const NAME: &'static str = "laser";

    fn spawn(viewport: &ViewportHandle, config: ParticleConfig) -> Self {
        Self {
            core: ParticleCore::new(viewport, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::Color;
    use orrery_particles::Viewport;
    use orrery_runtime::{FixedSize, PaintCommand, RecordingSurface};

    fn viewport(width: u32, height: u32) -> (ViewportHandle, RecordingSurface) {
        let surface = RecordingSurface::new();
        let vp = Viewport::new(
            Box::new(surface.clone()),
            Box::new(FixedSize(width, height)),
            None,
        );
        surface.take();
        (ViewportHandle::new(vp), surface)
    }

    #[test]
    fn moves_right_and_draws_a_streak() {
        let (vp, surface) = viewport(200, 100);
        let config = ParticleConfig::new()
            .x(10.0)
            .y(40.0)
            .velocity(3.0)
            .width(12.0)
            .height(1.0)
            .fill(Color::WHITE);
        let mut laser = LaserParticle::spawn(&vp, config);

        laser.update().unwrap();

        assert_eq!(laser.core().position.x, 13.0);
        assert_eq!(laser.core().position.y, 40.0);
        assert_eq!(
            surface.take(),
            vec![PaintCommand::FillRect {
                x: 13.0,
                y: 40.0,
                width: 12.0,
                height: 1.0,
                color: Color::WHITE,
            }]
        );
    }

    #[test]
    fn wraps_to_left_edge_at_a_random_height() {
        random::reseed(11);
        let (vp, surface) = viewport(50, 30);
        let mut laser = LaserParticle::spawn(&vp, ParticleConfig::new().x(49.0).y(5.0).velocity(4.0));

        laser.update().unwrap();

        let c = laser.core();
        assert!(surface.is_empty());
        assert_eq!(c.position.x, 0.0);
        assert_eq!(c.position.y, c.position.y.floor());
        assert!((0.0..=30.0).contains(&c.position.y));
        assert_eq!(c.velocity, 4.0);
    }

    #[test]
    fn registered_by_name() {
        let registry = crate::commands::variant_registry();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["laser", "light", "wave"]);
    }
}
