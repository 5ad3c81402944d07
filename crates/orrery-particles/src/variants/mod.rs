//! Built-in particle variants

mod light;
mod wave;

pub use light::LightParticle;
pub use wave::WaveParticle;
