use glam::Vec3;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Firework burst cadence and particle physics.
pub struct FireworkOptions {
    /// Milliseconds between bursts once the scene is active.
    pub launch_interval_ms: u64,
    /// Particles spawned per burst.
    pub particles_per_burst: usize,
    /// Initial particle speed in world units per second.
    pub speed: f32,
    /// Acceleration applied to every particle.
    pub gravity: Vec3,
    /// Fraction of velocity lost per second.
    pub drag: f32,
    /// Seconds a particle lives.
    pub lifetime_s: f32,
    /// Billboard half-size in world units.
    pub particle_size: f32,
    /// Hard cap on live particles; oldest are dropped first.
    pub max_particles: usize,
    /// Lower corner of the burst spawn box.
    pub spawn_min: Vec3,
    /// Upper corner of the burst spawn box.
    pub spawn_max: Vec3,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for FireworkOptions {
    fn default() -> Self {
        Self {
            launch_interval_ms: 900,
            particles_per_burst: 90,
            speed: 1.4,
            gravity: Vec3::new(0.0, -0.9, 0.0),
            drag: 0.9,
            lifetime_s: 1.8,
            particle_size: 0.035,
            max_particles: 2400,
            spawn_min: Vec3::new(-3.0, 2.0, -3.5),
            spawn_max: Vec3::new(3.0, 3.4, -1.5),
            seed: None,
        }
    }
}

impl FireworkOptions {
    /// Burst interval.
    #[must_use]
    pub fn launch_interval(&self) -> Duration {
        Duration::from_millis(self.launch_interval_ms)
    }
}
