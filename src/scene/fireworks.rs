//! CPU firework particles.
//!
//! Bursts spawn at a random point in the configured box, fly outward
//! under gravity and drag, and fade to transparent over their lifetime.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::Duration;

use crate::options::FireworkOptions;

/// Burst hues. Each burst picks one and jitters it per particle.
const PALETTE: [[f32; 3]; 6] = [
    [1.0, 0.35, 0.45],
    [1.0, 0.78, 0.3],
    [0.45, 0.8, 1.0],
    [0.7, 0.5, 1.0],
    [0.45, 1.0, 0.6],
    [1.0, 0.6, 0.9],
];

#[derive(Debug, Clone, Copy)]
struct Particle {
    position: Vec3,
    velocity: Vec3,
    color: [f32; 3],
    age: f32,
    lifetime: f32,
}

/// Per-particle GPU instance data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// World position.
    pub position: [f32; 3],
    /// Billboard half-size.
    pub size: f32,
    /// Premultiplied-free RGBA; alpha fades with age.
    pub color: [f32; 4],
}

/// Live firework particles.
#[derive(Debug)]
pub struct Fireworks {
    options: FireworkOptions,
    particles: Vec<Particle>,
    rng: StdRng,
    bursts: u64,
}

impl Fireworks {
    /// Empty sky. Seeds from `options.seed` when set.
    #[must_use]
    pub fn new(options: &FireworkOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            options: options.clone(),
            particles: Vec::new(),
            rng,
            bursts: 0,
        }
    }

    /// Spawn one burst at a random point in the spawn box.
    pub fn launch(&mut self) {
        let min = self.options.spawn_min.min(self.options.spawn_max);
        let max = self.options.spawn_min.max(self.options.spawn_max);
        let origin = Vec3::new(
            sample(&mut self.rng, min.x, max.x),
            sample(&mut self.rng, min.y, max.y),
            sample(&mut self.rng, min.z, max.z),
        );
        self.burst_at(origin);
    }

    /// Spawn one burst centred on `origin`.
    pub fn burst_at(&mut self, origin: Vec3) {
        let hue = PALETTE[self.rng.random_range(0..PALETTE.len())];
        let count = self.options.particles_per_burst;
        self.particles.reserve(count);
        for _ in 0..count {
            let direction = random_unit_vector(&mut self.rng);
            let speed = self.options.speed * self.rng.random_range(0.6..=1.0);
            let jitter: f32 = self.rng.random_range(0.85..=1.0);
            let lifetime =
                self.options.lifetime_s * self.rng.random_range(0.7..=1.0);
            self.particles.push(Particle {
                position: origin,
                velocity: direction * speed,
                color: hue.map(|c| (c * jitter).min(1.0)),
                age: 0.0,
                lifetime,
            });
        }
        self.bursts += 1;

        let cap = self.options.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            let _ = self.particles.drain(..excess);
        }
        log::debug!(
            "firework burst {} at {origin}, {} live",
            self.bursts,
            self.particles.len()
        );
    }

    /// Integrate motion and retire expired particles.
    pub fn update(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        if dt <= 0.0 {
            return;
        }
        let gravity = self.options.gravity;
        let damping = (1.0 - self.options.drag * dt).max(0.0);
        for p in &mut self.particles {
            p.velocity = (p.velocity + gravity * dt) * damping;
            p.position += p.velocity * dt;
            p.age += dt;
        }
        self.particles.retain(|p| p.age < p.lifetime);
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the sky is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Bursts launched so far.
    #[must_use]
    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    /// Drop every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// GPU instances for the live particles.
    #[must_use]
    pub fn instances(&self) -> Vec<ParticleInstance> {
        let size = self.options.particle_size;
        self.particles
            .iter()
            .map(|p| {
                let life = 1.0 - (p.age / p.lifetime).clamp(0.0, 1.0);
                let [r, g, b] = p.color;
                ParticleInstance {
                    position: p.position.to_array(),
                    size: size * (0.5 + 0.5 * life),
                    color: [r, g, b, life * life],
                }
            })
            .collect()
    }
}

fn sample(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

fn random_unit_vector(rng: &mut StdRng) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}
