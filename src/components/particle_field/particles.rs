//! Particle state and per-frame physics.

use rand::Rng;

use super::config::FieldConfig;
use super::surface::{PointerState, SurfaceSize};

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Pseudo-depth. Only affects scale and opacity; never changes after seeding.
	pub z: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Outward force magnitude in `[0, 1)` for a particle `dist` away from the pointer.
///
/// Zero at or beyond `radius`, and zero at `dist == 0` where there is no
/// direction to push along.
pub fn repulsion_force(dist: f64, radius: f64) -> f64 {
	if dist > 0.0 && dist < radius {
		(radius - dist) / radius
	} else {
		0.0
	}
}

/// Opacity of the line joining two particles `distance` apart.
/// Coincident particles draw nothing.
pub fn link_alpha(distance: f64, config: &FieldConfig) -> f64 {
	if distance > 0.0 && distance < config.link_distance {
		(1.0 - distance / config.link_distance) * config.link_opacity
	} else {
		0.0
	}
}

impl Particle {
	/// Seed a particle uniformly inside the surface.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig, surface: SurfaceSize) -> Self {
		Self {
			x: sample(rng, 0.0, surface.width),
			y: sample(rng, 0.0, surface.height),
			z: sample(rng, 0.0, config.depth_range),
			vx: sample(rng, -config.max_speed, config.max_speed),
			vy: sample(rng, -config.max_speed, config.max_speed),
			size: sample(rng, config.size_min, config.size_max),
		}
	}

	/// Perspective divide: 1.0 at depth 0, shrinking toward 0.5 at full depth.
	pub fn depth_scale(&self, config: &FieldConfig) -> f64 {
		config.depth_range / (config.depth_range + self.z)
	}

	pub fn opacity(&self, config: &FieldConfig) -> f64 {
		config.min_opacity + self.depth_scale(config) * (1.0 - config.min_opacity)
	}

	pub fn radius(&self, config: &FieldConfig) -> f64 {
		self.size * self.depth_scale(config)
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Push the particle away from the pointer.
	pub fn repel(&mut self, pointer: PointerState, config: &FieldConfig) {
		let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
		let dist = (dx * dx + dy * dy).sqrt();
		let force = repulsion_force(dist, config.repulsion_radius);
		if force > 0.0 {
			self.vx -= (dx / dist) * force * config.repulsion_strength;
			self.vy -= (dy / dist) * force * config.repulsion_strength;
		}
	}

	/// Integrate position, then damp velocity.
	pub fn advance(&mut self, config: &FieldConfig) {
		self.x += self.vx;
		self.y += self.vy;
		self.vx *= config.damping;
		self.vy *= config.damping;
	}

	/// Toroidal wrap: leaving one edge lands exactly on the opposite edge.
	pub fn wrap(&mut self, surface: SurfaceSize) {
		if self.x < 0.0 {
			self.x = surface.width;
		} else if self.x > surface.width {
			self.x = 0.0;
		}
		if self.y < 0.0 {
			self.y = surface.height;
		} else if self.y > surface.height {
			self.y = 0.0;
		}
	}

	pub fn step(&mut self, pointer: PointerState, surface: SurfaceSize, config: &FieldConfig) {
		self.repel(pointer, config);
		self.advance(config);
		self.wrap(surface);
	}
}

/// The full particle set plus the two cells the signal handlers write.
pub struct ParticleField {
	particles: Vec<Particle>,
	surface: SurfaceSize,
	pointer: PointerState,
	config: FieldConfig,
}

impl ParticleField {
	pub fn new<R: Rng + ?Sized>(config: FieldConfig, surface: SurfaceSize, rng: &mut R) -> Self {
		let particles = (0..config.count)
			.map(|_| Particle::random(&mut *rng, &config, surface))
			.collect();
		Self::with_particles(config, surface, particles)
	}

	/// Build a field from explicit particles.
	pub fn with_particles(config: FieldConfig, surface: SurfaceSize, particles: Vec<Particle>) -> Self {
		Self {
			particles,
			surface,
			pointer: PointerState::default(),
			config,
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn surface(&self) -> SurfaceSize {
		self.surface
	}

	pub fn set_pointer(&mut self, pointer: PointerState) {
		self.pointer = pointer;
	}

	/// Update the wrap bounds. Particles keep their absolute positions.
	/// Returns whether the size changed.
	pub fn resize(&mut self, surface: SurfaceSize) -> bool {
		if self.surface == surface {
			return false;
		}
		self.surface = surface;
		true
	}

	/// Advance a single particle by one frame.
	pub fn step_particle(&mut self, idx: usize) {
		let (pointer, surface) = (self.pointer, self.surface);
		if let Some(p) = self.particles.get_mut(idx) {
			p.step(pointer, surface, &self.config);
		}
	}

	/// Advance every particle by one frame without drawing.
	pub fn step(&mut self) {
		for idx in 0..self.particles.len() {
			self.step_particle(idx);
		}
	}
}
