//! Tuning constants for the particle field.
//!
//! Every value can be overridden from JSON embedded in the host page; missing
//! keys keep their defaults.

use serde::Deserialize;

/// Largest accepted particle count. Links are an O(n²) scan per frame.
pub const MAX_PARTICLES: usize = 1000;

/// Simulation and drawing parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles. Fixed for the lifetime of a renderer.
	pub count: usize,
	/// Upper bound (exclusive) of the pseudo-depth range. Also the numerator of
	/// the perspective scale.
	pub depth_range: f64,
	/// Initial velocity components are drawn from `[-max_speed, max_speed)`.
	pub max_speed: f64,
	/// Smallest particle radius at depth 0.
	pub size_min: f64,
	/// Largest particle radius at depth 0 (exclusive).
	pub size_max: f64,
	/// Distance within which the pointer pushes particles away.
	pub repulsion_radius: f64,
	/// Velocity impulse applied at full repulsion force.
	pub repulsion_strength: f64,
	/// Per-frame velocity multiplier.
	pub damping: f64,
	/// Distance below which two particles are joined by a line.
	pub link_distance: f64,
	/// Line opacity for two particles at zero distance.
	pub link_opacity: f64,
	/// Opacity of the farthest particle. Nearer particles approach 1.0.
	pub min_opacity: f64,
	/// Stroke width of connective lines.
	pub line_width: f64,
	/// Alpha of the black wash painted over the surface each frame.
	pub trail_alpha: f64,
	/// Optional CSS colour for particles and lines (`#rrggbb`, `rgb()`, `rgba()`).
	pub accent: Option<String>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			count: 200,
			depth_range: 1000.0,
			max_speed: 0.15,
			size_min: 1.0,
			size_max: 3.0,
			repulsion_radius: 200.0,
			repulsion_strength: 0.3,
			damping: 0.98,
			link_distance: 150.0,
			link_opacity: 0.25,
			min_opacity: 0.4,
			line_width: 0.8,
			trail_alpha: 0.03,
			accent: None,
		}
	}
}

impl FieldConfig {
	/// Replace unusable values with their defaults.
	///
	/// Seeding draws from half-open ranges, so an empty range would panic;
	/// those and any non-finite value fall back here.
	pub fn validated(self) -> Self {
		let d = Self::default();
		let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
		let non_negative =
			|v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };
		let unit = |v: f64, fallback: f64| {
			if v.is_finite() && (0.0..=1.0).contains(&v) {
				v
			} else {
				fallback
			}
		};

		let (size_min, size_max) = if self.size_min.is_finite()
			&& self.size_max.is_finite()
			&& self.size_min >= 0.0
			&& self.size_min < self.size_max
		{
			(self.size_min, self.size_max)
		} else {
			(d.size_min, d.size_max)
		};

		Self {
			count: self.count.min(MAX_PARTICLES),
			depth_range: positive(self.depth_range, d.depth_range),
			max_speed: positive(self.max_speed, d.max_speed),
			size_min,
			size_max,
			repulsion_radius: non_negative(self.repulsion_radius, d.repulsion_radius),
			repulsion_strength: non_negative(self.repulsion_strength, d.repulsion_strength),
			damping: unit(self.damping, d.damping),
			link_distance: non_negative(self.link_distance, d.link_distance),
			link_opacity: unit(self.link_opacity, d.link_opacity),
			min_opacity: unit(self.min_opacity, d.min_opacity),
			line_width: positive(self.line_width, d.line_width),
			trail_alpha: unit(self.trail_alpha, d.trail_alpha),
			accent: self.accent,
		}
	}

	/// Parse a JSON override. Unknown keys are ignored, missing keys default.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::validated)
	}
}
