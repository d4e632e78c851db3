//! Per-frame simulation and drawing.
//!
//! A frame is a single pass over the particles in array order:
//! 1. Wash the whole surface with the translucent trail colour
//! 2. Step particle `i`, then draw it
//! 3. Join `i` to every later particle within the link distance
//!
//! Later particles have not been stepped yet when `i` draws its lines. Each
//! unordered pair is visited exactly once.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{ParticleField, link_alpha};
use super::theme::{Color, FieldTheme};

/// Drawing operations a frame needs.
pub trait Painter {
	/// Fill the rectangle `(0, 0, width, height)`.
	fn wash(&mut self, width: f64, height: f64, color: Color);
	/// Fill a circle.
	fn dot(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight segment.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Painter for CanvasRenderingContext2d {
	fn wash(&mut self, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn dot(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}
}

/// Advance the field by one frame and draw it.
pub fn render_frame<P: Painter + ?Sized>(field: &mut ParticleField, painter: &mut P, theme: &FieldTheme) {
	let surface = field.surface();
	painter.wash(surface.width, surface.height, theme.trail);

	for i in 0..field.particles().len() {
		field.step_particle(i);

		let config = field.config();
		let particles = field.particles();
		let p = &particles[i];
		painter.dot(
			p.x,
			p.y,
			p.radius(config),
			theme.accent.with_alpha(p.opacity(config)),
		);

		for other in &particles[i + 1..] {
			let alpha = link_alpha(p.distance_to(other), config);
			if alpha > 0.0 {
				painter.line(
					(p.x, p.y),
					(other.x, other.y),
					theme.line_width,
					theme.accent.with_alpha(alpha),
				);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::config::FieldConfig;
	use super::super::particles::Particle;
	use super::super::surface::{PointerState, SurfaceSize};
	use super::*;

	#[derive(Debug, PartialEq)]
	enum Op {
		Wash(f64, f64, Color),
		Dot(f64, f64, f64, Color),
		Line((f64, f64), (f64, f64), Color),
	}

	#[derive(Default)]
	struct Recorder {
		ops: Vec<Op>,
	}

	impl Painter for Recorder {
		fn wash(&mut self, width: f64, height: f64, color: Color) {
			self.ops.push(Op::Wash(width, height, color));
		}

		fn dot(&mut self, x: f64, y: f64, radius: f64, color: Color) {
			self.ops.push(Op::Dot(x, y, radius, color));
		}

		fn line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, color: Color) {
			self.ops.push(Op::Line(from, to, color));
		}
	}

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			z: 0.0,
			vx: 0.0,
			vy: 0.0,
			size: 2.0,
		}
	}

	fn far_pointer(field: &mut ParticleField) {
		field.set_pointer(PointerState { x: -1.0e6, y: -1.0e6 });
	}

	#[test]
	fn frame_starts_with_translucent_wash() {
		let theme = FieldTheme::gold();
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			SurfaceSize::new(800.0, 600.0),
			vec![still(10.0, 10.0)],
		);
		let mut rec = Recorder::default();
		render_frame(&mut field, &mut rec, &theme);

		assert_eq!(
			rec.ops[0],
			Op::Wash(800.0, 600.0, Color::rgba(0, 0, 0, 0.03))
		);
		assert_eq!(rec.ops.len(), 2);
	}

	#[test]
	fn each_pair_linked_once() {
		let theme = FieldTheme::gold();
		// Three particles, all within 150 of each other.
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			SurfaceSize::new(800.0, 600.0),
			vec![still(100.0, 100.0), still(130.0, 100.0), still(100.0, 140.0)],
		);
		far_pointer(&mut field);
		let mut rec = Recorder::default();
		render_frame(&mut field, &mut rec, &theme);

		let lines: Vec<_> = rec
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Line(a, b, _) => Some((*a, *b)),
				_ => None,
			})
			.collect();
		assert_eq!(
			lines,
			vec![
				((100.0, 100.0), (130.0, 100.0)),
				((100.0, 100.0), (100.0, 140.0)),
				((130.0, 100.0), (100.0, 140.0)),
			]
		);
	}

	#[test]
	fn distant_and_coincident_pairs_draw_nothing() {
		let theme = FieldTheme::gold();
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			SurfaceSize::new(800.0, 600.0),
			vec![still(10.0, 10.0), still(10.0, 10.0), still(400.0, 400.0)],
		);
		far_pointer(&mut field);
		let mut rec = Recorder::default();
		render_frame(&mut field, &mut rec, &theme);

		assert!(!rec.ops.iter().any(|op| matches!(op, Op::Line(..))));
		assert_eq!(
			rec.ops.iter().filter(|op| matches!(op, Op::Dot(..))).count(),
			3
		);
	}

	#[test]
	fn line_opacity_follows_distance() {
		let theme = FieldTheme::gold();
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			SurfaceSize::new(800.0, 600.0),
			vec![still(100.0, 100.0), still(175.0, 100.0)],
		);
		far_pointer(&mut field);
		let mut rec = Recorder::default();
		render_frame(&mut field, &mut rec, &theme);

		let color = rec
			.ops
			.iter()
			.find_map(|op| match op {
				Op::Line(_, _, c) => Some(*c),
				_ => None,
			})
			.unwrap();
		assert_eq!((color.r, color.g, color.b), (212, 175, 55));
		assert!((color.a - 0.125).abs() < 1e-12);
	}

	#[test]
	fn lines_use_positions_of_the_current_pass() {
		let theme = FieldTheme::gold();
		let moving = Particle {
			vx: 1.0,
			..still(100.0, 100.0)
		};
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			SurfaceSize::new(800.0, 600.0),
			vec![still(50.0, 100.0), moving],
		);
		far_pointer(&mut field);
		let mut rec = Recorder::default();
		render_frame(&mut field, &mut rec, &theme);

		// Particle 0 links before particle 1 has been stepped.
		let ends = rec.ops.iter().find_map(|op| match op {
			Op::Line(a, b, _) => Some((*a, *b)),
			_ => None,
		});
		assert_eq!(ends, Some(((50.0, 100.0), (100.0, 100.0))));
		assert_eq!(field.particles()[1].x, 101.0);
	}

	#[test]
	fn full_field_draws_every_particle() {
		let theme = FieldTheme::gold();
		let mut rng = StdRng::seed_from_u64(11);
		let mut field =
			ParticleField::new(FieldConfig::default(), SurfaceSize::new(1280.0, 3000.0), &mut rng);
		let mut rec = Recorder::default();
		render_frame(&mut field, &mut rec, &theme);

		let dots = rec.ops.iter().filter(|op| matches!(op, Op::Dot(..))).count();
		let lines = rec.ops.iter().filter(|op| matches!(op, Op::Line(..))).count();
		assert_eq!(dots, 200);
		assert!(lines <= 200 * 199 / 2);
		for op in &rec.ops {
			if let Op::Dot(_, _, radius, color) = op {
				assert!(*radius > 0.0 && *radius < 3.0);
				assert!(color.a > 0.4 && color.a <= 1.0);
			}
		}
	}
}
