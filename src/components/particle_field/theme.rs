//! Colours and backdrop styling for the particle field.

use log::warn;

use super::config::FieldConfig;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let s = color_str.trim();
		if s.starts_with('#') && s.len() == 7 {
			let r = u8::from_str_radix(s.get(1..3)?, 16).ok()?;
			let g = u8::from_str_radix(s.get(3..5)?, 16).ok()?;
			let b = u8::from_str_radix(s.get(5..7)?, 16).ok()?;
			Some(Color::rgb(r, g, b))
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums.first()?.trim().parse().ok()?;
			let g = nums.get(1)?.trim().parse().ok()?;
			let b = nums.get(2)?.trim().parse().ok()?;
			let a = match nums.get(3) {
				Some(a) => a.trim().parse().ok()?,
				None => 1.0,
			};
			Some(Color::rgba(r, g, b, a))
		} else {
			None
		}
	}
}

/// Visual styling resolved once when the field mounts.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	/// Particle and line colour. Alpha is replaced per draw call.
	pub accent: Color,
	/// Wash painted over the whole surface at the start of every frame.
	pub trail: Color,
	/// Connective line stroke width.
	pub line_width: f64,
	/// Static CSS gradient behind the canvas (top colour).
	pub backdrop_top: Color,
	/// Static CSS gradient behind the canvas (bottom colour).
	pub backdrop_bottom: Color,
}

impl FieldTheme {
	/// Muted gold accent on near-black (default)
	pub fn gold() -> Self {
		Self {
			accent: Color::rgb(212, 175, 55),
			trail: Color::rgba(0, 0, 0, 0.03),
			line_width: 0.8,
			backdrop_top: Color::rgb(0, 0, 0),
			backdrop_bottom: Color::rgb(10, 10, 10),
		}
	}

	/// Gold theme with the config's accent, trail and stroke overrides applied.
	/// An unparsable accent keeps the default.
	pub fn from_config(config: &FieldConfig) -> Self {
		let base = Self::gold();
		let accent = config
			.accent
			.as_deref()
			.and_then(|css| {
				let parsed = Color::parse(css);
				if parsed.is_none() {
					warn!("particle-field: ignoring unparsable accent colour {:?}", css);
				}
				parsed
			})
			.unwrap_or(base.accent);

		Self {
			accent,
			trail: base.trail.with_alpha(config.trail_alpha),
			line_width: config.line_width,
			..base
		}
	}

	/// CSS `background` value for the canvas element.
	pub fn backdrop_css(&self) -> String {
		format!(
			"linear-gradient(to bottom, {}, {})",
			self.backdrop_top.to_css(),
			self.backdrop_bottom.to_css()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(212, 175, 55).to_css(), "#d4af37");
		assert_eq!(
			Color::rgb(212, 175, 55).with_alpha(0.5).to_css(),
			"rgba(212, 175, 55, 0.5)"
		);
	}

	#[test]
	fn parses_hex_and_functional_notation() {
		assert_eq!(Color::parse("#d4af37"), Some(Color::rgb(212, 175, 55)));
		assert_eq!(
			Color::parse("rgba(1, 2, 3, 0.5)"),
			Some(Color::rgba(1, 2, 3, 0.5))
		);
		assert_eq!(Color::parse("rgb(10,20,30)"), Some(Color::rgb(10, 20, 30)));
		assert_eq!(Color::parse("gold"), None);
		assert_eq!(Color::parse("#zzzzzz"), None);
	}

	#[test]
	fn theme_from_config() {
		let config = FieldConfig {
			accent: Some("#ffffff".into()),
			..FieldConfig::default()
		};
		let theme = FieldTheme::from_config(&config);
		assert_eq!(theme.accent, Color::rgb(255, 255, 255));
		assert_eq!(theme.trail.a, 0.03);

		let fallback = FieldTheme::from_config(&FieldConfig {
			accent: Some("not a colour".into()),
			..FieldConfig::default()
		});
		assert_eq!(fallback.accent, FieldTheme::gold().accent);
	}

	#[test]
	fn backdrop_gradient() {
		assert_eq!(
			FieldTheme::gold().backdrop_css(),
			"linear-gradient(to bottom, #000000, #0a0a0a)"
		);
	}
}
