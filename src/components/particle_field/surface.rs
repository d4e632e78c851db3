//! Surface dimensions and pointer position.
//!
//! Both live in page space: the origin is the top-left corner of the document,
//! not of the viewport, so the field covers the whole scrollable page.
//!
//! These are plain values owned by the renderer. Signal handlers write them and
//! the frame callback reads them; both run on the browser's main thread and
//! never interleave, so no synchronization is involved.

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
	pub width: f64,
	pub height: f64,
}

impl SurfaceSize {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Size covering the viewport width and the taller of the viewport and the
	/// scrollable content.
	pub fn fit(viewport_width: f64, viewport_height: f64, content_height: f64) -> Self {
		Self {
			width: viewport_width,
			height: content_height.max(viewport_height),
		}
	}

	/// Backing-store dimensions for a canvas element.
	pub fn pixels(self) -> (u32, u32) {
		(self.width.max(0.0) as u32, self.height.max(0.0) as u32)
	}
}

/// Last known pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
}

impl PointerState {
	/// Convert client (viewport) coordinates to page coordinates.
	pub fn from_client(client_x: f64, client_y: f64, scroll_y: f64) -> Self {
		Self {
			x: client_x,
			y: client_y + scroll_y,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fit_never_smaller_than_viewport() {
		assert_eq!(
			SurfaceSize::fit(1280.0, 800.0, 3200.0),
			SurfaceSize::new(1280.0, 3200.0)
		);
		assert_eq!(
			SurfaceSize::fit(1280.0, 800.0, 400.0),
			SurfaceSize::new(1280.0, 800.0)
		);
	}

	#[test]
	fn pointer_adds_scroll_offset() {
		let p = PointerState::from_client(40.0, 30.0, 1200.0);
		assert_eq!(p, PointerState { x: 40.0, y: 1230.0 });
	}

	#[test]
	fn pixels_truncate() {
		assert_eq!(SurfaceSize::new(800.7, 600.2).pixels(), (800, 600));
	}
}
