//! Browser measurement and canvas helpers.
//!
//! The canvas lives inside a wrapper pinned to `<body>` with `overflow: hidden`,
//! so the canvas never contributes to the document's scroll height. Measuring
//! `scrollHeight` therefore sees page content only, and the surface can shrink
//! as well as grow.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};

use super::surface::{PointerState, SurfaceSize};

/// Inline style for the element wrapping the canvas.
pub fn wrapper_style(backdrop_css: &str) -> String {
	format!(
		"position: absolute; inset: 0; min-height: 100vh; overflow: hidden; \
		 pointer-events: none; z-index: 0; background: {};",
		backdrop_css
	)
}

/// Explicit CSS `(width, height)` for the canvas, so its layout box never
/// depends on the backing store's aspect ratio.
pub fn canvas_css_size(size: SurfaceSize) -> (String, String) {
	let (w, h) = size.pixels();
	(format!("{}px", w), format!("{}px", h))
}

/// Whether a computed `position` value leaves the element unpositioned.
pub fn is_static_position(position: &str) -> bool {
	matches!(position.trim(), "" | "static")
}

/// Make `<body>` the wrapper's containing block.
pub fn ensure_positioned(window: &Window, body: &HtmlElement) {
	let position = window
		.get_computed_style(body)
		.ok()
		.flatten()
		.and_then(|style| style.get_property_value("position").ok())
		.unwrap_or_default();
	if is_static_position(&position) {
		let _ = body.style().set_property("position", "relative");
		debug!("particle-field: positioned <body> for the backdrop");
	}
}

/// Measure the page: viewport width by the taller of the viewport and the
/// scrollable document.
pub fn measure_surface(window: &Window) -> Option<SurfaceSize> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	let content = window
		.document()
		.and_then(|d| d.document_element())
		.map(|el| el.scroll_height() as f64)
		.unwrap_or(0.0);
	Some(SurfaceSize::fit(width, height, content))
}

/// Pointer position in canvas space. The canvas top is above the viewport by
/// however far the page has scrolled.
pub fn pointer_on(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> PointerState {
	let rect = canvas.get_bounding_client_rect();
	PointerState::from_client(client_x - rect.left(), client_y, -rect.top())
}

/// `None` when the environment offers no 2-D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Resize the backing store and the CSS box together. Assigning a canvas
/// dimension clears it, so unchanged sizes are left alone.
pub fn sync_canvas_size(canvas: &HtmlCanvasElement, size: SurfaceSize) {
	let (w, h) = size.pixels();
	if canvas.width() != w {
		canvas.set_width(w);
	}
	if canvas.height() != h {
		canvas.set_height(h);
	}
	let (css_w, css_h) = canvas_css_size(size);
	let style = canvas.style();
	let _ = style.set_property("width", &css_w);
	let _ = style.set_property("height", &css_h);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wrapper_clips_the_canvas_out_of_page_overflow() {
		let style = wrapper_style("#000");
		assert!(style.contains("position: absolute"));
		assert!(style.contains("inset: 0"));
		assert!(style.contains("overflow: hidden"));
		assert!(style.contains("pointer-events: none"));
		assert!(style.ends_with("background: #000;"));
	}

	#[test]
	fn canvas_box_is_sized_explicitly() {
		// A widened viewport must not scale the height through the aspect ratio.
		let (w, h) = canvas_css_size(SurfaceSize::new(1600.0, 3000.0));
		assert_eq!((w.as_str(), h.as_str()), ("1600px", "3000px"));
	}

	#[test]
	fn static_position_detection() {
		assert!(is_static_position("static"));
		assert!(is_static_position(""));
		assert!(!is_static_position("relative"));
		assert!(!is_static_position("absolute"));
	}
}
