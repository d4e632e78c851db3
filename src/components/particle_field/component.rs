//! Leptos component wrapping the particle field canvas.
//!
//! On mount the component acquires a 2-D context, seeds the field and wires up
//! three subscriptions: window `resize`, a `ResizeObserver` on `<body>` and
//! window `mousemove`. An animation loop runs via `requestAnimationFrame`,
//! stepping and drawing the field each frame. Everything is released when the
//! component is cleaned up.
//!
//! All callbacks run on the browser's main thread and never interleave, so the
//! field is shared through `Rc<RefCell<_>>`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, ResizeObserver, Window,
};

use super::config::FieldConfig;
use super::dom;
use super::particles::ParticleField;
use super::render;
use super::theme::FieldTheme;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Live browser resources held by a mounted field. Dropping it cancels the
/// pending frame and removes every listener.
struct Subscriptions {
	window: Window,
	observer: Option<ResizeObserver>,
	on_resize: Closure<dyn FnMut()>,
	on_pointer: Closure<dyn FnMut(MouseEvent)>,
	animate: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl Drop for Subscriptions {
	fn drop(&mut self) {
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		let resize: &js_sys::Function = self.on_resize.as_ref().unchecked_ref();
		let _ = self.window.remove_event_listener_with_callback("resize", resize);
		let _ = self
			.window
			.remove_event_listener_with_callback("mousemove", self.on_pointer.as_ref().unchecked_ref());
		if let Some(ref observer) = self.observer {
			observer.disconnect();
		}
		// The frame closure holds a handle to itself.
		self.animate.borrow_mut().take();
		info!("particle-field: torn down");
	}
}

/// Validate the config once and derive the theme from the validated values.
fn prepare(config: FieldConfig) -> (FieldConfig, FieldTheme) {
	let config = config.validated();
	let theme = FieldTheme::from_config(&config);
	(config, theme)
}

/// Start the field on `canvas`. Returns `None`, having registered nothing, when
/// no drawing context or page measurement is available.
fn mount(canvas: HtmlCanvasElement, config: FieldConfig, theme: FieldTheme) -> Option<Subscriptions> {
	let window: Window = web_sys::window()?;
	let body = window.document()?.body()?;
	let mut ctx: CanvasRenderingContext2d = dom::context_2d(&canvas)?;
	dom::ensure_positioned(&window, &body);
	let surface = dom::measure_surface(&window)?;
	dom::sync_canvas_size(&canvas, surface);

	let field = ParticleField::new(config, surface, &mut rand::thread_rng());
	info!(
		"particle-field: seeded {} particles on {}x{}",
		field.particles().len(),
		surface.width,
		surface.height
	);
	let field = Rc::new(RefCell::new(field));

	let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		let Some(size) = web_sys::window().and_then(|w| dom::measure_surface(&w)) else {
			warn!("particle-field: could not measure page on resize");
			return;
		};
		if field_resize.borrow_mut().resize(size) {
			dom::sync_canvas_size(&canvas_resize, size);
			debug!("particle-field: surface now {}x{}", size.width, size.height);
		}
	});
	let resize: &js_sys::Function = on_resize.as_ref().unchecked_ref();
	let _ = window.add_event_listener_with_callback("resize", resize);
	let observer = ResizeObserver::new(resize).ok();
	match observer {
		Some(ref o) => o.observe(&body),
		None => warn!("particle-field: ResizeObserver unavailable, tracking window resizes only"),
	}

	let (field_pointer, canvas_pointer) = (field.clone(), canvas.clone());
	let on_pointer: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
		let pointer = dom::pointer_on(&canvas_pointer, ev.client_x() as f64, ev.client_y() as f64);
		field_pointer.borrow_mut().set_pointer(pointer);
	});
	let _ = window
		.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref());

	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let frame_id = Rc::new(Cell::new(None));
	let (field_anim, animate_inner, frame_inner) = (field, animate.clone(), frame_id.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		render::render_frame(&mut *field_anim.borrow_mut(), &mut ctx, &theme);
		if let Some(ref cb) = *animate_inner.borrow() {
			frame_inner.set(
				web_sys::window()
					.and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()),
			);
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
	}

	Some(Subscriptions {
		window,
		observer,
		on_resize,
		on_pointer,
		animate,
		frame_id,
	})
}

/// Renders the animated particle background.
///
/// The canvas spans the full scrollable page, sits beneath page content and
/// never receives pointer events. When the browser offers no 2-D canvas the
/// component renders an empty canvas and does nothing else.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(default = FieldConfig::default())] config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let subscriptions = StoredValue::new_local(None::<Subscriptions>);
	let (config, theme) = prepare(config);
	let style = dom::wrapper_style(&theme.backdrop_css());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if subscriptions.with_value(Option::is_some) {
			return;
		}
		match mount(canvas, config.clone(), theme.clone()) {
			Some(subs) => subscriptions.set_value(Some(subs)),
			None => warn!("particle-field: no 2d canvas context, background disabled"),
		}
	});

	on_cleanup(move || {
		let _ = subscriptions.try_update_value(|subs| subs.take());
	});

	view! {
		<div class="particle-field" aria-hidden="true" style=style>
			<canvas node_ref=canvas_ref class="particle-field-canvas" style="display: block;" />
		</div>
	}
}
