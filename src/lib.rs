//! particle-field: animated constellation background for a landing page.
//!
//! This crate provides a WASM-based canvas component that renders a field of
//! drifting, depth-shaded particles behind page content, joined by fading
//! lines and pushed aside by the mouse pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Only needed for its `js` feature, which lets `rand` seed from the browser.
use getrandom as _;

pub mod components;

pub use components::particle_field::{FieldConfig, FieldTheme, ParticleFieldCanvas};

/// Element id of the optional JSON config block embedded in the host page.
pub const CONFIG_ELEMENT_ID: &str = "particle-field-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field overrides from a script element with id="particle-field-config".
/// Expected format: JSON object with any subset of [`FieldConfig`] keys.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
		debug!("particle-field: no #{} element, using defaults", CONFIG_ELEMENT_ID);
		return None;
	};
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config ({} particles)", config.count);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the field config from the DOM and mounts the background canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Truth Event & Promotion" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
	}
}
