//! particle-field: animated proximity-linked particle field.
//!
//! This crate provides a WASM canvas component that renders a field of points
//! connected by distance-weighted links, either following the pointer or
//! drifting freely and bouncing off the viewport edges.

// Only pulled in to enable its `js` backend for `rand` on wasm32.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	Config, ConfigPatch, FieldControls, FieldEngine, FieldError, FieldMode, ParticleFieldCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Page-level setup: which field to run and how to tune it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldSetup {
	/// Which field to run.
	pub mode: FieldMode,
	/// Overrides applied on top of the mode's defaults.
	pub config: ConfigPatch,
	/// Start animating as soon as the canvas mounts.
	pub autostart: bool,
}

impl Default for FieldSetup {
	fn default() -> Self {
		Self {
			mode: FieldMode::Pointer,
			config: ConfigPatch::default(),
			autostart: true,
		}
	}
}

impl FieldSetup {
	/// The mode's defaults with the setup's overrides applied.
	pub fn resolved_config(&self) -> Config {
		self.config.apply_to(Config::for_mode(self.mode))
	}
}

/// Load the field setup from a script element with id="field-config".
/// Expected format: JSON with { mode, config: {...}, autostart }, all optional.
fn load_field_setup() -> Option<FieldSetup> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldSetup>(&json_text) {
		Ok(setup) => {
			info!("particle-field: loaded {:?} setup", setup.mode);
			Some(setup)
		}
		Err(e) => {
			warn!("particle-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the setup from the DOM and renders the particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let setup = load_field_setup().unwrap_or_default();
	let config = setup.resolved_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-field">
			<ParticleFieldCanvas
				mode=setup.mode
				config=Some(config)
				autostart=setup.autostart
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::Color;

	#[test]
	fn empty_setup_uses_pointer_defaults() {
		let setup: FieldSetup = serde_json::from_str("{}").unwrap();
		assert_eq!(setup, FieldSetup::default());
		assert_eq!(setup.resolved_config(), Config::pointer());
	}

	#[test]
	fn free_setup_layers_overrides_on_free_defaults() {
		let setup: FieldSetup = serde_json::from_str(
			r##"{ "mode": "free", "autostart": false, "config": { "speed": 2.5, "color": "#000" } }"##,
		)
		.unwrap();

		assert_eq!(setup.mode, FieldMode::Free);
		assert!(!setup.autostart);
		let config = setup.resolved_config();
		assert_eq!(config.speed, 2.5);
		assert_eq!(config.color, Color::rgb(0, 0, 0));
		assert_eq!(config.point_count, Config::free().point_count);
	}

	#[test]
	fn unknown_mode_is_rejected() {
		assert!(serde_json::from_str::<FieldSetup>(r#"{ "mode": "orbit" }"#).is_err());
	}
}
