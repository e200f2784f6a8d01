//! Animated particle field with proximity links.
//!
//! Renders a 2-D field of points on an HTML canvas and connects points that
//! are closer than a threshold, with line opacity encoding distance:
//! - Pointer-follow mode: a pointer-driven anchor links to a static field
//! - Free-physics mode: particles drift, bounce off the edges and link to
//!   each other
//! - Device-pixel-ratio aware sizing that keeps geometry in logical pixels
//! - A [`FieldControls`] handle for an external settings panel
//!
//! The engine itself is plain Rust and draws through the [`Surface`] trait;
//! only [`canvas`] and [`ParticleFieldCanvas`] touch the browser.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldControls, FieldMode, ParticleFieldCanvas};
//!
//! let controls = FieldControls::new();
//! view! { <ParticleFieldCanvas mode=FieldMode::Free controls=controls.clone() /> }
//! // later, from the settings panel:
//! controls.set_point_count(60);
//! ```

use serde::Deserialize;

pub mod canvas;
mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod links;
pub mod motion;
pub mod particles;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod theme;

pub use component::{FieldControls, ParticleFieldCanvas};
pub use config::{Config, ConfigChange, ConfigPatch, ConfigStore, ConfigValue};
pub use engine::FieldEngine;
pub use error::FieldError;
pub use links::Link;
pub use motion::{Anchor, MotionModel};
pub use particles::{Particle, ParticleField};
pub use render::Surface;
pub use scheduler::{FrameHost, FrameScheduler, SchedulerState};
pub use surface::{SurfaceAdapter, SurfaceDimensions};
pub use theme::{Color, Theme};

/// Which variant of the field an engine runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
	/// One pointer-controlled anchor linked to a static field.
	#[default]
	Pointer,
	/// Mobile particles linked to each other, reflecting off the bounds.
	Free,
}
