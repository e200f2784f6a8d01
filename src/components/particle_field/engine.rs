//! The mutable engine object one animation instance owns.
//!
//! Bundles configuration, surface size, particles and motion so the frame
//! callback and input handlers share a single piece of explicit state instead
//! of each capturing their own copies.

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{Config, ConfigChange, ConfigStore, ConfigValue};
use super::error::FieldError;
use super::links::{anchor_links, pair_links, Link};
use super::motion::{Anchor, MotionModel};
use super::particles::{Generation, ParticleField, FIELD_MARGIN};
use super::render::{draw_anchor, draw_background, draw_links, draw_particles, Surface};
use super::surface::{SurfaceAdapter, SurfaceDimensions};
use super::theme::Theme;
use super::FieldMode;

/// Particle field state advanced once per frame.
///
/// `R` is the random source used for placement; runtime code uses a
/// time-seeded [`SmallRng`], tests pass a fixed seed.
pub struct FieldEngine<R = SmallRng> {
	mode: FieldMode,
	config: ConfigStore,
	surface: SurfaceAdapter,
	field: ParticleField,
	motion: MotionModel,
	theme: Theme,
	rng: R,
}

impl FieldEngine<SmallRng> {
	/// Engine with a [`SmallRng`] seeded from `seed`.
	pub fn new(mode: FieldMode, config: Config, dims: SurfaceDimensions, seed: u64) -> Self {
		Self::with_rng(mode, config, dims, SmallRng::seed_from_u64(seed))
	}
}

impl<R: Rng> FieldEngine<R> {
	/// Builds the engine and generates the initial field.
	pub fn with_rng(mode: FieldMode, config: Config, dims: SurfaceDimensions, rng: R) -> Self {
		let surface = SurfaceAdapter::new(dims);
		let motion = MotionModel::for_mode(mode, surface.bounds());
		let mut engine = Self {
			mode,
			config: ConfigStore::new(config),
			surface,
			field: ParticleField::default(),
			motion,
			theme: Theme::for_mode(mode),
			rng,
		};
		engine.regenerate();
		engine
	}

	/// Mode fixed at construction.
	pub fn mode(&self) -> FieldMode {
		self.mode
	}

	/// Current configuration.
	pub fn config(&self) -> &Config {
		self.config.get()
	}

	/// Surface size and backing buffer.
	pub fn surface(&self) -> &SurfaceAdapter {
		&self.surface
	}

	/// Current particles.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Direct access to the particles, e.g. to place them by hand.
	pub fn field_mut(&mut self) -> &mut ParticleField {
		&mut self.field
	}

	/// The pointer anchor; `None` in free mode.
	pub fn anchor(&self) -> Option<Anchor> {
		self.motion.anchor()
	}

	/// Rebuilds the particle set from the current configuration and bounds.
	pub fn regenerate(&mut self) {
		let config = self.config.get();
		let params = match self.mode {
			FieldMode::Pointer => Generation {
				count: config.point_count,
				margin: FIELD_MARGIN,
				radius: config.point_size,
				speed: 0.0,
			},
			FieldMode::Free => Generation {
				count: config.point_count,
				margin: config.point_size.max(0.0),
				radius: config.point_size,
				speed: config.speed,
			},
		};
		if params.count <= 0 {
			warn!("particle-field: point count {} leaves the field empty", params.count);
		}

		let bounds = self.surface.bounds();
		self.field.regenerate(&params, bounds, &mut self.rng);
		self.motion.recenter(bounds);
		info!("particle-field: generated {} particles", self.field.len());
	}

	/// Applies new surface dimensions. Particles keep their positions.
	pub fn resize(&mut self, dims: SurfaceDimensions) {
		self.surface.resize(dims);
		let (w, h) = self.surface.backing_size();
		debug!(
			"particle-field: resized to {}x{} logical, {}x{} backing",
			dims.width, dims.height, w, h
		);
	}

	/// Moves the anchor to a surface-local logical coordinate.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.motion.pointer_moved(x, y, self.surface.bounds());
	}

	/// Assigns one configuration field, regenerating the field when the
	/// change invalidates it.
	pub fn apply(&mut self, value: ConfigValue) {
		let change = self.config.set(value);
		self.react(change);
	}

	/// Sets the base color from a hex string; the old color stays on error.
	pub fn set_color(&mut self, hex: &str) -> Result<(), FieldError> {
		let change = self.config.set_color(hex)?;
		self.react(change);
		Ok(())
	}

	fn react(&mut self, change: ConfigChange) {
		if change.regenerates(self.mode) {
			self.regenerate();
		} else if change == ConfigChange::PointSize {
			self.field.set_radius(self.config.get().point_size);
		}
	}

	/// Advances motion by one frame.
	pub fn tick(&mut self) {
		let speed = self.config.get().speed;
		self.motion.tick(&mut self.field, self.surface.bounds(), speed);
	}

	/// Links for the current particle positions.
	pub fn links(&self) -> Vec<Link> {
		let threshold = self.config.get().connection_distance;
		match self.motion.anchor() {
			Some(anchor) => anchor_links(anchor, self.field.particles(), threshold),
			None => pair_links(self.field.particles(), threshold),
		}
	}

	/// Runs one frame: clear, tick, draw links, draw particles, draw the
	/// anchor. `time_secs` drives the link curvature wave.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &S, time_secs: f64) -> Result<(), FieldError> {
		if !surface.is_attached() {
			return Err(FieldError::SurfaceDetached);
		}

		draw_background(
			surface,
			self.surface.transform(),
			self.surface.bounds(),
			&self.theme,
		);
		self.tick();

		let config = self.config.get();
		draw_links(surface, &self.links(), config, &self.theme, time_secs);
		draw_particles(surface, self.field.particles(), config, &self.theme);
		if let Some(anchor) = self.motion.anchor() {
			draw_anchor(surface, anchor, config);
		}
		Ok(())
	}
}
