//! Tunable parameters and the store the control panel mutates.
//!
//! Setters replace exactly one field and report what kind of change happened,
//! leaving it to the engine to decide whether the particle set has to be
//! regenerated. No range validation happens here: the engine tolerates any
//! value (a zero connection distance simply yields no links, a non-positive
//! count an empty field).

use serde::Deserialize;

use super::error::FieldError;
use super::theme::Color;
use super::FieldMode;

/// Runtime configuration read by every component each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	/// Number of field particles. Values `<= 0` produce an empty field.
	pub point_count: i64,
	/// Links are drawn between points closer than this (logical px).
	pub connection_distance: f64,
	/// Particle radius (logical px).
	pub point_size: f64,
	/// Radius of the pointer anchor (logical px).
	pub anchor_size: f64,
	/// Base color of links, glow and the anchor.
	pub color: Color,
	/// Shadow blur applied to links and points; the anchor uses 1.5x.
	pub glow_intensity: f64,
	/// Free mode velocity scale. Applied both when velocities are drawn and
	/// on every tick.
	pub speed: f64,
}

impl Config {
	/// Defaults for the pointer-follow field.
	pub fn pointer() -> Self {
		Self {
			point_count: 20,
			connection_distance: 200.0,
			point_size: 3.0,
			anchor_size: 8.0,
			color: Color::rgb(0x64, 0xcc, 0xff),
			glow_intensity: 10.0,
			speed: 0.0,
		}
	}

	/// Defaults for the free-physics field.
	pub fn free() -> Self {
		Self {
			point_count: 30,
			connection_distance: 100.0,
			point_size: 4.0,
			anchor_size: 0.0,
			color: Color::rgb(0x66, 0x66, 0x66),
			glow_intensity: 0.0,
			speed: 1.0,
		}
	}

	/// Defaults for `mode`.
	pub fn for_mode(mode: FieldMode) -> Self {
		match mode {
			FieldMode::Pointer => Self::pointer(),
			FieldMode::Free => Self::free(),
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::pointer()
	}
}

/// Partial configuration, as supplied by a page's setup document.
///
/// Absent fields keep whatever the base configuration has.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPatch {
	/// Overrides [`Config::point_count`].
	pub point_count: Option<i64>,
	/// Overrides [`Config::connection_distance`].
	pub connection_distance: Option<f64>,
	/// Overrides [`Config::point_size`].
	pub point_size: Option<f64>,
	/// Overrides [`Config::anchor_size`].
	pub anchor_size: Option<f64>,
	/// Overrides [`Config::color`]; given as a hex string.
	pub color: Option<Color>,
	/// Overrides [`Config::glow_intensity`].
	pub glow_intensity: Option<f64>,
	/// Overrides [`Config::speed`].
	pub speed: Option<f64>,
}

impl ConfigPatch {
	/// Every present field, as assignments.
	pub fn values(&self) -> Vec<ConfigValue> {
		[
			self.point_count.map(ConfigValue::PointCount),
			self.connection_distance.map(ConfigValue::ConnectionDistance),
			self.point_size.map(ConfigValue::PointSize),
			self.anchor_size.map(ConfigValue::AnchorSize),
			self.color.map(ConfigValue::Color),
			self.glow_intensity.map(ConfigValue::GlowIntensity),
			self.speed.map(ConfigValue::Speed),
		]
		.into_iter()
		.flatten()
		.collect()
	}

	/// `base` with every present field replaced.
	pub fn apply_to(&self, base: Config) -> Config {
		let mut store = ConfigStore::new(base);
		for value in self.values() {
			store.set(value);
		}
		store.config
	}
}

/// A single field assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigValue {
	/// New [`Config::color`].
	Color(Color),
	/// New [`Config::point_count`].
	PointCount(i64),
	/// New [`Config::connection_distance`].
	ConnectionDistance(f64),
	/// New [`Config::point_size`].
	PointSize(f64),
	/// New [`Config::anchor_size`].
	AnchorSize(f64),
	/// New [`Config::glow_intensity`].
	GlowIntensity(f64),
	/// New [`Config::speed`].
	Speed(f64),
}

/// What a setter touched, from the engine's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigChange {
	/// Only affects how things are drawn.
	Appearance,
	/// Particle radius changed.
	PointSize,
	/// Particle count changed; the field must be rebuilt.
	Population,
	/// Speed or connection distance changed; free mode rebuilds the field.
	Kinematics,
}

impl ConfigChange {
	/// Whether this change invalidates the particle set in `mode`.
	pub fn regenerates(self, mode: FieldMode) -> bool {
		match self {
			ConfigChange::Population => true,
			ConfigChange::Kinematics => mode == FieldMode::Free,
			ConfigChange::Appearance | ConfigChange::PointSize => false,
		}
	}
}

/// Owns the [`Config`] for one engine instance.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
	config: Config,
}

impl ConfigStore {
	/// Store seeded with `config`.
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Current configuration.
	pub fn get(&self) -> &Config {
		&self.config
	}

	/// Replaces the named field, leaving all others untouched.
	pub fn set(&mut self, value: ConfigValue) -> ConfigChange {
		let c = &mut self.config;
		match value {
			ConfigValue::Color(v) => {
				c.color = v;
				ConfigChange::Appearance
			}
			ConfigValue::PointCount(v) => {
				c.point_count = v;
				ConfigChange::Population
			}
			ConfigValue::ConnectionDistance(v) => {
				c.connection_distance = v;
				ConfigChange::Kinematics
			}
			ConfigValue::PointSize(v) => {
				c.point_size = v;
				ConfigChange::PointSize
			}
			ConfigValue::AnchorSize(v) => {
				c.anchor_size = v;
				ConfigChange::Appearance
			}
			ConfigValue::GlowIntensity(v) => {
				c.glow_intensity = v;
				ConfigChange::Appearance
			}
			ConfigValue::Speed(v) => {
				c.speed = v;
				ConfigChange::Kinematics
			}
		}
	}

	/// Sets the base color from a hex string. On a parse failure the
	/// previous color is kept.
	pub fn set_color(&mut self, hex: &str) -> Result<ConfigChange, FieldError> {
		let color = Color::from_hex(hex)?;
		Ok(self.set(ConfigValue::Color(color)))
	}
}
