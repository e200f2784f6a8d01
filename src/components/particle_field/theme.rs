//! Colors and the per-mode look of the field.

use serde::Deserialize;

use super::error::FieldError;
use super::FieldMode;

/// Opaque RGB color. Translucency is applied per draw call, see
/// [`Color::to_css_with_alpha_byte`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Color {
	/// `#000000`.
	pub const BLACK: Color = Color::rgb(0, 0, 0);

	/// Color from its three channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parses `#RRGGBB` or the short `#RGB` form. Case-insensitive.
	pub fn from_hex(hex: &str) -> Result<Self, FieldError> {
		let invalid = || FieldError::InvalidColor(hex.to_string());
		let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
		// from_str_radix would also take a leading sign
		if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(invalid());
		}

		let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
		match digits.len() {
			6 => Ok(Self::rgb(
				channel(&digits[0..2])?,
				channel(&digits[2..4])?,
				channel(&digits[4..6])?,
			)),
			3 => {
				// #abc is shorthand for #aabbcc
				let short = |s: &str| channel(s).map(|v| v * 17);
				Ok(Self::rgb(
					short(&digits[0..1])?,
					short(&digits[1..2])?,
					short(&digits[2..3])?,
				))
			}
			_ => Err(invalid()),
		}
	}

	/// Six-digit lowercase hex, e.g. `#64ccff`.
	pub fn to_css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Eight-digit hex with an explicit alpha byte, e.g. `#64ccff80`.
	pub fn to_css_with_alpha_byte(self, alpha: u8) -> String {
		format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, alpha)
	}
}

impl TryFrom<String> for Color {
	type Error = FieldError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::from_hex(&value)
	}
}

/// Fixed visual treatment for one operating mode.
///
/// The configurable color lives in [`Config`](super::config::Config); the
/// theme holds what the control panel cannot change.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Fill painted under everything each frame. `None` leaves the cleared
	/// surface transparent.
	pub background: Option<Color>,
	/// Particle fill. `None` uses the configured color.
	pub particle_fill: Option<Color>,
	/// Multiplier applied to link strength before it becomes stroke alpha.
	pub link_opacity: f64,
	/// Stroke width of links (logical px).
	pub link_width: f64,
	/// Draw links as time-driven quadratic curves instead of straight lines.
	pub curved_links: bool,
}

impl Theme {
	/// Glowing links on black, the pointer-follow look.
	pub fn pointer() -> Self {
		Self {
			background: Some(Color::BLACK),
			particle_fill: None,
			link_opacity: 1.0,
			link_width: 2.0,
			curved_links: true,
		}
	}

	/// Faint straight lines between black particles on a transparent surface.
	pub fn free() -> Self {
		Self {
			background: None,
			particle_fill: Some(Color::BLACK),
			link_opacity: 0.5,
			link_width: 1.0,
			curved_links: false,
		}
	}

	/// The fixed look of `mode`.
	pub fn for_mode(mode: FieldMode) -> Self {
		match mode {
			FieldMode::Pointer => Self::pointer(),
			FieldMode::Free => Self::free(),
		}
	}
}
