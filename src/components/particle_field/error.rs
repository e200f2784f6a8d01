//! Error type shared by the particle field engine and its browser binding.

use thiserror::Error;

/// Failures the particle field can report.
///
/// Only [`FieldError::SurfaceDetached`] and [`FieldError::FrameRequestFailed`]
/// are fatal to a running animation; the rest are reported at setup or by a
/// setter and leave the previous state in place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
	/// A color string could not be parsed as `#RGB` or `#RRGGBB`.
	#[error("invalid color {0:?}, expected #RGB or #RRGGBB")]
	InvalidColor(String),
	/// The drawing surface was removed from the document.
	#[error("drawing surface is detached")]
	SurfaceDetached,
	/// The canvas did not provide a 2-D rendering context.
	#[error("2d canvas context unavailable")]
	ContextUnavailable,
	/// No browser window is reachable from this context.
	#[error("browser window unavailable")]
	WindowUnavailable,
	/// The host refused to schedule the next frame.
	#[error("frame request failed")]
	FrameRequestFailed,
}
