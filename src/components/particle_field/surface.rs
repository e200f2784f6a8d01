//! Logical vs physical pixel bookkeeping for the drawing surface.
//!
//! # Coordinate Spaces
//!
//! - **Logical**: CSS pixels. All geometry (particles, anchor, links) lives
//!   here.
//! - **Physical**: backing-buffer pixels, `logical * device_pixel_ratio`.
//!
//! The adapter never moves particles; a resize only changes the backing
//! buffer and the transform that maps logical drawing calls onto it.

/// Logical size of the surface and its device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDimensions {
	/// Logical width (CSS px).
	pub width: f64,
	/// Logical height (CSS px).
	pub height: f64,
	/// Physical pixels per logical pixel.
	pub device_pixel_ratio: f64,
}

impl SurfaceDimensions {
	/// Dimensions as given; the adapter sanitizes them on use.
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
		Self {
			width,
			height,
			device_pixel_ratio,
		}
	}

	/// Replaces unusable values: negative or NaN sizes become 0 and a
	/// missing or non-positive ratio becomes 1.
	fn sanitized(self) -> Self {
		let size = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
		let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
			self.device_pixel_ratio
		} else {
			1.0
		};
		Self::new(size(self.width), size(self.height), dpr)
	}
}

/// Logical rectangle anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Logical width.
	pub width: f64,
	/// Logical height.
	pub height: f64,
}

impl Bounds {
	/// Midpoint of the rectangle.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Nearest point inside the rectangle, edges included.
	pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
		(x.clamp(0.0, self.width), y.clamp(0.0, self.height))
	}
}

/// Tracks the surface size and derives the backing buffer from it.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceAdapter {
	dims: SurfaceDimensions,
	backing: (u32, u32),
}

impl SurfaceAdapter {
	/// Adapter sized for `dims`.
	pub fn new(dims: SurfaceDimensions) -> Self {
		let mut adapter = Self {
			dims,
			backing: (1, 1),
		};
		adapter.resize(dims);
		adapter
	}

	/// Recomputes the backing buffer size for new logical dimensions.
	pub fn resize(&mut self, dims: SurfaceDimensions) {
		let dims = dims.sanitized();
		let physical = |logical: f64| ((logical * dims.device_pixel_ratio).round() as u32).max(1);
		self.dims = dims;
		self.backing = (physical(dims.width), physical(dims.height));
	}

	/// Sanitized logical dimensions.
	pub fn dimensions(&self) -> SurfaceDimensions {
		self.dims
	}

	/// Logical drawing area.
	pub fn bounds(&self) -> Bounds {
		Bounds {
			width: self.dims.width,
			height: self.dims.height,
		}
	}

	/// Backing buffer size in physical pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		self.backing
	}

	/// Absolute canvas transform `[a, b, c, d, e, f]` that maps logical
	/// drawing calls onto the backing buffer.
	pub fn transform(&self) -> [f64; 6] {
		let dpr = self.dims.device_pixel_ratio;
		[dpr, 0.0, 0.0, dpr, 0.0, 0.0]
	}
}

/// Converts a client (viewport) coordinate to surface-local logical units,
/// given the surface's top-left corner in the same client space.
pub fn local_point(client: (f64, f64), origin: (f64, f64)) -> (f64, f64) {
	(client.0 - origin.0, client.1 - origin.1)
}

/// Surface-local position of the first touch point, if the event carried
/// one. A touch event without points leaves the anchor where it is.
pub fn touch_point(first_touch: Option<(f64, f64)>, origin: (f64, f64)) -> Option<(f64, f64)> {
	first_touch.map(|client| local_point(client, origin))
}
