//! Browser side of the engine: the 2-D canvas as a [`Surface`] and
//! `requestAnimationFrame` as a [`FrameHost`].

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::error::FieldError;
use super::render::Surface;
use super::scheduler::FrameHost;
use super::surface::{SurfaceAdapter, SurfaceDimensions};

/// Frame callback shared between the host and the closure it schedules.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

impl Surface for CanvasRenderingContext2d {
	fn is_attached(&self) -> bool {
		self.canvas().is_some_and(|c| c.is_connected())
	}

	fn set_transform(&self, t: [f64; 6]) {
		let _ = CanvasRenderingContext2d::set_transform(self, t[0], t[1], t[2], t[3], t[4], t[5]);
	}

	fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
	}

	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn set_fill_style(&self, css: &str) {
		self.set_fill_style_str(css);
	}

	fn set_stroke_style(&self, css: &str) {
		self.set_stroke_style_str(css);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_shadow(&self, css: &str, blur: f64) {
		self.set_shadow_color(css);
		self.set_shadow_blur(blur);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64) {
		CanvasRenderingContext2d::quadratic_curve_to(self, cx, cy, x, y);
	}

	fn arc(&self, x: f64, y: f64, radius: f64) {
		let _ = CanvasRenderingContext2d::arc(self, x, y, radius, 0.0, TAU);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}
}

/// Schedules the shared frame callback with `requestAnimationFrame`.
pub struct AnimationFrameHost {
	window: Window,
	callback: FrameCallback,
}

impl AnimationFrameHost {
	/// Host that schedules `callback` on `window`.
	pub fn new(window: Window, callback: FrameCallback) -> Self {
		Self { window, callback }
	}
}

impl FrameHost for AnimationFrameHost {
	type Handle = i32;

	fn request_frame(&mut self) -> Result<i32, FieldError> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref().ok_or(FieldError::FrameRequestFailed)?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|_| FieldError::FrameRequestFailed)
	}

	fn cancel_frame(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

/// Current viewport size and device pixel ratio.
pub fn viewport_dimensions(window: &Window) -> SurfaceDimensions {
	let size = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	SurfaceDimensions::new(
		size(window.inner_width(), 800.0),
		size(window.inner_height(), 600.0),
		window.device_pixel_ratio(),
	)
}

/// Sizes the canvas backing buffer to match the adapter.
///
/// Assigning the buffer size resets the context transform; the engine
/// re-applies it at the start of every frame.
pub fn apply_backing(canvas: &HtmlCanvasElement, adapter: &SurfaceAdapter) {
	let (w, h) = adapter.backing_size();
	if canvas.width() != w {
		canvas.set_width(w);
	}
	if canvas.height() != h {
		canvas.set_height(h);
	}
}

/// The 2-D context of `canvas`.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FieldError> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
		.ok_or(FieldError::ContextUnavailable)
}
