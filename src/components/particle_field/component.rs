//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a full-viewport canvas, wires pointer, touch and
//! window-resize events into the engine and runs the frame loop via
//! `requestAnimationFrame`. Unmounting stops the loop, removes the resize
//! listener and releases the engine. A canvas removed from the document by
//! other means is caught by the next frame, which stops the loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::canvas::{apply_backing, context_2d, viewport_dimensions, AnimationFrameHost, FrameCallback};
use super::config::{Config, ConfigValue};
use super::engine::FieldEngine;
use super::error::FieldError;
use super::scheduler::FrameScheduler;
use super::surface::{local_point, touch_point};
use super::FieldMode;

type SharedRuntime = Rc<RefCell<Option<FieldRuntime>>>;
type ResizeCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything one mounted canvas needs each frame.
struct FieldRuntime {
	engine: FieldEngine,
	scheduler: FrameScheduler<AnimationFrameHost>,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl FieldRuntime {
	fn run_frame(&mut self) -> Result<(), FieldError> {
		let time_secs = js_sys::Date::now() / 1000.0;
		self.scheduler.run_frame(&mut self.engine, &self.ctx, time_secs)
	}

	fn resize(&mut self, window: &Window) {
		if !self.canvas.is_connected() {
			return;
		}
		self.engine.resize(viewport_dimensions(window));
		apply_backing(&self.canvas, self.engine.surface());
	}

	/// Moves the anchor to a client-space position.
	fn pointer_at(&mut self, client: (f64, f64)) {
		let rect = self.canvas.get_bounding_client_rect();
		let (x, y) = local_point(client, (rect.left(), rect.top()));
		self.engine.pointer_moved(x, y);
	}

	/// Moves the anchor to the first touch point; no point, no move.
	fn touch_at(&mut self, first_touch: Option<(f64, f64)>) {
		let rect = self.canvas.get_bounding_client_rect();
		if let Some((x, y)) = touch_point(first_touch, (rect.left(), rect.top())) {
			self.engine.pointer_moved(x, y);
		}
	}
}

/// Handle the control panel uses to tune a mounted field.
///
/// Every call is synchronous and takes effect on the next frame. Calls made
/// before the canvas has mounted are dropped.
#[derive(Clone, Default)]
pub struct FieldControls {
	runtime: SharedRuntime,
}

impl FieldControls {
	/// Unbound handle; pass it to [`ParticleFieldCanvas`] to bind it.
	pub fn new() -> Self {
		Self::default()
	}

	fn with_runtime<T>(&self, f: impl FnOnce(&mut FieldRuntime) -> T) -> Option<T> {
		let mut runtime = self.runtime.borrow_mut();
		match runtime.as_mut() {
			Some(rt) => Some(f(rt)),
			None => {
				debug!("particle-field: control used before mount, ignored");
				None
			}
		}
	}

	fn apply(&self, value: ConfigValue) {
		self.with_runtime(|rt| rt.engine.apply(value));
	}

	/// Sets the base color from `#RGB` or `#RRGGBB`. An unparsable string
	/// is reported and the previous color stays.
	pub fn set_color(&self, hex: &str) -> Result<(), FieldError> {
		self.with_runtime(|rt| rt.engine.set_color(hex)).unwrap_or(Ok(()))
	}

	/// Rebuilds the field with `count` particles.
	pub fn set_point_count(&self, count: i64) {
		self.apply(ConfigValue::PointCount(count));
	}

	/// Link threshold in logical px. Rebuilds the field in free mode.
	pub fn set_connection_distance(&self, px: f64) {
		self.apply(ConfigValue::ConnectionDistance(px));
	}

	/// Particle radius; positions are kept.
	pub fn set_point_size(&self, px: f64) {
		self.apply(ConfigValue::PointSize(px));
	}

	/// Anchor radius (pointer mode).
	pub fn set_anchor_size(&self, px: f64) {
		self.apply(ConfigValue::AnchorSize(px));
	}

	/// Glow blur for links and points.
	pub fn set_glow_intensity(&self, level: f64) {
		self.apply(ConfigValue::GlowIntensity(level));
	}

	/// Velocity scale. Rebuilds the field in free mode.
	pub fn set_speed(&self, speed: f64) {
		self.apply(ConfigValue::Speed(speed));
	}

	/// Starts the frame loop; a no-op while running.
	pub fn start(&self) -> Result<(), FieldError> {
		self.with_runtime(|rt| rt.scheduler.start()).unwrap_or(Ok(()))
	}

	/// Stops the frame loop. Safe to call repeatedly.
	pub fn stop(&self) {
		self.with_runtime(|rt| rt.scheduler.stop());
	}

	/// Start/stop button semantics. Returns whether the loop now runs.
	pub fn toggle(&self) -> Result<bool, FieldError> {
		self.with_runtime(|rt| rt.scheduler.toggle()).unwrap_or(Ok(false))
	}

	/// Whether frames are currently being drawn.
	pub fn is_running(&self) -> bool {
		self.runtime
			.borrow()
			.as_ref()
			.is_some_and(|rt| rt.scheduler.is_running())
	}
}

/// Renders an animated particle field filling the viewport.
///
/// `mode` picks the pointer-follow or free-physics variant; `config`
/// overrides that mode's defaults. Pass `controls` to keep a handle for a
/// settings panel. With `autostart = false` the loop waits for
/// [`FieldControls::start`].
#[component]
pub fn ParticleFieldCanvas(
	#[prop(default = FieldMode::Pointer)] mode: FieldMode,
	#[prop(default = None)] config: Option<Config>,
	#[prop(optional)] controls: Option<FieldControls>,
	#[prop(default = true)] autostart: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controls = controls.unwrap_or_default();
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: ResizeCallback = Rc::new(RefCell::new(None));
	let (runtime_init, animate_init, resize_cb_init) =
		(controls.runtime.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let config = config.clone().unwrap_or_else(|| Config::for_mode(mode));

		if let Err(e) = mount(
			canvas,
			mode,
			config,
			autostart,
			&runtime_init,
			&animate_init,
			&resize_cb_init,
		) {
			warn!("particle-field: failed to mount: {}", e);
		}
	});

	let teardown = SendWrapper::new((controls.runtime.clone(), animate, resize_cb));
	on_cleanup(move || {
		let (runtime, animate, resize_cb) = teardown.take();
		unmount(&runtime, &animate, &resize_cb);
	});

	let runtime_mm = controls.runtime.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut rt) = *runtime_mm.borrow_mut() {
			rt.pointer_at((ev.client_x() as f64, ev.client_y() as f64));
		}
	};

	let runtime_touch = controls.runtime.clone();
	let on_touch = move |ev: TouchEvent| {
		let first = ev
			.touches()
			.get(0)
			.map(|t| (t.client_x() as f64, t.client_y() as f64));
		if let Some(ref mut rt) = *runtime_touch.borrow_mut() {
			rt.touch_at(first);
		}
	};
	let on_touchstart = on_touch.clone();

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:mousemove=on_mousemove
			on:touchmove=on_touch
			on:touchstart=on_touchstart
			style="display: block; width: 100vw; height: 100vh; touch-action: none;"
		/>
	}
}

/// Builds the runtime for a freshly mounted canvas and hooks up the resize
/// listener and frame callback.
fn mount(
	canvas: HtmlCanvasElement,
	mode: FieldMode,
	config: Config,
	autostart: bool,
	runtime: &SharedRuntime,
	animate: &FrameCallback,
	resize_cb: &ResizeCallback,
) -> Result<(), FieldError> {
	let window: Window = web_sys::window().ok_or(FieldError::WindowUnavailable)?;
	let ctx = context_2d(&canvas)?;

	let seed = js_sys::Date::now().to_bits();
	let engine = FieldEngine::new(mode, config, viewport_dimensions(&window), seed);
	apply_backing(&canvas, engine.surface());
	info!(
		"particle-field: mounted {:?} field with {} particles",
		mode,
		engine.field().len()
	);

	*runtime.borrow_mut() = Some(FieldRuntime {
		engine,
		scheduler: FrameScheduler::new(AnimationFrameHost::new(window.clone(), animate.clone())),
		canvas,
		ctx,
	});

	let runtime_resize = runtime.clone();
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some(ref mut rt) = *runtime_resize.borrow_mut() {
			rt.resize(&win);
		}
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}

	let runtime_anim = runtime.clone();
	*animate.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
		if let Some(ref mut rt) = *runtime_anim.borrow_mut() {
			if let Err(e) = rt.run_frame() {
				warn!("particle-field: animation ended: {}", e);
			}
		}
	}));

	if autostart {
		if let Some(ref mut rt) = *runtime.borrow_mut() {
			rt.scheduler.start()?;
		}
	}
	Ok(())
}

/// Undoes [`mount`]: cancels the pending frame, removes the resize listener
/// and drops both closures, which breaks the runtime/frame-callback cycle.
/// Later control calls and stale callbacks find no runtime and do nothing.
fn unmount(runtime: &SharedRuntime, animate: &FrameCallback, resize_cb: &ResizeCallback) {
	if let Some(rt) = runtime.borrow_mut().take() {
		drop(rt.scheduler.shutdown());
	}

	if let Some(cb) = resize_cb.borrow_mut().take() {
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
	animate.borrow_mut().take();
	info!("particle-field: unmounted");
}
