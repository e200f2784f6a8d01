// Host-side tests for the frame loop.
// Drawing goes to a recording surface and frames are "scheduled" by a fake
// host, so no browser is needed.

use std::cell::{Cell, RefCell};

use particle_field::components::particle_field::{
	Config, ConfigValue, FieldEngine, FieldError, FieldMode, FrameHost, FrameScheduler, Particle,
	ParticleField, SchedulerState, Surface, SurfaceDimensions,
};
use particle_field::components::particle_field::surface::touch_point;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Clone, Debug, PartialEq)]
enum Call {
	Transform([f64; 6]),
	Clear,
	FillRect,
	Fill(String),
	Stroke(String),
	Shadow(f64),
	Line,
	Curve,
	Arc { x: f64, y: f64, r: f64 },
	StrokePath,
	FillPath,
}

#[derive(Default)]
struct RecordingSurface {
	calls: RefCell<Vec<Call>>,
	detached: Cell<bool>,
}

impl RecordingSurface {
	fn take(&self) -> Vec<Call> {
		self.calls.take()
	}

	fn push(&self, call: Call) {
		self.calls.borrow_mut().push(call);
	}
}

impl Surface for RecordingSurface {
	fn is_attached(&self) -> bool {
		!self.detached.get()
	}
	fn set_transform(&self, t: [f64; 6]) {
		self.push(Call::Transform(t));
	}
	fn clear_rect(&self, _: f64, _: f64, _: f64, _: f64) {
		self.push(Call::Clear);
	}
	fn fill_rect(&self, _: f64, _: f64, _: f64, _: f64) {
		self.push(Call::FillRect);
	}
	fn set_fill_style(&self, css: &str) {
		self.push(Call::Fill(css.to_string()));
	}
	fn set_stroke_style(&self, css: &str) {
		self.push(Call::Stroke(css.to_string()));
	}
	fn set_line_width(&self, _: f64) {}
	fn set_shadow(&self, _: &str, blur: f64) {
		self.push(Call::Shadow(blur));
	}
	fn begin_path(&self) {}
	fn move_to(&self, _: f64, _: f64) {}
	fn line_to(&self, _: f64, _: f64) {
		self.push(Call::Line);
	}
	fn quadratic_curve_to(&self, _: f64, _: f64, _: f64, _: f64) {
		self.push(Call::Curve);
	}
	fn arc(&self, x: f64, y: f64, r: f64) {
		self.push(Call::Arc { x, y, r });
	}
	fn fill(&self) {
		self.push(Call::FillPath);
	}
	fn stroke(&self) {
		self.push(Call::StrokePath);
	}
}

#[derive(Default)]
struct FakeHost {
	requests: u32,
	cancelled: Vec<u32>,
}

impl FrameHost for FakeHost {
	type Handle = u32;

	fn request_frame(&mut self) -> Result<u32, FieldError> {
		self.requests += 1;
		Ok(self.requests)
	}

	fn cancel_frame(&mut self, handle: u32) {
		self.cancelled.push(handle);
	}
}

fn dims() -> SurfaceDimensions {
	SurfaceDimensions::new(400.0, 300.0, 2.0)
}

fn engine(mode: FieldMode, config: Config) -> FieldEngine<SmallRng> {
	FieldEngine::with_rng(mode, config, dims(), SmallRng::seed_from_u64(42))
}

#[test]
fn free_mode_three_point_scenario() {
	let config = Config {
		point_count: 3,
		connection_distance: 20.0,
		speed: 0.0,
		..Config::free()
	};
	let mut engine = engine(FieldMode::Free, config);
	*engine.field_mut() = ParticleField::from(vec![
		Particle::at(0.0, 0.0, 0.0),
		Particle::at(10.0, 0.0, 0.0),
		Particle::at(100.0, 100.0, 0.0),
	]);

	let links = engine.links();
	assert_eq!(links.len(), 1);
	assert_eq!((links[0].source, links[0].target), (Some(0), 1));
	assert_eq!(links[0].strength, 0.5);
}

#[test]
fn frame_draws_in_order() {
	let mut engine = engine(FieldMode::Pointer, Config::pointer());
	*engine.field_mut() = ParticleField::from(vec![
		Particle::at(200.0, 160.0, 3.0),
		Particle::at(390.0, 10.0, 3.0),
	]);
	let surface = RecordingSurface::default();

	engine.frame(&surface, 0.0).unwrap();
	let calls = surface.take();

	assert_eq!(calls[0], Call::Transform([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]));
	let clear = calls.iter().position(|c| *c == Call::Clear).unwrap();
	let curve = calls.iter().position(|c| *c == Call::Curve).unwrap();
	let arcs: Vec<usize> = calls
		.iter()
		.enumerate()
		.filter(|(_, c)| matches!(c, Call::Arc { .. }))
		.map(|(i, _)| i)
		.collect();

	// one link (anchor starts at the center, 200x150), two particles, one anchor
	assert_eq!(calls.iter().filter(|c| **c == Call::Curve).count(), 1);
	assert_eq!(arcs.len(), 3);
	assert!(clear < curve);
	assert!(curve < arcs[0]);
	assert_eq!(
		calls[arcs[2]],
		Call::Arc {
			x: 200.0,
			y: 150.0,
			r: 8.0
		}
	);
	// anchor glow is 1.5x the configured intensity
	assert!(calls[..arcs[2]].contains(&Call::Shadow(15.0)));
}

#[test]
fn link_alpha_encodes_strength() {
	let mut engine = engine(FieldMode::Pointer, Config::pointer());
	*engine.field_mut() = ParticleField::from(vec![Particle::at(300.0, 150.0, 3.0)]);
	let surface = RecordingSurface::default();

	// 100px from the centered anchor, threshold 200 => strength 0.5 => alpha 0x80
	engine.frame(&surface, 0.0).unwrap();

	assert!(surface.take().contains(&Call::Stroke("#64ccff80".to_string())));
}

#[test]
fn free_mode_draws_straight_lines() {
	let mut engine = engine(FieldMode::Free, Config {
		speed: 0.0,
		..Config::free()
	});
	*engine.field_mut() = ParticleField::from(vec![
		Particle::at(50.0, 50.0, 4.0),
		Particle::at(60.0, 50.0, 4.0),
	]);
	let surface = RecordingSurface::default();

	engine.frame(&surface, 1.0).unwrap();
	let calls = surface.take();

	assert!(calls.contains(&Call::Line));
	assert!(!calls.contains(&Call::Curve));
	assert!(!calls.contains(&Call::FillRect), "free mode has no background fill");
}

#[test]
fn zero_speed_free_mode_never_moves() {
	let mut engine = engine(FieldMode::Free, Config {
		speed: 0.0,
		..Config::free()
	});
	let start = engine.field().clone();
	let surface = RecordingSurface::default();

	for frame in 0..120 {
		engine.frame(&surface, frame as f64 / 60.0).unwrap();
	}
	assert_eq!(engine.field(), &start);
}

#[test]
fn resize_mid_run_keeps_positions() {
	let mut engine = engine(FieldMode::Free, Config::free());
	let surface = RecordingSurface::default();
	engine.frame(&surface, 0.0).unwrap();
	let before = engine.field().clone();

	engine.resize(SurfaceDimensions::new(1280.0, 720.0, 3.0));

	assert_eq!(engine.field(), &before);
	assert_eq!(engine.surface().backing_size(), (3840, 2160));

	surface.take();
	engine.frame(&surface, 0.0).unwrap();
	assert_eq!(surface.take()[0], Call::Transform([3.0, 0.0, 0.0, 3.0, 0.0, 0.0]));
}

#[test]
fn scheduler_runs_until_stopped() {
	let mut engine = engine(FieldMode::Free, Config::free());
	let surface = RecordingSurface::default();
	let mut scheduler = FrameScheduler::new(FakeHost::default());

	scheduler.start().unwrap();
	for _ in 0..3 {
		scheduler.run_frame(&mut engine, &surface, 0.0).unwrap();
	}
	assert_eq!(scheduler.host().requests, 4);

	scheduler.stop();
	scheduler.stop();
	assert_eq!(scheduler.state(), SchedulerState::Idle);
	assert_eq!(scheduler.host().cancelled, vec![4]);

	// a stale callback after stop draws nothing
	surface.take();
	scheduler.run_frame(&mut engine, &surface, 0.0).unwrap();
	assert!(surface.take().is_empty());
	assert_eq!(scheduler.host().requests, 4);
}

#[test]
fn detached_surface_stops_the_loop() {
	let mut engine = engine(FieldMode::Pointer, Config::pointer());
	let surface = RecordingSurface::default();
	let mut scheduler = FrameScheduler::new(FakeHost::default());
	scheduler.start().unwrap();
	scheduler.run_frame(&mut engine, &surface, 0.0).unwrap();

	surface.detached.set(true);
	surface.take();

	assert_eq!(
		scheduler.run_frame(&mut engine, &surface, 0.0),
		Err(FieldError::SurfaceDetached)
	);
	assert_eq!(scheduler.state(), SchedulerState::Idle);
	assert!(surface.take().is_empty());
	assert_eq!(scheduler.host().requests, 2);

	// no retry on the next tick
	assert_eq!(scheduler.run_frame(&mut engine, &surface, 0.0), Ok(()));
	assert_eq!(scheduler.host().requests, 2);
}

#[test]
fn config_change_regenerates_without_restart() {
	let mut engine = engine(FieldMode::Free, Config::free());
	let surface = RecordingSurface::default();
	let mut scheduler = FrameScheduler::new(FakeHost::default());
	scheduler.start().unwrap();
	scheduler.run_frame(&mut engine, &surface, 0.0).unwrap();

	engine.apply(ConfigValue::PointCount(55));
	scheduler.run_frame(&mut engine, &surface, 0.0).unwrap();

	assert!(scheduler.is_running());
	assert_eq!(engine.field().len(), 55);
}

#[test]
fn empty_field_and_zero_distance_render_cleanly() {
	let mut engine = engine(FieldMode::Free, Config {
		point_count: 0,
		connection_distance: 0.0,
		..Config::free()
	});
	let surface = RecordingSurface::default();

	engine.frame(&surface, 0.0).unwrap();

	assert!(engine.field().is_empty());
	assert!(engine.links().is_empty());
	let calls = surface.take();
	assert!(!calls.iter().any(|c| matches!(c, Call::Arc { .. })));
}

#[test]
fn touch_moves_anchor_and_empty_touch_keeps_it() {
	let mut engine = engine(FieldMode::Pointer, Config::pointer());
	let origin = (10.0, 20.0);

	// touchstart at client (110, 70) lands at (100, 50) on the surface
	if let Some((x, y)) = touch_point(Some((110.0, 70.0)), origin) {
		engine.pointer_moved(x, y);
	}
	let anchor = engine.anchor().unwrap();
	assert_eq!((anchor.x, anchor.y), (100.0, 50.0));

	// a touch event without touch points
	if let Some((x, y)) = touch_point(None, origin) {
		engine.pointer_moved(x, y);
	}
	assert_eq!(engine.anchor(), Some(anchor));
}

#[test]
fn shutdown_cancels_the_frame_in_flight() {
	let mut engine = engine(FieldMode::Free, Config::free());
	let surface = RecordingSurface::default();
	let mut scheduler = FrameScheduler::new(FakeHost::default());
	scheduler.start().unwrap();
	scheduler.run_frame(&mut engine, &surface, 0.0).unwrap();

	let host = scheduler.shutdown();

	assert_eq!(host.requests, 2);
	assert_eq!(host.cancelled, vec![2]);
}
