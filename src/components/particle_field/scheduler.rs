//! Frame loop lifecycle: `Idle → Running → Idle`.
//!
//! The scheduler owns the handle of the pending frame request, so stopping
//! always deregisters the callback and nothing fires after teardown. Frames
//! are never reentrant: the next frame is only requested once the current one
//! has finished drawing.

use log::{info, warn};
use rand::Rng;

use super::engine::FieldEngine;
use super::error::FieldError;
use super::render::Surface;

/// Something that can call back once on the next display frame.
pub trait FrameHost {
	/// Identifies a pending request so it can be cancelled.
	type Handle;

	/// Asks for one callback on the next frame.
	fn request_frame(&mut self) -> Result<Self::Handle, FieldError>;
	/// Withdraws a request that has not fired yet.
	fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Whether frames are being requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
	/// No frame pending; nothing is drawn.
	Idle,
	/// Each frame requests the next.
	Running,
}

/// Drives an engine once per frame through a [`FrameHost`].
pub struct FrameScheduler<H: FrameHost> {
	host: H,
	state: SchedulerState,
	pending: Option<H::Handle>,
}

impl<H: FrameHost> FrameScheduler<H> {
	/// Idle scheduler on top of `host`.
	pub fn new(host: H) -> Self {
		Self {
			host,
			state: SchedulerState::Idle,
			pending: None,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> SchedulerState {
		self.state
	}

	/// Shorthand for `state() == Running`.
	pub fn is_running(&self) -> bool {
		self.state == SchedulerState::Running
	}

	/// The frame host.
	pub fn host(&self) -> &H {
		&self.host
	}

	/// Starts the loop. Already running is a no-op.
	pub fn start(&mut self) -> Result<(), FieldError> {
		if self.is_running() {
			return Ok(());
		}
		self.pending = Some(self.host.request_frame()?);
		self.state = SchedulerState::Running;
		info!("particle-field: animation started");
		Ok(())
	}

	/// Cancels the pending frame and goes idle. Safe to call repeatedly.
	pub fn stop(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.host.cancel_frame(handle);
		}
		if self.is_running() {
			self.state = SchedulerState::Idle;
			info!("particle-field: animation stopped");
		}
	}

	/// Stops for good and hands back the host, e.g. on unmount. Dropping the
	/// host releases whatever callback it holds.
	pub fn shutdown(mut self) -> H {
		self.stop();
		self.host
	}

	/// Flips between running and idle; returns whether the loop now runs.
	pub fn toggle(&mut self) -> Result<bool, FieldError> {
		if self.is_running() {
			self.stop();
		} else {
			self.start()?;
		}
		Ok(self.is_running())
	}

	/// Body of the frame callback.
	///
	/// Draws one frame and requests the next. Any failure stops the loop for
	/// good and is returned to the caller; there is no retry.
	pub fn run_frame<R, S>(
		&mut self,
		engine: &mut FieldEngine<R>,
		surface: &S,
		time_secs: f64,
	) -> Result<(), FieldError>
	where
		R: Rng,
		S: Surface + ?Sized,
	{
		if !self.is_running() {
			return Ok(());
		}
		// The request that invoked us has been consumed.
		self.pending = None;

		let next = engine
			.frame(surface, time_secs)
			.and_then(|()| self.host.request_frame());
		match next {
			Ok(handle) => {
				self.pending = Some(handle);
				Ok(())
			}
			Err(err) => {
				warn!("particle-field: {err}, stopping animation");
				self.stop();
				Err(err)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Counts requests and cancellations instead of talking to a display.
	#[derive(Default)]
	struct FakeHost {
		next: u32,
		requested: Vec<u32>,
		cancelled: Vec<u32>,
		refuse: bool,
	}

	impl FrameHost for FakeHost {
		type Handle = u32;

		fn request_frame(&mut self) -> Result<u32, FieldError> {
			if self.refuse {
				return Err(FieldError::FrameRequestFailed);
			}
			self.next += 1;
			self.requested.push(self.next);
			Ok(self.next)
		}

		fn cancel_frame(&mut self, handle: u32) {
			self.cancelled.push(handle);
		}
	}

	#[test]
	fn start_requests_one_frame() {
		let mut scheduler = FrameScheduler::new(FakeHost::default());
		assert_eq!(scheduler.state(), SchedulerState::Idle);

		scheduler.start().unwrap();
		scheduler.start().unwrap();

		assert_eq!(scheduler.state(), SchedulerState::Running);
		assert_eq!(scheduler.host().requested, vec![1]);
	}

	#[test]
	fn stop_is_idempotent() {
		let mut scheduler = FrameScheduler::new(FakeHost::default());
		scheduler.start().unwrap();

		scheduler.stop();
		scheduler.stop();

		assert_eq!(scheduler.state(), SchedulerState::Idle);
		assert_eq!(scheduler.host().cancelled, vec![1]);
	}

	#[test]
	fn shutdown_cancels_the_pending_frame() {
		let mut scheduler = FrameScheduler::new(FakeHost::default());
		scheduler.start().unwrap();
		scheduler.toggle().unwrap();
		scheduler.start().unwrap();

		let host = scheduler.shutdown();
		assert_eq!(host.requested, vec![1, 2]);
		assert_eq!(host.cancelled, vec![1, 2]);
	}

	#[test]
	fn shutdown_while_idle_cancels_nothing() {
		let host = FrameScheduler::new(FakeHost::default()).shutdown();
		assert!(host.cancelled.is_empty());
	}

	#[test]
	fn stop_while_idle_cancels_nothing() {
		let mut scheduler = FrameScheduler::new(FakeHost::default());
		scheduler.stop();
		assert!(scheduler.host().cancelled.is_empty());
	}

	#[test]
	fn toggle_flips_state() {
		let mut scheduler = FrameScheduler::new(FakeHost::default());
		assert_eq!(scheduler.toggle(), Ok(true));
		assert_eq!(scheduler.toggle(), Ok(false));
		assert_eq!(scheduler.toggle(), Ok(true));
		assert_eq!(scheduler.host().requested, vec![1, 2]);
		assert_eq!(scheduler.host().cancelled, vec![1]);
	}

	#[test]
	fn refused_start_stays_idle() {
		let mut scheduler = FrameScheduler::new(FakeHost {
			refuse: true,
			..FakeHost::default()
		});
		assert_eq!(scheduler.start(), Err(FieldError::FrameRequestFailed));
		assert!(!scheduler.is_running());
	}
}
