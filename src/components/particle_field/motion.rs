//! Per-tick motion for both field variants.

use super::particles::ParticleField;
use super::surface::Bounds;
use super::FieldMode;

/// The pointer-controlled point in pointer-follow mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
	/// Logical x.
	pub x: f64,
	/// Logical y.
	pub y: f64,
}

/// How particles move. Fixed for the lifetime of an engine.
#[derive(Clone, Debug, PartialEq)]
pub enum MotionModel {
	/// Static field; only the anchor moves, and only on input events.
	PointerFollow {
		/// Last pointer position, clamped to the bounds.
		anchor: Anchor,
	},
	/// Every particle integrates its velocity and reflects off the bounds.
	FreePhysics,
}

impl MotionModel {
	/// Initial model for `mode`. The pointer anchor starts centered.
	pub fn for_mode(mode: FieldMode, bounds: Bounds) -> Self {
		match mode {
			FieldMode::Pointer => {
				let (x, y) = bounds.center();
				MotionModel::PointerFollow {
					anchor: Anchor { x, y },
				}
			}
			FieldMode::Free => MotionModel::FreePhysics,
		}
	}

	/// The anchor, if this model has one.
	pub fn anchor(&self) -> Option<Anchor> {
		match self {
			MotionModel::PointerFollow { anchor } => Some(*anchor),
			MotionModel::FreePhysics => None,
		}
	}

	/// Moves the anchor to a surface-local point, clamped to `bounds`.
	/// Returns `false` when there is no anchor to move.
	pub fn pointer_moved(&mut self, x: f64, y: f64, bounds: Bounds) -> bool {
		match self {
			MotionModel::PointerFollow { anchor } => {
				if !x.is_finite() || !y.is_finite() {
					return false;
				}
				(anchor.x, anchor.y) = bounds.clamp(x, y);
				true
			}
			MotionModel::FreePhysics => false,
		}
	}

	/// Puts the anchor back in the middle of the surface.
	pub fn recenter(&mut self, bounds: Bounds) {
		if let MotionModel::PointerFollow { anchor } = self {
			(anchor.x, anchor.y) = bounds.center();
		}
	}

	/// Advances the field by one frame.
	///
	/// Free mode: `position += velocity * speed`, then any axis that left
	/// `[radius, extent - radius]` has its velocity negated and its position
	/// clamped to the wall it crossed. Pointer mode has nothing to integrate.
	pub fn tick(&self, field: &mut ParticleField, bounds: Bounds, speed: f64) {
		if let MotionModel::FreePhysics = self {
			for p in field.particles_mut() {
				(p.x, p.dx) = reflect(p.x + p.dx * speed, p.dx, p.radius, bounds.width);
				(p.y, p.dy) = reflect(p.y + p.dy * speed, p.dy, p.radius, bounds.height);
			}
		}
	}
}

/// Elastic wall reflection along one axis. Returns the new position and
/// velocity.
fn reflect(next: f64, velocity: f64, radius: f64, extent: f64) -> (f64, f64) {
	let lo = radius;
	let hi = (extent - radius).max(lo);
	if next < lo {
		(lo, -velocity)
	} else if next > hi {
		(hi, -velocity)
	} else {
		(next, velocity)
	}
}
