//! The set of field particles and how it is (re)generated.

use rand::Rng;

use super::surface::Bounds;

/// Inset applied to pointer-mode placement so points never sit on the edge.
pub const FIELD_MARGIN: f64 = 50.0;

/// A single point in the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// Logical x.
	pub x: f64,
	/// Logical y.
	pub y: f64,
	/// Horizontal velocity per tick, only nonzero in free mode.
	pub dx: f64,
	/// Vertical velocity per tick.
	pub dy: f64,
	/// Drawn radius (logical px).
	pub radius: f64,
}

impl Particle {
	/// A particle at rest.
	pub fn at(x: f64, y: f64, radius: f64) -> Self {
		Self {
			x,
			y,
			dx: 0.0,
			dy: 0.0,
			radius,
		}
	}
}

/// Parameters for one regeneration pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Generation {
	/// Number of particles; `<= 0` yields an empty field.
	pub count: i64,
	/// Inset from every edge of the bounds.
	pub margin: f64,
	/// Radius given to every particle.
	pub radius: f64,
	/// Velocity components are drawn from `[-0.5, 0.5) * speed`.
	/// Zero for a static field.
	pub speed: f64,
}

/// Owns every particle of one engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
	particles: Vec<Particle>,
}

impl ParticleField {
	/// Replaces the whole set with `params.count` fresh particles placed
	/// uniformly at random inside `bounds` shrunk by the margin.
	///
	/// A non-positive count leaves the field empty. On an axis shorter than
	/// twice the margin, particles are placed on that axis's center line.
	pub fn regenerate<R: Rng + ?Sized>(&mut self, params: &Generation, bounds: Bounds, rng: &mut R) {
		self.particles.clear();
		if params.count <= 0 {
			return;
		}

		let (x_lo, x_hi) = axis_range(bounds.width, params.margin);
		let (y_lo, y_hi) = axis_range(bounds.height, params.margin);

		self.particles.reserve(params.count as usize);
		for _ in 0..params.count {
			let x = rng.gen_range(x_lo..=x_hi);
			let y = rng.gen_range(y_lo..=y_hi);
			let (dx, dy) = if params.speed != 0.0 {
				(
					(rng.r#gen::<f64>() - 0.5) * params.speed,
					(rng.r#gen::<f64>() - 0.5) * params.speed,
				)
			} else {
				(0.0, 0.0)
			};
			self.particles.push(Particle {
				x,
				y,
				dx,
				dy,
				radius: params.radius,
			});
		}
	}

	/// Updates every particle's radius in place.
	/// Resizes every particle in place.
	pub fn set_radius(&mut self, radius: f64) {
		for p in &mut self.particles {
			p.radius = radius;
		}
	}

	/// All particles, in generation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable view for the motion step.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the field has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

impl From<Vec<Particle>> for ParticleField {
	fn from(particles: Vec<Particle>) -> Self {
		Self { particles }
	}
}

/// Inclusive placement range along one axis.
fn axis_range(extent: f64, margin: f64) -> (f64, f64) {
	let extent = extent.max(0.0);
	let margin = margin.max(0.0).min(extent / 2.0);
	(margin, extent - margin)
}
