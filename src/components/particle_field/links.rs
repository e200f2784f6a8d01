//! Proximity links between points and the attributes used to draw them.
//!
//! Links are recomputed from scratch every frame with a brute-force pair
//! scan. Point counts are bounded (≤ 100) so O(n²) stays cheap.

use super::motion::Anchor;
use super::particles::Particle;

/// A pair of points closer than the connection distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle, `None` when the link starts at the anchor.
	pub source: Option<usize>,
	/// Index of the second particle.
	pub target: usize,
	/// Logical position of the source point.
	pub start: (f64, f64),
	/// Logical position of the target point.
	pub end: (f64, f64),
	/// Euclidean distance between the two points.
	pub distance: f64,
	/// `1 - distance / threshold`, in `(0, 1]`.
	pub strength: f64,
}

/// Normalized proximity, or `None` when the points are too far apart to be
/// linked. A non-positive (or NaN) threshold never links.
pub fn strength(distance: f64, threshold: f64) -> Option<f64> {
	if threshold > 0.0 && distance < threshold {
		Some((1.0 - distance / threshold).clamp(0.0, 1.0))
	} else {
		None
	}
}

/// Links from the anchor to every field particle in range.
pub fn anchor_links(anchor: Anchor, particles: &[Particle], threshold: f64) -> Vec<Link> {
	particles
		.iter()
		.enumerate()
		.filter_map(|(i, p)| {
			let distance = (p.x - anchor.x).hypot(p.y - anchor.y);
			strength(distance, threshold).map(|strength| Link {
				source: None,
				target: i,
				start: (anchor.x, anchor.y),
				end: (p.x, p.y),
				distance,
				strength,
			})
		})
		.collect()
}

/// Links between every unordered pair of particles in range, `source < target`.
pub fn pair_links(particles: &[Particle], threshold: f64) -> Vec<Link> {
	let mut links = Vec::new();
	for (i, a) in particles.iter().enumerate() {
		for (j, b) in particles.iter().enumerate().skip(i + 1) {
			let distance = (a.x - b.x).hypot(a.y - b.y);
			if let Some(strength) = strength(distance, threshold) {
				links.push(Link {
					source: Some(i),
					target: j,
					start: (a.x, a.y),
					end: (b.x, b.y),
					distance,
					strength,
				});
			}
		}
	}
	links
}

/// Stroke alpha byte for a link: `round(strength * opacity * 255)`.
pub fn link_alpha(strength: f64, opacity: f64) -> u8 {
	(strength * opacity * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Control point of the animated curve drawn for a pointer-mode link.
///
/// The chord midpoint is pushed along the chord's unit normal by
/// `sin(time_secs) * distance * 0.1`, so curves sway with wall-clock time.
pub fn curve_control(link: &Link, time_secs: f64) -> (f64, f64) {
	let (x1, y1) = link.start;
	let (x2, y2) = link.end;
	let (mid_x, mid_y) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
	if link.distance < 0.001 {
		return (mid_x, mid_y);
	}

	let wave = time_secs.sin() * link.distance * 0.1;
	let (ux, uy) = ((x2 - x1) / link.distance, (y2 - y1) / link.distance);
	(mid_x - uy * wave, mid_y + ux * wave)
}
