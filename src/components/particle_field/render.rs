//! Drawing for the particle field.
//!
//! Everything is drawn in logical units through the [`Surface`] trait, in
//! this order each frame:
//! 1. Background (clear, optional fill)
//! 2. Links
//! 3. Field particles
//! 4. The anchor, on top

use super::config::Config;
use super::links::{curve_control, link_alpha, Link};
use super::motion::Anchor;
use super::particles::Particle;
use super::surface::Bounds;
use super::theme::Theme;

/// Anchor glow is stronger than link glow by this factor.
pub const ANCHOR_GLOW_SCALE: f64 = 1.5;

/// Minimal immediate-mode 2-D vector API the engine draws through.
pub trait Surface {
	/// Whether the surface can still be drawn on. A detached surface stops
	/// the animation.
	fn is_attached(&self) -> bool {
		true
	}
	/// Replaces (does not compose) the current transform.
	fn set_transform(&self, transform: [f64; 6]);
	/// Makes the rectangle transparent.
	fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);
	/// Paints the rectangle with the fill style.
	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
	/// CSS color used by `fill` and `fill_rect`.
	fn set_fill_style(&self, css: &str);
	/// CSS color used by `stroke`.
	fn set_stroke_style(&self, css: &str);
	/// Stroke width in logical units.
	fn set_line_width(&self, width: f64);
	/// Glow color and blur radius for everything drawn after.
	fn set_shadow(&self, css: &str, blur: f64);
	/// Starts a new path.
	fn begin_path(&self);
	/// Moves the pen without drawing.
	fn move_to(&self, x: f64, y: f64);
	/// Straight segment to `(x, y)`.
	fn line_to(&self, x: f64, y: f64);
	/// Quadratic segment to `(x, y)` bending toward `(cx, cy)`.
	fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64);
	/// Full circle centered on `(x, y)`.
	fn arc(&self, x: f64, y: f64, radius: f64);
	/// Fills the current path.
	fn fill(&self);
	/// Strokes the current path.
	fn stroke(&self);
}

/// Resets the transform and wipes the logical area.
pub fn draw_background<S: Surface + ?Sized>(
	surface: &S,
	transform: [f64; 6],
	bounds: Bounds,
	theme: &Theme,
) {
	surface.set_transform(transform);
	surface.set_shadow("transparent", 0.0);
	surface.clear_rect(0.0, 0.0, bounds.width, bounds.height);
	if let Some(bg) = theme.background {
		surface.set_fill_style(&bg.to_css());
		surface.fill_rect(0.0, 0.0, bounds.width, bounds.height);
	}
}

/// Strokes every link with alpha taken from its strength; curved or straight
/// per the theme.
pub fn draw_links<S: Surface + ?Sized>(
	surface: &S,
	links: &[Link],
	config: &Config,
	theme: &Theme,
	time_secs: f64,
) {
	if links.is_empty() {
		return;
	}

	surface.set_line_width(theme.link_width);
	surface.set_shadow(&config.color.to_css(), config.glow_intensity.max(0.0));

	for link in links {
		let alpha = link_alpha(link.strength, theme.link_opacity);
		surface.set_stroke_style(&config.color.to_css_with_alpha_byte(alpha));
		surface.begin_path();
		surface.move_to(link.start.0, link.start.1);
		if theme.curved_links {
			let (cx, cy) = curve_control(link, time_secs);
			surface.quadratic_curve_to(cx, cy, link.end.0, link.end.1);
		} else {
			surface.line_to(link.end.0, link.end.1);
		}
		surface.stroke();
	}
}

/// Fills one circle per particle.
pub fn draw_particles<S: Surface + ?Sized>(
	surface: &S,
	particles: &[Particle],
	config: &Config,
	theme: &Theme,
) {
	let fill = theme.particle_fill.unwrap_or(config.color);
	surface.set_fill_style(&fill.to_css());
	surface.set_shadow(&config.color.to_css(), config.glow_intensity.max(0.0));

	for p in particles {
		surface.begin_path();
		surface.arc(p.x, p.y, p.radius.max(0.0));
		surface.fill();
	}
}

/// Draws the anchor with a stronger glow than the links.
pub fn draw_anchor<S: Surface + ?Sized>(surface: &S, anchor: Anchor, config: &Config) {
	let css = config.color.to_css();
	surface.set_fill_style(&css);
	surface.set_shadow(&css, config.glow_intensity.max(0.0) * ANCHOR_GLOW_SCALE);
	surface.begin_path();
	surface.arc(anchor.x, anchor.y, config.anchor_size.max(0.0));
	surface.fill();
	surface.set_shadow("transparent", 0.0);
}
