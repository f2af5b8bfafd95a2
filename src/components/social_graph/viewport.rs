//! Pan/zoom transform bounded like d3-zoom's scale and translate extents.

use super::tween::ease_cubic;
use crate::config::ZoomConfig;

/// `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl ViewTransform {
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	#[cfg(test)]
	pub fn apply(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ResetAnimation {
	from: ViewTransform,
	start: f64,
	duration: f64,
}

#[derive(Clone, Debug)]
pub struct Viewport {
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
	min_k: f64,
	max_k: f64,
	/// World-space rectangle `[[x0, y0], [x1, y1]]` the view must stay inside.
	extent: [[f64; 2]; 2],
	reset: Option<ResetAnimation>,
}

impl Viewport {
	pub fn new(width: f64, height: f64, zoom: &ZoomConfig) -> Self {
		let m = zoom.extent_margin;
		Self {
			transform: ViewTransform::IDENTITY,
			width,
			height,
			min_k: zoom.min_scale,
			max_k: zoom.max_scale,
			extent: [[-width * m, -height * m], [width * (m + 1.0), height * (m + 1.0)]],
			reset: None,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.transform = self.constrain(self.transform);
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.invert(sx, sy)
	}

	/// Zoom by `factor` keeping the world point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.reset = None;
		let t = self.transform;
		let k = (t.k * factor).clamp(self.min_k, self.max_k);
		let ratio = k / t.k;
		self.transform = self.constrain(ViewTransform {
			x: sx - (sx - t.x) * ratio,
			y: sy - (sy - t.y) * ratio,
			k,
		});
	}

	pub fn set_translate(&mut self, x: f64, y: f64) {
		self.reset = None;
		self.transform = self.constrain(ViewTransform {
			x,
			y,
			k: self.transform.k,
		});
	}

	/// d3-zoom's default constraint: centre the view when the extent is
	/// smaller than the viewport, otherwise clamp each edge.
	pub fn constrain(&self, t: ViewTransform) -> ViewTransform {
		let [[ex0, ey0], [ex1, ey1]] = self.extent;
		let (left, top) = t.invert(0.0, 0.0);
		let (right, bottom) = t.invert(self.width, self.height);
		let shift = |d0: f64, d1: f64| {
			if d1 > d0 {
				(d0 + d1) / 2.0
			} else {
				let low = d0.min(0.0);
				if low != 0.0 { low } else { d1.max(0.0) }
			}
		};
		let dx = shift(left - ex0, right - ex1);
		let dy = shift(top - ey0, bottom - ey1);
		ViewTransform {
			x: t.x + t.k * dx,
			y: t.y + t.k * dy,
			k: t.k,
		}
	}

	pub fn begin_reset(&mut self, now: f64, duration: f64) {
		self.reset = Some(ResetAnimation {
			from: self.transform,
			start: now,
			duration,
		});
	}

	#[cfg(test)]
	pub fn is_resetting(&self) -> bool {
		self.reset.is_some()
	}

	pub fn tick(&mut self, now: f64) {
		let Some(reset) = self.reset else {
			return;
		};
		let t = if reset.duration <= 0.0 {
			1.0
		} else {
			((now - reset.start) / reset.duration).clamp(0.0, 1.0)
		};
		self.transform = reset.from.lerp(&ViewTransform::IDENTITY, ease_cubic(t));
		if t >= 1.0 {
			self.transform = ViewTransform::IDENTITY;
			self.reset = None;
		}
	}
}
