/// Cubic ease-in-out, the default easing for d3 transitions.
pub fn ease_cubic(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// A value animating toward a target over a fixed duration.
///
/// Times are milliseconds on the same clock passed to [`Tween::value`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	from: f64,
	to: f64,
	start: f64,
	duration: f64,
}

impl Tween {
	pub fn fixed(value: f64) -> Self {
		Self {
			from: value,
			to: value,
			start: 0.0,
			duration: 0.0,
		}
	}

	pub fn value(&self, now: f64) -> f64 {
		if self.duration <= 0.0 || now >= self.start + self.duration {
			return self.to;
		}
		let t = ((now - self.start) / self.duration).max(0.0);
		self.from + (self.to - self.from) * ease_cubic(t)
	}

	pub fn target(&self) -> f64 {
		self.to
	}

	/// Start animating from the current value toward `to`.
	pub fn animate(&mut self, to: f64, now: f64, duration: f64) {
		self.from = self.value(now);
		self.to = to;
		self.start = now;
		self.duration = duration;
	}

	#[cfg(test)]
	pub fn is_settled(&self, now: f64) -> bool {
		self.duration <= 0.0 || now >= self.start + self.duration
	}
}
