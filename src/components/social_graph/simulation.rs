//! Velocity-Verlet force simulation with d3-force semantics.
//!
//! The simulation cools from `alpha = 1` toward `alpha_target` and stops
//! once alpha falls below `ALPHA_MIN`, unless it is reheated. Forces run
//! in the order link, charge, center, x/y, collide.

use std::f64::consts::PI;

use crate::config::PhysicsConfig;

pub const ALPHA_MIN: f64 = 0.001;
const DISTANCE_MIN_SQ: f64 = 1.0;

fn alpha_decay() -> f64 {
	1.0 - ALPHA_MIN.powf(1.0 / 300.0)
}

/// Tiny deterministic nudge for coincident points.
fn jiggle(seed: usize) -> f64 {
	((seed as f64 * 0.618_034).fract() - 0.5) * 1e-6
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

/// Per-node force parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeParams {
	pub charge: f64,
	pub position_strength: f64,
	pub collide_radius: f64,
}

#[derive(Clone, Debug)]
struct SimLink {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

pub struct Simulation {
	pub nodes: Vec<SimNode>,
	params: Vec<NodeParams>,
	links: Vec<SimLink>,
	link_distance: f64,
	collide_strength: f64,
	velocity_decay: f64,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	stopped: bool,
}

impl Simulation {
	pub fn new(
		params: Vec<NodeParams>,
		links: &[(usize, usize)],
		physics: &PhysicsConfig,
		center: (f64, f64),
	) -> Self {
		let initial_angle = PI * (3.0 - 5f64.sqrt());
		let nodes = (0..params.len())
			.map(|i| {
				let radius = 10.0 * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				SimNode {
					x: center.0 + radius * angle.cos(),
					y: center.1 + radius * angle.sin(),
					..SimNode::default()
				}
			})
			.collect();

		let mut degree = vec![0usize; params.len()];
		let links: Vec<(usize, usize)> = links
			.iter()
			.copied()
			.filter(|&(s, t)| s < params.len() && t < params.len())
			.collect();
		for &(s, t) in &links {
			degree[s] += 1;
			degree[t] += 1;
		}
		let links = links
			.into_iter()
			.map(|(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				SimLink {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			nodes,
			params,
			links,
			link_distance: physics.link_distance,
			collide_strength: physics.collide_strength,
			velocity_decay: physics.velocity_decay,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay: alpha_decay(),
			stopped: false,
		}
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha.clamp(0.0, 1.0);
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	pub fn restart(&mut self) {
		self.stopped = false;
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		!self.stopped
	}

	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	pub fn position(&self, i: usize) -> (f64, f64) {
		let node = &self.nodes[i];
		(node.x, node.y)
	}

	pub fn pin(&mut self, i: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(i) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	pub fn unpin(&mut self, i: usize) {
		if let Some(node) = self.nodes.get_mut(i) {
			node.fx = None;
			node.fy = None;
		}
	}

	#[cfg(test)]
	pub fn is_pinned(&self, i: usize) -> bool {
		self.nodes.get(i).is_some_and(|n| n.fx.is_some())
	}

	/// Advance one step. Returns false once the simulation has cooled.
	pub fn tick(&mut self) -> bool {
		if self.stopped {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		let alpha = self.alpha;

		self.apply_links(alpha);
		self.apply_charge(alpha);
		self.apply_center();
		self.apply_position(alpha);
		self.apply_collide();

		let keep = 1.0 - self.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= keep;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= keep;
					node.y += node.vy;
				}
			}
		}

		if self.alpha < ALPHA_MIN {
			self.stopped = true;
		}
		true
	}

	fn apply_links(&mut self, alpha: f64) {
		for (k, link) in self.links.iter().enumerate() {
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = jiggle(k);
			}
			if y == 0.0 {
				y = jiggle(k + 1);
			}
			let len = (x * x + y * y).sqrt();
			let l = (len - self.link_distance) / len * alpha * link.strength;
			let (x, y) = (x * l, y * l);

			let target = &mut self.nodes[link.target];
			target.vx -= x * link.bias;
			target.vy -= y * link.bias;
			let source = &mut self.nodes[link.source];
			source.vx += x * (1.0 - link.bias);
			source.vy += y * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self, alpha: f64) {
		let n = self.nodes.len();
		for i in 0..n {
			let (xi, yi) = (self.nodes[i].x, self.nodes[i].y);
			let (mut fx, mut fy) = (0.0, 0.0);
			for j in 0..n {
				let strength = self.params[j].charge;
				if i == j || strength == 0.0 {
					continue;
				}
				let mut dx = self.nodes[j].x - xi;
				let mut dy = self.nodes[j].y - yi;
				let mut l = dx * dx + dy * dy;
				if dx == 0.0 {
					dx = jiggle(i * n + j);
					l += dx * dx;
				}
				if dy == 0.0 {
					dy = jiggle(j * n + i);
					l += dy * dy;
				}
				if l < DISTANCE_MIN_SQ {
					l = (DISTANCE_MIN_SQ * l).sqrt();
				}
				let w = strength * alpha / l;
				fx += dx * w;
				fy += dy * w;
			}
			self.nodes[i].vx += fx;
			self.nodes[i].vy += fy;
		}
	}

	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (sx / n - self.center.0, sy / n - self.center.1);
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn apply_position(&mut self, alpha: f64) {
		let (cx, cy) = self.center;
		for (node, params) in self.nodes.iter_mut().zip(&self.params) {
			let k = params.position_strength * alpha;
			node.vx += (cx - node.x) * k;
			node.vy += (cy - node.y) * k;
		}
	}

	fn apply_collide(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			let ri = self.params[i].collide_radius;
			let ri2 = ri * ri;
			let xi = self.nodes[i].x + self.nodes[i].vx;
			let yi = self.nodes[i].y + self.nodes[i].vy;
			for j in (i + 1)..n {
				let rj = self.params[j].collide_radius;
				let r = ri + rj;
				let other = &self.nodes[j];
				let mut x = xi - other.x - other.vx;
				let mut y = yi - other.y - other.vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = jiggle(i * n + j);
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle(j * n + i);
					l += y * y;
				}
				let len = l.sqrt();
				let push = (r - len) / len * self.collide_strength;
				let (x, y) = (x * push, y * push);
				let share = rj * rj / (ri2 + rj * rj);

				self.nodes[i].vx += x * share;
				self.nodes[i].vy += y * share;
				self.nodes[j].vx -= x * (1.0 - share);
				self.nodes[j].vy -= y * (1.0 - share);
			}
		}
	}
}
