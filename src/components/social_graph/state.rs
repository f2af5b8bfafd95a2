use std::collections::HashMap;

use super::simulation::{NodeParams, Simulation};
use super::style::{self, CLICKED_CORNER, HOVER_SCALE, LABEL_HOVER_PX, LABEL_PX};
use super::tween::Tween;
use super::types::{GraphData, GraphLink};
use super::viewport::Viewport;
use crate::api::FriendRequestOutcome;
use crate::config::GraphConfig;
use crate::error::ApiError;

/// Pointer travel, in pixels, below which a press-release counts as a click.
pub const CLICK_SLOP: f64 = 3.0;
pub const ALREADY_SENT: &str = "Friend request already sent!";
pub const SEND_FAILED: &str = "An error occurred while sending the friend request.";
const PENDING_OUTLINE_OPACITY: f64 = 0.8;

/// Animated presentation of one node.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	pub radius: f64,
	/// Side length of the rounded square.
	pub size: Tween,
	pub corner: Tween,
	/// 0 = resting fill, 1 = darker fill.
	pub shade: Tween,
	pub label_px: Tween,
	pub outline: Tween,
	pub prompt: Tween,
	pub opacity: Tween,
}

impl NodeVisual {
	fn new(radius: f64, pending: bool) -> Self {
		Self {
			radius,
			size: Tween::fixed(radius * 2.0),
			corner: Tween::fixed(radius),
			shade: Tween::fixed(0.0),
			label_px: Tween::fixed(LABEL_PX),
			outline: Tween::fixed(if pending { PENDING_OUTLINE_OPACITY } else { 0.0 }),
			prompt: Tween::fixed(0.0),
			opacity: Tween::fixed(1.0),
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clicked {
	pub node: usize,
	pub at: f64,
}

/// A profile navigation in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaving {
	pub node: usize,
	pub username: String,
	pub navigate_at: f64,
	fired: bool,
}

/// Side effect the component performs after a click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
	None,
	Alert(String),
	SendFriendRequest { node: usize, username: String },
}

pub struct SocialGraphState {
	pub data: GraphData,
	pub sim: Simulation,
	pub visuals: Vec<NodeVisual>,
	pub viewport: Viewport,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<usize>,
	pub clicked: Option<Clicked>,
	pub leaving: Option<Leaving>,
	/// The view has been zoomed, panned or a node dragged since the last reset.
	pub has_moved: bool,
	pub edge_opacity: Tween,
	pub links: Vec<(usize, usize)>,
	pub pending_links: Vec<(usize, usize)>,
	central: Option<usize>,
	current: Option<usize>,
	config: GraphConfig,
}

impl SocialGraphState {
	pub fn new(data: &GraphData, config: &GraphConfig, width: f64, height: f64) -> Self {
		let index: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let resolve = |links: &[GraphLink]| -> Vec<(usize, usize)> {
			links
				.iter()
				.filter_map(|l| {
					let source = *index.get(l.source.as_str())?;
					let target = *index.get(l.target.as_str())?;
					Some((source, target))
				})
				.collect()
		};
		let links = resolve(&data.links);
		let pending_links = resolve(&data.pending_links);

		let physics = &config.physics;
		let (params, visuals): (Vec<_>, Vec<_>) = data
			.nodes
			.iter()
			.map(|node| {
				let radius = style::node_radius(&node.username);
				let (charge, position_strength) = if node.is_current_user {
					(0.0, 0.0)
				} else {
					(physics.charge, physics.position_strength)
				};
				(
					NodeParams {
						charge,
						position_strength,
						collide_radius: radius * physics.collide_scale,
					},
					NodeVisual::new(radius, node.has_pending_request),
				)
			})
			.unzip();

		let center = (width / 2.0, height / 2.0);
		let mut sim = Simulation::new(params, &links, physics, center);
		let central = data
			.central
			.as_deref()
			.and_then(|id| index.get(id).copied());
		if let Some(c) = central {
			sim.pin(c, center.0, center.1);
			sim.nodes[c].x = center.0;
			sim.nodes[c].y = center.1;
		}
		let current = index.get(data.current.as_str()).copied();

		Self {
			data: data.clone(),
			sim,
			visuals,
			viewport: Viewport::new(width, height, &config.zoom),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			clicked: None,
			leaving: None,
			has_moved: false,
			edge_opacity: Tween::fixed(1.0),
			links,
			pending_links,
			central,
			current,
			config: config.clone(),
		}
	}

	pub fn is_central(&self, i: usize) -> bool {
		self.central == Some(i)
	}

	fn is_clicked(&self, i: usize) -> bool {
		self.clicked.is_some_and(|c| c.node == i)
	}

	fn drag_may_pin(&self, i: usize) -> bool {
		!self.is_clicked(i) && !self.is_central(i)
	}

	fn reheat(&mut self) {
		self.sim.set_alpha(self.config.physics.reheat_alpha);
		self.sim.restart();
	}

	/// Topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.viewport.screen_to_world(sx, sy);
		(0..self.visuals.len()).rev().find(|&i| {
			let (x, y) = self.sim.position(i);
			let (dx, dy) = (gx - x, gy - y);
			let visual = &self.visuals[i];
			let half = visual.size.target() / 2.0;
			if visual.corner.target() >= half {
				dx * dx + dy * dy <= half * half
			} else {
				dx.abs() <= half && dy.abs() <= half
			}
		})
	}

	pub fn set_hover(&mut self, node: Option<usize>, now: f64) {
		if self.leaving.is_some() || self.hover == node {
			return;
		}
		let ms = self.config.timings.hover_ms;
		if let Some(prev) = self.hover.take() {
			if self.is_clicked(prev) {
				self.release(prev, now);
			} else {
				let v = &mut self.visuals[prev];
				v.size.animate(v.radius * 2.0, now, ms);
				v.shade.animate(0.0, now, ms);
				v.label_px.animate(LABEL_PX, now, ms);
			}
		}
		self.hover = node;
		if let Some(i) = node.filter(|&i| !self.is_clicked(i)) {
			let v = &mut self.visuals[i];
			v.size.animate(v.radius * HOVER_SCALE, now, ms);
			v.shade.animate(1.0, now, ms);
			v.label_px.animate(LABEL_HOVER_PX, now, ms);
		}
	}

	/// Undo a click: restore the shape, drop the pin and let the layout settle.
	pub fn release(&mut self, i: usize, now: f64) {
		if self.is_clicked(i) {
			self.clicked = None;
		}
		if !self.is_central(i) {
			self.sim.unpin(i);
		}
		let hovered = self.hover == Some(i);
		let timings = &self.config.timings;
		let v = &mut self.visuals[i];
		v.size.animate(v.radius * 2.0, now, timings.release_ms);
		v.corner.animate(v.radius, now, timings.release_ms);
		v.shade.animate(0.0, now, timings.release_ms);
		if !hovered {
			v.label_px.animate(LABEL_PX, now, timings.hover_ms);
		}
		v.prompt.animate(0.0, now, timings.hover_ms);
		self.reheat();
	}

	pub fn click(&mut self, i: usize, now: f64) -> ClickAction {
		if self.leaving.is_some() || i >= self.data.nodes.len() {
			return ClickAction::None;
		}
		if self.is_clicked(i) {
			let node = &self.data.nodes[i];
			return if node.is_friend || node.is_current_user {
				self.begin_leaving(i, now);
				ClickAction::None
			} else if node.has_pending_request {
				ClickAction::Alert(ALREADY_SENT.to_string())
			} else {
				ClickAction::SendFriendRequest {
					node: i,
					username: node.username.clone(),
				}
			};
		}

		if let Some(prev) = self.clicked {
			self.release(prev.node, now);
		}
		self.clicked = Some(Clicked { node: i, at: now });
		let (x, y) = self.sim.position(i);
		self.sim.pin(i, x, y);

		let timings = &self.config.timings;
		let node = &self.data.nodes[i];
		let v = &mut self.visuals[i];
		v.corner.animate(CLICKED_CORNER, now, timings.click_ms);
		if node.is_current_user {
			v.shade.animate(0.0, now, timings.click_ms);
		} else {
			v.shade.animate(1.0, now, timings.click_ms);
			if !node.is_friend {
				v.prompt.animate(1.0, now, timings.hover_ms);
			}
		}
		ClickAction::None
	}

	fn begin_leaving(&mut self, i: usize, now: f64) {
		let timings = &self.config.timings;
		for (j, v) in self.visuals.iter_mut().enumerate() {
			if j != i {
				v.opacity.animate(0.0, now, timings.fade_ms);
			}
		}
		self.edge_opacity.animate(0.0, now, timings.fade_ms);

		let cover = 2.0 * self.viewport.width.max(self.viewport.height) / self.viewport.transform.k;
		let v = &mut self.visuals[i];
		v.size.animate(cover, now, timings.expand_ms);
		v.corner.animate(0.0, now, timings.expand_ms);
		v.prompt.animate(0.0, now, timings.hover_ms);

		self.leaving = Some(Leaving {
			node: i,
			username: self.data.nodes[i].username.clone(),
			navigate_at: now + timings.navigate_delay_ms,
			fired: false,
		});
	}

	/// Username whose profile should open now; yields it once.
	pub fn due_navigation(&mut self, now: f64) -> Option<String> {
		let leaving = self.leaving.as_mut()?;
		if leaving.fired || now < leaving.navigate_at {
			return None;
		}
		leaving.fired = true;
		Some(leaving.username.clone())
	}

	/// Record the server's answer and produce the message for the user.
	pub fn apply_friend_request(
		&mut self,
		i: usize,
		result: &Result<FriendRequestOutcome, ApiError>,
		now: f64,
	) -> String {
		let Some(username) = self.data.nodes.get(i).map(|n| n.username.clone()) else {
			return SEND_FAILED.to_string();
		};
		match result {
			Ok(FriendRequestOutcome::Sent) => {
				self.mark_pending(i, now);
				format!("Friend request sent to {username}!")
			}
			Ok(FriendRequestOutcome::AlreadyPending) => {
				self.mark_pending(i, now);
				ALREADY_SENT.to_string()
			}
			Ok(FriendRequestOutcome::Rejected(error)) => {
				format!("Failed to send friend request: {error}")
			}
			Err(_) => SEND_FAILED.to_string(),
		}
	}

	fn mark_pending(&mut self, i: usize, now: f64) {
		self.data.nodes[i].has_pending_request = true;
		self.visuals[i]
			.outline
			.animate(PENDING_OUTLINE_OPACITY, now, self.config.timings.hover_ms);
		let Some(current) = self.current else {
			return;
		};
		if current != i && !self.pending_links.contains(&(current, i)) {
			self.pending_links.push((current, i));
			self.data.pending_links.push(GraphLink {
				source: self.data.nodes[current].id.clone(),
				target: self.data.nodes[i].id.clone(),
			});
		}
	}

	pub fn begin_drag(&mut self, i: usize, sx: f64, sy: f64) {
		if self.leaving.is_some() {
			return;
		}
		let (x, y) = self.sim.position(i);
		self.drag = DragState {
			node: Some(i),
			start_x: sx,
			start_y: sy,
			node_start_x: x,
			node_start_y: y,
			moved: false,
		};
		self.sim.set_alpha_target(self.config.physics.reheat_alpha);
		self.sim.restart();
		if self.drag_may_pin(i) {
			self.sim.pin(i, x, y);
		}
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(i) = self.drag.node else {
			return;
		};
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
			self.drag.moved = true;
		}
		if !self.drag_may_pin(i) {
			return;
		}
		let k = self.viewport.transform.k;
		self.sim.pin(
			i,
			self.drag.node_start_x + dx / k,
			self.drag.node_start_y + dy / k,
		);
		if self.drag.moved {
			self.has_moved = true;
		}
	}

	/// Finish a drag. Returns the node when the gesture was a click.
	pub fn end_drag(&mut self) -> Option<usize> {
		let i = self.drag.node.take()?;
		self.sim.set_alpha_target(0.0);
		if self.drag_may_pin(i) {
			self.sim.unpin(i);
		}
		(!self.drag.moved).then_some(i)
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.viewport.transform.x,
			transform_start_y: self.viewport.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
		if dx == 0.0 && dy == 0.0 {
			return;
		}
		self.viewport.set_translate(
			self.pan.transform_start_x + dx,
			self.pan.transform_start_y + dy,
		);
		self.has_moved = true;
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.viewport.zoom_at(sx, sy, factor);
		self.has_moved = true;
	}

	pub fn reset_view(&mut self, now: f64) {
		self.viewport
			.begin_reset(now, self.config.timings.reset_view_ms);
		self.has_moved = false;
	}

	/// Pointer left the canvas.
	pub fn cancel_pointer(&mut self, now: f64) {
		self.end_drag();
		self.end_pan();
		self.set_hover(None, now);
	}

	pub fn tick(&mut self, now: f64) {
		if let Some(clicked) = self.clicked {
			if now - clicked.at >= self.config.timings.click_timeout_ms {
				self.release(clicked.node, now);
			}
		}
		self.sim.tick();
		self.viewport.tick(now);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
		self.sim.set_center(width / 2.0, height / 2.0);
		if let Some(c) = self.central {
			self.sim.pin(c, width / 2.0, height / 2.0);
		}
		self.reheat();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::social_graph::types::GraphNode;

	fn user(name: &str, current: bool, friend: bool, pending: bool) -> GraphNode {
		GraphNode {
			id: name.into(),
			username: name.into(),
			is_current_user: current,
			is_friend: friend,
			has_pending_request: pending,
		}
	}

	fn link(a: &str, b: &str) -> GraphLink {
		GraphLink {
			source: a.into(),
			target: b.into(),
		}
	}

	const ANA: usize = 0;
	const BEN: usize = 1;
	const CLEO: usize = 2;
	const DEV: usize = 3;

	fn state() -> SocialGraphState {
		let data = GraphData {
			nodes: vec![
				user("ana", true, false, false),
				user("ben", false, true, false),
				user("cleo", false, false, false),
				user("dev", false, false, true),
			],
			links: vec![link("ana", "ben")],
			pending_links: vec![link("ana", "dev")],
			current: "ana".into(),
			central: Some("ana".into()),
		};
		SocialGraphState::new(&data, &GraphConfig::default(), 800.0, 600.0)
	}

	fn screen_of(s: &SocialGraphState, i: usize) -> (f64, f64) {
		let (x, y) = s.sim.position(i);
		s.viewport.transform.apply(x, y)
	}

	#[test]
	fn central_node_is_pinned_at_viewport_centre() {
		let mut s = state();
		for _ in 0..20 {
			s.tick(0.0);
		}
		assert_eq!(s.sim.position(ANA), (400.0, 300.0));
		assert_eq!(s.links, vec![(ANA, BEN)]);
		assert_eq!(s.pending_links, vec![(ANA, DEV)]);
	}

	#[test]
	fn hit_testing_finds_node_under_pointer() {
		let mut s = state();
		while s.sim.tick() {}
		let (x, y) = screen_of(&s, ANA);
		assert_eq!(s.node_at_position(x, y), Some(ANA));
		assert_eq!(s.node_at_position(-5_000.0, -5_000.0), None);
	}

	#[test]
	fn hover_enlarges_and_leaving_restores() {
		let mut s = state();
		let r = s.visuals[BEN].radius;
		s.set_hover(Some(BEN), 0.0);
		assert_eq!(s.visuals[BEN].size.target(), r * HOVER_SCALE);
		assert_eq!(s.visuals[BEN].label_px.target(), LABEL_HOVER_PX);
		s.set_hover(None, 10.0);
		assert_eq!(s.visuals[BEN].size.target(), r * 2.0);
		assert_eq!(s.visuals[BEN].shade.target(), 0.0);
	}

	#[test]
	fn first_click_pins_and_prompts_strangers_only() {
		let mut s = state();
		assert_eq!(s.click(CLEO, 0.0), ClickAction::None);
		assert!(s.sim.is_pinned(CLEO));
		assert_eq!(s.visuals[CLEO].prompt.target(), 1.0);
		assert_eq!(s.visuals[CLEO].corner.target(), CLICKED_CORNER);

		assert_eq!(s.click(BEN, 5.0), ClickAction::None);
		assert_eq!(s.visuals[BEN].prompt.target(), 0.0);
		// Clicking another node releases the first.
		assert!(!s.sim.is_pinned(CLEO));
		assert_eq!(s.clicked.map(|c| c.node), Some(BEN));
	}

	#[test]
	fn second_click_on_friend_navigates_after_delay() {
		let mut s = state();
		s.click(BEN, 0.0);
		assert_eq!(s.click(BEN, 1_000.0), ClickAction::None);
		assert!(s.leaving.is_some());
		assert_eq!(s.visuals[CLEO].opacity.target(), 0.0);
		assert_eq!(s.due_navigation(1_050.0), None);
		assert_eq!(s.due_navigation(1_100.0).as_deref(), Some("ben"));
		assert_eq!(s.due_navigation(1_200.0), None);
		assert_eq!(s.click(CLEO, 1_300.0), ClickAction::None);
	}

	#[test]
	fn second_click_on_current_user_navigates() {
		let mut s = state();
		s.click(ANA, 0.0);
		s.click(ANA, 10.0);
		assert_eq!(s.due_navigation(500.0).as_deref(), Some("ana"));
		// The central node keeps its pin through the click.
		assert!(s.sim.is_pinned(ANA));
	}

	#[test]
	fn second_click_on_stranger_requests_friendship() {
		let mut s = state();
		s.click(CLEO, 0.0);
		assert_eq!(
			s.click(CLEO, 10.0),
			ClickAction::SendFriendRequest {
				node: CLEO,
				username: "cleo".into()
			}
		);
		s.click(DEV, 20.0);
		assert_eq!(s.click(DEV, 30.0), ClickAction::Alert(ALREADY_SENT.into()));
	}

	#[test]
	fn click_times_out_and_reheats() {
		let mut s = state();
		s.click(CLEO, 0.0);
		s.sim.set_alpha(0.0);
		s.tick(9_999.0);
		assert!(s.clicked.is_some());
		s.tick(10_000.0);
		assert!(s.clicked.is_none());
		assert!(!s.sim.is_pinned(CLEO));
		assert!(s.sim.is_running());
		assert_eq!(s.visuals[CLEO].prompt.target(), 0.0);
	}

	#[test]
	fn clicking_current_user_keeps_its_colour() {
		let mut s = state();
		s.click(ANA, 0.0);
		assert_eq!(s.visuals[ANA].shade.target(), 0.0);
		assert_eq!(s.visuals[ANA].prompt.target(), 0.0);
		s.click(CLEO, 10.0);
		assert_eq!(s.visuals[CLEO].shade.target(), 1.0);
	}

	#[test]
	fn timeout_keeps_label_of_hovered_node() {
		let mut s = state();
		s.set_hover(Some(CLEO), 0.0);
		s.click(CLEO, 10.0);
		s.tick(10_010.0);
		assert!(s.clicked.is_none());
		assert_eq!(s.visuals[CLEO].label_px.target(), LABEL_HOVER_PX);

		s.click(BEN, 20_000.0);
		s.tick(30_000.0);
		assert_eq!(s.visuals[BEN].label_px.target(), LABEL_PX);
	}

	#[test]
	fn hovering_away_releases_clicked_node() {
		let mut s = state();
		s.set_hover(Some(CLEO), 0.0);
		s.click(CLEO, 10.0);
		assert_eq!(
			s.visuals[CLEO].size.target(),
			s.visuals[CLEO].radius * HOVER_SCALE
		);
		s.set_hover(None, 20.0);
		assert!(s.clicked.is_none());
		assert!(!s.sim.is_pinned(CLEO));
		assert_eq!(s.visuals[CLEO].size.target(), s.visuals[CLEO].radius * 2.0);
	}

	#[test]
	fn friend_request_outcomes() {
		let mut s = state();
		let sent = s.apply_friend_request(CLEO, &Ok(FriendRequestOutcome::Sent), 0.0);
		assert_eq!(sent, "Friend request sent to cleo!");
		assert!(s.data.nodes[CLEO].has_pending_request);
		assert_eq!(s.visuals[CLEO].outline.target(), PENDING_OUTLINE_OPACITY);
		assert!(s.pending_links.contains(&(ANA, CLEO)));
		assert_eq!(s.data.pending_links.len(), 2);

		let again = s.apply_friend_request(CLEO, &Ok(FriendRequestOutcome::AlreadyPending), 0.0);
		assert_eq!(again, ALREADY_SENT);
		assert_eq!(s.pending_links.len(), 2);

		let rejected =
			s.apply_friend_request(BEN, &Ok(FriendRequestOutcome::Rejected("nope".into())), 0.0);
		assert_eq!(rejected, "Failed to send friend request: nope");
		assert!(!s.data.nodes[BEN].has_pending_request);

		let failed = s.apply_friend_request(BEN, &Err(ApiError::NoWindow), 0.0);
		assert_eq!(failed, SEND_FAILED);
	}

	#[test]
	fn drag_pins_while_moving_and_marks_view_moved() {
		let mut s = state();
		let (sx, sy) = screen_of(&s, CLEO);
		s.begin_drag(CLEO, sx, sy);
		assert!(s.sim.is_pinned(CLEO));
		s.drag_to(sx + 40.0, sy);
		let fx = s.sim.nodes[CLEO].fx.unwrap();
		assert!((fx - (s.drag.node_start_x + 40.0)).abs() < 1e-9);
		assert!(s.has_moved);
		assert_eq!(s.end_drag(), None);
		assert!(!s.sim.is_pinned(CLEO));
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let mut s = state();
		let (sx, sy) = screen_of(&s, CLEO);
		s.begin_drag(CLEO, sx, sy);
		s.drag_to(sx + 1.0, sy + 1.0);
		assert_eq!(s.end_drag(), Some(CLEO));
		assert!(!s.has_moved);
	}

	#[test]
	fn dragging_central_node_keeps_it_fixed() {
		let mut s = state();
		s.begin_drag(ANA, 400.0, 300.0);
		s.drag_to(500.0, 300.0);
		assert_eq!(s.sim.nodes[ANA].fx, Some(400.0));
		s.end_drag();
		assert!(s.sim.is_pinned(ANA));
		assert!(!s.has_moved);
	}

	#[test]
	fn zoom_and_pan_show_reset_until_reset() {
		let mut s = state();
		s.zoom(400.0, 300.0, -1.0);
		assert!(s.has_moved);
		assert!((s.viewport.transform.k - 1.1).abs() < 1e-9);
		s.reset_view(0.0);
		assert!(!s.has_moved);
		s.tick(750.0);
		assert_eq!(s.viewport.transform.k, 1.0);

		s.begin_pan(0.0, 0.0);
		s.pan_to(25.0, 10.0);
		s.end_pan();
		assert!(s.has_moved);
		assert_eq!(s.viewport.transform.x, 25.0);
	}

	#[test]
	fn resize_recentres_the_central_node() {
		let mut s = state();
		s.resize(1_000.0, 800.0);
		s.tick(0.0);
		assert_eq!(s.sim.position(ANA), (500.0, 400.0));
	}
}
