use super::types::GraphNode;

pub const BACKGROUND: &str = "#121212";
pub const CURRENT_FILL: &str = "#22c55e";
pub const CURRENT_FILL_DARK: &str = "#1a8c47";
pub const OTHER_FILL: &str = "#2d3748";
pub const OTHER_FILL_DARK: &str = "#1e293b";
pub const LINK_COLOR: &str = "limegreen";
pub const LINK_WIDTH: f64 = 4.0;
pub const PENDING_COLOR: &str = "#FFD700";
pub const PENDING_DASH: (f64, f64) = (8.0, 4.0);
pub const LABEL_COLOR: &str = "white";
pub const LABEL_PX: f64 = 16.0;
pub const LABEL_HOVER_PX: f64 = 20.0;
pub const CLICKED_CORNER: f64 = 10.0;
pub const HOVER_SCALE: f64 = 2.5;
pub const FRIEND_PROMPT: &str = "Click to send friend request";

const MIN_RADIUS: f64 = 25.0;
const RADIUS_PER_CHAR: f64 = 6.0;

/// Drop-shadow used in place of an SVG glow filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	pub color: &'static str,
	pub blur: f64,
}

pub const USER_GLOW: Glow = Glow {
	color: CURRENT_FILL,
	blur: 5.0,
};
pub const FRIEND_GLOW: Glow = Glow {
	color: LINK_COLOR,
	blur: 6.0,
};
pub const OTHER_GLOW: Glow = Glow {
	color: OTHER_FILL,
	blur: 5.0,
};

/// Resting radius; long usernames get wider nodes.
pub fn node_radius(username: &str) -> f64 {
	MIN_RADIUS.max(username.chars().count() as f64 * RADIUS_PER_CHAR)
}

pub fn fill(node: &GraphNode) -> &'static str {
	if node.is_current_user {
		CURRENT_FILL
	} else {
		OTHER_FILL
	}
}

pub fn dark_fill(node: &GraphNode) -> &'static str {
	if node.is_current_user {
		CURRENT_FILL_DARK
	} else {
		OTHER_FILL_DARK
	}
}

pub fn glow(node: &GraphNode) -> Glow {
	if node.is_current_user {
		USER_GLOW
	} else if node.is_friend {
		FRIEND_GLOW
	} else {
		OTHER_GLOW
	}
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
	let hex = color.strip_prefix('#')?;
	if hex.len() != 6 || !hex.is_ascii() {
		return None;
	}
	let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
	Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Blend two `#rrggbb` colours; `t = 0` gives `from`.
pub fn mix(from: &str, to: &str, t: f64) -> String {
	let (Some(a), Some(b)) = (parse_hex(from), parse_hex(to)) else {
		return if t < 0.5 { from } else { to }.to_string();
	};
	let t = t.clamp(0.0, 1.0);
	let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
	format!("#{:02x}{:02x}{:02x}", lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(current: bool, friend: bool) -> GraphNode {
		GraphNode {
			id: "x".into(),
			username: "x".into(),
			is_current_user: current,
			is_friend: friend,
			has_pending_request: false,
		}
	}

	#[test]
	fn radius_has_a_floor_and_grows_with_name() {
		assert_eq!(node_radius("ana"), 25.0);
		assert_eq!(node_radius("abcdefgh"), 48.0);
		assert_eq!(node_radius("ñandúes"), 42.0);
	}

	#[test]
	fn current_user_glow_wins_over_friendship() {
		assert_eq!(glow(&node(true, true)), USER_GLOW);
		assert_eq!(glow(&node(false, true)), FRIEND_GLOW);
		assert_eq!(glow(&node(false, false)), OTHER_GLOW);
		assert_eq!(fill(&node(true, false)), CURRENT_FILL);
		assert_eq!(dark_fill(&node(false, false)), OTHER_FILL_DARK);
	}

	#[test]
	fn mix_interpolates_channels() {
		assert_eq!(mix("#000000", "#ffffff", 0.0), "#000000");
		assert_eq!(mix("#000000", "#ffffff", 1.0), "#ffffff");
		assert_eq!(mix("#000000", "#ffffff", 0.5), "#808080");
		assert_eq!(mix(CURRENT_FILL, CURRENT_FILL_DARK, 1.0), "#1a8c47");
	}

	#[test]
	fn mix_falls_back_for_named_colours() {
		assert_eq!(mix("white", "#000000", 0.2), "white");
		assert_eq!(mix("white", "#000000", 0.8), "#000000");
	}
}
