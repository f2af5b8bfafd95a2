//! Runtime configuration for the connections page.
//!
//! Every field has a default matching the stock deployment, so a page can
//! embed a partial JSON document (or none at all) in a
//! `<script id="social-graph-config" type="application/json">` element.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Id of the script element holding the JSON overrides.
pub const CONFIG_ELEMENT_ID: &str = "social-graph-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
	pub all_users: String,
	pub connections: String,
	pub pending_requests: String,
	/// Prefix; the URI-encoded username is appended.
	pub send_friend_request: String,
	/// Prefix; the URI-encoded username is appended.
	pub profile: String,
	pub csrf_cookie: String,
	pub csrf_header: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			all_users: "/api/all_users".into(),
			connections: "/api/connections".into(),
			pending_requests: "/api/pending_requests".into(),
			send_friend_request: "/send-friend-request/".into(),
			profile: "/profile/".into(),
			csrf_cookie: "csrftoken".into(),
			csrf_header: "X-CSRFToken".into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
	pub link_distance: f64,
	pub charge: f64,
	pub position_strength: f64,
	/// Collision radius as a multiple of the node radius.
	pub collide_scale: f64,
	pub collide_strength: f64,
	pub velocity_decay: f64,
	/// Alpha used when dragging and when a clicked node is released.
	pub reheat_alpha: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			link_distance: 100.0,
			charge: -500.0,
			position_strength: 0.05,
			collide_scale: 1.5,
			collide_strength: 0.5,
			velocity_decay: 0.4,
			reheat_alpha: 0.3,
		}
	}
}

/// Durations in milliseconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timings {
	pub hover_ms: f64,
	pub click_ms: f64,
	pub release_ms: f64,
	pub click_timeout_ms: f64,
	pub fade_ms: f64,
	pub expand_ms: f64,
	pub navigate_delay_ms: f64,
	pub reset_view_ms: f64,
	pub search_redirect_ms: f64,
}

impl Default for Timings {
	fn default() -> Self {
		Self {
			hover_ms: 200.0,
			click_ms: 300.0,
			release_ms: 500.0,
			click_timeout_ms: 10_000.0,
			fade_ms: 300.0,
			expand_ms: 1_000.0,
			navigate_delay_ms: 100.0,
			reset_view_ms: 750.0,
			search_redirect_ms: 1_000.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Pannable area as a multiple of the viewport on each side.
	pub extent_margin: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			extent_margin: 2.0,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	pub endpoints: Endpoints,
	pub physics: PhysicsConfig,
	pub timings: Timings,
	pub zoom: ZoomConfig,
}

impl GraphConfig {
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Read overrides from the page, falling back to defaults.
	pub fn from_dom() -> Self {
		let Some(text) = config_element_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("loaded graph config from #{CONFIG_ELEMENT_ID}");
				config
			}
			Err(e) => {
				warn!("ignoring invalid #{CONFIG_ELEMENT_ID}: {e}");
				Self::default()
			}
		}
	}
}

fn config_element_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let element = window.document()?.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
