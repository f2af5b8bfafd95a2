#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Canonical id; equal to the username.
	pub id: String,
	pub username: String,
	pub is_current_user: bool,
	pub is_friend: bool,
	pub has_pending_request: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	/// Friendships within the current user's circle.
	pub links: Vec<GraphLink>,
	/// Outgoing friend requests, current user to receiver.
	pub pending_links: Vec<GraphLink>,
	pub current: String,
	/// Most connected node; pinned at the viewport centre.
	pub central: Option<String>,
}

/// Which users become nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeScope {
	#[default]
	Everyone,
	FriendsOnly,
}

impl NodeScope {
	pub fn from_query(value: Option<&str>) -> Self {
		match value {
			Some("true") | Some("1") => Self::FriendsOnly,
			_ => Self::Everyone,
		}
	}
}
