//! JSON records returned by the server.
//!
//! User ids arrive as integers from some endpoints and as usernames from
//! others; every id is normalized to a `String` on the way in.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Int(i64),
	Float(f64),
	Str(String),
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(match RawId::deserialize(deserializer)? {
		RawId::Int(i) => i.to_string(),
		RawId::Float(f) => f.to_string(),
		RawId::Str(s) => s,
	})
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiUser {
	#[serde(deserialize_with = "id_string")]
	pub id: String,
	pub username: String,
	#[serde(default, alias = "isCurrentUser")]
	pub is_current_user: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AllUsers {
	#[serde(default)]
	pub users: Vec<ApiUser>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiNode {
	#[serde(deserialize_with = "id_string")]
	pub id: String,
	pub username: String,
	#[serde(default, rename = "isCurrentUser", alias = "is_current_user")]
	pub is_current_user: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiLink {
	#[serde(deserialize_with = "id_string")]
	pub source: String,
	#[serde(deserialize_with = "id_string")]
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Connections {
	#[serde(default)]
	pub nodes: Vec<ApiNode>,
	#[serde(default)]
	pub links: Vec<ApiLink>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
	Outgoing,
	Incoming,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PendingRequest {
	#[serde(deserialize_with = "id_string")]
	pub sender_id: String,
	#[serde(default)]
	pub sender_username: Option<String>,
	#[serde(deserialize_with = "id_string")]
	pub receiver_id: String,
	#[serde(default)]
	pub receiver_username: Option<String>,
	#[serde(default)]
	pub status: Option<RequestDirection>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PendingRequests {
	#[serde(default)]
	pub pending_requests: Vec<PendingRequest>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FriendRequestReply {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub error: Option<String>,
}
