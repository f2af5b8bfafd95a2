//! Merge the three REST payloads into a single node/link set.
//!
//! Nodes are keyed by username, the one field every payload agrees on.
//! Raw ids (integers from the user list, usernames from the connections
//! endpoint) are mapped onto that key before links and requests are
//! resolved.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::types::{GraphData, GraphLink, GraphNode, NodeScope};
use crate::api::types::{AllUsers, Connections, PendingRequest, PendingRequests, RequestDirection};
use crate::error::GraphError;

struct NodeIndex {
	nodes: Vec<GraphNode>,
	by_username: HashMap<String, usize>,
	by_raw_id: HashMap<String, usize>,
}

impl NodeIndex {
	fn new() -> Self {
		Self {
			nodes: Vec::new(),
			by_username: HashMap::new(),
			by_raw_id: HashMap::new(),
		}
	}

	fn insert(&mut self, raw_id: &str, username: &str, current: bool) {
		let idx = match self.by_username.get(username) {
			Some(&idx) => {
				let node = &mut self.nodes[idx];
				node.is_current_user |= current;
				idx
			}
			None => {
				self.nodes.push(GraphNode {
					id: username.to_string(),
					username: username.to_string(),
					is_current_user: current,
					is_friend: false,
					has_pending_request: false,
				});
				let idx = self.nodes.len() - 1;
				self.by_username.insert(username.to_string(), idx);
				idx
			}
		};
		self.by_raw_id.entry(raw_id.to_string()).or_insert(idx);
	}

	fn resolve(&self, raw_id: &str) -> Option<usize> {
		self.by_raw_id
			.get(raw_id)
			.or_else(|| self.by_username.get(raw_id))
			.copied()
	}

	fn resolve_party(&self, username: Option<&str>, raw_id: &str) -> Option<usize> {
		username
			.and_then(|u| self.by_username.get(u).copied())
			.or_else(|| self.resolve(raw_id))
	}
}

fn is_outgoing(request: &PendingRequest, index: &NodeIndex, current: usize) -> bool {
	if request.status == Some(RequestDirection::Incoming) {
		return false;
	}
	index.resolve_party(request.sender_username.as_deref(), &request.sender_id) == Some(current)
}

/// Build the drawable graph.
///
/// Friendship links are kept only between the current user and friends.
/// With [`NodeScope::FriendsOnly`] the node set shrinks to the current
/// user, friends and receivers of outgoing requests.
pub fn reconcile(
	all_users: &AllUsers,
	connections: &Connections,
	pending: &PendingRequests,
	scope: NodeScope,
) -> Result<GraphData, GraphError> {
	let mut index = NodeIndex::new();
	for node in &connections.nodes {
		index.insert(&node.id, &node.username, node.is_current_user);
	}
	for user in &all_users.users {
		index.insert(&user.id, &user.username, user.is_current_user);
	}

	let current = index
		.nodes
		.iter()
		.position(|n| n.is_current_user)
		.ok_or(GraphError::MissingCurrentUser)?;

	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	let mut dropped = 0usize;
	for link in &connections.links {
		let (Some(a), Some(b)) = (index.resolve(&link.source), index.resolve(&link.target)) else {
			dropped += 1;
			continue;
		};
		if a == b || !seen.insert((a.min(b), a.max(b))) {
			continue;
		}
		edges.push((a, b));
	}
	if dropped > 0 {
		warn!("dropped {dropped} links with unknown endpoints");
	}

	for &(a, b) in &edges {
		if a == current {
			index.nodes[b].is_friend = true;
		} else if b == current {
			index.nodes[a].is_friend = true;
		}
	}

	let mut pending_targets = Vec::new();
	for request in &pending.pending_requests {
		if !is_outgoing(request, &index, current) {
			continue;
		}
		let Some(receiver) =
			index.resolve_party(request.receiver_username.as_deref(), &request.receiver_id)
		else {
			debug!("pending request to unknown user {}", request.receiver_id);
			continue;
		};
		if receiver == current || pending_targets.contains(&receiver) {
			continue;
		}
		index.nodes[receiver].has_pending_request = true;
		pending_targets.push(receiver);
	}

	let in_circle = |i: usize| i == current || index.nodes[i].is_friend;
	edges.retain(|&(a, b)| in_circle(a) && in_circle(b));

	let keep: Vec<bool> = (0..index.nodes.len())
		.map(|i| match scope {
			NodeScope::Everyone => true,
			NodeScope::FriendsOnly => in_circle(i) || pending_targets.contains(&i),
		})
		.collect();

	let mut degree = vec![0usize; index.nodes.len()];
	for &(a, b) in &edges {
		degree[a] += 1;
		degree[b] += 1;
	}
	let mut central: Option<usize> = None;
	for i in (0..index.nodes.len()).filter(|&i| keep[i]) {
		if central.is_none_or(|c| degree[i] > degree[c]) {
			central = Some(i);
		}
	}

	let nodes = &index.nodes;
	let link = |a: usize, b: usize| GraphLink {
		source: nodes[a].id.clone(),
		target: nodes[b].id.clone(),
	};
	Ok(GraphData {
		links: edges.iter().map(|&(a, b)| link(a, b)).collect(),
		pending_links: pending_targets.iter().map(|&t| link(current, t)).collect(),
		current: nodes[current].id.clone(),
		central: central.map(|c| nodes[c].id.clone()),
		nodes: nodes
			.iter()
			.zip(&keep)
			.filter(|(_, keep)| **keep)
			.map(|(node, _)| node.clone())
			.collect(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn payloads(
		all_users: &str,
		connections: &str,
		pending: &str,
	) -> (AllUsers, Connections, PendingRequests) {
		(
			serde_json::from_str(all_users).unwrap(),
			serde_json::from_str(connections).unwrap(),
			serde_json::from_str(pending).unwrap(),
		)
	}

	fn sample() -> (AllUsers, Connections, PendingRequests) {
		payloads(
			r#"{"users": [
				{"id": 1, "username": "ana"},
				{"id": 2, "username": "ben"},
				{"id": 3, "username": "cleo"},
				{"id": 4, "username": "dev"},
				{"id": 5, "username": "eli"},
				{"id": 6, "username": "fay"}
			]}"#,
			r#"{
				"nodes": [
					{"id": "ana", "username": "ana", "isCurrentUser": true},
					{"id": "ben", "username": "ben", "isCurrentUser": false},
					{"id": "cleo", "username": "cleo", "isCurrentUser": false},
					{"id": "dev", "username": "dev", "isCurrentUser": false},
					{"id": "eli", "username": "eli", "isCurrentUser": false}
				],
				"links": [
					{"source": "ana", "target": "ben"},
					{"source": "cleo", "target": "ana"},
					{"source": "ben", "target": "ana"},
					{"source": "ben", "target": "cleo"},
					{"source": "dev", "target": "eli"},
					{"source": "ana", "target": "ghost"}
				]
			}"#,
			r#"{"pending_requests": [
				{"sender_id": 1, "sender_username": "ana", "receiver_id": 4, "receiver_username": "dev", "status": "outgoing"},
				{"sender_id": 6, "sender_username": "fay", "receiver_id": 1, "receiver_username": "ana", "status": "incoming"}
			]}"#,
		)
	}

	fn node<'a>(data: &'a GraphData, id: &str) -> &'a GraphNode {
		data.nodes.iter().find(|n| n.id == id).unwrap()
	}

	fn pair(a: &str, b: &str) -> GraphLink {
		GraphLink {
			source: a.into(),
			target: b.into(),
		}
	}

	#[test]
	fn users_missing_from_connections_become_nodes_once() {
		let (users, conns, pending) = sample();
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["ana", "ben", "cleo", "dev", "eli", "fay"]);
		assert!(!node(&data, "fay").is_friend);
	}

	#[test]
	fn friends_are_neighbours_of_current_user() {
		let (users, conns, pending) = sample();
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert_eq!(data.current, "ana");
		assert!(node(&data, "ben").is_friend);
		assert!(node(&data, "cleo").is_friend);
		assert!(!node(&data, "dev").is_friend);
		assert!(!node(&data, "ana").is_friend);
	}

	#[test]
	fn links_are_deduplicated_and_limited_to_the_circle() {
		let (users, conns, pending) = sample();
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert_eq!(
			data.links,
			vec![pair("ana", "ben"), pair("cleo", "ana"), pair("ben", "cleo")]
		);
	}

	#[test]
	fn only_outgoing_requests_mark_pending() {
		let (users, conns, pending) = sample();
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert!(node(&data, "dev").has_pending_request);
		assert!(!node(&data, "ana").has_pending_request);
		assert_eq!(data.pending_links, vec![pair("ana", "dev")]);
	}

	#[test]
	fn requests_resolve_by_numeric_id_without_usernames() {
		let (users, conns, _) = sample();
		let pending: PendingRequests = serde_json::from_str(
			r#"{"pending_requests": [
				{"sender_id": 1, "receiver_id": 5},
				{"sender_id": 1, "receiver_id": 5}
			]}"#,
		)
		.unwrap();
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert!(node(&data, "eli").has_pending_request);
		assert_eq!(data.pending_links, vec![pair("ana", "eli")]);
	}

	#[test]
	fn central_node_has_most_links() {
		let (users, conns, pending) = sample();
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		// ana, ben and cleo form a triangle; the earliest wins the tie.
		assert_eq!(data.central.as_deref(), Some("ana"));
	}

	#[test]
	fn friends_only_scope_keeps_circle_and_pending_receivers() {
		let (users, conns, pending) = sample();
		let data = reconcile(&users, &conns, &pending, NodeScope::FriendsOnly).unwrap();
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["ana", "ben", "cleo", "dev"]);
	}

	#[test]
	fn missing_current_user_is_an_error() {
		let (users, _, pending) = sample();
		let conns: Connections = serde_json::from_str(
			r#"{"nodes": [{"id": "ben", "username": "ben"}], "links": []}"#,
		)
		.unwrap();
		assert_eq!(
			reconcile(&users, &conns, &pending, NodeScope::Everyone),
			Err(GraphError::MissingCurrentUser)
		);
	}

	#[test]
	fn lone_current_user_is_central() {
		let (users, conns, pending) = payloads(
			r#"{"users": []}"#,
			r#"{"nodes": [{"id": "ana", "username": "ana", "isCurrentUser": true}], "links": []}"#,
			r#"{"pending_requests": []}"#,
		);
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert_eq!(data.nodes.len(), 1);
		assert_eq!(data.central.as_deref(), Some("ana"));
		assert!(data.links.is_empty());
	}

	#[test]
	fn current_user_flag_from_user_list_is_merged() {
		let (users, conns, pending) = payloads(
			r#"{"users": [
				{"id": 1, "username": "ana", "isCurrentUser": true},
				{"id": 2, "username": "ben"}
			]}"#,
			r#"{
				"nodes": [
					{"id": "ana", "username": "ana", "isCurrentUser": false},
					{"id": "ben", "username": "ben", "isCurrentUser": false}
				],
				"links": [{"source": "ana", "target": "ben"}]
			}"#,
			r#"{"pending_requests": []}"#,
		);
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert_eq!(data.current, "ana");
		assert!(node(&data, "ana").is_current_user);
		assert!(node(&data, "ben").is_friend);
	}

	#[test]
	fn self_loops_are_dropped() {
		let (users, conns, pending) = payloads(
			r#"{"users": [{"id": 1, "username": "ana"}, {"id": 2, "username": "ben"}]}"#,
			r#"{
				"nodes": [
					{"id": "ana", "username": "ana", "isCurrentUser": true},
					{"id": "ben", "username": "ben"}
				],
				"links": [
					{"source": "ana", "target": "ana"},
					{"source": "ana", "target": "ben"}
				]
			}"#,
			r#"{"pending_requests": []}"#,
		);
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert_eq!(data.links, vec![pair("ana", "ben")]);
	}

	#[test]
	fn links_with_numeric_ids_resolve_through_user_list() {
		let (users, conns, pending) = payloads(
			r#"{"users": [
				{"id": 1, "username": "ana", "isCurrentUser": true},
				{"id": 2, "username": "ben"}
			]}"#,
			r#"{
				"nodes": [
					{"id": "ana", "username": "ana"},
					{"id": "ben", "username": "ben"}
				],
				"links": [
					{"source": 1, "target": 1},
					{"source": 1, "target": 2}
				]
			}"#,
			r#"{"pending_requests": []}"#,
		);
		let data = reconcile(&users, &conns, &pending, NodeScope::Everyone).unwrap();
		assert_eq!(data.current, "ana");
		assert_eq!(data.links, vec![pair("ana", "ben")]);
	}
}
