//! Username search overlay.

use leptos::prelude::*;
use log::{debug, error, info};
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

use crate::api::{
	self,
	types::{AllUsers, ApiNode, ApiUser, Connections},
};
use crate::components::social_graph::open_profile;
use crate::config::GraphConfig;

/// Case-insensitive match of a trimmed query against known usernames.
pub fn find_user<'a>(query: &str, users: &'a [ApiUser]) -> Option<&'a ApiUser> {
	let query = query.trim().to_lowercase();
	if query.is_empty() {
		return None;
	}
	users.iter().find(|u| u.username.to_lowercase() == query)
}

pub fn in_graph(username: &str, nodes: &[ApiNode]) -> bool {
	let username = username.to_lowercase();
	nodes.iter().any(|n| n.username.to_lowercase() == username)
}

/// Every search returns the graph to its home view, found or not.
fn request_view_reset(reset_view: RwSignal<u32>) {
	reset_view.update(|n| *n = n.wrapping_add(1));
}

#[component]
pub fn SearchBar(
	#[prop(optional)] config: GraphConfig,
	/// Bumped after every search to reset the graph view.
	reset_view: RwSignal<u32>,
) -> impl IntoView {
	let active = RwSignal::new(false);
	let query = RwSignal::new(String::new());
	let not_found = RwSignal::new(false);

	let toggle = move |_| {
		active.update(|a| *a = !*a);
		if !active.get_untracked() {
			query.set(String::new());
		}
	};

	let execute = move || {
		request_view_reset(reset_view);
		let text = query.get_untracked();
		let config = config.clone();
		spawn_local(async move {
			debug!("searching for {text:?}");
			let users: AllUsers = match api::fetch_json(&config.endpoints.all_users).await {
				Ok(users) => users,
				Err(e) => {
					error!("search failed: {e}");
					return;
				}
			};
			match find_user(&text, &users.users) {
				Some(user) => {
					info!("user found: {}", user.username);
					not_found.set(false);
					let username = user.username.clone();
					match api::fetch_json::<Connections>(&config.endpoints.connections).await {
						Ok(graph) if !in_graph(&username, &graph.nodes) => {
							info!("{username} is not in the graph; opening profile");
							let endpoints = config.endpoints.clone();
							set_timeout(
								move || open_profile(&endpoints, &username),
								Duration::from_millis(config.timings.search_redirect_ms as u64),
							);
						}
						Ok(_) => {}
						Err(e) => error!("search failed: {e}"),
					}
				}
				None => {
					info!("user does not exist: {text}");
					not_found.set(true);
				}
			}
		});
	};
	let execute_click = execute.clone();

	view! {
		<div class="search-container">
			<button class="search-toggle" on:click=toggle>
				"Search"
			</button>
			<input
				id="searchBar"
				type="text"
				placeholder="Search users..."
				class:active=move || active.get()
				class:error=move || not_found.get()
				prop:value=move || query.get()
				on:input=move |ev| {
					query.set(event_target_value(&ev));
					not_found.set(false);
				}
				on:keydown=move |ev: KeyboardEvent| {
					if ev.key() == "Enter" {
						execute();
					}
				}
			/>
			<button id="goButton" class:active=move || active.get() on:click=move |_| execute_click()>
				"Go"
			</button>
			<p id="searchError" class="search-error" style:display=move || if not_found.get() { "block" } else { "none" }>
				"User not found"
			</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn users() -> Vec<ApiUser> {
		["Ana", "ben"]
			.iter()
			.enumerate()
			.map(|(i, name)| ApiUser {
				id: i.to_string(),
				username: name.to_string(),
				is_current_user: false,
			})
			.collect()
	}

	#[test]
	fn lookup_ignores_case_and_whitespace() {
		let users = users();
		assert_eq!(find_user("  ana ", &users).map(|u| u.username.as_str()), Some("Ana"));
		assert_eq!(find_user("BEN", &users).map(|u| u.username.as_str()), Some("ben"));
		assert!(find_user("cleo", &users).is_none());
		assert!(find_user("   ", &users).is_none());
	}

	#[test]
	fn each_search_requests_a_view_reset() {
		let reset_view = RwSignal::new(u32::MAX);
		request_view_reset(reset_view);
		assert_eq!(reset_view.get_untracked(), 0);
		request_view_reset(reset_view);
		assert_eq!(reset_view.get_untracked(), 1);
	}

	#[test]
	fn graph_membership_ignores_case() {
		let nodes = vec![ApiNode {
			id: "Ana".into(),
			username: "Ana".into(),
			is_current_user: true,
		}];
		assert!(in_graph("ana", &nodes));
		assert!(!in_graph("ben", &nodes));
	}
}
