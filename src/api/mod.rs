//! REST calls made from the browser.

pub mod types;

use log::{debug, error, info};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, HtmlDocument, Request, RequestCredentials, RequestInit, RequestMode, Response};

use crate::components::social_graph::{GraphData, NodeScope, reconcile};
use crate::config::Endpoints;
use crate::error::{ApiError, GraphError, js_message};
use types::{AllUsers, Connections, FriendRequestReply, PendingRequests};

/// Message the server sends when a request to that user is already pending.
pub const ALREADY_EXISTS: &str = "Friend request already exists";

/// What became of a friend request the server answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FriendRequestOutcome {
	Sent,
	AlreadyPending,
	Rejected(String),
}

/// Interpret a reply to `POST /send-friend-request/:username`.
///
/// A non-2xx reply without a readable body is a plain error. A reply whose
/// error mentions "already exists" means the request is already pending.
pub fn classify_friend_request(
	url: &str,
	status: u16,
	ok: bool,
	reply: Option<FriendRequestReply>,
) -> Result<FriendRequestOutcome, ApiError> {
	match (ok, reply) {
		(true, Some(reply)) if reply.success => Ok(FriendRequestOutcome::Sent),
		(true, Some(reply)) => {
			let message = reply.error.unwrap_or_default();
			if message == ALREADY_EXISTS {
				Ok(FriendRequestOutcome::AlreadyPending)
			} else {
				Ok(FriendRequestOutcome::Rejected(message))
			}
		}
		(false, Some(reply)) => {
			let message = reply.error.unwrap_or_else(|| ALREADY_EXISTS.to_string());
			if message.contains("already exists") {
				Ok(FriendRequestOutcome::AlreadyPending)
			} else {
				Err(ApiError::Status {
					url: url.to_string(),
					status,
				})
			}
		}
		(true, None) => Err(ApiError::Decode {
			url: url.to_string(),
			message: "empty reply".into(),
		}),
		(false, None) => Err(ApiError::Status {
			url: url.to_string(),
			status,
		}),
	}
}

/// Find `name` in a `document.cookie` string.
pub fn csrf_token_from_cookies(cookies: &str, name: &str) -> Option<String> {
	cookies.split(';').find_map(|cookie| {
		let (key, value) = cookie.trim().split_once('=')?;
		(key == name).then(|| value.to_string())
	})
}

fn document_cookies() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let html: HtmlDocument = document.dyn_into().ok()?;
	html.cookie().ok()
}

fn request_error(url: &str, err: wasm_bindgen::JsValue) -> ApiError {
	ApiError::Request {
		url: url.to_string(),
		message: js_message(&err),
	}
}

async fn send(request: &Request, url: &str) -> Result<Response, ApiError> {
	let window = web_sys::window().ok_or(ApiError::NoWindow)?;
	let value = JsFuture::from(window.fetch_with_request(request))
		.await
		.map_err(|e| ApiError::Network {
			url: url.to_string(),
			message: js_message(&e),
		})?;
	value.dyn_into::<Response>().map_err(|e| ApiError::Decode {
		url: url.to_string(),
		message: js_message(&e),
	})
}

async fn read_json<T: DeserializeOwned>(response: &Response, url: &str) -> Result<T, ApiError> {
	let decode = |message: String| ApiError::Decode {
		url: url.to_string(),
		message,
	};
	let promise = response.json().map_err(|e| decode(js_message(&e)))?;
	let value = JsFuture::from(promise)
		.await
		.map_err(|e| decode(js_message(&e)))?;
	serde_wasm_bindgen::from_value(value).map_err(|e| decode(e.to_string()))
}

/// `GET` a JSON document from a same-origin endpoint.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::SameOrigin);
	opts.set_credentials(RequestCredentials::SameOrigin);
	let request = Request::new_with_str_and_init(url, &opts).map_err(|e| request_error(url, e))?;

	let response = send(&request, url).await?;
	if !response.ok() {
		return Err(ApiError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	read_json(&response, url).await
}

/// Fetch users, connections and pending requests, then merge them.
pub async fn load_graph(endpoints: &Endpoints, scope: NodeScope) -> Result<GraphData, GraphError> {
	let all_users: AllUsers = fetch_json(&endpoints.all_users)
		.await
		.inspect_err(|e| error!("error fetching users: {e}"))?;
	debug!("fetched {} users", all_users.users.len());

	let connections: Connections = fetch_json(&endpoints.connections)
		.await
		.inspect_err(|e| error!("error fetching connections: {e}"))?;
	debug!(
		"fetched {} connection nodes, {} links",
		connections.nodes.len(),
		connections.links.len()
	);

	let pending: PendingRequests = fetch_json(&endpoints.pending_requests)
		.await
		.inspect_err(|e| error!("error fetching pending requests: {e}"))?;
	debug!("fetched {} pending requests", pending.pending_requests.len());

	let data = reconcile::reconcile(&all_users, &connections, &pending, scope)?;
	info!(
		"graph ready: {} nodes, {} links, {} pending",
		data.nodes.len(),
		data.links.len(),
		data.pending_links.len()
	);
	Ok(data)
}

/// `POST` a friend request to `username`, carrying the CSRF token cookie.
pub async fn send_friend_request(
	endpoints: &Endpoints,
	username: &str,
) -> Result<FriendRequestOutcome, ApiError> {
	let url = format!(
		"{}{}",
		endpoints.send_friend_request,
		String::from(js_sys::encode_uri_component(username))
	);

	let headers = Headers::new().map_err(|e| request_error(&url, e))?;
	headers
		.set("Content-Type", "application/json")
		.map_err(|e| request_error(&url, e))?;
	match document_cookies().and_then(|c| csrf_token_from_cookies(&c, &endpoints.csrf_cookie)) {
		Some(token) => headers
			.set(&endpoints.csrf_header, &token)
			.map_err(|e| request_error(&url, e))?,
		None => debug!("no {} cookie; sending without CSRF header", endpoints.csrf_cookie),
	}

	let opts = RequestInit::new();
	opts.set_method("POST");
	opts.set_mode(RequestMode::SameOrigin);
	opts.set_credentials(RequestCredentials::SameOrigin);
	opts.set_headers(&headers);
	let request =
		Request::new_with_str_and_init(&url, &opts).map_err(|e| request_error(&url, e))?;

	let response = send(&request, &url).await?;
	let reply = read_json::<FriendRequestReply>(&response, &url).await.ok();
	classify_friend_request(&url, response.status(), response.ok(), reply)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn reply(success: bool, error: Option<&str>) -> Option<FriendRequestReply> {
		Some(FriendRequestReply {
			success,
			error: error.map(str::to_string),
		})
	}

	#[test]
	fn successful_reply_is_sent() {
		assert_eq!(
			classify_friend_request("/u", 200, true, reply(true, None)),
			Ok(FriendRequestOutcome::Sent)
		);
	}

	#[test]
	fn duplicate_request_is_already_pending() {
		assert_eq!(
			classify_friend_request("/u", 400, false, reply(false, Some(ALREADY_EXISTS))),
			Ok(FriendRequestOutcome::AlreadyPending)
		);
		assert_eq!(
			classify_friend_request("/u", 200, true, reply(false, Some(ALREADY_EXISTS))),
			Ok(FriendRequestOutcome::AlreadyPending)
		);
	}

	#[test]
	fn error_status_without_message_counts_as_duplicate() {
		assert_eq!(
			classify_friend_request("/u", 400, false, reply(false, None)),
			Ok(FriendRequestOutcome::AlreadyPending)
		);
	}

	#[test]
	fn ok_reply_with_other_error_is_rejected() {
		assert_eq!(
			classify_friend_request("/u", 200, true, reply(false, Some("blocked"))),
			Ok(FriendRequestOutcome::Rejected("blocked".into()))
		);
	}

	#[test]
	fn server_failure_is_an_error() {
		assert_eq!(
			classify_friend_request("/u", 500, false, reply(false, Some("db down"))),
			Err(ApiError::Status {
				url: "/u".into(),
				status: 500
			})
		);
		assert_eq!(
			classify_friend_request("/u", 404, false, None),
			Err(ApiError::Status {
				url: "/u".into(),
				status: 404
			})
		);
	}

	#[test]
	fn csrf_token_is_read_from_cookie_string() {
		let cookies = "sessionid=abc; csrftoken=tok123; theme=dark";
		assert_eq!(
			csrf_token_from_cookies(cookies, "csrftoken").as_deref(),
			Some("tok123")
		);
		assert_eq!(csrf_token_from_cookies(cookies, "missing"), None);
		assert_eq!(csrf_token_from_cookies("", "csrftoken"), None);
	}

	#[test]
	fn csrf_lookup_does_not_match_prefixes() {
		assert_eq!(
			csrf_token_from_cookies("xcsrftoken=bad; csrftoken=good", "csrftoken").as_deref(),
			Some("good")
		);
	}
}
