use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{ClickAction, SocialGraphState};
use super::types::GraphData;
use crate::api;
use crate::config::{Endpoints, GraphConfig};

type SharedState = Rc<RefCell<Option<SocialGraphState>>>;

fn now() -> f64 {
	js_sys::Date::now()
}

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Send the browser to `username`'s profile page.
pub fn open_profile(endpoints: &Endpoints, username: &str) {
	let url = format!(
		"{}{}",
		endpoints.profile,
		String::from(js_sys::encode_uri_component(username))
	);
	info!("navigating to {url}");
	if let Some(window) = web_sys::window() {
		if let Err(e) = window.location().set_href(&url) {
			error!("navigation to {url} failed: {e:?}");
		}
	}
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn perform(action: ClickAction, state: &SharedState, endpoints: &Endpoints) {
	match action {
		ClickAction::None => {}
		ClickAction::Alert(message) => alert(&message),
		ClickAction::SendFriendRequest { node, username } => {
			let (state, endpoints) = (state.clone(), endpoints.clone());
			spawn_local(async move {
				let result = api::send_friend_request(&endpoints, &username).await;
				match &result {
					Ok(outcome) => info!("friend request to {username}: {outcome:?}"),
					Err(e) => error!("error sending friend request to {username}: {e}"),
				}
				let message = state
					.borrow_mut()
					.as_mut()
					.map(|s| s.apply_friend_request(node, &result, now()));
				if let Some(message) = message {
					alert(&message);
				}
			});
		}
	}
}

#[component]
pub fn SocialGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: GraphConfig,
	/// Each change resets the view.
	#[prop(optional, into)]
	reset_view: Option<Signal<u32>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let show_reset = RwSignal::new(false);
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());
	let (config_init, endpoints) = (config.clone(), config.endpoints.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = window_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("canvas has no 2d context");
				return;
			}
		};
		let graph = data.get();
		info!("starting layout for {} nodes", graph.nodes.len());
		*state_init.borrow_mut() = Some(SocialGraphState::new(&graph, &config_init, w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = window_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, endpoints_anim) =
			(state_init.clone(), animate_init.clone(), config_init.endpoints.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let t = now();
			let navigate = match *state_anim.borrow_mut() {
				Some(ref mut s) => {
					s.tick(t);
					render::render(s, &ctx, t);
					s.due_navigation(t)
				}
				None => None,
			};
			if let Some(username) = navigate {
				open_profile(&endpoints_anim, &username);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	if let Some(reset_view) = reset_view {
		let state_reset = state.clone();
		Effect::new(move |prev: Option<u32>| {
			let n = reset_view.get();
			if prev.is_some_and(|p| p != n) {
				if let Some(ref mut s) = *state_reset.borrow_mut() {
					s.reset_view(now());
				}
				show_reset.set(false);
			}
			n
		});
	}

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			match s.node_at_position(x, y) {
				Some(idx) => s.begin_drag(idx, x, y),
				None => s.begin_pan(x, y),
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.node.is_some() {
				s.drag_to(x, y);
			} else if s.pan.active {
				s.pan_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered, now());
			}
			if s.has_moved && !show_reset.get_untracked() {
				show_reset.set(true);
			}
		}
	};

	let (state_mu, endpoints_mu) = (state.clone(), endpoints.clone());
	let on_mouseup = move |_: MouseEvent| {
		let action = match *state_mu.borrow_mut() {
			Some(ref mut s) => {
				s.end_pan();
				s.end_drag()
					.map(|idx| s.click(idx, now()))
					.unwrap_or(ClickAction::None)
			}
			None => ClickAction::None,
		};
		perform(action, &state_mu, &endpoints_mu);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_pointer(now());
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
		show_reset.set(true);
	};

	let state_rb = state.clone();
	let on_reset = move |_: MouseEvent| {
		match *state_rb.borrow_mut() {
			Some(ref mut s) => s.reset_view(now()),
			None => warn!("reset requested before the graph was ready"),
		}
		show_reset.set(false);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="social-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<button
			id="resetButton"
			class="reset-view-button"
			style:display=move || if show_reset.get() { "block" } else { "none" }
			on:click=on_reset
		>
			"Reset View"
		</button>
	}
}
