use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::search_bar::SearchBar;
use crate::components::social_graph::{GraphData, NodeScope, SocialGraphCanvas};
use crate::config::GraphConfig;
use crate::error::GraphError;

/// The social graph of the signed-in user.
///
/// `?friends_only=true` limits the graph to the user, their friends and the
/// people they have asked to connect with.
#[component]
pub fn Connections() -> impl IntoView {
	let config = GraphConfig::from_dom();
	let query = use_query_map();
	let scope = NodeScope::from_query(query.with_untracked(|q| q.get("friends_only")).as_deref());

	let (graph, set_graph) = signal(None::<Result<GraphData, GraphError>>);
	let endpoints = config.endpoints.clone();
	spawn_local(async move {
		set_graph.set(Some(api::load_graph(&endpoints, scope).await));
	});

	let reset_view = RwSignal::new(0u32);
	let search_config = config.clone();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{move || {
					graph
						.get()
						.map(|result| {
							result
								.map(|data| {
									view! {
										<SocialGraphCanvas
											data=Signal::stored(data)
											config=config.clone()
											reset_view=reset_view
										/>
									}
								})
						})
				}}
				<SearchBar config=search_config reset_view=reset_view />
			</div>
		</ErrorBoundary>
	}
}
