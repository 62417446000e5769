use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::details_panel::DetailsPanel;
use crate::components::force_graph::ForceGraphCanvas;
use crate::graph::{DetailDocument, GraphStore, LoadError, fetch_graph};

/// Graph document served next to the app.
const DATA_URL: &str = "graph_data.json";

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let loaded = RwSignal::new(None::<Result<GraphStore, LoadError>>);
	let (details, set_details) = signal(None::<DetailDocument>);

	spawn_local(async move {
		let result = fetch_graph(DATA_URL).await;
		if let Err(e) = &result {
			error!("could not load {DATA_URL}: {e}");
		}
		loaded.set(Some(result));
	});

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
				<Show when=move || loaded.with(Option::is_none)>
					<p class="loading">"Loading facilities..."</p>
				</Show>
				{move || {
					loaded
						.get()
						.map(|result| {
							result
								.map(|graph| {
									view! {
										<ForceGraphCanvas
											graph=Signal::stored(graph)
											on_details={move |d: Option<DetailDocument>| set_details.set(d)}
											fullscreen=true
										/>
										<DetailsPanel details=details />
									}
								})
						})
				}}
				<div class="graph-overlay">
					<h1>"Production Facilities"</h1>
					<p class="subtitle">
						"Click a facility to see its suppliers and consumers. Click the background to clear."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
