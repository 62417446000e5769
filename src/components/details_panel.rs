use leptos::prelude::*;

use crate::graph::{DetailDocument, ProductionRow};

#[component]
fn ProductionTable(row: ProductionRow) -> impl IntoView {
	view! {
		<table>
			<tr>
				<th>"Input"</th>
				<th>"Output"</th>
				<th>"Process Time"</th>
				<th>"Output Capacity"</th>
			</tr>
			<tr>
				<td>{row.input_display}</td>
				<td>{row.output_display}</td>
				<td>{row.process_time}</td>
				<td>{row.output_capacity}</td>
			</tr>
		</table>
	}
}

/// Side panel with the selected facility's details.
#[component]
pub fn DetailsPanel(#[prop(into)] details: Signal<Option<DetailDocument>>) -> impl IntoView {
	view! {
		<div id="details-panel" class="details-panel">
			{move || match details.get() {
				None => view! { <h2>"Select a facility to see details"</h2> }.into_any(),
				Some(doc) => {
					let production = (!doc.production_rows.is_empty())
						.then(|| {
							view! {
								<h3>"Production"</h3>
								{doc
									.production_rows
									.into_iter()
									.map(|row| view! { <ProductionTable row=row /> })
									.collect_view()}
							}
						});
					view! {
						<h2>{doc.title}</h2>
						{doc
							.location
							.map(|location| {
								view! {
									<p>
										<strong>"Location:"</strong>
										" "
										{location}
									</p>
								}
							})}
						{production}
					}
						.into_any()
				}
			}}
		</div>
	}
}
