//! Reading the graph document and turning it into a [`GraphStore`].

use log::info;

use super::store::{GraphStore, MalformedGraphError};
use super::types::GraphDocument;

/// Errors that can occur while loading the graph document.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
	/// The document could not be retrieved.
	#[error("failed to fetch {url}: {detail}")]
	Fetch {
		/// Where the document was requested from.
		url: String,
		/// What went wrong.
		detail: String,
	},

	/// The document is not valid JSON or does not have the expected shape.
	#[error("parse error: {0}")]
	Parse(String),

	/// The document parsed but describes an inconsistent graph.
	#[error("malformed graph: {0}")]
	Malformed(#[from] MalformedGraphError),
}

impl From<serde_json::Error> for LoadError {
	fn from(e: serde_json::Error) -> Self {
		LoadError::Parse(e.to_string())
	}
}

/// Parses `json` into the raw document without checking references.
pub fn parse_document(json: &str) -> Result<GraphDocument, LoadError> {
	Ok(serde_json::from_str(json)?)
}

/// Parses `json` and builds the store. No partial graph is returned on error.
pub fn load_graph(json: &str) -> Result<GraphStore, LoadError> {
	let doc = parse_document(json)?;
	let edges = doc
		.edges
		.into_iter()
		.enumerate()
		.map(|(i, record)| record.into_edge(i))
		.collect();
	let graph = GraphStore::load(doc.nodes, edges)?;
	info!(
		"loaded graph with {} nodes and {} edges",
		graph.node_count(),
		graph.edge_count()
	);
	Ok(graph)
}

/// Fetches the document at `url` relative to the page and loads it.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_graph(url: &str) -> Result<GraphStore, LoadError> {
	use wasm_bindgen::JsCast;
	use wasm_bindgen_futures::JsFuture;
	use web_sys::{Request, RequestInit, RequestMode, Response};

	let fetch_err = |detail: String| LoadError::Fetch {
		url: url.to_string(),
		detail,
	};

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::SameOrigin);
	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| fetch_err(format!("request error: {e:?}")))?;

	let window = web_sys::window().ok_or_else(|| fetch_err("no window".into()))?;
	let resp: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| fetch_err(format!("{e:?}")))?
		.dyn_into()
		.map_err(|_| fetch_err("response is not a Response".into()))?;
	if !resp.ok() {
		return Err(fetch_err(format!("HTTP {}", resp.status())));
	}

	let text = JsFuture::from(resp.text().map_err(|e| fetch_err(format!("{e:?}")))?)
		.await
		.map_err(|e| fetch_err(format!("{e:?}")))?
		.as_string()
		.ok_or_else(|| fetch_err("body is not text".into()))?;
	load_graph(&text)
}

/// Reads the document from the file at `url` and loads it.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_graph(url: &str) -> Result<GraphStore, LoadError> {
	let text = std::fs::read_to_string(url).map_err(|e| LoadError::Fetch {
		url: url.to_string(),
		detail: e.to_string(),
	})?;
	load_graph(&text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::details::project;
	use crate::graph::types::{Id, ItemAmount};

	const DOC: &str = r#"{
		"nodes": [
			{
				"id": "smelter",
				"label": "Iron Smelter",
				"shape": "box",
				"location": "Sector 7",
				"production_tables": [
					{
						"Input": [{"name": "Iron Ore", "amount": 2}],
						"Output": {"name": "Iron Ingot", "amount": 1},
						"Process Time": "4s",
						"Output Capacity": null
					}
				]
			},
			{"id": 2, "label": "Mine", "production_tables": null}
		],
		"edges": [
			{"id": "e1", "from": 2, "to": "smelter", "label": "ore"},
			{"from": "smelter", "to": 2}
		]
	}"#;

	#[test]
	fn loads_document() {
		let graph = load_graph(DOC).unwrap();
		assert_eq!(graph.node_count(), 2);

		let smelter = graph.get_node(&"smelter".into()).unwrap();
		assert_eq!(smelter.production_tables.len(), 1);
		assert_eq!(
			smelter.production_tables[0].inputs[0],
			Some(ItemAmount::new("Iron Ore", 2))
		);
		assert_eq!(smelter.production_tables[0].output_capacity, None);

		let mine = graph.get_node(&Id::Int(2)).unwrap();
		assert!(mine.production_tables.is_empty());

		let e1 = graph.get_edge(&"e1".into()).unwrap();
		assert_eq!(e1.label.as_deref(), Some("ore"));
	}

	#[test]
	fn id_less_edges_get_synthesized_ids() {
		let graph = load_graph(DOC).unwrap();
		let auto = graph.get_edge(&"auto:1".into()).unwrap();
		assert_eq!(auto.from, Id::from("smelter"));
		assert_eq!(auto.to, Id::Int(2));
	}

	#[test]
	fn dangling_edge_aborts_load() {
		let json = r#"{"nodes": [{"id": "A"}], "edges": [{"id": "e1", "from": "A", "to": "B"}]}"#;
		assert_eq!(
			load_graph(json).unwrap_err(),
			LoadError::Malformed(MalformedGraphError::DanglingEdge {
				edge: "e1".into(),
				endpoint: "B".into(),
			})
		);
	}

	#[test]
	fn invalid_json_is_a_parse_error() {
		assert!(matches!(load_graph("{\"nodes\": ["), Err(LoadError::Parse(_))));
		assert!(matches!(
			load_graph(r#"{"nodes": [{"label": "no id"}]}"#),
			Err(LoadError::Parse(_))
		));
	}

	fn only_row(json: &str) -> crate::graph::ProductionRow {
		let graph = load_graph(json).unwrap();
		let node = graph.get_node(&"A".into()).unwrap();
		project(node).production_rows.remove(0)
	}

	#[test]
	fn null_first_input_degrades_to_not_available() {
		let row = only_row(
			r#"{"nodes": [{"id": "A", "production_tables": [
				{"Input": [null, {"name": "Coal", "amount": 1}], "Output": {"name": "Coke", "amount": 1}}
			]}]}"#,
		);
		assert_eq!(row.input_display, "N/A");
		assert_eq!(row.output_display, "1x Coke");
	}

	#[test]
	fn non_object_output_degrades_to_not_available() {
		let row = only_row(
			r#"{"nodes": [{"id": "A", "production_tables": [
				{"Input": "Iron", "Output": "Steel", "Process Time": false}
			]}]}"#,
		);
		assert_eq!(row.input_display, "N/A");
		assert_eq!(row.output_display, "N/A");
		assert_eq!(row.process_time, "N/A");
	}

	#[test]
	fn non_string_names_render_literally() {
		let row = only_row(
			r#"{"nodes": [{"id": "A", "production_tables": [
				{"Input": [{"name": 5, "amount": 2.0}], "Output": {"name": true, "amount": null}}
			]}]}"#,
		);
		assert_eq!(row.input_display, "2x 5");
		assert_eq!(row.output_display, "?x true");
	}

	#[test]
	fn numeric_ids_of_any_kind() {
		let json = r#"{
			"nodes": [{"id": 1.5}, {"id": 2.0}, {"id": 3}],
			"edges": [{"id": 0.25, "from": 1.5, "to": 2}]
		}"#;
		let graph = load_graph(json).unwrap();
		assert_eq!(graph.node_count(), 3);
		assert!(graph.contains(&Id::Int(2)));
		let edge = graph.edges().next().unwrap();
		assert_eq!(edge.from.to_string(), "1.5");
		assert_eq!(edge.id.to_string(), "0.25");
		assert_eq!(edge.to, Id::Int(2));
	}
}
