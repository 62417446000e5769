//! Click-driven selection: which nodes and edges are highlighted, and how.
//!
//! Every click produces a complete [`RenderState`] from scratch; nothing is
//! carried over from the previous selection.

use std::collections::HashMap;

use log::{debug, warn};

use super::details::{DetailDocument, project};
use super::store::GraphStore;
use super::types::Id;

/// Semantic look of a node or edge. Mapping to colors is up to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualCategory {
	/// Nothing is selected.
	#[default]
	Default,
	/// Something is selected and this element is not part of it.
	Dimmed,
	/// The clicked node.
	Selected,
	/// Feeds into the selected node.
	UpstreamNeighbor,
	/// Fed by the selected node.
	DownstreamNeighbor,
	/// An edge touching the selected node.
	HighlightedEdge,
}

/// Category of every node and edge at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderState {
	/// Category per node id.
	pub nodes: HashMap<Id, VisualCategory>,
	/// Category per edge id.
	pub edges: HashMap<Id, VisualCategory>,
}

impl RenderState {
	fn uniform(graph: &GraphStore, category: VisualCategory) -> Self {
		Self {
			nodes: graph.nodes().map(|n| (n.id.clone(), category)).collect(),
			edges: graph.edges().map(|e| (e.id.clone(), category)).collect(),
		}
	}

	/// Category of node `id`, [`VisualCategory::Default`] when unknown.
	pub fn node(&self, id: &Id) -> VisualCategory {
		self.nodes.get(id).copied().unwrap_or_default()
	}

	/// Category of edge `id`, [`VisualCategory::Default`] when unknown.
	pub fn edge(&self, id: &Id) -> VisualCategory {
		self.edges.get(id).copied().unwrap_or_default()
	}

	/// True when a selection is in effect, i.e. anything is not [`VisualCategory::Default`].
	pub fn has_selection(&self) -> bool {
		self.nodes.values().any(|&c| c != VisualCategory::Default)
	}
}

/// Computes the render state for a click on `clicked`, or on empty canvas when `None`.
///
/// Ids not present in the graph are treated like empty canvas. A neighbor reached
/// through both an outgoing and an incoming edge takes the category of whichever
/// edge comes last in insertion order. A self-loop counts as outgoing, so it
/// marks the selected node itself [`VisualCategory::DownstreamNeighbor`].
pub fn compute_render_state(graph: &GraphStore, clicked: Option<&Id>) -> RenderState {
	let Some(selected) = clicked.filter(|id| graph.contains(id)) else {
		return RenderState::uniform(graph, VisualCategory::Default);
	};

	let mut state = RenderState::uniform(graph, VisualCategory::Dimmed);
	state.nodes.insert(selected.clone(), VisualCategory::Selected);

	for edge in graph.edges_touching(selected) {
		state.edges.insert(edge.id.clone(), VisualCategory::HighlightedEdge);
		// outgoing is checked first, so a self-loop counts as outgoing
		let (neighbor, category) = if edge.from == *selected {
			(&edge.to, VisualCategory::DownstreamNeighbor)
		} else {
			(&edge.from, VisualCategory::UpstreamNeighbor)
		};
		state.nodes.insert(neighbor.clone(), category);
	}
	state
}

/// The currently selected node. Replaced as a whole on every click.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	/// Selected node, `None` after a click on empty canvas.
	pub selected: Option<Id>,
}

/// Receives the outcome of a click.
pub trait RenderSink {
	/// Repaints every node and edge from `state`.
	fn apply_render_state(&mut self, state: &RenderState);
	/// Shows `details`, or hides the panel when `None`.
	fn show_details(&mut self, details: Option<&DetailDocument>);
}

/// Runs a click through the whole pipeline and returns the new selection.
///
/// The sink always gets a fresh render state, then the selected node's details
/// (or `None` when the click cleared the selection).
pub fn dispatch_click<S: RenderSink + ?Sized>(
	graph: &GraphStore,
	clicked: Option<&Id>,
	sink: &mut S,
) -> SelectionState {
	let selected = match clicked {
		Some(id) if graph.contains(id) => Some(id.clone()),
		Some(id) => {
			warn!("click on unknown node '{id}', clearing selection");
			None
		}
		None => None,
	};
	debug!("selection: {selected:?}");

	sink.apply_render_state(&compute_render_state(graph, selected.as_ref()));
	let details = selected
		.as_ref()
		.and_then(|id| graph.get_node(id))
		.map(project);
	sink.show_details(details.as_ref());

	SelectionState { selected }
}
