//! Facility graph model, selection highlighting and detail projection.
//!
//! Everything in here is independent of the canvas and can be driven directly.

mod details;
mod loader;
mod selection;
mod store;
mod types;

pub use details::{DetailDocument, NOT_AVAILABLE, ProductionRow, project};
pub use loader::{LoadError, fetch_graph, load_graph, parse_document};
pub use selection::{
	RenderSink, RenderState, SelectionState, VisualCategory, compute_render_state, dispatch_click,
};
pub use store::{GraphStore, MalformedGraphError};
pub use types::{
	Edge, EdgeRecord, FloatId, GraphDocument, Id, ItemAmount, Node, ProductionEntry,
};
