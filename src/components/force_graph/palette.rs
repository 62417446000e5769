use serde::Deserialize;

use crate::graph::VisualCategory;

const DIM: &str = "rgba(200,200,200,0.2)";

/// Border and fill of a node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeStyle {
	pub border: String,
	pub background: String,
}

impl NodeStyle {
	fn new(border: &str, background: &str) -> Self {
		Self {
			border: border.into(),
			background: background.into(),
		}
	}
}

/// Colors for each [`VisualCategory`]. Any field left out of a deserialized
/// palette keeps its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
	pub background: String,
	pub node: NodeStyle,
	pub node_selected: NodeStyle,
	pub node_upstream: NodeStyle,
	pub node_downstream: NodeStyle,
	pub node_dimmed: NodeStyle,
	pub edge: String,
	pub edge_highlighted: String,
	pub edge_dimmed: String,
	pub font: String,
	pub font_dimmed: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: "#ffffff".into(),
			node: NodeStyle::new("#2B7CE9", "#97C2FC"),
			node_selected: NodeStyle::new("#2B7CE9", "#D2E5FF"),
			node_upstream: NodeStyle::new("#4AD964", "#C8F7C5"),
			node_downstream: NodeStyle::new("#FF9500", "#FFDAB9"),
			node_dimmed: NodeStyle::new(DIM, DIM),
			edge: "#848484".into(),
			edge_highlighted: "#848484".into(),
			edge_dimmed: DIM.into(),
			font: "#343434".into(),
			font_dimmed: DIM.into(),
		}
	}
}

impl Palette {
	pub fn node(&self, category: VisualCategory) -> &NodeStyle {
		match category {
			VisualCategory::Selected => &self.node_selected,
			VisualCategory::UpstreamNeighbor => &self.node_upstream,
			VisualCategory::DownstreamNeighbor => &self.node_downstream,
			VisualCategory::Dimmed => &self.node_dimmed,
			VisualCategory::Default | VisualCategory::HighlightedEdge => &self.node,
		}
	}

	pub fn edge(&self, category: VisualCategory) -> &str {
		match category {
			VisualCategory::HighlightedEdge => &self.edge_highlighted,
			VisualCategory::Dimmed => &self.edge_dimmed,
			_ => &self.edge,
		}
	}

	pub fn font(&self, category: VisualCategory) -> &str {
		match category {
			VisualCategory::Dimmed => &self.font_dimmed,
			_ => &self.font,
		}
	}
}
