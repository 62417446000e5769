use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::palette::Palette;
use crate::graph::{
	DetailDocument, GraphStore, Id, RenderSink, RenderState, SelectionState, compute_render_state,
	dispatch_click,
};

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 14.0;
/// Pointer travel, in screen pixels, below which a press/release counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: Id,
	pub label: String,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub id: Id,
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Outcome of releasing the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerRelease {
	/// Nothing was pressed.
	Idle,
	/// The pointer moved too far; a node was dragged or the view panned.
	Moved,
	/// A click on a node, or on empty canvas when `None`.
	Click(Option<Id>),
}

pub struct ForceGraphState {
	pub graph: GraphStore,
	pub sim: ForceGraph<NodeInfo, EdgeInfo>,
	pub render_state: RenderState,
	pub selection: SelectionState,
	pub palette: Palette,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	ticks_left: u32,
	/// Self-loops are kept out of the simulation and drawn separately.
	pub self_loops: Vec<(DefaultNodeIdx, EdgeInfo)>,
}

impl ForceGraphState {
	pub fn new(
		graph: GraphStore,
		palette: Palette,
		stabilization_ticks: u32,
		width: f64,
		height: f64,
	) -> Self {
		let mut sim = ForceGraph::new(SimulationParameters {
			force_charge: 1200.0,
			force_spring: 0.04,
			force_max: 200.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut self_loops = Vec::new();
		let count = graph.node_count().max(1) as f64;

		for (i, node) in graph.nodes().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = (
				(200.0 * angle.cos()) as f32,
				(200.0 * angle.sin()) as f32,
			);

			let idx = sim.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone().unwrap_or_else(|| node.id.to_string()),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		// load() guarantees both endpoints exist
		for edge in graph.edges() {
			let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to))
			else {
				continue;
			};
			let info = EdgeInfo {
				id: edge.id.clone(),
				label: edge.label.clone(),
			};
			if src == tgt {
				self_loops.push((src, info));
			} else {
				sim.add_edge(src, tgt, EdgeData { user_data: info });
			}
		}

		let render_state = compute_render_state(&graph, None);
		Self {
			graph,
			sim,
			render_state,
			selection: SelectionState::default(),
			palette,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			width,
			height,
			animation_running: stabilization_ticks > 0,
			ticks_left: stabilization_ticks,
			self_loops,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.sim.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<Id> {
		let mut id = None;
		self.sim.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Starts a drag on the node under the pointer, or a pan on empty canvas.
	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			self.sim.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			self.hover = self.node_at_position(x, y);
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.sim.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends the current press, telling a click apart from a drag or pan.
	pub fn release(&mut self, x: f64, y: f64) -> PointerRelease {
		let travelled = |sx: f64, sy: f64| ((x - sx).powi(2) + (y - sy).powi(2)).sqrt();
		let outcome = if self.drag.active {
			if travelled(self.drag.start_x, self.drag.start_y) < CLICK_TOLERANCE {
				PointerRelease::Click(self.drag.node_idx.and_then(|idx| self.node_id(idx)))
			} else {
				PointerRelease::Moved
			}
		} else if self.pan.active {
			if travelled(self.pan.start_x, self.pan.start_y) < CLICK_TOLERANCE {
				PointerRelease::Click(None)
			} else {
				PointerRelease::Moved
			}
		} else {
			PointerRelease::Idle
		};
		self.cancel_pointer();
		outcome
	}

	pub fn cancel_pointer(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	/// Handles a click and reports the details of the new selection to `on_details`.
	pub fn click(&mut self, target: Option<&Id>, on_details: impl FnMut(Option<&DetailDocument>)) {
		let mut sink = StateSink {
			render_state: &mut self.render_state,
			on_details,
		};
		self.selection = dispatch_click(&self.graph, target, &mut sink);
	}

	pub fn zoom(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Advances the layout until the stabilization budget runs out.
	pub fn tick(&mut self, dt: f32) {
		if !self.animation_running {
			return;
		}
		self.sim.update(dt);
		self.ticks_left = self.ticks_left.saturating_sub(1);
		if self.ticks_left == 0 {
			self.animation_running = false;
			info!("layout stabilized, physics disabled");
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

struct StateSink<'a, F> {
	render_state: &'a mut RenderState,
	on_details: F,
}

impl<F: FnMut(Option<&DetailDocument>)> RenderSink for StateSink<'_, F> {
	fn apply_render_state(&mut self, state: &RenderState) {
		*self.render_state = state.clone();
	}

	fn show_details(&mut self, details: Option<&DetailDocument>) {
		(self.on_details)(details);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Node, VisualCategory};

	fn state() -> ForceGraphState {
		let graph = GraphStore::load(
			vec![
				Node::new("A").with_label("Smelter"),
				Node::new("B"),
				Node::new("C"),
			],
			vec![
				Edge::new("e1", "A", "B"),
				Edge::new("e2", "C", "A"),
				Edge::new("loop", "B", "B"),
			],
		)
		.unwrap();
		ForceGraphState::new(graph, Palette::default(), 0, 800.0, 600.0)
	}

	/// Screen coordinates of the node, before any simulation step.
	fn screen_pos(s: &ForceGraphState, id: &str) -> (f64, f64) {
		let id = Id::from(id);
		let mut pos = (0.0, 0.0);
		s.sim.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pos = (
					node.x() as f64 * s.transform.k + s.transform.x,
					node.y() as f64 * s.transform.k + s.transform.y,
				);
			}
		});
		pos
	}

	#[test]
	fn starts_unselected_with_self_loops_aside() {
		let s = state();
		assert!(!s.render_state.has_selection());
		assert_eq!(s.self_loops.len(), 1);
		assert_eq!(s.self_loops[0].1.id, Id::from("loop"));
		assert!(!s.animation_running);
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "A");
		s.press(x, y);
		assert_eq!(s.release(x + 1.0, y), PointerRelease::Click(Some("A".into())));
	}

	#[test]
	fn dragging_is_not_a_click() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "A");
		s.press(x, y);
		s.pointer_move(x + 30.0, y);
		assert_eq!(s.release(x + 30.0, y), PointerRelease::Moved);
	}

	#[test]
	fn release_on_empty_canvas_clears() {
		let mut s = state();
		s.press(5.0, 5.0);
		assert_eq!(s.release(5.0, 5.0), PointerRelease::Click(None));
		assert_eq!(s.release(5.0, 5.0), PointerRelease::Idle);
	}

	#[test]
	fn click_updates_render_state_and_details() {
		let mut s = state();
		let mut shown = Vec::new();
		s.click(Some(&"A".into()), |d| shown.push(d.map(|d| d.title.clone())));
		assert_eq!(s.selection.selected, Some("A".into()));
		assert_eq!(s.render_state.node(&"B".into()), VisualCategory::DownstreamNeighbor);
		assert_eq!(s.render_state.node(&"C".into()), VisualCategory::UpstreamNeighbor);

		s.click(None, |d| shown.push(d.map(|d| d.title.clone())));
		assert!(!s.render_state.has_selection());
		assert_eq!(shown, [Some("Smelter".to_string()), None]);
	}

	#[test]
	fn physics_stops_after_budget() {
		let graph = GraphStore::load(vec![Node::new("A"), Node::new("B")], vec![]).unwrap();
		let mut s = ForceGraphState::new(graph, Palette::default(), 2, 800.0, 600.0);
		s.tick(0.016);
		assert!(s.animation_running);
		s.tick(0.016);
		assert!(!s.animation_running);
	}
}
