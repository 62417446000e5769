use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS, NodeInfo};
use crate::graph::VisualCategory;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_self_loops(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn edge_width(category: VisualCategory, k: f64) -> f64 {
	match category {
		VisualCategory::HighlightedEdge => 2.5 / k,
		_ => 1.5 / k,
	}
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let arrow_size = 8.0 / k;

	state.sim.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let category = state.render_state.edge(&edge.user_data.id);
		let color = state.palette.edge(category);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(edge_width(category, k));

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		ctx.set_fill_style_str(color);
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = &edge.user_data.label {
			ctx.set_fill_style_str(state.palette.font(category));
			ctx.set_font(&format!("{}px arial", 12.0 / k.max(0.5)));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 3.0 / k);
			ctx.set_text_align("start");
		}
	});
}

fn draw_self_loops(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	if state.self_loops.is_empty() {
		return;
	}
	let k = state.transform.k;
	state.sim.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		for (_, info) in state.self_loops.iter().filter(|(idx, _)| *idx == node.index()) {
			let category = state.render_state.edge(&info.id);
			ctx.set_stroke_style_str(state.palette.edge(category));
			ctx.set_line_width(edge_width(category, k));
			ctx.begin_path();
			let _ = ctx.arc(x, y - NODE_RADIUS * 1.6, NODE_RADIUS, 0.0, 2.0 * PI);
			ctx.stroke();
		}
	});
}

fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	idx: DefaultNodeIdx,
	info: &NodeInfo,
	category: VisualCategory,
) {
	let k = state.transform.k;
	let style = state.palette.node(category);
	let radius = match category {
		VisualCategory::Selected => NODE_RADIUS * 1.35,
		VisualCategory::UpstreamNeighbor | VisualCategory::DownstreamNeighbor => NODE_RADIUS * 1.15,
		_ => NODE_RADIUS,
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&style.background);
	ctx.fill();
	ctx.set_stroke_style_str(&style.border);
	ctx.set_line_width(2.0 / k);
	ctx.stroke();

	if state.hover == Some(idx) {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&style.border);
		ctx.set_line_width(1.0 / k);
		ctx.stroke();
	}

	ctx.set_fill_style_str(state.palette.font(category));
	ctx.set_font(&format!("{}px arial", 14.0 / k.max(0.5)));
	let _ = ctx.fill_text(&info.label, x + radius + 4.0, y + 4.0);
}

/// Dimmed and plain nodes first, so highlighted ones stay on top.
fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let in_front = |c: VisualCategory| !matches!(c, VisualCategory::Default | VisualCategory::Dimmed);

	for front in [false, true] {
		state.sim.visit_nodes(|node| {
			let info = &node.data.user_data;
			let c = state.render_state.node(&info.id);
			if in_front(c) == front {
				let pos = (node.x() as f64, node.y() as f64);
				draw_node(state, ctx, pos, node.index(), info, c);
			}
		});
	}
}
