use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{
	CanvasState, HANDLE_RADIUS, NODE_HEIGHT, NODE_WIDTH, source_handle_center, target_handle_center,
};
use super::types::{FlowEdge, FlowNode};

use std::f64::consts::PI;

const EDGE_COLOR: &str = "#64748b";
const NODE_BORDER: &str = "#94a3b8";
const SELECTED_BORDER: &str = "#2563eb";
const HANDLE_COLOR: &str = "#475569";
const CORNER_RADIUS: f64 = 6.0;

pub fn render(
	state: &CanvasState,
	nodes: &[FlowNode],
	edges: &[FlowEdge],
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, nodes, edges, ctx);
	draw_pending_connect(state, nodes, ctx);
	draw_nodes(state, nodes, ctx);
	ctx.restore();
}

fn draw_edges(
	state: &CanvasState,
	nodes: &[FlowNode],
	edges: &[FlowEdge],
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k.max(0.5), 8.0);

	for edge in edges {
		// An edge naming a node we cannot find is skipped, never a crash.
		let (Some(source), Some(target)) = (
			nodes.iter().find(|n| n.id == edge.source),
			nodes.iter().find(|n| n.id == edge.target),
		) else {
			continue;
		};

		let (x1, y1) = source_handle_center(source);
		let (x2, y2) = target_handle_center(target);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(line_width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2 - ux * arrow_size, y2 - uy * arrow_size);
		ctx.stroke();

		ctx.set_fill_style_str(EDGE_COLOR);
		let (back_x, back_y) = (x2 - ux * arrow_size, y2 - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(x2, y2);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_pending_connect(state: &CanvasState, nodes: &[FlowNode], ctx: &CanvasRenderingContext2d) {
	if !state.connect.active {
		return;
	}
	let Some(source) = state
		.connect
		.source
		.as_deref()
		.and_then(|id| nodes.iter().find(|n| n.id == id))
	else {
		return;
	};

	let k = state.transform.k;
	let (x1, y1) = source_handle_center(source);
	ctx.set_stroke_style_str(SELECTED_BORDER);
	ctx.set_line_width(1.5 / k.max(0.5));
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0 / k),
		&JsValue::from_f64(4.0 / k),
	));
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(state.connect.cursor_x, state.connect.cursor_y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &CanvasState, nodes: &[FlowNode], ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;

	for node in nodes {
		let (x, y) = (node.position.x, node.position.y);

		trace_rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER_RADIUS);
		ctx.set_fill_style_str("#ffffff");
		ctx.fill();
		if node.selected {
			ctx.set_stroke_style_str(SELECTED_BORDER);
			ctx.set_line_width(2.0 / k.max(0.5));
		} else {
			ctx.set_stroke_style_str(NODE_BORDER);
			ctx.set_line_width(1.0 / k.max(0.5));
		}
		ctx.stroke();

		ctx.set_fill_style_str("#0f172a");
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text_with_max_width(
			&node.data.label,
			x + NODE_WIDTH / 2.0,
			y + NODE_HEIGHT / 2.0,
			NODE_WIDTH - 16.0,
		);

		for (hx, hy) in [source_handle_center(node), target_handle_center(node)] {
			ctx.begin_path();
			let _ = ctx.arc(hx, hy, HANDLE_RADIUS, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(HANDLE_COLOR);
			ctx.fill();
		}
	}
}

fn trace_rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + r);
	ctx.line_to(x + w, y + h - r);
	ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
	ctx.line_to(x + r, y + h);
	ctx.quadratic_curve_to(x, y + h, x, y + h - r);
	ctx.line_to(x, y + r);
	ctx.quadratic_curve_to(x, y, x + r, y);
	ctx.close_path();
}
