use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{EdgeInfo, EdgeSegment, ForceGraphState, NodeInfo};
use super::style::NodeShape;

const BOX_CORNER: f64 = 4.0;
const LABEL_GAP: f64 = 3.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.options.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	// Edges go first so overlapping ones stay under the nodes, their labels
	// go on top
	let segments = state.edge_segments(&state.placed());
	draw_edges(state, ctx, &segments);
	draw_nodes(state, ctx);
	for (i, (edge, segment)) in state.edges.iter().zip(&segments).enumerate() {
		if let Some(segment) = segment.filter(|s| s.overlapping) {
			draw_edge_label(state, ctx, i, edge, &segment);
		}
	}
	ctx.set_global_alpha(1.0);
	ctx.restore();
}

/// Colour, alpha and line width of edge `i` under the current highlight.
fn edge_paint(state: &ForceGraphState, i: usize) -> (&'static str, f64, f64) {
	let style = &state.options.edges;
	let t = ease_out_cubic(state.hover.highlight_t);
	// Highlighted edges darken and thicken, the rest fade
	if state.is_edge_highlighted(i) {
		(style.highlight, 1.0, style.width * (1.0 + t))
	} else if state.has_active_highlight() {
		(style.color, 1.0 - 0.75 * t, style.width)
	} else {
		(style.color, 1.0, style.width)
	}
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	segments: &[Option<EdgeSegment>],
) {
	let arrow = state.options.edges.arrow_length();

	for (i, (edge, segment)) in state.edges.iter().zip(segments).enumerate() {
		let Some(segment) = segment else {
			continue;
		};
		let (color, alpha, width) = edge_paint(state, i);

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(width);

		let (ux, uy) = segment.dir;
		let (tip_x, tip_y) = segment.tip;
		let (back_x, back_y) = segment.back;
		ctx.begin_path();
		ctx.move_to(segment.start.0, segment.start.1);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if !segment.overlapping {
			draw_edge_label(state, ctx, i, edge, segment);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edge_label(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	i: usize,
	edge: &EdgeInfo,
	segment: &EdgeSegment,
) {
	if edge.label.is_empty() || state.transform.k <= 0.3 {
		return;
	}
	let font = &state.options.edges.font;
	let (mx, my) = segment.midpoint();
	ctx.set_global_alpha(edge_paint(state, i).1);
	ctx.set_font(&font.css());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let text_w = ctx
		.measure_text(&edge.label)
		.map(|m| m.width())
		.unwrap_or(0.0);
	let h = font.size;
	ctx.set_fill_style_str(state.options.background);
	ctx.fill_rect(mx - text_w / 2.0 - 2.0, my - h / 2.0 - 1.0, text_w + 4.0, h + 2.0);
	ctx.set_fill_style_str(font.color);
	let _ = ctx.fill_text(&edge.label, mx, my);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let alpha = if has_highlight { 1.0 - 0.7 * t } else { 1.0 };
		ctx.set_global_alpha(alpha);
		draw_node(state, ctx, &node.data.user_data, node.x() as f64, node.y() as f64, 1.0, 1.0 / k);
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let scale = if is_hovered {
			1.0 + 0.12 * t
		} else {
			1.0 + 0.05 * t
		};

		if is_hovered && t > 0.01 {
			let radius = info.extent.0.max(info.extent.1) * scale;
			let glow_radius = radius * (1.2 + 0.4 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, glow_radius) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(44, 62, 80, {})", 0.25 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(44, 62, 80, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		let border = if is_hovered { 2.5 / k } else { 1.5 / k };
		draw_node(state, ctx, info, x, y, scale, border);
	});
}

fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	x: f64,
	y: f64,
	scale: f64,
	border: f64,
) {
	let (hw, hh) = (info.extent.0 * scale, info.extent.1 * scale);

	ctx.begin_path();
	match info.style.shape {
		NodeShape::Dot | NodeShape::Circle => {
			let _ = ctx.arc(x, y, hw, 0.0, 2.0 * PI);
		}
		NodeShape::Ellipse => {
			let _ = ctx.ellipse(x, y, hw, hh, 0.0, 0.0, 2.0 * PI);
		}
		NodeShape::Box => rounded_rect(ctx, x - hw, y - hh, 2.0 * hw, 2.0 * hh, BOX_CORNER),
		NodeShape::Hexagon => {
			for i in 0..6 {
				let angle = PI / 3.0 * i as f64 + PI / 6.0;
				let (px, py) = (x + hw * angle.cos(), y + hw * angle.sin());
				if i == 0 {
					ctx.move_to(px, py);
				} else {
					ctx.line_to(px, py);
				}
			}
			ctx.close_path();
		}
	}
	ctx.set_fill_style_str(info.style.background);
	ctx.fill();
	ctx.set_stroke_style_str(info.style.border);
	ctx.set_line_width(border);
	ctx.stroke();

	let font = &state.options.nodes.font;
	ctx.set_font(&font.css());
	ctx.set_fill_style_str(font.color);
	ctx.set_text_align("center");
	if info.style.shape.label_inside() {
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&info.label, x, y);
	} else {
		ctx.set_text_baseline("top");
		let _ = ctx.fill_text(&info.label, x, y + hh + LABEL_GAP);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
