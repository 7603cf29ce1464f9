use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

const BACKGROUND: &str = "#1a1a2e";
const EDGE_COLOR: &str = "rgba(153, 170, 187, 0.6)";
const ARROW_SIZE: f64 = 6.0;
const LABEL_DX: f64 = 12.0;
const LABEL_DY: f64 = 3.5;

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	clear(ctx, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(1.5);
	ctx.set_font("8px sans-serif");

	state.sim.visit_edges(|n1, n2, kind| {
		let (x1, y1, x2, y2) = (n1.x, n1.y, n2.x, n2.y);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + ARROW_SIZE),
			y2 - uy * (NODE_RADIUS + ARROW_SIZE),
		);
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(kind) = kind {
			let _ = ctx.fill_text(kind, x1 + dx / 2.0, y1 + dy / 2.0);
		}
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("10px sans-serif");

	state.sim.visit_nodes(|idx, node| {
		let (x, y) = (node.x, node.y);
		let info = &node.data;

		if state.is_hovered(idx) {
			draw_glow(ctx, x, y);
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if state.is_hovered(idx) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, NODE_RADIUS + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let _ = ctx.fill_text(&info.label, x + LABEL_DX, y + LABEL_DY);
	});
}

fn draw_glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
	let glow_radius = NODE_RADIUS * 3.0;
	let Ok(gradient) = ctx.create_radial_gradient(x, y, NODE_RADIUS * 0.3, x, y, glow_radius)
	else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, "rgba(255, 255, 255, 0.35)");
	let _ = gradient.add_color_stop(0.6, "rgba(200, 220, 255, 0.1)");
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
