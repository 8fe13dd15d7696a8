//! Canvas drawing for the constellation overlay. Purely a function of the
//! current state; nothing is kept across frames.

use std::f64::consts::PI;

use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use super::group::Group;
use super::state::ConstellationState;

// Cyan glow.
const COLOR: (u8, u8, u8) = (79, 195, 247);

/// Connections and nodes below this opacity are skipped entirely.
const VISIBILITY_EPSILON: f64 = 0.01;

fn rgba(alpha: f64) -> String {
	format!("rgba({}, {}, {}, {alpha})", COLOR.0, COLOR.1, COLOR.2)
}

pub fn render<R: Rng>(state: &ConstellationState<R>, ctx: &CanvasRenderingContext2d, time: f64) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	for group in &state.groups {
		draw_connections(group, ctx, time);
		draw_nodes(group, ctx, time);
	}
}

fn draw_connections(group: &Group, ctx: &CanvasRenderingContext2d, time: f64) {
	for conn in &group.connections {
		if conn.opacity < VISIBILITY_EPSILON {
			continue;
		}

		let a = &group.nodes[conn.a];
		let b = &group.nodes[conn.b];
		let base_alpha = conn.opacity * 0.6;

		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let length = (dx * dx + dy * dy).sqrt();

		// Static glow underlay along the whole edge.
		ctx.begin_path();
		ctx.set_stroke_style_str(&rgba(base_alpha * 0.2));
		ctx.set_line_width(1.5);
		ctx.set_shadow_color(&rgba(0.3));
		ctx.set_shadow_blur(3.0);
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
		ctx.set_shadow_blur(0.0);

		// Energy flow: short segments whose alpha follows a pair of
		// traveling waves, a slow breath and a fast shimmer. Phases are
		// keyed to the edge's order so siblings never sync up.
		let order = conn.order as f64;
		let segments = ((length / 12.0).floor() as usize).max(8);
		for i in 0..segments {
			let t0 = i as f64 / segments as f64;
			let t1 = (i + 1) as f64 / segments as f64;
			let pos = t0 * length;

			let flow = ((pos * 0.04 - time * 0.003 + order * 1.5).sin()) * 0.5 + 0.5;
			let cross = ((pos * 0.07 - time * 0.005 + order * 2.7).sin()) * 0.5 + 0.5;
			let breathe = ((time * 0.001 + order * 0.8).sin()) * 0.5 + 0.5;
			let shimmer = 0.9 + ((time * 0.015 + pos * 0.12 + order * 4.0).sin()) * 0.1;
			let energy = 0.25 + (flow * 0.4 + cross * 0.2 + breathe * 0.15) * shimmer;

			ctx.begin_path();
			ctx.set_stroke_style_str(&rgba(base_alpha * energy));
			ctx.set_line_width(0.6);
			ctx.move_to(a.x + dx * t0, a.y + dy * t0);
			ctx.line_to(a.x + dx * t1, a.y + dy * t1);
			ctx.stroke();
		}
	}
}

fn draw_nodes(group: &Group, ctx: &CanvasRenderingContext2d, time: f64) {
	for node in &group.nodes {
		if node.opacity < VISIBILITY_EPSILON {
			continue;
		}

		// Each node breathes on its own phase, independent of its edges.
		let pulse = ((time * 0.003 + node.phase).sin()) * 0.2 + 0.8;
		let alpha = node.opacity * pulse;

		// Soft glow.
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, 4.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&rgba(alpha * 0.25));
		ctx.set_shadow_color(&rgba(0.5));
		ctx.set_shadow_blur(6.0);
		ctx.fill();

		// Core.
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, 1.8, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&rgba(alpha * 0.9));
		ctx.set_shadow_blur(0.0);
		ctx.fill();

		// Bright white center.
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, 0.8, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.85));
		ctx.fill();
	}
}
