use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::SocialGraphState;
use super::style::{
	self, BACKGROUND, FRIEND_GLOW, FRIEND_PROMPT, Glow, LABEL_COLOR, LABEL_PX, LINK_COLOR,
	LINK_WIDTH, OTHER_GLOW, PENDING_COLOR, PENDING_DASH,
};

pub fn render(state: &SocialGraphState, ctx: &CanvasRenderingContext2d, now: f64) {
	let (width, height) = (state.viewport.width, state.viewport.height);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);

	let t = state.viewport.transform;
	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);
	draw_links(state, ctx, now);
	draw_nodes(state, ctx, now);
	ctx.restore();
}

fn set_glow(ctx: &CanvasRenderingContext2d, glow: Option<Glow>) {
	match glow {
		Some(glow) => {
			ctx.set_shadow_color(glow.color);
			ctx.set_shadow_blur(glow.blur * 2.0);
		}
		None => {
			ctx.set_shadow_color("transparent");
			ctx.set_shadow_blur(0.0);
		}
	}
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_links(state: &SocialGraphState, ctx: &CanvasRenderingContext2d, now: f64) {
	let alpha = state.edge_opacity.value(now);
	if alpha <= 0.0 {
		return;
	}
	ctx.set_global_alpha(alpha);
	ctx.set_line_width(LINK_WIDTH);

	set_glow(ctx, Some(OTHER_GLOW));
	ctx.set_stroke_style_str(LINK_COLOR);
	for &(s, t) in &state.links {
		line(state, ctx, s, t);
	}

	set_glow(ctx, None);
	set_dash(ctx, Some(PENDING_DASH));
	ctx.set_stroke_style_str(PENDING_COLOR);
	for &(s, t) in &state.pending_links {
		line(state, ctx, s, t);
	}
	set_dash(ctx, None);
	ctx.set_global_alpha(1.0);
}

fn line(state: &SocialGraphState, ctx: &CanvasRenderingContext2d, s: usize, t: usize) {
	let (x1, y1) = state.sim.position(s);
	let (x2, y2) = state.sim.position(t);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

/// Rounded square centred on `(x, y)`.
fn rounded_square(ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64, corner: f64) {
	let half = size / 2.0;
	let r = corner.clamp(0.0, half);
	let (left, top, right, bottom) = (x - half, y - half, x + half, y + half);
	ctx.begin_path();
	ctx.move_to(left + r, top);
	let _ = ctx.arc_to(right, top, right, bottom, r);
	let _ = ctx.arc_to(right, bottom, left, bottom, r);
	let _ = ctx.arc_to(left, bottom, left, top, r);
	let _ = ctx.arc_to(left, top, right, top, r);
	ctx.close_path();
}

fn draw_nodes(state: &SocialGraphState, ctx: &CanvasRenderingContext2d, now: f64) {
	// The node being opened is drawn last so it covers everything else.
	let leaving = state.leaving.as_ref().map(|l| l.node);
	let order = (0..state.visuals.len())
		.filter(|&i| Some(i) != leaving)
		.chain(leaving);

	for i in order {
		let node = &state.data.nodes[i];
		let visual = &state.visuals[i];
		let opacity = visual.opacity.value(now);
		if opacity <= 0.0 {
			continue;
		}
		let (x, y) = state.sim.position(i);
		let size = visual.size.value(now);
		ctx.set_global_alpha(opacity);

		let outline = visual.outline.value(now);
		if node.has_pending_request && outline > 0.0 {
			ctx.set_global_alpha(opacity * outline);
			set_glow(ctx, Some(FRIEND_GLOW));
			ctx.set_stroke_style_str(PENDING_COLOR);
			ctx.set_line_width(5.0);
			ctx.begin_path();
			let _ = ctx.arc(x, y, size * 0.6, 0.0, 2.0 * PI);
			ctx.stroke();

			set_glow(ctx, None);
			ctx.set_global_alpha(opacity * 0.4);
			ctx.set_line_width(2.0);
			ctx.begin_path();
			let _ = ctx.arc(x, y, visual.radius * 1.3, 0.0, 2.0 * PI);
			ctx.stroke();
			ctx.set_global_alpha(opacity);
		}

		let fill = style::mix(style::fill(node), style::dark_fill(node), visual.shade.value(now));
		set_glow(ctx, Some(style::glow(node)));
		ctx.set_fill_style_str(&fill);
		rounded_square(ctx, x, y, size, visual.corner.value(now));
		ctx.fill();
		set_glow(ctx, None);

		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.set_font(&format!("bold {}px sans-serif", visual.label_px.value(now)));
		let _ = ctx.fill_text(&node.username, x, y);

		let prompt = visual.prompt.value(now);
		if prompt > 0.0 {
			ctx.set_global_alpha(opacity * prompt);
			ctx.set_font(&format!("bold {LABEL_PX}px sans-serif"));
			let _ = ctx.fill_text(FRIEND_PROMPT, x, y + visual.radius + 20.0);
		}
	}
	ctx.set_global_alpha(1.0);
}
