use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::handle::NetworkHandle;
use super::render;
use super::state::{ForceGraphState, Tooltip};
use super::style::{GraphOptions, text_width};
use super::types::GraphData;

/// Longest frame step fed to the simulation, so a background tab does not
/// explode the layout when it resumes.
const MAX_FRAME_SECS: f64 = 0.05;

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|w| w.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|h| h.as_f64())
			.unwrap_or(600.0),
	)
}

fn local_coords(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] options: GraphOptions,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let handle = StoredValue::new_local(None::<NetworkHandle>);
	let tooltip = RwSignal::new(None::<Tooltip>);
	let state_init = state.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window, graph not mounted");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("canvas has no 2d context, graph not mounted");
				return;
			}
		};

		let data = data.get();
		let font = options.nodes.font;
		ctx.set_font(&font.css());
		let measure = |label: &str| {
			ctx.measure_text(label)
				.map(|m| m.width())
				.unwrap_or_else(|_| text_width(label, font.size))
		};
		*state_init.borrow_mut() = Some(ForceGraphState::measured(
			&data,
			options.clone(),
			w,
			h,
			measure,
		));
		info!(
			"graph mounted: {} nodes, {} links, {}x{}",
			data.nodes.len(),
			data.links.len(),
			w,
			h
		);

		// Replacing the handle drops any previous loop
		let mut owned = NetworkHandle::new(window.clone());

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			owned.on_resize(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
		}

		let (state_anim, animate_inner, frame_id) =
			(state_init.clone(), owned.frame_loop(), owned.frame_id());
		let mut last = js_sys::Date::now();
		*owned.frame_loop().borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).clamp(0.0, MAX_FRAME_SECS) as f32;
			last = now;

			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt);
				render::render(s, &ctx);

				let next = s.tooltip();
				if tooltip.with_untracked(|shown| *shown != next) {
					tooltip.set(next);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					frame_id.set(
						win.request_animation_frame(cb.as_ref().unchecked_ref())
							.ok(),
					);
				}
			}
		}));
		owned.start();
		handle.set_value(Some(owned));
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<div class="force-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				tooltip
					.get()
					.map(|t| {
						view! {
							<div
								class="graph-tooltip"
								style=format!("left: {}px; top: {}px;", t.x + 12.0, t.y + 12.0)
							>
								{t.text}
							</div>
						}
					})
			}}
		</div>
	}
}
