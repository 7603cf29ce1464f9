use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use crate::controller::Command;
use crate::dispatch::Dispatcher;

const FALLBACK_WIDTH: f64 = 800.0;

fn container_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(FALLBACK_WIDTH)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Canvas that draws and animates the current query result.
#[component]
pub fn ForceGraphCanvas() -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable");
			return;
		};

		let height = dispatcher.with(|c| c.height());
		let width = container_width(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		dispatcher.send(Command::Resize { width });

		let canvas_resize = canvas.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let width = container_width(&canvas_resize);
			canvas_resize.set_width(width as u32);
			dispatcher.send(Command::Resize { width });
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			dispatcher.update(|c| {
				if let Some(graph) = c.graph.as_mut() {
					graph.tick();
				}
			});
			dispatcher.with(|c| match &c.graph {
				Some(graph) => render::render(graph, &ctx),
				None => render::clear(&ctx, c.width, c.height()),
			});
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(&ev) {
			dispatcher.send(Command::PointerDown { x, y });
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(&ev) {
			dispatcher.send(Command::PointerMove {
				x,
				y,
				page_x: ev.page_x() as f64,
				page_y: ev.page_y() as f64,
			});
		}
	};

	let on_mouseup = move |_: MouseEvent| dispatcher.send(Command::PointerUp);
	let on_mouseleave = move |_: MouseEvent| dispatcher.send(Command::PointerLeave);

	view! {
		<canvas
			node_ref=canvas_ref
			id="graph"
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
