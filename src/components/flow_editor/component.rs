use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::editor::EditorEvent;
use super::render;
use super::state::{CanvasState, SOURCE_HANDLE, TARGET_HANDLE};
use super::types::{ConnectParams, FlowEdge, FlowNode, Position, Viewport};

/// Data-transfer type the palette writes node templates under. A drop
/// without this payload is ignored.
pub const TEMPLATE_MIME: &str = "application/flow-canvas";

enum PressTarget {
	SourceHandle(String),
	Node(String, Position),
	Pane,
}

/// The rendering collaborator: draws the flow onto a canvas and reports
/// every gesture back through `on_event`. Owns pan/zoom and the in-flight
/// gesture; owns no graph state.
#[component]
pub fn FlowCanvas(
	#[prop(into)] nodes: Signal<Vec<FlowNode>>,
	#[prop(into)] edges: Signal<Vec<FlowEdge>>,
	viewport: RwSignal<Viewport>,
	ready: RwSignal<bool>,
	#[prop(into)] on_event: Callback<EditorEvent>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0),
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(CanvasState::new(&viewport.get_untracked(), w, h));
		ready.set(true);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = (
				canvas_resize
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0),
				canvas_resize
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				nodes.with_untracked(|ns| {
					edges.with_untracked(|es| render::render(s, ns, es, &ctx));
				});
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			let pressed = nodes.with_untracked(|ns| {
				if let Some(node) = s.source_handle_at(ns, x, y) {
					PressTarget::SourceHandle(node.id.clone())
				} else if let Some(node) = s.node_at_position(ns, x, y) {
					PressTarget::Node(node.id.clone(), node.position)
				} else {
					PressTarget::Pane
				}
			});
			match pressed {
				PressTarget::SourceHandle(id) => {
					let (gx, gy) = s.screen_to_graph(x, y);
					s.connect.active = true;
					s.connect.source = Some(id);
					s.connect.cursor_x = gx;
					s.connect.cursor_y = gy;
				}
				PressTarget::Node(id, position) => {
					on_event.run(EditorEvent::NodeClicked(id.clone()));
					s.drag.active = true;
					s.drag.node_id = Some(id);
					s.drag.start_x = x;
					s.drag.start_y = y;
					s.drag.node_start = position;
				}
				PressTarget::Pane => {
					s.pan.active = true;
					s.pan.moved = false;
					s.pan.start_x = x;
					s.pan.start_y = y;
					s.pan.transform_start_x = s.transform.x;
					s.pan.transform_start_y = s.transform.y;
				}
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.connect.active {
				let (gx, gy) = s.screen_to_graph(x, y);
				s.connect.cursor_x = gx;
				s.connect.cursor_y = gy;
			} else if s.drag.active {
				if let Some(id) = s.drag.node_id.clone() {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					on_event.run(EditorEvent::NodeMoved {
						id,
						position: Position {
							x: s.drag.node_start.x + dx,
							y: s.drag.node_start.y + dy,
						},
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
				s.pan.moved = true;
				viewport.set(s.transform.viewport());
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.connect.active {
				if let Some(source) = s.connect.source.take() {
					// A release on the target handle records the handle;
					// a release on the node body connects without one.
					let landing = nodes.with_untracked(|ns| {
						if let Some(node) = s.target_handle_at(ns, x, y) {
							Some((node.id.clone(), Some(TARGET_HANDLE.to_string())))
						} else {
							s.node_at_position(ns, x, y)
								.map(|node| (node.id.clone(), None))
						}
					});
					if let Some((target, target_handle)) = landing {
						on_event.run(EditorEvent::EdgeConnected(ConnectParams {
							source,
							target,
							source_handle: Some(SOURCE_HANDLE.to_string()),
							target_handle,
						}));
					}
				}
				s.connect.active = false;
			} else if s.drag.active {
				s.drag.active = false;
				s.drag.node_id = None;
			} else if s.pan.active {
				if !s.pan.moved {
					on_event.run(EditorEvent::PaneClicked);
				}
				s.pan.active = false;
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_id = None;
			s.pan.active = false;
			s.connect.active = false;
			s.connect.source = None;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
			viewport.set(s.transform.viewport());
		}
	};

	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		if let Some(dt) = ev.data_transfer() {
			dt.set_drop_effect("move");
		}
	};

	let state_dp = state.clone();
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let template = ev
			.data_transfer()
			.and_then(|dt| dt.get_data(TEMPLATE_MIME).ok())
			.unwrap_or_default();
		// A drop from outside the palette carries no template; ignore it.
		if template.is_empty() {
			return;
		}

		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref s) = *state_dp.borrow() {
			let (gx, gy) = s.screen_to_graph(x, y);
			on_event.run(EditorEvent::NodeDropped {
				template,
				position: Position { x: gx, y: gy },
			});
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="flow-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dragover=on_dragover
			on:drop=on_drop
			style="display: block; cursor: grab;"
		/>
	}
}
