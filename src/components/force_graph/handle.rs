use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Frame callback that re-schedules itself.
pub type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the browser callbacks that keep a graph alive.
///
/// Dropping the handle cancels the pending animation frame, detaches the
/// resize listener and breaks the frame loop's self reference so the
/// simulation state can be freed.
pub struct NetworkHandle {
	window: Window,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: FrameLoop,
	resize: Option<Closure<dyn FnMut()>>,
}

impl NetworkHandle {
	pub fn new(window: Window) -> Self {
		Self {
			window,
			frame_id: Rc::new(Cell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			resize: None,
		}
	}

	pub fn frame_loop(&self) -> FrameLoop {
		self.animate.clone()
	}

	pub fn frame_id(&self) -> Rc<Cell<Option<i32>>> {
		self.frame_id.clone()
	}

	/// Registers `cb` for window resizes until the handle is dropped.
	pub fn on_resize(&mut self, cb: Closure<dyn FnMut()>) {
		if self
			.window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.is_ok()
		{
			self.resize = Some(cb);
		}
	}

	/// Schedules the first frame of the loop.
	pub fn start(&self) {
		if let Some(ref cb) = *self.animate.borrow() {
			self.frame_id.set(
				self.window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}
	}
}

impl Drop for NetworkHandle {
	fn drop(&mut self) {
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.resize.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.animate.borrow_mut().take();
		debug!("graph handle released");
	}
}
