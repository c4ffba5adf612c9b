//! `requestAnimationFrame` scheduling with cancellation

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// One pending animation frame at a time. Clones share the pending request.
#[derive(Clone, Default)]
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on the next display frame
    pub fn schedule(&self, callback: impl FnOnce(f64) + 'static) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule a frame on");
            return;
        };
        let pending = self.pending.clone();
        let closure = Closure::once(move |time: f64| {
            pending.set(None);
            callback(time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => {
                self.pending.set(Some(id));
                closure.forget();
            }
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Drop the pending request, if any
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}
