use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Performance, Window};

use pulse_engine::schedule::FrameSource;
use pulse_engine::HostError;

pub(crate) type FrameCallback = Closure<dyn FnMut(f64) -> Result<(), JsValue>>;

/// `requestAnimationFrame` as a frame source.
///
/// Clones share the installed callback and the pending request id, so the
/// copy captured by the callback itself can re-request the next frame.
#[derive(Clone)]
pub(crate) struct AnimationFrames {
    window: Window,
    performance: Performance,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationFrames {
    pub(crate) fn new(window: Window, performance: Performance) -> Self {
        Self {
            window,
            performance,
            callback: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Installs the per-refresh callback. `on_frame` receives a frame source
    /// sharing this one's state and the refresh timestamp.
    pub(crate) fn install<F>(&self, mut on_frame: F)
    where
        F: FnMut(&mut AnimationFrames, f64) -> Result<(), JsValue> + 'static,
    {
        let mut frames = self.clone();
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            frames.pending.set(None);
            on_frame(&mut frames, timestamp)
        }) as Box<dyn FnMut(f64) -> Result<(), JsValue>>);

        *self.callback.borrow_mut() = Some(callback);
    }

    /// Cancels a pending request and drops the callback, which also breaks
    /// the reference cycle between the callback and its captured clone.
    pub(crate) fn shutdown(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl FrameSource for AnimationFrames {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }

    fn request_frame(&mut self) -> anyhow::Result<()> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Err(HostError::frame_request("animation frame callback not installed").into());
        };

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| HostError::frame_request(format!("{e:?}")))?;
        self.pending.set(Some(id));
        Ok(())
    }
}
