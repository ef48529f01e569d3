use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use js_sys::{Array, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ResizeObserver, ResizeObserverEntry};

use pulse_engine::config::HostConfig;
use pulse_engine::coords::LayoutSize;
use pulse_engine::host::{Bootstrap, Host};
use pulse_engine::HostError;

use crate::canvas::CanvasSurface;
use crate::frames::AnimationFrames;
use crate::logging;
use crate::options::downscale_from_js;
use crate::routine::JsRenderRoutine;

type SharedHost = Rc<RefCell<Host<CanvasSurface, JsRenderRoutine>>>;
type ResizeCallback = Closure<dyn FnMut(Array, ResizeObserver) -> Result<(), JsValue>>;

fn to_js(err: anyhow::Error) -> JsValue {
    JsError::new(&format!("{err:#}")).into()
}

/// Running host handle returned to JS.
#[wasm_bindgen]
pub struct WebHost {
    host: SharedHost,
    frames: AnimationFrames,
    observer: ResizeObserver,
    _on_resize: ResizeCallback,
}

#[wasm_bindgen]
impl WebHost {
    /// Stops the frame loop and the layout observer.
    pub fn stop(&self) {
        self.teardown();
        log::info!("pulse host stopped");
    }

    #[wasm_bindgen(getter)]
    pub fn viewport_width(&self) -> f64 {
        self.host.borrow().viewport().width
    }

    #[wasm_bindgen(getter)]
    pub fn viewport_height(&self) -> f64 {
        self.host.borrow().viewport().height
    }

    /// Render calls issued so far by both the loop and resize handling.
    #[wasm_bindgen(getter)]
    pub fn render_calls(&self) -> f64 {
        self.host.borrow().render_calls() as f64
    }
}

impl WebHost {
    /// Safe to repeat: cancelling and disconnecting twice is a no-op.
    fn teardown(&self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.stop();
        }
        self.frames.shutdown();
        self.observer.disconnect();
    }
}

/// `free()` from JS without a prior `stop()` must not leave the observer
/// pointing at the dropped resize closure.
impl Drop for WebHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Starts the host on the canvas with id `canvas_id`.
///
/// `render_module` resolves to either the render function or a module
/// exporting `render`. Nothing touches the canvas until it has resolved. A
/// missing canvas or 2D context rejects the returned promise.
#[wasm_bindgen]
pub async fn launch(canvas_id: String, render_module: Promise, downscale: f64) -> Result<WebHost, JsValue> {
    logging::init(log::LevelFilter::Info);

    let downscale = downscale_from_js(downscale).map_err(|e| to_js(e.into()))?;

    let module = Bootstrap::load(async move {
        let loaded = JsFuture::from(render_module)
            .await
            .map_err(|e| anyhow!("render module promise rejected: {e:?}"))?;
        JsRenderRoutine::from_module(loaded)
    })
    .await
    .map_err(to_js)?;

    let window = web_sys::window().ok_or_else(|| to_js(anyhow!("no global window")))?;
    let document = window.document().ok_or_else(|| to_js(anyhow!("no document")))?;
    let performance = window
        .performance()
        .ok_or_else(|| to_js(HostError::surface_unavailable("performance timer unavailable").into()))?;

    let surface = CanvasSurface::from_document(&document, &canvas_id).map_err(|e| to_js(e.into()))?;
    let region = surface
        .layout_region(&document)
        .ok_or_else(|| to_js(HostError::surface_unavailable("no layout region to observe").into()))?;

    let config = HostConfig::with_downscale(downscale);
    let host: SharedHost = Rc::new(RefCell::new(Host::new(module, surface, &config)));

    // Frame loop: started synchronously, before the first layout report.
    let frames = AnimationFrames::new(window, performance.clone());
    {
        let host = host.clone();
        frames.install(move |frames, timestamp| {
            host.borrow_mut().tick(frames, timestamp).map(|_| ()).map_err(to_js)
        });
    }
    host.borrow_mut().start(&mut frames.clone()).map_err(to_js)?;

    // Layout observation: every entry of a batch is applied on its own.
    let on_resize: ResizeCallback = {
        let host = host.clone();
        Closure::wrap(Box::new(move |entries: Array, _observer: ResizeObserver| {
            let batch: Vec<LayoutSize> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<ResizeObserverEntry>().ok())
                .map(|entry| {
                    let rect = entry.content_rect();
                    LayoutSize::new(rect.width(), rect.height())
                })
                .collect();

            host.borrow_mut()
                .on_layout_batch(batch, performance.now())
                .map(|_| ())
                .map_err(to_js)
        }) as Box<dyn FnMut(Array, ResizeObserver) -> Result<(), JsValue>>)
    };

    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    observer.observe(&region);

    log::info!("pulse host launched on #{canvas_id} (downscale {})", config.downscale.get());

    Ok(WebHost {
        host,
        frames,
        observer,
        _on_resize: on_resize,
    })
}
