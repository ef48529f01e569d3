use anyhow::anyhow;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use pulse_engine::render::RenderRoutine;

use crate::canvas::CanvasSurface;

/// JS render entry point: `render(ctx, width, height, timestampMs)`.
pub(crate) struct JsRenderRoutine {
    render: Function,
}

impl JsRenderRoutine {
    /// Accepts either the function itself or a module namespace exporting
    /// `render`.
    pub(crate) fn from_module(module: JsValue) -> anyhow::Result<Self> {
        if let Some(render) = module.dyn_ref::<Function>() {
            return Ok(Self { render: render.clone() });
        }

        let export = Reflect::get(&module, &JsValue::from_str("render"))
            .map_err(|e| anyhow!("reading `render` export failed: {e:?}"))?;
        let render = export
            .dyn_into::<Function>()
            .map_err(|_| anyhow!("render module has no `render` function"))?;
        Ok(Self { render })
    }
}

impl RenderRoutine<CanvasSurface> for JsRenderRoutine {
    fn render(
        &mut self,
        surface: &mut CanvasSurface,
        width: f64,
        height: f64,
        timestamp_ms: f64,
    ) -> anyhow::Result<()> {
        let args = Array::new();
        args.push(surface.context());
        args.push(&JsValue::from_f64(width));
        args.push(&JsValue::from_f64(height));
        args.push(&JsValue::from_f64(timestamp_ms));

        self.render
            .apply(&JsValue::NULL, &args)
            .map(|_| ())
            .map_err(|e| anyhow!("render threw: {e:?}"))
    }
}
