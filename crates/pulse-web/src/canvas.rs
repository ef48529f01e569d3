use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use pulse_engine::coords::SurfaceSize;
use pulse_engine::surface::RenderSurface;
use pulse_engine::HostError;

/// `<canvas>` element plus its 2D context.
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn from_document(document: &Document, id: &str) -> Result<Self, HostError> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| HostError::surface_unavailable(format!("no element with id '{id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| HostError::surface_unavailable(format!("element '{id}' is not a canvas")))?;
        Self::new(canvas)
    }

    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| HostError::surface_unavailable(format!("getContext(\"2d\") threw: {e:?}")))?
            .ok_or_else(|| HostError::surface_unavailable("2d context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HostError::surface_unavailable("context is not a CanvasRenderingContext2d"))?;
        Ok(Self { canvas, context })
    }

    pub(crate) fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }

    /// Layout region whose size drives the resolution: the canvas' parent,
    /// or the document body for a detached canvas.
    pub(crate) fn layout_region(&self, document: &Document) -> Option<Element> {
        self.canvas
            .parent_element()
            .or_else(|| document.body().map(Element::from))
    }
}

impl RenderSurface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    /// Assigning either attribute clears the bitmap, even to the same value.
    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }
}
