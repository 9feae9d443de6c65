// File: crates/price-chart-core/src/surface.rs
// Summary: Drawing-surface lookup capability and an in-memory document of canvas elements.

use std::collections::HashMap;

/// Resolves an identifier to a live drawing surface owned by the host.
pub trait SurfaceHost {
    type Surface;

    fn resolve(&self, id: &str) -> Option<Self::Surface>;
}

impl<T: SurfaceHost + ?Sized> SurfaceHost for &T {
    type Surface = T::Surface;

    fn resolve(&self, id: &str) -> Option<Self::Surface> {
        (**self).resolve(id)
    }
}

/// A canvas slot in a page, in CSS pixels.
/// `width` is the container width a responsive chart fills; `height` is used only
/// when the aspect ratio is not maintained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasElement {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl CanvasElement {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self { id: id.into(), width, height }
    }
}

/// In-memory page: canvas elements keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: HashMap<String, CanvasElement>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a canvas; ids are unique within a document.
    pub fn add_canvas(&mut self, canvas: CanvasElement) {
        self.elements.insert(canvas.id.clone(), canvas);
    }

    pub fn with_canvas(mut self, canvas: CanvasElement) -> Self {
        self.add_canvas(canvas);
        self
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&CanvasElement> {
        self.elements.get(id)
    }
}

impl SurfaceHost for Document {
    type Surface = CanvasElement;

    fn resolve(&self, id: &str) -> Option<CanvasElement> {
        self.get_element_by_id(id).cloned()
    }
}
