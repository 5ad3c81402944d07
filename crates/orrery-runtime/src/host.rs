//! Host capabilities consumed by the particle field

use orrery_core::Color;
use std::cell::Cell;
use std::rc::Rc;

/// A 2D drawing surface.
///
/// Coordinates are pixels with the origin at the top-left corner. Every paint
/// command carries its own fill colour; implementations keep no pen state.
pub trait Surface {
    /// Resize the pixel buffer. Contents after a resize are unspecified.
    fn set_size(&mut self, width: u32, height: u32);

    /// Reset a rectangle to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Composite a filled rectangle over the current contents.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Fill the closed path of a clockwise arc from `start` to `end` radians.
    ///
    /// Follows the 2D canvas convention: a sweep of at least 2π is a full disc,
    /// otherwise the sweep is `(end - start)` wrapped into [0, 2π) and the path
    /// is closed with a straight chord.
    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color);
}

/// Source of the host's current viewport size in pixels
pub trait SizeProvider {
    fn size(&self) -> (u32, u32);
}

/// Resolves a named drawing target (e.g. an element id) to a surface
pub trait SurfaceResolver {
    fn resolve(&mut self, name: &str) -> Option<Box<dyn Surface>>;
}

impl<F> SurfaceResolver for F
where
    F: FnMut(&str) -> Option<Box<dyn Surface>>,
{
    fn resolve(&mut self, name: &str) -> Option<Box<dyn Surface>> {
        self(name)
    }
}

/// A size that never changes, for headless rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSize(pub u32, pub u32);

impl SizeProvider for FixedSize {
    fn size(&self) -> (u32, u32) {
        (self.0, self.1)
    }
}

/// A size the host updates in place; clones observe the same value.
#[derive(Debug, Clone)]
pub struct SharedSize {
    inner: Rc<Cell<(u32, u32)>>,
}

impl SharedSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: Rc::new(Cell::new((width, height))),
        }
    }

    pub fn set(&self, width: u32, height: u32) {
        self.inner.set((width, height));
    }
}

impl SizeProvider for SharedSize {
    fn size(&self) -> (u32, u32) {
        self.inner.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_size_is_observed_by_clones() {
        let host = SharedSize::new(800, 600);
        let provider: Box<dyn SizeProvider> = Box::new(host.clone());
        assert_eq!(provider.size(), (800, 600));

        host.set(1024, 768);
        assert_eq!(provider.size(), (1024, 768));
    }

    #[test]
    fn closures_resolve_surfaces() {
        let mut resolver = |name: &str| -> Option<Box<dyn Surface>> {
            (name == "canvas").then(|| Box::new(crate::RecordingSurface::new()) as Box<dyn Surface>)
        };
        assert!(resolver.resolve("canvas").is_some());
        assert!(resolver.resolve("missing").is_none());
    }
}
