//! Viewport: the drawing surface, its pixel size, and whole-surface clears

use orrery_core::{Color, Point};
use orrery_runtime::{SizeProvider, Surface};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Opaque fill for every full clear after the startup paint
pub const DEFAULT_BACKGROUND: Color = Color::BLACK;

/// Overlay painted once per tick; leaves fading trails behind moving particles
pub const FADE_OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.2);

/// Owns the drawing surface and mirrors the host's viewport size
pub struct Viewport {
    width: u32,
    height: u32,
    center: Point,
    background: Color,
    surface: Box<dyn Surface>,
    size_source: Box<dyn SizeProvider>,
}

impl Viewport {
    /// Bind `surface`, size it to the host, and paint the configured background.
    /// Later full clears (resize, stop) use [`DEFAULT_BACKGROUND`].
    pub fn new(
        surface: Box<dyn Surface>,
        size_source: Box<dyn SizeProvider>,
        background: Option<Color>,
    ) -> Self {
        let mut viewport = Self {
            width: 0,
            height: 0,
            center: Point::ORIGIN,
            background: background.unwrap_or(DEFAULT_BACKGROUND),
            surface,
            size_source,
        };
        viewport.fit_to_host();
        viewport.full_clear(Some(viewport.background));
        viewport
    }

    /// Re-read the host size, resize the surface buffer, then fully clear it
    pub fn resize(&mut self) {
        self.fit_to_host();
        self.full_clear(None);
    }

    fn fit_to_host(&mut self) {
        let (width, height) = self.size_source.size();
        self.width = width;
        self.height = height;
        self.center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
        self.surface.set_size(width, height);
    }

    /// Paint the whole surface with an opaque colour, [`DEFAULT_BACKGROUND`] if none
    pub fn full_clear(&mut self, color: Option<Color>) {
        let (w, h) = (self.width as f64, self.height as f64);
        self.surface.clear_rect(0.0, 0.0, w, h);
        self.surface
            .fill_rect(0.0, 0.0, w, h, color.unwrap_or(DEFAULT_BACKGROUND));
    }

    /// Paint a translucent dark overlay over everything drawn so far
    pub fn fade_clear(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        self.surface.fill_rect(0.0, 0.0, w, h, FADE_OVERLAY);
    }

    /// Bounds are inclusive: `x == width` and `y == height` are inside
    pub fn is_out_of_bounds(&self, x: f64, y: f64) -> bool {
        x < 0.0 || y < 0.0 || x > self.width as f64 || y > self.height as f64
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// The colour painted at startup
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }
}

/// Shared, single-threaded handle to a [`Viewport`].
///
/// The orchestrator, its emitters and every particle hold clones of the same
/// handle. Borrows are never held across a call into another component.
#[derive(Clone)]
pub struct ViewportHandle(Rc<RefCell<Viewport>>);

impl ViewportHandle {
    pub fn new(viewport: Viewport) -> Self {
        Self(Rc::new(RefCell::new(viewport)))
    }

    pub fn borrow(&self) -> Ref<'_, Viewport> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Viewport> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same viewport
    pub fn ptr_eq(&self, other: &ViewportHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn size(&self) -> (u32, u32) {
        let vp = self.0.borrow();
        (vp.width, vp.height)
    }

    pub fn is_out_of_bounds(&self, x: f64, y: f64) -> bool {
        self.0.borrow().is_out_of_bounds(x, y)
    }

    /// Run `f` against the bound surface
    pub fn paint<R>(&self, f: impl FnOnce(&mut dyn Surface) -> R) -> R {
        let mut vp = self.0.borrow_mut();
        f(vp.surface_mut())
    }
}

impl std::fmt::Debug for ViewportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vp = self.0.borrow();
        f.debug_struct("ViewportHandle")
            .field("width", &vp.width)
            .field("height", &vp.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_runtime::{FixedSize, PaintCommand, RecordingSurface, SharedSize};

    fn recorded(width: u32, height: u32) -> (Viewport, RecordingSurface) {
        let surface = RecordingSurface::new();
        let vp = Viewport::new(
            Box::new(surface.clone()),
            Box::new(FixedSize(width, height)),
            None,
        );
        (vp, surface)
    }

    #[test]
    fn startup_sizes_and_paints_background() {
        let (vp, surface) = recorded(200, 100);
        assert_eq!((vp.width(), vp.height()), (200, 100));
        assert_eq!(vp.center(), Point::new(100.0, 50.0));
        assert_eq!(
            surface.commands(),
            vec![
                PaintCommand::SetSize {
                    width: 200,
                    height: 100
                },
                PaintCommand::ClearRect {
                    x: 0.0,
                    y: 0.0,
                    width: 200.0,
                    height: 100.0
                },
                PaintCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 200.0,
                    height: 100.0,
                    color: DEFAULT_BACKGROUND
                },
            ]
        );
    }

    fn fill_colors(surface: &RecordingSurface) -> Vec<Color> {
        surface
            .take()
            .into_iter()
            .filter_map(|c| match c {
                PaintCommand::FillRect { color, .. } => Some(color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn configured_background_is_painted_only_at_startup() {
        let surface = RecordingSurface::new();
        let navy = Color::from_hex(0x000080);
        let mut vp = Viewport::new(
            Box::new(surface.clone()),
            Box::new(FixedSize(10, 10)),
            Some(navy),
        );
        assert_eq!(fill_colors(&surface), vec![navy]);
        assert_eq!(vp.background(), navy);

        vp.full_clear(None);
        vp.full_clear(Some(Color::WHITE));
        vp.resize();
        assert_eq!(
            fill_colors(&surface),
            vec![DEFAULT_BACKGROUND, Color::WHITE, DEFAULT_BACKGROUND]
        );
    }

    #[test]
    fn fade_is_a_single_translucent_fill() {
        let (mut vp, surface) = recorded(10, 10);
        surface.take();
        vp.fade_clear();
        let cmds = surface.take();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(
            cmds[0],
            PaintCommand::FillRect { color, .. } if (color.a - 0.2).abs() < 1e-6
        ));
    }

    #[test]
    fn bounds_are_inclusive_at_the_far_edges() {
        let (vp, _) = recorded(100, 50);
        assert!(!vp.is_out_of_bounds(100.0, 50.0));
        assert!(!vp.is_out_of_bounds(0.0, 0.0));
        assert!(vp.is_out_of_bounds(100.001, 10.0));
        assert!(vp.is_out_of_bounds(10.0, 50.001));
        assert!(vp.is_out_of_bounds(-0.001, 10.0));
        assert!(vp.is_out_of_bounds(10.0, -1.0));
    }

    #[test]
    fn resize_follows_host_size() {
        let host = SharedSize::new(100, 100);
        let surface = RecordingSurface::new();
        let handle = ViewportHandle::new(Viewport::new(
            Box::new(surface.clone()),
            Box::new(host.clone()),
            None,
        ));
        assert!(handle.is_out_of_bounds(150.0, 10.0));

        host.set(300, 200);
        handle.borrow_mut().resize();

        assert_eq!(handle.size(), (300, 200));
        assert_eq!(handle.borrow().center(), Point::new(150.0, 100.0));
        assert!(!handle.is_out_of_bounds(150.0, 10.0));
        assert!(surface.commands().contains(&PaintCommand::SetSize {
            width: 300,
            height: 200
        }));
    }

    #[test]
    fn handles_compare_by_identity() {
        let (a, _) = recorded(1, 1);
        let (b, _) = recorded(1, 1);
        let a = ViewportHandle::new(a);
        let b = ViewportHandle::new(b);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
