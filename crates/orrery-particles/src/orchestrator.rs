//! Orchestrator: owns the viewport and emitters and drives the frame loop
//!
//! The host owns the loop. It hands the orchestrator a [`FrameScheduler`]
//! and calls [`Orchestrator::on_frame`] whenever a requested frame comes due.
//! Each frame first applies any pending resize, then runs the pending tick.

use crate::emitter::{Emitter, SharedEmitter};
use crate::viewport::{Viewport, ViewportHandle};
use orrery_core::{Color, OrreryError, Result};
use orrery_runtime::{Control, FrameScheduler, RunState, SizeProvider, Surface, SurfaceResolver};
use std::rc::Rc;

/// The drawing target handed to the builder
pub enum SurfaceTarget {
    /// An already-resolved surface
    Surface(Box<dyn Surface>),
    /// A host identifier, looked up through a [`SurfaceResolver`]
    Named(String),
}

enum Background {
    Color(Color),
    Css(String),
}

/// Collects the host collaborators an [`Orchestrator`] needs
#[derive(Default)]
pub struct OrchestratorBuilder {
    target: Option<SurfaceTarget>,
    resolver: Option<Box<dyn SurfaceResolver>>,
    size: Option<Box<dyn SizeProvider>>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    background: Option<Background>,
}

impl OrchestratorBuilder {
    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.target = Some(SurfaceTarget::Surface(Box::new(surface)));
        self
    }

    pub fn target(mut self, target: SurfaceTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Draw on the surface the resolver returns for `name`
    pub fn surface_named(mut self, name: impl Into<String>) -> Self {
        self.target = Some(SurfaceTarget::Named(name.into()));
        self
    }

    pub fn resolver(mut self, resolver: impl SurfaceResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn size_provider(mut self, size: impl SizeProvider + 'static) -> Self {
        self.size = Some(Box::new(size));
        self
    }

    pub fn scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(Background::Color(color));
        self
    }

    /// Background as a CSS colour string; parsed by [`OrchestratorBuilder::build`]
    pub fn background_css(mut self, css: impl Into<String>) -> Self {
        self.background = Some(Background::Css(css.into()));
        self
    }

    pub fn build(self) -> Result<Orchestrator> {
        let surface = match self.target {
            Some(SurfaceTarget::Surface(surface)) => surface,
            Some(SurfaceTarget::Named(name)) => {
                let mut resolver = self.resolver.ok_or_else(|| {
                    OrreryError::Configuration(format!(
                        "surface '{}' given by name but no resolver was supplied",
                        name
                    ))
                })?;
                resolver.resolve(&name).ok_or_else(|| {
                    OrreryError::Configuration(format!(
                        "'{}' does not name a drawing surface",
                        name
                    ))
                })?
            }
            None => {
                return Err(OrreryError::Configuration(
                    "no drawing surface was supplied".into(),
                ))
            }
        };
        let size = self.size.ok_or_else(|| {
            OrreryError::Configuration("no viewport size provider was supplied".into())
        })?;
        let scheduler = self.scheduler.ok_or_else(|| {
            OrreryError::Configuration("no frame scheduler was supplied".into())
        })?;
        let background = match self.background {
            Some(Background::Color(c)) => Some(c),
            Some(Background::Css(css)) => Some(Color::parse(&css).map_err(|e| {
                OrreryError::Configuration(format!("invalid background colour: {}", e))
            })?),
            None => None,
        };

        let viewport = ViewportHandle::new(Viewport::new(surface, size, background));
        let (w, h) = viewport.size();
        tracing::info!(target: "orchestrator", "Viewport ready at {}x{}", w, h);

        Ok(Orchestrator {
            viewport,
            emitters: Vec::new(),
            state: RunState::Stopped,
            scheduler,
            tick_pending: false,
            resize_pending: false,
            ticks: 0,
        })
    }
}

/// Drives emitters through the run / pause / stop cycle.
///
/// A tick is pending exactly while the loop is live: `start` requests the
/// first frame, every tick that runs requests the next, and a frame that
/// finds the state no longer `Running` ends the cycle without painting.
pub struct Orchestrator {
    viewport: ViewportHandle,
    emitters: Vec<SharedEmitter>,
    state: RunState,
    scheduler: Box<dyn FrameScheduler>,
    tick_pending: bool,
    resize_pending: bool,
    ticks: u64,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// A new, unregistered emitter bound to this orchestrator's viewport
    pub fn create_emitter(&self) -> SharedEmitter {
        Emitter::new(&self.viewport).into_shared()
    }

    /// Register an emitter. Emitters bound to another viewport, or already
    /// registered, are ignored.
    pub fn add_emitter(&mut self, emitter: SharedEmitter) -> bool {
        if !emitter.borrow().viewport().ptr_eq(&self.viewport) {
            tracing::debug!(target: "orchestrator", "Ignoring emitter bound to another viewport");
            return false;
        }
        if self.emitters.iter().any(|e| Rc::ptr_eq(e, &emitter)) {
            return false;
        }
        self.emitters.push(emitter);
        true
    }

    /// Register several emitters, returning how many were accepted
    pub fn add_emitters<I>(&mut self, emitters: I) -> usize
    where
        I: IntoIterator<Item = SharedEmitter>,
    {
        let mut added = 0;
        for emitter in emitters {
            if self.add_emitter(emitter) {
                added += 1;
            }
        }
        added
    }

    pub fn start(&mut self) {
        self.transition(Control::Start);
        if !self.tick_pending {
            self.request_tick();
        }
    }

    /// Stop scheduling ticks. A frame already requested still fires, but paints nothing.
    pub fn pause(&mut self) {
        self.transition(Control::Pause);
    }

    /// Hard reset: clear the surface to the default background and regenerate
    /// every emitter's pool
    pub fn stop(&mut self) {
        self.transition(Control::Stop);
        self.viewport.borrow_mut().full_clear(None);
        for emitter in &self.emitters {
            emitter.borrow_mut().reset_particles();
        }
    }

    /// Host resize notification. Coalesced and applied on the next frame.
    pub fn notify_resize(&mut self) {
        if !self.resize_pending {
            self.resize_pending = true;
            self.scheduler.request_frame();
        }
    }

    /// The host's "before next repaint" callback
    pub fn on_frame(&mut self) -> Result<()> {
        if std::mem::take(&mut self.resize_pending) {
            self.viewport.borrow_mut().resize();
            let (w, h) = self.viewport.size();
            tracing::debug!(target: "orchestrator", "Resized viewport to {}x{}", w, h);
        }
        if std::mem::take(&mut self.tick_pending) {
            self.tick()?;
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        if !self.state.is_running() {
            tracing::trace!(target: "orchestrator", "Frame loop ended ({})", self.state);
            return Ok(());
        }

        self.viewport.borrow_mut().fade_clear();
        for emitter in &self.emitters {
            if let Err(err) = emitter.borrow_mut().update() {
                tracing::error!(target: "orchestrator", "Stopping frame loop: {}", err);
                self.state = RunState::Stopped;
                return Err(err);
            }
        }

        self.ticks += 1;
        self.request_tick();
        Ok(())
    }

    fn request_tick(&mut self) {
        self.tick_pending = true;
        self.scheduler.request_frame();
    }

    fn transition(&mut self, control: Control) {
        let next = self.state.apply(control);
        if next != self.state {
            tracing::debug!(target: "orchestrator", "{} -> {}", self.state, next);
        }
        self.state = next;
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Ticks that have painted since construction
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn viewport(&self) -> &ViewportHandle {
        &self.viewport
    }

    pub fn emitters(&self) -> &[SharedEmitter] {
        &self.emitters
    }
}
