//! A surface that records paint commands instead of rasterizing them

use crate::host::Surface;
use orrery_core::Color;
use std::cell::RefCell;
use std::rc::Rc;

/// One call made against a [`Surface`]
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SetSize {
        width: u32,
        height: u32,
    },
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillArc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Color,
    },
}

/// Display-list surface. Clones share one command log, so a host can hand one
/// clone to the viewport and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Rc<RefCell<Vec<PaintCommand>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every command recorded so far
    pub fn commands(&self) -> Vec<PaintCommand> {
        self.commands.borrow().clone()
    }

    /// Drain the log, returning what was recorded
    pub fn take(&self) -> Vec<PaintCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Number of recorded commands matching `pred`
    pub fn count(&self, pred: impl Fn(&PaintCommand) -> bool) -> usize {
        self.commands.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, command: PaintCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl Surface for RecordingSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.push(PaintCommand::SetSize { width, height });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(PaintCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.push(PaintCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color) {
        self.push(PaintCommand::FillArc {
            cx,
            cy,
            radius,
            start,
            end,
            color,
        });
    }
}
