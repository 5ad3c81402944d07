//! Run-state machine controlling whether frames are ticked.
//!
//! The machine is flat: `Stopped` is the initial state, `start`
//! enters `Running` from anywhere, `pause` only leaves `Running`, and `stop`
//! always lands in `Stopped`. The orchestrator attaches side effects (frame
//! requests, clears, resets) to the transitions it observes here.

use std::fmt;

/// Controls whether the frame loop keeps scheduling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Nothing scheduled. Initial state, and the result of `stop`.
    #[default]
    Stopped,
    /// Ticks run and each one schedules the next.
    Running,
    /// State preserved, no further ticks scheduled.
    Paused,
}

/// A user control call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    Stop,
}

impl RunState {
    /// State reached by applying `control` to `self`. Pausing while stopped
    /// stays stopped.
    pub fn apply(self, control: Control) -> RunState {
        match (self, control) {
            (_, Control::Start) => RunState::Running,
            (RunState::Stopped, Control::Pause) => RunState::Stopped,
            (_, Control::Pause) => RunState::Paused,
            (_, Control::Stop) => RunState::Stopped,
        }
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        };
        f.write_str(name)
    }
}
