//! Gesture-to-command reducers.
//!
//! Each input channel folds raw deltas into its own accumulator and emits
//! discrete [`NavCommand`]s when a threshold is crossed. The navigator only
//! ever sees the command stream, never raw deltas, so all three channels
//! share identical navigation semantics.

use tracing::trace;

/// One discrete navigation step, channel-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Move focus forward (wraps past the end).
    Advance,
    /// Move focus backward (wraps past the start).
    Retreat,
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
}

impl Key {
    /// Navigation command for this key, if it is a navigation key.
    /// Enter and Escape carry session semantics and map to none.
    pub fn nav_command(self) -> Option<NavCommand> {
        match self {
            Key::ArrowRight => Some(NavCommand::Advance),
            Key::ArrowLeft => Some(NavCommand::Retreat),
            Key::Enter | Key::Escape => None,
        }
    }
}

/// Wheel/trackpad accumulator. The dominant axis of each event feeds a
/// running sum; every full threshold crossed emits one command, and the
/// fractional remainder carries over to the next event.
#[derive(Debug, Clone)]
pub struct WheelAccumulator {
    accumulated: f32,
    threshold: f32,
}

impl WheelAccumulator {
    pub fn new(threshold: f32) -> Self {
        Self {
            accumulated: 0.0,
            threshold,
        }
    }

    /// Fold one wheel event. A large flick can emit several commands;
    /// positive accumulation advances.
    pub fn feed(&mut self, delta_x: f32, delta_y: f32) -> Vec<NavCommand> {
        let delta = if delta_x.abs() > delta_y.abs() {
            delta_x
        } else {
            delta_y
        };
        self.accumulated += delta;

        let mut commands = Vec::new();
        while self.accumulated > self.threshold {
            commands.push(NavCommand::Advance);
            self.accumulated -= self.threshold;
        }
        while self.accumulated < -self.threshold {
            commands.push(NavCommand::Retreat);
            self.accumulated += self.threshold;
        }
        trace!(
            residual = self.accumulated,
            emitted = commands.len(),
            "wheel event folded"
        );
        commands
    }

    /// Current unconsumed accumulation.
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }
}

/// Transient pointer/touch drag tracking. Created on press, destroyed on
/// release; no momentum is simulated after release.
#[derive(Debug, Clone)]
pub struct DragSession {
    start_x: f32,
    last_x: f32,
    accumulated: f32,
    velocity: f32,
}

/// EMA blend factor for the drag velocity estimate.
const VELOCITY_SMOOTHING: f32 = 0.1;

impl DragSession {
    /// Open a session at the pointer-down position.
    pub fn begin(x: f32) -> Self {
        Self {
            start_x: x,
            last_x: x,
            accumulated: 0.0,
            velocity: 0.0,
        }
    }

    /// Fold one pointer-move. The carousel follows the finger: dragging
    /// leftward (negative displacement) advances, rightward retreats.
    /// `threshold` comes from the current viewport width.
    pub fn feed(&mut self, x: f32, threshold: f32) -> Vec<NavCommand> {
        let dx = x - self.last_x;
        self.velocity = dx * VELOCITY_SMOOTHING + self.velocity * (1.0 - VELOCITY_SMOOTHING);
        self.last_x = x;
        self.accumulated += dx;

        let mut commands = Vec::new();
        while self.accumulated > threshold {
            commands.push(NavCommand::Retreat);
            self.accumulated -= threshold;
        }
        while self.accumulated < -threshold {
            commands.push(NavCommand::Advance);
            self.accumulated += threshold;
        }
        commands
    }

    /// Total displacement since the press, consumed thresholds included.
    pub fn travel(&self) -> f32 {
        self.last_x - self.start_x
    }

    /// Smoothed velocity estimate (px per move event).
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Unconsumed displacement.
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }
}
