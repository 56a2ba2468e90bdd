//! Pointer input as an explicit state machine.
//!
//! The controller only turns drags into target rotation; hover and click
//! hit-testing live on [`crate::Globe`], which owns the markers and camera.

use foundation::math::Vec2;

use crate::rotation::RotationState;

/// Pointer input in pixels relative to the viewport's top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    Click(Vec2),
}

/// Cursor affordance requested after a hover test.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    Grab,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
            Cursor::Grab => "grab",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last_pos_px: Vec2,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PointerController {
    drag: DragState,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Starts a drag. Auto-rotation stays off until explicitly re-enabled.
    pub fn on_pointer_down(&mut self, pos_px: Vec2, rotation: &mut RotationState) {
        rotation.auto_rotate = false;
        rotation.dragging = true;
        self.drag = DragState::Dragging {
            last_pos_px: pos_px,
        };
    }

    /// Accumulates the pointer delta into the target orientation while dragging.
    ///
    /// Returns `true` if the target changed.
    pub fn on_pointer_move(
        &mut self,
        pos_px: Vec2,
        rotation: &mut RotationState,
        sensitivity: f64,
    ) -> bool {
        let DragState::Dragging { last_pos_px } = self.drag else {
            return false;
        };

        let delta = pos_px - last_pos_px;
        rotation.target.yaw += delta.x * sensitivity;
        rotation.target.pitch += delta.y * sensitivity;
        self.drag = DragState::Dragging {
            last_pos_px: pos_px,
        };
        true
    }

    pub fn on_pointer_up(&mut self, rotation: &mut RotationState) {
        rotation.dragging = false;
        self.drag = DragState::Idle;
    }

    /// Drops any drag in progress (view teardown or reset).
    pub fn cancel(&mut self, rotation: &mut RotationState) {
        self.on_pointer_up(rotation);
    }
}
