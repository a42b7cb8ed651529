//! Pointer input routing.

use crate::context::EditorContext;
use crate::preview::{PlacementPreview, PreviewFrame};
use gridpaint_core::geometry::Vector;
use tracing::trace;

/// A pointer button, numbered the way browsers and most windowing layers
/// report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

impl PointerButton {
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => PointerButton::Left,
            1 => PointerButton::Middle,
            2 => PointerButton::Right,
            other => PointerButton::Other(other),
        }
    }
}

/// Something on the editor canvas that reacts to the pointer and can be
/// drawn.
pub trait PointerTarget {
    fn on_pointer_down(&mut self, ctx: &mut EditorContext, button: PointerButton);

    /// Also called when the button is released outside the target.
    fn on_pointer_up(&mut self, ctx: &mut EditorContext, button: PointerButton);

    /// The cursor moved to `cursor`, in pixels.
    fn on_move(&mut self, ctx: &mut EditorContext, cursor: Vector);

    fn render(&self) -> PreviewFrame;
}

impl PointerTarget for PlacementPreview {
    /// Left places and keeps placing while dragged; right removes and keeps
    /// removing while dragged.
    fn on_pointer_down(&mut self, ctx: &mut EditorContext, button: PointerButton) {
        trace!(?button, "pointer down");
        match button {
            PointerButton::Left => {
                self.holding_left = true;
                self.commit(ctx);
            }
            PointerButton::Right => {
                self.holding_right = true;
                self.remove_under_cursor(ctx);
            }
            PointerButton::Middle | PointerButton::Other(_) => {}
        }
    }

    fn on_pointer_up(&mut self, _ctx: &mut EditorContext, button: PointerButton) {
        match button {
            PointerButton::Left => self.holding_left = false,
            PointerButton::Right => self.holding_right = false,
            PointerButton::Middle | PointerButton::Other(_) => {}
        }
    }

    fn on_move(&mut self, ctx: &mut EditorContext, cursor: Vector) {
        self.move_to(ctx, cursor);
    }

    fn render(&self) -> PreviewFrame {
        PlacementPreview::render(self)
    }
}
