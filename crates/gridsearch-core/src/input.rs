//! Input events produced by a [`Driver`](crate::Driver): [`Input`], [`Key`],
//! [`MouseAction`].

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

/// Mouse button or wheel action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Left button press.
    Main,
    /// Right button press.
    Secondary,
    /// Middle button press.
    Auxiliary,
    /// Any button release.
    Release,
    /// Movement, with or without a held button.
    Move,
}

/// A single input event in screen coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    Key(Key),
    Mouse { action: MouseAction, pos: Point },
    /// The screen was resized to `width` x `height` cells.
    Screen { width: i32, height: i32 },
}

impl Input {
    /// Shorthand for a printable key press.
    #[inline]
    pub fn char(c: char) -> Self {
        Self::Key(Key::Char(c))
    }

    /// Shorthand for a main-button click at `pos`.
    #[inline]
    pub fn click(pos: Point) -> Self {
        Self::Mouse {
            action: MouseAction::Main,
            pos,
        }
    }
}
