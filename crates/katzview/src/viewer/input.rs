//! Input vocabulary delivered by the host.

use std::ops::BitOr;

/// A key press. Printable keys arrive as `Char`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Escape,
    Other(u32),
}

/// Pointer buttons, wheel steps included (codes 1..=5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

impl Button {
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            Button::Left => 1,
            Button::Middle => 2,
            Button::Right => 3,
            Button::WheelUp => 4,
            Button::WheelDown => 5,
        }
    }

    /// Decode the signed host encoding: `+code` is a press, `-code` a release.
    pub fn from_signed(code: i32) -> Option<(Button, ButtonAction)> {
        let action = if code < 0 {
            ButtonAction::Release
        } else {
            ButtonAction::Press
        };
        let button = match code.unsigned_abs() {
            1 => Button::Left,
            2 => Button::Middle,
            3 => Button::Right,
            4 => Button::WheelUp,
            5 => Button::WheelDown,
            _ => return None,
        };
        Some((button, action))
    }
}

/// Buttons held during a motion event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const LEFT: ButtonMask = ButtonMask(1);
    pub const MIDDLE: ButtonMask = ButtonMask(2);
    pub const RIGHT: ButtonMask = ButtonMask(4);

    #[inline]
    pub fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;
    #[inline]
    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

/// Keyboard modifiers. Carried through to handlers, unused by the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CONTROL: Modifiers = Modifiers(2);

    #[inline]
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    #[inline]
    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}
