/// Keyboard key identifier.
///
/// Printable keys are reported by the character they produce (lowercased);
/// a few named keys that demos commonly bind get their own variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Character(char),

    /// Key not represented above.
    Unknown,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Press/release transition shared by keys and buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input event.
///
/// Pointer positions are physical pixels relative to the top-left corner of
/// the drawable area and may be negative or exceed the surface while a
/// button is held.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: i32, y: i32 },
    PointerLeft,
    Button { button: MouseButton, state: ButtonState },
    Key { key: Key, state: ButtonState, repeat: bool },
    Focused(bool),
}
