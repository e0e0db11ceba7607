use crate::types::{GamepadButton, SlotIndex};

/// Events emitted by the listener about controller lifecycle and input.
///
/// Every event is delivered under one or more names of the `gamepad:*`
/// taxonomy: a global name (`gamepad:axis`), a slot-scoped name
/// (`gamepad:2:axis`) and, for input events, an index-scoped name
/// (`gamepad:2:axis:0`).
#[derive(Debug, Clone, PartialEq)]
pub enum GamepadEvent {
    /// A controller appeared at a previously empty slot.
    Connected { slot: SlotIndex },
    /// A previously occupied slot became empty.
    Disconnected { slot: SlotIndex },
    /// A stick axis changed; `axis` is in `0..4`, `value` in `[-1.0, 1.0]`.
    Axis {
        slot: SlotIndex,
        axis: usize,
        value: f64,
    },
    /// A button changed; `value` is the normalized reading in `[0.0, 1.0]`,
    /// `button` the raw platform reading it was derived from.
    Button {
        slot: SlotIndex,
        index: usize,
        button: GamepadButton,
        pressed: bool,
        value: f64,
    },
}
