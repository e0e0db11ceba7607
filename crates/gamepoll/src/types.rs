use smallvec::SmallVec;

/// Number of controller slots the listener tracks.
pub const MAX_SLOTS: usize = 4;

/// Platform-assigned controller slot, in `0..MAX_SLOTS`.
pub type SlotIndex = usize;

/// Raw reading of a single button as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadButton {
    /// Analog value in `[0.0, 1.0]`.
    pub value: f64,
    /// Binary pressed flag.
    pub pressed: bool,
}

/// Raw per-frame reading of one connected controller slot.
///
/// Sources always report exactly four axis values; controllers with fewer
/// physical axes pad the remainder with `0.0`. The button count is fixed by
/// the controller's capabilities.
#[derive(Debug, Clone, Default)]
pub struct SlotSnapshot {
    pub axes: [f64; 4],
    pub buttons: SmallVec<[GamepadButton; 16]>,
}
