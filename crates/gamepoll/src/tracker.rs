use smallvec::SmallVec;

use crate::options::{CategoryConfig, GamepadOptions, ResolvedOptions};
use crate::types::{GamepadButton, SlotSnapshot};

/// Change produced by a tracker during one frame update.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// A stick axis settled on a new normalized value; `axis` is in `0..4`.
    Axis { axis: usize, value: f64 },
    /// A button settled on a new normalized value.
    Button {
        index: usize,
        button: GamepadButton,
        pressed: bool,
        value: f64,
    },
}

/// Per-slot normalization and change-detection state.
///
/// Stick and button lengths are fixed by the snapshot seen at creation and
/// never change afterwards. State starts zeroed, so the first update emits
/// for every control that is away from rest.
#[derive(Debug)]
pub struct GamepadTracker {
    config: ResolvedOptions,
    sticks: [[f64; 2]; 2],
    buttons: SmallVec<[f64; 16]>,
}

impl GamepadTracker {
    pub fn new(snapshot: &SlotSnapshot, options: &GamepadOptions) -> Self {
        Self {
            config: options.resolve(),
            sticks: [[0.0; 2]; 2],
            buttons: smallvec::smallvec![0.0; snapshot.buttons.len()],
        }
    }

    pub fn config(&self) -> &ResolvedOptions {
        &self.config
    }

    /// Diffs one raw frame against the cached state, handing every changed
    /// stick axis and button to `sink`. Unchanged values stay silent; this
    /// is what keeps idle controls from flooding subscribers at display
    /// rate.
    pub fn update<F: FnMut(TrackerEvent)>(
        &mut self,
        snapshot: &SlotSnapshot,
        mut sink: F,
    ) {
        let mut i = 0;
        for stick in 0..2 {
            for axis in 0..2 {
                self.set_stick(stick, axis, snapshot.axes[i], &mut sink);
                i += 1;
            }
        }

        let count = self.buttons.len().min(snapshot.buttons.len());
        for index in 0..count {
            self.set_button(index, snapshot.buttons[index], &mut sink);
        }
    }

    fn set_stick<F: FnMut(TrackerEvent)>(
        &mut self,
        stick: usize,
        axis: usize,
        raw: f64,
        sink: &mut F,
    ) {
        let value = normalize_stick(raw, &self.config.stick);
        if self.sticks[stick][axis] != value {
            self.sticks[stick][axis] = value;
            sink(TrackerEvent::Axis { axis: stick * 2 + axis, value });
        }
    }

    fn set_button<F: FnMut(TrackerEvent)>(
        &mut self,
        index: usize,
        button: GamepadButton,
        sink: &mut F,
    ) {
        let value = normalize_button(button, &self.config.button);
        if self.buttons[index] != value {
            self.buttons[index] = value;
            sink(TrackerEvent::Button {
                index,
                button,
                pressed: button.pressed,
                value,
            });
        }
    }
}

fn apply_dead_zone(value: f64, config: &CategoryConfig) -> f64 {
    if config.dead_zone > 0.0
        && value < config.dead_zone
        && value > -config.dead_zone
    {
        0.0
    } else {
        value
    }
}

fn normalize_stick(raw: f64, config: &CategoryConfig) -> f64 {
    let value = apply_dead_zone(raw, config);
    if !config.analog {
        // Digital mode collapses the axis to its sign.
        if value > 0.0 {
            1.0
        } else if value < 0.0 {
            -1.0
        } else {
            0.0
        }
    } else if config.precision > 0.0 {
        (value * config.precision).round() / config.precision
    } else {
        value
    }
}

fn normalize_button(button: GamepadButton, config: &CategoryConfig) -> f64 {
    let value = apply_dead_zone(button.value, config);
    if !config.analog {
        // Digital mode trusts the platform's pressed flag over the analog
        // reading.
        if button.pressed {
            1.0
        } else {
            0.0
        }
    } else if config.precision > 0.0 {
        (value * config.precision).round() / config.precision
    } else {
        value
    }
}
