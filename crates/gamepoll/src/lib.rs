mod emitter;
mod error;
mod events;
mod listener;
mod options;
mod source;
mod tracker;
mod types;

pub use crate::emitter::SubscriptionId;
pub use crate::error::{Error, Result};
pub use crate::events::GamepadEvent;
pub use crate::listener::GamepadListener;
pub use crate::options::{
    CategoryConfig, CategoryOptions, GamepadOptions, ResolvedOptions,
};
pub use crate::source::{FrameId, FrameScheduler, GamepadSource};
pub use crate::tracker::{GamepadTracker, TrackerEvent};
pub use crate::types::{GamepadButton, SlotIndex, SlotSnapshot, MAX_SLOTS};
