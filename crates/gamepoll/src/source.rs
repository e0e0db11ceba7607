use crate::error::Result;
use crate::types::{SlotSnapshot, MAX_SLOTS};

/// Synchronous platform query for the current controller slots.
///
/// Implementations report at most [`MAX_SLOTS`] controllers, indexed by the
/// platform-assigned slot. A failed poll is absorbed by the listener and
/// treated as zero controllers present, so transient backend hiccups never
/// reach application code.
pub trait GamepadSource {
    fn poll(&mut self) -> Result<[Option<SlotSnapshot>; MAX_SLOTS]>;
}

/// Token for one granted frame request.
pub type FrameId = u64;

/// Display-sync scheduling primitive, the "request a callback before the
/// next repaint" contract.
///
/// The embedding environment invokes the listener's
/// [`poll_tick`](crate::GamepadListener::poll_tick) exactly once per granted
/// request. A cancelled request is never invoked; cancelling an unknown or
/// already-fired id is a no-op.
pub trait FrameScheduler {
    fn request(&mut self) -> FrameId;
    fn cancel(&mut self, frame: FrameId);
}
