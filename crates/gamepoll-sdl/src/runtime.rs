use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};
use log::debug;

use gamepoll::{
    Error, FrameId, FrameScheduler, GamepadListener, GamepadSource, Result,
};

/// Default frame interval, modelling a 60 Hz display.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Frame pacing for the blocking run loop, standing in for the display's
/// repaint callback.
pub struct IntervalScheduler {
    next_id: FrameId,
    pending: Option<FrameId>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self { next_id: 0, pending: None }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request(&mut self) -> FrameId {
        self.next_id += 1;
        self.pending = Some(self.next_id);
        self.next_id
    }

    fn cancel(&mut self, frame: FrameId) {
        if self.pending == Some(frame) {
            self.pending = None;
        }
    }
}

/// Drives a listener's poll loop at `interval`, blocking the calling thread
/// until `stop_rx` delivers a message or disconnects.
///
/// Each granted frame request is served by exactly one `poll_tick`. A
/// message on `stop_rx` stops the listener cleanly; a disconnected channel
/// means the supervising side is gone and is reported as an error.
pub fn run<S: GamepadSource>(
    listener: &mut GamepadListener<S, IntervalScheduler>,
    interval: Duration,
    stop_rx: &Receiver<()>,
) -> Result<()> {
    listener.start();
    let mut deadline = Instant::now() + interval;

    while listener.is_running() {
        match stop_rx.try_recv() {
            Ok(()) => {
                debug!("stop requested, cancelling pending frame");
                listener.stop();
                break;
            }
            Err(TryRecvError::Disconnected) => {
                listener.stop();
                return Err(Error::Backend(
                    "stop channel disconnected".to_string(),
                ));
            }
            Err(TryRecvError::Empty) => {}
        }

        let now = Instant::now();
        if now < deadline {
            thread::sleep(deadline - now);
        }
        deadline += interval;
        listener.poll_tick();
    }

    Ok(())
}
