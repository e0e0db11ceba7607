use log::warn;

use crate::emitter::Emitter;
use crate::emitter::SubscriptionId;
use crate::events::GamepadEvent;
use crate::options::GamepadOptions;
use crate::source::{FrameId, FrameScheduler, GamepadSource};
use crate::tracker::{GamepadTracker, TrackerEvent};
use crate::types::{SlotIndex, SlotSnapshot, MAX_SLOTS};

/// Polls a [`GamepadSource`] once per display frame, tracks up to
/// [`MAX_SLOTS`] controllers and re-emits normalized change events under the
/// `gamepad:*` name taxonomy.
///
/// Connect and disconnect are detected by diffing slot presence between
/// polls, since no platform delivers a disconnect callback reliably for
/// every controller. Each occupied slot owns its [`GamepadTracker`]
/// exclusively; a disconnect drops the tracker and a reconnect builds a
/// fresh one with zeroed state.
pub struct GamepadListener<S, C> {
    source: S,
    scheduler: C,
    options: GamepadOptions,
    emitter: Emitter,
    trackers: [Option<GamepadTracker>; MAX_SLOTS],
    frame: Option<FrameId>,
}

impl<S: GamepadSource, C: FrameScheduler> GamepadListener<S, C> {
    pub fn new(source: S, scheduler: C, options: GamepadOptions) -> Self {
        Self {
            source,
            scheduler,
            options,
            emitter: Emitter::default(),
            trackers: [None, None, None, None],
            frame: None,
        }
    }

    /// Registers `callback` for the named event. Multiple callbacks may be
    /// registered under one name; they run in registration order.
    pub fn on<F>(&mut self, name: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&GamepadEvent) + 'static,
    {
        self.emitter.on(name, Box::new(callback))
    }

    /// Removes one previously registered callback. Returns whether it was
    /// still registered.
    pub fn off(&mut self, name: &str, id: SubscriptionId) -> bool {
        self.emitter.off(name, id)
    }

    /// Whether a frame request is currently pending.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Starts the poll loop by running the first tick. Idempotent: a
    /// listener that is already running keeps its pending frame.
    pub fn start(&mut self) {
        if self.frame.is_none() {
            self.poll_tick();
        }
    }

    /// Stops the poll loop, cancelling the pending frame request if any.
    /// Idempotent.
    pub fn stop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.scheduler.cancel(frame);
        }
    }

    /// Runs one poll: re-requests the next frame, queries the source and
    /// diffs every slot. The embedding environment invokes this once per
    /// granted frame request.
    pub fn poll_tick(&mut self) {
        // Request first so the next callback is queued while this tick runs,
        // standard display-sync scheduling.
        self.frame = Some(self.scheduler.request());

        let slots = match self.source.poll() {
            Ok(slots) => slots,
            Err(err) => {
                warn!("gamepad source poll failed, assuming no controllers: {err}");
                [None, None, None, None]
            }
        };

        for slot in (0..MAX_SLOTS).rev() {
            self.poll_slot(slot, slots[slot].as_ref());
        }
    }

    fn poll_slot(&mut self, slot: SlotIndex, snapshot: Option<&SlotSnapshot>) {
        match snapshot {
            Some(snapshot) => {
                if self.trackers[slot].is_none() {
                    self.connect(slot, snapshot);
                }
                let Self { trackers, emitter, .. } = self;
                if let Some(tracker) = trackers[slot].as_mut() {
                    tracker.update(snapshot, |event| {
                        emit_tracker_event(emitter, slot, &event);
                    });
                }
            }
            None => {
                if self.trackers[slot].take().is_some() {
                    self.disconnect(slot);
                }
            }
        }
    }

    fn connect(&mut self, slot: SlotIndex, snapshot: &SlotSnapshot) {
        self.trackers[slot] = Some(GamepadTracker::new(snapshot, &self.options));
        let event = GamepadEvent::Connected { slot };
        self.emitter.emit("gamepad:connected", &event);
        self.emitter.emit(&format!("gamepad:{slot}:connected"), &event);
    }

    fn disconnect(&mut self, slot: SlotIndex) {
        let event = GamepadEvent::Disconnected { slot };
        self.emitter.emit("gamepad:disconnected", &event);
        self.emitter.emit(&format!("gamepad:{slot}:disconnected"), &event);
    }
}

fn emit_tracker_event(emitter: &mut Emitter, slot: SlotIndex, event: &TrackerEvent) {
    match *event {
        TrackerEvent::Axis { axis, value } => {
            let event = GamepadEvent::Axis { slot, axis, value };
            emitter.emit("gamepad:axis", &event);
            emitter.emit(&format!("gamepad:{slot}:axis"), &event);
            emitter.emit(&format!("gamepad:{slot}:axis:{axis}"), &event);
        }
        TrackerEvent::Button { index, button, pressed, value } => {
            let event = GamepadEvent::Button { slot, index, button, pressed, value };
            emitter.emit("gamepad:button", &event);
            emitter.emit(&format!("gamepad:{slot}:button"), &event);
            emitter.emit(&format!("gamepad:{slot}:button:{index}"), &event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::GamepadListener;
    use crate::error::{Error, Result};
    use crate::events::GamepadEvent;
    use crate::options::{CategoryOptions, GamepadOptions};
    use crate::source::{FrameId, FrameScheduler, GamepadSource};
    use crate::types::{GamepadButton, SlotSnapshot, MAX_SLOTS};

    type Frame = Result<[Option<SlotSnapshot>; MAX_SLOTS]>;

    /// Source replaying a scripted sequence of poll results, then staying
    /// empty.
    #[derive(Default)]
    struct ScriptedSource {
        frames: VecDeque<Frame>,
    }

    impl ScriptedSource {
        fn push(&mut self, frame: Frame) {
            self.frames.push_back(frame);
        }
    }

    impl GamepadSource for ScriptedSource {
        fn poll(&mut self) -> Frame {
            self.frames
                .pop_front()
                .unwrap_or_else(|| Ok([None, None, None, None]))
        }
    }

    #[derive(Default)]
    struct CountingScheduler {
        granted: FrameId,
        cancelled: Rc<RefCell<Vec<FrameId>>>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request(&mut self) -> FrameId {
            self.granted += 1;
            self.granted
        }

        fn cancel(&mut self, frame: FrameId) {
            self.cancelled.borrow_mut().push(frame);
        }
    }

    fn snapshot(axes: [f64; 4], buttons: &[(f64, bool)]) -> SlotSnapshot {
        SlotSnapshot {
            axes,
            buttons: buttons
                .iter()
                .map(|&(value, pressed)| GamepadButton { value, pressed })
                .collect(),
        }
    }

    fn only_slot(slot: usize, snapshot: SlotSnapshot) -> [Option<SlotSnapshot>; MAX_SLOTS] {
        let mut slots = [None, None, None, None];
        slots[slot] = Some(snapshot);
        slots
    }

    type EventLog = Rc<RefCell<Vec<(String, GamepadEvent)>>>;

    fn record_all(
        listener: &mut GamepadListener<ScriptedSource, CountingScheduler>,
        names: &[&str],
    ) -> EventLog {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        for name in names {
            let log = Rc::clone(&log);
            let tag = (*name).to_string();
            listener.on(name, move |event| {
                log.borrow_mut().push((tag.clone(), event.clone()));
            });
        }
        log
    }

    #[test]
    fn connected_pair_fires_before_first_input_events() {
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(2, snapshot([0.5, 0.0, 0.0, 0.0], &[]))));

        let mut listener = GamepadListener::new(
            source,
            CountingScheduler::default(),
            GamepadOptions::default(),
        );
        let log = record_all(
            &mut listener,
            &["gamepad:connected", "gamepad:2:connected", "gamepad:axis"],
        );

        listener.start();

        let names: Vec<String> =
            log.borrow().iter().map(|(name, _)| name.clone()).collect();
        assert_eq!(
            names,
            vec!["gamepad:connected", "gamepad:2:connected", "gamepad:axis"]
        );
        assert_eq!(
            log.borrow()[2].1,
            GamepadEvent::Axis { slot: 2, axis: 0, value: 0.5 }
        );
    }

    #[test]
    fn axis_events_fan_out_global_slot_and_axis_names() {
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(1, snapshot([0.0, 0.0, 0.0, -1.0], &[]))));

        let mut listener = GamepadListener::new(
            source,
            CountingScheduler::default(),
            GamepadOptions::default(),
        );
        let log = record_all(
            &mut listener,
            &["gamepad:axis", "gamepad:1:axis", "gamepad:1:axis:3", "gamepad:1:axis:0"],
        );

        listener.start();

        let expected = GamepadEvent::Axis { slot: 1, axis: 3, value: -1.0 };
        let events = log.borrow();
        assert_eq!(
            *events,
            vec![
                ("gamepad:axis".to_string(), expected.clone()),
                ("gamepad:1:axis".to_string(), expected.clone()),
                ("gamepad:1:axis:3".to_string(), expected),
            ]
        );
    }

    #[test]
    fn button_events_fan_out_fully_qualified_names_only() {
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(0, snapshot([0.0; 4], &[(0.0, false), (1.0, true)]))));

        let mut listener = GamepadListener::new(
            source,
            CountingScheduler::default(),
            GamepadOptions::default(),
        );
        let log = record_all(
            &mut listener,
            &[
                "gamepad:button",
                "gamepad:0:button",
                "gamepad:0:button:1",
                // Historical unqualified form, intentionally never emitted.
                "gamepad:button:1",
            ],
        );

        listener.start();

        let names: Vec<String> =
            log.borrow().iter().map(|(name, _)| name.clone()).collect();
        assert_eq!(
            names,
            vec!["gamepad:button", "gamepad:0:button", "gamepad:0:button:1"]
        );
    }

    #[test]
    fn disconnect_fires_pair_and_silences_the_slot() {
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(3, snapshot([0.0; 4], &[(0.0, false)]))));
        source.push(Ok([None, None, None, None]));
        // Slot stays empty afterwards; nothing further may fire.
        source.push(Ok([None, None, None, None]));

        let mut listener = GamepadListener::new(
            source,
            CountingScheduler::default(),
            GamepadOptions::default(),
        );
        let log = record_all(
            &mut listener,
            &["gamepad:disconnected", "gamepad:3:disconnected", "gamepad:axis", "gamepad:button"],
        );

        listener.start();
        listener.poll_tick();
        listener.poll_tick();

        let events = log.borrow();
        assert_eq!(
            *events,
            vec![
                (
                    "gamepad:disconnected".to_string(),
                    GamepadEvent::Disconnected { slot: 3 }
                ),
                (
                    "gamepad:3:disconnected".to_string(),
                    GamepadEvent::Disconnected { slot: 3 }
                ),
            ]
        );
    }

    #[test]
    fn reconnect_builds_a_fresh_tracker() {
        let held = snapshot([1.0, 0.0, 0.0, 0.0], &[]);
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(0, held.clone())));
        source.push(Ok([None, None, None, None]));
        source.push(Ok(only_slot(0, held)));

        let mut listener = GamepadListener::new(
            source,
            CountingScheduler::default(),
            GamepadOptions::default(),
        );
        let log = record_all(&mut listener, &["gamepad:axis"]);

        listener.start();
        listener.poll_tick();
        listener.poll_tick();

        // The axis re-fires after reconnect because the new tracker starts
        // from zeroed state.
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn source_failure_is_treated_as_no_controllers() {
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(1, snapshot([0.0; 4], &[]))));
        source.push(Err(Error::Backend("query unavailable".to_string())));

        let mut listener = GamepadListener::new(
            source,
            CountingScheduler::default(),
            GamepadOptions::default(),
        );
        let log = record_all(&mut listener, &["gamepad:connected", "gamepad:disconnected"]);

        listener.start();
        listener.poll_tick();

        let names: Vec<String> =
            log.borrow().iter().map(|(name, _)| name.clone()).collect();
        assert_eq!(names, vec!["gamepad:connected", "gamepad:disconnected"]);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let scheduler = CountingScheduler {
            granted: 0,
            cancelled: Rc::clone(&cancelled),
        };
        let mut listener = GamepadListener::new(
            ScriptedSource::default(),
            scheduler,
            GamepadOptions::default(),
        );

        listener.start();
        assert!(listener.is_running());
        // A second start must not run another tick or request another frame.
        listener.start();
        assert!(listener.is_running());

        listener.stop();
        assert!(!listener.is_running());
        listener.stop();

        // Exactly one pending frame was cancelled, exactly once.
        assert_eq!(*cancelled.borrow(), vec![1]);
    }

    #[test]
    fn listener_options_reach_new_trackers() {
        let options = GamepadOptions {
            stick: Some(CategoryOptions {
                analog: Some(false),
                ..CategoryOptions::default()
            }),
            ..GamepadOptions::default()
        };
        let mut source = ScriptedSource::default();
        source.push(Ok(only_slot(0, snapshot([0.4, 0.0, 0.0, 0.0], &[]))));

        let mut listener =
            GamepadListener::new(source, CountingScheduler::default(), options);
        let log = record_all(&mut listener, &["gamepad:0:axis:0"]);

        listener.start();

        assert_eq!(
            log.borrow()[0].1,
            GamepadEvent::Axis { slot: 0, axis: 0, value: 1.0 }
        );
    }
}
