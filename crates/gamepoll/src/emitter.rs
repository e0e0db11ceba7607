use ahash::AHashMap;
use smallvec::SmallVec;

use crate::events::GamepadEvent;

/// Identifier of one registered subscriber callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) type Callback = Box<dyn FnMut(&GamepadEvent)>;

/// String-keyed publish/subscribe registry.
///
/// Callbacks registered under a name run in registration order on every emit
/// for that exact name. The listener embeds one emitter and exposes
/// `on`/`off` by delegation.
#[derive(Default)]
pub(crate) struct Emitter {
    subscribers: AHashMap<String, SmallVec<[(SubscriptionId, Callback); 2]>>,
    next_id: u64,
}

impl Emitter {
    pub(crate) fn on(&mut self, name: &str, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(name.to_string())
            .or_default()
            .push((id, callback));
        id
    }

    pub(crate) fn off(&mut self, name: &str, id: SubscriptionId) -> bool {
        let Some(list) = self.subscribers.get_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(sub, _)| *sub != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.subscribers.remove(name);
        }
        removed
    }

    pub(crate) fn emit(&mut self, name: &str, event: &GamepadEvent) {
        if let Some(list) = self.subscribers.get_mut(name) {
            for (_, callback) in list.iter_mut() {
                callback(event);
            }
        }
    }
}
