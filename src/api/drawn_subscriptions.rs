use std::fmt;

use indexmap::IndexMap;

/// Opaque handle returned by [`TimeAxis::on_drawn`](super::TimeAxis::on_drawn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

type DrawnCallback = Box<dyn FnMut()>;

/// Callbacks fired after every rendered frame, in subscription order.
#[derive(Default)]
pub(super) struct DrawnSubscriptions {
    next_id: u64,
    callbacks: IndexMap<SubscriptionId, DrawnCallback>,
}

impl DrawnSubscriptions {
    pub(super) fn subscribe(&mut self, callback: DrawnCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }

    pub(super) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.shift_remove(&id).is_some()
    }

    pub(super) fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub(super) fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub(super) fn notify(&mut self) {
        for callback in self.callbacks.values_mut() {
            callback();
        }
    }
}

impl fmt::Debug for DrawnSubscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawnSubscriptions")
            .field("next_id", &self.next_id)
            .field("ids", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
