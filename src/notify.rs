//! Observer registry for map notifications.
//!
//! Panels and menus outside the map subscribe here instead of listening for DOM events. Every
//! published [`Action`] reaches every listener synchronously, in subscription order.
//!
//! Listeners may call back into the map from inside a callback. Actions published during a
//! dispatch are queued and delivered after the current one, so each listener sees actions in
//! publish order and no callback runs nested inside another.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

use crate::engine::Action;

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Action)>;

#[derive(Default)]
pub struct Notifier {
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    registered: RefCell<HashSet<ListenerId>>,
    queue: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. One added during a dispatch starts with the next queued action.
    pub fn subscribe(&self, listener: impl FnMut(&Action) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.registered.borrow_mut().insert(id);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    ///
    /// Takes effect immediately, even for the action currently being dispatched.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self.registered.borrow_mut().remove(&id);
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
        removed
    }

    /// Deliver each action to every listener, draining anything published meanwhile.
    pub fn publish(&self, actions: &[Action]) {
        self.queue.borrow_mut().extend(actions.iter().cloned());
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            let mut active = std::mem::take(&mut *self.listeners.borrow_mut());
            for (id, listener) in &mut active {
                if self.registered.borrow().contains(id) {
                    listener(&action);
                }
            }
            self.restore(active);
        }
        self.dispatching.set(false);
    }

    /// Put the dispatched listeners back ahead of any subscribed meanwhile, dropping the
    /// unsubscribed ones.
    fn restore(&self, mut active: Vec<(ListenerId, Listener)>) {
        let mut listeners = self.listeners.borrow_mut();
        active.append(&mut *listeners);
        let registered = self.registered.borrow();
        active.retain(|(id, _)| registered.contains(id));
        *listeners = active;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.borrow().is_empty()
    }
}
