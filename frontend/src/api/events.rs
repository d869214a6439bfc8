//! Session-change notifications.
//!
//! The client emits an [`AuthChangeEvent`] whenever the current session is
//! created, refreshed, or destroyed. Observers register a listener and keep
//! the returned [`Subscription`] for as long as they want to be notified.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use super::types::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

pub type SessionListener = Rc<dyn Fn(AuthChangeEvent, Option<Session>)>;

struct Entry {
    id: u64,
    active: Rc<Cell<bool>>,
    listener: SessionListener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

#[derive(Clone, Default)]
pub struct AuthEvents {
    registry: Rc<RefCell<Registry>>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let active = Rc::new(Cell::new(true));
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(Entry {
            id,
            active: active.clone(),
            listener,
        });
        Subscription {
            id,
            active,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        // Snapshot first: listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<(Rc<Cell<bool>>, SessionListener)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|entry| (entry.active.clone(), entry.listener.clone()))
            .collect();
        log::debug!(
            "auth event {:?} -> {} listener(s)",
            event,
            snapshot.len()
        );
        for (active, listener) in snapshot {
            if active.get() {
                listener(event, session.cloned());
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Handle returned by [`AuthEvents::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    active: Rc<Cell<bool>>,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            // The listener may own other subscriptions; drop it outside the borrow.
            let removed = {
                let mut registry = registry.borrow_mut();
                registry
                    .entries
                    .iter()
                    .position(|entry| entry.id == self.id)
                    .map(|index| registry.entries.remove(index))
            };
            drop(removed);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
