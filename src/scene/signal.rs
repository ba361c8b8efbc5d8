use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    emitting: bool,
    /// Ids unsubscribed while their listener was checked out by `emit`.
    dropped_during_emit: Vec<u64>,
}

/// Single-threaded observer list with RAII subscriptions.
///
/// Listeners may subscribe or unsubscribe from inside a notification; such changes take effect
/// for the next `emit`.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.listeners.push((id, Box::new(listener)));
        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    let mut slots = slots.borrow_mut();
                    let before = slots.listeners.len();
                    slots.listeners.retain(|(l, _)| *l != id);
                    if slots.listeners.len() == before && slots.emitting {
                        slots.dropped_during_emit.push(id);
                    }
                }
            })),
        }
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                listeners: Vec::new(),
                emitting: false,
                dropped_during_emit: Vec::new(),
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.slots.borrow().listeners.len()
    }

    /// Notify every listener registered before this call, in subscription order.
    pub fn emit(&self, value: &T) {
        let mut running = {
            let mut slots = self.slots.borrow_mut();
            if slots.emitting {
                tracing::warn!("nested signal emit ignored");
                return;
            }
            slots.emitting = true;
            std::mem::take(&mut slots.listeners)
        };

        for (_, listener) in running.iter_mut() {
            listener(value);
        }

        let mut slots = self.slots.borrow_mut();
        let dropped = std::mem::take(&mut slots.dropped_during_emit);
        running.retain(|(id, _)| !dropped.contains(id));
        let added = std::mem::take(&mut slots.listeners);
        running.extend(added);
        slots.listeners = running;
        slots.emitting = false;
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// A subscription with nothing to detach.
    pub fn inert() -> Self {
        Self { detach: None }
    }

    pub fn unsubscribe(mut self) {
        if let Some(f) = self.detach.take() {
            f();
        }
    }

    /// Keep the listener for the lifetime of the signal.
    pub fn forget(mut self) {
        self.detach = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.detach.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

/// One-shot "ready" broadcast shared by every consumer that waits on the landing sequence.
///
/// Subscribers that arrive after the broadcast are notified immediately.
#[derive(Clone, Debug, Default)]
pub struct ReadySignal {
    signal: Signal<()>,
    fired: Rc<Cell<bool>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.fired.get()
    }

    pub fn subscribe(&self, mut listener: impl FnMut() + 'static) -> Subscription {
        if self.fired.get() {
            listener();
            return Subscription::inert();
        }
        self.signal.subscribe(move |_| listener())
    }

    /// Broadcast once. Later calls do nothing.
    pub fn fire(&self) {
        if self.fired.replace(true) {
            return;
        }
        tracing::debug!(listeners = self.signal.listener_count(), "ready");
        self.signal.emit(&());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/signal.rs"]
mod tests;
