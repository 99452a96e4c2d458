//! A mounted controller together with the event listeners that drive it
//!
//! Listeners hold their own handle to the controller, so replacing a mount
//! must unregister them or the old controller keeps reacting to events.

/// An event registration that can be removed from its target
pub trait Detach {
    fn detach(&self);
}

/// Controller handle plus every listener registered for it.
/// Dropping the mount detaches the listeners.
pub struct Mounted<C, L: Detach> {
    controller: C,
    listeners: Vec<L>,
}

impl<C, L: Detach> Mounted<C, L> {
    pub fn new(controller: C, listeners: Vec<L>) -> Self {
        Self {
            controller,
            listeners,
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Unregister all listeners. Later calls are no-ops.
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }

    /// Install `next` into `slot`, detaching whatever was mounted there
    pub fn replace(slot: &mut Option<Self>, next: Self) {
        if let Some(mut previous) = slot.take() {
            previous.detach();
        }
        *slot = Some(next);
    }
}

impl<C, L: Detach> Drop for Mounted<C, L> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records which listeners were detached
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Detach for Recorder {
        fn detach(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Recorder {
        Recorder {
            name,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn test_replace_detaches_previous_listeners() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = None;

        Mounted::replace(
            &mut slot,
            Mounted::new("first", vec![recorder("main", &log), recorder("secondary", &log)]),
        );
        assert!(log.borrow().is_empty());

        Mounted::replace(&mut slot, Mounted::new("second", vec![recorder("main-2", &log)]));
        assert_eq!(*log.borrow(), vec!["main", "secondary"]);

        let mounted = slot.as_ref().unwrap();
        assert_eq!(*mounted.controller(), "second");
        assert_eq!(mounted.listener_count(), 1);
    }

    #[test]
    fn test_detach_runs_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut mounted = Mounted::new((), vec![recorder("main", &log)]);

        mounted.detach();
        mounted.detach();
        drop(mounted);

        assert_eq!(*log.borrow(), vec!["main"]);
    }
}
