/// Host side of the background page-scroll lock.
pub trait ScrollLockTarget: Send {
    fn set_scroll_locked(&mut self, locked: bool);
}

/// Boolean-guarded owner of the page-scroll lock.
///
/// The host is only told about real transitions. Dropping the lock always
/// tells the host to unlock, whatever the last state was.
pub struct ScrollLock {
    target: Box<dyn ScrollLockTarget>,
    held: bool,
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock").field("held", &self.held).finish()
    }
}

impl ScrollLock {
    pub fn new(target: Box<dyn ScrollLockTarget>) -> Self {
        Self {
            target,
            held: false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Returns `true` if the lock state changed.
    pub fn set(&mut self, locked: bool) -> bool {
        if self.held == locked {
            return false;
        }
        self.held = locked;
        self.target.set_scroll_locked(locked);
        tracing::trace!(locked, "page scroll lock");
        true
    }

    pub fn acquire(&mut self) -> bool {
        self.set(true)
    }

    pub fn release(&mut self) -> bool {
        self.set(false)
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.held = false;
        self.target.set_scroll_locked(false);
    }
}

/// A target that ignores lock requests, for hosts without page scroll.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScrollLock;

impl ScrollLockTarget for NoScrollLock {
    fn set_scroll_locked(&mut self, _locked: bool) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{ScrollLock, ScrollLockTarget};
    use std::sync::{Arc, Mutex};

    /// Records every call the lock makes to the host.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingLock(pub Arc<Mutex<Vec<bool>>>);

    impl ScrollLockTarget for RecordingLock {
        fn set_scroll_locked(&mut self, locked: bool) {
            self.0.lock().unwrap().push(locked);
        }
    }

    #[test]
    fn only_transitions_reach_the_host() {
        let calls = RecordingLock::default();
        let mut lock = ScrollLock::new(Box::new(calls.clone()));
        assert!(lock.acquire());
        assert!(!lock.acquire());
        assert!(lock.is_held());
        assert!(lock.release());
        assert!(!lock.release());
        assert_eq!(*calls.0.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn drop_always_unlocks() {
        let calls = RecordingLock::default();
        {
            let mut lock = ScrollLock::new(Box::new(calls.clone()));
            lock.acquire();
        }
        assert_eq!(*calls.0.lock().unwrap(), vec![true, false]);

        let calls = RecordingLock::default();
        drop(ScrollLock::new(Box::new(calls.clone())));
        assert_eq!(*calls.0.lock().unwrap(), vec![false]);
    }
}
