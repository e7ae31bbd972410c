use tracing::trace;

/// Identity of the last rendered result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    pub generation: u64,
    pub index: usize,
}

/// Fires a "load more" once each time the sentinel scrolls into view.
///
/// The observation is keyed on the sentinel and on whether loading is
/// currently allowed. When either changes the old observation is dropped
/// and a fresh one starts, so a sentinel that is already on screen fires
/// again once a new page makes it the new last row.
#[derive(Debug, Default)]
pub struct ScrollTrigger {
    observed: Option<(Sentinel, bool)>,
    intersecting: bool,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to `sentinel`. No-op if nothing changed.
    pub fn observe(&mut self, sentinel: Option<Sentinel>, armed: bool) {
        let next = sentinel.map(|s| (s, armed));
        if self.observed != next {
            trace!(?next, "sentinel observation changed");
            self.observed = next;
            self.intersecting = false;
        }
    }

    /// Feed the current visibility. Returns true when a page should load.
    pub fn report(&mut self, visible: bool) -> bool {
        let Some((_, armed)) = self.observed else {
            return false;
        };
        let entered = visible && !self.intersecting;
        self.intersecting = visible;
        entered && armed
    }

    pub fn disconnect(&mut self) {
        self.observed = None;
        self.intersecting = false;
    }

    pub fn is_observing(&self) -> bool {
        self.observed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel(index: usize) -> Option<Sentinel> {
        Some(Sentinel {
            generation: 1,
            index,
        })
    }

    #[test]
    fn inert_without_sentinel() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(None, true);
        assert!(!trigger.report(true));
        assert!(!trigger.is_observing());
    }

    #[test]
    fn fires_once_per_intersection() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(9), true);

        assert!(!trigger.report(false));
        assert!(trigger.report(true));
        assert!(!trigger.report(true));
        assert!(!trigger.report(true));

        assert!(!trigger.report(false));
        assert!(trigger.report(true));
    }

    #[test]
    fn never_fires_when_disarmed() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(9), false);
        assert!(!trigger.report(true));
        assert!(!trigger.report(false));
        assert!(!trigger.report(true));
    }

    #[test]
    fn new_sentinel_resubscribes() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(9), true);
        assert!(trigger.report(true));

        trigger.observe(sentinel(19), true);
        assert!(trigger.report(true));
    }

    #[test]
    fn same_observation_does_not_refire() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(9), true);
        assert!(trigger.report(true));

        trigger.observe(sentinel(9), true);
        assert!(!trigger.report(true));
    }

    #[test]
    fn rearming_on_screen_sentinel_fires() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(9), false);
        assert!(!trigger.report(true));

        trigger.observe(sentinel(9), true);
        assert!(trigger.report(true));
    }

    #[test]
    fn new_generation_is_a_new_sentinel() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(9), true);
        assert!(trigger.report(true));

        trigger.observe(
            Some(Sentinel {
                generation: 2,
                index: 9,
            }),
            true,
        );
        assert!(trigger.report(true));
    }

    #[test]
    fn disconnect_goes_inert() {
        let mut trigger = ScrollTrigger::new();
        trigger.observe(sentinel(3), true);
        trigger.disconnect();
        assert!(!trigger.report(true));
    }
}
