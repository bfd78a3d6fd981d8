//! Shot notification channels
//!
//! Two ordered subscriber lists: `on_shot_fired` runs first for listeners that
//! must react before anything else (recoil, camera kick), then
//! `on_shot_processed` for everyone else. Both run synchronously in
//! registration order.

use crate::hooks::ShotEvent;

type Listener = Box<dyn FnMut(&ShotEvent)>;

/// Returned by subscribe calls so a listener can be removed later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct ShotObservers {
    fired: Vec<(SubscriptionId, Listener)>,
    processed: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl ShotObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the first (pre) pass
    pub fn on_shot_fired(&mut self, listener: impl FnMut(&ShotEvent) + 'static) -> SubscriptionId {
        let id = self.allocate();
        self.fired.push((id, Box::new(listener)));
        id
    }

    /// Subscribe to the second (post) pass
    pub fn on_shot_processed(
        &mut self,
        listener: impl FnMut(&ShotEvent) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate();
        self.processed.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener from whichever pass it joined
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.len();
        self.fired.retain(|(sub, _)| *sub != id);
        self.processed.retain(|(sub, _)| *sub != id);
        self.len() != before
    }

    pub fn notify(&mut self, event: &ShotEvent) {
        for (_, listener) in &mut self.fired {
            listener(event);
        }
        for (_, listener) in &mut self.processed {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.fired.len() + self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }
}

impl std::fmt::Debug for ShotObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShotObservers")
            .field("fired", &self.fired.len())
            .field("processed", &self.processed.len())
            .finish()
    }
}
