// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{Mutex, PoisonError};

use smol::channel::{self, Receiver, Sender, TrySendError};

/// Fan-out point between one publisher and any number of subscribers
///
/// Each subscriber owns an unbounded channel, so a slow consumer only grows
/// its own queue and never holds the publisher back.
pub struct Hub<T> {
    subscribers: Mutex<Vec<Sender<T>>>,
}

impl<T: Clone> Hub<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a new subscriber, which receives every event published from now on
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = channel::unbounded();
        self.lock().push(tx);
        rx
    }

    /// Hands `event` to every live subscriber, dropping the ones that went away
    pub fn publish(&self, event: T) {
        let mut subscribers = self.lock();
        let before = subscribers.len();

        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Closed(_)) => false,
            // unbounded channels are never full
            Err(TrySendError::Full(_)) => true,
        });

        let pruned = before - subscribers.len();
        if pruned > 0 {
            log::debug!("dropped {pruned} closed subscriber(s)");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for Hub<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &Receiver<u32>) -> Vec<u32> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn every_subscriber_sees_events_in_order() {
        let hub = Hub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();

        for n in 1..=3 {
            hub.publish(n);
        }

        assert_eq!(drain(&first), vec![1, 2, 3]);
        assert_eq!(drain(&second), vec![1, 2, 3]);
    }

    #[test]
    fn late_subscriber_only_sees_later_events() {
        let hub = Hub::new();
        hub.publish(1);
        let late = hub.subscribe();
        hub.publish(2);

        assert_eq!(drain(&late), vec![2]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let hub = Hub::new();
        let kept = hub.subscribe();
        drop(hub.subscribe());
        assert_eq!(hub.subscriber_count(), 2);

        hub.publish(7);

        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(drain(&kept), vec![7]);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let hub: Hub<u32> = Hub::default();
        hub.publish(1);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
