use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;

use crate::application::ExchangeEvent;

/// Broadcast-based event publisher
///
/// Uses a tokio broadcast channel so any number of subscribers can follow
/// the exchange. Sending with nobody listening is not an error.
pub struct BroadcastEventPublisher {
    tx: broadcast::Sender<ExchangeEvent>,
    /// Total events handed to the channel
    published: Arc<AtomicUsize>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));

        BroadcastEventPublisher {
            tx,
            published: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExchangeEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: ExchangeEvent) {
        self.published.fetch_add(1, Ordering::Relaxed);
        // Ignore send errors (no subscribers)
        let _ = self.tx.send(event);
    }

    pub fn publish_all(&self, events: impl IntoIterator<Item = ExchangeEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn published_count(&self) -> usize {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Clone for BroadcastEventPublisher {
    fn clone(&self) -> Self {
        BroadcastEventPublisher {
            tx: self.tx.clone(),
            published: Arc::clone(&self.published),
        }
    }
}
