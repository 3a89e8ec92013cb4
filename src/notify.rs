use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::Event;

const CHANNEL_CAPACITY: usize = 256;

/// Outbound event sink. Best-effort by contract: a failure to deliver
/// never rolls back the booking or loan decision that produced the event.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &Event);
}

/// In-process broadcast hub, one channel per topic (space or asset id).
pub struct NotifyHub {
    channels: DashMap<String, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to events for a topic. Creates the channel if needed.
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send an event to a topic. No-op if nobody is listening.
    pub fn send(&self, topic: &str, event: &Event) {
        if let Some(sender) = self.channels.get(topic) {
            let _ = sender.send(event.clone());
        }
    }

    /// Remove a channel (e.g. when a space is deleted from the config).
    pub fn remove(&self, topic: &str) {
        self.channels.remove(topic);
    }
}

impl Notifier for NotifyHub {
    fn notify(&self, event: &Event) {
        self.send(event.topic(), event);
    }
}
