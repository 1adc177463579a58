use std::fmt;

use tokio::sync::broadcast;

const FEED_CAPACITY: usize = 64;

/// Which of the two persisted entities changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    PlayersUpdated,
    MappingUpdated,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::PlayersUpdated => write!(f, "players-updated"),
            ChangeKind::MappingUpdated => write!(f, "mapping-updated"),
        }
    }
}

/// In-process change bus with at-least-once delivery.
///
/// Consumers must be idempotent: every wakeup means "reload both entities
/// from the store and re-render", never an incremental patch, so duplicate,
/// reordered, or spurious deliveries are harmless. A receiver that lags
/// behind the buffer should treat the lag itself as a change signal.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeKind>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeKind> {
        self.tx.subscribe()
    }

    /// Publishing with no subscribers is a no-op, not an error: one-shot
    /// commands mutate and exit without anyone listening.
    pub fn publish(&self, kind: ChangeKind) {
        let delivered = self.tx.send(kind).unwrap_or(0);
        log::debug!("change feed: {} → {} subscriber(s)", kind, delivered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let feed = ChangeFeed::new();
        let mut first = feed.subscribe();
        let mut second = feed.subscribe();

        feed.publish(ChangeKind::PlayersUpdated);
        feed.publish(ChangeKind::MappingUpdated);

        assert_eq!(first.recv().await.unwrap(), ChangeKind::PlayersUpdated);
        assert_eq!(first.recv().await.unwrap(), ChangeKind::MappingUpdated);
        assert_eq!(second.recv().await.unwrap(), ChangeKind::PlayersUpdated);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let feed = ChangeFeed::new();
        feed.publish(ChangeKind::PlayersUpdated);
    }

    #[test]
    fn change_kinds_render_their_wire_names() {
        assert_eq!(ChangeKind::PlayersUpdated.to_string(), "players-updated");
        assert_eq!(ChangeKind::MappingUpdated.to_string(), "mapping-updated");
    }
}
