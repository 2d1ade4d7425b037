use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::Stream;

/// Single-slot cell that replays its current value to new subscribers.
///
/// Holds `None` until the first commit.
pub struct LatestChannel<T> {
    sender: watch::Sender<Option<T>>,
}

impl<T: Clone + Send + Sync + 'static> LatestChannel<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Replace the current value and wake every subscriber.
    pub fn commit(&self, value: T) {
        self.sender.send_replace(Some(value));
    }

    pub fn latest(&self) -> Option<T> {
        self.sender.borrow().clone()
    }

    /// The receiver starts out holding the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.sender.subscribe()
    }

    /// Stream that yields the current value first, then every commit.
    pub fn stream(&self) -> impl Stream<Item = Option<T>> {
        WatchStream::new(self.sender.subscribe())
    }
}

impl<T: Clone + Send + Sync + 'static> Default for LatestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[test]
    fn empty_before_first_commit() {
        let channel: LatestChannel<u32> = LatestChannel::new();
        assert_eq!(channel.latest(), None);
        assert_eq!(*channel.subscribe().borrow(), None);
    }

    #[test]
    fn late_subscriber_sees_committed_value() {
        let channel = LatestChannel::new();
        channel.commit(5u32);
        channel.commit(6u32);

        let rx = channel.subscribe();
        assert_eq!(*rx.borrow(), Some(6));
        assert_eq!(channel.latest(), Some(6));
    }

    #[tokio::test]
    async fn subscriber_is_woken_by_commit() {
        let channel = LatestChannel::new();
        let mut rx = channel.subscribe();

        channel.commit(1u32);

        rx.changed().await.expect("changed");
        assert_eq!(*rx.borrow_and_update(), Some(1));
    }

    #[tokio::test]
    async fn stream_replays_current_value_first() {
        let channel = LatestChannel::new();
        channel.commit(9u32);

        let mut stream = Box::pin(channel.stream());
        assert_eq!(stream.next().await, Some(Some(9)));

        channel.commit(10u32);
        assert_eq!(stream.next().await, Some(Some(10)));
    }
}
