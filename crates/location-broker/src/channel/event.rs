use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

/// Upper bound on per-receiver buffering; larger requests are clamped.
pub const MAX_EVENT_CAPACITY: usize = 1 << 16;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Stateless broadcast of published values.
///
/// Receivers only see values published after they subscribe. Slow
/// receivers lag and lose the oldest values instead of blocking publish.
/// Observers registered with [`EventChannel::observe`] run inline at the
/// publish site, before `publish` returns.
pub struct EventChannel<T> {
    sender: broadcast::Sender<T>,
    observers: RwLock<Vec<Observer<T>>>,
}

impl<T: Clone + Send + 'static> EventChannel<T> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_EVENT_CAPACITY));
        Self {
            sender,
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Subscribe as a stream; lagged gaps are skipped.
    pub fn stream(&self) -> impl Stream<Item = T> {
        BroadcastStream::new(self.sender.subscribe()).filter_map(|message| message.ok())
    }

    /// Register an inline observer.
    ///
    /// Observers must return quickly. A panicking observer is logged and
    /// does not stop delivery to the others.
    pub fn observe<F>(&self, observer: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.observers.write().push(Arc::new(observer));
    }

    /// Deliver `value` to every observer and receiver attached right now.
    ///
    /// Returns the number of async receivers that were sent the value.
    pub fn publish(&self, value: T) -> usize {
        let observers = self.observers.read().clone();
        for observer in &observers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer(&value)));
            if outcome.is_err() {
                tracing::error!("event channel observer panicked");
            }
        }
        self.sender.send(value).unwrap_or(0)
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
