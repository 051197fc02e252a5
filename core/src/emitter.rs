//! One-shot notification channel.
//!
//! An [`EffectEmitter`] carries transient UI notifications (toasts, error
//! popups) out of a store. It is a thin wrapper over a tokio broadcast
//! channel:
//!
//! - every subscriber receives each notification at most once
//! - nothing is retained for late subscribers
//! - a notification emitted while nobody listens is dropped
//!
//! State, by contrast, lives behind the store's watch channel and survives
//! re-subscription.

use futures::Stream;
use tokio::sync::broadcast;

/// Fire-and-forget multicast sender for one-shot notifications
#[derive(Debug)]
pub struct EffectEmitter<T> {
    sender: broadcast::Sender<T>,
}

impl<T> EffectEmitter<T>
where
    T: Clone + Send + 'static,
{
    /// Create an emitter buffering up to `capacity` undelivered notifications
    /// per subscriber
    ///
    /// A zero capacity is bumped to one, since tokio rejects empty channels.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a notification to every current subscriber
    ///
    /// Returns the number of subscribers that will see it. Zero means the
    /// notification was dropped.
    pub fn emit(&self, value: T) -> usize {
        if let Ok(receivers) = self.sender.send(value) {
            tracing::trace!(receivers, "Notification emitted");
            receivers
        } else {
            tracing::debug!("Notification dropped: no subscribers");
            0
        }
    }

    /// Subscribe to notifications emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Subscribe and expose the notifications as a [`Stream`]
    ///
    /// The stream ends when the emitter and all its clones are dropped.
    /// A lagging consumer skips the overwritten notifications and keeps going.
    pub fn stream(&self) -> impl Stream<Item = T> + Send + 'static {
        let mut rx = self.subscribe();
        async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok(value) => yield value,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Notification subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

impl<T> Clone for EffectEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Default for EffectEmitter<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(16)
    }
}
