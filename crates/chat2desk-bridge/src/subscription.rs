//! Cancellable handle over one stream consumer task

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// A running stream consumer
///
/// Cancellation is immediate from the caller's point of view: the task is
/// aborted and any event it was delivering is not waited for.
pub struct Subscription {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Spawn `consumer` on the current Tokio runtime
    pub fn spawn<F>(name: &'static str, consumer: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!("Starting {} subscription", name);
        Self {
            name,
            handle: tokio::spawn(consumer),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Abort the consumer
    pub fn cancel(&self) {
        debug!("Cancelling {} subscription", self.name);
        self.handle.abort();
    }

    /// True once the consumer returned, failed, or was cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("Auto-cancelling {} subscription on drop", self.name);
            self.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    #[tokio::test]
    async fn cancel_stops_the_consumer() {
        let subscription = Subscription::spawn("test", async {
            sleep(Duration::from_secs(10)).await;
        });
        assert!(!subscription.is_finished());

        subscription.cancel();

        sleep(Duration::from_millis(10)).await;
        assert!(subscription.is_finished());
    }

    #[tokio::test]
    async fn drop_cancels() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let subscription = Subscription::spawn("test", async move {
            let _tx = tx;
            sleep(Duration::from_secs(10)).await;
        });
        drop(subscription);

        // the sender is dropped with the aborted task
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn finished_consumer_reports_finished() {
        let subscription = Subscription::spawn("test", async {});
        sleep(Duration::from_millis(10)).await;
        assert!(subscription.is_finished());
        assert_eq!(subscription.name(), "test");
    }
}
