//! Snapshot subscriptions
//!
//! The HTTP API has no push channel, so list freshness is modelled as an explicit
//! subscription: a [`Subscription`] describes what to watch, and every call to
//! [`Subscription::stream`] starts an independent, lazy stream of snapshots.
//! Nothing is fetched until the stream is polled, and dropping the stream is the
//! unsubscribe. A snapshot is emitted first on start and afterwards only when it
//! differs from the last one delivered.

use std::sync::Arc;
use std::time::Duration;
use async_stream::stream;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};
use crate::backend::ChatBackend;
use crate::models::{Group, GroupId, Message};
use crate::utils::errors::BackendResult;

/// Shortest poll period; `tokio::time::interval` rejects zero
const MIN_INTERVAL: Duration = Duration::from_millis(1);

type Fetch<T> = Arc<dyn Fn() -> BoxFuture<'static, BackendResult<T>> + Send + Sync>;

/// Restartable description of a watched backend query
pub struct Subscription<T> {
    name: String,
    fetch: Fetch<T>,
    interval: Duration,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fetch: Arc::clone(&self.fetch),
            interval: self.interval,
        }
    }
}

impl<T> Subscription<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    pub fn new<F>(name: impl Into<String>, interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, BackendResult<T>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fetch: Arc::new(fetch),
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Start a fresh snapshot stream
    ///
    /// Fetch errors are yielded as items and the stream keeps polling; the first
    /// successful snapshot after an error is always delivered.
    pub fn stream(&self) -> BoxStream<'static, BackendResult<T>> {
        let fetch = Arc::clone(&self.fetch);
        let interval = self.interval;
        let name = self.name.clone();

        Box::pin(stream! {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<T> = None;

            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(snapshot) => {
                        if last.as_ref() != Some(&snapshot) {
                            debug!(subscription = %name, "Delivering new snapshot");
                            last = Some(snapshot.clone());
                            yield Ok(snapshot);
                        }
                    }
                    Err(e) => {
                        warn!(subscription = %name, error = %e, "Snapshot fetch failed");
                        last = None;
                        yield Err(e);
                    }
                }
            }
        })
    }
}

/// Watch the message list of one group
pub fn watch_messages(
    backend: Arc<dyn ChatBackend>,
    group_id: GroupId,
    interval: Duration,
) -> Subscription<Vec<Message>> {
    let name = format!("messages:{}", group_id);
    Subscription::new(name, interval, move || {
        let backend = Arc::clone(&backend);
        let group_id = group_id.clone();
        Box::pin(async move { backend.get_messages(&group_id).await })
    })
}

/// Watch the group directory
pub fn watch_groups(backend: Arc<dyn ChatBackend>, interval: Duration) -> Subscription<Vec<Group>> {
    Subscription::new("groups", interval, move || {
        let backend = Arc::clone(&backend);
        Box::pin(async move { backend.list_groups().await })
    })
}
