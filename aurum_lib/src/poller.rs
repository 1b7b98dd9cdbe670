//! Periodic quote polling with explicit teardown.
//!
//! [`QuotePoller::spawn`] starts a task that runs one fetch cycle per tick
//! and publishes a [`FetchState`] on a `watch` channel. The returned
//! [`PollerHandle`] owns the task: dropping it or calling
//! [`PollerHandle::shutdown`] aborts the task, including any request or
//! fallback delay still in flight, so nothing is published afterwards.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::fetcher::{FetchedQuote, QuoteFetcher};

/// Message published when a cycle dies outside the fetcher's contract.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Latest result seen by the consumer. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// A cycle is in progress.
    Loading,
    /// The most recent cycle produced a quote.
    Data(FetchedQuote),
    /// The most recent cycle crashed.
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&FetchedQuote> {
        match self {
            FetchState::Data(fetched) => Some(fetched),
            _ => None,
        }
    }
}

/// Spawns polling loops.
pub struct QuotePoller;

impl QuotePoller {
    /// Starts polling `fetcher` every `interval`. The first cycle runs
    /// immediately. Must be called inside a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero; [`FeedConfig::validate`](crate::FeedConfig::validate)
    /// rejects such configs.
    pub fn spawn(fetcher: Arc<QuoteFetcher>, interval: Duration) -> PollerHandle {
        Self::spawn_cycle(
            move || {
                let fetcher = Arc::clone(&fetcher);
                async move { fetcher.fetch().await }
            },
            interval,
        )
    }

    /// Starts polling with an arbitrary cycle. `cycle` is called once per
    /// tick and each returned future runs in its own task.
    fn spawn_cycle<C, Fut>(cycle: C, interval: Duration) -> PollerHandle
    where
        C: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = FetchedQuote> + Send + 'static,
    {
        let (tx, rx) = watch::channel(FetchState::Loading);
        let refresh = Arc::new(Notify::new());
        let task = tokio::spawn(run(cycle, interval, tx, Arc::clone(&refresh)));
        PollerHandle {
            state: rx,
            refresh,
            task,
        }
    }
}

/// Owner of a running poller. Dropping it stops the poller.
pub struct PollerHandle {
    state: watch::Receiver<FetchState>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Snapshot of the latest state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.clone()
    }

    /// Runs a cycle now instead of waiting for the next tick. A request made
    /// while a cycle is running starts another one right after it.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the poller and waits until the task has exited.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        tracing::debug!("Quote poller stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Aborts a spawned cycle when the polling task itself is aborted.
struct CycleGuard(JoinHandle<FetchedQuote>);

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn run<C, Fut>(
    cycle: C,
    interval: Duration,
    tx: watch::Sender<FetchState>,
    refresh: Arc<Notify>,
) where
    C: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = FetchedQuote> + Send + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => ticker.reset(),
        }

        tx.send_replace(FetchState::Loading);
        tracing::debug!("Quote cycle started");

        // Each cycle runs in its own task so a panic is contained to the cycle.
        let mut guard = CycleGuard(tokio::spawn(cycle()));

        let next = match (&mut guard.0).await {
            Ok(fetched) => FetchState::Data(fetched),
            Err(e) if e.is_panic() => {
                tracing::error!("Quote cycle panicked: {}", e);
                FetchState::Error(FETCH_FAILED_MESSAGE.to_string())
            }
            Err(_) => return,
        };
        tx.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn offline_fetcher() -> Arc<QuoteFetcher> {
        let config = FeedConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            fallback_delay: Duration::ZERO,
            ..FeedConfig::default()
        };
        Arc::new(QuoteFetcher::new(&config).unwrap().with_seed(9))
    }

    async fn next_data(rx: &mut watch::Receiver<FetchState>) -> FetchedQuote {
        loop {
            rx.changed().await.unwrap();
            if let Some(fetched) = rx.borrow_and_update().data() {
                return fetched.clone();
            }
        }
    }

    #[tokio::test]
    async fn starts_loading_then_publishes_data() {
        let handle = QuotePoller::spawn(offline_fetcher(), Duration::from_secs(3600));
        let mut rx = handle.subscribe();
        let fetched = tokio::time::timeout(Duration::from_secs(5), next_data(&mut rx))
            .await
            .unwrap();
        assert!((2391.0..=2395.0).contains(&fetched.quote.price));
        assert!(handle.state().data().is_some());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn refresh_runs_extra_cycle() {
        let handle = QuotePoller::spawn(offline_fetcher(), Duration::from_secs(3600));
        let mut rx = handle.subscribe();
        let first = tokio::time::timeout(Duration::from_secs(5), next_data(&mut rx))
            .await
            .unwrap();

        // The hourly tick is far away, so a second quote can only come from refresh().
        handle.refresh();
        let second = tokio::time::timeout(Duration::from_secs(5), next_data(&mut rx))
            .await
            .unwrap();
        assert!(second.quote.timestamp >= first.quote.timestamp);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_stops_task() {
        let handle = QuotePoller::spawn(offline_fetcher(), Duration::from_millis(20));
        assert!(handle.is_running());
        let mut rx = handle.subscribe();
        handle.shutdown().await;
        // Sender dropped with the task.
        while rx.changed().await.is_ok() {}
        assert!(rx.has_changed().is_err());
    }

    #[tokio::test]
    async fn panicking_cycle_publishes_error_and_keeps_polling() {
        let fetcher = offline_fetcher();
        let calls = Arc::new(AtomicUsize::new(0));
        let cycle_calls = Arc::clone(&calls);
        let handle = QuotePoller::spawn_cycle(
            move || {
                let fetcher = Arc::clone(&fetcher);
                let first = cycle_calls.fetch_add(1, Ordering::SeqCst) == 0;
                async move {
                    if first {
                        panic!("cycle failed");
                    }
                    fetcher.fetch().await
                }
            },
            Duration::from_secs(3600),
        );
        let mut rx = handle.subscribe();

        let failed = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                rx.changed().await.unwrap();
                let state = rx.borrow_and_update().clone();
                if !state.is_loading() {
                    return state;
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(failed, FetchState::Error(FETCH_FAILED_MESSAGE.to_string()));
        assert!(handle.is_running());

        handle.refresh();
        let fetched = tokio::time::timeout(Duration::from_secs(5), next_data(&mut rx))
            .await
            .unwrap();
        assert!((2391.0..=2395.0).contains(&fetched.quote.price));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        handle.shutdown().await;
    }

    #[test]
    fn fetch_state_accessors() {
        assert!(FetchState::Loading.is_loading());
        assert!(FetchState::Error(FETCH_FAILED_MESSAGE.to_string()).data().is_none());
    }
}
