//! Query layer: generation-guarded result slots for polled and one-shot views.
//!
//! Every view owns one [`QuerySlot`] per independent query. A fetch takes a
//! [`Ticket`] from [`QuerySlot::begin`] and hands its result back through
//! [`QuerySlot::complete`]; results whose ticket has been superseded by a
//! newer `begin` are dropped, so overlapping in-flight requests can finish
//! in any order without an older answer overwriting a newer one.

pub mod gates;
pub mod poll;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;
use futures_util::stream::{self, LocalBoxStream, StreamExt};

use crate::error::DashboardError;
use crate::http::RetryPolicy;

pub use gates::GateBoard;

/// A failed fetch as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// Backend status code, `None` for transport or local failures.
    pub status: Option<u16>,
    pub message: String,
}

impl QueryError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<&DashboardError> for QueryError {
    fn from(e: &DashboardError) -> Self {
        Self::new(e.status(), e.to_string())
    }
}

impl From<DashboardError> for QueryError {
    fn from(e: DashboardError) -> Self {
        Self::from(&e)
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

/// What a view renders for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Never started.
    Idle,
    /// First fetch for the current key in flight; nothing to show yet.
    Loading,
    Ready(T),
    /// The last refresh failed; `value` is the last good result.
    Stale { value: T, error: QueryError },
    /// Failed with no earlier value for this key.
    Failed(QueryError),
    /// A one-shot query failed. Distinct from an empty result.
    Unavailable(QueryError),
}

impl<T> QueryState<T> {
    /// The value to display, fresh or stale.
    pub fn value(&self) -> Option<&T> {
        match self {
            QueryState::Ready(v) | QueryState::Stale { value: v, .. } => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            QueryState::Stale { error, .. }
            | QueryState::Failed(error)
            | QueryState::Unavailable(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, QueryState::Unavailable(_))
    }
}

/// Scheduling and failure policy of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Refresh interval. `None` fetches once.
    pub interval: Option<Duration>,
    pub retry: RetryPolicy,
    /// Failures surface as [`QueryState::Unavailable`] instead of serving
    /// the last value.
    pub one_shot: bool,
}

impl QueryOptions {
    /// Status, gates and positions.
    pub fn polled(interval: Duration, retry: RetryPolicy) -> Self {
        Self {
            interval: Some(interval),
            retry,
            one_shot: false,
        }
    }

    /// Settings and audit: fetched once, never retried.
    pub fn one_shot() -> Self {
        Self {
            interval: None,
            retry: RetryPolicy::None,
            one_shot: true,
        }
    }

    /// Fetched on demand (trade pages), serving stale data on failure.
    pub fn on_demand() -> Self {
        Self {
            interval: None,
            retry: RetryPolicy::None,
            one_shot: false,
        }
    }

    /// When to refresh: every `interval` for polled queries, once otherwise.
    /// The first tick is immediate.
    pub fn ticks(&self) -> LocalBoxStream<'static, u64> {
        match self.interval {
            Some(interval) => poll::ticks(interval).boxed_local(),
            None => stream::once(async { 0 }).boxed_local(),
        }
    }
}

/// Claim on the next result of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    generation: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct SlotInner<K, T> {
    key: Option<K>,
    generation: u64,
    state: QueryState<T>,
}

/// One query's result slot, keyed by its request parameters.
///
/// Cloning shares the slot. All writes happen in a single locked step, so
/// readers never observe a partially applied result.
#[derive(Debug)]
pub struct QuerySlot<K, T> {
    inner: Arc<RwLock<SlotInner<K, T>>>,
    options: QueryOptions,
}

impl<K, T> Clone for QuerySlot<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            options: self.options.clone(),
        }
    }
}

impl<K, T> QuerySlot<K, T>
where
    K: Clone + PartialEq,
    T: Clone,
{
    pub fn new(options: &QueryOptions) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SlotInner {
                key: None,
                generation: 0,
                state: QueryState::Idle,
            })),
            options: options.clone(),
        }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Start a fetch for `key`.
    ///
    /// A different key than the previous one resets the slot to `Loading`;
    /// the same key keeps the current value visible while revalidating.
    pub async fn begin(&self, key: K) -> Ticket<K> {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        if inner.key.as_ref() != Some(&key) {
            inner.key = Some(key.clone());
            inner.state = QueryState::Loading;
        } else if matches!(inner.state, QueryState::Idle) {
            inner.state = QueryState::Loading;
        }
        Ticket {
            generation: inner.generation,
            key,
        }
    }

    /// Apply a result. Returns `false` if `ticket` was superseded and the
    /// result was dropped.
    pub async fn complete(&self, ticket: Ticket<K>, result: Result<T, QueryError>) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.generation != inner.generation {
            return false;
        }

        let previous = std::mem::replace(&mut inner.state, QueryState::Idle);
        inner.state = match result {
            Ok(value) => QueryState::Ready(value),
            Err(error) if self.options.one_shot => QueryState::Unavailable(error),
            Err(error) => match previous {
                QueryState::Ready(value) | QueryState::Stale { value, .. } => {
                    QueryState::Stale { value, error }
                }
                _ => QueryState::Failed(error),
            },
        };
        true
    }

    /// Run `fetch` for `key` with the slot's retry policy and apply its
    /// result.
    ///
    /// Returns `false` when a newer fetch superseded this one.
    pub async fn fetch<F, Fut>(&self, key: K, fetch: F) -> bool
    where
        F: FnOnce(K, RetryPolicy) -> Fut,
        Fut: Future<Output = Result<T, DashboardError>>,
    {
        let ticket = self.begin(key.clone()).await;
        let result = fetch(key, self.options.retry.clone()).await.map_err(|e| {
            tracing::warn!(error = %e, "query fetch failed");
            QueryError::from(e)
        });
        self.complete(ticket, result).await
    }

    pub async fn state(&self) -> QueryState<T> {
        self.inner.read().await.state.clone()
    }

    pub async fn key(&self) -> Option<K> {
        self.inner.read().await.key.clone()
    }

    /// Back to `Idle`, invalidating any fetch in flight.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.key = None;
        inner.state = QueryState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn err(status: u16) -> QueryError {
        QueryError::new(Some(status), "boom")
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        block_on(async {
            let slot: QuerySlot<&str, u32> = QuerySlot::new(&QueryOptions::on_demand());
            let old = slot.begin("pair=EUR_USD").await;
            let new = slot.begin("pair=GBP_USD").await;

            assert!(slot.complete(new, Ok(2)).await);
            assert!(!slot.complete(old, Ok(1)).await);
            assert_eq!(slot.state().await, QueryState::Ready(2));
            assert_eq!(slot.key().await, Some("pair=GBP_USD"));
        });
    }

    #[test]
    fn test_late_old_result_after_new_applied() {
        block_on(async {
            let slot: QuerySlot<u8, &str> = QuerySlot::new(&QueryOptions::on_demand());
            let first = slot.begin(1).await;
            let second = slot.begin(2).await;
            assert!(!slot.complete(first, Ok("one")).await);
            assert_eq!(slot.state().await, QueryState::Loading);
            assert!(slot.complete(second, Ok("two")).await);
            assert_eq!(slot.state().await.value(), Some(&"two"));
        });
    }

    #[test]
    fn test_stale_while_revalidate() {
        block_on(async {
            let slot: QuerySlot<(), u32> =
                QuerySlot::new(&QueryOptions::polled(Duration::from_secs(3), RetryPolicy::None));
            let t = slot.begin(()).await;
            slot.complete(t, Ok(7)).await;

            let t = slot.begin(()).await;
            assert_eq!(slot.state().await, QueryState::Ready(7));
            slot.complete(t, Err(err(503))).await;
            assert_eq!(
                slot.state().await,
                QueryState::Stale {
                    value: 7,
                    error: err(503)
                }
            );

            let t = slot.begin(()).await;
            slot.complete(t, Err(err(502))).await;
            assert_eq!(slot.state().await.value(), Some(&7));
        });
    }

    #[test]
    fn test_failure_without_value() {
        block_on(async {
            let slot: QuerySlot<(), u32> = QuerySlot::new(&QueryOptions::on_demand());
            let t = slot.begin(()).await;
            slot.complete(t, Err(err(500))).await;
            assert_eq!(slot.state().await, QueryState::Failed(err(500)));
        });
    }

    #[test]
    fn test_one_shot_failure_is_unavailable() {
        block_on(async {
            let slot: QuerySlot<(), Vec<u32>> = QuerySlot::new(&QueryOptions::one_shot());
            let t = slot.begin(()).await;
            slot.complete(t, Ok(vec![])).await;
            assert_eq!(slot.state().await, QueryState::Ready(vec![]));

            let t = slot.begin(()).await;
            slot.complete(t, Err(err(403))).await;
            let state = slot.state().await;
            assert!(state.is_unavailable());
            assert_eq!(state.value(), None);
        });
    }

    #[test]
    fn test_key_change_resets_to_loading() {
        block_on(async {
            let slot: QuerySlot<u8, u32> = QuerySlot::new(&QueryOptions::on_demand());
            let t = slot.begin(1).await;
            slot.complete(t, Ok(10)).await;
            slot.begin(2).await;
            assert_eq!(slot.state().await, QueryState::Loading);
        });
    }

    #[test]
    fn test_fetch_maps_errors() {
        block_on(async {
            let slot: QuerySlot<(), u32> = QuerySlot::new(&QueryOptions::one_shot());
            let applied = slot
                .fetch((), |_, _| async { Err(DashboardError::Other("offline".into())) })
                .await;
            assert!(applied);
            assert_eq!(
                slot.state().await,
                QueryState::Unavailable(QueryError::new(None, "offline"))
            );
        });
    }

    #[test]
    fn test_reset_drops_in_flight() {
        block_on(async {
            let slot: QuerySlot<(), u32> = QuerySlot::new(&QueryOptions::on_demand());
            let t = slot.begin(()).await;
            slot.reset().await;
            assert!(!slot.complete(t, Ok(1)).await);
            assert_eq!(slot.state().await, QueryState::Idle);
        });
    }

    #[test]
    fn test_fetch_hands_over_slot_retry() {
        block_on(async {
            let options = QueryOptions::polled(Duration::from_secs(3), RetryPolicy::Idempotent);
            let slot: QuerySlot<(), u32> = QuerySlot::new(&options);
            assert_eq!(slot.options(), &options);
            slot.fetch((), |_, retry| async move {
                assert_eq!(retry, RetryPolicy::Idempotent);
                Ok(1)
            })
            .await;
            assert_eq!(slot.state().await, QueryState::Ready(1));
        });
    }

    #[test]
    fn test_one_shot_ticks_once() {
        block_on(async {
            let ticks: Vec<u64> = QueryOptions::one_shot().ticks().collect().await;
            assert_eq!(ticks, vec![0]);
        });
    }

    #[tokio::test]
    async fn test_polled_ticks_follow_interval() {
        let options = QueryOptions::polled(Duration::from_millis(10), RetryPolicy::None);
        let ticks: Vec<u64> = options.ticks().take(3).collect().await;
        assert_eq!(ticks, vec![0, 1, 2]);
    }
}
