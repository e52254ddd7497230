//! Debounced autocomplete queries.
//!
//! Each keystroke calls [`DebouncedQuery::query`]. Queries shorter than the
//! configured minimum resolve to an empty list without touching the source.
//! With a settle delay, only the last query of a burst reaches the source;
//! the earlier callers are told their request was superseded.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use stationcal_common::services::SuggestionSource;
use stationcal_config::AutocompleteConfig;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::QueryError;

/// Tuning for a [`DebouncedQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Quiet period before a query is sent; zero sends immediately.
    pub settle_delay: Duration,
    /// Minimum trimmed length, in characters, of a query worth sending.
    pub min_query_length: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            min_query_length: 3,
        }
    }
}

impl From<&AutocompleteConfig> for QueryOptions {
    fn from(config: &AutocompleteConfig) -> Self {
        Self {
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            min_query_length: config.min_query_length,
        }
    }
}

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

type TimerSlot = Arc<Mutex<Option<PendingTimer>>>;

fn lock_slot(slot: &Mutex<Option<PendingTimer>>) -> MutexGuard<'_, Option<PendingTimer>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the slot if it still holds timer `generation`.
///
/// Returns `false` when a newer timer replaced this one in the meantime.
fn release_slot(slot: &Mutex<Option<PendingTimer>>, generation: u64) -> bool {
    let mut pending = lock_slot(slot);
    match pending.as_ref() {
        Some(timer) if timer.generation == generation => {
            *pending = None;
            true
        }
        _ => false,
    }
}

pub struct DebouncedQuery<T, S> {
    source: Arc<S>,
    options: QueryOptions,
    pending: TimerSlot,
    generation: AtomicU64,
    _suggestion: PhantomData<fn() -> T>,
}

impl<T, S> DebouncedQuery<T, S>
where
    T: Send + 'static,
    S: SuggestionSource<T> + 'static,
{
    pub fn new(source: Arc<S>, options: QueryOptions) -> Self {
        Self {
            source,
            options,
            pending: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
            _suggestion: PhantomData,
        }
    }

    pub fn from_config(source: Arc<S>, config: &AutocompleteConfig) -> Self {
        Self::new(source, QueryOptions::from(config))
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Whether a timer is waiting to fire.
    pub fn has_pending(&self) -> bool {
        lock_slot(&self.pending).is_some()
    }

    /// Resolves `text` to suggestions.
    ///
    /// The length check runs on the trimmed text, the source receives `text`
    /// as typed. A call replaced by a newer one before its timer fired
    /// resolves to [`QueryError::Superseded`]; a fetch already in flight is
    /// never cancelled.
    pub async fn query(&self, text: &str) -> Result<Vec<T>, QueryError<S::Error>> {
        let trimmed_len = text.trim().chars().count();
        if trimmed_len == 0 || trimmed_len < self.options.min_query_length {
            debug!(
                "Query '{}' below minimum length {}",
                text, self.options.min_query_length
            );
            if !self.options.settle_delay.is_zero() {
                self.cancel_pending();
            }
            return Ok(Vec::new());
        }

        if self.options.settle_delay.is_zero() {
            return self.source.get_suggestions(text).await.map_err(|e| {
                error!("Suggestion source failed for '{}': {}", text, e);
                QueryError::Source(e)
            });
        }

        let receiver = self.schedule(text.to_string());
        match receiver.await {
            Ok(result) => result.map_err(QueryError::Source),
            Err(_) => {
                debug!("Query '{}' superseded before it fired", text);
                Err(QueryError::Superseded)
            }
        }
    }

    /// Cancels the pending timer, if any. Calling it again is a no-op.
    pub fn dispose(&self) {
        self.cancel_pending();
    }

    fn cancel_pending(&self) {
        if let Some(timer) = lock_slot(&self.pending).take() {
            debug!("Cancelling pending query timer {}", timer.generation);
            timer.handle.abort();
        }
    }

    fn schedule(&self, query: String) -> oneshot::Receiver<Result<Vec<T>, S::Error>> {
        let (sender, receiver) = oneshot::channel();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let delay = self.options.settle_delay;
        let source = Arc::clone(&self.source);
        let slot = Arc::clone(&self.pending);

        // Held until the new timer is stored, so the task cannot observe the
        // slot before its own entry is in place.
        let mut pending = lock_slot(&self.pending);
        if let Some(previous) = pending.take() {
            previous.handle.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !release_slot(&slot, generation) {
                return;
            }

            debug!("Sending query '{}' after {:?}", query, delay);
            let result = source.get_suggestions(&query).await;
            if let Err(e) = &result {
                error!("Suggestion source failed for '{}': {}", query, e);
            }
            // The caller may have gone away; nobody is left to tell
            let _ = sender.send(result);
        });

        *pending = Some(PendingTimer { generation, handle });
        receiver
    }
}

impl<T, S> Drop for DebouncedQuery<T, S> {
    fn drop(&mut self) {
        if let Some(timer) = lock_slot(&self.pending).take() {
            timer.handle.abort();
        }
    }
}
