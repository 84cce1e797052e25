//! Timers for the interactive session.
//!
//! - [`OneShot`]: fires once after a delay; cancelled on `cancel()` or drop
//! - [`Debouncer`]: trailing-edge debounce over a stream of values
//! - [`SearchInput`]: search box text gated by a debouncer and a minimum length
//!
//! All timers are tokio tasks and must be created inside a runtime. Every
//! armed timer is aborted when it is replaced or its owner is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A single delayed action
#[derive(Debug)]
pub struct OneShot {
    handle: Option<JoinHandle<()>>,
}

impl OneShot {
    /// Run `action` once `delay` has elapsed, unless cancelled first
    pub fn start<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True once the action ran (or the timer was cancelled)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for OneShot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Trailing-edge debouncer
///
/// Each [`push`](Debouncer::push) rearms the quiet period; a value is
/// emitted only once no newer value arrived for the full period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    rx: mpsc::UnboundedReceiver<T>,
    pending: Option<OneShot>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            tx,
            rx,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        self.pending = Some(OneShot::start(self.delay, move || {
            // Receiver lives as long as the debouncer; a failed send means
            // the debouncer was dropped mid-fire.
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value, and any settled value not yet received
    pub fn cancel(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            pending.cancel();
        }
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Wait for the next settled value
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Settled value already waiting, without blocking
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

/// What the search box asks the controller to do once typing settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrigger {
    Submit(String),
    Clear,
}

/// Search box state with debounced submission
#[derive(Debug)]
pub struct SearchInput {
    text: String,
    min_len: usize,
    debouncer: Debouncer<String>,
}

impl SearchInput {
    pub fn new(quiet_period: Duration, min_len: usize) -> Self {
        Self {
            text: String::new(),
            min_len,
            debouncer: Debouncer::new(quiet_period),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Record a keystroke's resulting text and rearm the quiet period
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.debouncer.push(self.text.clone());
    }

    /// Empty the box without emitting anything
    pub fn clear(&mut self) {
        self.text.clear();
        self.debouncer.cancel();
    }

    /// Wait until typing settles on something actionable
    ///
    /// Settled text shorter than the minimum length is swallowed; settled
    /// empty text asks for the search to be cleared.
    pub async fn next_trigger(&mut self) -> Option<SearchTrigger> {
        loop {
            let settled = self.debouncer.recv().await?;
            if let Some(trigger) = self.classify(&settled) {
                return Some(trigger);
            }
        }
    }

    fn classify(&self, settled: &str) -> Option<SearchTrigger> {
        let trimmed = settled.trim();
        if trimmed.is_empty() {
            Some(SearchTrigger::Clear)
        } else if trimmed.chars().count() >= self.min_len {
            Some(SearchTrigger::Submit(trimmed.to_string()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_respects_min_len() {
        let input = SearchInput::new(Duration::from_millis(500), 2);
        assert_eq!(input.classify("h"), None);
        assert_eq!(
            input.classify(" hu "),
            Some(SearchTrigger::Submit("hu".to_string()))
        );
        assert_eq!(input.classify("   "), Some(SearchTrigger::Clear));
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = OneShot::start(Duration::from_secs(2), move || {
            let _ = tx.send(());
        });
        assert!(rx.recv().await.is_some());
        tokio::task::yield_now().await;
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_cancelled_on_drop() {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let timer = OneShot::start(Duration::from_secs(2), move || {
            let _ = tx.send(());
        });
        drop(timer);
        // Sender was dropped with the aborted task, so the channel closes
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.push(1);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(debouncer.try_recv(), None);
    }
}
