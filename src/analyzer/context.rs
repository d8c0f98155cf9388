//! Execution context for a single analysis run.
//!
//! An [`AnalysisContext`] carries the two ways a host can stop an analyzer
//! early: an explicit cancellation signal and an optional deadline. Analyzers
//! wrap their suspension points in [`AnalysisContext::run`] so that an
//! outstanding cluster request is dropped as soon as either fires.
//!
//! # Example
//!
//! ```rust,ignore
//! use ha_analyzer::analyzer::AnalysisContext;
//! use std::time::Duration;
//!
//! let ctx = AnalysisContext::new().with_timeout(Duration::from_secs(30));
//! let cancel = ctx.cancel_handle();
//!
//! tokio::spawn(async move {
//!     tokio::signal::ctrl_c().await.ok();
//!     cancel.cancel();
//! });
//!
//! let findings = analyzer.analyze(&ctx).await?;
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Reason a context stopped a future before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    #[error("analysis cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline carrier passed to every analyzer call.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// Cloneable handle that cancels the context it was taken from.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancel the owning context. Calling this more than once is harmless.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            cancel_tx: Arc::new(tx),
            cancel_rx: rx,
            deadline: None,
        }
    }
}

impl AnalysisContext {
    /// Create a context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a deadline `timeout` from now. An earlier existing deadline wins.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Set an absolute deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Get a handle that can cancel this context (and all of its clones).
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: Arc::clone(&self.cancel_tx),
        }
    }

    /// Cancel this context directly.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// Whether the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Whether the deadline has already passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drive `fut` to completion unless the context is cancelled or the
    /// deadline passes first, in which case `fut` is dropped.
    ///
    /// A context that is already cancelled or expired never polls `fut`.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(Interrupted::Cancelled);
        }
        if self.is_expired() {
            return Err(Interrupted::DeadlineExceeded);
        }

        let mut cancel_rx = self.cancel_rx.clone();
        let deadline = self.deadline;

        tokio::select! {
            biased;
            _ = wait_cancelled(&mut cancel_rx) => Err(Interrupted::Cancelled),
            _ = wait_deadline(deadline) => Err(Interrupted::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}

async fn wait_cancelled(rx: &mut watch::Receiver<bool>) {
    // The context keeps the sender alive, so an error here cannot mean
    // cancellation; park forever instead.
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
