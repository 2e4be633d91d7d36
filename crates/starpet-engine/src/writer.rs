//! Background persistence writer
//!
//! Mutations never wait on storage. Each `Cmd::Persist` becomes a write
//! operation queued to a single task, so writes reach the backend in the
//! order they were issued. `flush` resolves once everything queued before it
//! has been applied.

use crate::{Error, Result};
use starpet_db::{KeyValueStore, Persistence};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// A queued storage operation
#[derive(Debug)]
pub(crate) enum WriteOp {
    Set {
        key: &'static str,
        value: serde_json::Value,
    },
    Remove {
        key: &'static str,
    },
    Flush(oneshot::Sender<()>),
}

/// Counters for writes the task has processed
#[derive(Debug, Default)]
pub(crate) struct WriteStats {
    applied: AtomicU64,
    failed: AtomicU64,
}

/// Handle to the writer task
pub(crate) struct Writer {
    tx: mpsc::UnboundedSender<WriteOp>,
    stats: Arc<WriteStats>,
}

impl Writer {
    /// Spawn the writer task on the current tokio runtime
    pub(crate) fn spawn<S>(persistence: Arc<Persistence<S>>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteOp>();
        let stats = Arc::new(WriteStats::default());
        let task_stats = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Some(op) = rx.recv().await {
                let result = match op {
                    WriteOp::Set { key, value } => persistence.set(key, &value).await.map(|_| key),
                    WriteOp::Remove { key } => persistence.remove(key).await.map(|_| key),
                    WriteOp::Flush(done) => {
                        let _ = done.send(());
                        continue;
                    }
                };
                match result {
                    Ok(key) => {
                        task_stats.applied.fetch_add(1, Ordering::Relaxed);
                        debug!(key, "write applied");
                    }
                    Err(e) => {
                        task_stats.failed.fetch_add(1, Ordering::Relaxed);
                        warn!(error = %e, "write failed");
                    }
                }
            }
            debug!("persistence writer stopped");
        });

        Self { tx, stats }
    }

    /// Queue an operation without waiting for it
    pub(crate) fn submit(&self, op: WriteOp) {
        if self.tx.send(op).is_err() {
            warn!("persistence writer is gone, dropping write");
        }
    }

    /// Wait until every operation queued so far has been processed
    pub(crate) async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(WriteOp::Flush(done_tx))
            .map_err(|_| Error::WriterClosed)?;
        done_rx.await.map_err(|_| Error::WriterClosed)
    }

    /// Writes that reached the backend
    pub(crate) fn applied(&self) -> u64 {
        self.stats.applied.load(Ordering::Relaxed)
    }

    /// Writes the backend refused
    pub(crate) fn failed(&self) -> u64 {
        self.stats.failed.load(Ordering::Relaxed)
    }
}
