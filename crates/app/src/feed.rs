//! Snapshot feed: the store pushes a new snapshot on every change and the
//! summary is recomputed from scratch for each one.
//!
//! Snapshots arrive as JSON lines. A reader task parses them into a channel;
//! the consumer re-invokes the engine per snapshot.
use engine::{Period, SettlementSummary, compute_summary, summarize_period};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};

use crate::{error::Result, snapshot::Snapshot};

const FEED_CAPACITY: usize = 16;

pub fn channel() -> (mpsc::Sender<Snapshot>, mpsc::Receiver<Snapshot>) {
    mpsc::channel(FEED_CAPACITY)
}

/// Parses one snapshot per line and forwards it. Blank lines are skipped and
/// malformed ones are logged and dropped. Returns the number forwarded.
pub async fn read_snapshots<R>(reader: R, tx: mpsc::Sender<Snapshot>) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let snapshot: Snapshot = match serde_json::from_str(&line) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!("dropping malformed snapshot: {err}");
                continue;
            }
        };
        if tx.send(snapshot).await.is_err() {
            tracing::debug!("feed consumer gone, stop reading");
            break;
        }
        forwarded += 1;
    }
    Ok(forwarded)
}

/// Recomputes the summary for every snapshot until the channel closes.
pub async fn drain<F>(mut rx: mpsc::Receiver<Snapshot>, period: Option<Period>, mut on_summary: F)
where
    F: FnMut(&Snapshot, SettlementSummary),
{
    while let Some(snapshot) = rx.recv().await {
        let summary = match period {
            Some(period) => summarize_period(&snapshot.entries, &snapshot.roster, period),
            None => compute_summary(&snapshot.entries, &snapshot.roster),
        };
        tracing::debug!(
            "recomputed summary over {} entries, net {}",
            snapshot.entries.len(),
            summary.net_balance
        );
        on_summary(&snapshot, summary);
    }
}
