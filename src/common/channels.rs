//! Channel type definitions for inter-task communication

use tokio::sync::mpsc;

use crate::state::ArticlesSnapshot;

/// Receiving side of a state subscription
pub type SnapshotReceiver = mpsc::UnboundedReceiver<ArticlesSnapshot>;

/// Sending side held by the state owner for each subscriber
pub type SnapshotSender = mpsc::UnboundedSender<ArticlesSnapshot>;

/// Create a new snapshot channel
///
/// Unbounded so the owner never waits on a slow subscriber and no
/// intermediate snapshot is dropped.
pub fn create_snapshot_channel() -> (SnapshotSender, SnapshotReceiver) {
    mpsc::unbounded_channel()
}
