use tokio::sync::{mpsc, oneshot};

use crate::logic::Action;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - `action_*` carries operations from `Dispatcher` handles; it closes when every
///   handle is dropped, which ends the loop.
/// - `completion_*` carries results from background workers back into the loop.
/// - `shutdown_*` requests an explicit stop while handles are still alive.
pub struct Channels {
    /// Sender cloned into every `Dispatcher`.
    pub action_tx: mpsc::UnboundedSender<Action>,
    /// Receiver drained by the event loop.
    pub action_rx: mpsc::UnboundedReceiver<Action>,
    /// Sender cloned into every spawned worker.
    pub completion_tx: mpsc::UnboundedSender<Action>,
    /// Receiver drained by the event loop.
    pub completion_rx: mpsc::UnboundedReceiver<Action>,
    /// Held by the `Controller` to request a stop.
    pub shutdown_tx: oneshot::Sender<()>,
    /// Awaited by the event loop.
    pub shutdown_rx: oneshot::Receiver<()>,
}

impl Channels {
    /// What: Create all runtime channels.
    ///
    /// Output:
    /// - Fresh, connected sender/receiver pairs.
    #[must_use]
    pub fn new() -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel::<Action>();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        Self {
            action_tx,
            action_rx,
            completion_tx,
            completion_rx,
            shutdown_tx,
            shutdown_rx,
        }
    }
}
