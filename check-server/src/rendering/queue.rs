//! Render job queue
//!
//! Unbounded mpsc channel: the HTTP side never waits on rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// One unit of render work, keyed by the check it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderJob {
    pub check_id: i64,
}

/// Receiving half, owned by the render worker
pub type RenderJobs = mpsc::UnboundedReceiver<RenderJob>;

#[derive(Debug, Error)]
#[error("Render queue is closed (check {check_id})")]
pub struct QueueClosed {
    pub check_id: i64,
}

/// Cloneable producer handle kept in the server state
#[derive(Debug, Clone)]
pub struct RenderQueue {
    tx: mpsc::UnboundedSender<RenderJob>,
}

impl RenderQueue {
    pub fn channel() -> (Self, RenderJobs) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn enqueue(&self, job: RenderJob) -> Result<(), QueueClosed> {
        self.tx.send(job).map_err(|e| QueueClosed {
            check_id: e.0.check_id,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
