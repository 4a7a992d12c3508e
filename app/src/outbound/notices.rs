//! Notice sink adapters.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::domain::ports::NoticeSink;
use crate::domain::{Notice, NoticeSeverity};

/// Forwards notices over an unbounded channel the presentation layer drains.
#[derive(Debug, Clone)]
pub struct ChannelNoticeSink {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNoticeSink {
    /// Create a sink and the receiver that drains it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NoticeSink for ChannelNoticeSink {
    fn publish(&self, notice: Notice) {
        if let Err(dropped) = self.sender.send(notice) {
            warn!(title = dropped.0.title(), "notice receiver closed; dropping notice");
        }
    }
}

/// Writes notices to the log; used when nothing renders them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn publish(&self, notice: Notice) {
        let (title, body) = (notice.title(), notice.body());
        match notice.severity() {
            NoticeSeverity::Info | NoticeSeverity::Success => info!(title, body, "notice"),
            NoticeSeverity::Error => error!(title, body, "notice"),
        }
    }
}
