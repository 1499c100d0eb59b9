use tokio::sync::broadcast;
use tracing::trace;

use crate::models::Folder;

const EVENT_CAPACITY: usize = 64;

/// Emitted after every state mutation so a presentation layer knows what to redraw.
/// Events carry no payload beyond what is needed to route them; read the
/// current values from `Session::snapshot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TabChanged,
    FoldersUpdated,
    FolderSelected { folder: Option<Folder> },
    DocumentsLoading,
    DocumentsLoaded,
    DocumentsFailed,
    SelectionChanged,
    ConfigChanged,
    UploadScanStarted,
    UploadScanFinished,
    BatchScanStarted,
    BatchScanFinished,
}

/// Fan-out of session events. Sending with no subscribers is fine.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }
}

impl EventBus {
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        trace!(?event, "session event");
        // Err only means nobody is listening.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events_in_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.emit(SessionEvent::SelectionChanged);
        bus.emit(SessionEvent::ConfigChanged);

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SelectionChanged);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::ConfigChanged);
    }

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        EventBus::default().emit(SessionEvent::TabChanged);
    }
}
