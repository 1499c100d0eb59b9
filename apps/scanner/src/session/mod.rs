// Operator session: selection, browsing, configuration, and the two scan flows.
// The components are plain state machines; `Session` drives them against the
// evaluation service and never holds its lock across an await.

pub mod browser;
pub mod config_state;
pub mod events;
pub mod orchestrator;
pub mod selection;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::client::{EvaluationService, HealthStatus, UploadReceipt};
use crate::errors::ServiceError;
use crate::models::{BatchResult, Folder, ScoreResult, UploadDocument};

pub use browser::{BrowsePhase, CollectionBrowser, ListingTicket};
pub use config_state::{parse_skills, ConfigurationState, EvaluationConfig};
pub use events::{EventBus, SessionEvent};
pub use orchestrator::{BatchTicket, EvaluationOrchestrator};
pub use selection::SelectionSet;

/// Which entry point the operator is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Upload,
    Collection,
}

/// Everything a presentation layer needs to draw the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub tab: Tab,
    pub config: ConfigurationState,
    pub browser: CollectionBrowser,
    pub selection: SelectionSet,
    pub orchestrator: EvaluationOrchestrator,
}

/// Shared handle to one operator session. Cheap to clone; clones drive the
/// same state, so concurrent calls behave like interleaved UI events.
#[derive(Clone)]
pub struct Session {
    service: Arc<dyn EvaluationService>,
    state: Arc<Mutex<SessionState>>,
    events: EventBus,
}

impl Session {
    pub fn new(service: Arc<dyn EvaluationService>, config: ConfigurationState) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(SessionState {
                config,
                ..Default::default()
            })),
            events: EventBus::default(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// A copy of the current state for rendering.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    // ── navigation ──────────────────────────────────────────────────────────

    /// Switching to the collection tab refreshes the folder list.
    pub async fn select_tab(&self, tab: Tab) {
        let changed = {
            let mut state = self.state.lock();
            let changed = state.tab != tab;
            state.tab = tab;
            changed
        };
        if changed {
            self.events.emit(SessionEvent::TabChanged);
        }
        if changed && tab == Tab::Collection {
            self.list_folders().await;
        }
    }

    /// Refreshes the folder list. Failures are logged and leave the list as it was.
    /// If nothing was selected yet, the first folder is selected and listed.
    pub async fn list_folders(&self) {
        let folders = match self.service.list_folders().await {
            Ok(folders) => folders,
            Err(e) => {
                warn!("Error fetching folders: {e}");
                return;
            }
        };

        let auto_select = self.state.lock().browser.apply_folders(folders);
        self.events.emit(SessionEvent::FoldersUpdated);

        if let Some(folder) = auto_select {
            info!("Auto-selecting folder {folder}");
            self.select_folder(Some(folder)).await;
        }
    }

    /// Selects a folder (`None` for the root) and lists its documents.
    ///
    /// The selection is cleared because its members belonged to the previous
    /// folder. If another folder is selected before the response arrives, this
    /// response is dropped.
    pub async fn select_folder(&self, folder: Option<Folder>) {
        let (ticket, selection_cleared) = {
            let mut state = self.state.lock();
            let ticket = state.browser.begin_listing(folder.clone());
            let had_selection = !state.selection.is_empty();
            state.selection.clear();
            (ticket, had_selection)
        };
        self.events.emit(SessionEvent::FolderSelected { folder });
        if selection_cleared {
            self.events.emit(SessionEvent::SelectionChanged);
        }
        self.events.emit(SessionEvent::DocumentsLoading);

        let outcome = self.service.list_documents(ticket.folder.as_deref()).await;

        let event = {
            let mut state = self.state.lock();
            match outcome {
                Ok(documents) => state
                    .browser
                    .finish_listing(&ticket, documents)
                    .then_some(SessionEvent::DocumentsLoaded),
                Err(e) => {
                    warn!("Error fetching resumes for {:?}: {e}", ticket.folder);
                    state
                        .browser
                        .fail_listing(&ticket)
                        .then_some(SessionEvent::DocumentsFailed)
                }
            }
        };

        match event {
            Some(event) => self.events.emit(event),
            None => debug!("Dropped stale listing for {:?}", ticket.folder),
        }
    }

    // ── selection ───────────────────────────────────────────────────────────

    pub fn toggle_document(&self, storage_path: &str) -> bool {
        let selected = self.state.lock().selection.toggle(storage_path);
        self.events.emit(SessionEvent::SelectionChanged);
        selected
    }

    /// "Select all / deselect all" over the documents currently listed.
    pub fn toggle_all_documents(&self) {
        {
            let mut state = self.state.lock();
            let universe = state.browser.storage_paths();
            state.selection.toggle_all(&universe);
        }
        self.events.emit(SessionEvent::SelectionChanged);
    }

    // ── configuration ───────────────────────────────────────────────────────

    pub fn set_job_description(&self, text: impl Into<String>) {
        self.state.lock().config.set_job_description(text);
        self.events.emit(SessionEvent::ConfigChanged);
    }

    pub fn set_skills(&self, text: impl Into<String>) {
        self.state.lock().config.set_skills(text);
        self.events.emit(SessionEvent::ConfigChanged);
    }

    // ── scanning ────────────────────────────────────────────────────────────

    /// Uploads one file and scores it. Returns the stored result, or `None`
    /// when nothing was sent (empty file, or an upload already in flight).
    pub async fn evaluate_upload(&self, file: UploadDocument) -> Option<ScoreResult> {
        if file.is_empty() {
            debug!("No file supplied, skipping upload scan");
            return None;
        }

        let config = {
            let mut state = self.state.lock();
            if !state.orchestrator.begin_upload() {
                warn!("Upload scan already in progress, ignoring {}", file.filename);
                return None;
            }
            state.config.snapshot()
        };
        self.events.emit(SessionEvent::UploadScanStarted);
        info!("Scanning uploaded resume {}", file.filename);

        let outcome = self.service.scan_upload(&file, &config).await;

        let result = {
            let mut state = self.state.lock();
            state.orchestrator.finish_upload(outcome);
            state.orchestrator.upload_result().cloned()
        };
        self.events.emit(SessionEvent::UploadScanFinished);
        result
    }

    /// Scores every selected document in one request. Returns `None` when the
    /// selection is empty (nothing sent, previous results kept) or when a newer
    /// batch superseded this one before it resolved.
    pub async fn scan_selected(&self) -> Option<BatchResult> {
        let (ticket, config) = {
            let mut state = self.state.lock();
            let selection = state.selection.clone();
            let ticket = state.orchestrator.begin_batch(&selection)?;
            (ticket, state.config.snapshot())
        };
        self.events.emit(SessionEvent::BatchScanStarted);
        info!("Scanning {} selected resumes", ticket.storage_paths.len());

        let outcome = self.service.scan(&ticket.storage_paths, &config).await;

        let result = {
            let mut state = self.state.lock();
            if !state.orchestrator.finish_batch(&ticket, outcome) {
                debug!("Dropped superseded batch result");
                return None;
            }
            state.orchestrator.batch_result().cloned()
        };
        self.events.emit(SessionEvent::BatchScanFinished);
        result
    }

    // ── collection maintenance ──────────────────────────────────────────────

    /// Stores a file in the collection without scoring it. Does not touch the
    /// scan state; refresh the folder listing to see it.
    pub async fn upload_document(&self, file: UploadDocument) -> Result<UploadReceipt, ServiceError> {
        let receipt = self.service.upload(&file).await?;
        info!(
            "Uploaded {} to {}",
            file.filename,
            receipt.storage_path.as_deref().unwrap_or("<unknown>")
        );
        Ok(receipt)
    }

    pub async fn health(&self) -> Result<HealthStatus, ServiceError> {
        self.service.health().await
    }
}
