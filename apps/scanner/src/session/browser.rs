use crate::models::{Document, Folder};

/// Where the document listing stands for the selected folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowsePhase {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded,
    /// The latest listing failed; the previous documents are still shown.
    Failed,
}

/// Issued when a listing starts. Only the most recent ticket may resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTicket {
    generation: u64,
    pub folder: Option<Folder>,
}

/// Folder list plus the documents of the selected folder.
///
/// Listing is split into `begin_listing` / `finish_listing` so that the async
/// caller can release its lock while the request is outstanding. A response
/// whose ticket is no longer current is dropped.
#[derive(Debug, Clone)]
pub struct CollectionBrowser {
    folders: Vec<Folder>,
    /// `None` is the collection root.
    selected: Option<Folder>,
    documents: Vec<Document>,
    phase: BrowsePhase,
    generation: u64,
}

impl Default for CollectionBrowser {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            selected: None,
            documents: Vec::new(),
            phase: BrowsePhase::Idle,
            generation: 0,
        }
    }
}

impl CollectionBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the folder list. Returns the folder to auto-select when the
    /// list is non-empty and nothing is selected yet; the caller starts the
    /// listing for it.
    pub fn apply_folders(&mut self, folders: Vec<Folder>) -> Option<Folder> {
        self.folders = folders;
        if self.selected.is_none() {
            self.folders.first().cloned()
        } else {
            None
        }
    }

    /// Selects `folder` and moves to `Loading`, superseding any listing in flight.
    pub fn begin_listing(&mut self, folder: Option<Folder>) -> ListingTicket {
        self.generation += 1;
        self.selected = folder.clone();
        self.phase = BrowsePhase::Loading;
        ListingTicket {
            generation: self.generation,
            folder,
        }
    }

    pub fn is_current(&self, ticket: &ListingTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a listing response. Returns `false` (and changes nothing) for a stale ticket.
    pub fn finish_listing(&mut self, ticket: &ListingTicket, documents: Vec<Document>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.documents = documents;
        self.phase = BrowsePhase::Loaded;
        true
    }

    /// Records a failed listing. Prior documents are left in place.
    pub fn fail_listing(&mut self, ticket: &ListingTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.phase = BrowsePhase::Failed;
        true
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn selected_folder(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn storage_paths(&self) -> Vec<String> {
        self.documents
            .iter()
            .map(|d| d.storage_path.clone())
            .collect()
    }

    pub fn phase(&self) -> BrowsePhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == BrowsePhase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str) -> Document {
        Document {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            storage_path: path.to_string(),
            created_at: None,
            size: None,
        }
    }

    #[test]
    fn test_starts_idle_at_root() {
        let browser = CollectionBrowser::new();
        assert_eq!(browser.phase(), BrowsePhase::Idle);
        assert_eq!(browser.selected_folder(), None);
        assert!(browser.documents().is_empty());
    }

    #[test]
    fn test_apply_folders_auto_selects_first_when_none_selected() {
        let mut browser = CollectionBrowser::new();
        let pick = browser.apply_folders(vec!["2024-05-02".into(), "2024-05-01".into()]);
        assert_eq!(pick.as_deref(), Some("2024-05-02"));
        assert_eq!(browser.folders().len(), 2);
    }

    #[test]
    fn test_apply_folders_keeps_existing_selection() {
        let mut browser = CollectionBrowser::new();
        browser.begin_listing(Some("2024-05-01".into()));
        let pick = browser.apply_folders(vec!["2024-05-02".into(), "2024-05-01".into()]);
        assert_eq!(pick, None);
        assert_eq!(browser.selected_folder(), Some("2024-05-01"));
    }

    #[test]
    fn test_apply_empty_folders_selects_nothing() {
        let mut browser = CollectionBrowser::new();
        assert_eq!(browser.apply_folders(vec![]), None);
    }

    #[test]
    fn test_loading_then_loaded() {
        let mut browser = CollectionBrowser::new();
        let ticket = browser.begin_listing(Some("2024-05-01".into()));
        assert!(browser.is_loading());

        assert!(browser.finish_listing(&ticket, vec![doc("2024-05-01/a.pdf")]));
        assert_eq!(browser.phase(), BrowsePhase::Loaded);
        assert_eq!(browser.storage_paths(), vec!["2024-05-01/a.pdf"]);
    }

    #[test]
    fn test_stale_response_discarded_when_it_arrives_last() {
        let mut browser = CollectionBrowser::new();
        let ticket_a = browser.begin_listing(Some("A".into()));
        let ticket_b = browser.begin_listing(Some("B".into()));

        assert!(browser.finish_listing(&ticket_b, vec![doc("B/b.pdf")]));
        assert!(!browser.finish_listing(&ticket_a, vec![doc("A/a.pdf")]));

        assert_eq!(browser.selected_folder(), Some("B"));
        assert_eq!(browser.storage_paths(), vec!["B/b.pdf"]);
        assert_eq!(browser.phase(), BrowsePhase::Loaded);
    }

    #[test]
    fn test_stale_response_discarded_when_it_arrives_first() {
        let mut browser = CollectionBrowser::new();
        let ticket_a = browser.begin_listing(Some("A".into()));
        let ticket_b = browser.begin_listing(Some("B".into()));

        assert!(!browser.finish_listing(&ticket_a, vec![doc("A/a.pdf")]));
        assert!(browser.is_loading());
        assert!(browser.documents().is_empty());

        assert!(browser.finish_listing(&ticket_b, vec![doc("B/b.pdf")]));
        assert_eq!(browser.storage_paths(), vec!["B/b.pdf"]);
    }

    #[test]
    fn test_failure_keeps_prior_documents() {
        let mut browser = CollectionBrowser::new();
        let first = browser.begin_listing(Some("A".into()));
        browser.finish_listing(&first, vec![doc("A/a.pdf")]);

        let second = browser.begin_listing(Some("B".into()));
        assert!(browser.fail_listing(&second));
        assert_eq!(browser.phase(), BrowsePhase::Failed);
        assert_eq!(browser.storage_paths(), vec!["A/a.pdf"]);
    }

    #[test]
    fn test_stale_failure_ignored() {
        let mut browser = CollectionBrowser::new();
        let ticket_a = browser.begin_listing(Some("A".into()));
        let _ticket_b = browser.begin_listing(None);
        assert!(!browser.fail_listing(&ticket_a));
        assert!(browser.is_loading());
        assert_eq!(browser.selected_folder(), None);
    }
}
