/// Documents picked for the next batch scan, keyed by storage path.
///
/// Insertion order is preserved and is the order sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` if present, adds it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Sets membership to exactly `universe` (duplicates collapsed).
    pub fn select_all<I, S>(&mut self, universe: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ids.clear();
        for id in universe {
            let id = id.as_ref();
            if !self.is_selected(id) {
                self.ids.push(id.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// "Select all / deselect all": empties the set when its size already
    /// equals the universe size, fills it to `universe` otherwise.
    pub fn toggle_all(&mut self, universe: &[String]) {
        if self.ids.len() == universe.len() {
            self.clear();
        } else {
            self.select_all(universe);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
