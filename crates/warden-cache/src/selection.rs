//! Multi-item selection for one list view.
//!
//! Independent of cache contents: ids are plain strings and may go stale after
//! an external delete. `reset` never fails on stale ids.

/// Ordered set of selected entity ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    ids: Vec<String>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` unless it is already selected.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.is_selected(&id) {
            self.ids.push(id);
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.retain(|selected| selected != id);
    }

    /// Deselect `ids` if all of them are selected, otherwise select the missing ones.
    pub fn toggle_all<S: AsRef<str>>(&mut self, ids: &[S]) {
        let all_selected = !ids.is_empty() && ids.iter().all(|id| self.is_selected(id.as_ref()));
        if all_selected {
            self.remove_all(ids);
        } else {
            for id in ids {
                self.select(id.as_ref());
            }
        }
    }

    /// Drop every id in `ids`; unknown ids are ignored.
    pub fn remove_all<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.ids
            .retain(|selected| !ids.iter().any(|id| id.as_ref() == selected));
    }

    /// Empty the selection unconditionally.
    pub fn reset(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    #[must_use]
    pub fn selection(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_ignores_duplicates_and_keeps_order() {
        let mut selection = SelectionTracker::new();
        selection.select("R3");
        selection.select("R1");
        selection.select("R3");
        assert_eq!(selection.selection(), &["R3".to_string(), "R1".to_string()]);
    }

    #[test]
    fn deselect_removes_only_that_id() {
        let mut selection = SelectionTracker::new();
        selection.toggle_all(&["R1", "R2", "R3"]);
        selection.deselect("R2");
        assert_eq!(selection.selection(), &["R1".to_string(), "R3".to_string()]);
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let mut selection = SelectionTracker::new();
        selection.select("R2");

        selection.toggle_all(&["R1", "R2", "R3"]);
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.selection()[0], "R2");

        selection.toggle_all(&["R1", "R2", "R3"]);
        assert!(selection.is_empty());
    }

    #[test]
    fn reset_is_safe_twice_and_with_stale_ids() {
        let mut selection = SelectionTracker::new();
        selection.select("deleted-elsewhere");
        selection.reset();
        selection.reset();
        assert!(selection.is_empty());
    }

    #[test]
    fn remove_all_ignores_unknown_ids() {
        let mut selection = SelectionTracker::new();
        selection.select("R1");
        selection.select("R2");
        selection.remove_all(&["R2", "never-selected"]);
        assert_eq!(selection.selection(), &["R1".to_string()]);
    }
}
