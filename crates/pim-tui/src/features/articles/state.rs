//! Dashboard state: the rendered article set, selection cursor, and search.
//!
//! The article vector is the single typed copy of the last fetch. All
//! identity lookups (edit seed, view, delete) index into it; structured data
//! is never re-derived from rendered text. It is replaced only wholesale by
//! a completed refresh, so lookups between a refresh's start and completion
//! see the prior, still-valid set.

use pim_core::api::ArticleRecord;

/// Current search filter.
///
/// `term` drives the retrieval mode of the next refresh: non-empty (after
/// trimming) means search, empty means list-all. `focused` routes keyboard
/// input to the search field instead of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub focused: bool,
}

impl SearchState {
    /// The trimmed term, or `None` when it is effectively empty.
    pub fn active_term(&self) -> Option<&str> {
        let trimmed = self.term.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Dashboard screen state.
#[derive(Debug)]
pub struct DashboardState {
    /// Session identity scoping every article operation.
    pub username: String,
    /// The rendered article set: last-fetched records, server order.
    pub articles: Vec<ArticleRecord>,
    /// Selection cursor into `articles`.
    pub selected: usize,
    pub search: SearchState,
    /// False until the first refresh completes, so an empty account is
    /// distinguishable from "still loading".
    pub loaded_once: bool,
}

impl DashboardState {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            articles: Vec::new(),
            selected: 0,
            search: SearchState::default(),
            loaded_once: false,
        }
    }

    /// Looks up a record by identity in the rendered set.
    pub fn find(&self, id: &str) -> Option<&ArticleRecord> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// The record under the selection cursor, if any.
    pub fn selected_article(&self) -> Option<&ArticleRecord> {
        self.articles.get(self.selected)
    }

    /// Replaces the rendered set wholesale and clamps the cursor.
    pub fn replace_articles(&mut self, articles: Vec<ArticleRecord>) {
        self.articles = articles;
        self.loaded_once = true;
        if self.articles.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.articles.len() {
            self.selected = self.articles.len() - 1;
        }
    }

    pub fn select_next(&mut self) {
        if !self.articles.is_empty() && self.selected + 1 < self.articles.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> ArticleRecord {
        ArticleRecord {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn replace_clamps_selection() {
        let mut state = DashboardState::new("alice");
        state.replace_articles(vec![record("1", "a"), record("2", "b"), record("3", "c")]);
        state.selected = 2;

        state.replace_articles(vec![record("1", "a")]);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_article().unwrap().id, "1");
    }

    #[test]
    fn find_by_identity() {
        let mut state = DashboardState::new("alice");
        state.replace_articles(vec![record("7", "seven")]);

        assert_eq!(state.find("7").unwrap().title, "seven");
        assert!(state.find("8").is_none());
    }

    #[test]
    fn active_term_trims_whitespace() {
        let mut search = SearchState::default();
        search.term = "  notes  ".to_string();
        assert_eq!(search.active_term(), Some("notes"));

        search.term = "   ".to_string();
        assert_eq!(search.active_term(), None);
    }
}
