//! Application orchestration layer for the catalog browser.
//!
//! [`AppContext`] owns every piece of session state (match set, page cursor,
//! rendered list, overlays, theme) and exposes one method per user action.
//! Nothing here knows about terminals.

use catalog_core::{Catalog, Theme};
use tracing::debug;

mod filter;
mod pagination;
mod preview;
mod render;
mod theme;

pub use filter::{SearchQuery, filter_books};
pub use pagination::{Pagination, ShowMore};
pub use preview::{InteractiveElement, PreviewPanel, find_book_id};
pub use render::{ListContainer, PreviewItem, SelectOption, build_options, render_previews};
pub use theme::ThemeController;

pub const ALL_AUTHORS_LABEL: &str = "All Authors";
pub const ALL_GENRES_LABEL: &str = "All Genres";

#[derive(Debug, Clone)]
pub struct AppContext {
    pub catalog: Catalog,
    pub query: SearchQuery,
    pub matches: Vec<usize>,
    pub pagination: Pagination,
    pub list: ListContainer,
    pub selected: usize,
    pub author_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
    pub preview: PreviewPanel,
    pub theme: ThemeController,
    pub search_open: bool,
    pub settings_open: bool,
}

impl AppContext {
    pub fn new(catalog: Catalog, page_size: usize, theme: Theme) -> Self {
        let author_options = build_options(catalog.authors(), ALL_AUTHORS_LABEL);
        let genre_options = build_options(catalog.genres(), ALL_GENRES_LABEL);
        let matches = (0..catalog.len()).collect();
        let mut ctx = Self {
            catalog,
            query: SearchQuery::default(),
            matches,
            pagination: Pagination::new(page_size),
            list: ListContainer::default(),
            selected: 0,
            author_options,
            genre_options,
            preview: PreviewPanel::default(),
            theme: ThemeController::new(theme),
            search_open: false,
            settings_open: false,
        };
        ctx.render_first_page();
        ctx
    }

    /// Replaces the match set, rewinds to the first page and re-renders the list.
    pub fn submit_search(&mut self, query: SearchQuery) -> usize {
        self.matches = filter_books(&self.catalog, &query);
        self.query = query;
        self.pagination.reset();
        self.list.clear();
        self.render_first_page();
        self.selected = 0;
        self.search_open = false;
        debug!(
            matches = self.matches.len(),
            title = %self.query.title,
            author = %self.query.author,
            genre = %self.query.genre,
            "search submitted"
        );
        self.matches.len()
    }

    /// Renders the next batch. Does nothing while the control is disabled.
    pub fn show_more(&mut self) -> bool {
        if self.show_more_state().disabled {
            return false;
        }
        let range = self.pagination.advance(self.matches.len());
        render_previews(&self.catalog, &self.matches[range], &mut self.list);
        debug!(
            page = self.pagination.page(),
            rendered = self.list.len(),
            "show more"
        );
        true
    }

    pub fn show_more_state(&self) -> ShowMore {
        self.pagination.show_more(self.matches.len())
    }

    pub fn visible_count(&self) -> usize {
        self.pagination.visible_count(self.matches.len())
    }

    pub fn is_empty_state(&self) -> bool {
        self.matches.is_empty()
    }

    /// Opens the preview for the nearest book in `chain`. Chains without an
    /// identifier, or naming an unknown book, leave the panel untouched.
    pub fn activate(&mut self, chain: &[&dyn InteractiveElement]) -> bool {
        match find_book_id(chain) {
            Some(id) => self.open_preview(id),
            None => false,
        }
    }

    pub fn open_preview(&mut self, id: &str) -> bool {
        let Some(book) = self.catalog.get(id) else {
            debug!(id, "preview requested for unknown book");
            return false;
        };
        let author = self.catalog.author_name(book).to_string();
        self.preview.populate(book, &author);
        debug!(id, "preview opened");
        true
    }

    /// Opens the preview for the currently selected list entry.
    pub fn activate_selected(&mut self) -> bool {
        let id = {
            let Some(item) = self.list.get(self.selected) else {
                return false;
            };
            let chain: [&dyn InteractiveElement; 2] = [item, &self.list];
            find_book_id(&chain).map(str::to_string)
        };
        match id {
            Some(id) => self.open_preview(&id),
            None => false,
        }
    }

    pub fn close_preview(&mut self) {
        self.preview.close();
    }

    pub fn open_search(&mut self) {
        self.search_open = true;
    }

    pub fn close_search(&mut self) {
        self.search_open = false;
    }

    pub fn open_settings(&mut self) {
        self.settings_open = true;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    pub fn submit_theme(&mut self, theme: Theme) {
        self.theme.apply(theme);
        self.settings_open = false;
        debug!(theme = %theme, "theme applied");
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.list.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&PreviewItem> {
        self.list.get(self.selected)
    }

    fn render_first_page(&mut self) {
        let range = self.pagination.first_range(self.matches.len());
        render_previews(&self.catalog, &self.matches[range], &mut self.list);
    }
}
