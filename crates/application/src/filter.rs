use catalog_core::{ANY, Book, Catalog};

/// Values submitted from the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: ANY.to_string(),
            genre: ANY.to_string(),
        }
    }
}

impl SearchQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.title.trim().is_empty() && self.author == ANY && self.genre == ANY
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_title(book) && self.matches_author(book) && self.matches_genre(book)
    }

    fn matches_title(&self, book: &Book) -> bool {
        if self.title.trim().is_empty() {
            return true;
        }
        book.title
            .to_lowercase()
            .contains(&self.title.to_lowercase())
    }

    fn matches_author(&self, book: &Book) -> bool {
        self.author == ANY || book.author == self.author
    }

    fn matches_genre(&self, book: &Book) -> bool {
        self.genre == ANY || book.has_genre(&self.genre)
    }
}

/// Catalog indices of the books matching `query`, in catalog order.
pub fn filter_books(catalog: &Catalog, query: &SearchQuery) -> Vec<usize> {
    catalog
        .books()
        .iter()
        .enumerate()
        .filter(|(_, book)| query.matches(book))
        .map(|(idx, _)| idx)
        .collect()
}
