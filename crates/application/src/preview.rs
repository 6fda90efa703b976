use catalog_core::Book;

/// Anything that can appear in an interaction's hit chain. Only entries that
/// stand for a book expose an identifier.
pub trait InteractiveElement {
    fn book_id(&self) -> Option<&str> {
        None
    }
}

/// Nearest identifier in a hit chain ordered innermost first.
pub fn find_book_id<'a>(chain: &[&'a dyn InteractiveElement]) -> Option<&'a str> {
    chain.iter().copied().find_map(|element| element.book_id())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewPanel {
    pub open: bool,
    pub backdrop: String,
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

impl PreviewPanel {
    pub fn populate(&mut self, book: &Book, author_name: &str) {
        self.open = true;
        self.backdrop = book.image.clone();
        self.image = book.image.clone();
        self.title = book.title.clone();
        self.subtitle = format!("{author_name} ({})", book.published_year());
        self.description = book.description.clone();
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
