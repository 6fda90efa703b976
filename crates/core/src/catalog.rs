use std::collections::HashMap;

use crate::Book;

/// Identifier → display name map that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and keeps the existing name when `id` is already present.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, name.into()));
        true
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .and_then(|idx| self.entries.get(*idx))
            .map(|(_, name)| name.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = NameMap::new();
        for (id, name) in iter {
            map.insert(id, name);
        }
        map
    }
}

/// The immutable dataset: books in load order plus the author and genre maps.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    authors: NameMap,
    genres: NameMap,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the identifier index once. If an identifier repeats, the first
    /// record keeps it.
    pub fn new(books: Vec<Book>, authors: NameMap, genres: NameMap) -> Self {
        let mut by_id = HashMap::with_capacity(books.len());
        for (idx, book) in books.iter().enumerate() {
            by_id.entry(book.id.clone()).or_insert(idx);
        }
        Self {
            books,
            authors,
            genres,
            by_id,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.index_of(id).and_then(|idx| self.books.get(idx))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn authors(&self) -> &NameMap {
        &self.authors
    }

    pub fn genres(&self) -> &NameMap {
        &self.genres
    }

    /// Display name of the book's author, empty when the map lacks it.
    pub fn author_name(&self, book: &Book) -> &str {
        self.authors.get(&book.author).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
