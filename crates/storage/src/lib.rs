//! Dataset and settings loading.
//!
//! The catalog is read once at startup and never written back.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context as _, bail};
use catalog_core::{Book, Catalog, DEFAULT_PAGE_SIZE, NameMap};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::warn;

mod settings;

pub use settings::{apply_env_overrides, detect_system_theme, load_settings};

const BUNDLED_DATASET: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub page_size: usize,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default = "default_page_size")]
    books_per_page: usize,
    #[serde(default, deserialize_with = "ordered_entries")]
    authors: Vec<(String, String)>,
    #[serde(default, deserialize_with = "ordered_entries")]
    genres: Vec<(String, String)>,
    #[serde(default)]
    books: Vec<Book>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Reads a JSON object as id/name pairs in document order, keeping duplicates
/// so they can be reported.
fn ordered_entries<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping identifiers to display names")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                out.push(entry);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

pub fn bundled_dataset() -> anyhow::Result<Dataset> {
    parse_dataset(BUNDLED_DATASET).context("parse bundled dataset")
}

pub fn load_dataset(path: impl AsRef<Path>) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read dataset {}", path.display()))?;
    parse_dataset(&json).with_context(|| format!("parse dataset {}", path.display()))
}

pub fn parse_dataset(json: &str) -> anyhow::Result<Dataset> {
    let raw: RawDataset = serde_json::from_str(json).context("decode dataset json")?;

    let authors = build_name_map("author", raw.authors)?;
    let genres = build_name_map("genre", raw.genres)?;

    let mut seen = HashSet::with_capacity(raw.books.len());
    for book in &raw.books {
        if !seen.insert(book.id.as_str()) {
            bail!("duplicate book id {}", book.id);
        }
        if !authors.contains(&book.author) {
            bail!("book {} references unknown author {}", book.id, book.author);
        }
        for genre in &book.genres {
            if !genres.contains(genre) {
                warn!(book = %book.id, genre = %genre, "book references unknown genre");
            }
        }
    }

    Ok(Dataset {
        catalog: Catalog::new(raw.books, authors, genres),
        page_size: raw.books_per_page,
    })
}

fn build_name_map(kind: &str, entries: Vec<(String, String)>) -> anyhow::Result<NameMap> {
    let mut map = NameMap::new();
    for (id, name) in entries {
        if !map.insert(id.clone(), name) {
            bail!("duplicate {kind} id {id}");
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    const SMALL: &str = r#"{
        "books_per_page": 2,
        "authors": { "z": "Zed", "a": "Ay" },
        "genres": { "g": "Gee" },
        "books": [
            {
                "id": "1",
                "title": "One",
                "author": "z",
                "image": "one.png",
                "genres": ["g"],
                "description": "first",
                "published": "1999-12-31T23:00:00.000Z"
            }
        ]
    }"#;

    #[test]
    fn parses_dataset_in_document_order() -> anyhow::Result<()> {
        let dataset = parse_dataset(SMALL)?;
        assert_eq!(dataset.page_size, 2);
        let ids: Vec<&str> = dataset.catalog.authors().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["z", "a"]);
        let book = dataset.catalog.get("1").context("book 1")?;
        assert_eq!(book.published_year(), 1999);
        assert_eq!(dataset.catalog.author_name(book), "Zed");
        Ok(())
    }

    #[test]
    fn missing_fields_default() -> anyhow::Result<()> {
        let dataset = parse_dataset("{}")?;
        assert_eq!(dataset.page_size, DEFAULT_PAGE_SIZE);
        assert!(dataset.catalog.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_duplicate_author_key() {
        let json = r#"{ "authors": { "a": "One", "a": "Two" } }"#;
        let err = parse_dataset(json).unwrap_err();
        assert!(err.to_string().contains("duplicate author id a"));
    }

    #[test]
    fn rejects_duplicate_book_id() {
        let book = r#"{"id":"1","title":"T","author":"a","image":"","genres":[],"description":"","published":"2000-01-01T00:00:00Z"}"#;
        let json = format!(r#"{{ "authors": {{ "a": "A" }}, "books": [{book}, {book}] }}"#);
        let err = parse_dataset(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate book id 1"));
    }

    #[test]
    fn rejects_unknown_author() {
        let json = r#"{ "books": [{"id":"1","title":"T","author":"ghost","image":"","genres":[],"description":"","published":"2000-01-01T00:00:00Z"}] }"#;
        let err = parse_dataset(json).unwrap_err();
        assert!(err.to_string().contains("unknown author ghost"));
    }

    #[test]
    fn tolerates_unknown_genre() -> anyhow::Result<()> {
        let json = r#"{ "authors": { "a": "A" }, "genres": { "g": "Gee" }, "books": [{"id":"1","title":"T","author":"a","image":"","genres":["g","lost"],"description":"","published":"2000-01-01T00:00:00Z"}] }"#;
        let dataset = parse_dataset(json)?;
        let book = dataset.catalog.get("1").context("book 1")?;
        assert!(book.has_genre("lost"));
        assert!(!dataset.catalog.genres().contains("lost"));
        Ok(())
    }

    #[test]
    fn bundled_dataset_loads() -> anyhow::Result<()> {
        let dataset = bundled_dataset()?;
        assert!(!dataset.catalog.is_empty());
        assert!(dataset.page_size > 0);
        for book in dataset.catalog.books() {
            assert!(!dataset.catalog.author_name(book).is_empty());
        }
        Ok(())
    }

    #[test]
    fn load_dataset_reports_path() {
        let err = load_dataset("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
