//! Test helpers and fixtures.

use catalog_application::AppContext;
use catalog_core::{Book, Catalog, NameMap, Theme};
use chrono::{TimeZone as _, Utc};

pub const AUTHORS: [(&str, &str); 2] = [("a0", "Octavia Butler"), ("a1", "Italo Calvino")];
pub const GENRES: [(&str, &str); 3] = [("g0", "Fiction"), ("g1", "Fantasy"), ("g2", "Essays")];

/// Book `i` is titled "Book {i}", alternates authors, and is published in `2000 + i`.
pub fn make_book(i: usize) -> Book {
    let mut genres = vec!["g0".to_string()];
    if i % 3 == 1 {
        genres.push("g1".to_string());
    }
    Book {
        id: format!("book-{i}"),
        title: format!("Book {i}"),
        author: AUTHORS[i % AUTHORS.len()].0.to_string(),
        image: format!("covers/book-{i}.jpg"),
        genres,
        description: format!("Description of book {i}."),
        published: Utc
            .with_ymd_and_hms(2000 + i as i32, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

pub fn make_catalog(count: usize) -> Catalog {
    Catalog::new(
        (0..count).map(make_book).collect(),
        AUTHORS.into_iter().collect::<NameMap>(),
        GENRES.into_iter().collect::<NameMap>(),
    )
}

pub fn make_context(count: usize, page_size: usize) -> AppContext {
    AppContext::new(make_catalog(count), page_size, Theme::Day)
}

/// Context over the dataset shipped with the binary, paged by its own `books_per_page`.
pub fn bundled_context() -> anyhow::Result<AppContext> {
    let dataset = catalog_storage::bundled_dataset()?;
    Ok(AppContext::new(dataset.catalog, dataset.page_size, Theme::Day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;
    use catalog_application::{InteractiveElement, PreviewItem, SearchQuery, filter_books};
    use catalog_core::{ANY, Rgb};

    fn visible_ids(ctx: &AppContext) -> Vec<String> {
        ctx.list.items().iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn builds_catalog() {
        let catalog = make_catalog(4);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.book(3).map(|b| b.published_year()), Some(2003));
    }

    #[test]
    fn five_books_page_size_two() {
        let mut ctx = make_context(5, 2);
        assert_eq!(ctx.list.len(), 2);
        assert_eq!(ctx.show_more_state().remaining, 3);
        assert!(!ctx.show_more_state().disabled);

        assert!(ctx.show_more());
        assert_eq!(ctx.list.len(), 4);
        assert_eq!(ctx.show_more_state().remaining, 1);

        assert!(ctx.show_more());
        assert_eq!(ctx.list.len(), 5);
        assert_eq!(ctx.visible_count(), 5);
        assert!(ctx.show_more_state().disabled);
        assert_eq!(
            visible_ids(&ctx),
            (0..5).map(|i| format!("book-{i}")).collect::<Vec<_>>()
        );
    }

    #[test]
    fn search_without_matches_shows_empty_state() {
        let mut ctx = make_context(5, 2);
        let count = ctx.submit_search(SearchQuery {
            title: "zzz-no-match".to_string(),
            ..SearchQuery::default()
        });
        assert_eq!(count, 0);
        assert!(ctx.is_empty_state());
        assert!(ctx.list.is_empty());
        assert!(ctx.show_more_state().disabled);
        assert_eq!(ctx.show_more_state().remaining, 0);
    }

    #[test]
    fn remaining_counts_against_match_set() {
        let mut ctx = make_context(10, 2);
        ctx.submit_search(SearchQuery {
            author: "a1".to_string(),
            ..SearchQuery::default()
        });
        assert_eq!(ctx.matches.len(), 5);
        assert_eq!(ctx.show_more_state().remaining, 3);
        assert_eq!(visible_ids(&ctx), vec!["book-1", "book-3"]);
    }

    #[test]
    fn search_clears_previous_render() {
        let mut ctx = make_context(9, 2);
        ctx.show_more();
        ctx.show_more();
        assert_eq!(ctx.list.len(), 6);

        ctx.submit_search(SearchQuery {
            title: String::new(),
            author: ANY.to_string(),
            genre: "g1".to_string(),
        });
        assert_eq!(visible_ids(&ctx), vec!["book-1", "book-4"]);
        assert_eq!(ctx.show_more_state().remaining, 1);
    }

    #[test]
    fn unfiltered_search_restores_full_catalog() {
        let mut ctx = make_context(3, 10);
        ctx.submit_search(SearchQuery {
            title: "book 2".to_string(),
            ..SearchQuery::default()
        });
        assert_eq!(ctx.matches, vec![2]);
        ctx.submit_search(SearchQuery::default());
        assert_eq!(ctx.matches, vec![0, 1, 2]);
    }

    #[test]
    fn preview_for_known_identifier_fills_all_fields() {
        let mut ctx = make_context(3, 2);
        let item = PreviewItem {
            id: "book-2".to_string(),
            image: String::new(),
            title: String::new(),
            author: String::new(),
        };
        let list = ctx.list.clone();
        let chain: [&dyn InteractiveElement; 2] = [&item, &list];
        assert!(ctx.activate(&chain));

        let preview = &ctx.preview;
        assert!(preview.open);
        assert_eq!(preview.backdrop, "covers/book-2.jpg");
        assert_eq!(preview.image, "covers/book-2.jpg");
        assert_eq!(preview.title, "Book 2");
        assert_eq!(preview.subtitle, "Octavia Butler (2002)");
        assert_eq!(preview.description, "Description of book 2.");
    }

    #[test]
    fn preview_for_unknown_identifier_leaves_panel_unchanged() {
        let mut ctx = make_context(3, 2);
        assert!(ctx.open_preview("book-0"));
        let before = ctx.preview.clone();

        assert!(!ctx.open_preview("book-99"));
        assert_eq!(ctx.preview, before);

        let list = ctx.list.clone();
        let chain: [&dyn InteractiveElement; 1] = [&list];
        assert!(!ctx.activate(&chain));
        assert_eq!(ctx.preview, before);
    }

    #[test]
    fn night_theme_inverts_colors_and_closes_settings() {
        let mut ctx = make_context(1, 1);
        ctx.open_settings();
        ctx.submit_theme(Theme::Night);
        assert!(!ctx.settings_open);
        assert_eq!(ctx.theme.colors().dark, Rgb::PAPER);
        assert_eq!(ctx.theme.colors().light, Rgb::INK);
        assert_eq!(ctx.theme.colors().dark.to_string(), "255, 255, 255");
        assert_eq!(ctx.theme.colors().light.to_string(), "10, 10, 20");
    }

    #[test]
    fn bundled_catalog_filters_by_genre() -> anyhow::Result<()> {
        let mut ctx = bundled_context()?;
        assert_eq!(ctx.list.len(), ctx.catalog.len().min(ctx.pagination.page_size()));

        ctx.submit_search(SearchQuery {
            genre: "g-horror".to_string(),
            ..SearchQuery::default()
        });
        let titles: Vec<&str> = ctx.list.items().iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["Frankenstein", "Dracula"]);
        assert!(ctx.show_more_state().disabled);

        assert!(ctx.open_preview("b-dracula"));
        assert_eq!(ctx.preview.subtitle, "Bram Stoker (1897)");
        Ok(())
    }

    #[test]
    fn unknown_genre_still_loads_and_filters() -> anyhow::Result<()> {
        let json = r#"{
            "authors": { "a": "Ann" },
            "genres": { "g": "Gee" },
            "books": [
                {"id":"1","title":"Known","author":"a","image":"","genres":["g"],"description":"","published":"2000-01-01T00:00:00Z"},
                {"id":"2","title":"Stray","author":"a","image":"","genres":["g","uncatalogued"],"description":"","published":"2001-01-01T00:00:00Z"}
            ]
        }"#;
        let dataset = catalog_storage::parse_dataset(json)?;
        assert_eq!(dataset.catalog.len(), 2);
        assert!(dataset.catalog.genres().get("uncatalogued").is_none());

        let query = SearchQuery {
            genre: "uncatalogued".to_string(),
            ..SearchQuery::default()
        };
        let hits = filter_books(&dataset.catalog, &query);
        assert_eq!(hits, vec![1]);
        let book = dataset.catalog.book(hits[0]).context("matched book")?;
        assert_eq!(book.id, "2");
        Ok(())
    }
}
