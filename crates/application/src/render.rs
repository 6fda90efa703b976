use catalog_core::{ANY, Catalog, NameMap};

use crate::preview::InteractiveElement;

/// One rendered list entry. Carries the book identifier so interactions can
/// be resolved back to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewItem {
    pub id: String,
    pub image: String,
    pub title: String,
    pub author: String,
}

impl InteractiveElement for PreviewItem {
    fn book_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Append-only list of rendered entries. Callers clear it before a fresh render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContainer {
    items: Vec<PreviewItem>,
}

impl ListContainer {
    pub fn items(&self) -> &[PreviewItem] {
        &self.items
    }

    pub fn get(&self, idx: usize) -> Option<&PreviewItem> {
        self.items.get(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn append(&mut self, items: impl IntoIterator<Item = PreviewItem>) {
        self.items.extend(items);
    }
}

impl InteractiveElement for ListContainer {}

/// Builds one entry per catalog index and appends them to `target`.
pub fn render_previews(catalog: &Catalog, indices: &[usize], target: &mut ListContainer) {
    let items = indices
        .iter()
        .filter_map(|idx| catalog.book(*idx))
        .map(|book| PreviewItem {
            id: book.id.clone(),
            image: book.image.clone(),
            title: book.title.clone(),
            author: catalog.author_name(book).to_string(),
        });
    target.append(items);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Dropdown options for `map`, led by a synthetic option with value `any`.
pub fn build_options(map: &NameMap, all_label: &str) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(map.len() + 1);
    options.push(SelectOption {
        value: ANY.to_string(),
        label: all_label.to_string(),
    });
    options.extend(map.iter().map(|(id, name)| SelectOption {
        value: id.to_string(),
        label: name.to_string(),
    }));
    options
}
