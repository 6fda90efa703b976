//! Core domain types for the catalog browser.

use chrono::{DateTime, Datelike as _, Utc};
use serde::Deserialize;

mod catalog;

pub use catalog::{Catalog, NameMap};

/// Filter value meaning "no restriction" for author and genre choices.
pub const ANY: &str = "any";

pub const DEFAULT_PAGE_SIZE: usize = 36;
pub const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub genres: Vec<String>,
    pub description: String,
    pub published: DateTime<Utc>,
}

impl Book {
    pub fn published_year(&self) -> i32 {
        self.published.year()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    /// The pair of display variables this theme writes.
    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Day => ThemeColors {
                dark: Rgb::INK,
                light: Rgb::PAPER,
            },
            Theme::Night => ThemeColors {
                dark: Rgb::PAPER,
                light: Rgb::INK,
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "light" => Ok(Theme::Day),
            "night" | "dark" => Ok(Theme::Night),
            _ => Err("unknown theme"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const INK: Rgb = Rgb(10, 10, 20);
    pub const PAPER: Rgb = Rgb(255, 255, 255);
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

/// The two display variables: `dark` is used for text, `light` for surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub dark: Rgb,
    pub light: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Theme::Day.colors()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: Option<usize>,
    pub theme: Option<Theme>,
    pub data_path: Option<String>,
}

impl Settings {
    pub fn normalize(&mut self) {
        self.page_size = self.page_size.map(|size| size.clamp(1, MAX_PAGE_SIZE));
        self.data_path = self
            .data_path
            .take()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
    }

    /// Page size to use given the dataset's own constant.
    pub fn effective_page_size(&self, dataset_page_size: usize) -> usize {
        self.page_size
            .unwrap_or(dataset_page_size)
            .clamp(1, MAX_PAGE_SIZE)
    }
}
