use catalog_core::{Theme, ThemeColors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeController {
    theme: Theme,
    colors: ThemeColors,
}

impl ThemeController {
    pub fn new(initial: Theme) -> Self {
        let mut controller = Self::default();
        controller.apply(initial);
        controller
    }

    pub fn apply(&mut self, theme: Theme) {
        self.theme = theme;
        self.colors = theme.colors();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn colors(&self) -> ThemeColors {
        self.colors
    }
}
