//! ratatui-based UI.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context as _;
use catalog_application::{AppContext, InteractiveElement, SearchQuery, SelectOption};
use catalog_core::{ANY, Rgb, Theme};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};
use tracing::{debug, info};
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

const EMPTY_STATE_MESSAGE: &str = "No results found. Your filters might be too narrow.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Quit,
}

#[derive(Debug, Clone)]
pub struct UiOutcome {
    pub ctx: AppContext,
    pub exit: UiExit,
}

pub struct Ui {
    ctx: AppContext,
    search_panel: SearchPanel,
    settings_panel: SettingsPanel,
    list_state: ListState,
    list_area: Option<Rect>,
    show_more_area: Option<Rect>,
}

/// The drawn list surface. Sits behind every row in a click's hit chain.
struct ListRegion;

impl InteractiveElement for ListRegion {}

impl Ui {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            search_panel: SearchPanel::default(),
            settings_panel: SettingsPanel::default(),
            list_state: ListState::default(),
            list_area: None,
            show_more_area: None,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<UiOutcome> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        info!(
            books = self.ctx.catalog.len(),
            page_size = self.ctx.pagination.page_size(),
            theme = %self.ctx.theme.theme(),
            "ui started"
        );
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(outcome)), Ok(())) => Ok(outcome),
            (Ok(Ok(_)), Err(err)) => Err(err),
            (Ok(Err(err)), _) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn accent_color(&self) -> Color {
        match self.ctx.theme.theme() {
            Theme::Day => Color::Blue,
            Theme::Night => Color::Yellow,
        }
    }

    fn base_style(&self) -> Style {
        let colors = self.ctx.theme.colors();
        Style::default()
            .fg(rgb_color(colors.dark))
            .bg(rgb_color(colors.light))
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<UiOutcome> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw = self.handle_mouse(mouse);
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }

                    needs_redraw = true;
                    if let Some(exit) = self.handle_key(key)? {
                        return Ok(UiOutcome {
                            ctx: self.ctx.clone(),
                            exit,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        if self.ctx.preview.open {
            self.handle_preview_key(key)
        } else if self.ctx.settings_open {
            self.handle_settings_panel_key(key)
        } else if self.ctx.search_open {
            self.handle_search_panel_key(key)
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Ok(Some(UiExit::Quit)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.ctx.select_next();
                Ok(None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.ctx.select_prev();
                Ok(None)
            }
            KeyCode::Enter => {
                self.ctx.activate_selected();
                Ok(None)
            }
            KeyCode::Char('m') => {
                self.ctx.show_more();
                Ok(None)
            }
            KeyCode::Char('/') => {
                self.open_search_panel();
                Ok(None)
            }
            KeyCode::Char('s') => {
                self.open_settings_panel();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Form values survive a cancel and show up again on the next open.
    fn open_search_panel(&mut self) {
        self.search_panel.focus = SearchFocus::Title;
        self.ctx.open_search();
    }

    fn open_settings_panel(&mut self) {
        self.settings_panel.theme = self.ctx.theme.theme();
        self.ctx.open_settings();
    }

    fn handle_search_panel_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char('u') = key.code
        {
            self.search_panel.title.clear();
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => {
                self.ctx.close_search();
            }
            KeyCode::Enter => {
                self.submit_search_panel();
            }
            KeyCode::Tab => {
                self.search_panel.focus = self.search_panel.focus.next();
            }
            KeyCode::BackTab => {
                self.search_panel.focus = self.search_panel.focus.prev();
            }
            KeyCode::Left => match self.search_panel.focus {
                SearchFocus::Title => {}
                SearchFocus::Author => {
                    self.search_panel.author_cursor = cycle_prev(
                        self.search_panel.author_cursor,
                        self.ctx.author_options.len(),
                    );
                }
                SearchFocus::Genre => {
                    self.search_panel.genre_cursor = cycle_prev(
                        self.search_panel.genre_cursor,
                        self.ctx.genre_options.len(),
                    );
                }
            },
            KeyCode::Right => match self.search_panel.focus {
                SearchFocus::Title => {}
                SearchFocus::Author => {
                    self.search_panel.author_cursor = cycle_next(
                        self.search_panel.author_cursor,
                        self.ctx.author_options.len(),
                    );
                }
                SearchFocus::Genre => {
                    self.search_panel.genre_cursor = cycle_next(
                        self.search_panel.genre_cursor,
                        self.ctx.genre_options.len(),
                    );
                }
            },
            KeyCode::Backspace => {
                if self.search_panel.focus == SearchFocus::Title {
                    self.search_panel.title.pop();
                }
            }
            KeyCode::Char(ch) => {
                if self.search_panel.focus == SearchFocus::Title && !ch.is_control() {
                    self.search_panel.title.push(ch);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn submit_search_panel(&mut self) {
        let query = SearchQuery {
            title: self.search_panel.title.clone(),
            author: option_value(&self.ctx.author_options, self.search_panel.author_cursor),
            genre: option_value(&self.ctx.genre_options, self.search_panel.genre_cursor),
        };
        self.ctx.submit_search(query);
        self.list_state = ListState::default();
    }

    fn handle_settings_panel_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        match key.code {
            KeyCode::Esc => {
                self.ctx.close_settings();
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Char(' ') => {
                self.settings_panel.theme = self.settings_panel.theme.toggle();
            }
            KeyCode::Char('d') => {
                self.settings_panel.theme = Theme::Day;
            }
            KeyCode::Char('n') => {
                self.settings_panel.theme = Theme::Night;
            }
            KeyCode::Enter => {
                self.ctx.submit_theme(self.settings_panel.theme);
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_preview_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.ctx.close_preview();
        }
        Ok(None)
    }

    /// Returns whether the click changed anything worth redrawing.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        if self.ctx.preview.open || self.ctx.search_open || self.ctx.settings_open {
            return false;
        }

        let pos = Position::new(mouse.column, mouse.row);
        if self.show_more_area.is_some_and(|area| area.contains(pos)) {
            return self.ctx.show_more();
        }

        let Some(area) = self.list_area.filter(|area| area.contains(pos)) else {
            return false;
        };
        let row = self.list_state.offset() + usize::from(pos.y - area.y);
        self.activate_row(row)
    }

    fn activate_row(&mut self, row: usize) -> bool {
        let item = self.ctx.list.get(row).cloned();
        let region = ListRegion;
        let mut chain: Vec<&dyn InteractiveElement> = Vec::with_capacity(2);
        if let Some(item) = item.as_ref() {
            chain.push(item);
        }
        chain.push(&region);

        let opened = self.ctx.activate(&chain);
        if opened {
            self.ctx.selected = row;
        }
        debug!(row, opened, "list click");
        opened
    }

    fn draw(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.base_style()), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(self.main_header_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, layout[0]);

        let body_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[1]);

        let list_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(body_layout[0]);

        self.draw_library(frame, list_layout[0]);
        self.draw_show_more(frame, list_layout[1]);
        frame.render_widget(self.draw_details(), body_layout[1]);

        let footer = Paragraph::new(Text::from(self.main_footer_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if self.ctx.search_open {
            self.draw_search_panel(area, frame);
        }

        if self.ctx.settings_open {
            self.draw_settings_panel(area, frame);
        }

        if self.ctx.preview.open {
            self.draw_preview_panel(area, frame);
        }
    }

    fn main_header_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled("Catalog", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" · browse"),
        ])];

        if let Some(status_line) = self.active_filter_status_line() {
            lines.push(status_line);
        }

        lines
    }

    fn active_filter_status_line(&self) -> Option<Line<'static>> {
        let query = &self.ctx.query;
        if query.is_unfiltered() {
            return None;
        }

        let mut spans = vec![Span::styled(
            "Filters: ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !query.title.trim().is_empty() {
            spans.push(Span::raw(format!("title:\"{}\"  ", query.title)));
        }
        if query.author != ANY {
            let name = self.ctx.catalog.authors().get(&query.author).unwrap_or("?");
            spans.push(Span::raw(format!("author:{name}  ")));
        }
        if query.genre != ANY {
            let name = self.ctx.catalog.genres().get(&query.genre).unwrap_or("?");
            spans.push(Span::raw(format!("genre:{name}  ")));
        }
        spans.push(Span::styled(
            format!("{}/{} matches", self.ctx.matches.len(), self.ctx.catalog.len()),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
        Some(Line::from(spans))
    }

    fn main_footer_lines(&self) -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if self.ctx.preview.open {
            return vec![Line::from(vec![
                Span::styled("Esc", bold),
                Span::raw(" close preview"),
            ])];
        }

        if self.ctx.search_open || self.ctx.settings_open {
            return vec![Line::from(vec![
                Span::styled("Esc", bold),
                Span::raw(" cancel  "),
                Span::styled("Enter", bold),
                Span::raw(" apply"),
            ])];
        }

        vec![
            Line::from(vec![
                Span::styled("Esc", bold),
                Span::raw(" quit  "),
                Span::styled("↑/↓", bold),
                Span::raw(" move  "),
                Span::styled("Enter", bold),
                Span::raw(" preview"),
            ]),
            Line::from(vec![
                Span::styled("m", bold),
                Span::raw(" show more  "),
                Span::styled("/", bold),
                Span::raw(" search  "),
                Span::styled("s", bold),
                Span::raw(" settings"),
            ]),
        ]
    }

    fn draw_library(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Books");
        let inner = block.inner(area);

        if self.ctx.is_empty_state() {
            self.list_area = None;
            let paragraph = Paragraph::new(Text::from(vec![Line::raw(EMPTY_STATE_MESSAGE)]))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let max_width = inner.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .ctx
            .list
            .items()
            .iter()
            .map(|item| {
                let title_width = item.title.width();
                let author = truncate_to_width(
                    &item.author,
                    max_width.saturating_sub(title_width + 3),
                );
                let mut spans = vec![Span::styled(
                    truncate_to_width(&item.title, max_width),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if !author.is_empty() {
                    spans.push(Span::raw(" · "));
                    spans.push(Span::raw(author));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        self.list_state.select(Some(
            self.ctx.selected.min(self.ctx.list.len().saturating_sub(1)),
        ));
        frame.render_stateful_widget(list, area, &mut self.list_state);
        self.list_area = Some(inner);
    }

    fn draw_show_more(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let state = self.ctx.show_more_state();
        let style = if state.disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD)
        };
        let label = format!("[ Show more ({}) ]", state.remaining);
        let paragraph = Paragraph::new(Line::from(Span::styled(label, style)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        self.show_more_area = Some(area);
    }

    fn draw_details(&self) -> Paragraph<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(vec![
            Span::styled("Showing: ", bold),
            Span::raw(format!(
                "{} of {}",
                self.ctx.visible_count(),
                self.ctx.matches.len()
            )),
            Span::raw("  "),
            Span::styled("Theme: ", bold),
            Span::raw(self.ctx.theme.theme().to_string()),
        ])];
        lines.push(Line::raw(""));

        if let Some(item) = self.ctx.selected_item() {
            lines.push(Line::from(vec![
                Span::styled("Selected: ", bold),
                Span::raw(item.title.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Author: ", bold),
                Span::raw(item.author.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Cover: ", bold),
                Span::raw(item.image.clone()),
            ]));
        } else {
            lines.push(Line::raw("No selection."));
        }

        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true })
    }

    fn draw_search_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .style(self.base_style())
            .title(Span::styled(
                "Search",
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let focus_style = Style::default()
            .fg(self.accent_color())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let style_for = |focus: SearchFocus| {
            if self.search_panel.focus == focus {
                focus_style
            } else {
                label_style
            }
        };

        let title_value = if self.search_panel.focus == SearchFocus::Title {
            format!("{}▏", self.search_panel.title)
        } else {
            self.search_panel.title.clone()
        };
        let author = option_label(&self.ctx.author_options, self.search_panel.author_cursor);
        let genre = option_label(&self.ctx.genre_options, self.search_panel.genre_cursor);

        let lines = vec![
            Line::from(vec![
                Span::styled("Title: ", style_for(SearchFocus::Title)),
                Span::raw(title_value),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Author: ", style_for(SearchFocus::Author)),
                Span::raw(format!("‹ {author} ›")),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Genre: ", style_for(SearchFocus::Genre)),
                Span::raw(format!("‹ {genre} ›")),
            ]),
        ];
        let form = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
        frame.render_widget(form, sections[0]);

        let help_lines = vec![
            Line::from(vec![
                Span::styled("Tab", label_style),
                Span::raw(" field  "),
                Span::styled("←/→", label_style),
                Span::raw(" choose  "),
                Span::styled("Ctrl+u", label_style),
                Span::raw(" clear title"),
            ]),
            Line::from(vec![
                Span::styled("Esc", label_style),
                Span::raw(" cancel  "),
                Span::styled("Enter", label_style),
                Span::raw(" search"),
            ]),
        ];
        let help = Paragraph::new(Text::from(help_lines))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(help, sections[1]);
    }

    fn draw_settings_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(45, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .style(self.base_style())
            .title(Span::styled(
                "Settings",
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let choice = self.settings_panel.theme;
        let lines = vec![Line::from(vec![
            Span::styled("Theme: ", Style::default().add_modifier(Modifier::BOLD)),
            option_chip("day", choice == Theme::Day),
            Span::raw(" "),
            option_chip("night", choice == Theme::Night),
        ])];
        frame.render_widget(Paragraph::new(Text::from(lines)), sections[0]);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help = Paragraph::new(Line::from(vec![
            Span::styled("←/→", bold),
            Span::raw(" choose  "),
            Span::styled("Enter", bold),
            Span::raw(" save  "),
            Span::styled("Esc", bold),
            Span::raw(" cancel"),
        ]))
        .wrap(Wrap { trim: true });
        frame.render_widget(help, sections[1]);
    }

    fn draw_preview_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let preview = &self.ctx.preview;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let lines = vec![
            Line::from(vec![
                Span::styled("Cover: ", bold),
                Span::raw(preview.image.clone()),
            ]),
            Line::from(vec![
                Span::styled("Backdrop: ", dim),
                Span::styled(preview.backdrop.clone(), dim),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                preview.subtitle.clone(),
                Style::default()
                    .fg(self.accent_color())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::raw(preview.description.clone()),
        ];

        let paragraph = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(self.base_style())
                    .title(Span::styled(preview.title.clone(), bold)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchFocus {
    Title,
    Author,
    Genre,
}

impl SearchFocus {
    fn next(self) -> Self {
        match self {
            SearchFocus::Title => SearchFocus::Author,
            SearchFocus::Author => SearchFocus::Genre,
            SearchFocus::Genre => SearchFocus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            SearchFocus::Title => SearchFocus::Genre,
            SearchFocus::Author => SearchFocus::Title,
            SearchFocus::Genre => SearchFocus::Author,
        }
    }
}

#[derive(Debug)]
struct SearchPanel {
    title: String,
    author_cursor: usize,
    genre_cursor: usize,
    focus: SearchFocus,
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self {
            title: String::new(),
            author_cursor: 0,
            genre_cursor: 0,
            focus: SearchFocus::Title,
        }
    }
}

#[derive(Debug, Default)]
struct SettingsPanel {
    theme: Theme,
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn option_value(options: &[SelectOption], cursor: usize) -> String {
    options
        .get(cursor)
        .map(|o| o.value.clone())
        .unwrap_or_else(|| ANY.to_string())
}

fn option_label(options: &[SelectOption], cursor: usize) -> String {
    options
        .get(cursor)
        .map(|o| o.label.clone())
        .unwrap_or_default()
}

fn cycle_next(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1) % len
    }
}

fn cycle_prev(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + len - 1) % len
    }
}

fn option_chip(label: &str, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(label.to_string(), style)
}

/// Cuts `text` to at most `max_width` columns, ending in `…` when shortened.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}
