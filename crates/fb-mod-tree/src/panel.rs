use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use fb_base::actions::Action;
use fb_base::config::constants::{INDENT_UNIT, MODAL_HEIGHT, MODAL_WIDTH, SCROLL_PAGE_AMOUNT};
use fb_base::config::{chars, strings, theme};

use crate::rows::Row;
use crate::types::EntryKind;

/// Cursor and scroll position of the tree view, plus hit areas from the last render.
#[derive(Debug, Default, Clone)]
pub struct TreeView {
    pub cursor: usize,
    pub scroll: usize,
    /// Inner area of the list, set on render
    pub list_area: Rect,
    /// Close control of the content dialog, set on render while it is shown
    pub close_button: Option<Rect>,
}

impl TreeView {
    /// Row index under a screen position, if any.
    pub fn row_at(&self, x: u16, y: u16, row_count: usize) -> Option<usize> {
        if !self.list_area.contains(Position::new(x, y)) {
            return None;
        }
        let index = self.scroll + (y - self.list_area.y) as usize;
        (index < row_count).then_some(index)
    }

    pub fn is_close_button(&self, x: u16, y: u16) -> bool {
        self.close_button.is_some_and(|rect| rect.contains(Position::new(x, y)))
    }

    /// Keep the cursor on an existing row
    pub fn clamp(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }

    fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }
}

pub struct TreePanel;

impl TreePanel {
    /// Map a key to an action. While the content dialog is open it swallows
    /// every key except the ones that close it.
    pub fn handle_key(&self, key: &KeyEvent, modal_open: bool) -> Option<Action> {
        if modal_open {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Some(Action::CloseContent),
                _ => Some(Action::None),
            };
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp(1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown(1)),
            KeyCode::PageUp => Some(Action::CursorUp(SCROLL_PAGE_AMOUNT)),
            KeyCode::PageDown => Some(Action::CursorDown(SCROLL_PAGE_AMOUNT)),
            KeyCode::Home => Some(Action::CursorHome),
            KeyCode::End => Some(Action::CursorEnd),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::Expand),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::Collapse),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, rows: &[Row], view: &mut TreeView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::border()))
            .style(Style::default().bg(theme::bg_surface()))
            .title(Span::styled(format!(" {} ", strings::tree_title()), Style::default().fg(theme::accent()).bold()));
        let inner = block.inner(area);
        view.list_area = inner;
        view.clamp(rows.len());
        view.scroll_to_cursor(inner.height as usize);

        let width = inner.width as usize;
        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(view.scroll)
            .take(inner.height as usize)
            .map(|(index, row)| row_line(row, index == view.cursor, width))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn row_line(row: &Row, selected: bool, width: usize) -> Line<'static> {
    let indent = " ".repeat(row.depth * INDENT_UNIT as usize);
    let indicator = match row.kind {
        EntryKind::Directory if row.is_open => format!("{} ", chars::ARROW_DOWN),
        EntryKind::Directory => format!("{} ", chars::ARROW_RIGHT),
        EntryKind::File => "  ".to_string(),
    };

    let mut name_style = Style::default().fg(theme::text());
    if row.kind == EntryKind::Directory {
        name_style = name_style.bold();
    }
    let mut indicator_style = Style::default().fg(theme::accent_dim());
    let mut muted_style = Style::default().fg(theme::text_muted());
    if selected {
        let bg = theme::bg_elevated();
        name_style = name_style.fg(theme::accent()).bg(bg);
        indicator_style = indicator_style.fg(theme::accent()).bg(bg);
        muted_style = muted_style.bg(bg);
    }

    let mut spans = vec![
        Span::styled(indent.clone(), if selected { muted_style } else { Style::default() }),
        Span::styled(indicator.clone(), indicator_style),
        Span::styled(row.name.clone(), name_style),
    ];
    let mut used = indent.width() + indicator.width() + row.name.width();
    if row.loading {
        let suffix = strings::loading_suffix();
        used += suffix.width();
        spans.push(Span::styled(suffix.to_string(), muted_style));
    }
    // Extend the highlight across the full row
    if selected && used < width {
        spans.push(Span::styled(" ".repeat(width - used), muted_style));
    }
    Line::from(spans)
}

/// Render the blocking content dialog centered in `area`. Returns the close control's area.
pub fn render_content_modal(frame: &mut Frame, area: Rect, content: &str) -> Rect {
    let width = MODAL_WIDTH.min(area.width);
    let height = MODAL_HEIGHT.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let modal_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::accent()))
        .style(Style::default().bg(theme::bg_surface()))
        .title(Span::styled(format!(" {} ", strings::modal_title()), Style::default().fg(theme::accent()).bold()));
    let inner = block.inner(modal_area);

    frame.render_widget(Clear, modal_area);
    frame.render_widget(block, modal_area);

    let [body, button_row, _] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    let text = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(content.to_string(), Style::default().fg(theme::text())))])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, body);

    let label = strings::modal_close_label();
    let label_width = (label.width() as u16).min(button_row.width);
    let button = Rect::new(
        button_row.x + button_row.width.saturating_sub(label_width) / 2,
        button_row.y,
        label_width,
        button_row.height,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_string(), Style::default().fg(theme::warning()).bold())),
        button,
    );
    button
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::visible_rows;
    use crate::store::TreeStore;
    use crate::types::{FsListingEntry, FsResponse, ROOT_PATH};

    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (area.y..area.y + area.height)
            .map(|y| (area.x..area.x + area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn sample_store() -> TreeStore {
        let mut store = TreeStore::new();
        let entries = vec![
            FsListingEntry { name: "a".into(), kind: EntryKind::Directory },
            FsListingEntry { name: "b.txt".into(), kind: EntryKind::File },
        ];
        store.finish_load(ROOT_PATH, Ok(FsResponse { id: String::new(), entries: Some(entries), contents: None }));
        store
    }

    #[test]
    fn keys_map_to_tree_actions() {
        let panel = TreePanel;
        assert_eq!(panel.handle_key(&key(KeyCode::Down), false), Some(Action::CursorDown(1)));
        assert_eq!(panel.handle_key(&key(KeyCode::PageUp), false), Some(Action::CursorUp(SCROLL_PAGE_AMOUNT)));
        assert_eq!(panel.handle_key(&key(KeyCode::Enter), false), Some(Action::Activate));
        assert_eq!(panel.handle_key(&key(KeyCode::Left), false), Some(Action::Collapse));
        assert_eq!(panel.handle_key(&key(KeyCode::Char('q')), false), None);
    }

    #[test]
    fn open_modal_swallows_tree_keys() {
        let panel = TreePanel;
        assert_eq!(panel.handle_key(&key(KeyCode::Down), true), Some(Action::None));
        assert_eq!(panel.handle_key(&key(KeyCode::Esc), true), Some(Action::CloseContent));
        assert_eq!(panel.handle_key(&key(KeyCode::Enter), true), Some(Action::CloseContent));
    }

    #[test]
    fn renders_indented_rows_with_indicators() {
        let mut store = sample_store();
        store.finish_load("a", Ok(FsResponse { id: String::new(), entries: None, contents: None }));
        let _ = store.toggle_entry("a");
        let rows = visible_rows(store.root());

        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        let mut view = TreeView::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                TreePanel.render(frame, area, &rows, &mut view)
            })
            .unwrap();

        let lines = buffer_lines(&terminal);
        assert!(lines[1].contains(&format!("{} root", chars::ARROW_DOWN)));
        assert!(lines[2].contains(&format!("  {} a", chars::ARROW_DOWN)));
        assert!(lines[3].contains("    b.txt"));
        assert_eq!(view.list_area, Rect::new(1, 1, 28, 6));
    }

    #[test]
    fn closed_directory_shows_right_arrow_and_loading_suffix() {
        let mut store = sample_store();
        let rows = visible_rows(store.root());
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        let mut view = TreeView::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                TreePanel.render(frame, area, &rows, &mut view)
            })
            .unwrap();
        assert!(buffer_lines(&terminal)[2].contains(&format!("{} a", chars::ARROW_RIGHT)));

        let _ = store.toggle_entry("a");
        let rows = visible_rows(store.root());
        terminal
            .draw(|frame| {
                let area = frame.area();
                TreePanel.render(frame, area, &rows, &mut view)
            })
            .unwrap();
        assert!(buffer_lines(&terminal)[2].contains(&format!("a{}", strings::loading_suffix())));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let rows: Vec<Row> = (0..20)
            .map(|i| Row {
                depth: 1,
                path: format!("f{}", i),
                name: format!("f{}", i),
                kind: EntryKind::File,
                is_open: false,
                loading: false,
            })
            .collect();
        let mut terminal = Terminal::new(TestBackend::new(20, 7)).unwrap();
        let mut view = TreeView { cursor: 12, ..TreeView::default() };
        terminal
            .draw(|frame| {
                let area = frame.area();
                TreePanel.render(frame, area, &rows, &mut view)
            })
            .unwrap();

        // 5 visible rows, cursor on the last one
        assert_eq!(view.scroll, 8);
        assert_eq!(view.row_at(3, 5, rows.len()), Some(12));
        assert_eq!(view.row_at(3, 1, rows.len()), Some(8));
        assert_eq!(view.row_at(0, 1, rows.len()), None);
    }

    #[test]
    fn cursor_is_clamped_to_rows() {
        let mut view = TreeView { cursor: 10, ..TreeView::default() };
        view.clamp(3);
        assert_eq!(view.cursor, 2);
        view.clamp(0);
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn modal_shows_content_and_close_control() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut button = Rect::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                button = render_content_modal(frame, area, "a/c.txt");
            })
            .unwrap();

        let lines = buffer_lines(&terminal);
        assert!(lines.iter().any(|l| l.contains("a/c.txt")));
        let label_row = &lines[button.y as usize];
        assert!(label_row.contains(strings::modal_close_label()));

        let mut view = TreeView { close_button: Some(button), ..TreeView::default() };
        assert!(view.is_close_button(button.x, button.y));
        view.close_button = None;
        assert!(!view.is_close_button(button.x, button.y));
    }
}
