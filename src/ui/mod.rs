use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use fb_base::config::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT, TREE_VIEW_HEIGHT_PERCENT, TREE_VIEW_WIDTH};
use fb_base::config::{chars, strings, theme};
use fb_mod_tree::{TreePanel, render_content_modal};

use crate::state::State;

pub fn render(frame: &mut Frame, state: &mut State) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::bg_base())), area);

    let [header, body, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    render_header(frame, header);
    TreePanel.render(frame, tree_area(body), &state.rows, &mut state.view);
    render_status_bar(frame, status);

    state.view.close_button = state.tree.selected_content().map(|content| render_content_modal(frame, area, content));
}

/// Fixed-width column centered in the body
fn tree_area(body: Rect) -> Rect {
    let [_, column, _] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(TREE_VIEW_WIDTH), Constraint::Fill(1)]).areas(body);
    let [_, tree, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Percentage(TREE_VIEW_HEIGHT_PERCENT),
        Constraint::Fill(1),
    ])
    .areas(column);
    tree
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(strings::title(), Style::default().fg(theme::accent()).bold())),
        Line::from(Span::styled(strings::subtitle(), Style::default().fg(theme::text_secondary()))),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(theme::border_muted())));
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, hint) in strings::hints().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(format!(" {} ", chars::SEPARATOR), Style::default().fg(theme::text_muted())));
        }
        spans.push(Span::styled(hint.key.clone(), Style::default().fg(theme::accent()).bold()));
        spans.push(Span::styled(format!(" {}", hint.label), Style::default().fg(theme::text_secondary())));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::bg_elevated())),
        area,
    );
}
