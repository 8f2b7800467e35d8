//! TUI rendering with ratatui
//!
//! Renders the picker using ratatui widgets and layouts.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{InputMode, PickerApp};

/// Colors used in the UI
mod colors {
    use ratatui::style::Color;

    pub const ACTIVE_BORDER: Color = Color::Cyan;
    pub const INACTIVE_BORDER: Color = Color::Gray;

    pub const DESCRIPTION: Color = Color::DarkGray;
    pub const FILTER: Color = Color::Yellow;

    pub const HIGHLIGHT_BG: Color = Color::DarkGray;
    pub const STATUS_BAR_BG: Color = Color::Blue;
    pub const HELP_BAR_BG: Color = Color::DarkGray;
}

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &PickerApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title / filter
            Constraint::Min(5),    // Items
            Constraint::Length(8), // Details of highlighted item
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_status_bar(frame, app, chunks[0]);
    render_item_list(frame, app, chunks[1]);
    render_details(frame, app, chunks[2]);
    render_help_bar(frame, app, chunks[3]);

    if app.input_mode == InputMode::Help {
        render_help_overlay(frame);
    }
}

fn render_status_bar(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("({})", app.count_text())),
    ];

    if app.input_mode == InputMode::Filter || !app.filter.is_empty() {
        let cursor = if app.input_mode == InputMode::Filter { "_" } else { "" };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("/{}{}", app.filter, cursor),
            Style::default().fg(colors::FILTER),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White).bg(colors::STATUS_BAR_BG))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn render_item_list(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let border_color = if app.input_mode == InputMode::Filter {
        colors::INACTIVE_BORDER
    } else {
        colors::ACTIVE_BORDER
    };

    if app.visible.is_empty() {
        let message = if app.items.is_empty() {
            "Nothing to choose from"
        } else {
            "No matches for filter"
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|&i| {
            let item = &app.items[i];
            let mut spans = vec![Span::raw(item.label.clone())];
            if !item.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", item.description),
                    Style::default().fg(colors::DESCRIPTION),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(colors::HIGHLIGHT_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let lines: Vec<Line> = app
        .highlighted()
        .map(|item| item.details.iter().map(|d| Line::from(d.as_str())).collect())
        .unwrap_or_default();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::INACTIVE_BORDER)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let help_text = match app.input_mode {
        InputMode::Normal => "j/k: Navigate | Enter: Select | /: Filter | q/Esc: Cancel | ?: Help",
        InputMode::Filter => "Type to filter | Enter: Keep filter | Esc: Clear filter",
        InputMode::Help => "Press Esc or ? to close",
    };

    let paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(Color::White).bg(colors::HELP_BAR_BG))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    // Clear the area first
    frame.render_widget(Clear, area);

    let help_text = Text::from(vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Up / k       Move selection up"),
        Line::from("  Down / j     Move selection down"),
        Line::from("  Home / g     First item"),
        Line::from("  End / G      Last item"),
        Line::from(""),
        Line::from(Span::styled(
            "Actions",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Enter        Choose highlighted item"),
        Line::from("  /            Filter by name or location"),
        Line::from(""),
        Line::from(Span::styled(
            "General",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  ?            Show this help"),
        Line::from("  q / Esc      Cancel without changes"),
        Line::from("  Ctrl+C       Cancel immediately"),
    ]);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::ACTIVE_BORDER)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
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
