use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use conf_schedule::{app::ScheduleScreen, calendar::EventRecord, ui::theme::Theme};

use crate::tui::presentation::ViewOptions;

const TIME_COLUMN: usize = 9;
/// Each event takes a title line, a location line and a spacer.
const LINES_PER_ROW: usize = 3;

pub fn render(f: &mut Frame, screen: &ScheduleScreen, view: &ViewOptions, area: Rect) {
    let theme = &view.theme;
    let events = screen.events();

    let mut lines = Vec::new();

    if events.is_empty() {
        let message = screen.empty_list_message(view.show_fetch_errors);
        let color = match screen.last_outcome() {
            Some(outcome) if outcome.is_failure() && view.show_fetch_errors => theme.error,
            _ => theme.location,
        };
        lines.push(Line::from(Span::styled(message, Style::default().fg(color))));
    } else {
        let visible_rows = (area.height.saturating_sub(2) as usize / LINES_PER_ROW).max(1);
        let first = first_visible_row(screen.selected_index(), visible_rows);

        for (idx, event) in events.iter().enumerate().skip(first).take(visible_rows) {
            let is_selected = idx == screen.selected_index();
            let (time_style, title_style, location_style) = if is_selected {
                let base = Style::default().bg(theme.selected_bg).add_modifier(Modifier::BOLD);
                (base.fg(theme.selected_fg), base.fg(theme.selected_fg), base.fg(theme.location))
            } else {
                (
                    Style::default().fg(time_color(event, theme)).add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.location),
                )
            };

            let cursor = if is_selected { ">" } else { " " };

            lines.push(Line::from(vec![
                Span::styled(cursor, Style::default().fg(theme.time)),
                Span::styled(time_cell(event), time_style),
                Span::raw(" "),
                Span::styled(event.title.as_str(), title_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(TIME_COLUMN + 2)),
                Span::styled(event.location.as_str(), location_style),
            ]));
            lines.push(Line::from(""));
        }
    }

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

pub fn time_cell(event: &EventRecord) -> String {
    format!("{:<width$}", event.time, width = TIME_COLUMN)
}

/// All-day sessions get the label colour so they stand apart from timed ones.
pub fn time_color(event: &EventRecord, theme: &Theme) -> Color {
    if event.is_all_day() { theme.detail_label } else { theme.time }
}

/// Scrolls so the selected row stays in view.
pub fn first_visible_row(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected;
    }
    (selected + 1).saturating_sub(visible_rows)
}
