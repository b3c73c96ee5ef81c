use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use conf_schedule::{app::ScheduleScreen, ui::theme::Theme};
use crate::tui::{event_detail::{self, presentation::DetailScroll}, schedule_list};

pub struct ViewOptions {
    pub theme: Theme,
    pub show_fetch_errors: bool,
}

pub fn ui(f: &mut Frame, screen: &ScheduleScreen, view: &ViewOptions, detail_scroll: &mut DetailScroll) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let header = Paragraph::new(screen.header().to_string())
        .style(Style::default().fg(view.theme.header).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    if screen.is_loading() {
        render_loading(f, view, chunks[1]);
    } else {
        schedule_list::render(f, screen, view, chunks[1]);
    }

    let status = Paragraph::new(status_text(screen))
        .style(Style::default().fg(view.theme.status_bar))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    if let Some(payload) = screen.detail() {
        event_detail::presentation::render(f, payload, detail_scroll, view);
    }
}

fn render_loading(f: &mut Frame, view: &ViewOptions, area: Rect) {
    let vertical_pad = area.height.saturating_sub(3) / 2;
    let mut lines = vec![ratatui::text::Line::from(""); vertical_pad as usize];
    lines.push(ratatui::text::Line::from("⏳"));
    lines.push(ratatui::text::Line::from("Loading Events..."));

    let loading = Paragraph::new(lines)
        .style(Style::default().fg(view.theme.loading))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

pub fn status_text(screen: &ScheduleScreen) -> String {
    if screen.is_loading() {
        "Loading... | Press 'q' to quit".to_string()
    } else if screen.detail().is_some() {
        "Event details | 'q'/Esc to go back".to_string()
    } else {
        format!(
            "Events: {} | j/k = Navigate | Enter = Details | 'q' to quit",
            screen.events().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_reflects_loading_state() {
        let mut screen = ScheduleScreen::new("Conf");
        assert!(status_text(&screen).starts_with("Loading"));

        screen.settle(Ok(Vec::new()));
        assert!(status_text(&screen).starts_with("Events: 0"));
    }
}
