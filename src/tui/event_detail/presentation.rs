use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use conf_schedule::calendar::DetailPayload;

use super::content_formatting::description_lines;
use crate::tui::presentation::ViewOptions;

/// Scroll position of the detail panel. The upper bound is refreshed on every draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetailScroll {
    offset: usize,
    max: usize,
}

impl DetailScroll {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_max(&mut self, max: usize) {
        self.max = max;
        self.offset = self.offset.min(max);
    }

    pub fn scroll_down(&mut self) {
        if self.offset < self.max {
            self.offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn build_detail_lines(payload: &DetailPayload, width: usize) -> Vec<String> {
    let mut lines = vec![
        payload.title.clone(),
        String::new(),
        format!("📍 {}", payload.location),
        format!("🔖 {}", payload.id),
        String::new(),
    ];

    let description = description_lines(&payload.description, width);
    if description.is_empty() {
        lines.push("No description provided.".to_string());
    } else {
        lines.push("📝 Description:".to_string());
        lines.push(String::new());
        lines.extend(description);
    }

    lines
}

pub fn render(f: &mut Frame, payload: &DetailPayload, scroll: &mut DetailScroll, view: &ViewOptions) {
    let area = f.size();
    let panel_width = (area.width as f32 * 0.8) as u16;
    let panel_height = (area.height as f32 * 0.8) as u16;
    let panel_area = Rect {
        x: area.width.saturating_sub(panel_width) / 2,
        y: area.height.saturating_sub(panel_height) / 2,
        width: panel_width,
        height: panel_height,
    };

    f.render_widget(Clear, panel_area);

    let text_width = panel_width.saturating_sub(4) as usize;
    let theme = &view.theme;

    let mut lines: Vec<Line> = build_detail_lines(payload, text_width)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| {
            if idx == 0 {
                Line::from(Span::styled(text, Style::default().fg(theme.header).add_modifier(Modifier::BOLD)))
            } else if text.starts_with("📍") {
                Line::from(Span::styled(text, Style::default().fg(theme.location)))
            } else if text.starts_with("📝") {
                Line::from(Span::styled(text, Style::default().fg(theme.detail_label).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let visible = panel_height.saturating_sub(3) as usize;
    scroll.set_max(lines.len().saturating_sub(visible));
    lines = lines.into_iter().skip(scroll.offset()).take(visible).collect();
    lines.push(Line::from(vec![
        Span::styled("j/k", Style::default().fg(theme.time)),
        Span::raw(" = Scroll | "),
        Span::styled("q/Esc", Style::default().fg(theme.error)),
        Span::raw(" = Back"),
    ]));

    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.detail_border))
                .title(" Event Details "),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(detail, panel_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(description: &str) -> DetailPayload {
        DetailPayload {
            id: "ev1".to_string(),
            title: "Opening Ceremony".to_string(),
            location: "TBD".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn scroll_stops_at_last_page() {
        let mut scroll = DetailScroll::default();
        scroll.set_max(2);

        for _ in 0..5 {
            scroll.scroll_down();
        }
        assert_eq!(scroll.offset(), 2);

        scroll.scroll_up();
        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn shrinking_content_pulls_offset_back() {
        let mut scroll = DetailScroll::default();
        scroll.set_max(10);
        scroll.scroll_down();
        scroll.scroll_down();
        scroll.scroll_down();

        scroll.set_max(1);

        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn detail_lines_start_with_title_and_location() {
        let lines = build_detail_lines(&payload(""), 60);

        assert_eq!(lines[0], "Opening Ceremony");
        assert!(lines.iter().any(|l| l.contains("TBD")));
        assert!(lines.iter().any(|l| l.contains("ev1")));
    }

    #[test]
    fn empty_description_gets_placeholder() {
        let lines = build_detail_lines(&payload(""), 60);
        assert_eq!(lines.last().map(String::as_str), Some("No description provided."));
    }

    #[test]
    fn description_follows_its_label() {
        let lines = build_detail_lines(&payload("Keynote by the chair."), 60);
        assert_eq!(lines.last().map(String::as_str), Some("Keynote by the chair."));
    }
}
