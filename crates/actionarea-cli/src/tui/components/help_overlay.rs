//! Help overlay modal component.
//!
//! Displays the keybinding reference.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::theme::Theme;

/// Help overlay component.
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the help overlay.
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let overlay_area = centered_rect(80, 80, area);

        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .title(" Help - Press Esc to close ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.backdrop));

        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let sections = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let presentation = vec![
            heading(" PRESENTATION", theme),
            Line::from(""),
            binding_line("m", "Show a new master"),
            binding_line("d", "Show a new detail"),
            binding_line("Bksp / Esc / b", "Back"),
            binding_line("r", "Reveal the master"),
            binding_line("s", "Reshow the modal detail"),
            binding_line("M", "Toggle modal mode"),
            binding_line("o", "Rotate the display"),
        ];
        frame.render_widget(
            Paragraph::new(presentation).wrap(Wrap { trim: false }),
            sections[0],
        );

        let actions = vec![
            heading(" ACTION BAR", theme),
            Line::from(""),
            binding_line("Enter", "Run the primary action"),
            binding_line("1-4", "Run a secondary action"),
            binding_line("e", "Toggle action enablement"),
            Line::from(""),
            heading(" GLOBAL", theme),
            Line::from(""),
            binding_line("L", "Toggle log panel"),
            binding_line("?", "Show this help"),
            binding_line("Q / Ctrl+C", "Quit"),
        ];
        frame.render_widget(
            Paragraph::new(actions).wrap(Wrap { trim: false }),
            sections[1],
        );
    }
}

fn heading(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{:<15}", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

/// Calculate a centered rectangle.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 80, area);
        assert!(popup.x >= 10 && popup.y >= 5);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }

    #[test]
    fn test_binding_line_pads_key() {
        let line = binding_line("m", "Show a new master");
        assert_eq!(line.to_string(), format!("  {:<15}Show a new master", "m"));
    }
}
