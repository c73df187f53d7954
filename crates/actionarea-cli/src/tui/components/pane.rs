//! Content region component.
//!
//! Shows the top unit of a stack, the stack beneath it and, while a
//! size change or an expanded enter is running, the snapshot fading out
//! over the region.

use actionarea_core::content::ContentUnit;
use actionarea_core::controller::Snapshot;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::theme::Theme;

/// One region of the presentation.
pub struct Pane<'a> {
    /// Block title
    pub label: &'a str,
    /// Units of the region's stack, oldest first
    pub units: &'a [ContentUnit],
    /// Snapshot covering the region, if any
    pub snapshot: Option<&'a Snapshot>,
    /// Rows kept free for the action bar
    pub bar_height: u16,
    /// Whether actions are routed to this region
    pub focused: bool,
}

impl Pane<'_> {
    /// Render the region and return the inner area available to its bar.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) -> Rect {
        let border = if self.focused {
            theme.border_focused
        } else {
            theme.border
        };
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let margin = self.units.last().map_or(0, ContentUnit::layout_margin);
        let content = Rect {
            x: inner.x + margin.min(inner.width),
            width: inner.width.saturating_sub(margin * 2),
            height: inner.height.saturating_sub(self.bar_height),
            ..inner
        };
        frame.render_widget(Paragraph::new(self.lines(theme)), content);
        inner
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(snapshot) = self.snapshot.filter(|snapshot| snapshot.alpha > 0) {
            let title = snapshot.title.as_deref().unwrap_or("(blank)");
            lines.push(Line::from(Span::styled(
                format!("~ {} ({}%)", title, snapshot.alpha),
                Style::default()
                    .fg(theme.faint)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        let Some(top) = self.units.last() else {
            lines.push(Line::from(Span::styled(
                "Nothing presented - press [m] to show a master",
                Style::default().fg(theme.faint),
            )));
            return lines;
        };

        let kind = if top.is_empty_state() {
            "empty state".to_string()
        } else {
            top.role().to_string()
        };
        lines.push(Line::from(Span::styled(
            top.title().to_string(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("{} · {}", kind, top.id()),
            Style::default().fg(theme.subtle),
        )));

        if self.units.len() > 1 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Stack",
                Style::default().fg(theme.faint),
            )));
            for (index, unit) in self.units.iter().enumerate().rev() {
                let is_top = index + 1 == self.units.len();
                let marker = if is_top { "> " } else { "  " };
                let style = if is_top {
                    Style::default().fg(theme.accent)
                } else {
                    Style::default().fg(theme.faint)
                };
                lines.push(Line::from(Span::styled(
                    format!("{}{}", marker, unit.title()),
                    style,
                )));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionarea_core::content::StackRole;

    fn pane<'a>(units: &'a [ContentUnit], snapshot: Option<&'a Snapshot>) -> Pane<'a> {
        Pane {
            label: "Master",
            units,
            snapshot,
            bar_height: 3,
            focused: true,
        }
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_region_hint() {
        let lines = pane(&[], None).lines(&Theme::DARK);
        assert_eq!(lines.len(), 1);
        assert!(text(&lines)[0].contains("press [m]"));
    }

    #[test]
    fn test_top_unit_and_stack() {
        let units = [ContentUnit::master("Stations 1"), ContentUnit::detail("Entry 1")];
        let lines = text(&pane(&units, None).lines(&Theme::DARK));

        assert_eq!(lines[0], "Entry 1");
        assert!(lines[1].starts_with("detail · "));
        assert_eq!(lines[4], "> Entry 1");
        assert_eq!(lines[5], "  Stations 1");
    }

    #[test]
    fn test_fading_snapshot_is_listed_first() {
        let units = [ContentUnit::master("Stations 1")];
        let snapshot = Snapshot {
            region: StackRole::Master,
            title: Some("Surveys 1".to_string()),
            alpha: 100,
        };
        let lines = text(&pane(&units, Some(&snapshot)).lines(&Theme::DARK));
        assert_eq!(lines[0], "~ Surveys 1 (100%)");

        let faded = Snapshot { alpha: 0, ..snapshot };
        let lines = text(&pane(&units, Some(&faded)).lines(&Theme::DARK));
        assert_eq!(lines[0], "Stations 1");
    }
}
