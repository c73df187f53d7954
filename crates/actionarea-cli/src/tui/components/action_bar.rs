//! Action bar component.
//!
//! Draws a controller action bar at the bottom of its region, following
//! the bar's rendered state: slide offset, opacity, the primary control
//! morph and the fading snapshot of the previous items.

use actionarea_core::action_bar::ActionBar;
use actionarea_core::content::Action;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::layout::bar_area;
use crate::tui::theme::Theme;

/// Action bar component.
pub struct ActionBarWidget;

impl ActionBarWidget {
    /// Render `bar` inside `region`.
    pub fn render(frame: &mut Frame, region: Rect, bar: &ActionBar, height: u16, theme: &Theme) {
        let visual = bar.visual();
        let Some(area) = bar_area(region, height, visual.offset) else {
            return;
        };

        let color = if bar.is_enabled() {
            theme.tint(bar.tint())
        } else {
            theme.faint
        };

        let mut block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(color));
        if bar.is_elevated() {
            block = block.style(Style::default().bg(theme.elevated));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = Vec::new();
        if let Some(primary) = Self::shown_primary(bar) {
            let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            if visual.primary_alpha < 100 {
                style = style.add_modifier(Modifier::DIM);
            }
            spans.push(Span::styled("[Enter] ", Style::default().fg(theme.subtle)));
            spans.push(Span::styled(primary.label(), style));
            spans.push(Span::raw("   "));
        }

        let fading = visual
            .items_snapshot
            .as_ref()
            .filter(|snapshot| !snapshot.is_empty());
        let (items, item_style) = match fading {
            Some(snapshot) => (snapshot, Style::default().fg(theme.faint)),
            None => (&visual.items, Style::default().fg(theme.text)),
        };
        spans.extend(Self::item_spans(items, item_style, theme));

        if spans.is_empty() {
            return;
        }
        let mut line_style = Style::default();
        if visual.alpha < 100 {
            line_style = line_style.add_modifier(Modifier::DIM);
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(line_style), inner);
    }

    /// The primary control drawn right now: the outgoing one until the
    /// incoming one starts to show.
    fn shown_primary(bar: &ActionBar) -> Option<&Action> {
        let visual = bar.visual();
        match (&visual.primary, &visual.outgoing_primary) {
            (Some(_), Some(outgoing)) if visual.primary_alpha == 0 => Some(outgoing),
            (Some(primary), _) => Some(primary),
            (None, outgoing) => outgoing.as_ref(),
        }
    }

    fn item_spans(items: &[Action], style: Style, theme: &Theme) -> Vec<Span<'static>> {
        items
            .iter()
            .enumerate()
            .flat_map(|(index, action)| {
                [
                    Span::styled(
                        format!("[{}] ", index + 1),
                        Style::default().fg(theme.subtle),
                    ),
                    Span::styled(action.label(), style),
                    Span::raw("  "),
                ]
            })
            .collect()
    }
}
