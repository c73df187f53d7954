//! Status bar component.
//!
//! Displays the controller's layout, transition type and interaction
//! mode, plus keybinding hints.

use actionarea_core::content::Mode;
use actionarea_core::controller::PresentationController;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::host::DemoHost;
use crate::tui::state::AppState;
use crate::tui::theme::Theme;

/// Status bar component.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        controller: &PresentationController<DemoHost>,
        state: &AppState,
        compact: bool,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        if compact {
            Self::render_compact(frame, inner_area, controller, theme);
        } else {
            Self::render_full(frame, inner_area, controller, state, theme);
        }
    }

    /// Render full status bar with sections.
    fn render_full(
        frame: &mut Frame,
        area: Rect,
        controller: &PresentationController<DemoHost>,
        state: &AppState,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Percentage(30),
            ])
            .split(area);

        let mut layout = vec![
            Span::styled("● ", Style::default().fg(theme.accent)),
            Span::styled(
                controller.layout().to_string(),
                Style::default().fg(theme.text),
            ),
        ];
        if state.rotated {
            layout.push(Span::styled(" rotated", Style::default().fg(theme.warning)));
        }
        frame.render_widget(Paragraph::new(Line::from(layout)), chunks[0]);

        let mut transition = vec![
            Span::styled(
                controller.transition().to_string(),
                Style::default().fg(theme.subtle),
            ),
            Span::raw("  "),
            Self::mode_span(controller.state(), theme),
        ];
        if let Some(progress) = controller.animation_progress() {
            transition.push(Span::styled(
                format!("  {:>3.0}%", progress * 100.0),
                Style::default().fg(theme.info),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(transition)), chunks[1]);

        let hints = Line::from(vec![
            Span::styled("[?]", Style::default().fg(theme.subtle)),
            Span::raw(" Help  "),
            Span::styled("[L]", Style::default().fg(theme.subtle)),
            Span::raw(" Log  "),
            Span::styled("[Q]", Style::default().fg(theme.subtle)),
            Span::raw(" Quit"),
        ]);
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(theme.faint)),
            chunks[2],
        );
    }

    /// Render compact status bar for narrow terminals.
    fn render_compact(
        frame: &mut Frame,
        area: Rect,
        controller: &PresentationController<DemoHost>,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let summary = Line::from(vec![
            Span::styled(
                controller.transition().to_string(),
                Style::default().fg(theme.subtle),
            ),
            Span::raw(" "),
            Self::mode_span(controller.state(), theme),
        ]);
        frame.render_widget(Paragraph::new(summary), chunks[0]);

        let hints = Span::styled("?:help q:quit", Style::default().fg(theme.faint));
        frame.render_widget(Paragraph::new(Line::from(hints)), chunks[1]);
    }

    fn mode_span(mode: Mode, theme: &Theme) -> Span<'static> {
        match mode {
            Mode::Normal => Span::styled("normal", Style::default().fg(theme.faint)),
            Mode::Modal => Span::styled(
                "MODAL",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}
