//! TUI application main loop.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use actionarea_core::content::{BackBinding, Mode, StackRole};
use actionarea_core::controller::{ActionSlot, PresentationController};
use actionarea_core::host::FeatureToggleProvider;
use actionarea_core::layout::Size;
use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Terminal;

use super::action::Action;
use super::components::{ActionBarWidget, HelpOverlay, Pane, StatusBar};
use super::content::Activity;
use super::event::{map_key_event, EventHandler};
use super::layout::ComputedLayout;
use super::state::{AppState, LogEntry, LogLevel};
use super::theme::Theme;
use crate::commands::load_config;
use crate::host::{DemoHost, HostRecord};

/// TUI command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct TuiArgs {
    /// Theme name
    pub theme: Option<String>,
    /// Fixed display size
    pub size: Option<Size>,
}

/// Main TUI application.
pub struct App {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Presentation controller driving both regions
    controller: PresentationController<DemoHost>,
    /// Actions executed by the sample content
    activity: Activity,
    /// Event handler
    events: EventHandler,
    /// Theme
    theme: Theme,
    /// Interval between frames and animation ticks
    frame_interval: Duration,
    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create a new TUI application.
    pub fn new(args: TuiArgs) -> Result<Self> {
        let config = load_config();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;

        let state = AppState {
            log_visible: config.ui.show_log,
            size: (size.width, size.height),
            pinned: args.size,
            ..AppState::default()
        };

        let theme = Theme::from_name(args.theme.as_deref().unwrap_or(&config.ui.theme));

        let controller =
            PresentationController::new(DemoHost::new(), state.display_size(), &config)
                .with_root_back(BackBinding::new("dashboard", "close"));

        let events = EventHandler::new(Duration::from_millis(50));

        let mut app = Self {
            terminal,
            state,
            controller,
            activity: Activity::default(),
            events,
            theme,
            frame_interval: config.animation.frame_interval,
            should_quit: false,
        };
        app.log_info(&format!(
            "Display {} is {}",
            app.state.display_size(),
            app.controller.layout()
        ));
        Ok(app)
    }

    /// Run the main application loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            let now = Instant::now();
            self.controller
                .tick(now.duration_since(last_tick))
                .context("Animation step failed")?;
            last_tick = now;

            self.collect_host_records();

            self.draw()?;

            if let Ok(Some(event)) =
                tokio::time::timeout(self.frame_interval, self.events.next()).await
            {
                self.handle_event(&event)?;
            }

            if self.should_quit {
                break;
            }
        }

        self.events.cancel();
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let theme = &self.theme;
        let controller = &self.controller;

        self.terminal.draw(|frame| {
            let size = frame.area();
            let metrics = controller.metrics();
            let split = controller.is_expanded().then_some(&metrics);

            let layout = ComputedLayout::compute(size, state.log_visible, split);

            Self::render_header(frame, layout.header, state, theme);

            let snapshot = move |role| {
                controller
                    .snapshots()
                    .iter()
                    .find(|snapshot| snapshot.region == role)
            };
            let focus = Self::focused_role(controller);

            let master_label = if layout.detail.is_some() {
                "Master"
            } else {
                "Content"
            };
            let master = Pane {
                label: master_label,
                units: controller.master_stack().all(),
                snapshot: snapshot(StackRole::Master),
                bar_height: metrics.bar_height,
                focused: focus == StackRole::Master,
            };
            let inner = master.render(frame, layout.master, theme);
            ActionBarWidget::render(
                frame,
                inner,
                controller.master_bar(),
                metrics.bar_height,
                theme,
            );

            if let Some(area) = layout.detail {
                let detail = Pane {
                    label: "Detail",
                    units: controller.detail_stack().all(),
                    snapshot: snapshot(StackRole::Detail),
                    bar_height: metrics.bar_height,
                    focused: focus == StackRole::Detail,
                };
                let inner = detail.render(frame, area, theme);
                ActionBarWidget::render(
                    frame,
                    inner,
                    controller.detail_bar(),
                    metrics.bar_height,
                    theme,
                );
            }

            StatusBar::render(frame, layout.status, controller, state, layout.compact, theme);

            if let Some(log_area) = layout.log {
                Self::render_log(frame, log_area, state, theme);
            }

            if state.help_visible {
                HelpOverlay::render(frame, size, theme);
            }
        })?;

        Ok(())
    }

    fn render_header(frame: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
        let version = env!("CARGO_PKG_VERSION");
        let mut spans = vec![Span::styled(
            format!(" Action Area v{} ", version),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )];
        let display = match state.pinned {
            Some(_) => format!(" display {} (pinned)", state.display_size()),
            None => format!(" display {}", state.display_size()),
        };
        spans.push(Span::styled(display, Style::default().fg(theme.faint)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_log(frame: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
        let block = Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        let inner = block.inner(area);
        let max_width = inner.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = state
            .log
            .iter()
            .rev()
            .take(inner.height as usize)
            .map(|entry| {
                let level_style = match entry.level {
                    LogLevel::Info => Style::default().fg(theme.info),
                    LogLevel::Warn => Style::default().fg(theme.warning),
                    LogLevel::Error => Style::default().fg(theme.danger),
                };

                let time = entry.timestamp.format("%H:%M:%S");
                let prefix = format!("{} [{}] ", time, entry.level.as_str());
                let msg_width = max_width.saturating_sub(prefix.len());
                let truncated_msg = truncate_str(&entry.message, msg_width);
                let text = format!("{}{}", prefix, truncated_msg);

                ListItem::new(Span::styled(text, level_style))
            })
            .collect();

        let list = if items.is_empty() {
            List::new(vec![ListItem::new(Span::styled(
                "No log entries",
                Style::default().fg(theme.faint),
            ))])
            .block(block)
        } else {
            List::new(items).block(block)
        };

        frame.render_widget(list, area);
    }

    fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                let action = map_key_event(*key, &self.state);
                self.handle_action(action)
            }
            Event::Resize(width, height) => self.handle_resize(*width, *height),
            _ => Ok(()),
        }
    }

    /// Follow the terminal size unless the display size is pinned.
    fn handle_resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.state.size = (width, height);
        if self.state.pinned.is_some() {
            return Ok(());
        }
        self.transition_to_display_size()
    }

    fn transition_to_display_size(&mut self) -> Result<()> {
        let size = self.state.display_size();
        let before = self.controller.layout();
        self.controller
            .view_will_transition(size)
            .context("Size transition failed")?;
        let after = self.controller.layout();
        if before.orientation() != after.orientation() || before.is_expanded() != after.is_expanded()
        {
            self.log_info(&format!("Layout changed to {}", after));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        if action.is_navigation() && !self.controller.is_settled() {
            self.log_warn("Busy: wait for the running transition to finish");
            return Ok(());
        }

        let outcome = match action {
            Action::ShowMaster => {
                let unit = self.activity.master(self.state.masters_created);
                self.state.masters_created += 1;
                self.log_info(&format!("Show master {}", unit.title()));
                self.controller.show(unit)
            }
            Action::ShowDetail => {
                let unit = self.activity.detail(self.state.details_created);
                self.state.details_created += 1;
                self.log_info(&format!("Show detail {}", unit.title()));
                self.controller.show_detail(unit)
            }
            Action::Back => self.controller.back(),
            Action::RevealMaster => self.controller.reveal_master(),
            Action::ReshowDetail => self.controller.reshow_detail(),
            Action::ToggleModal => {
                let mode = match self.controller.state() {
                    Mode::Normal => Mode::Modal,
                    Mode::Modal => Mode::Normal,
                };
                self.controller.set_mode(mode)
            }
            Action::ToggleEnabled => {
                self.toggle_enabled();
                Ok(())
            }
            Action::RunPrimary => {
                self.run_action(ActionSlot::Primary);
                Ok(())
            }
            Action::RunItem(index) => {
                self.run_action(ActionSlot::Item(index));
                Ok(())
            }
            Action::Rotate => {
                self.state.rotated = !self.state.rotated;
                return self.transition_to_display_size();
            }
            Action::ToggleLog => {
                self.state.log_visible = !self.state.log_visible;
                Ok(())
            }
            Action::ToggleHelp => {
                self.state.help_visible = !self.state.help_visible;
                Ok(())
            }
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::None => Ok(()),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) if err.is_precondition() => {
                self.log_warn(&format!("Refused ({}): {}", err.rule(), err));
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "operation failed");
                self.log_error(&format!("Failed: {}", err));
                Ok(())
            }
        }
    }

    /// Bar that actions are routed to: the detail bar while expanded.
    fn focused_role(controller: &PresentationController<DemoHost>) -> StackRole {
        if controller.is_expanded() {
            StackRole::Detail
        } else {
            StackRole::Master
        }
    }

    fn run_action(&mut self, slot: ActionSlot) {
        let role = Self::focused_role(&self.controller);
        if self.controller.trigger_action(role, slot).is_none() {
            self.log_warn("No enabled action in that slot");
        }
        for message in self.activity.drain() {
            self.log_info(&format!("Ran {}", message));
        }
    }

    fn toggle_enabled(&mut self) {
        let role = Self::focused_role(&self.controller);
        let Some(unit) = self.controller.top(role) else {
            self.log_warn("Nothing presented");
            return;
        };
        let id = unit.id();
        let title = unit.title().to_string();
        let mut toggles = self
            .controller
            .host()
            .toggles(id)
            .unwrap_or_else(|| unit.toggles());
        toggles.actions_enabled = !toggles.actions_enabled;

        self.controller.host_mut().set_toggles(id, toggles);
        self.controller.toggles_changed(id);
        let verb = if toggles.actions_enabled {
            "enabled"
        } else {
            "disabled"
        };
        self.log_info(&format!("Actions of {} {}", title, verb));
    }

    fn collect_host_records(&mut self) {
        for record in self.controller.host_mut().take_unread() {
            match record {
                HostRecord::Back { .. } => self.log_info(&format!("Host: {}", record)),
                HostRecord::WillShow { .. } | HostRecord::DidShow { .. } => {
                    tracing::trace!(%record, "host notification");
                }
            }
        }
    }

    fn log_info(&mut self, message: &str) {
        self.push_log(LogLevel::Info, message);
    }

    fn log_warn(&mut self, message: &str) {
        self.push_log(LogLevel::Warn, message);
    }

    fn log_error(&mut self, message: &str) {
        self.push_log(LogLevel::Error, message);
    }

    fn push_log(&mut self, level: LogLevel, message: &str) {
        self.state.log.push(LogEntry {
            timestamp: chrono::Utc::now(),
            level,
            message: message.to_string(),
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.terminal.backend_mut().execute(LeaveAlternateScreen);
        let _ = self.terminal.backend_mut().execute(DisableMouseCapture);
        let _ = self.terminal.show_cursor();
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
