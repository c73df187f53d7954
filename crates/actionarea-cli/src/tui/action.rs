//! User actions.

/// Everything a key press can ask the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Present a new master unit
    ShowMaster,
    /// Present a new detail unit
    ShowDetail,
    /// Back gesture
    Back,
    /// Pop to the master beneath the first detail
    RevealMaster,
    /// Present the remembered modal detail again
    ReshowDetail,
    /// Switch between the normal and modal interaction modes
    ToggleModal,
    /// Flip action enablement of the focused unit
    ToggleEnabled,
    /// Run the primary action of the focused bar
    RunPrimary,
    /// Run a secondary action of the focused bar
    RunItem(usize),
    /// Simulate rotating the display
    Rotate,
    /// Show or hide the log panel
    ToggleLog,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Leave the dashboard
    Quit,
    /// Nothing to do
    None,
}

impl Action {
    /// Whether the action drives a presentation transition and therefore
    /// has to wait for running animations.
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::ShowMaster
                | Self::ShowDetail
                | Self::Back
                | Self::RevealMaster
                | Self::ReshowDetail
                | Self::ToggleModal
        )
    }
}
