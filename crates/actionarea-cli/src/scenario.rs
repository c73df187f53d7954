//! Scripted scenarios.
//!
//! A scenario is a TOML file describing a display size and a list of
//! steps replayed against a controller:
//!
//! ```toml
//! size = "60x40"
//!
//! [[step]]
//! op = "show"
//! title = "Survey"
//! actions = ["capture", "notes", "map"]
//!
//! [[step]]
//! op = "show_detail"
//! title = "Plot 7"
//! actions = ["edit"]
//! modal_actions = ["done"]
//!
//! [[step]]
//! op = "resize"
//! size = "160x40"
//! ```

use std::path::Path;
use std::time::Duration;

use actionarea_core::config::Config;
use actionarea_core::content::{
    Action, ActionDescriptor, BackBinding, ContentUnit, FeatureToggles, Mode, Role, StackRole,
    Tint,
};
use actionarea_core::controller::PresentationController;
use actionarea_core::host::FeatureToggleProvider;
use actionarea_core::layout::Size;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::host::DemoHost;

/// A parsed scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Initial display size (`WIDTHxHEIGHT`)
    #[serde(default = "default_size")]
    pub size: String,
    /// Run with animations; steps then need `tick` or `finish` to settle
    #[serde(default)]
    pub animate: bool,
    /// Host back control replayed once the last master unit is gone
    #[serde(default)]
    pub root_back: Option<BackBinding>,
    /// Steps in execution order
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_size() -> String {
    "60x40".to_string()
}

/// A unit to present.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitSpec {
    /// Title shown in the region
    pub title: String,
    /// Action ids; the first is the primary control
    #[serde(default)]
    pub actions: Vec<String>,
    /// Action ids used while the mode is modal
    #[serde(default)]
    pub modal_actions: Option<Vec<String>>,
    /// Bar colour
    #[serde(default)]
    pub tint: Option<Tint>,
    /// Title of a master unit's empty-state placeholder
    #[serde(default)]
    pub empty_state: Option<String>,
    /// Initial feature toggles
    #[serde(default)]
    pub toggles: Option<FeatureToggles>,
}

/// One scripted operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Present a master unit
    Show(UnitSpec),
    /// Present a detail unit
    ShowDetail(UnitSpec),
    /// Back gesture
    Back,
    /// Pop to the first detail so the master shows
    RevealMaster,
    /// Present the remembered modal detail again
    ReshowDetail,
    /// Change the interaction mode
    Mode {
        /// Target mode
        mode: Mode,
    },
    /// Change the display size
    Resize {
        /// New size (`WIDTHxHEIGHT`)
        size: String,
    },
    /// Advance animations
    Tick {
        /// Elapsed milliseconds
        ms: u64,
    },
    /// Complete every running animation
    Finish,
    /// Change the feature toggles of a stack's top unit
    Toggle {
        /// Stack whose top unit changes
        #[serde(default = "default_role")]
        role: StackRole,
        /// New action enablement
        #[serde(default)]
        actions_enabled: Option<bool>,
        /// New elevation
        #[serde(default)]
        elevated: Option<bool>,
    },
}

const fn default_role() -> StackRole {
    StackRole::Master
}

impl Step {
    /// Operation name as written in the file.
    pub const fn op(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
            Self::ShowDetail(_) => "show_detail",
            Self::Back => "back",
            Self::RevealMaster => "reveal_master",
            Self::ReshowDetail => "reshow_detail",
            Self::Mode { .. } => "mode",
            Self::Resize { .. } => "resize",
            Self::Tick { .. } => "tick",
            Self::Finish => "finish",
            Self::Toggle { .. } => "toggle",
        }
    }
}

impl UnitSpec {
    /// Build a content unit with the given role.
    pub fn build(&self, role: Role) -> ContentUnit {
        let mut unit = match role {
            Role::Master => ContentUnit::master(&self.title),
            Role::Detail => ContentUnit::detail(&self.title),
        };
        unit = unit.with_descriptor(descriptor(&self.actions));
        if let Some(modal) = &self.modal_actions {
            unit = unit.with_modal_descriptor(descriptor(modal));
        }
        if let Some(tint) = self.tint {
            unit = unit.with_tint(tint);
        }
        if let (Role::Master, Some(title)) = (role, &self.empty_state) {
            unit = unit.with_empty_state(ContentUnit::detail(title));
        }
        if let Some(toggles) = self.toggles {
            unit = unit.with_toggles(toggles);
        }
        unit
    }
}

fn descriptor(ids: &[String]) -> ActionDescriptor {
    let mut actions = ids.iter().map(|id| Action::new(id.as_str(), title_case(id)));
    let Some(primary) = actions.next() else {
        return ActionDescriptor::empty();
    };
    actions.fold(ActionDescriptor::with_primary(primary), ActionDescriptor::item)
}

fn title_case(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Parse scenario TOML.
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content)?;
        Size::parse(&scenario.size)?;
        Ok(scenario)
    }

    /// Create the controller this scenario starts from.
    pub fn controller(&self, config: &Config) -> Result<PresentationController<DemoHost>> {
        let mut config = config.clone();
        config.animation.enabled = self.animate;
        let size = Size::parse(&self.size)?;
        let mut controller = PresentationController::new(DemoHost::new(), size, &config);
        if let Some(binding) = &self.root_back {
            controller = controller.with_root_back(binding.clone());
        }
        Ok(controller)
    }
}

/// Why a scenario stopped early.
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    /// Zero-based index of the failing step
    pub index: usize,
    /// Operation of the failing step
    pub op: &'static str,
    /// Name of the violated rule
    pub rule: &'static str,
    /// Error message
    pub message: String,
}

/// Apply one step to a controller.
pub fn apply(
    controller: &mut PresentationController<DemoHost>,
    step: &Step,
) -> actionarea_core::Result<()> {
    match step {
        Step::Show(spec) => controller.show(spec.build(Role::Master)),
        Step::ShowDetail(spec) => controller.show_detail(spec.build(Role::Detail)),
        Step::Back => controller.back(),
        Step::RevealMaster => controller.reveal_master(),
        Step::ReshowDetail => controller.reshow_detail(),
        Step::Mode { mode } => controller.set_mode(*mode),
        Step::Resize { size } => controller.view_will_transition(Size::parse(size)?),
        Step::Tick { ms } => controller.tick(Duration::from_millis(*ms)),
        Step::Finish => controller.finish_animations(),
        Step::Toggle {
            role,
            actions_enabled,
            elevated,
        } => {
            let Some(unit) = controller.top(*role) else {
                tracing::warn!(%role, "toggle step with an empty stack");
                return Ok(());
            };
            let id = unit.id();
            let mut toggles = controller.host().toggles(id).unwrap_or_else(|| unit.toggles());
            if let Some(enabled) = actions_enabled {
                toggles.actions_enabled = *enabled;
            }
            if let Some(elevated) = elevated {
                toggles.elevated = *elevated;
            }
            controller.host_mut().set_toggles(id, toggles);
            controller.toggles_changed(id);
            Ok(())
        }
    }
}

/// Run every step, stopping at the first failure.
pub fn run(
    controller: &mut PresentationController<DemoHost>,
    steps: &[Step],
    mut on_step: impl FnMut(usize, &Step, &mut PresentationController<DemoHost>),
) -> Result<(), StepFailure> {
    for (index, step) in steps.iter().enumerate() {
        apply(controller, step).map_err(|err| StepFailure {
            index,
            op: step.op(),
            rule: err.rule(),
            message: err.to_string(),
        })?;
        on_step(index, step, controller);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionarea_core::content::Mode;

    const SURVEY: &str = r#"
size = "60x40"
root_back = { target = "nav", action = "close" }

[[step]]
op = "show"
title = "Survey"
actions = ["capture", "field-notes", "map"]
tint = "success"

[[step]]
op = "show_detail"
title = "Plot 7"
actions = ["edit"]
modal_actions = ["done"]

[[step]]
op = "mode"
mode = "modal"
"#;

    fn sync_config() -> Config {
        let mut config = Config::default();
        config.animation.enabled = false;
        config
    }

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(SURVEY).expect("parse");
        assert_eq!(scenario.size, "60x40");
        assert!(!scenario.animate);
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[1].op(), "show_detail");
        assert!(matches!(
            scenario.steps[2],
            Step::Mode { mode: Mode::Modal }
        ));
    }

    #[test]
    fn test_parse_rejects_bad_size() {
        assert!(Scenario::parse("size = \"wide\"\n").is_err());
        assert!(Scenario::parse("[[step]]\nop = \"jump\"\n").is_err());
    }

    #[test]
    fn test_unit_spec_builds_descriptor() {
        let scenario = Scenario::parse(SURVEY).expect("parse");
        let Step::Show(spec) = &scenario.steps[0] else {
            panic!("expected show");
        };
        let unit = spec.build(Role::Master);
        let descriptor = unit.descriptor(Mode::Normal);
        let primary = descriptor.primary.as_ref().expect("primary");
        assert_eq!(primary.id, "capture");
        assert_eq!(descriptor.items[0].title, "Field Notes");
        assert_eq!(unit.tint(), Some(Tint::Success));
        assert!(unit.empty_state().is_some());
    }

    #[test]
    fn test_run_applies_every_step() {
        let scenario = Scenario::parse(SURVEY).expect("parse");
        let mut controller = scenario.controller(&sync_config()).expect("controller");
        let mut seen = Vec::new();
        run(&mut controller, &scenario.steps, |index, _, _| seen.push(index)).expect("run");

        assert_eq!(seen, [0, 1, 2]);
        assert_eq!(controller.state(), Mode::Modal);
        assert_eq!(controller.master_stack().titles(), ["Survey", "Plot 7"]);
        let primary = controller.master_bar().descriptor().primary.as_ref().map(|a| a.id.clone());
        assert_eq!(primary.as_deref(), Some("done"));
    }

    #[test]
    fn test_run_reports_failing_step() {
        let scenario = Scenario::parse(
            r#"
[[step]]
op = "show"
title = "Survey"

[[step]]
op = "back"

[[step]]
op = "back"
"#,
        )
        .expect("parse");
        let mut controller = scenario.controller(&sync_config()).expect("controller");
        let failure = run(&mut controller, &scenario.steps, |_, _, _| {}).expect_err("fails");

        assert_eq!(failure.index, 2);
        assert_eq!(failure.op, "back");
        assert!(controller.master_stack().is_empty());
    }

    #[test]
    fn test_toggle_step_disables_bar() {
        let scenario = Scenario::parse(
            r#"
[[step]]
op = "show"
title = "Survey"
actions = ["capture"]

[[step]]
op = "toggle"
actions_enabled = false
"#,
        )
        .expect("parse");
        let mut controller = scenario.controller(&sync_config()).expect("controller");
        run(&mut controller, &scenario.steps, |_, _, _| {}).expect("run");

        assert!(!controller.master_bar().is_enabled());
        let top = controller.top(StackRole::Master).expect("top").id();
        assert!(controller.host().is_observed(top));
    }

    #[test]
    fn test_resize_step_expands() {
        let scenario = Scenario::parse(
            r#"
[[step]]
op = "show"
title = "Survey"

[[step]]
op = "resize"
size = "160x40"
"#,
        )
        .expect("parse");
        let mut controller = scenario.controller(&sync_config()).expect("controller");
        run(&mut controller, &scenario.steps, |_, _, _| {}).expect("run");

        assert!(controller.is_expanded());
        assert_eq!(controller.detail_stack().titles(), ["No selection"]);
    }
}
