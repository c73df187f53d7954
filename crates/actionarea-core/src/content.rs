//! Content units and their actions.
//!
//! A [`ContentUnit`] is one piece of displayable content tagged as master
//! or detail. It carries the [`ActionDescriptor`] its action bar shows,
//! optionally a different descriptor for the modal interaction mode, and
//! (for master units) an empty-state placeholder shown in the detail
//! region while no detail companion is presented.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a content unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Generate a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form used in logs and summaries.
    #[must_use]
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

/// Presentation role of a content unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Primary, navigable content
    Master,
    /// Secondary content shown for the current master
    Detail,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => f.write_str("master"),
            Self::Detail => f.write_str("detail"),
        }
    }
}

/// Names one of the two stacks (and the action bar bound to it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackRole {
    /// The master stack (the merged stack in collapsed layouts)
    Master,
    /// The detail stack (only populated in expanded layouts)
    Detail,
}

impl fmt::Display for StackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => f.write_str("master"),
            Self::Detail => f.write_str("detail"),
        }
    }
}

/// Interaction mode of the presentation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Content can be swapped freely
    #[default]
    Normal,
    /// The presented detail is locked in place
    Modal,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Modal => f.write_str("modal"),
        }
    }
}

/// Context handed to an action callback.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Unit whose descriptor holds the action
    pub unit: ContentId,
    /// Action identifier
    pub action: String,
    /// Interaction mode at the time of execution
    pub mode: Mode,
}

/// Callback executed when an action is triggered.
pub type Callback = Rc<dyn Fn(&ActionContext)>;

/// A single action rendered by an action bar.
///
/// Equality is structural over `id`, `title` and `symbol`; the callback
/// never takes part in comparisons.
#[derive(Clone)]
pub struct Action {
    /// Identifier, unique within a descriptor
    pub id: String,
    /// Label shown on the control
    pub title: String,
    /// Optional glyph shown before the label
    pub symbol: Option<char>,
    exec: Option<Callback>,
}

impl Action {
    /// Create an action without a callback.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            symbol: None,
            exec: None,
        }
    }

    /// Set the glyph shown before the label.
    #[must_use]
    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Attach the callback run when the action is triggered.
    #[must_use]
    pub fn on_exec(mut self, exec: impl Fn(&ActionContext) + 'static) -> Self {
        self.exec = Some(Rc::new(exec));
        self
    }

    /// Run the callback, if any. Returns whether a callback ran.
    pub fn run(&self, context: &ActionContext) -> bool {
        self.exec.as_ref().is_some_and(|exec| {
            exec(context);
            true
        })
    }

    /// Label including the glyph.
    #[must_use]
    pub fn label(&self) -> String {
        match self.symbol {
            Some(symbol) => format!("{symbol} {}", self.title),
            None => self.title.clone(),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.title == other.title && self.symbol == other.symbol
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("symbol", &self.symbol)
            .field("exec", &self.exec.is_some())
            .finish()
    }
}

/// Primary action plus ordered secondary actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Main action, rendered as the large control
    pub primary: Option<Action>,
    /// Secondary actions in display order
    pub items: Vec<Action>,
}

impl ActionDescriptor {
    /// The descriptor with no actions at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            primary: None,
            items: Vec::new(),
        }
    }

    /// Descriptor with only a primary action.
    #[must_use]
    pub fn with_primary(primary: Action) -> Self {
        Self {
            primary: Some(primary),
            items: Vec::new(),
        }
    }

    /// Append a secondary action.
    #[must_use]
    pub fn item(mut self, action: Action) -> Self {
        self.items.push(action);
        self
    }

    /// Whether neither a primary nor any secondary action is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.items.is_empty()
    }

    /// The secondary actions that are actually rendered.
    #[must_use]
    pub fn visible_items(&self, max: usize) -> &[Action] {
        &self.items[..self.items.len().min(max)]
    }
}

/// How a unit derives its descriptor from the interaction mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitMode {
    /// Same descriptor in every mode
    Stateless(ActionDescriptor),
    /// Different descriptor for the modal mode
    Stateful {
        /// Descriptor in the normal mode
        normal: ActionDescriptor,
        /// Descriptor in the modal mode
        modal: ActionDescriptor,
    },
}

impl UnitMode {
    /// Descriptor for the given interaction mode.
    #[must_use]
    pub const fn descriptor(&self, mode: Mode) -> &ActionDescriptor {
        match (self, mode) {
            (Self::Stateless(descriptor), _)
            | (Self::Stateful { normal: descriptor, .. }, Mode::Normal)
            | (Self::Stateful { modal: descriptor, .. }, Mode::Modal) => descriptor,
        }
    }
}

/// Accent colour a unit asks its action bars to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    /// Theme accent colour
    Accent,
    /// Positive/confirming colour
    Success,
    /// Cautionary colour
    Warning,
    /// Destructive colour
    Danger,
    /// Informational colour
    Info,
    /// Explicit RGB colour
    Rgb(u8, u8, u8),
}

/// Visual flags propagated from the top-of-stack unit to its action bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    /// Whether the bar accepts interaction
    pub actions_enabled: bool,
    /// Whether the bar is drawn elevated above the content
    pub elevated: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            actions_enabled: true,
            elevated: false,
        }
    }
}

/// The back control a unit provides for whatever is shown above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackBinding {
    /// Object that receives the action
    pub target: String,
    /// Action sent to the target
    pub action: String,
}

impl BackBinding {
    /// Target name used while the controller owns a back control.
    pub const CONTROLLER_TARGET: &'static str = "actionarea";

    /// Create a binding.
    pub fn new(target: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            action: action.into(),
        }
    }

    /// The binding installed while the controller intercepts a back control.
    #[must_use]
    pub fn intercepted() -> Self {
        Self::new(Self::CONTROLLER_TARGET, "back")
    }

    /// Whether this binding routes to the controller.
    #[must_use]
    pub fn is_intercepted(&self) -> bool {
        self.target == Self::CONTROLLER_TARGET
    }
}

impl fmt::Display for BackBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.action)
    }
}

/// A single piece of displayable content.
///
/// Units are owned by exactly one stack at a time; the controller only
/// ever refers to them by [`ContentId`] from outside a stack.
#[derive(Debug)]
pub struct ContentUnit {
    id: ContentId,
    role: Role,
    title: String,
    mode: UnitMode,
    empty_state: Option<Box<ContentUnit>>,
    empty_state_of: Option<ContentId>,
    tint: Option<Tint>,
    toggles: FeatureToggles,
    back: BackBinding,
    layout_margin: u16,
}

impl ContentUnit {
    fn with_role(role: Role, title: impl Into<String>) -> Self {
        let id = ContentId::new();
        Self {
            id,
            role,
            title: title.into(),
            mode: UnitMode::Stateless(ActionDescriptor::empty()),
            empty_state: None,
            empty_state_of: None,
            tint: None,
            toggles: FeatureToggles::default(),
            back: BackBinding::new(format!("unit:{id}"), "pop"),
            layout_margin: 0,
        }
    }

    /// Create a master unit with a generated empty state.
    pub fn master(title: impl Into<String>) -> Self {
        let unit = Self::with_role(Role::Master, title);
        let placeholder = Self::detail("No selection");
        unit.with_empty_state(placeholder)
    }

    /// Create a detail unit.
    pub fn detail(title: impl Into<String>) -> Self {
        Self::with_role(Role::Detail, title)
    }

    /// Use `descriptor` in every interaction mode (or the normal mode of a
    /// stateful unit).
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: ActionDescriptor) -> Self {
        self.mode = match self.mode {
            UnitMode::Stateless(_) => UnitMode::Stateless(descriptor),
            UnitMode::Stateful { modal, .. } => UnitMode::Stateful {
                normal: descriptor,
                modal,
            },
        };
        self
    }

    /// Use `descriptor` while the interaction mode is modal.
    #[must_use]
    pub fn with_modal_descriptor(mut self, descriptor: ActionDescriptor) -> Self {
        self.mode = match self.mode {
            UnitMode::Stateless(normal) | UnitMode::Stateful { normal, .. } => UnitMode::Stateful {
                normal,
                modal: descriptor,
            },
        };
        self
    }

    /// Replace the empty-state placeholder. Only meaningful for master units.
    #[must_use]
    pub fn with_empty_state(mut self, mut placeholder: ContentUnit) -> Self {
        placeholder.role = Role::Detail;
        placeholder.empty_state_of = Some(self.id);
        self.empty_state = Some(Box::new(placeholder));
        self
    }

    /// Set the tint applied to the action bars while this unit is on top.
    #[must_use]
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = Some(tint);
        self
    }

    /// Set the initial feature toggles.
    #[must_use]
    pub fn with_toggles(mut self, toggles: FeatureToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Set the back control this unit provides to the unit above it.
    #[must_use]
    pub fn with_back(mut self, back: BackBinding) -> Self {
        self.back = back;
        self
    }

    /// Identity.
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Presentation role.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Descriptor-per-mode configuration.
    pub const fn unit_mode(&self) -> &UnitMode {
        &self.mode
    }

    /// Descriptor rendered for the given interaction mode.
    pub const fn descriptor(&self, mode: Mode) -> &ActionDescriptor {
        self.mode.descriptor(mode)
    }

    /// The placeholder shown while this master has no detail companion.
    ///
    /// `None` while the placeholder is lent to the detail stack.
    pub fn empty_state(&self) -> Option<&ContentUnit> {
        self.empty_state.as_deref()
    }

    /// Lend the placeholder out (to the detail stack).
    pub fn take_empty_state(&mut self) -> Option<ContentUnit> {
        self.empty_state.take().map(|boxed| *boxed)
    }

    /// Return a previously lent placeholder.
    pub fn restore_empty_state(&mut self, placeholder: ContentUnit) {
        debug_assert_eq!(placeholder.empty_state_of, Some(self.id));
        self.empty_state = Some(Box::new(placeholder));
    }

    /// Master unit this placeholder belongs to, if it is one.
    pub const fn empty_state_of(&self) -> Option<ContentId> {
        self.empty_state_of
    }

    /// Whether this unit is an empty-state placeholder.
    pub const fn is_empty_state(&self) -> bool {
        self.empty_state_of.is_some()
    }

    /// Tint requested for the action bars.
    pub const fn tint(&self) -> Option<Tint> {
        self.tint
    }

    /// Current feature toggles.
    pub const fn toggles(&self) -> FeatureToggles {
        self.toggles
    }

    /// Update the feature toggles.
    pub fn set_toggles(&mut self, toggles: FeatureToggles) {
        self.toggles = toggles;
    }

    /// The back control this unit provides.
    pub const fn back(&self) -> &BackBinding {
        &self.back
    }

    /// Swap the back control, returning the displaced one.
    pub fn replace_back(&mut self, back: BackBinding) -> BackBinding {
        std::mem::replace(&mut self.back, back)
    }

    /// Margin applied by the current layout.
    pub const fn layout_margin(&self) -> u16 {
        self.layout_margin
    }

    /// Set the margin applied by the current layout.
    pub fn set_layout_margin(&mut self, margin: u16) {
        self.layout_margin = margin;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn save() -> Action {
        Action::new("save", "Save").with_symbol('✓')
    }

    #[test]
    fn test_descriptor_equality_ignores_callbacks() {
        let a = ActionDescriptor::with_primary(save().on_exec(|_| {}));
        let b = ActionDescriptor::with_primary(save());
        assert_eq!(a, b);

        let c = ActionDescriptor::with_primary(Action::new("save", "Store"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_visible_items_are_capped() {
        let descriptor = (0..6).fold(ActionDescriptor::empty(), |d, i| {
            d.item(Action::new(format!("a{i}"), format!("Action {i}")))
        });
        assert_eq!(descriptor.visible_items(4).len(), 4);
        assert_eq!(descriptor.visible_items(10).len(), 6);
        assert!(!descriptor.is_empty());
        assert!(ActionDescriptor::empty().is_empty());
    }

    #[test]
    fn test_stateful_unit_descriptor_per_mode() {
        let record = ActionDescriptor::with_primary(Action::new("record", "Record"));
        let stop = ActionDescriptor::with_primary(Action::new("stop", "Stop"));
        let unit = ContentUnit::detail("Trial")
            .with_descriptor(record.clone())
            .with_modal_descriptor(stop.clone());

        assert_eq!(unit.descriptor(Mode::Normal), &record);
        assert_eq!(unit.descriptor(Mode::Modal), &stop);

        let stateless = ContentUnit::detail("Notes").with_descriptor(record.clone());
        assert_eq!(stateless.descriptor(Mode::Modal), &record);
    }

    #[test]
    fn test_master_empty_state_is_lent_and_restored() {
        let mut master = ContentUnit::master("Survey");
        let placeholder = master.take_empty_state().expect("generated placeholder");
        assert!(placeholder.is_empty_state());
        assert_eq!(placeholder.empty_state_of(), Some(master.id()));
        assert_eq!(placeholder.role(), Role::Detail);
        assert!(master.empty_state().is_none());

        master.restore_empty_state(placeholder);
        assert!(master.empty_state().is_some());
    }

    #[test]
    fn test_action_run_invokes_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let action = save().on_exec(move |ctx| {
            assert_eq!(ctx.action, "save");
            counter.set(counter.get() + 1);
        });
        let context = ActionContext {
            unit: ContentId::new(),
            action: "save".to_string(),
            mode: Mode::Normal,
        };

        assert!(action.run(&context));
        assert_eq!(hits.get(), 1);
        assert!(!Action::new("noop", "Noop").run(&context));
    }

    #[test]
    fn test_back_binding_replacement() {
        let mut unit = ContentUnit::master("Survey").with_back(BackBinding::new("nav", "pop"));
        let original = unit.replace_back(BackBinding::intercepted());
        assert_eq!(original, BackBinding::new("nav", "pop"));
        assert!(unit.back().is_intercepted());
    }
}
