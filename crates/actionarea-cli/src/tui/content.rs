//! Sample content presented by the dashboard.

use std::cell::RefCell;
use std::rc::Rc;

use actionarea_core::content::{
    Action, ActionContext, ActionDescriptor, ContentUnit, Mode, Tint,
};

const COLLECTIONS: &[(&str, Tint)] = &[
    ("Stations", Tint::Accent),
    ("Surveys", Tint::Success),
    ("Samples", Tint::Info),
    ("Alerts", Tint::Warning),
];

/// Record of executed actions shared with the action callbacks.
#[derive(Debug, Clone, Default)]
pub struct Activity(Rc<RefCell<Vec<String>>>);

impl Activity {
    /// Messages recorded since the last call.
    pub fn drain(&self) -> Vec<String> {
        self.0.borrow_mut().drain(..).collect()
    }

    fn action(&self, id: &str, title: &str, symbol: char, subject: &str) -> Action {
        let log = Rc::clone(&self.0);
        let subject = subject.to_string();
        Action::new(id, title)
            .with_symbol(symbol)
            .on_exec(move |context: &ActionContext| {
                let suffix = match context.mode {
                    Mode::Normal => "",
                    Mode::Modal => " (modal)",
                };
                log.borrow_mut()
                    .push(format!("{} on {}{}", context.action, subject, suffix));
            })
    }

    /// The `n`th master unit (zero-based).
    pub fn master(&self, n: usize) -> ContentUnit {
        let (name, tint) = COLLECTIONS[n % COLLECTIONS.len()];
        let title = format!("{} {}", name, n / COLLECTIONS.len() + 1);
        let descriptor = ActionDescriptor::with_primary(self.action("new", "New", '+', &title))
            .item(self.action("search", "Search", '/', &title))
            .item(self.action("filter", "Filter", '=', &title))
            .item(self.action("sort", "Sort", '^', &title))
            .item(self.action("export", "Export", '>', &title))
            .item(self.action("share", "Share", '@', &title));

        ContentUnit::master(&title)
            .with_descriptor(descriptor)
            .with_tint(tint)
            .with_empty_state(ContentUnit::detail(format!("Pick an entry from {}", title)))
    }

    /// The `n`th detail unit (zero-based).
    pub fn detail(&self, n: usize) -> ContentUnit {
        let title = format!("Entry {}", n + 1);
        let normal = ActionDescriptor::with_primary(self.action("edit", "Edit", '*', &title))
            .item(self.action("flag", "Flag", '!', &title))
            .item(self.action("duplicate", "Duplicate", '&', &title))
            .item(self.action("delete", "Delete", 'x', &title));
        let modal = ActionDescriptor::with_primary(self.action("done", "Done", '✓', &title))
            .item(self.action("discard", "Discard", 'x', &title));

        ContentUnit::detail(&title)
            .with_descriptor(normal)
            .with_modal_descriptor(modal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionarea_core::content::ContentId;

    #[test]
    fn test_masters_cycle_collections() {
        let activity = Activity::default();
        assert_eq!(activity.master(0).title(), "Stations 1");
        assert_eq!(activity.master(5).title(), "Surveys 2");
        assert_eq!(activity.master(1).tint(), Some(Tint::Success));
    }

    #[test]
    fn test_detail_is_stateful() {
        let activity = Activity::default();
        let unit = activity.detail(0);
        let normal = unit.descriptor(Mode::Normal);
        let modal = unit.descriptor(Mode::Modal);
        assert_eq!(normal.primary.as_ref().map(|a| a.id.as_str()), Some("edit"));
        assert_eq!(modal.primary.as_ref().map(|a| a.id.as_str()), Some("done"));
    }

    #[test]
    fn test_callbacks_record_activity() {
        let activity = Activity::default();
        let unit = activity.detail(2);
        let flag = &unit.descriptor(Mode::Normal).items[0];
        assert!(flag.run(&ActionContext {
            unit: ContentId::new(),
            action: flag.id.clone(),
            mode: Mode::Modal,
        }));

        assert_eq!(activity.drain(), ["flag on Entry 3 (modal)"]);
        assert!(activity.drain().is_empty());
    }
}
