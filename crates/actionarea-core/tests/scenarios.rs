//! End-to-end scenarios for the presentation controller.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use actionarea_core::content::{
    Action, ActionDescriptor, BackBinding, ContentUnit, FeatureToggles, Mode, StackRole, Tint,
};
use actionarea_core::controller::ActionSlot;
use actionarea_core::layout::{Layout, SubMode};
use actionarea_core::transition::TransitionType;
use actionarea_core::Error;

use common::{
    assert_consistent, controller, detail, master, primary, primary_id, HostEvent, NARROW, WIDE,
};

#[test]
fn test_compact_master_detail_back() {
    let mut c = controller(NARROW);
    let a = master("a");
    let a_id = a.id();
    let a_back = a.back().clone();

    c.show(a).expect("show master");
    assert_eq!(c.transition(), TransitionType::Internal);
    assert!(c.master_bar().is_raised());
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("a-open"));
    assert_eq!(
        c.host().events,
        [
            HostEvent::WillShow(StackRole::Master, Some(a_id)),
            HostEvent::DidShow(StackRole::Master, Some(a_id)),
        ]
    );

    c.show_detail(detail("d")).expect("show detail");
    assert_eq!(c.master_stack().titles(), ["a", "d"]);
    assert!(c.detail_stack().is_empty());
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("d-save"));
    assert!(!c.is_master_visible());
    assert_consistent(&c);

    c.back().expect("back");
    assert_eq!(c.host().dispatched, [a_back]);
    assert_eq!(c.master_stack().titles(), ["a"]);
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("a-open"));
    assert_eq!(c.transition(), TransitionType::Internal);
    assert!(c.is_master_visible());
    assert_consistent(&c);
}

#[test]
fn test_back_replays_originals_in_reverse_order() {
    let mut c = controller(NARROW).with_root_back(BackBinding::new("nav", "close"));
    for title in ["m0", "m1", "m2"] {
        c.show(master(title).with_back(BackBinding::new(title, "pop")))
            .expect("show");
        assert_consistent(&c);
    }
    assert!(c.back_interceptor().root().is_intercepted());

    for _ in 0..3 {
        c.back().expect("back");
        assert_consistent(&c);
    }

    assert_eq!(
        c.host().dispatched,
        [
            BackBinding::new("m1", "pop"),
            BackBinding::new("m0", "pop"),
            BackBinding::new("nav", "close"),
        ]
    );
    assert_eq!(c.back_interceptor().root(), &BackBinding::new("nav", "close"));
    assert_eq!(c.transition(), TransitionType::External);
    assert!(matches!(c.back(), Err(Error::NothingToPop)));
}

#[test]
fn test_landscape_back_replays_originals_in_reverse_order() {
    let mut c = controller(WIDE);
    for title in ["m0", "m1", "m2"] {
        c.show(master(title).with_back(BackBinding::new(title, "pop")))
            .expect("show");
        assert_consistent(&c);
    }
    assert!(c.is_expanded());
    assert_eq!(c.detail_stack().len(), 3);

    for _ in 0..3 {
        c.back().expect("back");
        assert_consistent(&c);
    }

    let targets: Vec<&str> = c
        .host()
        .dispatched
        .iter()
        .map(|binding| binding.target.as_str())
        .collect();
    assert_eq!(targets, ["m1", "m0", "host"]);
    assert_eq!(c.layout(), Layout::landscape(WIDE, SubMode::Collapsed));
    assert!(c.master_stack().is_empty());
    assert!(c.detail_stack().is_empty());
    assert!(!c.master_bar().is_raised());
    assert!(!c.detail_bar().is_raised());
}

#[test]
fn test_identical_descriptor_is_not_redrawn() {
    let mut c = controller(NARROW);
    let shared = ActionDescriptor::with_primary(Action::new("add", "Add")).item(Action::new("sort", "Sort"));

    c.show(ContentUnit::master("a").with_descriptor(shared.clone()))
        .expect("show a");
    let revision = c.master_bar().revision();

    c.show(ContentUnit::master("b").with_descriptor(shared))
        .expect("show b");
    assert_eq!(c.master_bar().revision(), revision);

    c.show(master("c")).expect("show c");
    assert_eq!(c.master_bar().revision(), revision + 1);
}

#[test]
fn test_modal_round_trip_compact() {
    let mut c = controller(NARROW);
    c.show(master("a")).expect("show");
    let d = detail("d");
    let d_id = d.id();
    c.show_detail(d).expect("detail");

    c.set_mode(Mode::Modal).expect("modal");
    assert_eq!(c.state(), Mode::Modal);
    assert_eq!(c.modal_detail(), Some(d_id));

    c.reveal_master().expect("reveal");
    assert_eq!(c.master_stack().titles(), ["a"]);
    assert!(c.is_master_visible());
    assert!(matches!(c.back(), Err(Error::ModalLocked("back"))));
    assert_consistent(&c);

    c.reshow_detail().expect("reshow");
    assert_eq!(c.master_stack().top().map(ContentUnit::id), Some(d_id));
    assert_consistent(&c);

    c.reveal_master().expect("reveal again");
    c.set_mode(Mode::Normal).expect("normal");
    assert_eq!(c.state(), Mode::Normal);
    assert_eq!(c.modal_detail(), None);
    assert_eq!(c.master_stack().top().map(ContentUnit::id), Some(d_id));
    assert!(c.detail_stack().is_empty());
    assert_consistent(&c);
}

#[test]
fn test_modal_round_trip_expanded() {
    let mut c = controller(WIDE);
    c.show(master("a")).expect("show");
    let d = detail("d");
    let d_id = d.id();
    c.show_detail(d).expect("detail");

    c.set_mode(Mode::Modal).expect("modal");
    let before = c.detail_stack().titles();
    c.reshow_detail().expect("no-op while expanded");
    assert_eq!(c.detail_stack().titles(), before);
    assert!(matches!(c.back(), Err(Error::ModalLocked("back"))));

    c.set_mode(Mode::Normal).expect("normal");
    assert_eq!(c.detail_stack().top().map(ContentUnit::id), Some(d_id));
    assert!(matches!(
        c.set_mode(Mode::Normal),
        Err(Error::ModeUnchanged(Mode::Normal))
    ));
}

#[test]
fn test_stateful_unit_switches_descriptor_with_mode() {
    let mut c = controller(NARROW);
    c.show(master("a")).expect("show");
    c.show_detail(
        ContentUnit::detail("form")
            .with_descriptor(primary("edit"))
            .with_modal_descriptor(primary("done")),
    )
    .expect("detail");
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("edit"));

    c.set_mode(Mode::Modal).expect("modal");
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("done"));

    c.set_mode(Mode::Normal).expect("normal");
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("edit"));
}

#[test]
fn test_rotation_splits_and_merges_stacks() {
    let mut c = controller(NARROW);
    c.show(master("a")).expect("show");
    c.show_detail(detail("dA")).expect("detail");
    let merged: Vec<_> = c.master_stack().all().iter().map(ContentUnit::id).collect();

    c.view_will_transition(WIDE).expect("rotate");
    assert!(c.is_expanded());
    assert_eq!(c.transition(), TransitionType::Internal);
    assert_eq!(c.master_stack().titles(), ["a"]);
    assert_eq!(c.detail_stack().titles(), ["No selection", "dA"]);
    assert!(c.detail_stack().all()[0].is_empty_state());
    assert_eq!(primary_id(&c, StackRole::Detail).as_deref(), Some("dA-save"));
    assert!(c.master_bar().descriptor().is_empty());
    assert!(c.snapshots().is_empty());
    assert_consistent(&c);

    c.view_will_transition(NARROW).expect("rotate back");
    assert!(!c.is_expanded());
    let restored: Vec<_> = c.master_stack().all().iter().map(ContentUnit::id).collect();
    assert_eq!(restored, merged);
    assert!(c.detail_stack().is_empty());
    assert!(c.master_stack().all()[0].empty_state().is_some());
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("dA-save"));
    assert_consistent(&c);
}

#[test]
fn test_rotation_with_parked_modal_detail() {
    let mut c = controller(NARROW);
    c.show(master("a")).expect("show");
    let d = detail("d");
    let d_id = d.id();
    c.show_detail(d).expect("detail");
    c.set_mode(Mode::Modal).expect("modal");
    c.reveal_master().expect("park");

    c.view_will_transition(WIDE).expect("rotate");
    assert_eq!(c.detail_stack().top().map(ContentUnit::id), Some(d_id));
    assert_consistent(&c);

    c.view_will_transition(NARROW).expect("rotate back");
    assert_eq!(c.master_stack().top().map(ContentUnit::id), Some(d_id));
    assert!(c.detail_stack().is_empty());
    assert_consistent(&c);
}

#[test]
fn test_landscape_master_push_leaves_only_empty_states() {
    let mut c = controller(WIDE);
    let a = master("a");
    let a_id = a.id();
    c.show(a).expect("show a");
    c.show_detail(detail("a1")).expect("a1");
    c.show(master("b")).expect("show b");
    assert_eq!(c.detail_stack().titles(), ["No selection", "No selection"]);
    assert!(c.detail_stack().all().iter().all(ContentUnit::is_empty_state));

    c.show_detail(detail("b1")).expect("b1");
    c.show_detail(detail("b2")).expect("b2");
    assert_eq!(
        c.detail_stack().titles(),
        ["No selection", "No selection", "b1", "b2"]
    );

    c.back().expect("back");
    assert_eq!(c.master_stack().titles(), ["a"]);
    assert_eq!(c.detail_stack().titles(), ["No selection"]);
    let top = c.detail_stack().top().expect("detail top");
    assert!(top.is_empty_state());
    assert_eq!(top.empty_state_of(), Some(a_id));
    assert_eq!(primary_id(&c, StackRole::Detail), None);
    assert_consistent(&c);
}

#[test]
fn test_landscape_back_after_split_returns_to_empty_state() {
    let mut c = controller(NARROW);
    c.show(master("a")).expect("show a");
    c.show_detail(detail("a1")).expect("a1");
    let b = master("b");
    let b_id = b.id();
    c.show(b).expect("show b");
    c.show_detail(detail("b1")).expect("b1");
    c.show(master("c")).expect("show c");
    c.show_detail(detail("c1")).expect("c1");

    c.view_will_transition(WIDE).expect("rotate");
    assert_eq!(
        c.detail_stack().titles(),
        ["No selection", "a1", "No selection", "b1", "No selection", "c1"]
    );

    c.back().expect("back");
    assert_eq!(c.master_stack().titles(), ["a", "b"]);
    assert_eq!(c.detail_stack().titles(), ["No selection", "No selection"]);
    assert_eq!(
        c.detail_stack().top().and_then(ContentUnit::empty_state_of),
        Some(b_id)
    );
    assert_consistent(&c);

    c.view_will_transition(NARROW).expect("rotate back");
    assert_eq!(c.master_stack().titles(), ["a", "b"]);
    assert!(c
        .master_stack()
        .all()
        .iter()
        .all(|unit| unit.empty_state().is_some()));
    assert_consistent(&c);
}

#[test]
fn test_landscape_back_keeps_modal_detail() {
    let mut c = controller(WIDE);
    c.show(master("a")).expect("show a");
    c.show(master("b")).expect("show b");
    c.show_detail(detail("b1")).expect("b1");
    c.set_mode(Mode::Modal).expect("modal");

    assert!(matches!(c.back(), Err(Error::ModalLocked("back"))));
    assert_eq!(c.master_stack().titles(), ["a", "b"]);
    assert_eq!(c.detail_stack().len(), 3);
}

#[test]
fn test_reveal_master_pops_to_first_detail() {
    let mut c = controller(NARROW);
    c.show(master("a")).expect("show");
    c.show_detail(detail("d1")).expect("d1");
    c.show_detail(detail("d2")).expect("d2");

    c.reveal_master().expect("reveal");
    assert_eq!(c.master_stack().titles(), ["a"]);
    assert!(c.detail_stack().is_empty());
    assert!(c.host().dispatched.is_empty());
    assert_consistent(&c);

    c.reveal_master().expect("nothing left to hide");
    assert_eq!(c.master_stack().titles(), ["a"]);
}

#[test]
fn test_toggles_and_tint_follow_top_unit() {
    let mut c = controller(NARROW);
    let a = master("a").with_tint(Tint::Success);
    let a_id = a.id();
    c.show(a).expect("show");
    assert_eq!(c.master_bar().tint(), Some(Tint::Success));
    assert!(c.host().observed.contains(&a_id));

    c.host_mut().set_toggles(
        a_id,
        FeatureToggles {
            actions_enabled: false,
            elevated: true,
        },
    );
    c.toggles_changed(a_id);
    assert!(!c.master_bar().is_enabled());
    assert!(c.master_bar().is_elevated());
    assert_eq!(c.trigger_action(StackRole::Master, ActionSlot::Primary), None);

    let b = master("b");
    let b_id = b.id();
    c.show(b).expect("show b");
    assert!(c.master_bar().is_enabled());
    assert_eq!(c.master_bar().tint(), None);
    assert!(!c.host().observed.contains(&a_id));
    assert!(c.host().observed.contains(&b_id));
}

#[test]
fn test_trigger_action_runs_callback() {
    let mut c = controller(NARROW);
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let descriptor = ActionDescriptor::with_primary(
        Action::new("capture", "Capture").on_exec(move |_| counter.set(counter.get() + 1)),
    )
    .item(Action::new("notes", "Notes"));
    c.show(ContentUnit::master("a").with_descriptor(descriptor))
        .expect("show");

    assert_eq!(
        c.trigger_action(StackRole::Master, ActionSlot::Primary).as_deref(),
        Some("capture")
    );
    assert_eq!(runs.get(), 1);
    assert_eq!(
        c.trigger_action(StackRole::Master, ActionSlot::Item(0)).as_deref(),
        Some("notes")
    );
    assert_eq!(c.trigger_action(StackRole::Master, ActionSlot::Item(3)), None);
    assert_eq!(c.trigger_action(StackRole::Detail, ActionSlot::Primary), None);
}

#[test]
fn test_failed_operation_leaves_state_untouched() {
    let mut c = controller(WIDE);
    c.show(master("a")).expect("show");
    c.show_detail(detail("d")).expect("detail");
    c.set_mode(Mode::Modal).expect("modal");
    let before = c.snapshot_state();

    assert!(c.show(master("b")).is_err());
    assert!(c.show_detail(detail("e")).is_err());
    assert!(c.back().is_err());
    assert!(c.set_mode(Mode::Modal).is_err());
    assert!(c.show(detail("x")).is_err());

    assert_eq!(c.snapshot_state(), before);
}

#[test]
fn test_state_serializes_to_json() {
    let mut c = controller(WIDE);
    c.show(master("a")).expect("show");
    let json = c.snapshot_state().to_json().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

    assert_eq!(value["expanded"], true);
    assert_eq!(value["transition"]["type"], "internal");
    assert_eq!(value["detail"][0]["empty_state"], true);
}
