//! Controller behaviour with the animation driver enabled.

mod common;

use std::time::Duration;

use actionarea_core::config::Config;
use actionarea_core::content::StackRole;
use actionarea_core::controller::PresentationController;
use actionarea_core::layout::{Layout, Size, SubMode};
use actionarea_core::transition::TransitionType;
use actionarea_core::Error;

use common::{assert_consistent, detail, master, primary_id, HostEvent, RecordingHost, NARROW, WIDE};

fn animated(size: Size) -> PresentationController<RecordingHost> {
    let mut config = Config::default();
    config.animation.enabled = true;
    config.animation.duration = Duration::from_millis(200);
    PresentationController::new(RecordingHost::default(), size, &config)
}

#[test]
fn test_enter_completes_on_did_show() {
    let mut c = animated(NARROW);
    let a = master("a");
    let a_id = a.id();

    c.show(a).expect("show");
    assert_eq!(c.transition(), TransitionType::Enter);
    assert!(c.master_bar().is_raised());
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("a-open"));
    assert!(c.is_animating());
    assert!(!c.is_settled());
    assert_eq!(
        c.host().events,
        [HostEvent::WillShow(StackRole::Master, Some(a_id))]
    );

    c.tick(Duration::from_millis(100)).expect("tick");
    assert_eq!(c.transition(), TransitionType::Enter);
    assert_eq!(c.master_bar().visual().offset, 0);

    c.tick(Duration::from_millis(100)).expect("tick");
    assert!(!c.is_animating());
    assert_eq!(c.transition(), TransitionType::Internal);
    assert_eq!(
        c.host().events.last(),
        Some(&HostEvent::DidShow(StackRole::Master, Some(a_id)))
    );
}

#[test]
fn test_phases_append_to_active_driver() {
    let mut c = animated(NARROW);
    c.show(master("a")).expect("show");
    c.show_detail(detail("d")).expect("detail while entering");
    assert_eq!(c.transition(), TransitionType::Enter);
    assert!(c.is_animating());

    c.finish_animations().expect("finish");
    assert_eq!(c.transition(), TransitionType::Internal);
    assert_eq!(c.master_stack().titles(), ["a", "d"]);
    assert_eq!(primary_id(&c, StackRole::Master).as_deref(), Some("d-save"));
    assert_consistent(&c);
}

#[test]
fn test_unexpected_phase_is_rejected() {
    let mut c = animated(NARROW);
    c.show(master("a")).expect("show");

    let err = c.back().expect_err("back while entering");
    assert!(matches!(
        err,
        Error::UnexpectedPhase {
            transition: TransitionType::Enter,
            ..
        }
    ));
    assert!(err.is_precondition());
    assert_eq!(c.master_stack().len(), 1);
    assert_eq!(c.override_depth(), 1);
}

#[test]
fn test_landscape_enter_cross_fades_snapshot() {
    let mut c = animated(WIDE);
    c.show(master("a")).expect("show");

    assert!(c.is_expanded());
    assert_eq!(c.snapshots().len(), 1);
    assert_eq!(c.snapshots()[0].alpha, 100);

    c.tick(Duration::from_millis(50)).expect("tick");
    assert_eq!(c.snapshots()[0].alpha, 0);

    c.finish_animations().expect("finish");
    assert!(c.snapshots().is_empty());
    assert_eq!(c.transition(), TransitionType::Internal);
}

#[test]
fn test_size_transition_settles_after_completion() {
    let mut c = animated(NARROW);
    c.show(master("a")).expect("show");
    c.show_detail(detail("dA")).expect("detail");
    c.finish_animations().expect("settle");

    c.view_will_transition(WIDE).expect("rotate");
    assert_eq!(
        c.transition(),
        TransitionType::Size(Layout::landscape(WIDE, SubMode::Expanded))
    );
    assert_eq!(c.detail_stack().titles(), ["No selection", "dA"]);
    assert_eq!(c.snapshots().len(), 2);
    assert!(matches!(
        c.show(master("b")),
        Err(Error::UnexpectedPhase { .. })
    ));

    c.finish_animations().expect("finish");
    assert_eq!(c.transition(), TransitionType::Internal);
    assert!(c.snapshots().is_empty());
    assert_eq!(primary_id(&c, StackRole::Detail).as_deref(), Some("dA-save"));
    assert!(c.master_bar().descriptor().is_empty());
    assert_consistent(&c);
}

#[test]
fn test_back_to_back_size_changes_settle_once() {
    let mut c = animated(NARROW);
    c.show(master("a")).expect("show");
    c.finish_animations().expect("settle");

    c.view_will_transition(WIDE).expect("rotate");
    c.view_will_transition(NARROW).expect("rotate back");
    assert_eq!(c.transition(), TransitionType::Size(Layout::portrait(NARROW)));
    assert!(!c.is_expanded());

    c.finish_animations().expect("finish");
    assert_eq!(c.transition(), TransitionType::Internal);
    assert!(c.master_stack().all()[0].empty_state().is_some());
    assert_consistent(&c);
}

#[test]
fn test_lower_clears_content_after_completion() {
    let mut c = animated(NARROW);
    c.show(master("a")).expect("show");
    c.finish_animations().expect("settle");

    c.back().expect("back");
    assert!(!c.master_bar().is_raised());
    assert!(c.master_bar().visual().primary.is_some());

    c.finish_animations().expect("finish");
    assert!(c.master_bar().visual().primary.is_none());
    assert_eq!(c.transition(), TransitionType::External);
}
