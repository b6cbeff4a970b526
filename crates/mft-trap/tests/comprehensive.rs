//! Comprehensive tests for mft-trap
//!
//! Full trap lifecycles driven the way a host event loop would drive them.

use mft_dom::{ClickEvent, Document, Key, KeyEvent, NodeId};
use mft_trap::{ActivateOptions, FocusTrap, PollStatus, TrapState};

/// A dialog with an opener button in the page and three controls inside
fn dialog_page() -> (Document, NodeId, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let body = doc.body();
    let opener = doc.create_element(body, "button");
    doc.tree_mut().set_attr(opener, "id", "open-dialog");

    let modal = doc.create_element(body, "div");
    doc.tree_mut().set_attr(modal, "id", "dialog");
    doc.tree_mut().set_attr(modal, "class", "modal");

    let close = doc.create_element(modal, "button");
    let name = doc.create_element(modal, "input");
    let save = doc.create_element(modal, "button");

    (doc, opener, modal, vec![close, name, save])
}

#[test]
fn tab_cycles_at_boundaries() {
    let (mut doc, _, modal, els) = dialog_page();
    let mut trap = FocusTrap::new();
    trap.activate(&mut doc, modal, None).unwrap();
    assert_eq!(doc.active_element(), els[0]);

    // Shift+Tab on the first wraps to the last
    let mut back = KeyEvent::tab(els[0], true);
    assert!(trap.handle_keydown(&mut doc, &mut back));
    assert!(back.is_default_prevented());
    assert!(back.is_propagation_stopped());
    assert_eq!(doc.active_element(), els[2]);

    // Tab on the last wraps to the first
    let mut forward = KeyEvent::tab(els[2], false);
    assert!(trap.handle_keydown(&mut doc, &mut forward));
    assert!(forward.is_default_prevented());
    assert_eq!(doc.active_element(), els[0]);
}

#[test]
fn interior_tabs_pass_through() {
    let (mut doc, _, modal, els) = dialog_page();
    let mut trap = FocusTrap::new();
    trap.activate(&mut doc, modal, None).unwrap();

    // Tab in the middle of the set follows native traversal
    doc.focus(els[1]);
    let mut event = KeyEvent::tab(els[1], false);
    assert!(!trap.handle_keydown(&mut doc, &mut event));
    assert!(!event.is_default_prevented());
    assert_eq!(doc.active_element(), els[1]);

    // Tab (without Shift) on the first passes through too
    let mut event = KeyEvent::tab(els[0], false);
    assert!(!trap.handle_keydown(&mut doc, &mut event));

    // Non-Tab keys are never touched
    let mut event = KeyEvent::new(Key::Enter, els[2]);
    assert!(!trap.handle_keydown(&mut doc, &mut event));
    assert!(!event.is_default_prevented());
}

#[test]
fn deactivate_restores_clicked_trigger() {
    let (mut doc, opener, modal, els) = dialog_page();
    let mut trap = FocusTrap::new();

    trap.register_triggers(&doc, "#open-dialog").unwrap();
    trap.handle_click(&doc, &ClickEvent::new(opener));
    trap.activate(&mut doc, modal, None).unwrap();
    doc.focus(els[2]);

    trap.deactivate(&mut doc);
    assert_eq!(doc.active_element(), opener);
    assert_eq!(trap.state(), TrapState::Idle);
}

#[test]
fn initial_focus_member_is_honored() {
    let (mut doc, _, modal, els) = dialog_page();
    let mut trap = FocusTrap::new();

    trap.activate(&mut doc, modal, Some(els[1].into())).unwrap();
    assert_eq!(doc.active_element(), els[1]);
}

#[test]
fn initial_focus_outside_the_set_falls_back_to_first() {
    let (mut doc, opener, modal, els) = dialog_page();
    let mut trap = FocusTrap::new();

    // The opener is focusable but not a member of the modal's set
    trap.activate(&mut doc, modal, Some(opener.into())).unwrap();
    assert_eq!(doc.active_element(), els[0]);
}

#[test]
fn activate_on_click_end_to_end() {
    let (mut doc, opener, modal, els) = dialog_page();
    let mut trap = FocusTrap::new();

    let options = ActivateOptions {
        class_name: Some("show".to_string()),
        settle: std::time::Duration::from_millis(200),
        poll_interval: std::time::Duration::from_millis(100),
        ..ActivateOptions::default()
    };
    let mut pending = trap.activate_on_click(&doc, "#dialog", opener, options);
    assert_eq!(trap.recorded_trigger(), Some(opener));

    // Modal exists but is not shown yet
    assert_eq!(
        trap.poll_activation(&mut doc, &mut pending).unwrap(),
        PollStatus::Pending
    );

    // Host finishes its show transition
    doc.tree_mut().add_class(modal, "show");
    assert_eq!(
        trap.poll_activation(&mut doc, &mut pending).unwrap(),
        PollStatus::Pending
    );
    assert_eq!(
        trap.poll_activation(&mut doc, &mut pending).unwrap(),
        PollStatus::Pending
    );
    assert_eq!(
        trap.poll_activation(&mut doc, &mut pending).unwrap(),
        PollStatus::Ready
    );
    assert_eq!(trap.state(), TrapState::TrapActive);
    assert_eq!(doc.active_element(), els[0]);

    // Extra ticks after activation change nothing
    doc.focus(els[1]);
    assert_eq!(
        trap.poll_activation(&mut doc, &mut pending).unwrap(),
        PollStatus::Ready
    );
    assert_eq!(doc.active_element(), els[1]);

    trap.deactivate(&mut doc);
    assert_eq!(doc.active_element(), opener);
}

#[test]
fn activate_on_click_passes_initial_focus_through() {
    let (mut doc, opener, _, els) = dialog_page();
    let mut trap = FocusTrap::new();

    let options = ActivateOptions {
        initial_focus: Some(els[1].into()),
        settle: std::time::Duration::ZERO,
        ..ActivateOptions::default()
    };
    let mut pending = trap.activate_on_click(&doc, "#dialog", opener, options);

    assert_eq!(
        trap.poll_activation(&mut doc, &mut pending).unwrap(),
        PollStatus::Ready
    );
    assert_eq!(doc.active_element(), els[1]);
}

#[test]
fn two_controllers_restore_independently() {
    let mut doc = Document::new();
    let body = doc.body();
    let opener_a = doc.create_element(body, "button");
    let opener_b = doc.create_element(body, "button");
    let modal_a = doc.create_element(body, "div");
    let inner_a = doc.create_element(modal_a, "button");
    let modal_b = doc.create_element(body, "div");
    doc.create_element(modal_b, "button");

    let mut trap_a = FocusTrap::new();
    let mut trap_b = FocusTrap::new();
    trap_a.register_triggers(&doc, opener_a).unwrap();
    trap_b.register_triggers(&doc, opener_b).unwrap();

    trap_a.handle_click(&doc, &ClickEvent::new(opener_a));
    trap_a.activate(&mut doc, modal_a, None).unwrap();

    // A second, independent trap opens on top of the first
    trap_b.handle_click(&doc, &ClickEvent::new(opener_b));
    trap_b.activate(&mut doc, modal_b, None).unwrap();

    trap_b.deactivate(&mut doc);
    assert_eq!(doc.active_element(), opener_b);

    doc.focus(inner_a);
    trap_a.deactivate(&mut doc);
    assert_eq!(doc.active_element(), opener_a);
}
