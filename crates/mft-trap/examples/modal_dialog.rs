//! Modal dialog walkthrough
//!
//! Builds a small page, opens a modal via a registered trigger, cycles
//! focus at the boundaries, and restores focus on close. Run with
//! `RUST_LOG=debug` to watch the lifecycle.

use mft_dom::{ClickEvent, Document, KeyEvent};
use mft_trap::{ActivateOptions, FocusTrap, PollStatus};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.body();

    let opener = doc.create_element(body, "button");
    doc.tree_mut().set_attr(opener, "id", "open-settings");

    let modal = doc.create_element(body, "div");
    doc.tree_mut().set_attr(modal, "id", "settings-dialog");
    doc.tree_mut().set_attr(modal, "class", "modal");
    let close = doc.create_element(modal, "button");
    doc.create_element(modal, "select");
    let save = doc.create_element(modal, "button");

    let mut trap = FocusTrap::new();
    trap.register_triggers(&doc, "#open-settings")
        .expect("opener exists");

    // The user clicks the opener; the host starts its show transition and
    // the trap waits for the `show` class to land.
    trap.handle_click(&doc, &ClickEvent::new(opener));
    let options = ActivateOptions {
        class_name: Some("show".to_string()),
        ..ActivateOptions::default()
    };
    let mut pending = trap.activate_on_click(&doc, "#settings-dialog", opener, options);

    doc.tree_mut().add_class(modal, "show");
    loop {
        match trap
            .poll_activation(&mut doc, &mut pending)
            .expect("modal appears")
        {
            PollStatus::Ready => break,
            _ => continue,
        }
    }
    println!("activated, focus on close button: {}", doc.active_element() == close);

    // Shift+Tab from the first control wraps to the last
    let mut back = KeyEvent::tab(close, true);
    trap.handle_keydown(&mut doc, &mut back);
    println!("shift+tab wrapped to save: {}", doc.active_element() == save);

    // Tab from the last wraps to the first
    let mut forward = KeyEvent::tab(save, false);
    trap.handle_keydown(&mut doc, &mut forward);
    println!("tab wrapped to close: {}", doc.active_element() == close);

    // Closing the modal restores focus to the opener
    trap.deactivate(&mut doc);
    println!("focus restored to opener: {}", doc.active_element() == opener);
}
