//! mft - Modal Focus Trap
//!
//! Accessible keyboard-focus containment for modal dialogs: while a modal
//! is open, Tab/Shift+Tab cycles only among the modal's focusable
//! descendants; when it closes, focus returns to the element that opened
//! it.
//!
//! The host drives a [`FocusTrap`] from its own event loop:
//! register trigger elements, forward clicks and keydowns, activate the
//! trap once the modal is shown, deactivate on close.
//!
//! ```
//! use mft_dom::{ClickEvent, Document};
//! use mft_trap::FocusTrap;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let opener = doc.create_element(body, "button");
//! let modal = doc.create_element(body, "div");
//! doc.tree_mut().set_attr(modal, "id", "dialog");
//! let ok = doc.create_element(modal, "button");
//!
//! let mut trap = FocusTrap::new();
//! trap.register_triggers(&doc, opener).unwrap();
//! trap.handle_click(&doc, &ClickEvent::new(opener));
//! trap.activate(&mut doc, "#dialog", None).unwrap();
//! assert_eq!(doc.active_element(), ok);
//!
//! trap.deactivate(&mut doc);
//! assert_eq!(doc.active_element(), opener);
//! ```

pub mod pending;
pub mod query;
pub mod trap;

pub use pending::{ActivateOptions, PendingActivation, PollStatus};
pub use query::{focusable_children, resolve_many, resolve_one, ElementRef, TabIndex};
pub use trap::{FocusTrap, TrapState};

/// Focus trap error
#[derive(Debug, thiserror::Error)]
pub enum TrapError {
    #[error("invalid element reference: {0}")]
    InvalidReference(String),

    #[error("target {target} did not become visible within {attempts} poll attempts")]
    Timeout { target: String, attempts: u32 },
}
