//! Focus Trap Controller
//!
//! Owns the trap lifecycle: trigger registration, activation against a
//! modal container, boundary Tab interception, and focus restoration on
//! deactivation.
//!
//! Each `FocusTrap` is an independent instance; a host managing several
//! concurrently openable modals gives each its own controller so one
//! trap's pending restoration target cannot clobber another's.

use std::collections::HashSet;

use mft_dom::{ClickEvent, Document, Key, KeyEvent, NodeId};

use crate::pending::{ActivateOptions, PendingActivation, PollStatus};
use crate::query::{focusable_children, resolve_many, resolve_one, ElementRef};
use crate::TrapError;

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapState {
    /// No recorded trigger, no active session
    Idle,
    /// A trigger click was observed; restoration target is armed
    TriggerRecorded,
    /// A trap session is active; boundary keydowns are intercepted
    TrapActive,
}

/// An active trap: the container and, when it has focusable content, the
/// first/last pair whose boundary Tab presses are intercepted.
#[derive(Debug)]
struct TrapSession {
    container: NodeId,
    boundary: Option<(NodeId, NodeId)>,
}

/// Focus trap controller
#[derive(Debug, Default)]
pub struct FocusTrap {
    /// Elements registered as modal openers
    triggers: HashSet<NodeId>,
    /// The single restoration slot: the element to refocus on deactivate
    recorded_trigger: Option<NodeId>,
    /// The active session, if any
    session: Option<TrapSession>,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> TrapState {
        if self.session.is_some() {
            TrapState::TrapActive
        } else if self.recorded_trigger.is_some() {
            TrapState::TriggerRecorded
        } else {
            TrapState::Idle
        }
    }

    /// The element deactivation will restore focus to, if one is armed
    pub fn recorded_trigger(&self) -> Option<NodeId> {
        self.recorded_trigger
    }

    /// Register elements whose clicks should arm focus restoration.
    ///
    /// Re-registering an element is a no-op; the set holds each element
    /// once. Returns the total number of registered triggers. An
    /// unresolvable or empty reference leaves the registrations untouched
    /// and reports `InvalidReference`.
    pub fn register_triggers(
        &mut self,
        doc: &Document,
        refs: impl Into<ElementRef>,
    ) -> Result<usize, TrapError> {
        let refs = refs.into();
        let resolved = resolve_many(doc, &refs)
            .filter(|els| !els.is_empty())
            .ok_or_else(|| invalid(&refs, "trigger registration"))?;

        for id in resolved {
            self.triggers.insert(id);
        }
        tracing::debug!("registered triggers, {} total", self.triggers.len());
        Ok(self.triggers.len())
    }

    /// Feed a click from the host event loop.
    ///
    /// If the click landed on a registered trigger or inside one (clicks
    /// bubble), the innermost node it actually hit is recorded as the
    /// restoration target.
    pub fn handle_click(&mut self, doc: &Document, event: &ClickEvent) {
        let tree = doc.tree();
        let hit_trigger = std::iter::once(event.target)
            .chain(tree.ancestors(event.target))
            .any(|id| self.triggers.contains(&id));
        if hit_trigger {
            let target = event.effective_target();
            tracing::debug!("trigger click recorded: {:?}", target);
            self.recorded_trigger = Some(target);
        }
    }

    /// Explicitly arm the restoration target, falling back to the
    /// currently focused element (ultimately `<body>`) when the reference
    /// does not resolve.
    pub fn set_trigger(&mut self, doc: &Document, trigger: impl Into<ElementRef>) {
        let trigger = trigger.into();
        let target = resolve_one(doc, &trigger).unwrap_or_else(|| doc.active_element());
        self.recorded_trigger = Some(target);
    }

    /// Activate the trap against a modal container.
    ///
    /// Focuses `initial_focus` when it resolves to a member of the
    /// focusable set, else the first member; a container with no focusable
    /// descendants is itself focused and nothing is intercepted. The
    /// focusable set is fixed at activation time; re-activate after the
    /// modal's content changes.
    ///
    /// Activating while a session is already active replaces that session
    /// without restoring its focus.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        target: impl Into<ElementRef>,
        initial_focus: Option<ElementRef>,
    ) -> Result<(), TrapError> {
        let target = target.into();
        let container =
            resolve_one(doc, &target).ok_or_else(|| invalid(&target, "activation target"))?;

        let focusables = focusable_children(doc, container);
        if focusables.is_empty() {
            tracing::debug!("no focusable children, focusing container {:?}", container);
            doc.focus(container);
            self.session = Some(TrapSession {
                container,
                boundary: None,
            });
            return Ok(());
        }

        let first = focusables[0];
        let last = focusables[focusables.len() - 1];
        let start = initial_focus
            .and_then(|r| resolve_one(doc, &r))
            .filter(|id| focusables.contains(id))
            .unwrap_or(first);

        doc.focus(start);
        self.session = Some(TrapSession {
            container,
            boundary: Some((first, last)),
        });
        tracing::debug!(
            "trap active on {:?}, {} focusable children",
            container,
            focusables.len()
        );
        Ok(())
    }

    /// Feed a keydown from the host event loop.
    ///
    /// While a session with focusable content is active: Shift+Tab on the
    /// first member wraps focus to the last, Tab on the last wraps to the
    /// first; both consume the event (`prevent_default` +
    /// `stop_propagation`). Every other keydown passes through untouched.
    /// Returns whether the event was consumed.
    pub fn handle_keydown(&mut self, doc: &mut Document, event: &mut KeyEvent) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let Some((first, last)) = session.boundary else {
            return false;
        };
        if event.key != Key::Tab {
            return false;
        }

        if event.target == first && event.shift {
            event.prevent_default();
            event.stop_propagation();
            doc.focus(last);
            true
        } else if event.target == last && !event.shift {
            event.prevent_default();
            event.stop_propagation();
            doc.focus(first);
            true
        } else {
            false
        }
    }

    /// Arm the restoration target and start waiting for the modal to
    /// appear, for hosts that cannot deliver an explicit "modal shown"
    /// signal.
    ///
    /// The trigger is recorded immediately (falling back to the focused
    /// element, then `<body>`). The returned [`PendingActivation`] is
    /// driven by [`poll_activation`](Self::poll_activation) at roughly
    /// `options.poll_interval` from the host's timer.
    pub fn activate_on_click(
        &mut self,
        doc: &Document,
        target: impl Into<ElementRef>,
        trigger: impl Into<ElementRef>,
        options: ActivateOptions,
    ) -> PendingActivation {
        self.set_trigger(doc, trigger);
        PendingActivation::new(target.into(), options)
    }

    /// Drive one poll tick of a pending activation.
    ///
    /// Returns `Pending` while waiting for the target (and its class
    /// condition) or counting down the settle delay, `Ready` once the trap
    /// has been activated, `Cancelled` if the pending activation was
    /// cancelled, and `Timeout` as an error when the attempt budget is
    /// exhausted.
    pub fn poll_activation(
        &mut self,
        doc: &mut Document,
        pending: &mut PendingActivation,
    ) -> Result<PollStatus, TrapError> {
        match pending.advance(doc) {
            PollStatus::Ready => {
                // Activate exactly once, on the tick that became ready
                if !pending.is_activated() {
                    pending.mark_activated();
                    self.activate(doc, pending.target().clone(), pending.initial_focus())?;
                }
                Ok(PollStatus::Ready)
            }
            PollStatus::TimedOut => {
                let err = TrapError::Timeout {
                    target: pending.target().to_string(),
                    attempts: pending.attempts(),
                };
                tracing::error!("{err}");
                Err(err)
            }
            status => Ok(status),
        }
    }

    /// Deactivate the trap: restore focus to the recorded trigger (else
    /// the currently focused element, else `<body>`) and clear the
    /// restoration slot and session.
    ///
    /// Idempotent: a second call refocuses the same fallback and is safe.
    pub fn deactivate(&mut self, doc: &mut Document) {
        let target = self
            .recorded_trigger
            .take()
            .filter(|&id| doc.tree().is_element(id))
            .unwrap_or_else(|| doc.active_element());
        tracing::debug!("trap deactivated, restoring focus to {:?}", target);
        doc.focus(target);
        self.session = None;
    }
}

fn invalid(reference: &ElementRef, what: &str) -> TrapError {
    let err = TrapError::InvalidReference(format!("{reference} for {what}"));
    tracing::error!("{err}");
    err
}
