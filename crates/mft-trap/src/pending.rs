//! Pending Activation
//!
//! Waiting for a modal to become visible before trapping focus. The host
//! drives this from its own timer at roughly `poll_interval`; each tick
//! re-resolves the target and, if configured, checks for the "shown" CSS
//! class. Once the condition holds, a settle delay (expressed in ticks)
//! runs down before activation so the host's show transition can finish.
//!
//! The wait is bounded by `max_attempts` and cancelable, so a superseded
//! attempt never polls forever.

use std::time::Duration;

use mft_dom::Document;

use crate::query::{resolve_one, ElementRef};

/// Configuration for a click-driven activation
#[derive(Debug, Clone)]
pub struct ActivateOptions {
    /// CSS class whose presence on the target means "now shown"; with no
    /// class the target merely has to resolve
    pub class_name: Option<String>,
    /// Element to focus instead of the first focusable child
    pub initial_focus: Option<ElementRef>,
    /// Extra delay after the shown-condition holds, before activating
    pub settle: Duration,
    /// Cadence at which the host promises to poll
    pub poll_interval: Duration,
    /// Poll budget before the wait reports a timeout
    pub max_attempts: u32,
}

impl Default for ActivateOptions {
    fn default() -> Self {
        Self {
            class_name: None,
            initial_focus: None,
            settle: Duration::from_millis(400),
            poll_interval: Duration::from_millis(100),
            max_attempts: 50,
        }
    }
}

/// Outcome of one poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Condition not met yet (or settle delay still running); keep polling
    Pending,
    /// Condition held and the settle delay elapsed
    Ready,
    /// Poll budget exhausted
    TimedOut,
    /// Explicitly cancelled
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for the target to resolve (and carry the class)
    Waiting,
    /// Condition held; remaining settle ticks
    Settling(u32),
    /// Terminal
    Finished(PollStatus),
}

/// A click-driven activation waiting for its modal to appear
#[derive(Debug)]
pub struct PendingActivation {
    target: ElementRef,
    options: ActivateOptions,
    attempts: u32,
    phase: Phase,
    activated: bool,
}

impl PendingActivation {
    pub(crate) fn new(target: ElementRef, options: ActivateOptions) -> Self {
        Self {
            target,
            options,
            attempts: 0,
            phase: Phase::Waiting,
            activated: false,
        }
    }

    /// The modal reference being waited on
    pub fn target(&self) -> &ElementRef {
        &self.target
    }

    /// Poll ticks consumed so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The configured initial-focus pass-through
    pub fn initial_focus(&self) -> Option<ElementRef> {
        self.options.initial_focus.clone()
    }

    /// Stop waiting; subsequent ticks report `Cancelled` and do nothing
    pub fn cancel(&mut self) {
        if !matches!(self.phase, Phase::Finished(_)) {
            tracing::debug!("pending activation for {} cancelled", self.target);
            self.phase = Phase::Finished(PollStatus::Cancelled);
        }
    }

    /// Whether the wait reached a terminal state
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub(crate) fn is_activated(&self) -> bool {
        self.activated
    }

    pub(crate) fn mark_activated(&mut self) {
        self.activated = true;
    }

    /// Advance one tick. Terminal states are sticky.
    pub fn advance(&mut self, doc: &Document) -> PollStatus {
        match self.phase {
            Phase::Finished(status) => status,
            Phase::Waiting => {
                if self.attempts >= self.options.max_attempts {
                    self.phase = Phase::Finished(PollStatus::TimedOut);
                    return PollStatus::TimedOut;
                }
                self.attempts += 1;
                if self.condition_holds(doc) {
                    let ticks = self.settle_ticks();
                    if ticks == 0 {
                        self.phase = Phase::Finished(PollStatus::Ready);
                        PollStatus::Ready
                    } else {
                        self.phase = Phase::Settling(ticks);
                        PollStatus::Pending
                    }
                } else {
                    PollStatus::Pending
                }
            }
            Phase::Settling(remaining) => {
                if remaining <= 1 {
                    self.phase = Phase::Finished(PollStatus::Ready);
                    PollStatus::Ready
                } else {
                    self.phase = Phase::Settling(remaining - 1);
                    PollStatus::Pending
                }
            }
        }
    }

    /// "Modal shown": the target resolves and, when a class is
    /// configured, carries it
    fn condition_holds(&self, doc: &Document) -> bool {
        let Some(id) = resolve_one(doc, &self.target) else {
            return false;
        };
        match &self.options.class_name {
            Some(class) => doc
                .tree()
                .get(id)
                .and_then(|n| n.as_element())
                .is_some_and(|el| el.has_class(class)),
            None => true,
        }
    }

    /// Settle delay converted to whole poll ticks, rounding up
    fn settle_ticks(&self) -> u32 {
        let interval = self.options.poll_interval.as_millis().max(1);
        let settle = self.options.settle.as_millis();
        settle.div_ceil(interval) as u32
    }
}
