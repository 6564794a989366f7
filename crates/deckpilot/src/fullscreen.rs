use std::time::{Duration, Instant};

/// How long we wait for the platform to honor a fullscreen request before
/// declaring it unavailable.
const REQUEST_GRACE: Duration = Duration::from_millis(1500);

/// Resolution of a fullscreen request, observed one or more frames later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Entered,
    Exited,
    /// The platform never applied the request. Reported to the user as a
    /// transient notice; navigation and auto-play are unaffected.
    Unavailable,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    target: bool,
    deadline: Instant,
}

/// Single enter/exit/is-active contract over the window's fullscreen
/// capability.
///
/// The platform applies fullscreen asynchronously, so a toggle is held as a
/// pending request until the observed viewport state matches it or the
/// grace period expires. External changes (a window-manager shortcut, say)
/// are absorbed whenever no request is in flight.
pub struct FullscreenState {
    active: bool,
    pending: Option<Pending>,
}

impl FullscreenState {
    pub fn new(active: bool) -> Self {
        Self {
            active,
            pending: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Request the opposite of the current state, replacing any request
    /// still in flight. Returns the target state so the caller can issue
    /// the matching viewport command.
    pub fn request_toggle(&mut self, now: Instant) -> bool {
        let target = !self.active;
        self.pending = Some(Pending {
            target,
            deadline: now + REQUEST_GRACE,
        });
        target
    }

    /// Feed back the viewport state observed this frame. Returns an outcome
    /// when a pending request resolves or times out.
    pub fn observe(&mut self, observed: bool, now: Instant) -> Option<Outcome> {
        match self.pending {
            Some(p) if observed == p.target => {
                self.pending = None;
                self.active = observed;
                Some(if observed {
                    Outcome::Entered
                } else {
                    Outcome::Exited
                })
            }
            Some(p) if now >= p.deadline => {
                self.pending = None;
                self.active = observed;
                Some(Outcome::Unavailable)
            }
            Some(_) => None,
            None => {
                self.active = observed;
                None
            }
        }
    }
}
