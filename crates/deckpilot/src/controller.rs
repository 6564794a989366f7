use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL_SECS: u32 = 5;

const TICK: Duration = Duration::from_secs(1);

/// Notification pushed by the controller for the view to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// The current slide changed; the view re-renders chrome and restarts
    /// the entrance animation for the new slide.
    SlideChanged { index: usize },
    /// Auto-play ticked without advancing.
    CountdownTicked { remaining: u32 },
    AutoPlayStarted,
    AutoPlayStopped,
}

/// Snapshot of everything the view needs to draw chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub current: usize,
    pub total: usize,
    pub progress: f32,
    /// `None` while auto-play is inactive; the view shows a blank.
    pub countdown: Option<u32>,
}

/// Running auto-play state. Held inside an `Option` on the controller, so
/// there is never more than one tick source: clearing or replacing the
/// option drops the old deadline before a new one can exist.
#[derive(Debug, Clone, Copy)]
struct AutoPlay {
    countdown: u32,
    next_tick: Instant,
}

/// Single source of truth for slide position and auto-play.
///
/// Slides are 1-indexed and form a ring: advancing past the last slide
/// wraps to the first, and backing up from the first wraps to the last.
/// All position changes go through [`go_to_slide`](Self::go_to_slide).
pub struct NavigationController {
    current: usize,
    total: usize,
    interval: u32,
    auto_play: Option<AutoPlay>,
    events: Vec<StateChange>,
}

impl NavigationController {
    /// `total` must be at least 1; `interval` is clamped to at least 1 second.
    pub fn new(total: usize, interval: u32) -> Self {
        debug_assert!(total >= 1, "a deck always has at least one panel");
        Self {
            current: 1,
            total,
            interval: interval.max(1),
            auto_play: None,
            events: Vec::new(),
        }
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn total_slides(&self) -> usize {
        self.total
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn auto_play_active(&self) -> bool {
        self.auto_play.is_some()
    }

    /// Seconds until the next auto-advance, or `None` when inactive.
    pub fn countdown(&self) -> Option<u32> {
        self.auto_play.map(|a| a.countdown)
    }

    pub fn progress(&self) -> f32 {
        self.current as f32 / self.total as f32
    }

    pub fn status(&self) -> Status {
        Status {
            current: self.current,
            total: self.total,
            progress: self.progress(),
            countdown: self.countdown(),
        }
    }

    /// The only path by which the current slide changes.
    ///
    /// Targets outside `1..=total` and the current slide itself are defined
    /// no-ops: no state change, no notification.
    pub fn go_to_slide(&mut self, target: usize) {
        if target < 1 || target > self.total || target == self.current {
            return;
        }
        self.current = target;
        self.events.push(StateChange::SlideChanged { index: target });

        // A manual jump restarts the countdown but leaves the tick deadline
        // alone; the one-second cadence never changes mid-flight.
        if let Some(auto) = &mut self.auto_play {
            auto.countdown = self.interval;
        }
    }

    pub fn next_slide(&mut self) {
        if self.current < self.total {
            self.go_to_slide(self.current + 1);
        } else {
            self.go_to_slide(1);
        }
    }

    pub fn previous_slide(&mut self) {
        if self.current > 1 {
            self.go_to_slide(self.current - 1);
        } else {
            self.go_to_slide(self.total);
        }
    }

    /// Flip auto-play. Activation arms the first tick at `now + 1s`;
    /// deactivation drops the timer state synchronously, so no late tick
    /// can fire afterwards.
    pub fn toggle_auto_play(&mut self, now: Instant) {
        match self.auto_play.take() {
            Some(_) => self.events.push(StateChange::AutoPlayStopped),
            None => {
                self.auto_play = Some(AutoPlay {
                    countdown: self.interval,
                    next_tick: now + TICK,
                });
                self.events.push(StateChange::AutoPlayStarted);
            }
        }
    }

    /// Stop auto-play if it is running. Returns whether it was running.
    pub fn stop_auto_play(&mut self, now: Instant) -> bool {
        if self.auto_play.is_some() {
            self.toggle_auto_play(now);
            true
        } else {
            false
        }
    }

    /// Fire every tick that has come due since the stored deadline.
    ///
    /// Each fired tick advances the deadline by exactly one second, so a
    /// long frame catches up without drifting the cadence.
    pub fn poll_ticks(&mut self, now: Instant) {
        while let Some(deadline) = self.auto_play.map(|a| a.next_tick) {
            if now < deadline {
                break;
            }
            self.tick();
            if let Some(auto) = &mut self.auto_play {
                auto.next_tick = deadline + TICK;
            }
        }
    }

    /// Deadline of the next auto-play tick, for repaint scheduling.
    pub fn next_tick(&self) -> Option<Instant> {
        self.auto_play.map(|a| a.next_tick)
    }

    fn tick(&mut self) {
        let Some(auto) = &mut self.auto_play else {
            return;
        };
        auto.countdown = auto.countdown.saturating_sub(1);
        let remaining = auto.countdown;
        if remaining == 0 {
            self.next_slide();
            if let Some(auto) = &mut self.auto_play {
                auto.countdown = self.interval;
            }
        } else {
            self.events.push(StateChange::CountdownTicked { remaining });
        }
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> NavigationController {
        NavigationController::new(15, DEFAULT_INTERVAL_SECS)
    }

    fn slide_changes(events: &[StateChange]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, StateChange::SlideChanged { .. }))
            .count()
    }

    #[test]
    fn starts_on_first_slide() {
        let c = controller();
        assert_eq!(c.current_slide(), 1);
        assert_eq!(c.total_slides(), 15);
        assert!(!c.auto_play_active());
        assert_eq!(c.countdown(), None);
    }

    #[test]
    fn go_to_slide_sets_every_valid_target() {
        let mut c = controller();
        for n in 1..=15 {
            c.go_to_slide(n);
            assert_eq!(c.current_slide(), n);
        }
    }

    #[test]
    fn go_to_same_slide_is_a_no_op_with_no_notification() {
        let mut c = controller();
        c.go_to_slide(7);
        c.drain_events();
        c.go_to_slide(7);
        assert_eq!(c.current_slide(), 7);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let mut c = controller();
        c.go_to_slide(3);
        c.drain_events();

        c.go_to_slide(0);
        c.go_to_slide(16);
        c.go_to_slide(usize::MAX);

        assert_eq!(c.current_slide(), 3);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut c = controller();
        c.go_to_slide(15);
        c.next_slide();
        assert_eq!(c.current_slide(), 1);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut c = controller();
        assert_eq!(c.current_slide(), 1);
        c.previous_slide();
        assert_eq!(c.current_slide(), 15);
    }

    #[test]
    fn next_and_previous_walk_the_ring() {
        let mut c = controller();
        for expected in [2, 3, 4] {
            c.next_slide();
            assert_eq!(c.current_slide(), expected);
        }
        for expected in [3, 2, 1] {
            c.previous_slide();
            assert_eq!(c.current_slide(), expected);
        }
    }

    #[test]
    fn progress_is_current_over_total() {
        let mut c = controller();
        assert!((c.progress() - 1.0 / 15.0).abs() < f32::EPSILON);
        c.go_to_slide(15);
        assert!((c.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn toggle_arms_and_disarms_auto_play() {
        let mut c = controller();
        let t0 = Instant::now();

        c.toggle_auto_play(t0);
        assert!(c.auto_play_active());
        assert_eq!(c.countdown(), Some(5));

        c.toggle_auto_play(t0);
        assert!(!c.auto_play_active());
        assert_eq!(c.countdown(), None);

        let events = c.drain_events();
        assert_eq!(
            events,
            vec![StateChange::AutoPlayStarted, StateChange::AutoPlayStopped]
        );
    }

    #[test]
    fn toggling_off_leaves_no_pending_tick() {
        let mut c = controller();
        let t0 = Instant::now();

        c.toggle_auto_play(t0);
        c.toggle_auto_play(t0 + Duration::from_millis(500));
        c.drain_events();

        // Wait far past the interval: nothing may fire.
        c.poll_ticks(t0 + Duration::from_secs(60));
        assert_eq!(c.current_slide(), 1);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn five_ticks_advance_exactly_once_and_reset_countdown() {
        let mut c = controller();
        let t0 = Instant::now();
        c.toggle_auto_play(t0);
        c.drain_events();

        c.poll_ticks(t0 + Duration::from_secs(5));

        let events = c.drain_events();
        assert_eq!(slide_changes(&events), 1);
        assert_eq!(c.current_slide(), 2);
        assert_eq!(c.countdown(), Some(5));
    }

    #[test]
    fn countdown_reports_each_second() {
        let mut c = controller();
        let t0 = Instant::now();
        c.toggle_auto_play(t0);
        c.drain_events();

        c.poll_ticks(t0 + Duration::from_secs(4));

        let events = c.drain_events();
        assert_eq!(
            events,
            vec![
                StateChange::CountdownTicked { remaining: 4 },
                StateChange::CountdownTicked { remaining: 3 },
                StateChange::CountdownTicked { remaining: 2 },
                StateChange::CountdownTicked { remaining: 1 },
            ]
        );
        assert_eq!(c.current_slide(), 1);
    }

    #[test]
    fn auto_play_wraps_past_the_end_of_the_deck() {
        let mut c = NavigationController::new(3, 1);
        let t0 = Instant::now();
        c.go_to_slide(3);
        c.toggle_auto_play(t0);

        c.poll_ticks(t0 + Duration::from_secs(1));
        assert_eq!(c.current_slide(), 1);
    }

    #[test]
    fn manual_navigation_resets_countdown_without_a_second_timer() {
        let mut c = controller();
        let t0 = Instant::now();
        c.toggle_auto_play(t0);

        // Two ticks in, then a manual jump.
        c.poll_ticks(t0 + Duration::from_secs(2));
        assert_eq!(c.countdown(), Some(3));
        c.go_to_slide(7);
        assert_eq!(c.countdown(), Some(5));
        c.drain_events();

        // Deadlines are unchanged by the jump: ticks keep firing at
        // t0+3..t0+10, eight of them, with exactly one advance (at t0+7,
        // five ticks after the reset).
        c.poll_ticks(t0 + Duration::from_secs(10));
        let events = c.drain_events();
        assert_eq!(events.len(), 8);
        assert_eq!(slide_changes(&events), 1);
        assert_eq!(c.current_slide(), 8);
        assert_eq!(c.countdown(), Some(2));
    }

    #[test]
    fn poll_is_idempotent_for_the_same_instant() {
        let mut c = controller();
        let t0 = Instant::now();
        c.toggle_auto_play(t0);
        c.drain_events();

        let t = t0 + Duration::from_secs(3);
        c.poll_ticks(t);
        let first = c.drain_events().len();
        c.poll_ticks(t);
        assert_eq!(first, 3);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn stop_auto_play_only_acts_when_running() {
        let mut c = controller();
        let t0 = Instant::now();
        assert!(!c.stop_auto_play(t0));
        c.toggle_auto_play(t0);
        assert!(c.stop_auto_play(t0));
        assert!(!c.auto_play_active());
    }

    #[test]
    fn custom_interval_is_respected() {
        let mut c = NavigationController::new(10, 3);
        let t0 = Instant::now();
        c.toggle_auto_play(t0);
        assert_eq!(c.countdown(), Some(3));

        c.poll_ticks(t0 + Duration::from_secs(3));
        assert_eq!(c.current_slide(), 2);
        assert_eq!(c.countdown(), Some(3));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let c = NavigationController::new(5, 0);
        assert_eq!(c.interval(), 1);
    }
}
