use eframe::egui;

/// Horizontal distance a touch must travel before it counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// A discrete request against the controller or the window, produced by the
/// input mapping and executed by the app. No hidden control flow: every
/// state change traces back to one of these or the auto-play tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    ToggleAutoPlay,
    /// Escape: stop auto-play when running, otherwise begin exit handling.
    Stop,
    ToggleFullscreen,
    ToggleTheme,
    ToggleHud,
    Quit,
}

/// Map a key press to a command.
pub fn key_command(key: egui::Key, modifiers: egui::Modifiers) -> Option<Command> {
    use egui::Key;
    match key {
        Key::ArrowRight | Key::Space | Key::PageDown | Key::N => Some(Command::Next),
        Key::ArrowLeft | Key::PageUp => Some(Command::Previous),
        Key::Home => Some(Command::First),
        Key::End => Some(Command::Last),
        Key::P if modifiers.ctrl => Some(Command::ToggleAutoPlay),
        Key::P => Some(Command::Previous),
        Key::F | Key::F11 => Some(Command::ToggleFullscreen),
        Key::D => Some(Command::ToggleTheme),
        Key::H => Some(Command::ToggleHud),
        Key::Escape => Some(Command::Stop),
        Key::Q => Some(Command::Quit),
        _ => None,
    }
}

/// Map a click on the slide surface to a command: left half goes back,
/// right half goes forward. A click exactly on the midpoint counts as the
/// right half.
pub fn click_command(click_x: f32, surface_width: f32) -> Command {
    if click_x < surface_width / 2.0 {
        Command::Previous
    } else {
        Command::Next
    }
}

/// Map a completed horizontal swipe to a command. `delta_x` is end minus
/// start; a leftward swipe advances. Swipes at or under the threshold are
/// ignored.
pub fn swipe_command(delta_x: f32) -> Option<Command> {
    if delta_x.abs() <= SWIPE_THRESHOLD {
        return None;
    }
    if delta_x < 0.0 {
        Some(Command::Next)
    } else {
        Some(Command::Previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Key, Modifiers};

    #[test]
    fn arrow_space_and_page_keys_navigate() {
        for key in [Key::ArrowRight, Key::Space, Key::PageDown] {
            assert_eq!(key_command(key, Modifiers::NONE), Some(Command::Next));
        }
        for key in [Key::ArrowLeft, Key::PageUp] {
            assert_eq!(key_command(key, Modifiers::NONE), Some(Command::Previous));
        }
    }

    #[test]
    fn home_and_end_jump_to_bounds() {
        assert_eq!(key_command(Key::Home, Modifiers::NONE), Some(Command::First));
        assert_eq!(key_command(Key::End, Modifiers::NONE), Some(Command::Last));
    }

    #[test]
    fn ctrl_p_toggles_auto_play_but_plain_p_goes_back() {
        assert_eq!(
            key_command(Key::P, Modifiers::CTRL),
            Some(Command::ToggleAutoPlay)
        );
        assert_eq!(key_command(Key::P, Modifiers::NONE), Some(Command::Previous));
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        assert_eq!(key_command(Key::Z, Modifiers::NONE), None);
        assert_eq!(key_command(Key::Num3, Modifiers::NONE), None);
    }

    #[test]
    fn left_half_click_goes_back_right_half_advances() {
        assert_eq!(click_command(0.0, 1000.0), Command::Previous);
        assert_eq!(click_command(499.9, 1000.0), Command::Previous);
        assert_eq!(click_command(500.1, 1000.0), Command::Next);
        assert_eq!(click_command(1000.0, 1000.0), Command::Next);
    }

    #[test]
    fn midpoint_click_counts_as_next() {
        assert_eq!(click_command(500.0, 1000.0), Command::Next);
    }

    #[test]
    fn swipe_past_threshold_navigates() {
        assert_eq!(swipe_command(-80.0), Some(Command::Next));
        assert_eq!(swipe_command(80.0), Some(Command::Previous));
    }

    #[test]
    fn swipe_at_or_under_threshold_is_ignored() {
        assert_eq!(swipe_command(0.0), None);
        assert_eq!(swipe_command(SWIPE_THRESHOLD), None);
        assert_eq!(swipe_command(-SWIPE_THRESHOLD), None);
        assert_eq!(swipe_command(SWIPE_THRESHOLD + 0.1), Some(Command::Previous));
    }
}
