use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// A fixed deck of pre-rendered slide panels. Immutable once loaded; the
/// panel count is the controller's `total_slides` for the whole session.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    pub panels: Vec<Panel>,
}

/// One addressable unit of content, identified by its 1-based position.
#[derive(Debug, Clone, Deserialize)]
pub struct Panel {
    pub heading: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl Deck {
    /// Load a deck from a YAML file. An empty deck is an error: the
    /// controller requires at least one panel.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let deck: Deck = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if deck.panels.is_empty() {
            anyhow::bail!("No panels found in {}", path.display());
        }
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled deck")
    }

    /// The demo deck shipped in the binary, shown when no file is given.
    pub fn builtin() -> Self {
        fn panel(heading: &str, body: &str, bullets: &[&str]) -> Panel {
            Panel {
                heading: heading.to_string(),
                body: if body.is_empty() {
                    None
                } else {
                    Some(body.to_string())
                },
                bullets: bullets.iter().map(|b| b.to_string()).collect(),
            }
        }

        Deck {
            title: Some("Deckpilot".to_string()),
            theme: Some("dark".to_string()),
            panels: vec![
                panel(
                    "Deckpilot",
                    "A slideshow viewer for fixed decks.\nEverything on screen is driven by one \
                     small navigation controller.",
                    &[],
                ),
                panel(
                    "Why another viewer?",
                    "Presentation tools keep growing editors, clouds and plugins. Presenting a \
                     finished deck needs none of that.",
                    &[
                        "One binary, no runtime services",
                        "Decks are plain YAML files",
                        "Every control reachable from the keyboard",
                    ],
                ),
                panel(
                    "The deck model",
                    "A deck is a fixed, ordered list of panels. The panel count never changes \
                     while the viewer runs.",
                    &[
                        "Panels are addressed by 1-based position",
                        "A heading, optional body text, optional bullets",
                        "No authoring, no mutation, no surprises",
                    ],
                ),
                panel(
                    "Navigation",
                    "The deck is a ring: stepping past the last panel returns to the first, and \
                     stepping back from the first lands on the last.",
                    &[
                        "Arrows, Space and the page keys step",
                        "Home and End jump to the bounds",
                        "Indicator dots jump anywhere",
                    ],
                ),
                panel(
                    "Pointer and touch",
                    "",
                    &[
                        "Click the left half to go back",
                        "Click the right half to advance",
                        "Swipe horizontally on touch screens",
                    ],
                ),
                panel(
                    "Auto-play",
                    "Ctrl+P starts a hands-free run: a one-second countdown ticks in the corner \
                     and the deck advances when it reaches zero.",
                    &[
                        "Five seconds per panel by default",
                        "Manual navigation restarts the countdown",
                        "Esc stops it instantly",
                    ],
                ),
                panel(
                    "The countdown",
                    "The countdown is visible the whole time, so the audience is never surprised \
                     by an advance. It wraps past the last panel and keeps going until stopped.",
                    &[],
                ),
                panel(
                    "Fullscreen",
                    "F or F11 toggles fullscreen through a single capability interface. If the \
                     platform refuses, you get a notice, not a crash.",
                    &[],
                ),
                panel(
                    "Orientation chrome",
                    "",
                    &[
                        "Slide counter in the corner",
                        "Progress bar along the bottom edge",
                        "One dot per panel, the current one lit",
                    ],
                ),
                panel(
                    "Themes",
                    "Two built-in palettes, toggled live with D. Decks can name their preferred \
                     one.",
                    &["Dark for rooms with the lights down", "Light for daylight and projectors"],
                ),
                panel(
                    "Configuration",
                    "Defaults live in a small YAML file under your config directory.",
                    &[
                        "defaults.theme: light or dark",
                        "defaults.interval: seconds per panel",
                        "defaults.start_mode: first, last or a number",
                    ],
                ),
                panel(
                    "The command line",
                    "",
                    &[
                        "deckpilot talk.yaml — present a deck",
                        "deckpilot --windowed --slide 3",
                        "deckpilot config set defaults.interval 8",
                        "deckpilot completion zsh",
                    ],
                ),
                panel(
                    "Under the hood",
                    "All state lives in one controller: the current panel, the panel count and \
                     the auto-play countdown. Every change flows through a single entry point, \
                     so the invariants cannot drift.",
                    &[],
                ),
                panel(
                    "Reliability",
                    "",
                    &[
                        "Out-of-range jumps are silent no-ops",
                        "Stopping auto-play cancels its tick for good",
                        "The timer logic is covered by deterministic tests",
                    ],
                ),
                panel(
                    "Try it",
                    "Press H for the shortcut overlay, or just start pressing arrows.\nThis deck \
                     wraps around — keep going.",
                    &[],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_deck_has_fifteen_panels() {
        let deck = Deck::builtin();
        assert_eq!(deck.len(), 15);
        assert_eq!(deck.display_title(), "Deckpilot");
        assert!(deck.panels.iter().all(|p| !p.heading.is_empty()));
    }

    #[test]
    fn deck_parses_from_yaml() {
        let yaml = "\
title: Standup
theme: light
panels:
  - heading: Yesterday
    bullets:
      - Shipped the importer
      - Fixed the flaky test
  - heading: Today
    body: Pairing on the release.
";
        let deck: Deck = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.title.as_deref(), Some("Standup"));
        assert_eq!(deck.theme.as_deref(), Some("light"));
        assert_eq!(deck.panels[0].bullets.len(), 2);
        assert_eq!(deck.panels[1].body.as_deref(), Some("Pairing on the release."));
    }

    #[test]
    fn panels_key_is_required() {
        let result: Result<Deck, _> = serde_yaml::from_str("title: Empty\n");
        assert!(result.is_err());
    }

    #[test]
    fn empty_panel_list_is_rejected_on_load() {
        let dir = std::env::temp_dir();
        let path = dir.join("deckpilot-empty-deck-test.yaml");
        std::fs::write(&path, "panels: []\n").unwrap();
        let err = Deck::load(&path).unwrap_err();
        assert!(err.to_string().contains("No panels"));
        let _ = std::fs::remove_file(&path);
    }
}
