use std::time::Instant;

use eframe::egui;

use crate::deck::Panel;
use crate::theme::Theme;

/// Delay between successive elements joining the entrance animation.
const ENTRANCE_STAGGER: f32 = 0.1;
/// Fade duration of a single element.
const ENTRANCE_FADE: f32 = 0.35;

/// Opacity of the `index`-th panel element, `entrance` being the moment the
/// panel became current. `None` means the animation already finished.
fn entrance_opacity(entrance: Option<Instant>, index: usize) -> f32 {
    let Some(start) = entrance else { return 1.0 };
    let local = start.elapsed().as_secs_f32() - index as f32 * ENTRANCE_STAGGER;
    (local / ENTRANCE_FADE).clamp(0.0, 1.0)
}

/// Draw one panel into `rect`. Returns true while the entrance animation is
/// still running, so the caller keeps repainting.
pub fn draw_panel(
    ui: &egui::Ui,
    panel: &Panel,
    theme: &Theme,
    rect: egui::Rect,
    entrance: Option<Instant>,
    scale: f32,
) -> bool {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let mut element = 0usize;
    let mut animating = false;
    let mut draw_text = |text: &str, font: egui::FontId, color: egui::Color32, y: f32| -> f32 {
        let opacity = entrance_opacity(entrance, element);
        if opacity < 1.0 {
            animating = true;
        }
        element += 1;
        let galley = ui.painter().layout(
            text.to_string(),
            font,
            Theme::with_opacity(color, opacity),
            content_rect.width(),
        );
        let height = galley.rect.height();
        ui.painter().galley(
            egui::pos2(content_rect.left(), y),
            galley,
            Theme::with_opacity(color, opacity),
        );
        height
    };

    let mut y = content_rect.top() + 40.0 * scale;
    let heading_font = egui::FontId::proportional(theme.heading_size * scale);
    y += draw_text(&panel.heading, heading_font, theme.heading_color, y) + 36.0 * scale;

    let body_font = egui::FontId::proportional(theme.body_size * scale);
    if let Some(body) = &panel.body {
        y += draw_text(body, body_font.clone(), theme.foreground, y) + 24.0 * scale;
    }

    for bullet in &panel.bullets {
        let line = format!("\u{2022}  {bullet}");
        y += draw_text(&line, body_font.clone(), theme.foreground, y) + 12.0 * scale;
    }

    animating
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn finished_animation_is_fully_opaque() {
        assert_eq!(entrance_opacity(None, 0), 1.0);
        assert_eq!(entrance_opacity(None, 10), 1.0);
    }

    #[test]
    fn later_elements_start_hidden() {
        // An entrance that began just now: element 0 is barely visible,
        // element 5 has not started fading yet.
        let start = Instant::now();
        assert!(entrance_opacity(Some(start), 5) == 0.0);
    }

    #[test]
    fn old_entrance_is_fully_opaque_for_all_elements() {
        let start = Instant::now() - Duration::from_secs(10);
        assert_eq!(entrance_opacity(Some(start), 0), 1.0);
        assert_eq!(entrance_opacity(Some(start), 20), 1.0);
    }
}
