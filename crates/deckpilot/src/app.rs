use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::Config;
use crate::controller::{DEFAULT_INTERVAL_SECS, NavigationController, StateChange};
use crate::deck::Deck;
use crate::fullscreen::{self, FullscreenState};
use crate::input::{self, Command};
use crate::render;
use crate::theme::Theme;

const INDICATOR_GAP: f32 = 26.0;
const INDICATOR_RADIUS: f32 = 5.0;
const INDICATOR_HIT_RADIUS: f32 = 11.0;
const PROGRESS_HEIGHT: f32 = 4.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    const DURATION: f32 = 3.0;
    const FADE_START: f32 = 2.0;

    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < Self::FADE_START {
            1.0
        } else if elapsed < Self::DURATION {
            1.0 - (elapsed - Self::FADE_START) / (Self::DURATION - Self::FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= Self::DURATION
    }
}

/// Center of the `index`-th indicator dot.
fn indicator_center(rect: egui::Rect, scale: f32, count: usize, index: usize) -> egui::Pos2 {
    let gap = INDICATOR_GAP * scale;
    let row_width = gap * count.saturating_sub(1) as f32;
    egui::pos2(
        rect.center().x - row_width / 2.0 + index as f32 * gap,
        rect.bottom() - 48.0 * scale,
    )
}

/// Which indicator dot, if any, a pointer position lands on.
fn indicator_hit(rect: egui::Rect, scale: f32, count: usize, pos: egui::Pos2) -> Option<usize> {
    let hit_radius = INDICATOR_HIT_RADIUS * scale;
    (0..count).find(|&i| indicator_center(rect, scale, count, i).distance(pos) <= hit_radius)
}

struct ViewerApp {
    deck: Deck,
    controller: NavigationController,
    theme: Theme,
    fullscreen: FullscreenState,
    toast: Option<Toast>,
    /// When the current panel's entrance animation started.
    entrance: Option<Instant>,
    welcome_at: Option<Instant>,
    last_esc: Option<Instant>,
    touch_start: Option<egui::Pos2>,
    /// Surface rect cached from the last frame, used to resolve clicks.
    last_rect: egui::Rect,
    show_hud: bool,
    frame_count: u32,
    fps: f32,
    fps_update: Instant,
}

impl ViewerApp {
    fn new(deck: Deck, theme: Theme, interval: u32, windowed: bool) -> Self {
        let now = Instant::now();
        let controller = NavigationController::new(deck.len(), interval);
        Self {
            deck,
            controller,
            theme,
            fullscreen: FullscreenState::new(!windowed),
            toast: None,
            entrance: Some(now),
            welcome_at: Some(now + Duration::from_secs(1)),
            last_esc: None,
            touch_start: None,
            last_rect: egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 720.0)),
            show_hud: false,
            frame_count: 0,
            fps: 0.0,
            fps_update: now,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_update.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_update = Instant::now();
        }
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    /// Escape: stop auto-play when running, otherwise double-tap to quit.
    fn handle_escape(&mut self, now: Instant) -> bool {
        if self.controller.stop_auto_play(now) {
            self.last_esc = None;
            return false;
        }
        if let Some(last) = self.last_esc {
            if last.elapsed().as_secs_f32() < 1.0 {
                return true;
            }
        }
        self.last_esc = Some(Instant::now());
        self.toast = Some(Toast::new("Press Esc again to exit"));
        false
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps();
        let now = Instant::now();
        let screen_rect = self.last_rect;
        let scale = Self::compute_scale(screen_rect);
        let total = self.controller.total_slides();

        // Collect commands inside the input closure, act on them after.
        // (Sending viewport commands inside ctx.input() deadlocks the
        // input RwLock.)
        let mut commands: Vec<Command> = Vec::new();
        let mut clicked_pos: Option<egui::Pos2> = None;
        let observed_fullscreen = ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        if let Some(cmd) = input::key_command(*key, *modifiers) {
                            commands.push(cmd);
                        }
                    }
                    egui::Event::Touch { phase, pos, .. } => match phase {
                        egui::TouchPhase::Start => self.touch_start = Some(*pos),
                        egui::TouchPhase::End => {
                            if let Some(start) = self.touch_start.take() {
                                if let Some(cmd) = input::swipe_command(pos.x - start.x) {
                                    commands.push(cmd);
                                }
                            }
                        }
                        egui::TouchPhase::Cancel => self.touch_start = None,
                        egui::TouchPhase::Move => {}
                    },
                    _ => {}
                }
            }
            if i.pointer.primary_clicked() {
                clicked_pos = i.pointer.interact_pos();
            }
            i.viewport().fullscreen.unwrap_or(false)
        });

        // Clicks: the HUD swallows them, indicator dots jump directly,
        // anything else navigates by surface half.
        if let Some(pos) = clicked_pos {
            if self.show_hud {
                self.show_hud = false;
            } else if let Some(i) = indicator_hit(screen_rect, scale, total, pos) {
                commands.push(Command::GoTo(i + 1));
            } else {
                commands.push(input::click_command(
                    pos.x - screen_rect.left(),
                    screen_rect.width(),
                ));
            }
        }

        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        for cmd in commands {
            match cmd {
                Command::Next => self.controller.next_slide(),
                Command::Previous => self.controller.previous_slide(),
                Command::First => self.controller.go_to_slide(1),
                Command::Last => self.controller.go_to_slide(total),
                Command::GoTo(n) => self.controller.go_to_slide(n),
                Command::ToggleAutoPlay => self.controller.toggle_auto_play(now),
                Command::Stop => {
                    if self.handle_escape(now) {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                    }
                }
                Command::ToggleFullscreen => {
                    let target = self.fullscreen.request_toggle(now);
                    viewport_cmds.push(egui::ViewportCommand::Fullscreen(target));
                }
                Command::ToggleTheme => self.toggle_theme(),
                Command::ToggleHud => self.show_hud = !self.show_hud,
                Command::Quit => viewport_cmds.push(egui::ViewportCommand::Close),
            }
        }
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if let Some(outcome) = self.fullscreen.observe(observed_fullscreen, now) {
            if outcome == fullscreen::Outcome::Unavailable {
                self.toast = Some(Toast::new(
                    "Fullscreen not available here. Try your window manager's shortcut.",
                ));
            }
        }

        // Drive the auto-play timer and keep frames coming while it runs.
        self.controller.poll_ticks(now);
        if let Some(next) = self.controller.next_tick() {
            ctx.request_repaint_after(next.saturating_duration_since(Instant::now()));
        }

        for event in self.controller.drain_events() {
            match event {
                StateChange::SlideChanged { .. } => self.entrance = Some(now),
                StateChange::AutoPlayStarted => {
                    self.toast = Some(Toast::new("Auto-play started. Press Esc to stop."));
                }
                StateChange::AutoPlayStopped => {
                    self.toast = Some(Toast::new("Auto-play stopped."));
                }
                StateChange::CountdownTicked { .. } => {}
            }
        }

        if let Some(at) = self.welcome_at {
            if now >= at {
                self.toast = Some(Toast::new(
                    "Welcome! Arrows or click to navigate, H for shortcuts.",
                ));
                self.welcome_at = None;
            } else {
                ctx.request_repaint_after(at - now);
            }
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.last_rect = rect;
                let scale = Self::compute_scale(rect);
                ui.painter().rect_filled(rect, 0.0, bg);

                let index = self.controller.current_slide() - 1;
                let animating = render::draw_panel(
                    ui,
                    &self.deck.panels[index],
                    &self.theme,
                    rect,
                    self.entrance,
                    scale,
                );
                if animating {
                    ctx.request_repaint();
                } else {
                    self.entrance = None;
                }

                self.draw_chrome(ui, rect, scale);

                if let Some(ref toast) = self.toast {
                    draw_toast(ui, toast, &self.theme, rect, scale);
                    ctx.request_repaint();
                }

                if self.show_hud {
                    draw_hud(ui, &self.theme, rect, scale);
                }
            });
    }
}

impl ViewerApp {
    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let status = self.controller.status();

        // Progress bar along the bottom edge.
        let bar_h = PROGRESS_HEIGHT * scale;
        let track = egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.bottom() - bar_h),
            rect.right_bottom(),
        );
        ui.painter()
            .rect_filled(track, 0.0, Theme::with_opacity(self.theme.foreground, 0.08));
        let fill = egui::Rect::from_min_max(
            track.left_top(),
            egui::pos2(rect.left() + rect.width() * status.progress, rect.bottom()),
        );
        ui.painter().rect_filled(fill, 0.0, self.theme.accent);

        // Slide counter.
        let counter_text = format!("{} / {}", status.current, status.total);
        let counter_color = Theme::with_opacity(self.theme.foreground, 0.4);
        let counter_galley = ui.painter().layout_no_wrap(
            counter_text,
            egui::FontId::monospace(15.0 * scale),
            counter_color,
        );
        let counter_pos = egui::pos2(
            rect.right() - counter_galley.rect.width() - 20.0 * scale,
            rect.bottom() - 36.0 * scale,
        );
        ui.painter()
            .galley(counter_pos, counter_galley, counter_color);

        // Indicator dots, the current one lit.
        for i in 0..status.total {
            let center = indicator_center(rect, scale, status.total, i);
            if i + 1 == status.current {
                ui.painter()
                    .circle_filled(center, (INDICATOR_RADIUS + 1.5) * scale, self.theme.accent);
            } else {
                ui.painter().circle_filled(
                    center,
                    INDICATOR_RADIUS * scale,
                    Theme::with_opacity(self.theme.foreground, 0.3),
                );
            }
        }

        // Auto-play countdown badge, blank while inactive.
        if let Some(remaining) = status.countdown {
            let badge_text = format!("auto \u{00b7} {remaining}s");
            let badge_color = Theme::with_opacity(self.theme.accent, 0.9);
            let galley = ui.painter().layout_no_wrap(
                badge_text,
                egui::FontId::monospace(16.0 * scale),
                badge_color,
            );
            let padding = 8.0 * scale;
            let badge_rect = egui::Rect::from_min_size(
                egui::pos2(rect.left() + 16.0 * scale, rect.top() + 12.0 * scale),
                galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
            );
            ui.painter().rect_filled(
                badge_rect,
                6.0 * scale,
                Theme::with_opacity(self.theme.surface, 0.85),
            );
            ui.painter().galley(
                badge_rect.min + egui::vec2(padding, padding),
                galley,
                badge_color,
            );
        }

        // FPS overlay.
        let fps_text = format!("{:.0} fps", self.fps);
        let fps_color = Theme::with_opacity(self.theme.foreground, 0.3);
        let fps_galley =
            ui.painter()
                .layout_no_wrap(fps_text, egui::FontId::monospace(14.0 * scale), fps_color);
        let fps_pos = egui::pos2(
            rect.right() - fps_galley.rect.width() - 12.0 * scale,
            rect.top() + 10.0 * scale,
        );
        ui.painter().galley(fps_pos, fps_galley, fps_color);
    }
}

fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let text_color = Theme::with_opacity(theme.foreground, opacity * 0.95);
    let bg = Theme::with_opacity(theme.surface, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(20.0 * scale),
        text_color,
    );
    let padding = 16.0 * scale;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 110.0 * scale,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, bg);
    ui.painter().galley(
        egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
        galley,
        text_color,
    );
}

fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let shortcuts = [
        ("Space / N / \u{2192} / PgDn", "Next slide"),
        ("P / \u{2190} / PgUp", "Previous slide"),
        ("Click left / right half", "Previous / next"),
        ("Swipe", "Previous / next"),
        ("Home / End", "First / last slide"),
        ("Dots", "Jump to slide"),
        ("Ctrl+P", "Toggle auto-play"),
        ("Esc", "Stop auto-play / \u{00d7}2 exit"),
        ("F / F11", "Toggle fullscreen"),
        ("D", "Toggle theme"),
        ("H", "Toggle this HUD"),
        ("Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.surface, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let hud_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 440.0 * scale;

    let hud_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));
    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Controls".to_string(),
        egui::FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    let title_pos = egui::pos2(hud_rect.left() + padding, hud_rect.top() + padding);
    ui.painter().galley(title_pos, title_galley, text_color);

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in &shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(15.0 * scale),
            key_color,
        );
        ui.painter().galley(
            egui::pos2(hud_rect.left() + padding, y),
            key_galley,
            key_color,
        );

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(15.0 * scale),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(hud_rect.left() + padding + 230.0 * scale, y),
            desc_galley,
            text_color,
        );

        y += line_height;
    }
}

pub fn run(
    deck: Deck,
    windowed: bool,
    start_slide: Option<usize>,
    autoplay: bool,
    interval_flag: Option<u32>,
) -> anyhow::Result<()> {
    let total = deck.len();
    let config = Config::load_or_default();
    let defaults = config.defaults.as_ref();

    let theme_name = deck
        .theme
        .clone()
        .or_else(|| defaults.and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "dark".to_string());
    let theme = Theme::from_name(&theme_name);

    let interval = interval_flag
        .or_else(|| defaults.and_then(|d| d.interval))
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    // CLI flag wins over the configured start mode; both clamp into range.
    let initial_slide = match start_slide {
        Some(n) => n.clamp(1, total),
        None => match defaults.and_then(|d| d.start_mode.as_deref()) {
            Some("last") => total,
            Some("first") | None => 1,
            Some(s) => s.parse::<usize>().map_or(1, |n| n.clamp(1, total)),
        },
    };

    let title = format!("deckpilot \u{2014} {}", deck.display_title());
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            let mut app = ViewerApp::new(deck, theme, interval, windowed);
            app.controller.go_to_slide(initial_slide);
            if autoplay {
                app.controller.toggle_auto_play(Instant::now());
            }
            app.controller.drain_events();
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
