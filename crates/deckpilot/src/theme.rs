use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Background for badges, toasts and the HUD panel.
    pub surface: Color32,
    pub heading_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x10, 0x14, 0x1C),
            foreground: Color32::from_rgb(0xC2, 0xCA, 0xD6),
            heading_color: Color32::from_rgb(0xF2, 0xF6, 0xFC),
            accent: Color32::from_rgb(0x3E, 0xC6, 0xD8),
            surface: Color32::from_rgb(0x1C, 0x24, 0x30),
            heading_size: 72.0,
            body_size: 30.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFA, 0xFA, 0xF7),
            foreground: Color32::from_rgb(0x2A, 0x30, 0x3A),
            heading_color: Color32::from_rgb(0x11, 0x1A, 0x2B),
            accent: Color32::from_rgb(0x0E, 0x7E, 0x8E),
            surface: Color32::from_rgb(0xEC, 0xED, 0xE8),
            heading_size: 72.0,
            body_size: 30.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
