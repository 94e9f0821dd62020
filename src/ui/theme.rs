use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

/// Theme configuration for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Theme name for identification
    pub name: String,

    /// Primary accent (results tab, focused borders)
    pub primary: String,

    /// Setlist / favourite accent
    pub accent: String,

    /// History accent
    pub secondary: String,

    /// Easy songs, info messages
    pub success: String,

    /// Medium songs, selection highlight
    pub warning: String,

    /// Hard songs, error banner
    pub error: String,

    pub text: String,

    pub text_muted: String,

    pub border_focused: String,

    pub border_normal: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    /// Parse a color string to ratatui Color
    pub fn parse_color(color_str: &str) -> Color {
        match color_str.trim() {
            "Reset" => Color::Reset,
            "Black" => Color::Black,
            "Red" => Color::Red,
            "Green" => Color::Green,
            "Yellow" => Color::Yellow,
            "Blue" => Color::Blue,
            "Magenta" => Color::Magenta,
            "Cyan" => Color::Cyan,
            "Gray" | "Grey" => Color::Gray,
            "DarkGray" | "DarkGrey" => Color::DarkGray,
            "LightRed" => Color::LightRed,
            "LightGreen" => Color::LightGreen,
            "LightYellow" => Color::LightYellow,
            "LightBlue" => Color::LightBlue,
            "LightMagenta" => Color::LightMagenta,
            "LightCyan" => Color::LightCyan,
            "White" => Color::White,
            s if s.starts_with('#') => match parse_hex_color(s) {
                Some((r, g, b)) => Color::Rgb(r, g, b),
                None => Color::Reset,
            },
            s => s.parse::<u8>().map(Color::Indexed).unwrap_or(Color::Reset),
        }
    }

    pub fn primary(&self) -> Color {
        Self::parse_color(&self.primary)
    }

    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }

    pub fn secondary(&self) -> Color {
        Self::parse_color(&self.secondary)
    }

    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }

    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }

    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }

    pub fn text(&self) -> Color {
        Self::parse_color(&self.text)
    }

    pub fn text_muted(&self) -> Color {
        Self::parse_color(&self.text_muted)
    }

    pub fn border_focused(&self) -> Color {
        Self::parse_color(&self.border_focused)
    }

    pub fn border_normal(&self) -> Color {
        Self::parse_color(&self.border_normal)
    }

    pub fn difficulty_color(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Easy => self.success(),
            Difficulty::Medium => self.warning(),
            Difficulty::Hard => self.error(),
        }
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.warning())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused())
        } else {
            Style::default().fg(self.border_normal())
        }
    }

    // Built-in theme presets
    pub fn neon() -> Self {
        Self {
            name: "neon".to_string(),
            primary: "#00e5ff".to_string(),
            accent: "#ff2a6d".to_string(),
            secondary: "#c084fc".to_string(),
            success: "#4ade80".to_string(),
            warning: "#facc15".to_string(),
            error: "#f87171".to_string(),
            text: "White".to_string(),
            text_muted: "Gray".to_string(),
            border_focused: "#bf00ff".to_string(),
            border_normal: "DarkGray".to_string(),
        }
    }

    /// 16-color fallback for terminals without truecolor
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            primary: "Cyan".to_string(),
            accent: "Magenta".to_string(),
            secondary: "LightMagenta".to_string(),
            success: "Green".to_string(),
            warning: "Yellow".to_string(),
            error: "Red".to_string(),
            text: "White".to_string(),
            text_muted: "Gray".to_string(),
            border_focused: "Cyan".to_string(),
            border_normal: "DarkGray".to_string(),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: "#8be9fd".to_string(),
            accent: "#ff79c6".to_string(),
            secondary: "#bd93f9".to_string(),
            success: "#50fa7b".to_string(),
            warning: "#f1fa8c".to_string(),
            error: "#ff5555".to_string(),
            text: "#f8f8f2".to_string(),
            text_muted: "#6272a4".to_string(),
            border_focused: "#bd93f9".to_string(),
            border_normal: "#44475a".to_string(),
        }
    }

    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "neon" => Some(Self::neon()),
            "classic" => Some(Self::classic()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Resolve a configured theme: a known preset name wins over custom colors
    pub fn resolve(self) -> Self {
        Self::from_preset(&self.name).unwrap_or(self)
    }
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
