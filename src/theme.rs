use ratatui::style::Color;
use serde::Deserialize;

/// Color slots used by the picker views.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub accent: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection_bg: Color,
    pub warning: Color,

    // Candidate blocks
    pub ours_fg: Color,
    pub theirs_fg: Color,
    pub suggestion_fg: Color,
    /// Gutter bar on lines that differ between ours and theirs.
    pub changed_fg: Color,
}

pub const THEME_NAMES: &[&str] = &["one-dark", "dracula", "paper"];

impl Theme {
    /// Built-in theme by name; unknown names get the default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dracula" => dracula(),
            "paper" => paper(),
            _ => one_dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        one_dark()
    }
}

/// `#rrggbb` or `rrggbb`.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

/// `[colors]` table from the config file; every slot is optional.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub selection_bg: Option<String>,
    pub warning: Option<String>,
    pub ours: Option<String>,
    pub theirs: Option<String>,
    pub suggestion: Option<String>,
    pub changed: Option<String>,
}

/// Overwrite slots that have a valid hex value; invalid ones are ignored.
pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    let slots: [(&Option<String>, &mut Color); 10] = [
        (&overrides.accent, &mut theme.accent),
        (&overrides.secondary, &mut theme.secondary),
        (&overrides.text, &mut theme.text),
        (&overrides.text_muted, &mut theme.text_muted),
        (&overrides.selection_bg, &mut theme.selection_bg),
        (&overrides.warning, &mut theme.warning),
        (&overrides.ours, &mut theme.ours_fg),
        (&overrides.theirs, &mut theme.theirs_fg),
        (&overrides.suggestion, &mut theme.suggestion_fg),
        (&overrides.changed, &mut theme.changed_fg),
    ];
    for (value, slot) in slots {
        if let Some(color) = value.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Rgb(86, 182, 194),
        secondary: Color::Rgb(198, 120, 221),
        text: Color::Rgb(171, 178, 191),
        text_muted: Color::Rgb(92, 99, 112),
        selection_bg: Color::Rgb(44, 49, 58),
        warning: Color::Rgb(229, 192, 123),
        ours_fg: Color::Rgb(97, 175, 239),
        theirs_fg: Color::Rgb(209, 154, 102),
        suggestion_fg: Color::Rgb(152, 195, 121),
        changed_fg: Color::Rgb(229, 192, 123),
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(139, 233, 253),
        secondary: Color::Rgb(255, 121, 198),
        text: Color::Rgb(248, 248, 242),
        text_muted: Color::Rgb(98, 114, 164),
        selection_bg: Color::Rgb(68, 71, 90),
        warning: Color::Rgb(241, 250, 140),
        ours_fg: Color::Rgb(189, 147, 249),
        theirs_fg: Color::Rgb(255, 184, 108),
        suggestion_fg: Color::Rgb(80, 250, 123),
        changed_fg: Color::Rgb(241, 250, 140),
    }
}

/// For light terminal backgrounds.
fn paper() -> Theme {
    Theme {
        name: "paper".to_string(),
        accent: Color::Rgb(0, 92, 197),
        secondary: Color::Rgb(111, 66, 193),
        text: Color::Rgb(36, 41, 47),
        text_muted: Color::Rgb(110, 119, 129),
        selection_bg: Color::Rgb(221, 235, 255),
        warning: Color::Rgb(154, 103, 0),
        ours_fg: Color::Rgb(9, 105, 218),
        theirs_fg: Color::Rgb(188, 76, 0),
        suggestion_fg: Color::Rgb(26, 127, 55),
        changed_fg: Color::Rgb(154, 103, 0),
    }
}
